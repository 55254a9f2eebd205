//! Login and registration forms

use crate::session::{AuthOutcome, Session};

use super::ValidationError;

/// Which face of the auth modal is showing
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AuthMode {
    #[default]
    Login,
    Register,
}

impl AuthMode {
    pub fn toggled(self) -> Self {
        match self {
            AuthMode::Login => AuthMode::Register,
            AuthMode::Register => AuthMode::Login,
        }
    }

    pub fn title(self) -> &'static str {
        match self {
            AuthMode::Login => "Login",
            AuthMode::Register => "Register",
        }
    }

    /// Toast shown after a successful attempt
    pub fn success_message(self) -> &'static str {
        match self {
            AuthMode::Login => "Login successful!",
            AuthMode::Register => "Registration successful!",
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LoginForm {
    pub username: String,
    pub password: String,
}

impl LoginForm {
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.username.trim().is_empty() {
            return Err(ValidationError::Required("Username"));
        }
        if self.password.is_empty() {
            return Err(ValidationError::Required("Password"));
        }
        Ok(())
    }

    /// Validate locally, then sign in
    pub async fn submit(&self, session: &Session) -> AuthOutcome {
        if let Err(e) = self.validate() {
            return AuthOutcome::Failure { error: e.to_string() };
        }
        session.login(self.username.trim(), &self.password).await
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RegisterForm {
    pub username: String,
    pub email: String,
    pub password: String,
    pub password2: String,
}

impl RegisterForm {
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.username.trim().is_empty() {
            return Err(ValidationError::Required("Username"));
        }
        if self.email.trim().is_empty() {
            return Err(ValidationError::Required("Email"));
        }
        if self.password.is_empty() {
            return Err(ValidationError::Required("Password"));
        }
        if self.password != self.password2 {
            return Err(ValidationError::PasswordMismatch);
        }
        Ok(())
    }

    pub async fn submit(&self, session: &Session) -> AuthOutcome {
        if let Err(e) = self.validate() {
            return AuthOutcome::Failure { error: e.to_string() };
        }
        session
            .register(self.username.trim(), self.email.trim(), &self.password, &self.password2)
            .await
    }
}
