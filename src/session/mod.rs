//! Session
//!
//! The authenticated identity of one running client. A [`Session`] owns the
//! [`ApiClient`] and is the only thing that writes tokens on login, register
//! and logout. The API layer may clear tokens on its own when a bearer token
//! is rejected; [`Session::user`] then reports the session as signed out.

mod store;

pub use store::{
    FileTokenStore, MemoryTokenStore, StoreError, TokenStore, TokenStoreExt, Tokens,
    ACCESS_TOKEN_KEY, REFRESH_TOKEN_KEY,
};

use parking_lot::RwLock;
use tracing::{debug, error, info, warn};

use crate::api::dto::{AuthResponse, LoginRequest, RegisterRequest};
use crate::api::{ApiClient, ApiError, ApiResult};
use crate::models::Profile;

/// Result of a login or register attempt
#[derive(Debug, Clone, PartialEq)]
pub enum AuthOutcome {
    Success(Profile),
    /// `error` is the server's message or a generic fallback
    Failure { error: String },
}

impl AuthOutcome {
    pub fn is_success(&self) -> bool {
        matches!(self, AuthOutcome::Success(_))
    }
}

#[derive(Debug)]
struct SessionState {
    profile: Option<Profile>,
    loading: bool,
}

/// Client session: tokens, profile and the API client they authorize
#[derive(Debug)]
pub struct Session {
    api: ApiClient,
    state: RwLock<SessionState>,
}

impl Session {
    /// New session in the loading phase; call [`Session::restore`] next
    pub fn new(api: ApiClient) -> Self {
        Self {
            api,
            state: RwLock::new(SessionState {
                profile: None,
                loading: true,
            }),
        }
    }

    pub fn api(&self) -> &ApiClient {
        &self.api
    }

    // ============================================
    // Accessors
    // ============================================

    /// Current profile, `None` once the stored tokens are gone
    pub fn user(&self) -> Option<Profile> {
        self.api.tokens().access_token()?;
        self.state.read().profile.clone()
    }

    pub fn is_authenticated(&self) -> bool {
        self.user().is_some()
    }

    pub fn is_staff(&self) -> bool {
        self.user().map(|u| u.is_staff).unwrap_or(false)
    }

    pub fn is_loading(&self) -> bool {
        self.state.read().loading
    }

    // ============================================
    // Mutators
    // ============================================

    /// Rebuild the session from stored tokens
    ///
    /// Any failure signs out; nothing is retried. Always ends the loading
    /// phase.
    pub async fn restore(&self) {
        if self.api.tokens().tokens().is_some() {
            match self.api.profile().await {
                Ok(profile) => {
                    debug!(username = %profile.username, "Session restored");
                    self.state.write().profile = Some(profile);
                }
                Err(e) => {
                    warn!(error = %e, "Auto-login failed");
                    self.logout().await;
                }
            }
        }
        self.state.write().loading = false;
    }

    pub async fn login(&self, username: &str, password: &str) -> AuthOutcome {
        let body = LoginRequest {
            username: username.to_string(),
            password: password.to_string(),
        };
        let result = self.api.login(&body).await;
        self.establish(result, "Login failed")
    }

    pub async fn register(&self, username: &str, email: &str, password: &str, password2: &str) -> AuthOutcome {
        let body = RegisterRequest {
            username: username.to_string(),
            email: email.to_string(),
            password: password.to_string(),
            password2: password2.to_string(),
        };
        let result = self.api.register(&body).await;
        self.establish(result, "Registration failed")
    }

    fn establish(&self, result: Result<AuthResponse, ApiError>, fallback: &str) -> AuthOutcome {
        let response = match result {
            Ok(response) => response,
            Err(e) => {
                debug!(error = %e, "{}", fallback);
                return AuthOutcome::Failure {
                    error: e.message_or(fallback),
                };
            }
        };

        if let Err(e) = self.api.tokens().save_tokens(&response.tokens) {
            error!(error = %e, "Failed to persist tokens");
            return AuthOutcome::Failure {
                error: fallback.to_string(),
            };
        }

        info!(username = %response.user.username, "Signed in");
        let mut state = self.state.write();
        state.profile = Some(response.user.clone());
        state.loading = false;
        AuthOutcome::Success(response.user)
    }

    /// Sign out; the server call is best effort, local state always clears
    pub async fn logout(&self) {
        if let Some(refresh) = self.api.tokens().refresh_token() {
            if let Err(e) = self.api.logout(&refresh).await {
                warn!(error = %e, "Logout error");
            }
        }

        if let Err(e) = self.api.tokens().clear_tokens() {
            error!(error = %e, "Failed to clear stored tokens");
        }
        self.state.write().profile = None;
    }

    /// Re-fetch the profile of an authenticated session
    pub async fn refresh_profile(&self) -> ApiResult<Profile> {
        match self.api.profile().await {
            Ok(profile) => {
                self.state.write().profile = Some(profile.clone());
                Ok(profile)
            }
            Err(e) => {
                if e.is_unauthorized() {
                    self.state.write().profile = None;
                }
                Err(e)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    fn offline_session(store: Arc<MemoryTokenStore>) -> Session {
        // Port 9 (discard) is never served in tests; no request is expected
        Session::new(ApiClient::new("http://127.0.0.1:9", store))
    }

    #[test]
    fn test_new_session_is_loading_and_anonymous() {
        let session = offline_session(Arc::new(MemoryTokenStore::new()));
        assert!(session.is_loading());
        assert!(!session.is_authenticated());
        assert!(!session.is_staff());
    }

    #[test]
    fn test_user_hidden_once_tokens_cleared() {
        let store = Arc::new(MemoryTokenStore::with_tokens(&Tokens {
            access: "a".into(),
            refresh: "r".into(),
        }));
        let session = offline_session(store.clone());
        session.state.write().profile = Some(Profile {
            id: 1,
            username: "admin".into(),
            email: String::new(),
            first_name: String::new(),
            last_name: String::new(),
            is_staff: true,
            date_joined: None,
        });
        assert!(session.is_staff());

        store.clear_tokens().unwrap();
        assert!(session.user().is_none());
        assert!(!session.is_staff());
    }

    #[test]
    fn test_auth_outcome_flag() {
        assert!(!AuthOutcome::Failure { error: "Login failed".into() }.is_success());
    }
}
