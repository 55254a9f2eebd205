//! User records

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::forms::ValidationError;

/// Profile of the signed-in user, as returned by the auth endpoints
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Profile {
    pub id: i64,
    pub username: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub first_name: String,
    #[serde(default)]
    pub last_name: String,
    #[serde(default)]
    pub is_staff: bool,
    #[serde(default)]
    pub date_joined: Option<DateTime<Utc>>,
}

impl Profile {
    pub fn display_name(&self) -> String {
        let full = format!("{} {}", self.first_name, self.last_name);
        let full = full.trim();
        if full.is_empty() {
            self.username.clone()
        } else {
            full.to_string()
        }
    }
}

/// A user account in the admin back office
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AdminUser {
    pub id: i64,
    pub username: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub first_name: String,
    #[serde(default)]
    pub last_name: String,
    #[serde(default)]
    pub full_name: Option<String>,
    #[serde(default)]
    pub is_staff: bool,
    #[serde(default = "default_true")]
    pub is_active: bool,
    /// Set by the server on the record of the requesting admin
    #[serde(default)]
    pub is_current_user: bool,
    pub date_joined: DateTime<Utc>,
    #[serde(default)]
    pub last_login: Option<DateTime<Utc>>,
}

fn default_true() -> bool {
    true
}

impl AdminUser {
    pub fn display_name(&self) -> &str {
        self.full_name
            .as_deref()
            .filter(|n| !n.trim().is_empty())
            .unwrap_or(&self.username)
    }

    pub fn role_label(&self) -> &'static str {
        if self.is_staff {
            "Staff"
        } else {
            "User"
        }
    }

    pub fn to_update(&self) -> UserUpdate {
        UserUpdate {
            username: self.username.clone(),
            email: self.email.clone(),
            first_name: self.first_name.clone(),
            last_name: self.last_name.clone(),
            is_staff: self.is_staff,
            is_active: self.is_active,
        }
    }
}

/// Body for creating a user
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct UserDraft {
    pub username: String,
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    pub password: String,
    pub is_staff: bool,
    pub is_active: bool,
}

impl Default for UserDraft {
    fn default() -> Self {
        Self {
            username: String::new(),
            email: String::new(),
            first_name: String::new(),
            last_name: String::new(),
            password: String::new(),
            is_staff: false,
            is_active: true,
        }
    }
}

impl UserDraft {
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
        Ok(())
    }
}

/// Body for editing a user
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct UserUpdate {
    pub username: String,
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    pub is_staff: bool,
    pub is_active: bool,
}

impl UserUpdate {
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.username.trim().is_empty() {
            return Err(ValidationError::Required("Username"));
        }
        if self.email.trim().is_empty() {
            return Err(ValidationError::Required("Email"));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_profile_display_name() {
        let mut p = Profile {
            id: 1,
            username: "mjoseph".into(),
            email: String::new(),
            first_name: String::new(),
            last_name: String::new(),
            is_staff: false,
            date_joined: None,
        };
        assert_eq!(p.display_name(), "mjoseph");
        p.first_name = "Marie".into();
        assert_eq!(p.display_name(), "Marie");
    }

    #[test]
    fn test_admin_user_defaults_active() {
        let u: AdminUser = serde_json::from_value(serde_json::json!({
            "id": 4, "username": "pierre", "date_joined": "2023-11-20T08:00:00Z"
        }))
        .unwrap();
        assert!(u.is_active);
        assert!(!u.is_current_user);
        assert_eq!(u.display_name(), "pierre");
        assert_eq!(u.role_label(), "User");
    }

    #[test]
    fn test_user_draft_requires_password() {
        let draft = UserDraft {
            username: "a".into(),
            email: "a@b.ht".into(),
            ..Default::default()
        };
        assert_eq!(draft.validate(), Err(ValidationError::Required("Password")));
    }
}
