//! Protected Routes
//!
//! Decides whether a guarded page may render for the current session. The
//! decision is recomputed on every mount.

use crate::models::Profile;
use crate::session::Session;

pub const LOGIN_REQUIRED: &str = "Please log in to access this page";
pub const ADMIN_REQUIRED: &str = "Admin access required";

/// Who may see a page
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Access {
    Authenticated,
    Staff,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GateDecision {
    /// Session restore still running; show a spinner
    Loading,
    /// Show `reason` as an error toast and navigate to `to`
    Redirect { to: &'static str, reason: &'static str },
    Render,
}

#[derive(Debug, Clone, Copy)]
pub struct Gate {
    access: Access,
}

impl Gate {
    pub fn new(access: Access) -> Self {
        Self { access }
    }

    pub fn authenticated() -> Self {
        Self::new(Access::Authenticated)
    }

    pub fn staff() -> Self {
        Self::new(Access::Staff)
    }

    pub fn decide(&self, session: &Session) -> GateDecision {
        self.decide_for(session.is_loading(), session.user().as_ref())
    }

    /// Decision from an already-read session snapshot
    pub fn decide_for(&self, loading: bool, user: Option<&Profile>) -> GateDecision {
        if loading {
            return GateDecision::Loading;
        }
        match (user, self.access) {
            (None, _) => GateDecision::Redirect {
                to: "/",
                reason: LOGIN_REQUIRED,
            },
            (Some(u), Access::Staff) if !u.is_staff => GateDecision::Redirect {
                to: "/",
                reason: ADMIN_REQUIRED,
            },
            _ => GateDecision::Render,
        }
    }
}
