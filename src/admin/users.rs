//! Users manager
//!
//! Unlike the other managers the user list is filtered server side; the
//! filter travels as query parameters on every refresh.

use parking_lot::RwLock;
use tracing::warn;

use crate::models::{AdminUser, UserDraft, UserUpdate};

use super::{AdminContext, Collection};

pub use crate::api::UserQuery as UserFilter;

const SELF_CHANGE: &str = "You cannot modify your own account";

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct UserCounts {
    pub total: usize,
    pub staff: usize,
    pub active: usize,
    pub inactive: usize,
}

pub struct UsersManager {
    ctx: AdminContext,
    items: Collection<AdminUser>,
    filter: RwLock<UserFilter>,
}

impl UsersManager {
    pub fn new(ctx: AdminContext) -> Self {
        Self {
            ctx,
            items: Collection::new(),
            filter: RwLock::new(UserFilter::default()),
        }
    }

    pub fn filter(&self) -> UserFilter {
        self.filter.read().clone()
    }

    /// Takes effect on the next [`UsersManager::refresh`]
    pub fn set_filter(&self, filter: UserFilter) {
        *self.filter.write() = filter;
    }

    pub async fn refresh(&self) -> bool {
        self.items.begin_load();
        let filter = self.filter();
        let result = self.ctx.api.admin_users(&filter).await;
        self.items
            .finish_load(result, self.ctx.notifier.as_ref(), "Failed to load users")
    }

    pub fn is_loading(&self) -> bool {
        self.items.is_loading()
    }

    pub fn users(&self) -> Vec<AdminUser> {
        self.items.snapshot()
    }

    pub fn get(&self, id: i64) -> Option<AdminUser> {
        self.items.find(|u| u.id == id)
    }

    pub fn counts(&self) -> UserCounts {
        UserCounts {
            total: self.items.len(),
            staff: self.items.count(|u| u.is_staff),
            active: self.items.count(|u| u.is_active),
            inactive: self.items.count(|u| !u.is_active),
        }
    }

    /// Look up a fetched user that the signed-in admin may act on
    fn target(&self, id: i64, failure: &str) -> Option<AdminUser> {
        match self.get(id) {
            None => {
                warn!(id, "User not in the fetched list");
                self.ctx.notifier.error(failure);
                None
            }
            Some(user) if user.is_current_user => {
                self.ctx.notifier.error(SELF_CHANGE);
                None
            }
            Some(user) => Some(user),
        }
    }

    pub async fn create(&self, draft: &UserDraft) -> bool {
        if let Err(e) = draft.validate() {
            self.ctx.notifier.error(&e.to_string());
            return false;
        }

        let result = self.ctx.api.create_user(draft).await;
        let ok = self
            .ctx
            .report_server_message(result, "User created successfully", "Failed to create user");
        if ok {
            self.refresh().await;
        }
        ok
    }

    pub async fn update(&self, id: i64, update: &UserUpdate) -> bool {
        if self.target(id, "Failed to update user").is_none() {
            return false;
        }
        if let Err(e) = update.validate() {
            self.ctx.notifier.error(&e.to_string());
            return false;
        }

        let result = self.ctx.api.update_user(id, update).await;
        let ok = self
            .ctx
            .report_server_message(result, "User updated successfully", "Failed to update user");
        if ok {
            self.refresh().await;
        }
        ok
    }

    pub async fn toggle_active(&self, id: i64) -> bool {
        let Some(user) = self.target(id, "Failed to update user status") else {
            return false;
        };

        let activate = !user.is_active;
        let result = self.ctx.api.set_user_active(id, activate).await;
        let success = if activate {
            "User activated"
        } else {
            "User deactivated"
        };
        let ok = self
            .ctx
            .report_server_message(result, success, "Failed to update user status");
        if ok {
            self.refresh().await;
        }
        ok
    }

    pub async fn toggle_staff(&self, id: i64) -> bool {
        let Some(user) = self.target(id, "Failed to update user role") else {
            return false;
        };

        let promote = !user.is_staff;
        let result = self.ctx.api.set_user_staff(id, promote).await;
        let success = if promote {
            "User promoted to staff"
        } else {
            "User demoted from staff"
        };
        let ok = self
            .ctx
            .report_server_message(result, success, "Failed to update user role");
        if ok {
            self.refresh().await;
        }
        ok
    }

    pub async fn delete(&self, id: i64) -> bool {
        let Some(user) = self.target(id, "Failed to delete user") else {
            return false;
        };

        let prompt = format!(
            "Are you sure you want to delete user \"{}\"? This action cannot be undone.",
            user.username
        );
        if !self.ctx.confirm.confirm(&prompt) {
            return false;
        }

        let result = self.ctx.api.delete_user(id).await;
        let ok = self
            .ctx
            .report(result, "User deleted successfully", "Failed to delete user");
        if ok {
            self.refresh().await;
        }
        ok
    }
}
