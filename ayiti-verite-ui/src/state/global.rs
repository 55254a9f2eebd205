//! Global Application State
//!
//! Reactive mirror of the client session, plus toasts and the auth modal.
//! The session itself lives in the client core; components call
//! [`GlobalState::sync`] after anything that may have changed it.

use leptos::*;
use std::sync::Arc;

use ayiti_verite::models::Profile;
use ayiti_verite::{AdminContext, ApiClient, AuthMode, Confirm, Notifier, Session, Toast};

use crate::storage::{api_base, LocalStorageTokens};

/// How long a success toast stays up
const SUCCESS_TIMEOUT_MS: u32 = 3000;
/// How long an error toast stays up
const ERROR_TIMEOUT_MS: u32 = 5000;

#[derive(Clone, Debug, PartialEq)]
pub struct ToastEntry {
    pub id: u64,
    pub toast: Toast,
}

/// Global application state provided to all components
#[derive(Clone, Copy)]
pub struct GlobalState {
    pub session: StoredValue<Arc<Session>>,
    /// Signed-in user, `None` when signed out
    pub user: RwSignal<Option<Profile>>,
    /// True until the stored session has been restored
    pub auth_loading: RwSignal<bool>,
    pub toasts: RwSignal<Vec<ToastEntry>>,
    /// Open auth modal and its mode
    pub auth_modal: RwSignal<Option<AuthMode>>,
    next_toast: StoredValue<u64>,
}

/// Provide global state to the component tree and start session restore
pub fn provide_global_state() -> GlobalState {
    let api = ApiClient::new(&api_base(), Arc::new(LocalStorageTokens));
    let state = GlobalState {
        session: store_value(Arc::new(Session::new(api))),
        user: create_rw_signal(None),
        auth_loading: create_rw_signal(true),
        toasts: create_rw_signal(Vec::new()),
        auth_modal: create_rw_signal(None),
        next_toast: store_value(0),
    };
    provide_context(state);

    spawn_local(async move {
        state.session.get_value().restore().await;
        state.sync();
    });

    state
}

pub fn use_global_state() -> GlobalState {
    expect_context::<GlobalState>()
}

impl GlobalState {
    pub fn api(&self) -> ApiClient {
        self.session.with_value(|s| s.api().clone())
    }

    /// Copy the session's user and loading flag into signals
    pub fn sync(&self) {
        let (user, loading) = self.session.with_value(|s| (s.user(), s.is_loading()));
        self.user.set(user);
        self.auth_loading.set(loading);
    }

    pub fn is_authenticated(&self) -> bool {
        self.user.with(|u| u.is_some())
    }

    pub fn is_staff(&self) -> bool {
        self.user.with(|u| u.as_ref().map_or(false, |u| u.is_staff))
    }

    pub fn notifier(&self) -> Arc<dyn Notifier> {
        Arc::new(SignalNotifier {
            toasts: self.toasts,
            next: self.next_toast,
        })
    }

    pub fn admin_context(&self) -> AdminContext {
        AdminContext::new(self.api(), self.notifier(), Arc::new(BrowserConfirm))
    }

    pub fn show_success(&self, message: &str) {
        self.notifier().success(message);
    }

    pub fn show_error(&self, message: &str) {
        self.notifier().error(message);
    }

    pub fn dismiss(&self, id: u64) {
        self.toasts.update(|t| t.retain(|entry| entry.id != id));
    }

    pub fn open_auth(&self, mode: AuthMode) {
        self.auth_modal.set(Some(mode));
    }

    pub fn close_auth(&self) {
        self.auth_modal.set(None);
    }

    pub async fn logout(&self) {
        self.session.get_value().logout().await;
        self.sync();
    }
}

// ============================================
// Feedback seams
// ============================================

/// Pushes toasts into the global signal and expires them on a timer
struct SignalNotifier {
    toasts: RwSignal<Vec<ToastEntry>>,
    next: StoredValue<u64>,
}

impl Notifier for SignalNotifier {
    fn notify(&self, toast: Toast) {
        let id = self.next.get_value();
        self.next.set_value(id + 1);

        let timeout = match toast.kind {
            ayiti_verite::ToastKind::Success => SUCCESS_TIMEOUT_MS,
            ayiti_verite::ToastKind::Error => ERROR_TIMEOUT_MS,
        };
        self.toasts.update(|t| t.push(ToastEntry { id, toast }));

        let toasts = self.toasts;
        gloo_timers::callback::Timeout::new(timeout, move || {
            toasts.update(|t| t.retain(|entry| entry.id != id));
        })
        .forget();
    }
}

/// `window.confirm`
struct BrowserConfirm;

impl Confirm for BrowserConfirm {
    fn confirm(&self, prompt: &str) -> bool {
        web_sys::window()
            .and_then(|w| w.confirm_with_message(prompt).ok())
            .unwrap_or(false)
    }
}
