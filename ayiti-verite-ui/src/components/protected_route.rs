//! Protected Route
//!
//! Wraps a page that needs a signed-in user, or a staff user. While the
//! stored session is being restored a spinner is shown instead.

use leptos::*;
use leptos_router::use_navigate;

use ayiti_verite::{Access, Gate, GateDecision};

use super::Loading;
use crate::state::use_global_state;

#[component]
pub fn Protected(access: Access, children: ChildrenFn) -> impl IntoView {
    let state = use_global_state();
    let navigate = use_navigate();
    let gate = Gate::new(access);

    let decision = create_memo(move |_| {
        state
            .user
            .with(|user| gate.decide_for(state.auth_loading.get(), user.as_ref()))
    });

    // One toast and one navigation per decision change
    create_effect(move |_| {
        if let GateDecision::Redirect { to, reason } = decision.get() {
            state.show_error(reason);
            navigate(to, Default::default());
        }
    });

    let children = store_value(children);

    move || match decision.get() {
        GateDecision::Loading => view! { <Loading /> }.into_view(),
        GateDecision::Redirect { .. } => ().into_view(),
        GateDecision::Render => children.with_value(|c| c()).into_view(),
    }
}
