//! Navigation Component
//!
//! Header with brand, page links and the sign-in controls.

use leptos::*;
use leptos_router::*;

use ayiti_verite::AuthMode;

use crate::state::use_global_state;

/// Navigation header component
#[component]
pub fn Nav() -> impl IntoView {
    let state = use_global_state();

    let navigate = use_navigate();
    let logout = Callback::new(move |_: ev::MouseEvent| {
        // Leave protected pages before the session goes away
        navigate("/", Default::default());
        spawn_local(async move {
            state.logout().await;
            state.show_success("Logged out");
        });
    });

    view! {
        <nav class="bg-blue-900 text-white shadow">
            <div class="container mx-auto px-4">
                <div class="flex items-center justify-between h-16">
                    <A href="/" class="flex items-center space-x-3">
                        <span class="text-2xl">"🇭🇹"</span>
                        <span class="text-xl font-bold">"Ayiti Vérité"</span>
                    </A>

                    <div class="flex items-center space-x-1">
                        <NavLink href="/" label="Home" />
                        <Show when=move || state.is_authenticated()>
                            <NavLink href="/dashboard" label="Dashboard" />
                        </Show>
                        <Show when=move || state.is_staff()>
                            <NavLink href="/admin" label="Admin" />
                        </Show>
                    </div>

                    <div class="flex items-center space-x-3">
                        {move || match state.user.get() {
                            Some(user) => view! {
                                <span class="text-sm text-blue-100">{format!("Hi, {}", user.display_name())}</span>
                                <button
                                    on:click=move |ev| logout.call(ev)
                                    class="px-4 py-2 rounded-lg bg-blue-700 hover:bg-blue-600 text-sm font-medium"
                                >
                                    "Logout"
                                </button>
                            }.into_view(),
                            None => view! {
                                <button
                                    on:click=move |_| state.open_auth(AuthMode::Login)
                                    class="px-4 py-2 rounded-lg hover:bg-blue-800 text-sm font-medium"
                                >
                                    "Login"
                                </button>
                                <button
                                    on:click=move |_| state.open_auth(AuthMode::Register)
                                    class="px-4 py-2 rounded-lg bg-red-600 hover:bg-red-700 text-sm font-medium"
                                >
                                    "Register"
                                </button>
                            }.into_view(),
                        }}
                    </div>
                </div>
            </div>
        </nav>
    }
}

/// Individual navigation link
#[component]
fn NavLink(
    href: &'static str,
    label: &'static str,
) -> impl IntoView {
    view! {
        <A
            href=href
            class="px-4 py-2 rounded-lg text-blue-100 hover:text-white hover:bg-blue-800 transition-colors"
            active_class="bg-blue-800 text-white"
        >
            {label}
        </A>
    }
}
