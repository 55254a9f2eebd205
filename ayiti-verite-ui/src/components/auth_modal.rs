//! Auth Modal
//!
//! Login and registration dialog, opened from the nav bar or when an
//! anonymous visitor tries to submit a claim.

use leptos::*;

use ayiti_verite::{AuthMode, AuthOutcome, LoginForm, RegisterForm};

use crate::state::use_global_state;

#[component]
pub fn AuthModal() -> impl IntoView {
    let state = use_global_state();

    let (username, set_username) = create_signal(String::new());
    let (email, set_email) = create_signal(String::new());
    let (password, set_password) = create_signal(String::new());
    let (password2, set_password2) = create_signal(String::new());
    let (submitting, set_submitting) = create_signal(false);
    let (error, set_error) = create_signal(None::<String>);

    let mode = move || state.auth_modal.get().unwrap_or_default();

    let reset = move || {
        set_username.set(String::new());
        set_email.set(String::new());
        set_password.set(String::new());
        set_password2.set(String::new());
        set_error.set(None);
    };

    let close = move |_| {
        reset();
        state.close_auth();
    };

    let toggle = move |_| {
        set_error.set(None);
        state.open_auth(mode().toggled());
    };

    let on_submit = move |ev: ev::SubmitEvent| {
        ev.prevent_default();
        let mode = mode();
        set_submitting.set(true);
        set_error.set(None);

        spawn_local(async move {
            let session = state.session.get_value();
            let outcome = match mode {
                AuthMode::Login => {
                    LoginForm {
                        username: username.get_untracked(),
                        password: password.get_untracked(),
                    }
                    .submit(&session)
                    .await
                }
                AuthMode::Register => {
                    RegisterForm {
                        username: username.get_untracked(),
                        email: email.get_untracked(),
                        password: password.get_untracked(),
                        password2: password2.get_untracked(),
                    }
                    .submit(&session)
                    .await
                }
            };
            state.sync();
            set_submitting.set(false);

            match outcome {
                AuthOutcome::Success(_) => {
                    state.show_success(mode.success_message());
                    reset();
                    state.close_auth();
                }
                AuthOutcome::Failure { error } => {
                    state.show_error(&error);
                    set_error.set(Some(error));
                }
            }
        });
    };

    let input_class = "w-full border border-gray-300 rounded-lg px-4 py-2 focus:border-blue-500 focus:outline-none";

    view! {
        <Show when=move || state.auth_modal.get().is_some()>
            <div class="fixed inset-0 z-40 bg-black/50 flex items-center justify-center px-4">
                <div class="bg-white text-gray-900 rounded-xl shadow-xl w-full max-w-md p-6">
                    <div class="flex items-center justify-between mb-4">
                        <h2 class="text-2xl font-bold">{move || mode().title()}</h2>
                        <button class="text-gray-500 hover:text-gray-800 text-2xl" on:click=close>"×"</button>
                    </div>

                    <form class="space-y-4" on:submit=on_submit>
                        <input
                            type="text"
                            placeholder="Username"
                            class=input_class
                            prop:value=move || username.get()
                            on:input=move |ev| set_username.set(event_target_value(&ev))
                        />
                        <Show when=move || mode() == AuthMode::Register>
                            <input
                                type="email"
                                placeholder="Email"
                                class=input_class
                                prop:value=move || email.get()
                                on:input=move |ev| set_email.set(event_target_value(&ev))
                            />
                        </Show>
                        <input
                            type="password"
                            placeholder="Password"
                            class=input_class
                            prop:value=move || password.get()
                            on:input=move |ev| set_password.set(event_target_value(&ev))
                        />
                        <Show when=move || mode() == AuthMode::Register>
                            <input
                                type="password"
                                placeholder="Confirm Password"
                                class=input_class
                                prop:value=move || password2.get()
                                on:input=move |ev| set_password2.set(event_target_value(&ev))
                            />
                        </Show>

                        {move || error.get().map(|e| view! {
                            <p class="text-sm text-red-600">{e}</p>
                        })}

                        <button
                            type="submit"
                            disabled=move || submitting.get()
                            class="w-full py-3 rounded-lg bg-blue-700 hover:bg-blue-800 disabled:bg-gray-400
                                   text-white font-medium transition-colors"
                        >
                            {move || if submitting.get() { "Please wait..." } else { mode().title() }}
                        </button>
                    </form>

                    <p class="text-sm text-center text-gray-600 mt-4">
                        {move || match mode() {
                            AuthMode::Login => "Don't have an account? ",
                            AuthMode::Register => "Already have an account? ",
                        }}
                        <button class="text-blue-700 font-medium hover:underline" on:click=toggle>
                            {move || mode().toggled().title()}
                        </button>
                    </p>
                </div>
            </div>
        </Show>
    }
}
