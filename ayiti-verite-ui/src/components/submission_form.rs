//! Claim Form
//!
//! "Submit a Claim" section of the home page. Anonymous visitors are sent to
//! the login modal instead of the server.

use leptos::*;

use ayiti_verite::{SubmissionForm, SubmitOutcome};

use crate::state::use_global_state;

#[component]
pub fn ClaimForm() -> impl IntoView {
    let state = use_global_state();

    let (claim_text, set_claim_text) = create_signal(String::new());
    let (context, set_context) = create_signal(String::new());
    let (url, set_url) = create_signal(String::new());
    let (submitting, set_submitting) = create_signal(false);

    let on_submit = move |ev: ev::SubmitEvent| {
        ev.prevent_default();
        set_submitting.set(true);

        spawn_local(async move {
            let mut form = SubmissionForm {
                claim_text: claim_text.get_untracked(),
                context: context.get_untracked(),
                url_submitted: url.get_untracked(),
            };
            let session = state.session.get_value();
            let outcome = form.submit(&session).await;
            state.sync();
            set_submitting.set(false);

            match &outcome {
                SubmitOutcome::AuthRequired { mode, message } => {
                    state.show_error(message);
                    state.open_auth(*mode);
                }
                SubmitOutcome::Submitted { message } => {
                    state.show_success(message);
                }
                SubmitOutcome::Invalid { message } | SubmitOutcome::Failed { message } => {
                    state.show_error(message);
                }
            }

            // The form clears itself on success
            set_claim_text.set(form.claim_text);
            set_context.set(form.context);
            set_url.set(form.url_submitted);
        });
    };

    let field_class = "w-full border border-gray-300 rounded-lg px-4 py-2 focus:border-blue-500 focus:outline-none";

    view! {
        <section id="submit" class="py-16 bg-gray-50">
            <div class="container mx-auto px-4 max-w-3xl">
                <h2 class="text-3xl font-bold text-center mb-2">"Submit a Claim"</h2>
                <p class="text-center text-gray-600 mb-8">
                    "Heard something that doesn't sound right? Send it to our team for verification."
                </p>

                <form class="bg-white rounded-xl shadow p-6 space-y-4" on:submit=on_submit>
                    <div>
                        <label class="block text-sm font-medium mb-1">"Claim"</label>
                        <textarea
                            rows="4"
                            class=field_class
                            placeholder="Describe the claim you want verified"
                            prop:value=move || claim_text.get()
                            on:input=move |ev| set_claim_text.set(event_target_value(&ev))
                        />
                    </div>
                    <div>
                        <label class="block text-sm font-medium mb-1">"Where did you see it?"</label>
                        <input
                            type="text"
                            class=field_class
                            placeholder="Radio, WhatsApp, Facebook..."
                            prop:value=move || context.get()
                            on:input=move |ev| set_context.set(event_target_value(&ev))
                        />
                    </div>
                    <div>
                        <label class="block text-sm font-medium mb-1">"Link"</label>
                        <input
                            type="url"
                            class=field_class
                            placeholder="https://"
                            prop:value=move || url.get()
                            on:input=move |ev| set_url.set(event_target_value(&ev))
                        />
                    </div>

                    <button
                        type="submit"
                        disabled=move || submitting.get()
                        class="w-full py-3 rounded-lg bg-blue-700 hover:bg-blue-800 disabled:bg-gray-400
                               text-white font-medium transition-colors"
                    >
                        {move || if submitting.get() { "Submitting..." } else { "Submit for Verification" }}
                    </button>
                </form>
            </div>
        </section>
    }
}
