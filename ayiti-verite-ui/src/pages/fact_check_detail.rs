//! Fact-Check Detail Page
//!
//! `/fact-check/:id`; a missing or non-numeric id shows "not found".

use leptos::*;
use leptos_router::{use_params_map, A};

use ayiti_verite::public::{load_fact_check, Detail};

use crate::components::{Loading, VerdictBadge};
use crate::state::use_global_state;

#[component]
pub fn FactCheckDetail() -> impl IntoView {
    let state = use_global_state();
    let params = use_params_map();

    let id = move || params.with(|p| p.get("id").and_then(|id| id.parse::<i64>().ok()));

    let detail = create_local_resource(id, move |id| async move {
        match id {
            Some(id) => load_fact_check(&state.api(), id).await,
            None => Detail::NotFound,
        }
    });

    view! {
        <div class="container mx-auto px-4 py-12 max-w-3xl">
            <A href="/" class="text-blue-700 text-sm hover:underline">"← Back to home"</A>

            {move || match detail.get() {
                None => view! { <Loading /> }.into_view(),
                Some(Detail::Found(fc)) => {
                    let label = fc.verdict_label().to_string();
                    view! {
                        <article class="mt-6 bg-white rounded-xl shadow p-8">
                            <VerdictBadge verdict=fc.verdict label=label />
                            <h1 class="text-3xl font-bold mt-4 mb-2">{fc.title.clone()}</h1>
                            <p class="text-sm text-gray-500 mb-6">
                                {format!("Published {}", fc.date_created.format("%B %-d, %Y"))}
                            </p>
                            <div class="prose max-w-none whitespace-pre-line text-gray-800">{fc.summary.clone()}</div>
                            {fc.url_submitted.clone().filter(|u| !u.is_empty()).map(|href| view! {
                                <p class="mt-6 text-sm">
                                    <span class="text-gray-500">"Original source: "</span>
                                    <a href=href.clone() target="_blank" rel="noopener noreferrer"
                                       class="text-blue-700 hover:underline break-all">{href}</a>
                                </p>
                            })}
                        </article>
                    }.into_view()
                }
                Some(Detail::NotFound) => view! {
                    <div class="mt-12 text-center">
                        <div class="text-6xl mb-4">"🔍"</div>
                        <h1 class="text-2xl font-bold mb-2">"Fact-check not found"</h1>
                        <p class="text-gray-600">"It may have been removed or never existed."</p>
                    </div>
                }.into_view(),
                Some(Detail::Failed(message)) => view! {
                    <p class="mt-12 text-center text-red-600">{message}</p>
                }.into_view(),
            }}
        </div>
    }
}
