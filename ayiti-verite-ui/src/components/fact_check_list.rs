//! Fact-Check List
//!
//! Public feed of published fact-checks with verdict badges.

use leptos::*;
use leptos_router::A;
use std::sync::Arc;

use ayiti_verite::models::{FactCheck, Tone, Verdict};
use ayiti_verite::FactCheckFeed;

use super::CardSkeleton;
use crate::state::use_global_state;

pub fn tone_class(tone: Tone) -> &'static str {
    match tone {
        Tone::Positive => "bg-green-100 text-green-800",
        Tone::Mixed => "bg-yellow-100 text-yellow-800",
        Tone::Negative => "bg-red-100 text-red-800",
        Tone::Neutral => "bg-gray-100 text-gray-800",
    }
}

#[component]
pub fn VerdictBadge(verdict: Verdict, #[prop(into)] label: String) -> impl IntoView {
    view! {
        <span class=format!("inline-block px-3 py-1 rounded-full text-xs font-semibold {}", tone_class(verdict.tone()))>
            {label}
        </span>
    }
}

#[component]
fn FactCheckCard(fact_check: FactCheck) -> impl IntoView {
    let href = format!("/fact-check/{}", fact_check.id);
    let label = fact_check.verdict_label().to_string();

    view! {
        <article class="bg-white rounded-lg shadow p-5 flex flex-col">
            <div class="flex items-center justify-between mb-3">
                <VerdictBadge verdict=fact_check.verdict label=label />
                <span class="text-xs text-gray-500">
                    {fact_check.date_created.format("%B %-d, %Y").to_string()}
                </span>
            </div>
            <h3 class="text-lg font-semibold mb-2">{fact_check.title.clone()}</h3>
            <p class="text-gray-600 text-sm flex-1 line-clamp-3">{fact_check.summary.clone()}</p>
            <A href=href class="mt-4 text-blue-700 text-sm font-medium hover:underline">
                "Read more →"
            </A>
        </article>
    }
}

#[component]
pub fn FactCheckList() -> impl IntoView {
    let state = use_global_state();
    let feed = store_value(Arc::new(FactCheckFeed::new(state.api())));

    let (items, set_items) = create_signal(Vec::<FactCheck>::new());
    let (loading, set_loading) = create_signal(true);
    let (error, set_error) = create_signal(None::<String>);

    spawn_local(async move {
        let feed = feed.get_value();
        feed.load().await;
        set_items.set(feed.items());
        set_error.set(feed.error());
        set_loading.set(feed.is_loading());
    });

    view! {
        <section id="fact-checks" class="py-16">
            <div class="container mx-auto px-4">
                <h2 class="text-3xl font-bold text-center mb-8">"Latest Fact-Checks"</h2>

                {move || {
                    if loading.get() {
                        view! {
                            <div class="grid md:grid-cols-3 gap-6">
                                <CardSkeleton /><CardSkeleton /><CardSkeleton />
                            </div>
                        }.into_view()
                    } else if let Some(message) = error.get() {
                        view! {
                            <p class="text-center text-red-600">{message}</p>
                        }.into_view()
                    } else if items.with(|i| i.is_empty()) {
                        view! {
                            <p class="text-center text-gray-500">"No fact-checks have been published yet."</p>
                        }.into_view()
                    } else {
                        view! {
                            <div class="grid md:grid-cols-3 gap-6">
                                <For
                                    each=move || items.get()
                                    key=|fc| fc.id
                                    children=|fc| view! { <FactCheckCard fact_check=fc /> }
                                />
                            </div>
                        }.into_view()
                    }
                }}
            </div>
        </section>
    }
}
