//! AI Analysis Panel
//!
//! Shown under a submission in the admin review queue.

use leptos::*;
use std::sync::Arc;

use ayiti_verite::models::AiAnalysis;
use ayiti_verite::AiPanel;

use super::InlineLoading;
use crate::state::use_global_state;

#[component]
pub fn AiAnalysisPanel(submission_id: i64) -> impl IntoView {
    let state = use_global_state();
    let panel = store_value(Arc::new(AiPanel::new(
        state.api(),
        state.notifier(),
        submission_id,
    )));

    let result = create_rw_signal(None::<AiAnalysis>);
    let error = create_rw_signal(None::<String>);
    let loading = create_rw_signal(false);

    let refresh = move || {
        panel.with_value(|p| {
            result.set(p.result());
            error.set(p.error());
            loading.set(p.is_loading());
        });
    };

    spawn_local(async move {
        panel.get_value().load_existing().await;
        refresh();
    });

    let analyze = move |_| {
        loading.set(true);
        error.set(None);
        spawn_local(async move {
            if let Err(message) = panel.get_value().analyze().await {
                web_sys::console::error_1(&format!("AI analysis failed: {}", message).into());
            }
            refresh();
            state.sync();
        });
    };

    let reset = move |_| {
        panel.with_value(|p| p.reset());
        refresh();
    };

    view! {
        <div class="mt-4 border border-purple-200 bg-purple-50 rounded-lg p-4">
            <div class="flex items-center justify-between mb-2">
                <h4 class="font-semibold text-purple-900">"🤖 AI Analysis"</h4>
                {move || result.with(|r| r.is_some()).then(|| view! {
                    <button class="text-sm text-purple-700 hover:underline" on:click=reset>
                        "Re-analyze"
                    </button>
                })}
            </div>

            {move || match result.get() {
                Some(analysis) => view! { <AnalysisResult analysis=analysis /> }.into_view(),
                None => view! {
                    <div class="space-y-2">
                        <button
                            class="px-4 py-2 rounded-lg bg-purple-700 hover:bg-purple-800 disabled:bg-gray-400
                                   text-white text-sm font-medium"
                            disabled=move || loading.get()
                            on:click=analyze
                        >
                            {move || if loading.get() {
                                view! { <span class="flex items-center space-x-2"><InlineLoading /><span>"Analyzing..."</span></span> }.into_view()
                            } else {
                                "Analyze with AI".into_view()
                            }}
                        </button>
                        {move || error.get().map(|e| view! { <p class="text-sm text-red-600">{e}</p> })}
                    </div>
                }.into_view(),
            }}
        </div>
    }
}

#[component]
fn AnalysisResult(analysis: AiAnalysis) -> impl IntoView {
    view! {
        <div class="space-y-3 text-sm">
            <div class="flex items-center space-x-4">
                <span>
                    <span class="text-gray-500">"Suggested verdict: "</span>
                    <span class="font-semibold">{analysis.verdict_label()}</span>
                </span>
                <span>
                    <span class="text-gray-500">"Confidence: "</span>
                    <span class="font-semibold">{analysis.confidence_percent()}</span>
                </span>
            </div>

            {(!analysis.evidence_sources.is_empty()).then(|| view! {
                <div>
                    <p class="font-medium mb-1">"Evidence sources"</p>
                    <ul class="list-disc list-inside text-gray-700">
                        {analysis.evidence_sources.iter().map(|s| view! { <li>{s.clone()}</li> }).collect_view()}
                    </ul>
                </div>
            })}

            {(!analysis.similar_claims.is_empty()).then(|| view! {
                <div>
                    <p class="font-medium mb-1">"Similar claims"</p>
                    <ul class="list-disc list-inside text-gray-700">
                        {analysis.similar_claims.iter().map(|s| view! { <li>{s.clone()}</li> }).collect_view()}
                    </ul>
                </div>
            })}

            <p class="text-xs text-gray-500">{analysis.footer()}</p>
        </div>
    }
}
