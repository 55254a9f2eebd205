//! Submissions tab: review queue, bulk actions, verdicts and AI analysis

use leptos::*;
use std::sync::Arc;

use ayiti_verite::admin::SubmissionFilter;
use ayiti_verite::models::{Submission, SubmissionStatus, SubmissionType, Verdict};
use ayiti_verite::{SubmissionsManager, VerdictDraft};

use super::{parse_choice, DANGER_LINK, INPUT_CLASS, PRIMARY_BUTTON, SECONDARY_BUTTON};
use crate::components::{AiAnalysisPanel, ListSkeleton};
use crate::state::use_global_state;

type Manager = StoredValue<Arc<SubmissionsManager>>;

fn status_class(status: SubmissionStatus) -> &'static str {
    match status {
        SubmissionStatus::New => "bg-blue-100 text-blue-800",
        SubmissionStatus::InReview => "bg-yellow-100 text-yellow-800",
        SubmissionStatus::Completed => "bg-green-100 text-green-800",
    }
}

#[component]
pub fn SubmissionsTab() -> impl IntoView {
    let state = use_global_state();
    let manager: Manager = store_value(Arc::new(SubmissionsManager::new(state.admin_context())));

    let items = create_rw_signal(Vec::<Submission>::new());
    let loading = create_rw_signal(true);
    let selection = create_rw_signal(Vec::<i64>::new());
    let filter = create_rw_signal(SubmissionFilter::default());
    let bulk_status = create_rw_signal(SubmissionStatus::InReview);
    // Row whose verdict form and AI panel are open
    let expanded = create_rw_signal(None::<i64>);

    let mirror = move || {
        manager.with_value(|m| {
            items.set(m.submissions());
            loading.set(m.is_loading());
            selection.set(m.selected());
        });
        state.sync();
    };

    spawn_local(async move {
        manager.get_value().refresh().await;
        mirror();
    });

    let visible = move || {
        let filter = filter.get();
        items.with(|all| all.iter().filter(|s| filter.matches(s)).cloned().collect::<Vec<_>>())
    };

    let counts = move || {
        items.track();
        manager.with_value(|m| m.status_counts())
    };

    let toggle_all = move |_| {
        manager.with_value(|m| m.toggle_select_visible(&filter.get_untracked()));
        mirror();
    };

    let bulk_update = move |_| {
        let status = bulk_status.get_untracked();
        spawn_local(async move {
            manager.get_value().bulk_update_status(status).await;
            mirror();
        });
    };

    let bulk_delete = move |_| {
        spawn_local(async move {
            manager.get_value().bulk_delete().await;
            mirror();
        });
    };

    view! {
        <div class="space-y-6">
            <div class="grid grid-cols-2 md:grid-cols-4 gap-4">
                {move || {
                    let c = counts();
                    [("Total", c.total), ("New", c.new), ("In Review", c.in_review), ("Completed", c.completed)]
                        .into_iter()
                        .map(|(label, value)| view! {
                            <div class="bg-white rounded-lg shadow p-4">
                                <p class="text-sm text-gray-500">{label}</p>
                                <p class="text-2xl font-bold">{value}</p>
                            </div>
                        })
                        .collect_view()
                }}
            </div>

            <div class="flex flex-wrap gap-3">
                <input
                    type="search"
                    placeholder="Search claims, URLs, submitters..."
                    class=format!("{} md:w-80", INPUT_CLASS)
                    prop:value=move || filter.with(|f| f.search.clone())
                    on:input=move |ev| filter.update(|f| f.search = event_target_value(&ev))
                />
                <select
                    class="border border-gray-300 rounded-lg px-3 py-2 text-sm"
                    on:change=move |ev| filter.update(|f| f.status = parse_choice(&event_target_value(&ev)))
                >
                    <option value="all">"All statuses"</option>
                    {SubmissionStatus::all().iter().map(|s| view! {
                        <option value=s.as_str()>{s.label()}</option>
                    }).collect_view()}
                </select>
                <select
                    class="border border-gray-300 rounded-lg px-3 py-2 text-sm"
                    on:change=move |ev| filter.update(|f| f.kind = match event_target_value(&ev).as_str() {
                        "url" => Some(SubmissionType::Url),
                        "text" => Some(SubmissionType::Text),
                        _ => None,
                    })
                >
                    <option value="all">"All types"</option>
                    <option value="url">"URL"</option>
                    <option value="text">"Text"</option>
                </select>
            </div>

            <Show when=move || selection.with(|s| !s.is_empty())>
                <div class="flex flex-wrap items-center gap-3 bg-blue-50 border border-blue-200 rounded-lg p-3">
                    <span class="text-sm font-medium">
                        {move || format!("{} selected", selection.with(|s| s.len()))}
                    </span>
                    <select
                        class="border border-gray-300 rounded-lg px-3 py-2 text-sm"
                        on:change=move |ev| {
                            if let Ok(s) = event_target_value(&ev).parse() {
                                bulk_status.set(s);
                            }
                        }
                    >
                        {SubmissionStatus::all().iter().map(|s| view! {
                            <option value=s.as_str() selected={*s == SubmissionStatus::InReview}>{s.label()}</option>
                        }).collect_view()}
                    </select>
                    <button class=PRIMARY_BUTTON on:click=bulk_update>"Update status"</button>
                    <button class="px-4 py-2 rounded-lg bg-red-600 hover:bg-red-700 text-white text-sm font-medium" on:click=bulk_delete>
                        "Delete selected"
                    </button>
                </div>
            </Show>

            {move || {
                if loading.get() {
                    return view! { <ListSkeleton count=5 /> }.into_view();
                }
                let rows = visible();
                if rows.is_empty() {
                    return view! { <p class="text-gray-500">"No submissions match the current filters."</p> }.into_view();
                }
                view! {
                    <div class="bg-white rounded-lg shadow divide-y">
                        <div class="flex items-center px-4 py-2 text-xs uppercase text-gray-500">
                            <input type="checkbox" class="mr-3" on:change=toggle_all
                                prop:checked=move || {
                                    let shown = visible();
                                    !shown.is_empty() && selection.with(|sel| shown.iter().all(|s| sel.contains(&s.id)))
                                }
                            />
                            <span>"Select all"</span>
                        </div>
                        {rows.into_iter().map(|s| view! {
                            <SubmissionRow
                                submission=s
                                manager=manager
                                selection=selection
                                expanded=expanded
                                on_change=Callback::new(move |_| mirror())
                            />
                        }).collect_view()}
                    </div>
                }
                .into_view()
            }}
        </div>
    }
}

#[component]
fn SubmissionRow(
    submission: Submission,
    manager: Manager,
    selection: RwSignal<Vec<i64>>,
    expanded: RwSignal<Option<i64>>,
    on_change: Callback<()>,
) -> impl IntoView {
    let id = submission.id;
    let status = submission.status;

    let toggle = move |_| {
        manager.with_value(|m| m.toggle_selected(id));
        on_change.call(());
    };

    let change_status = move |ev: ev::Event| {
        let Ok(next) = event_target_value(&ev).parse::<SubmissionStatus>() else {
            return;
        };
        spawn_local(async move {
            manager.get_value().update_status(id, next).await;
            on_change.call(());
        });
    };

    let delete = move |_| {
        spawn_local(async move {
            manager.get_value().delete(id).await;
            on_change.call(());
        });
    };

    let toggle_expanded = move |_| {
        expanded.update(|e| *e = if *e == Some(id) { None } else { Some(id) });
    };

    let linked = submission.fact_checks.clone();
    let stored = store_value(submission.clone());

    view! {
        <div class="px-4 py-4">
            <div class="flex items-start gap-3">
                <input
                    type="checkbox"
                    class="mt-1"
                    prop:checked=move || selection.with(|s| s.contains(&id))
                    on:change=toggle
                />
                <div class="flex-1 min-w-0">
                    <div class="flex flex-wrap items-center gap-2 mb-1">
                        <span class=format!("px-2 py-0.5 rounded-full text-xs font-semibold {}", status_class(status))>
                            {submission.status_display.clone().unwrap_or_else(|| status.label().to_string())}
                        </span>
                        <span class="px-2 py-0.5 rounded-full text-xs bg-gray-100 text-gray-700">
                            {submission.type_label()}
                        </span>
                        {submission.is_recent.then(|| view! {
                            <span class="px-2 py-0.5 rounded-full text-xs bg-purple-100 text-purple-800">"Recent"</span>
                        })}
                    </div>
                    <p class="font-medium break-words">{submission.headline().to_string()}</p>
                    {submission.context.clone().filter(|c| !c.is_empty()).map(|c| view! {
                        <p class="text-sm text-gray-500">{format!("Context: {}", c)}</p>
                    })}
                    <p class="text-xs text-gray-400 mt-1">
                        {format!(
                            "{} · {}",
                            submission.submitter_label(),
                            submission.date_submitted.format("%b %-d, %Y %H:%M")
                        )}
                    </p>
                    {(!linked.is_empty()).then(|| view! {
                        <p class="text-xs text-green-700 mt-1">
                            {format!("Fact-checked: {}", linked.iter().map(|f| f.title.as_str()).collect::<Vec<_>>().join(", "))}
                        </p>
                    })}
                </div>
                <div class="flex flex-col items-end gap-2">
                    <select class="border border-gray-300 rounded px-2 py-1 text-sm" on:change=change_status>
                        {SubmissionStatus::all().iter().map(|s| view! {
                            <option value=s.as_str() selected={*s == status}>{s.label()}</option>
                        }).collect_view()}
                    </select>
                    <button class="text-sm text-blue-700 hover:underline" on:click=toggle_expanded>
                        {move || if expanded.get() == Some(id) { "Close" } else { "Create Verdict" }}
                    </button>
                    <button class=DANGER_LINK on:click=delete>"Delete"</button>
                </div>
            </div>

            <Show when=move || expanded.get() == Some(id)>
                <div class="mt-4 ml-7 space-y-4">
                    <VerdictForm
                        submission=stored.get_value()
                        manager=manager
                        on_done=Callback::new(move |_| {
                            expanded.set(None);
                            on_change.call(());
                        })
                        on_cancel=Callback::new(move |_| expanded.set(None))
                    />
                    <AiAnalysisPanel submission_id=id />
                </div>
            </Show>
        </div>
    }
}

#[component]
fn VerdictForm(
    submission: Submission,
    manager: Manager,
    on_done: Callback<()>,
    on_cancel: Callback<()>,
) -> impl IntoView {
    let draft = create_rw_signal(VerdictDraft::from_submission(&submission));
    let saving = create_rw_signal(false);

    let submit = move |ev: ev::SubmitEvent| {
        ev.prevent_default();
        saving.set(true);
        spawn_local(async move {
            let ok = manager.get_value().create_verdict(&draft.get_untracked()).await;
            saving.set(false);
            if ok {
                on_done.call(());
            }
        });
    };

    view! {
        <form class="bg-gray-50 border border-gray-200 rounded-lg p-4 space-y-3" on:submit=submit>
            <h4 class="font-semibold">"Create Fact-Check"</h4>
            <input
                type="text"
                class=INPUT_CLASS
                prop:value=move || draft.with(|d| d.title.clone())
                on:input=move |ev| draft.update(|d| d.title = event_target_value(&ev))
            />
            <select
                class=INPUT_CLASS
                on:change=move |ev| {
                    if let Ok(v) = event_target_value(&ev).parse::<Verdict>() {
                        draft.update(|d| d.verdict = v);
                    }
                }
            >
                {Verdict::all().iter().map(|v| view! {
                    <option value=v.as_str() selected={*v == Verdict::True}>{v.as_str()}</option>
                }).collect_view()}
            </select>
            <textarea
                rows="4"
                class=INPUT_CLASS
                placeholder="Summary of the findings"
                prop:value=move || draft.with(|d| d.summary.clone())
                on:input=move |ev| draft.update(|d| d.summary = event_target_value(&ev))
            />
            <label class="flex items-center gap-2 text-sm">
                <input
                    type="checkbox"
                    prop:checked=move || draft.with(|d| d.use_submission_data)
                    on:change=move |ev| draft.update(|d| d.use_submission_data = event_target_checked(&ev))
                />
                "Copy the claim and URL from this submission"
            </label>
            <div class="flex gap-2">
                <button type="submit" class=PRIMARY_BUTTON disabled=move || saving.get()>
                    {move || if saving.get() { "Saving..." } else { "Publish Fact-Check" }}
                </button>
                <button type="button" class=SECONDARY_BUTTON on:click=move |_| on_cancel.call(())>"Cancel"</button>
            </div>
        </form>
    }
}
