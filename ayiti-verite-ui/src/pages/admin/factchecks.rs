//! Fact-checks tab

use leptos::*;
use std::sync::Arc;

use ayiti_verite::admin::FactCheckFilter;
use ayiti_verite::models::{FactCheck, FactCheckDraft, Verdict};
use ayiti_verite::FactChecksManager;

use super::{parse_choice, DANGER_LINK, INPUT_CLASS, PRIMARY_BUTTON, SECONDARY_BUTTON};
use crate::components::{ListSkeleton, VerdictBadge};
use crate::state::use_global_state;

#[component]
pub fn FactChecksTab() -> impl IntoView {
    let state = use_global_state();
    let manager = store_value(Arc::new(FactChecksManager::new(state.admin_context())));

    let items = create_rw_signal(Vec::<FactCheck>::new());
    let loading = create_rw_signal(true);
    let filter = create_rw_signal(FactCheckFilter::default());
    // `Some(None)` is the create form, `Some(Some(id))` edits `id`
    let editing = create_rw_signal(None::<Option<i64>>);
    let draft = create_rw_signal(FactCheckDraft::default());
    let saving = create_rw_signal(false);

    let mirror = move || {
        manager.with_value(|m| {
            items.set(m.fact_checks());
            loading.set(m.is_loading());
        });
        state.sync();
    };

    spawn_local(async move {
        manager.get_value().refresh().await;
        mirror();
    });

    let open_create = move |_| {
        draft.set(FactCheckDraft::default());
        editing.set(Some(None));
    };

    let open_edit = move |id: i64| {
        if let Some(fc) = manager.with_value(|m| m.get(id)) {
            draft.set(fc.to_draft());
            editing.set(Some(Some(id)));
        }
    };

    let save = move |ev: ev::SubmitEvent| {
        ev.prevent_default();
        let Some(target) = editing.get_untracked() else {
            return;
        };
        saving.set(true);
        spawn_local(async move {
            let m = manager.get_value();
            let body = draft.get_untracked();
            let ok = match target {
                Some(id) => m.update(id, &body).await,
                None => m.create(&body).await,
            };
            saving.set(false);
            if ok {
                editing.set(None);
            }
            mirror();
        });
    };

    let delete = move |id: i64| {
        spawn_local(async move {
            manager.get_value().delete(id).await;
            mirror();
        });
    };

    let visible = move || {
        let filter = filter.get();
        items.with(|all| all.iter().filter(|f| filter.matches(f)).cloned().collect::<Vec<_>>())
    };

    view! {
        <div class="space-y-6">
            <div class="flex flex-wrap items-center gap-3">
                <input
                    type="search"
                    placeholder="Search fact-checks..."
                    class=format!("{} md:w-80", INPUT_CLASS)
                    prop:value=move || filter.with(|f| f.search.clone())
                    on:input=move |ev| filter.update(|f| f.search = event_target_value(&ev))
                />
                <select
                    class="border border-gray-300 rounded-lg px-3 py-2 text-sm"
                    on:change=move |ev| filter.update(|f| f.verdict = parse_choice(&event_target_value(&ev)))
                >
                    <option value="all">"All verdicts"</option>
                    {Verdict::all().iter().map(|v| view! {
                        <option value=v.as_str()>{v.as_str()}</option>
                    }).collect_view()}
                </select>
                <button class=format!("{} ml-auto", PRIMARY_BUTTON) on:click=open_create>"New Fact-Check"</button>
            </div>

            <Show when=move || editing.get().is_some()>
                <form class="bg-white rounded-lg shadow p-5 space-y-3" on:submit=save>
                    <h3 class="font-semibold">
                        {move || if matches!(editing.get(), Some(Some(_))) { "Edit Fact-Check" } else { "New Fact-Check" }}
                    </h3>
                    <input
                        type="text"
                        placeholder="Title"
                        class=INPUT_CLASS
                        prop:value=move || draft.with(|d| d.title.clone())
                        on:input=move |ev| draft.update(|d| d.title = event_target_value(&ev))
                    />
                    <input
                        type="url"
                        placeholder="Source URL"
                        class=INPUT_CLASS
                        prop:value=move || draft.with(|d| d.url_submitted.clone())
                        on:input=move |ev| draft.update(|d| d.url_submitted = event_target_value(&ev))
                    />
                    <select
                        class=INPUT_CLASS
                        prop:value=move || draft.with(|d| d.verdict.as_str())
                        on:change=move |ev| {
                            if let Ok(v) = event_target_value(&ev).parse::<Verdict>() {
                                draft.update(|d| d.verdict = v);
                            }
                        }
                    >
                        {Verdict::all().iter().map(|v| view! {
                            <option value=v.as_str()>{v.as_str()}</option>
                        }).collect_view()}
                    </select>
                    <textarea
                        rows="5"
                        placeholder="Summary"
                        class=INPUT_CLASS
                        prop:value=move || draft.with(|d| d.summary.clone())
                        on:input=move |ev| draft.update(|d| d.summary = event_target_value(&ev))
                    />
                    <div class="flex gap-2">
                        <button type="submit" class=PRIMARY_BUTTON disabled=move || saving.get()>
                            {move || if saving.get() { "Saving..." } else { "Save" }}
                        </button>
                        <button type="button" class=SECONDARY_BUTTON on:click=move |_| editing.set(None)>"Cancel"</button>
                    </div>
                </form>
            </Show>

            {move || {
                if loading.get() {
                    return view! { <ListSkeleton count=5 /> }.into_view();
                }
                let rows = visible();
                if rows.is_empty() {
                    return view! { <p class="text-gray-500">"No fact-checks found."</p> }.into_view();
                }
                view! {
                    <div class="bg-white rounded-lg shadow divide-y">
                        {rows.into_iter().map(|fc| {
                            let id = fc.id;
                            let label = fc.verdict_label().to_string();
                            view! {
                                <div class="px-4 py-3 flex items-center gap-4">
                                    <VerdictBadge verdict=fc.verdict label=label />
                                    <div class="flex-1 min-w-0">
                                        <p class="font-medium truncate">{fc.title.clone()}</p>
                                        <p class="text-xs text-gray-400">{fc.date_created.format("%b %-d, %Y").to_string()}</p>
                                    </div>
                                    <button class="text-sm text-blue-700 hover:underline" on:click=move |_| open_edit(id)>"Edit"</button>
                                    <button class=DANGER_LINK on:click=move |_| delete(id)>"Delete"</button>
                                </div>
                            }
                        }).collect_view()}
                    </div>
                }
                .into_view()
            }}
        </div>
    }
}
