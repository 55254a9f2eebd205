//! Positive content tab
//!
//! Stories carry an optional image file, read in the browser and sent with
//! the multipart form.

use leptos::*;
use std::sync::Arc;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::JsFuture;

use ayiti_verite::admin::ContentFilter;
use ayiti_verite::models::{ContentCategory, ImageUpload, PositiveContent, PositiveContentDraft, PublishFilter};
use ayiti_verite::PositiveContentManager;

use super::{parse_choice, DANGER_LINK, INPUT_CLASS, PRIMARY_BUTTON, SECONDARY_BUTTON};
use crate::components::ListSkeleton;
use crate::state::use_global_state;

/// Read the selected file into memory
async fn read_file(file: web_sys::File) -> Result<ImageUpload, String> {
    let buffer = JsFuture::from(file.array_buffer())
        .await
        .map_err(|e| format!("{:?}", e))?;
    let bytes = js_sys::Uint8Array::new(&buffer).to_vec();
    let mime = match file.type_() {
        t if t.is_empty() => "application/octet-stream".to_string(),
        t => t,
    };
    Ok(ImageUpload {
        file_name: file.name(),
        mime,
        bytes,
    })
}

fn publish_filter(value: &str) -> PublishFilter {
    match value {
        "published" => PublishFilter::Published,
        "unpublished" => PublishFilter::Unpublished,
        _ => PublishFilter::All,
    }
}

#[component]
pub fn ContentTab() -> impl IntoView {
    let state = use_global_state();
    let manager = store_value(Arc::new(PositiveContentManager::new(state.admin_context())));

    let items = create_rw_signal(Vec::<PositiveContent>::new());
    let loading = create_rw_signal(true);
    let filter = create_rw_signal(ContentFilter::default());
    let editing = create_rw_signal(None::<Option<i64>>);
    let draft = create_rw_signal(PositiveContentDraft::default());
    let saving = create_rw_signal(false);

    let mirror = move || {
        manager.with_value(|m| {
            items.set(m.items());
            loading.set(m.is_loading());
        });
        state.sync();
    };

    spawn_local(async move {
        manager.get_value().refresh().await;
        mirror();
    });

    let counts = move || {
        items.track();
        manager.with_value(|m| m.counts())
    };

    let open_create = move |_| {
        draft.set(PositiveContentDraft::default());
        editing.set(Some(None));
    };

    let open_edit = move |id: i64| {
        if let Some(item) = manager.with_value(|m| m.get(id)) {
            draft.set(item.to_draft());
            editing.set(Some(Some(id)));
        }
    };

    let pick_image = move |ev: ev::Event| {
        let file = ev
            .target()
            .and_then(|t| t.dyn_into::<web_sys::HtmlInputElement>().ok())
            .and_then(|input| input.files())
            .and_then(|files| files.get(0));
        let Some(file) = file else {
            draft.update(|d| d.image = None);
            return;
        };
        spawn_local(async move {
            match read_file(file).await {
                Ok(image) => draft.update(|d| d.image = Some(image)),
                Err(e) => {
                    web_sys::console::error_1(&format!("Failed to read image: {}", e).into());
                    state.show_error("Could not read the selected image");
                }
            }
        });
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

    let toggle_publish = move |id: i64| {
        spawn_local(async move {
            manager.get_value().toggle_publish(id).await;
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
        items.with(|all| all.iter().filter(|c| filter.matches(c)).cloned().collect::<Vec<_>>())
    };

    view! {
        <div class="space-y-6">
            <div class="grid grid-cols-3 gap-4">
                {move || {
                    let c = counts();
                    [("Total", c.total), ("Published", c.published), ("With image", c.with_image)]
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

            <div class="flex flex-wrap items-center gap-3">
                <input
                    type="search"
                    placeholder="Search stories..."
                    class=format!("{} md:w-72", INPUT_CLASS)
                    prop:value=move || filter.with(|f| f.search.clone())
                    on:input=move |ev| filter.update(|f| f.search = event_target_value(&ev))
                />
                <select
                    class="border border-gray-300 rounded-lg px-3 py-2 text-sm"
                    on:change=move |ev| filter.update(|f| f.category = parse_choice(&event_target_value(&ev)))
                >
                    <option value="all">"All categories"</option>
                    {ContentCategory::all().iter().map(|c| view! {
                        <option value=c.as_str()>{c.label()}</option>
                    }).collect_view()}
                </select>
                <select
                    class="border border-gray-300 rounded-lg px-3 py-2 text-sm"
                    on:change=move |ev| filter.update(|f| f.publish = publish_filter(&event_target_value(&ev)))
                >
                    <option value="all">"All"</option>
                    <option value="published">"Published"</option>
                    <option value="unpublished">"Unpublished"</option>
                </select>
                <button class=format!("{} ml-auto", PRIMARY_BUTTON) on:click=open_create>"New Story"</button>
            </div>

            <Show when=move || editing.get().is_some()>
                <form class="bg-white rounded-lg shadow p-5 space-y-3" on:submit=save>
                    <h3 class="font-semibold">
                        {move || if matches!(editing.get(), Some(Some(_))) { "Edit Story" } else { "New Story" }}
                    </h3>
                    <input
                        type="text"
                        placeholder="Title"
                        class=INPUT_CLASS
                        prop:value=move || draft.with(|d| d.title.clone())
                        on:input=move |ev| draft.update(|d| d.title = event_target_value(&ev))
                    />
                    <select
                        class=INPUT_CLASS
                        prop:value=move || draft.with(|d| d.content_type.as_str())
                        on:change=move |ev| {
                            if let Ok(c) = event_target_value(&ev).parse::<ContentCategory>() {
                                draft.update(|d| d.content_type = c);
                            }
                        }
                    >
                        {ContentCategory::all().iter().map(|c| view! {
                            <option value=c.as_str()>{c.label()}</option>
                        }).collect_view()}
                    </select>
                    <textarea
                        rows="5"
                        placeholder="Description"
                        class=INPUT_CLASS
                        prop:value=move || draft.with(|d| d.description.clone())
                        on:input=move |ev| draft.update(|d| d.description = event_target_value(&ev))
                    />
                    <div class="grid md:grid-cols-2 gap-3">
                        <div>
                            <label class="block text-sm font-medium mb-1">"Upload image"</label>
                            <input type="file" accept="image/*" class="text-sm" on:change=pick_image />
                            {move || draft.with(|d| d.image.as_ref().map(|i| i.file_name.clone())).map(|name| view! {
                                <p class="text-xs text-gray-500 mt-1">{format!("Selected: {}", name)}</p>
                            })}
                        </div>
                        <div>
                            <label class="block text-sm font-medium mb-1">"Or image URL"</label>
                            <input
                                type="url"
                                class=INPUT_CLASS
                                disabled=move || draft.with(|d| d.image.is_some())
                                prop:value=move || draft.with(|d| d.image_url.clone())
                                on:input=move |ev| draft.update(|d| d.image_url = event_target_value(&ev))
                            />
                        </div>
                    </div>
                    <input
                        type="url"
                        placeholder="Source URL"
                        class=INPUT_CLASS
                        prop:value=move || draft.with(|d| d.source_url.clone())
                        on:input=move |ev| draft.update(|d| d.source_url = event_target_value(&ev))
                    />
                    <label class="flex items-center gap-2 text-sm">
                        <input
                            type="checkbox"
                            prop:checked=move || draft.with(|d| d.is_published)
                            on:change=move |ev| draft.update(|d| d.is_published = event_target_checked(&ev))
                        />
                        "Published"
                    </label>
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
                    return view! { <ListSkeleton count=4 /> }.into_view();
                }
                let rows = visible();
                if rows.is_empty() {
                    return view! { <p class="text-gray-500">"No stories found."</p> }.into_view();
                }
                view! {
                    <div class="grid md:grid-cols-2 gap-4">
                        {rows.into_iter().map(|item| {
                            let id = item.id;
                            let published = item.is_published;
                            let badge = if published {
                                "text-xs px-2 py-0.5 rounded-full bg-green-100 text-green-800"
                            } else {
                                "text-xs px-2 py-0.5 rounded-full bg-gray-100 text-gray-700"
                            };
                            view! {
                                <div class="bg-white rounded-lg shadow overflow-hidden flex">
                                    {item.image_url_full.clone().map(|src| view! {
                                        <img src=src class="w-32 h-full object-cover" />
                                    })}
                                    <div class="p-4 flex-1 min-w-0">
                                        <div class="flex items-center gap-2 mb-1">
                                            <span class="text-xs uppercase text-blue-700 font-semibold">{item.category_label().to_string()}</span>
                                            <span class=badge>
                                                {if published { "Published" } else { "Draft" }}
                                            </span>
                                        </div>
                                        <p class="font-medium truncate">{item.title.clone()}</p>
                                        <p class="text-sm text-gray-500 line-clamp-2">{item.description.clone()}</p>
                                        <div class="flex gap-3 mt-2">
                                            <button class="text-sm text-blue-700 hover:underline" on:click=move |_| open_edit(id)>"Edit"</button>
                                            <button class="text-sm text-gray-700 hover:underline" on:click=move |_| toggle_publish(id)>
                                                {if published { "Unpublish" } else { "Publish" }}
                                            </button>
                                            <button class=DANGER_LINK on:click=move |_| delete(id)>"Delete"</button>
                                        </div>
                                    </div>
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
