//! Haiti Unveiled
//!
//! Published positive stories with a category filter.

use leptos::*;
use std::sync::Arc;

use ayiti_verite::models::{ContentCategory, PositiveContent};
use ayiti_verite::PositiveContentFeed;

use super::CardSkeleton;
use crate::state::use_global_state;

#[component]
fn StoryCard(story: PositiveContent) -> impl IntoView {
    let category = story.category_label().to_string();

    view! {
        <article class="bg-white rounded-lg shadow overflow-hidden flex flex-col">
            {story.image_url_full.clone().map(|src| view! {
                <img src=src alt=story.title.clone() class="h-48 w-full object-cover" />
            })}
            <div class="p-5 flex flex-col flex-1">
                <span class="text-xs uppercase tracking-wide text-blue-700 font-semibold mb-2">{category}</span>
                <h3 class="text-lg font-semibold mb-2">{story.title.clone()}</h3>
                <p class="text-gray-600 text-sm flex-1">{story.description.clone()}</p>
                {story.source_url.clone().filter(|u| !u.is_empty()).map(|href| view! {
                    <a href=href target="_blank" rel="noopener noreferrer"
                       class="mt-4 text-blue-700 text-sm font-medium hover:underline">
                        "Source →"
                    </a>
                })}
            </div>
        </article>
    }
}

#[component]
pub fn HaitiUnveiled() -> impl IntoView {
    let state = use_global_state();
    let feed = store_value(Arc::new(PositiveContentFeed::new(state.api())));

    let (stories, set_stories) = create_signal(Vec::<PositiveContent>::new());
    let (category, set_category) = create_signal(None::<ContentCategory>);
    let (loading, set_loading) = create_signal(true);
    let (error, set_error) = create_signal(None::<String>);

    spawn_local(async move {
        let feed = feed.get_value();
        feed.load().await;
        set_stories.set(feed.visible());
        set_error.set(feed.error());
        set_loading.set(false);
    });

    let select = move |choice: Option<ContentCategory>| {
        feed.with_value(|f| {
            f.set_category(choice);
            set_stories.set(f.visible());
        });
        set_category.set(choice);
    };

    let button_class = move |choice: Option<ContentCategory>| {
        if category.get() == choice {
            "px-4 py-2 rounded-full text-sm font-medium bg-blue-700 text-white"
        } else {
            "px-4 py-2 rounded-full text-sm font-medium bg-gray-100 text-gray-700 hover:bg-gray-200"
        }
    };

    view! {
        <section id="haiti-unveiled" class="py-16 bg-gray-50">
            <div class="container mx-auto px-4">
                <h2 class="text-3xl font-bold text-center mb-2">"Haiti Unveiled"</h2>
                <p class="text-center text-gray-600 mb-8">"Stories of culture, innovation and hope from across Haiti."</p>

                <div class="flex flex-wrap justify-center gap-2 mb-8">
                    <button class=move || button_class(None) on:click=move |_| select(None)>"All"</button>
                    {ContentCategory::all().iter().copied().map(|c| view! {
                        <button class=move || button_class(Some(c)) on:click=move |_| select(Some(c))>
                            {c.label()}
                        </button>
                    }).collect_view()}
                </div>

                {move || {
                    if loading.get() {
                        view! {
                            <div class="grid md:grid-cols-3 gap-6">
                                <CardSkeleton /><CardSkeleton /><CardSkeleton />
                            </div>
                        }.into_view()
                    } else if let Some(message) = error.get() {
                        view! { <p class="text-center text-red-600">{message}</p> }.into_view()
                    } else if stories.with(|s| s.is_empty()) {
                        view! {
                            <p class="text-center text-gray-500">"No stories in this category yet."</p>
                        }.into_view()
                    } else {
                        view! {
                            <div class="grid md:grid-cols-3 gap-6">
                                <For
                                    each=move || stories.get()
                                    key=|s| s.id
                                    children=|s| view! { <StoryCard story=s /> }
                                />
                            </div>
                        }.into_view()
                    }
                }}
            </div>
        </section>
    }
}
