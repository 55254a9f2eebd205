//! Dashboard Page
//!
//! The signed-in user's submissions, their status and related fact-checks.

use leptos::*;
use leptos_router::A;
use std::sync::Arc;

use ayiti_verite::dashboard::stat_cards;
use ayiti_verite::models::{DashboardData, UserSubmission};
use ayiti_verite::{ActivityEntry, DashboardTab, UserDashboard};

use crate::components::{ListSkeleton, Loading};
use crate::state::use_global_state;

#[component]
pub fn UserDashboardPage() -> impl IntoView {
    let state = use_global_state();
    let dashboard = store_value(Arc::new(UserDashboard::new(state.api(), state.notifier())));

    let data = create_rw_signal(None::<DashboardData>);
    let loading = create_rw_signal(true);
    let tab = create_rw_signal(DashboardTab::default());
    let submissions = create_rw_signal(Vec::<UserSubmission>::new());
    let submissions_loading = create_rw_signal(false);

    spawn_local(async move {
        let d = dashboard.get_value();
        d.load().await;
        data.set(d.data());
        loading.set(d.is_loading());
        state.sync();
    });

    let select_tab = move |next: DashboardTab| {
        dashboard.with_value(|d| d.set_tab(next));
        tab.set(next);
        if next == DashboardTab::Submissions {
            submissions_loading.set(true);
            spawn_local(async move {
                let d = dashboard.get_value();
                d.load_submissions().await;
                submissions.set(d.submissions());
                submissions_loading.set(d.submissions_loading());
                state.sync();
            });
        }
    };

    let activity = move |show_all: bool| {
        // Re-read whenever the aggregate changes
        data.track();
        dashboard.with_value(|d| d.recent_activity(show_all))
    };

    view! {
        <div class="container mx-auto px-4 py-10 space-y-8">
            <div>
                <h1 class="text-3xl font-bold">"My Dashboard"</h1>
                <p class="text-gray-600 mt-1">
                    {move || data.with(|d| d.as_ref().map(|d| format!("Welcome back, {}", d.user.username)).unwrap_or_default())}
                </p>
            </div>

            <div class="flex space-x-2 border-b border-gray-200">
                {DashboardTab::all().iter().copied().map(|t| view! {
                    <button
                        class=move || if tab.get() == t {
                            "px-4 py-2 -mb-px border-b-2 border-blue-700 text-blue-700 font-medium"
                        } else {
                            "px-4 py-2 text-gray-600 hover:text-gray-900"
                        }
                        on:click=move |_| select_tab(t)
                    >
                        {t.label()}
                    </button>
                }).collect_view()}
            </div>

            {move || {
                if loading.get() {
                    return view! { <Loading /> }.into_view();
                }
                let Some(d) = data.get() else {
                    return view! {
                        <p class="text-gray-500">"Dashboard data is unavailable."</p>
                    }.into_view();
                };
                match tab.get() {
                    DashboardTab::Overview => view! {
                        <Overview data=d activity=activity(false) />
                    }.into_view(),
                    DashboardTab::Submissions => view! {
                        <SubmissionsTab submissions=submissions loading=submissions_loading />
                    }.into_view(),
                    DashboardTab::Activity => view! {
                        <ActivityList entries=activity(true) />
                    }.into_view(),
                }
            }}
        </div>
    }
}

#[component]
fn Overview(data: DashboardData, activity: Vec<ActivityEntry>) -> impl IntoView {
    let rate = data.stats.completion_rate();

    view! {
        <div class="space-y-8">
            <div class="grid grid-cols-2 md:grid-cols-4 gap-4">
                {stat_cards(&data.stats).into_iter().map(|(label, value)| view! {
                    <div class="bg-white rounded-lg shadow p-5">
                        <p class="text-sm text-gray-500">{label}</p>
                        <p class="text-3xl font-bold mt-1">{value}</p>
                    </div>
                }).collect_view()}
            </div>

            <div class="bg-white rounded-lg shadow p-5">
                <div class="flex justify-between text-sm mb-2">
                    <span class="font-medium">"Completion rate"</span>
                    <span>{format!("{:.0}%", rate)}</span>
                </div>
                <div class="w-full h-2 bg-gray-200 rounded-full">
                    <div class="h-2 bg-green-500 rounded-full" style=format!("width: {:.0}%", rate) />
                </div>
            </div>

            <section>
                <h2 class="text-xl font-semibold mb-4">"Recent Activity"</h2>
                <ActivityList entries=activity />
            </section>

            <div class="text-center">
                <A href="/#submit" class="inline-block px-6 py-3 bg-blue-700 hover:bg-blue-800 text-white rounded-lg font-medium">
                    "Submit a New Claim"
                </A>
            </div>
        </div>
    }
}

#[component]
fn ActivityList(entries: Vec<ActivityEntry>) -> impl IntoView {
    if entries.is_empty() {
        return view! {
            <p class="text-gray-500">"No activity yet. Submit a claim to get started."</p>
        }
        .into_view();
    }

    view! {
        <ul class="bg-white rounded-lg shadow divide-y">
            {entries.into_iter().map(|entry| {
                let link = match &entry {
                    ActivityEntry::Published(f) => Some(format!("/fact-check/{}", f.id)),
                    ActivityEntry::Submitted(_) => None,
                };
                view! {
                    <li class="p-4 flex items-start space-x-3">
                        <span class="text-xl">{entry.icon()}</span>
                        <div class="flex-1">
                            <p class="text-sm text-gray-500">{entry.description()}</p>
                            <p class="font-medium">{entry.headline().to_string()}</p>
                            {link.map(|href| view! {
                                <A href=href class="text-sm text-blue-700 hover:underline">"View fact-check"</A>
                            })}
                        </div>
                        <span class="text-xs text-gray-400">{entry.date().format("%b %-d, %Y").to_string()}</span>
                    </li>
                }
            }).collect_view()}
        </ul>
    }
    .into_view()
}

#[component]
fn SubmissionsTab(
    submissions: RwSignal<Vec<UserSubmission>>,
    loading: RwSignal<bool>,
) -> impl IntoView {
    move || {
        if loading.get() {
            return view! { <ListSkeleton count=4 /> }.into_view();
        }
        let items = submissions.get();
        if items.is_empty() {
            return view! {
                <p class="text-gray-500">"You haven't submitted any claims yet."</p>
            }
            .into_view();
        }
        items
            .into_iter()
            .map(|s| {
                let related = s
                    .related_factcheck_id
                    .map(|id| (format!("/fact-check/{}", id), s.related_factcheck_title.clone().unwrap_or_default()));
                view! {
                    <div class="bg-white rounded-lg shadow p-5 mb-4">
                        <div class="flex items-center justify-between mb-2">
                            <span class="font-medium">{format!("{} {}", s.status_icon(), s.status_label())}</span>
                            <span class="text-xs text-gray-400">
                                {s.date_submitted.format("%b %-d, %Y").to_string()}
                            </span>
                        </div>
                        <p class="text-gray-800">{s.headline().to_string()}</p>
                        {s.guidance().map(|g| view! { <p class="text-sm text-gray-500 mt-2">{g}</p> })}
                        {related.map(|(href, title)| view! {
                            <A href=href class="text-sm text-blue-700 hover:underline mt-2 inline-block">
                                {format!("Fact-check: {}", title)}
                            </A>
                        })}
                    </div>
                }
            })
            .collect_view()
    }
}
