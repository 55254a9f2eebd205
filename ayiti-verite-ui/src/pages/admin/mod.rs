//! Admin Page
//!
//! Staff back office: an overview of counters plus one tab per manager.
//! Each tab owns its manager and mirrors the manager's state into signals
//! after every action.

mod content;
mod factchecks;
mod submissions;
mod users;

use leptos::*;

use ayiti_verite::AdminStats;

use crate::components::Loading;
use crate::state::use_global_state;

use content::ContentTab;
use factchecks::FactChecksTab;
use submissions::SubmissionsTab;
use users::UsersTab;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum AdminTab {
    Overview,
    Submissions,
    FactChecks,
    Content,
    Users,
}

impl AdminTab {
    const ALL: [AdminTab; 5] = [
        AdminTab::Overview,
        AdminTab::Submissions,
        AdminTab::FactChecks,
        AdminTab::Content,
        AdminTab::Users,
    ];

    fn label(self) -> &'static str {
        match self {
            AdminTab::Overview => "Overview",
            AdminTab::Submissions => "Submissions",
            AdminTab::FactChecks => "Fact-Checks",
            AdminTab::Content => "Positive Content",
            AdminTab::Users => "Users",
        }
    }
}

pub(crate) const INPUT_CLASS: &str =
    "w-full border border-gray-300 rounded-lg px-3 py-2 text-sm focus:border-blue-500 focus:outline-none";
pub(crate) const PRIMARY_BUTTON: &str =
    "px-4 py-2 rounded-lg bg-blue-700 hover:bg-blue-800 text-white text-sm font-medium";
pub(crate) const SECONDARY_BUTTON: &str =
    "px-4 py-2 rounded-lg bg-gray-100 hover:bg-gray-200 text-gray-800 text-sm font-medium";
pub(crate) const DANGER_LINK: &str = "text-sm text-red-600 hover:underline";

/// `"all"` maps to `None`
pub(crate) fn parse_choice<T: std::str::FromStr>(value: &str) -> Option<T> {
    if value == "all" {
        None
    } else {
        value.parse().ok()
    }
}

#[component]
pub fn AdminDashboard() -> impl IntoView {
    let tab = create_rw_signal(AdminTab::Overview);

    view! {
        <div class="container mx-auto px-4 py-10 space-y-6">
            <h1 class="text-3xl font-bold">"Admin Dashboard"</h1>

            <div class="flex flex-wrap gap-2 border-b border-gray-200">
                {AdminTab::ALL.iter().copied().map(|t| view! {
                    <button
                        class=move || if tab.get() == t {
                            "px-4 py-2 -mb-px border-b-2 border-blue-700 text-blue-700 font-medium"
                        } else {
                            "px-4 py-2 text-gray-600 hover:text-gray-900"
                        }
                        on:click=move |_| tab.set(t)
                    >
                        {t.label()}
                    </button>
                }).collect_view()}
            </div>

            {move || match tab.get() {
                AdminTab::Overview => view! { <Overview /> }.into_view(),
                AdminTab::Submissions => view! { <SubmissionsTab /> }.into_view(),
                AdminTab::FactChecks => view! { <FactChecksTab /> }.into_view(),
                AdminTab::Content => view! { <ContentTab /> }.into_view(),
                AdminTab::Users => view! { <UsersTab /> }.into_view(),
            }}
        </div>
    }
}

#[component]
fn Overview() -> impl IntoView {
    let state = use_global_state();
    let stats = create_rw_signal(None::<AdminStats>);
    let loading = create_rw_signal(true);

    spawn_local(async move {
        match state.api().admin_stats().await {
            Ok(s) => stats.set(Some(s)),
            Err(e) => {
                web_sys::console::error_1(&format!("Failed to load admin stats: {}", e).into());
                state.show_error("Failed to load statistics");
            }
        }
        loading.set(false);
        state.sync();
    });

    move || {
        if loading.get() {
            return view! { <Loading /> }.into_view();
        }
        match stats.get() {
            Some(s) => view! {
                <div class="grid grid-cols-2 md:grid-cols-5 gap-4">
                    {s.cards().into_iter().map(|(label, value)| view! {
                        <div class="bg-white rounded-lg shadow p-5">
                            <p class="text-sm text-gray-500">{label}</p>
                            <p class="text-3xl font-bold mt-1">{value}</p>
                        </div>
                    }).collect_view()}
                </div>
            }
            .into_view(),
            None => view! { <p class="text-gray-500">"Statistics are unavailable."</p> }.into_view(),
        }
    }
}
