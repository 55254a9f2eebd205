//! Loading Component
//!
//! Spinners and the placeholder shapes shown while lists are fetched.

use leptos::*;

/// Widths of the headline bar, cycled so stacked rows don't look identical
const HEADLINE_WIDTHS: [&str; 3] = ["w-2/3", "w-1/2", "w-3/5"];

fn headline_width(row: usize) -> &'static str {
    HEADLINE_WIDTHS[row % HEADLINE_WIDTHS.len()]
}

/// Centered spinner for a page or tab that has nothing to show yet
#[component]
pub fn Loading(#[prop(optional, into)] message: Option<String>) -> impl IntoView {
    view! {
        <div class="flex flex-col items-center justify-center py-12 text-gray-500" role="status">
            <div class="loading-spinner w-8 h-8 border-blue-700" />
            {message.map(|m| view! { <p class="mt-3 text-sm">{m}</p> })}
        </div>
    }
}

/// Small spinner that sits inside a button label
#[component]
pub fn InlineLoading() -> impl IntoView {
    view! {
        <span class="inline-block loading-spinner w-4 h-4 border-current" aria-hidden="true" />
    }
}

/// Skeleton loader for fact-check and story cards
#[component]
pub fn CardSkeleton() -> impl IntoView {
    view! {
        <div class="bg-white rounded-lg p-4 shadow animate-pulse">
            <div class="h-40 bg-gray-200 rounded mb-4" />
            <div class="h-4 bg-gray-200 rounded w-1/3 mb-4" />
            <div class="h-6 bg-gray-200 rounded w-2/3 mb-2" />
            <div class="h-4 bg-gray-200 rounded w-full" />
        </div>
    }
}

/// Placeholder for the admin and dashboard tables: selection box, headline,
/// meta line, status pill and an action stub per row
#[component]
pub fn ListSkeleton(
    #[prop(default = 3)]
    count: usize,
) -> impl IntoView {
    view! {
        <div class="bg-white rounded-lg shadow divide-y animate-pulse" role="status">
            {(0..count).map(|row| view! {
                <div class="flex items-center px-4 py-4 space-x-3">
                    <div class="w-4 h-4 bg-gray-200 rounded-sm" />
                    <div class="flex-1 space-y-2">
                        <div class=format!("h-4 bg-gray-200 rounded {}", headline_width(row)) />
                        <div class="h-3 bg-gray-100 rounded w-1/3" />
                    </div>
                    <div class="h-5 w-20 bg-gray-200 rounded-full" />
                    <div class="h-8 w-16 bg-gray-100 rounded" />
                </div>
            }).collect_view()}
        </div>
    }
}
