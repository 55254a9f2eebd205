//! Ayiti Vérité Web App
//!
//! Fact-checking and positive-content platform for Haitian communities,
//! built with Leptos (WASM).
//!
//! # Features
//!
//! - Claim submission for signed-in users
//! - Published fact-checks and "Haiti Unveiled" stories
//! - Personal dashboard with submission tracking
//! - Admin back office with AI-assisted review
//!
//! # Architecture
//!
//! Client-side rendered (CSR) Leptos app. All data goes through the
//! `ayiti-verite` client core; this crate only renders its state and wires
//! browser storage, toasts and confirm dialogs into it.

use leptos::*;

mod app;
mod components;
mod pages;
mod state;
mod storage;

fn main() {
    // Set up panic hook for better error messages in WASM
    console_error_panic_hook::set_once();

    mount_to_body(|| view! { <app::App /> });
}
