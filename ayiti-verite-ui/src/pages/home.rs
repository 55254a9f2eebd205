//! Home Page

use leptos::*;

use crate::components::{ClaimForm, FactCheckList, HaitiUnveiled, HeroCarousel};

#[component]
pub fn Home() -> impl IntoView {
    view! {
        <div>
            <HeroCarousel />
            <ClaimForm />
            <FactCheckList />
            <HaitiUnveiled />
        </div>
    }
}
