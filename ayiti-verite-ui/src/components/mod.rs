//! UI Components
//!
//! Reusable Leptos components shared by the pages.

pub mod ai_analysis;
pub mod auth_modal;
pub mod carousel;
pub mod fact_check_list;
pub mod loading;
pub mod nav;
pub mod positive_content;
pub mod protected_route;
pub mod submission_form;
pub mod toast;

pub use ai_analysis::AiAnalysisPanel;
pub use auth_modal::AuthModal;
pub use carousel::HeroCarousel;
pub use fact_check_list::{FactCheckList, VerdictBadge};
pub use loading::{CardSkeleton, InlineLoading, ListSkeleton, Loading};
pub use nav::Nav;
pub use positive_content::HaitiUnveiled;
pub use protected_route::Protected;
pub use submission_form::ClaimForm;
pub use toast::Toast;
