//! Pages
//!
//! Top-level page components for each route.

pub mod admin;
pub mod dashboard;
pub mod fact_check_detail;
pub mod home;

pub use admin::AdminDashboard;
pub use dashboard::UserDashboardPage;
pub use fact_check_detail::FactCheckDetail;
pub use home::Home;
