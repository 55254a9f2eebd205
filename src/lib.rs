//! # Ayiti Vérité
//!
//! Client core for the Ayiti Vérité fact-checking and positive-content
//! platform. Every data operation is a call to the remote REST API; this
//! crate gives those calls types, holds the session, and carries the small
//! amount of state each screen needs between calls.
//!
//! The library does not depend on an async runtime. It runs unchanged in the
//! browser (see the `ayiti-verite-ui` crate) and under tokio in the `verite`
//! command line tool.
//!
//! ## Modules
//!
//! - [`session`]: tokens, profile, login/register/logout
//! - [`api`]: typed REST client and structured errors
//! - [`route`]: access decisions for protected pages
//! - [`forms`]: claim submission, auth and verdict forms
//! - [`admin`]: submissions, fact-checks, positive content and users managers
//! - [`ai`]: AI analysis panel
//! - [`dashboard`]: the signed-in user's dashboard
//! - [`public`]: visitor-facing feeds and the home carousel
//! - [`feedback`]: toast and confirmation seams
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use ayiti_verite::{ApiClient, ClientConfig, MemoryTokenStore, Session};
//! use std::sync::Arc;
//!
//! # async fn run() {
//! let config = ClientConfig::load_default();
//! let api = ApiClient::from_config(&config, Arc::new(MemoryTokenStore::new()));
//! let session = Session::new(api);
//! session.restore().await;
//!
//! if session.login("marie", "secret").await.is_success() {
//!     let fact_checks = session.api().fact_checks().await;
//!     println!("{:?}", fact_checks.map(|f| f.len()));
//! }
//! # }
//! ```

pub mod admin;
pub mod ai;
pub mod api;
pub mod config;
pub mod dashboard;
pub mod feedback;
pub mod forms;
pub mod models;
pub mod public;
pub mod route;
pub mod session;

// Re-export top-level types for convenience
pub use api::{ApiClient, ApiError, ApiResult, ErrorKind};

pub use config::{ClientConfig, ConfigError, LoggingConfig};

pub use session::{
    AuthOutcome, FileTokenStore, MemoryTokenStore, Session, StoreError, TokenStore, TokenStoreExt,
    Tokens,
};

pub use route::{Access, Gate, GateDecision};

pub use feedback::{Confirm, FixedConfirm, Notifier, RecordingNotifier, Toast, ToastKind, TracingNotifier};

pub use forms::{
    AuthMode, LoginForm, RegisterForm, SubmissionForm, SubmitOutcome, ValidationError, VerdictDraft,
};

pub use admin::{
    AdminContext, AdminStats, BulkOutcome, FactChecksManager, PositiveContentManager,
    SubmissionsManager, UsersManager,
};

pub use ai::AiPanel;

pub use dashboard::{ActivityEntry, DashboardTab, UserDashboard};

pub use public::{Carousel, FactCheckFeed, PositiveContentFeed};
