//! Ayiti Vérité REST API
//!
//! Typed access to the backend. Every path is relative to one base URL taken
//! from [`crate::config::ClientConfig`].
//!
//! # Endpoints
//!
//! ## Auth
//! - `POST /api/auth/login/` - Login, returns user and tokens
//! - `POST /api/auth/register/` - Register, returns user and tokens
//! - `POST /api/auth/logout/` - Invalidate the refresh token
//! - `GET /api/auth/profile/` - Profile of the bearer
//!
//! ## Public
//! - `POST /api/submit-claim/` - Submit a claim or URL
//! - `GET /api/factchecks/` - Published fact-checks
//! - `GET /api/factchecks/:id/` - One fact-check
//! - `GET /api/positive-content/` - Published stories
//!
//! ## User
//! - `GET /api/user/dashboard/` - Dashboard aggregate
//! - `GET /api/user/submissions/` - Own submissions
//!
//! ## Admin
//! - `GET /api/admin/stats/` - Back-office counters
//! - `GET|PATCH|DELETE /api/admin/submissions/[:id/]`
//! - `POST /api/admin/submissions/:id/create-factcheck/`
//! - `GET|POST|PUT|DELETE /api/admin/factchecks/[:id/]`
//! - `GET|POST|PUT|PATCH|DELETE /api/admin/positive-content/[:id/]`
//! - `GET|POST|PATCH|DELETE /api/admin/users/[:id/]`
//! - `PATCH /api/admin/users/:id/activation/`
//!
//! ## AI
//! - `POST /api/ai/process-submission/:id/` - Run an analysis
//! - `GET /api/ai/analysis/:id/` - Stored analysis

pub mod client;
pub mod dto;
pub mod error;

pub use client::ApiClient;
pub use dto::{decode_list, ClaimRequest, UserQuery, VerdictRequest, UNEXPECTED_FORMAT};
pub use error::{classify, ApiError, ApiResult, ErrorKind};
