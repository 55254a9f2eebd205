//! REST API Client
//!
//! One typed method per backend endpoint. Every request attaches
//! `Authorization: Bearer <access>` when an access token is stored, and a
//! 401 answer to such a request clears the stored tokens.

use reqwest::header::{HeaderValue, AUTHORIZATION};
use reqwest::multipart::{Form, Part};
use reqwest::{Client, Method, RequestBuilder, Response, StatusCode};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::sync::Arc;
use tracing::{debug, warn};
use uuid::Uuid;

use crate::admin::AdminStats;
use crate::config::{normalize_base_url, ClientConfig};
use crate::models::{
    AdminUser, AiAnalysis, DashboardData, FactCheck, FactCheckDraft, PositiveContent,
    PositiveContentDraft, Profile, Submission, SubmissionStatus, UserDraft, UserSubmission,
    UserUpdate,
};
use crate::session::{TokenStore, TokenStoreExt};

use super::dto::{
    decode_list, ActivationUpdate, AuthResponse, ClaimRequest, LoginRequest, LogoutRequest,
    ProfileResponse, PublishUpdate, RegisterRequest, StaffUpdate, StatusUpdate, UserQuery,
    VerdictRequest,
};
use super::error::{ApiError, ApiResult};

/// Request body variants
enum Body<'a> {
    Empty,
    Json(serde_json::Value),
    Multipart(&'a PositiveContentDraft),
}

/// Typed client for the Ayiti Vérité REST API
///
/// Cheap to clone; clones share the HTTP connection pool and the token store.
#[derive(Clone)]
pub struct ApiClient {
    http: Client,
    base_url: String,
    tokens: Arc<dyn TokenStore>,
}

impl std::fmt::Debug for ApiClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ApiClient")
            .field("base_url", &self.base_url)
            .finish_non_exhaustive()
    }
}

impl ApiClient {
    pub fn new(base_url: &str, tokens: Arc<dyn TokenStore>) -> Self {
        Self {
            http: Client::new(),
            base_url: normalize_base_url(base_url),
            tokens,
        }
    }

    pub fn from_config(config: &ClientConfig, tokens: Arc<dyn TokenStore>) -> Self {
        Self::new(&config.api.base_url, tokens)
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn tokens(&self) -> &Arc<dyn TokenStore> {
        &self.tokens
    }

    /// Absolute URL for an API path
    pub fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    // ============================================
    // Transport
    // ============================================

    async fn execute(&self, method: Method, path: &str, body: Body<'_>) -> ApiResult<Response> {
        self.execute_with_query(method, path, &[], body).await
    }

    async fn execute_with_query(
        &self,
        method: Method,
        path: &str,
        query: &[(&'static str, String)],
        body: Body<'_>,
    ) -> ApiResult<Response> {
        let request_id = Uuid::new_v4();
        let bearer = self.tokens.access_token();

        let mut request: RequestBuilder = self.http.request(method.clone(), self.url(path));
        if !query.is_empty() {
            request = request.query(query);
        }
        if let Some(token) = &bearer {
            let value = HeaderValue::from_str(&format!("Bearer {}", token))
                .map_err(|e| ApiError::InvalidRequest(e.to_string()))?;
            request = request.header(AUTHORIZATION, value);
        }
        request = match body {
            Body::Empty => request,
            Body::Json(value) => request.json(&value),
            Body::Multipart(draft) => request.multipart(content_form(draft)?),
        };

        debug!(%request_id, %method, path, authenticated = bearer.is_some(), "API request");

        let response = request.send().await.map_err(|e| {
            warn!(%request_id, %method, path, error = %e, "API request failed");
            ApiError::Request(e)
        })?;

        let status = response.status();
        if status.is_success() {
            debug!(%request_id, status = status.as_u16(), "API response");
            return Ok(response);
        }

        let text = response.text().await.unwrap_or_default();
        if status == StatusCode::UNAUTHORIZED && bearer.is_some() {
            warn!(%request_id, path, "Bearer token rejected, clearing stored session");
            if let Err(e) = self.tokens.clear_tokens() {
                warn!(error = %e, "Failed to clear stored tokens");
            }
        }

        let err = ApiError::from_body(status.as_u16(), &text);
        warn!(%request_id, %method, path, status = status.as_u16(), kind = ?err.kind(), "API error");
        Err(err)
    }

    async fn decode<T: DeserializeOwned>(response: Response) -> ApiResult<T> {
        let text = response.text().await?;
        serde_json::from_str(&text).map_err(|e| ApiError::Decode(e.to_string()))
    }

    async fn get<T: DeserializeOwned>(&self, path: &str) -> ApiResult<T> {
        let response = self.execute(Method::GET, path, Body::Empty).await?;
        Self::decode(response).await
    }

    async fn get_list<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&'static str, String)],
    ) -> ApiResult<Vec<T>> {
        let response = self
            .execute_with_query(Method::GET, path, query, Body::Empty)
            .await?;
        let value: serde_json::Value = Self::decode(response).await?;
        decode_list(value)
    }

    async fn send_json<B: Serialize, T: DeserializeOwned>(
        &self,
        method: Method,
        path: &str,
        body: &B,
    ) -> ApiResult<T> {
        let value = serde_json::to_value(body).map_err(|e| ApiError::InvalidRequest(e.to_string()))?;
        let response = self.execute(method, path, Body::Json(value)).await?;
        Self::decode(response).await
    }

    /// Send a JSON body and ignore whatever the server answers with
    async fn send_json_discard<B: Serialize>(&self, method: Method, path: &str, body: &B) -> ApiResult<()> {
        let value = serde_json::to_value(body).map_err(|e| ApiError::InvalidRequest(e.to_string()))?;
        self.execute(method, path, Body::Json(value)).await?;
        Ok(())
    }

    async fn delete(&self, path: &str) -> ApiResult<()> {
        self.execute(Method::DELETE, path, Body::Empty).await?;
        Ok(())
    }

    // ============================================
    // Auth
    // ============================================

    pub async fn login(&self, body: &LoginRequest) -> ApiResult<AuthResponse> {
        self.send_json(Method::POST, "/api/auth/login/", body).await
    }

    pub async fn register(&self, body: &RegisterRequest) -> ApiResult<AuthResponse> {
        self.send_json(Method::POST, "/api/auth/register/", body).await
    }

    pub async fn logout(&self, refresh: &str) -> ApiResult<()> {
        let body = LogoutRequest {
            refresh: refresh.to_string(),
        };
        self.send_json_discard(Method::POST, "/api/auth/logout/", &body).await
    }

    pub async fn profile(&self) -> ApiResult<Profile> {
        let response: ProfileResponse = self.get("/api/auth/profile/").await?;
        Ok(response.user)
    }

    // ============================================
    // Public
    // ============================================

    pub async fn submit_claim(&self, body: &ClaimRequest) -> ApiResult<()> {
        self.send_json_discard(Method::POST, "/api/submit-claim/", body).await
    }

    pub async fn fact_checks(&self) -> ApiResult<Vec<FactCheck>> {
        self.get_list("/api/factchecks/", &[]).await
    }

    pub async fn fact_check(&self, id: i64) -> ApiResult<FactCheck> {
        self.get(&format!("/api/factchecks/{}/", id)).await
    }

    pub async fn positive_content(&self) -> ApiResult<Vec<PositiveContent>> {
        self.get_list("/api/positive-content/", &[]).await
    }

    // ============================================
    // User
    // ============================================

    pub async fn dashboard(&self) -> ApiResult<DashboardData> {
        self.get("/api/user/dashboard/").await
    }

    pub async fn user_submissions(&self) -> ApiResult<Vec<UserSubmission>> {
        self.get_list("/api/user/submissions/", &[]).await
    }

    // ============================================
    // Admin: submissions
    // ============================================

    pub async fn admin_stats(&self) -> ApiResult<AdminStats> {
        self.get("/api/admin/stats/").await
    }

    pub async fn admin_submissions(&self) -> ApiResult<Vec<Submission>> {
        self.get_list("/api/admin/submissions/", &[]).await
    }

    pub async fn update_submission_status(&self, id: i64, status: SubmissionStatus) -> ApiResult<()> {
        self.send_json_discard(
            Method::PATCH,
            &format!("/api/admin/submissions/{}/", id),
            &StatusUpdate { status },
        )
        .await
    }

    pub async fn delete_submission(&self, id: i64) -> ApiResult<()> {
        self.delete(&format!("/api/admin/submissions/{}/", id)).await
    }

    pub async fn create_fact_check_from_submission(&self, id: i64, body: &VerdictRequest) -> ApiResult<()> {
        self.send_json_discard(
            Method::POST,
            &format!("/api/admin/submissions/{}/create-factcheck/", id),
            body,
        )
        .await
    }

    // ============================================
    // Admin: fact-checks
    // ============================================

    pub async fn admin_fact_checks(&self) -> ApiResult<Vec<FactCheck>> {
        self.get_list("/api/admin/factchecks/", &[]).await
    }

    pub async fn create_fact_check(&self, draft: &FactCheckDraft) -> ApiResult<()> {
        self.send_json_discard(Method::POST, "/api/admin/factchecks/", draft).await
    }

    /// Full replacement of a fact-check
    pub async fn update_fact_check(&self, id: i64, draft: &FactCheckDraft) -> ApiResult<()> {
        self.send_json_discard(Method::PUT, &format!("/api/admin/factchecks/{}/", id), draft)
            .await
    }

    pub async fn delete_fact_check(&self, id: i64) -> ApiResult<()> {
        self.delete(&format!("/api/admin/factchecks/{}/", id)).await
    }

    // ============================================
    // Admin: positive content
    // ============================================

    pub async fn admin_positive_content(&self) -> ApiResult<Vec<PositiveContent>> {
        self.get_list("/api/admin/positive-content/", &[]).await
    }

    /// Create a story as `multipart/form-data`
    pub async fn create_positive_content(&self, draft: &PositiveContentDraft) -> ApiResult<()> {
        self.execute(Method::POST, "/api/admin/positive-content/", Body::Multipart(draft))
            .await?;
        Ok(())
    }

    /// Replace a story as `multipart/form-data`
    pub async fn update_positive_content(&self, id: i64, draft: &PositiveContentDraft) -> ApiResult<()> {
        self.execute(
            Method::PUT,
            &format!("/api/admin/positive-content/{}/", id),
            Body::Multipart(draft),
        )
        .await?;
        Ok(())
    }

    pub async fn set_content_published(&self, id: i64, is_published: bool) -> ApiResult<()> {
        self.send_json_discard(
            Method::PATCH,
            &format!("/api/admin/positive-content/{}/", id),
            &PublishUpdate { is_published },
        )
        .await
    }

    pub async fn delete_positive_content(&self, id: i64) -> ApiResult<()> {
        self.delete(&format!("/api/admin/positive-content/{}/", id)).await
    }

    // ============================================
    // Admin: users
    // ============================================

    pub async fn admin_users(&self, query: &UserQuery) -> ApiResult<Vec<AdminUser>> {
        self.get_list("/api/admin/users/", &query.to_pairs()).await
    }

    pub async fn create_user(&self, draft: &UserDraft) -> ApiResult<()> {
        self.send_json_discard(Method::POST, "/api/admin/users/", draft).await
    }

    pub async fn update_user(&self, id: i64, update: &UserUpdate) -> ApiResult<()> {
        self.send_json_discard(Method::PATCH, &format!("/api/admin/users/{}/", id), update)
            .await
    }

    pub async fn set_user_active(&self, id: i64, is_active: bool) -> ApiResult<()> {
        self.send_json_discard(
            Method::PATCH,
            &format!("/api/admin/users/{}/activation/", id),
            &ActivationUpdate { is_active },
        )
        .await
    }

    pub async fn set_user_staff(&self, id: i64, is_staff: bool) -> ApiResult<()> {
        self.send_json_discard(
            Method::PATCH,
            &format!("/api/admin/users/{}/", id),
            &StaffUpdate { is_staff },
        )
        .await
    }

    pub async fn delete_user(&self, id: i64) -> ApiResult<()> {
        self.delete(&format!("/api/admin/users/{}/", id)).await
    }

    // ============================================
    // AI
    // ============================================

    pub async fn process_submission_ai(&self, id: i64) -> ApiResult<AiAnalysis> {
        let response = self
            .execute(
                Method::POST,
                &format!("/api/ai/process-submission/{}/", id),
                Body::Empty,
            )
            .await?;
        Self::decode(response).await
    }

    pub async fn ai_analysis(&self, id: i64) -> ApiResult<AiAnalysis> {
        self.get(&format!("/api/ai/analysis/{}/", id)).await
    }
}

/// Multipart body for a story: every text field plus an optional `image` file
fn content_form(draft: &PositiveContentDraft) -> ApiResult<Form> {
    let mut form = Form::new();
    for (name, value) in draft.text_fields() {
        form = form.text(name, value);
    }
    if let Some(image) = &draft.image {
        let part = Part::bytes(image.bytes.clone())
            .file_name(image.file_name.clone())
            .mime_str(&image.mime)
            .map_err(|e| ApiError::InvalidRequest(format!("image mime '{}': {}", image.mime, e)))?;
        form = form.part("image", part);
    }
    Ok(form)
}
