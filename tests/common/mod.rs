//! Mock platform backend
//!
//! An axum app that answers the REST endpoints the client uses, backed by
//! in-memory records. Every request is recorded so tests can assert on what
//! was (or was not) sent.

#![allow(dead_code)]

use axum::{
    extract::{Multipart, Path, Query, Request, State},
    http::{header::AUTHORIZATION, HeaderMap, Method, StatusCode},
    middleware::{self, Next},
    response::{IntoResponse, Response},
    routing::{get, patch, post},
    Json, Router,
};
use parking_lot::{Mutex, MutexGuard};
use serde_json::{json, Value};
use std::collections::{HashMap, HashSet};
use std::sync::Arc;

use ayiti_verite::{
    AdminContext, ApiClient, FixedConfirm, MemoryTokenStore, RecordingNotifier, Session,
};

pub const ADMIN: (&str, &str) = ("admin", "admin-pass");
pub const MARIE: (&str, &str) = ("marie", "marie-pass");

type Shared = Arc<MockState>;
type Reply = Result<Response, Response>;

#[derive(Debug, Clone)]
pub struct Recorded {
    pub method: Method,
    pub path: String,
    pub query: Option<String>,
    pub bearer: Option<String>,
}

#[derive(Debug, Clone)]
pub struct MockUser {
    pub id: i64,
    pub username: String,
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    pub password: String,
    pub is_staff: bool,
    pub is_active: bool,
}

#[derive(Default)]
pub struct Db {
    pub users: Vec<MockUser>,
    /// access token -> user id
    pub sessions: HashMap<String, i64>,
    pub refresh: HashMap<String, i64>,
    pub submissions: Vec<Value>,
    pub fact_checks: Vec<Value>,
    pub content: Vec<Value>,
    pub analyses: HashMap<i64, Value>,
    pub next_id: i64,
    /// Ids whose mutations answer 500
    pub failing: HashSet<i64>,
    /// Forced answer for AI processing
    pub ai_failure: Option<(StatusCode, Value)>,
    /// Field names of the last multipart body, with the file name of file parts
    pub last_multipart: Vec<(String, Option<String>)>,
}

impl Db {
    fn seeded() -> Self {
        let user = |id: i64, username: &str, is_staff: bool, is_active: bool| MockUser {
            id,
            username: username.to_string(),
            email: format!("{}@example.ht", username),
            first_name: String::new(),
            last_name: String::new(),
            password: format!("{}-pass", username),
            is_staff,
            is_active,
        };

        Self {
            users: vec![
                user(1, "admin", true, true),
                user(2, "marie", false, true),
                user(3, "jean", false, false),
            ],
            submissions: vec![
                json!({
                    "id": 101, "owner": 2,
                    "claim_text": "Fuel prices will triple next week",
                    "context": "WhatsApp forward", "url_submitted": null,
                    "status": "new", "submitter_name": "marie", "submitter_email": "marie@example.ht",
                    "date_submitted": "2024-05-02T10:00:00Z", "has_url": false, "has_text": true
                }),
                json!({
                    "id": 102, "owner": 2,
                    "claim_text": null, "context": "",
                    "url_submitted": "https://example.ht/news/bridge",
                    "status": "in_review", "submitter_name": "marie", "submitter_email": "marie@example.ht",
                    "date_submitted": "2024-05-01T10:00:00Z", "has_url": true, "has_text": false
                }),
                json!({
                    "id": 103, "owner": 3,
                    "claim_text": "Cholera outbreak in Jacmel", "context": "Radio",
                    "url_submitted": null,
                    "status": "completed", "submitter_name": "jean", "submitter_email": "jean@example.ht",
                    "date_submitted": "2024-04-20T10:00:00Z", "has_url": false, "has_text": true
                }),
            ],
            fact_checks: vec![
                json!({
                    "id": 201, "submission": 103,
                    "title": "Fact-Check: Cholera outbreak in Jacmel", "verdict": "Mostly False",
                    "summary": "Health officials confirmed two isolated cases, not an outbreak.",
                    "url_submitted": null, "date_created": "2024-04-25T10:00:00Z"
                }),
                json!({
                    "id": 202, "submission": null,
                    "title": "Minimum wage doubled overnight", "verdict": "False",
                    "summary": "No decree was published.",
                    "url_submitted": "https://example.ht/wage", "date_created": "2024-03-10T10:00:00Z"
                }),
            ],
            content: vec![
                content_json(301, "Rara season in Léogâne", "culture", true, None),
                content_json(302, "Solar kiosks in Cap-Haïtien", "innovation", false, None),
                content_json(303, "Reforestation at Pic Macaya", "nature", true, Some("macaya.jpg")),
            ],
            next_id: 1000,
            ..Default::default()
        }
    }

    fn next_id(&mut self) -> i64 {
        self.next_id += 1;
        self.next_id
    }

    fn issue_tokens(&mut self, user: &MockUser) -> Value {
        let n = self.next_id();
        let access = format!("access-{}-{}", user.id, n);
        let refresh = format!("refresh-{}-{}", user.id, n);
        self.sessions.insert(access.clone(), user.id);
        self.refresh.insert(refresh.clone(), user.id);
        json!({
            "user": profile_json(user),
            "tokens": {"access": access, "refresh": refresh}
        })
    }

    fn owned_submissions(&self, user_id: i64) -> Vec<&Value> {
        self.submissions
            .iter()
            .filter(|s| s["owner"] == json!(user_id))
            .collect()
    }
}

pub struct MockState {
    pub db: Mutex<Db>,
    pub requests: Mutex<Vec<Recorded>>,
}

impl MockState {
    fn user_for(&self, headers: &HeaderMap) -> Result<MockUser, Response> {
        let db = self.db.lock();
        let id = bearer(headers)
            .and_then(|token| db.sessions.get(&token).copied())
            .ok_or_else(unauthorized)?;
        db.users
            .iter()
            .find(|u| u.id == id && u.is_active)
            .cloned()
            .ok_or_else(unauthorized)
    }

    fn staff_for(&self, headers: &HeaderMap) -> Result<MockUser, Response> {
        let user = self.user_for(headers)?;
        if !user.is_staff {
            return Err(error(
                StatusCode::FORBIDDEN,
                json!({"detail": "You do not have permission to perform this action."}),
            ));
        }
        Ok(user)
    }
}

// ============================================
// Response helpers
// ============================================

fn bearer(headers: &HeaderMap) -> Option<String> {
    headers
        .get(AUTHORIZATION)?
        .to_str()
        .ok()?
        .strip_prefix("Bearer ")
        .map(str::to_string)
}

fn error(status: StatusCode, body: Value) -> Response {
    (status, Json(body)).into_response()
}

fn unauthorized() -> Response {
    error(
        StatusCode::UNAUTHORIZED,
        json!({"detail": "Given token not valid for any token type", "code": "token_not_valid"}),
    )
}

fn not_found() -> Response {
    error(StatusCode::NOT_FOUND, json!({"detail": "Not found."}))
}

fn ok(body: Value) -> Reply {
    Ok(Json(body).into_response())
}

fn created(body: Value) -> Reply {
    Ok((StatusCode::CREATED, Json(body)).into_response())
}

fn no_content() -> Reply {
    Ok(StatusCode::NO_CONTENT.into_response())
}

fn failing(db: &Db, id: i64) -> Result<(), Response> {
    if db.failing.contains(&id) {
        return Err(error(
            StatusCode::INTERNAL_SERVER_ERROR,
            json!({"error": "Internal server error"}),
        ));
    }
    Ok(())
}

fn text(body: &Value, key: &str) -> String {
    body[key].as_str().unwrap_or_default().to_string()
}

fn profile_json(user: &MockUser) -> Value {
    json!({
        "id": user.id,
        "username": user.username,
        "email": user.email,
        "first_name": user.first_name,
        "last_name": user.last_name,
        "is_staff": user.is_staff,
        "date_joined": "2024-01-15T12:00:00Z"
    })
}

fn admin_user_json(user: &MockUser, current: i64) -> Value {
    let mut value = profile_json(user);
    value["is_active"] = json!(user.is_active);
    value["is_current_user"] = json!(user.id == current);
    value["full_name"] = json!(format!("{} {}", user.first_name, user.last_name).trim());
    value
}

fn content_json(id: i64, title: &str, category: &str, published: bool, image: Option<&str>) -> Value {
    json!({
        "id": id,
        "title": title,
        "content_type": category,
        "description": format!("{} story", title),
        "image_url_full": image.map(|f| format!("https://media.example.ht/positive/{}", f)),
        "source_url": null,
        "is_published": published,
        "has_image": image.is_some(),
        "date_created": "2024-04-01T10:00:00Z"
    })
}

fn user_submission_json(submission: &Value, fact_checks: &[Value]) -> Value {
    let related = fact_checks
        .iter()
        .find(|f| f["submission"] == submission["id"]);
    json!({
        "id": submission["id"],
        "claim_text": submission["claim_text"],
        "url_submitted": submission["url_submitted"],
        "status": submission["status"],
        "date_submitted": submission["date_submitted"],
        "has_related_factcheck": related.is_some(),
        "related_factcheck_id": related.map(|f| f["id"].clone()),
        "related_factcheck_title": related.map(|f| f["title"].clone())
    })
}

// ============================================
// Router
// ============================================

pub fn build_router(state: Shared) -> Router {
    Router::new()
        .route("/api/auth/login/", post(login))
        .route("/api/auth/register/", post(register))
        .route("/api/auth/logout/", post(logout))
        .route("/api/auth/profile/", get(profile))
        .route("/api/submit-claim/", post(submit_claim))
        .route("/api/factchecks/", get(public_fact_checks))
        .route("/api/factchecks/:id/", get(public_fact_check))
        .route("/api/positive-content/", get(public_content))
        .route("/api/user/dashboard/", get(dashboard))
        .route("/api/user/submissions/", get(user_submissions))
        .route("/api/admin/stats/", get(admin_stats))
        .route("/api/admin/submissions/", get(admin_submissions))
        .route(
            "/api/admin/submissions/:id/",
            patch(update_submission).delete(delete_submission),
        )
        .route(
            "/api/admin/submissions/:id/create-factcheck/",
            post(create_fact_check_from_submission),
        )
        .route(
            "/api/admin/factchecks/",
            get(admin_fact_checks).post(create_fact_check),
        )
        .route(
            "/api/admin/factchecks/:id/",
            axum::routing::put(update_fact_check).delete(delete_fact_check),
        )
        .route(
            "/api/admin/positive-content/",
            get(admin_content).post(create_content),
        )
        .route(
            "/api/admin/positive-content/:id/",
            axum::routing::put(update_content)
                .patch(publish_content)
                .delete(delete_content),
        )
        .route("/api/admin/users/", get(admin_users).post(create_user))
        .route("/api/admin/users/:id/", patch(update_user).delete(delete_user))
        .route("/api/admin/users/:id/activation/", patch(set_activation))
        .route("/api/ai/process-submission/:id/", post(process_ai))
        .route("/api/ai/analysis/:id/", get(ai_analysis))
        .layer(middleware::from_fn_with_state(state.clone(), record))
        .with_state(state)
}

async fn record(State(state): State<Shared>, request: Request, next: Next) -> Response {
    state.requests.lock().push(Recorded {
        method: request.method().clone(),
        path: request.uri().path().to_string(),
        query: request.uri().query().map(str::to_string),
        bearer: bearer(request.headers()),
    });
    next.run(request).await
}

// ============================================
// Auth
// ============================================

async fn login(State(state): State<Shared>, Json(body): Json<Value>) -> Reply {
    let mut db = state.db.lock();
    let user = db
        .users
        .iter()
        .find(|u| u.username == text(&body, "username") && u.password == text(&body, "password"))
        .cloned()
        .ok_or_else(|| error(StatusCode::BAD_REQUEST, json!({"error": "Invalid credentials"})))?;
    if !user.is_active {
        return Err(error(
            StatusCode::BAD_REQUEST,
            json!({"error": "User account is disabled"}),
        ));
    }
    ok(db.issue_tokens(&user))
}

async fn register(State(state): State<Shared>, Json(body): Json<Value>) -> Reply {
    if text(&body, "password") != text(&body, "password2") {
        return Err(error(
            StatusCode::BAD_REQUEST,
            json!({"password": ["Password fields didn't match."]}),
        ));
    }

    let mut db = state.db.lock();
    let username = text(&body, "username");
    if db.users.iter().any(|u| u.username == username) {
        return Err(error(
            StatusCode::BAD_REQUEST,
            json!({"error": "A user with that username already exists."}),
        ));
    }

    let user = MockUser {
        id: db.next_id(),
        username,
        email: text(&body, "email"),
        first_name: String::new(),
        last_name: String::new(),
        password: text(&body, "password"),
        is_staff: false,
        is_active: true,
    };
    db.users.push(user.clone());
    created(db.issue_tokens(&user))
}

async fn logout(State(state): State<Shared>, Json(body): Json<Value>) -> Reply {
    let mut db = state.db.lock();
    if let Some(user_id) = db.refresh.remove(&text(&body, "refresh")) {
        db.sessions.retain(|_, id| *id != user_id);
    }
    ok(json!({"message": "Successfully logged out"}))
}

async fn profile(State(state): State<Shared>, headers: HeaderMap) -> Reply {
    let user = state.user_for(&headers)?;
    ok(json!({"user": profile_json(&user)}))
}

// ============================================
// Public and user
// ============================================

async fn submit_claim(State(state): State<Shared>, headers: HeaderMap, Json(body): Json<Value>) -> Reply {
    let user = state.user_for(&headers)?;
    let claim = text(&body, "claim_text");
    let url = text(&body, "url_submitted");
    if claim.trim().is_empty() && url.trim().is_empty() {
        return Err(error(
            StatusCode::BAD_REQUEST,
            json!({"error": "Either claim text or URL must be provided"}),
        ));
    }

    let mut db = state.db.lock();
    let id = db.next_id();
    db.submissions.push(json!({
        "id": id, "owner": user.id,
        "claim_text": if claim.is_empty() { Value::Null } else { json!(claim) },
        "context": text(&body, "context"),
        "url_submitted": if url.is_empty() { Value::Null } else { json!(url) },
        "status": "new", "submitter_name": user.username, "submitter_email": user.email,
        "date_submitted": chrono::Utc::now().to_rfc3339(),
        "has_url": !url.is_empty(), "has_text": !claim.is_empty()
    }));
    created(json!({"message": "Submission received", "id": id}))
}

async fn public_fact_checks(State(state): State<Shared>) -> Reply {
    let db = state.db.lock();
    ok(json!({"count": db.fact_checks.len(), "next": null, "results": db.fact_checks}))
}

async fn public_fact_check(State(state): State<Shared>, Path(id): Path<i64>) -> Reply {
    let db = state.db.lock();
    match db.fact_checks.iter().find(|f| f["id"] == json!(id)) {
        Some(fact_check) => ok(fact_check.clone()),
        None => Err(not_found()),
    }
}

async fn public_content(State(state): State<Shared>) -> Reply {
    let db = state.db.lock();
    let published: Vec<&Value> = db
        .content
        .iter()
        .filter(|c| c["is_published"] == json!(true))
        .collect();
    ok(json!(published))
}

async fn dashboard(State(state): State<Shared>, headers: HeaderMap) -> Reply {
    let user = state.user_for(&headers)?;
    let db = state.db.lock();
    let own = db.owned_submissions(user.id);
    let count = |status: &str| own.iter().filter(|s| s["status"] == json!(status)).count();
    let own_ids: Vec<&Value> = own.iter().map(|s| &s["id"]).collect();
    let related: Vec<&Value> = db
        .fact_checks
        .iter()
        .filter(|f| own_ids.contains(&&f["submission"]))
        .collect();

    ok(json!({
        "user": {"username": user.username, "email": user.email, "date_joined": "2024-01-15T12:00:00Z"},
        "stats": {
            "total_submissions": own.len(),
            "submissions_in_review": count("in_review"),
            "submissions_completed": count("completed"),
            "submissions_published": related.len()
        },
        "recent_submissions": own
            .iter()
            .map(|s| user_submission_json(s, &db.fact_checks))
            .collect::<Vec<_>>(),
        "recent_fact_checks": related
    }))
}

async fn user_submissions(State(state): State<Shared>, headers: HeaderMap) -> Reply {
    let user = state.user_for(&headers)?;
    let db = state.db.lock();
    let items: Vec<Value> = db
        .owned_submissions(user.id)
        .into_iter()
        .map(|s| user_submission_json(s, &db.fact_checks))
        .collect();
    ok(json!(items))
}

// ============================================
// Admin: submissions
// ============================================

async fn admin_stats(State(state): State<Shared>, headers: HeaderMap) -> Reply {
    state.staff_for(&headers)?;
    let db = state.db.lock();
    ok(json!({
        "total_submissions": db.submissions.len(),
        "pending_submissions": db.submissions.iter().filter(|s| s["status"] == json!("new")).count(),
        "total_fact_checks": db.fact_checks.len(),
        "total_positive_content": db.content.len(),
        "total_users": db.users.len(),
        "ai_analyses": db.analyses.len()
    }))
}

async fn admin_submissions(State(state): State<Shared>, headers: HeaderMap) -> Reply {
    state.staff_for(&headers)?;
    ok(json!(state.db.lock().submissions))
}

async fn update_submission(
    State(state): State<Shared>,
    headers: HeaderMap,
    Path(id): Path<i64>,
    Json(body): Json<Value>,
) -> Reply {
    state.staff_for(&headers)?;
    let mut db = state.db.lock();
    failing(&db, id)?;
    let submission = db
        .submissions
        .iter_mut()
        .find(|s| s["id"] == json!(id))
        .ok_or_else(not_found)?;
    submission["status"] = body["status"].clone();
    ok(submission.clone())
}

async fn delete_submission(State(state): State<Shared>, headers: HeaderMap, Path(id): Path<i64>) -> Reply {
    state.staff_for(&headers)?;
    let mut db = state.db.lock();
    failing(&db, id)?;
    let before = db.submissions.len();
    db.submissions.retain(|s| s["id"] != json!(id));
    if db.submissions.len() == before {
        return Err(not_found());
    }
    no_content()
}

async fn create_fact_check_from_submission(
    State(state): State<Shared>,
    headers: HeaderMap,
    Path(id): Path<i64>,
    Json(body): Json<Value>,
) -> Reply {
    state.staff_for(&headers)?;
    if text(&body, "title").trim().is_empty() {
        return Err(error(StatusCode::BAD_REQUEST, json!({"error": "Title is required"})));
    }

    let mut db = state.db.lock();
    failing(&db, id)?;
    let submission = db
        .submissions
        .iter()
        .find(|s| s["id"] == json!(id))
        .cloned()
        .ok_or_else(not_found)?;
    let url = if body["use_submission_data"] == json!(true) {
        submission["url_submitted"].clone()
    } else {
        Value::Null
    };

    let fc_id = db.next_id();
    db.fact_checks.push(json!({
        "id": fc_id, "submission": id,
        "title": body["title"], "verdict": body["verdict"], "summary": body["summary"],
        "url_submitted": url, "date_created": chrono::Utc::now().to_rfc3339()
    }));
    if let Some(s) = db.submissions.iter_mut().find(|s| s["id"] == json!(id)) {
        s["status"] = json!("completed");
    }
    created(json!({"id": fc_id}))
}

// ============================================
// Admin: fact-checks
// ============================================

async fn admin_fact_checks(State(state): State<Shared>, headers: HeaderMap) -> Reply {
    state.staff_for(&headers)?;
    ok(json!(state.db.lock().fact_checks))
}

async fn create_fact_check(State(state): State<Shared>, headers: HeaderMap, Json(body): Json<Value>) -> Reply {
    state.staff_for(&headers)?;
    let mut db = state.db.lock();
    let id = db.next_id();
    db.fact_checks.push(json!({
        "id": id, "submission": null,
        "title": body["title"], "verdict": body["verdict"], "summary": body["summary"],
        "url_submitted": body["url_submitted"], "date_created": chrono::Utc::now().to_rfc3339()
    }));
    created(json!({"id": id}))
}

async fn update_fact_check(
    State(state): State<Shared>,
    headers: HeaderMap,
    Path(id): Path<i64>,
    Json(body): Json<Value>,
) -> Reply {
    state.staff_for(&headers)?;
    let mut db = state.db.lock();
    failing(&db, id)?;
    let fact_check = db
        .fact_checks
        .iter_mut()
        .find(|f| f["id"] == json!(id))
        .ok_or_else(not_found)?;
    for key in ["title", "verdict", "summary", "url_submitted"] {
        fact_check[key] = body[key].clone();
    }
    ok(fact_check.clone())
}

async fn delete_fact_check(State(state): State<Shared>, headers: HeaderMap, Path(id): Path<i64>) -> Reply {
    state.staff_for(&headers)?;
    let mut db = state.db.lock();
    failing(&db, id)?;
    db.fact_checks.retain(|f| f["id"] != json!(id));
    no_content()
}

// ============================================
// Admin: positive content
// ============================================

async fn admin_content(State(state): State<Shared>, headers: HeaderMap) -> Reply {
    state.staff_for(&headers)?;
    ok(json!(state.db.lock().content))
}

async fn read_content_form(mut form: Multipart) -> Result<(HashMap<String, String>, Option<String>, Vec<(String, Option<String>)>), Response> {
    let bad_request = |e: axum::extract::multipart::MultipartError| {
        error(StatusCode::BAD_REQUEST, json!({"error": e.to_string()}))
    };

    let mut fields = HashMap::new();
    let mut image = None;
    let mut seen = Vec::new();
    while let Some(field) = form.next_field().await.map_err(bad_request)? {
        let name = field.name().unwrap_or_default().to_string();
        let file_name = field.file_name().map(str::to_string);
        seen.push((name.clone(), file_name.clone()));
        if name == "image" {
            field.bytes().await.map_err(bad_request)?;
            image = file_name;
        } else {
            fields.insert(name, field.text().await.map_err(bad_request)?);
        }
    }
    Ok((fields, image, seen))
}

fn apply_content_fields(item: &mut Value, fields: &HashMap<String, String>, image: Option<String>) {
    for key in ["title", "content_type", "description", "source_url"] {
        if let Some(value) = fields.get(key) {
            item[key] = json!(value);
        }
    }
    if let Some(published) = fields.get("is_published") {
        item["is_published"] = json!(published == "true");
    }
    if let Some(file) = image {
        item["image_url_full"] = json!(format!("https://media.example.ht/positive/{}", file));
        item["has_image"] = json!(true);
    } else if let Some(url) = fields.get("image_url") {
        item["image_url_full"] = json!(url);
        item["has_image"] = json!(true);
    }
}

async fn create_content(State(state): State<Shared>, headers: HeaderMap, form: Multipart) -> Reply {
    state.staff_for(&headers)?;
    let (fields, image, seen) = read_content_form(form).await?;
    if fields.get("title").map_or(true, |t| t.trim().is_empty()) {
        return Err(error(StatusCode::BAD_REQUEST, json!({"title": ["This field is required."]})));
    }

    let mut db = state.db.lock();
    db.last_multipart = seen;
    let id = db.next_id();
    let mut item = content_json(id, "", "culture", false, None);
    apply_content_fields(&mut item, &fields, image);
    db.content.push(item);
    created(json!({"id": id}))
}

async fn update_content(
    State(state): State<Shared>,
    headers: HeaderMap,
    Path(id): Path<i64>,
    form: Multipart,
) -> Reply {
    state.staff_for(&headers)?;
    let (fields, image, seen) = read_content_form(form).await?;

    let mut db = state.db.lock();
    failing(&db, id)?;
    db.last_multipart = seen;
    let item = db
        .content
        .iter_mut()
        .find(|c| c["id"] == json!(id))
        .ok_or_else(not_found)?;
    apply_content_fields(item, &fields, image);
    ok(item.clone())
}

async fn publish_content(
    State(state): State<Shared>,
    headers: HeaderMap,
    Path(id): Path<i64>,
    Json(body): Json<Value>,
) -> Reply {
    state.staff_for(&headers)?;
    let mut db = state.db.lock();
    failing(&db, id)?;
    let item = db
        .content
        .iter_mut()
        .find(|c| c["id"] == json!(id))
        .ok_or_else(not_found)?;
    item["is_published"] = body["is_published"].clone();
    ok(item.clone())
}

async fn delete_content(State(state): State<Shared>, headers: HeaderMap, Path(id): Path<i64>) -> Reply {
    state.staff_for(&headers)?;
    let mut db = state.db.lock();
    failing(&db, id)?;
    db.content.retain(|c| c["id"] != json!(id));
    no_content()
}

// ============================================
// Admin: users
// ============================================

async fn admin_users(
    State(state): State<Shared>,
    headers: HeaderMap,
    Query(query): Query<HashMap<String, String>>,
) -> Reply {
    let me = state.staff_for(&headers)?;
    let db = state.db.lock();
    let search = query.get("search").map(|s| s.to_lowercase()).unwrap_or_default();
    let flag = |key: &str| query.get(key).map(|v| v == "true");
    let is_staff = flag("is_staff");
    let is_active = flag("is_active");

    let users: Vec<Value> = db
        .users
        .iter()
        .filter(|u| {
            search.is_empty()
                || u.username.to_lowercase().contains(&search)
                || u.email.to_lowercase().contains(&search)
        })
        .filter(|u| is_staff.map_or(true, |s| u.is_staff == s))
        .filter(|u| is_active.map_or(true, |a| u.is_active == a))
        .map(|u| admin_user_json(u, me.id))
        .collect();
    ok(json!(users))
}

async fn create_user(State(state): State<Shared>, headers: HeaderMap, Json(body): Json<Value>) -> Reply {
    state.staff_for(&headers)?;
    let mut db = state.db.lock();
    let username = text(&body, "username");
    if db.users.iter().any(|u| u.username == username) {
        return Err(error(
            StatusCode::BAD_REQUEST,
            json!({"error": "Username already exists"}),
        ));
    }
    let user = MockUser {
        id: db.next_id(),
        username,
        email: text(&body, "email"),
        first_name: text(&body, "first_name"),
        last_name: text(&body, "last_name"),
        password: text(&body, "password"),
        is_staff: body["is_staff"] == json!(true),
        is_active: body["is_active"] != json!(false),
    };
    let id = user.id;
    db.users.push(user);
    created(json!({"id": id}))
}

async fn update_user(
    State(state): State<Shared>,
    headers: HeaderMap,
    Path(id): Path<i64>,
    Json(body): Json<Value>,
) -> Reply {
    let me = state.staff_for(&headers)?;
    let mut db = state.db.lock();
    failing(&db, id)?;
    let user = db.users.iter_mut().find(|u| u.id == id).ok_or_else(not_found)?;
    if let Some(email) = body["email"].as_str() {
        user.email = email.to_string();
    }
    if let Some(first) = body["first_name"].as_str() {
        user.first_name = first.to_string();
    }
    if let Some(last) = body["last_name"].as_str() {
        user.last_name = last.to_string();
    }
    if let Some(staff) = body["is_staff"].as_bool() {
        user.is_staff = staff;
    }
    ok(admin_user_json(user, me.id))
}

async fn set_activation(
    State(state): State<Shared>,
    headers: HeaderMap,
    Path(id): Path<i64>,
    Json(body): Json<Value>,
) -> Reply {
    let me = state.staff_for(&headers)?;
    let mut db = state.db.lock();
    failing(&db, id)?;
    let user = db.users.iter_mut().find(|u| u.id == id).ok_or_else(not_found)?;
    user.is_active = body["is_active"].as_bool().unwrap_or(user.is_active);
    ok(admin_user_json(user, me.id))
}

async fn delete_user(State(state): State<Shared>, headers: HeaderMap, Path(id): Path<i64>) -> Reply {
    state.staff_for(&headers)?;
    let mut db = state.db.lock();
    failing(&db, id)?;
    db.users.retain(|u| u.id != id);
    no_content()
}

// ============================================
// AI
// ============================================

async fn process_ai(State(state): State<Shared>, headers: HeaderMap, Path(id): Path<i64>) -> Reply {
    state.staff_for(&headers)?;
    let mut db = state.db.lock();
    if let Some((status, body)) = db.ai_failure.clone() {
        return Err(error(status, body));
    }
    if !db.submissions.iter().any(|s| s["id"] == json!(id)) {
        return Err(not_found());
    }
    let analysis = json!({
        "suggested_verdict": "misleading",
        "confidence_score": 0.875,
        "evidence_sources": ["https://mspp.gouv.ht/bulletin"],
        "similar_claims": ["Fuel prices doubled in 2022"],
        "ai_model_used": "gpt-4o-mini",
        "processing_time": 1.42
    });
    db.analyses.insert(id, analysis.clone());
    ok(analysis)
}

async fn ai_analysis(State(state): State<Shared>, headers: HeaderMap, Path(id): Path<i64>) -> Reply {
    state.staff_for(&headers)?;
    let db = state.db.lock();
    db.analyses.get(&id).cloned().map_or_else(|| Err(not_found()), ok)
}

// ============================================
// Harness
// ============================================

/// A running mock backend
pub struct MockServer {
    pub base_url: String,
    pub state: Shared,
}

impl MockServer {
    pub async fn start() -> Self {
        let state = Arc::new(MockState {
            db: Mutex::new(Db::seeded()),
            requests: Mutex::new(Vec::new()),
        });
        let app = build_router(state.clone());

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        Self {
            base_url: format!("http://{}", addr),
            state,
        }
    }

    /// Client with its own empty token store
    pub fn client(&self) -> ApiClient {
        ApiClient::new(&self.base_url, Arc::new(MemoryTokenStore::new()))
    }

    /// Restored session with no stored tokens
    pub async fn anonymous(&self) -> Session {
        let session = Session::new(self.client());
        session.restore().await;
        session
    }

    pub async fn signed_in(&self, (username, password): (&str, &str)) -> Session {
        let session = self.anonymous().await;
        let outcome = session.login(username, password).await;
        assert!(outcome.is_success(), "login as {} failed: {:?}", username, outcome);
        session
    }

    pub fn db(&self) -> MutexGuard<'_, Db> {
        self.state.db.lock()
    }

    pub fn requests(&self) -> Vec<Recorded> {
        self.state.requests.lock().clone()
    }

    pub fn clear_requests(&self) {
        self.state.requests.lock().clear();
    }

    /// Number of recorded requests with this method and path
    pub fn count(&self, method: Method, path: &str) -> usize {
        self.state
            .requests
            .lock()
            .iter()
            .filter(|r| r.method == method && r.path == path)
            .count()
    }

    /// Invalidate every issued access token
    pub fn expire_sessions(&self) {
        self.db().sessions.clear();
    }

    pub fn fail_mutations_for(&self, id: i64) {
        self.db().failing.insert(id);
    }

    pub fn fail_ai(&self, status: StatusCode, body: Value) {
        self.db().ai_failure = Some((status, body));
    }
}

/// Admin context over `session` with a recording notifier
pub fn admin_context(session: &Session, confirm: bool) -> (AdminContext, Arc<RecordingNotifier>) {
    let notifier = Arc::new(RecordingNotifier::new());
    let ctx = AdminContext::new(
        session.api().clone(),
        notifier.clone(),
        Arc::new(FixedConfirm(confirm)),
    );
    (ctx, notifier)
}
