//! Public feeds, user dashboard and AI panel against the mock backend.

mod common;

use axum::http::{Method, StatusCode};
use common::{MockServer, ADMIN, MARIE};
use serde_json::json;
use std::sync::Arc;

use ayiti_verite::dashboard::RECENT_ACTIVITY_LIMIT;
use ayiti_verite::models::{ContentCategory, Verdict};
use ayiti_verite::public::{load_fact_check, Detail};
use ayiti_verite::{
    ActivityEntry, AiPanel, DashboardTab, FactCheckFeed, PositiveContentFeed, RecordingNotifier,
    Toast, UserDashboard,
};

// ============================================
// Public pages
// ============================================

#[tokio::test]
async fn test_fact_check_feed_reads_paginated_envelope() {
    let server = MockServer::start().await;
    let feed = FactCheckFeed::new(server.client());
    assert!(feed.is_loading());

    assert!(feed.load().await);

    assert!(!feed.is_loading());
    assert!(feed.error().is_none());
    let items = feed.items();
    assert_eq!(items.len(), 2);
    assert_eq!(items[0].verdict, Verdict::MostlyFalse);
}

#[tokio::test]
async fn test_fact_check_detail() {
    let server = MockServer::start().await;
    let api = server.client();

    match load_fact_check(&api, 202).await {
        Detail::Found(fc) => assert_eq!(fc.title, "Minimum wage doubled overnight"),
        other => panic!("unexpected {:?}", other),
    }
    assert_eq!(load_fact_check(&api, 999).await, Detail::NotFound);
}

#[tokio::test]
async fn test_offline_fact_check_feed_shows_inline_error() {
    let feed = FactCheckFeed::new(ayiti_verite::ApiClient::new(
        "http://127.0.0.1:9",
        Arc::new(ayiti_verite::MemoryTokenStore::new()),
    ));

    assert!(!feed.load().await);
    assert_eq!(
        feed.error().as_deref(),
        Some("Could not load fact-checks. Please try again later.")
    );
}

#[tokio::test]
async fn test_positive_feed_category_filter() {
    let server = MockServer::start().await;
    let feed = PositiveContentFeed::new(server.client());

    assert!(feed.load().await);
    // Only published stories are public
    assert_eq!(feed.visible().len(), 2);

    feed.set_category(Some(ContentCategory::Nature));
    let nature = feed.visible();
    assert_eq!(nature.len(), 1);
    assert_eq!(nature[0].title, "Reforestation at Pic Macaya");

    feed.set_category(Some(ContentCategory::Innovation));
    assert!(feed.visible().is_empty());
}

// ============================================
// Dashboard
// ============================================

#[tokio::test]
async fn test_dashboard_for_regular_user() {
    let server = MockServer::start().await;
    let session = server.signed_in(MARIE).await;
    let notifier = Arc::new(RecordingNotifier::new());
    let dashboard = UserDashboard::new(session.api().clone(), notifier.clone());

    assert!(dashboard.load().await);
    assert!(!dashboard.is_loading());

    let data = dashboard.data().unwrap();
    assert_eq!(data.user.username, "marie");
    assert_eq!(data.stats.total_submissions, 2);
    assert_eq!(data.stats.submissions_in_review, 1);

    let activity = dashboard.recent_activity(false);
    assert_eq!(activity.len(), 2);
    assert!(matches!(&activity[0], ActivityEntry::Submitted(s) if s.id == 101));
    assert!(activity.len() <= RECENT_ACTIVITY_LIMIT);
    assert!(notifier.toasts().is_empty());
}

#[tokio::test]
async fn test_dashboard_submissions_tab() {
    let server = MockServer::start().await;
    let session = server.signed_in(MARIE).await;
    let dashboard = UserDashboard::new(session.api().clone(), Arc::new(RecordingNotifier::new()));

    dashboard.set_tab(DashboardTab::Submissions);
    assert!(dashboard.load_submissions().await);

    assert_eq!(dashboard.tab(), DashboardTab::Submissions);
    assert!(!dashboard.submissions_loading());
    let ids: Vec<i64> = dashboard.submissions().iter().map(|s| s.id).collect();
    assert_eq!(ids, vec![101, 102]);
}

#[tokio::test]
async fn test_dashboard_links_published_fact_check() {
    let server = MockServer::start().await;
    let session = server.signed_in(("jean", "jean-pass")).await;
    let dashboard = UserDashboard::new(session.api().clone(), Arc::new(RecordingNotifier::new()));
    dashboard.load().await;

    let activity = dashboard.recent_activity(true);
    assert!(matches!(&activity[0], ActivityEntry::Published(f) if f.id == 201));
    assert_eq!(dashboard.data().unwrap().stats.submissions_published, 1);
}

#[tokio::test]
async fn test_dashboard_failure_toasts() {
    let server = MockServer::start().await;
    let session = server.signed_in(MARIE).await;
    let notifier = Arc::new(RecordingNotifier::new());
    let dashboard = UserDashboard::new(session.api().clone(), notifier.clone());
    server.expire_sessions();

    assert!(!dashboard.load().await);

    assert_eq!(notifier.take(), vec![Toast::error("Failed to load dashboard data")]);
    assert!(dashboard.data().is_none());
    assert!(!session.is_authenticated());
}

// ============================================
// AI panel
// ============================================

#[tokio::test]
async fn test_ai_analysis_roundtrip() {
    let server = MockServer::start().await;
    let session = server.signed_in(ADMIN).await;
    let notifier = Arc::new(RecordingNotifier::new());
    let panel = AiPanel::new(session.api().clone(), notifier.clone(), 101);

    assert!(panel.load_existing().await.is_none());

    let analysis = panel.analyze().await.unwrap();
    assert_eq!(analysis.verdict_label(), "Misleading");
    assert_eq!(analysis.confidence_percent(), "87.5%");
    assert!(!panel.is_loading());
    assert!(notifier.toasts().is_empty());

    let again = AiPanel::new(session.api().clone(), notifier.clone(), 101);
    assert_eq!(again.load_existing().await, Some(analysis));
    assert_eq!(server.count(Method::GET, "/api/ai/analysis/101/"), 2);
}

#[tokio::test]
async fn test_ai_quota_error_single_toast() {
    let server = MockServer::start().await;
    let session = server.signed_in(ADMIN).await;
    server.fail_ai(
        StatusCode::INTERNAL_SERVER_ERROR,
        json!({"error": "Error code: 429 - {'error': {'code': 'insufficient_quota'}}"}),
    );
    let notifier = Arc::new(RecordingNotifier::new());
    let panel = AiPanel::new(session.api().clone(), notifier.clone(), 101);

    let message = "AI service quota exceeded. Please contact the administrator.";
    assert_eq!(panel.analyze().await, Err(message.to_string()));

    assert_eq!(panel.error().as_deref(), Some(message));
    assert!(panel.result().is_none());
    assert_eq!(notifier.take(), vec![Toast::error(message)]);
}

#[tokio::test]
async fn test_ai_error_codes() {
    let server = MockServer::start().await;
    let session = server.signed_in(ADMIN).await;
    let notifier = Arc::new(RecordingNotifier::new());
    let panel = AiPanel::new(session.api().clone(), notifier.clone(), 101);

    server.fail_ai(
        StatusCode::SERVICE_UNAVAILABLE,
        json!({"error": "Upstream unavailable", "code": "model_not_found"}),
    );
    assert_eq!(
        panel.analyze().await.unwrap_err(),
        "AI model not available. Please contact the administrator."
    );

    server.fail_ai(StatusCode::GATEWAY_TIMEOUT, json!({"detail": "Gateway Timeout"}));
    assert_eq!(
        panel.analyze().await.unwrap_err(),
        "AI analysis timed out. Please try again."
    );

    server.fail_ai(StatusCode::SERVICE_UNAVAILABLE, json!({}));
    assert_eq!(
        panel.analyze().await.unwrap_err(),
        "AI service is temporarily unavailable. Please try again later."
    );
    assert_eq!(notifier.toasts().len(), 3);
}

#[tokio::test]
async fn test_ai_requires_staff() {
    let server = MockServer::start().await;
    let session = server.signed_in(MARIE).await;
    let panel = AiPanel::new(session.api().clone(), Arc::new(RecordingNotifier::new()), 101);

    assert_eq!(
        panel.analyze().await.unwrap_err(),
        "Failed to process with AI. Please try again."
    );
    assert!(session.is_authenticated());
}
