//! Admin managers end to end: submissions, fact-checks, positive content and users.

mod common;

use axum::http::Method;
use common::{admin_context, MockServer, ADMIN, MARIE};

use ayiti_verite::admin::{ContentFilter, FactCheckFilter, SubmissionFilter, UserFilter};
use ayiti_verite::models::{
    ContentCategory, FactCheckDraft, ImageUpload, PositiveContentDraft, PublishFilter,
    SubmissionStatus, SubmissionType, UserDraft, Verdict,
};
use ayiti_verite::{
    FactChecksManager, PositiveContentManager, SubmissionsManager, Toast, UsersManager,
    VerdictDraft,
};

// ============================================
// Submissions
// ============================================

#[tokio::test]
async fn test_refresh_and_filter_submissions() {
    let server = MockServer::start().await;
    let session = server.signed_in(ADMIN).await;
    let (ctx, _) = admin_context(&session, true);
    let manager = SubmissionsManager::new(ctx);
    assert!(manager.is_loading());

    assert!(manager.refresh().await);
    assert!(!manager.is_loading());

    let counts = manager.status_counts();
    assert_eq!((counts.total, counts.new, counts.in_review, counts.completed), (3, 1, 1, 1));

    let urls = manager.filtered(&SubmissionFilter {
        kind: Some(SubmissionType::Url),
        ..Default::default()
    });
    assert_eq!(urls.iter().map(|s| s.id).collect::<Vec<_>>(), vec![102]);

    let search = manager.filtered(&SubmissionFilter {
        search: "JACMEL".into(),
        ..Default::default()
    });
    assert_eq!(search.len(), 1);
    assert_eq!(search[0].id, 103);
}

#[tokio::test]
async fn test_filter_by_status_and_search_together() {
    let server = MockServer::start().await;
    let session = server.signed_in(ADMIN).await;
    let (ctx, _) = admin_context(&session, true);
    let manager = SubmissionsManager::new(ctx);
    assert!(manager.refresh().await);

    let ids = |filter: SubmissionFilter| {
        manager.filtered(&filter).iter().map(|s| s.id).collect::<Vec<_>>()
    };

    assert_eq!(
        ids(SubmissionFilter {
            status: Some(SubmissionStatus::New),
            search: "fuel".into(),
            ..Default::default()
        }),
        vec![101]
    );

    // 103 mentions Jacmel but is already completed
    assert_eq!(
        ids(SubmissionFilter { search: "jacmel".into(), ..Default::default() }),
        vec![103]
    );
    assert!(ids(SubmissionFilter {
        status: Some(SubmissionStatus::New),
        search: "jacmel".into(),
        ..Default::default()
    })
    .is_empty());
}

#[tokio::test]
async fn test_non_staff_cannot_load_admin_lists() {
    let server = MockServer::start().await;
    let session = server.signed_in(MARIE).await;
    let (ctx, notifier) = admin_context(&session, true);
    let manager = SubmissionsManager::new(ctx);

    assert!(!manager.refresh().await);
    assert_eq!(notifier.last(), Some(Toast::error("Failed to load submissions")));
    // A 403 is not a rejected token
    assert!(session.is_authenticated());
}

#[tokio::test]
async fn test_status_update_refetches() {
    let server = MockServer::start().await;
    let session = server.signed_in(ADMIN).await;
    let (ctx, notifier) = admin_context(&session, true);
    let manager = SubmissionsManager::new(ctx);
    manager.refresh().await;

    assert!(manager.update_status(101, SubmissionStatus::InReview).await);

    assert_eq!(notifier.take(), vec![Toast::success("Submission status updated")]);
    assert_eq!(server.count(Method::GET, "/api/admin/submissions/"), 2);
    assert_eq!(manager.get(101).unwrap().status, SubmissionStatus::InReview);
}

#[tokio::test]
async fn test_declined_delete_sends_nothing() {
    let server = MockServer::start().await;
    let session = server.signed_in(ADMIN).await;
    let (ctx, notifier) = admin_context(&session, false);
    let manager = SubmissionsManager::new(ctx);
    manager.refresh().await;
    server.clear_requests();

    assert!(!manager.delete(101).await);

    assert!(server.requests().is_empty());
    assert!(notifier.toasts().is_empty());
    assert_eq!(manager.submissions().len(), 3);
}

#[tokio::test]
async fn test_bulk_status_single_toast() {
    let server = MockServer::start().await;
    let session = server.signed_in(ADMIN).await;
    let (ctx, notifier) = admin_context(&session, true);
    let manager = SubmissionsManager::new(ctx);
    manager.refresh().await;

    manager.toggle_select_visible(&SubmissionFilter::default());
    assert_eq!(manager.selected(), vec![101, 102, 103]);

    let outcome = manager.bulk_update_status(SubmissionStatus::Completed).await.unwrap();

    assert!(outcome.succeeded());
    assert_eq!(outcome.attempted, 3);
    assert_eq!(notifier.take(), vec![Toast::success("Updated 3 submissions")]);
    assert!(manager.selected().is_empty());
    assert_eq!(manager.status_counts().completed, 3);
}

#[tokio::test]
async fn test_bulk_status_partial_failure() {
    let server = MockServer::start().await;
    let session = server.signed_in(ADMIN).await;
    let (ctx, notifier) = admin_context(&session, true);
    let manager = SubmissionsManager::new(ctx);
    manager.refresh().await;
    server.fail_mutations_for(102);

    manager.toggle_selected(101);
    manager.toggle_selected(102);
    let outcome = manager.bulk_update_status(SubmissionStatus::Completed).await.unwrap();

    assert_eq!(outcome.failed, vec![102]);
    assert_eq!(notifier.take(), vec![Toast::error("Failed to update submissions")]);
    assert_eq!(manager.selected(), vec![101, 102]);
    // The request for 101 landed and is not rolled back
    assert_eq!(server.db().submissions[0]["status"], "completed");
}

#[tokio::test]
async fn test_bulk_delete_confirms_with_count() {
    let server = MockServer::start().await;
    let session = server.signed_in(ADMIN).await;
    let (ctx, notifier) = admin_context(&session, true);
    let manager = SubmissionsManager::new(ctx);
    manager.refresh().await;

    assert!(manager.bulk_delete().await.is_none());

    manager.toggle_selected(101);
    manager.toggle_selected(103);
    let outcome = manager.bulk_delete().await.unwrap();

    assert!(outcome.succeeded());
    assert_eq!(notifier.last(), Some(Toast::success("Deleted 2 submissions")));
    assert_eq!(manager.submissions().len(), 1);
}

#[tokio::test]
async fn test_declined_bulk_delete_keeps_selection() {
    let server = MockServer::start().await;
    let session = server.signed_in(ADMIN).await;
    let (ctx, _) = admin_context(&session, false);
    let manager = SubmissionsManager::new(ctx);
    manager.refresh().await;
    manager.toggle_selected(101);
    server.clear_requests();

    assert!(manager.bulk_delete().await.is_none());
    assert!(server.requests().is_empty());
    assert_eq!(manager.selected(), vec![101]);
}

#[tokio::test]
async fn test_verdict_from_submission() {
    let server = MockServer::start().await;
    let session = server.signed_in(ADMIN).await;
    let (ctx, notifier) = admin_context(&session, true);
    let manager = SubmissionsManager::new(ctx);
    manager.refresh().await;

    let mut draft = VerdictDraft::from_submission(&manager.get(101).unwrap());
    assert_eq!(draft.title, "Fact-Check: Fuel prices will triple next week...");

    // Empty summary never reaches the server
    server.clear_requests();
    assert!(!manager.create_verdict(&draft).await);
    assert!(server.requests().is_empty());
    assert_eq!(notifier.take(), vec![Toast::error("Summary is required.")]);

    draft.verdict = Verdict::False;
    draft.summary = "Prices are set by the government and no change was announced.".into();
    assert!(manager.create_verdict(&draft).await);

    assert_eq!(
        notifier.take(),
        vec![Toast::success("Verdict created and submission marked as completed!")]
    );
    assert_eq!(manager.get(101).unwrap().status, SubmissionStatus::Completed);
    let db = server.db();
    let created = db.fact_checks.last().unwrap();
    assert_eq!(created["verdict"], "False");
    assert_eq!(created["submission"], 101);
}

// ============================================
// Fact-checks
// ============================================

#[tokio::test]
async fn test_fact_check_crud() {
    let server = MockServer::start().await;
    let session = server.signed_in(ADMIN).await;
    let (ctx, notifier) = admin_context(&session, true);
    let manager = FactChecksManager::new(ctx);
    manager.refresh().await;
    assert_eq!(manager.fact_checks().len(), 2);

    let draft = FactCheckDraft {
        title: "Gourde replaced by a new currency".into(),
        url_submitted: String::new(),
        verdict: Verdict::Unverifiable,
        summary: "The central bank has not commented.".into(),
    };
    assert!(manager.create(&draft).await);
    assert_eq!(notifier.take(), vec![Toast::success("Fact-check created successfully")]);
    assert_eq!(manager.fact_checks().len(), 3);

    let mut edit = manager.get(202).unwrap().to_draft();
    edit.verdict = Verdict::MostlyFalse;
    assert!(manager.update(202, &edit).await);
    assert_eq!(server.count(Method::PUT, "/api/admin/factchecks/202/"), 1);
    assert_eq!(manager.get(202).unwrap().verdict, Verdict::MostlyFalse);

    let falsy = manager.filtered(&FactCheckFilter {
        verdict: Some(Verdict::MostlyFalse),
        ..Default::default()
    });
    assert_eq!(falsy.len(), 2);

    assert!(manager.delete(201).await);
    assert!(manager.get(201).is_none());
}

#[tokio::test]
async fn test_fact_check_update_failure_toast() {
    let server = MockServer::start().await;
    let session = server.signed_in(ADMIN).await;
    let (ctx, notifier) = admin_context(&session, true);
    let manager = FactChecksManager::new(ctx);
    manager.refresh().await;
    server.fail_mutations_for(201);

    let draft = manager.get(201).unwrap().to_draft();
    assert!(!manager.update(201, &draft).await);

    assert_eq!(notifier.take(), vec![Toast::error("Failed to update fact-check")]);
    assert_eq!(server.count(Method::GET, "/api/admin/factchecks/"), 1);
}

// ============================================
// Positive content
// ============================================

#[tokio::test]
async fn test_create_content_with_image_upload() {
    let server = MockServer::start().await;
    let session = server.signed_in(ADMIN).await;
    let (ctx, notifier) = admin_context(&session, true);
    let manager = PositiveContentManager::new(ctx);
    manager.refresh().await;

    let draft = PositiveContentDraft {
        title: "Robotics club in Hinche".into(),
        content_type: ContentCategory::Innovation,
        description: "Students build solar irrigation robots.".into(),
        image: Some(ImageUpload {
            file_name: "robots.png".into(),
            mime: "image/png".into(),
            bytes: vec![0x89, b'P', b'N', b'G'],
        }),
        image_url: "https://ignored.example.ht/robots.png".into(),
        source_url: String::new(),
        is_published: true,
    };
    assert!(manager.create(&draft).await);

    assert_eq!(notifier.take(), vec![Toast::success("Content created successfully")]);
    let parts = server.db().last_multipart.clone();
    assert!(parts.contains(&("image".to_string(), Some("robots.png".to_string()))));
    assert!(!parts.iter().any(|(name, _)| name == "image_url"));

    let created = manager
        .items()
        .into_iter()
        .find(|c| c.title == "Robotics club in Hinche")
        .unwrap();
    assert!(created.has_image);
    assert!(created.is_published);
    assert_eq!(manager.counts().with_image, 2);
}

#[tokio::test]
async fn test_invalid_content_never_sent() {
    let server = MockServer::start().await;
    let session = server.signed_in(ADMIN).await;
    let (ctx, notifier) = admin_context(&session, true);
    let manager = PositiveContentManager::new(ctx);
    server.clear_requests();

    assert!(!manager.create(&PositiveContentDraft::default()).await);

    assert!(server.requests().is_empty());
    assert_eq!(notifier.toasts().len(), 1);
}

#[tokio::test]
async fn test_toggle_publish_flips_flag() {
    let server = MockServer::start().await;
    let session = server.signed_in(ADMIN).await;
    let (ctx, notifier) = admin_context(&session, true);
    let manager = PositiveContentManager::new(ctx);
    manager.refresh().await;

    assert!(manager.toggle_publish(302).await);
    assert_eq!(notifier.take(), vec![Toast::success("Content published")]);
    assert!(manager.get(302).unwrap().is_published);

    assert!(manager.toggle_publish(301).await);
    assert_eq!(notifier.take(), vec![Toast::success("Content unpublished")]);

    let drafts = manager.filtered(&ContentFilter {
        publish: PublishFilter::Unpublished,
        ..Default::default()
    });
    assert_eq!(drafts.iter().map(|c| c.id).collect::<Vec<_>>(), vec![301]);
}

#[tokio::test]
async fn test_update_content_keeps_linked_image() {
    let server = MockServer::start().await;
    let session = server.signed_in(ADMIN).await;
    let (ctx, _) = admin_context(&session, true);
    let manager = PositiveContentManager::new(ctx);
    manager.refresh().await;

    let mut draft = manager.get(301).unwrap().to_draft();
    draft.description = "Bands parade through Léogâne every spring.".into();
    assert!(manager.update(301, &draft).await);

    assert_eq!(server.count(Method::PUT, "/api/admin/positive-content/301/"), 1);
    assert_eq!(
        manager.get(301).unwrap().description,
        "Bands parade through Léogâne every spring."
    );
}

// ============================================
// Users
// ============================================

#[tokio::test]
async fn test_user_filter_is_sent_to_server() {
    let server = MockServer::start().await;
    let session = server.signed_in(ADMIN).await;
    let (ctx, _) = admin_context(&session, true);
    let manager = UsersManager::new(ctx);

    manager.set_filter(UserFilter {
        search: String::new(),
        is_staff: None,
        is_active: Some(false),
    });
    assert!(manager.refresh().await);

    let last = server.requests().pop().unwrap();
    assert_eq!(last.path, "/api/admin/users/");
    assert_eq!(last.query.as_deref(), Some("is_active=false"));
    assert_eq!(
        manager.users().iter().map(|u| u.username.as_str()).collect::<Vec<_>>(),
        vec!["jean"]
    );
}

#[tokio::test]
async fn test_admin_cannot_change_own_account() {
    let server = MockServer::start().await;
    let session = server.signed_in(ADMIN).await;
    let (ctx, notifier) = admin_context(&session, true);
    let manager = UsersManager::new(ctx);
    manager.refresh().await;
    server.clear_requests();

    assert!(!manager.toggle_staff(1).await);
    assert!(!manager.toggle_active(1).await);
    assert!(!manager.delete(1).await);

    assert!(server.requests().is_empty());
    assert_eq!(
        notifier.take(),
        vec![Toast::error("You cannot modify your own account"); 3]
    );
}

#[tokio::test]
async fn test_toggle_active_and_staff() {
    let server = MockServer::start().await;
    let session = server.signed_in(ADMIN).await;
    let (ctx, notifier) = admin_context(&session, true);
    let manager = UsersManager::new(ctx);
    manager.refresh().await;

    assert!(manager.toggle_active(3).await);
    assert_eq!(notifier.take(), vec![Toast::success("User activated")]);
    assert_eq!(server.count(Method::PATCH, "/api/admin/users/3/activation/"), 1);
    assert!(manager.get(3).unwrap().is_active);

    assert!(manager.toggle_staff(2).await);
    assert_eq!(notifier.take(), vec![Toast::success("User promoted to staff")]);
    assert_eq!(manager.counts().staff, 2);
}

#[tokio::test]
async fn test_create_user_duplicate_shows_server_message() {
    let server = MockServer::start().await;
    let session = server.signed_in(ADMIN).await;
    let (ctx, notifier) = admin_context(&session, true);
    let manager = UsersManager::new(ctx);
    manager.refresh().await;

    let draft = UserDraft {
        username: "marie".into(),
        email: "other@example.ht".into(),
        password: "pw-123456".into(),
        ..Default::default()
    };
    assert!(!manager.create(&draft).await);
    assert_eq!(notifier.take(), vec![Toast::error("Username already exists")]);

    let draft = UserDraft {
        username: "claudette".into(),
        ..draft
    };
    assert!(manager.create(&draft).await);
    assert_eq!(manager.counts().total, 4);
}

#[tokio::test]
async fn test_delete_user_confirms_by_name() {
    let server = MockServer::start().await;
    let session = server.signed_in(ADMIN).await;
    let (ctx, notifier) = admin_context(&session, true);
    let manager = UsersManager::new(ctx);
    manager.refresh().await;

    assert!(manager.delete(3).await);
    assert_eq!(notifier.last(), Some(Toast::success("User deleted successfully")));
    assert!(manager.get(3).is_none());
}
