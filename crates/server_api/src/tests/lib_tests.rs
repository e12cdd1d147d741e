use super::*;

async fn setup() -> ApiContext {
    let storage = Storage::new("sqlite::memory:").await.expect("db");
    ApiContext {
        storage,
        tokens: TokenConfig {
            secret: "test-secret".into(),
            ttl_hours: 1,
        },
    }
}

fn contact(name: &str, service: &str) -> ContactPayload {
    ContactPayload {
        name: name.to_string(),
        email: format!("{}@example.com", name.to_ascii_lowercase()),
        service: service.to_string(),
        message: "Looking for help with a legal-tech product".to_string(),
    }
}

async fn seed_admin(ctx: &ApiContext) {
    ensure_default_admin(
        ctx,
        &DefaultAdmin {
            username: "admin".into(),
            email: "admin@example.com".into(),
            password: "admin123".into(),
        },
    )
    .await
    .expect("seed admin");
}

#[tokio::test]
async fn submit_contact_stores_trimmed_submission() {
    let ctx = setup().await;
    let mut payload = contact("Ravi", "Other");
    payload.email = " RAVI@Example.com ".into();

    let response = submit_contact(&ctx, &payload, Some("10.0.0.1".into()))
        .await
        .expect("submit");
    assert!(response.success);
    let id = response.id.expect("id");

    let stored = ctx
        .storage
        .load_submission(id)
        .await
        .expect("load")
        .expect("present");
    assert_eq!(stored.email, "ravi@example.com");
    assert_eq!(stored.ip_address.as_deref(), Some("10.0.0.1"));
}

#[tokio::test]
async fn submit_contact_stores_long_name_and_forwarded_address() {
    let ctx = setup().await;
    let mut payload = contact("Ravi", "Other");
    payload.name = "A".repeat(101);
    let forwarded = "x".repeat(60);

    let response = submit_contact(&ctx, &payload, Some(forwarded.clone()))
        .await
        .expect("submit");
    let stored = ctx
        .storage
        .load_submission(response.id.expect("id"))
        .await
        .expect("load")
        .expect("present");
    assert_eq!(stored.name.len(), 101);
    assert_eq!(stored.ip_address, Some(forwarded));
}

#[tokio::test]
async fn submit_contact_rejects_invalid_payload_without_storing() {
    let ctx = setup().await;
    let mut payload = contact("Ravi", "Other");
    payload.message = "short".into();

    let err = submit_contact(&ctx, &payload, None)
        .await
        .expect_err("should fail");
    assert!(matches!(err.code, ErrorCode::Validation));
    assert_eq!(
        ctx.storage
            .count_submissions(ReadFilter::All)
            .await
            .expect("count"),
        0
    );
}

#[tokio::test]
async fn default_admin_is_created_once() {
    let ctx = setup().await;
    let admin = DefaultAdmin {
        username: "admin".into(),
        email: "admin@example.com".into(),
        password: "admin123".into(),
    };
    assert!(ensure_default_admin(&ctx, &admin).await.expect("first"));
    assert!(!ensure_default_admin(&ctx, &admin).await.expect("second"));
    assert_eq!(ctx.storage.admin_count().await.expect("count"), 1);
}

#[tokio::test]
async fn login_issues_token_that_authenticates() {
    let ctx = setup().await;
    seed_admin(&ctx).await;

    let response = admin_login(
        &ctx,
        &AdminLoginRequest {
            username: " admin ".into(),
            password: "admin123".into(),
        },
    )
    .await
    .expect("login");
    assert!(response.success);
    assert!(response.admin.last_login.is_some());

    let admin = authenticate_admin(&ctx, &response.token)
        .await
        .expect("authenticate");
    assert_eq!(admin.username, "admin");
}

#[tokio::test]
async fn login_rejects_blank_and_wrong_credentials() {
    let ctx = setup().await;
    seed_admin(&ctx).await;

    let err = admin_login(&ctx, &AdminLoginRequest::default())
        .await
        .expect_err("blank");
    assert!(matches!(err.code, ErrorCode::Validation));
    assert_eq!(err.message, "Username and password are required");

    let err = admin_login(
        &ctx,
        &AdminLoginRequest {
            username: "admin".into(),
            password: "wrong".into(),
        },
    )
    .await
    .expect_err("wrong password");
    assert!(matches!(err.code, ErrorCode::Unauthorized));
    assert_eq!(err.message, "Invalid username or password");
}

#[tokio::test]
async fn inactive_admin_cannot_authenticate() {
    let ctx = setup().await;
    seed_admin(&ctx).await;
    let response = admin_login(
        &ctx,
        &AdminLoginRequest {
            username: "admin".into(),
            password: "admin123".into(),
        },
    )
    .await
    .expect("login");

    ctx.storage
        .set_admin_active(response.admin.id, false)
        .await
        .expect("deactivate");
    let err = authenticate_admin(&ctx, &response.token)
        .await
        .expect_err("inactive");
    assert_eq!(err.message, "Invalid or inactive admin user");

    let err = authenticate_admin(&ctx, "garbage")
        .await
        .expect_err("garbage");
    assert_eq!(err.message, "Authentication required");
}

#[tokio::test]
async fn list_submissions_paginates_and_filters() {
    let ctx = setup().await;
    for i in 0..5 {
        submit_contact(&ctx, &contact(&format!("user{i}"), "Other"), None)
            .await
            .expect("submit");
    }

    let page = list_submissions(&ctx, Some(2), Some(2), None)
        .await
        .expect("page");
    assert_eq!(page.submissions.len(), 2);
    assert_eq!(page.pagination.total, 5);
    assert_eq!(page.pagination.pages, 3);
    assert!(page.pagination.has_next);
    assert!(page.pagination.has_prev);

    let beyond = list_submissions(&ctx, Some(9), Some(2), None)
        .await
        .expect("beyond");
    assert!(beyond.submissions.is_empty());

    let read = list_submissions(&ctx, None, None, Some(true))
        .await
        .expect("read");
    assert_eq!(read.pagination.total, 0);
    assert_eq!(read.pagination.per_page, DEFAULT_PAGE_SIZE);
}

#[tokio::test]
async fn get_submission_marks_read() {
    let ctx = setup().await;
    let id = submit_contact(&ctx, &contact("Mira", "Other"), None)
        .await
        .expect("submit")
        .id
        .expect("id");

    let record = get_submission(&ctx, id).await.expect("get");
    assert!(record.is_read);

    let unread = mark_submission_read(&ctx, id, false).await.expect("mark");
    assert!(!unread.is_read);

    let err = get_submission(&ctx, SubmissionId(999))
        .await
        .expect_err("missing");
    assert!(matches!(err.code, ErrorCode::NotFound));
}

#[tokio::test]
async fn delete_submission_reports_missing() {
    let ctx = setup().await;
    let id = submit_contact(&ctx, &contact("Omar", "Other"), None)
        .await
        .expect("submit")
        .id
        .expect("id");

    delete_submission(&ctx, id).await.expect("delete");
    let err = delete_submission(&ctx, id).await.expect_err("gone");
    assert_eq!(err.message, "Submission not found");
}

#[tokio::test]
async fn stats_count_unread_recent_and_services() {
    let ctx = setup().await;
    let first = submit_contact(&ctx, &contact("A", "Legal-Tech Solutions"), None)
        .await
        .expect("submit")
        .id
        .expect("id");
    submit_contact(&ctx, &contact("B", "Legal-Tech Solutions"), None)
        .await
        .expect("submit");
    submit_contact(&ctx, &contact("C", "Other"), None)
        .await
        .expect("submit");
    get_submission(&ctx, first).await.expect("read one");

    let stats = admin_stats(&ctx, Utc::now()).await.expect("stats");
    assert_eq!(stats.total_submissions, 3);
    assert_eq!(stats.unread_submissions, 2);
    assert_eq!(stats.recent_submissions, 3);
    assert_eq!(stats.service_breakdown[0].service, "Legal-Tech Solutions");
    assert_eq!(stats.service_breakdown[0].count, 2);

    let later = admin_stats(&ctx, Utc::now() + Duration::days(30))
        .await
        .expect("stats later");
    assert_eq!(later.recent_submissions, 0);
}
