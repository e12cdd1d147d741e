use super::*;
use chrono::Duration;

fn submission(name: &str, service: &str, submitted_at: DateTime<Utc>) -> NewSubmission {
    NewSubmission {
        name: name.to_string(),
        email: format!("{}@example.com", name.to_ascii_lowercase()),
        service: service.to_string(),
        message: "I would like a new website".to_string(),
        ip_address: Some("127.0.0.1".to_string()),
        submitted_at,
    }
}

#[tokio::test]
async fn health_check_succeeds_for_live_pool() {
    let storage = Storage::new("sqlite::memory:").await.expect("db");
    storage.health_check().await.expect("health check");
}

#[tokio::test]
async fn inserts_and_loads_submission() {
    let storage = Storage::new("sqlite::memory:").await.expect("db");
    let now = Utc::now();
    let id = storage
        .insert_submission(&submission("Alice", "Other", now))
        .await
        .expect("insert");
    assert!(id.0 > 0);

    let loaded = storage
        .load_submission(id)
        .await
        .expect("load")
        .expect("present");
    assert_eq!(loaded.name, "Alice");
    assert_eq!(loaded.email, "alice@example.com");
    assert!(!loaded.is_read);
    assert_eq!(loaded.ip_address.as_deref(), Some("127.0.0.1"));
    assert_eq!(loaded.submitted_at.timestamp(), now.timestamp());
}

#[tokio::test]
async fn lists_newest_first_with_offset() {
    let storage = Storage::new("sqlite::memory:").await.expect("db");
    let base = Utc::now() - Duration::hours(3);
    for (i, name) in ["first", "second", "third"].iter().enumerate() {
        storage
            .insert_submission(&submission(name, "Other", base + Duration::hours(i as i64)))
            .await
            .expect("insert");
    }

    let page = storage
        .list_submissions(ReadFilter::All, 2, 0)
        .await
        .expect("page");
    let names: Vec<_> = page.iter().map(|s| s.name.as_str()).collect();
    assert_eq!(names, vec!["third", "second"]);

    let rest = storage
        .list_submissions(ReadFilter::All, 2, 2)
        .await
        .expect("rest");
    assert_eq!(rest.len(), 1);
    assert_eq!(rest[0].name, "first");
}

#[tokio::test]
async fn read_filter_applies_to_list_and_count() {
    let storage = Storage::new("sqlite::memory:").await.expect("db");
    let now = Utc::now();
    let read = storage
        .insert_submission(&submission("read", "Other", now))
        .await
        .expect("insert");
    storage
        .insert_submission(&submission("unread", "Other", now))
        .await
        .expect("insert");
    assert!(storage.set_submission_read(read, true).await.expect("mark"));

    assert_eq!(storage.count_submissions(ReadFilter::All).await.expect("all"), 2);
    assert_eq!(storage.count_submissions(ReadFilter::Read).await.expect("read"), 1);
    let unread = storage
        .list_submissions(ReadFilter::Unread, 20, 0)
        .await
        .expect("unread");
    assert_eq!(unread.len(), 1);
    assert_eq!(unread[0].name, "unread");
}

#[tokio::test]
async fn mark_and_delete_report_missing_rows() {
    let storage = Storage::new("sqlite::memory:").await.expect("db");
    let missing = SubmissionId(404);
    assert!(!storage.set_submission_read(missing, true).await.expect("mark"));
    assert!(!storage.delete_submission(missing).await.expect("delete"));

    let id = storage
        .insert_submission(&submission("gone", "Other", Utc::now()))
        .await
        .expect("insert");
    assert!(storage.delete_submission(id).await.expect("delete"));
    assert!(storage.load_submission(id).await.expect("load").is_none());
}

#[tokio::test]
async fn counts_recent_submissions_and_services() {
    let storage = Storage::new("sqlite::memory:").await.expect("db");
    let now = Utc::now();
    storage
        .insert_submission(&submission("old", "Other", now - Duration::days(30)))
        .await
        .expect("insert");
    storage
        .insert_submission(&submission("a", "Legal-Tech Solutions", now))
        .await
        .expect("insert");
    storage
        .insert_submission(&submission("b", "Legal-Tech Solutions", now))
        .await
        .expect("insert");

    let recent = storage
        .count_submissions_since(now - Duration::days(7))
        .await
        .expect("recent");
    assert_eq!(recent, 2);

    let breakdown = storage.service_breakdown().await.expect("breakdown");
    assert_eq!(
        breakdown,
        vec![
            ("Legal-Tech Solutions".to_string(), 2),
            ("Other".to_string(), 1)
        ]
    );
}

#[tokio::test]
async fn admin_lifecycle() {
    let storage = Storage::new("sqlite::memory:").await.expect("db");
    assert_eq!(storage.admin_count().await.expect("count"), 0);

    let admin = storage
        .create_admin("admin", "admin@example.com", "hash")
        .await
        .expect("admin");
    assert_eq!(storage.admin_count().await.expect("count"), 1);

    let found = storage
        .find_admin_by_username("admin")
        .await
        .expect("find")
        .expect("present");
    assert_eq!(found.admin_id, admin);
    assert!(found.is_active);
    assert!(found.last_login.is_none());

    let at = Utc::now();
    storage.record_admin_login(admin, at).await.expect("login");
    storage.set_admin_active(admin, false).await.expect("deactivate");
    storage
        .update_admin_password(admin, "new-hash")
        .await
        .expect("password");

    let reloaded = storage.load_admin(admin).await.expect("load").expect("present");
    assert_eq!(
        reloaded.last_login.map(|t| t.timestamp()),
        Some(at.timestamp())
    );
    assert!(!reloaded.is_active);
    assert_eq!(reloaded.password_hash, "new-hash");
}

#[tokio::test]
async fn duplicate_admin_username_is_rejected() {
    let storage = Storage::new("sqlite::memory:").await.expect("db");
    storage
        .create_admin("admin", "one@example.com", "hash")
        .await
        .expect("admin");
    let err = storage
        .create_admin("admin", "two@example.com", "hash")
        .await
        .expect_err("duplicate");
    assert!(err.to_string().contains("admin"));
}
