use chrono::Utc;
use shared::domain::ReadFilter;
use storage::{NewSubmission, Storage};

#[tokio::test]
async fn submissions_survive_reopening_the_database_file() {
    let dir = tempfile::tempdir().expect("tempdir");
    let db_path = dir.path().join("nested").join("portfolio.db");
    let database_url = format!("sqlite://{}", db_path.to_string_lossy().replace('\\', "/"));

    let storage = Storage::new(&database_url).await.expect("db");
    storage
        .insert_submission(&NewSubmission {
            name: "Dana".to_string(),
            email: "dana@example.com".to_string(),
            service: "Other".to_string(),
            message: "Please call me back".to_string(),
            ip_address: None,
            submitted_at: Utc::now(),
        })
        .await
        .expect("insert");
    storage.pool().close().await;
    drop(storage);

    assert!(db_path.exists(), "database file should exist: {}", db_path.display());

    let reopened = Storage::new(&database_url).await.expect("reopen");
    assert_eq!(
        reopened
            .count_submissions(ReadFilter::All)
            .await
            .expect("count"),
        1
    );
}
