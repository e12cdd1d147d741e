use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use sqlx::{
    sqlite::{SqliteConnectOptions, SqlitePoolOptions, SqliteRow},
    Pool, Row, Sqlite,
};
use std::{
    fs,
    path::{Path, PathBuf},
    str::FromStr,
};

use shared::domain::{AdminId, ReadFilter, SubmissionId};

#[derive(Clone)]
pub struct Storage {
    pool: Pool<Sqlite>,
}

#[derive(Debug, Clone)]
pub struct NewSubmission {
    pub name: String,
    pub email: String,
    pub service: String,
    pub message: String,
    pub ip_address: Option<String>,
    pub submitted_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoredSubmission {
    pub submission_id: SubmissionId,
    pub name: String,
    pub email: String,
    pub service: String,
    pub message: String,
    pub submitted_at: DateTime<Utc>,
    pub is_read: bool,
    pub ip_address: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoredAdmin {
    pub admin_id: AdminId,
    pub username: String,
    pub email: String,
    pub password_hash: String,
    pub created_at: DateTime<Utc>,
    pub last_login: Option<DateTime<Utc>>,
    pub is_active: bool,
}

const SUBMISSION_COLUMNS: &str =
    "id, name, email, service, message, submitted_at, is_read, ip_address";
const ADMIN_COLUMNS: &str =
    "id, username, email, password_hash, created_at, last_login, is_active";

impl Storage {
    pub async fn new(database_url: &str) -> Result<Self> {
        ensure_sqlite_parent_dir_exists(database_url)?;

        let connect_options = SqliteConnectOptions::from_str(database_url)?.create_if_missing(true);
        let pool = SqlitePoolOptions::new()
            .max_connections(5)
            .connect_with(connect_options)
            .await?;
        sqlx::migrate!("./migrations").run(&pool).await?;
        Ok(Self { pool })
    }

    pub fn pool(&self) -> &Pool<Sqlite> {
        &self.pool
    }

    pub async fn health_check(&self) -> Result<()> {
        let _: i64 = sqlx::query_scalar("SELECT 1")
            .fetch_one(&self.pool)
            .await
            .context("sqlite ping failed")?;
        Ok(())
    }

    pub async fn insert_submission(&self, submission: &NewSubmission) -> Result<SubmissionId> {
        let rec = sqlx::query(
            "INSERT INTO contact_submissions (name, email, service, message, submitted_at, is_read, ip_address)
             VALUES (?, ?, ?, ?, ?, 0, ?)
             RETURNING id",
        )
        .bind(&submission.name)
        .bind(&submission.email)
        .bind(&submission.service)
        .bind(&submission.message)
        .bind(submission.submitted_at)
        .bind(submission.ip_address.as_deref())
        .fetch_one(&self.pool)
        .await
        .context("failed to insert contact submission")?;
        Ok(SubmissionId(rec.get::<i64, _>(0)))
    }

    /// Newest first, `limit` rows starting at `offset`.
    pub async fn list_submissions(
        &self,
        filter: ReadFilter,
        limit: u32,
        offset: u64,
    ) -> Result<Vec<StoredSubmission>> {
        let sql = format!(
            "SELECT {SUBMISSION_COLUMNS} FROM contact_submissions {} ORDER BY submitted_at DESC, id DESC LIMIT ? OFFSET ?",
            read_filter_clause(filter)
        );
        let offset = i64::try_from(offset).context("submission offset out of range")?;
        let rows = sqlx::query(&sql)
            .bind(i64::from(limit))
            .bind(offset)
            .fetch_all(&self.pool)
            .await?;
        rows.iter().map(submission_from_row).collect()
    }

    pub async fn count_submissions(&self, filter: ReadFilter) -> Result<u64> {
        let sql = format!(
            "SELECT COUNT(*) FROM contact_submissions {}",
            read_filter_clause(filter)
        );
        let count: i64 = sqlx::query_scalar(&sql).fetch_one(&self.pool).await?;
        Ok(count.max(0) as u64)
    }

    pub async fn count_submissions_since(&self, since: DateTime<Utc>) -> Result<u64> {
        let count: i64 =
            sqlx::query_scalar("SELECT COUNT(*) FROM contact_submissions WHERE submitted_at >= ?")
                .bind(since)
                .fetch_one(&self.pool)
                .await?;
        Ok(count.max(0) as u64)
    }

    pub async fn service_breakdown(&self) -> Result<Vec<(String, u64)>> {
        let rows = sqlx::query(
            "SELECT service, COUNT(id) FROM contact_submissions
             GROUP BY service
             ORDER BY COUNT(id) DESC, service ASC",
        )
        .fetch_all(&self.pool)
        .await?;
        Ok(rows
            .into_iter()
            .map(|r| (r.get::<String, _>(0), r.get::<i64, _>(1).max(0) as u64))
            .collect())
    }

    pub async fn load_submission(
        &self,
        submission_id: SubmissionId,
    ) -> Result<Option<StoredSubmission>> {
        let sql = format!("SELECT {SUBMISSION_COLUMNS} FROM contact_submissions WHERE id = ?");
        let row = sqlx::query(&sql)
            .bind(submission_id.0)
            .fetch_optional(&self.pool)
            .await?;
        row.as_ref().map(submission_from_row).transpose()
    }

    /// Returns `false` when no submission has that id.
    pub async fn set_submission_read(
        &self,
        submission_id: SubmissionId,
        is_read: bool,
    ) -> Result<bool> {
        let affected = sqlx::query("UPDATE contact_submissions SET is_read = ? WHERE id = ?")
            .bind(is_read)
            .bind(submission_id.0)
            .execute(&self.pool)
            .await?
            .rows_affected();
        Ok(affected > 0)
    }

    pub async fn delete_submission(&self, submission_id: SubmissionId) -> Result<bool> {
        let affected = sqlx::query("DELETE FROM contact_submissions WHERE id = ?")
            .bind(submission_id.0)
            .execute(&self.pool)
            .await?
            .rows_affected();
        Ok(affected > 0)
    }

    pub async fn create_admin(
        &self,
        username: &str,
        email: &str,
        password_hash: &str,
    ) -> Result<AdminId> {
        let rec = sqlx::query(
            "INSERT INTO admin_users (username, email, password_hash, created_at, is_active)
             VALUES (?, ?, ?, ?, 1)
             RETURNING id",
        )
        .bind(username)
        .bind(email)
        .bind(password_hash)
        .bind(Utc::now())
        .fetch_one(&self.pool)
        .await
        .with_context(|| format!("failed to create admin user '{username}'"))?;
        Ok(AdminId(rec.get::<i64, _>(0)))
    }

    pub async fn admin_count(&self) -> Result<u64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM admin_users")
            .fetch_one(&self.pool)
            .await?;
        Ok(count.max(0) as u64)
    }

    pub async fn find_admin_by_username(&self, username: &str) -> Result<Option<StoredAdmin>> {
        let sql = format!("SELECT {ADMIN_COLUMNS} FROM admin_users WHERE username = ?");
        let row = sqlx::query(&sql)
            .bind(username)
            .fetch_optional(&self.pool)
            .await?;
        row.as_ref().map(admin_from_row).transpose()
    }

    pub async fn load_admin(&self, admin_id: AdminId) -> Result<Option<StoredAdmin>> {
        let sql = format!("SELECT {ADMIN_COLUMNS} FROM admin_users WHERE id = ?");
        let row = sqlx::query(&sql)
            .bind(admin_id.0)
            .fetch_optional(&self.pool)
            .await?;
        row.as_ref().map(admin_from_row).transpose()
    }

    pub async fn record_admin_login(&self, admin_id: AdminId, at: DateTime<Utc>) -> Result<()> {
        sqlx::query("UPDATE admin_users SET last_login = ? WHERE id = ?")
            .bind(at)
            .bind(admin_id.0)
            .execute(&self.pool)
            .await?;
        Ok(())
    }

    pub async fn set_admin_active(&self, admin_id: AdminId, is_active: bool) -> Result<bool> {
        let affected = sqlx::query("UPDATE admin_users SET is_active = ? WHERE id = ?")
            .bind(is_active)
            .bind(admin_id.0)
            .execute(&self.pool)
            .await?
            .rows_affected();
        Ok(affected > 0)
    }

    pub async fn update_admin_password(
        &self,
        admin_id: AdminId,
        password_hash: &str,
    ) -> Result<bool> {
        let affected = sqlx::query("UPDATE admin_users SET password_hash = ? WHERE id = ?")
            .bind(password_hash)
            .bind(admin_id.0)
            .execute(&self.pool)
            .await?
            .rows_affected();
        Ok(affected > 0)
    }
}

fn read_filter_clause(filter: ReadFilter) -> &'static str {
    match filter {
        ReadFilter::All => "",
        ReadFilter::Read => "WHERE is_read = 1",
        ReadFilter::Unread => "WHERE is_read = 0",
    }
}

fn submission_from_row(row: &SqliteRow) -> Result<StoredSubmission> {
    Ok(StoredSubmission {
        submission_id: SubmissionId(row.try_get("id")?),
        name: row.try_get("name")?,
        email: row.try_get("email")?,
        service: row.try_get("service")?,
        message: row.try_get("message")?,
        submitted_at: row.try_get("submitted_at")?,
        is_read: row.try_get("is_read")?,
        ip_address: row.try_get("ip_address")?,
    })
}

fn admin_from_row(row: &SqliteRow) -> Result<StoredAdmin> {
    Ok(StoredAdmin {
        admin_id: AdminId(row.try_get("id")?),
        username: row.try_get("username")?,
        email: row.try_get("email")?,
        password_hash: row.try_get("password_hash")?,
        created_at: row.try_get("created_at")?,
        last_login: row.try_get("last_login")?,
        is_active: row.try_get("is_active")?,
    })
}

fn ensure_sqlite_parent_dir_exists(database_url: &str) -> Result<()> {
    let Some(path) = sqlite_path(database_url) else {
        return Ok(());
    };

    let Some(parent) = path.parent() else {
        return Ok(());
    };

    fs::create_dir_all(parent).with_context(|| {
        format!(
            "failed to create parent directory '{}' for database url '{database_url}'",
            parent.display()
        )
    })?;

    Ok(())
}

fn sqlite_path(database_url: &str) -> Option<PathBuf> {
    if database_url == "sqlite::memory:" || !database_url.starts_with("sqlite:") {
        return None;
    }

    let path = database_url
        .trim_start_matches("sqlite://")
        .trim_start_matches("sqlite:")
        .split('?')
        .next()
        .unwrap_or_default();

    if path.is_empty() {
        return None;
    }

    Some(Path::new(path).to_path_buf())
}

#[cfg(test)]
#[path = "tests/lib_tests.rs"]
mod tests;
