use chrono::{DateTime, Duration, Utc};
use shared::{
    domain::{AdminId, ReadFilter, SubmissionId},
    error::{ApiError, ErrorCode},
    protocol::{
        AdminLoginRequest, AdminLoginResponse, AdminStats, AdminSummary, ContactPayload,
        ContactResponse, Pagination, ServiceCount, SubmissionPage, SubmissionRecord,
    },
};
use storage::{NewSubmission, Storage, StoredAdmin, StoredSubmission};
use tracing::{info, warn};

pub mod password;
pub mod token;
pub mod validation;

pub use token::TokenConfig;

pub const DEFAULT_PAGE_SIZE: u32 = 20;
pub const MAX_PAGE_SIZE: u32 = 100;
pub const RECENT_WINDOW_DAYS: i64 = 7;

#[derive(Clone)]
pub struct ApiContext {
    pub storage: Storage,
    pub tokens: TokenConfig,
}

#[derive(Debug, Clone)]
pub struct DefaultAdmin {
    pub username: String,
    pub email: String,
    pub password: String,
}

pub fn submit_contact_route() -> &'static str {
    "/api/submit-contact"
}

pub fn admin_login_route() -> &'static str {
    "/api/admin/login"
}

pub async fn submit_contact(
    ctx: &ApiContext,
    payload: &ContactPayload,
    client_ip: Option<String>,
) -> Result<ContactResponse, ApiError> {
    let contact = validation::validate_contact(payload)?;
    let submission_id = ctx
        .storage
        .insert_submission(&NewSubmission {
            name: contact.name,
            email: contact.email,
            service: contact.service,
            message: contact.message,
            ip_address: client_ip,
            submitted_at: Utc::now(),
        })
        .await
        .map_err(|err| {
            warn!(%err, "contact submission could not be stored");
            ApiError::internal("An error occurred while processing your request")
        })?;

    info!(submission_id = submission_id.0, "contact submission stored");
    Ok(ContactResponse::accepted(submission_id))
}

pub async fn admin_login(
    ctx: &ApiContext,
    req: &AdminLoginRequest,
) -> Result<AdminLoginResponse, ApiError> {
    let username = req.username.trim();
    if username.is_empty() || req.password.is_empty() {
        return Err(ApiError::validation("Username and password are required"));
    }

    let admin = ctx
        .storage
        .find_admin_by_username(username)
        .await
        .map_err(internal)?
        .filter(|admin| admin.is_active)
        .filter(|admin| password::verify_password(&req.password, &admin.password_hash))
        .ok_or_else(|| ApiError::unauthorized("Invalid username or password"))?;

    let now = Utc::now();
    ctx.storage
        .record_admin_login(admin.admin_id, now)
        .await
        .map_err(internal)?;

    let token = token::mint_admin_token(&ctx.tokens, admin.admin_id)
        .map_err(|e| ApiError::internal(format!("Login failed: {e}")))?;

    info!(admin_id = admin.admin_id.0, "admin signed in");
    Ok(AdminLoginResponse {
        success: true,
        token,
        admin: AdminSummary {
            last_login: Some(now),
            ..admin_summary(admin)
        },
    })
}

/// Resolves a bearer token to an active admin.
pub async fn authenticate_admin(ctx: &ApiContext, bearer: &str) -> Result<AdminSummary, ApiError> {
    let admin_id = token::verify_admin_token(&ctx.tokens, bearer)
        .map_err(|_| ApiError::unauthorized("Authentication required"))?;
    let admin = ctx
        .storage
        .load_admin(admin_id)
        .await
        .map_err(internal)?
        .filter(|admin| admin.is_active)
        .ok_or_else(|| ApiError::unauthorized("Invalid or inactive admin user"))?;
    Ok(admin_summary(admin))
}

pub async fn admin_profile(ctx: &ApiContext, admin_id: AdminId) -> Result<AdminSummary, ApiError> {
    ctx.storage
        .load_admin(admin_id)
        .await
        .map_err(internal)?
        .map(admin_summary)
        .ok_or_else(|| ApiError::not_found("Admin not found"))
}

pub async fn list_submissions(
    ctx: &ApiContext,
    page: Option<u32>,
    per_page: Option<u32>,
    is_read: Option<bool>,
) -> Result<SubmissionPage, ApiError> {
    let page = page.unwrap_or(1).max(1);
    let per_page = per_page
        .unwrap_or(DEFAULT_PAGE_SIZE)
        .clamp(1, MAX_PAGE_SIZE);
    let filter = ReadFilter::from_flag(is_read);

    let total = ctx
        .storage
        .count_submissions(filter)
        .await
        .map_err(internal)?;
    let pagination = Pagination::new(page, per_page, total);
    let rows = if pagination.offset() >= total {
        Vec::new()
    } else {
        ctx.storage
            .list_submissions(filter, per_page, pagination.offset())
            .await
            .map_err(internal)?
    };

    Ok(SubmissionPage {
        success: true,
        submissions: rows.into_iter().map(submission_record).collect(),
        pagination,
    })
}

/// Loads one submission, marking it read on first view.
pub async fn get_submission(
    ctx: &ApiContext,
    submission_id: SubmissionId,
) -> Result<SubmissionRecord, ApiError> {
    let mut submission = load_existing(ctx, submission_id).await?;
    if !submission.is_read {
        ctx.storage
            .set_submission_read(submission_id, true)
            .await
            .map_err(internal)?;
        submission.is_read = true;
    }
    Ok(submission_record(submission))
}

pub async fn mark_submission_read(
    ctx: &ApiContext,
    submission_id: SubmissionId,
    is_read: bool,
) -> Result<SubmissionRecord, ApiError> {
    let updated = ctx
        .storage
        .set_submission_read(submission_id, is_read)
        .await
        .map_err(internal)?;
    if !updated {
        return Err(ApiError::not_found("Submission not found"));
    }
    load_existing(ctx, submission_id)
        .await
        .map(submission_record)
}

pub async fn delete_submission(
    ctx: &ApiContext,
    submission_id: SubmissionId,
) -> Result<(), ApiError> {
    let deleted = ctx
        .storage
        .delete_submission(submission_id)
        .await
        .map_err(internal)?;
    if !deleted {
        return Err(ApiError::not_found("Submission not found"));
    }
    info!(submission_id = submission_id.0, "contact submission deleted");
    Ok(())
}

pub async fn admin_stats(ctx: &ApiContext, now: DateTime<Utc>) -> Result<AdminStats, ApiError> {
    let total_submissions = ctx
        .storage
        .count_submissions(ReadFilter::All)
        .await
        .map_err(internal)?;
    let unread_submissions = ctx
        .storage
        .count_submissions(ReadFilter::Unread)
        .await
        .map_err(internal)?;
    let recent_submissions = ctx
        .storage
        .count_submissions_since(now - Duration::days(RECENT_WINDOW_DAYS))
        .await
        .map_err(internal)?;
    let service_breakdown = ctx
        .storage
        .service_breakdown()
        .await
        .map_err(internal)?
        .into_iter()
        .map(|(service, count)| ServiceCount { service, count })
        .collect();

    Ok(AdminStats {
        total_submissions,
        unread_submissions,
        recent_submissions,
        service_breakdown,
    })
}

/// Creates the configured admin when the table is empty. Returns whether one was created.
pub async fn ensure_default_admin(ctx: &ApiContext, admin: &DefaultAdmin) -> anyhow::Result<bool> {
    if ctx.storage.admin_count().await? > 0 {
        info!("admin user already exists");
        return Ok(false);
    }

    let hash = password::hash_password(&admin.password);
    let admin_id = ctx
        .storage
        .create_admin(&admin.username, &admin.email, &hash)
        .await?;
    warn!(
        admin_id = admin_id.0,
        username = %admin.username,
        "default admin user created; change these credentials in production"
    );
    Ok(true)
}

async fn load_existing(
    ctx: &ApiContext,
    submission_id: SubmissionId,
) -> Result<StoredSubmission, ApiError> {
    ctx.storage
        .load_submission(submission_id)
        .await
        .map_err(internal)?
        .ok_or_else(|| ApiError::not_found("Submission not found"))
}

fn submission_record(row: StoredSubmission) -> SubmissionRecord {
    SubmissionRecord {
        id: row.submission_id,
        name: row.name,
        email: row.email,
        service: row.service,
        message: row.message,
        submitted_at: row.submitted_at,
        is_read: row.is_read,
        ip_address: row.ip_address,
    }
}

fn admin_summary(admin: StoredAdmin) -> AdminSummary {
    AdminSummary {
        id: admin.admin_id,
        username: admin.username,
        email: admin.email,
        created_at: admin.created_at,
        last_login: admin.last_login,
        is_active: admin.is_active,
    }
}

fn internal(err: anyhow::Error) -> ApiError {
    ApiError::new(ErrorCode::Internal, err.to_string())
}

#[cfg(test)]
#[path = "tests/lib_tests.rs"]
mod tests;
