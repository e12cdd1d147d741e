use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::{
    domain::{AdminId, SubmissionId},
    error::ApiError,
};

/// Body of `POST /api/submit-contact`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContactPayload {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub service: String,
    #[serde(default)]
    pub message: String,
}

impl ContactPayload {
    pub fn field(&self, name: &str) -> Option<&str> {
        match name {
            "name" => Some(&self.name),
            "email" => Some(&self.email),
            "service" => Some(&self.service),
            "message" => Some(&self.message),
            _ => None,
        }
    }
}

/// Success/error envelope returned by the contact endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContactResponse {
    pub success: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<SubmissionId>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

pub const CONTACT_ACCEPTED_MESSAGE: &str =
    "Thank you for your message! We will get back to you soon.";

impl ContactResponse {
    pub fn accepted(id: SubmissionId) -> Self {
        Self {
            success: true,
            message: Some(CONTACT_ACCEPTED_MESSAGE.to_string()),
            id: Some(id),
            error: None,
        }
    }

    pub fn rejected(error: impl Into<String>) -> Self {
        Self {
            success: false,
            message: None,
            id: None,
            error: Some(error.into()),
        }
    }
}

/// Generic failure body shared by every JSON route.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FailureEnvelope {
    pub success: bool,
    pub error: String,
}

impl From<ApiError> for FailureEnvelope {
    fn from(value: ApiError) -> Self {
        Self {
            success: false,
            error: value.message,
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AdminLoginRequest {
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub password: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AdminSummary {
    pub id: AdminId,
    pub username: String,
    pub email: String,
    pub created_at: DateTime<Utc>,
    #[serde(default)]
    pub last_login: Option<DateTime<Utc>>,
    pub is_active: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AdminLoginResponse {
    pub success: bool,
    pub token: String,
    pub admin: AdminSummary,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AdminProfileResponse {
    pub success: bool,
    pub admin: AdminSummary,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubmissionRecord {
    pub id: SubmissionId,
    pub name: String,
    pub email: String,
    pub service: String,
    pub message: String,
    pub submitted_at: DateTime<Utc>,
    pub is_read: bool,
    #[serde(default)]
    pub ip_address: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Pagination {
    pub page: u32,
    pub per_page: u32,
    pub total: u64,
    pub pages: u64,
    pub has_next: bool,
    pub has_prev: bool,
}

impl Pagination {
    pub fn new(page: u32, per_page: u32, total: u64) -> Self {
        let per_page_wide = u64::from(per_page.max(1));
        let pages = total.div_ceil(per_page_wide);
        let page_wide = u64::from(page);
        Self {
            page,
            per_page,
            total,
            pages,
            has_next: page_wide < pages,
            has_prev: page > 1,
        }
    }

    /// Row offset of the first record on this page.
    pub fn offset(&self) -> u64 {
        u64::from(self.page.saturating_sub(1)) * u64::from(self.per_page)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SubmissionPage {
    pub success: bool,
    pub submissions: Vec<SubmissionRecord>,
    pub pagination: Pagination,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SubmissionEnvelope {
    pub success: bool,
    pub submission: SubmissionRecord,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MarkReadRequest {
    #[serde(default)]
    pub is_read: Option<bool>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AckResponse {
    pub success: bool,
    pub message: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServiceCount {
    pub service: String,
    pub count: u64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AdminStats {
    pub total_submissions: u64,
    pub unread_submissions: u64,
    pub recent_submissions: u64,
    pub service_breakdown: Vec<ServiceCount>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StatsResponse {
    pub success: bool,
    pub stats: AdminStats,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthStatus {
    pub status: String,
    pub message: String,
    pub version: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pagination_matches_page_window() {
        let first = Pagination::new(1, 20, 45);
        assert_eq!(first.pages, 3);
        assert!(first.has_next);
        assert!(!first.has_prev);
        assert_eq!(first.offset(), 0);

        let last = Pagination::new(3, 20, 45);
        assert!(!last.has_next);
        assert!(last.has_prev);
        assert_eq!(last.offset(), 40);
    }

    #[test]
    fn empty_result_has_no_pages() {
        let page = Pagination::new(1, 20, 0);
        assert_eq!(page.pages, 0);
        assert!(!page.has_next);
    }

    #[test]
    fn rejected_contact_response_omits_success_fields() {
        let body = serde_json::to_value(ContactResponse::rejected("X")).expect("json");
        assert_eq!(body, serde_json::json!({ "success": false, "error": "X" }));
    }

    #[test]
    fn contact_response_tolerates_missing_error() {
        let parsed: ContactResponse =
            serde_json::from_str(r#"{"success":false}"#).expect("parse");
        assert!(!parsed.success);
        assert!(parsed.error.is_none());
    }
}
