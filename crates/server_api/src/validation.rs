use std::sync::OnceLock;

use regex::Regex;
use shared::{domain::CONTACT_FIELDS, error::ApiError, protocol::ContactPayload};

pub const MIN_MESSAGE_CHARS: usize = 10;

/// A contact payload whose fields are trimmed and checked.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidContact {
    pub name: String,
    pub email: String,
    pub service: String,
    pub message: String,
}

const EMAIL_PATTERN: &str = r"^[a-zA-Z0-9._%+-]+@[a-zA-Z0-9.-]+\.[a-zA-Z]{2,}$";

fn email_regex() -> Result<&'static Regex, ApiError> {
    static EMAIL: OnceLock<Result<Regex, regex::Error>> = OnceLock::new();
    EMAIL
        .get_or_init(|| Regex::new(EMAIL_PATTERN))
        .as_ref()
        .map_err(|err| ApiError::internal(format!("email pattern failed to compile: {err}")))
}

pub fn validate_contact(payload: &ContactPayload) -> Result<ValidContact, ApiError> {
    for field in CONTACT_FIELDS {
        let value = payload.field(field).unwrap_or_default();
        if value.trim().is_empty() {
            return Err(ApiError::validation(format!(
                "{} is required",
                capitalize(field)
            )));
        }
    }

    let email = payload.email.trim().to_lowercase();
    if !email_regex()?.is_match(&email) {
        return Err(ApiError::validation("Invalid email format"));
    }

    let message = payload.message.trim();
    if message.chars().count() < MIN_MESSAGE_CHARS {
        return Err(ApiError::validation(format!(
            "Message must be at least {MIN_MESSAGE_CHARS} characters long"
        )));
    }

    Ok(ValidContact {
        name: payload.name.trim().to_string(),
        email,
        service: payload.service.trim().to_string(),
        message: message.to_string(),
    })
}

fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

#[cfg(test)]
#[path = "tests/validation_tests.rs"]
mod tests;
