use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use shared::domain::AdminId;
use thiserror::Error;

#[derive(Debug, Clone)]
pub struct TokenConfig {
    pub secret: String,
    pub ttl_hours: i64,
}

#[derive(Debug, Serialize, Deserialize)]
struct AdminClaims {
    sub: String,
    iat: i64,
    exp: i64,
}

#[derive(Debug, Error)]
pub enum TokenError {
    #[error("token could not be signed: {0}")]
    Sign(#[source] jsonwebtoken::errors::Error),
    #[error("token rejected: {0}")]
    Rejected(#[source] jsonwebtoken::errors::Error),
    #[error("token subject '{0}' is not an admin id")]
    BadSubject(String),
    #[error("token lifetime of {0} hours is out of range")]
    InvalidLifetime(i64),
}

/// Upper bound on `TokenConfig::ttl_hours`: one year.
pub const MAX_TTL_HOURS: i64 = 24 * 365;

pub fn mint_admin_token(cfg: &TokenConfig, admin_id: AdminId) -> Result<String, TokenError> {
    if !(1..=MAX_TTL_HOURS).contains(&cfg.ttl_hours) {
        return Err(TokenError::InvalidLifetime(cfg.ttl_hours));
    }
    let lifetime =
        Duration::try_hours(cfg.ttl_hours).ok_or(TokenError::InvalidLifetime(cfg.ttl_hours))?;
    let now = Utc::now();
    let exp = now + lifetime;
    let claims = AdminClaims {
        sub: admin_id.0.to_string(),
        iat: now.timestamp(),
        exp: exp.timestamp(),
    };

    encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(cfg.secret.as_bytes()),
    )
    .map_err(TokenError::Sign)
}

pub fn verify_admin_token(cfg: &TokenConfig, token: &str) -> Result<AdminId, TokenError> {
    let data = decode::<AdminClaims>(
        token,
        &DecodingKey::from_secret(cfg.secret.as_bytes()),
        &Validation::new(Algorithm::HS256),
    )
    .map_err(TokenError::Rejected)?;

    data.claims
        .sub
        .parse::<i64>()
        .map(AdminId)
        .map_err(|_| TokenError::BadSubject(data.claims.sub))
}

#[cfg(test)]
#[path = "tests/token_tests.rs"]
mod tests;
