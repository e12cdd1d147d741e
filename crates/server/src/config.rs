use std::{
    fs,
    path::{Path, PathBuf},
};

use anyhow::{bail, Context};
use config::{Config, File};
use serde::Deserialize;
use server_api::token::MAX_TTL_HOURS;

pub const DEFAULT_JWT_SECRET: &str = "your-secret-key-change-in-production";

#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
pub struct Settings {
    pub bind_addr: String,
    pub database_url: String,
    pub public_url: String,
    pub jwt_secret: String,
    pub jwt_ttl_hours: i64,
    pub admin_username: String,
    pub admin_password: String,
    pub admin_email: String,
    /// Comma separated.
    pub cors_origins: String,
    pub asset_dir: String,
    pub scene_url: Option<String>,
    pub max_body_bytes: usize,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            bind_addr: "127.0.0.1:5000".into(),
            database_url: "sqlite://./data/portfolio.db".into(),
            public_url: "http://localhost:5000/".into(),
            jwt_secret: DEFAULT_JWT_SECRET.into(),
            jwt_ttl_hours: 24,
            admin_username: "admin".into(),
            admin_password: "admin123".into(),
            admin_email: "arshad@legalsuccessindia.com".into(),
            cors_origins: "http://localhost:5173,http://localhost:3000".into(),
            asset_dir: "./public".into(),
            scene_url: None,
            max_body_bytes: 64 * 1024,
        }
    }
}

impl Settings {
    pub fn cors_origin_list(&self) -> Vec<String> {
        self.cors_origins
            .split(',')
            .map(str::trim)
            .filter(|origin| !origin.is_empty())
            .map(str::to_string)
            .collect()
    }
}

/// Defaults, then `server.toml` if present, then `APP__*` variables. The
/// unprefixed names (`DATABASE_URL`, `JWT_SECRET`, `PORT`, `ADMIN_*`) apply
/// only where the matching `APP__` variable is unset.
pub fn load_settings() -> anyhow::Result<Settings> {
    load_settings_from(Path::new("server.toml"), |name| std::env::var(name).ok())
}

pub(crate) fn load_settings_from(
    file: &Path,
    env: impl Fn(&str) -> Option<String>,
) -> anyhow::Result<Settings> {
    let defaults = Settings::default();
    let mut builder = Config::builder()
        .set_default("bind_addr", defaults.bind_addr.clone())?
        .set_default("database_url", defaults.database_url.clone())?
        .set_default("public_url", defaults.public_url.clone())?
        .set_default("jwt_secret", defaults.jwt_secret.clone())?
        .set_default("jwt_ttl_hours", defaults.jwt_ttl_hours)?
        .set_default("admin_username", defaults.admin_username.clone())?
        .set_default("admin_password", defaults.admin_password.clone())?
        .set_default("admin_email", defaults.admin_email.clone())?
        .set_default("cors_origins", defaults.cors_origins.clone())?
        .set_default("asset_dir", defaults.asset_dir.clone())?
        .set_default("max_body_bytes", defaults.max_body_bytes as u64)?
        .add_source(File::from(file).required(false));

    let legacy = [
        ("database_url", "DATABASE_URL"),
        ("jwt_secret", "JWT_SECRET"),
        ("jwt_secret", "JWT_SECRET_KEY"),
        ("admin_username", "ADMIN_USERNAME"),
        ("admin_password", "ADMIN_PASSWORD"),
        ("admin_email", "ADMIN_EMAIL"),
    ];
    for (key, name) in legacy {
        if let Some(value) = env(name) {
            builder = builder.set_override(key, value)?;
        }
    }
    if let Some(port) = env("PORT") {
        let port: u16 = port
            .trim()
            .parse()
            .with_context(|| format!("invalid PORT '{port}'"))?;
        builder = builder.set_override("bind_addr", format!("0.0.0.0:{port}"))?;
    }

    let prefixed = [
        "bind_addr",
        "database_url",
        "public_url",
        "jwt_secret",
        "jwt_ttl_hours",
        "admin_username",
        "admin_password",
        "admin_email",
        "cors_origins",
        "asset_dir",
        "scene_url",
        "max_body_bytes",
    ];
    for key in prefixed {
        let name = format!("APP__{}", key.to_ascii_uppercase());
        if let Some(value) = env(&name) {
            builder = builder.set_override(key, value)?;
        }
    }

    let settings: Settings = builder
        .build()
        .context("failed to assemble server settings")?
        .try_deserialize()
        .context("invalid server settings")?;
    if !(1..=MAX_TTL_HOURS).contains(&settings.jwt_ttl_hours) {
        bail!(
            "jwt_ttl_hours must be between 1 and {MAX_TTL_HOURS}, got {}",
            settings.jwt_ttl_hours
        );
    }
    Ok(settings)
}

pub fn prepare_database_url(raw_database_url: &str) -> anyhow::Result<String> {
    let database_url = normalize_database_url(raw_database_url);
    ensure_parent_dir_exists(&database_url)?;
    Ok(database_url)
}

pub(crate) fn normalize_database_url(raw_database_url: &str) -> String {
    let raw_database_url = raw_database_url.trim();

    if raw_database_url.is_empty() {
        return Settings::default().database_url;
    }

    if raw_database_url.starts_with("sqlite::memory:")
        || raw_database_url.starts_with("sqlite://")
        || raw_database_url.contains("://")
    {
        return raw_database_url.to_string();
    }

    if let Some(path) = raw_database_url.strip_prefix("sqlite:") {
        return format!("sqlite://{}", path.replace('\\', "/"));
    }

    format!("sqlite://{}", raw_database_url.replace('\\', "/"))
}

fn ensure_parent_dir_exists(database_url: &str) -> anyhow::Result<()> {
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
    })
}

fn sqlite_path(database_url: &str) -> Option<PathBuf> {
    if database_url.starts_with("sqlite::memory:") || !database_url.starts_with("sqlite:") {
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

    Some(PathBuf::from(path))
}

#[cfg(test)]
#[path = "tests/config_tests.rs"]
mod tests;
