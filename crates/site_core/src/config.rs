use anyhow::{Context, Result};
use chrono::{Datelike, Utc};
use url::Url;

pub const DEFAULT_PUBLIC_URL: &str = "http://localhost:5000/";
const CONTACT_PATH: &str = "api/submit-contact";
const ADMIN_LOGIN_PATH: &str = "admin/login";

/// Endpoints and per-render values the page needs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SiteConfig {
    pub public_url: Url,
    pub contact_endpoint: Url,
    pub admin_url: Url,
    pub year: i32,
}

impl SiteConfig {
    pub fn from_public_url(public_url: &str) -> Result<Self> {
        Self::from_public_url_at(public_url, Utc::now().year())
    }

    pub fn from_public_url_at(public_url: &str, year: i32) -> Result<Self> {
        let public_url = base_url(public_url)?;
        let contact_endpoint = public_url
            .join(CONTACT_PATH)
            .context("failed to derive contact endpoint")?;
        let admin_url = public_url
            .join(ADMIN_LOGIN_PATH)
            .context("failed to derive admin url")?;
        Ok(Self {
            public_url,
            contact_endpoint,
            admin_url,
            year,
        })
    }

    pub fn with_year(mut self, year: i32) -> Self {
        self.year = year;
        self
    }
}

/// Parses `raw` and makes sure its path ends with `/` so relative joins
/// append instead of replacing the last segment.
fn base_url(raw: &str) -> Result<Url> {
    let mut url =
        Url::parse(raw.trim()).with_context(|| format!("invalid public url '{raw}'"))?;
    if url.cannot_be_a_base() {
        anyhow::bail!("public url '{raw}' cannot be used as a base");
    }
    if !url.path().ends_with('/') {
        let path = format!("{}/", url.path());
        url.set_path(&path);
    }
    url.set_query(None);
    url.set_fragment(None);
    Ok(url)
}
