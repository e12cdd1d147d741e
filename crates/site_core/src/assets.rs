use std::path::{Component, Path, PathBuf};

use crate::html::escape;

pub const ASSET_ROUTE_PREFIX: &str = "/assets/";

pub trait AssetStore: Send + Sync {
    fn contains(&self, name: &str) -> bool;
}

/// Assets served from a local directory. Names are plain relative paths;
/// anything that could escape the root resolves to `None`.
#[derive(Debug, Clone)]
pub struct DirectoryAssets {
    root: PathBuf,
}

impl DirectoryAssets {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn resolve(&self, name: &str) -> Option<PathBuf> {
        if name.is_empty() || name.contains('\\') {
            return None;
        }
        let relative = Path::new(name);
        if !relative
            .components()
            .all(|component| matches!(component, Component::Normal(_)))
        {
            return None;
        }
        Some(self.root.join(relative))
    }
}

impl AssetStore for DirectoryAssets {
    fn contains(&self, name: &str) -> bool {
        self.resolve(name).is_some_and(|path| path.is_file())
    }
}

/// Store with nothing in it; every image falls back to its badge.
pub struct NoAssets;

impl AssetStore for NoAssets {
    fn contains(&self, _name: &str) -> bool {
        false
    }
}

pub fn content_type(name: &str) -> &'static str {
    let extension = Path::new(name)
        .extension()
        .and_then(|ext| ext.to_str())
        .map(str::to_ascii_lowercase);
    match extension.as_deref() {
        Some("jpg" | "jpeg") => "image/jpeg",
        Some("png") => "image/png",
        Some("webp") => "image/webp",
        Some("svg") => "image/svg+xml",
        Some("gif") => "image/gif",
        Some("ico") => "image/x-icon",
        _ => "application/octet-stream",
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProfileImage {
    pub asset: &'static str,
    pub alt: &'static str,
    pub initials: &'static str,
    pub image_class: &'static str,
    pub badge_class: &'static str,
}

pub const HERO_PORTRAIT: ProfileImage = ProfileImage {
    asset: "profile-red-bg.jpeg",
    alt: "Arshad Anwar - Founder of Legal Success India",
    initials: "AA",
    image_class: "w-full h-full object-cover",
    badge_class: "w-full h-full bg-gradient-to-br from-[#C3E41D] to-[#a3c41a] flex items-center justify-center text-black font-bold text-2xl md:text-3xl",
};

pub const ABOUT_PORTRAIT: ProfileImage = ProfileImage {
    asset: "profile-striped-shirt.jpg.png",
    alt: "Arshad Anwar",
    initials: "ARSHAD ANWAR",
    image_class: "w-full h-full object-cover grayscale hover:grayscale-0 transition-all duration-500",
    badge_class: "w-full h-64 bg-gradient-to-br from-[#C3E41D] to-[#a3c41a] flex items-center justify-center text-black font-bold text-4xl",
};

impl ProfileImage {
    pub fn src(&self) -> String {
        format!("{ASSET_ROUTE_PREFIX}{}", self.asset)
    }

    /// Image plus its initials badge. A missing asset renders the badge only;
    /// otherwise the badge is hidden and shown by the browser on load error.
    pub fn render(&self, assets: &dyn AssetStore) -> String {
        let badge = |display: &str| {
            format!(
                r#"<div class="{}" style="display:{display}" data-fallback-badge>{}</div>"#,
                self.badge_class,
                escape(self.initials)
            )
        };
        if !assets.contains(self.asset) {
            return badge("flex");
        }
        format!(
            r#"<img src="{}" alt="{}" class="{}" data-fallback-image>{}"#,
            escape(&self.src()),
            escape(self.alt),
            self.image_class,
            badge("none")
        )
    }
}
