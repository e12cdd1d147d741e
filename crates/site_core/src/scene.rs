//! Optional 3D scene slot.
//!
//! The slot asks a [`SceneLoader`] for a renderer. Any load failure is
//! replaced by [`GradientFallback`], so callers always get something to draw.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::{info, warn};
use url::Url;

use crate::{error::SceneLoadError, html::escape};

const GRADIENT_CLASS: &str = "w-full h-full bg-gradient-to-br from-purple-900 to-blue-900";

pub trait SceneRenderer: Send + Sync {
    fn name(&self) -> &str;
    fn render(&self, class: &str) -> String;
}

#[async_trait]
pub trait SceneLoader: Send + Sync {
    async fn load(&self) -> Result<Arc<dyn SceneRenderer>, SceneLoadError>;
}

pub struct GradientFallback;

impl SceneRenderer for GradientFallback {
    fn name(&self) -> &str {
        "gradient"
    }

    fn render(&self, _class: &str) -> String {
        format!(r#"<div class="{GRADIENT_CLASS}" data-scene="gradient"></div>"#)
    }
}

pub struct MissingSceneLoader;

#[async_trait]
impl SceneLoader for MissingSceneLoader {
    async fn load(&self) -> Result<Arc<dyn SceneRenderer>, SceneLoadError> {
        Err(SceneLoadError::Unavailable)
    }
}

/// Embeds a hosted scene by url.
pub struct EmbedScene {
    source: Url,
}

impl SceneRenderer for EmbedScene {
    fn name(&self) -> &str {
        "embed"
    }

    fn render(&self, class: &str) -> String {
        format!(
            r#"<iframe class="{}" src="{}" title="3D scene" loading="lazy" data-scene="embed"></iframe>"#,
            escape(class),
            escape(self.source.as_str())
        )
    }
}

pub struct EmbedSceneLoader {
    source: String,
}

impl EmbedSceneLoader {
    pub fn new(source: impl Into<String>) -> Self {
        Self {
            source: source.into(),
        }
    }
}

#[async_trait]
impl SceneLoader for EmbedSceneLoader {
    async fn load(&self) -> Result<Arc<dyn SceneRenderer>, SceneLoadError> {
        let source = Url::parse(&self.source)
            .map_err(|_| SceneLoadError::InvalidSource(self.source.clone()))?;
        if !matches!(source.scheme(), "http" | "https") {
            return Err(SceneLoadError::InvalidSource(self.source.clone()));
        }
        Ok(Arc::new(EmbedScene { source }))
    }
}

#[derive(Clone)]
pub enum SceneSlot {
    Loading,
    Ready(Arc<dyn SceneRenderer>),
}

impl SceneSlot {
    pub async fn load(loader: &dyn SceneLoader) -> Self {
        match loader.load().await {
            Ok(renderer) => {
                info!(renderer = renderer.name(), "scene loaded");
                Self::Ready(renderer)
            }
            Err(err) => {
                warn!(%err, "scene failed to load; using gradient");
                Self::Ready(Arc::new(GradientFallback))
            }
        }
    }

    pub fn is_loading(&self) -> bool {
        matches!(self, Self::Loading)
    }

    pub fn renderer_name(&self) -> Option<&str> {
        match self {
            Self::Loading => None,
            Self::Ready(renderer) => Some(renderer.name()),
        }
    }

    pub fn render(&self, class: &str) -> String {
        match self {
            Self::Loading => format!(
                r#"<div class="{GRADIENT_CLASS} flex items-center justify-center" data-scene="loading"><span class="loader"></span></div>"#
            ),
            Self::Ready(renderer) => renderer.render(class),
        }
    }
}
