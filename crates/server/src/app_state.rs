use std::sync::Arc;

use server_api::ApiContext;
use site_core::{assets::DirectoryAssets, scene::SceneSlot, SiteConfig};

pub(crate) struct AppState {
    pub(crate) api: ApiContext,
    pub(crate) site: SiteConfig,
    pub(crate) assets: Arc<DirectoryAssets>,
    /// Resolved once at startup; every rendered page shares it.
    pub(crate) scene: SceneSlot,
    pub(crate) max_body_bytes: usize,
    pub(crate) cors_origins: Vec<String>,
}
