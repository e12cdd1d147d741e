//! Headless view-model of the portfolio page.
//!
//! View state (theme, menu, reveal visibility) is single-threaded and lives
//! behind a shared [`dom::Document`]. The contact form is the one async piece:
//! it is shared as `Arc<ContactForm>` and publishes [`form::FormEvent`]s that
//! a [`page::PageShell`] applies before rendering.

pub mod assets;
pub mod client;
pub mod config;
pub mod content;
pub mod dom;
pub mod error;
pub mod form;
pub mod html;
pub mod menu;
pub mod page;
pub mod reveal;
pub mod scene;
pub mod script;
pub mod theme;

pub use client::HttpContactTransport;
pub use config::SiteConfig;
pub use error::{FormError, SceneLoadError, TransportError};
pub use form::{ContactForm, ContactTransport, FormEvent, FormSnapshot, FormStatus};
pub use page::PageShell;
