//! The page renderer boundary.
//!
//! The capture loop never talks to a browser directly. It drives anything that
//! can load a URL, enumerate the anchors of the rendered DOM and read their
//! `href`. Elements can be invalidated by the page's own scripts between
//! enumeration and read; that outcome is reported as [`Attribute::Stale`]
//! rather than as an error.

pub mod webdriver;

pub use webdriver::WebDriverRenderer;

use crate::error::RenderError;
use async_trait::async_trait;
use std::time::Duration;

/// Result of reading an attribute from a previously enumerated element
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Attribute {
    /// The attribute value
    Present(String),
    /// The element exists but has no such attribute
    Missing,
    /// The element was removed or replaced after it was enumerated
    Stale,
}

/// A browser-like collaborator that renders pages and exposes their DOM
#[async_trait]
pub trait PageRenderer: Send {
    /// Opaque reference to an anchor element
    type Handle: Send + Sync;

    /// Load `url` and block until at least one anchor is present or `timeout` expires.
    ///
    /// Expiry returns [`RenderError::Timeout`]; the page stays loaded as far as it got.
    async fn navigate(&mut self, url: &str, timeout: Duration) -> Result<(), RenderError>;

    /// All anchor elements carrying an `href`, in DOM order
    async fn anchors(&mut self) -> Result<Vec<Self::Handle>, RenderError>;

    /// The resolved `href` of an anchor
    async fn read_href(&mut self, handle: &Self::Handle) -> Result<Attribute, RenderError>;

    /// URL of the page currently loaded
    async fn current_url(&mut self) -> Result<String, RenderError>;

    /// Rendered HTML of the current page
    async fn source(&mut self) -> Result<String, RenderError>;

    /// End the browser session
    async fn close(&mut self) -> Result<(), RenderError>;
}
