//! Typed errors for the capture library.

use std::path::PathBuf;
use thiserror::Error;

/// Errors raised at the page renderer boundary.
#[derive(Debug, Clone, Error)]
pub enum RenderError {
    /// The readiness condition was not met in time. Callers log this and
    /// keep working with whatever DOM is currently loaded.
    #[error("timed out after {secs}s waiting for {url} to become ready")]
    Timeout { url: String, secs: u64 },

    /// The browser refused or failed to load a URL
    #[error("failed to load {url}: {reason}")]
    Navigation { url: String, reason: String },

    /// A single command failed but the session is still usable
    #[error("renderer command failed: {0}")]
    Command(String),

    /// The browser session is gone
    #[error("browser session lost: {0}")]
    SessionLost(String),

    /// No WebDriver session could be established
    #[error("could not start a WebDriver session: {0}")]
    Connect(String),
}

impl RenderError {
    /// Whether the renderer is unusable after this error.
    pub fn is_fatal(&self) -> bool {
        matches!(self, RenderError::SessionLost(_) | RenderError::Connect(_))
    }
}

/// Errors from the JSON file store.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("failed to read {}: {source}", path.display())]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    /// The file exists but is not a JSON array of the expected records
    #[error("{} is not a valid record file: {source}", path.display())]
    Corrupt {
        path: PathBuf,
        source: serde_json::Error,
    },

    #[error("failed to write {}: {source}", path.display())]
    Write {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to encode records: {0}")]
    Encode(#[source] serde_json::Error),
}

/// Top-level error for capture operations.
#[derive(Debug, Error)]
pub enum CaptureError {
    #[error("renderer error: {0}")]
    Render(#[from] RenderError),

    #[error("store error: {0}")]
    Store(#[from] StoreError),

    #[error("invalid URL pattern: {0}")]
    Pattern(#[from] regex::Error),

    #[error("invalid base URL {url}: {reason}")]
    InvalidBaseUrl { url: String, reason: String },

    #[error("monitor has already been started")]
    NotIdle,

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON parse error: {0}")]
    Json(#[from] serde_json::Error),
}
