//! Watch a restaurant listing in a real browser and record every restaurant
//! page it links to.
//!
//! The browser is driven through WebDriver. Links read from the rendered page
//! are trimmed to canonical restaurant URLs, numbered in discovery order and
//! appended to a JSON file. Phone-number extraction and sitemap ingestion work
//! from the same building blocks.

pub mod config;
pub mod crawlers;
pub mod error;
pub mod events;
pub mod filter;
pub mod parsers;
pub mod renderer;
pub mod results;
pub mod store;

// Re-export commonly used types for convenience
pub use config::CaptureConfig;
pub use crawlers::{Monitor, MonitorState};
pub use error::{CaptureError, RenderError, StoreError};
pub use events::{CaptureEvent, ConsoleSink, EventSink, RecordingSink};
pub use filter::RestaurantFilter;
pub use renderer::{Attribute, PageRenderer, WebDriverRenderer};
pub use results::{CapturedUrl, PhoneRecord, RunSummary};
pub use store::JsonStore;
