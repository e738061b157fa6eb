use serde::{Deserialize, Serialize};

/// A restaurant URL together with the id it was assigned on discovery
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CapturedUrl {
    /// Discovery-order id, starting at 1
    pub id: u64,

    /// Canonical restaurant URL
    pub url: String,
}

impl CapturedUrl {
    /// Create a new captured URL record
    pub fn new(id: u64, url: impl Into<String>) -> Self {
        Self {
            id,
            url: url.into(),
        }
    }
}

/// Phone numbers found on a single restaurant page
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PhoneRecord {
    /// URL of the page
    pub url: String,

    /// Numbers in page order, without the `tel:` scheme
    pub phone_numbers: Vec<String>,
}

impl PhoneRecord {
    /// Create a new phone record
    pub fn new(url: impl Into<String>, phone_numbers: Vec<String>) -> Self {
        Self {
            url: url.into(),
            phone_numbers,
        }
    }
}

/// Outcome of a finished capture run
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RunSummary {
    /// Loop iterations executed
    pub ticks: u64,

    /// URLs assigned an id during the run
    pub captured: u64,

    /// Id the next new URL would have received
    pub next_id: u64,
}
