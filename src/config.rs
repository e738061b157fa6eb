use crate::error::CaptureError;
use crate::filter::RestaurantFilter;
use crate::store::DEFAULT_OUTPUT_FILE;
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::Read;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Configuration for capturing restaurant URLs
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CaptureConfig {
    /// Site root, e.g. `https://www.zomato.com`
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// City segment of restaurant URLs
    #[serde(default = "default_city")]
    pub city: String,

    /// Page to open before watching (defaults to the city's restaurant listing)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub target_url: Option<String>,

    /// JSON file captured URLs are appended to
    #[serde(default = "default_output_file")]
    pub output_file: PathBuf,

    /// Seconds between two reads of the page
    #[serde(default = "default_poll_interval_secs")]
    pub poll_interval_secs: u64,

    /// Seconds to wait for a page to show its first link
    #[serde(default = "default_load_timeout_secs")]
    pub load_timeout_secs: u64,

    /// URL for the WebDriver instance
    #[serde(default = "default_webdriver_url")]
    pub webdriver_url: String,

    /// Run the browser without a window
    #[serde(default)]
    pub headless: bool,

    /// Extra command-line arguments for the browser
    #[serde(default)]
    pub browser_args: Vec<String>,

    /// Continue id numbering and skip URLs already present in the output file
    #[serde(default)]
    pub resume: bool,

    /// Only accept restaurant links continuing with this path segment (e.g. `order`)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub required_suffix: Option<String>,
}

fn default_base_url() -> String {
    "https://www.zomato.com".to_string()
}

fn default_city() -> String {
    "bangalore".to_string()
}

fn default_output_file() -> PathBuf {
    PathBuf::from(DEFAULT_OUTPUT_FILE)
}

fn default_poll_interval_secs() -> u64 {
    1
}

fn default_load_timeout_secs() -> u64 {
    10
}

/// Default value for webdriver_url
fn default_webdriver_url() -> String {
    "http://localhost:4444".to_string()
}

impl Default for CaptureConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            city: default_city(),
            target_url: None,
            output_file: default_output_file(),
            poll_interval_secs: default_poll_interval_secs(),
            load_timeout_secs: default_load_timeout_secs(),
            webdriver_url: default_webdriver_url(),
            headless: false,
            browser_args: Vec::new(),
            resume: false,
            required_suffix: None,
        }
    }
}

impl CaptureConfig {
    /// Load configuration from a JSON file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, CaptureError> {
        let mut file = File::open(path)?;
        let mut contents = String::new();
        file.read_to_string(&mut contents)?;

        Self::from_json(&contents)
    }

    /// Load configuration from a JSON string
    pub fn from_json(json: &str) -> Result<Self, CaptureError> {
        let config: Self = serde_json::from_str(json)?;
        Ok(config.normalized())
    }

    /// Override the WebDriver URL with the `WEBDRIVER_URL` environment variable if set
    pub fn with_env(mut self) -> Self {
        if let Ok(webdriver_url) = std::env::var("WEBDRIVER_URL") {
            if !webdriver_url.is_empty() {
                self.webdriver_url = webdriver_url;
            }
        }
        self
    }

    /// Trim the base URL's trailing slash and lower-case the city
    pub fn normalized(mut self) -> Self {
        self.base_url = self.base_url.trim_end_matches('/').to_string();
        self.city = self.city.to_lowercase();
        self
    }

    /// `<base_url>/<city>`
    pub fn city_url(&self) -> String {
        format!("{}/{}", self.base_url.trim_end_matches('/'), self.city)
    }

    /// The page to open, falling back to the city's restaurant listing
    pub fn target_url(&self) -> String {
        self.target_url
            .clone()
            .unwrap_or_else(|| format!("{}/restaurants", self.city_url()))
    }

    pub fn poll_interval(&self) -> Duration {
        Duration::from_secs(self.poll_interval_secs)
    }

    pub fn load_timeout(&self) -> Duration {
        Duration::from_secs(self.load_timeout_secs)
    }

    /// Build the restaurant URL filter for this site and city
    pub fn filter(&self) -> Result<RestaurantFilter, CaptureError> {
        RestaurantFilter::from_base_url(
            &self.base_url,
            &self.city,
            self.required_suffix.as_deref(),
        )
    }
}
