use capture_urls::CaptureConfig;
use capture_urls::crawlers::phones::DEFAULT_PHONE_OUTPUT;
use capture_urls::parsers::sitemap::DEFAULT_SITEMAP_OUTPUT;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "capture-urls")]
#[command(about = "Records restaurant URLs from a live listing page")]
#[command(version)]
pub struct Args {
    /// JSON configuration file
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Site root, e.g. https://www.zomato.com
    #[arg(long, global = true)]
    pub base_url: Option<String>,

    /// City segment of restaurant URLs
    #[arg(long, global = true)]
    pub city: Option<String>,

    #[command(subcommand)]
    pub command: Command,
}

/// Options shared by the commands that drive a browser
#[derive(clap::Args, Debug, Default)]
pub struct BrowserArgs {
    /// Seconds to wait for a page to show its first link
    #[arg(short, long)]
    pub timeout: Option<u64>,

    /// Run the browser without a window
    #[arg(long)]
    pub headless: bool,

    /// WebDriver server URL
    #[arg(long)]
    pub webdriver: Option<String>,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Open a listing page and record new restaurant URLs until Ctrl-C
    Watch {
        /// Page to watch (defaults to the city's restaurant listing)
        target_url: Option<String>,

        /// Seconds between two reads of the page
        #[arg(short, long)]
        interval: Option<u64>,

        /// JSON file to append captured URLs to
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Continue numbering after the URLs already in the output file
        #[arg(long)]
        resume: bool,

        #[command(flatten)]
        browser: BrowserArgs,
    },

    /// Extract restaurant URLs from a sitemap XML file
    Sitemap {
        /// Sitemap file to read
        input: PathBuf,

        /// JSON file to write (replaced, not merged)
        #[arg(short, long, default_value = DEFAULT_SITEMAP_OUTPUT)]
        output: PathBuf,
    },

    /// Collect phone numbers from restaurant pages
    Phones {
        /// Restaurant page URLs
        urls: Vec<String>,

        /// Captured-URL JSON file to take URLs from
        #[arg(long)]
        input: Option<PathBuf>,

        /// JSON file to append phone numbers to
        #[arg(short, long, default_value = DEFAULT_PHONE_OUTPUT)]
        output: PathBuf,

        #[command(flatten)]
        browser: BrowserArgs,
    },
}

impl Args {
    /// Apply the site-wide flags on top of a loaded configuration
    pub fn apply_overrides(&self, config: &mut CaptureConfig) {
        if let Some(base_url) = &self.base_url {
            config.base_url = base_url.clone();
        }
        if let Some(city) = &self.city {
            config.city = city.clone();
        }
    }
}

impl BrowserArgs {
    pub fn apply_overrides(&self, config: &mut CaptureConfig) {
        if let Some(timeout) = self.timeout {
            config.load_timeout_secs = timeout;
        }
        if self.headless {
            config.headless = true;
        }
        if let Some(webdriver) = &self.webdriver {
            config.webdriver_url = webdriver.clone();
        }
    }
}
