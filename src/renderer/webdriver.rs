use crate::config::CaptureConfig;
use crate::error::RenderError;
use crate::renderer::{Attribute, PageRenderer};
use async_trait::async_trait;
use fantoccini::elements::Element;
use fantoccini::error::{CmdError, ErrorStatus};
use fantoccini::{Client, ClientBuilder, Locator};
use serde_json::json;
use std::time::Duration;

/// Common local WebDriver endpoints tried after the configured one
const FALLBACK_WEBDRIVER_URLS: [&str; 2] = [
    "http://localhost:9515", // ChromeDriver default
    "http://127.0.0.1:4444", // Try with IP instead of localhost
];

/// Page renderer backed by a real browser through a WebDriver server
pub struct WebDriverRenderer {
    client: Client,
}

impl WebDriverRenderer {
    /// Open a browser session. The session is held until [`PageRenderer::close`].
    pub async fn connect(config: &CaptureConfig) -> Result<Self, RenderError> {
        let capabilities = chrome_capabilities(config);

        let mut last_error = match connect_to(&config.webdriver_url, &capabilities).await {
            Ok(client) => {
                ::log::info!("WebDriver initialized at {}", config.webdriver_url);
                return Ok(Self { client });
            }
            Err(e) => {
                ::log::error!(
                    "Failed to connect to WebDriver at {}: {}",
                    config.webdriver_url,
                    e
                );
                e
            }
        };

        for url in FALLBACK_WEBDRIVER_URLS {
            if url == config.webdriver_url {
                continue;
            }

            ::log::info!("Trying fallback WebDriver URL: {}", url);
            match connect_to(url, &capabilities).await {
                Ok(client) => {
                    ::log::info!("WebDriver initialized at fallback {}", url);
                    return Ok(Self { client });
                }
                Err(e) => last_error = e,
            }
        }

        ::log::error!(
            "Make sure a WebDriver server is running or set the WEBDRIVER_URL environment variable"
        );
        Err(RenderError::Connect(last_error))
    }
}

async fn connect_to(
    webdriver_url: &str,
    capabilities: &serde_json::Map<String, serde_json::Value>,
) -> Result<Client, String> {
    let mut builder = ClientBuilder::native();
    builder.capabilities(capabilities.clone());
    builder
        .connect(webdriver_url)
        .await
        .map_err(|e| e.to_string())
}

/// Chrome options: a visible maximised window unless headless is requested
fn chrome_capabilities(config: &CaptureConfig) -> serde_json::Map<String, serde_json::Value> {
    let mut args = vec![if config.headless {
        "--headless=new".to_string()
    } else {
        "--start-maximized".to_string()
    }];
    args.extend(config.browser_args.iter().cloned());

    let mut capabilities = serde_json::Map::new();
    capabilities.insert("goog:chromeOptions".to_string(), json!({ "args": args }));
    capabilities
}

fn is_stale(error: &CmdError) -> bool {
    matches!(error, CmdError::Standard(e) if matches!(e.error, ErrorStatus::StaleElementReference))
}

fn is_session_lost(error: &CmdError) -> bool {
    if let CmdError::Standard(e) = error {
        if matches!(
            e.error,
            ErrorStatus::InvalidSessionId | ErrorStatus::NoSuchWindow
        ) {
            return true;
        }
    }

    let message = error.to_string();
    message.contains("Unable to find session") || message.contains("invalid session id")
}

/// Maps a WebDriver command error, escalating to `SessionLost` when the browser is gone
fn classify(error: CmdError, recoverable: impl FnOnce(String) -> RenderError) -> RenderError {
    if is_session_lost(&error) {
        RenderError::SessionLost(error.to_string())
    } else {
        recoverable(error.to_string())
    }
}

#[async_trait]
impl PageRenderer for WebDriverRenderer {
    type Handle = Element;

    async fn navigate(&mut self, url: &str, timeout: Duration) -> Result<(), RenderError> {
        ::log::info!("Loading page: {}", url);
        self.client.goto(url).await.map_err(|e| {
            classify(e, |reason| RenderError::Navigation {
                url: url.to_string(),
                reason,
            })
        })?;

        match self
            .client
            .wait()
            .at_most(timeout)
            .for_element(Locator::Css("a"))
            .await
        {
            Ok(_) => Ok(()),
            Err(CmdError::WaitTimeout) => Err(RenderError::Timeout {
                url: url.to_string(),
                secs: timeout.as_secs(),
            }),
            Err(e) => Err(classify(e, RenderError::Command)),
        }
    }

    async fn anchors(&mut self) -> Result<Vec<Element>, RenderError> {
        self.client
            .find_all(Locator::XPath("//a[@href]"))
            .await
            .map_err(|e| classify(e, RenderError::Command))
    }

    async fn read_href(&mut self, handle: &Element) -> Result<Attribute, RenderError> {
        // The property, unlike the attribute, is already resolved against the page URL
        match handle.prop("href").await {
            Ok(Some(href)) => Ok(Attribute::Present(href)),
            Ok(None) => Ok(Attribute::Missing),
            Err(e) if is_stale(&e) => Ok(Attribute::Stale),
            Err(e) => Err(classify(e, RenderError::Command)),
        }
    }

    async fn current_url(&mut self) -> Result<String, RenderError> {
        self.client
            .current_url()
            .await
            .map(|url| url.to_string())
            .map_err(|e| classify(e, RenderError::Command))
    }

    async fn source(&mut self) -> Result<String, RenderError> {
        self.client
            .source()
            .await
            .map_err(|e| classify(e, RenderError::Command))
    }

    async fn close(&mut self) -> Result<(), RenderError> {
        self.client
            .clone()
            .close()
            .await
            .map_err(|e| classify(e, RenderError::Command))
    }
}
