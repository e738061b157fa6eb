use crate::error::{CaptureError, RenderError};
use crate::parsers::html;
use crate::renderer::PageRenderer;
use crate::results::PhoneRecord;
use crate::store::JsonStore;
use std::time::Duration;

/// Default output file for phone numbers
pub const DEFAULT_PHONE_OUTPUT: &str = "ph_numbers.json";

/// Visits each URL and records the phone numbers its page links to.
///
/// Records are appended to `store` one page at a time. Pages that fail to load
/// are logged and skipped; a lost browser session aborts the whole run.
pub async fn collect_phone_numbers<R>(
    renderer: &mut R,
    urls: &[String],
    load_timeout: Duration,
    store: &JsonStore<PhoneRecord>,
) -> Result<Vec<PhoneRecord>, CaptureError>
where
    R: PageRenderer + ?Sized,
{
    let mut records = Vec::with_capacity(urls.len());

    for url in urls {
        match renderer.navigate(url, load_timeout).await {
            Ok(()) => {}
            Err(e @ RenderError::Timeout { .. }) => {
                ::log::error!("Error waiting for page load: {}", e);
            }
            Err(e) if e.is_fatal() => return Err(e.into()),
            Err(e) => {
                ::log::error!("Skipping {}: {}", url, e);
                continue;
            }
        }

        let source = match renderer.source().await {
            Ok(source) => source,
            Err(e) if e.is_fatal() => return Err(e.into()),
            Err(e) => {
                ::log::error!("Skipping {}: {}", url, e);
                continue;
            }
        };

        let record = PhoneRecord::new(url.clone(), html::phone_numbers(&source));
        if record.phone_numbers.is_empty() {
            ::log::warn!("No phone number found on {}", url);
        } else {
            ::log::info!("Phone number: {}", record.phone_numbers.join(", "));
        }

        if let Err(e) = store.append(std::slice::from_ref(&record)) {
            ::log::error!("Failed to save phone numbers for {}: {}", url, e);
        }
        records.push(record);
    }

    Ok(records)
}
