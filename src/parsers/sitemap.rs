//! Restaurant URLs from a static sitemap file.
//!
//! The sitemap is matched with a plain regex rather than parsed as XML. Only
//! locations with a path segment after the slug are picked up.

use crate::error::CaptureError;
use crate::results::CapturedUrl;
use crate::store::JsonStore;
use regex::Regex;
use std::collections::HashSet;
use std::fs;
use std::path::Path;

/// Default output file for sitemap ingestion
pub const DEFAULT_SITEMAP_OUTPUT: &str = "restaurant_urls.json";

/// Unique restaurant slugs in first-seen order
pub fn restaurant_slugs(xml: &str, domain: &str, city: &str) -> Result<Vec<String>, regex::Error> {
    // The slug stops at '<' and whitespace so a closing tag is never part of it
    let pattern = Regex::new(&format!(
        r"https://{}/{}/([^/<\s]+)/",
        regex::escape(domain),
        regex::escape(city)
    ))?;

    let mut seen = HashSet::new();
    Ok(pattern
        .captures_iter(xml)
        .filter_map(|caps| caps.get(1))
        .map(|m| m.as_str().to_string())
        .filter(|slug| seen.insert(slug.clone()))
        .collect())
}

/// Restaurant URLs found in the sitemap, numbered from 1
pub fn restaurant_urls(
    xml: &str,
    domain: &str,
    city: &str,
) -> Result<Vec<CapturedUrl>, regex::Error> {
    let slugs = restaurant_slugs(xml, domain, city)?;
    Ok(slugs
        .into_iter()
        .zip(1..)
        .map(|(slug, id)| CapturedUrl::new(id, format!("https://{domain}/{city}/{slug}")))
        .collect())
}

/// Read a sitemap file and write its restaurant URLs to `store`, replacing its contents
pub fn ingest(
    sitemap: &Path,
    store: &JsonStore<CapturedUrl>,
    domain: &str,
    city: &str,
) -> Result<Vec<CapturedUrl>, CaptureError> {
    ::log::info!("Reading sitemap {}", sitemap.display());
    let xml = fs::read_to_string(sitemap)?;

    let urls = restaurant_urls(&xml, domain, city)?;
    store.write_all(&urls)?;

    ::log::info!(
        "Wrote {} restaurant URLs to {}",
        urls.len(),
        store.path().display()
    );
    Ok(urls)
}
