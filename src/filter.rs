use crate::error::CaptureError;
use regex::{Regex, RegexBuilder};
use std::collections::HashSet;
use url::Url;

/// Filter that recognises restaurant detail URLs for one domain and city and
/// trims them down to their canonical form
#[derive(Debug, Clone)]
pub struct RestaurantFilter {
    domain: String,
    city: String,
    pattern: Regex,
}

impl RestaurantFilter {
    /// Create a filter accepting `https://<domain>/<city>/<slug>` with any trailing
    /// sub-path, query or fragment
    pub fn new(domain: &str, city: &str) -> Result<Self, regex::Error> {
        Self::build(domain, city, None)
    }

    /// Create a filter that only accepts links continuing with `/<suffix>` after the slug,
    /// e.g. `order` for ordering sub-pages
    pub fn with_required_suffix(
        domain: &str,
        city: &str,
        suffix: &str,
    ) -> Result<Self, regex::Error> {
        Self::build(domain, city, Some(suffix))
    }

    /// Create a filter from a base URL such as `https://www.zomato.com`
    pub fn from_base_url(
        base_url: &str,
        city: &str,
        required_suffix: Option<&str>,
    ) -> Result<Self, CaptureError> {
        let domain = domain_of(base_url)?;
        Ok(Self::build(&domain, city, required_suffix)?)
    }

    fn build(domain: &str, city: &str, suffix: Option<&str>) -> Result<Self, regex::Error> {
        let head = format!(
            r"^(https://{}/{}/[^/?#]+)",
            regex::escape(domain),
            regex::escape(city)
        );
        let pattern = match suffix {
            Some(suffix) => format!(r"{head}/{}.*$", regex::escape(suffix)),
            None => format!(r"{head}(?:[/?#].*)?$"),
        };
        let pattern = RegexBuilder::new(&pattern).case_insensitive(true).build()?;

        Ok(Self {
            domain: domain.to_string(),
            city: city.to_string(),
            pattern,
        })
    }

    pub fn domain(&self) -> &str {
        &self.domain
    }

    pub fn city(&self) -> &str {
        &self.city
    }

    /// Canonical form of a single URL, or `None` if it is not a restaurant URL
    pub fn canonicalize(&self, url: &str) -> Option<String> {
        self.pattern
            .captures(url)
            .and_then(|caps| caps.get(1))
            .map(|m| m.as_str().to_string())
    }

    /// Filter raw links down to unique canonical restaurant URLs, in first-seen order
    pub fn filter<S: AsRef<str>>(&self, urls: &[S]) -> Vec<String> {
        ::log::debug!("Filtering {} links for restaurant URLs", urls.len());
        let mut seen = HashSet::new();
        let mut restaurants = Vec::new();

        for url in urls {
            if let Some(canonical) = self.canonicalize(url.as_ref()) {
                if seen.insert(canonical.clone()) {
                    ::log::debug!("Matched restaurant URL: {}", canonical);
                    restaurants.push(canonical);
                }
            }
        }

        ::log::debug!(
            "Total restaurant URLs after filtering: {}",
            restaurants.len()
        );
        restaurants
    }
}

/// Host part of a base URL
pub fn domain_of(base_url: &str) -> Result<String, CaptureError> {
    let parsed = Url::parse(base_url).map_err(|e| CaptureError::InvalidBaseUrl {
        url: base_url.to_string(),
        reason: e.to_string(),
    })?;

    parsed
        .host_str()
        .map(|h| h.to_string())
        .ok_or_else(|| CaptureError::InvalidBaseUrl {
            url: base_url.to_string(),
            reason: "URL has no host".to_string(),
        })
}
