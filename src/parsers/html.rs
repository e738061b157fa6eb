use scraper::{Html, Selector};
use std::collections::HashSet;

/// Anchors whose target is a phone number
const TEL_LINKS: &str = r#"a[href^="tel:"], a[href^="TEL:"], a[href^="Tel:"]"#;

/// Extracts the phone numbers behind `tel:` links, in page order and without duplicates
pub fn phone_numbers(html: &str) -> Vec<String> {
    let doc = Html::parse_document(html);
    let Ok(selector) = Selector::parse(TEL_LINKS) else {
        return Vec::new();
    };

    let mut seen = HashSet::new();
    let numbers = doc
        .select(&selector)
        .filter_map(|e| e.value().attr("href"))
        .filter_map(strip_tel_scheme)
        .filter(|number| seen.insert(number.clone()))
        .collect::<Vec<String>>();

    ::log::debug!("HTML parser found {} phone numbers", numbers.len());
    numbers
}

/// `tel:+91 80 1234 5678` becomes `+91 80 1234 5678`
fn strip_tel_scheme(href: &str) -> Option<String> {
    let (scheme, number) = href.split_once(':')?;
    if !scheme.eq_ignore_ascii_case("tel") {
        return None;
    }

    let number = number.replace("%20", " ");
    let number = number.trim();
    if number.is_empty() {
        None
    } else {
        Some(number.to_string())
    }
}

