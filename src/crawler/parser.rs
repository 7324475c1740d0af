//! Shared HTML helpers for the directory extractors
//!
//! This module handles:
//! - Compiling the configured structural markers into CSS selectors
//! - Reading an element's visible text
//! - Resolving `href` values against the page URL

use crate::config::SelectorConfig;
use crate::ConfigError;
use scraper::{ElementRef, Selector};
use url::Url;

/// Compiled selectors for every structural marker the extractors rely on
#[derive(Debug, Clone)]
pub struct PageSelectors {
    pub navigation: Selector,
    pub result_title: Selector,
    pub next_page: Selector,
    pub heading: Selector,
    pub description: Selector,
    pub contact_name: Selector,
    pub contact_block: Selector,
    /// Attribute naming a contact block's type (`telephone`, `email`)
    pub contact_type_attribute: String,
    pub(crate) link: Selector,
    pub(crate) span: Selector,
}

impl PageSelectors {
    /// Compiles the configured selectors
    ///
    /// # Returns
    ///
    /// * `Ok(PageSelectors)` - Every selector compiled
    /// * `Err(ConfigError::InvalidSelector)` - The first selector that failed
    pub fn compile(config: &SelectorConfig) -> Result<Self, ConfigError> {
        if config.contact_type_attribute.trim().is_empty() {
            return Err(ConfigError::Validation(
                "contact-type-attribute cannot be empty".to_string(),
            ));
        }

        Ok(Self {
            navigation: parse_selector("navigation", &config.navigation)?,
            result_title: parse_selector("result-title", &config.result_title)?,
            next_page: parse_selector("next-page", &config.next_page)?,
            heading: parse_selector("heading", &config.heading)?,
            description: parse_selector("description", &config.description)?,
            contact_name: parse_selector("contact-name", &config.contact_name)?,
            contact_block: parse_selector("contact-block", &config.contact_block)?,
            contact_type_attribute: config.contact_type_attribute.clone(),
            link: parse_selector("link", "a[href]")?,
            span: parse_selector("span", "span")?,
        })
    }
}

fn parse_selector(field: &'static str, selector: &str) -> Result<Selector, ConfigError> {
    Selector::parse(selector).map_err(|_| ConfigError::InvalidSelector {
        field,
        selector: selector.to_string(),
    })
}

/// Returns the visible text of an element with whitespace runs collapsed
pub fn element_text(element: ElementRef<'_>) -> String {
    let raw: String = element.text().collect();
    raw.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Resolves the link carried by `element`
///
/// If the element is itself an anchor with an `href`, that is used; otherwise
/// the first `a[href]` inside it. Returns None when neither resolves to an
/// http(s) URL.
pub fn element_link(element: ElementRef<'_>, link: &Selector, base_url: &Url) -> Option<Url> {
    if element.value().name() == "a" {
        if let Some(href) = element.value().attr("href") {
            return resolve_link(href, base_url);
        }
    }

    element
        .select(link)
        .next()
        .and_then(|anchor| anchor.value().attr("href"))
        .and_then(|href| resolve_link(href, base_url))
}

/// Resolves a link href to an absolute URL and validates it
///
/// Returns None if the link should be excluded:
/// - javascript:, mailto:, tel: schemes
/// - data: URIs
/// - Fragment-only anchors
/// - Non-HTTP(S) URLs after resolution
pub fn resolve_link(href: &str, base_url: &Url) -> Option<Url> {
    let href = href.trim();

    if href.is_empty() || href.starts_with('#') {
        return None;
    }

    if href.starts_with("javascript:")
        || href.starts_with("mailto:")
        || href.starts_with("tel:")
        || href.starts_with("data:")
    {
        return None;
    }

    match base_url.join(href) {
        Ok(absolute_url) if matches!(absolute_url.scheme(), "http" | "https") => Some(absolute_url),
        _ => None,
    }
}
