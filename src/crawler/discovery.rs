//! Navigation index discovery
//!
//! The landing page carries one navigation container with a link per
//! alphabetical bucket. Each link is the root of one listing.

use crate::crawler::parser::{element_link, PageSelectors};
use crate::HarvestError;
use scraper::Html;
use url::Url;

/// Collects the listing-root URLs from the landing page's navigation index
///
/// Links are returned in document order without deduplication. Anchors
/// whose `href` does not resolve to an http(s) URL are skipped.
///
/// # Returns
///
/// * `Ok(Vec<Url>)` - Listing roots, possibly empty
/// * `Err(HarvestError::NavigationMissing)` - No navigation container on the page
pub fn discover_listing_roots(
    document: &Html,
    page_url: &Url,
    selectors: &PageSelectors,
) -> Result<Vec<Url>, HarvestError> {
    let navigation = document
        .select(&selectors.navigation)
        .next()
        .ok_or_else(|| HarvestError::NavigationMissing {
            url: page_url.to_string(),
        })?;

    let mut roots = Vec::new();
    for anchor in navigation.select(&selectors.link) {
        match element_link(anchor, &selectors.link, page_url) {
            Some(url) => roots.push(url),
            None => tracing::debug!(
                "Skipping navigation link without a usable href: {:?}",
                anchor.value().attr("href")
            ),
        }
    }

    Ok(roots)
}
