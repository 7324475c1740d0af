//! Listing page crawling
//!
//! A listing page holds one result row per supplier plus an optional
//! pagination control pointing at the next page.

use crate::crawler::fetcher::{FetchError, PageFetcher};
use crate::crawler::parser::{element_link, PageSelectors};
use scraper::Html;
use url::Url;

/// What one listing page yields: supplier links and the next page, if any
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListingPage {
    /// URL the page was served from
    pub url: Url,
    /// Supplier detail-page URLs in document order
    pub entities: Vec<Url>,
    pub next: Option<Url>,
}

/// Extracts supplier links and the next-page link from a listing document
///
/// Result rows without a resolvable link are skipped.
pub fn parse_listing_page(document: &Html, page_url: &Url, selectors: &PageSelectors) -> ListingPage {
    let entities = document
        .select(&selectors.result_title)
        .filter_map(|title| element_link(title, &selectors.link, page_url))
        .collect();

    let next = document
        .select(&selectors.next_page)
        .next()
        .and_then(|control| element_link(control, &selectors.link, page_url));

    ListingPage {
        url: page_url.clone(),
        entities,
        next,
    }
}

/// Fetches a listing page and extracts its supplier links
///
/// # Returns
///
/// * `Ok(ListingPage)` - The page's supplier links and next-page link
/// * `Err(FetchError)` - The listing page itself could not be retrieved
pub async fn list_entities<F: PageFetcher>(
    fetcher: &F,
    selectors: &PageSelectors,
    page_url: &Url,
) -> Result<ListingPage, FetchError> {
    tracing::info!("Fetching supplier URLs for page {}", page_url);

    let page = fetcher.fetch(page_url).await?;
    let document = page.document();
    Ok(parse_listing_page(&document, &page.url, selectors))
}
