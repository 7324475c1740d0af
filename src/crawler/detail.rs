//! Supplier detail page extraction
//!
//! A detail page yields exactly one [`Record`]. Only the name is mandatory;
//! every other field is left unset when its element is missing.

use crate::crawler::fetcher::{FetchError, PageFetcher};
use crate::crawler::parser::{element_text, PageSelectors};
use crate::store::Record;
use scraper::{ElementRef, Html, Selector};
use thiserror::Error;
use url::Url;

/// Errors that cause a single supplier to be skipped
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ExtractionError {
    #[error("No supplier name found on {url}")]
    MissingName { url: String },

    #[error(transparent)]
    Fetch(#[from] FetchError),
}

/// Type marker carried by a contact detail block
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContactKind {
    Telephone,
    Email,
    Other,
}

impl ContactKind {
    pub fn from_marker(marker: &str) -> Self {
        match marker.trim() {
            "telephone" => Self::Telephone,
            "email" => Self::Email,
            _ => Self::Other,
        }
    }
}

/// Extracts a supplier record from a parsed detail page
///
/// # Extraction Rules
///
/// | Field | Source | When absent |
/// |-------|--------|-------------|
/// | name | primary heading | `MissingName` error |
/// | description | description block | `None` |
/// | contact name | contact name element | `None` |
/// | telephone / email | contact blocks after the first, by type marker | `None` |
///
/// The first contact block is a label and is never read. Blocks with an
/// unrecognised marker are ignored. Contact values are accumulated over the
/// whole scan; when two blocks carry the same type, the later one wins.
pub fn extract_record(
    document: &Html,
    page_url: &Url,
    selectors: &PageSelectors,
) -> Result<Record, ExtractionError> {
    let name = first_text(document, &selectors.heading)
        .filter(|name| !name.is_empty())
        .ok_or_else(|| ExtractionError::MissingName {
            url: page_url.to_string(),
        })?;

    let description = first_text(document, &selectors.description);
    let contact_name = first_text(document, &selectors.contact_name);

    let mut contact_telephone = None;
    let mut contact_email = None;

    for block in document.select(&selectors.contact_block).skip(1) {
        match contact_kind(block, selectors) {
            ContactKind::Telephone => contact_telephone = Some(element_text(block)),
            ContactKind::Email => contact_email = Some(element_text(block)),
            ContactKind::Other => {}
        }
    }

    Ok(Record {
        name,
        contact_name,
        contact_telephone,
        contact_email,
        description,
    })
}

/// Fetches a supplier detail page and extracts its record
pub async fn fetch_record<F: PageFetcher>(
    fetcher: &F,
    selectors: &PageSelectors,
    entity_url: &Url,
) -> Result<Record, ExtractionError> {
    tracing::info!("Fetching supplier details for {}", entity_url);

    let page = fetcher.fetch(entity_url).await?;
    let document = page.document();
    extract_record(&document, &page.url, selectors)
}

fn first_text(document: &Html, selector: &Selector) -> Option<String> {
    document.select(selector).next().map(element_text)
}

/// Reads the type marker from the block's first span
fn contact_kind(block: ElementRef<'_>, selectors: &PageSelectors) -> ContactKind {
    block
        .select(&selectors.span)
        .next()
        .and_then(|span| span.value().attr(&selectors.contact_type_attribute))
        .map(ContactKind::from_marker)
        .unwrap_or(ContactKind::Other)
}
