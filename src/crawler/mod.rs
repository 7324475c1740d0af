//! Crawler module for directory harvesting
//!
//! This module contains the crawl-and-extract pipeline:
//! - Page fetching behind the `PageFetcher` seam
//! - Navigation index discovery on the landing page
//! - Listing page crawling and supplier detail extraction
//! - Pagination walking and overall run coordination

mod coordinator;
mod detail;
mod discovery;
mod fetcher;
mod listing;
mod parser;
mod walker;

#[cfg(test)]
pub(crate) mod mock;

pub use coordinator::{run_harvest, Harvester};
pub use detail::{extract_record, fetch_record, ContactKind, ExtractionError};
pub use discovery::discover_listing_roots;
pub use fetcher::{
    build_http_client, format_user_agent, is_parseable_content_type, FetchError, FetchedPage,
    HttpFetcher, PageFetcher,
};
pub use listing::{list_entities, parse_listing_page, ListingPage};
pub use parser::{element_text, resolve_link, PageSelectors};
pub use walker::{PaginationWalker, WalkReport};
