//! Pagination walker
//!
//! Drives one listing root through its "next page" chain, extracting every
//! supplier on every page into the record store. The chain is walked with an
//! explicit state loop, so its length does not grow the stack.
//!
//! Failure containment:
//! - A supplier that cannot be fetched or has no name is skipped
//! - A listing page that cannot be fetched ends this chain only
//! - Nothing propagates to the caller

use crate::crawler::detail::{fetch_record, ExtractionError};
use crate::crawler::fetcher::PageFetcher;
use crate::crawler::listing::{list_entities, ListingPage};
use crate::crawler::parser::PageSelectors;
use crate::state::WalkState;
use crate::store::RecordStore;
use std::collections::HashSet;
use url::Url;

/// Counters for one walked listing chain
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WalkReport {
    /// Listing pages fetched and parsed
    pub pages_visited: usize,
    /// Listing pages whose fetch failed (at most one per chain)
    pub pages_failed: usize,
    pub entities_attempted: usize,
    pub records_extracted: usize,
    pub skipped_missing_name: usize,
    pub skipped_fetch_failed: usize,
    /// The chain still had a next page when the page limit was reached
    pub truncated_by_limit: bool,
    /// A next link pointed back at a page already visited in this chain
    pub cycle_detected: bool,
}

impl WalkReport {
    pub fn entities_skipped(&self) -> usize {
        self.skipped_missing_name + self.skipped_fetch_failed
    }
}

/// Walks listing pagination chains into a [`RecordStore`]
pub struct PaginationWalker<'a, F> {
    fetcher: &'a F,
    selectors: &'a PageSelectors,
    max_pages: usize,
}

impl<'a, F: PageFetcher> PaginationWalker<'a, F> {
    /// Creates a walker that visits at most `max_pages` pages per chain
    pub fn new(fetcher: &'a F, selectors: &'a PageSelectors, max_pages: u32) -> Self {
        Self {
            fetcher,
            selectors,
            max_pages: max_pages.max(1) as usize,
        }
    }

    /// Walks the chain starting at `first_page`
    pub async fn walk(&self, first_page: &Url, store: &mut RecordStore) -> WalkReport {
        self.run(first_page.clone(), None, store).await
    }

    /// Walks a chain whose first page has already been fetched and parsed
    pub async fn walk_from(&self, first_page: ListingPage, store: &mut RecordStore) -> WalkReport {
        self.run(first_page.url.clone(), Some(first_page), store).await
    }

    async fn run(
        &self,
        start: Url,
        prefetched: Option<ListingPage>,
        store: &mut RecordStore,
    ) -> WalkReport {
        let mut report = WalkReport::default();
        let mut visited: HashSet<Url> = HashSet::new();
        let mut current_url = start;
        let mut current_page = prefetched;

        let mut state = if current_page.is_some() {
            visited.insert(current_url.clone());
            report.pages_visited = 1;
            WalkState::ExtractEach
        } else {
            WalkState::FetchPage
        };

        while !state.is_terminal() {
            let next = match state {
                WalkState::FetchPage => {
                    visited.insert(current_url.clone());
                    match list_entities(self.fetcher, self.selectors, &current_url).await {
                        Ok(page) => {
                            report.pages_visited += 1;
                            visited.insert(page.url.clone());
                            current_page = Some(page);
                            WalkState::ExtractEach
                        }
                        Err(e) => {
                            tracing::warn!(
                                "Listing page {} failed, abandoning the rest of this listing: {}",
                                current_url,
                                e
                            );
                            report.pages_failed += 1;
                            WalkState::Done
                        }
                    }
                }

                WalkState::ExtractEach => {
                    if let Some(page) = &current_page {
                        self.extract_all(&page.entities, store, &mut report).await;
                    }
                    tracing::info!("Supplier details have been fetched for {}", current_url);
                    WalkState::Advance
                }

                WalkState::Advance => match current_page.take().and_then(|page| page.next) {
                    None => WalkState::Done,
                    Some(next_url) if visited.contains(&next_url) => {
                        tracing::warn!(
                            "Next page {} was already visited from this listing, stopping",
                            next_url
                        );
                        report.cycle_detected = true;
                        WalkState::Done
                    }
                    Some(next_url) if report.pages_visited >= self.max_pages => {
                        tracing::warn!(
                            "Page limit of {} reached before {}, stopping this listing",
                            self.max_pages,
                            next_url
                        );
                        report.truncated_by_limit = true;
                        WalkState::Done
                    }
                    Some(next_url) => {
                        current_url = next_url;
                        WalkState::FetchPage
                    }
                },

                WalkState::Done => break,
            };

            debug_assert!(
                state.can_transition_to(next),
                "illegal walk transition {} -> {}",
                state,
                next
            );
            tracing::trace!("Walk state {} -> {}", state, next);
            state = next;
        }

        report
    }

    /// Extracts each supplier in order, skipping the ones that fail
    async fn extract_all(&self, entities: &[Url], store: &mut RecordStore, report: &mut WalkReport) {
        for entity_url in entities {
            report.entities_attempted += 1;

            match fetch_record(self.fetcher, self.selectors, entity_url).await {
                Ok(record) => {
                    report.records_extracted += 1;
                    let name = record.name.clone();
                    if store.upsert(name, record).is_some() {
                        tracing::debug!("Replaced earlier record from {}", entity_url);
                    }
                }
                Err(ExtractionError::MissingName { url }) => {
                    tracing::warn!("Skipping supplier without a name: {}", url);
                    report.skipped_missing_name += 1;
                }
                Err(ExtractionError::Fetch(e)) => {
                    tracing::warn!("Skipping supplier {}: {}", e.url(), e);
                    report.skipped_fetch_failed += 1;
                }
            }
        }
    }
}
