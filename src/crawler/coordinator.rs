//! Harvest coordinator - main crawl orchestration logic
//!
//! This module runs the whole pipeline:
//! - Fetching the landing page and discovering the listing roots
//! - Walking the landing page's own listing, then every discovered root
//! - Exporting the sorted records and writing the run summary

use crate::config::{validate, Config};
use crate::crawler::discovery::discover_listing_roots;
use crate::crawler::fetcher::{HttpFetcher, PageFetcher};
use crate::crawler::listing::parse_listing_page;
use crate::crawler::parser::PageSelectors;
use crate::crawler::walker::PaginationWalker;
use crate::output::{exporter_for, write_markdown_summary, CrawlSummary};
use crate::store::RecordStore;
use crate::{ConfigError, HarvestError};
use url::Url;

/// Main harvest coordinator
pub struct Harvester<F = HttpFetcher> {
    config: Config,
    selectors: PageSelectors,
    fetcher: F,
    config_hash: Option<String>,
}

impl Harvester<HttpFetcher> {
    /// Creates a harvester that fetches over HTTP
    ///
    /// # Returns
    ///
    /// * `Ok(Harvester)` - Configuration is valid and the client was built
    /// * `Err(HarvestError)` - Invalid configuration or HTTP client failure
    pub fn new(config: Config) -> Result<Self, HarvestError> {
        let fetcher = HttpFetcher::from_config(&config.user_agent, &config.crawler)?;
        Self::with_fetcher(config, fetcher)
    }
}

impl<F: PageFetcher> Harvester<F> {
    /// Creates a harvester over any page fetcher
    pub fn with_fetcher(config: Config, fetcher: F) -> Result<Self, HarvestError> {
        validate(&config)?;
        let selectors = PageSelectors::compile(&config.selectors)?;

        Ok(Self {
            config,
            selectors,
            fetcher,
            config_hash: None,
        })
    }

    /// Records the hash of the configuration file for the run summary
    pub fn with_config_hash(mut self, hash: impl Into<String>) -> Self {
        self.config_hash = Some(hash.into());
        self
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Runs the crawl phase and returns the collected records
    ///
    /// Only a landing page that cannot be fetched or has no navigation index
    /// fails the crawl; every other failure is logged, counted and skipped.
    pub async fn crawl(&self) -> Result<(RecordStore, CrawlSummary), HarvestError> {
        let mut summary = CrawlSummary::new(&self.config.directory.name, &self.config.directory.root_url);
        summary.config_hash = self.config_hash.clone();

        let root_url = Url::parse(&self.config.directory.root_url).map_err(|e| {
            ConfigError::InvalidUrl(format!("Invalid root-url '{}': {}", self.config.directory.root_url, e))
        })?;

        tracing::info!("Fetching navigation URLs from {}", root_url);
        let root_page = self.fetcher.fetch(&root_url).await?;

        let (listing_roots, root_listing) = {
            let document = root_page.document();
            let roots = discover_listing_roots(&document, &root_page.url, &self.selectors)?;
            let listing = parse_listing_page(&document, &root_page.url, &self.selectors);
            (roots, listing)
        };
        tracing::info!(
            "Navigation URLs have been collected: {} listings",
            listing_roots.len()
        );
        summary.listing_roots = listing_roots.len();

        let walker = PaginationWalker::new(
            &self.fetcher,
            &self.selectors,
            self.config.crawler.max_pages_per_listing,
        );
        let mut store = RecordStore::new();

        // The landing page is itself the first page of a listing
        let report = walker.walk_from(root_listing, &mut store).await;
        summary.absorb(&report);

        let total = listing_roots.len();
        for (index, listing_url) in listing_roots.iter().enumerate() {
            tracing::info!("Walking listing {}/{}: {}", index + 1, total, listing_url);
            let report = walker.walk(listing_url, &mut store).await;
            summary.absorb(&report);
        }

        summary.unique_records = store.len();
        summary.finish();

        tracing::info!(
            "All supplier details have been fetched: {} unique records, {} skipped",
            summary.unique_records,
            summary.entities_skipped()
        );

        Ok((store, summary))
    }

    /// Runs the full pipeline: crawl, export, then write the run summary
    pub async fn run(&self) -> Result<CrawlSummary, HarvestError> {
        let (store, mut summary) = self.crawl().await?;

        let output_path = self.config.output_path();
        tracing::info!("Creating spreadsheet {}", output_path.display());

        let records = store.into_sorted();
        exporter_for(self.config.output.format).export(&records, &output_path)?;
        tracing::info!(
            "{} written successfully ({} rows)",
            output_path.display(),
            records.len()
        );
        summary.output_path = Some(output_path);

        let summary_path = self.config.summary_path();
        write_markdown_summary(&summary, &summary_path)?;
        tracing::debug!("Run summary written to {}", summary_path.display());

        Ok(summary)
    }
}

/// Runs the crawl-then-export pipeline over HTTP
///
/// # Example
///
/// ```no_run
/// use supplier_harvest::config::Config;
/// use supplier_harvest::crawler::run_harvest;
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let summary = run_harvest(Config::default()).await?;
/// println!("{} suppliers exported", summary.unique_records);
/// # Ok(())
/// # }
/// ```
pub async fn run_harvest(config: Config) -> Result<CrawlSummary, HarvestError> {
    Harvester::new(config)?.run().await
}
