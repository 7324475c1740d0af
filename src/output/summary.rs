//! Run summary
//!
//! Aggregates the per-listing walk reports into one set of counters for the
//! end-of-run console report and the markdown summary file.

use crate::crawler::WalkReport;
use chrono::{DateTime, Utc};
use std::path::PathBuf;

/// Summary of one harvest run
#[derive(Debug, Clone)]
pub struct CrawlSummary {
    pub directory_name: String,
    pub root_url: String,
    /// SHA-256 of the configuration file, when one was loaded
    pub config_hash: Option<String>,
    pub started_at: DateTime<Utc>,
    pub finished_at: Option<DateTime<Utc>>,

    /// Listing roots found in the navigation index
    pub listing_roots: usize,
    /// Chains walked, including the landing page's own listing
    pub listings_walked: usize,
    pub pages_visited: usize,
    pub pages_failed: usize,
    pub listings_truncated: usize,
    pub cycles_detected: usize,

    pub entities_attempted: usize,
    pub records_extracted: usize,
    pub skipped_missing_name: usize,
    pub skipped_fetch_failed: usize,
    /// Records left after name de-duplication
    pub unique_records: usize,

    pub output_path: Option<PathBuf>,
}

impl CrawlSummary {
    /// Starts a summary, stamping the start time
    pub fn new(directory_name: &str, root_url: &str) -> Self {
        Self {
            directory_name: directory_name.to_string(),
            root_url: root_url.to_string(),
            config_hash: None,
            started_at: Utc::now(),
            finished_at: None,
            listing_roots: 0,
            listings_walked: 0,
            pages_visited: 0,
            pages_failed: 0,
            listings_truncated: 0,
            cycles_detected: 0,
            entities_attempted: 0,
            records_extracted: 0,
            skipped_missing_name: 0,
            skipped_fetch_failed: 0,
            unique_records: 0,
            output_path: None,
        }
    }

    /// Adds one listing chain's counters
    pub fn absorb(&mut self, report: &WalkReport) {
        self.listings_walked += 1;
        self.pages_visited += report.pages_visited;
        self.pages_failed += report.pages_failed;
        self.listings_truncated += usize::from(report.truncated_by_limit);
        self.cycles_detected += usize::from(report.cycle_detected);
        self.entities_attempted += report.entities_attempted;
        self.records_extracted += report.records_extracted;
        self.skipped_missing_name += report.skipped_missing_name;
        self.skipped_fetch_failed += report.skipped_fetch_failed;
    }

    pub fn entities_skipped(&self) -> usize {
        self.skipped_missing_name + self.skipped_fetch_failed
    }

    /// Extracted records that were replaced by a later one with the same name
    pub fn duplicates_replaced(&self) -> usize {
        self.records_extracted.saturating_sub(self.unique_records)
    }

    /// Stamps the finish time
    pub fn finish(&mut self) {
        self.finished_at = Some(Utc::now());
    }

    /// Wall-clock duration, once the run has finished
    pub fn duration(&self) -> Option<chrono::Duration> {
        self.finished_at.map(|finished| finished - self.started_at)
    }

    /// Percentage of attempted suppliers that produced a record
    pub fn success_rate(&self) -> f64 {
        if self.entities_attempted == 0 {
            0.0
        } else {
            (self.records_extracted as f64 / self.entities_attempted as f64) * 100.0
        }
    }
}

/// Prints the summary to stdout
pub fn print_summary(summary: &CrawlSummary) {
    println!("=== Harvest Summary: {} ===\n", summary.directory_name);

    println!("Listings:");
    println!("  Listing roots discovered: {}", summary.listing_roots);
    println!("  Listings walked: {}", summary.listings_walked);
    println!("  Pages visited: {}", summary.pages_visited);
    println!("  Pages failed: {}", summary.pages_failed);
    if summary.listings_truncated > 0 {
        println!("  Stopped at page limit: {}", summary.listings_truncated);
    }
    if summary.cycles_detected > 0 {
        println!("  Pagination cycles: {}", summary.cycles_detected);
    }
    println!();

    println!("Suppliers:");
    println!("  Attempted: {}", summary.entities_attempted);
    println!(
        "  Extracted: {} ({:.1}%)",
        summary.records_extracted,
        summary.success_rate()
    );
    println!("  Skipped (no name): {}", summary.skipped_missing_name);
    println!("  Skipped (fetch failed): {}", summary.skipped_fetch_failed);
    println!("  Unique records: {}", summary.unique_records);
    println!();

    if let Some(path) = &summary.output_path {
        println!("Output: {}", path.display());
    }
}
