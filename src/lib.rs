//! Supplier-Harvest: a business directory crawler
//!
//! This crate walks an alphabetical directory index, follows each listing's
//! pagination chain, extracts one contact record per supplier detail page and
//! exports the deduplicated, name-sorted collection as a spreadsheet.

pub mod config;
pub mod crawler;
pub mod output;
pub mod state;
pub mod store;

use thiserror::Error;

/// Main error type for Supplier-Harvest operations
///
/// Only the variants here are allowed to end a run. Failures local to one
/// listing page ([`crawler::FetchError`]) or one supplier
/// ([`crawler::ExtractionError`]) are contained by the walker.
#[derive(Debug, Error)]
pub enum HarvestError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Failed to fetch directory landing page: {0}")]
    RootFetch(#[from] crawler::FetchError),

    #[error("Navigation index not found on {url}")]
    NavigationMissing { url: String },

    #[error("Export failed: {0}")]
    Export(#[from] output::ExportError),

    #[error("HTTP client error: {0}")]
    HttpClient(#[from] reqwest::Error),
}

/// Configuration-specific errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse TOML: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Invalid URL in config: {0}")]
    InvalidUrl(String),

    #[error("Invalid selector '{selector}' for {field}")]
    InvalidSelector { field: &'static str, selector: String },
}

/// Result type alias for Supplier-Harvest operations
pub type Result<T> = std::result::Result<T, HarvestError>;

/// Result type alias for configuration operations
pub type ConfigResult<T> = std::result::Result<T, ConfigError>;

// Re-export commonly used types
pub use config::Config;
pub use crawler::{run_harvest, Harvester};
pub use store::{Record, RecordStore};
