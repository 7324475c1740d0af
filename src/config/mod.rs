//! Configuration module for Supplier-Harvest
//!
//! This module handles loading, parsing, and validating TOML configuration files.
//! Every key is optional; an absent file means the built-in G-Cloud defaults.
//!
//! # Example
//!
//! ```no_run
//! use supplier_harvest::config::load_config;
//! use std::path::Path;
//!
//! let config = load_config(Path::new("harvest.toml")).unwrap();
//! println!("Writing to: {}", config.output_path().display());
//! ```

mod parser;
mod types;
mod validation;

// Re-export types
pub use types::{
    Config, CrawlerConfig, DirectoryConfig, OutputConfig, OutputFormat, SelectorConfig,
    UserAgentConfig, DEFAULT_ROOT_URL,
};

// Re-export parser functions
pub use parser::{compute_config_hash, load_config, load_config_with_hash, parse_config};
pub use validation::validate;
