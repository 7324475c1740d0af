//! Supplier-Harvest main entry point
//!
//! This is the command-line interface for the supplier directory harvester.

use anyhow::Context;
use clap::Parser;
use std::path::PathBuf;
use std::time::Instant;
use supplier_harvest::config::{load_config_with_hash, validate, Config};
use supplier_harvest::output::print_summary;
use supplier_harvest::Harvester;
use tracing_subscriber::EnvFilter;

/// Supplier-Harvest: a business directory crawler
///
/// Walks the directory's alphabetical index, follows every listing's
/// pagination, extracts one contact record per supplier and exports the
/// collection sorted by company name.
#[derive(Parser, Debug)]
#[command(name = "supplier-harvest")]
#[command(version)]
#[command(about = "Harvests supplier contact details from a business directory", long_about = None)]
struct Cli {
    /// Path to TOML configuration file (defaults to the G-Cloud directory)
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Increase logging verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Suppress non-error output
    #[arg(short, long, conflicts_with = "verbose")]
    quiet: bool,

    /// Validate config and show what would be harvested without fetching anything
    #[arg(long)]
    dry_run: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    setup_logging(cli.verbose, cli.quiet);

    let (config, config_hash) = match &cli.config {
        Some(path) => {
            tracing::info!("Loading configuration from: {}", path.display());
            let (config, hash) = load_config_with_hash(path)
                .with_context(|| format!("Failed to load configuration from {}", path.display()))?;
            tracing::info!("Configuration loaded successfully (hash: {})", hash);
            (config, Some(hash))
        }
        None => {
            let config = Config::default();
            validate(&config).context("Built-in configuration is invalid")?;
            (config, None)
        }
    };

    if cli.dry_run {
        handle_dry_run(&config);
        return Ok(());
    }

    handle_harvest(config, config_hash, cli.quiet).await
}

/// Sets up the logging/tracing subscriber based on verbosity level
fn setup_logging(verbose: u8, quiet: bool) {
    let filter = if quiet {
        EnvFilter::new("error")
    } else {
        match verbose {
            0 => EnvFilter::new("supplier_harvest=info,warn"),
            1 => EnvFilter::new("supplier_harvest=debug,info"),
            2 => EnvFilter::new("supplier_harvest=trace,debug"),
            _ => EnvFilter::new("trace"),
        }
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .init();
}

/// Handles the --dry-run mode: shows the effective configuration
fn handle_dry_run(config: &Config) {
    println!("=== Supplier-Harvest Dry Run ===\n");

    println!("Directory:");
    println!("  Name: {}", config.directory.name);
    println!("  Root URL: {}", config.directory.root_url);

    println!("\nSelectors:");
    println!("  Navigation: {}", config.selectors.navigation);
    println!("  Result title: {}", config.selectors.result_title);
    println!("  Next page: {}", config.selectors.next_page);
    println!("  Heading: {}", config.selectors.heading);
    println!("  Description: {}", config.selectors.description);
    println!("  Contact name: {}", config.selectors.contact_name);
    println!(
        "  Contact blocks: {} (type in [{}])",
        config.selectors.contact_block, config.selectors.contact_type_attribute
    );

    println!("\nCrawler:");
    println!(
        "  Max pages per listing: {}",
        config.crawler.max_pages_per_listing
    );
    println!("  Request timeout: {}s", config.crawler.request_timeout_secs);
    println!("  Connect timeout: {}s", config.crawler.connect_timeout_secs);

    println!("\nUser Agent:");
    println!("  Name: {}", config.user_agent.crawler_name);
    println!("  Version: {}", config.user_agent.crawler_version);
    println!("  Contact URL: {}", config.user_agent.contact_url);
    println!("  Contact Email: {}", config.user_agent.contact_email);

    println!("\nOutput:");
    println!("  Records: {}", config.output_path().display());
    println!("  Summary: {}", config.summary_path().display());

    println!("\n✓ Configuration is valid");
}

/// Handles the main harvest operation
async fn handle_harvest(
    config: Config,
    config_hash: Option<String>,
    quiet: bool,
) -> anyhow::Result<()> {
    let started = Instant::now();

    let mut harvester = Harvester::new(config).context("Failed to set up harvester")?;
    if let Some(hash) = config_hash {
        harvester = harvester.with_config_hash(hash);
    }

    let summary = match harvester.run().await {
        Ok(summary) => summary,
        Err(e) => {
            tracing::error!("Harvest failed: {}", e);
            return Err(e.into());
        }
    };

    if !quiet {
        print_summary(&summary);
    }
    tracing::info!("Time to complete: {:.2?}", started.elapsed());

    Ok(())
}
