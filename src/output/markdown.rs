//! Markdown summary generation
//!
//! Writes a human-readable report of a harvest run next to the spreadsheet.

use crate::output::summary::CrawlSummary;
use crate::output::traits::{ensure_parent_dir, ExportResult};
use std::fs::File;
use std::io::Write;
use std::path::Path;

/// Writes the markdown summary of a run
///
/// # Arguments
///
/// * `summary` - The run summary
/// * `output_path` - Path where the markdown file should be written
///
/// # Returns
///
/// * `Ok(())` - Successfully wrote markdown summary
/// * `Err(ExportError)` - Failed to write summary
pub fn write_markdown_summary(summary: &CrawlSummary, output_path: &Path) -> ExportResult<()> {
    ensure_parent_dir(output_path)?;

    let markdown = format_markdown_summary(summary);
    let mut file = File::create(output_path)?;
    file.write_all(markdown.as_bytes())?;

    Ok(())
}

/// Formats a run summary as markdown
pub fn format_markdown_summary(summary: &CrawlSummary) -> String {
    let mut md = String::new();

    md.push_str(&format!("# {} Harvest Summary\n\n", summary.directory_name));

    md.push_str("## Run Information\n\n");
    md.push_str(&format!("- **Root URL**: {}\n", summary.root_url));
    md.push_str(&format!("- **Started**: {}\n", summary.started_at.to_rfc3339()));
    if let Some(finished) = &summary.finished_at {
        md.push_str(&format!("- **Finished**: {}\n", finished.to_rfc3339()));
    }
    if let Some(duration) = summary.duration() {
        let seconds = duration.num_seconds();
        md.push_str(&format!(
            "- **Duration**: {} seconds ({:.2} minutes)\n",
            seconds,
            seconds as f64 / 60.0
        ));
    }
    if let Some(hash) = &summary.config_hash {
        md.push_str(&format!("- **Config Hash**: {}\n", hash));
    }
    if let Some(path) = &summary.output_path {
        md.push_str(&format!("- **Output**: {}\n", path.display()));
    }
    md.push('\n');

    md.push_str("## Listings\n\n");
    md.push_str("| Metric | Count |\n");
    md.push_str("|--------|-------|\n");
    md.push_str(&format!("| Listing roots | {} |\n", summary.listing_roots));
    md.push_str(&format!("| Listings walked | {} |\n", summary.listings_walked));
    md.push_str(&format!("| Pages visited | {} |\n", summary.pages_visited));
    md.push_str(&format!("| Pages failed | {} |\n", summary.pages_failed));
    md.push_str(&format!(
        "| Stopped at page limit | {} |\n",
        summary.listings_truncated
    ));
    md.push_str(&format!(
        "| Pagination cycles | {} |\n\n",
        summary.cycles_detected
    ));

    md.push_str("## Suppliers\n\n");
    md.push_str("| Metric | Count |\n");
    md.push_str("|--------|-------|\n");
    md.push_str(&format!("| Attempted | {} |\n", summary.entities_attempted));
    md.push_str(&format!("| Extracted | {} |\n", summary.records_extracted));
    md.push_str(&format!(
        "| Skipped (no name) | {} |\n",
        summary.skipped_missing_name
    ));
    md.push_str(&format!(
        "| Skipped (fetch failed) | {} |\n",
        summary.skipped_fetch_failed
    ));
    md.push_str(&format!(
        "| Replaced by same name | {} |\n",
        summary.duplicates_replaced()
    ));
    md.push_str(&format!("| Unique records | {} |\n\n", summary.unique_records));

    md.push_str(&format!(
        "**Success Rate**: {:.2}%\n",
        summary.success_rate()
    ));

    md
}
