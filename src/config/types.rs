use serde::Deserialize;

/// Landing page of the G-Cloud supplier directory
pub const DEFAULT_ROOT_URL: &str = "https://www.digitalmarketplace.service.gov.uk/g-cloud/suppliers";

/// Main configuration structure for Supplier-Harvest
///
/// Every section has defaults describing the G-Cloud supplier directory, so
/// `Config::default()` is a complete, valid configuration.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub directory: DirectoryConfig,
    #[serde(default)]
    pub selectors: SelectorConfig,
    #[serde(default)]
    pub crawler: CrawlerConfig,
    #[serde(rename = "user-agent", default)]
    pub user_agent: UserAgentConfig,
    #[serde(default)]
    pub output: OutputConfig,
}

/// The directory being harvested
#[derive(Debug, Clone, Deserialize)]
pub struct DirectoryConfig {
    /// Human name of the directory, used in the output filename
    #[serde(default = "default_directory_name")]
    pub name: String,

    /// Landing page carrying the navigation index
    #[serde(rename = "root-url", default = "default_root_url")]
    pub root_url: String,
}

impl Default for DirectoryConfig {
    fn default() -> Self {
        Self {
            name: default_directory_name(),
            root_url: default_root_url(),
        }
    }
}

/// CSS selectors for the structural markers of the directory markup
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "kebab-case", default)]
pub struct SelectorConfig {
    /// Container holding the alphabetical navigation links
    pub navigation: String,

    /// Result-row title element wrapping each supplier link
    pub result_title: String,

    /// Pagination "next" control
    pub next_page: String,

    /// Primary heading holding the supplier name
    pub heading: String,

    /// Optional supplier description block
    pub description: String,

    /// Optional contact name element
    pub contact_name: String,

    /// Contact detail blocks; the first one is a label and carries no data
    pub contact_block: String,

    /// Attribute on a block's first span that names the contact type
    pub contact_type_attribute: String,
}

impl Default for SelectorConfig {
    fn default() -> Self {
        Self {
            navigation: "#global-atoz-navigation".to_string(),
            result_title: ".search-result-title".to_string(),
            next_page: ".next".to_string(),
            heading: "#content > header > h1".to_string(),
            description: "p.supplier-description".to_string(),
            contact_name: "#meta > div > p:nth-child(2) > span > span".to_string(),
            contact_block: ".contact-details-block".to_string(),
            contact_type_attribute: "itemprop".to_string(),
        }
    }
}

/// Crawler behavior configuration
#[derive(Debug, Clone, Deserialize)]
pub struct CrawlerConfig {
    /// Maximum number of pages visited along one listing's pagination chain
    #[serde(rename = "max-pages-per-listing", default = "default_max_pages")]
    pub max_pages_per_listing: u32,

    /// Whole-request timeout (seconds)
    #[serde(rename = "request-timeout-secs", default = "default_request_timeout")]
    pub request_timeout_secs: u64,

    /// Connection establishment timeout (seconds)
    #[serde(rename = "connect-timeout-secs", default = "default_connect_timeout")]
    pub connect_timeout_secs: u64,
}

impl Default for CrawlerConfig {
    fn default() -> Self {
        Self {
            max_pages_per_listing: default_max_pages(),
            request_timeout_secs: default_request_timeout(),
            connect_timeout_secs: default_connect_timeout(),
        }
    }
}

/// User agent identification configuration
#[derive(Debug, Clone, Deserialize)]
pub struct UserAgentConfig {
    /// Name of the crawler
    #[serde(rename = "crawler-name")]
    pub crawler_name: String,

    /// Version of the crawler
    #[serde(rename = "crawler-version")]
    pub crawler_version: String,

    /// URL with information about the crawler
    #[serde(rename = "contact-url")]
    pub contact_url: String,

    /// Email address for crawler-related contact
    #[serde(rename = "contact-email")]
    pub contact_email: String,
}

impl Default for UserAgentConfig {
    fn default() -> Self {
        Self {
            crawler_name: "SupplierHarvest".to_string(),
            crawler_version: env!("CARGO_PKG_VERSION").to_string(),
            contact_url: "https://github.com/supplier-harvest/supplier-harvest".to_string(),
            contact_email: "supplier-harvest@example.com".to_string(),
        }
    }
}

/// Spreadsheet file format
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Xlsx,
    Csv,
}

impl OutputFormat {
    /// File extension for this format
    pub fn extension(&self) -> &'static str {
        match self {
            Self::Xlsx => "xlsx",
            Self::Csv => "csv",
        }
    }
}

/// Output configuration
#[derive(Debug, Clone, Deserialize)]
pub struct OutputConfig {
    /// Directory the spreadsheet is written into
    #[serde(default = "default_output_directory")]
    pub directory: String,

    /// Spreadsheet format
    #[serde(default)]
    pub format: OutputFormat,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            directory: default_output_directory(),
            format: OutputFormat::default(),
        }
    }
}

impl Config {
    /// Path of the exported spreadsheet: `<dir>/<name>-Suppliers-List.<ext>`
    pub fn output_path(&self) -> std::path::PathBuf {
        std::path::Path::new(&self.output.directory).join(format!(
            "{}-Suppliers-List.{}",
            self.directory.name,
            self.output.format.extension()
        ))
    }

    /// Path of the markdown run summary written next to the spreadsheet
    pub fn summary_path(&self) -> std::path::PathBuf {
        std::path::Path::new(&self.output.directory)
            .join(format!("{}-Harvest-Summary.md", self.directory.name))
    }
}

fn default_directory_name() -> String {
    "G-Cloud".to_string()
}

fn default_root_url() -> String {
    DEFAULT_ROOT_URL.to_string()
}

fn default_max_pages() -> u32 {
    10_000
}

fn default_request_timeout() -> u64 {
    30
}

fn default_connect_timeout() -> u64 {
    10
}

fn default_output_directory() -> String {
    "output".to_string()
}
