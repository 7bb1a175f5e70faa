//! Configuration constants.
//!
//! This module defines the constants used throughout the application:
//! database file names and locations, output naming, the reputation API
//! endpoint and the sentinel used for unavailable values.

/// Sentinel written into a cell when a value is unavailable.
///
/// Distinct from a missing row: a row with "N/A" cells was emitted, a row
/// that failed the enrichment gate was not.
pub const NOT_AVAILABLE: &str = "N/A";

// GeoIP databases
/// File name of the city-level GeoLite2 database
pub const CITY_DB_FILE: &str = "GeoLite2-City.mmdb";
/// File name of the ASN GeoLite2 database
pub const ASN_DB_FILE: &str = "GeoLite2-ASN.mmdb";
/// File name of the country-level GeoLite2 database
pub const COUNTRY_DB_FILE: &str = "GeoLite2-Country.mmdb";
/// Local database directory, relative to the working directory
pub const DEFAULT_DB_DIR: &str = "db";
/// System-wide database directory, checked when a local file is missing
pub const SYSTEM_DB_DIR: &str = "/usr/local/share/GeoIP";
/// Blocklist directory name, placed next to the city database
pub const BLOCKLIST_SUBDIR: &str = "outsource_db";
/// Blocklist file extension (one category per file)
pub const BLOCKLIST_EXTENSION: &str = "txt";

// Output
/// Results directory, relative to the working directory
pub const DEFAULT_RESULTS_DIR: &str = "results";
/// Suffix appended to the input file stem for the CSV result
pub const OUTPUT_SUFFIX: &str = "_ipinfo";
/// Timestamp layout used for stdin result files (`stdin_<timestamp>.csv`)
pub const STDIN_TIMESTAMP_FORMAT: &str = "%Y%m%d_%H%M%S";
/// Spreadsheet width of the user agent column
pub const USER_AGENT_COLUMN_WIDTH: f64 = 60.0;
/// Spreadsheet width of the category column
pub const CATEGORY_COLUMN_WIDTH: f64 = 20.0;

// Reputation lookup
/// Environment variable holding the VirusTotal API key
pub const VT_API_KEY_ENV: &str = "VT_API_KEY";
/// VirusTotal v3 API base URL
pub const VIRUSTOTAL_API_BASE: &str = "https://www.virustotal.com/api/v3";

// Network operation timeouts
/// DNS query timeout in seconds
pub const DNS_TIMEOUT_SECS: u64 = 5;
/// DNS attempts per query before giving up
pub const DNS_ATTEMPTS: usize = 2;

/// User-Agent sent to the reputation API.
pub const HTTP_USER_AGENT: &str = concat!("holmes_geo/", env!("CARGO_PKG_VERSION"));
