//! GeoIP lookup using MaxMind GeoLite2 databases.
//!
//! Three local databases are consulted for every address: city, ASN and
//! country. Each lookup yields a [`LookupOutcome`]; a row is only produced
//! when all three return a record.

mod loader;
mod lookup;
mod types;

// Re-export public API
pub use loader::{DatabasePaths, GeoDatabases};
pub use lookup::{enrich, merge_lookups, GeoSource};
pub use types::{AsnRecord, CityRecord, CountryRecord, GeoEnrichment, GeoRecord, LookupOutcome};
