//! GeoIP data structures.

/// Result of one database lookup.
///
/// Each of the three databases is queried independently; the outcome tells
/// the assembler whether a record came back, the address was absent, or the
/// database could not be used at all.
#[derive(Debug, Clone, PartialEq)]
pub enum LookupOutcome<T> {
    /// The database holds a record for the address
    Found(T),
    /// The database is loaded but has no record for the address
    NotFound,
    /// The database file is missing or unreadable
    DatabaseUnavailable,
}

impl<T> LookupOutcome<T> {
    /// Returns the record, if one was found.
    pub fn found(self) -> Option<T> {
        match self {
            LookupOutcome::Found(record) => Some(record),
            LookupOutcome::NotFound | LookupOutcome::DatabaseUnavailable => None,
        }
    }

    /// Returns true if a record was found.
    pub fn is_found(&self) -> bool {
        matches!(self, LookupOutcome::Found(_))
    }
}

/// Fields taken from the city database.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CityRecord {
    /// English city name
    pub city: Option<String>,
    /// Location latitude
    pub latitude: Option<f64>,
    /// Location longitude
    pub longitude: Option<f64>,
    /// English continent name
    pub continent: Option<String>,
}

/// Fields taken from the country database.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CountryRecord {
    /// English country name
    pub country: Option<String>,
    /// ISO 3166-1 alpha-2 code
    pub country_code: Option<String>,
}

/// Fields taken from the ASN database.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AsnRecord {
    /// Autonomous system number
    pub number: Option<u32>,
    /// Autonomous system organization
    pub organization: Option<String>,
    /// `<queried address>/<prefix length>` of the matching ASN network
    pub network: Option<String>,
}

/// Geographic part of an output row, merged from the city and country records.
#[derive(Debug, Clone, Default, PartialEq)]
#[allow(missing_docs)]
pub struct GeoRecord {
    pub city: Option<String>,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub country: Option<String>,
    pub country_code: Option<String>,
    pub continent: Option<String>,
}

/// Everything the three databases contributed for one address.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct GeoEnrichment {
    /// City and country fields
    pub geo: GeoRecord,
    /// ASN fields
    pub asn: AsnRecord,
}
