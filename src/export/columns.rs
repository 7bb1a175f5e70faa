//! Output column layout.
//!
//! The header is assembled once per run from an ordered list of column
//! descriptors, each gated by a run-time flag. Rows are rendered through the
//! same list, so header and row always agree in length and order.

use strum_macros::EnumIter as EnumIterMacro;

use crate::config::{CATEGORY_COLUMN_WIDTH, NOT_AVAILABLE, USER_AGENT_COLUMN_WIDTH};
use crate::geoip::{AsnRecord, GeoRecord};
use crate::reputation::ReputationReport;

/// Every column the report can contain, in output order.
#[allow(missing_docs)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, EnumIterMacro)]
pub enum Column {
    IpAddress,
    IpCategory,
    City,
    CityLatitude,
    CityLongitude,
    Country,
    CountryCode,
    Continent,
    AsnNumber,
    AsnOrganization,
    Network,
    ReverseDns,
    CertificateCn,
    DomainRegistrarUrl,
    UserAgent,
}

/// Flags deciding which optional columns are present.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ColumnFlags {
    /// Reverse DNS is enabled
    pub reverse_dns: bool,
    /// Reputation lookups are enabled
    pub reputation: bool,
    /// The input carries user agents
    pub user_agents: bool,
}

impl Column {
    /// Header cell text.
    pub fn header(self) -> &'static str {
        match self {
            Column::IpAddress => "IP Address",
            Column::IpCategory => "IP Category",
            Column::City => "City",
            Column::CityLatitude => "City Latitude",
            Column::CityLongitude => "City Longitude",
            Column::Country => "Country",
            Column::CountryCode => "Country Code",
            Column::Continent => "Continent",
            Column::AsnNumber => "ASN Number",
            Column::AsnOrganization => "ASN Organization",
            Column::Network => "Network",
            Column::ReverseDns => "Reverse DNS",
            Column::CertificateCn => "Certificate CN",
            Column::DomainRegistrarUrl => "Domain Registrar URL",
            Column::UserAgent => "User Agent",
        }
    }

    /// Whether this column is part of a run with `flags`.
    pub fn enabled(self, flags: &ColumnFlags) -> bool {
        match self {
            Column::ReverseDns => flags.reverse_dns,
            Column::CertificateCn | Column::DomainRegistrarUrl => flags.reputation,
            Column::UserAgent => flags.user_agents,
            _ => true,
        }
    }

    /// Spreadsheet width for long free-text columns.
    pub fn spreadsheet_width(self) -> Option<f64> {
        match self {
            Column::UserAgent => Some(USER_AGENT_COLUMN_WIDTH),
            Column::IpCategory => Some(CATEGORY_COLUMN_WIDTH),
            _ => None,
        }
    }

    /// Looks a column up by its header text.
    pub fn from_header(header: &str) -> Option<Self> {
        use strum::IntoEnumIterator;
        Column::iter().find(|column| column.header() == header)
    }
}

/// The ordered columns of one run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnSet {
    columns: Vec<Column>,
}

impl ColumnSet {
    /// Assembles the column list for a flag combination.
    pub fn new(flags: ColumnFlags) -> Self {
        use strum::IntoEnumIterator;
        Self {
            columns: Column::iter().filter(|c| c.enabled(&flags)).collect(),
        }
    }

    /// Columns in output order.
    pub fn columns(&self) -> &[Column] {
        &self.columns
    }

    /// Number of columns.
    pub fn len(&self) -> usize {
        self.columns.len()
    }

    /// Always false; the fixed columns are never gated.
    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }

    /// Returns true if `column` is part of this run.
    pub fn contains(&self, column: Column) -> bool {
        self.columns.contains(&column)
    }

    /// Header row.
    pub fn headers(&self) -> Vec<&'static str> {
        self.columns.iter().map(|c| c.header()).collect()
    }

    /// Renders a row in column order.
    pub fn render(&self, row: &OutputRow) -> Vec<String> {
        self.columns.iter().map(|c| row.field(*c)).collect()
    }
}

/// One enriched address, ready to be written.
#[derive(Debug, Clone, PartialEq)]
pub struct OutputRow {
    /// Resolved address
    pub ip: String,
    /// Blocklist label, "N/A" when unlisted
    pub category: String,
    /// City and country fields
    pub geo: GeoRecord,
    /// ASN fields
    pub asn: AsnRecord,
    /// PTR name, `None` when missing or not looked up
    pub reverse_dns: Option<String>,
    /// Reputation strings, `None` when lookups are disabled
    pub reputation: Option<ReputationReport>,
    /// User agent from the source log line
    pub user_agent: Option<String>,
}

fn or_na<T: ToString>(value: Option<T>) -> String {
    value
        .map(|v| v.to_string())
        .unwrap_or_else(|| NOT_AVAILABLE.to_string())
}

impl OutputRow {
    /// Cell text for `column`; absent values render as "N/A".
    pub fn field(&self, column: Column) -> String {
        match column {
            Column::IpAddress => self.ip.clone(),
            Column::IpCategory => self.category.clone(),
            Column::City => or_na(self.geo.city.as_ref()),
            Column::CityLatitude => or_na(self.geo.latitude),
            Column::CityLongitude => or_na(self.geo.longitude),
            Column::Country => or_na(self.geo.country.as_ref()),
            Column::CountryCode => or_na(self.geo.country_code.as_ref()),
            Column::Continent => or_na(self.geo.continent.as_ref()),
            Column::AsnNumber => or_na(self.asn.number),
            Column::AsnOrganization => or_na(self.asn.organization.as_ref()),
            Column::Network => or_na(self.asn.network.as_ref()),
            Column::ReverseDns => or_na(self.reverse_dns.as_ref()),
            Column::CertificateCn => or_na(self.reputation.as_ref().map(|r| &r.certificate)),
            Column::DomainRegistrarUrl => or_na(self.reputation.as_ref().map(|r| &r.registrar)),
            Column::UserAgent => or_na(self.user_agent.as_ref()),
        }
    }
}
