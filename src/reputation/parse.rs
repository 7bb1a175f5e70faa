//! Interpretation of VirusTotal report bodies.

use std::net::IpAddr;
use std::sync::LazyLock;

use regex::Regex;
use serde::Deserialize;

use super::ReputationReport;

static URL_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    #[allow(clippy::expect_used)]
    Regex::new(r"https?://(?:www\.)?[a-zA-Z0-9-]+\.[a-zA-Z0-9.-]+/?[^\s]*")
        .expect("URL pattern is valid")
});

const REGISTRAR_KEYWORDS: [&str; 5] = ["registrar", "whois", "domain", "iana", "icann"];

/// Whether a lookup key is an address or a domain.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QueryKind {
    /// IPv4 or IPv6 literal
    Address,
    /// Anything else
    Domain,
}

impl QueryKind {
    /// Classifies a lookup key.
    pub fn of(key: &str) -> Self {
        if key.parse::<IpAddr>().is_ok() {
            QueryKind::Address
        } else {
            QueryKind::Domain
        }
    }

    /// API collection the key is looked up in.
    pub fn collection(self) -> &'static str {
        match self {
            QueryKind::Address => "ip_addresses",
            QueryKind::Domain => "domains",
        }
    }
}

#[derive(Debug, Default, Deserialize)]
struct ApiResponse {
    #[serde(default)]
    data: Option<ApiData>,
}

#[derive(Debug, Default, Deserialize)]
struct ApiData {
    #[serde(default)]
    attributes: Option<Attributes>,
}

#[derive(Debug, Default, Deserialize)]
struct Attributes {
    #[serde(default)]
    last_https_certificate: Option<Certificate>,
    #[serde(default)]
    as_owner: Option<String>,
    #[serde(default)]
    asn: Option<u64>,
    #[serde(default)]
    network: Option<String>,
    #[serde(default)]
    whois: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
struct Certificate {
    #[serde(default)]
    subject: Option<DistinguishedName>,
    #[serde(default)]
    issuer: Option<DistinguishedName>,
    #[serde(default)]
    subject_alternative_name: Option<AltNames>,
    #[serde(default)]
    extensions: Option<Extensions>,
}

#[derive(Debug, Default, Deserialize)]
struct DistinguishedName {
    #[serde(rename = "CN", default)]
    common_name: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
struct Extensions {
    #[serde(default)]
    subject_alternative_name: Option<AltNames>,
}

/// Alternative names come either as a plain list or keyed by type.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum AltNames {
    List(Vec<String>),
    Typed {
        #[serde(rename = "DNS", default)]
        dns: Vec<String>,
    },
}

impl AltNames {
    fn first(&self) -> Option<&str> {
        let names = match self {
            AltNames::List(names) => names,
            AltNames::Typed { dns } => dns,
        };
        names.first().map(String::as_str)
    }
}

/// Builds a report from a raw API response body.
///
/// Fields the body does not provide stay "N/A".
///
/// # Errors
///
/// Returns a `serde_json::Error` if the body is not a JSON object of the
/// expected shape.
pub fn parse_report(body: &str, kind: QueryKind) -> Result<ReputationReport, serde_json::Error> {
    let response: ApiResponse = serde_json::from_str(body)?;
    let mut report = ReputationReport::unavailable();
    let Some(attributes) = response.data.and_then(|data| data.attributes) else {
        return Ok(report);
    };

    if let Some(certificate) = attributes
        .last_https_certificate
        .as_ref()
        .and_then(certificate_name)
    {
        report.certificate = certificate;
    }

    let registrar = match kind {
        QueryKind::Address => network_owner(&attributes),
        QueryKind::Domain => attributes.whois.as_deref().and_then(registrar_url),
    };
    if let Some(registrar) = registrar {
        report.registrar = registrar;
    }
    Ok(report)
}

fn certificate_name(certificate: &Certificate) -> Option<String> {
    let subject = certificate
        .subject
        .as_ref()
        .and_then(|dn| dn.common_name.clone());
    if subject.is_some() {
        return subject;
    }

    let issuer = certificate
        .issuer
        .as_ref()
        .and_then(|dn| dn.common_name.as_ref());
    if let Some(issuer) = issuer {
        return Some(format!("(issuer) {issuer}"));
    }

    let alt_name = certificate
        .subject_alternative_name
        .as_ref()
        .or_else(|| {
            certificate
                .extensions
                .as_ref()
                .and_then(|ext| ext.subject_alternative_name.as_ref())
        })
        .and_then(AltNames::first)?;
    log::info!("Using alternative domain from certificate: {alt_name}");
    Some(alt_name.to_string())
}

fn network_owner(attributes: &Attributes) -> Option<String> {
    if let Some(owner) = &attributes.as_owner {
        let asn = attributes
            .asn
            .map(|n| n.to_string())
            .unwrap_or_else(|| "Unknown".to_string());
        return Some(format!("AS{asn} ({owner})"));
    }
    attributes
        .network
        .as_ref()
        .map(|network| format!("Network: {network}"))
}

/// Registrar URL from free-text whois data.
///
/// A `Registrar URL:` line wins; otherwise the first URL mentioning a
/// registry-related keyword is taken.
fn registrar_url(whois: &str) -> Option<String> {
    let from_line = whois
        .lines()
        .filter(|line| line.to_lowercase().contains("registrar url:"))
        .filter_map(|line| line.split_once(':').map(|(_, value)| value.trim()))
        .find(|value| !value.is_empty());
    if let Some(value) = from_line {
        return Some(value.to_string());
    }

    let url = URL_PATTERN.find_iter(whois).map(|m| m.as_str()).find(|url| {
        let url = url.to_lowercase();
        REGISTRAR_KEYWORDS.iter().any(|keyword| url.contains(keyword))
    })?;
    log::info!("Found likely registrar URL: {url}");
    Some(url.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_query_kind() {
        assert_eq!(QueryKind::of("8.8.8.8"), QueryKind::Address);
        assert_eq!(QueryKind::of("2001:db8::1"), QueryKind::Address);
        assert_eq!(QueryKind::of("example.com"), QueryKind::Domain);
        assert_eq!(QueryKind::Address.collection(), "ip_addresses");
        assert_eq!(QueryKind::Domain.collection(), "domains");
    }

    #[test]
    fn test_address_report_prefers_as_owner() {
        let body = r#"{"data":{"attributes":{
            "as_owner":"GOOGLE","asn":15169,"network":"8.8.8.0/24",
            "last_https_certificate":{"subject":{"CN":"dns.google"},"issuer":{"CN":"GTS CA 1C3"}}
        }}}"#;
        let report = parse_report(body, QueryKind::Address).unwrap();
        assert_eq!(report.certificate, "dns.google");
        assert_eq!(report.registrar, "AS15169 (GOOGLE)");
    }

    #[test]
    fn test_address_report_network_fallback() {
        let body = r#"{"data":{"attributes":{"network":"1.1.1.0/24"}}}"#;
        let report = parse_report(body, QueryKind::Address).unwrap();
        assert_eq!(report.registrar, "Network: 1.1.1.0/24");
        assert_eq!(report.certificate, "N/A");
    }

    #[test]
    fn test_issuer_fallback_is_marked() {
        let body = r#"{"data":{"attributes":{"last_https_certificate":{
            "subject":{"O":"Example"},"issuer":{"CN":"R3"}}}}}"#;
        let report = parse_report(body, QueryKind::Domain).unwrap();
        assert_eq!(report.certificate, "(issuer) R3");
    }

    #[test]
    fn test_alternative_name_fallback() {
        let typed = r#"{"data":{"attributes":{"last_https_certificate":{
            "subject_alternative_name":{"DNS":["alt.example","other.example"]}}}}}"#;
        assert_eq!(
            parse_report(typed, QueryKind::Address).unwrap().certificate,
            "alt.example"
        );

        let listed = r#"{"data":{"attributes":{"last_https_certificate":{
            "extensions":{"subject_alternative_name":["san.example"]}}}}}"#;
        assert_eq!(
            parse_report(listed, QueryKind::Address).unwrap().certificate,
            "san.example"
        );
    }

    #[test]
    fn test_registrar_url_line() {
        let whois = "Domain Name: EXAMPLE.COM\nRegistrar URL: http://www.iana.org\nRegistrar: RESERVED-IANA\n";
        assert_eq!(registrar_url(whois), Some("http://www.iana.org".to_string()));

        let lowercase = "registrar url: https://registrar.example/\n";
        assert_eq!(
            registrar_url(lowercase),
            Some("https://registrar.example/".to_string())
        );
    }

    #[test]
    fn test_registrar_url_keyword_scan() {
        let whois = "Contact: https://example.net/about\nSee https://whois.registry.example/lookup for details";
        assert_eq!(
            registrar_url(whois),
            Some("https://whois.registry.example/lookup".to_string())
        );
        assert_eq!(registrar_url("No urls here"), None);
        assert_eq!(registrar_url("https://shop.example/cart"), None);
    }

    #[test]
    fn test_domain_report_from_whois() {
        let body = r#"{"data":{"attributes":{"whois":"Registrar URL: https://www.markmonitor.com"}}}"#;
        let report = parse_report(body, QueryKind::Domain).unwrap();
        assert_eq!(report.registrar, "https://www.markmonitor.com");
    }

    #[test]
    fn test_missing_attributes_and_bad_json() {
        let report = parse_report(r#"{"error":{"code":"NotFoundError"}}"#, QueryKind::Domain).unwrap();
        assert_eq!(report, ReputationReport::unavailable());
        assert!(parse_report("not json", QueryKind::Domain).is_err());
    }
}
