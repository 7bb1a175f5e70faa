//! IP address lookup functions.
//!
//! This module queries the three GeoLite2 databases and merges their records.

use std::net::IpAddr;

use maxminddb::geoip2;

use super::loader::GeoDatabases;
use super::types::{AsnRecord, CityRecord, CountryRecord, GeoEnrichment, GeoRecord, LookupOutcome};

/// A source of city, ASN and country records.
///
/// Implemented by `GeoDatabases` for the real `.mmdb` files; tests provide
/// in-memory implementations.
pub trait GeoSource {
    /// Looks the address up in the city database.
    fn lookup_city(&self, ip: IpAddr) -> LookupOutcome<CityRecord>;
    /// Looks the address up in the ASN database.
    fn lookup_asn(&self, ip: IpAddr) -> LookupOutcome<AsnRecord>;
    /// Looks the address up in the country database.
    fn lookup_country(&self, ip: IpAddr) -> LookupOutcome<CountryRecord>;
}

/// Queries all three databases and merges the results.
///
/// Returns `None` unless the city, ASN **and** country lookups each found a
/// record. Missing fields inside a found record do not matter here; they are
/// rendered as "N/A" later.
pub fn enrich<G: GeoSource + ?Sized>(source: &G, ip: IpAddr) -> Option<GeoEnrichment> {
    let city = source.lookup_city(ip);
    let asn = source.lookup_asn(ip);
    let country = source.lookup_country(ip);
    merge_lookups(city, asn, country)
}

/// Merges three lookup outcomes, all-or-nothing.
pub fn merge_lookups(
    city: LookupOutcome<CityRecord>,
    asn: LookupOutcome<AsnRecord>,
    country: LookupOutcome<CountryRecord>,
) -> Option<GeoEnrichment> {
    let (city, asn, country) = (city.found()?, asn.found()?, country.found()?);
    Some(GeoEnrichment {
        geo: GeoRecord {
            city: city.city,
            latitude: city.latitude,
            longitude: city.longitude,
            country: country.country,
            country_code: country.country_code,
            continent: city.continent,
        },
        asn,
    })
}

impl GeoSource for GeoDatabases {
    fn lookup_city(&self, ip: IpAddr) -> LookupOutcome<CityRecord> {
        let Some(reader) = self.city.as_ref() else {
            log::debug!("City database unavailable, skipping lookup for {ip}");
            return LookupOutcome::DatabaseUnavailable;
        };

        let lookup = match reader.lookup(ip) {
            Ok(result) => result,
            Err(e) => {
                log::warn!("City lookup failed for IP {ip}: {e}");
                return LookupOutcome::NotFound;
            }
        };
        if !lookup.has_data() {
            log::warn!("No city info found for IP: {ip}");
            return LookupOutcome::NotFound;
        }

        match lookup.decode::<geoip2::City>() {
            Ok(Some(city)) => LookupOutcome::Found(CityRecord {
                city: city.city.names.english.map(str::to_string),
                latitude: city.location.latitude,
                longitude: city.location.longitude,
                continent: city.continent.names.english.map(str::to_string),
            }),
            Ok(None) => LookupOutcome::NotFound,
            Err(e) => {
                log::warn!("Failed to decode city record for IP {ip}: {e}");
                LookupOutcome::NotFound
            }
        }
    }

    fn lookup_asn(&self, ip: IpAddr) -> LookupOutcome<AsnRecord> {
        let Some(reader) = self.asn.as_ref() else {
            log::debug!("ASN database unavailable, skipping lookup for {ip}");
            return LookupOutcome::DatabaseUnavailable;
        };

        let lookup = match reader.lookup(ip) {
            Ok(result) => result,
            Err(e) => {
                log::warn!("ASN lookup failed for IP {ip}: {e}");
                return LookupOutcome::NotFound;
            }
        };
        if !lookup.has_data() {
            log::warn!("No ASN info found for IP: {ip}");
            return LookupOutcome::NotFound;
        }

        // Queried address over the matched prefix, not the masked base
        let network = lookup
            .network()
            .ok()
            .map(|net| format!("{ip}/{}", net.prefix()));

        match lookup.decode::<geoip2::Asn>() {
            Ok(Some(asn)) => LookupOutcome::Found(AsnRecord {
                number: asn.autonomous_system_number,
                organization: asn.autonomous_system_organization.map(str::to_string),
                network,
            }),
            Ok(None) => LookupOutcome::NotFound,
            Err(e) => {
                log::warn!("Failed to decode ASN record for IP {ip}: {e}");
                LookupOutcome::NotFound
            }
        }
    }

    fn lookup_country(&self, ip: IpAddr) -> LookupOutcome<CountryRecord> {
        let Some(reader) = self.country.as_ref() else {
            log::debug!("Country database unavailable, skipping lookup for {ip}");
            return LookupOutcome::DatabaseUnavailable;
        };

        let lookup = match reader.lookup(ip) {
            Ok(result) => result,
            Err(e) => {
                log::warn!("Country lookup failed for IP {ip}: {e}");
                return LookupOutcome::NotFound;
            }
        };
        if !lookup.has_data() {
            log::warn!("No country info found for IP: {ip}");
            return LookupOutcome::NotFound;
        }

        match lookup.decode::<geoip2::Country>() {
            Ok(Some(country)) => LookupOutcome::Found(CountryRecord {
                country: country.country.names.english.map(str::to_string),
                country_code: country.country.iso_code.map(str::to_string),
            }),
            Ok(None) => LookupOutcome::NotFound,
            Err(e) => {
                log::warn!("Failed to decode country record for IP {ip}: {e}");
                LookupOutcome::NotFound
            }
        }
    }
}
