// Shared test helpers: in-memory resolver, GeoIP source and console buffer.
//
// Each integration test file pulls this in with `mod helpers;`.

use std::collections::HashMap;
use std::io::Write;
use std::net::IpAddr;
use std::sync::{Arc, Mutex};

use holmes_geo::dns::HostResolver;
use holmes_geo::geoip::{AsnRecord, CityRecord, CountryRecord, GeoSource, LookupOutcome};

/// Resolver answering from fixed forward and reverse tables.
#[derive(Default)]
pub struct FakeResolver {
    pub forward: HashMap<String, IpAddr>,
    pub reverse: HashMap<IpAddr, String>,
}

#[allow(dead_code)] // Not every test file uses every builder
impl FakeResolver {
    pub fn with_forward(mut self, name: &str, ip: &str) -> Self {
        self.forward.insert(name.to_string(), ip.parse().unwrap());
        self
    }

    pub fn with_reverse(mut self, ip: &str, name: &str) -> Self {
        self.reverse.insert(ip.parse().unwrap(), name.to_string());
        self
    }
}

impl HostResolver for FakeResolver {
    async fn resolve_host(&self, host: &str) -> anyhow::Result<IpAddr> {
        self.forward
            .get(host)
            .copied()
            .ok_or_else(|| anyhow::anyhow!("no record for {host}"))
    }

    async fn reverse_lookup(&self, ip: IpAddr) -> Option<String> {
        self.reverse.get(&ip).cloned()
    }
}

/// GeoIP source knowing a handful of addresses; each database can be
/// switched off independently.
pub struct FakeGeo {
    pub city: bool,
    pub asn: bool,
    pub country: bool,
}

impl Default for FakeGeo {
    fn default() -> Self {
        Self {
            city: true,
            asn: true,
            country: true,
        }
    }
}

const KNOWN: [&str; 3] = ["8.8.8.8", "1.1.1.1", "93.184.216.34"];

fn known(ip: IpAddr) -> bool {
    KNOWN.contains(&ip.to_string().as_str())
}

impl GeoSource for FakeGeo {
    fn lookup_city(&self, ip: IpAddr) -> LookupOutcome<CityRecord> {
        if !self.city {
            return LookupOutcome::DatabaseUnavailable;
        }
        if !known(ip) {
            return LookupOutcome::NotFound;
        }
        LookupOutcome::Found(CityRecord {
            city: None,
            latitude: Some(37.751),
            longitude: Some(-97.822),
            continent: Some("North America".to_string()),
        })
    }

    fn lookup_asn(&self, ip: IpAddr) -> LookupOutcome<AsnRecord> {
        if !self.asn {
            return LookupOutcome::DatabaseUnavailable;
        }
        if !known(ip) {
            return LookupOutcome::NotFound;
        }
        LookupOutcome::Found(AsnRecord {
            number: Some(15169),
            organization: Some("GOOGLE".to_string()),
            network: Some(format!("{ip}/24")),
        })
    }

    fn lookup_country(&self, ip: IpAddr) -> LookupOutcome<CountryRecord> {
        if !self.country {
            return LookupOutcome::DatabaseUnavailable;
        }
        if !known(ip) {
            return LookupOutcome::NotFound;
        }
        LookupOutcome::Found(CountryRecord {
            country: Some("United States".to_string()),
            country_code: Some("US".to_string()),
        })
    }
}

/// Console stand-in whose contents can be read back after the run.
#[derive(Clone, Default)]
pub struct SharedBuffer(Arc<Mutex<Vec<u8>>>);

#[allow(dead_code)] // Not every test file inspects the console
impl SharedBuffer {
    pub fn contents(&self) -> String {
        String::from_utf8(self.0.lock().unwrap().clone()).unwrap()
    }

    pub fn boxed(&self) -> Box<dyn Write> {
        Box::new(self.clone())
    }
}

impl Write for SharedBuffer {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        self.0.lock().unwrap().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> std::io::Result<()> {
        Ok(())
    }
}
