//! GeoIP database discovery and loading.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use maxminddb::Reader;

use crate::config::{ASN_DB_FILE, CITY_DB_FILE, COUNTRY_DB_FILE, SYSTEM_DB_DIR};

/// Resolved locations of the three GeoLite2 databases.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DatabasePaths {
    /// `GeoLite2-City.mmdb`
    pub city: PathBuf,
    /// `GeoLite2-ASN.mmdb`
    pub asn: PathBuf,
    /// `GeoLite2-Country.mmdb`
    pub country: PathBuf,
}

impl DatabasePaths {
    /// Locates each database, preferring `db_dir` over the system directory.
    ///
    /// A database found in neither place keeps its `db_dir` path so the
    /// "not found" notice names the expected local location.
    pub fn discover(db_dir: &Path) -> Self {
        Self::discover_with_fallback(db_dir, Path::new(SYSTEM_DB_DIR))
    }

    /// Same as [`DatabasePaths::discover`] with an explicit fallback directory.
    pub fn discover_with_fallback(db_dir: &Path, system_dir: &Path) -> Self {
        let pick = |file: &str| {
            let local = db_dir.join(file);
            if local.is_file() {
                return local;
            }
            let system = system_dir.join(file);
            if system.is_file() {
                return system;
            }
            local
        };

        Self {
            city: pick(CITY_DB_FILE),
            asn: pick(ASN_DB_FILE),
            country: pick(COUNTRY_DB_FILE),
        }
    }

    /// Directory holding the city database, where the blocklists live by default.
    pub fn city_dir(&self) -> &Path {
        self.city.parent().unwrap_or_else(|| Path::new("."))
    }
}

/// The three database readers, each optional.
///
/// A reader that failed to open stays `None`; lookups against it report
/// `DatabaseUnavailable` without affecting the other two.
#[derive(Default)]
pub struct GeoDatabases {
    pub(crate) city: Option<Reader<Vec<u8>>>,
    pub(crate) asn: Option<Reader<Vec<u8>>>,
    pub(crate) country: Option<Reader<Vec<u8>>>,
}

impl GeoDatabases {
    /// Opens all three databases once for the whole run.
    pub fn open(paths: &DatabasePaths) -> Self {
        Self {
            city: open_or_report(&paths.city),
            asn: open_or_report(&paths.asn),
            country: open_or_report(&paths.country),
        }
    }

    /// Number of databases that opened successfully.
    pub fn loaded_count(&self) -> usize {
        [self.city.is_some(), self.asn.is_some(), self.country.is_some()]
            .iter()
            .filter(|loaded| **loaded)
            .count()
    }
}

fn open_or_report(path: &Path) -> Option<Reader<Vec<u8>>> {
    if !path.is_file() {
        log::error!("Database file {} not found", path.display());
        return None;
    }
    match load_from_file(path) {
        Ok(reader) => Some(reader),
        Err(e) => {
            log::error!("{:#}", e);
            None
        }
    }
}

/// Loads a GeoIP database from a local file path.
pub(crate) fn load_from_file(path: &Path) -> Result<Reader<Vec<u8>>> {
    log::debug!("Loading GeoIP database from: {}", path.display());

    let db_bytes = std::fs::read(path)
        .with_context(|| format!("Failed to read GeoIP database from {}", path.display()))?;

    Reader::from_source(db_bytes)
        .with_context(|| format!("Failed to parse GeoIP database from {}", path.display()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_discover_prefers_local() {
        let local = TempDir::new().unwrap();
        let system = TempDir::new().unwrap();
        std::fs::write(local.path().join(CITY_DB_FILE), b"x").unwrap();
        std::fs::write(system.path().join(CITY_DB_FILE), b"x").unwrap();
        std::fs::write(system.path().join(ASN_DB_FILE), b"x").unwrap();

        let paths = DatabasePaths::discover_with_fallback(local.path(), system.path());
        assert_eq!(paths.city, local.path().join(CITY_DB_FILE));
        assert_eq!(paths.asn, system.path().join(ASN_DB_FILE));
        // Found nowhere: reported at the local location
        assert_eq!(paths.country, local.path().join(COUNTRY_DB_FILE));
        assert_eq!(paths.city_dir(), local.path());
    }

    #[test]
    fn test_open_missing_databases() {
        let dir = TempDir::new().unwrap();
        let paths = DatabasePaths::discover_with_fallback(dir.path(), dir.path());
        let dbs = GeoDatabases::open(&paths);
        assert_eq!(dbs.loaded_count(), 0);
    }

    #[test]
    fn test_open_corrupt_database_is_unavailable() {
        let dir = TempDir::new().unwrap();
        std::fs::write(dir.path().join(CITY_DB_FILE), b"definitely not an mmdb").unwrap();
        let paths = DatabasePaths::discover_with_fallback(dir.path(), dir.path());
        let dbs = GeoDatabases::open(&paths);
        assert!(dbs.city.is_none());
        assert!(load_from_file(&paths.city).is_err());
    }
}
