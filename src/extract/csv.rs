//! CSV extraction.

use std::collections::HashSet;
use std::fs::File;
use std::path::Path;

use csv::ReaderBuilder;

use super::{find_ipv4_addresses, parse_ipv4_candidate, IPV4_PATTERN};
use crate::error_handling::ExtractError;

/// Extracts unique IPv4 addresses from a CSV file, in first-seen order.
///
/// With `column`, each cell of that column is checked for an address at its
/// start. Without it, every address in every cell is collected.
///
/// # Errors
///
/// - `ExtractError::NotFound` if the file does not exist
/// - `ExtractError::EmptyFile` if the file has no header row
/// - `ExtractError::Parse` if a record is malformed
/// - `ExtractError::MissingColumn` if `column` is not in the header
pub fn extract_csv(path: &Path, column: Option<&str>) -> Result<Vec<String>, ExtractError> {
    let file = File::open(path).map_err(|e| ExtractError::from_io(path.to_path_buf(), e))?;
    let parse_err = |source: csv::Error| ExtractError::Parse {
        path: path.to_path_buf(),
        source,
    };

    let mut reader = ReaderBuilder::new().has_headers(true).from_reader(file);
    let headers = reader.headers().map_err(parse_err)?.clone();
    if headers.is_empty() || headers.iter().all(|h| h.trim().is_empty()) {
        return Err(ExtractError::EmptyFile(path.to_path_buf()));
    }

    let column_index = match column {
        Some(name) => Some(headers.iter().position(|h| h == name).ok_or_else(|| {
            ExtractError::MissingColumn {
                requested: name.to_string(),
                available: headers.iter().map(str::to_string).collect(),
            }
        })?),
        None => None,
    };

    let mut extracted = Vec::new();
    for record in reader.records() {
        let record = record.map_err(parse_err)?;
        match column_index {
            Some(index) => {
                if let Some(ip) = record.get(index).and_then(leading_ipv4) {
                    extracted.push(ip);
                }
            }
            None => {
                for field in record.iter() {
                    extracted.extend(find_ipv4_addresses(field).map(|ip| ip.to_string()));
                }
            }
        }
    }

    match column {
        Some(name) => log::info!(
            "Extracted {} IP addresses from column '{}' in the CSV file",
            extracted.len(),
            name
        ),
        None => log::info!(
            "Extracted {} IP addresses from all columns in the CSV file",
            extracted.len()
        ),
    }

    let unique = dedup_preserving_order(extracted);
    log::info!("Found {} unique IP addresses", unique.len());
    Ok(unique)
}

/// Address at the very start of a (trimmed) cell.
fn leading_ipv4(cell: &str) -> Option<String> {
    let cell = cell.trim();
    let m = IPV4_PATTERN.find(cell).filter(|m| m.start() == 0)?;
    parse_ipv4_candidate(m.as_str()).map(|ip| ip.to_string())
}

fn dedup_preserving_order(values: Vec<String>) -> Vec<String> {
    let mut seen = HashSet::new();
    values
        .into_iter()
        .filter(|value| seen.insert(value.clone()))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_leading_ipv4() {
        assert_eq!(leading_ipv4(" 1.1.1.1 "), Some("1.1.1.1".to_string()));
        assert_eq!(leading_ipv4("1.1.1.1:443"), Some("1.1.1.1".to_string()));
        assert_eq!(leading_ipv4("host 1.1.1.1"), None);
        assert_eq!(leading_ipv4("256.1.1.1"), None);
    }

    #[test]
    fn test_dedup_preserving_order() {
        let values = ["2.2.2.2", "1.1.1.1", "2.2.2.2", "3.3.3.3", "1.1.1.1"]
            .iter()
            .map(|s| s.to_string())
            .collect();
        assert_eq!(
            dedup_preserving_order(values),
            vec!["2.2.2.2", "1.1.1.1", "3.3.3.3"]
        );
    }
}
