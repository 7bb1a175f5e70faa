//! Line-oriented extraction: the check list and piped stdin.

use std::path::Path;

use super::find_ipv4_addresses;
use crate::dns::HostResolver;
use crate::error_handling::ExtractError;

/// Reads a check list: one IP or domain per line.
///
/// Entries are trimmed but otherwise not validated; blank lines and lines
/// starting with `#` are skipped.
///
/// # Errors
///
/// Returns `ExtractError::NotFound` if the file does not exist.
pub fn extract_check(path: &Path) -> Result<Vec<String>, ExtractError> {
    let content =
        std::fs::read_to_string(path).map_err(|e| ExtractError::from_io(path.to_path_buf(), e))?;
    Ok(content
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
        .map(str::to_string)
        .collect())
}

/// Addresses pulled from free text, plus the names that did not resolve.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TextTokens {
    /// Addresses in input order
    pub tokens: Vec<String>,
    /// Lines taken as domains whose lookup failed
    pub unresolved: Vec<String>,
}

/// Extracts addresses from free text such as piped stdin.
///
/// Every well-formed IPv4 address on a line is kept. A line containing no
/// address is taken as a domain and resolved right away; names that do not
/// resolve are returned in `unresolved` so the caller can report them.
pub async fn extract_text_tokens<R: HostResolver>(input: &str, resolver: &R) -> TextTokens {
    let mut tokens = Vec::new();
    let mut unresolved = Vec::new();
    for line in input.lines().map(str::trim).filter(|l| !l.is_empty()) {
        let before = tokens.len();
        tokens.extend(find_ipv4_addresses(line).map(|ip| ip.to_string()));
        if tokens.len() > before || super::IPV4_PATTERN.is_match(line) {
            continue;
        }

        match resolver.resolve_host(line).await {
            Ok(ip) => {
                log::debug!("Resolved {line} to {ip}");
                tokens.push(ip.to_string());
            }
            Err(e) => {
                log::debug!("Resolution error for {line}: {e}");
                unresolved.push(line.to_string());
            }
        }
    }
    TextTokens { tokens, unresolved }
}
