//! Apache access log extraction.

use std::path::Path;
use std::sync::LazyLock;

use regex::Regex;

use super::{parse_ipv4_candidate, InputToken, IPV4_PATTERN};
use crate::config::NOT_AVAILABLE;
use crate::error_handling::ExtractError;

/// Last double-quoted field of a line (the user agent in combined log format).
static USER_AGENT_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    #[allow(clippy::expect_used)]
    Regex::new(r#""([^"]*)"$"#).expect("user agent pattern is valid")
});

/// Extracts the first IPv4 address of every log line with its user agent.
///
/// Lines are not de-duplicated. A line whose first address has an octet
/// above 255 is skipped. The user agent defaults to "N/A" when the line does
/// not end in a quoted field. Invalid UTF-8 is replaced, not rejected.
///
/// # Errors
///
/// Returns `ExtractError::NotFound` if the file does not exist, or
/// `ExtractError::Io` for other read failures.
pub fn extract_apache(path: &Path) -> Result<Vec<InputToken>, ExtractError> {
    let bytes = std::fs::read(path).map_err(|e| ExtractError::from_io(path.to_path_buf(), e))?;
    let content = String::from_utf8_lossy(&bytes);

    let tokens: Vec<InputToken> = content.lines().filter_map(parse_log_line).collect();

    log::info!(
        "Extracted {} IP addresses from Apache log {}",
        tokens.len(),
        path.display()
    );
    Ok(tokens)
}

fn parse_log_line(line: &str) -> Option<InputToken> {
    let line = line.trim_end();
    let candidate = IPV4_PATTERN.find(line)?;
    let ip = parse_ipv4_candidate(candidate.as_str())?;
    let user_agent = USER_AGENT_PATTERN
        .captures(line)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str().to_string())
        .unwrap_or_else(|| NOT_AVAILABLE.to_string());

    Some(InputToken {
        value: ip.to_string(),
        user_agent: Some(user_agent),
    })
}
