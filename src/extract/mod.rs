//! Token extraction from the supported input sources.
//!
//! Each mode turns its source into an ordered list of [`InputToken`]s:
//! - **apache**: first IPv4 per line, paired with the trailing quoted user agent
//! - **csv**: IPv4 addresses from one column or all columns, de-duplicated
//! - **check**: one entry per line, passed through unfiltered
//! - **stdin**: IPv4 addresses per line; lines without one are resolved as domains

mod apache;
mod csv;
mod text;

use std::io::Read;
use std::net::Ipv4Addr;
use std::sync::LazyLock;

use regex::Regex;

use crate::config::InputSource;
use crate::dns::HostResolver;
use crate::error_handling::ExtractError;

// Re-export public API
pub use self::apache::extract_apache;
pub use self::csv::extract_csv;
pub use self::text::{extract_check, extract_text_tokens, TextTokens};

/// Dotted-quad shape; octet ranges are checked separately.
pub(crate) static IPV4_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    #[allow(clippy::expect_used)]
    Regex::new(r"\b(?:\d{1,3}\.){3}\d{1,3}\b").expect("IPv4 pattern is valid")
});

/// A candidate token and, in apache mode, the user agent seen with it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InputToken {
    /// IP literal or domain name
    pub value: String,
    /// User agent from the same log line (apache mode only)
    pub user_agent: Option<String>,
}

impl InputToken {
    /// Token without an associated user agent.
    pub fn new(value: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            user_agent: None,
        }
    }
}

/// The ordered tokens extracted from one input source.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Extraction {
    /// Tokens in input order
    pub tokens: Vec<InputToken>,
    /// True when the source carries user agents (adds the "User Agent" column)
    pub has_user_agents: bool,
    /// Stdin names that did not resolve during extraction
    pub unresolved: Vec<String>,
}

impl Extraction {
    fn plain(values: Vec<String>) -> Self {
        Self {
            tokens: values.into_iter().map(InputToken::new).collect(),
            has_user_agents: false,
            unresolved: Vec::new(),
        }
    }

    /// Tokens from piped text, keeping the names that failed to resolve.
    pub fn from_text(text: TextTokens) -> Self {
        Self {
            unresolved: text.unresolved,
            ..Self::plain(text.tokens)
        }
    }

    /// Returns true if no token was extracted.
    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }
}

/// Parses a dotted-quad candidate, rejecting any octet above 255.
///
/// Returns the canonical address (leading zeros dropped).
pub fn parse_ipv4_candidate(candidate: &str) -> Option<Ipv4Addr> {
    let mut octets = [0u8; 4];
    let mut parts = candidate.split('.');
    for octet in octets.iter_mut() {
        let part = parts.next()?;
        if part.is_empty() || part.len() > 3 || !part.bytes().all(|b| b.is_ascii_digit()) {
            return None;
        }
        *octet = part.parse().ok()?;
    }
    if parts.next().is_some() {
        return None;
    }
    Some(Ipv4Addr::from(octets))
}

/// Finds every well-formed IPv4 address in `text`, in order.
pub(crate) fn find_ipv4_addresses(text: &str) -> impl Iterator<Item = Ipv4Addr> + '_ {
    IPV4_PATTERN
        .find_iter(text)
        .filter_map(|m| parse_ipv4_candidate(m.as_str()))
}

/// Extracts tokens from the configured input source.
///
/// Stdin is read to the end; names found there are resolved immediately
/// through `resolver`.
///
/// # Errors
///
/// Returns an `ExtractError`; only `ExtractError::NotFound` is meant to
/// abort the run.
pub async fn extract_tokens<R: HostResolver>(
    source: &InputSource,
    resolver: &R,
) -> Result<Extraction, ExtractError> {
    match source {
        InputSource::Apache(path) => Ok(Extraction {
            tokens: extract_apache(path)?,
            has_user_agents: true,
            unresolved: Vec::new(),
        }),
        InputSource::Csv { path, column } => {
            Ok(Extraction::plain(extract_csv(path, column.as_deref())?))
        }
        InputSource::Check(path) => Ok(Extraction::plain(extract_check(path)?)),
        InputSource::Stdin => {
            let mut input = String::new();
            std::io::stdin()
                .read_to_string(&mut input)
                .map_err(|e| ExtractError::from_io("<stdin>".into(), e))?;
            Ok(Extraction::from_text(
                extract_text_tokens(&input, resolver).await,
            ))
        }
    }
}
