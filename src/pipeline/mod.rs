//! Per-token processing: resolve, enrich, assemble.
//!
//! Tokens are handled one at a time, in input order. Each one either becomes
//! an [`OutputRow`] or is skipped with a counted reason; nothing here aborts
//! the run except a failure to write to the sink.

use std::net::IpAddr;

use anyhow::Result;

use crate::blocklist::Blocklist;
use crate::dns::{classify_token, HostResolver, TokenKind};
use crate::error_handling::{DegradedType, ProcessingStats, SkipType};
use crate::export::{OutputRow, RowSink};
use crate::extract::InputToken;
use crate::geoip::{enrich, GeoSource};
use crate::reputation::{ReputationClient, ReputationReport};

/// An address obtained from a token, with its names.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedHost {
    /// Literal or forward-resolved address
    pub address: IpAddr,
    /// The token as it appeared in the input
    pub original_token: String,
    /// PTR name, if reverse DNS ran and found one
    pub reverse_name: Option<String>,
    from_name: bool,
}

impl ResolvedHost {
    /// The domain associated with this host.
    ///
    /// The input name when the token was a domain, otherwise the reverse
    /// DNS name.
    pub fn domain(&self) -> Option<&str> {
        if self.from_name {
            Some(self.original_token.as_str())
        } else {
            self.reverse_name.as_deref()
        }
    }
}

/// What happened to one token.
#[derive(Debug, Clone, PartialEq)]
pub enum TokenOutcome {
    /// The token produced a row
    Row(Box<OutputRow>),
    /// The token was dropped
    Skipped(SkipType),
}

/// Shared, read-only resources for a run.
pub struct Pipeline<'a, R, G: ?Sized> {
    /// Forward and reverse DNS
    pub resolver: &'a R,
    /// City, ASN and country databases
    pub geo: &'a G,
    /// Category lists
    pub blocklist: &'a Blocklist,
    /// Reputation client, `None` when reputation lookups are disabled
    pub reputation: Option<&'a ReputationClient>,
    /// Whether to run reverse DNS
    pub reverse_dns: bool,
    /// Skip and degradation counters
    pub stats: &'a ProcessingStats,
}

impl<R, G> Pipeline<'_, R, G>
where
    R: HostResolver,
    G: GeoSource + ?Sized,
{
    /// Resolves a token to an address, looking up its PTR name if enabled.
    ///
    /// Returns `None` if the token is a name that does not resolve.
    pub async fn resolve(&self, token: &str) -> Option<ResolvedHost> {
        let (address, original_token, from_name) = match classify_token(token) {
            TokenKind::Address(ip) => (ip, ip.to_string(), false),
            TokenKind::Name(name) => match self.resolver.resolve_host(&name).await {
                Ok(ip) => (ip, name, true),
                Err(e) => {
                    log::debug!("Resolution error for {name}: {e}");
                    self.skip_unresolved(&name);
                    return None;
                }
            },
        };

        let reverse_name = if self.reverse_dns {
            let name = self.resolver.reverse_lookup(address).await;
            if name.is_none() {
                log::warn!("No reverse DNS found for IP: {address}");
                self.stats
                    .increment_degraded(DegradedType::ReverseDnsUnavailable);
            }
            name
        } else {
            None
        };

        Some(ResolvedHost {
            address,
            original_token,
            reverse_name,
            from_name,
        })
    }

    /// Reports a name that did not resolve and counts it as skipped.
    ///
    /// The blocklist is still consulted so a categorized name is not lost
    /// silently.
    pub fn skip_unresolved(&self, name: &str) {
        log::error!("Cannot resolve domain: {name}. Skipping.");
        if let Some(category) = self.blocklist.categories_for(name) {
            log::warn!("But the domain is categorized as {category}");
        }
        self.stats.increment_skip(SkipType::UnresolvableDomain);
    }

    async fn reputation_for(&self, client: &ReputationClient, key: &str) -> ReputationReport {
        match client.fetch_report(key).await {
            Ok(report) => report,
            Err(e) => {
                log::warn!("Reputation lookup failed for {key}: {e}");
                self.stats
                    .increment_degraded(DegradedType::ReputationUnavailable);
                ReputationReport::unavailable()
            }
        }
    }

    /// Runs one token through resolution, categorization and enrichment.
    pub async fn process_token(&self, token: &InputToken) -> TokenOutcome {
        let Some(host) = self.resolve(&token.value).await else {
            return TokenOutcome::Skipped(SkipType::UnresolvableDomain);
        };

        let ip = host.address.to_string();
        let category = self.blocklist.label(&ip, host.domain());

        let Some(enrichment) = enrich(self.geo, host.address) else {
            log::error!("Could not retrieve information for IP: {ip}. Skipping.");
            self.stats.increment_skip(SkipType::IncompleteGeoData);
            return TokenOutcome::Skipped(SkipType::IncompleteGeoData);
        };

        let reputation = match self.reputation {
            Some(client) => {
                let key = host.domain().unwrap_or(&ip).to_string();
                Some(self.reputation_for(client, &key).await)
            }
            None => None,
        };

        TokenOutcome::Row(Box::new(OutputRow {
            ip,
            category,
            geo: enrichment.geo,
            asn: enrichment.asn,
            reverse_dns: host.reverse_name,
            reputation,
            user_agent: token.user_agent.clone(),
        }))
    }

    /// Processes every token in order, writing each row to `sink`.
    ///
    /// Returns the number of rows written.
    ///
    /// # Errors
    ///
    /// Returns an error only if writing to the sink fails.
    pub async fn process_tokens(&self, tokens: &[InputToken], sink: &mut RowSink) -> Result<usize> {
        let mut written = 0;
        for (index, token) in tokens.iter().enumerate() {
            log::debug!("Processing token {}/{}: {}", index + 1, tokens.len(), token.value);
            if let TokenOutcome::Row(row) = self.process_token(token).await {
                sink.write_row(&row)?;
                written += 1;
            }
        }
        Ok(written)
    }
}
