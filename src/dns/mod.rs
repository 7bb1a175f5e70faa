//! DNS resolution.
//!
//! This module provides forward (name → address) and reverse (address →
//! name) lookups using `hickory-resolver`, behind the `HostResolver` trait so
//! the enrichment pipeline can run against any resolver.

mod resolution;

use std::net::IpAddr;

use hickory_resolver::TokioAsyncResolver;

// Re-export public API
pub use resolution::{resolve_host_to_ip, reverse_dns_lookup};

/// Forward and reverse name resolution.
#[allow(async_fn_in_trait)]
pub trait HostResolver {
    /// Resolves a name to a single address.
    async fn resolve_host(&self, host: &str) -> anyhow::Result<IpAddr>;

    /// Resolves an address back to a name, `None` when there is no PTR record.
    async fn reverse_lookup(&self, ip: IpAddr) -> Option<String>;
}

/// `HostResolver` backed by the system DNS configuration.
pub struct DnsResolver {
    inner: TokioAsyncResolver,
}

impl DnsResolver {
    /// Wraps an already configured hickory resolver.
    pub fn new(inner: TokioAsyncResolver) -> Self {
        Self { inner }
    }
}

impl HostResolver for DnsResolver {
    async fn resolve_host(&self, host: &str) -> anyhow::Result<IpAddr> {
        resolve_host_to_ip(host, &self.inner).await
    }

    async fn reverse_lookup(&self, ip: IpAddr) -> Option<String> {
        reverse_dns_lookup(ip, &self.inner).await
    }
}

/// A token classified as either a literal address or a name to resolve.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TokenKind {
    /// Literal IPv4 or IPv6 address
    Address(IpAddr),
    /// Anything else, treated as a domain name
    Name(String),
}

/// Classifies a raw token after trimming surrounding whitespace.
pub fn classify_token(token: &str) -> TokenKind {
    let token = token.trim();
    match token.parse::<IpAddr>() {
        Ok(ip) => TokenKind::Address(ip),
        Err(_) => TokenKind::Name(token.to_string()),
    }
}
