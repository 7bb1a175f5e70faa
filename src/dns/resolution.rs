//! IP address resolution and reverse DNS lookup.

use std::net::IpAddr;

use anyhow::{Error, Result};
use hickory_resolver::TokioAsyncResolver;

/// Resolves a hostname to an IP address using DNS.
///
/// Prefers the first IPv4 address in the answer and falls back to the first
/// address of any family.
///
/// # Errors
///
/// Returns an error if DNS resolution fails or no IP addresses are found.
pub async fn resolve_host_to_ip(host: &str, resolver: &TokioAsyncResolver) -> Result<IpAddr> {
    let response = resolver.lookup_ip(host).await.map_err(Error::new)?;
    let mut first_any = None;
    for ip in response.iter() {
        if ip.is_ipv4() {
            return Ok(ip);
        }
        first_any.get_or_insert(ip);
    }
    first_any.ok_or_else(|| Error::msg("No IP addresses found"))
}

/// Performs a reverse DNS lookup (PTR record) for an IP address.
///
/// # Returns
///
/// The reverse DNS name without its trailing dot, or `None` if there is no
/// PTR record or the lookup fails.
pub async fn reverse_dns_lookup(ip: IpAddr, resolver: &TokioAsyncResolver) -> Option<String> {
    match resolver.reverse_lookup(ip).await {
        Ok(response) => response
            .iter()
            .next()
            .map(|name| trim_root_dot(&name.to_utf8()).to_string()),
        Err(e) => {
            log::debug!("Reverse DNS lookup for {ip} failed: {e}");
            None
        }
    }
}

/// Strips the trailing root label from a fully qualified name.
pub(crate) fn trim_root_dot(name: &str) -> &str {
    name.strip_suffix('.').unwrap_or(name)
}
