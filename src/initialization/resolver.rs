//! DNS resolver initialization.

use std::time::Duration;

use crate::config::{DNS_ATTEMPTS, DNS_TIMEOUT_SECS};
use crate::dns::DnsResolver;
use hickory_resolver::config::{ResolverConfig, ResolverOpts};
use hickory_resolver::system_conf::read_system_conf;
use hickory_resolver::TokioAsyncResolver;

/// Initializes the DNS resolver used for forward and reverse lookups.
///
/// Reads the system configuration (`/etc/resolv.conf`) so names resolve the
/// way the rest of the machine resolves them. If it cannot be read, falls
/// back to the built-in default upstreams. Either way the query timeout and
/// attempt count come from `DNS_TIMEOUT_SECS` and `DNS_ATTEMPTS`.
pub fn init_resolver() -> DnsResolver {
    let (config, opts) = match read_system_conf() {
        Ok((config, opts)) => (config, with_timeouts(opts)),
        Err(e) => {
            log::debug!("System DNS configuration unavailable ({e}), using defaults");
            let mut opts = with_timeouts(ResolverOpts::default());
            // No search domains to append without a resolv.conf
            opts.ndots = 0;
            (ResolverConfig::default(), opts)
        }
    };
    DnsResolver::new(TokioAsyncResolver::tokio(config, opts))
}

fn with_timeouts(mut opts: ResolverOpts) -> ResolverOpts {
    opts.timeout = Duration::from_secs(DNS_TIMEOUT_SECS);
    opts.attempts = DNS_ATTEMPTS;
    opts
}
