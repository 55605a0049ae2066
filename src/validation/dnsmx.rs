use crate::config::{Settings, Upstream};
use crate::models::DomainResult;
use async_trait::async_trait;
use std::time::Duration;
use thiserror::Error;
use tracing::debug;
use trust_dns_resolver::{
    TokioAsyncResolver,
    config::{ResolverConfig, ResolverOpts},
    error::ResolveError,
    system_conf,
};

/// Host values that never count as a deliverable MX target.
pub const BLOCKLIST: [&str; 5] = ["localhost", "127.0.0.1", "0.0.0.0", "", "."];

#[derive(Debug, Error)]
pub enum LookupError {
    #[error("MX lookup failed: {0}")]
    Resolve(#[from] ResolveError),
    #[error("MX lookup unavailable: {0}")]
    Unavailable(String),
}

/// Source of MX candidates for a domain.
///
/// Implementations return exchange host names by ascending preference
/// (most preferred first); the classifier scans them in that order.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait MxLookup: Send + Sync {
    async fn lookup_mx(&self, domain: &str) -> Result<Vec<String>, LookupError>;
}

/// Production [`MxLookup`] backed by an async trust-dns resolver.
pub struct DnsMxResolver {
    resolver: TokioAsyncResolver,
}

impl DnsMxResolver {
    pub fn new(resolver: TokioAsyncResolver) -> Self {
        Self { resolver }
    }

    pub fn from_settings(settings: &Settings) -> Result<Self, ResolveError> {
        create_resolver(settings.upstream, settings.dns_timeout).map(Self::new)
    }
}

#[async_trait]
impl MxLookup for DnsMxResolver {
    async fn lookup_mx(&self, domain: &str) -> Result<Vec<String>, LookupError> {
        let lookup = self.resolver.mx_lookup(domain).await?;
        let records = lookup
            .iter()
            .map(|mx| (mx.preference(), normalize_host(mx.exchange().to_utf8())))
            .collect();
        Ok(order_by_preference(records))
    }
}

/// Sorts `(preference, host)` pairs so the lowest preference comes first.
/// Records sharing a preference keep their answer order.
pub(crate) fn order_by_preference(mut records: Vec<(u16, String)>) -> Vec<String> {
    records.sort_by_key(|(preference, _)| *preference);
    records.into_iter().map(|(_, host)| host).collect()
}

/// Creates an async DNS resolver
///
/// Configures resolver with:
/// - the given per-query timeout
/// - a single attempt (transient failures surface as `Unresolvable`)
/// - no answer cache, so every batch sees live DNS
fn create_resolver(
    upstream: Upstream,
    timeout: Duration,
) -> Result<TokioAsyncResolver, ResolveError> {
    let (config, mut opts) = match upstream {
        Upstream::System => system_conf::read_system_conf()?,
        Upstream::Google => (ResolverConfig::google(), ResolverOpts::default()),
        Upstream::Cloudflare => (ResolverConfig::cloudflare(), ResolverOpts::default()),
        Upstream::Quad9 => (ResolverConfig::quad9(), ResolverOpts::default()),
    };
    opts.timeout = timeout;
    opts.attempts = 1;
    opts.cache_size = 0;

    Ok(TokioAsyncResolver::tokio(config, opts))
}

/// Strips the FQDN trailing dot so `localhost.` compares equal to `localhost`.
/// The root name `.` is kept verbatim.
pub(crate) fn normalize_host(host: String) -> String {
    match host.strip_suffix('.') {
        Some(stripped) if !stripped.is_empty() => stripped.to_string(),
        _ => host,
    }
}

fn is_blocklisted(host: &str) -> bool {
    BLOCKLIST.contains(&host)
}

/// Classifies a single domain by its MX records.
///
/// 1. Any lookup failure yields `Unresolvable` with no host.
/// 2. The first candidate outside [`BLOCKLIST`] yields `ValidMX`.
/// 3. Otherwise `InvalidMX`, reporting the last candidate examined
///    (empty when the resolver returned none).
pub async fn classify(lookup: &dyn MxLookup, domain: &str) -> DomainResult {
    let candidates = match lookup.lookup_mx(domain).await {
        Ok(candidates) => candidates,
        Err(e) => {
            debug!(domain, error = %e, "MX lookup failed");
            return DomainResult::unresolvable(domain);
        }
    };

    let mut last_examined = "";
    for host in &candidates {
        last_examined = host.as_str();
        if !is_blocklisted(host) {
            return DomainResult::valid_mx(domain, host.as_str());
        }
    }
    DomainResult::invalid_mx(domain, last_examined)
}
