/// Resolves and classifies the MX records of a single domain.
///
/// The lookup goes through the [`MxLookup`] seam so the resolver can be
/// swapped out. Each domain gets one of three verdicts:
/// 1. `Unresolvable`: the lookup failed for any reason
/// 2. `ValidMX`: some candidate is outside the placeholder blocklist
/// 3. `InvalidMX`: every candidate (possibly none) is blocklisted
///
/// # Examples
/// ```no_run
/// # async fn example() {
/// use mx_validator::config::Settings;
/// use mx_validator::validation::dnsmx::{DnsMxResolver, classify};
///
/// let resolver = DnsMxResolver::from_settings(&Settings::default()).unwrap();
/// let result = classify(&resolver, "gmail.com").await;
/// assert!(result.valid);
/// # }
/// ```
///
/// [`MxLookup`]: crate::validation::dnsmx::MxLookup
pub mod dnsmx;

/// Concurrent fan-out of a whole batch of domains.
///
/// One task per domain, results gathered in completion order.
pub mod batch;
