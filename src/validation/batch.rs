use crate::models::{DomainResult, Verdict};
use crate::validation::dnsmx::{MxLookup, classify};
use futures::FutureExt;
use std::collections::HashMap;
use std::panic::AssertUnwindSafe;
use std::sync::Arc;
use std::time::Instant;
use tokio::sync::Semaphore;
use tokio::task::JoinSet;
use tracing::{debug, error, warn};

/// Fans a batch of domains out to concurrent MX classifications.
///
/// Every domain gets its own task. Results are collected in the order the
/// lookups finish, not the order the domains were submitted, so callers match
/// them up by [`DomainResult::domain`].
#[derive(Clone)]
pub struct BatchValidator {
    lookup: Arc<dyn MxLookup>,
    max_in_flight: Option<usize>,
}

impl BatchValidator {
    pub fn new(lookup: Arc<dyn MxLookup>) -> Self {
        Self {
            lookup,
            max_in_flight: None,
        }
    }

    /// Caps how many lookups of a single batch may be in flight at once.
    /// `None` and `Some(0)` leave fan-out unbounded.
    pub fn with_max_in_flight(mut self, limit: Option<usize>) -> Self {
        self.max_in_flight = limit.filter(|n| *n > 0);
        self
    }

    /// Classifies every domain and returns one result per input entry,
    /// duplicates included.
    ///
    /// Returns once the slowest lookup has finished. Dropping the returned
    /// future aborts the lookups still in flight.
    pub async fn validate_all(&self, domains: Vec<String>) -> Vec<DomainResult> {
        if domains.is_empty() {
            return Vec::new();
        }

        let started = Instant::now();
        let total = domains.len();
        let permits = self.max_in_flight.map(|n| Arc::new(Semaphore::new(n)));
        let mut outstanding = Outstanding::new(&domains);
        let mut tasks = JoinSet::new();

        for domain in domains {
            let lookup = Arc::clone(&self.lookup);
            let permits = permits.clone();
            tasks.spawn(async move {
                let _permit = match permits {
                    Some(permits) => permits.acquire_owned().await.ok(),
                    None => None,
                };
                classify_guarded(lookup.as_ref(), domain).await
            });
        }

        let mut results = Vec::with_capacity(total);
        while let Some(joined) = tasks.join_next().await {
            match joined {
                Ok(result) => {
                    outstanding.settle(&result.domain);
                    results.push(result);
                }
                Err(e) => error!(error = %e, "classification task did not complete"),
            }
        }
        results.extend(outstanding.into_unresolvable());

        let count = |verdict: Verdict| results.iter().filter(|r| r.status == verdict).count();
        debug!(
            domains = total,
            valid = count(Verdict::ValidMx),
            invalid = count(Verdict::InvalidMx),
            unresolvable = count(Verdict::Unresolvable),
            elapsed_ms = started.elapsed().as_millis() as u64,
            "batch validated"
        );

        results
    }
}

/// Domains dispatched but not yet answered, counted per name so duplicates
/// are tracked individually.
struct Outstanding(HashMap<String, usize>);

impl Outstanding {
    fn new(domains: &[String]) -> Self {
        let mut counts = HashMap::new();
        for domain in domains {
            *counts.entry(domain.clone()).or_insert(0) += 1;
        }
        Self(counts)
    }

    fn settle(&mut self, domain: &str) {
        if let Some(count) = self.0.get_mut(domain) {
            *count -= 1;
            if *count == 0 {
                self.0.remove(domain);
            }
        }
    }

    /// One `Unresolvable` entry for every domain whose task never reported back.
    fn into_unresolvable(self) -> impl Iterator<Item = DomainResult> {
        self.0.into_iter().flat_map(|(domain, count)| {
            std::iter::repeat_n(domain, count).map(DomainResult::unresolvable)
        })
    }
}

/// A panicking lookup still yields a result so the batch keeps its length.
async fn classify_guarded(lookup: &dyn MxLookup, domain: String) -> DomainResult {
    let outcome = AssertUnwindSafe(classify(lookup, &domain))
        .catch_unwind()
        .await;

    match outcome {
        Ok(result) => result,
        Err(_) => {
            warn!(domain = %domain, "MX classification panicked");
            DomainResult::unresolvable(domain)
        }
    }
}
