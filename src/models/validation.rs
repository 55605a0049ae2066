use serde::{Deserialize, Deserializer, Serialize};

/// Classification of a single domain's MX lookup.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Verdict {
    /// The lookup itself failed (NXDOMAIN, timeout, network error, ...).
    Unresolvable,
    /// The lookup succeeded but no candidate survived the blocklist.
    #[serde(rename = "InvalidMX")]
    InvalidMx,
    /// At least one candidate is a routable host.
    #[serde(rename = "ValidMX")]
    ValidMx,
}

/// Outcome for one domain of a batch.
///
/// `valid` is always serialized; `domain` and `any_mx` are dropped when empty.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct DomainResult {
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub domain: String,
    pub valid: bool,
    pub status: Verdict,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub any_mx: String,
}

impl DomainResult {
    pub fn unresolvable(domain: impl Into<String>) -> Self {
        Self {
            domain: domain.into(),
            valid: false,
            status: Verdict::Unresolvable,
            any_mx: String::new(),
        }
    }

    pub fn invalid_mx(domain: impl Into<String>, last_examined: impl Into<String>) -> Self {
        Self {
            domain: domain.into(),
            valid: false,
            status: Verdict::InvalidMx,
            any_mx: last_examined.into(),
        }
    }

    pub fn valid_mx(domain: impl Into<String>, host: impl Into<String>) -> Self {
        Self {
            domain: domain.into(),
            valid: true,
            status: Verdict::ValidMx,
            any_mx: host.into(),
        }
    }
}

/// Request body: `{"domains": [...]}`.
///
/// A missing or `null` `domains` field is an empty batch.
#[derive(Deserialize, Debug, Default, Clone, PartialEq, Eq)]
pub struct ValidationBatch {
    #[serde(default, deserialize_with = "null_as_empty")]
    pub domains: Vec<String>,
}

/// Response body: `{"results": [...]}`. `results` is emitted even when empty.
#[derive(Serialize, Deserialize, Debug, Default, Clone, PartialEq, Eq)]
pub struct ValidationReport {
    pub results: Vec<DomainResult>,
}

fn null_as_empty<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Option::<Vec<String>>::deserialize(deserializer).map(Option::unwrap_or_default)
}
