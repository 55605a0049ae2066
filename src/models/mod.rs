/// # MX Validation Payloads
///
/// Request and response bodies for the MX validation endpoint, plus the
/// per-domain [`DomainResult`] produced by the classifier.
///
/// ## Example Request
/// ```json
/// { "domains": ["gmail.com", "nxdomain-test-zzz.invalid"] }
/// ```
///
/// ## Example Response
/// ```json
/// {
///   "results": [
///     { "domain": "nxdomain-test-zzz.invalid", "valid": false, "status": "Unresolvable" },
///     { "domain": "gmail.com", "valid": true, "status": "ValidMX", "any_mx": "gmail-smtp-in.l.google.com" }
///   ]
/// }
/// ```
///
/// [`DomainResult`]: crate::models::validation::DomainResult
pub mod validation;

pub use validation::{DomainResult, ValidationBatch, ValidationReport, Verdict};
