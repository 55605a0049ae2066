use actix_web::web;

/// # MX Validation Endpoint
///
/// Validates the MX records of a batch of domains.
///
/// ## Request
/// - Method: POST
/// - Body: JSON object with a `domains` array
///
/// ## Responses
/// - **200 OK**: one result per domain
/// - **204 No Content**: CORS preflight (`OPTIONS`)
/// - **400 Bad Request**: body is not valid JSON
///
/// ## Example Request
/// ```json
/// { "domains": ["example.com"] }
/// ```
pub mod mx;

#[cfg(test)]
mod mx_edge_case_tests;

/// # Route Configuration
///
/// Mounts the single validation resource at the root path.
///
/// ## Example Endpoints
///
/// ```text
/// POST    / - MX validation
/// OPTIONS / - CORS preflight
/// ```
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.configure(mx::configure_routes);
}
