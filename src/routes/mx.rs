use crate::config::ALLOWED_ORIGIN;
use crate::models::{ValidationBatch, ValidationReport};
use crate::validation::batch::BatchValidator;
use actix_web::http::{Method, header};
use actix_web::{HttpResponse, HttpResponseBuilder, web};
use tracing::{error, info, warn};

/// # CORS Preflight
///
/// Answers browser preflight requests for the validation endpoint.
///
/// ## Response
/// - **204 No Content**, no body, with:
///   - `Access-Control-Allow-Origin: mxvalidator.tux-sudo.com`
///   - `Access-Control-Allow-Methods: POST`
///   - `Access-Control-Allow-Headers: Content-Type`
///   - `Access-Control-Max-Age: 3600`
pub async fn preflight() -> HttpResponse {
    let response = HttpResponse::NoContent()
        .insert_header((header::ACCESS_CONTROL_ALLOW_ORIGIN, ALLOWED_ORIGIN))
        .insert_header((header::ACCESS_CONTROL_ALLOW_METHODS, "POST"))
        .insert_header((header::ACCESS_CONTROL_ALLOW_HEADERS, "Content-Type"))
        .insert_header((header::ACCESS_CONTROL_MAX_AGE, "3600"))
        .finish();
    info!(status = response.status().as_u16(), "preflight answered");
    response
}

/// # MX Validation Endpoint
///
/// Resolves MX records for every submitted domain concurrently and reports a
/// verdict per domain.
///
/// ## Request
/// - Method: POST
/// - Body: JSON object with an optional `domains` array. The body is decoded
///   regardless of `Content-Type`.
///
/// ## Responses
/// - **200 OK**: `{"results": [...]}` with one entry per submitted domain,
///   ordered by lookup completion. Match entries by their `domain` field.
/// - **400 Bad Request**: body is not valid JSON for the request shape. The
///   response body is empty and no lookups are made.
///
/// ## Example Request
/// ```json
/// { "domains": ["gmail.com", "nxdomain-test-zzz.invalid"] }
/// ```
pub async fn validate_mx(body: web::Bytes, validator: web::Data<BatchValidator>) -> HttpResponse {
    let batch: ValidationBatch = match serde_json::from_slice(&body) {
        Ok(batch) => batch,
        Err(e) => {
            warn!(error = %e, "could not decode validation request");
            return respond(HttpResponse::BadRequest(), None);
        }
    };

    let results = validator.validate_all(batch.domains).await;
    respond(HttpResponse::Ok(), Some(&ValidationReport { results }))
}

/// Any method other than POST or OPTIONS on the validation resource.
pub async fn method_not_allowed() -> HttpResponse {
    let mut builder = HttpResponse::MethodNotAllowed();
    builder.insert_header((header::ALLOW, "POST, OPTIONS"));
    respond(builder, None)
}

/// Attaches the CORS origin and, when present, the JSON-encoded report.
///
/// An encoding failure is logged and the client gets the status without a body.
fn respond(mut builder: HttpResponseBuilder, report: Option<&ValidationReport>) -> HttpResponse {
    builder.insert_header((header::ACCESS_CONTROL_ALLOW_ORIGIN, ALLOWED_ORIGIN));

    let response = match report.map(serde_json::to_vec) {
        None => builder.finish(),
        Some(Ok(body)) => builder.content_type("application/json").body(body),
        Some(Err(e)) => {
            error!(error = %e, "could not encode validation report");
            builder.finish()
        }
    };

    info!(status = response.status().as_u16(), "request answered");
    response
}

/// Mounts the validation resource at `/`.
///
/// ## Currently Configured Routes
///
/// - `POST /`: MX validation
/// - `OPTIONS /`: CORS preflight
///
/// Any other method on `/` is answered with `405 Method Not Allowed`,
/// carrying the same CORS origin as every other response.
pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::resource("/")
            .route(web::post().to(validate_mx))
            .route(web::method(Method::OPTIONS).to(preflight))
            .default_service(web::to(method_not_allowed)),
    );
}
