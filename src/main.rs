use actix_web::{App, HttpServer, web::Data};
use mx_validator::config::Settings;
use mx_validator::telemetry::init_tracing;
use mx_validator::validation::batch::BatchValidator;
use mx_validator::validation::dnsmx::DnsMxResolver;
use std::sync::Arc;
use tracing::info;

/// MX Validator Service Entry Point
///
/// Configures and launches the Actix-web HTTP server with:
/// - A single MX validation resource at `/` (POST + CORS preflight)
/// - Environment configuration via `.env` file
/// - One shared resolver and batch validator for every worker
///
/// # Configuration
/// - Server binds to `127.0.0.1:8080` unless `MXVALIDATOR_HOST` / `PORT` say otherwise
/// - See [`Settings`] for the resolver knobs
#[actix_web::main]
async fn main() -> anyhow::Result<()> {
    let settings = Settings::from_env()?;
    init_tracing();

    let resolver = DnsMxResolver::from_settings(&settings)?;
    let validator =
        BatchValidator::new(Arc::new(resolver)).with_max_in_flight(settings.max_in_flight);

    info!(
        host = %settings.host,
        port = settings.port,
        upstream = ?settings.upstream,
        dns_timeout_ms = settings.dns_timeout.as_millis() as u64,
        max_in_flight = ?settings.max_in_flight,
        "starting MX validator v{}",
        env!("CARGO_PKG_VERSION")
    );

    let validator = Data::new(validator);
    HttpServer::new(move || {
        App::new()
            .app_data(validator.clone())
            .configure(mx_validator::routes::configure)
    })
    .bind((settings.host.as_str(), settings.port))?
    .run()
    .await?;

    Ok(())
}
