#![forbid(unsafe_code)]
#![cfg_attr(docsrs, feature(doc_cfg))]
#![doc = include_str!("../README.md")]

mod config;
mod server;

use std::process;

use anyhow::Context;
use axum::Router;
use ecocycle_server::handler::routes;
use ecocycle_server::middleware::{RouterObservabilityExt, RouterRecoveryExt, RouterSecurityExt};
use ecocycle_server::service::ServiceState;

use crate::config::{Cli, MiddlewareConfig, create_inference};
use crate::server::ServerError;

// Tracing target constants
pub const TRACING_TARGET_SERVER_STARTUP: &str = "ecocycle_cli::server::startup";
pub const TRACING_TARGET_SERVER_SHUTDOWN: &str = "ecocycle_cli::server::shutdown";
pub const TRACING_TARGET_CONFIG: &str = "ecocycle_cli::config";

#[tokio::main]
async fn main() {
    let Err(error) = run().await else {
        tracing::info!(
            target: TRACING_TARGET_SERVER_SHUTDOWN,
            "application terminated successfully"
        );
        process::exit(0);
    };

    if tracing::enabled!(tracing::Level::ERROR) {
        tracing::error!(
            target: TRACING_TARGET_SERVER_SHUTDOWN,
            error = format!("{error:#}"),
            "application terminated with error"
        );

        if let Some(server_error) = error.downcast_ref::<ServerError>() {
            tracing::info!(
                target: TRACING_TARGET_SERVER_SHUTDOWN,
                error_code = server_error.error_code(),
                recoverable = server_error.is_recoverable(),
                suggestion = server_error.suggestion(),
                "recovery suggestion"
            );
        }
    } else {
        eprintln!("Error: {error:#}");
    }

    process::exit(1);
}

/// Main application entry point.
async fn run() -> anyhow::Result<()> {
    let cli = Cli::init();

    Cli::init_tracing().context("failed to initialize tracing")?;
    cli.log();
    cli.validate()?;

    let inference = create_inference(&cli.groq).context("failed to create the Groq client")?;
    let state = ServiceState::new(&cli.classifier, inference)
        .context("failed to create service state")?;
    let router = create_router(state, &cli.middleware);

    server::serve(router, cli.server).await?;

    Ok(())
}

/// Creates the router with all middleware layers applied.
///
/// Middleware is applied in reverse order (last added = outermost):
/// 1. Recovery (outermost) - catches panics and enforces timeouts
/// 2. Observability - request IDs and tracing spans
/// 3. Security - CORS and upload size limits
/// 4. Routes (innermost) - actual request handlers
fn create_router(state: ServiceState, middleware: &MiddlewareConfig) -> Router {
    routes(state)
        .with_security(&middleware.cors, &middleware.body_limit)
        .with_observability()
        .with_recovery(&middleware.recovery)
}

#[cfg(test)]
mod tests {
    use axum::http::{HeaderName, HeaderValue};
    use axum_test::TestServer;
    use axum_test::multipart::{MultipartForm, Part};
    use ecocycle_core::MockProvider;
    use ecocycle_server::service::ClassifierConfig;

    use super::*;

    fn server(provider: MockProvider) -> anyhow::Result<TestServer> {
        let state = ServiceState::new(&ClassifierConfig::default(), provider.into_service())?;
        let router = create_router(state, &MiddlewareConfig::default());
        Ok(TestServer::new(router)?)
    }

    #[tokio::test]
    async fn router_serves_setup_with_request_id() -> anyhow::Result<()> {
        let server = server(MockProvider::default())?;

        let response = server.get("/setup").await;
        response.assert_status_ok();
        assert!(response.headers().contains_key("x-request-id"));

        let body = response.json::<serde_json::Value>();
        assert_eq!(body["title"], "Groq Vision API Setup");
        Ok(())
    }

    #[tokio::test]
    async fn router_classifies_through_middleware() -> anyhow::Result<()> {
        let server = server(MockProvider::with_response(
            r#"{"class": "Metal", "confidence": 0.8}"#,
        ))?;

        let form = MultipartForm::new().add_part(
            "file",
            Part::bytes(b"jpeg".to_vec())
                .file_name("can.jpg")
                .mime_type("image/jpeg"),
        );
        let response = server
            .post("/classify")
            .add_header(
                HeaderName::from_static("origin"),
                HeaderValue::from_static("http://localhost:3000"),
            )
            .multipart(form)
            .await;

        response.assert_status_ok();
        assert!(
            response
                .headers()
                .contains_key("access-control-allow-origin")
        );

        let body = response.json::<serde_json::Value>();
        assert_eq!(body["class"], "Metal");
        assert_eq!(body["price_per_kg"], 50);
        Ok(())
    }
}
