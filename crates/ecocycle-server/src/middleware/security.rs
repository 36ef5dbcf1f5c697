//! Security middleware for HTTP request protection.
//!
//! Applies CORS rules and request body size limits.

use std::time::Duration;

use axum::Router;
use axum::extract::DefaultBodyLimit;
use axum::http::{HeaderValue, StatusCode, header};
use axum::middleware::map_response;
use axum::response::{IntoResponse, Response};
#[cfg(feature = "config")]
use clap::Args;
use serde::{Deserialize, Serialize};
use tower_http::cors::{AllowOrigin, Any, CorsLayer};
use tower_http::limit::RequestBodyLimitLayer;

use crate::handler::ErrorKind;

/// Default maximum upload size: 20 MiB.
pub const DEFAULT_MAX_UPLOAD_SIZE: usize = 20 * 1024 * 1024;

/// Tracing target for security configuration.
const TRACING_TARGET: &str = "ecocycle_server::middleware::security";

/// Extension trait for `axum::`[`Router`] to apply security middleware.
pub trait RouterSecurityExt<S> {
    /// Layers CORS and body limit middlewares with the provided configurations.
    fn with_security(self, cors: &CorsConfig, body_limit: &BodyLimitConfig) -> Self;

    /// Layers security middlewares with default configurations.
    ///
    /// Allows any origin and uploads of up to 20 MiB.
    fn with_default_security(self) -> Self;
}

impl<S> RouterSecurityExt<S> for Router<S>
where
    S: Clone + Send + Sync + 'static,
{
    fn with_security(self, cors: &CorsConfig, body_limit: &BodyLimitConfig) -> Self {
        let router = match body_limit.max_upload_size() {
            Some(limit) => self
                .layer(DefaultBodyLimit::max(limit))
                .layer(RequestBodyLimitLayer::new(limit))
                .layer(map_response(render_payload_too_large)),
            None => self.layer(DefaultBodyLimit::disable()),
        };

        router.layer(cors.to_layer())
    }

    fn with_default_security(self) -> Self {
        self.with_security(&CorsConfig::default(), &BodyLimitConfig::default())
    }
}

/// Replaces plain-text 413 responses from the body limit layers with the
/// JSON error body every other failure uses.
async fn render_payload_too_large(response: Response) -> Response {
    if response.status() != StatusCode::PAYLOAD_TOO_LARGE {
        return response;
    }

    let is_json = response
        .headers()
        .get(header::CONTENT_TYPE)
        .and_then(|value| value.to_str().ok())
        .is_some_and(|value| value.starts_with("application/json"));

    if is_json {
        response
    } else {
        ErrorKind::PayloadTooLarge.into_response()
    }
}

/// Default CORS preflight max age in seconds.
pub const DEFAULT_CORS_MAX_AGE_SECS: u64 = 3600;

/// CORS (Cross-Origin Resource Sharing) configuration.
///
/// With no configured origins every origin, method and header is allowed.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "config", derive(Args))]
#[must_use = "config does nothing unless you use it"]
pub struct CorsConfig {
    /// List of allowed CORS origins.
    ///
    /// If empty, any origin is allowed.
    #[cfg_attr(
        feature = "config",
        arg(long, env = "CORS_ORIGINS", value_delimiter = ',')
    )]
    #[serde(default)]
    pub allowed_origins: Vec<String>,

    /// Maximum age for CORS preflight requests in seconds.
    #[cfg_attr(
        feature = "config",
        arg(long, env = "CORS_MAX_AGE", default_value_t = DEFAULT_CORS_MAX_AGE_SECS)
    )]
    #[serde(default = "default_max_age")]
    pub max_age_seconds: u64,
}

fn default_max_age() -> u64 {
    DEFAULT_CORS_MAX_AGE_SECS
}

impl Default for CorsConfig {
    fn default() -> Self {
        Self {
            allowed_origins: Vec::new(),
            max_age_seconds: DEFAULT_CORS_MAX_AGE_SECS,
        }
    }
}

impl CorsConfig {
    /// Returns the CORS max age as a Duration.
    pub fn max_age(&self) -> Duration {
        Duration::from_secs(self.max_age_seconds)
    }

    /// Converts configured origins to HeaderValue list, skipping invalid ones.
    pub fn to_header_values(&self) -> Vec<HeaderValue> {
        self.allowed_origins
            .iter()
            .filter_map(|origin| match origin.parse() {
                Ok(value) => Some(value),
                Err(_) => {
                    tracing::warn!(
                        target: TRACING_TARGET,
                        origin = %origin,
                        "Ignoring invalid CORS origin"
                    );
                    None
                }
            })
            .collect()
    }

    /// Builds the CORS layer.
    pub fn to_layer(&self) -> CorsLayer {
        let origin = if self.allowed_origins.is_empty() {
            AllowOrigin::from(Any)
        } else {
            AllowOrigin::list(self.to_header_values())
        };

        CorsLayer::new()
            .allow_origin(origin)
            .allow_methods(Any)
            .allow_headers(Any)
            .max_age(self.max_age())
    }
}

/// Request body size limits.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "config", derive(Args))]
#[must_use = "config does nothing unless you use it"]
pub struct BodyLimitConfig {
    /// Maximum accepted request body in bytes; 0 disables the limit.
    #[cfg_attr(
        feature = "config",
        arg(long, env = "MAX_UPLOAD_SIZE", default_value_t = DEFAULT_MAX_UPLOAD_SIZE)
    )]
    pub max_upload_size: usize,
}

impl Default for BodyLimitConfig {
    fn default() -> Self {
        Self {
            max_upload_size: DEFAULT_MAX_UPLOAD_SIZE,
        }
    }
}

impl BodyLimitConfig {
    /// Returns the limit, or `None` when disabled.
    pub fn max_upload_size(&self) -> Option<usize> {
        (self.max_upload_size > 0).then_some(self.max_upload_size)
    }
}

#[cfg(test)]
mod tests {
    use axum::http::HeaderName;
    use axum::routing::post;
    use axum_test::TestServer;

    use super::*;

    async fn echo(body: String) -> String {
        body
    }

    fn server(cors: &CorsConfig, body_limit: &BodyLimitConfig) -> anyhow::Result<TestServer> {
        let router = Router::new()
            .route("/echo", post(echo))
            .with_security(cors, body_limit);
        Ok(TestServer::new(router)?)
    }

    #[tokio::test]
    async fn open_cors_by_default() -> anyhow::Result<()> {
        let server = server(&CorsConfig::default(), &BodyLimitConfig::default())?;

        let response = server
            .post("/echo")
            .add_header(
                HeaderName::from_static("origin"),
                HeaderValue::from_static("http://frontend.example"),
            )
            .text("hi")
            .await;

        response.assert_status_ok();
        assert_eq!(
            response.headers().get(header::ACCESS_CONTROL_ALLOW_ORIGIN),
            Some(&HeaderValue::from_static("*"))
        );
        Ok(())
    }

    #[tokio::test]
    async fn configured_origins_are_enforced() -> anyhow::Result<()> {
        let cors = CorsConfig {
            allowed_origins: vec!["https://app.example".to_owned()],
            max_age_seconds: 600,
        };
        let server = server(&cors, &BodyLimitConfig::default())?;

        let response = server
            .post("/echo")
            .add_header(
                HeaderName::from_static("origin"),
                HeaderValue::from_static("https://evil.example"),
            )
            .text("hi")
            .await;

        assert!(
            response
                .headers()
                .get(header::ACCESS_CONTROL_ALLOW_ORIGIN)
                .is_none()
        );
        Ok(())
    }

    #[tokio::test]
    async fn oversized_body_is_rejected() -> anyhow::Result<()> {
        let limit = BodyLimitConfig {
            max_upload_size: 8,
        };
        let server = server(&CorsConfig::default(), &limit)?;

        let response = server.post("/echo").text("x".repeat(100)).await;
        response.assert_status(StatusCode::PAYLOAD_TOO_LARGE);

        let body = response.json::<serde_json::Value>();
        assert_eq!(body["name"], "payload_too_large");
        assert!(body["error"].is_string());
        Ok(())
    }

    #[test]
    fn zero_disables_limit() {
        let limit = BodyLimitConfig { max_upload_size: 0 };
        assert_eq!(limit.max_upload_size(), None);
        assert_eq!(
            BodyLimitConfig::default().max_upload_size(),
            Some(20 * 1024 * 1024)
        );
    }

    #[test]
    fn invalid_origins_are_skipped() {
        let cors = CorsConfig {
            allowed_origins: vec!["https://ok.example".to_owned(), "bad\norigin".to_owned()],
            ..Default::default()
        };
        assert_eq!(cors.to_header_values().len(), 1);
    }
}
