//! Middleware configuration for the HTTP server.
//!
//! All middleware configs are re-exported from `ecocycle-server` and support
//! both CLI arguments and environment variables.
//!
//! # Example
//!
//! ```bash
//! ecocycle --allowed-origins "https://example.com" --request-timeout 120
//! ```

use clap::Args;
use ecocycle_server::middleware::{BodyLimitConfig, CorsConfig, RecoveryConfig};
use serde::{Deserialize, Serialize};

use crate::TRACING_TARGET_CONFIG;

/// Middleware configuration combining CORS, body limit and recovery settings.
#[derive(Debug, Clone, Default, Args, Serialize, Deserialize)]
pub struct MiddlewareConfig {
    /// CORS (Cross-Origin Resource Sharing) configuration.
    #[clap(flatten)]
    pub cors: CorsConfig,

    /// Upload size limit.
    #[clap(flatten)]
    pub body_limit: BodyLimitConfig,

    /// Request timeout and panic recovery.
    #[clap(flatten)]
    pub recovery: RecoveryConfig,
}

impl MiddlewareConfig {
    /// Logs middleware configuration at info level.
    pub fn log(&self) {
        tracing::info!(
            target: TRACING_TARGET_CONFIG,
            origins = ?self.cors.allowed_origins,
            max_age_secs = self.cors.max_age_seconds,
            "CORS configuration"
        );

        tracing::info!(
            target: TRACING_TARGET_CONFIG,
            max_upload_size = ?self.body_limit.max_upload_size(),
            request_timeout_secs = self.recovery.request_timeout,
            "Request limits"
        );
    }
}
