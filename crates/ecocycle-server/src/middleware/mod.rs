//! Middleware for `axum::Router` and HTTP request processing.
//!
//! Each concern is an extension trait on [`Router`](axum::Router):
//!
//! - [`RouterSecurityExt`]: CORS and upload size limits
//! - [`RouterRecoveryExt`]: request timeouts and panic recovery
//! - [`RouterObservabilityExt`]: request IDs and request tracing
//!
//! # Quick Start
//!
//! ```rust,ignore
//! use ecocycle_server::middleware::*;
//!
//! let app = router
//!     .with_security(&CorsConfig::default(), &BodyLimitConfig::default())
//!     .with_recovery(&RecoveryConfig::default())
//!     .with_observability();
//! ```

mod observability;
mod recovery;
mod security;

pub use observability::{REQUEST_ID_HEADER, RouterObservabilityExt};
pub use recovery::{DEFAULT_REQUEST_TIMEOUT_SECS, RecoveryConfig, RouterRecoveryExt};
pub use security::{BodyLimitConfig, CorsConfig, DEFAULT_MAX_UPLOAD_SIZE, RouterSecurityExt};
