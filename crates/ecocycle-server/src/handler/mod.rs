//! All `axum::`[`Router`]s with related `axum::`[`Handler`]s.
//!
//! # Usage Example
//!
//! ```rust,ignore
//! use ecocycle_core::MockProvider;
//! use ecocycle_server::handler::routes;
//! use ecocycle_server::service::{ClassifierConfig, ServiceState};
//!
//! let inference = MockProvider::default().into_service();
//! let state = ServiceState::new(&ClassifierConfig::default(), inference)?;
//! let router = routes(state);
//! ```
//!
//! [`Router`]: axum::routing::Router
//! [`Handler`]: axum::handler::Handler

mod analyze;
mod classify;
mod connection;
mod error;
mod response;
mod setup;

use axum::Router;
use axum::response::{IntoResponse, Response};

pub use crate::handler::error::{Error, ErrorKind, Result};
pub use crate::handler::response::{
    ClassificationResponse, ConnectionTestResponse, DebugInfo, DetailedAnalysisResponse,
    ErrorResponse, ModelInfo, PriceEntry, RAW_RESPONSE_PREVIEW_CHARS, SetupResponse,
};
use crate::service::ServiceState;

#[inline]
async fn handler() -> Response {
    ErrorKind::NotFound.into_response()
}

/// Returns a [`Router`] with all routes and the given state.
pub fn routes(state: ServiceState) -> Router {
    Router::new()
        .merge(classify::routes())
        .merge(analyze::routes())
        .merge(connection::routes())
        .merge(setup::routes())
        .fallback(handler)
        .with_state(state)
}
