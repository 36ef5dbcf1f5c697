//! Setup guidance handler.

use axum::extract::State;
use axum::routing::get;
use axum::{Json, Router};

use crate::handler::response::SetupResponse;
use crate::service::{ServiceState, WasteClassifier};

/// Returns static setup guidance with the configured models and prices.
async fn setup_guide(State(classifier): State<WasteClassifier>) -> Json<SetupResponse> {
    Json(SetupResponse::new(classifier.config(), classifier.pricing()))
}

/// Returns a [`Router`] with the setup guidance route.
pub fn routes() -> Router<ServiceState> {
    Router::new().route("/setup", get(setup_guide))
}
