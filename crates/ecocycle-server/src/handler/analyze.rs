//! Detailed image analysis handler.

use axum::extract::State;
use axum::routing::post;
use axum::{Json, Router};

use crate::extract::ImageUpload;
use crate::handler::response::DetailedAnalysisResponse;
use crate::handler::{Error, Result};
use crate::service::{ServiceState, WasteClassifier};

/// Tracing target for detailed analysis operations.
const TRACING_TARGET: &str = "ecocycle_server::handler::analyze";

/// Returns a free-form description of the uploaded image.
#[tracing::instrument(skip_all)]
async fn analyze_detailed(
    State(classifier): State<WasteClassifier>,
    upload: ImageUpload,
) -> Result<Json<DetailedAnalysisResponse>> {
    let model = classifier.config().detailed_model.clone();

    tracing::info!(
        target: TRACING_TARGET,
        model = %model,
        image_bytes = upload.image.len(),
        "Detailed analysis requested"
    );

    let response = classifier
        .analyze_detailed(upload.image)
        .await
        .map_err(|error| {
            let message = format!("Detailed analysis failed: {error}");
            Error::from(error).with_message(message)
        })?;

    Ok(Json(DetailedAnalysisResponse {
        detailed_analysis: response.content,
        model_used: model,
    }))
}

/// Returns a [`Router`] with the detailed analysis route.
pub fn routes() -> Router<ServiceState> {
    Router::new().route("/analyze-detailed", post(analyze_detailed))
}
