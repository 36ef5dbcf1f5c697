//! Inference backend connection test handler.

use axum::extract::State;
use axum::routing::get;
use axum::{Json, Router};

use crate::handler::response::ConnectionTestResponse;
use crate::handler::{Error, Result};
use crate::service::{ServiceState, WasteClassifier};

/// Tracing target for connection test operations.
const TRACING_TARGET: &str = "ecocycle_server::handler::connection";

/// Sends a short text-only prompt to verify the backend answers.
#[tracing::instrument(skip_all)]
async fn test_connection(
    State(classifier): State<WasteClassifier>,
) -> Result<Json<ConnectionTestResponse>> {
    let provider = classifier.provider_name().to_owned();

    let response = classifier.test_connection().await.map_err(|error| {
        let message = format!("{provider} API test failed: {error}");
        Error::from(error).with_message(message)
    })?;

    tracing::info!(
        target: TRACING_TARGET,
        provider = %provider,
        model = %response.model,
        elapsed_ms = response.elapsed.as_millis(),
        "Connection test succeeded"
    );

    Ok(Json(ConnectionTestResponse {
        status: format!("SUCCESS! {provider} API is working"),
        test_response: response.content,
        available_models: classifier
            .config()
            .candidates()
            .map(ToOwned::to_owned)
            .collect(),
    }))
}

/// Returns a [`Router`] with the connection test route.
pub fn routes() -> Router<ServiceState> {
    Router::new().route("/test-connection", get(test_connection))
}

#[cfg(test)]
mod tests {
    use axum::http::StatusCode;
    use ecocycle_core::MockProvider;

    use super::*;
    use crate::handler::test::create_test_server;

    #[tokio::test]
    async fn probe_success() -> anyhow::Result<()> {
        let provider = MockProvider::with_response("Hello! Connection works.");
        let server = create_test_server(provider.clone())?;

        let response = server.get("/test-connection").await;
        response.assert_status_ok();

        let body = response.json::<ConnectionTestResponse>();
        assert_eq!(body.status, "SUCCESS! Mock API is working");
        assert_eq!(body.test_response, "Hello! Connection works.");
        assert_eq!(
            body.available_models,
            ["meta-llama/llama-4-scout-17b-16e-instruct"]
        );

        let requests = provider.requests();
        assert_eq!(requests[0].prompt, "Hello, just testing the connection.");
        assert_eq!(requests[0].max_tokens, 50);
        assert!(requests[0].image.is_none());
        Ok(())
    }

    #[tokio::test]
    async fn probe_failure() -> anyhow::Result<()> {
        let server = create_test_server(MockProvider::failing())?;

        let response = server.get("/test-connection").await;
        response.assert_status(StatusCode::BAD_GATEWAY);

        let body = response.json::<serde_json::Value>();
        let error = body["error"].as_str().unwrap_or_default();
        assert!(error.starts_with("Mock API test failed: "));
        Ok(())
    }
}
