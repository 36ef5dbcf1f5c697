//! Waste classification handler.

use axum::extract::State;
use axum::routing::post;
use axum::{Json, Router};

use crate::extract::ImageUpload;
use crate::handler::response::ClassificationResponse;
use crate::handler::{Error, Result};
use crate::service::{ServiceState, WasteClassifier};

/// Tracing target for classification operations.
const TRACING_TARGET: &str = "ecocycle_server::handler::classify";

/// Classifies an uploaded image and quotes its recycling price.
#[tracing::instrument(skip_all)]
async fn classify(
    State(classifier): State<WasteClassifier>,
    upload: ImageUpload,
) -> Result<Json<ClassificationResponse>> {
    tracing::info!(
        target: TRACING_TARGET,
        file_name = upload.file_name.as_deref(),
        image_bytes = upload.image.len(),
        "Classification requested"
    );

    let report = classifier.classify(upload.image).await.map_err(|error| {
        let message = format!(
            "All {} models failed. Last error: {}",
            classifier.provider_name(),
            error
        );
        Error::from(error).with_message(message)
    })?;

    Ok(Json(report.into()))
}

/// Returns a [`Router`] with the classification route.
pub fn routes() -> Router<ServiceState> {
    Router::new().route("/classify", post(classify))
}

#[cfg(test)]
mod tests {
    use axum::http::StatusCode;
    use axum_test::TestServer;
    use axum_test::multipart::{MultipartForm, Part};
    use ecocycle_core::MockProvider;

    use super::*;
    use crate::handler::test::{create_test_server, create_test_server_with_config, image_form};
    use crate::middleware::{BodyLimitConfig, CorsConfig, RouterSecurityExt};
    use crate::service::ClassifierConfig;

    #[tokio::test]
    async fn recyclable_item_is_priced() -> anyhow::Result<()> {
        let provider = MockProvider::with_response(
            r#"{"class": "Plastic", "confidence": 0.9, "reasoning": "PET bottle"}"#,
        );
        let server = create_test_server(provider)?;

        let response = server.post("/classify").multipart(image_form(b"jpeg")).await;
        response.assert_status_ok();

        let body = response.json::<ClassificationResponse>();
        assert_eq!(body.class, "Plastic");
        assert_eq!(body.confidence, 0.9);
        assert!(body.recyclable);
        assert_eq!(body.price_per_kg, 30);
        assert_eq!(body.debug_info.reasoning, "PET bottle");
        assert_eq!(body.debug_info.original_class, None);
        assert_eq!(
            body.debug_info.model_used,
            "meta-llama/llama-4-scout-17b-16e-instruct"
        );
        Ok(())
    }

    #[tokio::test]
    async fn organic_item_is_non_recyclable() -> anyhow::Result<()> {
        let provider =
            MockProvider::with_response(r#"{"class": "Organic", "confidence": 0.95}"#);
        let server = create_test_server(provider)?;

        let response = server.post("/classify").multipart(image_form(b"jpeg")).await;
        response.assert_status_ok();

        let body = response.json::<serde_json::Value>();
        assert_eq!(body["class"], "Non-recyclable");
        assert_eq!(body["recyclable"], false);
        assert_eq!(body["price_per_kg"], 0);
        assert_eq!(body["debug_info"]["original_class"], "Organic");
        Ok(())
    }

    #[tokio::test]
    async fn unknown_class_is_not_paid_for() -> anyhow::Result<()> {
        let provider = MockProvider::with_response(
            r#"{"class": "Textile", "confidence": 0.9, "reasoning": "polyester, a plastic fibre"}"#,
        );
        let server = create_test_server(provider)?;

        let response = server.post("/classify").multipart(image_form(b"jpeg")).await;
        response.assert_status_ok();

        let body = response.json::<ClassificationResponse>();
        assert_eq!(body.class, "Non-recyclable");
        assert!(!body.recyclable);
        assert_eq!(body.price_per_kg, 0);
        assert_eq!(body.confidence, 0.9);
        assert_eq!(body.debug_info.original_class.as_deref(), Some("Textile"));
        assert_eq!(body.debug_info.reasoning, "polyester, a plastic fibre");
        Ok(())
    }

    #[tokio::test]
    async fn keyword_reply_is_classified() -> anyhow::Result<()> {
        let provider = MockProvider::with_response("I think this is made of plastic material");
        let server = create_test_server(provider)?;

        let body = server
            .post("/classify")
            .multipart(image_form(b"jpeg"))
            .await
            .json::<ClassificationResponse>();

        assert_eq!(body.class, "Plastic");
        assert_eq!(body.confidence, 0.7);
        assert!(body.debug_info.reasoning.contains("plastic"));
        Ok(())
    }

    #[tokio::test]
    async fn raw_response_is_truncated() -> anyhow::Result<()> {
        let provider = MockProvider::with_response(format!("glass {}", "x".repeat(1000)));
        let server = create_test_server(provider)?;

        let body = server
            .post("/classify")
            .multipart(image_form(b"jpeg"))
            .await
            .json::<ClassificationResponse>();

        assert_eq!(body.debug_info.raw_response.chars().count(), 200);
        assert!(body.debug_info.raw_response.starts_with("glass "));
        Ok(())
    }

    #[tokio::test]
    async fn first_file_part_is_accepted() -> anyhow::Result<()> {
        let server = create_test_server(MockProvider::default())?;

        let form = MultipartForm::new()
            .add_text("note", "kitchen bin")
            .add_part("image", Part::bytes(b"jpeg".to_vec()).file_name("a.jpg"));

        let response = server.post("/classify").multipart(form).await;
        response.assert_status_ok();
        Ok(())
    }

    #[tokio::test]
    async fn falls_back_to_next_model() -> anyhow::Result<()> {
        let provider = MockProvider::default().with_failing_model("primary");
        let config = ClassifierConfig::default().with_vision_models(["primary", "secondary"]);
        let server = create_test_server_with_config(provider, &config)?;

        let body = server
            .post("/classify")
            .multipart(image_form(b"jpeg"))
            .await
            .json::<ClassificationResponse>();

        assert_eq!(body.debug_info.model_used, "secondary");
        Ok(())
    }

    #[tokio::test]
    async fn all_models_failing_is_bad_gateway() -> anyhow::Result<()> {
        let server = create_test_server(MockProvider::failing())?;

        let response = server.post("/classify").multipart(image_form(b"jpeg")).await;
        response.assert_status(StatusCode::BAD_GATEWAY);

        let body = response.json::<serde_json::Value>();
        let error = body["error"].as_str().unwrap_or_default();
        assert!(error.starts_with("All Mock models failed. Last error: "));
        assert!(error.contains("mock transport failure"));
        Ok(())
    }

    #[tokio::test]
    async fn missing_file_is_unprocessable() -> anyhow::Result<()> {
        let server = create_test_server(MockProvider::default())?;

        let form = MultipartForm::new().add_text("note", "no image here");
        let response = server.post("/classify").multipart(form).await;
        response.assert_status(StatusCode::UNPROCESSABLE_ENTITY);

        let body = response.json::<serde_json::Value>();
        assert_eq!(body["error"], "No file uploaded");
        Ok(())
    }

    #[tokio::test]
    async fn oversized_upload_is_payload_too_large() -> anyhow::Result<()> {
        let state = ServiceState::new(
            &ClassifierConfig::default(),
            MockProvider::default().into_service(),
        )?;
        let limit = BodyLimitConfig {
            max_upload_size: 64,
        };
        let router = crate::handler::routes(state).with_security(&CorsConfig::default(), &limit);
        let server = TestServer::new(router)?;

        let response = server
            .post("/classify")
            .multipart(image_form(&[0xFF; 4096]))
            .await;
        response.assert_status(StatusCode::PAYLOAD_TOO_LARGE);

        let body = response.json::<serde_json::Value>();
        assert!(body["error"].is_string());
        assert_eq!(body["name"], "payload_too_large");
        Ok(())
    }

    #[tokio::test]
    async fn empty_file_is_unprocessable() -> anyhow::Result<()> {
        let server = create_test_server(MockProvider::default())?;

        let response = server.post("/classify").multipart(image_form(b"")).await;
        response.assert_status(StatusCode::UNPROCESSABLE_ENTITY);
        Ok(())
    }

    #[tokio::test]
    async fn non_multipart_body_is_unprocessable() -> anyhow::Result<()> {
        let server = create_test_server(MockProvider::default())?;

        let response = server
            .post("/classify")
            .json(&serde_json::json!({"file": "nope"}))
            .await;
        response.assert_status(StatusCode::UNPROCESSABLE_ENTITY);
        Ok(())
    }
}
