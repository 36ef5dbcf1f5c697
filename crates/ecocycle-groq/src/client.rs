//! Groq client implementation.
//!
//! [`GroqClient`] implements [`VisionProvider`] on top of a pooled
//! [`reqwest::Client`]. One call issues exactly one chat completion; fallback
//! across models is handled by the caller.

use std::sync::Arc;
use std::time::Duration;

use ecocycle_core::inference::TokenUsage;
use ecocycle_core::{InferenceService, VisionProvider, VisionRequest, VisionResponse};
use jiff::Timestamp;
use reqwest::{Client as HttpClient, ClientBuilder};
use url::Url;

use crate::api::{
    ApiErrorResponse, ChatCompletionRequest, ChatCompletionResponse, ChatMessage, ContentPart,
    ImageUrl, MessageContent,
};
use crate::config::GroqConfig;
use crate::error::{Error, Result};

/// Tracing target for Groq client operations.
pub const TRACING_TARGET: &str = "ecocycle_groq::client";

/// Client for the Groq chat completions API.
///
/// Cheap to clone; clones share the connection pool.
#[derive(Debug, Clone)]
pub struct GroqClient {
    inner: Arc<GroqClientInner>,
}

#[derive(Debug)]
struct GroqClientInner {
    http: HttpClient,
    config: GroqConfig,
    endpoint: Url,
}

impl GroqClient {
    /// Creates a new client after validating `config`.
    ///
    /// # Errors
    ///
    /// Returns an error if the API key is missing or still the placeholder,
    /// if the base URL is invalid, or if the HTTP client cannot be built.
    pub fn new(config: GroqConfig) -> Result<Self> {
        config.validate()?;
        let endpoint = config.endpoint()?;

        tracing::debug!(
            target: TRACING_TARGET,
            endpoint = %endpoint,
            connect_timeout_secs = config.connect_timeout_secs,
            "Creating Groq client"
        );

        let http = ClientBuilder::new()
            .connect_timeout(config.connect_timeout())
            .user_agent(format!("ecocycle/{}", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self {
            inner: Arc::new(GroqClientInner {
                http,
                config,
                endpoint,
            }),
        })
    }

    /// Returns the client configuration.
    pub fn config(&self) -> &GroqConfig {
        &self.inner.config
    }

    /// Wraps this client in an [`InferenceService`].
    pub fn into_service(self) -> InferenceService {
        InferenceService::from_provider(self)
    }

    async fn send(&self, request: &VisionRequest) -> Result<VisionResponse> {
        let started_at = Timestamp::now();

        let data_uri = request.image.as_ref().map(|image| image.to_data_uri());
        let content = match data_uri {
            Some(url) => MessageContent::Parts(vec![
                ContentPart::Text {
                    text: &request.prompt,
                },
                ContentPart::ImageUrl {
                    image_url: ImageUrl { url },
                },
            ]),
            None => MessageContent::Text(&request.prompt),
        };

        let body = ChatCompletionRequest {
            model: &request.model,
            messages: vec![ChatMessage::user(content)],
            temperature: request.temperature,
            max_tokens: request.max_tokens,
        };

        let response = self
            .inner
            .http
            .post(self.inner.endpoint.clone())
            .bearer_auth(&self.inner.config.api_key)
            .timeout(request.timeout)
            .json(&body)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let text = response.text().await.unwrap_or_default();
            let message = ApiErrorResponse::message_from(&text);

            tracing::warn!(
                target: TRACING_TARGET,
                request_id = %request.request_id,
                model = %request.model,
                status = status.as_u16(),
                message = %message,
                "Groq API returned an error status"
            );

            return Err(Error::Status { status, message });
        }

        let bytes = response.bytes().await?;
        let completion: ChatCompletionResponse = serde_json::from_slice(&bytes)?;

        let model = completion
            .model
            .clone()
            .unwrap_or_else(|| request.model.clone());
        let usage = completion.usage;
        let content = completion
            .into_first_content()
            .ok_or(Error::EmptyCompletion)?;

        let elapsed = Timestamp::now().duration_since(started_at);
        let mut response = VisionResponse::new(request.request_id, model, content)
            .with_elapsed(Duration::try_from(elapsed).unwrap_or_default());
        if let Some(usage) = usage {
            response = response.with_usage(TokenUsage {
                prompt_tokens: usage.prompt_tokens,
                completion_tokens: usage.completion_tokens,
            });
        }

        Ok(response)
    }
}

#[async_trait::async_trait]
impl VisionProvider for GroqClient {
    fn name(&self) -> &str {
        "Groq"
    }

    async fn complete(&self, request: &VisionRequest) -> ecocycle_core::Result<VisionResponse> {
        self.send(request).await.map_err(Into::into)
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use ecocycle_core::{ErrorKind, ImageData};
    use serde_json::{Value, json};
    use wiremock::matchers::{header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    use super::*;

    fn client_for(server: &MockServer) -> GroqClient {
        let config = GroqConfig::builder()
            .with_api_key("gsk_test")
            .with_base_url(&format!("{}/openai/v1", server.uri()))
            .expect("valid url")
            .build()
            .expect("valid config");

        GroqClient::new(config).expect("client builds")
    }

    fn completion(content: &str) -> Value {
        json!({
            "id": "chatcmpl-123",
            "object": "chat.completion",
            "model": "meta-llama/llama-4-scout-17b-16e-instruct",
            "choices": [{
                "index": 0,
                "message": {"role": "assistant", "content": content},
                "finish_reason": "stop"
            }],
            "usage": {"prompt_tokens": 812, "completion_tokens": 34, "total_tokens": 846}
        })
    }

    fn classification_request() -> VisionRequest {
        VisionRequest::classification(
            "meta-llama/llama-4-scout-17b-16e-instruct",
            ImageData::from_bytes(&b"hello"[..]),
        )
    }

    async fn mount(server: &MockServer, template: ResponseTemplate) {
        Mock::given(method("POST"))
            .and(path("/openai/v1/chat/completions"))
            .respond_with(template)
            .mount(server)
            .await;
    }

    #[tokio::test]
    async fn returns_first_choice_content() {
        let server = MockServer::start().await;
        mount(
            &server,
            ResponseTemplate::new(200).set_body_json(completion(r#"{"class": "Glass"}"#)),
        )
        .await;

        let response = client_for(&server)
            .complete(&classification_request())
            .await
            .expect("completion succeeds");

        assert_eq!(response.content, r#"{"class": "Glass"}"#);
        assert_eq!(response.model, "meta-llama/llama-4-scout-17b-16e-instruct");
        assert_eq!(response.usage.map(|u| u.total_tokens()), Some(846));
    }

    #[tokio::test]
    async fn elapsed_covers_backend_delay() {
        let server = MockServer::start().await;
        mount(
            &server,
            ResponseTemplate::new(200)
                .set_body_json(completion("ok"))
                .set_delay(Duration::from_millis(150)),
        )
        .await;

        let response = client_for(&server)
            .complete(&classification_request())
            .await
            .expect("completion succeeds");

        assert!(response.elapsed >= Duration::from_millis(150));
    }

    #[tokio::test]
    async fn sends_bearer_token_and_image_parts() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/openai/v1/chat/completions"))
            .and(header("authorization", "Bearer gsk_test"))
            .respond_with(ResponseTemplate::new(200).set_body_json(completion("ok")))
            .expect(1)
            .mount(&server)
            .await;

        client_for(&server)
            .complete(&classification_request())
            .await
            .expect("completion succeeds");

        let requests = server.received_requests().await.expect("recording enabled");
        let body: Value = serde_json::from_slice(&requests[0].body).expect("json body");

        assert_eq!(body["model"], "meta-llama/llama-4-scout-17b-16e-instruct");
        assert_eq!(body["temperature"].as_f64(), Some(0.1));
        assert_eq!(body["max_tokens"], 1024);

        let parts = &body["messages"][0]["content"];
        assert_eq!(body["messages"][0]["role"], "user");
        assert_eq!(parts[0]["type"], "text");
        assert_eq!(parts[1]["type"], "image_url");
        assert_eq!(
            parts[1]["image_url"]["url"],
            "data:image/jpeg;base64,aGVsbG8="
        );
    }

    #[tokio::test]
    async fn probe_sends_plain_text_without_temperature() {
        let server = MockServer::start().await;
        mount(&server, ResponseTemplate::new(200).set_body_json(completion("Hi!"))).await;

        let response = client_for(&server)
            .complete(&VisionRequest::connection_probe("llama-3.1-8b-instant"))
            .await
            .expect("probe succeeds");
        assert_eq!(response.content, "Hi!");

        let requests = server.received_requests().await.expect("recording enabled");
        let body: Value = serde_json::from_slice(&requests[0].body).expect("json body");

        assert_eq!(
            body["messages"][0]["content"],
            "Hello, just testing the connection."
        );
        assert_eq!(body["max_tokens"], 50);
        assert!(body.get("temperature").is_none());
    }

    #[tokio::test]
    async fn unauthorized_maps_to_authentication() {
        let server = MockServer::start().await;
        mount(
            &server,
            ResponseTemplate::new(401).set_body_json(json!({
                "error": {"message": "Invalid API Key", "type": "invalid_request_error"}
            })),
        )
        .await;

        let error = client_for(&server)
            .complete(&classification_request())
            .await
            .expect_err("completion fails");

        assert_eq!(error.kind, ErrorKind::Authentication);
        assert!(error.to_string().contains("Invalid API Key"));
        assert!(!error.is_retryable());
    }

    #[tokio::test]
    async fn rate_limit_and_server_errors_are_retryable() {
        for (status, kind) in [
            (429, ErrorKind::RateLimited),
            (500, ErrorKind::ServiceUnavailable),
            (503, ErrorKind::ServiceUnavailable),
        ] {
            let server = MockServer::start().await;
            mount(&server, ResponseTemplate::new(status).set_body_string("busy")).await;

            let error = client_for(&server)
                .complete(&classification_request())
                .await
                .expect_err("completion fails");

            assert_eq!(error.kind, kind);
            assert!(error.is_retryable());
        }
    }

    #[tokio::test]
    async fn malformed_body_is_invalid_response() {
        let server = MockServer::start().await;
        mount(&server, ResponseTemplate::new(200).set_body_string("<html>")).await;

        let error = client_for(&server)
            .complete(&classification_request())
            .await
            .expect_err("completion fails");

        assert_eq!(error.kind, ErrorKind::InvalidResponse);
    }

    #[tokio::test]
    async fn empty_choices_is_invalid_response() {
        let server = MockServer::start().await;
        mount(
            &server,
            ResponseTemplate::new(200).set_body_json(json!({"id": "x", "choices": []})),
        )
        .await;

        let error = client_for(&server)
            .complete(&classification_request())
            .await
            .expect_err("completion fails");

        assert_eq!(error.kind, ErrorKind::InvalidResponse);
    }

    #[tokio::test]
    async fn slow_upstream_times_out() {
        let server = MockServer::start().await;
        mount(
            &server,
            ResponseTemplate::new(200)
                .set_body_json(completion("late"))
                .set_delay(Duration::from_secs(2)),
        )
        .await;

        let request = classification_request().with_timeout(Duration::from_millis(100));
        let error = client_for(&server)
            .complete(&request)
            .await
            .expect_err("completion times out");

        assert!(error.is_timeout_error());
    }

    #[tokio::test]
    async fn unreachable_host_is_network_error() {
        let config = GroqConfig::builder()
            .with_api_key("gsk_test")
            .with_base_url("http://127.0.0.1:1/v1")
            .expect("valid url")
            .build()
            .expect("valid config");
        let client = GroqClient::new(config).expect("client builds");

        let error = client
            .complete(&classification_request())
            .await
            .expect_err("connection refused");

        assert_eq!(error.kind, ErrorKind::NetworkError);
        let message = error.message.as_deref().unwrap_or_default();
        assert!(message.starts_with("Connection failed: "));
        assert!(message.contains("127.0.0.1:1"));
    }

    #[test]
    fn placeholder_key_is_rejected_at_construction() {
        let config = GroqConfig {
            api_key: crate::PLACEHOLDER_API_KEY.to_owned(),
            base_url: crate::DEFAULT_BASE_URL.to_owned(),
            connect_timeout_secs: 10,
        };

        assert!(matches!(GroqClient::new(config), Err(Error::InvalidConfig(_))));
    }
}
