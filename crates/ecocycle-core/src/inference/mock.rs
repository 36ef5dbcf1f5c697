//! Mock vision provider for testing.
//!
//! # Feature Flag
//!
//! This module is only available when the `test-utils` feature is enabled:
//!
//! ```toml
//! [dev-dependencies]
//! ecocycle-core = { version = "...", features = ["test-utils"] }
//! ```
//!
//! # Example
//!
//! ```rust,ignore
//! use ecocycle_core::inference::{InferenceService, MockProvider};
//!
//! // Every completion answers with the given text.
//! let service = MockProvider::with_response(r#"{"class": "Metal", "confidence": 0.9}"#)
//!     .into_service();
//!
//! // Completions for `broken-model` fail with a network error.
//! let service = MockProvider::default()
//!     .with_failing_model("broken-model")
//!     .into_service();
//! ```

use std::sync::{Arc, Mutex};

use serde::{Deserialize, Serialize};

use super::{InferenceService, Result, VisionProvider, VisionRequest, VisionResponse};
use crate::Error;

/// Reply used when no mock response is configured.
const DEFAULT_MOCK_RESPONSE: &str =
    r#"{"class": "Plastic", "confidence": 0.9, "reasoning": "mock classification"}"#;

/// Configuration for the mock provider.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MockConfig {
    /// Reply content returned for every successful completion.
    #[serde(default)]
    pub mock_response: Option<String>,

    /// Models whose completions fail with a network error.
    #[serde(default)]
    pub failing_models: Vec<String>,

    /// Fail every completion regardless of model.
    #[serde(default)]
    pub fail_all: bool,
}

/// Provider returning canned replies and recording what it was asked.
#[derive(Clone, Debug, Default)]
pub struct MockProvider {
    config: Arc<MockConfig>,
    requests: Arc<Mutex<Vec<VisionRequest>>>,
}

impl MockProvider {
    /// Creates a new mock provider with the given configuration.
    pub fn new(config: MockConfig) -> Self {
        Self {
            config: Arc::new(config),
            requests: Arc::default(),
        }
    }

    /// Creates a mock provider answering every request with `response`.
    pub fn with_response(response: impl Into<String>) -> Self {
        Self::new(MockConfig {
            mock_response: Some(response.into()),
            ..Default::default()
        })
    }

    /// Creates a mock provider whose every request fails.
    pub fn failing() -> Self {
        Self::new(MockConfig {
            fail_all: true,
            ..Default::default()
        })
    }

    /// Makes completions addressed to `model` fail.
    pub fn with_failing_model(self, model: impl Into<String>) -> Self {
        let mut config = (*self.config).clone();
        config.failing_models.push(model.into());
        Self::new(config)
    }

    /// Returns every request received so far, oldest first.
    pub fn requests(&self) -> Vec<VisionRequest> {
        self.requests
            .lock()
            .map(|requests| requests.clone())
            .unwrap_or_default()
    }

    /// Wraps a clone of this provider in an [`InferenceService`].
    ///
    /// The clone shares the request log with `self`.
    pub fn into_service(self) -> InferenceService {
        InferenceService::from_provider(self)
    }
}

#[async_trait::async_trait]
impl VisionProvider for MockProvider {
    fn name(&self) -> &str {
        "Mock"
    }

    async fn complete(&self, request: &VisionRequest) -> Result<VisionResponse> {
        if let Ok(mut requests) = self.requests.lock() {
            requests.push(request.clone());
        }

        let fails = self.config.fail_all
            || self.config.failing_models.iter().any(|m| *m == request.model);

        if fails {
            return Err(Error::network_error()
                .with_message(format!("mock transport failure for {}", request.model)));
        }

        let content = self
            .config
            .mock_response
            .clone()
            .unwrap_or_else(|| DEFAULT_MOCK_RESPONSE.to_owned());

        Ok(VisionResponse::new(
            request.request_id,
            request.model.clone(),
            content,
        ))
    }
}
