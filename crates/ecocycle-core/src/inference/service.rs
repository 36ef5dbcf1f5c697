//! Inference service with observability.
//!
//! This module provides [`InferenceService`] which wraps a [`VisionProvider`]
//! and adds structured logging around every completion.

use std::fmt;
use std::sync::Arc;

use jiff::Timestamp;

use super::{Result, TRACING_TARGET, VisionProvider, VisionRequest, VisionResponse};

/// Cloneable handle to a vision provider.
#[derive(Clone)]
pub struct InferenceService {
    provider: Arc<dyn VisionProvider>,
}

impl fmt::Debug for InferenceService {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("InferenceService")
            .field("provider", &self.provider.name())
            .finish()
    }
}

impl InferenceService {
    /// Creates a new inference service from a provider.
    pub fn from_provider<P>(provider: P) -> Self
    where
        P: VisionProvider + 'static,
    {
        Self {
            provider: Arc::new(provider),
        }
    }

    /// Creates a new inference service from an already shared provider.
    pub fn from_shared(provider: Arc<dyn VisionProvider>) -> Self {
        Self { provider }
    }

    /// Returns the name of the wrapped provider.
    pub fn provider_name(&self) -> &str {
        self.provider.name()
    }

    /// Sends a single completion request.
    pub async fn complete(&self, request: &VisionRequest) -> Result<VisionResponse> {
        let started_at = Timestamp::now();

        tracing::debug!(
            target: TRACING_TARGET,
            request_id = %request.request_id,
            provider = self.provider.name(),
            model = %request.model,
            has_image = request.image.is_some(),
            max_tokens = request.max_tokens,
            "Processing completion request"
        );

        let result = self.provider.complete(request).await;
        let elapsed = Timestamp::now().duration_since(started_at);

        match &result {
            Ok(response) => {
                tracing::debug!(
                    target: TRACING_TARGET,
                    request_id = %request.request_id,
                    model = %response.model,
                    content_len = response.content.len(),
                    total_tokens = response.usage.map(|u| u.total_tokens()),
                    elapsed_ms = elapsed.as_millis(),
                    "Completion successful"
                );
            }
            Err(error) => {
                tracing::warn!(
                    target: TRACING_TARGET,
                    request_id = %request.request_id,
                    model = %request.model,
                    error = %error,
                    elapsed_ms = elapsed.as_millis(),
                    "Completion failed"
                );
            }
        }

        result
    }
}
