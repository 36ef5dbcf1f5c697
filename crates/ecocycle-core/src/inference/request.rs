//! Request type for vision completions.

use std::time::Duration;

use uuid::Uuid;

use super::ImageData;
use crate::prompt::{CLASSIFICATION_PROMPT, CONNECTION_PROBE_PROMPT, DETAILED_ANALYSIS_PROMPT};

/// Maximum reply length requested for image prompts.
pub const IMAGE_MAX_TOKENS: u32 = 1024;

/// Maximum reply length requested for the connection probe.
pub const PROBE_MAX_TOKENS: u32 = 50;

/// Default timeout for image prompts.
pub const DEFAULT_INFERENCE_TIMEOUT: Duration = Duration::from_secs(60);

/// Default timeout for the connection probe.
pub const DEFAULT_PROBE_TIMEOUT: Duration = Duration::from_secs(30);

/// A single-turn chat completion request.
#[derive(Debug, Clone)]
pub struct VisionRequest {
    /// Unique identifier for log correlation.
    pub request_id: Uuid,
    /// Backend model identifier.
    pub model: String,
    /// Text part of the user turn.
    pub prompt: String,
    /// Image part of the user turn, if any.
    pub image: Option<ImageData>,
    /// Sampling temperature; the backend default applies when unset.
    pub temperature: Option<f32>,
    /// Maximum number of tokens to generate.
    pub max_tokens: u32,
    /// Deadline for the whole request.
    pub timeout: Duration,
}

impl VisionRequest {
    /// Creates a text-only request with backend defaults.
    pub fn new(model: impl Into<String>, prompt: impl Into<String>) -> Self {
        Self {
            request_id: Uuid::now_v7(),
            model: model.into(),
            prompt: prompt.into(),
            image: None,
            temperature: None,
            max_tokens: IMAGE_MAX_TOKENS,
            timeout: DEFAULT_INFERENCE_TIMEOUT,
        }
    }

    /// Creates the waste classification request for `image`.
    pub fn classification(model: impl Into<String>, image: ImageData) -> Self {
        Self::new(model, CLASSIFICATION_PROMPT)
            .with_image(image)
            .with_temperature(0.1)
    }

    /// Creates the free-form detailed analysis request for `image`.
    pub fn detailed_analysis(model: impl Into<String>, image: ImageData) -> Self {
        Self::new(model, DETAILED_ANALYSIS_PROMPT)
            .with_image(image)
            .with_temperature(0.3)
    }

    /// Creates the minimal text-only request used to verify connectivity.
    pub fn connection_probe(model: impl Into<String>) -> Self {
        Self::new(model, CONNECTION_PROBE_PROMPT)
            .with_max_tokens(PROBE_MAX_TOKENS)
            .with_timeout(DEFAULT_PROBE_TIMEOUT)
    }

    /// Attaches an image to the user turn.
    pub fn with_image(mut self, image: ImageData) -> Self {
        self.image = Some(image);
        self
    }

    /// Sets the sampling temperature.
    pub fn with_temperature(mut self, temperature: f32) -> Self {
        self.temperature = Some(temperature);
        self
    }

    /// Sets the maximum number of generated tokens.
    pub fn with_max_tokens(mut self, max_tokens: u32) -> Self {
        self.max_tokens = max_tokens;
        self
    }

    /// Sets the request deadline.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Returns a copy of this request addressed to another model.
    pub fn for_model(&self, model: impl Into<String>) -> Self {
        Self {
            request_id: Uuid::now_v7(),
            model: model.into(),
            ..self.clone()
        }
    }
}
