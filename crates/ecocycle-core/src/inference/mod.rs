//! Vision model inference abstractions.
//!
//! A [`VisionProvider`] sends one chat completion (a text prompt, optionally
//! accompanied by an image) to some backend and returns the text of the first
//! reply. [`InferenceService`] wraps a provider behind an `Arc` so it can be
//! cloned into request handlers, and adds timing and structured logging.
//!
//! # Example
//!
//! ```rust,ignore
//! use ecocycle_core::inference::{ImageData, InferenceService, VisionRequest};
//!
//! let service = InferenceService::from_provider(my_provider);
//!
//! let image = ImageData::from_bytes(upload_bytes);
//! let request = VisionRequest::classification("meta-llama/llama-4-scout-17b-16e-instruct", image);
//! let response = service.complete(&request).await?;
//! println!("{}", response.content);
//! ```

mod image;
#[cfg(any(test, feature = "test-utils"))]
#[cfg_attr(docsrs, doc(cfg(feature = "test-utils")))]
mod mock;
mod request;
mod response;
mod service;

pub use image::{DEFAULT_MEDIA_TYPE, ImageData};
#[cfg(any(test, feature = "test-utils"))]
#[cfg_attr(docsrs, doc(cfg(feature = "test-utils")))]
pub use mock::{MockConfig, MockProvider};
pub use request::{
    DEFAULT_INFERENCE_TIMEOUT, DEFAULT_PROBE_TIMEOUT, IMAGE_MAX_TOKENS, PROBE_MAX_TOKENS,
    VisionRequest,
};
pub use response::{TokenUsage, VisionResponse};
pub use service::InferenceService;

pub use crate::{Error, Result};

/// Tracing target for inference operations.
pub const TRACING_TARGET: &str = "ecocycle_core::inference";

/// A backend able to answer multimodal chat completions.
///
/// Implementations issue exactly one request per call. Trying further models
/// after a failure is the caller's responsibility.
#[async_trait::async_trait]
pub trait VisionProvider: Send + Sync {
    /// Human-readable backend name, used in logs and user-facing errors.
    fn name(&self) -> &str;

    /// Sends `request` and returns the text content of the first choice.
    async fn complete(&self, request: &VisionRequest) -> Result<VisionResponse>;
}
