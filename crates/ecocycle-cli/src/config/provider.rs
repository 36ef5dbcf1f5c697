//! Inference provider construction.

use anyhow::Context;
use ecocycle_core::InferenceService;
use ecocycle_groq::{GroqClient, GroqConfig};

/// Creates the inference service backed by Groq.
///
/// # Errors
///
/// Returns an error if the API key is missing or still the placeholder, or
/// if the HTTP client cannot be built.
pub fn create_inference(config: &GroqConfig) -> anyhow::Result<InferenceService> {
    let client = GroqClient::new(config.clone()).context("failed to create Groq client")?;
    Ok(client.into_service())
}
