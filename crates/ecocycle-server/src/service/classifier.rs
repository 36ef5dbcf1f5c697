//! Waste classification pipeline.
//!
//! [`WasteClassifier`] ties the inference backend to the reply parser and the
//! price table. Classification walks the configured model list in order and
//! returns the first reply that arrives; the reply itself is always parsed
//! into some result, so only transport-level failures advance to the next
//! model.

use std::sync::Arc;

use ecocycle_core::{
    Classification, Error, ImageData, InferenceService, PriceQuote, PricingTable, Result,
    VisionRequest, VisionResponse, parse_classification,
};

use crate::service::ClassifierConfig;

/// Tracing target for the classification pipeline.
const TRACING_TARGET: &str = "ecocycle_server::service::classifier";

/// Outcome of classifying one upload.
#[derive(Debug, Clone)]
pub struct ClassificationReport {
    /// Parsed category, confidence and reasoning.
    pub classification: Classification,
    /// Pricing policy applied to the category.
    pub quote: PriceQuote,
    /// Model candidate that produced the reply.
    pub model_used: String,
    /// Unmodified reply text.
    pub raw_response: String,
}

/// Runs classification, detailed analysis and connection probes.
#[derive(Debug, Clone)]
pub struct WasteClassifier {
    inference: InferenceService,
    pricing: Arc<PricingTable>,
    config: Arc<ClassifierConfig>,
}

impl WasteClassifier {
    /// Creates a classifier after validating `config`.
    pub fn new(
        config: ClassifierConfig,
        pricing: PricingTable,
        inference: InferenceService,
    ) -> Result<Self> {
        config.validate()?;

        Ok(Self {
            inference,
            pricing: Arc::new(pricing),
            config: Arc::new(config),
        })
    }

    /// Returns the classifier configuration.
    pub fn config(&self) -> &ClassifierConfig {
        &self.config
    }

    /// Returns the price table.
    pub fn pricing(&self) -> &PricingTable {
        &self.pricing
    }

    /// Returns the name of the inference backend.
    pub fn provider_name(&self) -> &str {
        self.inference.provider_name()
    }

    /// Classifies `image`, trying each configured model until one answers.
    ///
    /// Returns the error of the last attempted model when none answers.
    /// Errors that no other model could fix, such as a rejected credential,
    /// end the walk early.
    pub async fn classify(&self, image: ImageData) -> Result<ClassificationReport> {
        let mut last_error = None;

        for model in self.config.candidates() {
            let request = VisionRequest::classification(model, image.clone())
                .with_timeout(self.config.inference_timeout());

            tracing::debug!(
                target: TRACING_TARGET,
                request_id = %request.request_id,
                model = %model,
                image_bytes = image.len(),
                "Trying classification model"
            );

            match self.inference.complete(&request).await {
                Ok(response) => return Ok(self.report(model, response)),
                Err(error) => {
                    tracing::warn!(
                        target: TRACING_TARGET,
                        model = %model,
                        error = %error,
                        "Classification model failed"
                    );

                    let retryable = error.is_retryable();
                    last_error = Some(error);
                    if !retryable {
                        break;
                    }
                }
            }
        }

        Err(last_error.unwrap_or_else(|| {
            Error::configuration().with_message("No vision models configured")
        }))
    }

    /// Asks the detailed analysis model for a free-form description of `image`.
    pub async fn analyze_detailed(&self, image: ImageData) -> Result<VisionResponse> {
        let request = VisionRequest::detailed_analysis(&self.config.detailed_model, image)
            .with_timeout(self.config.inference_timeout());

        self.inference.complete(&request).await
    }

    /// Sends the text-only probe to check that the backend is reachable.
    pub async fn test_connection(&self) -> Result<VisionResponse> {
        let request = VisionRequest::connection_probe(&self.config.probe_model)
            .with_timeout(self.config.probe_timeout());

        self.inference.complete(&request).await
    }

    fn report(&self, model: &str, response: VisionResponse) -> ClassificationReport {
        let classification = parse_classification(&response.content);
        let quote = self.pricing.quote(classification.category);

        tracing::info!(
            target: TRACING_TARGET,
            request_id = %response.request_id,
            model = %model,
            category = %classification.category,
            confidence = classification.confidence,
            method = %classification.method,
            label = %quote.label,
            price_per_kg = quote.price_per_kg,
            "Image classified"
        );

        ClassificationReport {
            classification,
            quote,
            model_used: model.to_owned(),
            raw_response: response.content,
        }
    }
}
