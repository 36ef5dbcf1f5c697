use ecocycle_core::NON_RECYCLABLE_LABEL;
use serde::{Deserialize, Serialize};

use crate::service::ClassificationReport;

/// Maximum number of characters of the model reply echoed back.
pub const RAW_RESPONSE_PREVIEW_CHARS: usize = 200;

/// Result of classifying one uploaded image.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClassificationResponse {
    /// Category name, or `"Non-recyclable"`.
    pub class: String,
    /// Model confidence in `[0.0, 1.0]`.
    pub confidence: f64,
    /// Whether the item is accepted for recycling.
    pub recyclable: bool,
    /// Price offered per kilogram.
    pub price_per_kg: u32,
    /// Diagnostic details about how the result was produced.
    pub debug_info: DebugInfo,
}

/// Diagnostic details attached to every classification.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DebugInfo {
    /// Class the model answered with, present only when `class` was replaced
    /// by the non-recyclable label.
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub original_class: Option<String>,
    /// Model that produced the reply.
    pub model_used: String,
    /// Reasoning from the model or the parser.
    pub reasoning: String,
    /// Start of the raw reply.
    pub raw_response: String,
}

impl From<ClassificationReport> for ClassificationResponse {
    fn from(report: ClassificationReport) -> Self {
        let ClassificationReport {
            classification,
            quote,
            model_used,
            raw_response,
        } = report;

        let original_class =
            (quote.label == NON_RECYCLABLE_LABEL).then(|| classification.original_label());

        Self {
            class: quote.label,
            confidence: classification.confidence,
            recyclable: quote.recyclable,
            price_per_kg: quote.price_per_kg,
            debug_info: DebugInfo {
                original_class,
                model_used,
                reasoning: classification.reasoning,
                raw_response: raw_response
                    .chars()
                    .take(RAW_RESPONSE_PREVIEW_CHARS)
                    .collect(),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use ecocycle_core::{Category, Classification, ParseMethod, PricingTable};

    use super::*;

    fn report(category: Category, raw_response: &str) -> ClassificationReport {
        ClassificationReport {
            classification: Classification::new(category, 0.8, "why", ParseMethod::Structured),
            quote: PricingTable::default().quote(category),
            model_used: "m".to_owned(),
            raw_response: raw_response.to_owned(),
        }
    }

    #[test]
    fn recyclable_has_no_original_class() {
        let response = ClassificationResponse::from(report(Category::Glass, "{}"));

        assert_eq!(response.class, "Glass");
        assert!(response.recyclable);
        assert_eq!(response.price_per_kg, 20);
        assert_eq!(response.debug_info.original_class, None);

        let json = serde_json::to_value(&response).expect("serializable");
        assert!(json["debug_info"].get("original_class").is_none());
        assert_eq!(json["class"], "Glass");
    }

    #[test]
    fn non_recyclable_keeps_original_class() {
        let response = ClassificationResponse::from(report(Category::Other, "{}"));

        assert_eq!(response.class, "Non-recyclable");
        assert!(!response.recyclable);
        assert_eq!(response.price_per_kg, 0);
        assert_eq!(response.debug_info.original_class.as_deref(), Some("Other"));
    }

    #[test]
    fn unknown_class_is_reported_as_answered() {
        let mut report = report(Category::Other, "{}");
        report.classification = report.classification.with_label("Textile");

        let response = ClassificationResponse::from(report);
        assert_eq!(response.class, "Non-recyclable");
        assert_eq!(response.confidence, 0.8);
        assert_eq!(
            response.debug_info.original_class.as_deref(),
            Some("Textile")
        );
    }

    #[test]
    fn raw_response_is_truncated_by_characters() {
        let raw = "é".repeat(500);
        let response = ClassificationResponse::from(report(Category::Metal, &raw));

        assert_eq!(response.debug_info.raw_response.chars().count(), 200);
        assert!(raw.starts_with(&response.debug_info.raw_response));
    }
}
