use serde::{Deserialize, Serialize};
use strum::{AsRefStr, Display};

use super::Category;

/// Which stage of the parser produced a [`Classification`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Display, AsRefStr)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum ParseMethod {
    /// A JSON object in the reply named the category and confidence.
    Structured,
    /// A category name appeared somewhere in the reply text.
    Keyword,
    /// Nothing recognisable was found.
    Default,
    /// The reply contained a structured answer that could not be read.
    Failed,
}

/// Category, confidence and reasoning extracted from one model reply.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Classification {
    /// Assigned waste category.
    pub category: Category,
    /// Confidence in `[0.0, 1.0]`.
    pub confidence: f64,
    /// Short explanation, either from the model or synthesized by the parser.
    pub reasoning: String,
    /// Parser stage that produced this result.
    pub method: ParseMethod,
    /// Class name the model answered with when it is not a known category.
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub label: Option<String>,
}

impl Classification {
    /// Creates a classification, clamping `confidence` into `[0.0, 1.0]`.
    pub fn new(
        category: Category,
        confidence: f64,
        reasoning: impl Into<String>,
        method: ParseMethod,
    ) -> Self {
        let confidence = if confidence.is_nan() {
            0.0
        } else {
            confidence.clamp(0.0, 1.0)
        };

        Self {
            category,
            confidence,
            reasoning: reasoning.into(),
            method,
            label: None,
        }
    }

    /// Records the model's own class name for an unrecognised category.
    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    /// Returns the model's class name if it had one, else the category name.
    pub fn original_label(&self) -> String {
        self.label
            .clone()
            .unwrap_or_else(|| self.category.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn confidence_is_clamped() {
        let high = Classification::new(Category::Metal, 1.7, "", ParseMethod::Structured);
        let low = Classification::new(Category::Metal, -0.2, "", ParseMethod::Structured);
        let nan = Classification::new(Category::Metal, f64::NAN, "", ParseMethod::Structured);

        assert_eq!(high.confidence, 1.0);
        assert_eq!(low.confidence, 0.0);
        assert_eq!(nan.confidence, 0.0);
    }

    #[test]
    fn original_label_prefers_model_class() {
        let plain = Classification::new(Category::Other, 0.5, "", ParseMethod::Default);
        assert_eq!(plain.original_label(), "Other");

        let labelled = plain.with_label("Textile");
        assert_eq!(labelled.category, Category::Other);
        assert_eq!(labelled.original_label(), "Textile");
    }
}
