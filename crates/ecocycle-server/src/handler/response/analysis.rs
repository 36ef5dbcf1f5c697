use serde::{Deserialize, Serialize};

/// Free-form description of an uploaded image.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DetailedAnalysisResponse {
    /// Model reply, unmodified.
    pub detailed_analysis: String,
    /// Model that was asked.
    pub model_used: String,
}
