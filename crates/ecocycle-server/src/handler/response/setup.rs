use ecocycle_core::PricingTable;
use serde::{Deserialize, Serialize};

use crate::service::ClassifierConfig;

const SETUP_STEPS: [&str; 7] = [
    "1. Go to https://console.groq.com",
    "2. Create a FREE account",
    "3. Navigate to API Keys section",
    "4. Create a new API key",
    "5. Copy the API key",
    "6. Set GROQ_API_KEY in the environment or in a .env file",
    "7. Run: ecocycle",
];

const ADVANTAGES: [&str; 6] = [
    "State-of-the-art vision models",
    "Extremely fast inference (thanks to Groq chips)",
    "Free tier with high limits",
    "OpenAI-compatible API",
    "No model hosting required",
    "Multiple fallback models",
];

/// Static setup guidance for operators.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SetupResponse {
    pub title: String,
    pub steps: Vec<String>,
    pub models_available: Vec<ModelInfo>,
    pub pricing: String,
    pub advantages: Vec<String>,
    /// Recycling price per kilogram for every category.
    pub price_table: Vec<PriceEntry>,
}

/// A configured model and what it is used for.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModelInfo {
    pub name: String,
    pub description: String,
    pub use_case: String,
}

/// One row of the recycling price table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PriceEntry {
    pub category: String,
    pub price_per_kg: u32,
}

impl SetupResponse {
    /// Builds the guidance for the given configuration and price table.
    pub fn new(config: &ClassifierConfig, pricing: &PricingTable) -> Self {
        let mut models_available: Vec<_> = config
            .candidates()
            .enumerate()
            .map(|(index, name)| ModelInfo {
                name: name.to_owned(),
                description: if index == 0 {
                    "Primary vision model, fast and accurate".to_owned()
                } else {
                    format!("Fallback vision model #{index}")
                },
                use_case: "Waste classification".to_owned(),
            })
            .collect();

        models_available.push(ModelInfo {
            name: config.detailed_model.clone(),
            description: "Detailed analysis model".to_owned(),
            use_case: "Thorough description of objects, materials and condition".to_owned(),
        });

        Self {
            title: "Groq Vision API Setup".to_owned(),
            steps: SETUP_STEPS.iter().map(|s| (*s).to_owned()).collect(),
            models_available,
            pricing: "FREE with generous limits".to_owned(),
            advantages: ADVANTAGES.iter().map(|s| (*s).to_owned()).collect(),
            price_table: pricing
                .iter()
                .map(|(category, price_per_kg)| PriceEntry {
                    category: category.to_owned(),
                    price_per_kg,
                })
                .collect(),
        }
    }
}
