//! Fixed instructions sent to the vision model.

/// Asks the model to classify the pictured item and answer with JSON only.
pub const CLASSIFICATION_PROMPT: &str = r#"You are a waste classification expert. Analyze this image and classify the waste item into one of these categories:

CATEGORIES:
- Plastic: bottles, containers, bags, packaging, toys
- Paper: newspapers, cardboard, books, documents
- Metal: cans, foil, appliances, tools
- Glass: bottles, jars, windows, mirrors
- Organic: food waste, plant matter, biodegradable items
- Other: items that don't fit the above categories

INSTRUCTIONS:
1. Look carefully at the image
2. Identify the main waste item(s)
3. Classify based on the material composition
4. Provide your confidence level (0.0 to 1.0)

RESPONSE FORMAT (JSON only):
{
    "class": "category_name",
    "confidence": 0.85,
    "reasoning": "brief explanation of why you classified it this way"
}

Analyze the image now:"#;

/// Asks the model for a free-form description of the pictured items.
pub const DETAILED_ANALYSIS_PROMPT: &str = "Analyze this image in detail and provide:
1. What objects do you see?
2. What materials are they made of?
3. Are they recyclable?
4. What condition are they in?
5. Any identifying text or brands?

Be thorough and descriptive.";

/// Minimal text-only message used to check that the backend answers.
pub const CONNECTION_PROBE_PROMPT: &str = "Hello, just testing the connection.";

#[cfg(test)]
mod tests {
    use super::*;
    use crate::waste::Category;

    #[test]
    fn classification_prompt_lists_every_category() {
        use strum::IntoEnumIterator;

        for category in Category::iter() {
            let bullet = format!("- {category}:");
            assert!(CLASSIFICATION_PROMPT.contains(&bullet), "missing {bullet}");
        }
    }

    #[test]
    fn classification_prompt_requests_json_shape() {
        for key in ["\"class\"", "\"confidence\"", "\"reasoning\""] {
            assert!(CLASSIFICATION_PROMPT.contains(key));
        }
    }
}
