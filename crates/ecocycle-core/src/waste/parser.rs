//! Best-effort extraction of a [`Classification`] from free-form model output.
//!
//! The model is asked for a JSON-only reply but frequently wraps it in prose or
//! code fences, or ignores the format entirely. Parsing therefore runs a chain
//! where the first stage to produce a result wins:
//!
//! 1. scan for balanced `{...}` objects and read `class`/`category`,
//!    `confidence` and `reasoning` from the first usable one; a class outside
//!    the known categories becomes [`Category::Other`] and keeps its name
//! 2. look for a category keyword anywhere in the lowercased text
//! 3. fall back to [`Category::Other`]
//!
//! A structured answer whose confidence cannot be read short-circuits the
//! chain with a low-confidence [`ParseMethod::Failed`] result.

use serde_json::{Map, Value};

use super::{Category, Classification, ParseMethod, TRACING_TARGET};

/// Confidence assigned when only a keyword matched.
const KEYWORD_CONFIDENCE: f64 = 0.7;

/// Confidence assigned when nothing matched.
const DEFAULT_CONFIDENCE: f64 = 0.5;

/// Confidence assigned when a structured answer was malformed.
const FAILED_CONFIDENCE: f64 = 0.3;

/// Keyword priority order. The first entry whose needle occurs in the text wins.
const KEYWORDS: &[(Category, &[&str], &str)] = &[
    (Category::Plastic, &["plastic"], "plastic"),
    (Category::Paper, &["paper", "cardboard"], "paper"),
    (Category::Metal, &["metal"], "metal"),
    (Category::Glass, &["glass"], "glass"),
    (Category::Organic, &["organic"], "organic waste"),
];

/// Outcome of reading one JSON object.
enum Extracted {
    Usable(Classification),
    Malformed(String),
    Unusable,
}

/// Parses a raw model reply into a [`Classification`].
///
/// Never fails: ambiguous or unreadable replies degrade to lower-confidence
/// results instead of errors.
pub fn parse_classification(text: &str) -> Classification {
    let classification = match scan_structured(text) {
        Some(Extracted::Usable(classification)) => classification,
        Some(Extracted::Malformed(detail)) => Classification::new(
            Category::Other,
            FAILED_CONFIDENCE,
            format!("Failed to parse response: {detail}"),
            ParseMethod::Failed,
        ),
        Some(Extracted::Unusable) | None => match_keywords(text).unwrap_or_else(|| {
            Classification::new(
                Category::Other,
                DEFAULT_CONFIDENCE,
                "Could not determine category",
                ParseMethod::Default,
            )
        }),
    };

    tracing::debug!(
        target: TRACING_TARGET,
        method = %classification.method,
        category = %classification.category,
        label = classification.label.as_deref(),
        confidence = classification.confidence,
        "Parsed classification response"
    );

    classification
}

/// Returns the first usable or malformed structured answer in `text`.
fn scan_structured(text: &str) -> Option<Extracted> {
    let mut from = 0;

    while let Some(offset) = text[from..].find('{') {
        let start = from + offset;

        let Some(end) = balanced_object_end(text, start) else {
            // Unterminated object: an inner brace may still open a complete one.
            from = start + 1;
            continue;
        };

        match serde_json::from_str::<Value>(&text[start..=end]) {
            Ok(Value::Object(map)) => match extract_nested(&map) {
                Extracted::Unusable => from = end + 1,
                found => return Some(found),
            },
            _ => from = start + 1,
        }
    }

    None
}

/// Returns the byte index of the `}` closing the object opened at `start`.
///
/// Braces inside JSON string literals are ignored.
fn balanced_object_end(text: &str, start: usize) -> Option<usize> {
    let mut depth = 0usize;
    let mut in_string = false;
    let mut escaped = false;

    for (index, ch) in text[start..].char_indices() {
        if in_string {
            match ch {
                _ if escaped => escaped = false,
                '\\' => escaped = true,
                '"' => in_string = false,
                _ => {}
            }
            continue;
        }

        match ch {
            '"' => in_string = true,
            '{' => depth += 1,
            '}' => {
                depth -= 1;
                if depth == 0 {
                    return Some(start + index);
                }
            }
            _ => {}
        }
    }

    None
}

/// Reads an object, descending into nested object values when the outer
/// object itself does not carry the answer.
fn extract_nested(map: &Map<String, Value>) -> Extracted {
    match extract(map) {
        Extracted::Unusable => map
            .values()
            .filter_map(Value::as_object)
            .map(extract)
            .find(|found| !matches!(found, Extracted::Unusable))
            .unwrap_or(Extracted::Unusable),
        found => found,
    }
}

fn extract(map: &Map<String, Value>) -> Extracted {
    let class = map
        .get("class")
        .or_else(|| map.get("category"))
        .and_then(Value::as_str)
        .map(str::trim)
        .filter(|class| !class.is_empty());

    let (Some(class), Some(confidence)) = (class, map.get("confidence")) else {
        return Extracted::Unusable;
    };

    let confidence = match confidence {
        Value::Number(number) => number.as_f64(),
        Value::String(text) => text.trim().parse::<f64>().ok(),
        _ => None,
    };

    let Some(confidence) = confidence.filter(|c| c.is_finite()) else {
        let raw = map.get("confidence").map(Value::to_string).unwrap_or_default();
        return Extracted::Malformed(format!("confidence {raw} is not a number"));
    };

    let reasoning = match map.get("reasoning") {
        Some(Value::String(reasoning)) => reasoning.clone(),
        Some(Value::Null) | None => String::new(),
        Some(other) => other.to_string(),
    };

    let classification = match Category::from_label(class) {
        Some(category) => {
            Classification::new(category, confidence, reasoning, ParseMethod::Structured)
        }
        None => Classification::new(
            Category::Other,
            confidence,
            reasoning,
            ParseMethod::Structured,
        )
        .with_label(class),
    };

    Extracted::Usable(classification)
}

fn match_keywords(text: &str) -> Option<Classification> {
    let lowered = text.to_lowercase();

    KEYWORDS
        .iter()
        .find(|(_, needles, _)| needles.iter().any(|needle| lowered.contains(needle)))
        .map(|(category, _, noun)| {
            Classification::new(
                *category,
                KEYWORD_CONFIDENCE,
                format!("Detected {noun} in response"),
                ParseMethod::Keyword,
            )
        })
}
