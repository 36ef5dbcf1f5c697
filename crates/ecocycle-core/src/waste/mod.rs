//! Waste classification domain: categories, parsing and pricing.
//!
//! The flow through this module is one-directional:
//!
//! ```text
//! raw model reply ──parse_classification──▶ Classification ──PricingTable::quote──▶ PriceQuote
//! ```

mod category;
mod classification;
mod parser;
mod pricing;

pub use category::Category;
pub use classification::{Classification, ParseMethod};
pub use parser::parse_classification;
pub use pricing::{NON_RECYCLABLE_LABEL, PriceQuote, PricingTable};

/// Tracing target for waste classification parsing.
pub const TRACING_TARGET: &str = "ecocycle_core::waste";
