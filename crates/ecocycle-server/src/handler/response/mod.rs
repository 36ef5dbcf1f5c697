//! Response types for HTTP handlers.

mod analysis;
mod classification;
mod connection;
mod error_response;
mod setup;

pub use analysis::DetailedAnalysisResponse;
pub use classification::{ClassificationResponse, DebugInfo, RAW_RESPONSE_PREVIEW_CHARS};
pub use connection::ConnectionTestResponse;
pub use error_response::ErrorResponse;
pub use setup::{ModelInfo, PriceEntry, SetupResponse};
