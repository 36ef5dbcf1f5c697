use serde::{Deserialize, Serialize};

/// Successful connection test result.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConnectionTestResponse {
    /// Human-readable status line.
    pub status: String,
    /// Reply to the probe prompt.
    pub test_response: String,
    /// Classification models the service will try, in order.
    pub available_models: Vec<String>,
}
