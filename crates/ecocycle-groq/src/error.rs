//! Internal error types for ecocycle-groq.

use std::error::Error as _;
use std::iter;

use reqwest::StatusCode;
use thiserror::Error;

/// Result type alias for ecocycle-groq operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Internal error type for ecocycle-groq operations.
#[derive(Debug, Error)]
pub enum Error {
    /// HTTP request failed before a response arrived.
    #[error("HTTP error: {0}")]
    Reqwest(#[from] reqwest::Error),
    /// Response body was not the expected JSON.
    #[error("Serialization error: {0}")]
    Serde(#[from] serde_json::Error),
    /// The API answered with a non-success status.
    #[error("Groq API returned {status}: {message}")]
    Status {
        /// HTTP status of the response.
        status: StatusCode,
        /// Error message extracted from the response body.
        message: String,
    },
    /// The API answered without any completion text.
    #[error("Groq API returned no completion content")]
    EmptyCompletion,
    /// Client configuration is invalid.
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
}

/// Renders a transport error together with its sources, which carry the
/// DNS, connection or TLS detail that reqwest's own message omits.
fn describe(error: &reqwest::Error) -> String {
    iter::successors(error.source(), |&source: &&(dyn std::error::Error + 'static)| source.source()).fold(
        error.to_string(),
        |mut message, source| {
            message.push_str(": ");
            message.push_str(&source.to_string());
            message
        },
    )
}

impl From<Error> for ecocycle_core::Error {
    fn from(err: Error) -> Self {
        use ecocycle_core::Error as CoreError;

        match err {
            Error::Reqwest(e) => {
                if e.is_timeout() {
                    CoreError::timeout()
                        .with_message(format!("Request timed out: {}", describe(&e)))
                        .with_source(e)
                } else if e.is_connect() {
                    CoreError::network_error()
                        .with_message(format!("Connection failed: {}", describe(&e)))
                        .with_source(e)
                } else if e.is_decode() {
                    CoreError::invalid_response()
                        .with_message(describe(&e))
                        .with_source(e)
                } else {
                    CoreError::network_error()
                        .with_message(describe(&e))
                        .with_source(e)
                }
            }
            Error::Serde(e) => CoreError::invalid_response()
                .with_message(format!("malformed completion payload: {e}"))
                .with_source(e),
            Error::Status { status, .. } => {
                let message = err.to_string();
                let error = match status {
                    StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => CoreError::authentication(),
                    StatusCode::TOO_MANY_REQUESTS => CoreError::rate_limited(),
                    StatusCode::REQUEST_TIMEOUT | StatusCode::GATEWAY_TIMEOUT => {
                        CoreError::timeout()
                    }
                    s if s.is_server_error() => CoreError::service_unavailable(),
                    _ => CoreError::external_error(),
                };
                error.with_message(message)
            }
            Error::EmptyCompletion => CoreError::invalid_response().with_message(err.to_string()),
            Error::InvalidConfig(_) => CoreError::configuration().with_message(err.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use ecocycle_core::ErrorKind;

    use super::*;

    fn kind_of(status: StatusCode) -> ErrorKind {
        let err = Error::Status {
            status,
            message: "nope".to_owned(),
        };
        ecocycle_core::Error::from(err).kind
    }

    #[test]
    fn status_codes_map_to_error_kinds() {
        assert_eq!(kind_of(StatusCode::UNAUTHORIZED), ErrorKind::Authentication);
        assert_eq!(kind_of(StatusCode::FORBIDDEN), ErrorKind::Authentication);
        assert_eq!(kind_of(StatusCode::TOO_MANY_REQUESTS), ErrorKind::RateLimited);
        assert_eq!(kind_of(StatusCode::GATEWAY_TIMEOUT), ErrorKind::Timeout);
        assert_eq!(kind_of(StatusCode::BAD_GATEWAY), ErrorKind::ServiceUnavailable);
        assert_eq!(kind_of(StatusCode::NOT_FOUND), ErrorKind::ExternalError);
    }

    #[test]
    fn status_message_is_kept() {
        let err = Error::Status {
            status: StatusCode::NOT_FOUND,
            message: "model `x` does not exist".to_owned(),
        };
        let core = ecocycle_core::Error::from(err);
        let message = core.message.unwrap_or_default();

        assert!(message.contains("404"));
        assert!(message.contains("model `x` does not exist"));
    }

    #[test]
    fn empty_completion_is_invalid_response() {
        let core = ecocycle_core::Error::from(Error::EmptyCompletion);
        assert_eq!(core.kind, ErrorKind::InvalidResponse);
    }
}
