//! Inference error to HTTP error conversion.

use ecocycle_core::ErrorKind as InferenceErrorKind;

use super::http_error::{Error as HttpError, ErrorKind};

/// Tracing target for inference error conversions.
const TRACING_TARGET: &str = "ecocycle_server::handler::inference";

impl From<ecocycle_core::Error> for HttpError<'static> {
    fn from(error: ecocycle_core::Error) -> Self {
        match error.kind {
            InferenceErrorKind::Configuration | InferenceErrorKind::Authentication => {
                tracing::error!(
                    target: TRACING_TARGET,
                    error = %error,
                    error_kind = ?error.kind,
                    "Inference backend rejected the service configuration"
                );
            }
            _ => {
                tracing::warn!(
                    target: TRACING_TARGET,
                    error = %error,
                    error_kind = ?error.kind,
                    "Inference request failed"
                );
            }
        }

        let kind = match error.kind {
            InferenceErrorKind::InvalidInput => ErrorKind::UnprocessableUpload,
            InferenceErrorKind::RateLimited => ErrorKind::UpstreamRateLimited,
            InferenceErrorKind::Timeout => ErrorKind::GatewayTimeout,
            InferenceErrorKind::Configuration | InferenceErrorKind::Serialization => {
                ErrorKind::InternalServerError
            }
            InferenceErrorKind::NetworkError
            | InferenceErrorKind::Authentication
            | InferenceErrorKind::ServiceUnavailable
            | InferenceErrorKind::ExternalError
            | InferenceErrorKind::InvalidResponse => ErrorKind::BadGateway,
        };

        kind.with_message(error.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn upstream_failures_are_bad_gateway() {
        let error = HttpError::from(
            ecocycle_core::Error::network_error().with_message("Connection failed"),
        );

        assert_eq!(error.kind(), ErrorKind::BadGateway);
        assert_eq!(error.message(), Some("NetworkError: Connection failed"));
    }

    #[test]
    fn timeouts_are_gateway_timeout() {
        let error = HttpError::from(ecocycle_core::Error::timeout());
        assert_eq!(error.kind(), ErrorKind::GatewayTimeout);
    }

    #[test]
    fn rate_limits_keep_their_own_name() {
        let error = HttpError::from(ecocycle_core::Error::rate_limited());
        assert_eq!(error.kind(), ErrorKind::UpstreamRateLimited);
        assert_eq!(error.kind().status_code().as_u16(), 502);
    }

    #[test]
    fn invalid_input_is_unprocessable() {
        let error = HttpError::from(ecocycle_core::Error::invalid_input());
        assert_eq!(error.kind(), ErrorKind::UnprocessableUpload);
    }
}
