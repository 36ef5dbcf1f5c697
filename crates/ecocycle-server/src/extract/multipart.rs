//! Enhanced Multipart extractor with improved error handling.
//!
//! This module provides [`Multipart`], an enhanced version of [`axum::extract::Multipart`]
//! whose rejections and field errors render as [`Error`] responses.

use std::error::Error as _;
use std::iter;

use axum::extract::multipart::{MultipartError, MultipartRejection};
use axum::extract::{FromRequest, Multipart as AxumMultipart, Request};
use axum::http::StatusCode;
use derive_more::{Deref, DerefMut, From};

use crate::handler::{Error, ErrorKind};

/// Enhanced Multipart extractor with improved error handling.
#[must_use]
#[derive(Debug, Deref, DerefMut, From)]
pub struct Multipart(pub AxumMultipart);

impl Multipart {
    /// Returns the inner Axum Multipart extractor.
    #[inline]
    pub fn into_inner(self) -> AxumMultipart {
        self.0
    }
}

impl<S> FromRequest<S> for Multipart
where
    S: Send + Sync,
{
    type Rejection = Error<'static>;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        AxumMultipart::from_request(req, state)
            .await
            .map(Multipart)
            .map_err(Into::into)
    }
}

impl From<MultipartRejection> for Error<'static> {
    fn from(rejection: MultipartRejection) -> Self {
        match rejection {
            MultipartRejection::InvalidBoundary(_) => ErrorKind::UnprocessableUpload
                .with_message("Invalid multipart boundary")
                .with_context(
                    "The Content-Type header is missing or has an invalid boundary parameter. \
                     Ensure the request uses 'multipart/form-data' with a valid boundary.",
                ),
            _ => ErrorKind::UnprocessableUpload
                .with_message("Invalid multipart request")
                .with_context(format!("Multipart parsing failed: {}", rejection)),
        }
    }
}

/// Display text of the body length limit error raised by `http-body-util`.
const LENGTH_LIMIT_EXCEEDED: &str = "length limit exceeded";

/// Returns `true` if reading a field failed because the body limit was hit.
///
/// When the limit comes from an outer `RequestBodyLimitLayer`, the limit error
/// sits behind more than one wrapper and [`MultipartError::status`] misses it.
fn exceeds_length_limit(error: &MultipartError) -> bool {
    if error.status() == StatusCode::PAYLOAD_TOO_LARGE {
        return true;
    }

    iter::successors(error.source(), |&source: &&(dyn std::error::Error + 'static)| source.source())
        .any(|source| source.to_string().contains(LENGTH_LIMIT_EXCEEDED))
}

impl From<MultipartError> for Error<'static> {
    fn from(error: MultipartError) -> Self {
        if exceeds_length_limit(&error) {
            return ErrorKind::PayloadTooLarge.with_context(error.body_text());
        }

        ErrorKind::UnprocessableUpload
            .with_message("Invalid multipart data")
            .with_context(format!("Failed to parse multipart form: {}", error.body_text()))
    }
}
