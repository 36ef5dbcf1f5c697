use axum::extract::{FromRequest, Request};
use ecocycle_core::ImageData;

use super::Multipart;
use crate::handler::{Error, ErrorKind};

/// Tracing target for upload extraction.
const TRACING_TARGET: &str = "ecocycle_server::extract::image_upload";

/// Name of the multipart field carrying the image.
pub const IMAGE_FIELD: &str = "file";

/// Image read from a `multipart/form-data` request.
///
/// The part named [`IMAGE_FIELD`] is preferred. When no part has that name,
/// the first part carrying a file name is used instead. Empty uploads are
/// rejected.
#[derive(Debug, Clone)]
pub struct ImageUpload {
    /// Uploaded bytes.
    pub image: ImageData,
    /// Client-supplied file name, if any.
    pub file_name: Option<String>,
}

impl<S> FromRequest<S> for ImageUpload
where
    S: Send + Sync,
{
    type Rejection = Error<'static>;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let mut multipart = Multipart::from_request(req, state).await?;
        let mut fallback = None;

        while let Some(field) = multipart.next_field().await? {
            let is_image_field = field.name() == Some(IMAGE_FIELD);
            if !is_image_field && (fallback.is_some() || field.file_name().is_none()) {
                continue;
            }

            let file_name = field.file_name().map(ToOwned::to_owned);
            let bytes = field.bytes().await?;
            let upload = Self {
                image: ImageData::from_bytes(bytes),
                file_name,
            };

            if is_image_field {
                return upload.non_empty();
            }

            fallback = Some(upload);
        }

        match fallback {
            Some(upload) => upload.non_empty(),
            None => {
                tracing::debug!(target: TRACING_TARGET, "Multipart request contained no file");
                Err(ErrorKind::UnprocessableUpload
                    .with_message("No file uploaded")
                    .with_context("Expected a multipart field named `file`"))
            }
        }
    }
}

impl ImageUpload {
    fn non_empty(self) -> Result<Self, Error<'static>> {
        if self.image.is_empty() {
            return Err(ErrorKind::UnprocessableUpload.with_message("Uploaded file is empty"));
        }

        tracing::debug!(
            target: TRACING_TARGET,
            file_name = self.file_name.as_deref(),
            image_bytes = self.image.len(),
            "Image upload received"
        );

        Ok(self)
    }
}
