//! Request extractors with error responses in the server's error format.
//!
//! - [`Multipart`] wraps `axum::extract::Multipart`, rejecting malformed
//!   requests with `422 unprocessable_upload`
//! - [`ImageUpload`] reads the uploaded image out of a multipart body

mod image_upload;
mod multipart;

pub use crate::extract::image_upload::{IMAGE_FIELD, ImageUpload};
pub use crate::extract::multipart::Multipart;
