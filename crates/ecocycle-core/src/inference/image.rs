use std::fmt;

use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use bytes::Bytes;
use derive_more::From;

/// Media type declared for every uploaded image.
///
/// The backend tolerates PNG or WebP payloads labelled as JPEG, so the
/// upload's real format is not sniffed.
pub const DEFAULT_MEDIA_TYPE: &str = "image/jpeg";

/// Raw image bytes as uploaded by the client.
#[derive(Clone, PartialEq, Eq, From)]
pub struct ImageData {
    bytes: Bytes,
}

impl ImageData {
    /// Wraps uploaded bytes without validating the image format.
    pub fn from_bytes(bytes: impl Into<Bytes>) -> Self {
        Self {
            bytes: bytes.into(),
        }
    }

    /// Returns the raw bytes.
    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }

    /// Returns the size of the image in bytes.
    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    /// Returns true if no bytes were uploaded.
    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    /// Returns the bytes encoded as standard padded base64.
    pub fn to_base64(&self) -> String {
        STANDARD.encode(&self.bytes)
    }

    /// Returns a `data:` URI embeddable as an `image_url` content part.
    pub fn to_data_uri(&self) -> String {
        format!("data:{DEFAULT_MEDIA_TYPE};base64,{}", self.to_base64())
    }
}

impl fmt::Debug for ImageData {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ImageData")
            .field("len", &self.bytes.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn data_uri_embeds_base64_as_jpeg() {
        let image = ImageData::from_bytes(&b"hello"[..]);
        assert_eq!(image.to_base64(), "aGVsbG8=");
        assert_eq!(image.to_data_uri(), "data:image/jpeg;base64,aGVsbG8=");
    }

    #[test]
    fn png_bytes_are_still_labelled_jpeg() {
        let png_magic = vec![0x89, b'P', b'N', b'G', 0x0d, 0x0a, 0x1a, 0x0a];
        let image = ImageData::from_bytes(png_magic);
        assert!(image.to_data_uri().starts_with("data:image/jpeg;base64,"));
        assert_eq!(image.len(), 8);
    }

    #[test]
    fn debug_hides_payload() {
        let image = ImageData::from_bytes(vec![1u8; 4096]);
        assert_eq!(format!("{image:?}"), "ImageData { len: 4096 }");
    }

    #[test]
    fn converts_from_shared_bytes() {
        let image = ImageData::from(Bytes::from_static(b"jpeg"));
        assert_eq!(image.as_bytes(), b"jpeg");
        assert!(!image.is_empty());
    }
}
