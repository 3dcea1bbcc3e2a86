//! Error and format types for image import.

use thiserror::Error;

/// Image formats recognized by their magic bytes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImageFormat {
    Png,
    Jpeg,
    WebP,
    Unknown,
}

impl ImageFormat {
    /// Detect format from magic bytes.
    pub fn from_magic_bytes(data: &[u8]) -> Self {
        if data.starts_with(&[0x89, b'P', b'N', b'G']) {
            return Self::Png;
        }
        if data.starts_with(&[0xFF, 0xD8, 0xFF]) {
            return Self::Jpeg;
        }
        if data.len() >= 12 && &data[0..4] == b"RIFF" && &data[8..12] == b"WEBP" {
            return Self::WebP;
        }
        Self::Unknown
    }
}

/// Errors that can occur while importing an image.
#[derive(Debug, Error)]
pub enum ImageError {
    #[error("not a data URI")]
    NotDataUri,

    #[error("invalid data URI: {0}")]
    MalformedDataUri(String),

    #[error("failed to decode base64 payload: {0}")]
    Base64(#[from] base64::DecodeError),

    #[error("unsupported image format: {0:?}")]
    UnsupportedFormat(ImageFormat),

    #[error("failed to decode PNG: {0}")]
    Decode(String),

    #[error("image loader is not running")]
    LoaderUnavailable,
}
