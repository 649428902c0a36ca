//! Raster page images handed to vision backends.

use base64::Engine;
use base64::engine::general_purpose::STANDARD;

/// An encoded page image (PNG, JPEG) plus its MIME type.
///
/// The reconstruction pipeline never decodes pixels; the image travels
/// opaquely to whichever vision backend refines the skeleton.
#[derive(Debug, Clone, PartialEq)]
pub struct RasterImage {
    /// Encoded image bytes.
    pub bytes: Vec<u8>,
    /// MIME type of the encoding (e.g., "image/png").
    pub mime_type: String,
}

impl RasterImage {
    /// Wrap already-encoded image bytes.
    pub fn new(bytes: Vec<u8>, mime_type: impl Into<String>) -> Self {
        Self {
            bytes,
            mime_type: mime_type.into(),
        }
    }

    /// Decode a base64 payload (as produced by browser canvases and most
    /// OCR pipelines) into an image.
    pub fn from_base64(
        data: &str,
        mime_type: impl Into<String>,
    ) -> Result<Self, base64::DecodeError> {
        let bytes = STANDARD.decode(data)?;
        Ok(Self::new(bytes, mime_type))
    }

    /// Base64 encoding of the image bytes.
    pub fn to_base64(&self) -> String {
        STANDARD.encode(&self.bytes)
    }
}
