//! Data URL validation

use crate::error::ImageError;
use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine;
use uxlens_gemini::InlineImage;

const DATA_PREFIX: &str = "data:";
const BASE64_MARKER: &str = ";base64";

/// Image decoded from a `data:image/<subtype>;base64,<payload>` URL
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageData {
    /// MIME type, lowercased
    pub mime_type: String,
    /// Base64 payload
    pub data: String,
}

impl ImageData {
    /// Parse and bound-check a data URL
    ///
    /// The payload is decoded once to validate it and measure its size.
    ///
    /// # Errors
    /// [`ImageError`] describing the first rule the input breaks.
    pub fn from_data_url(url: &str, max_bytes: usize) -> Result<Self, ImageError> {
        let rest = url
            .trim()
            .strip_prefix(DATA_PREFIX)
            .ok_or(ImageError::NotADataUrl)?;
        let (header, payload) = rest.split_once(',').ok_or(ImageError::NotADataUrl)?;
        let mime = header
            .strip_suffix(BASE64_MARKER)
            .ok_or(ImageError::NotADataUrl)?
            .trim()
            .to_ascii_lowercase();

        if !mime
            .strip_prefix("image/")
            .is_some_and(|subtype| !subtype.is_empty())
        {
            return Err(ImageError::UnsupportedMediaType(mime));
        }

        if payload.is_empty() {
            return Err(ImageError::EmptyPayload);
        }

        let size = BASE64
            .decode(payload)
            .map_err(|_| ImageError::InvalidBase64)?
            .len();
        if size > max_bytes {
            return Err(ImageError::TooLarge {
                size,
                limit: max_bytes,
            });
        }

        Ok(Self {
            mime_type: mime,
            data: payload.to_string(),
        })
    }

    /// Convert to the model request form
    #[must_use]
    pub fn to_inline(&self) -> InlineImage {
        InlineImage::new(self.mime_type.clone(), self.data.clone())
    }
}
