//! Self-describing in-memory image payloads.
//!
//! An [`Asset`] is a mime type plus a base64 payload. Uploaded photos,
//! presets, generated clothing and try-on results all share this one
//! representation, so any of them can be fed back into the generation
//! service or shown in the UI as a `data:` URI.

use std::fmt;
use std::sync::Arc;

use base64::Engine;
use base64::engine::general_purpose::STANDARD;

/// Mime type assumed for payloads that carry no `data:` header.
pub const DEFAULT_MIME_TYPE: &str = "image/png";

/// Errors from converting raw input into an [`Asset`] or back.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AssetError {
    /// The input bytes were empty.
    #[error("image data is empty")]
    EmptyInput,

    /// The bytes do not start with a known image signature.
    #[error("unrecognized image format")]
    UnrecognizedFormat,

    /// The stored payload is not valid base64.
    #[error("invalid base64 payload: {0}")]
    InvalidPayload(String),
}

/// An immutable image: mime type plus base64-encoded payload.
///
/// Both fields are reference counted, so cloning an asset into the
/// wizard, a preset list and a history entry shares one allocation.
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct Asset {
    mime_type: Arc<str>,
    data: Arc<str>,
}

impl Asset {
    /// Create an asset from an already-split mime type and base64 payload.
    ///
    /// The payload is not validated; malformed base64 is only discovered
    /// by whoever decodes it.
    #[must_use]
    pub fn new(mime_type: impl Into<Arc<str>>, data: impl Into<Arc<str>>) -> Self {
        Self {
            mime_type: mime_type.into(),
            data: data.into(),
        }
    }

    /// Parse a `data:<mime>;base64,<payload>` URI.
    ///
    /// Anything that does not match that shape is taken verbatim as a
    /// base64 PNG payload with mime type [`DEFAULT_MIME_TYPE`].
    #[must_use]
    pub fn parse(input: &str) -> Self {
        split_data_uri(input).map_or_else(
            || Self::new(DEFAULT_MIME_TYPE, input),
            |(mime_type, payload)| Self::new(mime_type, payload),
        )
    }

    /// Encode raw file bytes, inferring the mime type from the content.
    ///
    /// # Errors
    ///
    /// Returns [`AssetError::EmptyInput`] for empty input and
    /// [`AssetError::UnrecognizedFormat`] when the bytes carry no known
    /// image signature.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, AssetError> {
        if bytes.is_empty() {
            return Err(AssetError::EmptyInput);
        }
        let format = image::guess_format(bytes).map_err(|_| AssetError::UnrecognizedFormat)?;
        Ok(Self::new(format.to_mime_type(), STANDARD.encode(bytes)))
    }

    /// The mime type, e.g. `image/jpeg`.
    #[must_use]
    pub fn mime_type(&self) -> &str {
        &self.mime_type
    }

    /// The base64 payload without any header.
    #[must_use]
    pub fn data(&self) -> &str {
        &self.data
    }

    /// Render as a `data:` URI suitable for an `<img src>`.
    #[must_use]
    pub fn to_data_uri(&self) -> String {
        format!("data:{};base64,{}", self.mime_type, self.data)
    }

    /// Decode the payload back into raw bytes.
    ///
    /// # Errors
    ///
    /// Returns [`AssetError::InvalidPayload`] if the payload is not
    /// valid standard base64.
    pub fn decode(&self) -> Result<Vec<u8>, AssetError> {
        STANDARD
            .decode(self.data.as_bytes())
            .map_err(|e| AssetError::InvalidPayload(e.to_string()))
    }

    /// Conventional file extension for the mime type, `png` if unknown.
    #[must_use]
    pub fn file_extension(&self) -> &'static str {
        image::ImageFormat::from_mime_type(&*self.mime_type)
            .and_then(|format| format.extensions_str().first().copied())
            .unwrap_or("png")
    }
}

impl fmt::Debug for Asset {
    // Payloads run to megabytes; print the size instead.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Asset")
            .field("mime_type", &&*self.mime_type)
            .field("data_len", &self.data.len())
            .finish()
    }
}

/// Split a `data:` URI into `(mime, payload)`.
///
/// The mime type must be `<type>/<subtype>` where the type is ASCII
/// alphanumeric and the subtype may also contain `-`, `.` and `+`. The
/// payload must be non-empty and on a single line.
fn split_data_uri(input: &str) -> Option<(&str, &str)> {
    let rest = input.strip_prefix("data:")?;
    let (mime_type, payload) = rest.split_once(";base64,")?;
    let (kind, subtype) = mime_type.split_once('/')?;

    let kind_ok = !kind.is_empty() && kind.bytes().all(|b| b.is_ascii_alphanumeric());
    let subtype_ok = !subtype.is_empty()
        && subtype
            .bytes()
            .all(|b| b.is_ascii_alphanumeric() || matches!(b, b'-' | b'.' | b'+'));
    let payload_ok = !payload.is_empty() && !payload.contains(['\n', '\r']);

    (kind_ok && subtype_ok && payload_ok).then_some((mime_type, payload))
}
