//! Saving the try-on result through a Blob URL.
//!
//! The browser offers no direct "save file" call. A `Blob` is built
//! from the decoded image, wrapped in an object URL and handed to a
//! temporary `<a download>` element that is clicked and removed.
//!
//! [`download_asset`] needs a browser environment.

use kisekae_core::{Asset, AssetError};
use wasm_bindgen::JsCast;
use wasm_bindgen::JsValue;
use web_sys::BlobPropertyBag;

/// File name stem used for downloaded results.
pub const RESULT_FILE_STEM: &str = "ai-tryon-result";

#[derive(Debug, thiserror::Error)]
pub enum DownloadError {
    /// The asset payload could not be decoded.
    #[error(transparent)]
    Decode(#[from] AssetError),

    /// A browser API call returned an error.
    #[error("browser API error: {0}")]
    JsError(String),
}

impl From<JsValue> for DownloadError {
    fn from(value: JsValue) -> Self {
        Self::JsError(format!("{value:?}"))
    }
}

/// `ai-tryon-result.<ext>` with the extension taken from the mime type.
#[must_use]
pub fn result_filename(asset: &Asset) -> String {
    format!("{RESULT_FILE_STEM}.{}", asset.file_extension())
}

/// Download `asset` under [`result_filename`].
///
/// # Errors
///
/// [`DownloadError::Decode`] if the payload is not valid base64 and
/// [`DownloadError::JsError`] if a browser call fails.
pub fn download_asset(asset: &Asset) -> Result<(), DownloadError> {
    let bytes = asset.decode()?;
    trigger_download(&bytes, &result_filename(asset), asset.mime_type())
}

fn trigger_download(data: &[u8], filename: &str, mime_type: &str) -> Result<(), DownloadError> {
    let window =
        web_sys::window().ok_or_else(|| DownloadError::JsError("no global window".into()))?;
    let document = window
        .document()
        .ok_or_else(|| DownloadError::JsError("no document".into()))?;

    let parts = js_sys::Array::new();
    parts.push(&js_sys::Uint8Array::from(data));

    let opts = BlobPropertyBag::new();
    opts.set_type(mime_type);
    let blob = web_sys::Blob::new_with_u8_array_sequence_and_options(&parts, &opts)?;
    let url = web_sys::Url::create_object_url_with_blob(&blob)?;

    let anchor: web_sys::HtmlAnchorElement = document
        .create_element("a")?
        .dyn_into::<web_sys::HtmlAnchorElement>()
        .map_err(|e| DownloadError::JsError(format!("failed to cast element: {e:?}")))?;
    anchor.set_href(&url);
    anchor.set_download(filename);

    let body = document
        .body()
        .ok_or_else(|| DownloadError::JsError("no document body".into()))?;
    body.append_child(&anchor)?;
    anchor.click();

    // The download has started; cleanup failures are not download failures.
    let _ = body.remove_child(&anchor);
    let _ = web_sys::Url::revoke_object_url(&url);

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn filename_follows_mime_type() {
        assert_eq!(
            result_filename(&Asset::new("image/png", "")),
            "ai-tryon-result.png"
        );
        assert_eq!(
            result_filename(&Asset::new("image/jpeg", "")),
            "ai-tryon-result.jpg"
        );
        assert_eq!(
            result_filename(&Asset::new("application/x-unknown", "")),
            "ai-tryon-result.png"
        );
    }
}
