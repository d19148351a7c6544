//! JSON bodies of the `generateContent` endpoint.
//!
//! Only the fields the gateway reads or writes are modelled. Unknown
//! response fields are ignored.

use kisekae_core::Asset;
use serde::{Deserialize, Serialize};

/// Request body.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GenerateContentRequest {
    pub contents: Vec<Content>,
}

impl GenerateContentRequest {
    /// A single-turn request with the given parts.
    #[must_use]
    pub fn single(parts: Vec<Part>) -> Self {
        Self {
            contents: vec![Content { parts }],
        }
    }
}

/// One turn of a conversation.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Content {
    #[serde(default)]
    pub parts: Vec<Part>,
}

/// A piece of content: text, an inline image, or both absent for part
/// kinds this crate does not model.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Part {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    #[serde(default, alias = "inline_data", skip_serializing_if = "Option::is_none")]
    pub inline_data: Option<InlineData>,
}

impl Part {
    #[must_use]
    pub fn text(text: impl Into<String>) -> Self {
        Self {
            text: Some(text.into()),
            inline_data: None,
        }
    }

    /// An inline image part built from `asset`.
    ///
    /// A payload that is itself a `data:` URI is split first, so assets
    /// wrapped twice still go out with the right mime type.
    #[must_use]
    pub fn image(asset: &Asset) -> Self {
        let normalized = if asset.data().starts_with("data:") {
            Asset::parse(asset.data())
        } else {
            asset.clone()
        };
        Self {
            text: None,
            inline_data: Some(InlineData {
                mime_type: normalized.mime_type().to_owned(),
                data: normalized.data().to_owned(),
            }),
        }
    }
}

/// Base64 image bytes with their mime type.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InlineData {
    #[serde(alias = "mime_type")]
    pub mime_type: String,
    pub data: String,
}

/// Response body.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct GenerateContentResponse {
    #[serde(default)]
    pub candidates: Vec<Candidate>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct Candidate {
    #[serde(default)]
    pub content: Option<Content>,
}

impl GenerateContentResponse {
    /// The first inline image among the parts of the first candidate.
    ///
    /// Later candidates are never consulted.
    #[must_use]
    pub fn first_inline_image(&self) -> Option<Asset> {
        self.candidates
            .first()?
            .content
            .as_ref()?
            .parts
            .iter()
            .find_map(|part| part.inline_data.as_ref())
            .map(|inline| Asset::new(inline.mime_type.as_str(), inline.data.as_str()))
    }
}

/// Error body returned with non-2xx statuses.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ErrorResponse {
    #[serde(default)]
    pub error: ErrorDetail,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ErrorDetail {
    #[serde(default)]
    pub message: String,
    #[serde(default)]
    pub status: String,
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn request_uses_camel_case_and_omits_empty_fields() {
        let request = GenerateContentRequest::single(vec![
            Part::image(&Asset::new("image/jpeg", "UEVSU09O")),
            Part::text("hello"),
        ]);
        assert_eq!(
            serde_json::to_value(&request).unwrap(),
            json!({
                "contents": [{
                    "parts": [
                        { "inlineData": { "mimeType": "image/jpeg", "data": "UEVSU09O" } },
                        { "text": "hello" }
                    ]
                }]
            })
        );
    }

    #[test]
    fn image_part_splits_wrapped_data_uri() {
        let wrapped = Asset::new("image/png", "data:image/webp;base64,UklGRg==");
        let inline = Part::image(&wrapped).inline_data.unwrap();
        assert_eq!(inline.mime_type, "image/webp");
        assert_eq!(inline.data, "UklGRg==");
    }

    #[test]
    fn first_inline_image_skips_text_parts() {
        let response: GenerateContentResponse = serde_json::from_value(json!({
            "candidates": [{
                "content": {
                    "role": "model",
                    "parts": [
                        { "text": "Here you go" },
                        { "inlineData": { "mimeType": "image/png", "data": "AAAA" } },
                        { "inlineData": { "mimeType": "image/jpeg", "data": "BBBB" } }
                    ]
                },
                "finishReason": "STOP"
            }],
            "usageMetadata": { "totalTokenCount": 12 }
        }))
        .unwrap();

        let image = response.first_inline_image().unwrap();
        assert_eq!(image.mime_type(), "image/png");
        assert_eq!(image.data(), "AAAA");
    }

    #[test]
    fn only_first_candidate_is_scanned() {
        let response: GenerateContentResponse = serde_json::from_value(json!({
            "candidates": [
                { "content": { "parts": [{ "text": "refused" }] } },
                { "content": { "parts": [{ "inlineData": { "mimeType": "image/png", "data": "AAAA" } }] } }
            ]
        }))
        .unwrap();
        assert!(response.first_inline_image().is_none());
    }

    #[test]
    fn snake_case_inline_data_is_accepted() {
        let response: GenerateContentResponse = serde_json::from_value(json!({
            "candidates": [{
                "content": { "parts": [{ "inline_data": { "mime_type": "image/png", "data": "AAAA" } }] }
            }]
        }))
        .unwrap();
        assert_eq!(response.first_inline_image().unwrap().data(), "AAAA");
    }

    #[test]
    fn empty_or_blocked_responses_have_no_image() {
        for body in [
            json!({}),
            json!({ "candidates": [] }),
            json!({ "candidates": [{ "finishReason": "SAFETY" }] }),
            json!({ "promptFeedback": { "blockReason": "OTHER" } }),
        ] {
            let response: GenerateContentResponse = serde_json::from_value(body.clone()).unwrap();
            assert!(response.first_inline_image().is_none(), "{body}");
        }
    }

    #[test]
    fn error_body_parses_message() {
        let body: ErrorResponse = serde_json::from_value(json!({
            "error": { "code": 400, "message": "API key not valid.", "status": "INVALID_ARGUMENT" }
        }))
        .unwrap();
        assert_eq!(body.error.message, "API key not valid.");
        assert_eq!(body.error.status, "INVALID_ARGUMENT");
    }
}
