//! HTTP client implementing [`GenerationGateway`] against Gemini.

use std::sync::Arc;

use futures::FutureExt;
use kisekae_core::{Asset, GenerationError, GenerationFuture, GenerationGateway};
use reqwest::StatusCode;
use tracing::{debug, warn};

use crate::config::GatewayConfig;
use crate::prompt::{TRY_ON_INSTRUCTION, clothing_description};
use crate::wire::{ErrorResponse, GenerateContentRequest, GenerateContentResponse, Part};

/// Sends `generateContent` requests and extracts the returned image.
///
/// Cloning is cheap; clones share the connection pool and config.
#[derive(Debug, Clone)]
pub struct GeminiGateway {
    http: reqwest::Client,
    config: Arc<GatewayConfig>,
}

impl GeminiGateway {
    /// A gateway with a default HTTP client. No request timeout is set;
    /// a slow generation is waited out.
    #[must_use]
    pub fn new(config: GatewayConfig) -> Self {
        Self::with_client(reqwest::Client::new(), config)
    }

    /// A gateway using a caller-configured HTTP client.
    #[must_use]
    pub fn with_client(http: reqwest::Client, config: GatewayConfig) -> Self {
        Self {
            http,
            config: Arc::new(config),
        }
    }

    #[must_use]
    pub fn config(&self) -> &GatewayConfig {
        &self.config
    }

    /// Check the credential now and return the request as a future.
    fn submit(
        &self,
        operation: &'static str,
        request: GenerateContentRequest,
    ) -> Result<GenerationFuture, GenerationError> {
        let api_key = self.config.credential()?.to_owned();
        let http = self.http.clone();
        let endpoint = self.config.endpoint();
        Ok(async move {
            debug!(operation, endpoint = %endpoint, "sending generateContent");
            let outcome = post(&http, &endpoint, &api_key, &request).await;
            match &outcome {
                Ok(asset) => debug!(operation, mime = asset.mime_type(), "image received"),
                Err(err) => warn!(operation, error = %err, "generation request failed"),
            }
            outcome
        }
        .boxed_local())
    }
}

impl GenerationGateway for GeminiGateway {
    fn generate_clothing(&self, prompt: &str) -> Result<GenerationFuture, GenerationError> {
        let request = GenerateContentRequest::single(vec![Part::text(clothing_description(prompt))]);
        self.submit("clothing", request)
    }

    fn generate_try_on(
        &self,
        person: &Asset,
        clothes: &Asset,
    ) -> Result<GenerationFuture, GenerationError> {
        let request = GenerateContentRequest::single(vec![
            Part::image(person),
            Part::image(clothes),
            Part::text(TRY_ON_INSTRUCTION),
        ]);
        self.submit("try-on", request)
    }
}

async fn post(
    http: &reqwest::Client,
    endpoint: &str,
    api_key: &str,
    request: &GenerateContentRequest,
) -> Result<Asset, GenerationError> {
    let response = http
        .post(endpoint)
        .header("x-goog-api-key", api_key)
        .json(request)
        .send()
        .await
        .map_err(|e| {
            GenerationError::GenerationFailed(if e.is_timeout() {
                "request timed out".to_owned()
            } else {
                format!("network error: {e}")
            })
        })?;

    let status = response.status();
    if !status.is_success() {
        let body = response.text().await.unwrap_or_default();
        return Err(GenerationError::GenerationFailed(describe_status(
            status, &body,
        )));
    }

    let body: GenerateContentResponse = response.json().await.map_err(|e| {
        GenerationError::GenerationFailed(format!("malformed response body: {e}"))
    })?;
    body.first_inline_image()
        .ok_or(GenerationError::NoImageReturned)
}

/// Log-friendly description of a non-success response.
fn describe_status(status: StatusCode, body: &str) -> String {
    let detail = serde_json::from_str::<ErrorResponse>(body)
        .ok()
        .map(|parsed| parsed.error.message)
        .filter(|message| !message.is_empty())
        .unwrap_or_else(|| body.trim().chars().take(200).collect());
    match status.as_u16() {
        401 => format!("authentication failed: {detail}"),
        403 => format!("access forbidden: {detail}"),
        429 => format!("rate limit exceeded: {detail}"),
        500..=599 => format!("server error ({status}): {detail}"),
        _ => format!("HTTP {status}: {detail}"),
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn asset() -> Asset {
        Asset::new("image/png", "AAAA")
    }

    #[test]
    fn missing_credential_is_reported_before_any_request() {
        let gateway = GeminiGateway::new(GatewayConfig::default());
        assert_eq!(
            gateway.generate_clothing("hat").err(),
            Some(GenerationError::MissingCredential)
        );
        assert_eq!(
            gateway.generate_try_on(&asset(), &asset()).err(),
            Some(GenerationError::MissingCredential)
        );
    }

    #[test]
    fn configured_gateway_returns_a_future() {
        let gateway = GeminiGateway::new(
            GatewayConfig::default()
                .with_api_key("key")
                .with_base_url("http://127.0.0.1:9"),
        );
        // Building the future does not touch the network.
        assert!(gateway.generate_clothing("hat").is_ok());
    }

    #[test]
    fn status_descriptions_prefer_api_message() {
        let body = r#"{"error":{"code":429,"message":"Quota exceeded","status":"RESOURCE_EXHAUSTED"}}"#;
        assert_eq!(
            describe_status(StatusCode::TOO_MANY_REQUESTS, body),
            "rate limit exceeded: Quota exceeded"
        );
        assert_eq!(
            describe_status(StatusCode::BAD_GATEWAY, "upstream down\n"),
            "server error (502 Bad Gateway): upstream down"
        );
        assert_eq!(
            describe_status(StatusCode::UNAUTHORIZED, ""),
            "authentication failed: "
        );
    }
}
