//! Loading the initial preset images.
//!
//! Presets are configured as URLs. Each one is fetched once at startup
//! and turned into an [`Asset`], so presets behave exactly like uploads
//! when sent to the generation service. A preset that fails to load is
//! logged and left out.

use futures::future::join_all;
use kisekae_core::{Asset, AssetError};
use tracing::{debug, warn};

/// Person photos shown on the first step.
pub const PERSON_PRESET_URLS: &[&str] = &[
    "https://picsum.photos/id/64/432/576",
    "https://picsum.photos/id/91/432/576",
    "https://picsum.photos/id/338/432/576",
    "https://picsum.photos/id/669/432/576",
];

/// Clothing images shown on the second step.
pub const CLOTHES_PRESET_URLS: &[&str] = &[
    "https://picsum.photos/id/447/400/500",
    "https://picsum.photos/id/103/400/500",
    "https://picsum.photos/id/250/400/500",
    "https://picsum.photos/id/30/400/500",
];

#[derive(Debug, thiserror::Error)]
pub enum PresetError {
    #[error("request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("server answered {0}")]
    Status(reqwest::StatusCode),

    #[error(transparent)]
    Image(#[from] AssetError),
}

/// Fetch one preset. `data:` URIs are parsed in place without a request.
///
/// # Errors
///
/// Returns [`PresetError`] when the request fails, the server answers
/// with a non-success status or the body is not a recognized image.
pub async fn fetch_asset(http: &reqwest::Client, url: &str) -> Result<Asset, PresetError> {
    if url.starts_with("data:") {
        return Ok(Asset::parse(url));
    }
    let response = http.get(url).send().await?;
    let status = response.status();
    if !status.is_success() {
        return Err(PresetError::Status(status));
    }
    let bytes = response.bytes().await?;
    Ok(Asset::from_bytes(&bytes)?)
}

/// Fetch every URL concurrently, keeping the order of those that load.
pub async fn fetch_all(http: &reqwest::Client, urls: &[&str]) -> Vec<Asset> {
    let results = join_all(urls.iter().map(|url| fetch_asset(http, url))).await;
    let assets: Vec<Asset> = urls
        .iter()
        .zip(results)
        .filter_map(|(url, result)| match result {
            Ok(asset) => Some(asset),
            Err(err) => {
                warn!(url, error = %err, "skipping preset");
                None
            }
        })
        .collect();
    debug!(requested = urls.len(), loaded = assets.len(), "presets loaded");
    assets
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use futures::executor::block_on;

    use super::*;

    #[test]
    fn data_uris_load_without_network() {
        let http = reqwest::Client::new();
        let assets = block_on(fetch_all(
            &http,
            &["data:image/jpeg;base64,AAAA", "data:image/png;base64,BBBB"],
        ));
        assert_eq!(assets.len(), 2);
        assert_eq!(assets[0].mime_type(), "image/jpeg");
        assert_eq!(assets[1].data(), "BBBB");
    }

    #[test]
    fn preset_urls_are_https() {
        for url in PERSON_PRESET_URLS.iter().chain(CLOTHES_PRESET_URLS) {
            assert!(url.starts_with("https://"), "{url}");
        }
    }
}
