//! Where and how to reach the model.

use std::fmt;

use kisekae_core::GenerationError;

/// Image-capable Gemini model used when none is configured.
pub const DEFAULT_MODEL: &str = "gemini-2.5-flash-image";

/// Public Generative Language API host.
pub const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com";

/// Environment variables checked for the API key, in order.
pub const API_KEY_VARS: [&str; 2] = ["API_KEY", "GEMINI_API_KEY"];

/// Credential, model and endpoint settings, read once at startup.
#[derive(Clone, PartialEq, Eq)]
pub struct GatewayConfig {
    api_key: Option<String>,
    model: String,
    base_url: String,
}

impl Default for GatewayConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            model: DEFAULT_MODEL.to_owned(),
            base_url: DEFAULT_BASE_URL.to_owned(),
        }
    }
}

impl fmt::Debug for GatewayConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GatewayConfig")
            .field("api_key", &self.api_key.as_ref().map(|_| "<redacted>"))
            .field("model", &self.model)
            .field("base_url", &self.base_url)
            .finish()
    }
}

impl GatewayConfig {
    /// Read `API_KEY` (or `GEMINI_API_KEY`), `GEMINI_MODEL` and
    /// `GEMINI_BASE_URL` from the process environment.
    #[must_use]
    pub fn from_env() -> Self {
        let var = |name: &str| std::env::var(name).ok();
        Self::from_lookup(var)
    }

    /// Same variables as [`GatewayConfig::from_env`], captured when the
    /// crate was compiled. Used by the browser build, which has no
    /// process environment.
    #[must_use]
    pub fn from_build_env() -> Self {
        Self::from_lookup(|name| {
            let value = match name {
                "API_KEY" => option_env!("API_KEY"),
                "GEMINI_API_KEY" => option_env!("GEMINI_API_KEY"),
                "GEMINI_MODEL" => option_env!("GEMINI_MODEL"),
                "GEMINI_BASE_URL" => option_env!("GEMINI_BASE_URL"),
                _ => None,
            };
            value.map(str::to_owned)
        })
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let present = |name: &str| lookup(name).filter(|value| !value.trim().is_empty());
        let mut config = Self {
            api_key: API_KEY_VARS.iter().find_map(|name| present(name)),
            ..Self::default()
        };
        if let Some(model) = present("GEMINI_MODEL") {
            config = config.with_model(model);
        }
        if let Some(base_url) = present("GEMINI_BASE_URL") {
            config = config.with_base_url(base_url);
        }
        config
    }

    /// Use this key instead of the one read from the environment.
    #[must_use]
    pub fn with_api_key(mut self, api_key: impl Into<String>) -> Self {
        self.api_key = Some(api_key.into());
        self
    }

    /// Generate with a different image-capable model.
    #[must_use]
    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into().trim().to_owned();
        self
    }

    /// Override the API host. Trailing slashes are dropped.
    #[must_use]
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into().trim().trim_end_matches('/').to_owned();
        self
    }

    /// Model name used in the request path.
    #[must_use]
    pub fn model(&self) -> &str {
        &self.model
    }

    /// API host, without a trailing slash.
    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Returns `true` when a non-blank API key is set.
    #[must_use]
    pub fn has_credential(&self) -> bool {
        self.credential().is_ok()
    }

    /// The API key.
    ///
    /// # Errors
    ///
    /// [`GenerationError::MissingCredential`] when the key is unset or
    /// blank.
    pub fn credential(&self) -> Result<&str, GenerationError> {
        self.api_key
            .as_deref()
            .map(str::trim)
            .filter(|key| !key.is_empty())
            .ok_or(GenerationError::MissingCredential)
    }

    /// Full `generateContent` URL for the configured model.
    #[must_use]
    pub fn endpoint(&self) -> String {
        let model = self.model.strip_prefix("models/").unwrap_or(&self.model);
        format!("{}/v1beta/models/{model}:generateContent", self.base_url)
    }
}
