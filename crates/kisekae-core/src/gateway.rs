//! Boundary to the external image-generation service.
//!
//! The core never talks to the network. It asks a [`GenerationGateway`]
//! for a future and settles whatever that future resolves to. The
//! gateway checks its credential synchronously, so a configuration
//! problem is distinguishable from a failed request.

use futures::future::LocalBoxFuture;

use crate::asset::Asset;

/// A pending generation request.
///
/// Futures are `!Send`: the UI runs on a single thread and the only
/// suspension points are these calls.
pub type GenerationFuture = LocalBoxFuture<'static, Result<Asset, GenerationError>>;

/// Failures reported by a [`GenerationGateway`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum GenerationError {
    /// No API credential is configured. Raised before any request.
    #[error("no API credential is configured")]
    MissingCredential,

    /// The service answered but the response held no inline image.
    #[error("the service returned no image")]
    NoImageReturned,

    /// Transport, HTTP or decoding failure. The cause is for logs only.
    #[error("generation failed: {0}")]
    GenerationFailed(String),
}

impl GenerationError {
    /// Returns `true` for configuration errors as opposed to transient
    /// service errors.
    #[must_use]
    pub const fn is_configuration(&self) -> bool {
        matches!(self, Self::MissingCredential)
    }
}

/// The two operations offered by the generation service.
///
/// Implementations perform no retries; retrying is a user decision
/// driven through [`crate::Session`].
pub trait GenerationGateway {
    /// Generate a standalone clothing image from a text description.
    ///
    /// # Errors
    ///
    /// Returns [`GenerationError::MissingCredential`] immediately when
    /// no credential is configured. All other failures arrive through
    /// the returned future.
    fn generate_clothing(&self, prompt: &str) -> Result<GenerationFuture, GenerationError>;

    /// Dress the person in `person` with the garment in `clothes`.
    ///
    /// # Errors
    ///
    /// Returns [`GenerationError::MissingCredential`] immediately when
    /// no credential is configured. All other failures arrive through
    /// the returned future.
    fn generate_try_on(
        &self,
        person: &Asset,
        clothes: &Asset,
    ) -> Result<GenerationFuture, GenerationError>;
}
