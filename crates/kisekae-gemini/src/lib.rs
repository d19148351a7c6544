//! Gemini-backed [`GenerationGateway`](kisekae_core::GenerationGateway).
//!
//! Both operations call the `generateContent` REST endpoint of an
//! image-capable Gemini model and return the first inline image of the
//! first candidate.

pub mod client;
pub mod config;
pub mod prompt;
pub mod wire;

pub use client::GeminiGateway;
pub use config::{DEFAULT_BASE_URL, DEFAULT_MODEL, GatewayConfig};
