//! Error types for the concierge pipeline.

use std::time::Duration;

/// Top-level error type for the pipeline.
///
/// Nothing here escapes to the end user: the dispatcher converts every
/// variant into a displayable fallback response and logs the original.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Generation error: {0}")]
    GenAi(#[from] GenAiError),

    #[error("Audio error: {0}")]
    Audio(#[from] AudioError),
}

/// Configuration-related errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Missing required environment variable: {0}")]
    MissingEnvVar(String),

    #[error("Invalid configuration value for {key}: {message}")]
    InvalidValue { key: String, message: String },
}

/// Generation-capability errors.
#[derive(Debug, thiserror::Error)]
pub enum GenAiError {
    #[error("Provider {provider} request failed: {reason}")]
    RequestFailed { provider: String, reason: String },

    #[error("Provider {provider} rate limited, retry after {retry_after:?}")]
    RateLimited {
        provider: String,
        retry_after: Option<Duration>,
    },

    #[error("Invalid response from {provider}: {reason}")]
    InvalidResponse { provider: String, reason: String },

    #[error("Authentication failed for provider {provider}")]
    AuthFailed { provider: String },

    #[error("Provider {provider} returned no text content")]
    EmptyResponse { provider: String },

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Audio payload decoding errors.
#[derive(Debug, thiserror::Error)]
pub enum AudioError {
    #[error("Invalid base64 audio payload: {0}")]
    InvalidBase64(#[from] base64::DecodeError),

    #[error("PCM payload of {len} bytes is not 16-bit aligned")]
    Misaligned { len: usize },
}

/// Result type alias for the pipeline.
pub type Result<T> = std::result::Result<T, Error>;
