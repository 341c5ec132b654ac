//! Pipeline configuration.
//!
//! The pipeline never reads the environment itself: callers build a
//! [`ConciergeConfig`] (or use [`ConciergeConfig::from_env`]) and pass it to
//! the constructor, so tests and embedders control every knob explicitly.

use std::time::Duration;

use secrecy::SecretString;

use crate::audio::DEFAULT_SAMPLE_RATE;
use crate::error::ConfigError;

/// Default generation endpoint.
pub const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com";

/// Default generation model.
pub const DEFAULT_MODEL: &str = "gemini-2.0-flash-exp";

/// Default prebuilt voice for news speech synthesis.
pub const DEFAULT_TTS_VOICE: &str = "Kore";

const DEFAULT_TIMEOUT_SECS: u64 = 60;

/// Configuration for the concierge pipeline.
#[derive(Debug, Clone)]
pub struct ConciergeConfig {
    /// Generation endpoint base URL.
    pub base_url: String,
    /// API key sent with every generation call.
    pub api_key: SecretString,
    /// Model identifier used for all four agents.
    pub model: String,
    /// Prebuilt voice used when synthesizing the news script.
    pub tts_voice: String,
    /// Per-call HTTP timeout. The news agent issues three sequential calls,
    /// so its aggregate ceiling is three times this value.
    pub timeout: Duration,
    /// Sample rate assumed for synthesized PCM payloads, in Hz.
    pub audio_sample_rate: u32,
}

impl ConciergeConfig {
    /// Create a configuration with documented defaults.
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            api_key: SecretString::from(api_key.into()),
            model: DEFAULT_MODEL.to_string(),
            tts_voice: DEFAULT_TTS_VOICE.to_string(),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            audio_sample_rate: DEFAULT_SAMPLE_RATE,
        }
    }

    /// Override the endpoint base URL.
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Override the model identifier.
    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    /// Override the speech-synthesis voice.
    pub fn with_tts_voice(mut self, voice: impl Into<String>) -> Self {
        self.tts_voice = voice.into();
        self
    }

    /// Override the per-call timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Build a configuration from environment variables, loading `.env`
    /// first if present.
    ///
    /// `GEMINI_API_KEY` is required; `GEMINI_BASE_URL`, `GEMINI_MODEL` and
    /// `GEMINI_TTS_VOICE` override the defaults.
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let api_key = std::env::var("GEMINI_API_KEY")
            .map_err(|_| ConfigError::MissingEnvVar("GEMINI_API_KEY".to_string()))?;
        let mut config = Self::new(api_key);

        if let Ok(base_url) = std::env::var("GEMINI_BASE_URL") {
            config.base_url = base_url;
        }
        if let Ok(model) = std::env::var("GEMINI_MODEL") {
            config.model = model;
        }
        if let Ok(voice) = std::env::var("GEMINI_TTS_VOICE") {
            config.tts_voice = voice;
        }
        Ok(config)
    }
}
