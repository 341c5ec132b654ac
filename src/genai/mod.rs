//! Generation-capability boundary.
//!
//! The pipeline treats the model as a black box behind [`GenAiClient`]:
//! generate text, optionally grounded in web search, optionally as
//! synthesized speech. [`gemini`] provides the HTTP implementation; tests
//! script the trait directly.

mod gemini;

pub use gemini::GeminiClient;

use async_trait::async_trait;

use crate::error::GenAiError;

/// Output modality requested from the model.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Modality {
    #[default]
    Text,
    Audio,
}

/// A single generation call.
#[derive(Debug, Clone, Default)]
pub struct GenerateRequest {
    /// The user-visible prompt contents.
    pub contents: String,
    pub system_instruction: Option<String>,
    pub temperature: Option<f32>,
    /// Allow the model to ground its answer in web search results.
    pub web_search: bool,
    pub modality: Modality,
    /// Prebuilt voice name, required when requesting audio output.
    pub speech_voice: Option<String>,
    /// MIME type the response text must conform to (e.g. `application/json`).
    pub response_mime_type: Option<String>,
}

impl GenerateRequest {
    /// Create a plain text-generation request.
    pub fn new(contents: impl Into<String>) -> Self {
        Self {
            contents: contents.into(),
            ..Default::default()
        }
    }

    /// Set the system instruction.
    pub fn with_system_instruction(mut self, instruction: impl Into<String>) -> Self {
        self.system_instruction = Some(instruction.into());
        self
    }

    /// Set the sampling temperature.
    pub fn with_temperature(mut self, temperature: f32) -> Self {
        self.temperature = Some(temperature);
        self
    }

    /// Enable web-search grounding.
    pub fn with_web_search(mut self) -> Self {
        self.web_search = true;
        self
    }

    /// Request synthesized speech output with the given prebuilt voice.
    pub fn with_audio_output(mut self, voice: impl Into<String>) -> Self {
        self.modality = Modality::Audio;
        self.speech_voice = Some(voice.into());
        self
    }

    /// Constrain the response text to JSON.
    pub fn with_json_output(mut self) -> Self {
        self.response_mime_type = Some("application/json".to_string());
        self
    }
}

/// A web source backing a grounding chunk.
#[derive(Debug, Clone, Default)]
pub struct WebSource {
    pub title: Option<String>,
    pub uri: Option<String>,
}

/// One grounding citation candidate returned by the model.
///
/// `web` is optional because the metadata structure also carries non-web
/// chunk kinds the pipeline ignores.
#[derive(Debug, Clone, Default)]
pub struct GroundingChunk {
    pub web: Option<WebSource>,
}

/// Raw result of a generation call, before normalization.
#[derive(Debug, Clone, Default)]
pub struct GenerateResponse {
    pub text: Option<String>,
    pub grounding_chunks: Vec<GroundingChunk>,
    /// Base64-encoded 16-bit PCM, present when audio output was requested.
    pub inline_audio: Option<String>,
}

/// Trait for generation-capability clients.
#[async_trait]
pub trait GenAiClient: Send + Sync {
    /// Model identifier used for calls.
    fn model_name(&self) -> &str;

    /// Run one generation call.
    async fn generate(&self, request: GenerateRequest) -> Result<GenerateResponse, GenAiError>;
}
