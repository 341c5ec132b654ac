//! Gemini `generateContent` client.
//!
//! Speaks the REST shape of the Gemini API: camelCase wire structs, a
//! `generationConfig` bag for temperature/modalities/voice, and grounding
//! metadata attached to the first candidate.

use reqwest::Client;
use secrecy::ExposeSecret;
use serde::{Deserialize, Serialize};

use crate::config::ConciergeConfig;
use crate::error::GenAiError;
use crate::genai::{
    GenAiClient, GenerateRequest, GenerateResponse, GroundingChunk, Modality, WebSource,
};

/// Provider name constant to avoid magic strings.
const PROVIDER_NAME: &str = "gemini";

/// Maximum number of response-body bytes quoted in error messages.
const ERROR_BODY_LIMIT: usize = 200;

/// Truncate a response body for an error message without splitting a
/// multibyte character. Gemini error bodies can carry Japanese text, so a
/// fixed byte offset is not a valid slice point.
fn truncate_body(body: &str, limit: usize) -> &str {
    if body.len() <= limit {
        return body;
    }
    let mut end = limit;
    while !body.is_char_boundary(end) {
        end -= 1;
    }
    &body[..end]
}

/// HTTP implementation of [`GenAiClient`] for the Gemini API.
pub struct GeminiClient {
    client: Client,
    config: ConciergeConfig,
}

impl GeminiClient {
    /// Create a new client from the pipeline configuration.
    pub fn new(config: ConciergeConfig) -> Result<Self, GenAiError> {
        let client = Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| GenAiError::RequestFailed {
                provider: PROVIDER_NAME.to_string(),
                reason: format!("Failed to build reqwest client: {}", e),
            })?;

        Ok(Self { client, config })
    }

    /// Construct the `generateContent` URL for the configured model.
    fn api_url(&self) -> String {
        let base = self.config.base_url.trim_end_matches('/');
        format!(
            "{}/v1beta/models/{}:generateContent",
            base, self.config.model
        )
    }

    async fn send_request(
        &self,
        body: &GenerateContentRequest,
    ) -> Result<GenerateContentResponse, GenAiError> {
        let url = self.api_url();

        tracing::debug!(model = %self.config.model, "Sending request to Gemini endpoint: {}", url);

        let response = self
            .client
            .post(&url)
            .header("Content-Type", "application/json")
            .header("x-goog-api-key", self.config.api_key.expose_secret())
            .json(body)
            .send()
            .await
            .map_err(|e| {
                tracing::error!("Gemini request failed: {}", e);
                GenAiError::RequestFailed {
                    provider: PROVIDER_NAME.to_string(),
                    reason: e.to_string(),
                }
            })?;

        let status = response.status();
        let response_text = response.text().await.map_err(|e| {
            tracing::error!("Failed to read response body: {}", e);
            GenAiError::RequestFailed {
                provider: PROVIDER_NAME.to_string(),
                reason: format!("Response too large or failed to read: {}", e),
            }
        })?;

        tracing::debug!("Gemini response status: {}", status);

        if !status.is_success() {
            if status.as_u16() == 401 || status.as_u16() == 403 {
                return Err(GenAiError::AuthFailed {
                    provider: PROVIDER_NAME.to_string(),
                });
            }
            if status.as_u16() == 429 {
                return Err(GenAiError::RateLimited {
                    provider: PROVIDER_NAME.to_string(),
                    retry_after: None,
                });
            }
            return Err(GenAiError::RequestFailed {
                provider: PROVIDER_NAME.to_string(),
                reason: format!(
                    "HTTP {}: {}",
                    status,
                    truncate_body(&response_text, ERROR_BODY_LIMIT)
                ),
            });
        }

        serde_json::from_str(&response_text).map_err(|e| GenAiError::InvalidResponse {
            provider: PROVIDER_NAME.to_string(),
            reason: format!(
                "JSON parse error: {}. Raw: {}",
                e,
                truncate_body(&response_text, ERROR_BODY_LIMIT)
            ),
        })
    }
}

#[async_trait::async_trait]
impl GenAiClient for GeminiClient {
    fn model_name(&self) -> &str {
        &self.config.model
    }

    async fn generate(&self, request: GenerateRequest) -> Result<GenerateResponse, GenAiError> {
        let body = GenerateContentRequest::from_request(request);
        let response = self.send_request(&body).await?;

        let candidate =
            response
                .candidates
                .into_iter()
                .next()
                .ok_or_else(|| GenAiError::InvalidResponse {
                    provider: PROVIDER_NAME.to_string(),
                    reason: "No candidates in response".to_string(),
                })?;

        let parts = candidate.content.map(|c| c.parts).unwrap_or_default();

        let text: String = parts
            .iter()
            .filter_map(|p| p.text.as_deref())
            .collect::<Vec<_>>()
            .join("");
        let inline_audio = parts
            .into_iter()
            .find_map(|p| p.inline_data)
            .map(|d| d.data);

        let grounding_chunks = candidate
            .grounding_metadata
            .map(|m| m.grounding_chunks)
            .unwrap_or_default()
            .into_iter()
            .map(|chunk| GroundingChunk {
                web: chunk.web.map(|w| WebSource {
                    title: w.title,
                    uri: w.uri,
                }),
            })
            .collect();

        Ok(GenerateResponse {
            text: if text.is_empty() { None } else { Some(text) },
            grounding_chunks,
            inline_audio,
        })
    }
}

// Gemini generateContent wire types

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerateContentRequest {
    contents: Vec<Content>,
    #[serde(skip_serializing_if = "Option::is_none")]
    system_instruction: Option<Content>,
    #[serde(skip_serializing_if = "Option::is_none")]
    tools: Option<Vec<Tool>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    generation_config: Option<GenerationConfig>,
}

impl GenerateContentRequest {
    fn from_request(request: GenerateRequest) -> Self {
        let generation_config = GenerationConfig {
            temperature: request.temperature,
            response_modalities: match request.modality {
                Modality::Audio => Some(vec!["AUDIO".to_string()]),
                Modality::Text => None,
            },
            response_mime_type: request.response_mime_type,
            speech_config: request.speech_voice.map(|voice_name| SpeechConfig {
                voice_config: VoiceConfig {
                    prebuilt_voice_config: PrebuiltVoiceConfig { voice_name },
                },
            }),
        };

        Self {
            contents: vec![Content {
                role: Some("user".to_string()),
                parts: vec![Part {
                    text: Some(request.contents),
                    inline_data: None,
                }],
            }],
            system_instruction: request.system_instruction.map(|text| Content {
                role: None,
                parts: vec![Part {
                    text: Some(text),
                    inline_data: None,
                }],
            }),
            tools: request.web_search.then(|| {
                vec![Tool {
                    google_search: GoogleSearch {},
                }]
            }),
            generation_config: if generation_config.is_empty() {
                None
            } else {
                Some(generation_config)
            },
        }
    }
}

#[derive(Debug, Serialize, Deserialize, Default)]
struct Content {
    #[serde(skip_serializing_if = "Option::is_none", default)]
    role: Option<String>,
    #[serde(default)]
    parts: Vec<Part>,
}

#[derive(Debug, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
struct Part {
    #[serde(skip_serializing_if = "Option::is_none", default)]
    text: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    inline_data: Option<InlineData>,
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct InlineData {
    #[serde(default)]
    #[allow(dead_code)]
    mime_type: Option<String>,
    data: String,
}

#[derive(Debug, Serialize)]
struct Tool {
    google_search: GoogleSearch,
}

#[derive(Debug, Serialize)]
struct GoogleSearch {}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerationConfig {
    #[serde(skip_serializing_if = "Option::is_none")]
    temperature: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    response_modalities: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    response_mime_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    speech_config: Option<SpeechConfig>,
}

impl GenerationConfig {
    fn is_empty(&self) -> bool {
        self.temperature.is_none()
            && self.response_modalities.is_none()
            && self.response_mime_type.is_none()
            && self.speech_config.is_none()
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct SpeechConfig {
    voice_config: VoiceConfig,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct VoiceConfig {
    prebuilt_voice_config: PrebuiltVoiceConfig,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct PrebuiltVoiceConfig {
    voice_name: String,
}

#[derive(Debug, Deserialize)]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Candidate {
    #[serde(default)]
    content: Option<Content>,
    #[serde(default)]
    grounding_metadata: Option<GroundingMetadata>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct GroundingMetadata {
    #[serde(default)]
    grounding_chunks: Vec<WireGroundingChunk>,
}

#[derive(Debug, Deserialize)]
struct WireGroundingChunk {
    #[serde(default)]
    web: Option<WireWebSource>,
}

#[derive(Debug, Deserialize)]
struct WireWebSource {
    #[serde(default)]
    title: Option<String>,
    #[serde(default)]
    uri: Option<String>,
}
