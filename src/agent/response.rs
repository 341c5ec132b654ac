//! The unified response contract and the raw-output normalizer.

use serde::{Deserialize, Serialize};

use crate::audio::{self, AudioData};

/// Shown when the model returned no usable text.
const EMPTY_TEXT_FALLBACK: &str = "回答を生成できませんでした。もう一度お試しください。";

/// A citation backing a grounded answer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GroundingUrl {
    pub title: String,
    pub uri: String,
}

/// One aggregated expense category for chart rendering. Amounts are whole
/// yen, matching the transaction ledger.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryTotal {
    pub category: String,
    pub amount: i64,
}

/// The sole output contract of the pipeline.
///
/// `text` is never empty once construction completes; the caller can always
/// render a response. `grounding_urls` distinguishes "not applicable"
/// (`None`) from "grounded but found nothing" (`Some(vec![])`).
#[derive(Debug, Clone, Default)]
pub struct AgentResponse {
    pub text: String,
    pub grounding_urls: Option<Vec<GroundingUrl>>,
    /// Decoded speech, present only for strategies that synthesize audio.
    pub audio: Option<AudioData>,
    /// Aggregated expense totals, present only for the analyst agent.
    pub chart_data: Option<Vec<CategoryTotal>>,
}

impl AgentResponse {
    /// A text-only response with no citations, audio, or chart data.
    pub(crate) fn text_only(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            ..Default::default()
        }
    }
}

/// A strategy's raw output before normalization.
#[derive(Debug, Default)]
pub(crate) struct RawResponse {
    pub text: Option<String>,
    pub grounding_urls: Option<Vec<GroundingUrl>>,
    pub audio_base64: Option<String>,
    pub chart_data: Option<Vec<CategoryTotal>>,
}

/// Normalize a strategy's raw output into the response contract.
///
/// Text is mandatory: empty or absent text becomes a generic fallback.
/// Audio is best-effort: a payload that fails to decode is dropped with a
/// warning rather than failing the response. Citations pass through as the
/// strategy shaped them.
pub(crate) fn normalize(raw: RawResponse, sample_rate: u32) -> AgentResponse {
    let text = match raw.text {
        Some(text) if !text.trim().is_empty() => text,
        _ => EMPTY_TEXT_FALLBACK.to_string(),
    };

    let audio = raw.audio_base64.and_then(|payload| {
        match audio::decode_pcm16(&payload, sample_rate) {
            Ok(data) => Some(data),
            Err(e) => {
                tracing::warn!(error = %e, "Discarding undecodable audio payload");
                None
            }
        }
    });

    AgentResponse {
        text,
        grounding_urls: raw.grounding_urls,
        audio,
        chart_data: raw.chart_data,
    }
}
