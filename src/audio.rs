//! 16-bit PCM audio decoding.
//!
//! The speech-synthesis capability returns raw little-endian 16-bit PCM,
//! base64-encoded for JSON transport. This module turns such a payload into
//! a normalized mono float buffer a playback surface can consume directly.

use base64::Engine as _;
use base64::engine::general_purpose::STANDARD;

use crate::error::AudioError;

/// Default sample rate of synthesized speech payloads, in Hz.
pub const DEFAULT_SAMPLE_RATE: u32 = 24_000;

/// Decoded mono audio ready for playback.
///
/// Samples live in `[-1.0, 1.0)`. The range is asymmetric on purpose:
/// dividing by 32768 maps `i16::MIN` to exactly -1.0 while `i16::MAX` lands
/// just below 1.0, so re-encoding (multiply, round, clamp) recovers the
/// original integers within ±1.
#[derive(Debug, Clone, PartialEq)]
pub struct AudioData {
    pub sample_rate: u32,
    pub channels: u16,
    pub samples: Vec<f32>,
}

impl AudioData {
    /// Playback duration in seconds.
    pub fn duration_secs(&self) -> f32 {
        self.samples.len() as f32 / self.sample_rate as f32
    }
}

/// Decode a base64-encoded little-endian 16-bit PCM payload.
///
/// Odd-length payloads are rejected rather than truncated: a dropped
/// trailing byte would mean an upstream framing bug, and truncation would
/// hide it as slightly shorter audio.
pub fn decode_pcm16(base64_payload: &str, sample_rate: u32) -> Result<AudioData, AudioError> {
    let bytes = STANDARD.decode(base64_payload)?;
    if bytes.len() % 2 != 0 {
        return Err(AudioError::Misaligned { len: bytes.len() });
    }

    let samples = bytes
        .chunks_exact(2)
        .map(|pair| i16::from_le_bytes([pair[0], pair[1]]) as f32 / 32768.0)
        .collect();

    Ok(AudioData {
        sample_rate,
        channels: 1,
        samples,
    })
}
