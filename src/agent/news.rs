//! Market news: grounded article, condensed script, synthesized speech.
//!
//! Three sequential generation calls, each depending on the previous one's
//! output. Any stage failure fails the whole request: presenting an article
//! whose expected audio silently vanished is worse than the uniform
//! fallback, so there are no partial results. (Decode failure of a payload
//! that did arrive is still contained by the normalizer.)

use crate::config::ConciergeConfig;
use crate::error::{Error, GenAiError};
use crate::genai::{GenAiClient, GenerateRequest};
use crate::profile::{self, UserProfile};

use super::grounding;
use super::response::{self, AgentResponse, RawResponse};

const CITATION_PLACEHOLDER: &str = "ニュースソース";

pub(super) async fn run(
    client: &dyn GenAiClient,
    config: &ConciergeConfig,
    user_message: &str,
    user_profile: Option<&UserProfile>,
) -> Result<AgentResponse, Error> {
    let interests = user_profile
        .map(|p| p.interests.join(", "))
        .filter(|joined| !joined.is_empty())
        .unwrap_or_else(|| "一般".to_string());

    // Stage 1: search-grounded long-form article.
    let search_prompt = format!(
        "今日の株、債券、不動産、経済指標に関する最新の金融ニュースを探してください。\n\
         これに基づき、包括的な記事（500〜800文字程度）を日本語で作成してください。\n\
         明確な見出しを付けて構成してください。\n\n\
         ユーザーの興味関心: {interests}\n{context}\n\
         ユーザーのクエリ: {user_message}\n",
        context = profile::context_block(user_profile),
    );
    let article = client
        .generate(GenerateRequest::new(search_prompt).with_web_search())
        .await?;
    let citations = grounding::extract_citations(&article.grounding_chunks, CITATION_PLACEHOLDER);
    let article_text = article
        .text
        .filter(|text| !text.trim().is_empty())
        .ok_or_else(|| GenAiError::EmptyResponse {
            provider: client.model_name().to_string(),
        })?;

    // Stage 2: condense into a ~1 minute spoken script.
    let summary_prompt = format!(
        "以下の記事をリスナー向けに1分程度の短い音声スクリプトとして日本語で要約してください:\n\n{article_text}"
    );
    let script = client.generate(GenerateRequest::new(summary_prompt)).await?;
    let script_text = script
        .text
        .filter(|text| !text.trim().is_empty())
        .ok_or_else(|| GenAiError::EmptyResponse {
            provider: client.model_name().to_string(),
        })?;

    // Stage 3: synthesize the script.
    let speech = client
        .generate(GenerateRequest::new(script_text).with_audio_output(config.tts_voice.clone()))
        .await?;

    // The caller gets the full article, not the condensed script.
    Ok(response::normalize(
        RawResponse {
            text: Some(article_text),
            grounding_urls: Some(citations),
            audio_base64: speech.inline_audio,
            ..Default::default()
        },
        config.audio_sample_rate,
    ))
}
