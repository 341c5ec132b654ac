//! General concierge: open-domain answers grounded in web search.

use crate::config::ConciergeConfig;
use crate::error::Error;
use crate::genai::{GenAiClient, GenerateRequest};
use crate::profile::{self, UserProfile};

use super::grounding;
use super::response::{self, AgentResponse, RawResponse};

const CITATION_PLACEHOLDER: &str = "参照元";

pub(super) async fn run(
    client: &dyn GenAiClient,
    config: &ConciergeConfig,
    user_message: &str,
    user_profile: Option<&UserProfile>,
) -> Result<AgentResponse, Error> {
    let system_instruction = format!(
        "You are a helpful general concierge for a banking app. \
         You can answer any questions using Google Search. Always answer in Japanese.\n{}",
        profile::context_block(user_profile)
    );

    let request = GenerateRequest::new(user_message)
        .with_system_instruction(system_instruction)
        .with_web_search();
    let generated = client.generate(request).await?;

    let citations = grounding::extract_citations(&generated.grounding_chunks, CITATION_PLACEHOLDER);

    Ok(response::normalize(
        RawResponse {
            text: generated.text,
            grounding_urls: Some(citations),
            ..Default::default()
        },
        config.audio_sample_rate,
    ))
}
