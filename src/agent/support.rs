//! Customer support: answers constrained to the embedded FAQ corpus.
//!
//! The corpus is the model's only permissible knowledge source. Questions it
//! cannot answer from the corpus must get the fixed refusal string, never an
//! answer from general knowledge. Low temperature biases toward literal
//! extraction over paraphrase.

use crate::config::ConciergeConfig;
use crate::error::Error;
use crate::fixtures::SUPPORT_DOCS;
use crate::genai::{GenAiClient, GenerateRequest};
use crate::profile::{self, UserProfile};

use super::response::{self, AgentResponse, RawResponse};

const REFUSAL: &str = "申し訳ありませんが、その件に関する情報は持ち合わせておりません。";
const TEMPERATURE: f32 = 0.1;

pub(super) async fn run(
    client: &dyn GenAiClient,
    config: &ConciergeConfig,
    user_message: &str,
    user_profile: Option<&UserProfile>,
) -> Result<AgentResponse, Error> {
    let system_instruction = format!(
        "あなたはGENESIS APPの厳格なカスタマーサポートエージェントです。\n\
         以下のサポート文書のみを知識源として、質問に答えてください。\n\n\
         [サポート文書]\n{docs}\n{context}\n\
         ルール:\n\
         1. サポート文書に基づいて、丁寧な日本語で答えてください。\n\
         2. 文書に関連情報がない場合は、「{refusal}」と答えてください。\n\
         3. 文書以外の一般知識や幻覚を含めないでください。",
        docs = SUPPORT_DOCS,
        context = profile::context_block(user_profile),
        refusal = REFUSAL,
    );

    let request = GenerateRequest::new(user_message)
        .with_system_instruction(system_instruction)
        .with_temperature(TEMPERATURE);
    let generated = client.generate(request).await?;

    Ok(response::normalize(
        RawResponse {
            text: generated.text,
            ..Default::default()
        },
        config.audio_sample_rate,
    ))
}
