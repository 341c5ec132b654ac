//! Household analyst: spending analysis over the transaction ledger.
//!
//! The full ledger is embedded in the system instruction and the model is
//! asked for JSON carrying both the prose analysis and per-category expense
//! totals for chart rendering. Malformed JSON falls back to the raw text so
//! the user still sees an answer.

use serde::Deserialize;

use crate::config::ConciergeConfig;
use crate::error::{Error, GenAiError};
use crate::fixtures::MOCK_TRANSACTIONS;
use crate::genai::{GenAiClient, GenerateRequest};
use crate::profile::{self, UserProfile};

use super::response::{self, AgentResponse, CategoryTotal, RawResponse};

#[derive(Debug, Deserialize)]
struct AnalystPayload {
    analysis: String,
    #[serde(default)]
    chart_data: Vec<CategoryTotal>,
}

pub(super) async fn run(
    client: &dyn GenAiClient,
    config: &ConciergeConfig,
    user_message: &str,
    user_profile: Option<&UserProfile>,
) -> Result<AgentResponse, Error> {
    let ledger =
        serde_json::to_string_pretty(&MOCK_TRANSACTIONS).map_err(GenAiError::from)?;

    let system_instruction = format!(
        "You are a financial analyst. Analyze the following transaction data, \
         categorize the spending, and give savings advice in Japanese.\n\n\
         Output MUST be valid JSON with the following structure:\n\
         {{\n\
           \"analysis\": \"Your detailed analysis text in Japanese...\",\n\
           \"chart_data\": [\n\
             {{\"category\": \"食費\", \"amount\": 4300}}\n\
           ]\n\
         }}\n\n\
         Chart Guidelines:\n\
         - Aggregate expense amounts by category, as positive yen totals.\n\
         - Exclude income rows from chart_data.\n\n\
         User Profile: {context}\n\
         Transactions: {ledger}",
        context = profile::context_block(user_profile),
    );

    let request = GenerateRequest::new(user_message)
        .with_system_instruction(system_instruction)
        .with_json_output();
    let generated = client.generate(request).await?;
    let text = generated.text.unwrap_or_default();

    let raw = match serde_json::from_str::<AnalystPayload>(&text) {
        Ok(payload) => RawResponse {
            text: Some(payload.analysis),
            chart_data: Some(payload.chart_data),
            ..Default::default()
        },
        Err(e) => {
            tracing::warn!(error = %e, "Analyst response was not the requested JSON shape");
            RawResponse {
                text: Some(text),
                ..Default::default()
            }
        }
    };

    Ok(response::normalize(raw, config.audio_sample_rate))
}
