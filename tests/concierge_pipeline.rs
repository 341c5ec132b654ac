//! End-to-end pipeline behavior against a scripted generation client.
//!
//! The generation capability is a black box to the pipeline, so these tests
//! script it: each queued entry answers one `generate` call in order, and
//! every request is captured for prompt-shape assertions.

use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

use base64::Engine as _;
use pretty_assertions::assert_eq;

use genesis_concierge::error::GenAiError;
use genesis_concierge::genai::{
    GenAiClient, GenerateRequest, GenerateResponse, GroundingChunk, Modality, WebSource,
};
use genesis_concierge::{AgentKind, Concierge, ConciergeConfig, GroundingUrl, UserProfile};

const FAILURE_FALLBACK: &str = "申し訳ありません。エラーが発生しました。";
const UNKNOWN_AGENT: &str = "不明なエージェントタイプです。";

struct ScriptedClient {
    responses: Mutex<VecDeque<Result<GenerateResponse, GenAiError>>>,
    requests: Mutex<Vec<GenerateRequest>>,
}

impl ScriptedClient {
    fn new(responses: Vec<Result<GenerateResponse, GenAiError>>) -> Arc<Self> {
        Arc::new(Self {
            responses: Mutex::new(responses.into()),
            requests: Mutex::new(Vec::new()),
        })
    }

    fn captured_requests(&self) -> Vec<GenerateRequest> {
        self.requests.lock().unwrap().clone()
    }
}

#[async_trait::async_trait]
impl GenAiClient for ScriptedClient {
    fn model_name(&self) -> &str {
        "scripted-model"
    }

    async fn generate(&self, request: GenerateRequest) -> Result<GenerateResponse, GenAiError> {
        self.requests.lock().unwrap().push(request);
        self.responses
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| panic!("scripted client ran out of responses"))
    }
}

fn concierge(client: Arc<ScriptedClient>) -> Concierge {
    Concierge::new(client, ConciergeConfig::new("test-key"))
}

fn text_response(text: &str) -> Result<GenerateResponse, GenAiError> {
    Ok(GenerateResponse {
        text: Some(text.to_string()),
        ..Default::default()
    })
}

fn forced_failure() -> Result<GenerateResponse, GenAiError> {
    Err(GenAiError::RequestFailed {
        provider: "scripted-model".to_string(),
        reason: "simulated network failure".to_string(),
    })
}

fn script_for(kind: AgentKind, entry: Result<GenerateResponse, GenAiError>) -> Vec<Result<GenerateResponse, GenAiError>> {
    // News makes three sequential calls; everything else makes one.
    match kind {
        AgentKind::News => match entry {
            Ok(response) => vec![Ok(response.clone()), Ok(response.clone()), Ok(response)],
            Err(e) => vec![Err(e)],
        },
        _ => vec![entry],
    }
}

fn pcm_payload(samples: &[i16]) -> String {
    let bytes: Vec<u8> = samples.iter().flat_map(|s| s.to_le_bytes()).collect();
    base64::engine::general_purpose::STANDARD.encode(bytes)
}

#[tokio::test]
async fn every_agent_produces_non_empty_text() {
    for kind in AgentKind::ALL {
        let client = ScriptedClient::new(script_for(kind, text_response("応答テキスト")));
        let response = concierge(client).respond(kind, "こんにちは", None).await;
        assert!(!response.text.is_empty(), "agent {kind} returned empty text");
    }
}

#[tokio::test]
async fn forced_failure_degrades_to_uniform_fallback_for_every_agent() {
    for kind in AgentKind::ALL {
        let client = ScriptedClient::new(script_for(kind, forced_failure()));
        let response = concierge(client).respond(kind, "こんにちは", None).await;

        assert_eq!(response.text, FAILURE_FALLBACK, "agent {kind}");
        assert!(response.grounding_urls.is_none(), "agent {kind}");
        assert!(response.audio.is_none(), "agent {kind}");
        assert!(response.chart_data.is_none(), "agent {kind}");
    }
}

#[tokio::test]
async fn unknown_agent_name_is_not_fatal() {
    let client = ScriptedClient::new(vec![]);
    let response = concierge(client).respond_named("PIRATE", "やあ", None).await;
    assert_eq!(response.text, UNKNOWN_AGENT);
    assert!(response.grounding_urls.is_none());
}

#[tokio::test]
async fn named_dispatch_reaches_the_strategy() {
    let client = ScriptedClient::new(vec![text_response("サポート回答")]);
    let response = concierge(Arc::clone(&client))
        .respond_named("support", "限度額は？", None)
        .await;
    assert_eq!(response.text, "サポート回答");
    assert_eq!(client.captured_requests().len(), 1);
}

#[tokio::test]
async fn general_filters_citations_and_substitutes_placeholder_titles() {
    let chunks = vec![
        GroundingChunk {
            web: Some(WebSource {
                title: None,
                uri: Some("https://a".to_string()),
            }),
        },
        GroundingChunk {
            web: Some(WebSource {
                title: Some("B".to_string()),
                uri: Some(String::new()),
            }),
        },
        GroundingChunk {
            web: Some(WebSource {
                title: Some("C".to_string()),
                uri: Some("https://c".to_string()),
            }),
        },
    ];
    let client = ScriptedClient::new(vec![Ok(GenerateResponse {
        text: Some("検索結果に基づく回答".to_string()),
        grounding_chunks: chunks,
        ..Default::default()
    })]);

    let response = concierge(client)
        .respond(AgentKind::General, "最新情報は？", None)
        .await;

    assert_eq!(
        response.grounding_urls,
        Some(vec![
            GroundingUrl {
                title: "参照元".to_string(),
                uri: "https://a".to_string()
            },
            GroundingUrl {
                title: "C".to_string(),
                uri: "https://c".to_string()
            },
        ])
    );
}

#[tokio::test]
async fn general_grounds_but_support_does_not() {
    let client = ScriptedClient::new(vec![text_response("a"), text_response("b")]);
    let pipeline = concierge(Arc::clone(&client));

    pipeline.respond(AgentKind::General, "q", None).await;
    pipeline.respond(AgentKind::Support, "q", None).await;

    let requests = client.captured_requests();
    assert!(requests[0].web_search);
    assert!(!requests[1].web_search);
    assert_eq!(requests[1].temperature, Some(0.1));
}

#[tokio::test]
async fn support_refusal_passes_through_unmodified() {
    const REFUSAL: &str = "申し訳ありませんが、その件に関する情報は持ち合わせておりません。";
    let client = ScriptedClient::new(vec![text_response(REFUSAL)]);

    let response = concierge(Arc::clone(&client))
        .respond(AgentKind::Support, "今日の天気は？", None)
        .await;

    assert_eq!(response.text, REFUSAL);
    // The instruction contract embeds the corpus and the refusal rule.
    let requests = client.captured_requests();
    let instruction = requests[0].system_instruction.as_deref().unwrap();
    assert!(instruction.contains("GENESIS APP よくある質問"));
    assert!(instruction.contains(REFUSAL));
}

#[tokio::test]
async fn news_runs_three_sequential_stages_and_returns_the_article() {
    let client = ScriptedClient::new(vec![
        Ok(GenerateResponse {
            text: Some("# 本日の市場\n長文記事".to_string()),
            grounding_chunks: vec![GroundingChunk {
                web: Some(WebSource {
                    title: Some("日経".to_string()),
                    uri: Some("https://nikkei.example".to_string()),
                }),
            }],
            ..Default::default()
        }),
        text_response("短い音声スクリプト"),
        Ok(GenerateResponse {
            inline_audio: Some(pcm_payload(&[0, 16384, -16384])),
            ..Default::default()
        }),
    ]);

    let response = concierge(Arc::clone(&client))
        .respond(AgentKind::News, "市場ニュース", None)
        .await;

    // Article text, not the condensed script.
    assert_eq!(response.text, "# 本日の市場\n長文記事");
    assert_eq!(response.grounding_urls.unwrap().len(), 1);
    assert_eq!(response.audio.unwrap().samples, vec![0.0, 0.5, -0.5]);

    let requests = client.captured_requests();
    assert_eq!(requests.len(), 3);
    assert!(requests[0].web_search);
    assert!(requests[1].contents.contains("長文記事"));
    assert_eq!(requests[2].modality, Modality::Audio);
    assert_eq!(requests[2].speech_voice.as_deref(), Some("Kore"));
    assert!(requests[2].contents.contains("短い音声スクリプト"));
}

#[tokio::test]
async fn news_collapses_to_fallback_when_speech_stage_fails() {
    let client = ScriptedClient::new(vec![
        text_response("記事本文"),
        text_response("スクリプト"),
        forced_failure(),
    ]);

    let response = concierge(client)
        .respond(AgentKind::News, "市場ニュース", None)
        .await;

    // All-or-nothing: no partial article-only success.
    assert_eq!(response.text, FAILURE_FALLBACK);
    assert!(response.grounding_urls.is_none());
    assert!(response.audio.is_none());
}

#[tokio::test]
async fn news_collapses_when_condensation_stage_fails() {
    let client = ScriptedClient::new(vec![text_response("記事本文"), forced_failure()]);
    let response = concierge(client)
        .respond(AgentKind::News, "市場ニュース", None)
        .await;
    assert_eq!(response.text, FAILURE_FALLBACK);
}

#[tokio::test]
async fn news_keeps_article_when_audio_payload_is_undecodable() {
    let client = ScriptedClient::new(vec![
        text_response("記事本文"),
        text_response("スクリプト"),
        Ok(GenerateResponse {
            inline_audio: Some("not base64!!".to_string()),
            ..Default::default()
        }),
    ]);

    let response = concierge(client)
        .respond(AgentKind::News, "市場ニュース", None)
        .await;

    // The payload arrived but was corrupt: decode is best-effort, text stays.
    assert_eq!(response.text, "記事本文");
    assert!(response.audio.is_none());
}

#[tokio::test]
async fn analyst_parses_chart_data_json() {
    let client = ScriptedClient::new(vec![text_response(
        r#"{"analysis": "カフェ支出が目立ちます。", "chart_data": [{"category": "カフェ", "amount": 550}, {"category": "食費", "amount": 4300}]}"#,
    )]);

    let response = concierge(Arc::clone(&client))
        .respond(AgentKind::Analyst, "支出を分析して", None)
        .await;

    assert_eq!(response.text, "カフェ支出が目立ちます。");
    let chart = response.chart_data.unwrap();
    assert_eq!(chart.len(), 2);
    assert_eq!(chart[0].category, "カフェ");
    assert_eq!(chart[1].amount, 4300);

    // The ledger is embedded in the instruction and JSON output is requested.
    let requests = client.captured_requests();
    let instruction = requests[0].system_instruction.as_deref().unwrap();
    assert!(instruction.contains("スターバックス コーヒー"));
    assert_eq!(
        requests[0].response_mime_type.as_deref(),
        Some("application/json")
    );
}

#[tokio::test]
async fn analyst_falls_back_to_raw_text_on_malformed_json() {
    let client = ScriptedClient::new(vec![text_response("JSONではない自由回答")]);
    let response = concierge(client)
        .respond(AgentKind::Analyst, "支出を分析して", None)
        .await;

    assert_eq!(response.text, "JSONではない自由回答");
    assert!(response.chart_data.is_none());
}

#[tokio::test]
async fn profile_block_is_injected_when_present_and_absent_when_not() {
    let profile = UserProfile {
        age_group: "30代".to_string(),
        prefecture: "東京都".to_string(),
        occupation: "会社員".to_string(),
        interests: vec!["株式投資".to_string()],
    };

    let client = ScriptedClient::new(vec![text_response("a"), text_response("b")]);
    let pipeline = concierge(Arc::clone(&client));

    pipeline
        .respond(AgentKind::General, "q", Some(&profile))
        .await;
    pipeline.respond(AgentKind::General, "q", None).await;

    let requests = client.captured_requests();
    let with_profile = requests[0].system_instruction.as_deref().unwrap();
    assert!(with_profile.contains("[ユーザープロファイル情報]"));
    assert!(with_profile.contains("- 年齢: 30代"));

    // Without a profile the instruction is exactly the bare template.
    assert_eq!(
        requests[1].system_instruction.as_deref().unwrap(),
        "You are a helpful general concierge for a banking app. \
         You can answer any questions using Google Search. Always answer in Japanese.\n"
    );
}

#[tokio::test]
async fn news_steers_on_profile_interests() {
    let profile = UserProfile {
        interests: vec!["不動産".to_string(), "株式投資".to_string()],
        ..Default::default()
    };
    let client = ScriptedClient::new(vec![
        text_response("記事"),
        text_response("スクリプト"),
        Ok(GenerateResponse::default()),
    ]);

    concierge(Arc::clone(&client))
        .respond(AgentKind::News, "ニュースを教えて", Some(&profile))
        .await;

    let requests = client.captured_requests();
    assert!(requests[0].contents.contains("不動産, 株式投資"));
    assert!(requests[0].contents.contains("ニュースを教えて"));
}

#[tokio::test]
async fn empty_model_text_becomes_generic_fallback_not_failure() {
    let client = ScriptedClient::new(vec![Ok(GenerateResponse::default())]);
    let response = concierge(client)
        .respond(AgentKind::General, "q", None)
        .await;

    assert_ne!(response.text, FAILURE_FALLBACK);
    assert!(!response.text.is_empty());
    // Grounding was attempted, so the field is present (and empty).
    assert_eq!(response.grounding_urls, Some(Vec::new()));
}
