//! The agent response pipeline: strategy selection, dispatch, and the
//! top-level failure boundary.
//!
//! Each of the four agents is a stateless strategy over
//! (message, profile, static fixtures). Strategies let generation errors
//! propagate; only [`Concierge::respond`] recovers them, so every failure
//! path still yields a displayable response.

mod analyst;
mod general;
mod grounding;
mod news;
mod response;
mod support;

pub use response::{AgentResponse, CategoryTotal, GroundingUrl};

use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

use crate::config::ConciergeConfig;
use crate::genai::GenAiClient;
use crate::profile::UserProfile;

/// Uniform fallback shown when a strategy fails for any reason.
const FAILURE_FALLBACK: &str = "申し訳ありません。エラーが発生しました。";

/// Shown when a caller names an agent outside the enumeration.
const UNKNOWN_AGENT: &str = "不明なエージェントタイプです。";

/// The four concierge agents. Closed: adding a variant without a strategy
/// arm is a compile error in [`Concierge::run_strategy`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AgentKind {
    /// Search-grounded general concierge.
    General,
    /// Support agent constrained to the embedded FAQ corpus.
    Support,
    /// Market news: grounded article, condensed script, synthesized speech.
    News,
    /// Spending analysis over the transaction ledger.
    Analyst,
}

impl AgentKind {
    /// All agents, in selector display order.
    pub const ALL: [AgentKind; 4] = [
        AgentKind::General,
        AgentKind::Support,
        AgentKind::News,
        AgentKind::Analyst,
    ];
}

impl FromStr for AgentKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_uppercase().as_str() {
            "GENERAL" => Ok(Self::General),
            "SUPPORT" => Ok(Self::Support),
            "NEWS" => Ok(Self::News),
            "ANALYST" => Ok(Self::Analyst),
            _ => Err(format!(
                "invalid agent type '{}', expected one of: GENERAL, SUPPORT, NEWS, ANALYST",
                s
            )),
        }
    }
}

impl fmt::Display for AgentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::General => write!(f, "GENERAL"),
            Self::Support => write!(f, "SUPPORT"),
            Self::News => write!(f, "NEWS"),
            Self::Analyst => write!(f, "ANALYST"),
        }
    }
}

/// Entry point consumed by the UI layer.
///
/// Holds the generation client and configuration; each call is a pure
/// function over its inputs plus the static fixtures, so concurrent calls
/// share nothing mutable.
pub struct Concierge {
    client: Arc<dyn GenAiClient>,
    config: ConciergeConfig,
}

impl Concierge {
    /// Create a pipeline over the given generation client.
    pub fn new(client: Arc<dyn GenAiClient>, config: ConciergeConfig) -> Self {
        Self { client, config }
    }

    /// Generate a response for the given agent.
    ///
    /// Infallible by contract: this is the pipeline's sole error boundary.
    /// Any strategy failure is logged and degraded to the uniform fallback
    /// with no citations, audio, or chart data.
    pub async fn respond(
        &self,
        kind: AgentKind,
        user_message: &str,
        user_profile: Option<&UserProfile>,
    ) -> AgentResponse {
        match self.run_strategy(kind, user_message, user_profile).await {
            Ok(response) => response,
            Err(e) => {
                tracing::error!(agent = %kind, error = %e, "Strategy failed, returning fallback");
                AgentResponse::text_only(FAILURE_FALLBACK)
            }
        }
    }

    /// By-name dispatch for callers holding an untyped agent identifier.
    ///
    /// Unknown names are not fatal: they produce a text-only explanatory
    /// response.
    pub async fn respond_named(
        &self,
        agent: &str,
        user_message: &str,
        user_profile: Option<&UserProfile>,
    ) -> AgentResponse {
        match agent.parse::<AgentKind>() {
            Ok(kind) => self.respond(kind, user_message, user_profile).await,
            Err(reason) => {
                tracing::warn!(agent, %reason, "Unknown agent type requested");
                AgentResponse::text_only(UNKNOWN_AGENT)
            }
        }
    }

    async fn run_strategy(
        &self,
        kind: AgentKind,
        user_message: &str,
        user_profile: Option<&UserProfile>,
    ) -> Result<AgentResponse, crate::error::Error> {
        let client = self.client.as_ref();
        match kind {
            AgentKind::General => general::run(client, &self.config, user_message, user_profile).await,
            AgentKind::Support => support::run(client, &self.config, user_message, user_profile).await,
            AgentKind::News => news::run(client, &self.config, user_message, user_profile).await,
            AgentKind::Analyst => analyst::run(client, &self.config, user_message, user_profile).await,
        }
    }
}
