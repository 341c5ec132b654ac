//! Multi-agent AI concierge pipeline for the GENESIS banking demo.
//!
//! The pipeline dispatches a user message to one of four prompt-engineered
//! agents backed by a generative-AI capability: a search-grounded general
//! concierge, a support agent constrained to an embedded FAQ corpus, a
//! three-stage news agent that also synthesizes speech, and a household
//! analyst over a mock transaction ledger. Heterogeneous model outputs are
//! normalized into one [`AgentResponse`] shape, and every failure path
//! degrades to a displayable fallback — [`Concierge::respond`] never errors.
//!
//! ```no_run
//! use std::sync::Arc;
//! use genesis_concierge::{AgentKind, Concierge, ConciergeConfig};
//! use genesis_concierge::genai::GeminiClient;
//!
//! # async fn demo() -> Result<(), genesis_concierge::Error> {
//! let config = ConciergeConfig::from_env()?;
//! let client = Arc::new(GeminiClient::new(config.clone())?);
//! let concierge = Concierge::new(client, config);
//!
//! let response = concierge
//!     .respond(AgentKind::General, "円安の影響を教えて", None)
//!     .await;
//! println!("{}", response.text);
//! # Ok(())
//! # }
//! ```

pub mod agent;
pub mod audio;
pub mod config;
pub mod error;
pub mod fixtures;
pub mod genai;
pub mod profile;

pub use agent::{AgentKind, AgentResponse, CategoryTotal, Concierge, GroundingUrl};
pub use audio::AudioData;
pub use config::ConciergeConfig;
pub use error::{AudioError, ConfigError, Error, GenAiError, Result};
pub use profile::UserProfile;
