//! LLM integration for the portfolio assistant.
//!
//! The pipeline treats the model as a stateless text-completion function:
//! one prompt in, one completion out. Providers implement [`LlmClient`].

pub mod mock;
pub mod openai;

pub use mock::MockLlmClient;
pub use openai::{OpenAiClient, OpenAiConfig};

use async_trait::async_trait;
use std::str::FromStr;

use crate::config::LlmConfig;
use crate::error::{AssistError, Result};

/// Trait for LLM clients that can generate completions.
///
/// Implementations must be thread-safe (Send + Sync) to support async
/// operations. Each call is independent; no conversation state is kept.
#[async_trait]
pub trait LlmClient: std::fmt::Debug + Send + Sync {
    /// Generates a completion for the given prompt.
    async fn complete(&self, prompt: &str) -> Result<String>;
}

/// LLM provider type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LlmProvider {
    /// OpenAI-compatible chat completions API.
    #[default]
    OpenAi,
    /// Mock client for testing and offline demos (no API key required).
    Mock,
}

impl LlmProvider {
    /// Returns the provider as a string.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::OpenAi => "openai",
            Self::Mock => "mock",
        }
    }
}

impl FromStr for LlmProvider {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "openai" => Ok(Self::OpenAi),
            "mock" => Ok(Self::Mock),
            _ => Err(format!("Unknown LLM provider: {}", s)),
        }
    }
}

impl std::fmt::Display for LlmProvider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Creates an LLM client from the given configuration.
///
/// For OpenAI the API key is read from `OPENAI_API_KEY`.
pub fn create_client(config: &LlmConfig) -> Result<Box<dyn LlmClient>> {
    let provider: LlmProvider = config.provider.parse().map_err(AssistError::config)?;

    match provider {
        LlmProvider::OpenAi => {
            let key = std::env::var("OPENAI_API_KEY").map_err(|_| {
                AssistError::llm("No API key configured. Set OPENAI_API_KEY or use --mock.")
            })?;
            let client = OpenAiClient::new(
                OpenAiConfig::new(key, config.model.clone()).with_timeout(config.timeout_secs),
            )?;
            Ok(Box::new(client))
        }
        LlmProvider::Mock => Ok(Box::new(MockLlmClient::new())),
    }
}
