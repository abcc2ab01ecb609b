//! Completion backends for the LLM price provider.

use async_trait::async_trait;
use reqwest::Client as HttpClient;
use rig::{client::CompletionClient, completion::Prompt, providers::openai};
use serde_json::json;
use tracing::debug;

use crate::errors::MarketDataError;

const OPENAI_PROVIDER: &str = "OPENAI";

/// One single-shot completion call.
#[derive(Debug, Clone, PartialEq)]
pub struct CompletionRequest {
    pub system: String,
    pub user: String,
    pub temperature: f64,
    /// Ask the service to constrain its output to a JSON object.
    pub json_mode: bool,
}

/// Text-completion service used by [`super::LlmProvider`].
#[async_trait]
pub trait CompletionBackend: Send + Sync {
    async fn complete(&self, request: &CompletionRequest) -> Result<String, MarketDataError>;
}

/// OpenAI chat completions through rig.
pub struct OpenAiBackend {
    client: openai::CompletionsClient<HttpClient>,
    model_name: String,
}

impl OpenAiBackend {
    pub fn new(api_key: &str, model_name: impl Into<String>) -> Result<Self, MarketDataError> {
        // Completions API rather than Responses API: `response_format` is a completions parameter
        let client = openai::CompletionsClient::builder()
            .api_key(api_key)
            .build()
            .map_err(|e| MarketDataError::provider(OPENAI_PROVIDER, e.to_string()))?;
        Ok(Self {
            client,
            model_name: model_name.into(),
        })
    }
}

#[async_trait]
impl CompletionBackend for OpenAiBackend {
    async fn complete(&self, request: &CompletionRequest) -> Result<String, MarketDataError> {
        debug!(
            "Requesting completion from {} (json_mode: {})",
            self.model_name, request.json_mode
        );

        let mut builder = self
            .client
            .agent(&self.model_name)
            .preamble(&request.system)
            .temperature(request.temperature);

        if request.json_mode {
            builder = builder.additional_params(json!({
                "response_format": { "type": "json_object" }
            }));
        }

        builder
            .build()
            .prompt(request.user.as_str())
            .await
            .map_err(|e| MarketDataError::provider(OPENAI_PROVIDER, e.to_string()))
    }
}
