//! Client for an OpenAI-compatible chat completions API (Groq by default).
//!
//! The rest of the crate only sees [`TextGenerator`]. Responses are handed
//! back verbatim: no parsing of the model output, no retries.

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

use crate::config::AiConfig;

/// Shape the caller asks the model to answer in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResponseFormat {
    Text,
    JsonObject,
}

#[derive(Debug, Error)]
pub enum GenerationError {
    #[error("API key not configured: set the {0} environment variable")]
    MissingApiKey(String),

    #[error("Request to text-generation API failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("Text-generation API returned {status}: {body}")]
    Upstream { status: u16, body: String },

    #[error("Malformed response from text-generation API: {0}")]
    MalformedResponse(String),
}

#[async_trait]
pub trait TextGenerator: Send + Sync {
    async fn generate(
        &self,
        system_prompt: &str,
        user_text: &str,
        format: ResponseFormat,
    ) -> Result<String, GenerationError>;
}

#[derive(Debug, Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: [ChatMessage<'a>; 2],
    #[serde(skip_serializing_if = "Option::is_none")]
    response_format: Option<ResponseFormatBody>,
}

#[derive(Debug, Serialize)]
struct ChatMessage<'a> {
    role: &'static str,
    content: &'a str,
}

#[derive(Debug, Serialize)]
struct ResponseFormatBody {
    #[serde(rename = "type")]
    kind: &'static str,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    choices: Vec<Choice>,
}

#[derive(Debug, Deserialize)]
struct Choice {
    message: ChoiceMessage,
}

#[derive(Debug, Deserialize)]
struct ChoiceMessage {
    content: Option<String>,
}

#[derive(Clone)]
pub struct GroqClient {
    client: Client,
    base_url: String,
    model: String,
    api_key: Option<String>,
    api_key_env: String,
}

impl GroqClient {
    /// Builds the client. A missing key is not an error here; it is
    /// reported by [`TextGenerator::generate`] on first use.
    pub fn from_config(config: &AiConfig) -> anyhow::Result<Self> {
        let client = Client::builder()
            .user_agent(concat!("Taskboard/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| anyhow::anyhow!("Failed to build AI HTTP client: {e}"))?;

        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            model: config.model.clone(),
            api_key: config.api_key(),
            api_key_env: config.api_key_env.clone(),
        })
    }

    #[must_use]
    pub fn with_api_key(mut self, api_key: impl Into<String>) -> Self {
        self.api_key = Some(api_key.into());
        self
    }
}

#[async_trait]
impl TextGenerator for GroqClient {
    async fn generate(
        &self,
        system_prompt: &str,
        user_text: &str,
        format: ResponseFormat,
    ) -> Result<String, GenerationError> {
        let api_key = self
            .api_key
            .as_deref()
            .ok_or_else(|| GenerationError::MissingApiKey(self.api_key_env.clone()))?;

        let request = ChatRequest {
            model: &self.model,
            messages: [
                ChatMessage {
                    role: "system",
                    content: system_prompt,
                },
                ChatMessage {
                    role: "user",
                    content: user_text,
                },
            ],
            response_format: match format {
                ResponseFormat::JsonObject => Some(ResponseFormatBody {
                    kind: "json_object",
                }),
                ResponseFormat::Text => None,
            },
        };

        let url = format!("{}/chat/completions", self.base_url);
        debug!("Requesting completion from {} (model {})", url, self.model);

        let response = self
            .client
            .post(&url)
            .bearer_auth(api_key)
            .json(&request)
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let body = response.text().await.unwrap_or_default();
            return Err(GenerationError::Upstream { status, body });
        }

        let body = response.text().await?;
        let parsed: ChatResponse = serde_json::from_str(&body)
            .map_err(|e| GenerationError::MalformedResponse(e.to_string()))?;

        parsed
            .choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content)
            .ok_or_else(|| GenerationError::MalformedResponse("no message content".to_string()))
    }
}
