//! Thin asynchronous client for an OpenAI-compatible chat-completions
//! endpoint, used as the optional backend for listing content generation.

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use thrift_core::completion::{CompletionRequest, TextCompletion};
use thrift_shared::Masked;

const DEFAULT_BASE_URL: &str = "https://api.openai.com/v1";
const DEFAULT_MODEL: &str = "gpt-4o-mini";
const USER_AGENT: &str = "thriftdesk/0.1.0";

#[derive(Debug, Error)]
pub enum CompletionError {
    #[error("http request error: {0}")]
    Http(#[from] reqwest::Error),
    #[error("completion API error: {0}")]
    Api(String),
    #[error("completion returned no choices")]
    Empty,
}

/// Connection settings for the completion backend. Built from app config;
/// the key stays masked everywhere except the request header.
#[derive(Debug, Clone)]
pub struct AiClientConfig {
    pub api_key: Masked<String>,
    pub base_url: String,
    pub model: String,
}

impl AiClientConfig {
    pub fn new(api_key: Masked<String>) -> Self {
        Self {
            api_key,
            base_url: DEFAULT_BASE_URL.to_string(),
            model: DEFAULT_MODEL.to_string(),
        }
    }

    /// Keys that are absent or still carry the sample-config placeholder
    /// disable the AI path entirely.
    pub fn is_placeholder_key(key: &str) -> bool {
        key.trim().is_empty() || key.starts_with("sk-your-")
    }
}

#[derive(Serialize)]
struct ChatRequest {
    model: String,
    messages: Vec<ChatMessage>,
    max_tokens: u32,
    temperature: f32,
}

#[derive(Serialize, Deserialize)]
struct ChatMessage {
    role: String,
    content: String,
}

#[derive(Deserialize)]
struct ChatResponse {
    choices: Vec<ChatChoice>,
}

#[derive(Deserialize)]
struct ChatChoice {
    message: ChatMessage,
}

/// HTTP implementation of the text-completion collaborator.
pub struct ChatCompletionClient {
    http: Client,
    config: AiClientConfig,
}

impl ChatCompletionClient {
    pub fn new(config: AiClientConfig) -> Result<Self, CompletionError> {
        let http = Client::builder().user_agent(USER_AGENT).build()?;
        Ok(Self { http, config })
    }

    /// Build a client only when a usable key is configured.
    pub fn from_key(api_key: Option<Masked<String>>) -> Option<Self> {
        let key = api_key?;
        if AiClientConfig::is_placeholder_key(key.expose()) {
            return None;
        }
        Self::new(AiClientConfig::new(key)).ok()
    }

    async fn send(&self, request: CompletionRequest) -> Result<String, CompletionError> {
        let body = ChatRequest {
            model: self.config.model.clone(),
            messages: vec![ChatMessage {
                role: "user".to_string(),
                content: request.prompt,
            }],
            max_tokens: request.max_tokens,
            temperature: request.temperature,
        };

        let response = self
            .http
            .post(format!("{}/chat/completions", self.config.base_url))
            .bearer_auth(self.config.api_key.expose())
            .json(&body)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let detail = response.text().await.unwrap_or_default();
            return Err(CompletionError::Api(format!("{}: {}", status, detail)));
        }

        let parsed: ChatResponse = response.json().await?;
        let choice = parsed.choices.into_iter().next().ok_or(CompletionError::Empty)?;
        Ok(choice.message.content.trim().to_string())
    }
}

#[async_trait]
impl TextCompletion for ChatCompletionClient {
    async fn complete(
        &self,
        request: CompletionRequest,
    ) -> Result<String, Box<dyn std::error::Error + Send + Sync>> {
        Ok(self.send(request).await?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_placeholder_key_detection() {
        assert!(AiClientConfig::is_placeholder_key(""));
        assert!(AiClientConfig::is_placeholder_key("sk-your-key-here"));
        assert!(!AiClientConfig::is_placeholder_key("sk-live-abc"));
    }

    #[test]
    fn test_from_key_rejects_placeholders() {
        assert!(ChatCompletionClient::from_key(None).is_none());
        assert!(
            ChatCompletionClient::from_key(Some(Masked::new("sk-your-key-here".to_string())))
                .is_none()
        );
        assert!(
            ChatCompletionClient::from_key(Some(Masked::new("sk-live-abc".to_string()))).is_some()
        );
    }

    #[test]
    fn test_chat_request_shape() {
        let body = ChatRequest {
            model: "gpt-4o-mini".to_string(),
            messages: vec![ChatMessage {
                role: "user".to_string(),
                content: "hello".to_string(),
            }],
            max_tokens: 50,
            temperature: 0.3,
        };
        let json = serde_json::to_value(&body).unwrap();
        assert_eq!(json["messages"][0]["role"], "user");
        assert_eq!(json["max_tokens"], 50);
    }
}
