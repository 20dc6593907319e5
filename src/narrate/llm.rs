//! Async narration client
//!
//! Model-agnostic HTTP client used to enrich battle narration. Supports both
//! Anthropic and OpenAI-compatible APIs. The client is strictly best-effort:
//! callers bound the wait and fall back to the built-in narration pool on any
//! failure, so a battle never stalls on it.

use crate::core::error::{ArenaError, Result};
use crate::narrate::ImpactType;
use reqwest::Client;
use serde::{Deserialize, Serialize};

/// API format type
#[derive(Debug, Clone, PartialEq)]
pub enum ApiFormat {
    Anthropic,
    OpenAI,
}

/// Context handed to the narrator for one resolved action
#[derive(Debug, Clone)]
pub struct NarrationRequest<'a> {
    pub attacker_name: &'a str,
    pub defender_name: &'a str,
    pub action_text: &'a str,
    pub impact: ImpactType,
}

/// Async client for narration API calls
pub struct NarrationClient {
    client: Client,
    api_key: String,
    api_url: String,
    model: String,
    api_format: ApiFormat,
}

impl NarrationClient {
    /// Create a new client with explicit configuration
    pub fn new(api_key: String, api_url: String, model: String) -> Self {
        let api_format = Self::detect_api_format(&api_url);
        Self {
            client: Client::new(),
            api_key,
            api_url,
            model,
            api_format,
        }
    }

    /// Detect API format from URL
    fn detect_api_format(url: &str) -> ApiFormat {
        if url.contains("anthropic.com") {
            ApiFormat::Anthropic
        } else {
            // OpenAI and compatible APIs share a request shape
            ApiFormat::OpenAI
        }
    }

    /// Create a client from environment variables
    ///
    /// Required: LLM_API_KEY
    /// Optional: LLM_API_URL (defaults to Anthropic API)
    /// Optional: LLM_MODEL (defaults to claude-3-haiku-20240307)
    pub fn from_env() -> Result<Self> {
        let api_key = std::env::var("LLM_API_KEY")
            .map_err(|_| ArenaError::NarrationError("LLM_API_KEY not set".into()))?;
        let api_url = std::env::var("LLM_API_URL")
            .unwrap_or_else(|_| "https://api.anthropic.com/v1/messages".into());
        let model = std::env::var("LLM_MODEL").unwrap_or_else(|_| "claude-3-haiku-20240307".into());

        Ok(Self::new(api_key, api_url, model))
    }

    /// Narrate one resolved action
    ///
    /// # Returns
    /// A single line of commentary text
    pub async fn narrate(&self, request: &NarrationRequest<'_>) -> Result<String> {
        let user_prompt = format!(
            "ATTACKER: {}\nDEFENDER: {}\nACTION: {}\nIMPACT: {}\n\nNarrate this exchange:",
            request.attacker_name,
            request.defender_name,
            request.action_text,
            request.impact.label()
        );

        let text = match self.api_format {
            ApiFormat::Anthropic => {
                self.complete_anthropic(NARRATE_SYSTEM_PROMPT, &user_prompt)
                    .await?
            }
            ApiFormat::OpenAI => {
                self.complete_openai(NARRATE_SYSTEM_PROMPT, &user_prompt)
                    .await?
            }
        };

        let line = text.trim();
        if line.is_empty() {
            return Err(ArenaError::NarrationError("Empty narration".into()));
        }
        Ok(line.to_string())
    }

    async fn complete_anthropic(&self, system: &str, user: &str) -> Result<String> {
        let request = AnthropicRequest {
            model: self.model.clone(),
            max_tokens: 256,
            system: system.into(),
            messages: vec![Message {
                role: "user".into(),
                content: user.into(),
            }],
        };

        let response = self
            .client
            .post(&self.api_url)
            .header("x-api-key", &self.api_key)
            .header("anthropic-version", "2023-06-01")
            .header("content-type", "application/json")
            .json(&request)
            .send()
            .await
            .map_err(|e| ArenaError::NarrationError(e.to_string()))?;

        if !response.status().is_success() {
            let error_text = response.text().await.unwrap_or_default();
            return Err(ArenaError::NarrationError(format!(
                "API error: {}",
                error_text
            )));
        }

        let completion: AnthropicResponse = response
            .json()
            .await
            .map_err(|e| ArenaError::NarrationError(e.to_string()))?;

        completion
            .content
            .first()
            .map(|c| c.text.clone())
            .ok_or_else(|| ArenaError::NarrationError("Empty response".into()))
    }

    async fn complete_openai(&self, system: &str, user: &str) -> Result<String> {
        let request = OpenAIRequest {
            model: self.model.clone(),
            max_tokens: 256,
            messages: vec![
                Message {
                    role: "system".into(),
                    content: system.into(),
                },
                Message {
                    role: "user".into(),
                    content: user.into(),
                },
            ],
        };

        let response = self
            .client
            .post(&self.api_url)
            .header("Authorization", format!("Bearer {}", self.api_key))
            .header("content-type", "application/json")
            .json(&request)
            .send()
            .await
            .map_err(|e| ArenaError::NarrationError(e.to_string()))?;

        if !response.status().is_success() {
            let error_text = response.text().await.unwrap_or_default();
            return Err(ArenaError::NarrationError(format!(
                "API error: {}",
                error_text
            )));
        }

        let completion: OpenAIResponse = response
            .json()
            .await
            .map_err(|e| ArenaError::NarrationError(e.to_string()))?;

        completion
            .choices
            .first()
            .map(|c| c.message.content.clone())
            .ok_or_else(|| ArenaError::NarrationError("Empty response".into()))
    }
}

// Anthropic API format
#[derive(Serialize)]
struct AnthropicRequest {
    model: String,
    max_tokens: u32,
    system: String,
    messages: Vec<Message>,
}

#[derive(Deserialize)]
struct AnthropicResponse {
    content: Vec<ContentBlock>,
}

#[derive(Deserialize)]
struct ContentBlock {
    text: String,
}

// OpenAI-compatible API format
#[derive(Serialize)]
struct OpenAIRequest {
    model: String,
    max_tokens: u32,
    messages: Vec<Message>,
}

#[derive(Deserialize)]
struct OpenAIResponse {
    choices: Vec<Choice>,
}

#[derive(Deserialize)]
struct Choice {
    message: ChoiceMessage,
}

#[derive(Deserialize)]
struct ChoiceMessage {
    content: String,
}

// Shared
#[derive(Serialize)]
struct Message {
    role: String,
    content: String,
}

/// System prompt for battle narration
const NARRATE_SYSTEM_PROMPT: &str = r#"You are the ringside commentator for a fantasy duel.
Given one exchange (attacker, defender, the attempted action, and how hard it landed),
write EXACTLY ONE vivid sentence of commentary. No preamble, no quotes, no markdown.
Match the stated impact: a "miss" reads as a whiff, a "critical" as a highlight reel moment."#;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_client_creation() {
        let client = NarrationClient::new(
            "test-key".into(),
            "https://api.example.com".into(),
            "test-model".into(),
        );
        assert_eq!(client.api_key, "test-key");
        assert_eq!(client.api_url, "https://api.example.com");
        assert_eq!(client.api_format, ApiFormat::OpenAI);
    }

    #[test]
    fn test_anthropic_url_detected() {
        let client = NarrationClient::new(
            "test-key".into(),
            "https://api.anthropic.com/v1/messages".into(),
            "test-model".into(),
        );
        assert_eq!(client.api_format, ApiFormat::Anthropic);
    }

    #[test]
    fn test_from_env_missing_key() {
        let result = NarrationClient::from_env();
        if std::env::var("LLM_API_KEY").is_err() {
            assert!(result.is_err());
        }
    }
}
