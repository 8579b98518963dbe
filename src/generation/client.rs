//! OpenAI-compatible chat completions client

use crate::errors::{AssistantError, Result};
use crate::generation::Generator;
use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Request timeout; a slow collaborator must hit the graceful-degradation
/// path, not hang the request
const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

#[derive(Debug, Serialize)]
struct ChatRequest {
    model: String,
    messages: Vec<ChatMessage>,
    temperature: f32,
    max_tokens: u32,
}

#[derive(Debug, Serialize, Deserialize)]
struct ChatMessage {
    role: String,
    content: String,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    choices: Vec<ChatChoice>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: ChatMessage,
}

/// HTTP generation client
pub struct OpenAiGenerator {
    client: Client,
    base_url: String,
    model: String,
    api_key: String,
}

impl OpenAiGenerator {
    pub fn new(base_url: &str, model: &str, api_key: &str) -> Result<Self> {
        let client = Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .map_err(AssistantError::Http)?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            model: model.to_string(),
            api_key: api_key.to_string(),
        })
    }
}

#[async_trait]
impl Generator for OpenAiGenerator {
    async fn generate(&self, prompt: &str, temperature: f32, max_tokens: u32) -> Result<String> {
        let url = format!("{}/chat/completions", self.base_url);

        let request = ChatRequest {
            model: self.model.clone(),
            messages: vec![ChatMessage {
                role: "user".to_string(),
                content: prompt.to_string(),
            }],
            temperature,
            max_tokens,
        };

        let response = self
            .client
            .post(&url)
            .bearer_auth(&self.api_key)
            .json(&request)
            .send()
            .await
            .map_err(|e| AssistantError::Generation(format!("request failed: {}", e)))?;

        if !response.status().is_success() {
            let status = response.status();
            let detail = response
                .text()
                .await
                .unwrap_or_else(|_| "unknown error".to_string());
            return Err(AssistantError::Generation(format!(
                "HTTP {}: {}",
                status, detail
            )));
        }

        let parsed: ChatResponse = response
            .json()
            .await
            .map_err(|e| AssistantError::Generation(format!("malformed response: {}", e)))?;

        parsed
            .choices
            .into_iter()
            .next()
            .map(|c| c.message.content)
            .ok_or_else(|| AssistantError::Generation("response contained no choices".to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_serialization() {
        let request = ChatRequest {
            model: "gpt-3.5-turbo".to_string(),
            messages: vec![ChatMessage {
                role: "user".to_string(),
                content: "What is the overdraft fee?".to_string(),
            }],
            temperature: 0.7,
            max_tokens: 512,
        };

        let json = serde_json::to_value(&request).unwrap();
        assert_eq!(json["model"], "gpt-3.5-turbo");
        assert_eq!(json["messages"][0]["role"], "user");
        assert_eq!(json["max_tokens"], 512);
    }

    #[test]
    fn test_response_parsing() {
        let raw = r#"{
            "choices": [
                {"message": {"role": "assistant", "content": "The fee is $35."}}
            ]
        }"#;

        let parsed: ChatResponse = serde_json::from_str(raw).unwrap();
        assert_eq!(parsed.choices[0].message.content, "The fee is $35.");
    }

    #[tokio::test]
    async fn test_unreachable_endpoint_is_a_generation_error() {
        let generator =
            OpenAiGenerator::new("http://127.0.0.1:1", "gpt-3.5-turbo", "sk-test").unwrap();
        let err = generator.generate("hello", 0.7, 16).await.unwrap_err();
        assert!(matches!(err, AssistantError::Generation(_)));
    }
}
