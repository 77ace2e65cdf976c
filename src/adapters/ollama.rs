//! Text-completion client for a locally hosted Ollama server
//!
//! The advisor treats the model as an opaque completion service: one
//! user-role prompt in, one message content string out.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::error::{AgriError, Result};

/// Opaque text-completion service
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait TextCompletion: Send + Sync {
    /// Complete a single user-role prompt
    async fn complete(&self, prompt: &str) -> Result<String>;
}

#[derive(Debug, Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage<'a>>,
    stream: bool,
}

#[derive(Debug, Serialize)]
struct ChatMessage<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    message: ResponseMessage,
}

#[derive(Debug, Deserialize)]
struct ResponseMessage {
    content: String,
}

/// Ollama `/api/chat` client
#[derive(Clone)]
pub struct OllamaClient {
    client: reqwest::Client,
    base_url: String,
    model: String,
}

impl OllamaClient {
    pub fn new(base_url: &str, model: &str) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
            model: model.to_string(),
        }
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    /// Check if the server answers and lists the configured model
    pub async fn check_availability(&self) -> Result<bool> {
        let url = format!("{}/api/tags", self.base_url);
        match self.client.get(&url).send().await {
            Ok(resp) if resp.status().is_success() => {
                let body: serde_json::Value = resp.json().await?;
                let found = body["models"]
                    .as_array()
                    .map(|models| {
                        models.iter().any(|m| {
                            m["name"]
                                .as_str()
                                .map(|n| n.split(':').next() == Some(self.model.as_str()))
                                .unwrap_or(false)
                        })
                    })
                    .unwrap_or(false);
                if found {
                    info!("Ollama available with model {}", self.model);
                } else {
                    warn!("Ollama reachable but model {} is not pulled", self.model);
                }
                Ok(found)
            }
            Ok(resp) => {
                warn!("Ollama returned status {}", resp.status());
                Ok(false)
            }
            Err(e) => {
                warn!("Ollama not reachable at {}: {}", self.base_url, e);
                Ok(false)
            }
        }
    }
}

#[async_trait]
impl TextCompletion for OllamaClient {
    async fn complete(&self, prompt: &str) -> Result<String> {
        let url = format!("{}/api/chat", self.base_url);
        let request = ChatRequest {
            model: &self.model,
            messages: vec![ChatMessage {
                role: "user",
                content: prompt,
            }],
            stream: false,
        };

        debug!("Sending completion request to {}", url);
        let response = self
            .client
            .post(&url)
            .json(&request)
            .send()
            .await
            .map_err(|e| AgriError::TextService(format!("request failed: {}", e)))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(AgriError::TextService(format!("{}: {}", status, body)));
        }

        let chat: ChatResponse = response
            .json()
            .await
            .map_err(|e| AgriError::TextService(format!("malformed response: {}", e)))?;

        Ok(chat.message.content)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_shape() {
        let request = ChatRequest {
            model: "tinyllama",
            messages: vec![ChatMessage {
                role: "user",
                content: "Suggest 5 crops",
            }],
            stream: false,
        };
        let json = serde_json::to_value(&request).unwrap();
        assert_eq!(json["model"], "tinyllama");
        assert_eq!(json["messages"][0]["role"], "user");
        assert_eq!(json["messages"][0]["content"], "Suggest 5 crops");
        assert_eq!(json["stream"], false);
    }

    #[test]
    fn test_response_shape() {
        let body = r#"{"model":"tinyllama","message":{"role":"assistant","content":"Rice, Wheat"},"done":true}"#;
        let parsed: ChatResponse = serde_json::from_str(body).unwrap();
        assert_eq!(parsed.message.content, "Rice, Wheat");
    }

    #[tokio::test]
    async fn test_unreachable_server_is_text_service_error() {
        // Port 9 (discard) is not an HTTP server
        let client = OllamaClient::new("http://127.0.0.1:9", "tinyllama");
        let err = client.complete("hello").await.unwrap_err();
        assert_eq!(err.category(), "text-service");
    }
}
