//! Ollama chat client for the AI analyst.
//!
//! The engine's contract ends at the composed context string; this
//! module owns the transport to the external model and maps connection
//! failures to friendly errors. Callers surface failures as a fallback
//! message rather than letting them propagate into the output layer.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::{debug, info};

/// Configuration for the analyst client.
#[derive(Debug, Clone)]
pub struct AnalystConfig {
    pub ollama_url: String,
    pub model_name: String,
    pub temperature: f32,
    pub timeout_seconds: u64,
}

impl Default for AnalystConfig {
    fn default() -> Self {
        Self {
            ollama_url: "http://localhost:11434".to_string(),
            model_name: "llama3.2:latest".to_string(),
            temperature: 0.1,
            timeout_seconds: 120,
        }
    }
}

#[derive(Debug, Serialize)]
struct ChatMessage {
    role: String,
    content: String,
}

#[derive(Debug, Serialize)]
struct OllamaChatRequest {
    model: String,
    messages: Vec<ChatMessage>,
    stream: bool,
    options: OllamaOptions,
}

#[derive(Debug, Serialize)]
struct OllamaOptions {
    temperature: f32,
}

#[derive(Debug, Deserialize)]
struct OllamaChatResponse {
    message: ResponseMessage,
}

#[derive(Debug, Deserialize)]
struct ResponseMessage {
    content: String,
}

/// The data analyst client.
pub struct AnalystClient {
    config: AnalystConfig,
    http_client: reqwest::Client,
}

impl AnalystClient {
    /// Create a new client with the given configuration.
    pub fn new(config: AnalystConfig) -> Result<Self> {
        let http_client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_seconds))
            .build()
            .context("Failed to create HTTP client")?;

        Ok(Self {
            config,
            http_client,
        })
    }

    /// Ask the analyst a question grounded in the composed context.
    ///
    /// Returns the model's free-text answer, to be displayed verbatim.
    pub async fn ask(&self, context: &str, question: &str) -> Result<String> {
        let url = format!("{}/api/chat", self.config.ollama_url);

        let prompt = format!(
            "Context: {}\n\nUser Question: {}\n\nProvide a data-driven answer in 2-3 sentences.",
            context, question
        );

        let request = OllamaChatRequest {
            model: self.config.model_name.clone(),
            messages: vec![
                ChatMessage {
                    role: "system".to_string(),
                    content: ANALYST_SYSTEM_PROMPT.to_string(),
                },
                ChatMessage {
                    role: "user".to_string(),
                    content: prompt,
                },
            ],
            stream: false,
            options: OllamaOptions {
                temperature: self.config.temperature,
            },
        };

        info!("Asking analyst model {}", self.config.model_name);
        debug!("Context payload is {} bytes", context.len());

        let response = self
            .http_client
            .post(&url)
            .json(&request)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    anyhow::anyhow!("Request timed out after {}s", self.config.timeout_seconds)
                } else if e.is_connect() {
                    anyhow::anyhow!("Cannot connect to Ollama at {}", self.config.ollama_url)
                } else {
                    anyhow::anyhow!("Failed to send request: {}", e)
                }
            })?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(anyhow::anyhow!("Ollama API error {}: {}", status, body));
        }

        let chat_response: OllamaChatResponse = response
            .json()
            .await
            .context("Failed to parse Ollama response")?;

        Ok(chat_response.message.content)
    }
}

/// System prompt for the analyst.
const ANALYST_SYSTEM_PROMPT: &str = r#"You are a Data Analyst for a software package portfolio.
Answer the user's question using only the dataset summary provided in the context.
Be concise and cite concrete numbers from the data."#;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_analyst_config_default() {
        let config = AnalystConfig::default();
        assert_eq!(config.ollama_url, "http://localhost:11434");
        assert_eq!(config.temperature, 0.1);
    }

    #[test]
    fn test_request_serialization_shape() {
        let request = OllamaChatRequest {
            model: "llama3.2:latest".to_string(),
            messages: vec![ChatMessage {
                role: "user".to_string(),
                content: "hello".to_string(),
            }],
            stream: false,
            options: OllamaOptions { temperature: 0.1 },
        };

        let json = serde_json::to_string(&request).unwrap();
        assert!(json.contains("\"stream\":false"));
        assert!(json.contains("\"temperature\":0.1"));
    }
}
