//! Mistral chat-completions client implementing [`TextGenerator`].

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use tokio::sync::Semaphore;
use tracing::{debug, instrument, warn};

use crate::error::LlmError;
use crate::wire::{ChatMessage, ChatRequest, ChatResponse};
use crate::{prompts, DocContext, TextGenerator};

/// Connection settings for the Mistral API.
#[derive(Debug, Clone)]
pub struct MistralConfig {
    pub api_key: String,
    pub base_url: String,
    pub model: String,
    pub temperature: f32,
    pub max_tokens: u32,
    /// Per-call timeout; a timed-out call degrades the affected item to the
    /// heuristic path, it does not abort the run.
    pub timeout_seconds: u64,
    /// Bound on concurrent in-flight requests.
    pub max_in_flight: usize,
}

impl Default for MistralConfig {
    fn default() -> Self {
        Self {
            api_key: String::new(),
            base_url: "https://api.mistral.ai/v1".to_string(),
            model: "mistral-large-latest".to_string(),
            temperature: 0.7,
            max_tokens: 1000,
            timeout_seconds: 300,
            max_in_flight: 4,
        }
    }
}

/// HTTP client for the chat-completions endpoint. Cheap to clone behind an
/// `Arc`; all requests share one connection pool and one in-flight bound.
#[derive(Debug)]
pub struct MistralClient {
    config: MistralConfig,
    client: reqwest::Client,
    in_flight: Arc<Semaphore>,
}

impl MistralClient {
    pub fn new(config: MistralConfig) -> Result<Self, LlmError> {
        if config.api_key.is_empty() {
            return Err(LlmError::Config("api_key must be set".to_string()));
        }
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_seconds.max(1)))
            .connect_timeout(Duration::from_secs(10))
            .build()
            .map_err(|e| LlmError::Config(e.to_string()))?;
        let permits = config.max_in_flight.max(1);
        Ok(Self {
            config,
            client,
            in_flight: Arc::new(Semaphore::new(permits)),
        })
    }

    /// Send one prompt and return the completion text.
    #[instrument(skip_all, fields(prompt_len = prompt.len()))]
    async fn chat(&self, prompt: &str) -> Result<String, LlmError> {
        let _permit = self
            .in_flight
            .clone()
            .acquire_owned()
            .await
            .map_err(|e| LlmError::Request {
                message: format!("in-flight limiter closed: {e}"),
                is_timeout: false,
            })?;

        let body = ChatRequest {
            model: self.config.model.clone(),
            messages: vec![ChatMessage::user(prompt)],
            temperature: self.config.temperature,
            max_tokens: self.config.max_tokens,
        };
        let url = format!(
            "{}/chat/completions",
            self.config.base_url.trim_end_matches('/')
        );

        let response = self
            .client
            .post(&url)
            .bearer_auth(&self.config.api_key)
            .json(&body)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    LlmError::Timeout
                } else {
                    LlmError::Request {
                        message: e.to_string(),
                        is_timeout: false,
                    }
                }
            })?;

        let status = response.status();
        if status.as_u16() == 401 || status.as_u16() == 403 {
            return Err(LlmError::Authentication);
        }
        if status.as_u16() == 429 {
            return Err(LlmError::RateLimited);
        }
        if !status.is_success() {
            let snippet = truncate(&response.text().await.unwrap_or_default(), 120);
            warn!(status = status.as_u16(), "generation request rejected");
            return Err(LlmError::Api {
                status: status.as_u16(),
                message: snippet,
            });
        }

        let parsed: ChatResponse = response
            .json()
            .await
            .map_err(|e| LlmError::Deserialization(e.to_string()))?;
        let content = parsed
            .choices
            .into_iter()
            .next()
            .map(|choice| choice.message.content)
            .unwrap_or_default();
        if content.is_empty() {
            return Err(LlmError::Deserialization(
                "response carried no completion choices".to_string(),
            ));
        }
        debug!(response_len = content.len(), "generation request succeeded");
        Ok(content)
    }
}

fn truncate(text: &str, max: usize) -> String {
    if text.len() <= max {
        text.to_string()
    } else {
        let cut = text
            .char_indices()
            .take_while(|&(i, _)| i < max)
            .last()
            .map(|(i, c)| i + c.len_utf8())
            .unwrap_or(0);
        format!("{}...", &text[..cut])
    }
}

#[async_trait]
impl TextGenerator for MistralClient {
    async fn summarize_or_extract(&self, prompt: &str) -> Result<String, LlmError> {
        self.chat(prompt).await
    }

    async fn explain_relationship(
        &self,
        doc_a: DocContext<'_>,
        doc_b: DocContext<'_>,
        themes: &[String],
    ) -> Result<String, LlmError> {
        let prompt = prompts::explain_relationship(doc_a, doc_b, themes);
        self.chat(&prompt).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use httpmock::prelude::*;

    fn config_for(server: &MockServer) -> MistralConfig {
        MistralConfig {
            api_key: "test-key".to_string(),
            base_url: server.base_url(),
            timeout_seconds: 2,
            ..Default::default()
        }
    }

    #[test]
    fn empty_api_key_is_a_config_error() {
        let err = MistralClient::new(MistralConfig::default()).unwrap_err();
        assert!(matches!(err, LlmError::Config(_)));
    }

    #[tokio::test]
    async fn returns_completion_content_on_success() {
        let server = MockServer::start();
        let mock = server.mock(|when, then| {
            when.method(POST)
                .path("/chat/completions")
                .header("authorization", "Bearer test-key")
                .json_body_partial(r#"{"model": "mistral-large-latest"}"#);
            then.status(200).json_body(serde_json::json!({
                "choices": [{"message": {"role": "assistant", "content": "Cell Culture"}}]
            }));
        });

        let client = MistralClient::new(config_for(&server)).unwrap();
        let out = client.summarize_or_extract("classify this").await.unwrap();
        assert_eq!(out, "Cell Culture");
        mock.assert();
    }

    #[tokio::test]
    async fn maps_auth_and_rate_limit_statuses() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(POST).path("/chat/completions");
            then.status(401);
        });
        let client = MistralClient::new(config_for(&server)).unwrap();
        let err = client.summarize_or_extract("x").await.unwrap_err();
        assert!(matches!(err, LlmError::Authentication));
    }

    #[tokio::test]
    async fn surfaces_api_errors_with_status() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(POST).path("/chat/completions");
            then.status(500).body("upstream exploded");
        });
        let client = MistralClient::new(config_for(&server)).unwrap();
        match client.summarize_or_extract("x").await.unwrap_err() {
            LlmError::Api { status, message } => {
                assert_eq!(status, 500);
                assert!(message.contains("upstream exploded"));
            }
            other => panic!("expected Api error, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn empty_choice_list_is_a_deserialization_error() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(POST).path("/chat/completions");
            then.status(200).json_body(serde_json::json!({"choices": []}));
        });
        let client = MistralClient::new(config_for(&server)).unwrap();
        let err = client.summarize_or_extract("x").await.unwrap_err();
        assert!(matches!(err, LlmError::Deserialization(_)));
    }

    #[tokio::test]
    async fn explanation_goes_through_the_same_endpoint() {
        let server = MockServer::start();
        let mock = server.mock(|when, then| {
            when.method(POST).path("/chat/completions");
            then.status(200).json_body(serde_json::json!({
                "choices": [{"message": {"role": "assistant", "content": "Both study bone."}}]
            }));
        });
        let client = MistralClient::new(config_for(&server)).unwrap();
        let out = client
            .explain_relationship(
                DocContext { title: "A", excerpt: "a" },
                DocContext { title: "B", excerpt: "b" },
                &["bone".to_string()],
            )
            .await
            .unwrap();
        assert_eq!(out, "Both study bone.");
        mock.assert();
    }
}
