use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tracing::debug;

use super::{CompletionRequest, Generator};
use crate::consts::OPENAI_API_BASE;
use crate::error::GenerationError;

const COMPLETIONS_PATH: &str = "/v1/chat/completions";

/// Calls the OpenAI chat completions API.
pub struct OpenAiGenerator {
    api_key: String,
    base_url: String,
    client: reqwest::Client,
}

impl std::fmt::Debug for OpenAiGenerator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OpenAiGenerator")
            .field("base_url", &self.base_url)
            .field("api_key", &"[REDACTED]")
            .finish()
    }
}

impl OpenAiGenerator {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self::with_base_url(api_key, OPENAI_API_BASE)
    }

    /// Point the client somewhere other than api.openai.com (tests, proxies).
    pub fn with_base_url(api_key: impl Into<String>, base_url: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            base_url: base_url.into().trim_end_matches('/').to_string(),
            client: reqwest::Client::new(),
        }
    }
}

#[async_trait]
impl Generator for OpenAiGenerator {
    async fn complete(&self, request: &CompletionRequest) -> Result<String, GenerationError> {
        let messages = [
            Message {
                role: "system",
                content: &request.system,
            },
            Message {
                role: "user",
                content: &request.user,
            },
        ];
        let body = ApiRequest {
            model: &request.model,
            messages: &messages,
            temperature: request.sampling.temperature,
            max_tokens: request.sampling.max_tokens,
        };

        debug!(
            model = %request.model,
            temperature = request.sampling.temperature,
            max_tokens = request.sampling.max_tokens,
            "requesting completion"
        );

        let resp = self
            .client
            .post(format!("{}{}", self.base_url, COMPLETIONS_PATH))
            .bearer_auth(&self.api_key)
            .json(&body)
            .send()
            .await?;

        if !resp.status().is_success() {
            let status = resp.status().as_u16();
            let body = resp.text().await.unwrap_or_default();
            return Err(GenerationError::Api { status, body });
        }

        let api_resp: ApiResponse = resp.json().await?;

        if let Some(usage) = api_resp.usage {
            debug!(
                prompt_tokens = usage.prompt_tokens,
                completion_tokens = usage.completion_tokens,
                "completion usage"
            );
        }

        Ok(api_resp
            .choices
            .into_iter()
            .next()
            .and_then(|c| c.message.content)
            .unwrap_or_default())
    }
}

// --- API types ---

#[derive(Serialize)]
struct ApiRequest<'a> {
    model: &'a str,
    messages: &'a [Message<'a>],
    temperature: f32,
    max_tokens: u32,
}

#[derive(Serialize)]
struct Message<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Deserialize)]
struct ApiResponse {
    #[serde(default)]
    choices: Vec<Choice>,
    usage: Option<Usage>,
}

#[derive(Deserialize)]
struct Choice {
    message: ChoiceMessage,
}

#[derive(Deserialize)]
struct ChoiceMessage {
    content: Option<String>,
}

#[derive(Deserialize)]
struct Usage {
    prompt_tokens: u64,
    completion_tokens: u64,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Sampling;
    use mockito::Matcher;
    use serde_json::json;

    fn request() -> CompletionRequest {
        CompletionRequest {
            system: "You are Grid.".to_string(),
            user: "What now?".to_string(),
            model: "gpt-5".to_string(),
            sampling: Sampling::new(0.6, 700),
        }
    }

    #[tokio::test]
    async fn complete_returns_first_choice() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("POST", COMPLETIONS_PATH)
            .match_header("authorization", "Bearer sk-test")
            .match_body(Matcher::PartialJson(json!({
                "model": "gpt-5",
                "max_tokens": 700,
                "messages": [
                    {"role": "system", "content": "You are Grid."},
                    {"role": "user", "content": "What now?"}
                ]
            })))
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(
                r#"{"choices":[{"message":{"role":"assistant","content":"  Ship it.  "}}],
                   "usage":{"prompt_tokens":12,"completion_tokens":3}}"#,
            )
            .create_async()
            .await;

        let generator = OpenAiGenerator::with_base_url("sk-test", server.url());
        let reply = generator.complete(&request()).await.unwrap();
        assert_eq!(reply, "  Ship it.  ");
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn missing_content_is_empty() {
        let mut server = mockito::Server::new_async().await;
        let _m = server
            .mock("POST", COMPLETIONS_PATH)
            .with_status(200)
            .with_body(r#"{"choices":[]}"#)
            .create_async()
            .await;

        let generator = OpenAiGenerator::with_base_url("sk-test", server.url());
        assert_eq!(generator.complete(&request()).await.unwrap(), "");
    }

    #[tokio::test]
    async fn api_error_carries_status_and_body() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("POST", COMPLETIONS_PATH)
            .with_status(429)
            .with_body("quota exceeded")
            .expect(1)
            .create_async()
            .await;

        let generator = OpenAiGenerator::with_base_url("sk-test", server.url());
        let err = generator.complete(&request()).await.unwrap_err();
        match err {
            GenerationError::Api { status, body } => {
                assert_eq!(status, 429);
                assert_eq!(body, "quota exceeded");
            }
            other => panic!("expected Api error, got {other:?}"),
        }
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn malformed_body_is_transport_error() {
        let mut server = mockito::Server::new_async().await;
        let _m = server
            .mock("POST", COMPLETIONS_PATH)
            .with_status(200)
            .with_body("not json")
            .create_async()
            .await;

        let generator = OpenAiGenerator::with_base_url("sk-test", server.url());
        let err = generator.complete(&request()).await.unwrap_err();
        assert!(matches!(err, GenerationError::Transport(_)));
    }

    #[test]
    fn debug_redacts_key() {
        let generator = OpenAiGenerator::new("sk-secret");
        assert!(!format!("{generator:?}").contains("sk-secret"));
    }
}
