/// LLM Client: the single point of entry for all OpenAI API calls.
///
/// ARCHITECTURAL RULE: No other module may call the completions API directly.
///
/// One attempt per call, no retries. A failure here is recovered by the
/// keyword fallback, so latency stays bounded by `LLM_TIMEOUT`.
use std::time::Duration;

use reqwest::Client;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

pub mod prompts;
#[cfg(test)]
pub(crate) mod test_support;

const OPENAI_COMPLETIONS_URL: &str = "https://api.openai.com/v1/completions";
/// The completion model used for resume analysis.
pub const MODEL: &str = "gpt-3.5-turbo-instruct";
const MAX_TOKENS: u32 = 800;
const TEMPERATURE: f32 = 0.2;
/// Upper bound on a whole completion round-trip. 800 tokens finish well inside it.
pub const LLM_TIMEOUT: Duration = Duration::from_secs(30);
const CONNECT_TIMEOUT: Duration = Duration::from_secs(10);

#[derive(Debug, Error)]
pub enum LlmError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("API error (status {status}): {message}")]
    Api { status: u16, message: String },

    #[error("LLM returned empty content")]
    EmptyContent,
}

#[derive(Debug, Serialize)]
struct CompletionRequest<'a> {
    model: &'a str,
    prompt: &'a str,
    max_tokens: u32,
    temperature: f32,
    top_p: f32,
    frequency_penalty: f32,
    presence_penalty: f32,
}

#[derive(Debug, Deserialize)]
pub struct LlmResponse {
    pub choices: Vec<Choice>,
    #[serde(default)]
    pub usage: Option<Usage>,
}

#[derive(Debug, Deserialize)]
pub struct Choice {
    pub text: String,
}

#[derive(Debug, Deserialize)]
pub struct Usage {
    pub prompt_tokens: u32,
    pub completion_tokens: u32,
}

impl LlmResponse {
    /// Text of the first choice, trimmed. `None` when the model produced nothing.
    pub fn text(&self) -> Option<&str> {
        self.choices
            .first()
            .map(|c| c.text.trim())
            .filter(|t| !t.is_empty())
    }
}

#[derive(Debug, Deserialize)]
struct OpenAiError {
    error: OpenAiErrorBody,
}

#[derive(Debug, Deserialize)]
struct OpenAiErrorBody {
    message: String,
}

#[derive(Clone)]
pub struct LlmClient {
    client: Client,
    api_key: String,
    endpoint: String,
}

impl LlmClient {
    pub fn new(api_key: String) -> Result<Self, LlmError> {
        Self::with_endpoint(api_key, OPENAI_COMPLETIONS_URL.to_string())
    }

    pub fn with_endpoint(api_key: String, endpoint: String) -> Result<Self, LlmError> {
        let client = Client::builder()
            .timeout(LLM_TIMEOUT)
            .connect_timeout(CONNECT_TIMEOUT)
            .build()?;

        Ok(Self {
            client,
            api_key,
            endpoint,
        })
    }

    /// Sends a single completion request and returns the decoded response.
    pub async fn complete(&self, prompt: &str) -> Result<LlmResponse, LlmError> {
        let request_body = CompletionRequest {
            model: MODEL,
            prompt,
            max_tokens: MAX_TOKENS,
            temperature: TEMPERATURE,
            top_p: 1.0,
            frequency_penalty: 0.0,
            presence_penalty: 0.0,
        };

        let response = self
            .client
            .post(&self.endpoint)
            .bearer_auth(&self.api_key)
            .json(&request_body)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            let message = serde_json::from_str::<OpenAiError>(&body)
                .map(|e| e.error.message)
                .unwrap_or(body);
            return Err(LlmError::Api {
                status: status.as_u16(),
                message,
            });
        }

        let llm_response: LlmResponse = response.json().await?;

        if let Some(usage) = &llm_response.usage {
            debug!(
                "LLM call succeeded: prompt_tokens={}, completion_tokens={}",
                usage.prompt_tokens, usage.completion_tokens
            );
        }

        Ok(llm_response)
    }
}

/// Strips ```json ... ``` or ``` ... ``` code fences from LLM output.
pub fn strip_json_fences(text: &str) -> &str {
    let text = text.trim();
    if let Some(stripped) = text.strip_prefix("```json") {
        stripped
            .trim_start()
            .strip_suffix("```")
            .map(|s| s.trim())
            .unwrap_or(stripped.trim_start())
    } else if let Some(stripped) = text.strip_prefix("```") {
        stripped
            .trim_start()
            .strip_suffix("```")
            .map(|s| s.trim())
            .unwrap_or(stripped.trim_start())
    } else {
        text
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::StatusCode;

    #[test]
    fn test_strip_json_fences_with_json_tag() {
        let input = "```json\n{\"key\": \"value\"}\n```";
        assert_eq!(strip_json_fences(input), "{\"key\": \"value\"}");
    }

    #[test]
    fn test_strip_json_fences_without_tag() {
        let input = "```\n{\"key\": \"value\"}\n```";
        assert_eq!(strip_json_fences(input), "{\"key\": \"value\"}");
    }

    #[test]
    fn test_strip_json_fences_no_fences() {
        let input = "{\"key\": \"value\"}";
        assert_eq!(strip_json_fences(input), "{\"key\": \"value\"}");
    }

    #[test]
    fn test_response_text_takes_first_choice_trimmed() {
        let response: LlmResponse = serde_json::from_str(
            r#"{"choices": [{"text": "\n\n{\"a\": 1}\n"}, {"text": "ignored"}],
                "usage": {"prompt_tokens": 10, "completion_tokens": 5, "total_tokens": 15}}"#,
        )
        .unwrap();
        assert_eq!(response.text(), Some("{\"a\": 1}"));
        assert_eq!(response.usage.unwrap().completion_tokens, 5);
    }

    #[test]
    fn test_response_text_empty_is_none() {
        let response: LlmResponse =
            serde_json::from_str(r#"{"choices": [{"text": "   \n"}]}"#).unwrap();
        assert!(response.text().is_none());

        let response: LlmResponse = serde_json::from_str(r#"{"choices": []}"#).unwrap();
        assert!(response.text().is_none());
    }

    #[test]
    fn test_request_body_carries_sampling_parameters() {
        let body = serde_json::to_value(CompletionRequest {
            model: MODEL,
            prompt: "hi",
            max_tokens: MAX_TOKENS,
            temperature: TEMPERATURE,
            top_p: 1.0,
            frequency_penalty: 0.0,
            presence_penalty: 0.0,
        })
        .unwrap();
        assert_eq!(body["model"], "gpt-3.5-turbo-instruct");
        assert_eq!(body["max_tokens"], 800);
        assert_eq!(body["prompt"], "hi");
    }

    #[tokio::test]
    async fn test_unreachable_endpoint_is_an_http_error() {
        let client =
            LlmClient::with_endpoint("sk-test".to_string(), test_support::closed_endpoint())
                .unwrap();
        let result = client.complete("hello").await;
        assert!(matches!(result, Err(LlmError::Http(_))));
    }

    #[tokio::test]
    async fn test_success_body_is_decoded() {
        let endpoint = test_support::serve_completions(
            StatusCode::OK,
            r#"{"choices": [{"text": " {\"ok\": true} "}],
                "usage": {"prompt_tokens": 12, "completion_tokens": 4, "total_tokens": 16}}"#,
        )
        .await;
        let client = LlmClient::with_endpoint("sk-test".to_string(), endpoint).unwrap();

        let response = client.complete("hello").await.unwrap();
        assert_eq!(response.text(), Some("{\"ok\": true}"));
    }

    #[tokio::test]
    async fn test_openai_error_message_is_extracted() {
        let endpoint = test_support::serve_completions(
            StatusCode::UNAUTHORIZED,
            r#"{"error": {"message": "Incorrect API key", "type": "invalid_request_error"}}"#,
        )
        .await;
        let client = LlmClient::with_endpoint("sk-bad".to_string(), endpoint).unwrap();

        match client.complete("hello").await {
            Err(LlmError::Api { status, message }) => {
                assert_eq!(status, 401);
                assert_eq!(message, "Incorrect API key");
            }
            other => panic!("expected an API error, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_non_json_error_body_is_kept_verbatim() {
        let endpoint =
            test_support::serve_completions(StatusCode::BAD_GATEWAY, "upstream unavailable").await;
        let client = LlmClient::with_endpoint("sk-test".to_string(), endpoint).unwrap();

        match client.complete("hello").await {
            Err(LlmError::Api { status, message }) => {
                assert_eq!(status, 502);
                assert_eq!(message, "upstream unavailable");
            }
            other => panic!("expected an API error, got {other:?}"),
        }
    }
}
