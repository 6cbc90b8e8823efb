//! Anthropic Messages API
//!
//! System turns are lifted into the top-level `system` field.

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::time::Duration;

use supplyscope::{
    ChatMessage, CompletionOptions, CompletionResponse, DomainError, LlmProvider,
    LlmProviderKind, MessageRole, TokenUsage,
};

const ANTHROPIC_API_URL: &str = "https://api.anthropic.com/v1/messages";
const ANTHROPIC_VERSION: &str = "2023-06-01";
const ANTHROPIC_MODEL: &str = "claude-3-5-haiku-20241022";
/// The API requires `max_tokens`
const DEFAULT_MAX_TOKENS: u32 = 1024;

#[derive(Debug, Serialize)]
struct MessagesRequest<'a> {
    model: &'a str,
    max_tokens: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    system: Option<String>,
    messages: Vec<&'a ChatMessage>,
    #[serde(skip_serializing_if = "Option::is_none")]
    temperature: Option<f32>,
}

#[derive(Debug, Deserialize)]
struct MessagesResponse {
    #[serde(default)]
    model: Option<String>,
    #[serde(default)]
    content: Vec<ContentBlock>,
    #[serde(default)]
    stop_reason: Option<String>,
    #[serde(default)]
    usage: Option<Usage>,
}

#[derive(Debug, Deserialize)]
struct ContentBlock {
    #[serde(rename = "type")]
    kind: String,
    #[serde(default)]
    text: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
struct Usage {
    #[serde(default)]
    input_tokens: u32,
    #[serde(default)]
    output_tokens: u32,
}

pub struct AnthropicProvider {
    client: Client,
    api_key: String,
    endpoint: String,
    model: String,
    timeout: Duration,
}

impl AnthropicProvider {
    pub fn new(client: Client, api_key: impl Into<String>, timeout: Duration) -> Self {
        Self::with_endpoint(client, api_key, ANTHROPIC_API_URL, timeout)
    }

    pub fn with_endpoint(
        client: Client,
        api_key: impl Into<String>,
        endpoint: impl Into<String>,
        timeout: Duration,
    ) -> Self {
        Self {
            client,
            api_key: api_key.into(),
            endpoint: endpoint.into(),
            model: ANTHROPIC_MODEL.to_string(),
            timeout,
        }
    }
}

fn build_request<'a>(
    model: &'a str,
    messages: &'a [ChatMessage],
    options: &CompletionOptions,
) -> MessagesRequest<'a> {
    let system: Vec<&str> = messages
        .iter()
        .filter(|m| m.role == MessageRole::System)
        .map(|m| m.content.as_str())
        .collect();

    MessagesRequest {
        model,
        max_tokens: options.max_tokens.unwrap_or(DEFAULT_MAX_TOKENS),
        system: (!system.is_empty()).then(|| system.join("\n\n")),
        messages: messages
            .iter()
            .filter(|m| m.role != MessageRole::System)
            .collect(),
        temperature: options.temperature,
    }
}

#[async_trait]
impl LlmProvider for AnthropicProvider {
    async fn complete(
        &self,
        messages: &[ChatMessage],
        options: &CompletionOptions,
    ) -> Result<CompletionResponse, DomainError> {
        let request = build_request(&self.model, messages, options);

        let response = self
            .client
            .post(&self.endpoint)
            .header("x-api-key", &self.api_key)
            .header("anthropic-version", ANTHROPIC_VERSION)
            .json(&request)
            .timeout(self.timeout)
            .send()
            .await
            .map_err(|e| DomainError::external(self.provider_name(), e))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(DomainError::external(
                self.provider_name(),
                format!("status {}: {}", status, body),
            ));
        }

        let body: MessagesResponse = response
            .json()
            .await
            .map_err(|e| DomainError::parse(self.provider_name(), e))?;

        Ok(into_response(body, &self.model))
    }

    fn kind(&self) -> LlmProviderKind {
        LlmProviderKind::Anthropic
    }

    fn model_id(&self) -> String {
        self.model.clone()
    }
}

fn into_response(body: MessagesResponse, requested_model: &str) -> CompletionResponse {
    let content = body
        .content
        .into_iter()
        .filter(|block| block.kind == "text")
        .filter_map(|block| block.text)
        .collect::<Vec<_>>()
        .join("");
    let usage = body.usage.unwrap_or_default();

    CompletionResponse {
        content,
        model: body.model.unwrap_or_else(|| requested_model.to_string()),
        usage: TokenUsage {
            prompt_tokens: usage.input_tokens,
            completion_tokens: usage.output_tokens,
            total_tokens: usage.input_tokens + usage.output_tokens,
        },
        finish_reason: body.stop_reason,
    }
}
