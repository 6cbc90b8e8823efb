//! OpenAI-compatible chat completions (OpenAI, Groq)

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::time::Duration;

use supplyscope::{
    ChatMessage, CompletionOptions, CompletionResponse, DomainError, LlmProvider,
    LlmProviderKind, TokenUsage,
};

const GROQ_API_URL: &str = "https://api.groq.com/openai/v1/chat/completions";
const GROQ_MODEL: &str = "llama-3.3-70b-versatile";
const OPENAI_API_URL: &str = "https://api.openai.com/v1/chat/completions";
const OPENAI_MODEL: &str = "gpt-4o-mini";

#[derive(Debug, Serialize)]
struct ChatCompletionRequest<'a> {
    model: &'a str,
    messages: &'a [ChatMessage],
    #[serde(skip_serializing_if = "Option::is_none")]
    temperature: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    max_tokens: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    response_format: Option<ResponseFormat>,
}

#[derive(Debug, Serialize)]
struct ResponseFormat {
    #[serde(rename = "type")]
    kind: &'static str,
}

#[derive(Debug, Deserialize)]
struct ChatCompletion {
    #[serde(default)]
    model: Option<String>,
    #[serde(default)]
    choices: Vec<Choice>,
    #[serde(default)]
    usage: Option<Usage>,
}

#[derive(Debug, Deserialize)]
struct Choice {
    message: ChoiceMessage,
    #[serde(default)]
    finish_reason: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ChoiceMessage {
    #[serde(default)]
    content: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
struct Usage {
    #[serde(default)]
    prompt_tokens: u32,
    #[serde(default)]
    completion_tokens: u32,
    #[serde(default)]
    total_tokens: u32,
}

/// Provider speaking the `/chat/completions` protocol
pub struct OpenAiCompatibleProvider {
    client: Client,
    kind: LlmProviderKind,
    api_key: String,
    endpoint: String,
    model: String,
    timeout: Duration,
}

impl OpenAiCompatibleProvider {
    pub fn groq(client: Client, api_key: impl Into<String>, timeout: Duration) -> Self {
        Self::new(
            client,
            LlmProviderKind::Groq,
            api_key,
            GROQ_API_URL,
            GROQ_MODEL,
            timeout,
        )
    }

    pub fn openai(client: Client, api_key: impl Into<String>, timeout: Duration) -> Self {
        Self::new(
            client,
            LlmProviderKind::OpenAI,
            api_key,
            OPENAI_API_URL,
            OPENAI_MODEL,
            timeout,
        )
    }

    pub fn new(
        client: Client,
        kind: LlmProviderKind,
        api_key: impl Into<String>,
        endpoint: impl Into<String>,
        model: impl Into<String>,
        timeout: Duration,
    ) -> Self {
        Self {
            client,
            kind,
            api_key: api_key.into(),
            endpoint: endpoint.into(),
            model: model.into(),
            timeout,
        }
    }
}

#[async_trait]
impl LlmProvider for OpenAiCompatibleProvider {
    async fn complete(
        &self,
        messages: &[ChatMessage],
        options: &CompletionOptions,
    ) -> Result<CompletionResponse, DomainError> {
        let request = ChatCompletionRequest {
            model: &self.model,
            messages,
            temperature: options.temperature,
            max_tokens: options.max_tokens,
            response_format: options.json_mode.then_some(ResponseFormat {
                kind: "json_object",
            }),
        };

        let response = self
            .client
            .post(&self.endpoint)
            .bearer_auth(&self.api_key)
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

        let completion: ChatCompletion = response
            .json()
            .await
            .map_err(|e| DomainError::parse(self.provider_name(), e))?;

        into_response(completion, &self.model)
            .ok_or_else(|| DomainError::parse(self.provider_name(), "response has no choices"))
    }

    fn kind(&self) -> LlmProviderKind {
        self.kind
    }

    fn model_id(&self) -> String {
        self.model.clone()
    }
}

fn into_response(completion: ChatCompletion, requested_model: &str) -> Option<CompletionResponse> {
    let choice = completion.choices.into_iter().next()?;
    let usage = completion.usage.unwrap_or_default();
    Some(CompletionResponse {
        content: choice.message.content.unwrap_or_default(),
        model: completion
            .model
            .unwrap_or_else(|| requested_model.to_string()),
        usage: TokenUsage {
            prompt_tokens: usage.prompt_tokens,
            completion_tokens: usage.completion_tokens,
            total_tokens: usage.total_tokens,
        },
        finish_reason: choice.finish_reason,
    })
}
