//! Ollama local model server
//!
//! Candidate base URLs are tried in order with `GET /api/tags`; the first
//! reachable server with a usable model serves `POST /api/chat`.

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::time::Duration;

use supplyscope::{
    ChatMessage, CompletionOptions, CompletionResponse, DomainError, LlmProvider,
    LlmProviderKind, ProviderHealth, ProviderLocality, TokenUsage,
};

const TAGS_TIMEOUT: Duration = Duration::from_secs(3);

#[derive(Debug, Deserialize)]
struct TagsResponse {
    #[serde(default)]
    models: Vec<ModelTag>,
}

#[derive(Debug, Deserialize)]
struct ModelTag {
    name: String,
}

#[derive(Debug, Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: &'a [ChatMessage],
    stream: bool,
    options: GenerateOptions,
}

#[derive(Debug, Serialize)]
struct GenerateOptions {
    #[serde(skip_serializing_if = "Option::is_none")]
    temperature: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    num_predict: Option<u32>,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    #[serde(default)]
    model: Option<String>,
    message: ResponseMessage,
    #[serde(default)]
    done_reason: Option<String>,
    #[serde(default)]
    prompt_eval_count: u32,
    #[serde(default)]
    eval_count: u32,
}

#[derive(Debug, Deserialize)]
struct ResponseMessage {
    #[serde(default)]
    content: String,
}

pub struct OllamaProvider {
    client: Client,
    base_urls: Vec<String>,
    preferred_models: Vec<String>,
    timeout: Duration,
}

impl OllamaProvider {
    pub fn new(
        client: Client,
        base_urls: Vec<String>,
        preferred_models: Vec<String>,
        timeout: Duration,
    ) -> Self {
        Self {
            client,
            base_urls: base_urls
                .into_iter()
                .map(|url| url.trim_end_matches('/').to_string())
                .collect(),
            preferred_models,
            timeout,
        }
    }

    /// Installed model names of one server
    async fn list_models(&self, base_url: &str) -> Result<Vec<String>, DomainError> {
        let response = self
            .client
            .get(format!("{}/api/tags", base_url))
            .timeout(TAGS_TIMEOUT)
            .send()
            .await
            .map_err(|e| DomainError::external(base_url, e))?;

        if !response.status().is_success() {
            return Err(DomainError::external(
                base_url,
                format!("status {}", response.status()),
            ));
        }

        let tags: TagsResponse = response
            .json()
            .await
            .map_err(|e| DomainError::parse(base_url, e))?;
        Ok(tags.models.into_iter().map(|m| m.name).collect())
    }

    async fn chat(
        &self,
        base_url: &str,
        model: &str,
        messages: &[ChatMessage],
        options: &CompletionOptions,
    ) -> Result<CompletionResponse, DomainError> {
        let request = ChatRequest {
            model,
            messages,
            stream: false,
            options: GenerateOptions {
                temperature: options.temperature,
                num_predict: options.max_tokens,
            },
        };

        let response = self
            .client
            .post(format!("{}/api/chat", base_url))
            .json(&request)
            .timeout(self.timeout)
            .send()
            .await
            .map_err(|e| DomainError::external(base_url, e))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(DomainError::external(
                base_url,
                format!("status {}: {}", status, body),
            ));
        }

        let body: ChatResponse = response
            .json()
            .await
            .map_err(|e| DomainError::parse(base_url, e))?;

        Ok(CompletionResponse {
            content: body.message.content,
            model: body.model.unwrap_or_else(|| model.to_string()),
            usage: TokenUsage {
                prompt_tokens: body.prompt_eval_count,
                completion_tokens: body.eval_count,
                total_tokens: body.prompt_eval_count + body.eval_count,
            },
            finish_reason: body.done_reason,
        })
    }
}

/// First installed model matching a preference (substring), else the first installed
pub(crate) fn select_model(available: &[String], preferred: &[String]) -> Option<String> {
    preferred
        .iter()
        .find_map(|want| available.iter().find(|name| name.contains(want.as_str())))
        .or_else(|| available.first())
        .cloned()
}

#[async_trait]
impl LlmProvider for OllamaProvider {
    async fn complete(
        &self,
        messages: &[ChatMessage],
        options: &CompletionOptions,
    ) -> Result<CompletionResponse, DomainError> {
        for base_url in &self.base_urls {
            tracing::info!("🦙 Trying Ollama at {}", base_url);

            let models = match self.list_models(base_url).await {
                Ok(models) => models,
                Err(e) => {
                    tracing::warn!("⚠️  Ollama unreachable: {}", e);
                    continue;
                }
            };
            let Some(model) = select_model(&models, &self.preferred_models) else {
                tracing::warn!("⚠️  Ollama at {} has no models installed", base_url);
                continue;
            };

            tracing::info!("🦙 Using model {} at {}", model, base_url);
            match self.chat(base_url, &model, messages, options).await {
                Ok(response) => return Ok(response),
                Err(e) => tracing::warn!("⚠️  Ollama chat failed: {}", e),
            }
        }

        Err(DomainError::external(
            self.provider_name(),
            "no reachable server with a usable model",
        ))
    }

    fn kind(&self) -> LlmProviderKind {
        LlmProviderKind::Ollama
    }

    /// Models are chosen per server at call time; reports the top preference
    fn model_id(&self) -> String {
        self.preferred_models
            .first()
            .cloned()
            .unwrap_or_else(|| "auto".to_string())
    }

    fn locality(&self) -> ProviderLocality {
        ProviderLocality::Local
    }

    async fn health_check(&self) -> Result<ProviderHealth, DomainError> {
        for base_url in &self.base_urls {
            if let Ok(models) = self.list_models(base_url).await {
                return Ok(ProviderHealth {
                    endpoint: Some(base_url.clone()),
                    models,
                });
            }
        }
        Err(DomainError::Unavailable(format!(
            "no Ollama server reachable at {}",
            self.base_urls.join(", ")
        )))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn names(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_select_preferred_model() {
        let available = names(&["llama3.2:3b", "qwen3-coder:30b", "qwen3:30b-a3b"]);
        let preferred = names(&["qwen3:30b-a3b", "qwen3-coder:30b"]);
        assert_eq!(
            select_model(&available, &preferred).as_deref(),
            Some("qwen3:30b-a3b")
        );
    }

    #[test]
    fn test_select_by_substring() {
        let available = names(&["library/deepseek-r1:8b-0528-qwen3-q8_0"]);
        let preferred = names(&["deepseek-r1:8b-0528-qwen3-q8_0"]);
        assert_eq!(
            select_model(&available, &preferred).as_deref(),
            Some("library/deepseek-r1:8b-0528-qwen3-q8_0")
        );
    }

    #[test]
    fn test_select_falls_back_to_first() {
        let available = names(&["mistral:7b", "phi3:mini"]);
        assert_eq!(
            select_model(&available, &names(&["qwen3:30b-a3b"])).as_deref(),
            Some("mistral:7b")
        );
        assert_eq!(select_model(&[], &names(&["qwen3:30b-a3b"])), None);
    }

    #[test]
    fn test_chat_request_shape() {
        let messages = vec![ChatMessage::user("Analyze")];
        let request = ChatRequest {
            model: "qwen3:30b-a3b",
            messages: &messages,
            stream: false,
            options: GenerateOptions {
                temperature: Some(0.7),
                num_predict: Some(800),
            },
        };
        let value = serde_json::to_value(&request).unwrap();
        assert_eq!(value["stream"], false);
        assert_eq!(value["options"]["num_predict"], 800);
        assert_eq!(value["messages"][0]["role"], "user");
    }

    #[test]
    fn test_base_urls_normalized() {
        let provider = OllamaProvider::new(
            Client::new(),
            names(&["http://localhost:11434/"]),
            vec![],
            Duration::from_secs(1),
        );
        assert_eq!(provider.base_urls, vec!["http://localhost:11434"]);
        assert_eq!(provider.model_id(), "auto");
        assert_eq!(provider.locality(), ProviderLocality::Local);
    }

    #[tokio::test]
    async fn test_unreachable_servers() {
        // Port 9 (discard) on loopback refuses connections
        let provider = OllamaProvider::new(
            Client::new(),
            names(&["http://127.0.0.1:9"]),
            vec![],
            Duration::from_secs(1),
        );
        assert!(provider.health_check().await.is_err());
        let err = provider
            .complete(&[ChatMessage::user("hi")], &CompletionOptions::default())
            .await
            .unwrap_err();
        assert!(matches!(err, DomainError::ExternalService(_)));
    }
}
