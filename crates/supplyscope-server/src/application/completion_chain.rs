//! Completion Chain (Use Case)
//!
//! Ordered text generation providers. The first provider producing a usable
//! answer wins; a failing or timing-out provider never blocks the next one.

use std::sync::Arc;

use supplyscope::domain::services::completion_text;
use supplyscope::{ChatMessage, CompletionOptions, DomainError, LlmProvider};

/// A completion together with the provider that produced it
#[derive(Debug, Clone, PartialEq)]
pub struct Completion<T = String> {
    pub value: T,
    pub provider: String,
    pub model: String,
}

#[derive(Clone, Default)]
pub struct CompletionChain {
    providers: Vec<Arc<dyn LlmProvider>>,
}

impl CompletionChain {
    pub fn new(providers: Vec<Arc<dyn LlmProvider>>) -> Self {
        Self { providers }
    }

    pub fn is_empty(&self) -> bool {
        self.providers.is_empty()
    }

    pub fn provider_names(&self) -> Vec<String> {
        self.providers.iter().map(|p| p.provider_name()).collect()
    }

    /// First non-empty completion, thinking traces removed
    pub async fn complete(
        &self,
        messages: &[ChatMessage],
        options: &CompletionOptions,
    ) -> Result<Completion, DomainError> {
        self.complete_parsed(messages, options, |text| Some(text.to_string()))
            .await
    }

    /// First completion that `parse` accepts. A provider whose answer cannot be
    /// parsed counts as failed and the next one is tried.
    pub async fn complete_parsed<T, F>(
        &self,
        messages: &[ChatMessage],
        options: &CompletionOptions,
        parse: F,
    ) -> Result<Completion<T>, DomainError>
    where
        F: Fn(&str) -> Option<T> + Send + Sync,
        T: Send,
    {
        if self.providers.is_empty() {
            return Err(DomainError::NotConfigured(
                "no text generation provider configured".to_string(),
            ));
        }

        for provider in &self.providers {
            let name = provider.provider_name();
            tracing::info!("🤖 Calling {} ({})", name, provider.model_id());

            let response = match provider.complete(messages, options).await {
                Ok(response) => response,
                Err(e) => {
                    tracing::warn!("⚠️  {} failed: {}", name, e);
                    continue;
                }
            };

            let text = completion_text::strip_thinking(&response.content);
            if text.is_empty() {
                tracing::warn!("⚠️  {} returned an empty completion", name);
                continue;
            }

            match parse(&text) {
                Some(value) => {
                    tracing::info!(
                        "✅ {} answered ({} tokens)",
                        name,
                        response.usage.total_tokens
                    );
                    return Ok(Completion {
                        value,
                        provider: name,
                        model: response.model,
                    });
                }
                None => tracing::warn!("⚠️  {} returned an unusable completion", name),
            }
        }

        Err(DomainError::Unavailable(format!(
            "all {} text generation providers failed",
            self.providers.len()
        )))
    }
}

#[cfg(test)]
pub(crate) mod testing {
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::{Arc, Mutex};

    use supplyscope::{
        ChatMessage, CompletionOptions, CompletionResponse, DomainError, LlmProvider,
        LlmProviderKind, ProviderHealth, ProviderLocality,
    };

    /// Scripted text generation provider that records the prompts it receives
    pub struct FakeLlm {
        kind: LlmProviderKind,
        outcome: Result<String, String>,
        calls: AtomicUsize,
        pub last_messages: Mutex<Vec<ChatMessage>>,
    }

    impl FakeLlm {
        pub fn answering(kind: LlmProviderKind, answer: &str) -> Arc<Self> {
            Arc::new(Self {
                kind,
                outcome: Ok(answer.to_string()),
                calls: AtomicUsize::new(0),
                last_messages: Mutex::new(Vec::new()),
            })
        }

        pub fn failing(kind: LlmProviderKind) -> Arc<Self> {
            Arc::new(Self {
                kind,
                outcome: Err("request timed out".to_string()),
                calls: AtomicUsize::new(0),
                last_messages: Mutex::new(Vec::new()),
            })
        }

        pub fn call_count(&self) -> usize {
            self.calls.load(Ordering::SeqCst)
        }

        pub fn messages(&self) -> Vec<ChatMessage> {
            self.last_messages.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl LlmProvider for FakeLlm {
        async fn complete(
            &self,
            messages: &[ChatMessage],
            _options: &CompletionOptions,
        ) -> Result<CompletionResponse, DomainError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            *self.last_messages.lock().unwrap() = messages.to_vec();
            match &self.outcome {
                Ok(answer) => Ok(CompletionResponse::new(answer.as_str(), "fake-model")),
                Err(e) => Err(DomainError::external(self.kind.to_string(), e)),
            }
        }

        fn kind(&self) -> LlmProviderKind {
            self.kind
        }

        fn model_id(&self) -> String {
            "fake-model".to_string()
        }

        fn locality(&self) -> ProviderLocality {
            match self.kind {
                LlmProviderKind::Ollama => ProviderLocality::Local,
                _ => ProviderLocality::Cloud,
            }
        }

        async fn health_check(&self) -> Result<ProviderHealth, DomainError> {
            match &self.outcome {
                Ok(_) => Ok(ProviderHealth {
                    endpoint: Some("http://127.0.0.1:11434".to_string()),
                    models: vec!["fake-model".to_string()],
                }),
                Err(e) => Err(DomainError::Unavailable(e.clone())),
            }
        }
    }

    pub fn chain(fakes: Vec<Arc<FakeLlm>>) -> super::CompletionChain {
        super::CompletionChain::new(
            fakes
                .into_iter()
                .map(|f| f as Arc<dyn LlmProvider>)
                .collect(),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::testing::{chain, FakeLlm};
    use super::*;
    use supplyscope::LlmProviderKind;

    fn prompt() -> Vec<ChatMessage> {
        vec![ChatMessage::user("Describe Acme Corp")]
    }

    #[tokio::test]
    async fn test_first_success_wins() {
        let groq = FakeLlm::answering(LlmProviderKind::Groq, "Acme makes anvils.");
        let openai = FakeLlm::answering(LlmProviderKind::OpenAI, "unused");
        let chain = chain(vec![groq.clone(), openai.clone()]);

        let completion = chain
            .complete(&prompt(), &CompletionOptions::default())
            .await
            .unwrap();
        assert_eq!(completion.value, "Acme makes anvils.");
        assert_eq!(completion.provider, "groq");
        assert_eq!(openai.call_count(), 0);
    }

    #[tokio::test]
    async fn test_failure_falls_through() {
        let groq = FakeLlm::failing(LlmProviderKind::Groq);
        let ollama = FakeLlm::answering(LlmProviderKind::Ollama, "local answer");
        let chain = chain(vec![groq.clone(), ollama.clone()]);

        let completion = chain
            .complete(&prompt(), &CompletionOptions::default())
            .await
            .unwrap();
        assert_eq!(completion.provider, "ollama");
        assert_eq!(groq.call_count(), 1);
        assert_eq!(ollama.call_count(), 1);
    }

    #[tokio::test]
    async fn test_thinking_only_counts_as_empty() {
        let thinker = FakeLlm::answering(LlmProviderKind::Ollama, "<think>hmm</think>  ");
        let backup = FakeLlm::answering(LlmProviderKind::Anthropic, "<think>ok</think>Answer");
        let chain = chain(vec![thinker, backup]);

        let completion = chain
            .complete(&prompt(), &CompletionOptions::default())
            .await
            .unwrap();
        assert_eq!(completion.value, "Answer");
        assert_eq!(completion.provider, "anthropic");
    }

    #[tokio::test]
    async fn test_unparseable_answer_tries_next() {
        let chatty = FakeLlm::answering(LlmProviderKind::Anthropic, "Sorry, no JSON today");
        let precise = FakeLlm::answering(LlmProviderKind::OpenAI, "{\"industry\": \"Chemicals\"}");
        let chain = chain(vec![chatty, precise]);

        let completion = chain
            .complete_parsed(&prompt(), &CompletionOptions::default(), |text| {
                serde_json::from_str::<serde_json::Value>(text).ok()
            })
            .await
            .unwrap();
        assert_eq!(completion.value["industry"], "Chemicals");
        assert_eq!(completion.provider, "openai");
    }

    #[tokio::test]
    async fn test_no_providers_is_not_configured() {
        let err = CompletionChain::default()
            .complete(&prompt(), &CompletionOptions::default())
            .await
            .unwrap_err();
        assert!(matches!(err, DomainError::NotConfigured(_)));
    }

    #[tokio::test]
    async fn test_all_failing_is_unavailable() {
        let chain = chain(vec![
            FakeLlm::failing(LlmProviderKind::Groq),
            FakeLlm::failing(LlmProviderKind::Ollama),
        ]);
        let err = chain
            .complete(&prompt(), &CompletionOptions::default())
            .await
            .unwrap_err();
        assert!(matches!(err, DomainError::Unavailable(_)));
    }
}
