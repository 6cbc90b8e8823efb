//! Status Application Service (Use Case)
//!
//! Reports which AI backend the dashboard is talking to. Keyed cloud
//! providers count as online without a network call; otherwise the local
//! model server is queried.

use std::sync::Arc;

use supplyscope::{LlmProvider, LlmProviderKind, ProviderLocality};

#[derive(Debug, Clone, PartialEq)]
pub enum AiStatus {
    /// Cloud providers with an API key, in display order
    Cloud { providers: Vec<String> },
    /// A reachable local model server
    Local {
        provider: String,
        url: Option<String>,
        models: Vec<String>,
    },
    Offline,
}

pub struct StatusService {
    cloud: Vec<LlmProviderKind>,
    local: Vec<Arc<dyn LlmProvider>>,
}

impl StatusService {
    /// `providers` may mix kinds; only local ones are queried
    pub fn new(cloud: Vec<LlmProviderKind>, providers: Vec<Arc<dyn LlmProvider>>) -> Self {
        let local = providers
            .into_iter()
            .filter(|p| p.locality() == ProviderLocality::Local)
            .collect();
        Self { cloud, local }
    }

    pub async fn check(&self) -> AiStatus {
        if !self.cloud.is_empty() {
            return AiStatus::Cloud {
                providers: self.cloud.iter().map(|k| k.label().to_string()).collect(),
            };
        }

        for provider in &self.local {
            match provider.health_check().await {
                Ok(health) => {
                    return AiStatus::Local {
                        provider: provider.kind().label().to_string(),
                        url: health.endpoint,
                        models: health.models,
                    }
                }
                Err(e) => tracing::info!("💤 {} not reachable: {}", provider.provider_name(), e),
            }
        }
        AiStatus::Offline
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::completion_chain::testing::FakeLlm;

    fn providers(fakes: Vec<Arc<FakeLlm>>) -> Vec<Arc<dyn LlmProvider>> {
        fakes
            .into_iter()
            .map(|f| f as Arc<dyn LlmProvider>)
            .collect()
    }

    #[tokio::test]
    async fn test_cloud_keys_win_without_network_call() {
        let local = FakeLlm::answering(LlmProviderKind::Ollama, "");
        let service = StatusService::new(
            vec![LlmProviderKind::Groq, LlmProviderKind::Anthropic],
            providers(vec![local.clone()]),
        );
        assert_eq!(
            service.check().await,
            AiStatus::Cloud {
                providers: vec!["Groq".to_string(), "Anthropic".to_string()]
            }
        );
        assert_eq!(local.call_count(), 0);
    }

    #[tokio::test]
    async fn test_local_server_reported() {
        let service = StatusService::new(
            vec![],
            providers(vec![
                FakeLlm::answering(LlmProviderKind::Groq, ""),
                FakeLlm::failing(LlmProviderKind::Ollama),
                FakeLlm::answering(LlmProviderKind::Ollama, ""),
            ]),
        );
        match service.check().await {
            AiStatus::Local {
                provider,
                url,
                models,
            } => {
                assert_eq!(provider, "Ollama");
                assert_eq!(url.as_deref(), Some("http://127.0.0.1:11434"));
                assert_eq!(models, vec!["fake-model"]);
            }
            other => panic!("unexpected status {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_offline() {
        let unreachable = StatusService::new(
            vec![],
            providers(vec![FakeLlm::failing(LlmProviderKind::Ollama)]),
        );
        assert_eq!(unreachable.check().await, AiStatus::Offline);
        assert_eq!(StatusService::new(vec![], vec![]).check().await, AiStatus::Offline);

        // a cloud provider is never queried for local status
        let cloud_only = StatusService::new(
            vec![],
            providers(vec![FakeLlm::answering(LlmProviderKind::OpenAI, "")]),
        );
        assert_eq!(cloud_only.check().await, AiStatus::Offline);
    }
}
