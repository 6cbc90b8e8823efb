//! Infrastructure Adapters
//!
//! Implementations of domain ports for external providers, and the factories
//! turning configuration into ordered provider lists.

pub mod llm;
pub mod search;

#[cfg(test)]
pub(crate) mod testing;

use reqwest::Client;
use std::sync::Arc;

use supplyscope::{LlmProvider, LlmProviderKind, SearchProviderKind, WebSearchService};

use crate::config::AppConfig;

// Re-exports
pub use llm::{AnthropicProvider, OllamaProvider, OpenAiCompatibleProvider};
pub use search::{BraveSearch, DuckDuckGoSearch, GoogleNewsSearch};

/// Search providers in configured order; keyed providers without a key are skipped
pub fn search_providers(config: &AppConfig, client: &Client) -> Vec<Arc<dyn WebSearchService>> {
    let timeout = config.search_timeout;
    config
        .search_providers
        .iter()
        .filter_map(|kind| -> Option<Arc<dyn WebSearchService>> {
            match kind {
                SearchProviderKind::GoogleNews => {
                    Some(Arc::new(GoogleNewsSearch::new(client.clone(), timeout)))
                }
                SearchProviderKind::DuckDuckGo => {
                    Some(Arc::new(DuckDuckGoSearch::new(client.clone(), timeout)))
                }
                SearchProviderKind::Brave => match &config.brave_api_key {
                    Some(key) => Some(Arc::new(BraveSearch::new(client.clone(), key, timeout))),
                    None => {
                        tracing::warn!("⚠️  No BRAVE_API_KEY set - Brave search disabled");
                        None
                    }
                },
            }
        })
        .collect()
}

/// Text generation providers in the given order; cloud providers without a key are skipped
pub fn llm_providers(
    order: &[LlmProviderKind],
    config: &AppConfig,
    client: &Client,
) -> Vec<Arc<dyn LlmProvider>> {
    order
        .iter()
        .filter_map(|kind| -> Option<Arc<dyn LlmProvider>> {
            if *kind == LlmProviderKind::Ollama {
                return Some(Arc::new(ollama_provider(config, client)));
            }
            let Some(key) = config.api_key(*kind) else {
                tracing::warn!(
                    "⚠️  No {}_API_KEY set - {} disabled",
                    kind.to_string().to_uppercase(),
                    kind.label()
                );
                return None;
            };
            let timeout = config.llm_timeout;
            let provider: Arc<dyn LlmProvider> = match kind {
                LlmProviderKind::Groq => {
                    Arc::new(OpenAiCompatibleProvider::groq(client.clone(), key, timeout))
                }
                LlmProviderKind::OpenAI => {
                    Arc::new(OpenAiCompatibleProvider::openai(client.clone(), key, timeout))
                }
                _ => Arc::new(AnthropicProvider::new(client.clone(), key, timeout)),
            };
            Some(provider)
        })
        .collect()
}

pub fn ollama_provider(config: &AppConfig, client: &Client) -> OllamaProvider {
    OllamaProvider::new(
        client.clone(),
        config.ollama_urls.clone(),
        config.ollama_preferred_models.clone(),
        config.local_llm_timeout,
    )
}
