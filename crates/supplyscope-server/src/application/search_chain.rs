//! Search Chain (Use Case)
//!
//! Ordered web search providers. Each provider call is its own failure
//! boundary: errors are logged and count as zero results.

use std::sync::Arc;

use supplyscope::{SearchResult, WebSearchService};

#[derive(Clone, Default)]
pub struct SearchChain {
    providers: Vec<Arc<dyn WebSearchService>>,
}

impl SearchChain {
    pub fn new(providers: Vec<Arc<dyn WebSearchService>>) -> Self {
        Self { providers }
    }

    pub fn is_empty(&self) -> bool {
        self.providers.is_empty()
    }

    pub fn provider_names(&self) -> Vec<String> {
        self.providers.iter().map(|p| p.provider_name()).collect()
    }

    /// Results of the first provider yielding any countable hit, capped to `limit`
    pub async fn first_hit(&self, query: &str, limit: usize) -> Vec<SearchResult> {
        for provider in &self.providers {
            let results = Self::run(provider.as_ref(), query, limit).await;
            if !results.is_empty() {
                tracing::info!(
                    "🔍 {} returned {} results for '{}'",
                    provider.provider_name(),
                    results.len(),
                    query
                );
                return results;
            }
        }
        tracing::info!("🔍 No search results for '{}'", query);
        Vec::new()
    }

    /// Countable results of every provider in order, until `limit` are collected
    pub async fn collect_all(&self, query: &str, limit: usize) -> Vec<SearchResult> {
        let mut collected = Vec::new();
        for provider in &self.providers {
            if collected.len() >= limit {
                break;
            }
            let remaining = limit - collected.len();
            collected.extend(Self::run(provider.as_ref(), query, remaining).await);
        }
        collected
    }

    async fn run(provider: &dyn WebSearchService, query: &str, limit: usize) -> Vec<SearchResult> {
        match provider.search(query, limit).await {
            Ok(results) => results
                .into_iter()
                .filter(SearchResult::is_countable)
                .take(limit)
                .collect(),
            Err(e) => {
                tracing::warn!("⚠️  Search provider {} failed: {}", provider.provider_name(), e);
                Vec::new()
            }
        }
    }
}
