//! Brave Search API (requires `BRAVE_API_KEY`)

use async_trait::async_trait;
use reqwest::Client;
use serde_json::Value;
use std::time::Duration;

use supplyscope::{DomainError, SearchProviderKind, SearchResult, WebSearchService};

const BRAVE_SEARCH_URL: &str = "https://api.search.brave.com/res/v1/web/search";
/// Brave rejects `count` above 20
const MAX_COUNT: usize = 20;

pub struct BraveSearch {
    client: Client,
    api_key: String,
    base_url: String,
    timeout: Duration,
}

impl BraveSearch {
    pub fn new(client: Client, api_key: impl Into<String>, timeout: Duration) -> Self {
        Self::with_base_url(client, api_key, BRAVE_SEARCH_URL, timeout)
    }

    pub fn with_base_url(
        client: Client,
        api_key: impl Into<String>,
        base_url: impl Into<String>,
        timeout: Duration,
    ) -> Self {
        Self {
            client,
            api_key: api_key.into(),
            base_url: base_url.into(),
            timeout,
        }
    }
}

#[async_trait]
impl WebSearchService for BraveSearch {
    async fn search(&self, query: &str, limit: usize) -> Result<Vec<SearchResult>, DomainError> {
        let count = limit.clamp(1, MAX_COUNT).to_string();
        let response = self
            .client
            .get(&self.base_url)
            .header("Accept", "application/json")
            .header("X-Subscription-Token", &self.api_key)
            .query(&[("q", query), ("count", count.as_str())])
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

        let payload: Value = response
            .json()
            .await
            .map_err(|e| DomainError::parse(self.provider_name(), e))?;

        Ok(parse_results(&payload, limit))
    }

    fn kind(&self) -> SearchProviderKind {
        SearchProviderKind::Brave
    }
}

/// `web.results[]` of a Brave response. A missing array means no hits.
pub(crate) fn parse_results(payload: &Value, limit: usize) -> Vec<SearchResult> {
    let Some(rows) = payload
        .get("web")
        .and_then(|v| v.get("results"))
        .and_then(|v| v.as_array())
    else {
        return Vec::new();
    };

    let text = |row: &Value, key: &str| {
        row.get(key)
            .and_then(|v| v.as_str())
            .unwrap_or_default()
            .to_string()
    };

    rows.iter()
        .map(|row| {
            let source = row
                .get("profile")
                .and_then(|p| p.get("name"))
                .and_then(|v| v.as_str())
                .unwrap_or_default();
            SearchResult::new(text(row, "title"), text(row, "url"), text(row, "description"))
                .with_published_age(text(row, "age"))
                .with_source(source)
        })
        .filter(SearchResult::is_countable)
        .take(limit)
        .collect()
}
