//! DuckDuckGo Instant Answer search
//!
//! Free, keyless. Yields the abstract (usually Wikipedia) and related topics,
//! not a full web index, so it works best for company profile queries.

use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use std::time::Duration;

use supplyscope::{DomainError, SearchProviderKind, SearchResult, WebSearchService};

const DUCKDUCKGO_API_URL: &str = "https://api.duckduckgo.com/";

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "PascalCase")]
struct InstantAnswer {
    #[serde(default)]
    heading: String,
    #[serde(default)]
    abstract_text: String,
    #[serde(default, rename = "AbstractURL")]
    abstract_url: String,
    #[serde(default)]
    abstract_source: String,
    #[serde(default)]
    related_topics: Vec<RelatedTopic>,
}

/// Either a topic or a named group of topics
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "PascalCase")]
struct RelatedTopic {
    #[serde(default)]
    text: String,
    #[serde(default, rename = "FirstURL")]
    first_url: String,
    #[serde(default)]
    topics: Vec<RelatedTopic>,
}

pub struct DuckDuckGoSearch {
    client: Client,
    base_url: String,
    timeout: Duration,
}

impl DuckDuckGoSearch {
    pub fn new(client: Client, timeout: Duration) -> Self {
        Self::with_base_url(client, DUCKDUCKGO_API_URL, timeout)
    }

    pub fn with_base_url(client: Client, base_url: impl Into<String>, timeout: Duration) -> Self {
        Self {
            client,
            base_url: base_url.into(),
            timeout,
        }
    }
}

#[async_trait]
impl WebSearchService for DuckDuckGoSearch {
    async fn search(&self, query: &str, limit: usize) -> Result<Vec<SearchResult>, DomainError> {
        let response = self
            .client
            .get(&self.base_url)
            .query(&[
                ("q", query),
                ("format", "json"),
                ("no_html", "1"),
                ("skip_disambig", "1"),
            ])
            .timeout(self.timeout)
            .send()
            .await
            .map_err(|e| DomainError::external(self.provider_name(), e))?;

        if !response.status().is_success() {
            return Err(DomainError::external(
                self.provider_name(),
                format!("status {}", response.status()),
            ));
        }

        // Served as application/x-javascript, so decode the text ourselves
        let body = response
            .text()
            .await
            .map_err(|e| DomainError::parse(self.provider_name(), e))?;

        parse_answer(&body, limit).map_err(|e| DomainError::parse(self.provider_name(), e))
    }

    fn kind(&self) -> SearchProviderKind {
        SearchProviderKind::DuckDuckGo
    }
}

pub(crate) fn parse_answer(body: &str, limit: usize) -> Result<Vec<SearchResult>, serde_json::Error> {
    let answer: InstantAnswer = serde_json::from_str(body)?;
    let mut results = Vec::new();

    if !answer.abstract_text.is_empty() && !answer.abstract_url.is_empty() {
        let title = if answer.heading.is_empty() {
            answer.abstract_source.clone()
        } else {
            answer.heading.clone()
        };
        results.push(
            SearchResult::new(title, &answer.abstract_url, &answer.abstract_text)
                .with_source(&answer.abstract_source),
        );
    }

    let mut topics = Vec::new();
    flatten_topics(&answer.related_topics, &mut topics);
    results.extend(topics.into_iter().map(|topic| {
        let title = topic
            .text
            .split(" - ")
            .next()
            .unwrap_or(&topic.text)
            .to_string();
        SearchResult::new(title, &topic.first_url, &topic.text)
    }));

    Ok(results
        .into_iter()
        .filter(SearchResult::is_countable)
        .take(limit)
        .collect())
}

fn flatten_topics<'a>(topics: &'a [RelatedTopic], out: &mut Vec<&'a RelatedTopic>) {
    for topic in topics {
        if topic.topics.is_empty() {
            out.push(topic);
        } else {
            flatten_topics(&topic.topics, out);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::testing::{failing_server, garbage_server, SHORT_TIMEOUT};

    const ANSWER: &str = r#"{
        "Heading": "BASF",
        "AbstractText": "BASF SE is a German multinational chemical company.",
        "AbstractURL": "https://en.wikipedia.org/wiki/BASF",
        "AbstractSource": "Wikipedia",
        "RelatedTopics": [
            {"Text": "Ludwigshafen - City in Germany", "FirstURL": "https://duckduckgo.com/Ludwigshafen"},
            {"Name": "Companies", "Topics": [
                {"Text": "Bayer - German pharmaceutical company", "FirstURL": "https://duckduckgo.com/Bayer"}
            ]},
            {"Text": "", "FirstURL": ""}
        ]
    }"#;

    #[test]
    fn test_abstract_then_flattened_topics() {
        let results = parse_answer(ANSWER, 10).unwrap();
        assert_eq!(results.len(), 3);
        assert_eq!(results[0].title, "BASF");
        assert_eq!(results[0].source.as_deref(), Some("Wikipedia"));
        assert_eq!(results[1].title, "Ludwigshafen");
        assert_eq!(results[1].snippet, "Ludwigshafen - City in Germany");
        assert_eq!(results[2].url, "https://duckduckgo.com/Bayer");
    }

    #[test]
    fn test_empty_answer() {
        let results = parse_answer(r#"{"Heading": "", "AbstractText": "", "RelatedTopics": []}"#, 5)
            .unwrap();
        assert!(results.is_empty());
    }

    #[test]
    fn test_invalid_json_is_error() {
        assert!(parse_answer("<html>", 5).is_err());
    }

    #[tokio::test]
    async fn test_garbage_body_is_parse_error() {
        let url = garbage_server().await;
        let search = DuckDuckGoSearch::with_base_url(Client::new(), url, SHORT_TIMEOUT);

        let err = search.search("basf", 5).await.unwrap_err();
        assert!(matches!(err, DomainError::Parse(_)));
    }

    #[tokio::test]
    async fn test_server_error_status() {
        let url = failing_server().await;
        let search = DuckDuckGoSearch::with_base_url(Client::new(), url, SHORT_TIMEOUT);

        let err = search.search("basf", 5).await.unwrap_err();
        assert!(matches!(err, DomainError::ExternalService(ref m) if m.contains("500")));
    }
}
