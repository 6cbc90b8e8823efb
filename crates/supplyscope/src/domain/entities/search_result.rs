//! SearchResult Entity
//!
//! Common shape every search provider response is adapted into.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// A single normalized web search hit
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SearchResult {
    pub title: String,
    pub url: String,
    /// Description or excerpt, empty when the provider gave none
    #[serde(default)]
    pub snippet: String,
    /// Provider supplied age or publish date ("2 days ago", RFC 2822 date, ...)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub published_age: Option<String>,
    /// Publisher name when the provider reports one
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source: Option<String>,
}

impl SearchResult {
    pub fn new(
        title: impl Into<String>,
        url: impl Into<String>,
        snippet: impl Into<String>,
    ) -> Self {
        Self {
            title: title.into().trim().to_string(),
            url: url.into().trim().to_string(),
            snippet: snippet.into().trim().to_string(),
            published_age: None,
            source: None,
        }
    }

    pub fn with_published_age(mut self, age: impl Into<String>) -> Self {
        let age = age.into();
        if !age.trim().is_empty() {
            self.published_age = Some(age.trim().to_string());
        }
        self
    }

    pub fn with_source(mut self, source: impl Into<String>) -> Self {
        let source = source.into();
        if !source.trim().is_empty() {
            self.source = Some(source.trim().to_string());
        }
        self
    }

    /// Only results with both a title and a link are counted as hits
    pub fn is_countable(&self) -> bool {
        !self.title.is_empty() && !self.url.is_empty()
    }

    /// Title and snippet joined, the text keyword rules run against
    pub fn text(&self) -> String {
        format!("{} {}", self.title, self.snippet)
    }

    /// Host of the result URL without a leading `www.`
    pub fn host(&self) -> Option<String> {
        let parsed = url::Url::parse(&self.url).ok()?;
        let host = parsed.host_str()?;
        Some(host.strip_prefix("www.").unwrap_or(host).to_string())
    }

    /// Provider reported publisher, falling back to the host name.
    /// Aggregators (Google News) link through their own host, so the
    /// publisher has to win.
    pub fn source_label(&self) -> String {
        self.source
            .clone()
            .or_else(|| self.host())
            .unwrap_or_else(|| "unknown".to_string())
    }

    /// Age as shown on the dashboard
    pub fn date_label(&self) -> String {
        self.published_age
            .clone()
            .unwrap_or_else(|| "Recent".to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_countable_requires_title_and_url() {
        assert!(SearchResult::new("Title", "https://a.com", "").is_countable());
        assert!(!SearchResult::new("", "https://a.com", "x").is_countable());
        assert!(!SearchResult::new("Title", "  ", "x").is_countable());
    }

    #[test]
    fn test_host_strips_www() {
        let result = SearchResult::new("t", "https://www.reuters.com/business/x", "");
        assert_eq!(result.host().as_deref(), Some("reuters.com"));
        assert_eq!(result.source_label(), "reuters.com");
    }

    #[test]
    fn test_source_label_falls_back() {
        let result = SearchResult::new("t", "not a url", "").with_source("Reuters");
        assert_eq!(result.source_label(), "Reuters");
        let bare = SearchResult::new("t", "not a url", "");
        assert_eq!(bare.source_label(), "unknown");
    }

    #[test]
    fn test_publisher_wins_over_aggregator_host() {
        let result = SearchResult::new("t", "https://news.google.com/rss/articles/abc", "")
            .with_source("Reuters");
        assert_eq!(result.host().as_deref(), Some("news.google.com"));
        assert_eq!(result.source_label(), "Reuters");
    }

    #[test]
    fn test_blank_age_is_ignored() {
        let result = SearchResult::new("t", "https://a.com", "").with_published_age("  ");
        assert_eq!(result.published_age, None);
        assert_eq!(result.date_label(), "Recent");
    }
}
