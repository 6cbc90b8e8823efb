//! Reputation Entities
//!
//! Issues found in search results and the aggregate score built from them.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::entities::SearchResult;
use crate::domain::value_objects::{IssueCategory, Severity};

/// A reputation issue detected in one search result
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct ReputationIssue {
    pub source: String,
    #[serde(rename = "type")]
    pub category: IssueCategory,
    pub severity: Severity,
    pub title: String,
    pub snippet: String,
    pub url: String,
    pub date: String,
}

impl ReputationIssue {
    pub fn from_result(
        result: &SearchResult,
        category: IssueCategory,
        severity: Severity,
        source: String,
    ) -> Self {
        Self {
            source,
            category,
            severity,
            title: result.title.clone(),
            snippet: result.snippet.clone(),
            url: result.url.clone(),
            date: result.date_label(),
        }
    }
}

/// Reputation score, every value in 0..=100
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ReputationScore {
    pub overall: u8,
    pub consumer_sentiment: u8,
    pub social_media_sentiment: u8,
    pub media_sentiment: u8,
    pub regulatory_compliance: u8,
    pub issues: Vec<ReputationIssue>,
    pub summary: String,
}

/// Search results grouped by the reputation category they were searched for
#[derive(Debug, Clone, Default)]
pub struct ReputationInputs {
    pub consumer: Vec<SearchResult>,
    pub social: Vec<SearchResult>,
    pub news: Vec<SearchResult>,
    pub regulatory: Vec<SearchResult>,
}
