//! IssueCategory - Where a reputation issue was found

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Reputation issue category
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum IssueCategory {
    Consumer,
    /// Social media discussions (Reddit)
    #[serde(rename = "reddit")]
    Social,
    News,
    Regulatory,
}

impl std::fmt::Display for IssueCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            IssueCategory::Consumer => write!(f, "consumer"),
            IssueCategory::Social => write!(f, "reddit"),
            IssueCategory::News => write!(f, "news"),
            IssueCategory::Regulatory => write!(f, "regulatory"),
        }
    }
}
