//! Web Search Service Port
//!
//! Abstract interface for web search providers.

use async_trait::async_trait;

use crate::domain::entities::SearchResult;
use crate::domain::errors::DomainError;
use crate::domain::value_objects::SearchProviderKind;

/// Service interface for web search operations
#[async_trait]
pub trait WebSearchService: Send + Sync {
    /// Search the web for a query, returning at most `limit` results
    async fn search(&self, query: &str, limit: usize) -> Result<Vec<SearchResult>, DomainError>;

    /// Which provider this is
    fn kind(&self) -> SearchProviderKind;

    /// Name used in logs
    fn provider_name(&self) -> String {
        self.kind().to_string()
    }
}
