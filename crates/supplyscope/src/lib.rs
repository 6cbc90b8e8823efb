//! SupplyScope Domain Library
//!
//! Core domain types and interfaces for the SupplyScope supplier intelligence service.
//!
//! # Architecture
//!
//! This crate follows Clean Architecture / Hexagonal Architecture principles:
//!
//! - **Domain Layer** (`domain/`): Pure business entities and logic
//!   - `entities/`: Report models (SearchResult, SupplierIntel, ReputationScore, ...)
//!   - `value_objects/`: Immutable value types (Severity, provider kinds)
//!   - `services/`: Pure rules (reputation scoring, search triggers, completion cleanup)
//!   - `errors/`: Domain-specific error types
//!
//! - **Ports** (`ports/`): Abstract interfaces (traits)
//!   - `services/`: External provider interfaces (web search, LLM)
//!
//! # Usage
//!
//! ```rust,ignore
//! use supplyscope::domain::{ReputationScorer, SearchResult};
//! use supplyscope::ports::{LlmProvider, WebSearchService};
//! ```

pub mod domain;
pub mod ports;

// Re-export commonly used types
pub use domain::{
    CompanyAnalysis, DomainError, EsgConfidence, EsgRating, EsgScore, EsgSource, IssueCategory,
    LlmProviderKind, NewsItem, PortfolioSupplier, ReputationInputs, ReputationIssue,
    ReputationScore, ReputationScorer, RiskFactor, RiskLevel, SearchProviderKind, SearchResult,
    SearchTrigger, Severity, SeverityKeywords, SupplierIntel, SupplierTrend,
};
pub use ports::{
    // LLM provider port
    ChatMessage,
    CompletionOptions,
    CompletionResponse,
    LlmProvider,
    MessageRole,
    ProviderHealth,
    ProviderLocality,
    TokenUsage,
    // Web search port
    WebSearchService,
};
