//! Domain Entities
//!
//! Request-scoped value objects; nothing here outlives one HTTP request.
//! - SearchResult: normalized search hit
//! - SupplierIntel: aggregate supplier report (+ CompanyAnalysis from the LLM)
//! - Reputation: issues and scores derived from search results
//! - EsgRating: ESG scores with provenance
//! - Portfolio: dashboard suppliers submitted for analysis

mod esg;
mod intel;
mod lenient;
mod portfolio;
mod reputation;
mod search_result;

pub use esg::*;
pub use intel::*;
pub use portfolio::*;
pub use reputation::*;
pub use search_result::*;
