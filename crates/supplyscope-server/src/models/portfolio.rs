//! Portfolio - Strategic analysis of tracked suppliers

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use supplyscope::PortfolioSupplier;

/// Raw request body; `suppliers` is validated by the handler so that a
/// missing or non-array value yields a clear 400
#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
pub struct PortfolioRequest {
    #[schema(value_type = Option<Vec<PortfolioSupplier>>)]
    pub suppliers: Option<serde_json::Value>,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct PortfolioResponse {
    pub analysis: String,
    /// Provider that wrote the analysis, or `fallback`
    pub source: String,
}
