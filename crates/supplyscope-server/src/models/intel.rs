//! Intel - Supplier report query

use serde::Deserialize;
use utoipa::IntoParams;

#[derive(Debug, Clone, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct IntelQuery {
    /// Supplier name to research
    pub supplier: Option<String>,
}
