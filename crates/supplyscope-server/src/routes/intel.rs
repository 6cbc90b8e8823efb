//! Intel Routes - Supplier intelligence report

use axum::{
    extract::{rejection::QueryRejection, Query, State},
    routing::get,
    Json, Router,
};

use supplyscope::SupplierIntel;

use crate::models::{bad_request, ApiError, ErrorResponse, IntelQuery};
use crate::AppState;

/// Build the intelligence report for a supplier
#[utoipa::path(
    get,
    path = "/intel",
    params(IntelQuery),
    responses(
        (status = 200, description = "Supplier report", body = SupplierIntel),
        (status = 400, description = "Supplier name missing", body = ErrorResponse)
    ),
    tag = "Intel"
)]
pub async fn intel(
    State(state): State<AppState>,
    query: Result<Query<IntelQuery>, QueryRejection>,
) -> Result<Json<SupplierIntel>, ApiError> {
    let supplier = query
        .ok()
        .and_then(|Query(q)| q.supplier)
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .ok_or_else(|| bad_request("Supplier name required"))?;

    Ok(Json(state.intel_service.gather(&supplier).await))
}

pub fn router() -> Router<AppState> {
    Router::new().route("/intel", get(intel))
}
