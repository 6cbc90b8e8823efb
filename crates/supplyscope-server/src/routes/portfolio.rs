//! Portfolio Routes - Strategic analysis of tracked suppliers

use axum::{
    extract::{rejection::JsonRejection, State},
    routing::post,
    Json, Router,
};

use supplyscope::PortfolioSupplier;

use crate::models::{bad_request, ApiError, ErrorResponse, PortfolioRequest, PortfolioResponse};
use crate::AppState;

const SUPPLIERS_REQUIRED: &str = "Suppliers array required";

/// Analyze the supplier portfolio
#[utoipa::path(
    post,
    path = "/portfolio-analysis",
    request_body = PortfolioRequest,
    responses(
        (status = 200, description = "Portfolio analysis", body = PortfolioResponse),
        (status = 400, description = "Suppliers missing or not an array", body = ErrorResponse)
    ),
    tag = "Portfolio"
)]
pub async fn analyze_portfolio(
    State(state): State<AppState>,
    payload: Result<Json<PortfolioRequest>, JsonRejection>,
) -> Result<Json<PortfolioResponse>, ApiError> {
    let Json(payload) = payload.map_err(|e| {
        tracing::warn!("⚠️  Rejected portfolio body: {}", e);
        bad_request("Invalid JSON body")
    })?;

    let Some(serde_json::Value::Array(items)) = payload.suppliers else {
        return Err(bad_request(SUPPLIERS_REQUIRED));
    };
    let suppliers: Vec<PortfolioSupplier> = items
        .into_iter()
        .filter_map(|item| match serde_json::from_value(item) {
            Ok(supplier) => Some(supplier),
            Err(e) => {
                tracing::warn!("⚠️  Skipping unusable supplier entry: {}", e);
                None
            }
        })
        .collect();

    let result = state.portfolio_service.analyze(&suppliers).await;
    Ok(Json(PortfolioResponse {
        analysis: result.analysis,
        source: result.source,
    }))
}

pub fn router() -> Router<AppState> {
    Router::new().route("/portfolio-analysis", post(analyze_portfolio))
}
