use std::sync::Arc;

use axum::extract::{Path, State};
use axum::response::Json;
use serde_json::{json, Value};

use crate::error::AppError;
use crate::state::AppState;

/// GET /api/report
///
/// Returns the snapshot written by the last batch scan.
pub async fn latest_report(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Value>, AppError> {
    let snapshot = state.risk.latest_report().await?;
    Ok(Json(json!({ "data": snapshot })))
}

/// GET /api/commodities/:name
///
/// Live analysis of one commodity.
pub async fn investigate(
    State(state): State<Arc<AppState>>,
    Path(name): Path<String>,
) -> Result<Json<Value>, AppError> {
    if name.trim().is_empty() {
        return Err(AppError::bad_request("Commodity name must not be empty"));
    }
    let report = state.risk.analyze_commodity(&name).await?;
    Ok(Json(json!({ "data": report })))
}
