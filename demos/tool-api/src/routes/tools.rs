use std::sync::Arc;

use axum::extract::{Path, State};
use axum::response::Json;
use serde_json::{json, Value};
use supply_risk::tools::ToolKit;

use crate::error::AppError;
use crate::state::AppState;

/// GET /api/tools
///
/// List every tool with its description and input schema.
pub async fn list_tools() -> Json<Value> {
    let tools = ToolKit::definitions();
    let count = tools.len();
    Json(json!({ "data": tools, "count": count }))
}

/// POST /api/tools/:name
///
/// Invoke a tool. The request body is the tool's JSON arguments; an empty
/// body is treated as no arguments.
pub async fn call_tool(
    State(state): State<Arc<AppState>>,
    Path(name): Path<String>,
    body: Option<Json<Value>>,
) -> Result<Json<Value>, AppError> {
    let arguments = body.map(|Json(v)| v).unwrap_or(Value::Null);
    let result = state.risk.call_tool(&name, arguments).await?;
    Ok(Json(json!({ "data": result })))
}
