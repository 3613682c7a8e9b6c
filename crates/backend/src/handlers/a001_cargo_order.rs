use axum::extract::{Path, State};
use axum::Json;
use contracts::domain::a001_cargo_order::aggregate::CargoOrder;
use serde_json::json;

use crate::domain::a001_cargo_order::service;
use crate::shared::error::AppResult;
use crate::shared::state::AppState;

/// GET /api/orders/:id
pub async fn get_by_id(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<Json<CargoOrder>> {
    Ok(Json(service::find_by_ref(&state.db, &id).await?))
}

/// POST /api/orders/testdata
pub async fn insert_test_data(State(state): State<AppState>) -> AppResult<Json<serde_json::Value>> {
    let created = service::insert_test_data(&state.db).await?;
    Ok(Json(json!({ "created": created })))
}
