use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use contracts::domain::a003_return_case::aggregate::{
    OpenReturnRequest, OpenReturnResponse, ReturnCaseDetailDto, ReturnCaseListQuery,
    ReturnCaseListResponse, ReviewRequest,
};

use crate::domain::a003_return_case::service;
use crate::shared::error::AppResult;
use crate::shared::json::AppJson;
use crate::shared::state::AppState;
use crate::system::auth::extractor::CurrentActor;

/// POST /api/returns
pub async fn open(
    State(state): State<AppState>,
    CurrentActor(actor): CurrentActor,
    AppJson(request): AppJson<OpenReturnRequest>,
) -> AppResult<(StatusCode, Json<OpenReturnResponse>)> {
    let response = service::open_case(&state.db, &state.config.returns, &actor, request).await?;
    Ok((StatusCode::CREATED, Json(response)))
}

/// GET /api/returns
pub async fn list(
    State(state): State<AppState>,
    CurrentActor(actor): CurrentActor,
    Query(query): Query<ReturnCaseListQuery>,
) -> AppResult<Json<ReturnCaseListResponse>> {
    Ok(Json(service::list_cases(&state.db, &actor, query).await?))
}

/// GET /api/returns/:id
pub async fn get_by_id(
    State(state): State<AppState>,
    CurrentActor(actor): CurrentActor,
    Path(id): Path<String>,
) -> AppResult<Json<ReturnCaseDetailDto>> {
    Ok(Json(service::get_case(&state.db, &actor, &id).await?))
}

/// POST /api/returns/:id/take
pub async fn take(
    State(state): State<AppState>,
    CurrentActor(actor): CurrentActor,
    Path(id): Path<String>,
) -> AppResult<Json<ReturnCaseDetailDto>> {
    Ok(Json(service::start_review(&state.db, &actor, &id).await?))
}

/// PATCH /api/returns/:id/review
pub async fn review(
    State(state): State<AppState>,
    CurrentActor(actor): CurrentActor,
    Path(id): Path<String>,
    AppJson(request): AppJson<ReviewRequest>,
) -> AppResult<Json<ReturnCaseDetailDto>> {
    Ok(Json(
        service::submit_review(&state.db, &actor, &id, request).await?,
    ))
}
