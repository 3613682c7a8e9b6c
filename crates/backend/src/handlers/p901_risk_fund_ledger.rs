use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::Json;
use contracts::projections::p901_risk_fund_ledger::dto::{
    LedgerEntryDto, LedgerPageQuery, PostEntryRequest,
};

use crate::projections::p901_risk_fund_ledger::service;
use crate::shared::error::AppResult;
use crate::shared::json::AppJson;
use crate::shared::state::AppState;
use crate::system::auth::extractor::CurrentActor;

/// GET /api/insurance/fund/entries?limit=&before=
pub async fn list(
    State(state): State<AppState>,
    Query(query): Query<LedgerPageQuery>,
) -> AppResult<Json<Vec<LedgerEntryDto>>> {
    Ok(Json(
        service::list_entries(&state.db, query.limit, query.before).await?,
    ))
}

/// POST /api/insurance/fund/entries
pub async fn post(
    State(state): State<AppState>,
    CurrentActor(actor): CurrentActor,
    AppJson(request): AppJson<PostEntryRequest>,
) -> AppResult<(StatusCode, Json<LedgerEntryDto>)> {
    let entry = service::post_manual_entry(&state.db, &actor, request).await?;
    Ok((StatusCode::CREATED, Json(entry)))
}
