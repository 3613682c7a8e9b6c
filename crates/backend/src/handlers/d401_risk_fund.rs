use axum::extract::{Query, State};
use axum::Json;
use contracts::dashboards::d401_risk_fund::dto::{RiskFundSummary, RiskFundSummaryQuery};

use crate::dashboards::d401_risk_fund::service;
use crate::shared::error::AppResult;
use crate::shared::state::AppState;

/// GET /api/insurance/fund
pub async fn get_summary(
    State(state): State<AppState>,
    Query(query): Query<RiskFundSummaryQuery>,
) -> AppResult<Json<RiskFundSummary>> {
    Ok(Json(
        service::get_summary(&state.db, &state.config.risk_fund, query).await?,
    ))
}
