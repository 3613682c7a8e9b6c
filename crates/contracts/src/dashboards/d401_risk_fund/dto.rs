use crate::projections::p901_risk_fund_ledger::dto::LedgerEntryDto;
use serde::{Deserialize, Serialize};

/// Сводка по фонду рисков (GET /api/insurance/fund)
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RiskFundSummary {
    pub balance: i64,
    pub target: i64,
    pub currency: String,
    pub total_in: i64,
    pub total_out: i64,
    /// balance / target, 0 при нулевой цели
    pub coverage_ratio: f64,
    /// Обращения в очереди (OPENED, UNDER_REVIEW)
    pub open_cases: u64,
    /// Сумма запрошенных выплат по обращениям в очереди
    pub pending_exposure: i64,
    /// Последние движения, новые сверху
    pub transactions: Vec<LedgerEntryDto>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RiskFundSummaryQuery {
    pub limit: Option<u64>,
}
