use contracts::dashboards::d401_risk_fund::dto::{RiskFundSummary, RiskFundSummaryQuery};
use sea_orm::{DatabaseConnection, TransactionTrait};

use crate::domain::a003_return_case::service as returns;
use crate::projections::p901_risk_fund_ledger::service as ledger;
use crate::shared::config::RiskFundConfig;
use crate::shared::error::AppResult;

pub const DEFAULT_TRANSACTIONS: u64 = 20;

fn coverage_ratio(balance: i64, target: i64) -> f64 {
    if target <= 0 {
        0.0
    } else {
        balance as f64 / target as f64
    }
}

/// Сводка по фонду: баланс, итоги, очередь и последние движения.
/// Всё читается в одной транзакции, чтобы цифры сходились между собой.
pub async fn get_summary(
    db: &DatabaseConnection,
    settings: &RiskFundConfig,
    query: RiskFundSummaryQuery,
) -> AppResult<RiskFundSummary> {
    let txn = db.begin().await?;
    let balance = ledger::get_balance(&txn).await?;
    let totals = ledger::get_totals(&txn).await?;
    let pending = returns::pending_stats(&txn).await?;
    let transactions = ledger::list_entries(
        &txn,
        Some(query.limit.unwrap_or(DEFAULT_TRANSACTIONS)),
        None,
    )
    .await?;
    txn.commit().await?;

    Ok(RiskFundSummary {
        balance,
        target: settings.target,
        currency: settings.currency.clone(),
        total_in: totals.total_in,
        total_out: totals.total_out,
        coverage_ratio: coverage_ratio(balance, settings.target),
        open_cases: pending.count,
        pending_exposure: pending.exposure,
        transactions,
    })
}
