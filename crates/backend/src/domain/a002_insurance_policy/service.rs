use contracts::domain::a002_insurance_policy::aggregate::{InsurancePolicy, InsurancePolicyId};
use contracts::domain::common::AggregateRoot;
use contracts::enums::LedgerEntryType;
use sea_orm::{DatabaseConnection, TransactionTrait};

use super::repository;
use crate::projections::p901_risk_fund_ledger::service as ledger;
use crate::shared::error::{AppError, AppResult};

/// Регистрирует полис и зачисляет его премию в фонд одной транзакцией
pub async fn register(
    db: &DatabaseConnection,
    policy: InsurancePolicy,
) -> AppResult<InsurancePolicyId> {
    policy
        .validate()
        .map_err(|e| AppError::field("policy", e))?;

    let txn = db.begin().await?;
    repository::insert(&txn, &policy).await?;
    if policy.premium > 0 {
        ledger::post_entry_in(
            &txn,
            policy.premium,
            LedgerEntryType::Premium,
            &format!("Premium for policy {}", policy.code()),
            None,
        )
        .await?;
    }
    txn.commit().await?;

    tracing::info!(
        policy = %policy.code(),
        max_payout = policy.max_payout,
        premium = policy.premium,
        "Registered insurance policy"
    );
    Ok(policy.base.id)
}
