use chrono::{DateTime, Utc};
use contracts::domain::a003_return_case::aggregate::{ReturnCase, TimelineAction, TimelineEntry};
use contracts::domain::common::AggregateRoot;
use contracts::enums::{LedgerEntryType, ReturnStatus};
use contracts::system::auth::Actor;
use sea_orm::ConnectionTrait;
use uuid::Uuid;

use super::repository;
use super::review::ReviewOutcome;
use super::timeline_repository;
use crate::projections::p901_risk_fund_ledger::service::{self as ledger, Registrator};
use crate::shared::error::{AppError, AppResult};

pub fn timeline_entry(
    case: &ReturnCase,
    actor: &Actor,
    at: DateTime<Utc>,
    action: TimelineAction,
    from_status: Option<ReturnStatus>,
    note: Option<String>,
) -> TimelineEntry {
    TimelineEntry {
        id: Uuid::new_v4().to_string(),
        case_id: case.to_string_id(),
        at,
        actor_id: actor.id.clone(),
        action,
        from_status,
        to_status: case.status,
        note,
    }
}

/// Условная запись нового состояния: статус и версия должны совпасть
/// с прочитанными, иначе обращение изменил кто-то другой.
async fn write_state<C: ConnectionTrait>(
    db: &C,
    updated: &ReturnCase,
    expected_version: i32,
) -> AppResult<()> {
    let rows = repository::update_review_state(db, updated, expected_version).await?;
    if rows == 0 {
        return Err(AppError::ConcurrencyConflict(format!(
            "case {} was changed by another request, reload and retry",
            updated.code()
        )));
    }
    Ok(())
}

/// OPENED → UNDER_REVIEW
pub async fn post_take<C: ConnectionTrait>(
    db: &C,
    case: &ReturnCase,
    actor: &Actor,
) -> AppResult<ReturnCase> {
    let now = Utc::now();
    let mut updated = case.clone();
    updated.status = ReturnStatus::UnderReview;
    updated.base.touch();
    updated.base.metadata.version = case.base.metadata.version + 1;

    write_state(db, &updated, case.base.metadata.version).await?;

    let entry = timeline_entry(
        &updated,
        actor,
        now,
        TimelineAction::ReviewStarted,
        Some(case.status),
        None,
    );
    timeline_repository::insert(db, &entry).await?;
    Ok(updated)
}

/// Проводит решение по обращению: новое состояние, выплата из фонда
/// и запись истории. Вызывается внутри одной транзакции.
pub async fn post_review<C: ConnectionTrait>(
    db: &C,
    case: &ReturnCase,
    outcome: ReviewOutcome,
    actor: &Actor,
) -> AppResult<ReturnCase> {
    let now = Utc::now();
    let mut updated = case.clone();
    updated.status = outcome.status;
    updated.liable_party = outcome.liable_party;
    updated.approved_amount = outcome.approved_amount;
    updated.review_notes = outcome.review_notes.clone();
    updated.reviewed_at = Some(now);
    if outcome.status.is_terminal() {
        updated.resolved_at = Some(now);
    }
    updated.base.touch();
    updated.base.metadata.version = case.base.metadata.version + 1;

    write_state(db, &updated, case.base.metadata.version).await?;

    if let Some(payout) = outcome.payout {
        ledger::post_entry_in(
            db,
            -payout,
            LedgerEntryType::Claim,
            &format!("Claim payout for {}", updated.code()),
            Some(Registrator::for_case(&updated)),
        )
        .await?;
    }

    let mut note = outcome.review_notes;
    if outcome.liable_party != case.liable_party {
        let overridden = format!(
            "Liable party changed from {} to {}",
            case.liable_party, outcome.liable_party
        );
        note = Some(match note {
            Some(n) => format!("{}. {}", overridden, n),
            None => overridden,
        });
    }
    let entry = timeline_entry(&updated, actor, now, outcome.action, Some(case.status), note);
    timeline_repository::insert(db, &entry).await?;

    Ok(updated)
}
