use chrono::{DateTime, Duration, Utc};
use contracts::domain::a003_return_case::aggregate::ReturnCase;
use contracts::domain::common::AggregateRoot;
use contracts::enums::LedgerEntryType;
use contracts::projections::p901_risk_fund_ledger::dto::{
    LedgerEntryDto, LedgerTotals, PostEntryRequest,
};
use contracts::system::auth::Actor;
use sea_orm::{ConnectionTrait, DatabaseConnection, TransactionTrait};
use uuid::Uuid;

use super::repository::{self, Model};
use crate::shared::error::{AppError, AppResult};

pub const DEFAULT_PAGE_SIZE: u64 = 50;
pub const MAX_PAGE_SIZE: u64 = 500;

/// Документ-регистратор движения (обращение, по которому прошла выплата)
#[derive(Debug, Clone)]
pub struct Registrator {
    pub id: String,
    pub type_name: String,
    pub code: String,
}

impl Registrator {
    pub fn for_case(case: &ReturnCase) -> Self {
        Self {
            id: case.to_string_id(),
            type_name: ReturnCase::full_name(),
            code: case.code().to_string(),
        }
    }
}

fn model_to_dto(model: Model) -> AppResult<LedgerEntryDto> {
    let entry_type = LedgerEntryType::from_code(&model.entry_type).ok_or_else(|| {
        AppError::Persistence(format!(
            "unknown ledger entry type '{}' in entry {}",
            model.entry_type, model.id
        ))
    })?;
    Ok(LedgerEntryDto {
        id: model.id,
        created_at: model.created_at,
        amount: model.amount,
        entry_type,
        description: model.description,
        related_case_id: model.registrator_ref,
        related_case_code: model.registrator_code,
    })
}

/// Проверка суммы и знака до записи в регистр
pub fn validate_entry(amount: i64, entry_type: LedgerEntryType) -> AppResult<()> {
    if amount == 0 {
        return Err(AppError::field("amount", "must not be zero"));
    }
    if !entry_type.accepts_amount(amount) {
        let expected = match entry_type {
            LedgerEntryType::Premium => "positive",
            LedgerEntryType::Claim => "negative",
            LedgerEntryType::Adjustment => "non-zero",
        };
        return Err(AppError::field(
            "amount",
            format!("{} entry must be {}", entry_type, expected),
        ));
    }
    Ok(())
}

/// Следующий момент времени регистра: строго позже последней записи
fn next_timestamp(now: DateTime<Utc>, last: Option<DateTime<Utc>>) -> DateTime<Utc> {
    match last {
        Some(last) if now <= last => last + Duration::microseconds(1),
        _ => now,
    }
}

/// Записывает движение на переданном соединении.
///
/// Вызывается внутри транзакции вызывающей стороны, чтобы движение
/// фиксировалось вместе с изменением документа.
pub async fn post_entry_in<C: ConnectionTrait>(
    db: &C,
    amount: i64,
    entry_type: LedgerEntryType,
    description: &str,
    registrator: Option<Registrator>,
) -> AppResult<LedgerEntryDto> {
    validate_entry(amount, entry_type)?;

    let last = repository::last_created_at(db).await?;
    let created_at = next_timestamp(Utc::now(), last);

    let (registrator_ref, registrator_type, registrator_code) = match registrator {
        Some(r) => (Some(r.id), Some(r.type_name), Some(r.code)),
        None => (None, None, None),
    };

    let model = Model {
        id: Uuid::new_v4().to_string(),
        created_at,
        amount,
        entry_type: entry_type.code().to_string(),
        description: description.trim().to_string(),
        registrator_ref,
        registrator_type,
        registrator_code,
    };
    repository::insert_entry(db, &model).await?;

    tracing::info!(
        entry = %model.id,
        entry_type = %entry_type,
        amount,
        "Posted risk fund entry"
    );
    model_to_dto(model)
}

/// Ручное движение (PREMIUM / ADJUSTMENT) от администратора.
/// Выплаты (CLAIM) проводятся только решением по обращению.
pub async fn post_manual_entry(
    db: &DatabaseConnection,
    actor: &Actor,
    request: PostEntryRequest,
) -> AppResult<LedgerEntryDto> {
    if !actor.is_admin() {
        return Err(AppError::Forbidden(
            "only administrators can post fund entries".into(),
        ));
    }
    if request.entry_type == LedgerEntryType::Claim {
        return Err(AppError::field(
            "entryType",
            "CLAIM entries are posted by approving a return case",
        ));
    }
    if request.description.trim().is_empty() {
        return Err(AppError::field("description", "is required"));
    }

    let txn = db.begin().await?;
    let entry = post_entry_in(
        &txn,
        request.amount,
        request.entry_type,
        &request.description,
        None,
    )
    .await?;
    txn.commit().await?;

    tracing::info!(
        actor = %actor.id,
        entry_type = %entry.entry_type,
        amount = entry.amount,
        "Manual risk fund entry"
    );
    Ok(entry)
}

pub async fn get_balance<C: ConnectionTrait>(db: &C) -> AppResult<i64> {
    Ok(repository::balance(db).await?)
}

pub async fn get_totals<C: ConnectionTrait>(db: &C) -> AppResult<LedgerTotals> {
    Ok(repository::totals(db).await?)
}

/// Движения, новые сверху
pub async fn list_entries<C: ConnectionTrait>(
    db: &C,
    limit: Option<u64>,
    before: Option<DateTime<Utc>>,
) -> AppResult<Vec<LedgerEntryDto>> {
    let limit = limit.unwrap_or(DEFAULT_PAGE_SIZE).clamp(1, MAX_PAGE_SIZE);
    repository::list_page(db, limit, before)
        .await?
        .into_iter()
        .map(model_to_dto)
        .collect()
}

/// Движения, зарегистрированные обращением
pub async fn list_by_case<C: ConnectionTrait>(
    db: &C,
    case_id: &str,
) -> AppResult<Vec<LedgerEntryDto>> {
    repository::get_by_registrator(db, case_id)
        .await?
        .into_iter()
        .map(model_to_dto)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::data::db::connect_in_memory;

    #[test]
    fn test_sign_rules() {
        assert!(validate_entry(100, LedgerEntryType::Premium).is_ok());
        assert!(validate_entry(-100, LedgerEntryType::Premium).is_err());
        assert!(validate_entry(-100, LedgerEntryType::Claim).is_ok());
        assert!(validate_entry(100, LedgerEntryType::Claim).is_err());
        assert!(validate_entry(-5, LedgerEntryType::Adjustment).is_ok());
        assert!(validate_entry(5, LedgerEntryType::Adjustment).is_ok());
        for t in LedgerEntryType::all() {
            assert!(validate_entry(0, t).is_err());
        }
    }

    #[test]
    fn test_next_timestamp_is_strictly_after_last() {
        let now = Utc::now();
        assert_eq!(next_timestamp(now, None), now);
        assert_eq!(
            next_timestamp(now, Some(now)),
            now + Duration::microseconds(1)
        );
        let future = now + Duration::seconds(5);
        assert!(next_timestamp(now, Some(future)) > future);
        let past = now - Duration::seconds(5);
        assert_eq!(next_timestamp(now, Some(past)), now);
    }

    #[tokio::test]
    async fn test_balance_equals_sum_of_entries() {
        let db = connect_in_memory().await.unwrap();
        let postings = [
            (1_000_000, LedgerEntryType::Premium, "p1"),
            (250_000, LedgerEntryType::Premium, "p2"),
            (-400_000, LedgerEntryType::Claim, "c1"),
            (-50_000, LedgerEntryType::Adjustment, "a1"),
        ];
        for (amount, entry_type, description) in postings {
            post_entry_in(&db, amount, entry_type, description, None)
                .await
                .unwrap();

            let balance = get_balance(&db).await.unwrap();
            let entries = list_entries(&db, Some(MAX_PAGE_SIZE), None).await.unwrap();
            assert_eq!(entries.iter().map(|e| e.amount).sum::<i64>(), balance);
            assert_eq!(get_totals(&db).await.unwrap().balance(), balance);
        }

        let balance = get_balance(&db).await.unwrap();
        assert_eq!(balance, 800_000);

        let totals = get_totals(&db).await.unwrap();
        assert_eq!(totals.total_in, 1_250_000);
        assert_eq!(totals.total_out, 450_000);
    }

    #[tokio::test]
    async fn test_empty_ledger_has_zero_balance() {
        let db = connect_in_memory().await.unwrap();
        assert_eq!(get_balance(&db).await.unwrap(), 0);
        assert_eq!(get_totals(&db).await.unwrap(), LedgerTotals::default());
        assert!(list_entries(&db, None, None).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_rejected_entry_leaves_ledger_untouched() {
        let db = connect_in_memory().await.unwrap();
        let err = post_entry_in(&db, 100, LedgerEntryType::Claim, "bad", None)
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::Validation(_)));
        assert_eq!(repository::count(&db).await.unwrap(), 0);
    }

    #[tokio::test]
    async fn test_entries_are_newest_first_with_cursor() {
        let db = connect_in_memory().await.unwrap();
        for i in 1..=5 {
            post_entry_in(&db, i * 100, LedgerEntryType::Premium, "p", None)
                .await
                .unwrap();
        }

        let first = list_entries(&db, Some(2), None).await.unwrap();
        assert_eq!(
            first.iter().map(|e| e.amount).collect::<Vec<_>>(),
            vec![500, 400]
        );
        assert!(first[0].created_at > first[1].created_at);

        let cursor = first.last().map(|e| e.created_at);
        let second = list_entries(&db, Some(10), cursor).await.unwrap();
        assert_eq!(
            second.iter().map(|e| e.amount).collect::<Vec<_>>(),
            vec![300, 200, 100]
        );
    }

    #[tokio::test]
    async fn test_manual_entries() {
        let db = connect_in_memory().await.unwrap();
        let admin = Actor::admin("ops-1");

        let premium = post_manual_entry(
            &db,
            &admin,
            PostEntryRequest {
                amount: 5_000,
                entry_type: LedgerEntryType::Premium,
                description: "Annual top-up".into(),
            },
        )
        .await
        .unwrap();
        assert_eq!(premium.entry_type, LedgerEntryType::Premium);
        assert!(premium.related_case_id.is_none());

        let claim = post_manual_entry(
            &db,
            &admin,
            PostEntryRequest {
                amount: -5_000,
                entry_type: LedgerEntryType::Claim,
                description: "sneaky payout".into(),
            },
        )
        .await;
        assert!(matches!(claim, Err(AppError::Validation(_))));

        let customer = post_manual_entry(
            &db,
            &Actor::customer("c-1"),
            PostEntryRequest {
                amount: 1,
                entry_type: LedgerEntryType::Adjustment,
                description: "x".into(),
            },
        )
        .await;
        assert!(matches!(customer, Err(AppError::Forbidden(_))));

        assert_eq!(get_balance(&db).await.unwrap(), 5_000);
    }
}
