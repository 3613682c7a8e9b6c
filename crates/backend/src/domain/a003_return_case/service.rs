use contracts::domain::a001_cargo_order::aggregate::CargoOrder;
use contracts::domain::a003_return_case::aggregate::{
    OpenReturnRequest, OpenReturnResponse, ReturnCase, ReturnCaseDetailDto, ReturnCaseId,
    ReturnCaseListQuery, ReturnCaseListResponse, ReviewRequest, TimelineAction,
};
use contracts::domain::common::AggregateRoot;
use contracts::enums::{ReturnStatus, ReturnType};
use contracts::system::auth::Actor;
use sea_orm::{ConnectionTrait, DatabaseConnection, TransactionTrait};
use uuid::Uuid;

use super::liability::{self, ShipmentContext};
use super::repository::{self, CaseFilter, PendingStats};
use super::{posting, review, timeline_repository};
use crate::domain::a001_cargo_order::service as orders;
use crate::domain::a002_insurance_policy::repository as policies;
use crate::shared::config::ReturnsConfig;
use crate::shared::error::{AppError, AppResult};

pub const DEFAULT_PAGE_SIZE: u64 = 50;
pub const MAX_PAGE_SIZE: u64 = 200;

/// Код обращения: префикс и первые 8 hex-символов UUID
pub fn case_code(prefix: &str, id: &ReturnCaseId) -> String {
    let hex = id.value().simple().to_string();
    format!("{}-{}", prefix, hex[..8].to_ascii_uppercase())
}

fn not_found(reference: &str) -> AppError {
    AppError::NotFound(format!("{} {}", ReturnCase::element_name(), reference))
}

/// Поиск обращения по UUID или по коду RET-…
async fn find_case<C: ConnectionTrait>(db: &C, reference: &str) -> AppResult<ReturnCase> {
    let reference = reference.trim();
    let found = match Uuid::parse_str(reference) {
        Ok(uuid) => repository::get_by_id(db, uuid).await?,
        Err(_) => repository::get_by_code(db, reference).await?,
    };
    found.ok_or_else(|| not_found(reference))
}

/// Клиент видит только свои обращения; чужие для него не существуют
fn ensure_visible(actor: &Actor, case: &ReturnCase, reference: &str) -> AppResult<()> {
    if actor.is_admin() || case.customer_id == actor.id {
        Ok(())
    } else {
        Err(not_found(reference))
    }
}

fn ensure_admin(actor: &Actor, operation: &str) -> AppResult<()> {
    if actor.is_admin() {
        Ok(())
    } else {
        Err(AppError::Forbidden(format!(
            "only administrators can {}",
            operation
        )))
    }
}

async fn detail<C: ConnectionTrait>(db: &C, case: &ReturnCase) -> AppResult<ReturnCaseDetailDto> {
    let timeline = timeline_repository::list_by_case(db, &case.to_string_id()).await?;
    Ok(case.to_detail_dto(timeline))
}

/// Открытие обращения клиентом.
///
/// Поля проверяются до поиска заказа и классификации; затем обращение
/// и первая запись истории сохраняются одной транзакцией.
pub async fn open_case(
    db: &DatabaseConnection,
    settings: &ReturnsConfig,
    actor: &Actor,
    request: OpenReturnRequest,
) -> AppResult<OpenReturnResponse> {
    request
        .validate(settings.min_description_length)
        .map_err(AppError::Validation)?;

    let order: CargoOrder = orders::find_by_ref(db, &request.order_id).await?;
    if !actor.is_admin() && order.customer_id != actor.id {
        return Err(AppError::NotFound(format!(
            "{} {}",
            CargoOrder::element_name(),
            request.order_id.trim()
        )));
    }

    let classification = liability::classify_code(&request.return_type, &ShipmentContext::from(&order));
    let return_type = ReturnType::from_code(&request.return_type).unwrap_or(ReturnType::Other);

    let id = ReturnCaseId::new_v4();
    let case = ReturnCase::new_for_insert(
        id,
        case_code(&settings.code_prefix, &id),
        request.title.trim().to_string(),
        order.base.id,
        order.customer_id.clone(),
        order.insurance_policy_id,
        return_type,
        request.description.trim().to_string(),
        request
            .evidence_photos
            .iter()
            .map(|p| p.trim().to_string())
            .collect(),
        classification.liable_party,
        classification.reason.to_string(),
        request.requested_amount,
    );

    let txn = db.begin().await?;
    repository::insert(&txn, &case).await?;
    let entry = posting::timeline_entry(
        &case,
        actor,
        case.opened_at,
        TimelineAction::Opened,
        None,
        None,
    );
    timeline_repository::insert(&txn, &entry).await?;
    txn.commit().await?;

    tracing::info!(
        case = %case.code(),
        order = %order.code(),
        return_type = %case.return_type,
        liable_party = %case.liable_party,
        actor = %actor.id,
        "Opened return case"
    );

    Ok(OpenReturnResponse {
        id: case.to_string_id(),
        return_code: case.base.code.clone(),
        liable_party: case.liable_party,
        liability_reason: case.liability_reason.clone(),
        status: case.status,
    })
}

/// Администратор берёт обращение в работу: OPENED → UNDER_REVIEW
pub async fn start_review(
    db: &DatabaseConnection,
    actor: &Actor,
    reference: &str,
) -> AppResult<ReturnCaseDetailDto> {
    ensure_admin(actor, "review return cases")?;

    let txn = db.begin().await?;
    let case = find_case(&txn, reference).await?;
    if !case.status.can_transition_to(ReturnStatus::UnderReview) {
        return Err(AppError::State(format!(
            "case {} is {} and cannot be taken for review",
            case.code(),
            case.status
        )));
    }
    let updated = posting::post_take(&txn, &case, actor).await?;
    let dto = detail(&txn, &updated).await?;
    txn.commit().await?;

    tracing::info!(
        case = %updated.code(),
        actor = %actor.id,
        "Return case taken for review"
    );
    Ok(dto)
}

/// Решение по обращению. Выплата из фонда, новый статус и запись
/// истории фиксируются вместе или не фиксируются вовсе.
pub async fn submit_review(
    db: &DatabaseConnection,
    actor: &Actor,
    reference: &str,
    request: ReviewRequest,
) -> AppResult<ReturnCaseDetailDto> {
    ensure_admin(actor, "review return cases")?;

    let txn = db.begin().await?;
    let case = find_case(&txn, reference).await?;
    let policy = match case.insurance_policy_id {
        Some(policy_id) => Some(
            policies::get_by_id(&txn, policy_id.value())
                .await?
                .ok_or_else(|| {
                    AppError::NotFound(format!("Insurance policy {}", policy_id))
                })?,
        ),
        None => None,
    };

    let outcome = review::decide(&case, &request, policy.as_ref())?;
    let updated = posting::post_review(&txn, &case, outcome, actor).await?;
    let dto = detail(&txn, &updated).await?;
    txn.commit().await?;

    tracing::info!(
        case = %updated.code(),
        status = %updated.status,
        liable_party = %updated.liable_party,
        approved_amount = ?updated.approved_amount,
        actor = %actor.id,
        "Return case reviewed"
    );
    Ok(dto)
}

/// Обращение с историей
pub async fn get_case(
    db: &DatabaseConnection,
    actor: &Actor,
    reference: &str,
) -> AppResult<ReturnCaseDetailDto> {
    let case = find_case(db, reference).await?;
    ensure_visible(actor, &case, reference)?;
    detail(db, &case).await
}

/// Список обращений; клиенту отдаются только его собственные
pub async fn list_cases(
    db: &DatabaseConnection,
    actor: &Actor,
    query: ReturnCaseListQuery,
) -> AppResult<ReturnCaseListResponse> {
    let customer_id = if actor.is_admin() {
        query.customer_id.filter(|c| !c.trim().is_empty())
    } else {
        Some(actor.id.clone())
    };
    let filter = CaseFilter {
        status: query.status,
        pending_only: query.pending_only,
        customer_id,
    };
    let limit = query.limit.unwrap_or(DEFAULT_PAGE_SIZE).clamp(1, MAX_PAGE_SIZE);
    let offset = query.offset.unwrap_or(0);

    let items = repository::list(db, &filter, limit, offset)
        .await?
        .iter()
        .map(ReturnCase::to_list_item)
        .collect();
    let total = repository::count(db, &filter).await?;

    Ok(ReturnCaseListResponse {
        items,
        total,
        limit,
        offset,
    })
}

/// Очередь на рассмотрение для панели фонда
pub async fn pending_stats<C: ConnectionTrait>(db: &C) -> AppResult<PendingStats> {
    Ok(repository::pending_stats(db).await?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::projections::p901_risk_fund_ledger::service as ledger;
    use crate::shared::testing::{open_request, seed_order, seed_policy, test_db};
    use contracts::enums::{LedgerEntryType, LiableParty, ShipmentLeg};

    fn settings() -> ReturnsConfig {
        ReturnsConfig::default()
    }

    fn admin() -> Actor {
        Actor::admin("admin-1")
    }

    #[test]
    fn test_case_code_format() {
        let id = ReturnCaseId::new(Uuid::parse_str("3f9a01bc-0000-4000-8000-000000000000").unwrap());
        assert_eq!(case_code("RET", &id), "RET-3F9A01BC");
    }

    #[tokio::test]
    async fn test_open_case_classifies_and_records_timeline() {
        let db = test_db().await;
        let order = seed_order(&db, "cust-1", ShipmentLeg::ChinaTransit, None).await;
        let customer = Actor::customer("cust-1");

        let opened = open_case(&db, &settings(), &customer, open_request(&order, "LOST_IN_TRANSIT"))
            .await
            .unwrap();
        assert_eq!(opened.status, ReturnStatus::Opened);
        assert_eq!(opened.liable_party, LiableParty::ChinaCarrier);
        assert!(!opened.liability_reason.is_empty());
        assert!(opened.return_code.starts_with("RET-"));
        assert_eq!(opened.return_code.len(), 12);

        let case = get_case(&db, &customer, &opened.return_code).await.unwrap();
        assert_eq!(case.id, opened.id);
        assert_eq!(case.customer_id, "cust-1");
        assert_eq!(case.timeline.len(), 1);
        assert_eq!(case.timeline[0].action, TimelineAction::Opened);
        assert_eq!(case.timeline[0].actor_id, "cust-1");
        assert_eq!(case.timeline[0].from_status, None);
    }

    #[tokio::test]
    async fn test_invalid_request_fails_before_lookup() {
        let db = test_db().await;
        let request = OpenReturnRequest {
            order_id: "ORD-DOES-NOT-EXIST".into(),
            return_type: "LOST_IN_TRANSIT".into(),
            title: "Lost".into(),
            description: "bad".into(),
            evidence_photos: vec![],
            requested_amount: None,
        };
        let err = open_case(&db, &settings(), &admin(), request).await.unwrap_err();
        match err {
            AppError::Validation(fields) => {
                let names: Vec<_> = fields.iter().map(|f| f.field.as_str()).collect();
                assert_eq!(names, vec!["description", "evidencePhotos"]);
            }
            other => panic!("expected validation error, got {:?}", other),
        }
        assert_eq!(repository::count(&db, &CaseFilter::default()).await.unwrap(), 0);
    }

    #[tokio::test]
    async fn test_unknown_order_and_foreign_order_are_not_found() {
        let db = test_db().await;
        let order = seed_order(&db, "cust-1", ShipmentLeg::Customs, None).await;

        let mut request = open_request(&order, "OTHER");
        request.order_id = Uuid::new_v4().to_string();
        assert!(matches!(
            open_case(&db, &settings(), &admin(), request).await,
            Err(AppError::NotFound(_))
        ));

        let stranger = Actor::customer("cust-2");
        assert!(matches!(
            open_case(&db, &settings(), &stranger, open_request(&order, "OTHER")).await,
            Err(AppError::NotFound(_))
        ));
    }

    #[tokio::test]
    async fn test_unknown_return_type_is_stored_as_other() {
        let db = test_db().await;
        let order = seed_order(&db, "cust-1", ShipmentLeg::Delivered, None).await;
        let opened = open_case(&db, &settings(), &admin(), open_request(&order, "ALIEN_ABDUCTION"))
            .await
            .unwrap();
        assert_eq!(opened.liable_party, LiableParty::Undetermined);
        let case = get_case(&db, &admin(), &opened.id).await.unwrap();
        assert_eq!(case.return_type, ReturnType::Other);
    }

    #[tokio::test]
    async fn test_end_to_end_approval_pays_from_fund() {
        let db = test_db().await;
        let order = seed_order(&db, "cust-1", ShipmentLeg::ChinaTransit, None).await;
        ledger::post_entry_in(&db, 1_000_000, LedgerEntryType::Premium, "seed", None)
            .await
            .unwrap();

        let opened = open_case(
            &db,
            &settings(),
            &Actor::customer("cust-1"),
            open_request(&order, "LOST_IN_TRANSIT"),
        )
        .await
        .unwrap();
        assert_eq!(opened.liable_party, LiableParty::ChinaCarrier);
        let before = ledger::get_balance(&db).await.unwrap();

        let reviewed = submit_review(&db, &admin(), &opened.id, ReviewRequest::approve(150_000))
            .await
            .unwrap();
        assert_eq!(reviewed.status, ReturnStatus::RefundCompleted);
        assert!(reviewed.status.is_terminal());
        assert_eq!(reviewed.approved_amount, Some(150_000));
        assert!(reviewed.reviewed_at.is_some());
        assert!(reviewed.resolved_at.is_some());
        assert_eq!(reviewed.version, 1);
        assert_eq!(reviewed.timeline.len(), 2);
        assert_eq!(reviewed.timeline[1].action, TimelineAction::Approved);
        assert_eq!(reviewed.timeline[1].from_status, Some(ReturnStatus::Opened));

        assert_eq!(ledger::get_balance(&db).await.unwrap(), before - 150_000);
        let latest = ledger::list_entries(&db, Some(1), None).await.unwrap();
        assert_eq!(latest.len(), 1);
        assert_eq!(latest[0].entry_type, LedgerEntryType::Claim);
        assert_eq!(latest[0].amount, -150_000);
        assert_eq!(latest[0].related_case_code.as_deref(), Some(opened.return_code.as_str()));
        assert_eq!(latest[0].related_case_id.as_deref(), Some(opened.id.as_str()));
    }

    #[tokio::test]
    async fn test_rejection_posts_nothing() {
        let db = test_db().await;
        let order = seed_order(&db, "cust-1", ShipmentLeg::Delivered, None).await;
        let opened = open_case(&db, &settings(), &admin(), open_request(&order, "QUALITY_ISSUE"))
            .await
            .unwrap();

        let reviewed = submit_review(&db, &admin(), &opened.return_code, ReviewRequest::reject("Not covered"))
            .await
            .unwrap();
        assert_eq!(reviewed.status, ReturnStatus::Rejected);
        assert_eq!(reviewed.approved_amount, None);
        assert_eq!(reviewed.review_notes.as_deref(), Some("Not covered"));
        assert!(ledger::list_entries(&db, None, None).await.unwrap().is_empty());
        assert!(ledger::list_by_case(&db, &opened.id).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_zero_approval_is_terminal_without_payout() {
        let db = test_db().await;
        let order = seed_order(&db, "cust-1", ShipmentLeg::Delivered, None).await;
        let opened = open_case(&db, &settings(), &admin(), open_request(&order, "WRONG_DELIVERY"))
            .await
            .unwrap();

        let reviewed = submit_review(&db, &admin(), &opened.id, ReviewRequest::approve(0))
            .await
            .unwrap();
        assert_eq!(reviewed.status, ReturnStatus::Approved);
        assert_eq!(reviewed.approved_amount, Some(0));
        assert!(ledger::list_entries(&db, None, None).await.unwrap().is_empty());

        assert!(matches!(
            submit_review(&db, &admin(), &opened.id, ReviewRequest::approve(10)).await,
            Err(AppError::State(_))
        ));
    }

    #[tokio::test]
    async fn test_terminal_case_rejects_further_reviews_without_side_effects() {
        let db = test_db().await;
        let order = seed_order(&db, "cust-1", ShipmentLeg::MongoliaTransit, None).await;
        let opened = open_case(&db, &settings(), &admin(), open_request(&order, "DAMAGED_IN_TRANSIT"))
            .await
            .unwrap();
        assert_eq!(opened.liable_party, LiableParty::MongoliaCarrier);

        submit_review(&db, &admin(), &opened.id, ReviewRequest::approve(50_000))
            .await
            .unwrap();
        let entries_before = ledger::list_entries(&db, None, None).await.unwrap();
        let case_before = get_case(&db, &admin(), &opened.id).await.unwrap();

        for request in [ReviewRequest::approve(50_000), ReviewRequest::reject("changed my mind")] {
            let err = submit_review(&db, &admin(), &opened.id, request).await.unwrap_err();
            assert!(matches!(err, AppError::State(_)));
        }
        assert!(matches!(
            start_review(&db, &admin(), &opened.id).await,
            Err(AppError::State(_))
        ));

        assert_eq!(ledger::list_entries(&db, None, None).await.unwrap(), entries_before);
        let case_after = get_case(&db, &admin(), &opened.id).await.unwrap();
        assert_eq!(case_after.version, case_before.version);
        assert_eq!(case_after.timeline.len(), case_before.timeline.len());
    }

    #[tokio::test]
    async fn test_policy_cap_rejects_over_limit_approval() {
        let db = test_db().await;
        let policy = seed_policy(&db, 500_000, 80_000).await;
        let order = seed_order(&db, "cust-1", ShipmentLeg::ChinaTransit, Some(&policy)).await;
        let opened = open_case(&db, &settings(), &admin(), open_request(&order, "DAMAGED_IN_TRANSIT"))
            .await
            .unwrap();
        let balance = ledger::get_balance(&db).await.unwrap();
        assert_eq!(balance, 80_000);

        let err = submit_review(&db, &admin(), &opened.id, ReviewRequest::approve(600_000))
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::Validation(_)));
        assert_eq!(ledger::get_balance(&db).await.unwrap(), balance);
        let case = get_case(&db, &admin(), &opened.id).await.unwrap();
        assert_eq!(case.status, ReturnStatus::Opened);

        submit_review(&db, &admin(), &opened.id, ReviewRequest::approve(400_000))
            .await
            .unwrap();
        let claims = ledger::list_by_case(&db, &opened.id).await.unwrap();
        assert_eq!(claims.len(), 1);
        assert_eq!(claims[0].amount, -400_000);
        assert_eq!(ledger::get_balance(&db).await.unwrap(), balance - 400_000);
    }

    #[tokio::test]
    async fn test_start_review_moves_case_into_review() {
        let db = test_db().await;
        let order = seed_order(&db, "cust-1", ShipmentLeg::Customs, None).await;
        let opened = open_case(&db, &settings(), &admin(), open_request(&order, "CUSTOMS_REJECTED"))
            .await
            .unwrap();

        assert!(matches!(
            start_review(&db, &Actor::customer("cust-1"), &opened.id).await,
            Err(AppError::Forbidden(_))
        ));

        let taken = start_review(&db, &admin(), &opened.return_code).await.unwrap();
        assert_eq!(taken.status, ReturnStatus::UnderReview);
        assert_eq!(taken.timeline.last().map(|e| e.action), Some(TimelineAction::ReviewStarted));

        assert!(matches!(
            start_review(&db, &admin(), &opened.id).await,
            Err(AppError::State(_))
        ));

        let reviewed = submit_review(&db, &admin(), &opened.id, ReviewRequest::reject("Customs decision"))
            .await
            .unwrap();
        assert_eq!(reviewed.timeline.len(), 3);
        assert_eq!(reviewed.timeline[2].from_status, Some(ReturnStatus::UnderReview));
    }

    #[tokio::test]
    async fn test_liable_party_override_is_recorded() {
        let db = test_db().await;
        let order = seed_order(&db, "cust-1", ShipmentLeg::ChinaTransit, None).await;
        let opened = open_case(&db, &settings(), &admin(), open_request(&order, "DAMAGED_AT_ORIGIN"))
            .await
            .unwrap();
        assert_eq!(opened.liable_party, LiableParty::Seller);

        let request = ReviewRequest::Rejected {
            liable_party: Some(LiableParty::Customer),
            review_notes: None,
        };
        let reviewed = submit_review(&db, &admin(), &opened.id, request).await.unwrap();
        assert_eq!(reviewed.liable_party, LiableParty::Customer);
        assert_eq!(reviewed.liability_reason, opened.liability_reason);
        let note = reviewed.timeline[1].note.clone().unwrap_or_default();
        assert!(note.contains("SELLER"));
        assert!(note.contains("CUSTOMER"));
    }

    #[tokio::test]
    async fn test_stale_snapshot_is_a_concurrency_conflict() {
        let db = test_db().await;
        let order = seed_order(&db, "cust-1", ShipmentLeg::ChinaTransit, None).await;
        let opened = open_case(&db, &settings(), &admin(), open_request(&order, "LOST_IN_TRANSIT"))
            .await
            .unwrap();
        let id = Uuid::parse_str(&opened.id).unwrap();
        let stale = repository::get_by_id(&db, id).await.unwrap().unwrap();

        submit_review(&db, &admin(), &opened.id, ReviewRequest::approve(1_000))
            .await
            .unwrap();

        let outcome = review::decide(&stale, &ReviewRequest::approve(2_000), None).unwrap();
        let txn = db.begin().await.unwrap();
        let err = posting::post_review(&txn, &stale, outcome, &admin())
            .await
            .unwrap_err();
        txn.rollback().await.unwrap();
        assert!(matches!(err, AppError::ConcurrencyConflict(_)));

        let claims = ledger::list_by_case(&db, &opened.id).await.unwrap();
        assert_eq!(claims.len(), 1);
        assert_eq!(claims[0].amount, -1_000);
    }

    #[tokio::test]
    async fn test_concurrent_reviews_pay_once() {
        let db = test_db().await;
        let order = seed_order(&db, "cust-1", ShipmentLeg::ChinaTransit, None).await;
        let opened = open_case(&db, &settings(), &admin(), open_request(&order, "LOST_IN_TRANSIT"))
            .await
            .unwrap();

        let (first, second) = (admin(), Actor::admin("admin-2"));
        let a = submit_review(&db, &first, &opened.id, ReviewRequest::approve(70_000));
        let b = submit_review(&db, &second, &opened.id, ReviewRequest::approve(80_000));
        let (a, b) = tokio::join!(a, b);

        assert_eq!([a.is_ok(), b.is_ok()].iter().filter(|ok| **ok).count(), 1);
        let loser = if a.is_err() { a } else { b };
        assert!(matches!(
            loser,
            Err(AppError::State(_)) | Err(AppError::ConcurrencyConflict(_))
        ));
        assert_eq!(ledger::list_by_case(&db, &opened.id).await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_list_filters_and_visibility() {
        let db = test_db().await;
        let first = seed_order(&db, "cust-1", ShipmentLeg::ChinaTransit, None).await;
        let second = seed_order(&db, "cust-2", ShipmentLeg::Delivered, None).await;

        let a = open_case(&db, &settings(), &admin(), open_request(&first, "LOST_IN_TRANSIT"))
            .await
            .unwrap();
        open_case(&db, &settings(), &admin(), open_request(&first, "QUALITY_ISSUE"))
            .await
            .unwrap();
        open_case(&db, &settings(), &admin(), open_request(&second, "WRONG_DELIVERY"))
            .await
            .unwrap();
        submit_review(&db, &admin(), &a.id, ReviewRequest::reject("no"))
            .await
            .unwrap();

        let all = list_cases(&db, &admin(), ReturnCaseListQuery::default()).await.unwrap();
        assert_eq!(all.total, 3);
        assert_eq!(all.items.len(), 3);
        assert!(all.items[0].opened_at >= all.items[1].opened_at);

        let queue = list_cases(
            &db,
            &admin(),
            ReturnCaseListQuery {
                pending_only: true,
                ..Default::default()
            },
        )
        .await
        .unwrap();
        assert_eq!(queue.total, 2);
        assert!(queue.items.iter().all(|c| c.status.is_pending()));

        let rejected = list_cases(
            &db,
            &admin(),
            ReturnCaseListQuery {
                status: Some(ReturnStatus::Rejected),
                ..Default::default()
            },
        )
        .await
        .unwrap();
        assert_eq!(rejected.total, 1);
        assert_eq!(rejected.items[0].id, a.id);

        let page = list_cases(
            &db,
            &admin(),
            ReturnCaseListQuery {
                limit: Some(2),
                offset: Some(2),
                ..Default::default()
            },
        )
        .await
        .unwrap();
        assert_eq!(page.items.len(), 1);
        assert_eq!(page.total, 3);

        let own = list_cases(
            &db,
            &Actor::customer("cust-2"),
            ReturnCaseListQuery {
                customer_id: Some("cust-1".into()),
                ..Default::default()
            },
        )
        .await
        .unwrap();
        assert_eq!(own.total, 1);
        assert_eq!(own.items[0].customer_id, "cust-2");

        assert!(matches!(
            get_case(&db, &Actor::customer("cust-2"), &a.id).await,
            Err(AppError::NotFound(_))
        ));
    }

    #[tokio::test]
    async fn test_pending_stats_track_queue() {
        let db = test_db().await;
        let order = seed_order(&db, "cust-1", ShipmentLeg::ChinaTransit, None).await;
        let mut request = open_request(&order, "LOST_IN_TRANSIT");
        request.requested_amount = Some(120_000);
        let a = open_case(&db, &settings(), &admin(), request.clone()).await.unwrap();
        request.requested_amount = Some(30_000);
        let b = open_case(&db, &settings(), &admin(), request).await.unwrap();

        let stats = pending_stats(&db).await.unwrap();
        assert_eq!(stats.count, 2);
        assert_eq!(stats.exposure, 150_000);

        submit_review(&db, &admin(), &a.id, ReviewRequest::approve(100_000))
            .await
            .unwrap();
        let stats = pending_stats(&db).await.unwrap();
        assert_eq!(stats.count, 1);
        assert_eq!(stats.exposure, 30_000);

        start_review(&db, &admin(), &b.id).await.unwrap();
        let stats = pending_stats(&db).await.unwrap();
        assert_eq!(stats.count, 1);
        assert_eq!(stats.exposure, 30_000);
    }
}
