use contracts::domain::a002_insurance_policy::aggregate::InsurancePolicy;
use contracts::domain::a003_return_case::aggregate::{ReturnCase, ReviewRequest, TimelineAction};
use contracts::enums::{LiableParty, ReturnStatus};

use crate::shared::error::{AppError, AppResult};
use crate::shared::format::format_amount;

/// Итог рассмотрения, ещё не записанный в базу
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReviewOutcome {
    pub status: ReturnStatus,
    pub action: TimelineAction,
    pub liable_party: LiableParty,
    pub approved_amount: Option<i64>,
    /// Сумма выплаты из фонда (> 0), если она нужна
    pub payout: Option<i64>,
    pub review_notes: Option<String>,
}

/// Проверяет решение по обращению и определяет новый статус.
///
/// Порядок проверок: сначала статус обращения, затем поля решения.
pub fn decide(
    case: &ReturnCase,
    request: &ReviewRequest,
    policy: Option<&InsurancePolicy>,
) -> AppResult<ReviewOutcome> {
    if case.status.is_terminal() {
        return Err(AppError::State(format!(
            "case {} is already {}",
            case.base.code, case.status
        )));
    }

    let liable_party = request.liable_party().unwrap_or(case.liable_party);
    let review_notes = request
        .review_notes()
        .map(str::trim)
        .filter(|n| !n.is_empty())
        .map(str::to_string);

    let outcome = match request {
        ReviewRequest::Approved {
            approved_amount, ..
        } => {
            let amount = approved_amount
                .ok_or_else(|| AppError::field("approvedAmount", "is required for approval"))?;
            if amount < 0 {
                return Err(AppError::field("approvedAmount", "must not be negative"));
            }
            if let Some(policy) = policy {
                if !policy.covers(amount) {
                    return Err(AppError::field(
                        "approvedAmount",
                        format!(
                            "exceeds the max payout of policy {} ({})",
                            policy.base.code,
                            format_amount(policy.max_payout)
                        ),
                    ));
                }
            }
            let (status, payout) = if amount > 0 {
                (ReturnStatus::RefundCompleted, Some(amount))
            } else {
                (ReturnStatus::Approved, None)
            };
            ReviewOutcome {
                status,
                action: TimelineAction::Approved,
                liable_party,
                approved_amount: Some(amount),
                payout,
                review_notes,
            }
        }
        ReviewRequest::Rejected { .. } => ReviewOutcome {
            status: ReturnStatus::Rejected,
            action: TimelineAction::Rejected,
            liable_party,
            approved_amount: None,
            payout: None,
            review_notes,
        },
    };

    if !case.status.can_transition_to(outcome.status) {
        return Err(AppError::State(format!(
            "case {} cannot move from {} to {}",
            case.base.code, case.status, outcome.status
        )));
    }
    Ok(outcome)
}

#[cfg(test)]
mod tests {
    use super::*;
    use contracts::domain::a001_cargo_order::aggregate::CargoOrderId;
    use contracts::domain::a003_return_case::aggregate::ReturnCaseId;
    use contracts::enums::ReturnType;

    fn case_with_status(status: ReturnStatus) -> ReturnCase {
        let mut case = ReturnCase::new_for_insert(
            ReturnCaseId::new_v4(),
            "RET-00000001".into(),
            "Broken box".into(),
            CargoOrderId::new_v4(),
            "cust-1".into(),
            None,
            ReturnType::DamagedInTransit,
            "Box arrived crushed".into(),
            vec!["photo-1.jpg".into()],
            LiableParty::ChinaCarrier,
            "reason".into(),
            Some(200_000),
        );
        case.status = status;
        case
    }

    fn policy(max_payout: i64) -> InsurancePolicy {
        InsurancePolicy::new_for_insert("POL-1".into(), "Standard".into(), max_payout, 10_000)
    }

    #[test]
    fn test_positive_approval_pays_out() {
        let case = case_with_status(ReturnStatus::UnderReview);
        let outcome = decide(&case, &ReviewRequest::approve(150_000), None).unwrap();
        assert_eq!(outcome.status, ReturnStatus::RefundCompleted);
        assert_eq!(outcome.payout, Some(150_000));
        assert_eq!(outcome.approved_amount, Some(150_000));
        assert_eq!(outcome.liable_party, LiableParty::ChinaCarrier);
    }

    #[test]
    fn test_zero_approval_has_no_payout() {
        let case = case_with_status(ReturnStatus::Opened);
        let outcome = decide(&case, &ReviewRequest::approve(0), None).unwrap();
        assert_eq!(outcome.status, ReturnStatus::Approved);
        assert_eq!(outcome.payout, None);
        assert_eq!(outcome.approved_amount, Some(0));
    }

    #[test]
    fn test_approval_requires_non_negative_amount() {
        let case = case_with_status(ReturnStatus::Opened);
        let missing = ReviewRequest::Approved {
            liable_party: None,
            approved_amount: None,
            review_notes: None,
        };
        assert!(matches!(
            decide(&case, &missing, None),
            Err(AppError::Validation(_))
        ));
        assert!(matches!(
            decide(&case, &ReviewRequest::approve(-1), None),
            Err(AppError::Validation(_))
        ));
    }

    #[test]
    fn test_policy_cap_is_a_hard_limit() {
        let case = case_with_status(ReturnStatus::UnderReview);
        let policy = policy(500_000);
        let err = decide(&case, &ReviewRequest::approve(600_000), Some(&policy)).unwrap_err();
        match err {
            AppError::Validation(fields) => assert_eq!(fields[0].field, "approvedAmount"),
            other => panic!("unexpected error: {:?}", other),
        }
        let ok = decide(&case, &ReviewRequest::approve(500_000), Some(&policy)).unwrap();
        assert_eq!(ok.payout, Some(500_000));
    }

    #[test]
    fn test_rejection_ignores_amount_and_keeps_override() {
        let case = case_with_status(ReturnStatus::Opened);
        let request = ReviewRequest::Rejected {
            liable_party: Some(LiableParty::Customer),
            review_notes: Some("  Packed by customer  ".into()),
        };
        let outcome = decide(&case, &request, None).unwrap();
        assert_eq!(outcome.status, ReturnStatus::Rejected);
        assert_eq!(outcome.approved_amount, None);
        assert_eq!(outcome.payout, None);
        assert_eq!(outcome.liable_party, LiableParty::Customer);
        assert_eq!(outcome.review_notes.as_deref(), Some("Packed by customer"));
    }

    #[test]
    fn test_terminal_cases_reject_any_decision() {
        for status in [
            ReturnStatus::Approved,
            ReturnStatus::RefundCompleted,
            ReturnStatus::Rejected,
        ] {
            let case = case_with_status(status);
            for request in [ReviewRequest::approve(1), ReviewRequest::reject("late")] {
                assert!(matches!(
                    decide(&case, &request, None),
                    Err(AppError::State(_))
                ));
            }
        }
    }

    #[test]
    fn test_state_error_wins_over_field_errors() {
        let case = case_with_status(ReturnStatus::Rejected);
        assert!(matches!(
            decide(&case, &ReviewRequest::approve(-5), None),
            Err(AppError::State(_))
        ));
    }
}
