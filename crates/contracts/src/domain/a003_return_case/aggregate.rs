use crate::domain::a001_cargo_order::aggregate::CargoOrderId;
use crate::domain::a002_insurance_policy::aggregate::InsurancePolicyId;
use crate::domain::common::{AggregateId, AggregateRoot, BaseAggregate, EntityMetadata};
use crate::enums::{LiableParty, ReturnStatus, ReturnType};
use crate::shared::validation::{FieldError, ValidationRules};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

crate::aggregate_id!(
    /// ID обращения по возврату
    ReturnCaseId
);

// ============================================================================
// Aggregate
// ============================================================================

/// Обращение клиента по проблеме с грузом (повреждение, утеря, пересорт).
///
/// `base.code`: человекочитаемый код `RET-XXXXXXXX`; `base.description`: заголовок.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReturnCase {
    #[serde(flatten)]
    pub base: BaseAggregate<ReturnCaseId>,

    pub order_id: CargoOrderId,
    pub customer_id: String,
    /// Полис заказа на момент открытия обращения
    pub insurance_policy_id: Option<InsurancePolicyId>,

    pub return_type: ReturnType,
    /// Текст обращения от клиента
    pub details: String,
    /// Ссылки на фото (порядок сохраняется)
    pub evidence_photos: Vec<String>,

    pub status: ReturnStatus,
    pub liable_party: LiableParty,
    pub liability_reason: String,

    pub requested_amount: Option<i64>,
    /// Заполняется только при одобрении
    pub approved_amount: Option<i64>,
    pub review_notes: Option<String>,

    pub opened_at: DateTime<Utc>,
    pub reviewed_at: Option<DateTime<Utc>>,
    pub resolved_at: Option<DateTime<Utc>>,
}

impl ReturnCase {
    #[allow(clippy::too_many_arguments)]
    pub fn new_for_insert(
        id: ReturnCaseId,
        code: String,
        title: String,
        order_id: CargoOrderId,
        customer_id: String,
        insurance_policy_id: Option<InsurancePolicyId>,
        return_type: ReturnType,
        details: String,
        evidence_photos: Vec<String>,
        liable_party: LiableParty,
        liability_reason: String,
        requested_amount: Option<i64>,
    ) -> Self {
        let base = BaseAggregate::new(id, code, title);
        let opened_at = base.metadata.created_at;
        Self {
            base,
            order_id,
            customer_id,
            insurance_policy_id,
            return_type,
            details,
            evidence_photos,
            status: ReturnStatus::Opened,
            liable_party,
            liability_reason,
            requested_amount,
            approved_amount: None,
            review_notes: None,
            opened_at,
            reviewed_at: None,
            resolved_at: None,
        }
    }

    pub fn to_string_id(&self) -> String {
        self.base.id.as_string()
    }

    pub fn to_list_item(&self) -> ReturnCaseListItemDto {
        ReturnCaseListItemDto {
            id: self.to_string_id(),
            return_code: self.base.code.clone(),
            order_id: self.order_id.as_string(),
            customer_id: self.customer_id.clone(),
            return_type: self.return_type,
            title: self.base.description.clone(),
            status: self.status,
            liable_party: self.liable_party,
            requested_amount: self.requested_amount,
            approved_amount: self.approved_amount,
            opened_at: self.opened_at,
        }
    }

    pub fn to_detail_dto(&self, timeline: Vec<TimelineEntry>) -> ReturnCaseDetailDto {
        ReturnCaseDetailDto {
            id: self.to_string_id(),
            return_code: self.base.code.clone(),
            order_id: self.order_id.as_string(),
            customer_id: self.customer_id.clone(),
            insurance_policy_id: self.insurance_policy_id.map(|p| p.as_string()),
            return_type: self.return_type,
            title: self.base.description.clone(),
            description: self.details.clone(),
            evidence_photos: self.evidence_photos.clone(),
            status: self.status,
            liable_party: self.liable_party,
            liability_reason: self.liability_reason.clone(),
            requested_amount: self.requested_amount,
            approved_amount: self.approved_amount,
            review_notes: self.review_notes.clone(),
            opened_at: self.opened_at,
            reviewed_at: self.reviewed_at,
            resolved_at: self.resolved_at,
            version: self.base.metadata.version,
            timeline,
        }
    }
}

impl AggregateRoot for ReturnCase {
    type Id = ReturnCaseId;

    fn id(&self) -> Self::Id {
        self.base.id
    }

    fn code(&self) -> &str {
        &self.base.code
    }

    fn description(&self) -> &str {
        &self.base.description
    }

    fn metadata(&self) -> &EntityMetadata {
        &self.base.metadata
    }

    fn aggregate_index() -> &'static str {
        "a003"
    }

    fn collection_name() -> &'static str {
        "return_case"
    }

    fn element_name() -> &'static str {
        "Return case"
    }
}

// ============================================================================
// Timeline
// ============================================================================

/// Действие в истории обращения
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TimelineAction {
    Opened,
    ReviewStarted,
    Approved,
    Rejected,
}

impl TimelineAction {
    pub fn code(&self) -> &'static str {
        match self {
            TimelineAction::Opened => "OPENED",
            TimelineAction::ReviewStarted => "REVIEW_STARTED",
            TimelineAction::Approved => "APPROVED",
            TimelineAction::Rejected => "REJECTED",
        }
    }

    pub fn from_code(code: &str) -> Option<Self> {
        match code {
            "OPENED" => Some(TimelineAction::Opened),
            "REVIEW_STARTED" => Some(TimelineAction::ReviewStarted),
            "APPROVED" => Some(TimelineAction::Approved),
            "REJECTED" => Some(TimelineAction::Rejected),
            _ => None,
        }
    }
}

/// Запись истории обращения: кто, что и когда сделал
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TimelineEntry {
    pub id: String,
    pub case_id: String,
    pub at: DateTime<Utc>,
    pub actor_id: String,
    pub action: TimelineAction,
    pub from_status: Option<ReturnStatus>,
    pub to_status: ReturnStatus,
    pub note: Option<String>,
}

// ============================================================================
// Requests
// ============================================================================

/// POST /api/returns
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OpenReturnRequest {
    /// UUID или код заказа
    #[serde(default)]
    pub order_id: String,
    /// Код типа возврата; неизвестный код обрабатывается как OTHER
    #[serde(default)]
    pub return_type: String,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub evidence_photos: Vec<String>,
    #[serde(default)]
    pub requested_amount: Option<i64>,
}

impl OpenReturnRequest {
    /// Проверка полей запроса. Возвращает все ошибки сразу.
    pub fn validate(&self, min_description_length: usize) -> Result<(), Vec<FieldError>> {
        let mut errors = Vec::new();

        if let Err(e) = ValidationRules::required().validate_string(&self.order_id, "orderId") {
            errors.push(e);
        }
        if let Err(e) = ValidationRules::required()
            .with_max_length(200)
            .validate_string(&self.title, "title")
        {
            errors.push(e);
        }
        if let Err(e) = ValidationRules::required()
            .with_min_length(min_description_length)
            .validate_string(&self.description, "description")
        {
            errors.push(e);
        }
        if let Err(e) = ValidationRules::none()
            .with_min_items(1)
            .validate_list(&self.evidence_photos, "evidencePhotos")
        {
            errors.push(e);
        }
        if let Some(amount) = self.requested_amount {
            if amount <= 0 {
                errors.push(FieldError::new("requestedAmount", "must be positive"));
            }
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }
}

/// PATCH /api/returns/:id/review
///
/// Решение администратора. Сумма имеет смысл только для APPROVED;
/// для REJECTED лишние поля игнорируются.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ReviewRequest {
    #[serde(rename_all = "camelCase")]
    Approved {
        #[serde(default)]
        liable_party: Option<LiableParty>,
        #[serde(default)]
        approved_amount: Option<i64>,
        #[serde(default)]
        review_notes: Option<String>,
    },
    #[serde(rename_all = "camelCase")]
    Rejected {
        #[serde(default)]
        liable_party: Option<LiableParty>,
        #[serde(default)]
        review_notes: Option<String>,
    },
}

impl ReviewRequest {
    pub fn approve(amount: i64) -> Self {
        ReviewRequest::Approved {
            liable_party: None,
            approved_amount: Some(amount),
            review_notes: None,
        }
    }

    pub fn reject(notes: impl Into<String>) -> Self {
        ReviewRequest::Rejected {
            liable_party: None,
            review_notes: Some(notes.into()),
        }
    }

    pub fn liable_party(&self) -> Option<LiableParty> {
        match self {
            ReviewRequest::Approved { liable_party, .. }
            | ReviewRequest::Rejected { liable_party, .. } => *liable_party,
        }
    }

    pub fn review_notes(&self) -> Option<&str> {
        match self {
            ReviewRequest::Approved { review_notes, .. }
            | ReviewRequest::Rejected { review_notes, .. } => review_notes.as_deref(),
        }
    }
}

/// GET /api/returns query
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReturnCaseListQuery {
    pub status: Option<ReturnStatus>,
    /// Только очередь на рассмотрение (OPENED, UNDER_REVIEW)
    #[serde(default)]
    pub pending_only: bool,
    pub customer_id: Option<String>,
    pub limit: Option<u64>,
    pub offset: Option<u64>,
}

// ============================================================================
// Responses
// ============================================================================

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OpenReturnResponse {
    pub id: String,
    pub return_code: String,
    pub liable_party: LiableParty,
    pub liability_reason: String,
    pub status: ReturnStatus,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReturnCaseListItemDto {
    pub id: String,
    pub return_code: String,
    pub order_id: String,
    pub customer_id: String,
    pub return_type: ReturnType,
    pub title: String,
    pub status: ReturnStatus,
    pub liable_party: LiableParty,
    pub requested_amount: Option<i64>,
    pub approved_amount: Option<i64>,
    pub opened_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReturnCaseListResponse {
    pub items: Vec<ReturnCaseListItemDto>,
    pub total: u64,
    pub limit: u64,
    pub offset: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReturnCaseDetailDto {
    pub id: String,
    pub return_code: String,
    pub order_id: String,
    pub customer_id: String,
    pub insurance_policy_id: Option<String>,
    pub return_type: ReturnType,
    pub title: String,
    pub description: String,
    pub evidence_photos: Vec<String>,
    pub status: ReturnStatus,
    pub liable_party: LiableParty,
    pub liability_reason: String,
    pub requested_amount: Option<i64>,
    pub approved_amount: Option<i64>,
    pub review_notes: Option<String>,
    pub opened_at: DateTime<Utc>,
    pub reviewed_at: Option<DateTime<Utc>>,
    pub resolved_at: Option<DateTime<Utc>>,
    pub version: i32,
    pub timeline: Vec<TimelineEntry>,
}
