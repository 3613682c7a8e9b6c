use serde::{Deserialize, Serialize};

/// Статус обращения по возврату.
///
/// `OPENED → UNDER_REVIEW → {APPROVED | REFUND_COMPLETED} | REJECTED`.
/// Переходы только вперёд; APPROVED, REFUND_COMPLETED и REJECTED конечные.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ReturnStatus {
    Opened,
    UnderReview,
    /// Решение положительное, выплата из фонда не требуется (сумма 0)
    Approved,
    /// Выплата проведена по фонду
    RefundCompleted,
    Rejected,
}

impl ReturnStatus {
    pub fn code(&self) -> &'static str {
        match self {
            ReturnStatus::Opened => "OPENED",
            ReturnStatus::UnderReview => "UNDER_REVIEW",
            ReturnStatus::Approved => "APPROVED",
            ReturnStatus::RefundCompleted => "REFUND_COMPLETED",
            ReturnStatus::Rejected => "REJECTED",
        }
    }

    pub fn all() -> [ReturnStatus; 5] {
        [
            ReturnStatus::Opened,
            ReturnStatus::UnderReview,
            ReturnStatus::Approved,
            ReturnStatus::RefundCompleted,
            ReturnStatus::Rejected,
        ]
    }

    pub fn from_code(code: &str) -> Option<Self> {
        Self::all().into_iter().find(|s| s.code() == code)
    }

    /// Статусы очереди на рассмотрение
    pub fn pending() -> [ReturnStatus; 2] {
        [ReturnStatus::Opened, ReturnStatus::UnderReview]
    }

    pub fn is_pending(&self) -> bool {
        matches!(self, ReturnStatus::Opened | ReturnStatus::UnderReview)
    }

    pub fn is_terminal(&self) -> bool {
        !self.is_pending()
    }

    /// Допустим ли переход из текущего статуса в `next`
    pub fn can_transition_to(&self, next: ReturnStatus) -> bool {
        use ReturnStatus::*;
        match (self, next) {
            (Opened, UnderReview) => true,
            (Opened | UnderReview, Approved | RefundCompleted | Rejected) => true,
            _ => false,
        }
    }
}

impl std::fmt::Display for ReturnStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.code())
    }
}
