use crate::enums::LedgerEntryType;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Движение по фонду рисков (запись регистра, только добавление)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LedgerEntryDto {
    pub id: String,
    pub created_at: DateTime<Utc>,
    /// > 0 поступление, < 0 списание
    pub amount: i64,
    pub entry_type: LedgerEntryType,
    pub description: String,
    /// Обращение-регистратор (для CLAIM)
    pub related_case_id: Option<String>,
    pub related_case_code: Option<String>,
}

/// POST /api/insurance/fund/entries (PREMIUM / ADJUSTMENT)
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PostEntryRequest {
    pub amount: i64,
    pub entry_type: LedgerEntryType,
    #[serde(default)]
    pub description: String,
}

/// Итоги по фонду
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LedgerTotals {
    /// Сумма положительных движений
    pub total_in: i64,
    /// Сумма отрицательных движений (по модулю)
    pub total_out: i64,
}

impl LedgerTotals {
    pub fn balance(&self) -> i64 {
        self.total_in - self.total_out
    }
}

/// GET /api/insurance/fund/entries query
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LedgerPageQuery {
    pub limit: Option<u64>,
    /// Курсор: только записи строго раньше этого момента
    pub before: Option<DateTime<Utc>>,
}
