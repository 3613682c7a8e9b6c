use serde::{Deserialize, Serialize};

/// Тип движения по фонду рисков
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum LedgerEntryType {
    /// Страховая премия (поступление, сумма > 0)
    Premium,
    /// Выплата по возврату (списание, сумма < 0)
    Claim,
    /// Ручная корректировка, знак любой
    Adjustment,
}

impl LedgerEntryType {
    pub fn code(&self) -> &'static str {
        match self {
            LedgerEntryType::Premium => "PREMIUM",
            LedgerEntryType::Claim => "CLAIM",
            LedgerEntryType::Adjustment => "ADJUSTMENT",
        }
    }

    pub fn from_code(code: &str) -> Option<Self> {
        match code {
            "PREMIUM" => Some(LedgerEntryType::Premium),
            "CLAIM" => Some(LedgerEntryType::Claim),
            "ADJUSTMENT" => Some(LedgerEntryType::Adjustment),
            _ => None,
        }
    }

    pub fn all() -> [LedgerEntryType; 3] {
        [
            LedgerEntryType::Premium,
            LedgerEntryType::Claim,
            LedgerEntryType::Adjustment,
        ]
    }

    /// Проверка знака суммы для данного типа движения
    pub fn accepts_amount(&self, amount: i64) -> bool {
        match self {
            LedgerEntryType::Premium => amount > 0,
            LedgerEntryType::Claim => amount < 0,
            LedgerEntryType::Adjustment => amount != 0,
        }
    }
}

impl std::fmt::Display for LedgerEntryType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.code())
    }
}
