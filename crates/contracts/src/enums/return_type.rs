use serde::{Deserialize, Serialize};

/// Категория проблемы, заявленной клиентом по возврату
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ReturnType {
    DamagedInTransit,
    LostInTransit,
    DamagedAtDestinationWarehouse,
    WrongDelivery,
    DamagedAtOrigin,
    NotArrived,
    CustomsRejected,
    WrongItemFromSeller,
    QualityIssue,
    Other,
}

impl ReturnType {
    /// Код для хранения и обмена
    pub fn code(&self) -> &'static str {
        match self {
            ReturnType::DamagedInTransit => "DAMAGED_IN_TRANSIT",
            ReturnType::LostInTransit => "LOST_IN_TRANSIT",
            ReturnType::DamagedAtDestinationWarehouse => "DAMAGED_AT_DESTINATION_WAREHOUSE",
            ReturnType::WrongDelivery => "WRONG_DELIVERY",
            ReturnType::DamagedAtOrigin => "DAMAGED_AT_ORIGIN",
            ReturnType::NotArrived => "NOT_ARRIVED",
            ReturnType::CustomsRejected => "CUSTOMS_REJECTED",
            ReturnType::WrongItemFromSeller => "WRONG_ITEM_FROM_SELLER",
            ReturnType::QualityIssue => "QUALITY_ISSUE",
            ReturnType::Other => "OTHER",
        }
    }

    pub fn all() -> [ReturnType; 10] {
        [
            ReturnType::DamagedInTransit,
            ReturnType::LostInTransit,
            ReturnType::DamagedAtDestinationWarehouse,
            ReturnType::WrongDelivery,
            ReturnType::DamagedAtOrigin,
            ReturnType::NotArrived,
            ReturnType::CustomsRejected,
            ReturnType::WrongItemFromSeller,
            ReturnType::QualityIssue,
            ReturnType::Other,
        ]
    }

    /// Парсинг из строки (регистр не важен, допускаются дефисы)
    pub fn from_code(code: &str) -> Option<Self> {
        let normalized = code.trim().to_ascii_uppercase().replace('-', "_");
        Self::all().into_iter().find(|t| t.code() == normalized)
    }
}

impl std::fmt::Display for ReturnType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.code())
    }
}
