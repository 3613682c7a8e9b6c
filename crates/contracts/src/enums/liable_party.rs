use serde::{Deserialize, Serialize};

/// Сторона, признанная ответственной за причину возврата
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum LiableParty {
    Seller,
    /// Перевозчик китайского плеча (включая склад консолидации)
    ChinaCarrier,
    /// Перевозчик монгольского плеча (включая склад выдачи и доставку)
    MongoliaCarrier,
    Customs,
    Customer,
    Undetermined,
}

impl LiableParty {
    pub fn code(&self) -> &'static str {
        match self {
            LiableParty::Seller => "SELLER",
            LiableParty::ChinaCarrier => "CHINA_CARRIER",
            LiableParty::MongoliaCarrier => "MONGOLIA_CARRIER",
            LiableParty::Customs => "CUSTOMS",
            LiableParty::Customer => "CUSTOMER",
            LiableParty::Undetermined => "UNDETERMINED",
        }
    }

    pub fn all() -> [LiableParty; 6] {
        [
            LiableParty::Seller,
            LiableParty::ChinaCarrier,
            LiableParty::MongoliaCarrier,
            LiableParty::Customs,
            LiableParty::Customer,
            LiableParty::Undetermined,
        ]
    }

    pub fn from_code(code: &str) -> Option<Self> {
        Self::all().into_iter().find(|p| p.code() == code)
    }

    /// Перевозчик одного из плеч маршрута
    pub fn is_carrier(&self) -> bool {
        matches!(self, LiableParty::ChinaCarrier | LiableParty::MongoliaCarrier)
    }
}

impl std::fmt::Display for LiableParty {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.code())
    }
}
