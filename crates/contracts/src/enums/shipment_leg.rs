use serde::{Deserialize, Serialize};

/// Этап маршрута Китай → Монголия, на котором находится груз
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ShipmentLeg {
    OriginWarehouse,
    ChinaTransit,
    Customs,
    MongoliaTransit,
    DestinationWarehouse,
    Delivered,
}

impl ShipmentLeg {
    pub fn code(&self) -> &'static str {
        match self {
            ShipmentLeg::OriginWarehouse => "ORIGIN_WAREHOUSE",
            ShipmentLeg::ChinaTransit => "CHINA_TRANSIT",
            ShipmentLeg::Customs => "CUSTOMS",
            ShipmentLeg::MongoliaTransit => "MONGOLIA_TRANSIT",
            ShipmentLeg::DestinationWarehouse => "DESTINATION_WAREHOUSE",
            ShipmentLeg::Delivered => "DELIVERED",
        }
    }

    pub fn all() -> [ShipmentLeg; 6] {
        [
            ShipmentLeg::OriginWarehouse,
            ShipmentLeg::ChinaTransit,
            ShipmentLeg::Customs,
            ShipmentLeg::MongoliaTransit,
            ShipmentLeg::DestinationWarehouse,
            ShipmentLeg::Delivered,
        ]
    }

    pub fn from_code(code: &str) -> Option<Self> {
        Self::all().into_iter().find(|l| l.code() == code)
    }

    /// Груз прошёл таможню и находится на монгольской стороне
    pub fn past_customs(&self) -> bool {
        *self >= ShipmentLeg::MongoliaTransit
    }
}
