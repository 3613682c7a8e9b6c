use contracts::domain::a001_cargo_order::aggregate::CargoOrder;
use contracts::enums::{LiableParty, ReturnType, ShipmentLeg};

/// Данные заказа, от которых зависит распределение ответственности
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ShipmentContext {
    /// Этап маршрута; None, если этап неизвестен
    pub leg: Option<ShipmentLeg>,
    pub customs_hold: bool,
    pub origin_inspected: bool,
}

impl From<&CargoOrder> for ShipmentContext {
    fn from(order: &CargoOrder) -> Self {
        Self {
            leg: Some(order.shipment_leg),
            customs_hold: order.customs_hold,
            origin_inspected: order.origin_inspected,
        }
    }
}

impl ShipmentContext {
    fn cleared_customs(&self) -> bool {
        self.leg.map(|l| l.past_customs()).unwrap_or(false)
    }
}

/// Предварительное решение об ответственной стороне
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Classification {
    pub liable_party: LiableParty,
    pub reason: &'static str,
}

impl Classification {
    const fn new(liable_party: LiableParty, reason: &'static str) -> Self {
        Self {
            liable_party,
            reason,
        }
    }
}

const UNDETERMINED: Classification = Classification::new(
    LiableParty::Undetermined,
    "The reported issue does not match a known category; responsibility is left for the reviewer to decide.",
);

/// Распределение ответственности по типу возврата и состоянию груза.
///
/// Чистая функция: одинаковый вход всегда даёт одинаковый результат,
/// поэтому сохранённую причину можно перепроверить позже.
pub fn classify(return_type: ReturnType, ctx: &ShipmentContext) -> Classification {
    use LiableParty::*;

    match return_type {
        ReturnType::DamagedInTransit => {
            if ctx.cleared_customs() {
                Classification::new(
                    MongoliaCarrier,
                    "Damage was reported after customs clearance, while the cargo was with the Mongolia-side carrier.",
                )
            } else {
                Classification::new(
                    ChinaCarrier,
                    "Damage was reported before customs clearance, while the cargo was with the China-side carrier.",
                )
            }
        }
        ReturnType::LostInTransit => lost_on_leg(ctx),
        ReturnType::DamagedAtDestinationWarehouse => Classification::new(
            MongoliaCarrier,
            "Damage occurred at the destination warehouse operated by the Mongolia-side carrier.",
        ),
        ReturnType::WrongDelivery => Classification::new(
            MongoliaCarrier,
            "The cargo was handed to the wrong recipient during last-mile delivery in Mongolia.",
        ),
        ReturnType::DamagedAtOrigin => {
            if ctx.origin_inspected {
                Classification::new(
                    ChinaCarrier,
                    "The origin intake inspection passed, so the damage happened after handover to the China-side carrier.",
                )
            } else {
                Classification::new(
                    Seller,
                    "The goods were damaged at origin and no intake inspection cleared them; the seller is responsible.",
                )
            }
        }
        ReturnType::NotArrived => {
            if ctx.customs_hold {
                Classification::new(
                    Customs,
                    "The cargo has not arrived because it is held by customs.",
                )
            } else {
                lost_on_leg(ctx)
            }
        }
        ReturnType::CustomsRejected => Classification::new(
            Customs,
            "Customs refused to clear the cargo.",
        ),
        ReturnType::WrongItemFromSeller => Classification::new(
            Seller,
            "The seller shipped an item different from the one ordered.",
        ),
        ReturnType::QualityIssue => Classification::new(
            Seller,
            "The goods do not meet the ordered quality, which is the seller's responsibility.",
        ),
        ReturnType::Other => UNDETERMINED,
    }
}

fn lost_on_leg(ctx: &ShipmentContext) -> Classification {
    if ctx.cleared_customs() {
        Classification::new(
            LiableParty::MongoliaCarrier,
            "The cargo went missing after customs clearance, while in the custody of the Mongolia-side carrier.",
        )
    } else {
        Classification::new(
            LiableParty::ChinaCarrier,
            "The cargo went missing before customs clearance, while in the custody of the China-side carrier.",
        )
    }
}

/// То же по строковому коду; неизвестный код не ошибка, а UNDETERMINED
pub fn classify_code(code: &str, ctx: &ShipmentContext) -> Classification {
    match ReturnType::from_code(code) {
        Some(return_type) => classify(return_type, ctx),
        None => UNDETERMINED,
    }
}
