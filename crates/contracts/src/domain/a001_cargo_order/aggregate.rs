use crate::domain::a002_insurance_policy::aggregate::InsurancePolicyId;
use crate::domain::common::{AggregateRoot, BaseAggregate, EntityMetadata};
use crate::enums::ShipmentLeg;
use serde::{Deserialize, Serialize};

crate::aggregate_id!(
    /// ID заказа на перевозку
    CargoOrderId
);

/// Заказ на перевозку груза Китай → Монголия.
///
/// Ведётся во внешней системе приёма заказов; здесь хранится только то,
/// что нужно для разбора возвратов.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CargoOrder {
    #[serde(flatten)]
    pub base: BaseAggregate<CargoOrderId>,

    /// ID клиента во внешней системе
    pub customer_id: String,

    /// Текущий этап маршрута
    pub shipment_leg: ShipmentLeg,

    /// Груз задержан таможней
    pub customs_hold: bool,

    /// Приёмка на складе в Китае прошла без замечаний
    pub origin_inspected: bool,

    /// Объявленная стоимость груза
    pub declared_value: i64,

    /// Страховой полис, если груз застрахован
    pub insurance_policy_id: Option<InsurancePolicyId>,
}

impl CargoOrder {
    #[allow(clippy::too_many_arguments)]
    pub fn new_for_insert(
        code: String,
        description: String,
        customer_id: String,
        shipment_leg: ShipmentLeg,
        customs_hold: bool,
        origin_inspected: bool,
        declared_value: i64,
        insurance_policy_id: Option<InsurancePolicyId>,
    ) -> Self {
        Self {
            base: BaseAggregate::new(CargoOrderId::new_v4(), code, description),
            customer_id,
            shipment_leg,
            customs_hold,
            origin_inspected,
            declared_value,
            insurance_policy_id,
        }
    }

    pub fn validate(&self) -> Result<(), String> {
        if self.base.code.trim().is_empty() {
            return Err("Order code must not be empty".into());
        }
        if self.customer_id.trim().is_empty() {
            return Err("Customer is required".into());
        }
        if self.declared_value < 0 {
            return Err("Declared value must not be negative".into());
        }
        Ok(())
    }
}

impl AggregateRoot for CargoOrder {
    type Id = CargoOrderId;

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
        "a001"
    }

    fn collection_name() -> &'static str {
        "cargo_order"
    }

    fn element_name() -> &'static str {
        "Cargo order"
    }
}
