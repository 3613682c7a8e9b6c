use contracts::domain::a001_cargo_order::aggregate::{CargoOrder, CargoOrderId};
use contracts::domain::a002_insurance_policy::aggregate::InsurancePolicy;
use contracts::domain::common::AggregateRoot;
use contracts::enums::ShipmentLeg;
use sea_orm::{ConnectionTrait, DatabaseConnection};
use uuid::Uuid;

use super::repository;
use crate::domain::a002_insurance_policy::{
    repository as policy_repository, service as policy_service,
};
use crate::shared::error::{AppError, AppResult};

/// Поиск заказа по UUID или по коду
pub async fn find_by_ref<C: ConnectionTrait>(db: &C, reference: &str) -> AppResult<CargoOrder> {
    let reference = reference.trim();
    let found = match Uuid::parse_str(reference) {
        Ok(uuid) => repository::get_by_id(db, uuid).await?,
        Err(_) => repository::get_by_code(db, reference).await?,
    };
    found.ok_or_else(|| {
        AppError::NotFound(format!("{} {}", CargoOrder::element_name(), reference))
    })
}

pub async fn create(db: &DatabaseConnection, order: CargoOrder) -> AppResult<CargoOrderId> {
    order.validate().map_err(|e| AppError::field("order", e))?;
    repository::insert(db, &order).await?;
    tracing::info!(
        order = %order.code(),
        leg = order.shipment_leg.code(),
        insured = order.insurance_policy_id.is_some(),
        "Registered cargo order"
    );
    Ok(order.base.id)
}

/// Демонстрационные полисы и заказы. Повторный вызов ничего не дублирует.
pub async fn insert_test_data(db: &DatabaseConnection) -> AppResult<usize> {
    let policies = [
        ("POL-BASIC", "Basic cargo cover", 500_000, 25_000),
        ("POL-STANDARD", "Standard cargo cover", 2_000_000, 80_000),
        ("POL-PREMIUM", "Premium cargo cover", 5_000_000, 200_000),
    ];
    let mut policy_ids = Vec::with_capacity(policies.len());
    for (code, description, max_payout, premium) in policies {
        let id = match policy_repository::get_by_code(db, code).await? {
            Some(existing) => existing.base.id,
            None => {
                let policy = InsurancePolicy::new_for_insert(
                    code.into(),
                    description.into(),
                    max_payout,
                    premium,
                );
                policy_service::register(db, policy).await?
            }
        };
        policy_ids.push(id);
    }
    let [basic, standard, premium] = [policy_ids[0], policy_ids[1], policy_ids[2]];

    let orders = [
        (
            "ORD-1001",
            "Electronics, Guangzhou to Ulaanbaatar",
            "cust-1",
            ShipmentLeg::ChinaTransit,
            false,
            true,
            3_200_000,
            Some(standard),
        ),
        (
            "ORD-1002",
            "Furniture set",
            "cust-1",
            ShipmentLeg::MongoliaTransit,
            false,
            true,
            4_500_000,
            Some(premium),
        ),
        (
            "ORD-1003",
            "Clothing batch",
            "cust-2",
            ShipmentLeg::Customs,
            true,
            false,
            900_000,
            Some(basic),
        ),
        (
            "ORD-1004",
            "Auto parts",
            "cust-2",
            ShipmentLeg::OriginWarehouse,
            false,
            false,
            1_500_000,
            None,
        ),
        (
            "ORD-1005",
            "Kitchenware",
            "cust-3",
            ShipmentLeg::Delivered,
            false,
            true,
            650_000,
            Some(basic),
        ),
    ];
    let mut created = 0;
    for (code, description, customer, leg, customs_hold, inspected, value, policy) in orders {
        if repository::get_by_code(db, code).await?.is_some() {
            continue;
        }
        let order = CargoOrder::new_for_insert(
            code.into(),
            description.into(),
            customer.into(),
            leg,
            customs_hold,
            inspected,
            value,
            policy,
        );
        create(db, order).await?;
        created += 1;
    }

    tracing::info!(created, "Inserted cargo order test data");
    Ok(created)
}
