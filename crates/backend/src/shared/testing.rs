//! Общие заготовки для тестов: отдельная база на тест и начальные данные

use contracts::domain::a001_cargo_order::aggregate::CargoOrder;
use contracts::domain::a002_insurance_policy::aggregate::InsurancePolicy;
use contracts::domain::a003_return_case::aggregate::OpenReturnRequest;
use contracts::enums::ShipmentLeg;
use sea_orm::DatabaseConnection;
use uuid::Uuid;

use crate::domain::a001_cargo_order::service as orders;
use crate::domain::a002_insurance_policy::service as policies;
use crate::shared::data::db::connect_in_memory;

pub async fn test_db() -> DatabaseConnection {
    connect_in_memory().await.expect("in-memory database")
}

fn short_id() -> String {
    Uuid::new_v4().simple().to_string()[..8].to_ascii_uppercase()
}

pub async fn seed_policy(db: &DatabaseConnection, max_payout: i64, premium: i64) -> InsurancePolicy {
    let policy = InsurancePolicy::new_for_insert(
        format!("POL-{}", short_id()),
        "Test policy".into(),
        max_payout,
        premium,
    );
    policies::register(db, policy.clone())
        .await
        .expect("register policy");
    policy
}

pub async fn seed_order(
    db: &DatabaseConnection,
    customer_id: &str,
    leg: ShipmentLeg,
    policy: Option<&InsurancePolicy>,
) -> CargoOrder {
    let order = CargoOrder::new_for_insert(
        format!("ORD-{}", short_id()),
        "Test cargo".into(),
        customer_id.into(),
        leg,
        false,
        false,
        1_000_000,
        policy.map(|p| p.base.id),
    );
    orders::create(db, order.clone()).await.expect("create order");
    order
}

pub fn open_request(order: &CargoOrder, return_type: &str) -> OpenReturnRequest {
    OpenReturnRequest {
        order_id: order.base.id.value().to_string(),
        return_type: return_type.into(),
        title: "Problem with my cargo".into(),
        description: "The parcel did not arrive in the expected condition.".into(),
        evidence_photos: vec!["https://files.example/photo-1.jpg".into()],
        requested_amount: None,
    }
}
