use anyhow::Result;
use chrono::Utc;
use contracts::domain::a001_cargo_order::aggregate::{CargoOrder, CargoOrderId};
use contracts::domain::a002_insurance_policy::aggregate::InsurancePolicyId;
use contracts::domain::common::{BaseAggregate, EntityMetadata};
use contracts::enums::ShipmentLeg;
use sea_orm::entity::prelude::*;
use sea_orm::{ConnectionTrait, EntityTrait, QueryFilter, Set};
use uuid::Uuid;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "a001_cargo_order")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,
    pub code: String,
    pub description: String,
    pub comment: Option<String>,
    pub customer_id: String,
    pub shipment_leg: String,
    pub customs_hold: bool,
    pub origin_inspected: bool,
    pub declared_value: i64,
    pub insurance_policy_id: Option<String>,
    pub is_deleted: bool,
    pub created_at: Option<chrono::DateTime<chrono::Utc>>,
    pub updated_at: Option<chrono::DateTime<chrono::Utc>>,
    pub version: i32,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

impl TryFrom<Model> for CargoOrder {
    type Error = anyhow::Error;

    fn try_from(m: Model) -> Result<Self> {
        let metadata = EntityMetadata {
            created_at: m.created_at.unwrap_or_else(Utc::now),
            updated_at: m.updated_at.unwrap_or_else(Utc::now),
            is_deleted: m.is_deleted,
            version: m.version,
        };
        let uuid = Uuid::parse_str(&m.id)
            .map_err(|e| anyhow::anyhow!("corrupted order id {}: {}", m.id, e))?;
        let shipment_leg = ShipmentLeg::from_code(&m.shipment_leg).ok_or_else(|| {
            anyhow::anyhow!("unknown shipment leg '{}' for order {}", m.shipment_leg, m.code)
        })?;
        let insurance_policy_id = m
            .insurance_policy_id
            .as_deref()
            .map(Uuid::parse_str)
            .transpose()
            .map_err(|e| anyhow::anyhow!("corrupted policy ref for order {}: {}", m.code, e))?
            .map(InsurancePolicyId);

        Ok(CargoOrder {
            base: BaseAggregate::with_metadata(
                CargoOrderId(uuid),
                m.code,
                m.description,
                m.comment,
                metadata,
            ),
            customer_id: m.customer_id,
            shipment_leg,
            customs_hold: m.customs_hold,
            origin_inspected: m.origin_inspected,
            declared_value: m.declared_value,
            insurance_policy_id,
        })
    }
}

pub async fn get_by_id<C: ConnectionTrait>(db: &C, id: Uuid) -> Result<Option<CargoOrder>> {
    Entity::find_by_id(id.to_string())
        .filter(Column::IsDeleted.eq(false))
        .one(db)
        .await?
        .map(TryInto::try_into)
        .transpose()
}

pub async fn get_by_code<C: ConnectionTrait>(db: &C, code: &str) -> Result<Option<CargoOrder>> {
    Entity::find()
        .filter(Column::Code.eq(code))
        .filter(Column::IsDeleted.eq(false))
        .one(db)
        .await?
        .map(TryInto::try_into)
        .transpose()
}

pub async fn insert<C: ConnectionTrait>(db: &C, aggregate: &CargoOrder) -> Result<Uuid> {
    let uuid = aggregate.base.id.value();
    let active = ActiveModel {
        id: Set(uuid.to_string()),
        code: Set(aggregate.base.code.clone()),
        description: Set(aggregate.base.description.clone()),
        comment: Set(aggregate.base.comment.clone()),
        customer_id: Set(aggregate.customer_id.clone()),
        shipment_leg: Set(aggregate.shipment_leg.code().to_string()),
        customs_hold: Set(aggregate.customs_hold),
        origin_inspected: Set(aggregate.origin_inspected),
        declared_value: Set(aggregate.declared_value),
        insurance_policy_id: Set(aggregate.insurance_policy_id.map(|p| p.value().to_string())),
        is_deleted: Set(aggregate.base.metadata.is_deleted),
        created_at: Set(Some(aggregate.base.metadata.created_at)),
        updated_at: Set(Some(aggregate.base.metadata.updated_at)),
        version: Set(aggregate.base.metadata.version),
    };
    active.insert(db).await?;
    Ok(uuid)
}
