use anyhow::Result;
use chrono::Utc;
use contracts::domain::a002_insurance_policy::aggregate::{InsurancePolicy, InsurancePolicyId};
use contracts::domain::common::{BaseAggregate, EntityMetadata};
use sea_orm::entity::prelude::*;
use sea_orm::{ConnectionTrait, EntityTrait, QueryFilter, Set};
use uuid::Uuid;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "a002_insurance_policy")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,
    pub code: String,
    pub description: String,
    pub comment: Option<String>,
    pub max_payout: i64,
    pub premium: i64,
    pub is_deleted: bool,
    pub created_at: Option<chrono::DateTime<chrono::Utc>>,
    pub updated_at: Option<chrono::DateTime<chrono::Utc>>,
    pub version: i32,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

impl TryFrom<Model> for InsurancePolicy {
    type Error = anyhow::Error;

    fn try_from(m: Model) -> Result<Self> {
        let metadata = EntityMetadata {
            created_at: m.created_at.unwrap_or_else(Utc::now),
            updated_at: m.updated_at.unwrap_or_else(Utc::now),
            is_deleted: m.is_deleted,
            version: m.version,
        };
        let uuid = Uuid::parse_str(&m.id)
            .map_err(|e| anyhow::anyhow!("corrupted policy id {}: {}", m.id, e))?;

        Ok(InsurancePolicy {
            base: BaseAggregate::with_metadata(
                InsurancePolicyId(uuid),
                m.code,
                m.description,
                m.comment,
                metadata,
            ),
            max_payout: m.max_payout,
            premium: m.premium,
        })
    }
}

pub async fn get_by_id<C: ConnectionTrait>(db: &C, id: Uuid) -> Result<Option<InsurancePolicy>> {
    Entity::find_by_id(id.to_string())
        .filter(Column::IsDeleted.eq(false))
        .one(db)
        .await?
        .map(TryInto::try_into)
        .transpose()
}

pub async fn get_by_code<C: ConnectionTrait>(
    db: &C,
    code: &str,
) -> Result<Option<InsurancePolicy>> {
    Entity::find()
        .filter(Column::Code.eq(code))
        .filter(Column::IsDeleted.eq(false))
        .one(db)
        .await?
        .map(TryInto::try_into)
        .transpose()
}

pub async fn insert<C: ConnectionTrait>(db: &C, aggregate: &InsurancePolicy) -> Result<Uuid> {
    let uuid = aggregate.base.id.value();
    let active = ActiveModel {
        id: Set(uuid.to_string()),
        code: Set(aggregate.base.code.clone()),
        description: Set(aggregate.base.description.clone()),
        comment: Set(aggregate.base.comment.clone()),
        max_payout: Set(aggregate.max_payout),
        premium: Set(aggregate.premium),
        is_deleted: Set(aggregate.base.metadata.is_deleted),
        created_at: Set(Some(aggregate.base.metadata.created_at)),
        updated_at: Set(Some(aggregate.base.metadata.updated_at)),
        version: Set(aggregate.base.metadata.version),
    };
    active.insert(db).await?;
    Ok(uuid)
}
