use anyhow::Result;
use chrono::Utc;
use contracts::domain::a001_cargo_order::aggregate::CargoOrderId;
use contracts::domain::a002_insurance_policy::aggregate::InsurancePolicyId;
use contracts::domain::a003_return_case::aggregate::{ReturnCase, ReturnCaseId};
use contracts::domain::common::{BaseAggregate, EntityMetadata};
use contracts::enums::{LiableParty, ReturnStatus, ReturnType};
use sea_orm::entity::prelude::*;
use sea_orm::sea_query::Expr;
use sea_orm::{
    Condition, ConnectionTrait, DatabaseBackend, EntityTrait, PaginatorTrait, QueryFilter,
    QueryOrder, QuerySelect, Set, Statement,
};
use uuid::Uuid;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "a003_return_case")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,
    pub code: String,
    pub description: String,
    pub comment: Option<String>,
    pub order_id: String,
    pub customer_id: String,
    pub insurance_policy_id: Option<String>,
    pub return_type: String,
    pub details: String,
    pub evidence_photos_json: String,
    pub status: String,
    pub liable_party: String,
    pub liability_reason: String,
    pub requested_amount: Option<i64>,
    pub approved_amount: Option<i64>,
    pub review_notes: Option<String>,
    pub opened_at: chrono::DateTime<chrono::Utc>,
    pub reviewed_at: Option<chrono::DateTime<chrono::Utc>>,
    pub resolved_at: Option<chrono::DateTime<chrono::Utc>>,
    pub is_deleted: bool,
    pub created_at: Option<chrono::DateTime<chrono::Utc>>,
    pub updated_at: Option<chrono::DateTime<chrono::Utc>>,
    pub version: i32,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

fn parse_uuid(value: &str, what: &str, code: &str) -> Result<Uuid> {
    Uuid::parse_str(value).map_err(|e| anyhow::anyhow!("corrupted {} for case {}: {}", what, code, e))
}

impl TryFrom<Model> for ReturnCase {
    type Error = anyhow::Error;

    fn try_from(m: Model) -> Result<Self> {
        let metadata = EntityMetadata {
            created_at: m.created_at.unwrap_or(m.opened_at),
            updated_at: m.updated_at.unwrap_or_else(Utc::now),
            is_deleted: m.is_deleted,
            version: m.version,
        };
        let id = parse_uuid(&m.id, "id", &m.code)?;
        let order_id = parse_uuid(&m.order_id, "order ref", &m.code)?;
        let insurance_policy_id = m
            .insurance_policy_id
            .as_deref()
            .map(|p| parse_uuid(p, "policy ref", &m.code))
            .transpose()?
            .map(InsurancePolicyId);

        let status = ReturnStatus::from_code(&m.status)
            .ok_or_else(|| anyhow::anyhow!("unknown status '{}' for case {}", m.status, m.code))?;
        let liable_party = LiableParty::from_code(&m.liable_party).ok_or_else(|| {
            anyhow::anyhow!("unknown liable party '{}' for case {}", m.liable_party, m.code)
        })?;
        let return_type = ReturnType::from_code(&m.return_type).unwrap_or(ReturnType::Other);
        let evidence_photos: Vec<String> = serde_json::from_str(&m.evidence_photos_json)
            .map_err(|e| anyhow::anyhow!("corrupted evidence photos for case {}: {}", m.code, e))?;

        Ok(ReturnCase {
            base: BaseAggregate::with_metadata(
                ReturnCaseId(id),
                m.code,
                m.description,
                m.comment,
                metadata,
            ),
            order_id: CargoOrderId(order_id),
            customer_id: m.customer_id,
            insurance_policy_id,
            return_type,
            details: m.details,
            evidence_photos,
            status,
            liable_party,
            liability_reason: m.liability_reason,
            requested_amount: m.requested_amount,
            approved_amount: m.approved_amount,
            review_notes: m.review_notes,
            opened_at: m.opened_at,
            reviewed_at: m.reviewed_at,
            resolved_at: m.resolved_at,
        })
    }
}

pub async fn insert<C: ConnectionTrait>(db: &C, aggregate: &ReturnCase) -> Result<Uuid> {
    let uuid = aggregate.base.id.value();
    let active = ActiveModel {
        id: Set(uuid.to_string()),
        code: Set(aggregate.base.code.clone()),
        description: Set(aggregate.base.description.clone()),
        comment: Set(aggregate.base.comment.clone()),
        order_id: Set(aggregate.order_id.value().to_string()),
        customer_id: Set(aggregate.customer_id.clone()),
        insurance_policy_id: Set(aggregate.insurance_policy_id.map(|p| p.value().to_string())),
        return_type: Set(aggregate.return_type.code().to_string()),
        details: Set(aggregate.details.clone()),
        evidence_photos_json: Set(serde_json::to_string(&aggregate.evidence_photos)?),
        status: Set(aggregate.status.code().to_string()),
        liable_party: Set(aggregate.liable_party.code().to_string()),
        liability_reason: Set(aggregate.liability_reason.clone()),
        requested_amount: Set(aggregate.requested_amount),
        approved_amount: Set(aggregate.approved_amount),
        review_notes: Set(aggregate.review_notes.clone()),
        opened_at: Set(aggregate.opened_at),
        reviewed_at: Set(aggregate.reviewed_at),
        resolved_at: Set(aggregate.resolved_at),
        is_deleted: Set(aggregate.base.metadata.is_deleted),
        created_at: Set(Some(aggregate.base.metadata.created_at)),
        updated_at: Set(Some(aggregate.base.metadata.updated_at)),
        version: Set(aggregate.base.metadata.version),
    };
    active.insert(db).await?;
    Ok(uuid)
}

pub async fn get_by_id<C: ConnectionTrait>(db: &C, id: Uuid) -> Result<Option<ReturnCase>> {
    Entity::find_by_id(id.to_string())
        .filter(Column::IsDeleted.eq(false))
        .one(db)
        .await?
        .map(TryInto::try_into)
        .transpose()
}

pub async fn get_by_code<C: ConnectionTrait>(db: &C, code: &str) -> Result<Option<ReturnCase>> {
    Entity::find()
        .filter(Column::Code.eq(code))
        .filter(Column::IsDeleted.eq(false))
        .one(db)
        .await?
        .map(TryInto::try_into)
        .transpose()
}

fn pending_codes() -> Vec<&'static str> {
    ReturnStatus::pending().iter().map(|s| s.code()).collect()
}

/// Отбор для списка обращений
#[derive(Debug, Clone, Default)]
pub struct CaseFilter {
    pub status: Option<ReturnStatus>,
    pub pending_only: bool,
    pub customer_id: Option<String>,
}

impl CaseFilter {
    fn condition(&self) -> Condition {
        let mut cond = Condition::all().add(Column::IsDeleted.eq(false));
        if let Some(status) = self.status {
            cond = cond.add(Column::Status.eq(status.code()));
        }
        if self.pending_only {
            cond = cond.add(Column::Status.is_in(pending_codes()));
        }
        if let Some(customer_id) = &self.customer_id {
            cond = cond.add(Column::CustomerId.eq(customer_id.as_str()));
        }
        cond
    }
}

/// Страница обращений, новые сверху
pub async fn list<C: ConnectionTrait>(
    db: &C,
    filter: &CaseFilter,
    limit: u64,
    offset: u64,
) -> Result<Vec<ReturnCase>> {
    Entity::find()
        .filter(filter.condition())
        .order_by_desc(Column::OpenedAt)
        .order_by_desc(Column::Id)
        .limit(limit)
        .offset(offset)
        .all(db)
        .await?
        .into_iter()
        .map(TryInto::try_into)
        .collect()
}

pub async fn count<C: ConnectionTrait>(db: &C, filter: &CaseFilter) -> Result<u64> {
    Ok(Entity::find().filter(filter.condition()).count(db).await?)
}

/// Записывает решение по обращению, только если статус и версия не изменились
/// с момента чтения. Возвращает число обновлённых строк (0 или 1).
pub async fn update_review_state<C: ConnectionTrait>(
    db: &C,
    updated: &ReturnCase,
    expected_version: i32,
) -> Result<u64> {
    let result = Entity::update_many()
        .col_expr(Column::Status, Expr::value(updated.status.code()))
        .col_expr(Column::LiableParty, Expr::value(updated.liable_party.code()))
        .col_expr(Column::ApprovedAmount, Expr::value(updated.approved_amount))
        .col_expr(Column::ReviewNotes, Expr::value(updated.review_notes.clone()))
        .col_expr(Column::ReviewedAt, Expr::value(updated.reviewed_at))
        .col_expr(Column::ResolvedAt, Expr::value(updated.resolved_at))
        .col_expr(
            Column::UpdatedAt,
            Expr::value(Some(updated.base.metadata.updated_at)),
        )
        .col_expr(Column::Version, Expr::value(updated.base.metadata.version))
        .filter(Column::Id.eq(updated.base.id.value().to_string()))
        .filter(Column::Version.eq(expected_version))
        .filter(Column::Status.is_in(pending_codes()))
        .exec(db)
        .await?;
    Ok(result.rows_affected)
}

/// Очередь на рассмотрение: количество и сумма заявленных требований
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PendingStats {
    pub count: u64,
    pub exposure: i64,
}

pub async fn pending_stats<C: ConnectionTrait>(db: &C) -> Result<PendingStats> {
    let codes = pending_codes();
    let sql = format!(
        r#"
        SELECT COUNT(*) AS cnt, COALESCE(SUM(requested_amount), 0) AS exposure
        FROM a003_return_case
        WHERE is_deleted = 0 AND status IN ({})
    "#,
        vec!["?"; codes.len()].join(", ")
    );
    let row = db
        .query_one(Statement::from_sql_and_values(
            DatabaseBackend::Sqlite,
            sql,
            codes.into_iter().map(sea_orm::Value::from),
        ))
        .await?;
    match row {
        Some(row) => Ok(PendingStats {
            count: row.try_get::<i64>("", "cnt")?.max(0) as u64,
            exposure: row.try_get::<i64>("", "exposure")?,
        }),
        None => Ok(PendingStats::default()),
    }
}
