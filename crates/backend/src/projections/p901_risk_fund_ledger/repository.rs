use anyhow::Result;
use chrono::{DateTime, Utc};
use contracts::projections::p901_risk_fund_ledger::dto::LedgerTotals;
use sea_orm::entity::prelude::*;
use sea_orm::{
    ConnectionTrait, DatabaseBackend, EntityTrait, QueryFilter, QueryOrder, QuerySelect, Set,
    Statement,
};

/// Регистр движений фонда рисков. Строки только добавляются
/// (UPDATE/DELETE запрещены триггерами).
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "p901_risk_fund_ledger")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,
    pub created_at: DateTime<Utc>,

    // Sums
    pub amount: i64,

    // Info fields
    pub entry_type: String,
    pub description: String,

    // Technical fields
    pub registrator_ref: Option<String>,
    pub registrator_type: Option<String>,
    pub registrator_code: Option<String>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

pub async fn insert_entry<C: ConnectionTrait>(db: &C, entry: &Model) -> Result<()> {
    let active = ActiveModel {
        id: Set(entry.id.clone()),
        created_at: Set(entry.created_at),
        amount: Set(entry.amount),
        entry_type: Set(entry.entry_type.clone()),
        description: Set(entry.description.clone()),
        registrator_ref: Set(entry.registrator_ref.clone()),
        registrator_type: Set(entry.registrator_type.clone()),
        registrator_code: Set(entry.registrator_code.clone()),
    };
    Entity::insert(active).exec(db).await?;
    Ok(())
}

/// Момент последнего движения
pub async fn last_created_at<C: ConnectionTrait>(db: &C) -> Result<Option<DateTime<Utc>>> {
    let last = Entity::find()
        .order_by_desc(Column::CreatedAt)
        .one(db)
        .await?;
    Ok(last.map(|m| m.created_at))
}

/// Страница движений, новые сверху; `before` задаёт строгую верхняя граница
pub async fn list_page<C: ConnectionTrait>(
    db: &C,
    limit: u64,
    before: Option<DateTime<Utc>>,
) -> Result<Vec<Model>> {
    let mut query = Entity::find();
    if let Some(before) = before {
        query = query.filter(Column::CreatedAt.lt(before));
    }
    let items = query
        .order_by_desc(Column::CreatedAt)
        .order_by_desc(Column::Id)
        .limit(limit)
        .all(db)
        .await?;
    Ok(items)
}

pub async fn get_by_registrator<C: ConnectionTrait>(
    db: &C,
    registrator_ref: &str,
) -> Result<Vec<Model>> {
    let items = Entity::find()
        .filter(Column::RegistratorRef.eq(registrator_ref))
        .order_by_asc(Column::CreatedAt)
        .all(db)
        .await?;
    Ok(items)
}

pub async fn count<C: ConnectionTrait>(db: &C) -> Result<u64> {
    use sea_orm::PaginatorTrait;
    Ok(Entity::find().count(db).await?)
}

/// Поступления и списания одним проходом по регистру
pub async fn totals<C: ConnectionTrait>(db: &C) -> Result<LedgerTotals> {
    let sql = r#"
        SELECT
            COALESCE(SUM(CASE WHEN amount > 0 THEN amount ELSE 0 END), 0) AS total_in,
            COALESCE(SUM(CASE WHEN amount < 0 THEN -amount ELSE 0 END), 0) AS total_out
        FROM p901_risk_fund_ledger
    "#;
    let row = db
        .query_one(Statement::from_string(
            DatabaseBackend::Sqlite,
            sql.to_string(),
        ))
        .await?;

    match row {
        Some(row) => Ok(LedgerTotals {
            total_in: row.try_get::<i64>("", "total_in")?,
            total_out: row.try_get::<i64>("", "total_out")?,
        }),
        None => Ok(LedgerTotals::default()),
    }
}

/// Баланс: сумма всех движений со знаком
pub async fn balance<C: ConnectionTrait>(db: &C) -> Result<i64> {
    let row = db
        .query_one(Statement::from_string(
            DatabaseBackend::Sqlite,
            "SELECT COALESCE(SUM(amount), 0) AS balance FROM p901_risk_fund_ledger".to_string(),
        ))
        .await?;
    Ok(match row {
        Some(row) => row.try_get::<i64>("", "balance")?,
        None => 0,
    })
}
