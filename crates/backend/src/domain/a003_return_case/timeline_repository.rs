use anyhow::Result;
use contracts::domain::a003_return_case::aggregate::{TimelineAction, TimelineEntry};
use contracts::enums::ReturnStatus;
use sea_orm::entity::prelude::*;
use sea_orm::{ConnectionTrait, EntityTrait, QueryFilter, QueryOrder, Set};

/// История обращения. Строки только добавляются.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "a003_return_case_timeline")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,
    pub case_id: String,
    pub at: chrono::DateTime<chrono::Utc>,
    pub actor_id: String,
    pub action: String,
    pub from_status: Option<String>,
    pub to_status: String,
    pub note: Option<String>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

impl TryFrom<Model> for TimelineEntry {
    type Error = anyhow::Error;

    fn try_from(m: Model) -> Result<Self> {
        let status = |code: &str| {
            ReturnStatus::from_code(code)
                .ok_or_else(|| anyhow::anyhow!("unknown status '{}' in timeline {}", code, m.id))
        };
        let action = TimelineAction::from_code(&m.action)
            .ok_or_else(|| anyhow::anyhow!("unknown action '{}' in timeline {}", m.action, m.id))?;
        let from_status = m.from_status.as_deref().map(status).transpose()?;
        let to_status = status(&m.to_status)?;

        Ok(TimelineEntry {
            id: m.id,
            case_id: m.case_id,
            at: m.at,
            actor_id: m.actor_id,
            action,
            from_status,
            to_status,
            note: m.note,
        })
    }
}

pub async fn insert<C: ConnectionTrait>(db: &C, entry: &TimelineEntry) -> Result<()> {
    let active = ActiveModel {
        id: Set(entry.id.clone()),
        case_id: Set(entry.case_id.clone()),
        at: Set(entry.at),
        actor_id: Set(entry.actor_id.clone()),
        action: Set(entry.action.code().to_string()),
        from_status: Set(entry.from_status.map(|s| s.code().to_string())),
        to_status: Set(entry.to_status.code().to_string()),
        note: Set(entry.note.clone()),
    };
    Entity::insert(active).exec(db).await?;
    Ok(())
}

/// История обращения по возрастанию времени
pub async fn list_by_case<C: ConnectionTrait>(db: &C, case_id: &str) -> Result<Vec<TimelineEntry>> {
    Entity::find()
        .filter(Column::CaseId.eq(case_id))
        .order_by_asc(Column::At)
        .all(db)
        .await?
        .into_iter()
        .map(TryInto::try_into)
        .collect()
}
