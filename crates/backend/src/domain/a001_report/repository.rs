use chrono::{DateTime, NaiveDate, SecondsFormat, Utc};
use contracts::domain::a001_report::aggregate::records_from_value;
use contracts::domain::a001_report::{Report, ReportQuery};
use serde_json::Value;
use thiserror::Error;

use sea_orm::entity::prelude::*;
use sea_orm::{ActiveValue::NotSet, PaginatorTrait, QueryFilter, QueryOrder, Set};

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "a001_report")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub titulo: String,
    pub tipo: String,
    /// JSON text of the result payload
    #[sea_orm(column_type = "Text")]
    pub resultado: String,
    /// RFC 3339, UTC, second precision
    pub criado_em: String,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

impl From<Model> for Report {
    fn from(m: Model) -> Self {
        let result = match serde_json::from_str::<Value>(&m.resultado) {
            Ok(value) => records_from_value(value),
            Err(e) => {
                tracing::warn!("Report {} has malformed resultado: {}", m.id, e);
                Vec::new()
            }
        };
        let created_at = DateTime::parse_from_rfc3339(&m.criado_em)
            .map(|dt| dt.with_timezone(&Utc))
            .unwrap_or_else(|e| {
                tracing::warn!("Report {} has malformed criado_em: {}", m.id, e);
                DateTime::<Utc>::UNIX_EPOCH
            });

        Report {
            id: m.id,
            title: m.titulo,
            kind: m.tipo,
            result,
            created_at,
        }
    }
}

pub fn format_timestamp(at: &DateTime<Utc>) -> String {
    at.to_rfc3339_opts(SecondsFormat::Secs, true)
}

// ============================================================================
// Filters
// ============================================================================

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FilterError {
    #[error("criado_em must be a YYYY-MM-DD date, got {0:?}")]
    InvalidDate(String),
}

/// Validated list filter: exact kind and creation day (UTC)
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReportFilter {
    pub kind: Option<String>,
    pub date: Option<NaiveDate>,
}

impl ReportFilter {
    pub fn from_query(query: ReportQuery) -> Result<Self, FilterError> {
        let query = query.normalized();
        let date = match query.criado_em {
            Some(raw) => Some(
                NaiveDate::parse_from_str(&raw, "%Y-%m-%d")
                    .map_err(|_| FilterError::InvalidDate(raw.clone()))?,
            ),
            None => None,
        };
        Ok(Self {
            kind: query.tipo,
            date,
        })
    }
}

// ============================================================================
// Queries
// ============================================================================

/// Reports matching `filter`, newest first
pub async fn list(db: &DatabaseConnection, filter: &ReportFilter) -> anyhow::Result<Vec<Report>> {
    let mut query = Entity::find();
    if let Some(kind) = &filter.kind {
        query = query.filter(Column::Tipo.eq(kind.as_str()));
    }
    if let Some(date) = filter.date {
        query = query.filter(Column::CriadoEm.starts_with(date.format("%Y-%m-%d").to_string()));
    }

    let items = query
        .order_by_desc(Column::CriadoEm)
        .order_by_desc(Column::Id)
        .all(db)
        .await?
        .into_iter()
        .map(Into::into)
        .collect();
    Ok(items)
}

pub async fn get_by_id(db: &DatabaseConnection, id: i64) -> anyhow::Result<Option<Report>> {
    let result = Entity::find_by_id(id).one(db).await?;
    Ok(result.map(Into::into))
}

pub async fn count(db: &DatabaseConnection) -> anyhow::Result<u64> {
    Ok(Entity::find().count(db).await?)
}

pub async fn insert(
    db: &DatabaseConnection,
    title: &str,
    kind: &str,
    result: &Value,
    created_at: DateTime<Utc>,
) -> anyhow::Result<i64> {
    let active = ActiveModel {
        id: NotSet,
        titulo: Set(title.to_string()),
        tipo: Set(kind.to_string()),
        resultado: Set(serde_json::to_string(result)?),
        criado_em: Set(format_timestamp(&created_at)),
    };
    let model = active.insert(db).await?;
    Ok(model.id)
}
