use contracts::shared::branding::{BrandingConfig, BrandingResponse};

use sea_orm::entity::prelude::*;
use sea_orm::{ActiveValue::NotSet, DatabaseBackend, Set, Statement};

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "a002_tenant")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub nome: String,
    /// JSON object with the branding keys and `subdomain`
    #[sea_orm(column_type = "Text")]
    pub config: String,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

impl From<Model> for BrandingResponse {
    fn from(m: Model) -> Self {
        let config = serde_json::from_str::<BrandingConfig>(&m.config).unwrap_or_else(|e| {
            tracing::warn!("Tenant {} has malformed config: {}", m.id, e);
            BrandingConfig::default()
        });
        BrandingResponse {
            nome: m.nome,
            config,
        }
    }
}

pub async fn find_by_subdomain(
    db: &DatabaseConnection,
    subdomain: &str,
) -> anyhow::Result<Option<BrandingResponse>> {
    // CASE keeps json_extract away from rows whose config is not valid JSON
    let sql = r#"
        SELECT id, nome, config
        FROM a002_tenant
        WHERE CASE WHEN json_valid(config)
                   THEN json_extract(config, '$.subdomain')
              END = ?
        ORDER BY id
        LIMIT 1
    "#;

    let stmt = Statement::from_sql_and_values(DatabaseBackend::Sqlite, sql, [subdomain.into()]);
    let result = Entity::find().from_raw_sql(stmt).one(db).await?;
    Ok(result.map(Into::into))
}

pub async fn insert(db: &DatabaseConnection, name: &str, config: &BrandingConfig) -> anyhow::Result<i64> {
    let active = ActiveModel {
        id: NotSet,
        nome: Set(name.to_string()),
        config: Set(serde_json::to_string(config)?),
    };
    let model = active.insert(db).await?;
    Ok(model.id)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::data::db::connect_in_memory;
    use sea_orm::ConnectionTrait;

    fn branded(subdomain: &str, color: &str) -> BrandingConfig {
        BrandingConfig {
            primary_color: Some(color.to_string()),
            subdomain: Some(subdomain.to_string()),
            ..Default::default()
        }
    }

    #[tokio::test]
    async fn finds_tenant_by_subdomain() {
        let db = connect_in_memory().await.unwrap();
        insert(&db, "Acme", &branded("acme", "#ff0000")).await.unwrap();
        insert(&db, "Globex", &branded("globex", "#00ff00")).await.unwrap();

        let found = find_by_subdomain(&db, "globex").await.unwrap().unwrap();
        assert_eq!(found.nome, "Globex");
        assert_eq!(found.config.primary_color.as_deref(), Some("#00ff00"));

        assert!(find_by_subdomain(&db, "initech").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn malformed_config_rows_are_skipped() {
        let db = connect_in_memory().await.unwrap();
        db.execute(Statement::from_string(
            DatabaseBackend::Sqlite,
            "INSERT INTO a002_tenant (nome, config) VALUES ('Broken', 'not json');".to_string(),
        ))
        .await
        .unwrap();
        insert(&db, "Acme", &branded("acme", "#ff0000")).await.unwrap();

        let found = find_by_subdomain(&db, "acme").await.unwrap().unwrap();
        assert_eq!(found.nome, "Acme");
    }
}
