use chrono::{Duration, Utc};
use contracts::shared::branding::BrandingConfig;
use sea_orm::DatabaseConnection;
use serde_json::json;

use crate::domain::{a001_report, a002_tenant};

/// Fill an empty database with a few reports of every kind and a tenant
/// answering on `localhost`. Does nothing when reports already exist.
pub async fn seed_demo_data(db: &DatabaseConnection) -> anyhow::Result<bool> {
    if a001_report::repository::count(db).await? > 0 {
        return Ok(false);
    }

    tracing::info!("Seeding demo reports");
    let now = Utc::now();

    let reports = [
        (
            "EC2 cost by region",
            "bar",
            json!([
                { "label": "us-east-1", "value": 1240.5 },
                { "label": "eu-west-1", "value": 860.0 },
                { "label": "sa-east-1", "value": 432.25 }
            ]),
            now - Duration::days(2),
        ),
        (
            "Open security findings",
            "line",
            json!([
                { "name": "Mon", "count": 14 },
                { "name": "Tue", "count": 11 },
                { "name": "Wed", "count": 9 },
                { "name": "Thu", "count": "12" },
                { "name": "Fri", "count": 6 }
            ]),
            now - Duration::days(1),
        ),
        (
            "Storage by service",
            "pie",
            json!({ "rows": [
                { "label": "S3", "value": 62 },
                { "label": "EBS", "value": 28 },
                { "label": "EFS", "value": 10 }
            ] }),
            now,
        ),
    ];

    for (title, kind, result, created_at) in reports.iter() {
        a001_report::repository::insert(db, title, kind, result, *created_at).await?;
    }

    let tenant = BrandingConfig {
        logo_url: None,
        primary_color: Some("#4f46e5".to_string()),
        brand_name: Some("Demo Consulting".to_string()),
        subdomain: Some("localhost".to_string()),
        theme_class: Some("bg-slate-50 text-slate-900".to_string()),
    };
    a002_tenant::repository::insert(db, "Demo Consulting", &tenant).await?;

    Ok(true)
}
