use axum::{
    extract::{Path, Query},
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use chrono::{NaiveDate, Utc};
use contracts::domain::a001_report::{Report, ReportListEnvelope, ReportQuery};
use contracts::enums::ExportFormat;
use sea_orm::DatabaseConnection;
use serde::Deserialize;
use serde_json::json;

use crate::domain::a001_report::export;
use crate::domain::a001_report::repository::{self, ReportFilter};
use crate::shared::data::db::get_connection;

#[derive(Debug, Deserialize)]
pub struct ExportParams {
    pub format: Option<String>,
}

fn bad_request(message: String) -> Response {
    (StatusCode::BAD_REQUEST, Json(json!({ "error": message }))).into_response()
}

/// GET /api/v1/relatorios/?tipo=..&criado_em=..
pub async fn list(Query(query): Query<ReportQuery>) -> Response {
    let filter = match ReportFilter::from_query(query) {
        Ok(filter) => filter,
        Err(e) => return bad_request(e.to_string()),
    };
    let Ok(db) = get_connection() else {
        return StatusCode::INTERNAL_SERVER_ERROR.into_response();
    };
    list_reports(db, &filter).await
}

async fn list_reports(db: &DatabaseConnection, filter: &ReportFilter) -> Response {
    match repository::list(db, filter).await {
        Ok(reports) => Json(ReportListEnvelope::from(reports)).into_response(),
        Err(e) => {
            tracing::error!("Failed to list reports: {:#}", e);
            StatusCode::INTERNAL_SERVER_ERROR.into_response()
        }
    }
}

/// GET /api/v1/relatorios/:id/
pub async fn get_by_id(Path(id): Path<i64>) -> Result<Json<Report>, StatusCode> {
    let db = get_connection().map_err(|_| StatusCode::INTERNAL_SERVER_ERROR)?;
    match repository::get_by_id(db, id).await {
        Ok(Some(v)) => Ok(Json(v)),
        Ok(None) => Err(StatusCode::NOT_FOUND),
        Err(e) => {
            tracing::error!("Failed to load report {}: {:#}", id, e);
            Err(StatusCode::INTERNAL_SERVER_ERROR)
        }
    }
}

/// GET /api/v1/relatorios/:id/export/?format=json|csv|pdf
pub async fn export(Path(id): Path<i64>, Query(params): Query<ExportParams>) -> Response {
    let format = match export::parse_format(params.format.as_deref()) {
        Ok(format) => format,
        Err(e) => return bad_request(e.to_string()),
    };
    let Ok(db) = get_connection() else {
        return StatusCode::INTERNAL_SERVER_ERROR.into_response();
    };
    export_report(db, id, format, Utc::now().date_naive()).await
}

async fn export_report(
    db: &DatabaseConnection,
    id: i64,
    format: ExportFormat,
    day: NaiveDate,
) -> Response {
    let report = match repository::get_by_id(db, id).await {
        Ok(Some(report)) => report,
        Ok(None) => return StatusCode::NOT_FOUND.into_response(),
        Err(e) => {
            tracing::error!("Failed to load report {}: {:#}", id, e);
            return StatusCode::INTERNAL_SERVER_ERROR.into_response();
        }
    };

    match export::render(&report, format, day) {
        Ok(file) => attachment(file),
        Err(e) => {
            tracing::error!("Failed to export report {}: {}", id, e);
            StatusCode::INTERNAL_SERVER_ERROR.into_response()
        }
    }
}

fn attachment(file: export::ExportFile) -> Response {
    tracing::info!("Export {} ({} bytes)", file.filename, file.body.len());
    (
        [
            (header::CONTENT_TYPE, file.content_type.to_string()),
            (
                header::CONTENT_DISPOSITION,
                format!("attachment; filename=\"{}\"", file.filename),
            ),
        ],
        file.body,
    )
        .into_response()
}
