use axum::{
    http::{header, HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;

use crate::domain::a002_tenant;
use crate::shared::data::db::get_connection;

fn tenant_not_found() -> Response {
    (
        StatusCode::NOT_FOUND,
        Json(json!({ "error": "Tenant not found" })),
    )
        .into_response()
}

/// GET /api/v1/branding/
///
/// Tenant is picked by the first label of the `Host` header.
pub async fn get_branding(headers: HeaderMap) -> Response {
    let Some(host) = headers.get(header::HOST).and_then(|h| h.to_str().ok()) else {
        return tenant_not_found();
    };
    let Ok(db) = get_connection() else {
        return StatusCode::INTERNAL_SERVER_ERROR.into_response();
    };

    match a002_tenant::service::branding_for_host(db, host).await {
        Ok(Some(branding)) => Json(branding).into_response(),
        Ok(None) => tenant_not_found(),
        Err(e) => {
            tracing::error!("Failed to resolve tenant for {}: {:#}", host, e);
            StatusCode::INTERNAL_SERVER_ERROR.into_response()
        }
    }
}
