use axum::{routing::get, Router};

use crate::handlers;

/// All application routes
pub fn configure_routes() -> Router {
    Router::new()
        .route("/health", get(|| async { "ok" }))
        // Reports
        .route("/api/v1/relatorios/", get(handlers::a001_report::list))
        .route(
            "/api/v1/relatorios/:id/",
            get(handlers::a001_report::get_by_id),
        )
        .route(
            "/api/v1/relatorios/:id/export/",
            get(handlers::a001_report::export),
        )
        // Tenant branding
        .route(
            "/api/v1/branding/",
            get(handlers::a002_branding::get_branding),
        )
}
