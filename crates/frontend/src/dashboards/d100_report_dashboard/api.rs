use async_trait::async_trait;
use contracts::domain::a001_report::{Report, ReportList, ReportQuery};
use contracts::enums::ExportFormat;
use gloo_net::http::Request;
use thiserror::Error;

use crate::shared::api_utils::{api_base, api_url_with_base};

const REPORTS_PATH: &str = "/relatorios/";

/// Failure of a report list request
#[derive(Debug, Clone, PartialEq, Error)]
pub enum FetchError {
    #[error("Request failed: {0}")]
    Network(String),

    #[error("HTTP error: {0}")]
    Status(u16),

    #[error("Failed to parse response: {0}")]
    Malformed(String),

    #[error("Invalid query: {0}")]
    InvalidQuery(String),
}

/// Where report lists come from
#[async_trait(?Send)]
pub trait ReportSource {
    async fn list_reports(&self, query: &ReportQuery) -> Result<Vec<Report>, FetchError>;
}

/// `GET /api/v1/relatorios/?tipo=..&criado_em=..`
pub fn reports_url(base: &str, query: &ReportQuery) -> Result<String, FetchError> {
    let url = api_url_with_base(base, REPORTS_PATH);
    let query = query.clone().normalized();
    if query.is_empty() {
        return Ok(url);
    }
    let qs = serde_qs::to_string(&query).map_err(|e| FetchError::InvalidQuery(e.to_string()))?;
    Ok(format!("{}?{}", url, qs))
}

/// `GET /api/v1/relatorios/{id}/export/?format=..`
pub fn export_url(base: &str, report_id: i64, format: ExportFormat) -> String {
    format!(
        "{}{}/export/?format={}",
        api_url_with_base(base, REPORTS_PATH),
        report_id,
        format.code()
    )
}

/// Report source backed by the HTTP API
#[derive(Debug, Clone)]
pub struct HttpReportSource {
    base: String,
}

impl HttpReportSource {
    /// Source for the backend next to the current page
    pub fn new() -> Self {
        Self::with_base(api_base())
    }

    pub fn with_base(base: impl Into<String>) -> Self {
        Self { base: base.into() }
    }
}

impl Default for HttpReportSource {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait(?Send)]
impl ReportSource for HttpReportSource {
    async fn list_reports(&self, query: &ReportQuery) -> Result<Vec<Report>, FetchError> {
        let url = reports_url(&self.base, query)?;
        log::debug!("Loading reports: {}", url);

        let response = Request::get(&url)
            .send()
            .await
            .map_err(|e| FetchError::Network(e.to_string()))?;

        if !response.ok() {
            return Err(FetchError::Status(response.status()));
        }

        let list: ReportList = response
            .json()
            .await
            .map_err(|e| FetchError::Malformed(e.to_string()))?;

        Ok(list.into_reports())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reports_url_without_filters() {
        let url = reports_url("http://h:3000", &ReportQuery::default()).unwrap();
        assert_eq!(url, "http://h:3000/api/v1/relatorios/");

        let blank = ReportQuery {
            tipo: Some(String::new()),
            criado_em: Some(" ".into()),
        };
        assert_eq!(
            reports_url("http://h:3000", &blank).unwrap(),
            "http://h:3000/api/v1/relatorios/"
        );
    }

    #[test]
    fn test_reports_url_with_filters() {
        let query = ReportQuery {
            tipo: Some("bar".into()),
            criado_em: Some("2024-03-15".into()),
        };
        let url = reports_url("", &query).unwrap();
        assert_eq!(url, "/api/v1/relatorios/?tipo=bar&criado_em=2024-03-15");
    }

    #[test]
    fn test_export_url() {
        assert_eq!(
            export_url("http://h:3000", 12, ExportFormat::Csv),
            "http://h:3000/api/v1/relatorios/12/export/?format=csv"
        );
    }
}
