use contracts::shared::branding::BrandingResponse;
use sea_orm::DatabaseConnection;

use super::repository;

/// First DNS label of a `Host` header value, port stripped.
///
/// `acme.reports.example.com:8080` -> `acme`; a bare `localhost` is its
/// own subdomain.
pub fn subdomain_from_host(host: &str) -> Option<&str> {
    let host = host.trim();
    let without_port = match host.rsplit_once(':') {
        Some((name, port)) if port.chars().all(|c| c.is_ascii_digit()) => name,
        _ => host,
    };
    without_port
        .split('.')
        .next()
        .filter(|label| !label.is_empty())
}

/// Branding of the tenant serving `host`
pub async fn branding_for_host(
    db: &DatabaseConnection,
    host: &str,
) -> anyhow::Result<Option<BrandingResponse>> {
    let Some(subdomain) = subdomain_from_host(host) else {
        return Ok(None);
    };
    let tenant = repository::find_by_subdomain(db, subdomain).await?;
    if tenant.is_none() {
        tracing::debug!("No tenant for subdomain '{}'", subdomain);
    }
    Ok(tenant)
}
