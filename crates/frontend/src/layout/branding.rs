use contracts::shared::branding::{BrandingConfig, BrandingResponse, ResolvedBranding};
use gloo_net::http::Request;
use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::shared::api_utils::api_url;

/// Fetch the tenant branding for the current host
pub async fn fetch_branding() -> Result<BrandingConfig, String> {
    let url = api_url("/branding/");

    let response = Request::get(&url)
        .send()
        .await
        .map_err(|e| format!("Request failed: {}", e))?;

    if !response.ok() {
        return Err(format!("HTTP error: {}", response.status()));
    }

    let data: BrandingResponse = response
        .json()
        .await
        .map_err(|e| format!("Failed to parse response: {}", e))?;

    Ok(data.config)
}

/// Provide the branding signal to the tree. Starts with the built-in
/// defaults and switches to the tenant's values once they arrive; a
/// failed fetch keeps the defaults.
pub fn provide_branding() -> RwSignal<ResolvedBranding> {
    let branding = RwSignal::new(ResolvedBranding::default());
    provide_context(branding);

    Effect::new(move |_| {
        spawn_local(async move {
            match fetch_branding().await {
                Ok(config) => branding.set(config.resolve()),
                Err(err) => log::error!("Failed to fetch branding: {}", err),
            }
        });
    });

    branding
}

pub fn use_branding() -> RwSignal<ResolvedBranding> {
    use_context::<RwSignal<ResolvedBranding>>().unwrap_or_else(provide_branding)
}
