use serde::{Deserialize, Serialize};

pub const DEFAULT_LOGO_URL: &str =
    "https://images.pexels.com/photos/3184291/pexels-photo-3184291.jpeg";
pub const DEFAULT_PRIMARY_COLOR: &str = "#0ea5e9";
pub const DEFAULT_BRAND_NAME: &str = "Default Brand";
pub const DEFAULT_THEME_CLASS: &str = "bg-white text-gray-900";

/// Tenant branding as stored in `consultoria.config`.
///
/// Every key is optional; unknown keys are ignored.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BrandingConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub logo_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub primary_color: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub brand_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub subdomain: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub theme_class: Option<String>,
}

/// Body of `GET /api/v1/branding/`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BrandingResponse {
    pub nome: String,
    #[serde(default)]
    pub config: BrandingConfig,
}

/// Branding with every display key filled in
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedBranding {
    pub logo_url: String,
    pub primary_color: String,
    pub brand_name: String,
    pub theme_class: String,
}

impl Default for ResolvedBranding {
    fn default() -> Self {
        BrandingConfig::default().resolve()
    }
}

impl BrandingConfig {
    /// Fill missing or empty keys with the built-in defaults
    pub fn resolve(&self) -> ResolvedBranding {
        fn pick(value: &Option<String>, fallback: &str) -> String {
            value
                .as_deref()
                .filter(|v| !v.trim().is_empty())
                .unwrap_or(fallback)
                .to_string()
        }
        ResolvedBranding {
            logo_url: pick(&self.logo_url, DEFAULT_LOGO_URL),
            primary_color: pick(&self.primary_color, DEFAULT_PRIMARY_COLOR),
            brand_name: pick(&self.brand_name, DEFAULT_BRAND_NAME),
            theme_class: pick(&self.theme_class, DEFAULT_THEME_CLASS),
        }
    }
}
