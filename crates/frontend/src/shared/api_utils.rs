//! API utilities for frontend-backend communication
//!
//! Provides helper functions for constructing API URLs.

/// Port the backend listens on, on the same host as the page
pub const BACKEND_PORT: u16 = 3000;

/// Versioned prefix of the reporting API
pub const API_PREFIX: &str = "/api/v1";

/// Get the base URL for API requests
///
/// Constructs the API base URL from the current window location,
/// using [`BACKEND_PORT`] for the backend server.
///
/// # Returns
/// - API base URL like "http://localhost:3000" or "https://example.com:3000"
/// - Empty string if window is not available
pub fn api_base() -> String {
    let window = match web_sys::window() {
        Some(w) => w,
        None => return String::new(),
    };
    let location = window.location();
    let protocol = location.protocol().unwrap_or_else(|_| "http:".to_string());
    let hostname = location
        .hostname()
        .unwrap_or_else(|_| "127.0.0.1".to_string());
    format!("{}//{}:{}", protocol, hostname, BACKEND_PORT)
}

/// Build a full API URL from a base and a path below [`API_PREFIX`]
///
/// # Example
/// ```rust
/// use frontend::shared::api_utils::api_url_with_base;
/// let url = api_url_with_base("http://localhost:3000", "/branding/");
/// assert_eq!(url, "http://localhost:3000/api/v1/branding/");
/// ```
pub fn api_url_with_base(base: &str, path: &str) -> String {
    format!("{}{}{}", base.trim_end_matches('/'), API_PREFIX, path)
}

/// Build a full API URL for the current page's backend
pub fn api_url(path: &str) -> String {
    api_url_with_base(&api_base(), path)
}
