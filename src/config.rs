use std::time::Duration;

use reqwest::header::{HeaderMap, HeaderName, HeaderValue, CACHE_CONTROL, CONTENT_TYPE, PRAGMA};

pub const DEFAULT_API_URL: &str = "http://localhost:8080/api";
pub const DEFAULT_BUCKET: &str = "cartas-pokemon";
pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_secs(30);
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);
pub const DEFAULT_IMAGE: &str = "assets/images/default-product.png";

pub const ENV_API_URL: &str = "CARDHAVEN_API_URL";
pub const ENV_STORAGE_URL: &str = "CARDHAVEN_STORAGE_URL";
pub const ENV_STORAGE_KEY: &str = "CARDHAVEN_STORAGE_KEY";
pub const ENV_STORAGE_BUCKET: &str = "CARDHAVEN_STORAGE_BUCKET";
pub const ENV_POLL_INTERVAL_SECS: &str = "CARDHAVEN_POLL_INTERVAL_SECS";

/// Marker header that lets requests through the ngrok tunnel interstitial.
pub const TUNNEL_BYPASS_HEADER: &str = "ngrok-skip-browser-warning";

/// Headers attached to every API request.
pub fn default_headers() -> HeaderMap {
    let mut headers = HeaderMap::new();
    headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
    headers.insert(CACHE_CONTROL, HeaderValue::from_static("no-cache"));
    headers.insert(PRAGMA, HeaderValue::from_static("no-cache"));
    headers.insert(
        HeaderName::from_static(TUNNEL_BYPASS_HEADER),
        HeaderValue::from_static("true"),
    );
    headers
}

/// Read a non-empty environment variable.
pub(crate) fn env_var(name: &str) -> Option<String> {
    std::env::var(name)
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

/// Join a base URL and a relative path with exactly one slash between them.
pub(crate) fn join_url(base: &str, path: &str) -> String {
    format!(
        "{}/{}",
        base.trim_end_matches('/'),
        path.trim_start_matches('/')
    )
}
