//! HTTP transport shared by sessions and the ingestion client.

use std::collections::HashMap;

use crate::config::JirafeConfig;

/// SDK version from Cargo.toml.
pub const SDK_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Builds the reqwest client used for every Jirafe request.
///
/// # Panics
///
/// Panics if the underlying reqwest client cannot be created. This should
/// only happen in extremely unusual circumstances (e.g., TLS initialization failure).
pub(crate) fn build_http_client() -> reqwest::Client {
    reqwest::Client::builder()
        .use_rustls_tls()
        .build()
        .expect("Failed to create HTTP client")
}

/// Returns the `User-Agent` string for `config`.
#[must_use]
pub fn user_agent(config: &JirafeConfig) -> String {
    let user_agent_prefix = config
        .user_agent_prefix()
        .map_or(String::new(), |prefix| format!("{prefix} | "));
    let rust_version = env!("CARGO_PKG_RUST_VERSION");
    format!("{user_agent_prefix}Jirafe API Library v{SDK_VERSION} | Rust {rust_version}")
}

/// Headers sent with every request.
pub(crate) fn default_headers(config: &JirafeConfig) -> HashMap<String, String> {
    let mut headers = HashMap::new();
    headers.insert("User-Agent".to_string(), user_agent(config));
    headers.insert("Accept".to_string(), "application/json".to_string());
    headers
}
