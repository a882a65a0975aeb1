//! Configuration types for the Jirafe API client.
//!
//! This module provides the configuration shared by sessions and the
//! ingestion client. Configuration is read once at construction time.
//!
//! # Overview
//!
//! - [`JirafeConfig`]: Endpoint URLs, API version and user agent settings
//! - [`JirafeConfigBuilder`]: A builder for constructing [`JirafeConfig`] instances
//! - [`SiteId`]: A validated site identifier
//! - [`ClientId`] / [`ClientSecret`]: Validated OAuth client credentials
//! - [`EndpointUrl`]: A validated absolute URL
//! - [`ApiVersion`]: The ingestion API version
//!
//! # Example
//!
//! ```rust
//! use jirafe_api::JirafeConfig;
//!
//! let config = JirafeConfig::builder()
//!     .api_url("http://localhost:8080")
//!     .token_url("http://localhost:8081/oauth2/access_token")
//!     .build()
//!     .unwrap();
//!
//! assert_eq!(config.api_url().as_ref(), "http://localhost:8080/");
//! ```

mod newtypes;
mod version;

pub use newtypes::{ClientId, ClientSecret, EndpointUrl, SiteId};
pub use version::ApiVersion;

use crate::error::ConfigError;

/// Default ingestion API base URL.
pub const DEFAULT_API_URL: &str = "https://api.jirafe.com/";

/// Default OAuth authorize endpoint.
pub const DEFAULT_AUTH_URL: &str = "https://accounts.jirafe.com/oauth2/authorize";

/// Default OAuth token endpoint.
pub const DEFAULT_TOKEN_URL: &str = "https://accounts.jirafe.com/oauth2/access_token";

/// Default account profile endpoint.
pub const DEFAULT_PROFILE_URL: &str = "https://accounts.jirafe.com/accounts/profile";

/// Configuration for the Jirafe API client.
///
/// `JirafeConfig` is `Clone`, `Send`, and `Sync`. Sessions and clients copy
/// what they need out of it when constructed.
///
/// # Example
///
/// ```rust
/// use jirafe_api::JirafeConfig;
///
/// let config = JirafeConfig::default();
/// assert_eq!(config.api_url().as_ref(), "https://api.jirafe.com/");
/// assert_eq!(config.api_version().as_str(), "v1");
/// ```
#[derive(Clone, Debug)]
pub struct JirafeConfig {
    api_url: EndpointUrl,
    auth_url: EndpointUrl,
    token_url: EndpointUrl,
    profile_url: EndpointUrl,
    api_version: ApiVersion,
    user_agent_prefix: Option<String>,
}

impl JirafeConfig {
    /// Creates a new builder for constructing a `JirafeConfig`.
    #[must_use]
    pub fn builder() -> JirafeConfigBuilder {
        JirafeConfigBuilder::new()
    }

    /// Returns the ingestion API base URL (always ends with `/`).
    #[must_use]
    pub const fn api_url(&self) -> &EndpointUrl {
        &self.api_url
    }

    /// Returns the OAuth authorize endpoint.
    #[must_use]
    pub const fn auth_url(&self) -> &EndpointUrl {
        &self.auth_url
    }

    /// Returns the OAuth token endpoint.
    #[must_use]
    pub const fn token_url(&self) -> &EndpointUrl {
        &self.token_url
    }

    /// Returns the account profile endpoint.
    #[must_use]
    pub const fn profile_url(&self) -> &EndpointUrl {
        &self.profile_url
    }

    /// Returns the API version.
    #[must_use]
    pub const fn api_version(&self) -> &ApiVersion {
        &self.api_version
    }

    /// Returns the user agent prefix, if configured.
    #[must_use]
    pub fn user_agent_prefix(&self) -> Option<&str> {
        self.user_agent_prefix.as_deref()
    }
}

impl Default for JirafeConfig {
    fn default() -> Self {
        Self {
            api_url: default_url(DEFAULT_API_URL),
            auth_url: default_url(DEFAULT_AUTH_URL),
            token_url: default_url(DEFAULT_TOKEN_URL),
            profile_url: default_url(DEFAULT_PROFILE_URL),
            api_version: ApiVersion::latest(),
            user_agent_prefix: None,
        }
    }
}

fn default_url(url: &'static str) -> EndpointUrl {
    EndpointUrl::new(url).expect("default endpoint URLs are valid")
}

// Verify JirafeConfig is Send + Sync at compile time
const _: fn() = || {
    const fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<JirafeConfig>();
};

/// Builder for constructing [`JirafeConfig`] instances.
///
/// Every field is optional; unset URLs fall back to the hosted Jirafe
/// endpoints. URLs are validated when [`build`](Self::build) is called.
///
/// # Defaults
///
/// - `api_url`: `https://api.jirafe.com/`
/// - `auth_url`: `https://accounts.jirafe.com/oauth2/authorize`
/// - `token_url`: `https://accounts.jirafe.com/oauth2/access_token`
/// - `profile_url`: `https://accounts.jirafe.com/accounts/profile`
/// - `api_version`: `v1`
/// - `user_agent_prefix`: `None`
#[derive(Debug, Default)]
pub struct JirafeConfigBuilder {
    api_url: Option<String>,
    auth_url: Option<String>,
    token_url: Option<String>,
    profile_url: Option<String>,
    api_version: Option<ApiVersion>,
    user_agent_prefix: Option<String>,
}

impl JirafeConfigBuilder {
    /// Creates a new builder with default values.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the ingestion API base URL. A trailing slash is added if missing.
    #[must_use]
    pub fn api_url(mut self, url: impl Into<String>) -> Self {
        self.api_url = Some(url.into());
        self
    }

    /// Sets the OAuth authorize endpoint.
    #[must_use]
    pub fn auth_url(mut self, url: impl Into<String>) -> Self {
        self.auth_url = Some(url.into());
        self
    }

    /// Sets the OAuth token endpoint.
    #[must_use]
    pub fn token_url(mut self, url: impl Into<String>) -> Self {
        self.token_url = Some(url.into());
        self
    }

    /// Sets the account profile endpoint.
    #[must_use]
    pub fn profile_url(mut self, url: impl Into<String>) -> Self {
        self.profile_url = Some(url.into());
        self
    }

    /// Sets the API version.
    #[must_use]
    pub fn api_version(mut self, version: ApiVersion) -> Self {
        self.api_version = Some(version);
        self
    }

    /// Sets the user agent prefix for HTTP requests.
    #[must_use]
    pub fn user_agent_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.user_agent_prefix = Some(prefix.into());
        self
    }

    /// Builds the [`JirafeConfig`], validating every configured URL.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidUrl`] if any configured URL is not an
    /// absolute `http`/`https` URL.
    pub fn build(self) -> Result<JirafeConfig, ConfigError> {
        let defaults = JirafeConfig::default();

        let api_url = self
            .api_url
            .map_or(Ok(defaults.api_url), EndpointUrl::base)?;
        let auth_url = self
            .auth_url
            .map_or(Ok(defaults.auth_url), EndpointUrl::new)?;
        let token_url = self
            .token_url
            .map_or(Ok(defaults.token_url), EndpointUrl::new)?;
        let profile_url = self
            .profile_url
            .map_or(Ok(defaults.profile_url), EndpointUrl::new)?;

        Ok(JirafeConfig {
            api_url,
            auth_url,
            token_url,
            profile_url,
            api_version: self.api_version.unwrap_or(defaults.api_version),
            user_agent_prefix: self.user_agent_prefix,
        })
    }
}
