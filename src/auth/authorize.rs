//! Authorization URL generation for the OAuth2 authorization code flow.
//!
//! The merchant is redirected to the URL returned by [`authorize_url`]. After
//! they approve access, Jirafe redirects back with a `code` and the same
//! `state`; hand the code to [`OAuth2Session::with_code`](crate::auth::OAuth2Session::with_code).
//!
//! # Example
//!
//! ```rust
//! use jirafe_api::{ClientId, JirafeConfig};
//! use jirafe_api::auth::authorize_url;
//!
//! let config = JirafeConfig::default();
//! let client_id = ClientId::new("client-id").unwrap();
//!
//! let result = authorize_url(&config, &client_id, "https://shop.example.com/callback");
//! assert!(result.url.starts_with("https://accounts.jirafe.com/oauth2/authorize?"));
//! assert!(result.url.contains("response_type=code"));
//! assert!(result.url.contains(&format!("state={}", result.state)));
//! ```

use std::fmt;

use rand::distributions::Alphanumeric;
use rand::Rng;

use crate::config::{ClientId, JirafeConfig};

/// Opaque `state` value for CSRF protection.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct StateParam(String);

impl StateParam {
    const NONCE_LENGTH: usize = 15;

    /// Generates a random alphanumeric state value.
    #[must_use]
    pub fn new() -> Self {
        let nonce = rand::thread_rng()
            .sample_iter(&Alphanumeric)
            .take(Self::NONCE_LENGTH)
            .map(char::from)
            .collect();
        Self(nonce)
    }

    /// Wraps a caller-provided state value.
    #[must_use]
    pub fn from_raw(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    /// Returns `true` if `received` matches this state.
    #[must_use]
    pub fn matches(&self, received: &str) -> bool {
        self.0 == received
    }
}

impl Default for StateParam {
    fn default() -> Self {
        Self::new()
    }
}

impl AsRef<str> for StateParam {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for StateParam {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Result of [`authorize_url`].
///
/// Store `state` and compare it with the callback's `state` parameter before
/// using the returned code.
#[derive(Clone, Debug)]
pub struct AuthorizeUrl {
    /// The URL to redirect the merchant to.
    pub url: String,
    /// The state parameter embedded in `url`.
    pub state: StateParam,
}

/// Builds the authorize redirect URL for `client_id`.
#[must_use]
pub fn authorize_url(config: &JirafeConfig, client_id: &ClientId, redirect_uri: &str) -> AuthorizeUrl {
    let state = StateParam::new();

    let params = [
        ("response_type", "code"),
        ("client_id", client_id.as_ref()),
        ("redirect_uri", redirect_uri),
        ("state", state.as_ref()),
    ];

    let query_string = params
        .iter()
        .map(|(k, v)| format!("{}={}", urlencoding::encode(k), urlencoding::encode(v)))
        .collect::<Vec<_>>()
        .join("&");

    let base = config.auth_url().as_ref();
    let separator = if base.contains('?') { '&' } else { '?' };
    let url = format!("{base}{separator}{query_string}");

    AuthorizeUrl { url, state }
}
