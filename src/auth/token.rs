//! Access tokens and the OAuth token endpoint exchange.
//!
//! This module holds the token types shared by every session strategy and the
//! single form-encoded POST used by the password, refresh token and
//! authorization code grants.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::auth::session::SessionCore;
use crate::clients::HttpError;
use crate::config::{ClientId, ClientSecret};

/// Grant type for username/password exchanges.
const PASSWORD_GRANT_TYPE: &str = "password";

/// Grant type for refresh token exchanges.
const REFRESH_TOKEN_GRANT_TYPE: &str = "refresh_token";

/// Grant type for authorization code exchanges.
const AUTHORIZATION_CODE_GRANT_TYPE: &str = "authorization_code";

/// A bearer access token.
///
/// The `Debug` implementation masks the token value so sessions can be
/// logged safely.
///
/// # Example
///
/// ```rust
/// use jirafe_api::AccessToken;
///
/// let token = AccessToken::new("abc123");
/// assert_eq!(token.as_str(), "abc123");
/// assert_eq!(format!("{:?}", token), "AccessToken(*****)");
/// ```
#[derive(Clone, PartialEq, Eq)]
pub struct AccessToken(String);

impl AccessToken {
    /// Wraps a raw token string.
    #[must_use]
    pub fn new(token: impl Into<String>) -> Self {
        Self(token.into())
    }

    /// Returns the raw token string.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Returns the `Authorization` header value for this token.
    #[must_use]
    pub fn bearer(&self) -> String {
        format!("Bearer {}", self.0)
    }
}

impl AsRef<str> for AccessToken {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for AccessToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("AccessToken(*****)")
    }
}

/// Cached token state of a session.
///
/// A session starts in `NoToken`. A successful fetch moves it to `HasToken`;
/// invalidation moves it back. A failed fetch leaves it in `NoToken`.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub enum TokenState {
    /// No token is cached; the next header request triggers a fetch.
    #[default]
    NoToken,
    /// A token believed valid until the API rejects it.
    HasToken(AccessToken),
}

impl TokenState {
    /// Returns the cached token, if any.
    #[must_use]
    pub const fn token(&self) -> Option<&AccessToken> {
        match self {
            Self::NoToken => None,
            Self::HasToken(token) => Some(token),
        }
    }

    /// Returns `true` if a token is cached.
    #[must_use]
    pub const fn has_token(&self) -> bool {
        matches!(self, Self::HasToken(_))
    }
}

/// OAuth client credentials sent with every token endpoint request.
#[derive(Clone, Debug)]
pub struct ClientCredentials {
    client_id: ClientId,
    client_secret: ClientSecret,
}

impl ClientCredentials {
    /// Creates a new set of client credentials.
    #[must_use]
    pub const fn new(client_id: ClientId, client_secret: ClientSecret) -> Self {
        Self {
            client_id,
            client_secret,
        }
    }

    /// Returns the client id.
    #[must_use]
    pub const fn client_id(&self) -> &ClientId {
        &self.client_id
    }

    /// Returns the client secret.
    #[must_use]
    pub const fn client_secret(&self) -> &ClientSecret {
        &self.client_secret
    }
}

/// Form body for a token endpoint request.
#[derive(Debug, Serialize)]
pub(crate) struct TokenRequest<'a> {
    grant_type: &'static str,
    client_id: &'a str,
    client_secret: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    username: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    password: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    refresh_token: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    code: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    redirect_uri: Option<&'a str>,
}

impl<'a> TokenRequest<'a> {
    fn base(grant_type: &'static str, credentials: &'a ClientCredentials) -> Self {
        Self {
            grant_type,
            client_id: credentials.client_id.as_ref(),
            client_secret: credentials.client_secret.as_ref(),
            username: None,
            password: None,
            refresh_token: None,
            code: None,
            redirect_uri: None,
        }
    }

    pub(crate) fn password(
        credentials: &'a ClientCredentials,
        username: &'a str,
        password: &'a str,
    ) -> Self {
        let mut request = Self::base(PASSWORD_GRANT_TYPE, credentials);
        request.username = Some(username);
        request.password = Some(password);
        request
    }

    pub(crate) fn refresh_token(
        credentials: &'a ClientCredentials,
        refresh_token: &'a str,
    ) -> Self {
        let mut request = Self::base(REFRESH_TOKEN_GRANT_TYPE, credentials);
        request.refresh_token = Some(refresh_token);
        request
    }

    pub(crate) fn authorization_code(
        credentials: &'a ClientCredentials,
        code: &'a str,
        redirect_uri: Option<&'a str>,
    ) -> Self {
        let mut request = Self::base(AUTHORIZATION_CODE_GRANT_TYPE, credentials);
        request.code = Some(code);
        request.redirect_uri = redirect_uri;
        request
    }

    pub(crate) const fn grant_type(&self) -> &'static str {
        self.grant_type
    }
}

/// Successful token endpoint response.
#[derive(Clone, Debug, Deserialize)]
pub(crate) struct TokenResponse {
    pub(crate) access_token: String,
    #[serde(default)]
    pub(crate) refresh_token: Option<String>,
    #[serde(default)]
    pub(crate) expires_in: Option<u64>,
}

/// Posts a grant to the session's token endpoint.
///
/// Returns `Ok(None)` for any non-200 status or an unparsable body; only
/// transport failures, including a body that cannot be read, are errors.
pub(crate) async fn request_token(
    core: &SessionCore,
    request: &TokenRequest<'_>,
) -> Result<Option<TokenResponse>, HttpError> {
    tracing::debug!(
        site_id = %core.site_id(),
        grant_type = request.grant_type(),
        "Requesting access token"
    );

    let mut builder = core.http().post(core.token_url().as_ref());
    for (key, value) in core.default_headers() {
        builder = builder.header(key, value);
    }

    let response = builder.form(request).send().await?;
    let status = response.status().as_u16();

    if status != 200 {
        tracing::warn!(
            site_id = %core.site_id(),
            grant_type = request.grant_type(),
            status,
            "Token request rejected"
        );
        return Ok(None);
    }

    let body = response.text().await?;
    match serde_json::from_str::<TokenResponse>(&body) {
        Ok(token_response) => {
            tracing::debug!(
                site_id = %core.site_id(),
                expires_in = ?token_response.expires_in,
                "Access token issued"
            );
            Ok(Some(token_response))
        }
        Err(e) => {
            tracing::warn!("Failed to parse token response: {}", e);
            Ok(None)
        }
    }
}
