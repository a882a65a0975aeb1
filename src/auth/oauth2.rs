//! OAuth2 session strategy: supplied access token, refresh token or
//! authorization code.

use std::fmt;

use async_trait::async_trait;

use crate::auth::session::{Session, SessionCore};
use crate::auth::token::{
    request_token, AccessToken, ClientCredentials, TokenRequest, TokenResponse,
};
use crate::clients::HttpError;
use crate::config::{JirafeConfig, SiteId};

/// A session backed by OAuth2 grants.
///
/// Token acquisition tries, in order:
///
/// 1. an access token supplied up front, cached from construction so the
///    first request needs no network call,
/// 2. the stored refresh token (`grant_type=refresh_token`),
/// 3. the one-time authorization code (`grant_type=authorization_code`).
///
/// A supplied access token is an ordinary cached token: once the API rejects
/// it and the session is invalidated, the next fetch falls through to the
/// refresh token or code.
///
/// A successful exchange stores the refresh token returned by the server and
/// discards the authorization code, so later invalidations refresh instead of
/// replaying the code.
///
/// # Example
///
/// ```rust
/// use jirafe_api::{ClientCredentials, ClientId, ClientSecret, JirafeConfig, SiteId};
/// use jirafe_api::auth::OAuth2Session;
///
/// let session = OAuth2Session::new(
///     &JirafeConfig::default(),
///     SiteId::new("1234").unwrap(),
///     ClientCredentials::new(
///         ClientId::new("client-id").unwrap(),
///         ClientSecret::new("client-secret").unwrap(),
///     ),
/// )
/// .with_code("code-from-callback")
/// .with_redirect_uri("https://shop.example.com/jirafe/callback");
///
/// assert_eq!(session.code(), Some("code-from-callback"));
/// assert!(session.refresh_token().is_none());
/// ```
pub struct OAuth2Session {
    core: SessionCore,
    credentials: ClientCredentials,
    code: Option<String>,
    refresh_token: Option<String>,
    redirect_uri: Option<String>,
}

impl OAuth2Session {
    /// Creates an OAuth2 session with no grant material.
    ///
    /// Supply at least one of [`with_code`](Self::with_code),
    /// [`with_refresh_token`](Self::with_refresh_token) or
    /// [`with_access_token`](Self::with_access_token); otherwise every fetch
    /// yields no token.
    #[must_use]
    pub fn new(config: &JirafeConfig, site_id: SiteId, credentials: ClientCredentials) -> Self {
        Self {
            core: SessionCore::new(config, site_id),
            credentials,
            code: None,
            refresh_token: None,
            redirect_uri: None,
        }
    }

    /// Sets the authorization code received on the OAuth callback.
    #[must_use]
    pub fn with_code(mut self, code: impl Into<String>) -> Self {
        self.code = Some(code.into());
        self
    }

    /// Sets a previously issued refresh token.
    #[must_use]
    pub fn with_refresh_token(mut self, refresh_token: impl Into<String>) -> Self {
        self.refresh_token = Some(refresh_token.into());
        self
    }

    /// Seeds the cache with a previously issued access token.
    ///
    /// The token is used until the API rejects it.
    #[must_use]
    pub fn with_access_token(mut self, access_token: impl Into<String>) -> Self {
        self.core.store_token(Some(AccessToken::new(access_token)));
        self
    }

    /// Sets the redirect URI sent with the authorization code exchange.
    #[must_use]
    pub fn with_redirect_uri(mut self, redirect_uri: impl Into<String>) -> Self {
        self.redirect_uri = Some(redirect_uri.into());
        self
    }

    /// Returns the unused authorization code, if any.
    #[must_use]
    pub fn code(&self) -> Option<&str> {
        self.code.as_deref()
    }

    /// Returns the current refresh token. Persist it after a successful
    /// exchange; the server may rotate it.
    #[must_use]
    pub fn refresh_token(&self) -> Option<&str> {
        self.refresh_token.as_deref()
    }

    /// Returns the OAuth client credentials.
    #[must_use]
    pub const fn credentials(&self) -> &ClientCredentials {
        &self.credentials
    }

    /// Records a successful grant and returns its access token.
    fn accept(&mut self, response: TokenResponse) -> AccessToken {
        // Servers that do not rotate leave the current refresh token valid
        if let Some(refresh_token) = response.refresh_token {
            self.refresh_token = Some(refresh_token);
        }
        self.code = None;
        AccessToken::new(response.access_token)
    }
}

#[async_trait]
impl Session for OAuth2Session {
    fn core(&self) -> &SessionCore {
        &self.core
    }

    fn core_mut(&mut self) -> &mut SessionCore {
        &mut self.core
    }

    async fn fetch_token(&mut self) -> Result<Option<AccessToken>, HttpError> {
        let response = if let Some(refresh_token) = &self.refresh_token {
            let request = TokenRequest::refresh_token(&self.credentials, refresh_token);
            request_token(&self.core, &request).await?
        } else if let Some(code) = &self.code {
            let request = TokenRequest::authorization_code(
                &self.credentials,
                code,
                self.redirect_uri.as_deref(),
            );
            request_token(&self.core, &request).await?
        } else {
            tracing::warn!(
                site_id = %self.core.site_id(),
                "OAuth2 session has no refresh token or authorization code"
            );
            return Ok(None);
        };

        Ok(response.map(|response| self.accept(response)))
    }
}

impl fmt::Debug for OAuth2Session {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("OAuth2Session")
            .field("core", &self.core)
            .field("credentials", &self.credentials)
            .field("has_code", &self.code.is_some())
            .field("has_refresh_token", &self.refresh_token.is_some())
            .field("redirect_uri", &self.redirect_uri)
            .finish()
    }
}
