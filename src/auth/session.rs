//! The session capability shared by every credential strategy.
//!
//! A session owns credential material for one site and a lazily acquired
//! access token. The [`Session`] trait supplies the token cache, header
//! construction, invalidation and profile lookups; each strategy only
//! implements [`Session::fetch_token`].

use std::collections::HashMap;

use async_trait::async_trait;

use crate::auth::profile::{Profile, Site};
use crate::auth::token::{AccessToken, TokenState};
use crate::clients::{build_http_client, default_headers, HttpError};
use crate::config::{EndpointUrl, JirafeConfig, SiteId};

/// Maximum number of attempts for a request that fails authorization.
pub(crate) const MAX_ATTEMPTS: u32 = 2;

/// Returns `true` for statuses that mean the bearer token was rejected.
pub(crate) const fn is_authorization_failure(status: u16) -> bool {
    matches!(status, 401 | 403)
}

/// State common to every session strategy.
///
/// Holds the site id, the account endpoints, the HTTP transport and the
/// cached [`TokenState`]. Custom strategies embed one and expose it through
/// [`Session::core`] / [`Session::core_mut`].
#[derive(Debug)]
pub struct SessionCore {
    site_id: SiteId,
    token_url: EndpointUrl,
    profile_url: EndpointUrl,
    client: reqwest::Client,
    default_headers: HashMap<String, String>,
    token: TokenState,
}

impl SessionCore {
    /// Creates the shared session state for `site_id`.
    ///
    /// # Panics
    ///
    /// Panics if the underlying reqwest client cannot be created (e.g. TLS
    /// initialization failure).
    #[must_use]
    pub fn new(config: &JirafeConfig, site_id: SiteId) -> Self {
        Self {
            site_id,
            token_url: config.token_url().clone(),
            profile_url: config.profile_url().clone(),
            client: build_http_client(),
            default_headers: default_headers(config),
            token: TokenState::NoToken,
        }
    }

    /// Returns the site id.
    #[must_use]
    pub const fn site_id(&self) -> &SiteId {
        &self.site_id
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

    /// Returns the cached token state.
    #[must_use]
    pub const fn token_state(&self) -> &TokenState {
        &self.token
    }

    /// Caches `token`, or clears the cache when `None`.
    pub fn store_token(&mut self, token: Option<AccessToken>) {
        self.token = token.map_or(TokenState::NoToken, TokenState::HasToken);
    }

    /// Clears the cached token.
    pub fn clear_token(&mut self) {
        self.token = TokenState::NoToken;
    }

    pub(crate) const fn http(&self) -> &reqwest::Client {
        &self.client
    }

    pub(crate) const fn default_headers(&self) -> &HashMap<String, String> {
        &self.default_headers
    }
}

/// An authenticated session for one Jirafe site.
///
/// Implementors provide access to their [`SessionCore`] and a strategy for
/// obtaining a token. Everything else has a default implementation.
///
/// Methods that touch the token take `&mut self`: a session is meant to be
/// used by one caller at a time. Wrap it in a mutex to share it across tasks.
///
/// # Example
///
/// ```rust,ignore
/// use jirafe_api::{AuthorizationHeaderSession, JirafeConfig, Session, SiteId};
///
/// let config = JirafeConfig::default();
/// let mut session = AuthorizationHeaderSession::new(
///     &config,
///     SiteId::new("1234")?,
///     "Bearer abc123",
/// );
///
/// let header = session.auth_header().await?;
/// assert_eq!(header["Authorization"], "Bearer abc123");
/// ```
#[async_trait]
pub trait Session: Send + Sync {
    /// Returns the shared session state.
    fn core(&self) -> &SessionCore;

    /// Returns the shared session state mutably.
    fn core_mut(&mut self) -> &mut SessionCore;

    /// Performs the strategy's credential exchange.
    ///
    /// Returns `Ok(None)` when the credentials are rejected or missing. This
    /// does not touch the cache; use [`Session::token`] for cached access.
    ///
    /// # Errors
    ///
    /// Returns [`HttpError::Network`] if the token endpoint cannot be reached.
    async fn fetch_token(&mut self) -> Result<Option<AccessToken>, HttpError>;

    /// Returns the site this session is scoped to.
    fn site_id(&self) -> &SiteId {
        self.core().site_id()
    }

    /// Returns the cached access token without fetching.
    fn access_token(&self) -> Option<&AccessToken> {
        self.core().token_state().token()
    }

    /// Returns the cached token, fetching one first if none is cached.
    ///
    /// # Errors
    ///
    /// Returns [`HttpError::Network`] if a fetch is needed and fails at the
    /// transport level.
    async fn token(&mut self) -> Result<Option<AccessToken>, HttpError> {
        if let Some(token) = self.access_token() {
            return Ok(Some(token.clone()));
        }

        let fetched = self.fetch_token().await?;
        if fetched.is_none() {
            tracing::warn!(site_id = %self.site_id(), "No access token could be obtained");
        }
        self.core_mut().store_token(fetched.clone());
        Ok(fetched)
    }

    /// Returns the `Authorization` header for the current token.
    ///
    /// When no token can be obtained the map is empty, so the API rejects
    /// the request as unauthorized.
    ///
    /// # Errors
    ///
    /// Returns [`HttpError::Network`] if fetching a token fails at the
    /// transport level.
    async fn auth_header(&mut self) -> Result<HashMap<String, String>, HttpError> {
        let mut headers = HashMap::new();
        if let Some(token) = self.token().await? {
            headers.insert("Authorization".to_string(), token.bearer());
        }
        Ok(headers)
    }

    /// Discards the cached token so the next request fetches a new one.
    fn invalidate(&mut self) {
        tracing::debug!(site_id = %self.site_id(), "Invalidating access token");
        self.core_mut().clear_token();
    }

    /// Fetches the account profile.
    ///
    /// A 401/403 response invalidates the token and retries once. Any other
    /// non-200 outcome, or an unparsable body, yields `None`.
    ///
    /// # Errors
    ///
    /// Returns [`HttpError::Network`] on transport failures.
    async fn profile(&mut self) -> Result<Option<Profile>, HttpError> {
        let mut tries: u32 = 0;
        loop {
            tries += 1;

            let auth = self.auth_header().await?;
            let core = self.core();
            let mut request = core.http().get(core.profile_url().as_ref());
            for (key, value) in core.default_headers().iter().chain(&auth) {
                request = request.header(key, value);
            }

            let response = request.send().await?;
            let status = response.status().as_u16();

            if is_authorization_failure(status) && tries < MAX_ATTEMPTS {
                tracing::warn!(
                    site_id = %self.site_id(),
                    status,
                    "Profile request unauthorized, retrying with a fresh token"
                );
                self.invalidate();
                continue;
            }

            if status != 200 {
                tracing::warn!(site_id = %self.site_id(), status, "Profile request failed");
                return Ok(None);
            }

            let body = response.text().await?;
            return Ok(serde_json::from_str(&body)
                .map_err(|e| tracing::warn!("Failed to parse profile response: {}", e))
                .ok());
        }
    }

    /// Returns the profile's entry for this session's site.
    ///
    /// # Errors
    ///
    /// Returns [`HttpError::Network`] on transport failures.
    async fn site(&mut self) -> Result<Option<Site>, HttpError> {
        let profile = self.profile().await?;
        Ok(profile.and_then(|profile| profile.find_site(self.site_id()).cloned()))
    }
}

// Verify SessionCore is Send + Sync at compile time
const _: fn() = || {
    const fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<SessionCore>();
};
