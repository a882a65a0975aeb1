//! Username/password session strategy.

use std::fmt;

use async_trait::async_trait;

use crate::auth::session::{Session, SessionCore};
use crate::auth::token::{request_token, AccessToken, ClientCredentials, TokenRequest};
use crate::clients::HttpError;
use crate::config::{JirafeConfig, SiteId};

/// A session that exchanges account credentials for a token using the
/// OAuth password grant.
///
/// # Example
///
/// ```rust
/// use jirafe_api::{ClientCredentials, ClientId, ClientSecret, JirafeConfig, SiteId};
/// use jirafe_api::auth::UsernameSession;
///
/// let session = UsernameSession::new(
///     &JirafeConfig::default(),
///     SiteId::new("1234").unwrap(),
///     "user@example.com",
///     "password",
///     ClientCredentials::new(
///         ClientId::new("client-id").unwrap(),
///         ClientSecret::new("client-secret").unwrap(),
///     ),
/// );
///
/// assert_eq!(session.username(), "user@example.com");
/// ```
pub struct UsernameSession {
    core: SessionCore,
    username: String,
    password: String,
    credentials: ClientCredentials,
}

impl UsernameSession {
    /// Creates a username/password session for `site_id`.
    #[must_use]
    pub fn new(
        config: &JirafeConfig,
        site_id: SiteId,
        username: impl Into<String>,
        password: impl Into<String>,
        credentials: ClientCredentials,
    ) -> Self {
        Self {
            core: SessionCore::new(config, site_id),
            username: username.into(),
            password: password.into(),
            credentials,
        }
    }

    /// Returns the account username.
    #[must_use]
    pub fn username(&self) -> &str {
        &self.username
    }

    /// Returns the OAuth client credentials.
    #[must_use]
    pub const fn credentials(&self) -> &ClientCredentials {
        &self.credentials
    }
}

#[async_trait]
impl Session for UsernameSession {
    fn core(&self) -> &SessionCore {
        &self.core
    }

    fn core_mut(&mut self) -> &mut SessionCore {
        &mut self.core
    }

    async fn fetch_token(&mut self) -> Result<Option<AccessToken>, HttpError> {
        let request = TokenRequest::password(&self.credentials, &self.username, &self.password);
        let response = request_token(&self.core, &request).await?;
        Ok(response.map(|response| AccessToken::new(response.access_token)))
    }
}

impl fmt::Debug for UsernameSession {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("UsernameSession")
            .field("core", &self.core)
            .field("username", &self.username)
            .field("password", &"*****")
            .field("credentials", &self.credentials)
            .finish()
    }
}
