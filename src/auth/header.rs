//! Authorization header passthrough session strategy.

use async_trait::async_trait;

use crate::auth::session::{Session, SessionCore};
use crate::auth::token::AccessToken;
use crate::clients::HttpError;
use crate::config::{JirafeConfig, SiteId};

/// A session that reuses a bearer token from an `Authorization` header the
/// caller already holds, e.g. one forwarded from an incoming request.
///
/// No token endpoint is ever contacted. A header that is not of the form
/// `Bearer <token>` yields no token.
#[derive(Debug)]
pub struct AuthorizationHeaderSession {
    core: SessionCore,
    auth_header: String,
}

impl AuthorizationHeaderSession {
    /// Creates a passthrough session from a raw `Authorization` header value.
    #[must_use]
    pub fn new(config: &JirafeConfig, site_id: SiteId, auth_header: impl Into<String>) -> Self {
        Self {
            core: SessionCore::new(config, site_id),
            auth_header: auth_header.into(),
        }
    }
}

/// Extracts the token from a `Bearer <token>` header value.
///
/// The scheme is matched case-insensitively and the value must split into
/// exactly two whitespace-separated parts.
///
/// # Example
///
/// ```rust
/// use jirafe_api::auth::parse_bearer;
///
/// assert_eq!(parse_bearer("Bearer abc123"), Some("abc123"));
/// assert_eq!(parse_bearer("bearer abc123"), Some("abc123"));
/// assert_eq!(parse_bearer("Basic abc123"), None);
/// assert_eq!(parse_bearer("abc123"), None);
/// ```
#[must_use]
pub fn parse_bearer(header: &str) -> Option<&str> {
    let mut parts = header.split_whitespace();
    match (parts.next(), parts.next(), parts.next()) {
        (Some(scheme), Some(token), None) if scheme.eq_ignore_ascii_case("bearer") => Some(token),
        _ => None,
    }
}

#[async_trait]
impl Session for AuthorizationHeaderSession {
    fn core(&self) -> &SessionCore {
        &self.core
    }

    fn core_mut(&mut self) -> &mut SessionCore {
        &mut self.core
    }

    async fn fetch_token(&mut self) -> Result<Option<AccessToken>, HttpError> {
        let token = parse_bearer(&self.auth_header).map(AccessToken::new);
        if token.is_none() {
            tracing::warn!(
                site_id = %self.core.site_id(),
                "Authorization header is not a bearer token"
            );
        }
        Ok(token)
    }
}
