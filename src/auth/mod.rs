//! Authentication sessions for the Jirafe API.
//!
//! A session holds the credentials for one site and produces the
//! `Authorization: Bearer <token>` header for API calls, fetching a token
//! lazily and discarding it when the API rejects it.
//!
//! # Overview
//!
//! - [`Session`]: The capability every strategy implements
//! - [`UsernameSession`]: Password grant with account credentials
//! - [`OAuth2Session`]: Static access token, refresh token or authorization code
//! - [`AuthorizationHeaderSession`]: Reuses an existing bearer header
//! - [`authorize_url`]: Starts the authorization code flow
//! - [`Profile`] / [`Site`]: Account profile payloads
//!
//! # Token Lifecycle
//!
//! A session starts without a token. The first call to
//! [`Session::auth_header`] runs [`Session::fetch_token`] and caches the
//! result. [`Session::invalidate`] clears the cache; the ingestion client
//! calls it when a request comes back 401/403 and then retries once.
//!
//! # Example
//!
//! ```rust,ignore
//! use jirafe_api::auth::{OAuth2Session, Session};
//! use jirafe_api::{ClientCredentials, ClientId, ClientSecret, JirafeConfig, SiteId};
//!
//! let config = JirafeConfig::default();
//! let mut session = OAuth2Session::new(
//!     &config,
//!     SiteId::new("1234")?,
//!     ClientCredentials::new(ClientId::new("id")?, ClientSecret::new("secret")?),
//! )
//! .with_refresh_token(stored_refresh_token);
//!
//! if let Some(site) = session.site().await? {
//!     println!("Connected to {:?}", site.get("name"));
//! }
//!
//! // Persist the rotated refresh token
//! save(session.refresh_token());
//! ```

mod authorize;
mod header;
mod oauth2;
mod profile;
pub mod session;
mod token;
mod username;

pub use authorize::{authorize_url, AuthorizeUrl, StateParam};
pub use header::{parse_bearer, AuthorizationHeaderSession};
pub use oauth2::OAuth2Session;
pub use profile::{Profile, Site};
pub use session::{Session, SessionCore};
pub use token::{AccessToken, ClientCredentials, TokenState};
pub use username::UsernameSession;
