//! # Jirafe API Rust Client
//!
//! A Rust client for the Jirafe commerce analytics ingestion API, providing
//! typed configuration, OAuth2 session handling and change-event submission.
//!
//! ## Overview
//!
//! This crate provides:
//! - Type-safe configuration via [`JirafeConfig`] and [`JirafeConfigBuilder`]
//! - Validated newtypes for site ids, client credentials and endpoint URLs
//! - Sessions that lazily obtain and cache bearer tokens:
//!   - [`UsernameSession`]: OAuth password grant
//!   - [`OAuth2Session`]: supplied access token, refresh token or authorization code
//!   - [`AuthorizationHeaderSession`]: reuse an existing `Bearer` header
//! - [`JirafeClient`] for product, category, cart, order and customer changes,
//!   with a single retry when the token is rejected
//!
//! ## Quick Start
//!
//! ```rust
//! use jirafe_api::{JirafeConfig, JirafeClient};
//!
//! let config = JirafeConfig::builder()
//!     .api_url("https://api.jirafe.com")
//!     .build()
//!     .unwrap();
//!
//! let client = JirafeClient::new(&config);
//! assert_eq!(client.api_url(), "https://api.jirafe.com/");
//! ```
//!
//! ## Sending Change Events
//!
//! ```rust,ignore
//! use jirafe_api::{
//!     ClientCredentials, ClientId, ClientSecret, JirafeClient, JirafeConfig, SiteId,
//!     UsernameSession,
//! };
//! use serde_json::json;
//!
//! let config = JirafeConfig::default();
//! let client = JirafeClient::new(&config);
//!
//! // One session per site, reused across calls
//! let mut session = UsernameSession::new(
//!     &config,
//!     SiteId::new("1234")?,
//!     "user@example.com",
//!     "password",
//!     ClientCredentials::new(ClientId::new("client-id")?, ClientSecret::new("secret")?),
//! );
//!
//! let result = client
//!     .product_change(&mut session, json!({"id": "sku-1", "name": "Hat"}))
//!     .await?;
//!
//! match result {
//!     ChangeResult::Success => {}
//!     ChangeResult::Validation { errors } => eprintln!("Invalid product: {errors}"),
//!     ChangeResult::Authorization => eprintln!("Credentials rejected"),
//!     ChangeResult::Unknown { raw } => eprintln!("Unexpected response: {raw}"),
//! }
//! ```
//!
//! ## OAuth2 Authorization Code Flow
//!
//! ```rust,ignore
//! use jirafe_api::auth::{authorize_url, OAuth2Session};
//!
//! // Step 1: Redirect the merchant
//! let redirect = authorize_url(&config, &client_id, "https://shop.example.com/callback");
//! // Store redirect.state, send the merchant to redirect.url
//!
//! // Step 2: Exchange the code from the callback
//! let mut session = OAuth2Session::new(&config, site_id, credentials)
//!     .with_code(code)
//!     .with_redirect_uri("https://shop.example.com/callback");
//!
//! let result = client.order_change(&mut session, order).await?;
//!
//! // Step 3: Persist the refresh token for later sessions
//! store(session.refresh_token());
//! ```
//!
//! ## Design Principles
//!
//! - **No global state**: Configuration is instance-based and passed explicitly
//! - **Fail-fast validation**: All newtypes validate on construction
//! - **Expected failures are values**: API rejections are [`ChangeResult`]s;
//!   only transport failures are errors
//! - **Single writer**: Session methods that touch the token take `&mut self`

pub mod auth;
pub mod clients;
pub mod config;
pub mod error;

// Re-export public types at crate root for convenience
pub use auth::{
    AccessToken, AuthorizationHeaderSession, ClientCredentials, OAuth2Session, Profile, Session,
    SessionCore, Site, TokenState, UsernameSession,
};
pub use config::{
    ApiVersion, ClientId, ClientSecret, EndpointUrl, JirafeConfig, JirafeConfigBuilder, SiteId,
};
pub use error::ConfigError;

// Re-export client types
pub use clients::{ChangePayload, ChangeResult, HttpError, JirafeClient, Resource};
