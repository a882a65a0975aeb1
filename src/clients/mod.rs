//! Ingestion client and HTTP types for the Jirafe API.
//!
//! # Overview
//!
//! - [`JirafeClient`]: Submits change events for a [`Session`](crate::auth::Session)
//! - [`Resource`]: The resource kinds the API accepts
//! - [`ChangePayload`]: A change event body
//! - [`ChangeResult`]: The normalized outcome of a submission
//! - [`HttpError`]: Transport and serialization failures
//!
//! # Example
//!
//! ```rust,ignore
//! use jirafe_api::{AuthorizationHeaderSession, JirafeClient, JirafeConfig, SiteId};
//! use serde_json::json;
//!
//! let config = JirafeConfig::default();
//! let client = JirafeClient::new(&config);
//! let mut session =
//!     AuthorizationHeaderSession::new(&config, SiteId::new("1234")?, incoming_auth_header);
//!
//! let result = client
//!     .cart_change(&mut session, json!({"id": "cart-1", "items": []}))
//!     .await?;
//! ```
//!
//! # Retry Behavior
//!
//! Only authorization failures (401/403) are retried, exactly once, after
//! invalidating the session's token. Validation errors and unknown statuses
//! are returned immediately.

mod change;
mod client;
mod errors;
mod http_client;

pub use change::{ChangePayload, ChangeResult, Resource};
pub use client::JirafeClient;
pub use errors::HttpError;
pub use http_client::{user_agent, SDK_VERSION};

pub(crate) use http_client::{build_http_client, default_headers};
