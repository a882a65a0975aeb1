//! Error types for Jirafe API requests.
//!
//! Expected API outcomes (validation errors, rejected credentials, unknown
//! statuses) are not errors; they are reported through
//! [`ChangeResult`](crate::clients::ChangeResult). [`HttpError`] covers only
//! failures that prevent a request from completing.
//!
//! # Example
//!
//! ```rust,ignore
//! use jirafe_api::clients::HttpError;
//!
//! match client.order_change(&mut session, order).await {
//!     Ok(result) if result.is_success() => {}
//!     Ok(result) => println!("Rejected: {:?}", result),
//!     Err(HttpError::Network(e)) => println!("Network error: {}", e),
//!     Err(HttpError::InvalidPayload(e)) => println!("Bad payload: {}", e),
//! }
//! ```

use thiserror::Error;

/// Failures that prevent a request from producing a response.
#[derive(Debug, Error)]
pub enum HttpError {
    /// Network or connection error (DNS failure, refused connection, TLS).
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    /// The change payload could not be serialized to JSON.
    #[error("Invalid payload: {0}")]
    InvalidPayload(#[from] serde_json::Error),
}
