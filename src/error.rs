//! Error types for the Jirafe API client.
//!
//! This module contains the configuration error type shared by the
//! validated newtypes and the [`JirafeConfigBuilder`](crate::JirafeConfigBuilder).
//!
//! # Error Handling
//!
//! All configuration constructors return `Result<T, ConfigError>` so that
//! invalid values are rejected before any request is made.
//!
//! # Example
//!
//! ```rust
//! use jirafe_api::{SiteId, ConfigError};
//!
//! let result = SiteId::new("");
//! assert!(matches!(result, Err(ConfigError::EmptySiteId)));
//! ```

use thiserror::Error;

/// Errors that can occur while building client configuration.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// Site identifier cannot be empty.
    #[error("Site id cannot be empty. Please provide the Jirafe site id.")]
    EmptySiteId,

    /// OAuth client id cannot be empty.
    #[error("Client id cannot be empty. Please provide a valid OAuth client id.")]
    EmptyClientId,

    /// OAuth client secret cannot be empty.
    #[error("Client secret cannot be empty. Please provide a valid OAuth client secret.")]
    EmptyClientSecret,

    /// An endpoint URL is invalid.
    #[error("Invalid URL '{url}'. Please provide an absolute http(s) URL (e.g., 'https://api.jirafe.com').")]
    InvalidUrl {
        /// The invalid URL that was provided.
        url: String,
    },

    /// API version is invalid.
    #[error("Invalid API version '{version}'. Expected format: 'v<number>' (e.g., 'v1').")]
    InvalidApiVersion {
        /// The invalid version string that was provided.
        version: String,
    },
}
