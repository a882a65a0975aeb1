//! Jirafe API version definitions.
//!
//! This module provides the [`ApiVersion`] enum used as the first path
//! segment of every ingestion endpoint.

use crate::error::ConfigError;
use std::fmt;
use std::str::FromStr;

/// Jirafe ingestion API version.
///
/// # Example
///
/// ```rust
/// use jirafe_api::ApiVersion;
///
/// let version: ApiVersion = "v1".parse().unwrap();
/// assert_eq!(version, ApiVersion::V1);
/// assert_eq!(ApiVersion::latest().to_string(), "v1");
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum ApiVersion {
    /// API version `v1`.
    V1,
    /// Custom version string for versions not yet known to this crate.
    Custom(String),
}

impl ApiVersion {
    /// Returns the latest API version.
    #[must_use]
    pub const fn latest() -> Self {
        Self::V1
    }

    /// Returns the version as it appears in request paths.
    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            Self::V1 => "v1",
            Self::Custom(version) => version,
        }
    }
}

impl Default for ApiVersion {
    fn default() -> Self {
        Self::latest()
    }
}

impl fmt::Display for ApiVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ApiVersion {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let version = s.trim().to_lowercase();
        match version.as_str() {
            "v1" => Ok(Self::V1),
            other => {
                let is_versioned = other
                    .strip_prefix('v')
                    .is_some_and(|n| !n.is_empty() && n.chars().all(|c| c.is_ascii_digit()));
                if is_versioned {
                    Ok(Self::Custom(version))
                } else {
                    Err(ConfigError::InvalidApiVersion {
                        version: s.to_string(),
                    })
                }
            }
        }
    }
}
