//! Change event payloads and their results.

use std::fmt;

use serde::ser::SerializeMap;
use serde::{Serialize, Serializer};
use serde_json::{Map, Value};

use crate::auth::session::is_authorization_failure;
use crate::clients::HttpError;

/// Resource kinds accepted by the ingestion API.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Resource {
    /// Product catalog changes.
    Product,
    /// Category tree changes.
    Category,
    /// Shopping cart changes.
    Cart,
    /// Order changes.
    Order,
    /// Customer account changes.
    Customer,
}

impl Resource {
    /// Every resource kind.
    pub const ALL: [Self; 5] = [
        Self::Product,
        Self::Category,
        Self::Cart,
        Self::Order,
        Self::Customer,
    ];

    /// Returns the endpoint path segment for this resource.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Product => "product",
            Self::Category => "category",
            Self::Cart => "cart",
            Self::Order => "order",
            Self::Customer => "customer",
        }
    }
}

impl fmt::Display for Resource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Body of a change event.
///
/// Strings are sent verbatim; JSON values are serialized compactly.
///
/// # Example
///
/// ```rust
/// use jirafe_api::clients::ChangePayload;
/// use serde_json::json;
///
/// let payload = ChangePayload::from(json!({"bar": "baz"}));
/// assert_eq!(payload.into_body(), r#"{"bar":"baz"}"#);
///
/// let raw = ChangePayload::from(r#"{ "already": "encoded" }"#);
/// assert_eq!(raw.into_body(), r#"{ "already": "encoded" }"#);
/// ```
#[derive(Clone, Debug, PartialEq)]
pub enum ChangePayload {
    /// A pre-encoded body.
    Raw(String),
    /// A structured body.
    Json(Value),
}

impl ChangePayload {
    /// Converts any serializable value into a payload.
    ///
    /// # Errors
    ///
    /// Returns [`HttpError::InvalidPayload`] if `value` cannot be represented as JSON.
    pub fn from_serialize<T: Serialize + ?Sized>(value: &T) -> Result<Self, HttpError> {
        Ok(Self::Json(serde_json::to_value(value)?))
    }

    /// Returns the request body text.
    #[must_use]
    pub fn into_body(self) -> String {
        match self {
            Self::Raw(body) => body,
            Self::Json(value) => value.to_string(),
        }
    }
}

impl From<String> for ChangePayload {
    fn from(body: String) -> Self {
        Self::Raw(body)
    }
}

impl From<&str> for ChangePayload {
    fn from(body: &str) -> Self {
        Self::Raw(body.to_string())
    }
}

impl From<Value> for ChangePayload {
    fn from(value: Value) -> Self {
        Self::Json(value)
    }
}

impl From<Map<String, Value>> for ChangePayload {
    fn from(map: Map<String, Value>) -> Self {
        Self::Json(Value::Object(map))
    }
}

/// Outcome of a change event submission.
///
/// Serializes to the wire-style result object, e.g. `{"success": true}` or
/// `{"success": false, "error_type": "validation", "errors": {...}}`.
#[derive(Clone, Debug, PartialEq)]
pub enum ChangeResult {
    /// The event was accepted (HTTP 200).
    Success,
    /// The payload was rejected (HTTP 400).
    Validation {
        /// Field-level errors from the response, or an empty object.
        errors: Value,
    },
    /// The credentials were rejected, even after a token refresh.
    Authorization,
    /// Any other status.
    Unknown {
        /// The raw response body.
        raw: String,
    },
}

impl ChangeResult {
    /// Maps an HTTP status and body to a result.
    ///
    /// # Example
    ///
    /// ```rust
    /// use jirafe_api::clients::ChangeResult;
    /// use serde_json::json;
    ///
    /// let result = ChangeResult::from_response(400, r#"{"errors": {"foo": "bad"}}"#);
    /// assert_eq!(result, ChangeResult::Validation { errors: json!({"foo": "bad"}) });
    /// ```
    #[must_use]
    pub fn from_response(status: u16, body: &str) -> Self {
        match status {
            200 => Self::Success,
            400 => {
                let errors = serde_json::from_str::<Value>(body)
                    .ok()
                    .and_then(|mut body| body.get_mut("errors").map(Value::take))
                    .filter(|errors| !errors.is_null())
                    .unwrap_or_else(|| Value::Object(Map::new()));
                Self::Validation { errors }
            }
            status if is_authorization_failure(status) => Self::Authorization,
            _ => Self::Unknown {
                raw: body.to_string(),
            },
        }
    }

    /// Returns `true` if the event was accepted.
    #[must_use]
    pub const fn is_success(&self) -> bool {
        matches!(self, Self::Success)
    }

    /// Returns `true` if the credentials were rejected.
    #[must_use]
    pub const fn is_authorization_error(&self) -> bool {
        matches!(self, Self::Authorization)
    }

    /// Returns the `error_type` label, or `None` on success.
    #[must_use]
    pub const fn error_type(&self) -> Option<&'static str> {
        match self {
            Self::Success => None,
            Self::Validation { .. } => Some("validation"),
            Self::Authorization => Some("authorization"),
            Self::Unknown { .. } => Some("unknown"),
        }
    }
}

impl Serialize for ChangeResult {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let len = match self {
            Self::Success => 1,
            Self::Authorization => 2,
            Self::Validation { .. } | Self::Unknown { .. } => 3,
        };
        let mut map = serializer.serialize_map(Some(len))?;
        map.serialize_entry("success", &self.is_success())?;
        if let Some(error_type) = self.error_type() {
            map.serialize_entry("error_type", error_type)?;
        }
        match self {
            Self::Validation { errors } => map.serialize_entry("errors", errors)?,
            Self::Unknown { raw } => map.serialize_entry("raw", raw)?,
            Self::Success | Self::Authorization => {}
        }
        map.end()
    }
}
