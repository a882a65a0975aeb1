//! Account profile payloads returned by the profile endpoint.

use std::borrow::Cow;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::config::SiteId;

/// The authenticated account's profile.
///
/// Only `sites` is interpreted; every other field is kept in `extra`.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Profile {
    /// Sites the account can access, if the profile lists any.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sites: Option<Vec<Site>>,

    /// Remaining profile fields.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Profile {
    /// Returns the first site whose id equals `site_id`.
    ///
    /// Entries without a usable id are skipped.
    #[must_use]
    pub fn find_site(&self, site_id: &SiteId) -> Option<&Site> {
        self.sites
            .as_deref()?
            .iter()
            .find(|site| site.id().as_deref() == Some(site_id.as_ref()))
    }
}

/// A site entry from the profile's `sites` list, kept exactly as received.
///
/// # Example
///
/// ```rust
/// use jirafe_api::Site;
///
/// let site: Site = serde_json::from_str(r#"{"id": 42, "name": "Demo"}"#).unwrap();
/// assert_eq!(site.id().as_deref(), Some("42"));
/// assert_eq!(site.get("name").unwrap(), "Demo");
/// assert_eq!(serde_json::to_string(&site).unwrap(), r#"{"id":42,"name":"Demo"}"#);
/// ```
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Site(Value);

impl Site {
    /// Returns the site id as text.
    ///
    /// String ids are returned as-is and numeric ids as their decimal text.
    /// Any other `id` (missing, null, boolean, nested) yields `None`.
    #[must_use]
    pub fn id(&self) -> Option<Cow<'_, str>> {
        match self.0.get("id")? {
            Value::String(id) => Some(Cow::Borrowed(id)),
            Value::Number(id) => Some(Cow::Owned(id.to_string())),
            _ => None,
        }
    }

    /// Returns the field `key`, if the entry is an object containing it.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    /// Returns the raw entry.
    #[must_use]
    pub const fn as_value(&self) -> &Value {
        &self.0
    }

    /// Consumes the site, returning the raw entry.
    #[must_use]
    pub fn into_value(self) -> Value {
        self.0
    }
}

impl From<Value> for Site {
    fn from(value: Value) -> Self {
        Self(value)
    }
}
