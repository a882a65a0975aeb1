//! Client for the Jirafe change-event ingestion API.
//!
//! This module provides the [`JirafeClient`] type, which submits one change
//! event per call and retries once when the session's token is rejected.

use std::collections::HashMap;

use crate::auth::session::MAX_ATTEMPTS;
use crate::auth::Session;
use crate::clients::change::{ChangePayload, ChangeResult, Resource};
use crate::clients::errors::HttpError;
use crate::clients::http_client::{build_http_client, default_headers};
use crate::config::{ApiVersion, EndpointUrl, JirafeConfig, SiteId};

/// Client for submitting change events.
///
/// The client holds only configuration and the HTTP transport; all
/// credential state lives in the [`Session`] passed to each call.
///
/// # Retry Behavior
///
/// - **200**: [`ChangeResult::Success`]
/// - **400**: [`ChangeResult::Validation`], not retried
/// - **401/403**: the session is invalidated and the identical request is
///   sent once more; a second rejection yields [`ChangeResult::Authorization`]
/// - **Anything else**: [`ChangeResult::Unknown`] with the raw body, not retried
///
/// # Thread Safety
///
/// `JirafeClient` is `Send + Sync` and can be shared across tasks.
///
/// # Example
///
/// ```rust,ignore
/// use jirafe_api::{JirafeClient, JirafeConfig};
/// use serde_json::json;
///
/// let client = JirafeClient::new(&JirafeConfig::default());
/// let result = client
///     .product_change(&mut session, json!({"id": "1", "name": "Hat"}))
///     .await?;
///
/// if !result.is_success() {
///     eprintln!("Product change rejected: {:?}", result);
/// }
/// ```
#[derive(Debug)]
pub struct JirafeClient {
    /// The internal reqwest HTTP client.
    client: reqwest::Client,
    /// Base URL, always ending with `/`.
    api_url: EndpointUrl,
    /// API version path segment.
    api_version: ApiVersion,
    /// Default headers to include in all requests.
    default_headers: HashMap<String, String>,
}

// Verify JirafeClient is Send + Sync at compile time
const _: fn() = || {
    const fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<JirafeClient>();
};

impl JirafeClient {
    /// Creates a new client from `config`.
    ///
    /// # Panics
    ///
    /// Panics if the underlying reqwest client cannot be created.
    #[must_use]
    pub fn new(config: &JirafeConfig) -> Self {
        Self {
            client: build_http_client(),
            api_url: config.api_url().clone(),
            api_version: config.api_version().clone(),
            default_headers: default_headers(config),
        }
    }

    /// Returns the API base URL.
    #[must_use]
    pub fn api_url(&self) -> &str {
        self.api_url.as_ref()
    }

    /// Returns the default headers for this client.
    #[must_use]
    pub const fn default_headers(&self) -> &HashMap<String, String> {
        &self.default_headers
    }

    /// Returns the endpoint URL for `resource` on `site_id`.
    ///
    /// The site id is percent-encoded as a single path segment.
    ///
    /// # Example
    ///
    /// ```rust
    /// use jirafe_api::{JirafeClient, JirafeConfig, SiteId};
    /// use jirafe_api::clients::Resource;
    ///
    /// let client = JirafeClient::new(&JirafeConfig::default());
    /// let site = SiteId::new("id").unwrap();
    ///
    /// assert_eq!(
    ///     client.endpoint(&site, Resource::Product),
    ///     "https://api.jirafe.com/v1/id/product"
    /// );
    /// ```
    #[must_use]
    pub fn endpoint(&self, site_id: &SiteId, resource: Resource) -> String {
        format!(
            "{}{}/{}/{}",
            self.api_url,
            self.api_version,
            urlencoding::encode(site_id.as_ref()),
            resource
        )
    }

    /// Submits a product change.
    ///
    /// # Errors
    ///
    /// See [`JirafeClient::change`].
    pub async fn product_change<S: Session + ?Sized>(
        &self,
        session: &mut S,
        data: impl Into<ChangePayload>,
    ) -> Result<ChangeResult, HttpError> {
        self.change(session, Resource::Product, data).await
    }

    /// Submits a category change.
    ///
    /// # Errors
    ///
    /// See [`JirafeClient::change`].
    pub async fn category_change<S: Session + ?Sized>(
        &self,
        session: &mut S,
        data: impl Into<ChangePayload>,
    ) -> Result<ChangeResult, HttpError> {
        self.change(session, Resource::Category, data).await
    }

    /// Submits a cart change.
    ///
    /// # Errors
    ///
    /// See [`JirafeClient::change`].
    pub async fn cart_change<S: Session + ?Sized>(
        &self,
        session: &mut S,
        data: impl Into<ChangePayload>,
    ) -> Result<ChangeResult, HttpError> {
        self.change(session, Resource::Cart, data).await
    }

    /// Submits an order change.
    ///
    /// # Errors
    ///
    /// See [`JirafeClient::change`].
    pub async fn order_change<S: Session + ?Sized>(
        &self,
        session: &mut S,
        data: impl Into<ChangePayload>,
    ) -> Result<ChangeResult, HttpError> {
        self.change(session, Resource::Order, data).await
    }

    /// Submits a customer change.
    ///
    /// # Errors
    ///
    /// See [`JirafeClient::change`].
    pub async fn customer_change<S: Session + ?Sized>(
        &self,
        session: &mut S,
        data: impl Into<ChangePayload>,
    ) -> Result<ChangeResult, HttpError> {
        self.change(session, Resource::Customer, data).await
    }

    /// Submits a change event for `resource` with `PUT {api_url}{version}/{site_id}/{resource}`.
    ///
    /// # Errors
    ///
    /// Returns [`HttpError::Network`] if the API or token endpoint cannot be
    /// reached. Every HTTP response is reported through [`ChangeResult`].
    pub async fn change<S: Session + ?Sized>(
        &self,
        session: &mut S,
        resource: Resource,
        data: impl Into<ChangePayload>,
    ) -> Result<ChangeResult, HttpError> {
        let url = self.endpoint(session.site_id(), resource);
        let body = data.into().into_body();

        let mut tries: u32 = 0;
        loop {
            tries += 1;

            let auth = session.auth_header().await?;

            let mut request = self.client.put(&url);
            for (key, value) in self.default_headers.iter().chain(&auth) {
                request = request.header(key, value);
            }
            request = request
                .header("Content-Type", "application/json")
                .body(body.clone());

            tracing::debug!(%url, attempt = tries, "Sending {} change", resource);
            let res = request.send().await?;

            let code = res.status().as_u16();
            let body_text = res.text().await?;
            let result = ChangeResult::from_response(code, &body_text);

            if result.is_authorization_error() && tries < MAX_ATTEMPTS {
                tracing::warn!(
                    site_id = %session.site_id(),
                    status = code,
                    "{} change unauthorized, retrying with a fresh token",
                    resource
                );
                session.invalidate();
                continue;
            }

            if !result.is_success() {
                tracing::warn!(
                    site_id = %session.site_id(),
                    status = code,
                    error_type = ?result.error_type(),
                    "{} change failed",
                    resource
                );
            }

            return Ok(result);
        }
    }
}
