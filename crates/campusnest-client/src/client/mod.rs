//! Shared HTTP client for the marketplace REST API.
//!
//! One [`ApiClient`] is built per process and shared by every store. It
//! attaches the current bearer token to each request, unwraps the optional
//! `{ "data": ... }` envelope, and turns non-2xx answers into
//! [`ApiError::Status`] carrying the backend's own message. There are no
//! retries: a failed call fails once.

mod agents;
mod auth;
mod properties;
mod roommates;
mod universities;

use std::sync::Arc;
use std::time::Duration;

use reqwest::{Client, Method, RequestBuilder, Url};
use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::error::ApiError;
use crate::token::TokenSource;

const USER_AGENT: &str = "campusnest/0.1 (student-housing-client)";

/// Client for the marketplace REST API.
///
/// Use [`ApiClient::new`] with the configured API base; tests point it at a
/// wiremock server the same way.
pub struct ApiClient {
    client: Client,
    base_url: Url,
    tokens: Arc<dyn TokenSource>,
}

impl std::fmt::Debug for ApiClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ApiClient")
            .field("base_url", &self.base_url.as_str())
            .finish_non_exhaustive()
    }
}

impl ApiClient {
    /// Creates a client rooted at `base_url` (e.g. `http://localhost:5000/api`).
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Http`] if the underlying `reqwest::Client` cannot
    /// be constructed, or [`ApiError::InvalidBaseUrl`] if `base_url` does not
    /// parse.
    pub fn new(
        base_url: &str,
        timeout_secs: u64,
        tokens: Arc<dyn TokenSource>,
    ) -> Result<Self, ApiError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .connect_timeout(Duration::from_secs(10))
            .user_agent(USER_AGENT)
            .build()?;

        // Exactly one trailing slash, so Url::join appends instead of
        // replacing the last path segment (`/api`).
        let normalised = format!("{}/", base_url.trim_end_matches('/'));
        let parsed = Url::parse(&normalised).map_err(|e| ApiError::InvalidBaseUrl {
            base_url: base_url.to_owned(),
            reason: e.to_string(),
        })?;
        if parsed.cannot_be_a_base() {
            return Err(ApiError::InvalidBaseUrl {
                base_url: base_url.to_owned(),
                reason: "URL cannot be used as a base".to_owned(),
            });
        }

        Ok(Self {
            client,
            base_url: parsed,
            tokens,
        })
    }

    /// The API base, always ending in `/`.
    #[must_use]
    pub fn base_url(&self) -> &str {
        self.base_url.as_str()
    }

    /// Builds the absolute URL for an API path such as `properties/42`.
    fn endpoint(&self, path: &str) -> Result<Url, ApiError> {
        self.base_url
            .join(path.trim_start_matches('/'))
            .map_err(|e| ApiError::InvalidBaseUrl {
                base_url: self.base_url.to_string(),
                reason: format!("cannot join path '{path}': {e}"),
            })
    }

    /// Builds the URL for one record under `collection`. The id is appended
    /// as a single percent-encoded segment, so `/`, `?` and `#` inside it
    /// cannot change which endpoint is hit.
    fn record_endpoint(&self, collection: &str, id: &str) -> Result<Url, ApiError> {
        if matches!(id, "" | "." | "..") {
            return Err(ApiError::InvalidId(id.to_owned()));
        }
        let mut url = self.endpoint(collection)?;
        url.path_segments_mut()
            .map_err(|()| ApiError::InvalidBaseUrl {
                base_url: self.base_url.to_string(),
                reason: "URL cannot be used as a base".to_owned(),
            })?
            .pop_if_empty()
            .push(id);
        Ok(url)
    }

    /// Starts a request with the bearer token attached when one is stored.
    fn request(&self, method: Method, path: &str) -> Result<RequestBuilder, ApiError> {
        let url = self.endpoint(path)?;
        Ok(self.authorized(method, url))
    }

    /// As [`ApiClient::request`], for a single record addressed by id.
    fn record_request(
        &self,
        method: Method,
        collection: &str,
        id: &str,
    ) -> Result<RequestBuilder, ApiError> {
        let url = self.record_endpoint(collection, id)?;
        Ok(self.authorized(method, url))
    }

    fn authorized(&self, method: Method, url: Url) -> RequestBuilder {
        tracing::debug!(%method, %url, "api request");
        let builder = self.client.request(method, url);
        match self.tokens.bearer_token() {
            Some(token) => builder.bearer_auth(token),
            None => builder,
        }
    }

    /// Sends `builder` and decodes the (possibly enveloped) JSON body.
    async fn send_json<T: DeserializeOwned>(
        builder: RequestBuilder,
        context: &str,
    ) -> Result<T, ApiError> {
        let body = Self::send(builder, context).await?;
        let value: Value = serde_json::from_str(&body).map_err(|e| ApiError::Deserialize {
            context: context.to_owned(),
            source: e,
        })?;
        serde_json::from_value(unwrap_envelope(value)).map_err(|e| ApiError::Deserialize {
            context: context.to_owned(),
            source: e,
        })
    }

    /// Sends `builder`, asserts a 2xx status, and returns the raw body text.
    async fn send(builder: RequestBuilder, context: &str) -> Result<String, ApiError> {
        let response = builder.send().await.inspect_err(|e| {
            tracing::warn!(context, error = %e, "api request failed");
        })?;
        let status = response.status();
        let body = response.text().await?;

        if !status.is_success() {
            let message = error_message(&body)
                .unwrap_or_else(|| status.canonical_reason().unwrap_or("request failed").to_owned());
            tracing::warn!(context, status = status.as_u16(), %message, "api returned error status");
            return Err(ApiError::Status {
                status: status.as_u16(),
                message,
            });
        }

        Ok(body)
    }
}

/// Strips the `{ "data": ... }` wrapper some endpoints add.
fn unwrap_envelope(mut value: Value) -> Value {
    if let Value::Object(map) = &mut value {
        if let Some(data) = map.remove("data") {
            return data;
        }
    }
    value
}

/// Pulls a human-readable message out of an error body, if it has one.
fn error_message(body: &str) -> Option<String> {
    let value: Value = serde_json::from_str(body).ok()?;
    ["message", "error"]
        .iter()
        .find_map(|key| value.get(key).and_then(Value::as_str))
        .filter(|m| !m.is_empty())
        .map(str::to_owned)
}

#[cfg(test)]
#[path = "../client_test.rs"]
mod tests;
