//! Typed client for the remote marketplace admin API.
//!
//! The panel owns no data of its own: every screen reads from and writes to
//! this REST API. The backend is not consistent about response envelopes
//! (bare arrays vs. `{"data": [...]}` vs. resource-named keys) or field
//! casing, so this module keeps all of that tolerance at the boundary:
//! resource modules deserialize lenient wire types and convert them into
//! normalized `sellerdesk-core` domain types before anything else sees them.
//!
//! # Resource modules
//!
//! - [`sellers`] - login, profile read/update, seller list, package history
//! - [`orders`] - seller orders, line-item status, order type
//! - [`shipping`] - per-(order, seller) shipping records
//! - [`catalog`] - categories, subcategories, seller products
//! - [`buyers`] - buyer display names
//! - [`stock`] - stock item CRUD

pub mod buyers;
pub mod catalog;
pub mod conversions;
pub mod orders;
pub mod sellers;
pub mod shipping;
pub mod stock;
pub mod types;

pub use types::*;

use std::sync::Arc;

use reqwest::StatusCode;
use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::Value;
use thiserror::Error;
use url::Url;

use crate::config::UpstreamConfig;

/// Errors that can occur when talking to the marketplace API.
#[derive(Debug, Error)]
pub enum MarketplaceError {
    /// Transport-level failure (connect, timeout, body read).
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// API returned a non-2xx response.
    #[error("API error: {status} - {message}")]
    Api { status: u16, message: String },

    /// Credentials were rejected.
    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    /// Resource does not exist.
    #[error("Not found: {0}")]
    NotFound(String),

    /// Response body did not match the expected shape.
    #[error("Parse error: {0}")]
    Parse(String),
}

impl MarketplaceError {
    /// Whether this error is a "record does not exist" outcome, which most
    /// read paths treat as an empty state rather than a failure.
    #[must_use]
    pub const fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound(_))
    }
}

/// Marketplace admin API client.
///
/// Cheaply cloneable via `Arc`; one instance is shared across all handlers
/// and background tasks.
#[derive(Clone)]
pub struct MarketplaceClient {
    inner: Arc<MarketplaceClientInner>,
}

struct MarketplaceClientInner {
    client: reqwest::Client,
    base_url: Url,
}

impl MarketplaceClient {
    /// Create a new marketplace API client.
    ///
    /// # Errors
    ///
    /// Returns error if the HTTP client fails to build.
    pub fn new(config: &UpstreamConfig) -> Result<Self, MarketplaceError> {
        let client = reqwest::Client::builder()
            .timeout(config.timeout)
            .build()?;

        Ok(Self {
            inner: Arc::new(MarketplaceClientInner {
                client,
                base_url: config.base_url.clone(),
            }),
        })
    }

    /// The configured upstream base URL.
    #[must_use]
    pub fn base_url(&self) -> &Url {
        &self.inner.base_url
    }

    fn url(&self, path: &str) -> String {
        let base = self.inner.base_url.as_str().trim_end_matches('/');
        format!("{base}{path}")
    }

    /// Execute a GET request and parse the JSON body.
    pub(crate) async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T, MarketplaceError> {
        let response = self.inner.client.get(self.url(path)).send().await?;
        self.handle_response(response).await
    }

    /// Execute a GET request, treating 404 and 204 as "no value".
    pub(crate) async fn get_optional(&self, path: &str) -> Result<Option<Value>, MarketplaceError> {
        let response = self.inner.client.get(self.url(path)).send().await?;
        let status = response.status();
        if status == StatusCode::NOT_FOUND || status == StatusCode::NO_CONTENT {
            return Ok(None);
        }
        if !status.is_success() {
            return Err(self.parse_error(response).await);
        }
        let value = response
            .json()
            .await
            .map_err(|e| MarketplaceError::Parse(format!("Failed to parse response: {e}")))?;
        Ok(Some(value))
    }

    /// Execute a POST request with a JSON body.
    pub(crate) async fn post<T: DeserializeOwned, B: Serialize + Sync>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T, MarketplaceError> {
        let response = self
            .inner
            .client
            .post(self.url(path))
            .json(body)
            .send()
            .await?;
        self.handle_response(response).await
    }

    /// Execute a PATCH request with a JSON body.
    pub(crate) async fn patch<T: DeserializeOwned, B: Serialize + Sync>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T, MarketplaceError> {
        let response = self
            .inner
            .client
            .patch(self.url(path))
            .json(body)
            .send()
            .await?;
        self.handle_response(response).await
    }

    /// Execute a POST request, ignoring the response body.
    ///
    /// Mutation endpoints answer with anything from an empty body to a
    /// message object, so only the status code is inspected.
    pub(crate) async fn post_unit<B: Serialize + Sync>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<(), MarketplaceError> {
        let response = self
            .inner
            .client
            .post(self.url(path))
            .json(body)
            .send()
            .await?;
        let status = response.status();
        if status.is_success() {
            return Ok(());
        }
        Err(self.parse_error(response).await)
    }

    /// Execute a PATCH request, ignoring the response body.
    pub(crate) async fn patch_unit<B: Serialize + Sync>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<(), MarketplaceError> {
        let response = self
            .inner
            .client
            .patch(self.url(path))
            .json(body)
            .send()
            .await?;
        let status = response.status();
        if status.is_success() {
            return Ok(());
        }
        Err(self.parse_error(response).await)
    }

    /// Execute a PATCH request with a multipart form body.
    pub(crate) async fn patch_multipart(
        &self,
        path: &str,
        form: reqwest::multipart::Form,
    ) -> Result<(), MarketplaceError> {
        let response = self
            .inner
            .client
            .patch(self.url(path))
            .multipart(form)
            .send()
            .await?;
        let status = response.status();
        if status.is_success() {
            return Ok(());
        }
        Err(self.parse_error(response).await)
    }

    /// Execute a DELETE request.
    pub(crate) async fn delete(&self, path: &str) -> Result<(), MarketplaceError> {
        let response = self.inner.client.delete(self.url(path)).send().await?;
        let status = response.status();
        if status.is_success() || status == StatusCode::NO_CONTENT {
            return Ok(());
        }
        Err(self.parse_error(response).await)
    }

    /// Handle API response and parse JSON.
    async fn handle_response<T: DeserializeOwned>(
        &self,
        response: reqwest::Response,
    ) -> Result<T, MarketplaceError> {
        let status = response.status();
        if status.is_success() {
            return response
                .json()
                .await
                .map_err(|e| MarketplaceError::Parse(format!("Failed to parse response: {e}")));
        }
        Err(self.parse_error(response).await)
    }

    /// Parse an error response from the marketplace API.
    async fn parse_error(&self, response: reqwest::Response) -> MarketplaceError {
        let status = response.status();

        if status == StatusCode::UNAUTHORIZED || status == StatusCode::FORBIDDEN {
            let body = response.text().await.unwrap_or_default();
            return MarketplaceError::Unauthorized(
                extract_message(&body).unwrap_or_else(|| "Invalid credentials".to_string()),
            );
        }
        if status == StatusCode::NOT_FOUND {
            return MarketplaceError::NotFound("Resource not found".to_string());
        }

        let body = response.text().await.unwrap_or_default();
        MarketplaceError::Api {
            status: status.as_u16(),
            message: extract_message(&body).unwrap_or_else(|| {
                if body.is_empty() {
                    "Unknown error".to_string()
                } else {
                    body
                }
            }),
        }
    }
}

impl std::fmt::Debug for MarketplaceClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MarketplaceClient")
            .field("base_url", &self.inner.base_url.as_str())
            .finish_non_exhaustive()
    }
}

/// Pull a human-readable message out of an error body.
///
/// The backend sometimes wraps it as `{"message": ...}` and sometimes as
/// `{"error": ...}`; plain-text bodies pass through unchanged.
fn extract_message(body: &str) -> Option<String> {
    let value: Value = serde_json::from_str(body).ok()?;
    value
        .get("message")
        .or_else(|| value.get("error"))
        .and_then(Value::as_str)
        .map(ToString::to_string)
}

/// Unwrap the backend's inconsistent list envelopes.
///
/// Accepts a bare JSON array, `{"data": [...]}`, or any of the
/// resource-named keys in `alt_keys`. Anything else is an empty list: the
/// panel treats a surprising envelope as "nothing to show", never an error.
pub(crate) fn unwrap_list<T: DeserializeOwned>(value: Value, alt_keys: &[&str]) -> Vec<T> {
    let rows = match value {
        Value::Array(rows) => rows,
        Value::Object(mut map) => {
            let mut found = None;
            for key in std::iter::once(&"data").chain(alt_keys) {
                if let Some(Value::Array(rows)) = map.remove(*key) {
                    found = Some(rows);
                    break;
                }
            }
            found.unwrap_or_default()
        }
        _ => Vec::new(),
    };

    // Rows that fail to deserialize are dropped individually rather than
    // poisoning the whole list.
    rows.into_iter()
        .filter_map(|row| serde_json::from_value(row).ok())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_unwrap_list_bare_array() {
        let rows: Vec<i64> = unwrap_list(json!([1, 2, 3]), &[]);
        assert_eq!(rows, vec![1, 2, 3]);
    }

    #[test]
    fn test_unwrap_list_data_envelope() {
        let rows: Vec<i64> = unwrap_list(json!({"data": [4, 5]}), &[]);
        assert_eq!(rows, vec![4, 5]);
    }

    #[test]
    fn test_unwrap_list_resource_key() {
        let rows: Vec<i64> = unwrap_list(json!({"sellers": [6]}), &["sellers"]);
        assert_eq!(rows, vec![6]);
    }

    #[test]
    fn test_unwrap_list_unexpected_shape_is_empty() {
        let rows: Vec<i64> = unwrap_list(json!({"count": 3}), &["sellers"]);
        assert!(rows.is_empty());
        let rows: Vec<i64> = unwrap_list(json!("nope"), &[]);
        assert!(rows.is_empty());
    }

    #[test]
    fn test_unwrap_list_drops_bad_rows() {
        let rows: Vec<i64> = unwrap_list(json!([1, "two", 3]), &[]);
        assert_eq!(rows, vec![1, 3]);
    }

    #[test]
    fn test_extract_message() {
        assert_eq!(
            extract_message(r#"{"message":"Invalid email or password"}"#),
            Some("Invalid email or password".to_string())
        );
        assert_eq!(
            extract_message(r#"{"error":"boom"}"#),
            Some("boom".to_string())
        );
        assert_eq!(extract_message("plain text"), None);
    }
}
