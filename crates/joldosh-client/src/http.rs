//! HTTP client adapter.
//!
//! Wraps `reqwest` so that every outbound request carries the bearer token
//! (when the session has one) and the `Accept-Language` header, and every
//! inbound response goes through one cross-cutting check: a 401 tears the
//! session down before the error reaches the caller.  All other error
//! statuses are returned as typed values for local handling.

use std::sync::Arc;

use reqwest::{header, Method, StatusCode};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use crate::config::ClientConfig;
use crate::error::ApiError;
use crate::session::Session;

/// DRF-style pagination envelope.
#[derive(Debug, Deserialize)]
pub struct Page<T> {
    pub count: u64,
    pub next: Option<String>,
    pub previous: Option<String>,
    pub results: Vec<T>,
}

/// List endpoints answer either a bare array or a pagination envelope
/// depending on backend configuration; normalize both shapes here so the
/// rest of the SDK only ever sees a plain `Vec`.
#[derive(Deserialize)]
#[serde(untagged)]
enum ListPayload<T> {
    Plain(Vec<T>),
    Paginated(Page<T>),
}

impl<T> ListPayload<T> {
    fn into_vec(self) -> Vec<T> {
        match self {
            Self::Plain(items) => items,
            Self::Paginated(page) => page.results,
        }
    }
}

/// Error body shape used by the backend for business rejections.
#[derive(Deserialize)]
struct ErrorBody {
    detail: Option<String>,
}

/// HTTP client bound to one base URL and one session.
pub struct ApiClient {
    http: reqwest::Client,
    base_url: String,
    session: Arc<Session>,
}

impl ApiClient {
    pub fn new(config: &ClientConfig, session: Arc<Session>) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url: config.base_url.trim_end_matches('/').to_string(),
            session,
        }
    }

    /// The session this client decorates requests with.
    pub fn session(&self) -> &Arc<Session> {
        &self.session
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }

    /// Send one request with the standard decorations and run the global
    /// response checks.  Returns the response only for 2xx statuses.
    async fn execute(
        &self,
        method: Method,
        path: &str,
        query: &[(&str, &str)],
        body: Option<&serde_json::Value>,
    ) -> Result<reqwest::Response, ApiError> {
        let url = self.url(path);

        let mut request = self
            .http
            .request(method.clone(), &url)
            .header(header::ACCEPT_LANGUAGE, self.session.language());

        if let Some(token) = self.session.access_token() {
            request = request.bearer_auth(token);
        }
        if !query.is_empty() {
            request = request.query(query);
        }
        if let Some(json) = body {
            request = request.json(json);
        }

        tracing::debug!(%method, %url, "request");
        let response = request.send().await?;
        let status = response.status();

        if status == StatusCode::UNAUTHORIZED {
            // Token expired or revoked: the only global automatic reaction.
            tracing::warn!(%url, "401 received, tearing down session");
            self.session.force_logout();
            return Err(ApiError::Unauthorized);
        }

        if status.is_client_error() {
            let detail = response
                .json::<ErrorBody>()
                .await
                .ok()
                .and_then(|b| b.detail)
                .unwrap_or_else(|| status.to_string());
            return Err(ApiError::Rejected {
                status: status.as_u16(),
                detail,
            });
        }

        if status.is_server_error() {
            return Err(ApiError::Server(status.as_u16()));
        }

        Ok(response)
    }

    pub(crate) async fn get_json<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, &str)],
    ) -> Result<T, ApiError> {
        let response = self.execute(Method::GET, path, query, None).await?;
        Ok(response.json().await?)
    }

    /// GET a list endpoint through the normalization boundary.
    pub(crate) async fn get_list<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, &str)],
    ) -> Result<Vec<T>, ApiError> {
        let response = self.execute(Method::GET, path, query, None).await?;
        let payload: ListPayload<T> = response.json().await?;
        Ok(payload.into_vec())
    }

    pub(crate) async fn post_json<T: DeserializeOwned, B: Serialize>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T, ApiError> {
        let json = serde_json::to_value(body)
            .map_err(|e| ApiError::Malformed(format!("request body: {e}")))?;
        let response = self.execute(Method::POST, path, &[], Some(&json)).await?;
        Ok(response.json().await?)
    }

    /// POST that ignores whatever the backend returns (action endpoints with
    /// no response body the client consumes).
    pub(crate) async fn post_unit<B: Serialize>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<(), ApiError> {
        let json = serde_json::to_value(body)
            .map_err(|e| ApiError::Malformed(format!("request body: {e}")))?;
        self.execute(Method::POST, path, &[], Some(&json)).await?;
        Ok(())
    }

    pub(crate) async fn patch_json<T: DeserializeOwned, B: Serialize>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T, ApiError> {
        let json = serde_json::to_value(body)
            .map_err(|e| ApiError::Malformed(format!("request body: {e}")))?;
        let response = self.execute(Method::PATCH, path, &[], Some(&json)).await?;
        Ok(response.json().await?)
    }

    pub(crate) async fn delete(&self, path: &str) -> Result<(), ApiError> {
        self.execute(Method::DELETE, path, &[], None).await?;
        Ok(())
    }
}
