//! HTTP access layer: request dispatch and response normalization.
//!
//! [`PerpusClient`] owns the base URL, the underlying HTTP client and a shared
//! [`SessionStore`]. Every domain operation is a thin composition over the
//! same two steps: `request` builds and dispatches an authenticated request,
//! `normalize` classifies the response into a typed success value or a
//! [`ClientError`]. A 401 from any endpoint tears the session down globally.

pub mod auth;
pub mod books;
pub mod members;
pub mod transactions;

use std::sync::Arc;

use reqwest::{header, Method, RequestBuilder, Response, StatusCode};
use serde::de::DeserializeOwned;
use serde::Deserialize;

use crate::{
    config::ClientConfig,
    error::{ClientError, ClientResult},
    session::SessionStore,
};

/// Client for the Perpus REST API.
///
/// Cheap to clone; clones share the same session.
#[derive(Clone)]
pub struct PerpusClient {
    http: reqwest::Client,
    base_url: String,
    session: Arc<SessionStore>,
}

impl PerpusClient {
    /// Build a client from configuration, creating its own session store.
    pub fn new(config: &ClientConfig) -> ClientResult<Self> {
        let session = Arc::new(SessionStore::new(config.session.token_path.clone()));
        Self::with_session(&config.api.base_url, session)
    }

    /// Build a client around an existing session store.
    pub fn with_session(base_url: &str, session: Arc<SessionStore>) -> ClientResult<Self> {
        let mut headers = header::HeaderMap::new();
        headers.insert(
            header::CONTENT_TYPE,
            header::HeaderValue::from_static("application/json"),
        );
        let http = reqwest::Client::builder()
            .default_headers(headers)
            .build()?;
        Ok(Self {
            http,
            base_url: base_url.trim_end_matches('/').to_string(),
            session,
        })
    }

    /// The session shared by this client and its clones.
    pub fn session(&self) -> &Arc<SessionStore> {
        &self.session
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// Build a request against `path`, attaching `Authorization: Bearer <token>`
    /// when a token is present.
    fn request(&self, method: Method, path: &str) -> RequestBuilder {
        let mut builder = self.http.request(method, self.url(path));
        if let Some(token) = self.session.token() {
            builder = builder.bearer_auth(token);
        }
        builder
    }

    /// Issue the request. Single attempt: no retries, no client-side timeout;
    /// transient network failures surface as [`ClientError::Transport`].
    async fn dispatch(&self, builder: RequestBuilder) -> ClientResult<Response> {
        builder.send().await.map_err(ClientError::Transport)
    }

    /// Classify a response and parse the success body into `T`.
    async fn normalize<T: DeserializeOwned>(&self, response: Response) -> ClientResult<T> {
        let response = self.check_status(response).await?;
        response.json::<T>().await.map_err(ClientError::Transport)
    }

    /// Status classification shared by all authenticated endpoints.
    ///
    /// 401 clears the session and broadcasts `SessionExpired` before failing,
    /// regardless of which operation made the call. Other non-success statuses
    /// become `Api { detail }`, preferring the server's JSON `detail` field
    /// and falling back to a message built from the status line.
    async fn check_status(&self, response: Response) -> ClientResult<Response> {
        let status = response.status();
        if status == StatusCode::UNAUTHORIZED {
            tracing::warn!("server rejected authentication; clearing session");
            self.session.expire();
            return Err(ClientError::AuthExpired);
        }
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            let detail = serde_json::from_str::<ErrorBody>(&body)
                .map(|b| b.detail)
                .unwrap_or_else(|_| status_line(status));
            tracing::debug!(status = status.as_u16(), %detail, "API call failed");
            return Err(ClientError::Api { detail });
        }
        Ok(response)
    }
}

/// Fallback message when the error body carries no `detail`
fn status_line(status: StatusCode) -> String {
    format!(
        "HTTP {}: {}",
        status.as_u16(),
        status.canonical_reason().unwrap_or("Unknown Error")
    )
}

/// FastAPI-style error body
#[derive(Deserialize)]
struct ErrorBody {
    detail: String,
}
