//! Authentication operations

use reqwest::Method;

use super::PerpusClient;
use crate::error::{ClientError, ClientResult};
use crate::models::{AuthUser, HealthStatus, Token};

impl PerpusClient {
    /// Authenticate and store the returned token as the current session.
    ///
    /// The login endpoint takes form-encoded credentials, unlike every other
    /// call. A 4xx answer means the server rejected the credentials and maps
    /// to [`ClientError::InvalidCredentials`]; transport failures stay
    /// [`ClientError::Transport`] so callers can tell "bad password" from
    /// "service unreachable". On failure any prior session is left untouched.
    pub async fn login(&self, username: &str, password: &str) -> ClientResult<Token> {
        let response = self
            .http
            .post(self.url("/api/auth/login"))
            .form(&[("username", username), ("password", password)])
            .send()
            .await
            .map_err(ClientError::Transport)?;

        let status = response.status();
        if status.is_client_error() {
            return Err(ClientError::InvalidCredentials);
        }
        if !status.is_success() {
            return Err(ClientError::Api {
                detail: super::status_line(status),
            });
        }

        let token: Token = response.json().await.map_err(ClientError::Transport)?;
        self.session.set_token(&token.access_token)?;
        tracing::info!("login succeeded; session token stored");
        Ok(token)
    }

    /// Drop the current session. Idempotent.
    pub fn logout(&self) -> ClientResult<()> {
        self.session.clear_token()
    }

    /// Fetch the authenticated user behind the current token.
    pub async fn me(&self) -> ClientResult<AuthUser> {
        let response = self.dispatch(self.request(Method::GET, "/api/auth/me")).await?;
        self.normalize(response).await
    }

    /// Authenticated probe. Never fails outward: any non-success answer,
    /// including a network failure, degrades to `false`.
    pub async fn check_auth_status(&self) -> bool {
        match self.dispatch(self.request(Method::GET, "/api/auth/me")).await {
            Ok(response) => response.status().is_success(),
            Err(_) => false,
        }
    }

    /// Unauthenticated liveness probe, used to gate login/write attempts.
    /// No bearer header is sent even when a session exists.
    pub async fn check_api_health(&self) -> ClientResult<HealthStatus> {
        let response = self
            .http
            .get(self.url("/api/health"))
            .send()
            .await
            .map_err(ClientError::Transport)?;

        let status = response.status();
        if !status.is_success() {
            return Err(ClientError::Api {
                detail: format!("API health check failed ({})", super::status_line(status)),
            });
        }
        response.json().await.map_err(ClientError::Transport)
    }
}
