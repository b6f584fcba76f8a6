//! Login page controller

use crate::api::PerpusClient;
use crate::error::{ClientError, ClientResult};
use crate::models::Token;

/// Drives the login flow: an initial health probe gates whether login is
/// attempted at all, and credential rejection is surfaced distinctly from an
/// unreachable service.
pub struct LoginController {
    client: PerpusClient,
    api_healthy: Option<bool>,
}

impl LoginController {
    pub fn new(client: PerpusClient) -> Self {
        Self {
            client,
            api_healthy: None,
        }
    }

    /// Probe the API and record the outcome. Called once when the login view
    /// opens.
    pub async fn verify_connection(&mut self) -> bool {
        let healthy = self.client.check_api_health().await.is_ok();
        self.api_healthy = Some(healthy);
        healthy
    }

    /// Result of the last probe; `None` before the first probe completes.
    pub fn api_healthy(&self) -> Option<bool> {
        self.api_healthy
    }

    /// Attempt to log in with the entered credentials.
    ///
    /// Empty fields fail as `Validation` before any request; a known-down API
    /// is refused without a request; bad credentials surface as
    /// `InvalidCredentials`.
    pub async fn submit(&self, username: &str, password: &str) -> ClientResult<Token> {
        if username.trim().is_empty() || password.is_empty() {
            return Err(ClientError::Validation(
                "Please enter both username and password".into(),
            ));
        }
        if self.api_healthy == Some(false) {
            return Err(ClientError::Api {
                detail: "Cannot reach the API right now. Check your connection or start the backend service.".into(),
            });
        }
        self.client.login(username, password).await
    }
}
