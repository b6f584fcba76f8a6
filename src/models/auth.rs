//! Authentication payloads

use serde::Deserialize;

/// Bearer token returned by `/api/auth/login`
#[derive(Debug, Clone, Deserialize)]
pub struct Token {
    pub access_token: String,
    pub token_type: String,
}

/// Current user, from `/api/auth/me`
#[derive(Debug, Clone, Deserialize)]
pub struct AuthUser {
    pub id: i64,
    pub username: String,
    pub email: String,
    pub is_active: bool,
}

/// Liveness payload from `/api/health`
#[derive(Debug, Clone, Deserialize)]
pub struct HealthStatus {
    pub status: String,
}
