//! Perpus Library Management System API client.
//!
//! Async client for the Perpus REST API: session/token lifecycle,
//! authenticated request dispatch, response normalization, typed domain
//! operations (books, members, transactions, auth), and the page-controller
//! layer that drives optimistic updates reconciled by server reloads.

pub mod api;
pub mod config;
pub mod controllers;
pub mod error;
pub mod models;
pub mod session;

pub use api::PerpusClient;
pub use config::ClientConfig;
pub use error::{ClientError, ClientResult};
pub use session::{SessionExpired, SessionStore};

/// Initialize tracing for a hosting application.
///
/// `RUST_LOG` takes precedence; otherwise `default_level` applies to this
/// crate's spans.
pub fn init_tracing(default_level: &str) {
    use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| format!("perpus_client={}", default_level).into());

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer())
        .init();
}
