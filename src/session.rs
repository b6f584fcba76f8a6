//! Session store: the client-held bearer token and its lifecycle.
//!
//! The store is an explicit object shared by the dispatcher and the hosting
//! application rather than process-global state. It keeps the token in memory,
//! persists it to a single file so a restarted process stays logged in, and
//! broadcasts a [`SessionExpired`] signal when the server rejects the token.
//! The client holds no expiry knowledge; token validity is decided entirely by
//! the server.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use parking_lot::RwLock;
use tokio::sync::broadcast;

use crate::error::ClientResult;

/// Signal emitted when the server answered 401 on an authenticated call.
///
/// The hosting application subscribes via [`SessionStore::subscribe`] and
/// reacts (typically by returning to its login screen). The access layer
/// itself performs no navigation.
#[derive(Debug, Clone)]
pub struct SessionExpired;

#[derive(Debug)]
enum TokenSlot {
    /// Durable storage not consulted yet
    Unloaded,
    Empty,
    Present(String),
}

/// Holds the current authentication token.
///
/// At most one token is current at a time; `None` means unauthenticated.
/// All mutation is idempotent-safe: concurrent failing calls may each ask for
/// session teardown and only the first has any effect.
pub struct SessionStore {
    slot: RwLock<TokenSlot>,
    token_path: PathBuf,
    expired_tx: broadcast::Sender<SessionExpired>,
}

impl SessionStore {
    /// Create a store persisting its token at `token_path`.
    pub fn new(token_path: impl Into<PathBuf>) -> Self {
        let (expired_tx, _) = broadcast::channel(16);
        Self {
            slot: RwLock::new(TokenSlot::Unloaded),
            token_path: token_path.into(),
            expired_tx,
        }
    }

    /// Current token, if any.
    ///
    /// On first call the durable file is consulted once and the result cached;
    /// afterwards only the in-memory value is read.
    pub fn token(&self) -> Option<String> {
        {
            let slot = self.slot.read();
            match &*slot {
                TokenSlot::Present(token) => return Some(token.clone()),
                TokenSlot::Empty => return None,
                TokenSlot::Unloaded => {}
            }
        }

        let mut slot = self.slot.write();
        // Another caller may have hydrated while we waited for the lock
        if let TokenSlot::Unloaded = &*slot {
            *slot = load_token(&self.token_path);
        }
        match &*slot {
            TokenSlot::Present(token) => Some(token.clone()),
            _ => None,
        }
    }

    /// Store a new token, replacing any previous one, and persist it.
    pub fn set_token(&self, token: &str) -> ClientResult<()> {
        if let Some(parent) = self.token_path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&self.token_path, token)?;
        *self.slot.write() = TokenSlot::Present(token.to_string());
        Ok(())
    }

    /// Remove the token from memory and durable storage.
    ///
    /// Clearing an already-empty session is a no-op.
    pub fn clear_token(&self) -> ClientResult<()> {
        *self.slot.write() = TokenSlot::Empty;
        match fs::remove_file(&self.token_path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }

    /// Tear down the session after a server-signaled authentication failure.
    ///
    /// Clears the token and notifies subscribers. Safe to call redundantly
    /// from multiple concurrent failing requests.
    pub fn expire(&self) {
        if let Err(e) = self.clear_token() {
            tracing::warn!("failed to remove persisted token: {}", e);
        }
        // No receivers is fine; the signal is advisory
        let _ = self.expired_tx.send(SessionExpired);
    }

    /// Subscribe to session-expiry signals.
    pub fn subscribe(&self) -> broadcast::Receiver<SessionExpired> {
        self.expired_tx.subscribe()
    }

    /// True if a token is currently held (hydrating from disk if needed).
    pub fn is_authenticated(&self) -> bool {
        self.token().is_some()
    }
}

fn load_token(path: &Path) -> TokenSlot {
    match fs::read_to_string(path) {
        Ok(contents) => {
            let token = contents.trim();
            if token.is_empty() {
                TokenSlot::Empty
            } else {
                TokenSlot::Present(token.to_string())
            }
        }
        Err(e) if e.kind() == io::ErrorKind::NotFound => TokenSlot::Empty,
        Err(e) => {
            tracing::warn!("failed to read persisted token: {}", e);
            TokenSlot::Empty
        }
    }
}
