//! Session gate in front of the data layer.
//!
//! A single set of credentials comes from configuration. Logging in stores a
//! [`Session`] through the storage backend, so the session survives between
//! invocations the same way the collections do.

use crate::error::{Result, SalesdeskError};
use crate::store::backend::StorageBackend;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    pub username: String,
    pub started_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Credentials {
    pub username: String,
    pub password: String,
}

impl Credentials {
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password: password.into(),
        }
    }

    fn matches(&self, username: &str, password: &str) -> bool {
        self.username == username && self.password == password
    }
}

pub fn is_authenticated<B: StorageBackend>(backend: &B) -> Result<bool> {
    Ok(backend.load_session()?.is_some())
}

pub fn current_session<B: StorageBackend>(backend: &B) -> Result<Option<Session>> {
    backend.load_session()
}

/// Starts a session if the credentials match. Returns whether login succeeded.
pub fn login<B: StorageBackend>(
    backend: &B,
    credentials: &Credentials,
    username: &str,
    password: &str,
) -> Result<bool> {
    if !credentials.matches(username, password) {
        tracing::warn!(username, "rejected login");
        return Ok(false);
    }

    backend.save_session(&Session {
        username: username.to_string(),
        started_at: Utc::now(),
    })?;
    tracing::info!(username, "logged in");
    Ok(true)
}

pub fn logout<B: StorageBackend>(backend: &B) -> Result<()> {
    backend.clear_session()?;
    tracing::info!("logged out");
    Ok(())
}

/// Fails with `NotAuthenticated` unless a session exists.
pub fn require_session<B: StorageBackend>(backend: &B) -> Result<Session> {
    backend
        .load_session()?
        .ok_or(SalesdeskError::NotAuthenticated)
}
