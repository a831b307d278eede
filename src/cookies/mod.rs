//! Cookie store
//!
//! Pre-recorded cookie payloads keyed by zero-based profile ordinal.
//! Payloads are opaque and forwarded to the remote service verbatim.

use std::collections::HashMap;
use std::path::Path;

use serde_json::Value;
use thiserror::Error;
use tracing::debug;

/// Opaque cookie payload. Never inspected or transformed.
pub type CookiePayload = Value;

/// Errors raised while loading the cookie source.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("failed to read cookie source {path}: {reason}")]
    Unreadable { path: String, reason: String },

    #[error("malformed cookie source {path}: {reason}")]
    Malformed { path: String, reason: String },
}

/// Cookie payloads for one provisioning run. Loaded once, never mutated.
#[derive(Debug, Clone, Default)]
pub struct CookieStore {
    entries: HashMap<String, CookiePayload>,
}

impl CookieStore {
    /// Store with no cookies for anyone.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Load a JSON document whose top level is an object keyed by
    /// zero-based ordinal strings (`"0"`, `"1"`, ...).
    pub fn load(path: &Path) -> Result<Self, StoreError> {
        let raw = std::fs::read_to_string(path).map_err(|e| StoreError::Unreadable {
            path: path.display().to_string(),
            reason: e.to_string(),
        })?;

        let document: Value =
            serde_json::from_str(&raw).map_err(|e| StoreError::Malformed {
                path: path.display().to_string(),
                reason: e.to_string(),
            })?;

        let entries = match document {
            Value::Object(map) => map.into_iter().collect::<HashMap<_, _>>(),
            _ => {
                return Err(StoreError::Malformed {
                    path: path.display().to_string(),
                    reason: "expected an object at the top level".to_string(),
                })
            }
        };

        debug!("loaded cookie payloads for {} profiles from {}", entries.len(), path.display());
        Ok(Self { entries })
    }

    /// Cookies recorded for a 1-based profile ordinal, if any.
    ///
    /// The store is keyed zero-based, so ordinal N reads key `N - 1`.
    /// Absence means "create this profile without seeding cookies".
    pub fn cookies_for(&self, ordinal: u32) -> Option<&CookiePayload> {
        self.entries.get(&ordinal.saturating_sub(1).to_string())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
