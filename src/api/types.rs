//! Wire types for the profile provisioning API

use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;

use crate::cookies::CookiePayload;
use crate::proxy::ProxyDescriptor;

use super::REQUEST_TIMEOUT;

/// Fixed browser fingerprint applied identically to every created profile.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Fingerprint {
    pub os: String,
    pub screen: String,
}

impl Default for Fingerprint {
    fn default() -> Self {
        Self {
            os: "windows".to_string(),
            screen: "1920x1080".to_string(),
        }
    }
}

/// Creation request for one profile. Built fresh per ordinal, never reused.
#[derive(Debug, Clone, Serialize)]
pub struct ProfileCreationRequest {
    pub title: String,
    pub proxy: ProxyDescriptor,
    pub fingerprint: Fingerprint,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cookies: Option<CookiePayload>,
}

impl ProfileCreationRequest {
    pub fn new(title: String, proxy: ProxyDescriptor) -> Self {
        Self {
            title,
            proxy,
            fingerprint: Fingerprint::default(),
            cookies: None,
        }
    }

    /// Attach a pre-recorded cookie payload, forwarded verbatim.
    pub fn with_cookies(mut self, cookies: CookiePayload) -> Self {
        self.cookies = Some(cookies);
        self
    }
}

/// Success payload for a created profile: the service's `data` object (or
/// raw body when `data` is absent) plus the numeric id when one is present.
#[derive(Debug, Clone)]
pub struct ProfileHandle {
    pub id: Option<i64>,
    pub payload: Value,
}

impl ProfileHandle {
    pub fn from_payload(payload: Value) -> Self {
        let id = payload.get("id").and_then(Value::as_i64);
        Self { id, payload }
    }
}

/// Non-success outcome of a single creation attempt.
///
/// Per-item and non-fatal: the orchestrator records it and moves on.
#[derive(Debug, Error)]
pub enum RemoteError {
    #[error("service rejected profile ({status}): {message}")]
    Rejected { status: u16, message: String },

    #[error("request timed out after {}s", REQUEST_TIMEOUT.as_secs())]
    Timeout,

    #[error("transport error: {0}")]
    Transport(String),
}

impl RemoteError {
    /// HTTP status for rejections; timeouts and transport failures have none.
    pub fn status_code(&self) -> Option<u16> {
        match self {
            Self::Rejected { status, .. } => Some(*status),
            _ => None,
        }
    }
}
