//! Remote provisioning API
//!
//! One operation: create a browser profile from a (title, proxy,
//! fingerprint, cookies?) request.

mod client;
mod types;

pub use client::{ClientError, ProfileApiClient, DEFAULT_API_URL};
pub use types::{Fingerprint, ProfileCreationRequest, ProfileHandle, RemoteError};

use std::time::Duration;

/// Per-call deadline. Bounds each attempt; there is no overall run deadline.
pub const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);
