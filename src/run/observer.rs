//! Run observation
//!
//! Observers are a pure side channel: removing one must not change
//! provisioning outcomes, and no observer state feeds back into the loop.

use crate::api::RemoteError;

use super::{RunProgress, RunSummary};

/// Receives orchestrator events. Every method defaults to a no-op.
pub trait RunObserver {
    /// The run entered its loop with this many ordinals planned.
    fn started(&self, _total: u32) {}

    /// An ordinal fully resolved, success or failure.
    fn updated(&self, _progress: &RunProgress) {}

    /// A single creation attempt failed; the run continues.
    fn item_failed(&self, _ordinal: u32, _title: &str, _error: &RemoteError) {}

    /// The run terminated, cleanly or by cancellation.
    fn finished(&self, _summary: &RunSummary) {}
}

/// Observer that ignores every event.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullObserver;

impl RunObserver for NullObserver {}
