//! Operator-facing progress reporting
//!
//! Renders orchestrator events through tracing. Holds no state that feeds
//! back into the run; swapping in `NullObserver` changes nothing but output.

use tracing::{info, warn};

use crate::api::RemoteError;
use crate::run::{RunObserver, RunProgress, RunSummary};

/// Logs run progress for a human operator.
#[derive(Debug, Clone, Copy, Default)]
pub struct ConsoleReporter;

impl RunObserver for ConsoleReporter {
    fn started(&self, total: u32) {
        info!("Provisioning {} profiles", total);
    }

    fn updated(&self, progress: &RunProgress) {
        info!(
            "[{}/{}] {} created, {} failed",
            progress.completed, progress.total, progress.succeeded, progress.failed
        );
    }

    fn item_failed(&self, ordinal: u32, title: &str, error: &RemoteError) {
        warn!("Profile {} ({}) failed: {}", ordinal, title, error);
    }

    fn finished(&self, summary: &RunSummary) {
        if summary.cancelled {
            warn!(
                "Run cancelled: {} of {} attempted, {} created, {} failed",
                summary.succeeded + summary.failed,
                summary.total,
                summary.succeeded,
                summary.failed
            );
        } else {
            info!(
                "Run complete: {} created, {} failed",
                summary.succeeded, summary.failed
            );
        }
    }
}
