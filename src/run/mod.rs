//! Provisioning orchestrator
//!
//! The main loop: map each ordinal to a (proxy, cookie, title) triple,
//! submit it exactly once, count the outcome, pace, continue. A failed
//! ordinal never halts the run.

mod observer;

pub use observer::{NullObserver, RunObserver};

use std::future::Future;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use tracing::debug;

use crate::api::{ProfileApiClient, ProfileCreationRequest, ProfileHandle, RemoteError};
use crate::cookies::CookieStore;
use crate::proxy::ProxyPool;
use crate::rate::Pacer;

/// Anything that can create one profile per call.
///
/// One attempt per call; the orchestrator never retries an ordinal.
pub trait ProfileCreator {
    fn create_profile(
        &self,
        request: &ProfileCreationRequest,
    ) -> impl Future<Output = Result<ProfileHandle, RemoteError>> + Send;
}

impl ProfileCreator for ProfileApiClient {
    fn create_profile(
        &self,
        request: &ProfileCreationRequest,
    ) -> impl Future<Output = Result<ProfileHandle, RemoteError>> + Send {
        ProfileApiClient::create_profile(self, request)
    }
}

/// Cooperative stop signal, honored before each remote call.
#[derive(Debug, Clone, Default)]
pub struct CancelFlag(Arc<AtomicBool>);

impl CancelFlag {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.0.store(true, Ordering::Relaxed);
    }

    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::Relaxed)
    }
}

/// Operator-chosen shape of one provisioning run.
#[derive(Debug, Clone)]
pub struct RunPlan {
    /// Number of profiles to create. Zero is a valid plan that does no work.
    pub total: u32,
    /// Profile N is titled `{prefix}_{N}`.
    pub title_prefix: String,
    /// Delay applied after every attempt, including the last.
    pub pacer: Pacer,
}

/// Aggregate progress after a processed ordinal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RunProgress {
    pub total: u32,
    pub completed: u32,
    pub succeeded: u32,
    pub failed: u32,
}

/// Final accounting for a run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RunSummary {
    pub total: u32,
    pub succeeded: u32,
    pub failed: u32,
    pub cancelled: bool,
}

/// Counters owned exclusively by the run loop.
///
/// `succeeded + failed == completed` after every recorded outcome, and
/// `completed == total` once a run terminates cleanly.
#[derive(Debug, Clone, Copy)]
struct RunCounters {
    total: u32,
    completed: u32,
    succeeded: u32,
    failed: u32,
}

impl RunCounters {
    fn new(total: u32) -> Self {
        Self {
            total,
            completed: 0,
            succeeded: 0,
            failed: 0,
        }
    }

    fn record_success(&mut self) {
        self.succeeded += 1;
        self.completed += 1;
    }

    fn record_failure(&mut self) {
        self.failed += 1;
        self.completed += 1;
    }

    fn progress(&self) -> RunProgress {
        RunProgress {
            total: self.total,
            completed: self.completed,
            succeeded: self.succeeded,
            failed: self.failed,
        }
    }

    fn summary(&self, cancelled: bool) -> RunSummary {
        RunSummary {
            total: self.total,
            succeeded: self.succeeded,
            failed: self.failed,
            cancelled,
        }
    }
}

/// Drives a provisioning run from start to finish.
pub struct Orchestrator<C> {
    creator: C,
    pool: ProxyPool,
    cookies: CookieStore,
    plan: RunPlan,
}

impl<C: ProfileCreator> Orchestrator<C> {
    pub fn new(creator: C, pool: ProxyPool, cookies: CookieStore, plan: RunPlan) -> Self {
        Self {
            creator,
            pool,
            cookies,
            plan,
        }
    }

    /// Run the loop to completion, or until the flag is raised.
    ///
    /// Ordinal N is attempted strictly after N-1 has fully resolved and the
    /// pacing delay has elapsed. Failures are counted and reported through
    /// the observer; they never stop the loop.
    pub async fn run(&self, observer: &impl RunObserver, cancel: &CancelFlag) -> RunSummary {
        observer.started(self.plan.total);

        let mut counters = RunCounters::new(self.plan.total);
        let mut cancelled = false;

        for ordinal in 1..=self.plan.total {
            if cancel.is_cancelled() {
                cancelled = true;
                break;
            }

            let request = self.request_for(ordinal);
            debug!(
                "creating profile {} via {}",
                request.title,
                request.proxy.endpoint()
            );

            match self.creator.create_profile(&request).await {
                Ok(handle) => {
                    counters.record_success();
                    debug!("profile {} created (id: {:?})", request.title, handle.id);
                }
                Err(error) => {
                    counters.record_failure();
                    observer.item_failed(ordinal, &request.title, &error);
                }
            }
            observer.updated(&counters.progress());

            self.plan.pacer.wait().await;
        }

        let summary = counters.summary(cancelled);
        observer.finished(&summary);
        summary
    }

    /// Creation request for one ordinal: round-robin proxy, derived title,
    /// cookies attached only when the store has an entry.
    fn request_for(&self, ordinal: u32) -> ProfileCreationRequest {
        let proxy = self.pool.proxy_at(ordinal).clone();
        let title = format!("{}_{}", self.plan.title_prefix, ordinal);

        let mut request = ProfileCreationRequest::new(title, proxy);
        if let Some(payload) = self.cookies.cookies_for(ordinal) {
            request = request.with_cookies(payload.clone());
        }
        request
    }
}
