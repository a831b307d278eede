//! Pacing between provisioning attempts
//!
//! Every attempt is followed by a fixed delay, the final one included.
//! The delay is operator-configurable; zero disables pacing entirely.

use std::time::Duration;

use tokio::time::sleep;
use tracing::debug;

/// Default inter-call delay in milliseconds.
pub const DEFAULT_PACE_MS: u64 = 500;

/// Fixed-delay pacer applied after every creation attempt.
#[derive(Debug, Clone)]
pub struct Pacer {
    delay: Duration,
}

impl Default for Pacer {
    fn default() -> Self {
        Self::new(Duration::from_millis(DEFAULT_PACE_MS))
    }
}

impl Pacer {
    pub fn new(delay: Duration) -> Self {
        Self { delay }
    }

    pub fn from_millis(ms: u64) -> Self {
        Self::new(Duration::from_millis(ms))
    }

    pub fn delay(&self) -> Duration {
        self.delay
    }

    /// Sleep out the configured delay. A zero delay returns immediately.
    pub async fn wait(&self) {
        if self.delay.is_zero() {
            return;
        }
        debug!("pacing {}ms before next attempt", self.delay.as_millis());
        sleep(self.delay).await;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_pace_is_500ms() {
        assert_eq!(Pacer::default().delay(), Duration::from_millis(500));
    }

    #[test]
    fn test_from_millis_round_trips() {
        assert_eq!(Pacer::from_millis(125).delay(), Duration::from_millis(125));
        assert_eq!(Pacer::from_millis(0).delay(), Duration::ZERO);
    }

    #[tokio::test(start_paused = true)]
    async fn test_wait_sleeps_for_the_configured_delay() {
        let pacer = Pacer::from_millis(500);
        let before = tokio::time::Instant::now();
        pacer.wait().await;
        assert_eq!(before.elapsed(), Duration::from_millis(500));
    }

    #[tokio::test(start_paused = true)]
    async fn test_zero_delay_does_not_sleep() {
        let pacer = Pacer::from_millis(0);
        let before = tokio::time::Instant::now();
        pacer.wait().await;
        assert_eq!(before.elapsed(), Duration::ZERO);
    }
}
