//! Profile Forge
//!
//! Bulk provisioning of browser profiles against a remote anti-detect
//! browser API. Each profile is assigned a proxy round-robin from a finite
//! pool and, optionally, a pre-recorded cookie payload. Individual creation
//! failures are counted and reported; they never stop the run.

pub mod api;
pub mod cookies;
pub mod proxy;
pub mod rate;
pub mod report;
pub mod run;

use std::path::PathBuf;

/// Get log directory path
pub fn log_dir() -> Option<PathBuf> {
    dirs::config_dir().map(|p| p.join("profile-forge").join("logs"))
}

/// Initialize logging: console output plus a daily-rolling log file.
pub fn init_logging() -> Option<tracing_appender::non_blocking::WorkerGuard> {
    use tracing_subscriber::layer::SubscriberExt;
    use tracing_subscriber::util::SubscriberInitExt;

    let env_filter = tracing_subscriber::EnvFilter::from_default_env()
        .add_directive(tracing::Level::INFO.into());

    let console_layer = tracing_subscriber::fmt::layer()
        .with_target(true)
        .with_thread_ids(false);

    if let Some(log_dir) = log_dir() {
        let _ = std::fs::create_dir_all(&log_dir);
        let file_appender = tracing_appender::rolling::daily(&log_dir, "profile-forge.log");
        let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);

        let file_layer = tracing_subscriber::fmt::layer()
            .with_ansi(false)
            .with_target(true)
            .with_writer(non_blocking);

        tracing_subscriber::registry()
            .with(env_filter)
            .with(console_layer)
            .with(file_layer)
            .init();

        Some(guard)
    } else {
        tracing_subscriber::registry()
            .with(env_filter)
            .with(console_layer)
            .init();

        None
    }
}
