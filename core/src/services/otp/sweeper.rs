//! Periodic removal of idle code entries

use std::sync::Arc;
use std::time::Duration;
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

use super::service::OtpService;

/// Result of one sweep cycle
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct SweepResult {
    /// Entries removed this cycle
    pub removed: usize,
    /// Entries still tracked afterwards
    pub remaining: usize,
}

/// Runs `OtpService::sweep_expired` on a fixed interval
pub struct OtpSweeper {
    service: Arc<OtpService>,
    interval: Duration,
}

impl OtpSweeper {
    /// A zero interval disables the background task
    pub fn new(service: Arc<OtpService>, interval: Duration) -> Self {
        Self { service, interval }
    }

    /// Run a single sweep cycle
    pub fn run_once(&self) -> SweepResult {
        let removed = self.service.sweep_expired();
        let remaining = self.service.len();

        if removed > 0 {
            info!(
                removed = removed,
                remaining = remaining,
                event = "otp_sweep",
                "Removed idle one-time code entries"
            );
        } else {
            debug!(remaining = remaining, event = "otp_sweep", "Nothing to sweep");
        }

        SweepResult { removed, remaining }
    }

    /// Start the sweeper as a background task
    ///
    /// Returns `None` when the sweeper is disabled.
    pub fn start_background_task(self: Arc<Self>) -> Option<JoinHandle<()>> {
        if self.interval.is_zero() {
            warn!("OTP sweeper is disabled");
            return None;
        }

        let handle = tokio::spawn(async move {
            info!(
                "OTP sweeper started - will run every {} seconds",
                self.interval.as_secs()
            );

            let mut interval_timer = tokio::time::interval(self.interval);

            loop {
                interval_timer.tick().await;
                self.run_once();
            }
        });

        Some(handle)
    }
}
