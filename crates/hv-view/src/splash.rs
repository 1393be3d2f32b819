use std::time::Duration;

use tokio_util::sync::CancellationToken;
use tracing::debug;

pub const DEFAULT_SPLASH_DELAY: Duration = Duration::from_secs(2);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SplashOutcome {
    /// The delay elapsed; move on to the holdings screen.
    Navigate,
    /// The hosting view went away first; do not navigate.
    Cancelled,
}

/// Fixed-delay splash → main transition.
#[derive(Debug, Clone, Copy)]
pub struct SplashTimer {
    delay: Duration,
}

impl SplashTimer {
    pub fn new(delay: Duration) -> Self {
        Self { delay }
    }

    pub fn delay(&self) -> Duration {
        self.delay
    }

    pub async fn wait(&self, cancel: &CancellationToken) -> SplashOutcome {
        tokio::select! {
            biased;
            _ = cancel.cancelled() => {
                debug!("splash cancelled before navigation");
                SplashOutcome::Cancelled
            }
            _ = tokio::time::sleep(self.delay) => SplashOutcome::Navigate,
        }
    }
}

impl Default for SplashTimer {
    fn default() -> Self {
        Self::new(DEFAULT_SPLASH_DELAY)
    }
}
