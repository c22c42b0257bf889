use std::time::Duration;

use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;
use tokio_util::sync::CancellationToken;

use crate::cache::Cache;

/// Shortest cadence the background refresher accepts.
pub const MIN_REFRESH_INTERVAL: Duration = Duration::from_secs(1);

/// Handle to the background refresh task.
///
/// Dropping the handle cancels the task; [`shutdown`](Self::shutdown) also
/// waits for it to finish. A round already in flight always completes.
#[derive(Debug)]
pub struct Refresher {
    token: CancellationToken,
    handle: Option<JoinHandle<()>>,
}

impl Refresher {
    /// Cancels the task and waits until it has stopped.
    pub async fn shutdown(mut self) {
        self.token.cancel();
        if let Some(handle) = self.handle.take()
            && let Err(err) = handle.await
        {
            tracing::warn!(error = %err, "Background refresher did not stop cleanly");
        }
    }

    pub fn is_running(&self) -> bool {
        self.handle.as_ref().is_some_and(|handle| !handle.is_finished())
    }
}

impl Drop for Refresher {
    fn drop(&mut self) {
        self.token.cancel();
    }
}

impl Cache {
    /// Spawns a task that runs a refresh round right away, then every
    /// `interval`, regardless of the expiry window.
    ///
    /// Failures only ever reach the log. Intervals shorter than
    /// [`MIN_REFRESH_INTERVAL`] are raised to it.
    pub fn spawn_refresher(&self, interval: Duration) -> Refresher {
        if interval < MIN_REFRESH_INTERVAL {
            tracing::warn!(requested_ms = interval.as_millis(), "Refresh interval too short, using minimum");
        }
        let interval = interval.max(MIN_REFRESH_INTERVAL);
        let token = CancellationToken::new();
        let cancelled = token.clone();
        let cache = self.clone();
        let handle = tokio::spawn(async move {
            let mut ticker = tokio::time::interval(interval);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
            loop {
                tokio::select! {
                    biased;
                    () = cancelled.cancelled() => break,
                    _ = ticker.tick() => {
                        let report = cache.refresh().await;
                        if !report.any_succeeded() {
                            tracing::warn!(failed = report.failed(), "Background refresh reached no source");
                        }
                    },
                }
            }
            tracing::debug!("Background refresher stopped");
        });
        tracing::info!(interval_secs = interval.as_secs(), "Background refresher started");
        Refresher {
            token,
            handle: Some(handle),
        }
    }
}
