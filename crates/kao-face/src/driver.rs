//! Periodic tick driver
//!
//! A thin tokio task that calls [`Face::update`] at the configured
//! interval. The engine itself is synchronous; this is the only async
//! surface. Dropping the driver aborts the task, which is the "stop the
//! timer first" half of teardown - canvases go when the last face
//! handle drops.

use std::time::Duration;

use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;
use tracing::debug;

use kao_canvas::Canvas;

use crate::Face;

/// Handle to a running animation heartbeat
pub struct TickDriver {
    task: JoinHandle<()>,
}

impl TickDriver {
    /// Start ticking `face` every `interval` on the current runtime.
    ///
    /// A tick that overruns the interval is a latent bug in the host's
    /// canvas implementation, not a normal case; missed ticks are
    /// skipped rather than bursted.
    pub fn spawn<C>(face: Face<C>, interval: Duration) -> Self
    where
        C: Canvas + Send + 'static,
    {
        let task = tokio::spawn(async move {
            let mut ticker = tokio::time::interval(interval);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);
            loop {
                ticker.tick().await;
                face.update();
            }
        });
        debug!(interval_ms = interval.as_millis() as u64, "tick driver started");
        TickDriver { task }
    }

    /// Stop the heartbeat explicitly (dropping does the same)
    pub fn stop(self) {
        self.task.abort();
    }
}

impl Drop for TickDriver {
    fn drop(&mut self) {
        self.task.abort();
    }
}
