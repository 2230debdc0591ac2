//! Async frame loop for a shared rail
//!
//! The loop ticks at a fixed frame interval until it is told to stop through a
//! `watch` shutdown channel, the handle is dropped, or the rail reports that it
//! has nothing left to drive.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;

use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio::time::{interval, Instant, MissedTickBehavior};
use tracing::{debug, info};

use crate::motion::MotionPreference;

use super::{FrameOutcome, Rail, TickOutcome};

pub type SharedRail<T> = Arc<Mutex<Rail<T>>>;

fn lock<T>(rail: &Mutex<Rail<T>>) -> MutexGuard<'_, Rail<T>> {
    rail.lock().unwrap_or_else(PoisonError::into_inner)
}

/// Handle to a running frame loop
///
/// Dropping the handle stops the loop.
pub struct RailRunner<T> {
    rail: SharedRail<T>,
    shutdown: watch::Sender<bool>,
    task: Option<JoinHandle<u64>>,
}

impl<T> RailRunner<T>
where
    T: Send + Sync + 'static,
{
    /// Start driving `rail` every `frame_interval`
    pub fn spawn<M>(rail: SharedRail<T>, frame_interval: Duration, motion: M) -> Self
    where
        M: MotionPreference + Send + 'static,
    {
        let (shutdown, mut shutdown_rx) = watch::channel(false);
        let loop_rail = Arc::clone(&rail);

        let task = tokio::spawn(async move {
            let mut ticker = interval(frame_interval.max(Duration::from_millis(1)));
            ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);
            let mut frames = 0u64;

            loop {
                tokio::select! {
                    _ = ticker.tick() => {
                        let now = Instant::now().into_std();
                        let outcome = lock(&loop_rail).frame(now, &motion);
                        frames += 1;
                        match outcome {
                            FrameOutcome::Unmounted
                            | FrameOutcome::Scrolled(TickOutcome::Stopped) => {
                                debug!(frames, "rail frame loop has nothing to drive");
                                break;
                            }
                            _ => {}
                        }
                    }
                    changed = shutdown_rx.changed() => {
                        if changed.is_err() || *shutdown_rx.borrow() {
                            break;
                        }
                    }
                }
            }

            frames
        });

        info!(interval_ms = frame_interval.as_millis() as u64, "rail frame loop started");
        Self {
            rail,
            shutdown,
            task: Some(task),
        }
    }

    pub fn rail(&self) -> &SharedRail<T> {
        &self.rail
    }

    /// Stop the loop and wait for it; returns the number of frames driven
    pub async fn stop(mut self) -> u64 {
        self.join().await
    }

    /// Stop the loop, then unmount the rail so no timer can fire afterwards
    pub async fn unmount(mut self) -> u64 {
        let frames = self.join().await;
        lock(&self.rail).unmount();
        frames
    }

    async fn join(&mut self) -> u64 {
        let _ = self.shutdown.send(true);
        match self.task.take() {
            Some(task) => task.await.unwrap_or(0),
            None => 0,
        }
    }
}

impl<T> Drop for RailRunner<T> {
    fn drop(&mut self) {
        if let Some(task) = self.task.take() {
            let _ = self.shutdown.send(true);
            task.abort();
        }
    }
}
