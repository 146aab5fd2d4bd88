//! Periodic background save for long-running sessions
//!
//! The timer shares the store with the session through a tokio mutex and
//! writes the same key as user-triggered saves, so the last writer wins.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::{Mutex, watch};
use tokio::task::JoinHandle;
use tokio::time::{self, Instant, MissedTickBehavior};
use tracing::{debug, warn};

use questlog_core::{KeyValueStore, ProgressionStore};

/// Store handle shared between the session and the timer
pub type SharedStore<S> = Arc<Mutex<ProgressionStore<S>>>;

/// Handle to a running auto-save timer
pub struct AutoSaver {
    shutdown: watch::Sender<bool>,
    handle: JoinHandle<usize>,
}

impl AutoSaver {
    /// Start saving `store` every `period`, first save one period from now
    pub fn spawn<S>(store: SharedStore<S>, period: Duration) -> Self
    where
        S: KeyValueStore + Send + 'static,
    {
        let (shutdown, mut shutdown_rx) = watch::channel(false);

        let handle = tokio::spawn(async move {
            let mut interval = time::interval_at(Instant::now() + period, period);
            interval.set_missed_tick_behavior(MissedTickBehavior::Delay);
            let mut saves = 0;

            loop {
                tokio::select! {
                    biased;

                    changed = shutdown_rx.changed() => {
                        // Sender gone counts as shutdown too
                        if changed.is_err() || *shutdown_rx.borrow() {
                            break;
                        }
                    }

                    _ = interval.tick() => {
                        let mut locked = store.lock().await;
                        if locked.save() {
                            saves += 1;
                        }
                    }
                }
            }

            debug!(saves, "auto-save stopped");
            saves
        });

        debug!(period_secs = period.as_secs(), "auto-save started");
        Self { shutdown, handle }
    }

    /// Stop the timer and wait for it, returning how many saves succeeded.
    ///
    /// No save happens after this returns.
    pub async fn shutdown(self) -> usize {
        let _ = self.shutdown.send(true);
        match self.handle.await {
            Ok(saves) => saves,
            Err(e) => {
                warn!(error = %e, "auto-save task failed");
                0
            }
        }
    }
}
