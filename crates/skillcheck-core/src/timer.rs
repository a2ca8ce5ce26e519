//! Countdown driver for in-progress sessions.
//!
//! The session's `tick()` is synchronous; this module supplies the one-second
//! cadence. A `SessionTimer` is a spawned tokio task that locks the shared
//! session each second and ticks it. Because the forced-completion transition
//! happens inside the same lock acquisition as the tick, a timer tick can
//! never race a concurrent manual `submit()` into a double score.
//!
//! The handle aborts the task when stopped or dropped, so a timer cannot
//! outlive the scope that created it and fire against a completed session.

use std::sync::{Arc, Mutex};
use std::time::Duration;

use tokio::task::JoinHandle;

use crate::session::{AssessmentSession, SessionStatus};

/// Handle to a running countdown task. Aborts the task on drop.
pub struct SessionTimer {
    handle: JoinHandle<()>,
}

impl SessionTimer {
    /// Spawn a countdown that ticks `session` once per second until it
    /// leaves InProgress.
    pub fn spawn(session: Arc<Mutex<AssessmentSession>>) -> Self {
        let handle = tokio::spawn(async move {
            let mut interval = tokio::time::interval(Duration::from_secs(1));
            // The first tick of a tokio interval completes immediately;
            // consume it so the countdown starts a full second out.
            interval.tick().await;
            loop {
                interval.tick().await;
                let mut guard = match session.lock() {
                    Ok(guard) => guard,
                    Err(poisoned) => {
                        tracing::warn!("session lock poisoned, stopping timer");
                        poisoned.into_inner()
                    }
                };
                if guard.status() != SessionStatus::InProgress {
                    break;
                }
                if let Err(e) = guard.tick() {
                    // Session left InProgress between the check and the tick;
                    // either way the countdown is over.
                    tracing::debug!("timer stopping: {e}");
                    break;
                }
                if guard.status() == SessionStatus::Completed {
                    break;
                }
            }
        });
        Self { handle }
    }

    /// Stop the countdown. The session is left as-is.
    pub fn stop(self) {
        self.handle.abort();
    }

    /// Whether the countdown task has finished (expiry or session completion).
    pub fn is_finished(&self) -> bool {
        self.handle.is_finished()
    }
}

impl Drop for SessionTimer {
    fn drop(&mut self) {
        self.handle.abort();
    }
}
