//! Tokio-backed scheduler
//!
//! Each timer is a spawned task sleeping on the tokio clock. When it wakes it
//! reports its id on an unbounded channel; the owner pulls fired ids with
//! [`TokioScheduler::next_fired`] and hands them to the active flow, so all
//! state changes still happen on the owner's task, one at a time.

use parking_lot::Mutex;
use std::collections::{HashMap, HashSet};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;

use crate::scheduler::{Scheduler, TimerId};

/// Scheduler running timers on the tokio runtime
pub struct TokioScheduler {
    next_id: u64,
    /// Sleeping tasks, removed by the task itself just before it reports
    tasks: Arc<Mutex<HashMap<TimerId, JoinHandle<()>>>>,
    /// Timers scheduled and neither cancelled nor delivered yet
    outstanding: HashSet<TimerId>,
    fired_tx: mpsc::UnboundedSender<TimerId>,
    fired_rx: mpsc::UnboundedReceiver<TimerId>,
}

impl TokioScheduler {
    /// Create a scheduler
    ///
    /// Must be called from within a tokio runtime before any timer is
    /// scheduled.
    pub fn new() -> Self {
        let (fired_tx, fired_rx) = mpsc::unbounded_channel();
        Self {
            next_id: 0,
            tasks: Arc::new(Mutex::new(HashMap::new())),
            outstanding: HashSet::new(),
            fired_tx,
            fired_rx,
        }
    }

    /// Wait for the next timer to fire
    ///
    /// Returns `None` once nothing is outstanding. Ids cancelled after their
    /// task already reported are skipped.
    pub async fn next_fired(&mut self) -> Option<TimerId> {
        while !self.outstanding.is_empty() {
            let id = self.fired_rx.recv().await?;
            if self.outstanding.remove(&id) {
                tracing::trace!(%id, "timer fired");
                return Some(id);
            }
        }
        None
    }

    /// Check whether any timer is still outstanding
    pub fn has_outstanding(&self) -> bool {
        !self.outstanding.is_empty()
    }
}

impl Default for TokioScheduler {
    fn default() -> Self {
        Self::new()
    }
}

impl Scheduler for TokioScheduler {
    fn schedule(&mut self, delay: Duration) -> TimerId {
        let id = TimerId::from_raw(self.next_id);
        self.next_id += 1;

        let tasks = Arc::clone(&self.tasks);
        let fired_tx = self.fired_tx.clone();

        // Hold the map while spawning so the task cannot remove itself before
        // its handle is stored.
        let mut guard = self.tasks.lock();
        let handle = tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            tasks.lock().remove(&id);
            // The receiver lives as long as the scheduler; a send error only
            // means the scheduler is gone.
            let _ = fired_tx.send(id);
        });
        guard.insert(id, handle);
        drop(guard);

        self.outstanding.insert(id);
        tracing::trace!(%id, ?delay, "timer scheduled");
        id
    }

    fn cancel(&mut self, id: TimerId) -> bool {
        if let Some(handle) = self.tasks.lock().remove(&id) {
            handle.abort();
        }
        let was_outstanding = self.outstanding.remove(&id);
        if was_outstanding {
            tracing::trace!(%id, "timer cancelled");
        }
        was_outstanding
    }

    fn is_pending(&self, id: TimerId) -> bool {
        self.outstanding.contains(&id)
    }

    fn pending_count(&self) -> usize {
        self.outstanding.len()
    }
}

impl Drop for TokioScheduler {
    fn drop(&mut self) {
        for (_, handle) in self.tasks.lock().drain() {
            handle.abort();
        }
    }
}
