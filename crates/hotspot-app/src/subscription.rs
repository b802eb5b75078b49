//! Live subscription lifecycle for screens
//!
//! A screen that shows live data spawns a [`LiveSubscription`] when it becomes
//! active and tears it down when it becomes inactive. The stream is applied to
//! the screen state under the state lock, and teardown flips the closed flag
//! under the same lock, so once [`LiveSubscription::teardown`] returns the
//! state is never touched again.

use futures::StreamExt;
use hotspot_store::ports::Subscription;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};
use tokio::sync::watch;
use tokio::task::JoinHandle;

pub struct LiveSubscription {
    name: &'static str,
    task: Option<JoinHandle<()>>,
    close: Option<Box<dyn FnOnce() + Send>>,
    applied: watch::Receiver<u64>,
}

impl LiveSubscription {
    /// Drive `stream` into `state`, calling `apply` for every snapshot
    pub fn spawn<T, S, F>(
        name: &'static str,
        mut stream: Subscription<T>,
        state: Arc<Mutex<S>>,
        mut apply: F,
    ) -> Self
    where
        T: Send + 'static,
        S: Send + 'static,
        F: FnMut(&mut S, T) + Send + 'static,
    {
        let closed = Arc::new(AtomicBool::new(false));
        let (applied_tx, applied_rx) = watch::channel(0u64);

        let task_state = state.clone();
        let task_closed = closed.clone();
        let task = tokio::spawn(async move {
            while let Some(snapshot) = stream.next().await {
                {
                    let mut guard = task_state.lock().unwrap();
                    if task_closed.load(Ordering::SeqCst) {
                        break;
                    }
                    apply(&mut guard, snapshot);
                }
                applied_tx.send_modify(|count| *count += 1);
            }
            tracing::debug!(subscription = name, "Subscription stream ended");
        });

        let close = Box::new(move || {
            let _guard = state.lock().unwrap();
            closed.store(true, Ordering::SeqCst);
        });

        tracing::debug!(subscription = name, "Subscribed");
        Self {
            name,
            task: Some(task),
            close: Some(close),
            applied: applied_rx,
        }
    }

    /// Number of snapshots applied so far
    pub fn applied(&self) -> u64 {
        *self.applied.borrow()
    }

    /// Wait until at least `count` snapshots have been applied.
    /// Returns early if the subscription ends first.
    pub async fn wait_applied(&mut self, count: u64) {
        let _ = self.applied.wait_for(|applied| *applied >= count).await;
    }

    pub fn is_active(&self) -> bool {
        self.close.is_some()
    }

    /// Unsubscribe. No state mutation happens after this returns.
    pub fn teardown(&mut self) {
        if let Some(close) = self.close.take() {
            close();
            tracing::debug!(subscription = self.name, "Unsubscribed");
        }
        if let Some(task) = self.task.take() {
            task.abort();
        }
    }
}

impl Drop for LiveSubscription {
    fn drop(&mut self) {
        self.teardown();
    }
}
