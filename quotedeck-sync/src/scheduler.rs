//! The periodic sync pass and its scheduler.

use crate::error::SyncResult;
use crate::outbox::Outbox;
use crate::remote::RemoteClient;
use quotedeck_storage::QuoteStore;
use quotedeck_types::QuoteId;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::{mpsc, watch, Mutex};
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;
use tracing::{debug, info, warn};

/// What one sync pass did.
#[derive(Debug, Clone, Default)]
pub struct SyncReport {
    /// Valid records the remote returned.
    pub pulled: usize,
    /// Remote records dropped for failing validation.
    pub dropped: usize,
    /// Local records appended or overwritten by the merge.
    pub merged: usize,
    /// Ids whose local record was overwritten by the remote.
    pub conflicts: Vec<QuoteId>,
    /// Locally-added records successfully pushed.
    pub pushed: usize,
}

/// Runs one sync pass: fetch the remote collection, merge it into the local
/// store (the whole merge applies under one store lock), then drain the
/// outbox with a single POST attempt per id.
pub async fn run_sync_once(
    store: &Arc<Mutex<QuoteStore>>,
    outbox: &Outbox,
    client: &RemoteClient,
) -> SyncResult<SyncReport> {
    let fetched = client.fetch_quotes().await?;
    let pulled = fetched.quotes.len();

    let (merged, conflicts) = {
        let mut store = store.lock().await;
        let plan = quotedeck_codec::reconcile(store.all(), &fetched.quotes);
        let conflicts = plan.conflicts.clone();
        let merged = store.apply_merge(plan.additions, &plan.overwrites);
        (merged, conflicts)
    };

    let mut pushed = 0;
    while let Some(id) = outbox.pop().await {
        let quote = { store.lock().await.get(&id).cloned() };
        let Some(quote) = quote else {
            debug!("outbox id {id} no longer in store, skipping push");
            continue;
        };
        match client.push_quote(&quote).await {
            Ok(()) => pushed += 1,
            Err(e) => warn!("failed to push quote {id}: {e}"),
        }
    }

    if merged > 0 || pushed > 0 {
        info!(pulled, merged, pushed, "sync pass applied changes");
    }

    Ok(SyncReport {
        pulled,
        dropped: fetched.dropped,
        merged,
        conflicts,
        pushed,
    })
}

/// Handle to a running scheduler. Stopping (or dropping) it cancels the
/// periodic task; no callback outlives the handle.
pub struct SyncHandle {
    shutdown: watch::Sender<bool>,
    task: Option<JoinHandle<()>>,
}

impl SyncHandle {
    /// Signals the task to stop and waits for it to finish.
    pub async fn stop(mut self) {
        let _ = self.shutdown.send(true);
        if let Some(task) = self.task.take() {
            let _ = task.await;
        }
    }

    /// Whether the task has already finished.
    pub fn is_finished(&self) -> bool {
        self.task.as_ref().is_none_or(JoinHandle::is_finished)
    }
}

impl Drop for SyncHandle {
    fn drop(&mut self) {
        if let Some(task) = &self.task {
            task.abort();
        }
    }
}

/// Spawns periodic sync passes.
pub struct SyncScheduler;

impl SyncScheduler {
    /// Starts a scheduler running a pass every `interval` (the first pass
    /// runs immediately). Every report is sent to `reports`; a failed pass
    /// is logged at `warn` and never stops rescheduling.
    pub fn start(
        store: Arc<Mutex<QuoteStore>>,
        outbox: Outbox,
        client: RemoteClient,
        interval: Duration,
        reports: mpsc::Sender<SyncReport>,
    ) -> SyncHandle {
        let (shutdown_tx, mut shutdown_rx) = watch::channel(false);

        let task = tokio::spawn(async move {
            let mut ticker = tokio::time::interval(interval);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

            loop {
                tokio::select! {
                    _ = ticker.tick() => {
                        match run_sync_once(&store, &outbox, &client).await {
                            Ok(report) => {
                                let _ = reports.send(report).await;
                            }
                            Err(e) => warn!("sync pass failed: {e}"),
                        }
                    }
                    _ = shutdown_rx.changed() => {
                        if *shutdown_rx.borrow() {
                            break;
                        }
                    }
                }
            }
            debug!("sync scheduler stopped");
        });

        SyncHandle {
            shutdown: shutdown_tx,
            task: Some(task),
        }
    }
}
