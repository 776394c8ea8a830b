//! The session facade wiring store, selector, codec, and sync together.

use crate::view::QuoteView;
use chrono::Utc;
use quotedeck_select::{QuoteSelector, SelectError, SelectorConfig};
use quotedeck_storage::{KeyValueStore, LoadOutcome, QuoteStore, SessionState};
use quotedeck_sync::{Outbox, RemoteClient, RemoteConfig, SyncHandle, SyncScheduler};
use quotedeck_types::{CategoryFilter, Quote};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::{mpsc, Mutex};
use tokio::task::JoinHandle;
use tracing::debug;

const EMPTY_HINT: &str = "No quotes available. Add one below!";
const STARTUP_HINT: &str = "Click \"Show New Quote\" to get started!";

/// Outcome of importing a picked file.
#[derive(Debug, Clone, Copy)]
pub struct ImportReport {
    /// Records actually added (duplicates by id are skipped).
    pub added: usize,
    /// Records dropped during validation.
    pub dropped: usize,
}

/// One interactive session over a quote collection.
///
/// Constructed once per process; dropping it tears down any running sync
/// scheduler.
pub struct QuoteSession {
    store: Arc<Mutex<QuoteStore>>,
    session: SessionState,
    selector: QuoteSelector,
    view: Arc<dyn QuoteView>,
    filter: CategoryFilter,
    outbox: Outbox,
    sync: Option<SyncHandle>,
    notifier: Option<JoinHandle<()>>,
}

impl QuoteSession {
    /// Creates a session over the given durable mirror and view.
    pub fn new(
        mirror: Arc<dyn KeyValueStore>,
        view: Arc<dyn QuoteView>,
        selector: SelectorConfig,
    ) -> Self {
        Self {
            store: Arc::new(Mutex::new(QuoteStore::new(mirror))),
            session: SessionState::in_memory(),
            selector: QuoteSelector::new(selector),
            view,
            filter: CategoryFilter::All,
            outbox: Outbox::new(),
            sync: None,
            notifier: None,
        }
    }

    /// Loads the collection and renders the initial state: the session's
    /// last-shown record when still present, a startup hint otherwise.
    pub async fn init(&self) {
        let mut store = self.store.lock().await;
        if store.load() == LoadOutcome::Seeded {
            self.view
                .notify("No saved quotes found; starting with the built-in collection.");
        }

        let last = self
            .session
            .last_shown_id()
            .and_then(|id| store.get(&id).cloned());
        match last {
            Some(quote) => self.view.show_quote(&quote),
            None => self.view.show_empty(STARTUP_HINT),
        }
    }

    /// Picks and renders the next quote under the active filter.
    pub async fn show_next(&self) {
        let store = self.store.lock().await;
        match self
            .selector
            .pick(store.all(), self.session.last_shown_id(), &self.filter)
        {
            Ok(selection) => {
                self.session.record_last_shown(selection.quote);
                self.view.show_quote(selection.quote);
            }
            Err(SelectError::NoQuoteAvailable) => self.view.show_empty(EMPTY_HINT),
        }
    }

    /// The submit callback: validates, stores, queues for push, and renders
    /// the new quote. Validation errors surface to the caller for
    /// user-visible feedback.
    pub async fn submit(&self, text: &str, category: &str) -> quotedeck_types::Result<Quote> {
        let quote = {
            let mut store = self.store.lock().await;
            store.add(text, category)?
        };
        self.outbox.enqueue(quote.id).await;
        self.session.record_last_shown(&quote);
        self.view.show_quote(&quote);
        Ok(quote)
    }

    /// The file-picked callback: imports a JSON payload, appends the valid
    /// records, and renders the first imported quote. A malformed payload
    /// surfaces; per-record failures only count.
    pub async fn import_bytes(
        &self,
        raw: &[u8],
    ) -> Result<ImportReport, quotedeck_codec::CodecError> {
        let outcome = quotedeck_codec::import(raw)?;
        let first = outcome.accepted.first().cloned();
        let added = {
            let mut store = self.store.lock().await;
            store.append_all(outcome.accepted)
        };
        if let Some(quote) = first {
            self.view.show_quote(&quote);
        }
        Ok(ImportReport {
            added,
            dropped: outcome.dropped,
        })
    }

    /// Serializes the collection for export.
    pub async fn export_json(&self) -> String {
        let store = self.store.lock().await;
        quotedeck_codec::export(store.all())
    }

    /// The timestamped file name for an export started now.
    pub fn export_file_name(&self) -> String {
        quotedeck_codec::export_file_name(Utc::now())
    }

    /// The category-changed callback: installs the new filter and re-renders
    /// under it.
    pub async fn set_filter(&mut self, label: &str) {
        self.filter = CategoryFilter::from_label(label);
        self.show_next().await;
    }

    /// The active filter.
    pub fn filter(&self) -> &CategoryFilter {
        &self.filter
    }

    /// Sorted category labels for the host's filter control.
    pub async fn categories(&self) -> Vec<String> {
        self.store.lock().await.categories()
    }

    /// Starts periodic sync against the remote, replacing any running
    /// scheduler. Conflicts resolved by a pass surface through
    /// [`QuoteView::notify`].
    pub async fn start_sync(&mut self, config: RemoteConfig, interval: Duration) {
        self.stop_sync().await;

        let (tx, mut rx) = mpsc::channel::<quotedeck_sync::SyncReport>(8);
        let view = self.view.clone();
        self.notifier = Some(tokio::spawn(async move {
            while let Some(report) = rx.recv().await {
                if !report.conflicts.is_empty() {
                    view.notify(&format!(
                        "Sync resolved {} conflict(s) from the server.",
                        report.conflicts.len()
                    ));
                }
            }
        }));

        self.sync = Some(SyncScheduler::start(
            self.store.clone(),
            self.outbox.clone(),
            RemoteClient::new(config),
            interval,
            tx,
        ));
        debug!("periodic sync started");
    }

    /// Stops the running scheduler, if any, and waits for teardown.
    pub async fn stop_sync(&mut self) {
        if let Some(handle) = self.sync.take() {
            handle.stop().await;
        }
        // The scheduler owned the only sender, so the forwarder drains and
        // exits once it is gone.
        if let Some(notifier) = self.notifier.take() {
            let _ = notifier.await;
        }
    }

    /// Whether a sync scheduler is currently running.
    pub fn sync_running(&self) -> bool {
        self.sync.as_ref().is_some_and(|h| !h.is_finished())
    }
}
