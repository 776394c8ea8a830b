//! Outbox of locally-added quotes awaiting their POST.
//!
//! Each add enqueues the record's id exactly once; a sync pass pops each id
//! and makes a single POST attempt. Ids are not re-queued on failure, so a
//! record is pushed at most once per add.

use quotedeck_types::QuoteId;
use std::collections::VecDeque;
use std::sync::Arc;
use tokio::sync::Mutex;

/// Shared queue of quote ids pending their single push.
#[derive(Debug, Clone, Default)]
pub struct Outbox {
    pending: Arc<Mutex<VecDeque<QuoteId>>>,
}

impl Outbox {
    /// Creates an empty outbox.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Enqueues an id for pushing.
    pub async fn enqueue(&self, id: QuoteId) {
        self.pending.lock().await.push_back(id);
    }

    /// Pops the oldest pending id, if any.
    pub async fn pop(&self) -> Option<QuoteId> {
        self.pending.lock().await.pop_front()
    }

    /// Number of ids still pending.
    pub async fn len(&self) -> usize {
        self.pending.lock().await.len()
    }

    /// Whether the outbox is empty.
    pub async fn is_empty(&self) -> bool {
        self.pending.lock().await.is_empty()
    }
}
