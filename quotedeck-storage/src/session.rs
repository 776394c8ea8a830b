//! Session-scoped continuity state.
//!
//! Tracks the last-shown quote for one session. Volatile by design: it lives
//! in an ephemeral key-value store and must not be conflated with the
//! durable collection.

use crate::kv::{KeyValueStore, MemoryKeyValue};
use quotedeck_types::{Quote, QuoteId};
use std::sync::Arc;
use tracing::debug;

/// Key the last-shown record id is kept under.
pub const LAST_SHOWN_KEY: &str = "quotedeck.session.last-shown";

/// Last-shown continuity over an ephemeral key-value store.
///
/// Read and write failures are swallowed; losing this state only costs the
/// repeat-bias familiarity, never correctness.
pub struct SessionState {
    kv: Arc<dyn KeyValueStore>,
}

impl SessionState {
    /// Wraps an existing ephemeral store.
    pub fn new(kv: Arc<dyn KeyValueStore>) -> Self {
        Self { kv }
    }

    /// Creates a session over a fresh in-memory store.
    #[must_use]
    pub fn in_memory() -> Self {
        Self::new(Arc::new(MemoryKeyValue::new()))
    }

    /// Records the quote as the session's last-shown.
    pub fn record_last_shown(&self, quote: &Quote) {
        match serde_json::to_string(&quote.id) {
            Ok(json) => {
                if let Err(e) = self.kv.put(LAST_SHOWN_KEY, &json) {
                    debug!("failed to record last-shown quote: {e}");
                }
            }
            Err(e) => debug!("failed to encode last-shown quote id: {e}"),
        }
    }

    /// The last-shown quote id, if one was recorded and still decodes.
    pub fn last_shown_id(&self) -> Option<QuoteId> {
        let raw = self.kv.get(LAST_SHOWN_KEY).ok().flatten()?;
        serde_json::from_str(&raw).ok()
    }

    /// Forgets the last-shown record.
    pub fn clear(&self) {
        if let Err(e) = self.kv.remove(LAST_SHOWN_KEY) {
            debug!("failed to clear last-shown quote: {e}");
        }
    }
}

impl Default for SessionState {
    fn default() -> Self {
        Self::in_memory()
    }
}
