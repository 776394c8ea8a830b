//! Durable storage layer for QuoteDeck.
//!
//! Mirrors the collection into a single key of a key-value store, the way a
//! browser page would use local storage.
//!
//! # Architecture
//!
//! - [`KeyValueStore`] abstracts the mirror; SQLite backs the durable one,
//!   a plain in-memory map backs session-scoped state and tests
//! - [`QuoteStore`] owns the authoritative in-memory collection and keeps
//!   the mirror current after every mutation (best-effort: a failed write is
//!   logged and swallowed)
//! - [`SessionState`] tracks the last-shown record for one session; it is
//!   volatile and separate from the durable collection

mod error;
mod kv;
mod session;
mod store;

pub use error::{StorageError, StorageResult};
pub use kv::{KeyValueStore, MemoryKeyValue, SqliteKeyValue};
pub use session::{SessionState, LAST_SHOWN_KEY};
pub use store::{seed_quotes, LoadOutcome, QuoteStore, QUOTES_KEY};
