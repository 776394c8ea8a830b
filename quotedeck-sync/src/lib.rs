//! HTTP remote sync engine for QuoteDeck.
//!
//! Periodically pulls the remote collection, merges it into the local store
//! (remote authoritative, conflicts flagged), and pushes each locally-added
//! record at most once.
//!
//! # Architecture
//!
//! - **RemoteClient**: GET the remote collection / POST one record
//! - **Outbox**: ids of locally-added quotes awaiting their single POST
//! - **run_sync_once**: one idempotent pass (fetch, reconcile, apply, drain)
//! - **SyncScheduler**: a cancelable periodic task running passes; a failed
//!   pass is logged and never stops rescheduling
//!
//! A pass locks the store once to apply its whole merge, so a completed
//! fetch never interleaves with user operations at the field level.

mod error;
mod outbox;
mod remote;
mod scheduler;

pub use error::{SyncError, SyncResult};
pub use outbox::Outbox;
pub use remote::{FetchOutcome, RemoteClient, RemoteConfig};
pub use scheduler::{run_sync_once, SyncHandle, SyncReport, SyncScheduler};
