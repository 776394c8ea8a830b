//! Interchange codec for QuoteDeck.
//!
//! Serializes the collection to the UTF-8 JSON interchange format, validates
//! imported payloads record-by-record, and plans merges against an incoming
//! remote collection.
//!
//! Exported records always carry their `id`, so an export/import round-trip
//! preserves identity. Imported records tolerate a missing `id` (one is
//! synthesized) and ignore unknown fields.
//!
//! Nothing here mutates a store: `import` returns the validated records and
//! a drop count, `reconcile` returns a [`MergePlan`]; the caller applies
//! either through the store.

use chrono::{DateTime, Utc};
use quotedeck_types::{Quote, QuoteId, QuoteRecord};
use thiserror::Error;

/// Result type for codec operations.
pub type CodecResult<T> = Result<T, CodecError>;

/// Errors that can occur decoding an interchange payload.
#[derive(Debug, Error)]
pub enum CodecError {
    /// The payload was not JSON, or not a JSON array.
    #[error("malformed input: {0}")]
    MalformedInput(String),
}

/// Outcome of [`import`]: the records that survived validation and how many
/// were dropped.
#[derive(Debug, Clone)]
pub struct ImportOutcome {
    pub accepted: Vec<Quote>,
    pub dropped: usize,
}

/// A planned merge of an incoming collection into a local one.
///
/// Local-only records are never part of a plan; reconciliation never
/// deletes.
#[derive(Debug, Clone, Default)]
pub struct MergePlan {
    /// Incoming records with ids unknown locally.
    pub additions: Vec<Quote>,
    /// Incoming records whose local counterpart differs; the incoming fields
    /// win (remote authoritative).
    pub overwrites: Vec<Quote>,
    /// Ids whose local record was overwritten.
    pub conflicts: Vec<QuoteId>,
}

impl MergePlan {
    /// Whether applying the plan would change anything.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.additions.is_empty() && self.overwrites.is_empty()
    }
}

/// Serializes the collection as a pretty-printed JSON array.
///
/// Never fails for a well-formed in-memory collection.
#[must_use]
pub fn export(quotes: &[Quote]) -> String {
    let records: Vec<QuoteRecord> = quotes.iter().map(QuoteRecord::from).collect();
    serde_json::to_string_pretty(&records).expect("quote records serialize to JSON")
}

/// The timestamped export file name for the given instant.
#[must_use]
pub fn export_file_name(at: DateTime<Utc>) -> String {
    format!("quotes_export_{}.json", at.format("%Y-%m-%d-%H-%M-%S"))
}

/// Parses and validates an interchange payload.
///
/// The payload must be a JSON array ([`CodecError::MalformedInput`]
/// otherwise). Each element is validated independently: elements that are
/// not objects, lack `text`/`category`, or trim to empty are dropped and
/// counted, never a hard failure.
pub fn import(raw: &[u8]) -> CodecResult<ImportOutcome> {
    let value: serde_json::Value = serde_json::from_slice(raw)
        .map_err(|e| CodecError::MalformedInput(e.to_string()))?;
    let Some(items) = value.as_array() else {
        return Err(CodecError::MalformedInput(
            "expected a JSON array of quote records".to_string(),
        ));
    };

    let mut accepted = Vec::with_capacity(items.len());
    let mut dropped = 0;
    for item in items {
        let quote = serde_json::from_value::<QuoteRecord>(item.clone())
            .ok()
            .and_then(|record| record.into_quote().ok());
        match quote {
            Some(quote) => accepted.push(quote),
            None => dropped += 1,
        }
    }

    Ok(ImportOutcome { accepted, dropped })
}

/// Plans the merge of `incoming` into `local`.
///
/// An incoming record with an id unknown locally becomes an addition; one
/// sharing an id with a differing local record becomes an overwrite and its
/// id is flagged as a conflict; an identical record is left untouched.
#[must_use]
pub fn reconcile(local: &[Quote], incoming: &[Quote]) -> MergePlan {
    let mut plan = MergePlan::default();
    for remote in incoming {
        match local.iter().find(|l| l.id == remote.id) {
            None => plan.additions.push(remote.clone()),
            Some(l) if l.text != remote.text || l.category != remote.category => {
                plan.conflicts.push(remote.id);
                plan.overwrites.push(remote.clone());
            }
            Some(_) => {}
        }
    }
    plan
}
