//! The authoritative quote store.

use crate::error::{StorageError, StorageResult};
use crate::kv::KeyValueStore;
use quotedeck_types::{CategoryFilter, Quote, QuoteId, QuoteRecord};
use std::sync::Arc;
use tracing::{debug, warn};

/// Fixed key the JSON-serialized collection is mirrored under.
pub const QUOTES_KEY: &str = "quotedeck.quotes.v1";

/// Outcome of [`QuoteStore::load`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadOutcome {
    /// The mirror held a valid collection of this many records.
    Loaded(usize),
    /// The mirror was absent or invalid; the built-in seed collection is in
    /// use instead.
    Seeded,
}

/// The built-in seed collection, used when the mirror is absent or invalid.
#[must_use]
pub fn seed_quotes() -> Vec<Quote> {
    let seeds = [
        (
            "The best way to get started is to quit talking and begin doing.",
            "Motivation",
        ),
        ("Your limitation—it's only your imagination.", "Inspiration"),
        (
            "Push yourself, because no one else is going to do it for you.",
            "Discipline",
        ),
        ("Great things never come from comfort zones.", "Growth"),
    ];
    seeds
        .into_iter()
        .map(|(text, category)| Quote {
            id: QuoteId::new(),
            text: text.to_string(),
            category: category.to_string(),
        })
        .collect()
}

/// Owns the in-memory quote collection and keeps a durable mirror.
///
/// Every mutation persists synchronously; a failed write is logged and
/// swallowed, so durability is best-effort. Reads never fail: an unusable
/// mirror falls back to the seed collection.
pub struct QuoteStore {
    quotes: Vec<Quote>,
    mirror: Arc<dyn KeyValueStore>,
}

impl QuoteStore {
    /// Creates an empty store over the given mirror. Call [`QuoteStore::load`]
    /// to populate it.
    pub fn new(mirror: Arc<dyn KeyValueStore>) -> Self {
        Self {
            quotes: Vec::new(),
            mirror,
        }
    }

    /// Loads the collection from the mirror.
    ///
    /// Falls back to [`seed_quotes`] when the key is absent, the payload does
    /// not decode, or any record fails validation. Never returns an error;
    /// the fallback is reported through the outcome.
    pub fn load(&mut self) -> LoadOutcome {
        match self.try_load() {
            Ok(Some(quotes)) => {
                let count = quotes.len();
                self.quotes = quotes;
                debug!("loaded {count} quotes from mirror");
                LoadOutcome::Loaded(count)
            }
            Ok(None) => {
                self.quotes = seed_quotes();
                LoadOutcome::Seeded
            }
            Err(e) => {
                warn!("failed to load quote collection, using seeds: {e}");
                self.quotes = seed_quotes();
                LoadOutcome::Seeded
            }
        }
    }

    fn try_load(&self) -> StorageResult<Option<Vec<Quote>>> {
        let Some(raw) = self.mirror.get(QUOTES_KEY)? else {
            return Ok(None);
        };
        let records: Vec<QuoteRecord> = serde_json::from_str(&raw)?;
        let mut quotes = Vec::with_capacity(records.len());
        for (index, record) in records.into_iter().enumerate() {
            let quote = record.into_quote().map_err(|e| {
                StorageError::InvalidData(format!("record {index}: {e}"))
            })?;
            quotes.push(quote);
        }
        Ok(Some(quotes))
    }

    /// Validates, appends, and persists a new quote.
    ///
    /// Returns the created record; on a validation error the collection is
    /// unchanged.
    pub fn add(&mut self, text: &str, category: &str) -> quotedeck_types::Result<Quote> {
        let quote = Quote::new(text, category)?;
        self.quotes.push(quote.clone());
        self.persist();
        Ok(quote)
    }

    /// The full collection, in insertion order.
    pub fn all(&self) -> &[Quote] {
        &self.quotes
    }

    /// The subsequence passing the filter, in insertion order.
    pub fn filtered(&self, filter: &CategoryFilter) -> Vec<&Quote> {
        self.quotes.iter().filter(|q| filter.matches(q)).collect()
    }

    /// Looks up a quote by id.
    pub fn get(&self, id: &QuoteId) -> Option<&Quote> {
        self.quotes.iter().find(|q| q.id == *id)
    }

    /// Sorted, de-duplicated category labels.
    pub fn categories(&self) -> Vec<String> {
        let mut labels: Vec<String> = self.quotes.iter().map(|q| q.category.clone()).collect();
        labels.sort();
        labels.dedup();
        labels
    }

    pub fn len(&self) -> usize {
        self.quotes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.quotes.is_empty()
    }

    /// Appends already-validated quotes, skipping ids the collection holds,
    /// and persists once. Returns the count actually added.
    pub fn append_all(&mut self, quotes: Vec<Quote>) -> usize {
        let mut added = 0;
        for quote in quotes {
            if self.get(&quote.id).is_some() {
                debug!("skipping duplicate quote {}", quote.id);
                continue;
            }
            self.quotes.push(quote);
            added += 1;
        }
        if added > 0 {
            self.persist();
        }
        added
    }

    /// Applies a reconciliation plan: appends `additions` and overwrites the
    /// `text`/`category` of records named by `overwrites` (the only
    /// field-level mutation the store permits). Local-only records are never
    /// removed. Persists once; returns the number of records touched.
    pub fn apply_merge(&mut self, additions: Vec<Quote>, overwrites: &[Quote]) -> usize {
        let mut touched = 0;
        for incoming in overwrites {
            if let Some(local) = self.quotes.iter_mut().find(|q| q.id == incoming.id) {
                local.text = incoming.text.clone();
                local.category = incoming.category.clone();
                touched += 1;
            }
        }
        for quote in additions {
            if self.get(&quote.id).is_none() {
                self.quotes.push(quote);
                touched += 1;
            }
        }
        if touched > 0 {
            self.persist();
        }
        touched
    }

    /// Writes the collection to the mirror. A failed write is logged at
    /// `warn` and swallowed.
    pub fn persist(&self) {
        if let Err(e) = self.try_persist() {
            warn!("failed to persist quote collection: {e}");
        }
    }

    fn try_persist(&self) -> StorageResult<()> {
        let records: Vec<QuoteRecord> = self.quotes.iter().map(QuoteRecord::from).collect();
        let json = serde_json::to_string(&records)?;
        self.mirror.put(QUOTES_KEY, &json)
    }
}
