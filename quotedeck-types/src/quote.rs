//! The quote record.

use crate::{Error, QuoteId, Result};
use serde::{Deserialize, Serialize};

/// A single quote in the collection.
///
/// `text` and `category` are non-empty after trimming; both constructors
/// trim their input and enforce that invariant. The collection a store owns
/// preserves insertion order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Quote {
    /// Stable unique identifier, assigned at creation.
    pub id: QuoteId,
    /// The quotation body.
    pub text: String,
    /// Free-text classifier label (author-flavored sources map here too).
    pub category: String,
}

impl Quote {
    /// Creates a new quote with a freshly generated id.
    ///
    /// Trims both fields and fails with [`Error::Validation`] when either
    /// trims to empty.
    pub fn new(text: impl AsRef<str>, category: impl AsRef<str>) -> Result<Self> {
        Self::with_id(QuoteId::new(), text, category)
    }

    /// Reconstructs a quote with a known id, applying the same trimming
    /// validation as [`Quote::new`]. Used when decoding stored or imported
    /// records.
    pub fn with_id(id: QuoteId, text: impl AsRef<str>, category: impl AsRef<str>) -> Result<Self> {
        let text = text.as_ref().trim();
        if text.is_empty() {
            return Err(Error::Validation { field: "text" });
        }
        let category = category.as_ref().trim();
        if category.is_empty() {
            return Err(Error::Validation { field: "category" });
        }
        Ok(Self {
            id,
            text: text.to_string(),
            category: category.to_string(),
        })
    }
}
