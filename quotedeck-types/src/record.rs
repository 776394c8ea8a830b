//! The interchange wire record.
//!
//! Shared by the durable mirror, the import/export codec, and the remote
//! endpoint. Unknown fields in incoming payloads are ignored; a missing id
//! is synthesized on conversion so every in-memory record can participate
//! in reconciliation.

use crate::{Quote, QuoteId, Result};
use serde::{Deserialize, Serialize};

/// A quote as it appears on the wire and in the durable mirror.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuoteRecord {
    /// Record id; exported records always carry one, imported records may not.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<QuoteId>,
    pub text: String,
    pub category: String,
}

impl QuoteRecord {
    /// Converts the wire record into a validated [`Quote`], synthesizing an
    /// id when the record carries none.
    pub fn into_quote(self) -> Result<Quote> {
        let id = self.id.unwrap_or_default();
        Quote::with_id(id, self.text, self.category)
    }
}

impl From<&Quote> for QuoteRecord {
    fn from(quote: &Quote) -> Self {
        Self {
            id: Some(quote.id),
            text: quote.text.clone(),
            category: quote.category.clone(),
        }
    }
}
