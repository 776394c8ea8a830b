//! Core type definitions for QuoteDeck.
//!
//! This crate defines the fundamental types shared by every layer of the
//! engine:
//! - Quote record identifiers (UUID v7)
//! - The quote record itself, with trimming validation
//! - Category filters, including the `"all"` sentinel
//! - The interchange wire record used by the durable mirror and the codec
//!
//! Storage, selection, interchange, and sync behavior live in their
//! respective crates, not here.

mod filter;
mod ids;
mod quote;
mod record;

pub use filter::CategoryFilter;
pub use ids::QuoteId;
pub use quote::Quote;
pub use record::QuoteRecord;

/// Result type alias using the crate's error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur in type operations.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// A required field was empty after trimming whitespace.
    #[error("{field} must not be empty")]
    Validation {
        /// The offending field, `"text"` or `"category"`.
        field: &'static str,
    },

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("invalid UUID: {0}")]
    InvalidUuid(#[from] uuid::Error),
}
