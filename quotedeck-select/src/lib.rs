//! Quote selection for QuoteDeck.
//!
//! Chooses which quote to present: uniformly at random over the filtered
//! collection, with a configurable bias toward re-showing the session's
//! last-shown record so repeated navigation feels familiar.
//!
//! Selection is stateless; the caller records the returned choice as the new
//! last-shown (see `SessionState` in the storage crate).

use quotedeck_types::{CategoryFilter, Quote, QuoteId};
use rand::Rng;
use thiserror::Error;

/// Result type for selection operations.
pub type SelectResult<'a> = Result<Selection<'a>, SelectError>;

/// Errors that can occur during selection.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum SelectError {
    /// The filtered collection was empty.
    #[error("no quote available for the active filter")]
    NoQuoteAvailable,
}

/// Configuration for the selector.
#[derive(Debug, Clone, Copy)]
pub struct SelectorConfig {
    /// Probability of re-selecting the last-shown quote when it is still in
    /// the filtered set. Drawn independently on every call; values outside
    /// `[0, 1]` are clamped.
    pub repeat_bias: f64,
}

impl Default for SelectorConfig {
    fn default() -> Self {
        Self { repeat_bias: 0.4 }
    }
}

/// A chosen quote and its position in the filtered view.
#[derive(Debug, Clone, Copy)]
pub struct Selection<'a> {
    pub quote: &'a Quote,
    pub index: usize,
}

/// Chooses quotes to present.
#[derive(Debug, Clone, Copy, Default)]
pub struct QuoteSelector {
    config: SelectorConfig,
}

impl QuoteSelector {
    /// Creates a selector with the given configuration.
    #[must_use]
    pub fn new(config: SelectorConfig) -> Self {
        Self { config }
    }

    /// Picks a quote using the thread-local RNG.
    pub fn pick<'a>(
        &self,
        quotes: &'a [Quote],
        last_shown: Option<QuoteId>,
        filter: &CategoryFilter,
    ) -> SelectResult<'a> {
        self.pick_with(&mut rand::thread_rng(), quotes, last_shown, filter)
    }

    /// Picks a quote using a caller-supplied RNG (deterministic in tests).
    ///
    /// Applies the filter, then: an empty filtered set is
    /// [`SelectError::NoQuoteAvailable`]; when `last_shown` survives the
    /// filter, an independent draw with probability `repeat_bias` re-selects
    /// it; otherwise the draw is uniform over the filtered set.
    pub fn pick_with<'a, R: Rng>(
        &self,
        rng: &mut R,
        quotes: &'a [Quote],
        last_shown: Option<QuoteId>,
        filter: &CategoryFilter,
    ) -> SelectResult<'a> {
        let filtered: Vec<&Quote> = quotes.iter().filter(|q| filter.matches(q)).collect();
        if filtered.is_empty() {
            return Err(SelectError::NoQuoteAvailable);
        }

        let bias = self.config.repeat_bias.clamp(0.0, 1.0);
        if let Some(last) = last_shown {
            if let Some(index) = filtered.iter().position(|q| q.id == last) {
                if rng.gen_bool(bias) {
                    return Ok(Selection {
                        quote: filtered[index],
                        index,
                    });
                }
            }
        }

        let index = rng.gen_range(0..filtered.len());
        Ok(Selection {
            quote: filtered[index],
            index,
        })
    }
}
