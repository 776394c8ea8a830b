//! Category filtering.

use crate::Quote;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Sentinel label that selects every category.
pub const ALL_LABEL: &str = "all";

/// Constrains which quotes are visible to selection and display.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum CategoryFilter {
    /// No constraint; every quote matches.
    All,
    /// Only quotes whose `category` equals the label exactly.
    Named(String),
}

impl CategoryFilter {
    /// Builds a filter from a raw label.
    ///
    /// An empty label or the `"all"` sentinel (case-insensitive) yields
    /// [`CategoryFilter::All`]; anything else filters on the trimmed label.
    #[must_use]
    pub fn from_label(label: &str) -> Self {
        let label = label.trim();
        if label.is_empty() || label.eq_ignore_ascii_case(ALL_LABEL) {
            Self::All
        } else {
            Self::Named(label.to_string())
        }
    }

    /// Returns whether the quote passes this filter.
    #[must_use]
    pub fn matches(&self, quote: &Quote) -> bool {
        match self {
            Self::All => true,
            Self::Named(label) => quote.category == *label,
        }
    }
}

impl Default for CategoryFilter {
    fn default() -> Self {
        Self::All
    }
}

impl fmt::Display for CategoryFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::All => write!(f, "{ALL_LABEL}"),
            Self::Named(label) => write!(f, "{label}"),
        }
    }
}
