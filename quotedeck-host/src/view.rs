//! The render contract the host implements.

use quotedeck_types::Quote;

/// Render callbacks the host provides.
///
/// Implementations must be cheap and non-blocking; they are invoked from
/// the session's control flow and, for notifications, from the sync
/// report forwarder.
pub trait QuoteView: Send + Sync {
    /// Displays a quote.
    fn show_quote(&self, quote: &Quote);

    /// Displays the no-quote state with a hint message.
    fn show_empty(&self, message: &str);

    /// Surfaces a transient notification (seed fallback, sync conflicts).
    fn notify(&self, message: &str);
}
