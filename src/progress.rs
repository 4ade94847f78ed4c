//! Progress-callback trait for per-card rendering events.
//!
//! Inject an [`Arc<dyn RenderProgressCallback>`] via
//! [`crate::config::SheetConfigBuilder::progress_callback`] to receive events
//! as the pipeline places each card. The pipeline is single-threaded, so
//! events arrive in strict card order; the trait is still `Send + Sync` so a
//! config holding a callback can be shared across threads by the embedding
//! application.
//!
//! # Example
//!
//! ```rust
//! use track2pdf::{RenderProgressCallback, SheetConfig};
//! use std::sync::{Arc, atomic::{AtomicUsize, Ordering}};
//!
//! struct CountingCallback {
//!     completed: Arc<AtomicUsize>,
//! }
//!
//! impl RenderProgressCallback for CountingCallback {
//!     fn on_card_complete(&self, card_num: usize, total_cards: usize) {
//!         let done = self.completed.fetch_add(1, Ordering::SeqCst) + 1;
//!         eprintln!("Card {card_num}/{total_cards} done ({done} so far)");
//!     }
//! }
//!
//! let counter = Arc::new(CountingCallback {
//!     completed: Arc::new(AtomicUsize::new(0)),
//! });
//!
//! let config = SheetConfig::builder()
//!     .progress_callback(counter as Arc<dyn RenderProgressCallback>)
//!     .build()
//!     .unwrap();
//! ```

use std::sync::Arc;

/// Called by the conversion pipeline as it renders each card.
///
/// All methods have default no-op implementations so callers only override
/// what they care about.
pub trait RenderProgressCallback: Send + Sync {
    /// Called once before any card is rendered.
    ///
    /// # Arguments
    /// * `total_cards` — number of cards that will be rendered
    fn on_run_start(&self, total_cards: usize) {
        let _ = total_cards;
    }

    /// Called just before a card is drawn.
    ///
    /// # Arguments
    /// * `card_num`    — 1-indexed card number, in input-row order
    /// * `total_cards` — total cards in the run
    fn on_card_start(&self, card_num: usize, total_cards: usize) {
        let _ = (card_num, total_cards);
    }

    /// Called when a card has been drawn onto its page.
    fn on_card_complete(&self, card_num: usize, total_cards: usize) {
        let _ = (card_num, total_cards);
    }

    /// Called once after the document has been assembled.
    ///
    /// # Arguments
    /// * `total_cards` — cards rendered
    /// * `pages`       — pages the grid occupied
    fn on_run_complete(&self, total_cards: usize, pages: usize) {
        let _ = (total_cards, pages);
    }
}

/// A no-op implementation for callers that don't need progress events.
///
/// This is the default when no callback is configured.
pub struct NoopProgressCallback;

impl RenderProgressCallback for NoopProgressCallback {}

/// Convenience alias matching the type stored in [`crate::config::SheetConfig`].
pub type ProgressCallback = Arc<dyn RenderProgressCallback>;

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    struct TrackingCallback {
        starts: Arc<AtomicUsize>,
        completes: Arc<AtomicUsize>,
        announced_total: Arc<AtomicUsize>,
        final_pages: Arc<AtomicUsize>,
    }

    impl RenderProgressCallback for TrackingCallback {
        fn on_run_start(&self, total_cards: usize) {
            self.announced_total.store(total_cards, Ordering::SeqCst);
        }

        fn on_card_start(&self, _card_num: usize, _total_cards: usize) {
            self.starts.fetch_add(1, Ordering::SeqCst);
        }

        fn on_card_complete(&self, _card_num: usize, _total_cards: usize) {
            self.completes.fetch_add(1, Ordering::SeqCst);
        }

        fn on_run_complete(&self, _total_cards: usize, pages: usize) {
            self.final_pages.store(pages, Ordering::SeqCst);
        }
    }

    #[test]
    fn noop_callback_does_not_panic() {
        let cb = NoopProgressCallback;
        cb.on_run_start(6);
        cb.on_card_start(1, 6);
        cb.on_card_complete(1, 6);
        cb.on_run_complete(6, 1);
    }

    #[test]
    fn tracking_callback_receives_events() {
        let tracker = TrackingCallback {
            starts: Arc::new(AtomicUsize::new(0)),
            completes: Arc::new(AtomicUsize::new(0)),
            announced_total: Arc::new(AtomicUsize::new(0)),
            final_pages: Arc::new(AtomicUsize::new(0)),
        };

        tracker.on_run_start(3);
        assert_eq!(tracker.announced_total.load(Ordering::SeqCst), 3);

        for n in 1..=3 {
            tracker.on_card_start(n, 3);
            tracker.on_card_complete(n, 3);
        }

        assert_eq!(tracker.starts.load(Ordering::SeqCst), 3);
        assert_eq!(tracker.completes.load(Ordering::SeqCst), 3);

        tracker.on_run_complete(3, 1);
        assert_eq!(tracker.final_pages.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn arc_dyn_callback_works() {
        let cb: Arc<dyn RenderProgressCallback> = Arc::new(NoopProgressCallback);
        cb.on_run_start(10);
        cb.on_card_start(1, 10);
        cb.on_card_complete(1, 10);
    }
}
