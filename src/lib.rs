//! # track2pdf
//!
//! Turn a CSV of shipment tracking numbers into a printable PDF sheet of
//! receipt cards, one card per shipment, each with a scannable QR code.
//!
//! ## Why this crate?
//!
//! Mail rooms and small shops keep shipment lists as spreadsheet exports.
//! Turning those into something a person can stick on a parcel usually means
//! a word-processor template and a morning of copy-paste. This crate does
//! the whole thing in one pass: read the CSV, fill in the shipment details,
//! deal cards onto A4 pages and write a PDF ready for the office printer.
//!
//! ## Pipeline Overview
//!
//! ```text
//! CSV
//!  │
//!  ├─ 1. Input    read rows into ordered records
//!  ├─ 2. Enrich   resolve shipment details, input values win
//!  ├─ 3. Layout   deal card slots left-to-right, top-to-bottom
//!  ├─ 4. Encode   tracking number → QR raster
//!  ├─ 5. Render   border, text lines and QR tile per card
//!  └─ 6. Write    atomic save (temp file, then rename)
//! ```
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use std::path::Path;
//! use track2pdf::{convert_to_file, SheetConfig};
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = SheetConfig::builder()
//!         .columns(2)
//!         .title("Shipment Tracking Receipts")
//!         .build()?;
//!     let stats = convert_to_file(
//!         Path::new("shipments.csv"),
//!         Path::new("receipts.pdf"),
//!         &config,
//!     )?;
//!     eprintln!("{} cards on {} pages", stats.cards, stats.pages);
//!     Ok(())
//! }
//! ```
//!
//! ## Feature Flags
//!
//! | Feature | Default | Description |
//! |---------|---------|-------------|
//! | `cli`   | on      | Enables the `track2pdf` binary (clap + anyhow + indicatif + tracing-subscriber) |
//!
//! Disable `cli` when using only the library to avoid pulling in CLI-only deps:
//! ```toml
//! track2pdf = { version = "0.3", default-features = false }
//! ```

// ── Modules ──────────────────────────────────────────────────────────────

pub mod config;
pub mod convert;
pub mod error;
pub mod pipeline;
pub mod progress;

// ── Re-exports ───────────────────────────────────────────────────────────

pub use config::{SheetConfig, SheetConfigBuilder};
pub use convert::{convert_to_file, plan, SheetPlan, SheetStats};
pub use error::Track2PdfError;
pub use pipeline::enrich::{
    enrich, EnrichedRecord, PlaceholderResolver, TrackingDetails, TrackingResolver, TRACKING_FIELD,
};
pub use pipeline::input::{load_records, Record};
pub use pipeline::layout::{CardRect, CardSlot, GridLayout};
pub use progress::{NoopProgressCallback, ProgressCallback, RenderProgressCallback};

/// Millimetre unit used for all sheet geometry.
pub use printpdf::Mm;
