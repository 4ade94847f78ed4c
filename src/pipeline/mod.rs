//! Pipeline stages for CSV-to-receipt-sheet conversion.
//!
//! Each submodule implements exactly one transformation step.
//! Keeping stages separate makes each independently testable and lets us
//! swap implementations (e.g. a real tracking lookup instead of the
//! placeholder resolver) without touching other stages.
//!
//! ## Data Flow
//!
//! ```text
//! input ──▶ enrich ──▶ layout ──▶ encode ──▶ render
//! (CSV)    (metadata)  (slots)    (QR)       (cards)
//! ```
//!
//! 1. [`input`]  — read the delimited table into ordered records
//! 2. [`enrich`] — merge placeholder tracking metadata; input fields win
//! 3. [`layout`] — pure grid arithmetic: one page/rect slot per record
//! 4. [`encode`] — tracking number → black-on-white QR raster
//! 5. [`render`] — draw border, labeled fields, and the QR onto a PDF layer

pub mod encode;
pub mod enrich;
pub mod input;
pub mod layout;
pub mod render;
