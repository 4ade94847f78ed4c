//! Error types for the track2pdf library.
//!
//! One enum covers the whole pipeline: the conversion is strictly sequential
//! and fail-fast, so the first error aborts the run and surfaces here. The
//! input-side variants ([`Track2PdfError::InputNotFound`],
//! [`Track2PdfError::InputParseFailed`], [`Track2PdfError::EmptyInput`]) are
//! user errors with deterministic exit code 1; the render/save variants cover
//! faults that quick scripts in this space tend to leave as uncaught crashes
//! (oversized QR payloads, disk full) and are reported just as cleanly.

use std::path::PathBuf;
use thiserror::Error;

/// All errors returned by the track2pdf library.
///
/// Every variant maps to exit code 1 at the binary boundary.
#[derive(Debug, Error)]
pub enum Track2PdfError {
    // ── Input errors ──────────────────────────────────────────────────────
    /// Input file was not found at the given path.
    #[error("Input CSV not found: '{path}'\nCheck the path exists and is readable.")]
    InputNotFound { path: PathBuf },

    /// The file exists but cannot be parsed as a delimited table.
    #[error("Failed to parse '{path}' as CSV: {source}\nThe file must be comma-delimited with a header row.")]
    InputParseFailed {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },

    /// The table parsed but contains zero data rows.
    #[error("No data found in CSV.")]
    EmptyInput { path: PathBuf },

    // ── Config errors ─────────────────────────────────────────────────────
    /// Builder validation failed.
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    // ── Render errors ─────────────────────────────────────────────────────
    /// The QR payload cannot be encoded even at the largest symbol version.
    #[error("QR encoding failed for a payload of {len} bytes: {reason}\nA QR symbol at error-correction level M holds at most 2331 bytes of arbitrary data.")]
    QrEncodeFailed { len: usize, reason: String },

    /// The PDF canvas could not be prepared (fonts, layers).
    #[error("Card rendering failed: {detail}")]
    CardRenderFailed { detail: String },

    // ── I/O errors ────────────────────────────────────────────────────────
    /// Could not create or move the output PDF file.
    #[error("Failed to write output file '{path}': {source}")]
    DocumentSaveFailed {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The assembled document could not be serialized to PDF bytes.
    #[error("Failed to emit PDF for '{path}': {detail}")]
    DocumentEncodeFailed { path: PathBuf, detail: String },
}
