//! End-to-end conversion: CSV records in, receipt-card PDF out.
//!
//! [`convert_to_file`] runs the full pipeline and writes the document
//! atomically (temp file, then rename) so a crash never leaves a half-written
//! PDF at the output path. [`plan`] runs only the cheap front half and
//! reports what the sheet would look like, for dry runs and tooling.

use crate::config::SheetConfig;
use crate::error::Track2PdfError;
use crate::pipeline::encode::encode_qr;
use crate::pipeline::enrich::{enrich, EnrichedRecord, TRACKING_FIELD};
use crate::pipeline::input::{load_records, Record};
use crate::pipeline::layout::{CardSlot, GridLayout};
use crate::pipeline::render::{draw_card, CardFonts};
use printpdf::{PdfDocument, PdfDocumentReference, PdfLayerReference};
use serde::{Deserialize, Serialize};
use std::fs;
use std::io::{BufWriter, Write};
use std::path::Path;
use std::time::Instant;
use tracing::{info, warn};

/// Timing and volume figures for one conversion run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SheetStats {
    /// Cards rendered (one per input record).
    pub cards: usize,
    /// Pages in the written document.
    pub pages: usize,
    /// Milliseconds spent loading and enriching the input.
    pub load_ms: u64,
    /// Milliseconds spent encoding, drawing and writing the document.
    pub render_ms: u64,
    /// Wall-clock milliseconds for the whole run.
    pub total_ms: u64,
}

/// The layout a conversion would produce, computed without rendering.
#[derive(Debug, Clone)]
pub struct SheetPlan {
    /// Input records found (equals the number of cards).
    pub records: usize,
    /// Pages the sheet will span.
    pub pages: usize,
    /// One slot per record, in input order.
    pub slots: Vec<CardSlot>,
}

/// Compute the sheet layout for `input` without producing any output.
///
/// Runs the loader and the grid dealer only; enrichment and rendering are
/// skipped, so this is cheap enough to call on every dry run.
pub fn plan(input: &Path, config: &SheetConfig) -> Result<SheetPlan, Track2PdfError> {
    let records = load_nonempty(input)?;
    let mut layout = GridLayout::new(config);
    let slots: Vec<CardSlot> = records.iter().map(|_| layout.next_slot()).collect();
    let pages = slots.last().map(|s| s.page + 1).unwrap_or(0);
    Ok(SheetPlan {
        records: records.len(),
        pages,
        slots,
    })
}

/// Convert `input` into a receipt-card PDF at `output`.
///
/// One card per record, dealt left-to-right and top-to-bottom across as many
/// pages as needed. Parent directories of `output` are created on demand.
pub fn convert_to_file(
    input: &Path,
    output: &Path,
    config: &SheetConfig,
) -> Result<SheetStats, Track2PdfError> {
    let total_start = Instant::now();
    let progress = config.progress_callback.clone();

    // ── Step 1: Load and enrich ──────────────────────────────────────────
    let load_start = Instant::now();
    let records = load_nonempty(input)?;
    if records[0].get(TRACKING_FIELD).is_none() {
        warn!(
            "Input has no '{}' column, details will be resolved for empty identifiers",
            TRACKING_FIELD
        );
    }

    let cards: Vec<EnrichedRecord> = records
        .iter()
        .map(|r| enrich(r, config.resolver.as_ref()))
        .collect();
    let load_ms = load_start.elapsed().as_millis() as u64;
    info!(
        "Loaded and enriched {} records from {}",
        cards.len(),
        input.display()
    );

    // ── Step 2: Lay out the grid ─────────────────────────────────────────
    let mut layout = GridLayout::new(config);
    let slots: Vec<CardSlot> = cards.iter().map(|_| layout.next_slot()).collect();
    let pages = slots.last().map(|s| s.page + 1).unwrap_or(0);

    // ── Step 3: Render cards ─────────────────────────────────────────────
    let render_start = Instant::now();
    let total = cards.len();
    if let Some(ref cb) = progress {
        cb.on_run_start(total);
    }

    let (doc, first_page, first_layer) = PdfDocument::new(
        config.title.clone(),
        config.page_width,
        config.page_height,
        "Layer 1",
    );
    let mut layers: Vec<PdfLayerReference> = vec![doc.get_page(first_page).get_layer(first_layer)];
    let fonts = CardFonts::load(&doc)?;

    for (i, (card, slot)) in cards.iter().zip(&slots).enumerate() {
        if let Some(ref cb) = progress {
            cb.on_card_start(i + 1, total);
        }

        // Pages materialise lazily so an exactly-full sheet never grows a
        // trailing blank page.
        while layers.len() <= slot.page {
            let (page, layer) = doc.add_page(config.page_width, config.page_height, "Layer 1");
            layers.push(doc.get_page(page).get_layer(layer));
        }

        let qr = encode_qr(card.tracking_number(), config.qr_module_px)?;
        draw_card(&layers[slot.page], &fonts, &slot.rect, card, &qr, config);

        if let Some(ref cb) = progress {
            cb.on_card_complete(i + 1, total);
        }
    }

    // ── Step 4: Write the document ───────────────────────────────────────
    write_document(doc, output)?;
    let render_ms = render_start.elapsed().as_millis() as u64;

    if let Some(ref cb) = progress {
        cb.on_run_complete(total, pages);
    }

    let total_ms = total_start.elapsed().as_millis() as u64;
    info!(
        "Wrote {} cards across {} pages to {} in {} ms",
        total,
        pages,
        output.display(),
        total_ms
    );

    Ok(SheetStats {
        cards: total,
        pages,
        load_ms,
        render_ms,
        total_ms,
    })
}

fn load_nonempty(input: &Path) -> Result<Vec<Record>, Track2PdfError> {
    let records = load_records(input)?;
    if records.is_empty() {
        return Err(Track2PdfError::EmptyInput {
            path: input.to_path_buf(),
        });
    }
    Ok(records)
}

/// Save via a sibling temp file and rename it over the target.
fn write_document(doc: PdfDocumentReference, output: &Path) -> Result<(), Track2PdfError> {
    let save_err = |e: std::io::Error| Track2PdfError::DocumentSaveFailed {
        path: output.to_path_buf(),
        source: e,
    };

    if let Some(parent) = output.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent).map_err(save_err)?;
        }
    }

    let tmp = output.with_extension("pdf.tmp");
    let file = fs::File::create(&tmp).map_err(save_err)?;
    let mut writer = BufWriter::new(file);
    if let Err(e) = doc.save(&mut writer) {
        let _ = fs::remove_file(&tmp);
        return Err(Track2PdfError::DocumentEncodeFailed {
            path: output.to_path_buf(),
            detail: format!("{e:?}"),
        });
    }
    writer.flush().map_err(save_err)?;
    fs::rename(&tmp, output).map_err(save_err)?;
    Ok(())
}
