//! Card rendering: draw one receipt card onto a PDF layer.
//!
//! ## Geometry
//!
//! PDF coordinates grow upward from the page's bottom-left corner, so lines
//! of text walk down the card by subtracting from the baseline. All face
//! metrics are in millimetres; font sizes are in points as PDF text always
//! is. The QR tile is placed by its lower-left corner and sized through the
//! image DPI so that it comes out at exactly the configured edge length.

use crate::config::SheetConfig;
use crate::error::Track2PdfError;
use crate::pipeline::enrich::EnrichedRecord;
use crate::pipeline::layout::CardRect;
use image::{DynamicImage, GrayImage};
use printpdf::{
    BuiltinFont, Color, Image, ImageTransform, IndirectFontRef, Line, Mm, PdfDocumentReference,
    PdfLayerReference, Point, Rgb,
};

/// Longest address rendered on a card face, in characters.
pub const ADDRESS_MAX_CHARS: usize = 60;
/// Longest recipient name rendered on a card face, in characters.
pub const RECIPIENT_MAX_CHARS: usize = 55;

// Face metrics, mm. Text and the QR tile sit PAD inside the border; the
// update/value columns are offsets from the text origin.
const PAD: f32 = 2.0;
const FIRST_BASELINE: f32 = 3.6;
const TITLE_STEP: f32 = 5.0;
const BODY_STEP: f32 = 4.2;
const VALUE_COL: f32 = 14.0;
const UPDATE_COL: f32 = 53.0;

// Font sizes, pt.
const TITLE_SIZE: f32 = 10.0;
const BODY_SIZE: f32 = 8.0;

/// The two builtin faces every card uses.
pub struct CardFonts {
    pub regular: IndirectFontRef,
    pub bold: IndirectFontRef,
}

impl CardFonts {
    /// Register Helvetica and Helvetica-Bold with the document.
    pub fn load(doc: &PdfDocumentReference) -> Result<Self, Track2PdfError> {
        let font_err = |e| Track2PdfError::CardRenderFailed {
            detail: format!("{e:?}"),
        };
        Ok(Self {
            regular: doc.add_builtin_font(BuiltinFont::Helvetica).map_err(font_err)?,
            bold: doc
                .add_builtin_font(BuiltinFont::HelveticaBold)
                .map_err(font_err)?,
        })
    }
}

/// Draw one receipt card into `rect` on the given layer.
///
/// Paints the border, the five text lines and the QR tile, in that order so
/// the symbol is never obscured by text runs underneath it.
pub fn draw_card(
    layer: &PdfLayerReference,
    fonts: &CardFonts,
    rect: &CardRect,
    record: &EnrichedRecord,
    qr: &GrayImage,
    config: &SheetConfig,
) {
    let x = rect.x.0;
    let y_top = rect.y_top.0;
    let width = rect.width.0;
    let y_bottom = y_top - rect.height.0;

    let border = Line {
        points: vec![
            (Point::new(Mm(x), Mm(y_bottom)), false),
            (Point::new(Mm(x + width), Mm(y_bottom)), false),
            (Point::new(Mm(x + width), Mm(y_top)), false),
            (Point::new(Mm(x), Mm(y_top)), false),
        ],
        is_closed: true,
    };
    layer.set_outline_color(Color::Rgb(Rgb::new(0.0, 0.0, 0.0, None)));
    layer.set_outline_thickness(1.0);
    layer.add_line(border);

    let text_x = x + PAD;
    let mut baseline = y_top - FIRST_BASELINE;

    layer.use_text(
        format!("Tracking: {}", record.tracking_number()),
        TITLE_SIZE,
        Mm(text_x),
        Mm(baseline),
        &fonts.bold,
    );
    baseline -= TITLE_STEP;

    layer.use_text(
        format!("Status: {}", record.status()),
        BODY_SIZE,
        Mm(text_x),
        Mm(baseline),
        &fonts.regular,
    );
    layer.use_text(
        format!("Last update: {}", record.last_update()),
        BODY_SIZE,
        Mm(text_x + UPDATE_COL),
        Mm(baseline),
        &fonts.regular,
    );
    baseline -= BODY_STEP;

    layer.use_text("From:", BODY_SIZE, Mm(text_x), Mm(baseline), &fonts.regular);
    layer.use_text(
        truncate_chars(record.from_address(), ADDRESS_MAX_CHARS),
        BODY_SIZE,
        Mm(text_x + VALUE_COL),
        Mm(baseline),
        &fonts.regular,
    );
    baseline -= BODY_STEP;

    layer.use_text("To:", BODY_SIZE, Mm(text_x), Mm(baseline), &fonts.regular);
    layer.use_text(
        truncate_chars(record.to_address(), ADDRESS_MAX_CHARS),
        BODY_SIZE,
        Mm(text_x + VALUE_COL),
        Mm(baseline),
        &fonts.regular,
    );
    baseline -= BODY_STEP;

    layer.use_text(
        format!(
            "Recipient: {}",
            truncate_chars(record.recipient_name(), RECIPIENT_MAX_CHARS)
        ),
        BODY_SIZE,
        Mm(text_x),
        Mm(baseline),
        &fonts.regular,
    );

    // QR tile, inset from the card's top-right corner. The raster is square,
    // so one DPI value maps its pixel edge onto the configured mm edge.
    let qr_mm = config.qr_size.0;
    let qr_x = x + width - qr_mm - PAD;
    let qr_y = y_top - qr_mm - PAD;
    let dpi = qr.width() as f32 * 25.4 / qr_mm;

    let tile = Image::from_dynamic_image(&DynamicImage::ImageLuma8(qr.clone()));
    tile.add_to_layer(
        layer.clone(),
        ImageTransform {
            translate_x: Some(Mm(qr_x)),
            translate_y: Some(Mm(qr_y)),
            dpi: Some(dpi),
            ..Default::default()
        },
    );
}

/// Truncate to at most `max` characters, never splitting a code point.
fn truncate_chars(s: &str, max: usize) -> &str {
    match s.char_indices().nth(max) {
        Some((idx, _)) => &s[..idx],
        None => s,
    }
}
