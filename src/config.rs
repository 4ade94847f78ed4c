//! Configuration types for receipt-sheet rendering.
//!
//! All rendering behaviour is controlled through [`SheetConfig`], built via
//! its [`SheetConfigBuilder`]. The layout engine and the card renderer read
//! every knob from here rather than from module-level constants, so an
//! alternate geometry is one builder call away in a test.
//!
//! All lengths are millimeters ([`printpdf::Mm`]); font sizes inside the
//! renderer are points.

use crate::error::Track2PdfError;
use crate::pipeline::enrich::{PlaceholderResolver, TrackingResolver};
use crate::progress::ProgressCallback;
use printpdf::Mm;
use std::fmt;
use std::sync::Arc;

/// Configuration for one CSV-to-PDF run.
///
/// Built via [`SheetConfig::builder()`] or [`SheetConfig::default()`].
/// Defaults reproduce the stock A4 sheet: 2 columns × 3 rows of
/// 85 mm × 60 mm cards.
///
/// # Example
/// ```rust
/// use track2pdf::SheetConfig;
///
/// let config = SheetConfig::builder()
///     .columns(3)
///     .qr_module_px(4)
///     .title("Outbound parcels")
///     .build()
///     .unwrap();
/// ```
#[derive(Clone)]
pub struct SheetConfig {
    /// Page width. Default: 210 mm (ISO A4 portrait).
    pub page_width: Mm,

    /// Page height. Default: 297 mm (ISO A4 portrait).
    pub page_height: Mm,

    /// Uniform page margin on all four sides. Default: 15 mm.
    ///
    /// The first card row starts at `page_height − margin`; a row only fits
    /// while its top edge stays at least `margin + card_height` above zero.
    pub margin: Mm,

    /// Cards per row. Range: 1–6. Default: 2.
    ///
    /// Card width is derived, not configured:
    /// `(page_width − 2·margin − (columns−1)·h_gap) / columns`.
    pub columns: usize,

    /// Card height. Default: 60 mm.
    pub card_height: Mm,

    /// Horizontal gap between columns. Default: 10 mm.
    pub h_gap: Mm,

    /// Vertical gap between rows. Default: 15 mm.
    pub v_gap: Mm,

    /// Pixels per QR module in the rasterized symbol. Range: 1–16. Default: 3.
    ///
    /// Only affects raster resolution; the drawn size on the card is
    /// `qr_size` regardless.
    pub qr_module_px: u32,

    /// Drawn size of the (square) QR bitmap on the card. Default: 16 mm.
    pub qr_size: Mm,

    /// PDF document title metadata. Default: "Shipment Tracking Receipts".
    pub title: String,

    /// Metadata lookup collaborator. Default: [`PlaceholderResolver`].
    ///
    /// Swap in a real carrier lookup without touching layout or render code;
    /// fields present in the input row still take precedence over whatever
    /// the resolver returns.
    pub resolver: Arc<dyn TrackingResolver>,

    /// Per-card event sink. Default: none.
    pub progress_callback: Option<ProgressCallback>,
}

impl Default for SheetConfig {
    fn default() -> Self {
        Self {
            page_width: Mm(210.0),
            page_height: Mm(297.0),
            margin: Mm(15.0),
            columns: 2,
            card_height: Mm(60.0),
            h_gap: Mm(10.0),
            v_gap: Mm(15.0),
            qr_module_px: 3,
            qr_size: Mm(16.0),
            title: "Shipment Tracking Receipts".to_string(),
            resolver: Arc::new(PlaceholderResolver),
            progress_callback: None,
        }
    }
}

impl fmt::Debug for SheetConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SheetConfig")
            .field("page_width", &self.page_width)
            .field("page_height", &self.page_height)
            .field("margin", &self.margin)
            .field("columns", &self.columns)
            .field("card_height", &self.card_height)
            .field("h_gap", &self.h_gap)
            .field("v_gap", &self.v_gap)
            .field("qr_module_px", &self.qr_module_px)
            .field("qr_size", &self.qr_size)
            .field("title", &self.title)
            .field("resolver", &"<dyn TrackingResolver>")
            .field(
                "progress_callback",
                &self.progress_callback.as_ref().map(|_| "<dyn RenderProgressCallback>"),
            )
            .finish()
    }
}

impl SheetConfig {
    /// Create a new builder for `SheetConfig`.
    pub fn builder() -> SheetConfigBuilder {
        SheetConfigBuilder {
            config: Self::default(),
        }
    }

    /// Width of one card, derived from page width, margins, columns, and gaps.
    pub fn card_width(&self) -> Mm {
        let cols = self.columns as f32;
        Mm((self.page_width.0 - 2.0 * self.margin.0 - (cols - 1.0) * self.h_gap.0) / cols)
    }
}

/// Builder for [`SheetConfig`].
#[derive(Debug)]
pub struct SheetConfigBuilder {
    config: SheetConfig,
}

impl SheetConfigBuilder {
    /// Override the page size (defaults to A4 portrait).
    pub fn page_size(mut self, width: Mm, height: Mm) -> Self {
        self.config.page_width = width;
        self.config.page_height = height;
        self
    }

    pub fn margin(mut self, margin: Mm) -> Self {
        self.config.margin = margin;
        self
    }

    pub fn columns(mut self, n: usize) -> Self {
        self.config.columns = n.clamp(1, 6);
        self
    }

    pub fn card_height(mut self, height: Mm) -> Self {
        self.config.card_height = height;
        self
    }

    pub fn h_gap(mut self, gap: Mm) -> Self {
        self.config.h_gap = gap;
        self
    }

    pub fn v_gap(mut self, gap: Mm) -> Self {
        self.config.v_gap = gap;
        self
    }

    pub fn qr_module_px(mut self, px: u32) -> Self {
        self.config.qr_module_px = px.clamp(1, 16);
        self
    }

    pub fn qr_size(mut self, size: Mm) -> Self {
        self.config.qr_size = size;
        self
    }

    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.config.title = title.into();
        self
    }

    pub fn resolver(mut self, resolver: Arc<dyn TrackingResolver>) -> Self {
        self.config.resolver = resolver;
        self
    }

    pub fn progress_callback(mut self, callback: ProgressCallback) -> Self {
        self.config.progress_callback = Some(callback);
        self
    }

    /// Build the configuration, validating geometric constraints.
    pub fn build(self) -> Result<SheetConfig, Track2PdfError> {
        let c = &self.config;
        if c.margin.0 < 0.0 || c.h_gap.0 < 0.0 || c.v_gap.0 < 0.0 {
            return Err(Track2PdfError::InvalidConfig(
                "margins and gaps must be non-negative".into(),
            ));
        }
        let width = c.card_width();
        if width.0 <= 0.0 {
            return Err(Track2PdfError::InvalidConfig(format!(
                "card width works out to {:.1} mm; reduce margins, gaps, or columns",
                width.0
            )));
        }
        if 2.0 * c.margin.0 + c.card_height.0 > c.page_height.0 {
            return Err(Track2PdfError::InvalidConfig(format!(
                "one {:.0} mm card row does not fit a {:.0} mm page inside {:.0} mm margins",
                c.card_height.0, c.page_height.0, c.margin.0
            )));
        }
        Ok(self.config)
    }
}
