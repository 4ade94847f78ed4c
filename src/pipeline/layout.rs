//! Layout: deal out card slots left-to-right, top-to-bottom, page by page.
//!
//! Coordinates are PDF-style with the origin at the page's bottom-left and
//! y growing upward, so rows walk DOWN the page by subtracting from y. A
//! slot records the card's top edge; the renderer derives baselines from it.
//!
//! The grid is fully determined by the config: card width is computed from
//! the page width, margins, gap and column count, so columns always span the
//! printable width exactly.

use crate::config::SheetConfig;
use printpdf::Mm;

/// Placement rectangle for one card. `y_top` is the top edge.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CardRect {
    pub x: Mm,
    pub y_top: Mm,
    pub width: Mm,
    pub height: Mm,
}

/// A card's position in the sheet: which page, and where on it.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CardSlot {
    pub page: usize,
    pub rect: CardRect,
}

/// Stateful slot dealer. Each [`next_slot`](GridLayout::next_slot) call
/// yields the next grid position and advances the cursor.
#[derive(Debug)]
pub struct GridLayout {
    margin: f32,
    page_top: f32,
    card_width: f32,
    card_height: f32,
    h_gap: f32,
    v_gap: f32,
    columns: usize,
    x: f32,
    y: f32,
    page: usize,
    placed: usize,
}

impl GridLayout {
    pub fn new(config: &SheetConfig) -> Self {
        let page_top = config.page_height.0 - config.margin.0;
        Self {
            margin: config.margin.0,
            page_top,
            card_width: config.card_width().0,
            card_height: config.card_height.0,
            h_gap: config.h_gap.0,
            v_gap: config.v_gap.0,
            columns: config.columns,
            x: config.margin.0,
            y: page_top,
            page: 0,
            placed: 0,
        }
    }

    /// Deal the next slot.
    ///
    /// The cursor may advance onto a fresh page after the last slot of a
    /// full sheet; pages are only real once a slot lands on them, so page
    /// counts come from the dealt slots, not from this cursor.
    pub fn next_slot(&mut self) -> CardSlot {
        let slot = CardSlot {
            page: self.page,
            rect: CardRect {
                x: Mm(self.x),
                y_top: Mm(self.y),
                width: Mm(self.card_width),
                height: Mm(self.card_height),
            },
        };

        self.placed += 1;
        if self.placed % self.columns == 0 {
            // Row full: carriage-return and walk down one row.
            self.x = self.margin;
            self.y -= self.card_height + self.v_gap;
            if self.y - self.card_height < self.margin {
                self.page += 1;
                self.y = self.page_top;
            }
        } else {
            self.x += self.card_width + self.h_gap;
        }

        slot
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::SheetConfig;

    fn slots(config: &SheetConfig, n: usize) -> Vec<CardSlot> {
        let mut layout = GridLayout::new(config);
        (0..n).map(|_| layout.next_slot()).collect()
    }

    #[test]
    fn first_row_positions_match_a4_defaults() {
        // A4 portrait, 15 mm margin, 2 columns, 10 mm gap: cards are 85 mm
        // wide at x = 15 and x = 110, top edge at 297 − 15 = 282.
        let config = SheetConfig::default();
        let s = slots(&config, 2);

        assert_eq!(s[0].rect.x, Mm(15.0));
        assert_eq!(s[0].rect.y_top, Mm(282.0));
        assert_eq!(s[0].rect.width, Mm(85.0));
        assert_eq!(s[0].rect.height, Mm(60.0));
        assert_eq!(s[1].rect.x, Mm(110.0));
        assert_eq!(s[1].rect.y_top, Mm(282.0));
    }

    #[test]
    fn rows_step_down_by_card_height_plus_gap() {
        let config = SheetConfig::default();
        let s = slots(&config, 6);

        assert_eq!(s[2].rect.x, Mm(15.0));
        assert_eq!(s[2].rect.y_top, Mm(207.0));
        assert_eq!(s[4].rect.y_top, Mm(132.0));
        assert!(s.iter().all(|slot| slot.page == 0));
    }

    #[test]
    fn seventh_card_opens_a_fresh_page_at_the_top() {
        let config = SheetConfig::default();
        let s = slots(&config, 7);

        assert_eq!(s[6].page, 1);
        assert_eq!(s[6].rect.x, Mm(15.0));
        assert_eq!(s[6].rect.y_top, Mm(282.0));
    }

    #[test]
    fn exact_fill_stays_on_one_page() {
        let config = SheetConfig::default();
        let s = slots(&config, 6);
        assert_eq!(s.last().map(|slot| slot.page), Some(0));
    }

    #[test]
    fn single_column_spans_the_printable_width() {
        let config = SheetConfig::builder()
            .columns(1)
            .build()
            .expect("valid config");
        let s = slots(&config, 2);

        assert_eq!(s[0].rect.width, Mm(180.0));
        assert_eq!(s[1].rect.x, Mm(15.0));
        assert_eq!(s[1].rect.y_top, Mm(207.0));
    }

    #[test]
    fn three_columns_share_the_row() {
        let config = SheetConfig::builder()
            .columns(3)
            .build()
            .expect("valid config");
        let s = slots(&config, 3);

        // (210 − 30 − 20) / 3 mm wide each.
        let width = s[0].rect.width.0;
        assert!((width - 160.0 / 3.0).abs() < 1e-4);
        assert_eq!(s[1].rect.x.0, 15.0 + width + 10.0);
        assert!(s.iter().all(|slot| slot.rect.y_top == Mm(282.0)));
    }

    #[test]
    fn short_page_breaks_after_every_row() {
        let config = SheetConfig::builder()
            .page_size(Mm(210.0), Mm(100.0))
            .card_height(Mm(60.0))
            .build()
            .expect("valid config");
        let s = slots(&config, 4);

        assert_eq!(s[0].page, 0);
        assert_eq!(s[1].page, 0);
        assert_eq!(s[2].page, 1);
        assert_eq!(s[2].rect.y_top, Mm(85.0));
        assert_eq!(s[3].page, 1);
    }
}
