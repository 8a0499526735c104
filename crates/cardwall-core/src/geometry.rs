//! Rectangle and column math for the masonry canvas.

use kurbo::Rect;

use crate::card::{Card, CardId};

/// Gap between cards and between cards and the canvas edges.
pub const MASONRY_GAP: f64 = 12.0;

/// Base column width before the canvas-fit adjustment.
pub const BASE_COLUMN_WIDTH: f64 = 280.0;

/// Viewport width below which the layout collapses to a single column.
pub const MOBILE_BREAKPOINT: f64 = 768.0;

/// Strict axis-aligned overlap test.
///
/// Every comparison is strict, so rectangles that only touch at an edge or
/// corner do not overlap. A zero-area rectangle on another's boundary
/// overlaps nothing; strictly inside, it counts as an overlap.
pub fn rects_overlap(a: Rect, b: Rect) -> bool {
    a.x0 < b.x1 && a.x1 > b.x0 && a.y0 < b.y1 && a.y1 > b.y0
}

/// True if `rect` overlaps any card other than `exclude`.
pub fn overlaps_any(cards: &[Card], rect: Rect, exclude: CardId) -> bool {
    cards
        .iter()
        .any(|card| card.id != exclude && rects_overlap(rect, card.bounds()))
}

/// Index of the shortest column, lowest index on ties.
pub fn shortest_column(heights: &[f64]) -> usize {
    let mut best = 0;
    for (index, &height) in heights.iter().enumerate().skip(1) {
        if height < heights[best] {
            best = index;
        }
    }
    best
}

/// Column grid derived from the canvas width and the current card set.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ColumnLayout {
    /// Number of columns, always at least one.
    pub count: usize,
    /// Width of each column.
    pub column_width: f64,
}

impl ColumnLayout {
    /// Derive the column grid for a canvas.
    ///
    /// The base column width is the larger of [`BASE_COLUMN_WIDTH`] and the
    /// narrowest card, so a board of uniformly wide cards gets columns they
    /// fit in. Below [`MOBILE_BREAKPOINT`] the viewport collapses the grid
    /// to a single full-width column.
    pub fn derive(canvas_width: f64, viewport_width: f64, cards: &[Card]) -> Self {
        let narrowest = cards
            .iter()
            .map(|card| card.width)
            .fold(f64::INFINITY, f64::min);
        let base = if viewport_width < MOBILE_BREAKPOINT {
            canvas_width - 2.0 * MASONRY_GAP
        } else if narrowest.is_finite() {
            narrowest.max(BASE_COLUMN_WIDTH)
        } else {
            BASE_COLUMN_WIDTH
        };

        let usable = canvas_width - 2.0 * MASONRY_GAP;
        let raw = (usable / (base + MASONRY_GAP)).floor();
        let count = if raw.is_finite() && raw >= 1.0 {
            raw as usize
        } else {
            1
        };
        let column_width = (canvas_width - (count as f64 + 1.0) * MASONRY_GAP) / count as f64;

        Self {
            count,
            column_width,
        }
    }

    /// Left edge of column `index`.
    pub fn column_x(&self, index: usize) -> f64 {
        MASONRY_GAP + index as f64 * (self.column_width + MASONRY_GAP)
    }

    /// Column whose slot an x coordinate belongs to, clamped to the grid.
    pub fn column_at(&self, x: f64) -> usize {
        let raw = ((x - MASONRY_GAP) / (self.column_width + MASONRY_GAP)).floor();
        if raw.is_finite() && raw >= 0.0 {
            (raw as usize).min(self.count - 1)
        } else {
            0
        }
    }

    /// Columns whose strip intersects the horizontal extent
    /// `[x, x + width)`.
    ///
    /// Each strip is widened by the gap on both sides. That way two cards
    /// that overlap horizontally always share at least one column, even when
    /// their common ground falls inside a gap, which is what lets column
    /// bookkeeping stand in for full overlap tracking.
    pub fn spanned_columns(&self, x: f64, width: f64) -> impl Iterator<Item = usize> + '_ {
        let right = x + width;
        (0..self.count).filter(move |&index| {
            let strip_left = self.column_x(index) - MASONRY_GAP;
            let strip_right = self.column_x(index) + self.column_width + MASONRY_GAP;
            strip_left < right && x < strip_right
        })
    }
}
