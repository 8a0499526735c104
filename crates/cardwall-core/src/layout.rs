//! Masonry layout: the arrange pass and the nearest-slot search.
//!
//! Cards flow into gap-separated columns. A card whose `exact_position`
//! flag is set keeps its spot as long as it overlaps nothing and stays
//! inside the canvas; every other card drops into the currently-shortest
//! column. Running the pass twice over an unchanged board moves nothing.

use std::cmp::Ordering;

use kurbo::{Point, Size};

use crate::card::{Card, CardId};
use crate::geometry::{self, ColumnLayout, MASONRY_GAP};

/// Vertical tolerance for treating cards as part of the same row when
/// ordering a pass.
pub const ROW_TOLERANCE: f64 = 50.0;

/// Placement order: row by row, left to right.
///
/// Rows are 50 px bands, so cards that sit at slightly different heights in
/// one visual row still order by their x coordinate.
fn place_order(a: &Card, b: &Card) -> Ordering {
    let row_a = (a.y / ROW_TOLERANCE).floor();
    let row_b = (b.y / ROW_TOLERANCE).floor();
    row_a
        .total_cmp(&row_b)
        .then(a.x.total_cmp(&b.x))
        .then(a.y.total_cmp(&b.y))
}

/// Next slot y for a card spanning `[x, x + width)`: the top inset when all
/// spanned columns are empty, otherwise one gap below the tallest of them.
fn slot_y(heights: &[f64], layout: &ColumnLayout, x: f64, width: f64) -> f64 {
    let tallest = layout
        .spanned_columns(x, width)
        .map(|column| heights[column])
        .fold(MASONRY_GAP, f64::max);
    if tallest > MASONRY_GAP {
        tallest + MASONRY_GAP
    } else {
        MASONRY_GAP
    }
}

fn raise_spanned(heights: &mut [f64], layout: &ColumnLayout, x: f64, width: f64, bottom: f64) {
    for column in layout.spanned_columns(x, width) {
        heights[column] = heights[column].max(bottom);
    }
}

/// One arrange pass over the whole board.
///
/// Cards are visited row by row over a sorted index view; the slice order
/// (the board's z-order) is never touched. A card with a valid exact
/// position only feeds the column bookkeeping; everything else is placed in
/// the shortest column and marked exactly positioned. Overlap checks run
/// against the live list, so cards moved earlier in the pass are seen at
/// their new spots.
///
/// Returns the ids of cards whose position changed.
pub fn pack(cards: &mut [Card], canvas_width: f64, viewport_width: f64) -> Vec<CardId> {
    if cards.is_empty() || !canvas_width.is_finite() || canvas_width <= 0.0 {
        return Vec::new();
    }

    let layout = ColumnLayout::derive(canvas_width, viewport_width, cards);
    let mut heights = vec![MASONRY_GAP; layout.count];

    let mut order: Vec<usize> = (0..cards.len()).collect();
    order.sort_by(|&a, &b| place_order(&cards[a], &cards[b]));

    let mut moved = Vec::new();
    for index in order {
        let id = cards[index].id;
        let keeps_spot = cards[index].exact_position
            && !geometry::overlaps_any(cards, cards[index].bounds(), id)
            && cards[index].x + cards[index].width <= canvas_width + MASONRY_GAP;

        if keeps_spot {
            let card = &cards[index];
            raise_spanned(&mut heights, &layout, card.x, card.width, card.bottom());
            continue;
        }

        let column = geometry::shortest_column(&heights);
        let x = layout.column_x(column);
        let width = cards[index].width;
        let y = slot_y(&heights, &layout, x, width);

        let card = &mut cards[index];
        if card.x != x || card.y != y {
            moved.push(id);
        }
        card.x = x;
        card.y = y;
        card.exact_position = true;
        let bottom = card.bottom();
        raise_spanned(&mut heights, &layout, x, width, bottom);
    }

    if !moved.is_empty() {
        log::debug!(
            "masonry pass moved {} of {} cards across {} columns",
            moved.len(),
            cards.len(),
            layout.count
        );
    }
    moved
}

/// The slot the packer would give a card of `size`, ignoring `exclude`.
///
/// Builds column heights from every other card and returns the shortest
/// column's next slot. Mutates nothing; with no other cards or an
/// unmeasured canvas the starting point comes straight back, so the only
/// card on a board keeps its drop spot instead of snapping to the
/// top-left inset.
pub fn find_nearest_position(
    cards: &[Card],
    start: Point,
    size: Size,
    exclude: CardId,
    canvas_width: f64,
    viewport_width: f64,
) -> Point {
    if !canvas_width.is_finite() || canvas_width <= 0.0 {
        return start;
    }
    if cards.iter().all(|card| card.id == exclude) {
        return start;
    }

    let layout = ColumnLayout::derive(canvas_width, viewport_width, cards);
    let mut heights = vec![MASONRY_GAP; layout.count];
    for card in cards.iter().filter(|card| card.id != exclude) {
        raise_spanned(&mut heights, &layout, card.x, card.width, card.bottom());
    }

    let column = geometry::shortest_column(&heights);
    let x = layout.column_x(column);
    let y = slot_y(&heights, &layout, x, size.width);
    Point::new(x, y)
}
