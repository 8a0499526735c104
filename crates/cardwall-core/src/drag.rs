//! Drag helpers: canvas clamping, edge auto-scroll, and drop outcomes.
//!
//! The session owns the gesture; these are the pure pieces it leans on for
//! every pointer move and for reporting what a move or drop did.

use kurbo::{Point, Size, Vec2};

use crate::card::CardId;
use crate::viewport::Viewport;

/// Depth of the auto-scroll band along each window edge.
pub const SCROLL_EDGE: f64 = 80.0;

/// Scroll requested per pointer-move event while inside an edge band.
pub const SCROLL_STEP: f64 = 15.0;

/// Clamp a card's top-left corner so the card stays on the canvas.
pub fn clamp_to_canvas(position: Point, card: Size, canvas: Size) -> Point {
    let max_x = (canvas.width - card.width).max(0.0);
    let max_y = (canvas.height - card.height).max(0.0);
    Point::new(position.x.clamp(0.0, max_x), position.y.clamp(0.0, max_y))
}

/// Scroll to request for a pointer at `pointer` (canvas coordinates).
///
/// The axes are independent, so a pointer in a corner scrolls both.
/// Negative components scroll up or left, capped so the window never
/// scrolls past the canvas origin. Zero outside the edge bands.
pub fn edge_scroll(pointer: Point, viewport: &Viewport) -> Vec2 {
    let local = viewport.to_window(pointer);
    let x = if local.x < SCROLL_EDGE {
        -SCROLL_STEP.min(viewport.scroll.x)
    } else if local.x > viewport.window.width - SCROLL_EDGE {
        SCROLL_STEP
    } else {
        0.0
    };
    let y = if local.y < SCROLL_EDGE {
        -SCROLL_STEP.min(viewport.scroll.y)
    } else if local.y > viewport.window.height - SCROLL_EDGE {
        SCROLL_STEP
    } else {
        0.0
    };
    Vec2::new(x, y)
}

/// What one drag move produced.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DragUpdate {
    /// Tracked card position after clamping and scroll compensation.
    pub position: Point,
    /// Scroll the host should apply (see [`edge_scroll`]).
    pub scroll_by: Vec2,
    /// Card under the pointer, if any.
    pub hover_target: Option<CardId>,
}

/// How a drop resolved.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum DropOutcome {
    /// Exchanged positions with the hovered card.
    Swapped { with: CardId },
    /// Release overlapped another card; committed the nearest open slot.
    Snapped { to: Point },
    /// Committed at the release position.
    InPlace { at: Point },
}

#[cfg(test)]
mod tests {
    use super::*;

    fn viewport(scroll: Vec2) -> Viewport {
        Viewport::new(
            Size::new(3000.0, 3000.0),
            Size::new(1280.0, 800.0),
            scroll,
        )
    }

    #[test]
    fn test_clamp_keeps_interior_positions() {
        let p = clamp_to_canvas(
            Point::new(400.0, 300.0),
            Size::new(300.0, 143.0),
            Size::new(1280.0, 3000.0),
        );
        assert_eq!(p, Point::new(400.0, 300.0));
    }

    #[test]
    fn test_clamp_stops_at_canvas_edges() {
        let card = Size::new(300.0, 143.0);
        let canvas = Size::new(1280.0, 3000.0);
        let p = clamp_to_canvas(Point::new(-40.0, -10.0), card, canvas);
        assert_eq!(p, Point::ZERO);

        let p = clamp_to_canvas(Point::new(2000.0, 5000.0), card, canvas);
        assert_eq!(p, Point::new(980.0, 2857.0));
    }

    #[test]
    fn test_clamp_pins_oversized_card_to_origin() {
        let p = clamp_to_canvas(
            Point::new(100.0, 100.0),
            Size::new(2000.0, 4000.0),
            Size::new(1280.0, 3000.0),
        );
        assert_eq!(p, Point::ZERO);
    }

    #[test]
    fn test_edge_scroll_idle_in_the_middle() {
        let v = viewport(Vec2::new(0.0, 600.0));
        assert_eq!(edge_scroll(Point::new(400.0, 1000.0), &v), Vec2::ZERO);
    }

    #[test]
    fn test_edge_scroll_down_near_bottom() {
        let v = viewport(Vec2::new(0.0, 600.0));
        // Window spans canvas y 600..1400; 1350 is inside the bottom band.
        assert_eq!(
            edge_scroll(Point::new(400.0, 1350.0), &v),
            Vec2::new(0.0, SCROLL_STEP)
        );
    }

    #[test]
    fn test_edge_scroll_up_near_top() {
        let v = viewport(Vec2::new(0.0, 600.0));
        assert_eq!(
            edge_scroll(Point::new(400.0, 620.0), &v),
            Vec2::new(0.0, -SCROLL_STEP)
        );
    }

    #[test]
    fn test_edge_scroll_up_capped_by_remaining_scroll() {
        let v = viewport(Vec2::new(0.0, 6.0));
        assert_eq!(edge_scroll(Point::new(400.0, 10.0), &v), Vec2::new(0.0, -6.0));
    }

    #[test]
    fn test_edge_scroll_up_at_scroll_top_is_zero() {
        let v = viewport(Vec2::ZERO);
        assert_eq!(edge_scroll(Point::new(400.0, 10.0), &v), Vec2::ZERO);
    }

    #[test]
    fn test_edge_scroll_right_near_right_edge() {
        let v = viewport(Vec2::new(300.0, 600.0));
        // Window spans canvas x 300..1580; 1550 is inside the right band.
        assert_eq!(
            edge_scroll(Point::new(1550.0, 1000.0), &v),
            Vec2::new(SCROLL_STEP, 0.0)
        );
    }

    #[test]
    fn test_edge_scroll_left_capped_by_remaining_scroll() {
        let v = viewport(Vec2::new(8.0, 600.0));
        assert_eq!(edge_scroll(Point::new(18.0, 1000.0), &v), Vec2::new(-8.0, 0.0));
    }

    #[test]
    fn test_edge_scroll_left_at_scroll_origin_is_zero() {
        let v = viewport(Vec2::new(0.0, 600.0));
        assert_eq!(edge_scroll(Point::new(10.0, 1000.0), &v), Vec2::ZERO);
    }

    #[test]
    fn test_edge_scroll_in_a_corner_hits_both_axes() {
        let v = viewport(Vec2::new(300.0, 600.0));
        // Bottom-right corner of the window: both bands fire at once.
        assert_eq!(
            edge_scroll(Point::new(1550.0, 1350.0), &v),
            Vec2::new(SCROLL_STEP, SCROLL_STEP)
        );
    }
}
