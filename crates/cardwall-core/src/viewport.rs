//! Host-supplied canvas and window measurements.

use kurbo::{Point, Rect, Size, Vec2};

/// A snapshot of the host's canvas and window measurements.
///
/// The canvas is the full card area; the window is the part of it currently
/// on screen, offset by the scroll position. Hosts build a fresh snapshot for
/// every drag move and every pack call, so the core never works from stale
/// measurements.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    /// Full canvas size in CSS pixels.
    pub canvas: Size,
    /// Visible window size.
    pub window: Size,
    /// Scroll offset of the window over the canvas.
    pub scroll: Vec2,
}

impl Default for Viewport {
    fn default() -> Self {
        Self {
            canvas: Size::ZERO,
            window: Size::ZERO,
            scroll: Vec2::ZERO,
        }
    }
}

impl Viewport {
    pub fn new(canvas: Size, window: Size, scroll: Vec2) -> Self {
        Self {
            canvas,
            window,
            scroll,
        }
    }

    /// The window rectangle in canvas coordinates.
    pub fn visible_rect(&self) -> Rect {
        Rect::from_origin_size(Point::new(self.scroll.x, self.scroll.y), self.window)
    }

    /// Convert a canvas point into window coordinates.
    pub fn to_window(&self, point: Point) -> Point {
        point - self.scroll
    }
}
