//! Resize helpers: the size floor and the pointer-delta rule.

use kurbo::{Size, Vec2};

/// Smallest width a resize can commit.
pub const MIN_WIDTH: f64 = 200.0;

/// Smallest height a resize can commit.
pub const MIN_HEIGHT: f64 = 150.0;

/// Size after dragging the handle by `delta` from a grab at `start`.
///
/// Both axes are floored independently; per-kind default sizes may sit below
/// the floor, but a resize can never go there.
pub fn resized(start: Size, delta: Vec2) -> Size {
    Size::new(
        (start.width + delta.x).max(MIN_WIDTH),
        (start.height + delta.y).max(MIN_HEIGHT),
    )
}
