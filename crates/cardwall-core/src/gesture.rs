//! The single active-gesture slot.
//!
//! The session holds exactly one [`Gesture`] value, so a drag and a resize
//! can never run at the same time and a second drag cannot start over a
//! first. Controllers read and write the state through the session.

use kurbo::{Point, Size, Vec2};

use crate::card::CardId;

/// Live state of a drag in progress.
#[derive(Debug, Clone, PartialEq)]
pub struct DragState {
    /// Card being dragged.
    pub id: CardId,
    /// Pointer-to-corner offset captured at grab time.
    pub grab_offset: Vec2,
    /// Position the card held before the drag started.
    pub origin: Point,
    /// Last tracked position (clamped and scroll-compensated).
    pub position: Point,
    /// Card currently under the pointer, if any.
    pub hover: Option<CardId>,
}

/// Live state of a resize in progress.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ResizeState {
    /// Card being resized.
    pub id: CardId,
    /// Pointer position at the handle grab.
    pub start_pointer: Point,
    /// Card size at the handle grab.
    pub start_size: Size,
}

/// What the pointer is currently doing to the board.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum Gesture {
    #[default]
    Idle,
    Dragging(DragState),
    Resizing(ResizeState),
}

impl Gesture {
    pub fn is_idle(&self) -> bool {
        matches!(self, Gesture::Idle)
    }

    pub fn is_dragging(&self) -> bool {
        matches!(self, Gesture::Dragging(_))
    }

    pub fn is_resizing(&self) -> bool {
        matches!(self, Gesture::Resizing(_))
    }

    /// The card the active gesture holds, if any.
    pub fn active_card(&self) -> Option<CardId> {
        match self {
            Gesture::Idle => None,
            Gesture::Dragging(state) => Some(state.id),
            Gesture::Resizing(state) => Some(state.id),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_gesture_is_idle() {
        let gesture = Gesture::default();
        assert!(gesture.is_idle());
        assert_eq!(gesture.active_card(), None);
    }

    #[test]
    fn test_active_card_per_variant() {
        let id = CardId::from_raw(7);
        let dragging = Gesture::Dragging(DragState {
            id,
            grab_offset: Vec2::new(4.0, 4.0),
            origin: Point::ZERO,
            position: Point::ZERO,
            hover: None,
        });
        assert!(dragging.is_dragging());
        assert_eq!(dragging.active_card(), Some(id));

        let resizing = Gesture::Resizing(ResizeState {
            id,
            start_pointer: Point::ZERO,
            start_size: Size::new(300.0, 143.0),
        });
        assert!(resizing.is_resizing());
        assert_eq!(resizing.active_card(), Some(id));
    }
}
