//! Cardwall Core Library
//!
//! Platform-agnostic layout, gesture, and persistence logic for the
//! Cardwall dashboard canvas.

pub mod board;
pub mod card;
pub mod drag;
pub mod geometry;
pub mod gesture;
pub mod layout;
pub mod resize;
pub mod session;
pub mod storage;
pub mod surface;
pub mod viewport;

pub use board::Board;
pub use card::{Card, CardId, CardKind};
pub use drag::{DragUpdate, DropOutcome, SCROLL_EDGE, SCROLL_STEP};
pub use geometry::{ColumnLayout, rects_overlap, BASE_COLUMN_WIDTH, MASONRY_GAP, MOBILE_BREAKPOINT};
pub use gesture::{DragState, Gesture, ResizeState};
pub use layout::{find_nearest_position, pack, ROW_TOLERANCE};
pub use session::CanvasSession;
pub use surface::{Surface, TrackingSurface, Transition};
pub use viewport::Viewport;
