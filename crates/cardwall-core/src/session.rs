//! Board, surface, and the one gesture slot under a single owner.
//!
//! `CanvasSession` sequences everything the host cannot be trusted to order
//! itself: structural edits run the arrange pass, drags block the packer
//! until they resolve, viewport resizes coalesce into one debounced repack,
//! and every commit flips the dirty flag persistence drains.

use std::mem;

use kurbo::{Point, Rect, Size};

#[cfg(not(target_arch = "wasm32"))]
use std::time::{Duration, Instant};

#[cfg(target_arch = "wasm32")]
use web_time::{Duration, Instant};

use crate::board::Board;
use crate::card::{CardId, CardKind};
use crate::drag::{self, DragUpdate, DropOutcome};
use crate::geometry;
use crate::gesture::{DragState, Gesture, ResizeState};
use crate::layout;
use crate::resize;
use crate::surface::{Surface, Transition};
use crate::viewport::Viewport;

/// Quiet window after the last viewport-resize notification before the
/// coalesced repack fires.
pub const VIEWPORT_REPACK_DEBOUNCE_MS: u64 = 250;

/// One-shot deadline for coalescing viewport repacks.
#[derive(Debug, Default)]
struct Debounce {
    deadline: Option<Instant>,
}

impl Debounce {
    fn trigger(&mut self, window: Duration) {
        self.deadline = Some(Instant::now() + window);
    }

    fn is_pending(&self) -> bool {
        self.deadline.is_some()
    }

    fn is_due(&self) -> bool {
        self.deadline
            .is_some_and(|deadline| Instant::now() >= deadline)
    }

    fn clear(&mut self) {
        self.deadline = None;
    }
}

/// Owns a board, drives a surface, and holds the single active gesture.
pub struct CanvasSession<S: Surface> {
    board: Board,
    surface: S,
    gesture: Gesture,
    resize_repack: Debounce,
    dirty: bool,
}

impl<S: Surface> CanvasSession<S> {
    /// Start a session over a fresh empty board.
    pub fn new(surface: S) -> Self {
        Self::with_board(Board::new(), surface)
    }

    /// Adopt an existing board, mounting every card on the surface.
    pub fn with_board(board: Board, surface: S) -> Self {
        let mut session = Self {
            board,
            surface,
            gesture: Gesture::default(),
            resize_repack: Debounce::default(),
            dirty: false,
        };
        for card in session.board.cards() {
            session.surface.mount(card);
        }
        session
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }

    pub fn gesture(&self) -> &Gesture {
        &self.gesture
    }

    /// True when there are committed changes persistence has not drained.
    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    /// Persistence took a snapshot of the board.
    pub fn mark_clean(&mut self) {
        self.dirty = false;
    }

    /// Canvas height the host should reserve for the current viewport.
    pub fn content_height(&self, viewport: &Viewport) -> f64 {
        self.board.content_height(viewport.window.height)
    }

    /// Run one arrange pass and mirror every move to the surface.
    ///
    /// Refused while a drag is in progress; the post-drop safety pass picks
    /// up whatever the drag disturbed. Returns true when a card moved.
    pub fn pack(&mut self, viewport: &Viewport) -> bool {
        if self.gesture.is_dragging() {
            return false;
        }
        let moved = layout::pack(
            self.board.cards_mut(),
            viewport.canvas.width,
            viewport.window.width,
        );
        for id in &moved {
            if let Some(card) = self.board.card(*id) {
                self.surface.update(*id, card.bounds(), Transition::Smooth);
            }
        }
        if moved.is_empty() {
            false
        } else {
            self.dirty = true;
            true
        }
    }

    /// Create a card and run the arrange pass that gives it a slot.
    pub fn create_card(
        &mut self,
        kind: CardKind,
        position: Option<Point>,
        viewport: &Viewport,
    ) -> CardId {
        let id = self.board.create_card(kind, position, None);
        if let Some(card) = self.board.card(id) {
            self.surface.mount(card);
        }
        self.pack(viewport);
        self.dirty = true;
        id
    }

    /// Delete a card, free the rest, and re-flow the board.
    pub fn delete_card(&mut self, id: CardId, viewport: &Viewport) -> bool {
        // Untangle the gesture before the card disappears under it.
        if self.gesture.active_card() == Some(id) {
            self.gesture = Gesture::Idle;
            self.surface.set_lifted(id, false);
            self.surface.set_drop_target(None);
        } else if let Gesture::Dragging(state) = &mut self.gesture {
            if state.hover == Some(id) {
                state.hover = None;
                self.surface.set_drop_target(None);
            }
        }

        let Some(card) = self.board.remove_card(id) else {
            return false;
        };
        self.surface.unmount(card.id);
        self.pack(viewport);
        self.dirty = true;
        true
    }

    /// Replace a card's content. Marks the session dirty on success.
    pub fn update_content(&mut self, id: CardId, content: &str) -> bool {
        if self.board.update_content(id, content) {
            self.dirty = true;
            true
        } else {
            false
        }
    }

    /// Start dragging a card. Refused unless the session is idle and the
    /// card exists.
    pub fn begin_drag(&mut self, id: CardId, pointer: Point) -> bool {
        if !self.gesture.is_idle() {
            return false;
        }
        let Some(card) = self.board.card(id) else {
            return false;
        };
        let origin = card.origin();
        self.gesture = Gesture::Dragging(DragState {
            id,
            grab_offset: pointer - origin,
            origin,
            position: origin,
            hover: None,
        });
        self.surface.set_lifted(id, true);
        log::trace!("drag begin on card {id}");
        true
    }

    /// Track a pointer move. Returns what the host should apply, or None
    /// when no drag is active.
    ///
    /// The tracked position is the pointer minus the grab offset, clamped to
    /// the canvas and then compensated by any edge auto-scroll so the card
    /// stays under the pointer while the page moves. The drop indicator is
    /// only touched when the hover target changes.
    pub fn drag_to(&mut self, pointer: Point, viewport: &Viewport) -> Option<DragUpdate> {
        let Gesture::Dragging(state) = &mut self.gesture else {
            return None;
        };
        let card = self.board.card(state.id)?;
        let size = card.size();

        let raw = pointer - state.grab_offset;
        let clamped = drag::clamp_to_canvas(raw, size, viewport.canvas);
        let scroll_by = drag::edge_scroll(pointer, viewport);
        let position = clamped + scroll_by;
        state.position = position;

        let hover = self.surface.card_at(pointer, state.id);
        if hover != state.hover {
            state.hover = hover;
            self.surface.set_drop_target(hover);
        }

        let id = state.id;
        self.surface
            .update(id, Rect::from_origin_size(position, size), Transition::None);
        Some(DragUpdate {
            position,
            scroll_by,
            hover_target: hover,
        })
    }

    /// Resolve the drop: swap with the hovered card, snap off an overlapping
    /// release, or commit in place. Always ends with a safety arrange pass.
    pub fn finish_drag(&mut self, viewport: &Viewport) -> Option<DropOutcome> {
        let state = match mem::take(&mut self.gesture) {
            Gesture::Dragging(state) => state,
            other => {
                self.gesture = other;
                return None;
            }
        };

        self.surface.set_lifted(state.id, false);
        self.surface.set_drop_target(None);

        let size = self.board.card(state.id)?.size();
        let target = state
            .hover
            .filter(|target| self.board.card(*target).is_some());

        let outcome = if let Some(target_id) = target {
            // The target inherits the dragged card's pre-drag origin.
            let target_origin = {
                let target = self.board.card_mut(target_id)?;
                let origin = target.origin();
                target.set_origin(state.origin);
                target.exact_position = true;
                origin
            };
            if let Some(target) = self.board.card(target_id) {
                self.surface
                    .update(target_id, target.bounds(), Transition::Smooth);
            }
            self.commit_drop(state.id, target_origin);
            DropOutcome::Swapped { with: target_id }
        } else {
            let rect = Rect::from_origin_size(state.position, size);
            if geometry::overlaps_any(self.board.cards(), rect, state.id) {
                let slot = layout::find_nearest_position(
                    self.board.cards(),
                    state.position,
                    size,
                    state.id,
                    viewport.canvas.width,
                    viewport.window.width,
                );
                self.commit_drop(state.id, slot);
                DropOutcome::Snapped { to: slot }
            } else {
                self.commit_drop(state.id, state.position);
                DropOutcome::InPlace {
                    at: state.position,
                }
            }
        };

        self.pack(viewport);
        self.dirty = true;
        log::trace!("drag finished: {outcome:?}");
        Some(outcome)
    }

    fn commit_drop(&mut self, id: CardId, position: Point) {
        if let Some(card) = self.board.card_mut(id) {
            card.set_origin(position);
            card.exact_position = true;
            let bounds = card.bounds();
            self.surface.update(id, bounds, Transition::Smooth);
        }
    }

    /// Start resizing a card from its handle. Refused unless idle.
    pub fn begin_resize(&mut self, id: CardId, pointer: Point) -> bool {
        if !self.gesture.is_idle() {
            return false;
        }
        let Some(card) = self.board.card(id) else {
            return false;
        };
        self.gesture = Gesture::Resizing(ResizeState {
            id,
            start_pointer: pointer,
            start_size: card.size(),
        });
        log::trace!("resize begin on card {id}");
        true
    }

    /// Track a resize move, writing the floored size onto the live card.
    pub fn resize_to(&mut self, pointer: Point) -> Option<Size> {
        let Gesture::Resizing(state) = &self.gesture else {
            return None;
        };
        let state = *state;

        let delta = pointer - state.start_pointer;
        let size = resize::resized(state.start_size, delta);
        let card = self.board.card_mut(state.id)?;
        card.width = size.width;
        card.height = size.height;
        let bounds = card.bounds();
        self.surface.update(state.id, bounds, Transition::None);
        Some(size)
    }

    /// Commit the resize: pin the size, keep the position. No arrange pass
    /// runs; overlaps produced by growth persist until the next pack
    /// trigger.
    pub fn finish_resize(&mut self) -> Option<Size> {
        let state = match mem::take(&mut self.gesture) {
            Gesture::Resizing(state) => state,
            other => {
                self.gesture = other;
                return None;
            }
        };
        let card = self.board.card_mut(state.id)?;
        card.exact_position = true;
        let size = card.size();
        self.dirty = true;
        log::trace!("resize finished on card {}", state.id);
        Some(size)
    }

    /// Force-resolve the active gesture as if the pointer came up at the
    /// last tracked position. Hosts call this on window blur or visibility
    /// loss so a lost pointer-up cannot strand a lifted card.
    pub fn interrupt_gesture(&mut self, viewport: &Viewport) -> bool {
        match self.gesture {
            Gesture::Dragging(_) => self.finish_drag(viewport).is_some(),
            Gesture::Resizing(_) => self.finish_resize().is_some(),
            Gesture::Idle => false,
        }
    }

    /// Note a viewport resize. The repack itself happens on a later
    /// [`tick`](Self::tick) once notifications stop for the debounce window.
    pub fn notify_viewport_resized(&mut self) {
        self.resize_repack
            .trigger(Duration::from_millis(VIEWPORT_REPACK_DEBOUNCE_MS));
    }

    /// Fire the pending viewport repack once its window has elapsed. A drag
    /// in progress keeps the repack pending instead of dropping it.
    pub fn tick(&mut self, viewport: &Viewport) -> bool {
        if !self.resize_repack.is_due() {
            return false;
        }
        if self.gesture.is_dragging() {
            return false;
        }
        self.resize_repack.clear();
        self.pack(viewport)
    }

    pub fn has_pending_repack(&self) -> bool {
        self.resize_repack.is_pending()
    }
}
