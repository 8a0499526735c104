//! The rendering sink the session drives.
//!
//! The core never draws. It tells a [`Surface`] what changed (mounts,
//! rectangle updates, lift and drop-target affordances) and asks it for hit
//! tests against what is actually on screen. Hosts adapt this to the DOM or
//! a widget tree; [`TrackingSurface`] is a complete in-memory implementation
//! for tests and headless use.

use kurbo::{Point, Rect};

use crate::card::{Card, CardId};

/// How a rectangle update should be applied.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Transition {
    /// Apply immediately, no animation.
    #[default]
    None,
    /// Animate from the current rectangle into the new one.
    Smooth,
}

/// Rendering collaborator interface.
///
/// Mount order is z-order: the card mounted last sits on top. Hit tests
/// answer with the topmost card under the point.
pub trait Surface {
    /// A card entered the board.
    fn mount(&mut self, card: &Card);

    /// A card's on-screen rectangle changed.
    fn update(&mut self, id: CardId, rect: Rect, transition: Transition);

    /// A card left the board.
    fn unmount(&mut self, id: CardId);

    /// Topmost card whose rectangle contains `point`, skipping `exclude`.
    fn card_at(&self, point: Point, exclude: CardId) -> Option<CardId>;

    /// Raise or drop the drag affordance on a card.
    fn set_lifted(&mut self, id: CardId, lifted: bool);

    /// Show the drop indicator over `target`, or hide it with `None`.
    fn set_drop_target(&mut self, target: Option<CardId>);
}

/// In-memory surface that records rectangles and answers hit tests.
#[derive(Debug, Default)]
pub struct TrackingSurface {
    rects: Vec<(CardId, Rect)>,
    lifted: Option<CardId>,
    drop_target: Option<CardId>,
}

impl TrackingSurface {
    pub fn new() -> Self {
        Self::default()
    }

    /// The rectangle last reported for a card, if it is mounted.
    pub fn rect_of(&self, id: CardId) -> Option<Rect> {
        self.rects
            .iter()
            .find(|(card_id, _)| *card_id == id)
            .map(|(_, rect)| *rect)
    }

    pub fn mounted_count(&self) -> usize {
        self.rects.len()
    }

    pub fn lifted(&self) -> Option<CardId> {
        self.lifted
    }

    pub fn drop_target(&self) -> Option<CardId> {
        self.drop_target
    }
}

impl Surface for TrackingSurface {
    fn mount(&mut self, card: &Card) {
        self.rects.push((card.id, card.bounds()));
    }

    fn update(&mut self, id: CardId, rect: Rect, _transition: Transition) {
        if let Some(entry) = self.rects.iter_mut().find(|(card_id, _)| *card_id == id) {
            entry.1 = rect;
        }
    }

    fn unmount(&mut self, id: CardId) {
        self.rects.retain(|(card_id, _)| *card_id != id);
        if self.lifted == Some(id) {
            self.lifted = None;
        }
        if self.drop_target == Some(id) {
            self.drop_target = None;
        }
    }

    fn card_at(&self, point: Point, exclude: CardId) -> Option<CardId> {
        self.rects
            .iter()
            .rev()
            .find(|(id, rect)| *id != exclude && rect.contains(point))
            .map(|(id, _)| *id)
    }

    fn set_lifted(&mut self, id: CardId, lifted: bool) {
        if lifted {
            self.lifted = Some(id);
        } else if self.lifted == Some(id) {
            self.lifted = None;
        }
    }

    fn set_drop_target(&mut self, target: Option<CardId>) {
        self.drop_target = target;
    }
}
