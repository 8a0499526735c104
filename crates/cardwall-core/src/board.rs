//! The ordered card collection and its structural rules.
//!
//! The board owns identity (creation-ordered card ids, a UUID board id) and
//! the structural operations. It never talks to a surface or runs the
//! packer; the session sequences those around these calls.

use kurbo::{Point, Size};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[cfg(not(target_arch = "wasm32"))]
use std::time::{SystemTime, UNIX_EPOCH};

#[cfg(target_arch = "wasm32")]
use web_time::{SystemTime, UNIX_EPOCH};

use crate::card::{Card, CardId, CardKind};

/// Space kept below the lowest card when reporting the canvas height.
pub const CANVAS_BOTTOM_MARGIN: f64 = 100.0;

/// Persisted form of a board: identity plus the card rows.
#[derive(Serialize, Deserialize)]
struct StoredBoard {
    id: String,
    cards: Vec<Card>,
}

impl From<Board> for StoredBoard {
    fn from(board: Board) -> Self {
        Self {
            id: board.id,
            cards: board.cards,
        }
    }
}

impl From<StoredBoard> for Board {
    fn from(stored: StoredBoard) -> Self {
        let mut board = Board::from_cards(stored.cards);
        board.id = stored.id;
        board
    }
}

/// An ordered collection of cards. Slice order is z-order: later cards
/// render on top.
///
/// Boards persist as `{id, cards}`. Deserializing runs through
/// [`Board::from_cards`] before the stored id is restored, so legacy rows
/// are normalized and the id counter rebuilt.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(into = "StoredBoard", from = "StoredBoard")]
pub struct Board {
    /// Stable board identity, used as the storage key.
    pub id: String,
    cards: Vec<Card>,
    next_id: u64,
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}

impl Board {
    /// Create an empty board with a fresh UUID.
    pub fn new() -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            cards: Vec::new(),
            next_id: 0,
        }
    }

    /// Rebuild a board from stored cards.
    ///
    /// Legacy rows are normalized (missing or non-positive sizes get the
    /// per-kind defaults) and the id counter is bumped past every stored id.
    pub fn from_cards(cards: Vec<Card>) -> Self {
        let mut board = Self::new();
        board.next_id = cards
            .iter()
            .map(|card| card.id.raw())
            .max()
            .map_or(0, |highest| highest.saturating_add(1));
        board.cards = cards;
        for card in &mut board.cards {
            card.normalize();
        }
        board
    }

    pub fn cards(&self) -> &[Card] {
        &self.cards
    }

    pub fn cards_mut(&mut self) -> &mut [Card] {
        &mut self.cards
    }

    pub fn card(&self, id: CardId) -> Option<&Card> {
        self.cards.iter().find(|card| card.id == id)
    }

    pub fn card_mut(&mut self, id: CardId) -> Option<&mut Card> {
        self.cards.iter_mut().find(|card| card.id == id)
    }

    pub fn len(&self) -> usize {
        self.cards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    /// Next card id: the creation timestamp in milliseconds, bumped past
    /// every id this board has handed out or loaded.
    fn fresh_id(&mut self) -> CardId {
        let now = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|elapsed| elapsed.as_millis() as u64)
            .unwrap_or(0);
        let raw = now.max(self.next_id);
        self.next_id = raw.saturating_add(1);
        CardId::from_raw(raw)
    }

    /// Add a card. An explicit position marks it exactly positioned; the
    /// size falls back to the kind's default. The caller is expected to run
    /// a packer pass afterwards.
    pub fn create_card(
        &mut self,
        kind: CardKind,
        position: Option<Point>,
        size: Option<Size>,
    ) -> CardId {
        let id = self.fresh_id();
        let mut card = Card::new(id, kind);
        if let Some(position) = position {
            card.set_origin(position);
            card.exact_position = true;
        }
        if let Some(size) = size {
            card.width = size.width;
            card.height = size.height;
        }
        self.cards.push(card);
        id
    }

    /// Remove a card and free every remaining card for the next pack pass.
    pub fn remove_card(&mut self, id: CardId) -> Option<Card> {
        let index = self.cards.iter().position(|card| card.id == id)?;
        let removed = self.cards.remove(index);
        for card in &mut self.cards {
            card.exact_position = false;
        }
        Some(removed)
    }

    /// Replace a card's content. Geometry is untouched.
    pub fn update_content(&mut self, id: CardId, content: &str) -> bool {
        match self.card_mut(id) {
            Some(card) => {
                card.content = content.to_string();
                true
            }
            None => false,
        }
    }

    /// Canvas height the host should reserve: one margin below the lowest
    /// card, never less than the viewport height.
    pub fn content_height(&self, viewport_height: f64) -> f64 {
        let lowest = self.cards.iter().map(Card::bottom).fold(0.0, f64::max);
        if lowest > 0.0 {
            (lowest + CANVAS_BOTTOM_MARGIN).max(viewport_height)
        } else {
            viewport_height
        }
    }
}
