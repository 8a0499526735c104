//! Card model: identity, kind, geometry, and wire format.

use kurbo::{Point, Rect, Size};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Identifier for a card.
///
/// Ids are board-generated from the creation time in milliseconds, bumped
/// past every id already on the board, so later cards always compare
/// greater. The wire format is a decimal string.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
#[serde(into = "String", try_from = "String")]
pub struct CardId(u64);

impl CardId {
    /// Wrap a raw id value.
    pub fn from_raw(raw: u64) -> Self {
        Self(raw)
    }

    /// The raw id value.
    pub fn raw(self) -> u64 {
        self.0
    }
}

impl fmt::Display for CardId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<CardId> for String {
    fn from(id: CardId) -> String {
        id.0.to_string()
    }
}

impl TryFrom<String> for CardId {
    type Error = std::num::ParseIntError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse().map(CardId)
    }
}

/// The dashboard card types.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CardKind {
    Note,
    Link,
    Mercury,
    Gmail,
    Tasks,
    Reminder,
    Ssense,
    Weather,
    History,
    Rss,
    ChatGpt,
    Google,
}

impl CardKind {
    /// Every card kind, in wire order.
    pub const ALL: [CardKind; 12] = [
        CardKind::Note,
        CardKind::Link,
        CardKind::Mercury,
        CardKind::Gmail,
        CardKind::Tasks,
        CardKind::Reminder,
        CardKind::Ssense,
        CardKind::Weather,
        CardKind::History,
        CardKind::Rss,
        CardKind::ChatGpt,
        CardKind::Google,
    ];

    /// Size a card of this kind gets when created without explicit
    /// dimensions. Some defaults sit below the generic resize floor.
    pub fn default_size(self) -> Size {
        match self {
            CardKind::Note => Size::new(300.0, 143.0),
            CardKind::Link => Size::new(300.0, 150.0),
            CardKind::Mercury => Size::new(350.0, 400.0),
            CardKind::Gmail => Size::new(400.0, 500.0),
            CardKind::Tasks => Size::new(300.0, 143.0),
            CardKind::Reminder => Size::new(350.0, 200.0),
            CardKind::Ssense => Size::new(500.0, 600.0),
            CardKind::Weather => Size::new(300.0, 250.0),
            CardKind::History => Size::new(350.0, 500.0),
            CardKind::Rss => Size::new(450.0, 600.0),
            CardKind::ChatGpt => Size::new(400.0, 500.0),
            CardKind::Google => Size::new(400.0, 300.0),
        }
    }
}

/// A dashboard card.
///
/// Field names follow the persisted JSON: `type` for the kind, flat `x`/`y`
/// coordinates, camel-cased `exactPosition`. Geometry fields default to zero
/// so rows written by older versions still load; [`Card::normalize`] fills
/// the gaps afterwards.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Card {
    pub id: CardId,
    #[serde(rename = "type")]
    pub kind: CardKind,
    /// Left edge in canvas coordinates.
    #[serde(default)]
    pub x: f64,
    /// Top edge in canvas coordinates.
    #[serde(default)]
    pub y: f64,
    #[serde(default)]
    pub width: f64,
    #[serde(default)]
    pub height: f64,
    /// True when the position was user-chosen or layout-assigned. A clear
    /// flag marks the card as free for the next masonry pass.
    #[serde(default)]
    pub exact_position: bool,
    /// Opaque payload; the engine never interprets it.
    #[serde(default)]
    pub content: String,
}

impl Card {
    /// Create a card at the canvas origin with the kind's default size.
    pub fn new(id: CardId, kind: CardKind) -> Self {
        let size = kind.default_size();
        Self {
            id,
            kind,
            x: 0.0,
            y: 0.0,
            width: size.width,
            height: size.height,
            exact_position: false,
            content: String::new(),
        }
    }

    /// Top-left corner.
    pub fn origin(&self) -> Point {
        Point::new(self.x, self.y)
    }

    /// Move the top-left corner.
    pub fn set_origin(&mut self, origin: Point) {
        self.x = origin.x;
        self.y = origin.y;
    }

    /// Current size.
    pub fn size(&self) -> Size {
        Size::new(self.width, self.height)
    }

    /// The card's rectangle in canvas coordinates.
    pub fn bounds(&self) -> Rect {
        Rect::new(self.x, self.y, self.x + self.width, self.y + self.height)
    }

    /// Bottom edge, used for column bookkeeping and canvas sizing.
    pub fn bottom(&self) -> f64 {
        self.y + self.height
    }

    /// Fill missing or unusable dimensions with the kind defaults.
    ///
    /// Stored rows from older versions may lack explicit sizes; this runs
    /// once when a board is rebuilt from storage.
    pub fn normalize(&mut self) {
        let defaults = self.kind.default_size();
        if !self.width.is_finite() || self.width <= 0.0 {
            self.width = defaults.width;
        }
        if !self.height.is_finite() || self.height <= 0.0 {
            self.height = defaults.height;
        }
        if !self.x.is_finite() {
            self.x = 0.0;
        }
        if !self.y.is_finite() {
            self.y = 0.0;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_card_creation_uses_kind_defaults() {
        let card = Card::new(CardId::from_raw(1), CardKind::Weather);
        assert!((card.width - 300.0).abs() < f64::EPSILON);
        assert!((card.height - 250.0).abs() < f64::EPSILON);
        assert!(!card.exact_position);
        assert!(card.content.is_empty());
    }

    #[test]
    fn test_bounds() {
        let mut card = Card::new(CardId::from_raw(1), CardKind::Link);
        card.set_origin(Point::new(10.0, 20.0));
        let bounds = card.bounds();
        assert!((bounds.x0 - 10.0).abs() < f64::EPSILON);
        assert!((bounds.y0 - 20.0).abs() < f64::EPSILON);
        assert!((bounds.x1 - 310.0).abs() < f64::EPSILON);
        assert!((bounds.y1 - 170.0).abs() < f64::EPSILON);
        assert!((card.bottom() - 170.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_card_id_ordering_follows_raw_value() {
        let a = CardId::from_raw(1700000000000);
        let b = CardId::from_raw(1700000000001);
        assert!(a < b);
        assert_eq!(a, CardId::from_raw(1700000000000));
    }

    #[test]
    fn test_wire_format_field_names() {
        let mut card = Card::new(CardId::from_raw(1700000000000), CardKind::Note);
        card.set_origin(Point::new(12.0, 12.0));
        card.exact_position = true;
        card.content = "milk".to_string();

        let value = serde_json::to_value(&card).unwrap();
        assert_eq!(value["id"], "1700000000000");
        assert_eq!(value["type"], "note");
        assert_eq!(value["x"], 12.0);
        assert_eq!(value["exactPosition"], true);
        assert_eq!(value["content"], "milk");
    }

    #[test]
    fn test_wire_format_roundtrip() {
        let mut card = Card::new(CardId::from_raw(42), CardKind::ChatGpt);
        card.set_origin(Point::new(304.0, 12.0));
        card.exact_position = true;

        let json = serde_json::to_string(&card).unwrap();
        let back: Card = serde_json::from_str(&json).unwrap();
        assert_eq!(back, card);
    }

    #[test]
    fn test_legacy_row_without_geometry_loads() {
        let json = r#"{"id":"1650000000000","type":"gmail","content":""}"#;
        let mut card: Card = serde_json::from_str(json).unwrap();
        assert!((card.width - 0.0).abs() < f64::EPSILON);
        assert!(!card.exact_position);

        card.normalize();
        assert!((card.width - 400.0).abs() < f64::EPSILON);
        assert!((card.height - 500.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_unknown_kind_is_rejected() {
        let json = r#"{"id":"1","type":"clock"}"#;
        assert!(serde_json::from_str::<Card>(json).is_err());
    }

    #[test]
    fn test_normalize_keeps_valid_geometry() {
        let mut card = Card::new(CardId::from_raw(1), CardKind::Rss);
        card.set_origin(Point::new(12.0, 640.0));
        card.width = 500.0;
        card.normalize();
        assert!((card.width - 500.0).abs() < f64::EPSILON);
        assert!((card.x - 12.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_every_kind_has_a_positive_default_size() {
        for kind in CardKind::ALL {
            let size = kind.default_size();
            assert!(size.width > 0.0);
            assert!(size.height > 0.0);
        }
    }
}
