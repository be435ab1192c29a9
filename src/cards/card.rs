//! Card values.
//!
//! A `Card` is an immutable `(Color, CardFace)` pair. The face is a closed
//! enum, so effect resolution is one exhaustive match instead of string
//! comparisons. On the wire a card is `{ "color", "value", "type" }` with
//! the value strings clients already understand (`"7"`, `"draw2"`,
//! `"BigTyson"`, ...).

use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::custom::CustomKind;

/// Card color. `Wild` and `Custom` are never the active color.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Color {
    Red,
    Yellow,
    Green,
    Blue,
    Wild,
    Custom,
}

impl Color {
    /// Colors a player can match or choose, in tie-break preference order.
    pub const PLAYABLE: [Color; 4] = [Color::Red, Color::Yellow, Color::Green, Color::Blue];

    /// Is this one of the four matchable colors?
    #[must_use]
    pub const fn is_playable(self) -> bool {
        matches!(self, Color::Red | Color::Yellow | Color::Green | Color::Blue)
    }

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Color::Red => "red",
            Color::Yellow => "yellow",
            Color::Green => "green",
            Color::Blue => "blue",
            Color::Wild => "wild",
            Color::Custom => "custom",
        }
    }
}

impl std::fmt::Display for Color {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for Color {
    type Err = CardParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "red" => Ok(Color::Red),
            "yellow" => Ok(Color::Yellow),
            "green" => Ok(Color::Green),
            "blue" => Ok(Color::Blue),
            "wild" => Ok(Color::Wild),
            "custom" => Ok(Color::Custom),
            other => Err(CardParseError::UnknownColor(other.to_string())),
        }
    }
}

/// What is printed on the card. Drives legality and effects.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum CardFace {
    Number(u8),
    Skip,
    Reverse,
    DrawTwo,
    Wild,
    WildDrawFour,
    Custom(CustomKind),
}

impl CardFace {
    /// Forced-draw cards added to the draw stack, if this face stacks.
    #[must_use]
    pub const fn draw_penalty(self) -> Option<u32> {
        match self {
            CardFace::DrawTwo => Some(2),
            CardFace::WildDrawFour => Some(4),
            _ => None,
        }
    }

    /// Wire value string.
    #[must_use]
    pub fn value(self) -> String {
        match self {
            CardFace::Number(n) => n.to_string(),
            CardFace::Skip => "skip".to_string(),
            CardFace::Reverse => "reverse".to_string(),
            CardFace::DrawTwo => "draw2".to_string(),
            CardFace::Wild => "wild".to_string(),
            CardFace::WildDrawFour => "draw4".to_string(),
            CardFace::Custom(kind) => kind.name().to_string(),
        }
    }

    fn parse(value: &str) -> Result<Self, CardParseError> {
        match value {
            "skip" => Ok(CardFace::Skip),
            "reverse" => Ok(CardFace::Reverse),
            "draw2" => Ok(CardFace::DrawTwo),
            "wild" => Ok(CardFace::Wild),
            "draw4" => Ok(CardFace::WildDrawFour),
            other => {
                if let Some(kind) = CustomKind::from_name(other) {
                    return Ok(CardFace::Custom(kind));
                }
                match other.parse::<u8>() {
                    Ok(n) if n <= 9 => Ok(CardFace::Number(n)),
                    _ => Err(CardParseError::UnknownValue(other.to_string())),
                }
            }
        }
    }
}

/// Card category, as reported to clients.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CardKind {
    Number,
    Action,
    Wild,
    Custom,
}

/// Rejected wire card.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum CardParseError {
    #[error("unknown color {0:?}")]
    UnknownColor(String),
    #[error("unknown card value {0:?}")]
    UnknownValue(String),
    #[error("{value} cannot be {color}")]
    Mismatch { color: Color, value: String },
}

/// An immutable card. Equality is by color and face.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "CardRepr", try_from = "CardRepr")]
pub struct Card {
    color: Color,
    face: CardFace,
}

impl Card {
    /// A number card. `None` unless `n` is 0-9 and the color is playable.
    #[must_use]
    pub const fn number(color: Color, n: u8) -> Option<Self> {
        if n > 9 {
            return None;
        }
        Self::colored(color, CardFace::Number(n))
    }

    #[must_use]
    pub const fn skip(color: Color) -> Option<Self> {
        Self::colored(color, CardFace::Skip)
    }

    #[must_use]
    pub const fn reverse(color: Color) -> Option<Self> {
        Self::colored(color, CardFace::Reverse)
    }

    #[must_use]
    pub const fn draw_two(color: Color) -> Option<Self> {
        Self::colored(color, CardFace::DrawTwo)
    }

    #[must_use]
    pub const fn wild() -> Self {
        Self { color: Color::Wild, face: CardFace::Wild }
    }

    #[must_use]
    pub const fn wild_draw_four() -> Self {
        Self { color: Color::Wild, face: CardFace::WildDrawFour }
    }

    #[must_use]
    pub const fn custom(kind: CustomKind) -> Self {
        Self { color: Color::Custom, face: CardFace::Custom(kind) }
    }

    const fn colored(color: Color, face: CardFace) -> Option<Self> {
        if color.is_playable() {
            Some(Self { color, face })
        } else {
            None
        }
    }

    #[must_use]
    pub const fn color(&self) -> Color {
        self.color
    }

    #[must_use]
    pub const fn face(&self) -> CardFace {
        self.face
    }

    #[must_use]
    pub const fn kind(&self) -> CardKind {
        match self.face {
            CardFace::Number(_) => CardKind::Number,
            CardFace::Skip | CardFace::Reverse | CardFace::DrawTwo => CardKind::Action,
            CardFace::Wild | CardFace::WildDrawFour => CardKind::Wild,
            CardFace::Custom(_) => CardKind::Custom,
        }
    }

    /// Wild or custom: may not be the revealed starting card.
    #[must_use]
    pub const fn is_wild_or_custom(&self) -> bool {
        matches!(self.kind(), CardKind::Wild | CardKind::Custom)
    }

    /// Does playing this card set the active color by choice?
    #[must_use]
    pub const fn chooses_color(&self) -> bool {
        match self.face {
            CardFace::Wild | CardFace::WildDrawFour => true,
            CardFace::Custom(kind) => kind.chooses_color(),
            _ => false,
        }
    }

    /// Color/value legality against the top of the discard pile.
    ///
    /// Wild and custom cards always match. A standard card matches on the
    /// active color or on the top card's face; either suffices. Draw-stack
    /// restrictions are checked by the game, not here.
    #[must_use]
    pub fn can_play_on(&self, top: &Card, current_color: Color) -> bool {
        match self.kind() {
            CardKind::Wild | CardKind::Custom => true,
            CardKind::Number | CardKind::Action => {
                self.color == current_color || self.face == top.face
            }
        }
    }
}

impl std::fmt::Display for Card {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.kind() {
            CardKind::Number | CardKind::Action => write!(f, "{} {}", self.color, self.face.value()),
            CardKind::Wild | CardKind::Custom => f.write_str(&self.face.value()),
        }
    }
}

/// Wire form of a card.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CardRepr {
    pub color: Color,
    pub value: String,
    #[serde(rename = "type")]
    pub kind: CardKind,
}

impl From<Card> for CardRepr {
    fn from(card: Card) -> Self {
        Self { color: card.color, value: card.face.value(), kind: card.kind() }
    }
}

impl TryFrom<CardRepr> for Card {
    type Error = CardParseError;

    fn try_from(repr: CardRepr) -> Result<Self, Self::Error> {
        let face = CardFace::parse(&repr.value)?;
        let card = Card { color: repr.color, face };

        let consistent = match card.kind() {
            CardKind::Number | CardKind::Action => repr.color.is_playable(),
            CardKind::Wild => repr.color == Color::Wild,
            CardKind::Custom => repr.color == Color::Custom,
        };
        if !consistent || card.kind() != repr.kind {
            return Err(CardParseError::Mismatch { color: repr.color, value: repr.value });
        }
        Ok(card)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kinds() {
        assert_eq!(Card::number(Color::Red, 3).unwrap().kind(), CardKind::Number);
        assert_eq!(Card::skip(Color::Blue).unwrap().kind(), CardKind::Action);
        assert_eq!(Card::wild_draw_four().kind(), CardKind::Wild);
        assert_eq!(Card::custom(CustomKind::Chugg).kind(), CardKind::Custom);
    }

    #[test]
    fn test_match_on_color_or_value() {
        let top = Card::number(Color::Red, 5).unwrap();

        assert!(Card::number(Color::Red, 9).unwrap().can_play_on(&top, Color::Red));
        assert!(Card::number(Color::Blue, 5).unwrap().can_play_on(&top, Color::Red));
        assert!(!Card::number(Color::Blue, 6).unwrap().can_play_on(&top, Color::Red));

        let skip_top = Card::skip(Color::Green).unwrap();
        assert!(Card::skip(Color::Yellow).unwrap().can_play_on(&skip_top, Color::Green));
        assert!(!Card::reverse(Color::Yellow).unwrap().can_play_on(&skip_top, Color::Green));
    }

    #[test]
    fn test_current_color_overrides_top_card_color() {
        // A wild set the color to blue on top of a red card.
        let top = Card::wild();
        assert!(Card::number(Color::Blue, 1).unwrap().can_play_on(&top, Color::Blue));
        assert!(!Card::number(Color::Red, 1).unwrap().can_play_on(&top, Color::Blue));
    }

    #[test]
    fn test_wild_and_custom_always_match() {
        let top = Card::number(Color::Green, 2).unwrap();
        assert!(Card::wild().can_play_on(&top, Color::Green));
        assert!(Card::wild_draw_four().can_play_on(&top, Color::Green));
        for kind in CustomKind::ALL {
            assert!(Card::custom(kind).can_play_on(&top, Color::Green));
        }
    }

    #[test]
    fn test_chooses_color() {
        assert!(Card::wild().chooses_color());
        assert!(Card::wild_draw_four().chooses_color());
        assert!(Card::custom(CustomKind::BigDuro).chooses_color());
        assert!(!Card::custom(CustomKind::Chugg).chooses_color());
        assert!(!Card::draw_two(Color::Red).unwrap().chooses_color());
    }

    #[test]
    fn test_wire_format() {
        let json = serde_json::to_string(&Card::draw_two(Color::Yellow).unwrap()).unwrap();
        assert_eq!(json, r#"{"color":"yellow","value":"draw2","type":"action"}"#);

        let json = serde_json::to_string(&Card::custom(CustomKind::BigTyson)).unwrap();
        assert_eq!(json, r#"{"color":"custom","value":"BigTyson","type":"custom"}"#);

        let card: Card =
            serde_json::from_str(r#"{"color":"wild","value":"draw4","type":"wild"}"#).unwrap();
        assert_eq!(card, Card::wild_draw_four());
    }

    #[test]
    fn test_wire_rejects_inconsistent_cards() {
        let bad = serde_json::from_str::<Card>(r#"{"color":"wild","value":"7","type":"number"}"#);
        assert!(bad.is_err());

        let bad = serde_json::from_str::<Card>(r#"{"color":"red","value":"12","type":"number"}"#);
        assert!(bad.is_err());
    }

    #[test]
    fn test_color_parse() {
        assert_eq!("green".parse::<Color>(), Ok(Color::Green));
        assert!("purple".parse::<Color>().is_err());
    }

    #[test]
    fn test_constructors_reject_impossible_cards() {
        assert_eq!(Card::number(Color::Red, 10), None);
        assert_eq!(Card::number(Color::Wild, 3), None);
        assert_eq!(Card::skip(Color::Custom), None);
        assert_eq!(Card::reverse(Color::Wild), None);
        assert_eq!(Card::draw_two(Color::Custom), None);
        assert!(Card::number(Color::Blue, 9).is_some());
    }
}
