//! Card effects.
//!
//! `PlayEffect::for_face` is the single place a card's face is turned into
//! rules behavior. The game applies the effect after the card is on the
//! discard pile.

use serde::{Deserialize, Serialize};

use crate::cards::{CardFace, CustomKind};
use crate::core::PlayerId;

/// What a played card does to the table.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PlayEffect {
    /// Move the turn `steps` seats in the current direction.
    Advance { steps: usize },
    /// Flip direction, then advance one seat.
    Reverse,
    /// Add to the draw stack; the next player inherits it.
    Penalty { cards: u32 },
    /// The same player acts again.
    RepeatTurn,
    /// Swap hands with a distinct target.
    SwapHands,
    /// Target draws `cards` straight into hand.
    Gift { cards: usize },
    /// No rules effect beyond the discard.
    Cosmetic,
}

/// Target requirement of an effect.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TargetRule {
    /// Any seated player, the actor included.
    AnySeated,
    /// A seated player other than the actor.
    Opponent,
}

impl PlayEffect {
    /// Resolve a face into its effect at a table of `player_count`.
    ///
    /// With exactly two players a reverse acts as a skip.
    #[must_use]
    pub fn for_face(face: CardFace, player_count: usize, gift_cards: usize) -> Self {
        match face {
            CardFace::Number(_) | CardFace::Wild => PlayEffect::Advance { steps: 1 },
            CardFace::Skip => PlayEffect::Advance { steps: 2 },
            CardFace::Reverse if player_count == 2 => PlayEffect::Advance { steps: 2 },
            CardFace::Reverse => PlayEffect::Reverse,
            CardFace::DrawTwo => PlayEffect::Penalty { cards: 2 },
            CardFace::WildDrawFour => PlayEffect::Penalty { cards: 4 },
            CardFace::Custom(CustomKind::BigDuro) => PlayEffect::RepeatTurn,
            CardFace::Custom(CustomKind::BigTyson) => PlayEffect::SwapHands,
            CardFace::Custom(CustomKind::Darebear) => PlayEffect::Cosmetic,
            CardFace::Custom(CustomKind::Chugg) => PlayEffect::Gift { cards: gift_cards },
        }
    }

    /// Target the effect needs, if any.
    #[must_use]
    pub const fn target_rule(self) -> Option<TargetRule> {
        match self {
            PlayEffect::SwapHands => Some(TargetRule::Opponent),
            PlayEffect::Gift { .. } => Some(TargetRule::AnySeated),
            _ => None,
        }
    }

    /// Seats the turn moves after this effect; `None` keeps the turn.
    #[must_use]
    pub const fn turn_steps(self) -> Option<usize> {
        match self {
            PlayEffect::Advance { steps } => Some(steps),
            PlayEffect::RepeatTurn => None,
            PlayEffect::Reverse
            | PlayEffect::Penalty { .. }
            | PlayEffect::SwapHands
            | PlayEffect::Gift { .. }
            | PlayEffect::Cosmetic => Some(1),
        }
    }
}

/// Side-channel notice broadcast after a custom card is played.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CustomEffectNotice {
    #[serde(rename = "type")]
    pub kind: CustomKind,
    pub player_id: PlayerId,
    pub player_name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub target_id: Option<PlayerId>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub target_name: Option<String>,
}
