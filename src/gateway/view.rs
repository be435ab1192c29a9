//! Redacted table view broadcast to a room.
//!
//! Opponents' hands appear only as counts. A player's own cards travel
//! separately, to that player alone, via `playerHand`.

use serde::{Deserialize, Serialize};

use crate::cards::{Card, Color};
use crate::core::PlayerId;
use crate::rules::{Game, GamePhase, Seat};

/// Public information about one seat.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SeatView {
    pub id: PlayerId,
    pub name: String,
    pub card_count: usize,
    pub called_uno: bool,
}

impl From<&Seat> for SeatView {
    fn from(seat: &Seat) -> Self {
        Self {
            id: seat.id(),
            name: seat.name().to_string(),
            card_count: seat.hand_size(),
            called_uno: seat.called_uno(),
        }
    }
}

/// Public game state.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StateView {
    pub room_code: String,
    pub started: bool,
    pub phase: GamePhase,
    pub host_id: Option<PlayerId>,
    pub players: Vec<SeatView>,
    pub current_player_id: Option<PlayerId>,
    pub top_card: Option<Card>,
    pub current_color: Option<Color>,
    /// `1` clockwise, `-1` counter-clockwise.
    pub direction: i8,
    pub draw_stack: u32,
    pub deck_size: usize,
    pub winner_id: Option<PlayerId>,
}

impl StateView {
    /// Project a game into its public view.
    #[must_use]
    pub fn of(game: &Game) -> Self {
        Self {
            room_code: game.room_code().to_string(),
            started: game.is_started(),
            phase: game.phase(),
            host_id: game.host(),
            players: game.seats().iter().map(SeatView::from).collect(),
            current_player_id: game.current_player(),
            top_card: game.top_card().copied(),
            current_color: game.current_color(),
            direction: game.direction().sign() as i8,
            draw_stack: game.draw_stack(),
            deck_size: game.deck_len(),
            winner_id: game.winner(),
        }
    }
}
