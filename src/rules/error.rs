//! Rule violations.
//!
//! Every variant is recoverable: the action is rejected and the game is
//! left exactly as it was.

use thiserror::Error;

/// A rejected game action.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum RuleError {
    #[error("Player not found")]
    PlayerNotFound,
    #[error("Not your turn")]
    NotYourTurn,
    #[error("Invalid card index")]
    InvalidCardIndex,
    #[error("Must draw {pending} cards or play a draw card")]
    MustResolveDrawStack { pending: u32 },
    #[error("Cannot play this card")]
    IllegalCard,
    #[error("Invalid target player")]
    InvalidTarget,
    #[error("Only the host can start the game")]
    NotHost,
    #[error("Need at least {need} players to start (have {have})")]
    NotEnoughPlayers { have: usize, need: usize },
    #[error("Game already started")]
    GameAlreadyStarted,
    #[error("Game is not in progress")]
    GameNotActive,
    #[error("Player is already seated")]
    PlayerAlreadySeated,
    #[error("Not enough cards to deal and reveal a starting card")]
    DeckExhausted,
}

impl RuleError {
    /// Stable machine-readable code.
    #[must_use]
    pub const fn code(&self) -> &'static str {
        match self {
            RuleError::PlayerNotFound => "player_not_found",
            RuleError::NotYourTurn => "not_your_turn",
            RuleError::InvalidCardIndex => "invalid_card_index",
            RuleError::MustResolveDrawStack { .. } => "must_resolve_draw_stack",
            RuleError::IllegalCard => "illegal_card",
            RuleError::InvalidTarget => "invalid_target",
            RuleError::NotHost => "not_host",
            RuleError::NotEnoughPlayers { .. } => "not_enough_players",
            RuleError::GameAlreadyStarted => "game_already_started",
            RuleError::GameNotActive => "game_not_active",
            RuleError::PlayerAlreadySeated => "player_already_seated",
            RuleError::DeckExhausted => "deck_exhausted",
        }
    }
}
