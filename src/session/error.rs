//! Session registry errors.

use thiserror::Error;

use crate::rules::RuleError;

/// A rejected room-level operation.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum SessionError {
    #[error("Room not found")]
    RoomNotFound,
    #[error("Game already started")]
    GameAlreadyStarted,
    #[error("Room is full (max {max} players)")]
    RoomFull { max: usize },
    #[error("Player is already in a room")]
    PlayerAlreadyInRoom,
    #[error("Player is not in a room")]
    PlayerNotInRoom,
    #[error("No free room code after {attempts} attempts")]
    RoomCodesExhausted { attempts: usize },
    #[error(transparent)]
    Rules(#[from] RuleError),
}

impl SessionError {
    /// Stable machine-readable code.
    #[must_use]
    pub const fn code(&self) -> &'static str {
        match self {
            SessionError::RoomNotFound => "room_not_found",
            SessionError::GameAlreadyStarted => "game_already_started",
            SessionError::RoomFull { .. } => "room_full",
            SessionError::PlayerAlreadyInRoom => "player_already_in_room",
            SessionError::PlayerNotInRoom => "player_not_in_room",
            SessionError::RoomCodesExhausted { .. } => "room_codes_exhausted",
            SessionError::Rules(err) => err.code(),
        }
    }
}
