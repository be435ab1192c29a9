//! Game and session configuration.
//!
//! - `GameConfig`: Table rules (player limits, hand size, custom cards)
//! - `SessionConfig`: Room registry settings plus the `GameConfig` every
//!   new room is created with
//!
//! Both have defaults matching the stock ruleset and builder-style
//! `with_*` setters. `SessionConfig::from_env` overlays environment
//! variables for deployments.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::cards::CustomKind;

/// Environment variable overriding `GameConfig::max_players`.
pub const ENV_MAX_PLAYERS: &str = "UNO_MAX_PLAYERS";
/// Environment variable overriding `SessionConfig::room_code_length`.
pub const ENV_ROOM_CODE_LENGTH: &str = "UNO_ROOM_CODE_LENGTH";
/// Environment variable fixing the registry RNG seed.
pub const ENV_SEED: &str = "UNO_SEED";

/// Invalid configuration value.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("{var} must be an unsigned integer (got {value:?})")]
    NotANumber { var: &'static str, value: String },
    #[error("{field} out of range (got={got}, min={min})")]
    OutOfRange { field: &'static str, got: usize, min: usize },
    #[error("room code alphabet must not be empty")]
    EmptyAlphabet,
}

/// Table rules for a single game.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    /// Players required before the host may start.
    pub min_players: usize,
    /// Seats per room.
    pub max_players: usize,
    /// Cards dealt to each player at start.
    pub starting_hand_size: usize,
    /// Custom cards shuffled into the deck, one copy each.
    pub custom_cards: Vec<CustomKind>,
    /// Cards the gift-cards custom effect hands to its target.
    pub gift_card_count: usize,
    /// Cards drawn by a player caught not calling UNO.
    pub uno_penalty: usize,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            min_players: 2,
            max_players: 10,
            starting_hand_size: 7,
            custom_cards: CustomKind::ALL.to_vec(),
            gift_card_count: 5,
            uno_penalty: 2,
        }
    }
}

impl GameConfig {
    /// Create the stock configuration.
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_max_players(mut self, max: usize) -> Self {
        self.max_players = max;
        self
    }

    #[must_use]
    pub fn with_starting_hand_size(mut self, size: usize) -> Self {
        self.starting_hand_size = size;
        self
    }

    /// Replace the custom card set. Duplicates are ignored.
    #[must_use]
    pub fn with_custom_cards(mut self, cards: impl IntoIterator<Item = CustomKind>) -> Self {
        self.custom_cards.clear();
        for kind in cards {
            if !self.custom_cards.contains(&kind) {
                self.custom_cards.push(kind);
            }
        }
        self
    }

    /// Check limits that would make a game unplayable.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.min_players < 2 {
            return Err(ConfigError::OutOfRange { field: "min_players", got: self.min_players, min: 2 });
        }
        if self.max_players < self.min_players {
            return Err(ConfigError::OutOfRange {
                field: "max_players",
                got: self.max_players,
                min: self.min_players,
            });
        }
        Ok(())
    }
}

/// Session registry settings.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SessionConfig {
    /// Characters per room code.
    pub room_code_length: usize,
    /// Characters room codes are drawn from.
    pub room_code_alphabet: String,
    /// Collision retries before giving up on code allocation.
    pub max_code_attempts: usize,
    /// Fixed registry seed. `None` seeds from entropy.
    pub seed: Option<u64>,
    /// Rules for every room created by the registry.
    pub game: GameConfig,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            room_code_length: 6,
            room_code_alphabet: "ABCDEFGHIJKLMNOPQRSTUVWXYZ0123456789".to_string(),
            max_code_attempts: 1024,
            seed: None,
            game: GameConfig::default(),
        }
    }
}

impl SessionConfig {
    /// Create the default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    #[must_use]
    pub fn with_room_code_length(mut self, length: usize) -> Self {
        self.room_code_length = length;
        self
    }

    #[must_use]
    pub fn with_room_code_alphabet(mut self, alphabet: impl Into<String>) -> Self {
        self.room_code_alphabet = alphabet.into();
        self
    }

    #[must_use]
    pub fn with_max_code_attempts(mut self, attempts: usize) -> Self {
        self.max_code_attempts = attempts;
        self
    }

    #[must_use]
    pub fn with_game(mut self, game: GameConfig) -> Self {
        self.game = game;
        self
    }

    /// Defaults overlaid with `UNO_*` environment variables.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Defaults overlaid with values from `lookup`.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let mut config = Self::default();

        if let Some(max) = parse_var(&lookup, ENV_MAX_PLAYERS)? {
            config.game.max_players = max as usize;
        }
        if let Some(length) = parse_var(&lookup, ENV_ROOM_CODE_LENGTH)? {
            config.room_code_length = length as usize;
        }
        if let Some(seed) = parse_var(&lookup, ENV_SEED)? {
            config.seed = Some(seed);
        }

        config.validate()?;
        Ok(config)
    }

    /// Check registry and game limits.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.room_code_alphabet.is_empty() {
            return Err(ConfigError::EmptyAlphabet);
        }
        if self.room_code_length == 0 {
            return Err(ConfigError::OutOfRange { field: "room_code_length", got: 0, min: 1 });
        }
        if self.max_code_attempts == 0 {
            return Err(ConfigError::OutOfRange { field: "max_code_attempts", got: 0, min: 1 });
        }
        self.game.validate()
    }
}

fn parse_var(
    lookup: &impl Fn(&str) -> Option<String>,
    var: &'static str,
) -> Result<Option<u64>, ConfigError> {
    match lookup(var) {
        None => Ok(None),
        Some(raw) => raw
            .trim()
            .parse::<u64>()
            .map(Some)
            .map_err(|_| ConfigError::NotANumber { var, value: raw }),
    }
}
