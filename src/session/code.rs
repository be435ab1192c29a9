//! Room codes.
//!
//! Fixed-length codes drawn from an alphanumeric alphabet. Collisions are
//! checked against live rooms only, so codes are reused once a room is
//! gone. Allocation retries a bounded number of times.

use serde::{Deserialize, Serialize};

use crate::core::{GameRng, SessionConfig};

use super::error::SessionError;

/// A room's short join code.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RoomCode(String);

impl RoomCode {
    /// Wrap an existing code, e.g. one typed by a joining player.
    pub fn new(code: impl Into<String>) -> Self {
        Self(code.into())
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for RoomCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for RoomCode {
    fn from(code: &str) -> Self {
        Self::new(code)
    }
}

/// Allocates room codes.
#[derive(Clone, Debug)]
pub struct RoomCodeGenerator {
    alphabet: Vec<char>,
    length: usize,
    max_attempts: usize,
}

impl RoomCodeGenerator {
    #[must_use]
    pub fn new(alphabet: &str, length: usize, max_attempts: usize) -> Self {
        Self { alphabet: alphabet.chars().collect(), length, max_attempts }
    }

    #[must_use]
    pub fn from_config(config: &SessionConfig) -> Self {
        Self::new(&config.room_code_alphabet, config.room_code_length, config.max_code_attempts)
    }

    /// Draw one code, ignoring collisions.
    pub fn sample(&self, rng: &mut GameRng) -> RoomCode {
        let code: String = (0..self.length)
            .filter_map(|_| rng.choose(&self.alphabet).copied())
            .collect();
        RoomCode(code)
    }

    /// Draw codes until one is not `taken`.
    ///
    /// Gives up with `RoomCodesExhausted` after `max_attempts` collisions.
    pub fn generate(
        &self,
        rng: &mut GameRng,
        taken: impl Fn(&RoomCode) -> bool,
    ) -> Result<RoomCode, SessionError> {
        for _ in 0..self.max_attempts {
            let code = self.sample(rng);
            if !taken(&code) {
                return Ok(code);
            }
        }
        Err(SessionError::RoomCodesExhausted { attempts: self.max_attempts })
    }
}
