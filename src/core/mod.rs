//! Core engine types: players, RNG, configuration.
//!
//! These are shared by the rules engine, the session registry and the
//! gateway. Nothing here knows about turn order or rooms.

pub mod player;
pub mod rng;
pub mod config;

pub use player::PlayerId;
pub use rng::GameRng;
pub use config::{ConfigError, GameConfig, SessionConfig};
