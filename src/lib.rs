//! # rocket-uno
//!
//! A room-scoped multiplayer UNO engine.
//!
//! ## Design Principles
//!
//! 1. **Pure Rules**: `Game` is a plain state container. No locks, no I/O,
//!    no global registries. Every rejected action leaves it untouched.
//!
//! 2. **Closed Effects**: Card faces are an enum; effect resolution is one
//!    exhaustive match (`PlayEffect::for_face`).
//!
//! 3. **Serialized Rooms**: The `SessionRegistry` owns every room and
//!    hands out exclusive access one operation at a time.
//!
//! ## Modules
//!
//! - `core`: Player IDs, RNG, configuration
//! - `cards`: Card values and the custom card set
//! - `zones`: Draw pile and discard pile
//! - `effects`: What each card face does
//! - `rules`: The `Game` state machine
//! - `session`: Room registry and room codes
//! - `gateway`: Client/server event contract and redacted state view
//! - `logging`: `tracing` subscriber setup

pub mod core;
pub mod cards;
pub mod zones;
pub mod effects;
pub mod rules;
pub mod session;
pub mod gateway;
pub mod logging;

// Re-export commonly used types
pub use crate::core::{ConfigError, GameConfig, GameRng, PlayerId, SessionConfig};

pub use crate::cards::{Card, CardFace, CardKind, Color, CustomKind};

pub use crate::zones::{Deck, DiscardPile, STANDARD_DECK_SIZE};

pub use crate::effects::{CustomEffectNotice, PlayEffect, TargetRule};

pub use crate::rules::{
    ChallengeOutcome, Direction, DrawOutcome, Game, GamePhase, PlayOutcome, RemovedPlayer, RuleError, Seat,
};

pub use crate::session::{Departure, RoomCode, SessionError, SessionRegistry, SharedGame};

pub use crate::gateway::{ClientEvent, Deliveries, Delivery, Gateway, SeatView, ServerEvent, StateView};
