//! UNO rules engine.
//!
//! `Game` is the per-room state machine: dealing, turn order, legality,
//! draw stacking, custom effects, UNO challenges and win detection. It is
//! a plain state container; the session registry decides who may touch it
//! and when.

pub mod error;
pub mod game;

pub use error::RuleError;
pub use game::{
    ChallengeOutcome, Direction, DrawOutcome, Game, GamePhase, PlayOutcome, RemovedPlayer, Seat,
};
