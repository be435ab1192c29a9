//! Session registry: rooms, room codes, and who sits where.
//!
//! - `SessionRegistry`: Room lifecycle and per-room exclusive access
//! - `RoomCode` / `RoomCodeGenerator`: Short join codes
//! - `SessionError`: Room-level rejections (wraps `RuleError`)

pub mod code;
pub mod error;
pub mod registry;

pub use code::{RoomCode, RoomCodeGenerator};
pub use error::SessionError;
pub use registry::{Departure, SessionRegistry, SharedGame};
