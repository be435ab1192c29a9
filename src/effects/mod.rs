//! Effect resolution for played cards.
//!
//! - `PlayEffect`: What a card face does (turn movement, draw stack,
//!   custom behavior)
//! - `TargetRule`: Which player an effect may target
//! - `CustomEffectNotice`: Broadcast payload for custom card plays

mod effect;

pub use effect::{CustomEffectNotice, PlayEffect, TargetRule};
