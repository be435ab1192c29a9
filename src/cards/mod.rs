//! Card representation.
//!
//! - `Card`: Immutable `(Color, CardFace)` value
//! - `CardFace`: Closed set of faces; drives legality and effects
//! - `CustomKind`: The non-standard cards and their effects

pub mod card;
pub mod custom;

pub use card::{Card, CardFace, CardKind, CardParseError, CardRepr, Color};
pub use custom::CustomKind;
