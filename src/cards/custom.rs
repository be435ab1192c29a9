//! Custom cards outside the canonical UNO set.
//!
//! Each custom card exists once per deck and carries a bespoke effect.
//! The names are the ones clients render, so they double as the wire value.

use serde::{Deserialize, Serialize};

/// A custom card and, through it, its effect.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CustomKind {
    /// Color choice like a wild, then the same player acts again.
    BigDuro,
    /// Swap hands with a chosen opponent.
    BigTyson,
    /// Cosmetic light show; no rules effect.
    Darebear,
    /// Chosen player draws a handful of cards.
    Chugg,
}

impl CustomKind {
    /// Every custom card, in deck-building order.
    pub const ALL: [CustomKind; 4] = [
        CustomKind::BigDuro,
        CustomKind::BigTyson,
        CustomKind::Darebear,
        CustomKind::Chugg,
    ];

    /// Display and wire name.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            CustomKind::BigDuro => "BigDuro",
            CustomKind::BigTyson => "BigTyson",
            CustomKind::Darebear => "Darebear",
            CustomKind::Chugg => "Chugg",
        }
    }

    /// Look up a custom card by its wire name.
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|kind| kind.name() == name)
    }

    /// Does playing this card let the player pick the active color?
    #[must_use]
    pub const fn chooses_color(self) -> bool {
        matches!(self, CustomKind::BigDuro)
    }
}

impl std::fmt::Display for CustomKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}
