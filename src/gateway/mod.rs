//! Event gateway boundary.
//!
//! The network transport is not part of this crate. This module defines
//! the contract it speaks: client events in, `(recipient, server event)`
//! deliveries out, with a public `StateView` that never carries another
//! player's cards.

mod events;
mod handler;
mod view;

pub use events::{ClientEvent, Deliveries, Delivery, ServerEvent};
pub use handler::Gateway;
pub use view::{SeatView, StateView};
