//! Client event dispatch.
//!
//! Resolves the acting player's room through the registry, runs the rules
//! operation under that room's lock, snapshots the public view before the
//! lock is released, and returns what to send to whom. Errors go back to
//! the acting player only.

use std::sync::Arc;

use smallvec::smallvec;
use tracing::{debug, warn};

use crate::cards::Color;
use crate::core::PlayerId;
use crate::rules::RuleError;
use crate::session::{RoomCode, SessionError, SessionRegistry};

use super::events::{ClientEvent, Deliveries, Delivery, ServerEvent};
use super::view::StateView;

/// Turns client events into registry/rules calls and deliveries.
#[derive(Clone)]
pub struct Gateway {
    registry: Arc<SessionRegistry>,
}

impl Gateway {
    #[must_use]
    pub fn new(registry: Arc<SessionRegistry>) -> Self {
        Self { registry }
    }

    #[must_use]
    pub fn registry(&self) -> &Arc<SessionRegistry> {
        &self.registry
    }

    /// Handle one event from `player`.
    pub fn handle(&self, player: PlayerId, event: ClientEvent) -> Deliveries {
        let name = event.name();
        debug!(player = %player, event = name, "client event");

        let result = match event {
            ClientEvent::CreateRoom { player_name } => self.create_room(player, &player_name),
            ClientEvent::JoinRoom { room_code, player_name } => {
                self.join_room(player, &room_code, &player_name)
            }
            ClientEvent::StartGame => self.start_game(player),
            ClientEvent::PlayCard { card_index, chosen_color, target_player_id } => {
                self.play_card(player, card_index, chosen_color, target_player_id)
            }
            ClientEvent::DrawCard => self.draw_card(player),
            ClientEvent::CallUno => self.call_uno(player),
            ClientEvent::ChallengeUno { target_player_id } => self.challenge_uno(player, target_player_id),
            ClientEvent::GetHand => self.get_hand(player),
            ClientEvent::Disconnect => Ok(self.disconnect(player)),
        };

        result.unwrap_or_else(|err| {
            warn!(player = %player, event = name, error = %err, "action rejected");
            smallvec![Delivery::ToPlayer { player, event: ServerEvent::error(&err) }]
        })
    }

    fn create_room(&self, player: PlayerId, name: &str) -> Result<Deliveries, SessionError> {
        let (room, view) = self.registry.create_room_with(player, name, StateView::of)?;
        Ok(smallvec![
            Delivery::ToPlayer {
                player,
                event: ServerEvent::RoomCreated { room_code: room.clone(), player_id: player },
            },
            Delivery::ToRoom { room, event: ServerEvent::GameState(view) },
        ])
    }

    fn join_room(&self, player: PlayerId, room: &RoomCode, name: &str) -> Result<Deliveries, SessionError> {
        let view = self.registry.join_room_with(room, player, name, StateView::of)?;
        Ok(smallvec![
            Delivery::ToPlayer {
                player,
                event: ServerEvent::RoomJoined { room_code: room.clone(), player_id: player },
            },
            Delivery::ToRoom { room: room.clone(), event: ServerEvent::GameState(view) },
        ])
    }

    fn start_game(&self, player: PlayerId) -> Result<Deliveries, SessionError> {
        let (room, view) = self.registry.start_game_with(player, StateView::of)?;
        Ok(smallvec![
            Delivery::ToRoom { room: room.clone(), event: ServerEvent::GameStarted },
            Delivery::ToRoom { room, event: ServerEvent::GameState(view) },
        ])
    }

    fn play_card(
        &self,
        player: PlayerId,
        card_index: usize,
        chosen_color: Option<Color>,
        target: Option<PlayerId>,
    ) -> Result<Deliveries, SessionError> {
        let (room, result) = self.registry.with_player_room(player, |game| {
            game.play_card(player, card_index, chosen_color, target)
                .map(|outcome| (outcome, StateView::of(game)))
        })?;
        let (outcome, view) = result?;

        let winner = outcome
            .winner
            .and_then(|id| view.players.iter().find(|seat| seat.id == id).cloned());

        let mut deliveries: Deliveries =
            smallvec![Delivery::ToRoom { room: room.clone(), event: ServerEvent::GameState(view) }];
        if let Some(notice) = outcome.custom_effect {
            deliveries.push(Delivery::ToRoom { room: room.clone(), event: ServerEvent::CustomEffect(notice) });
        }
        if let Some(winner) = winner {
            deliveries.push(Delivery::ToRoom { room, event: ServerEvent::GameOver { winner } });
        }
        Ok(deliveries)
    }

    fn draw_card(&self, player: PlayerId) -> Result<Deliveries, SessionError> {
        let (room, result) = self.registry.with_player_room(player, |game| {
            game.draw_card(player).map(|_| StateView::of(game))
        })?;
        let view = result?;
        Ok(smallvec![Delivery::ToRoom { room, event: ServerEvent::GameState(view) }])
    }

    fn call_uno(&self, player: PlayerId) -> Result<Deliveries, SessionError> {
        let (room, result) = self.registry.with_player_room(player, |game| {
            game.call_uno(player).map(|_| StateView::of(game))
        })?;
        let view = result?;
        Ok(smallvec![Delivery::ToRoom { room, event: ServerEvent::GameState(view) }])
    }

    fn challenge_uno(&self, player: PlayerId, target: PlayerId) -> Result<Deliveries, SessionError> {
        let (room, (outcome, view)) = self.registry.with_player_room(player, |game| {
            let outcome = game.challenge_uno(target);
            (outcome, StateView::of(game))
        })?;
        Ok(smallvec![
            Delivery::ToRoom { room: room.clone(), event: ServerEvent::GameState(view) },
            Delivery::ToRoom { room, event: ServerEvent::UnoChallenged(outcome) },
        ])
    }

    fn get_hand(&self, player: PlayerId) -> Result<Deliveries, SessionError> {
        let (_, hand) = self
            .registry
            .with_player_room(player, |game| game.hand(player).map(<[_]>::to_vec))?;
        let cards = hand.ok_or(RuleError::PlayerNotFound)?;
        Ok(smallvec![Delivery::ToPlayer { player, event: ServerEvent::PlayerHand { cards } }])
    }

    fn disconnect(&self, player: PlayerId) -> Deliveries {
        let Some((departure, view)) = self.registry.remove_player_with(player, StateView::of) else {
            return Deliveries::new();
        };
        if departure.room_closed {
            return Deliveries::new();
        }

        smallvec![
            Delivery::ToRoom { room: departure.room.clone(), event: ServerEvent::GameState(view) },
            Delivery::ToRoom { room: departure.room, event: ServerEvent::PlayerLeft { player_id: player } },
        ]
    }
}
