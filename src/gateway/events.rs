//! Client and server events.
//!
//! Transport-agnostic: whatever carries these (WebSocket, socket.io, a
//! test harness) serializes them as `{"event": "<name>", ...fields}`.

use serde::de::IgnoredAny;
use serde::{Deserialize, Deserializer, Serialize};
use smallvec::SmallVec;

use crate::cards::{Card, Color};
use crate::core::PlayerId;
use crate::effects::CustomEffectNotice;
use crate::rules::ChallengeOutcome;
use crate::session::{RoomCode, SessionError};

use super::view::{SeatView, StateView};

/// Actions a client can send.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "event", rename_all = "camelCase", rename_all_fields = "camelCase")]
pub enum ClientEvent {
    CreateRoom {
        player_name: String,
    },
    JoinRoom {
        room_code: RoomCode,
        player_name: String,
    },
    StartGame,
    PlayCard {
        card_index: usize,
        #[serde(default, deserialize_with = "lenient_color")]
        chosen_color: Option<Color>,
        #[serde(default)]
        target_player_id: Option<PlayerId>,
    },
    DrawCard,
    CallUno,
    ChallengeUno {
        target_player_id: PlayerId,
    },
    GetHand,
    Disconnect,
}

impl ClientEvent {
    /// Wire name, for logging.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            ClientEvent::CreateRoom { .. } => "createRoom",
            ClientEvent::JoinRoom { .. } => "joinRoom",
            ClientEvent::StartGame => "startGame",
            ClientEvent::PlayCard { .. } => "playCard",
            ClientEvent::DrawCard => "drawCard",
            ClientEvent::CallUno => "callUno",
            ClientEvent::ChallengeUno { .. } => "challengeUno",
            ClientEvent::GetHand => "getHand",
            ClientEvent::Disconnect => "disconnect",
        }
    }
}

/// Read `chosenColor` without failing the event: anything that is not a
/// known color name becomes `None`, and the game picks the color.
fn lenient_color<'de, D>(deserializer: D) -> Result<Option<Color>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Name(String),
        Other(IgnoredAny),
    }

    Ok(match Option::<Raw>::deserialize(deserializer)? {
        Some(Raw::Name(name)) => name.parse().ok(),
        Some(Raw::Other(_)) | None => None,
    })
}

/// Messages the server sends.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "event", rename_all = "camelCase", rename_all_fields = "camelCase")]
pub enum ServerEvent {
    RoomCreated {
        room_code: RoomCode,
        player_id: PlayerId,
    },
    RoomJoined {
        room_code: RoomCode,
        player_id: PlayerId,
    },
    GameStarted,
    GameState(StateView),
    PlayerHand {
        cards: Vec<Card>,
    },
    GameOver {
        winner: SeatView,
    },
    PlayerLeft {
        player_id: PlayerId,
    },
    UnoChallenged(ChallengeOutcome),
    CustomEffect(CustomEffectNotice),
    Error {
        code: String,
        message: String,
    },
}

impl ServerEvent {
    #[must_use]
    pub fn error(err: &SessionError) -> Self {
        ServerEvent::Error { code: err.code().to_string(), message: err.to_string() }
    }
}

/// Who receives a server event.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Delivery {
    /// Only this player. Hands and errors always go this way.
    ToPlayer { player: PlayerId, event: ServerEvent },
    /// Every player seated in the room.
    ToRoom { room: RoomCode, event: ServerEvent },
}

impl Delivery {
    #[must_use]
    pub fn event(&self) -> &ServerEvent {
        match self {
            Delivery::ToPlayer { event, .. } | Delivery::ToRoom { event, .. } => event,
        }
    }
}

/// Deliveries produced by one client event; rarely more than four.
pub type Deliveries = SmallVec<[Delivery; 4]>;
