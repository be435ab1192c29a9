//! Room registry.
//!
//! Maps room codes to games and players to rooms. Locking:
//!
//! - One `RwLock` guards both maps (insert/remove/lookup).
//! - Each game sits behind its own `Mutex`; every mutation of a game holds
//!   it for the whole (synchronous) call.
//! - Order is always registry, then room. A room lock is never held while
//!   taking the registry lock, so the two cannot deadlock.

use std::sync::Arc;

use parking_lot::{Mutex, RwLock};
use rustc_hash::FxHashMap;
use tracing::{debug, info};

use crate::core::{GameRng, PlayerId, SessionConfig};
use crate::rules::{Game, RemovedPlayer};

use super::code::{RoomCode, RoomCodeGenerator};
use super::error::SessionError;

/// A game shared between the registry and in-flight operations.
pub type SharedGame = Arc<Mutex<Game>>;

#[derive(Default)]
struct Rooms {
    games: FxHashMap<RoomCode, SharedGame>,
    players: FxHashMap<PlayerId, RoomCode>,
}

/// A player leaving their room.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Departure {
    pub room: RoomCode,
    pub removed: RemovedPlayer,
    /// The room emptied and was deleted.
    pub room_closed: bool,
}

/// Owns every live room.
pub struct SessionRegistry {
    config: SessionConfig,
    codes: RoomCodeGenerator,
    rng: Mutex<GameRng>,
    rooms: RwLock<Rooms>,
}

impl SessionRegistry {
    /// Create an empty registry.
    #[must_use]
    pub fn new(config: SessionConfig) -> Self {
        let rng = match config.seed {
            Some(seed) => GameRng::new(seed),
            None => GameRng::from_entropy(),
        };
        Self {
            codes: RoomCodeGenerator::from_config(&config),
            config,
            rng: Mutex::new(rng),
            rooms: RwLock::new(Rooms::default()),
        }
    }

    #[must_use]
    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    /// Open a new room with `player` seated as host.
    pub fn create_room(&self, player: PlayerId, name: &str) -> Result<RoomCode, SessionError> {
        self.create_room_with(player, name, |_| ()).map(|(code, ())| code)
    }

    /// `create_room`, then run `inspect` on the new game before anyone
    /// else can reach it.
    pub fn create_room_with<R>(
        &self,
        player: PlayerId,
        name: &str,
        inspect: impl FnOnce(&Game) -> R,
    ) -> Result<(RoomCode, R), SessionError> {
        let mut rooms = self.rooms.write();
        if rooms.players.contains_key(&player) {
            return Err(SessionError::PlayerAlreadyInRoom);
        }

        let (code, game_rng) = {
            let mut rng = self.rng.lock();
            let code = self.codes.generate(&mut rng, |c| rooms.games.contains_key(c))?;
            (code, rng.fork())
        };

        let mut game = Game::new(code.as_str(), self.config.game.clone(), game_rng);
        game.add_player(player, name)?;
        let inspected = inspect(&game);

        rooms.games.insert(code.clone(), Arc::new(Mutex::new(game)));
        rooms.players.insert(player, code.clone());

        info!(room = %code, player = %player, name, "room created");
        Ok((code, inspected))
    }

    /// Seat `player` in an existing lobby.
    pub fn join_room(&self, code: &RoomCode, player: PlayerId, name: &str) -> Result<(), SessionError> {
        self.join_room_with(code, player, name, |_| ())
    }

    /// `join_room`, then run `inspect` on the game under the same room lock.
    pub fn join_room_with<R>(
        &self,
        code: &RoomCode,
        player: PlayerId,
        name: &str,
        inspect: impl FnOnce(&Game) -> R,
    ) -> Result<R, SessionError> {
        let mut rooms = self.rooms.write();
        if rooms.players.contains_key(&player) {
            return Err(SessionError::PlayerAlreadyInRoom);
        }
        let shared = rooms.games.get(code).cloned().ok_or(SessionError::RoomNotFound)?;

        let inspected = {
            let mut game = shared.lock();
            if game.is_started() {
                return Err(SessionError::GameAlreadyStarted);
            }
            let max = self.config.game.max_players;
            if game.player_count() >= max {
                return Err(SessionError::RoomFull { max });
            }
            game.add_player(player, name)?;
            inspect(&*game)
        };

        rooms.players.insert(player, code.clone());
        info!(room = %code, player = %player, name, "player joined");
        Ok(inspected)
    }

    /// Start the game in `player`'s room. Only the host may.
    pub fn start_game(&self, player: PlayerId) -> Result<RoomCode, SessionError> {
        self.start_game_with(player, |_| ()).map(|(code, ())| code)
    }

    /// `start_game`, then run `inspect` on the dealt game under the same
    /// room lock.
    pub fn start_game_with<R>(
        &self,
        player: PlayerId,
        inspect: impl FnOnce(&Game) -> R,
    ) -> Result<(RoomCode, R), SessionError> {
        let (code, result) =
            self.with_player_room(player, |game| game.start(player).map(|()| inspect(&*game)))?;
        Ok((code, result?))
    }

    /// Unseat `player`, deleting the room if it empties.
    ///
    /// `None` if the player was not in a room.
    pub fn remove_player(&self, player: PlayerId) -> Option<Departure> {
        self.remove_player_with(player, |_| ()).map(|(departure, ())| departure)
    }

    /// `remove_player`, then run `inspect` on what is left of the game
    /// under the same room lock.
    pub fn remove_player_with<R>(
        &self,
        player: PlayerId,
        inspect: impl FnOnce(&Game) -> R,
    ) -> Option<(Departure, R)> {
        let mut rooms = self.rooms.write();
        let code = rooms.players.remove(&player)?;
        let shared = rooms.games.get(&code).cloned()?;

        let (removed, room_closed, inspected) = {
            let mut game = shared.lock();
            let removed = game.remove_player(player)?;
            (removed, game.is_empty(), inspect(&*game))
        };

        if room_closed {
            rooms.games.remove(&code);
            info!(room = %code, "room deleted (empty)");
        } else {
            debug!(room = %code, player = %player, new_host = ?removed.new_host, "player left");
        }

        Some((Departure { room: code, removed, room_closed }, inspected))
    }

    /// Room code `player` is seated in.
    #[must_use]
    pub fn room_of(&self, player: PlayerId) -> Option<RoomCode> {
        self.rooms.read().players.get(&player).cloned()
    }

    /// Handle to a room's game.
    #[must_use]
    pub fn room(&self, code: &RoomCode) -> Option<SharedGame> {
        self.rooms.read().games.get(code).cloned()
    }

    /// Run `f` with exclusive access to a room's game.
    pub fn with_room<R>(&self, code: &RoomCode, f: impl FnOnce(&mut Game) -> R) -> Result<R, SessionError> {
        let shared = self.room(code).ok_or(SessionError::RoomNotFound)?;
        let mut game = shared.lock();
        Ok(f(&mut game))
    }

    /// Run `f` with exclusive access to the game `player` is seated in.
    pub fn with_player_room<R>(
        &self,
        player: PlayerId,
        f: impl FnOnce(&mut Game) -> R,
    ) -> Result<(RoomCode, R), SessionError> {
        let (code, shared) = {
            let rooms = self.rooms.read();
            let code = rooms.players.get(&player).cloned().ok_or(SessionError::PlayerNotInRoom)?;
            let shared = rooms.games.get(&code).cloned().ok_or(SessionError::RoomNotFound)?;
            (code, shared)
        };
        let mut game = shared.lock();
        let result = f(&mut game);
        Ok((code, result))
    }

    /// Players seated in a room, in turn order.
    pub fn members(&self, code: &RoomCode) -> Result<Vec<PlayerId>, SessionError> {
        self.with_room(code, |game| game.seats().iter().map(|s| s.id()).collect())
    }

    #[must_use]
    pub fn room_count(&self) -> usize {
        self.rooms.read().games.len()
    }

    #[must_use]
    pub fn player_count(&self) -> usize {
        self.rooms.read().players.len()
    }
}

impl Default for SessionRegistry {
    fn default() -> Self {
        Self::new(SessionConfig::default())
    }
}
