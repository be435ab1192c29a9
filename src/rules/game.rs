//! The UNO game state machine.
//!
//! `Lobby -> Active -> Finished`. Every operation validates completely
//! before it mutates anything, so a returned `Err` means the game is
//! exactly as it was.

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::cards::{Card, CardFace, CardKind, Color};
use crate::core::{GameConfig, GameRng, PlayerId};
use crate::effects::{CustomEffectNotice, PlayEffect, TargetRule};
use crate::zones::{Deck, DiscardPile};

use super::error::RuleError;

/// Lifecycle phase of a game.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GamePhase {
    /// Accepting joins; no turn order yet.
    Lobby,
    /// Turns proceed.
    Active,
    /// A player emptied their hand.
    Finished,
}

/// Direction of play around the table.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Direction {
    Clockwise,
    CounterClockwise,
}

impl Direction {
    /// `+1` or `-1`.
    #[must_use]
    pub const fn sign(self) -> isize {
        match self {
            Direction::Clockwise => 1,
            Direction::CounterClockwise => -1,
        }
    }

    #[must_use]
    pub const fn reversed(self) -> Self {
        match self {
            Direction::Clockwise => Direction::CounterClockwise,
            Direction::CounterClockwise => Direction::Clockwise,
        }
    }
}

/// A seated player and their private hand.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Seat {
    id: PlayerId,
    name: String,
    hand: Vec<Card>,
    called_uno: bool,
}

impl Seat {
    fn new(id: PlayerId, name: String) -> Self {
        Self { id, name, hand: Vec::new(), called_uno: false }
    }

    #[must_use]
    pub fn id(&self) -> PlayerId {
        self.id
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The private hand. Only ever shown to this seat's player.
    #[must_use]
    pub fn hand(&self) -> &[Card] {
        &self.hand
    }

    #[must_use]
    pub fn hand_size(&self) -> usize {
        self.hand.len()
    }

    #[must_use]
    pub fn called_uno(&self) -> bool {
        self.called_uno
    }
}

/// Result of a successful `play_card`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PlayOutcome {
    /// The card now on top of the discard pile.
    pub card: Card,
    /// Effect the card resolved to.
    pub effect: PlayEffect,
    /// Set when this play emptied the player's hand.
    pub winner: Option<PlayerId>,
    /// Set when a custom card was played.
    pub custom_effect: Option<CustomEffectNotice>,
    /// Whose turn it is now. `None` once the game is finished.
    pub next_player: Option<PlayerId>,
}

/// Result of a successful `draw_card`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct DrawOutcome {
    /// Cards owed: the draw stack, or one.
    pub requested: usize,
    /// Cards actually drawn; fewer only when deck and discard ran dry.
    pub drawn: usize,
}

/// Result of `challenge_uno`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChallengeOutcome {
    pub target_id: PlayerId,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub target_name: Option<String>,
    pub penalized: bool,
    /// Penalty cards actually drawn.
    pub drawn: usize,
}

/// A seat removed by `remove_player`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RemovedPlayer {
    pub id: PlayerId,
    pub name: String,
    /// New host, if the removed player held that role and anyone is left.
    pub new_host: Option<PlayerId>,
    /// Cards from the removed hand returned to the bottom of the deck.
    pub returned_cards: usize,
    /// Seats left at the table.
    pub remaining: usize,
}

/// A single room's game.
///
/// Pure state container: no locking, no I/O. The session registry
/// serializes access.
#[derive(Clone, Debug)]
pub struct Game {
    room_code: String,
    config: GameConfig,
    seats: Vec<Seat>,
    host: Option<PlayerId>,
    deck: Deck,
    discard: DiscardPile,
    current: usize,
    direction: Direction,
    current_color: Option<Color>,
    draw_stack: u32,
    phase: GamePhase,
    winner: Option<PlayerId>,
    rng: GameRng,
}

impl Game {
    /// Create an empty game in the lobby.
    #[must_use]
    pub fn new(room_code: impl Into<String>, config: GameConfig, rng: GameRng) -> Self {
        Self {
            room_code: room_code.into(),
            config,
            seats: Vec::new(),
            host: None,
            deck: Deck::new(),
            discard: DiscardPile::new(),
            current: 0,
            direction: Direction::Clockwise,
            current_color: None,
            draw_stack: 0,
            phase: GamePhase::Lobby,
            winner: None,
            rng,
        }
    }

    // === Accessors ===

    #[must_use]
    pub fn room_code(&self) -> &str {
        &self.room_code
    }

    #[must_use]
    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    #[must_use]
    pub fn phase(&self) -> GamePhase {
        self.phase
    }

    /// Has `start` been called? Stays true once finished.
    #[must_use]
    pub fn is_started(&self) -> bool {
        self.phase != GamePhase::Lobby
    }

    #[must_use]
    pub fn seats(&self) -> &[Seat] {
        &self.seats
    }

    #[must_use]
    pub fn seat(&self, player: PlayerId) -> Option<&Seat> {
        self.seats.iter().find(|s| s.id == player)
    }

    #[must_use]
    pub fn player_count(&self) -> usize {
        self.seats.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.seats.is_empty()
    }

    #[must_use]
    pub fn host(&self) -> Option<PlayerId> {
        self.host
    }

    /// The player whose turn it is. `None` unless the game is active.
    #[must_use]
    pub fn current_player(&self) -> Option<PlayerId> {
        if self.phase != GamePhase::Active {
            return None;
        }
        self.seats.get(self.current).map(|s| s.id)
    }

    #[must_use]
    pub fn current_index(&self) -> usize {
        self.current
    }

    #[must_use]
    pub fn direction(&self) -> Direction {
        self.direction
    }

    #[must_use]
    pub fn current_color(&self) -> Option<Color> {
        self.current_color
    }

    #[must_use]
    pub fn draw_stack(&self) -> u32 {
        self.draw_stack
    }

    #[must_use]
    pub fn top_card(&self) -> Option<&Card> {
        self.discard.top()
    }

    #[must_use]
    pub fn deck_len(&self) -> usize {
        self.deck.len()
    }

    #[must_use]
    pub fn discard_len(&self) -> usize {
        self.discard.len()
    }

    /// A player's own hand. Never expose this to anyone else.
    #[must_use]
    pub fn hand(&self, player: PlayerId) -> Option<&[Card]> {
        self.seat(player).map(Seat::hand)
    }

    #[must_use]
    pub fn winner(&self) -> Option<PlayerId> {
        self.winner
    }

    /// Cards across deck, discard pile and every hand.
    #[must_use]
    pub fn total_cards(&self) -> usize {
        self.deck.len() + self.discard.len() + self.seats.iter().map(Seat::hand_size).sum::<usize>()
    }

    // === Seating ===

    /// Seat a player. The first player seated becomes host.
    pub fn add_player(&mut self, player: PlayerId, name: impl Into<String>) -> Result<(), RuleError> {
        if self.phase != GamePhase::Lobby {
            return Err(RuleError::GameAlreadyStarted);
        }
        if self.seat_index(player).is_some() {
            return Err(RuleError::PlayerAlreadySeated);
        }

        self.seats.push(Seat::new(player, name.into()));
        if self.host.is_none() {
            self.host = Some(player);
        }
        Ok(())
    }

    /// Unseat a player.
    ///
    /// Their cards go to the bottom of the deck so the card count is
    /// conserved. Host passes to the new first seat. The turn stays with
    /// the same player when possible, else clamps to seat 0.
    pub fn remove_player(&mut self, player: PlayerId) -> Option<RemovedPlayer> {
        let index = self.seat_index(player)?;
        let seat = self.seats.remove(index);

        let returned_cards = seat.hand.len();
        for card in seat.hand {
            self.deck.push_bottom(card);
        }

        let mut new_host = None;
        if self.host == Some(player) {
            self.host = self.seats.first().map(|s| s.id);
            new_host = self.host;
        }

        if self.seats.is_empty() {
            self.current = 0;
        } else if self.phase != GamePhase::Lobby {
            if index < self.current {
                self.current -= 1;
            } else if self.current >= self.seats.len() {
                self.current = 0;
            }
        }

        debug!(room = %self.room_code, player = %player, remaining = self.seats.len(), "player removed");

        Some(RemovedPlayer {
            id: seat.id,
            name: seat.name,
            new_host,
            returned_cards,
            remaining: self.seats.len(),
        })
    }

    // === Start ===

    /// Deal and reveal. Only the host may start, with enough players.
    pub fn start(&mut self, requester: PlayerId) -> Result<(), RuleError> {
        if self.phase != GamePhase::Lobby {
            return Err(RuleError::GameAlreadyStarted);
        }
        if self.seat_index(requester).is_none() {
            return Err(RuleError::PlayerNotFound);
        }
        if self.host != Some(requester) {
            return Err(RuleError::NotHost);
        }
        if self.seats.len() < self.config.min_players {
            return Err(RuleError::NotEnoughPlayers {
                have: self.seats.len(),
                need: self.config.min_players,
            });
        }

        // Work on copies; commit only once dealing and the reveal succeed.
        let mut rng = self.rng.clone();
        let mut deck = Deck::build(&self.config.custom_cards);
        deck.shuffle(&mut rng);

        let mut hands = Vec::with_capacity(self.seats.len());
        for _ in &self.seats {
            let mut hand = Vec::with_capacity(self.config.starting_hand_size);
            for _ in 0..self.config.starting_hand_size {
                hand.push(deck.draw().ok_or(RuleError::DeckExhausted)?);
            }
            hands.push(hand);
        }

        let first = Self::reveal_first_card(&mut deck).ok_or(RuleError::DeckExhausted)?;

        for (seat, hand) in self.seats.iter_mut().zip(hands) {
            seat.hand = hand;
            seat.called_uno = false;
        }
        self.deck = deck;
        self.discard = DiscardPile::new();
        self.discard.push(first);
        self.rng = rng;
        self.direction = Direction::Clockwise;
        self.current = 0;
        self.draw_stack = 0;
        self.winner = None;
        self.phase = GamePhase::Active;
        self.apply_opening_card(first);

        info!(
            room = %self.room_code,
            players = self.seats.len(),
            first_card = %first,
            "game started"
        );
        Ok(())
    }

    /// Draw until a standard card shows; wild and custom cards go to the bottom.
    fn reveal_first_card(deck: &mut Deck) -> Option<Card> {
        for _ in 0..deck.len() {
            let card = deck.draw()?;
            if card.is_wild_or_custom() {
                deck.push_bottom(card);
            } else {
                return Some(card);
            }
        }
        None
    }

    fn apply_opening_card(&mut self, card: Card) {
        self.current_color = Some(card.color());
        match card.face() {
            CardFace::Skip => self.current = 1 % self.seats.len(),
            CardFace::Reverse => {
                self.direction = self.direction.reversed();
                self.current = self.seats.len() - 1;
            }
            CardFace::DrawTwo => self.draw_stack = 2,
            _ => {}
        }
    }

    // === Turn actions ===

    /// Play the card at `card_index` from the current player's hand.
    ///
    /// `chosen_color` applies to wilds and color-choice custom cards; an
    /// absent or unplayable choice falls back to the hand's most common
    /// color. `target` is required by hand-swap and gift-cards.
    pub fn play_card(
        &mut self,
        player: PlayerId,
        card_index: usize,
        chosen_color: Option<Color>,
        target: Option<PlayerId>,
    ) -> Result<PlayOutcome, RuleError> {
        self.ensure_active()?;
        let seat_index = self.seat_index(player).ok_or(RuleError::PlayerNotFound)?;
        if seat_index != self.current {
            return Err(RuleError::NotYourTurn);
        }

        let card = *self.seats[seat_index]
            .hand
            .get(card_index)
            .ok_or(RuleError::InvalidCardIndex)?;

        if self.draw_stack > 0 && card.face().draw_penalty().is_none() {
            return Err(RuleError::MustResolveDrawStack { pending: self.draw_stack });
        }
        if !self.is_legal(&card) {
            return Err(RuleError::IllegalCard);
        }

        let effect = PlayEffect::for_face(card.face(), self.seats.len(), self.config.gift_card_count);
        let target_index = match effect.target_rule() {
            None => None,
            Some(rule) => Some(self.resolve_target(seat_index, target, rule)?),
        };

        // Validation done; mutate.
        let seat = &mut self.seats[seat_index];
        seat.hand.remove(card_index);
        if seat.hand.len() != 1 {
            seat.called_uno = false;
        }
        self.discard.push(card);

        if card.chooses_color() {
            let color = chosen_color
                .filter(|c| c.is_playable())
                .unwrap_or_else(|| most_common_color(&self.seats[seat_index].hand));
            self.current_color = Some(color);
        } else if card.kind() != CardKind::Custom {
            self.current_color = Some(card.color());
        }

        match effect {
            PlayEffect::Reverse => self.direction = self.direction.reversed(),
            PlayEffect::Penalty { cards } => self.draw_stack += cards,
            PlayEffect::SwapHands => {
                if let Some(other) = target_index {
                    let mine = std::mem::take(&mut self.seats[seat_index].hand);
                    self.seats[seat_index].hand = std::mem::replace(&mut self.seats[other].hand, mine);
                    self.seats[seat_index].called_uno = false;
                    self.seats[other].called_uno = false;
                }
            }
            PlayEffect::Gift { cards } => {
                if let Some(other) = target_index {
                    let gifted = self.deck.draw_many(cards, &mut self.discard, &mut self.rng);
                    let seat = &mut self.seats[other];
                    seat.hand.extend(gifted);
                    seat.called_uno = false;
                }
            }
            PlayEffect::Advance { .. } | PlayEffect::RepeatTurn | PlayEffect::Cosmetic => {}
        }

        let custom_effect = match card.face() {
            CardFace::Custom(kind) => Some(CustomEffectNotice {
                kind,
                player_id: player,
                player_name: self.seats[seat_index].name.clone(),
                target_id: target_index.map(|i| self.seats[i].id),
                target_name: target_index.map(|i| self.seats[i].name.clone()),
            }),
            _ => None,
        };

        if self.seats[seat_index].hand.is_empty() {
            self.phase = GamePhase::Finished;
            self.winner = Some(player);
            info!(room = %self.room_code, winner = %player, "game over");
            return Ok(PlayOutcome {
                card,
                effect,
                winner: Some(player),
                custom_effect,
                next_player: None,
            });
        }

        if let Some(steps) = effect.turn_steps() {
            self.advance(steps);
        }

        debug!(
            room = %self.room_code,
            player = %player,
            card = %card,
            next = self.current,
            draw_stack = self.draw_stack,
            "card played"
        );

        Ok(PlayOutcome {
            card,
            effect,
            winner: None,
            custom_effect,
            next_player: self.current_player(),
        })
    }

    /// Draw the pending stack (or one card) and end the turn.
    pub fn draw_card(&mut self, player: PlayerId) -> Result<DrawOutcome, RuleError> {
        self.ensure_active()?;
        let seat_index = self.seat_index(player).ok_or(RuleError::PlayerNotFound)?;
        if seat_index != self.current {
            return Err(RuleError::NotYourTurn);
        }

        let requested = (self.draw_stack as usize).max(1);
        let drawn = self.deck.draw_many(requested, &mut self.discard, &mut self.rng);
        let count = drawn.len();

        let seat = &mut self.seats[seat_index];
        seat.hand.extend(drawn);
        seat.called_uno = false;
        self.draw_stack = 0;
        self.advance(1);

        debug!(room = %self.room_code, player = %player, requested, drawn = count, "cards drawn");
        Ok(DrawOutcome { requested, drawn: count })
    }

    /// Declare UNO. Only sticks when holding exactly one card.
    ///
    /// Returns whether the call was recorded.
    pub fn call_uno(&mut self, player: PlayerId) -> Result<bool, RuleError> {
        let seat_index = self.seat_index(player).ok_or(RuleError::PlayerNotFound)?;
        let seat = &mut self.seats[seat_index];
        if seat.hand.len() == 1 {
            seat.called_uno = true;
            return Ok(true);
        }
        Ok(false)
    }

    /// Catch a player sitting on one card without having called UNO.
    ///
    /// Not turn-gated: anyone may challenge at any time.
    pub fn challenge_uno(&mut self, target: PlayerId) -> ChallengeOutcome {
        let Some(seat_index) = self.seat_index(target) else {
            return ChallengeOutcome { target_id: target, target_name: None, penalized: false, drawn: 0 };
        };

        let seat = &self.seats[seat_index];
        let name = Some(seat.name.clone());
        if seat.hand.len() != 1 || seat.called_uno {
            return ChallengeOutcome { target_id: target, target_name: name, penalized: false, drawn: 0 };
        }

        let penalty = self.deck.draw_many(self.config.uno_penalty, &mut self.discard, &mut self.rng);
        let drawn = penalty.len();
        self.seats[seat_index].hand.extend(penalty);

        info!(room = %self.room_code, player = %target, drawn, "missed UNO penalized");
        ChallengeOutcome { target_id: target, target_name: name, penalized: true, drawn }
    }

    /// Hand indices the player could legally play right now.
    #[must_use]
    pub fn legal_plays(&self, player: PlayerId) -> Vec<usize> {
        if self.current_player() != Some(player) {
            return Vec::new();
        }
        let Some(seat) = self.seat(player) else {
            return Vec::new();
        };

        seat.hand
            .iter()
            .enumerate()
            .filter(|(_, card)| self.draw_stack == 0 || card.face().draw_penalty().is_some())
            .filter(|(_, card)| self.is_legal(card))
            .filter(|(_, card)| {
                let effect = PlayEffect::for_face(card.face(), self.seats.len(), self.config.gift_card_count);
                effect.target_rule() != Some(TargetRule::Opponent) || self.seats.len() > 1
            })
            .map(|(i, _)| i)
            .collect()
    }

    // === Internals ===

    fn seat_index(&self, player: PlayerId) -> Option<usize> {
        self.seats.iter().position(|s| s.id == player)
    }

    fn ensure_active(&self) -> Result<(), RuleError> {
        if self.phase == GamePhase::Active {
            Ok(())
        } else {
            Err(RuleError::GameNotActive)
        }
    }

    fn is_legal(&self, card: &Card) -> bool {
        match self.discard.top() {
            Some(top) => card.can_play_on(top, self.current_color.unwrap_or(top.color())),
            None => true,
        }
    }

    fn resolve_target(
        &self,
        actor: usize,
        target: Option<PlayerId>,
        rule: TargetRule,
    ) -> Result<usize, RuleError> {
        let index = target
            .and_then(|t| self.seat_index(t))
            .ok_or(RuleError::InvalidTarget)?;
        if rule == TargetRule::Opponent && index == actor {
            return Err(RuleError::InvalidTarget);
        }
        Ok(index)
    }

    /// `index = (index + direction * steps) mod player_count`.
    fn advance(&mut self, steps: usize) {
        let count = self.seats.len() as isize;
        if count == 0 {
            return;
        }
        let next = self.current as isize + self.direction.sign() * steps as isize;
        self.current = next.rem_euclid(count) as usize;
    }
}

/// Most frequent playable color in `hand`; ties go red, yellow, green, blue.
fn most_common_color(hand: &[Card]) -> Color {
    let mut best = Color::Red;
    let mut best_count = 0;
    for color in Color::PLAYABLE {
        let count = hand.iter().filter(|c| c.color() == color).count();
        if count > best_count {
            best = color;
            best_count = count;
        }
    }
    best
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cards::CustomKind;
    use crate::zones::STANDARD_DECK_SIZE;

    const A: PlayerId = PlayerId::new(1);
    const B: PlayerId = PlayerId::new(2);
    const C: PlayerId = PlayerId::new(3);

    fn lobby(players: &[PlayerId]) -> Game {
        let mut game = Game::new("TEST01", GameConfig::default(), GameRng::new(42));
        for (i, &p) in players.iter().enumerate() {
            game.add_player(p, format!("P{i}")).unwrap();
        }
        game
    }

    fn started(players: &[PlayerId]) -> Game {
        let mut game = lobby(players);
        game.start(players[0]).unwrap();
        game
    }

    /// Overwrite the table with known hands and a known top card.
    fn rig(game: &mut Game, hands: Vec<Vec<Card>>, top: Card) {
        for (seat, hand) in game.seats.iter_mut().zip(hands) {
            seat.hand = hand;
            seat.called_uno = false;
        }
        game.discard = DiscardPile::new();
        game.discard.push(top);
        game.deck = (0..40).map(|i| Card::number(Color::Green, (i % 9) as u8 + 1).unwrap()).collect();
        game.current = 0;
        game.direction = Direction::Clockwise;
        game.current_color = Some(top.color());
        game.draw_stack = 0;
    }

    fn red(n: u8) -> Card {
        Card::number(Color::Red, n).unwrap()
    }

    fn blue(n: u8) -> Card {
        Card::number(Color::Blue, n).unwrap()
    }

    // === Lobby / start ===

    #[test]
    fn test_first_player_is_host() {
        let game = lobby(&[A, B]);
        assert_eq!(game.host(), Some(A));
        assert_eq!(game.phase(), GamePhase::Lobby);
        assert_eq!(game.current_player(), None);
    }

    #[test]
    fn test_duplicate_seat_rejected() {
        let mut game = lobby(&[A]);
        assert_eq!(game.add_player(A, "again"), Err(RuleError::PlayerAlreadySeated));
    }

    #[test]
    fn test_start_requires_host_and_players() {
        let mut game = lobby(&[A]);
        assert_eq!(game.start(A), Err(RuleError::NotEnoughPlayers { have: 1, need: 2 }));

        game.add_player(B, "B").unwrap();
        assert_eq!(game.start(B), Err(RuleError::NotHost));
        assert_eq!(game.start(C), Err(RuleError::PlayerNotFound));
        assert_eq!(game.phase(), GamePhase::Lobby);

        game.start(A).unwrap();
        assert_eq!(game.phase(), GamePhase::Active);
        assert_eq!(game.start(A), Err(RuleError::GameAlreadyStarted));
        assert_eq!(game.add_player(C, "late"), Err(RuleError::GameAlreadyStarted));
    }

    #[test]
    fn test_start_deals_and_reveals_standard_card() {
        for seed in 0..20 {
            let mut game = Game::new("SEED", GameConfig::default(), GameRng::new(seed));
            for p in [A, B, C] {
                game.add_player(p, "p").unwrap();
            }
            game.start(A).unwrap();

            for seat in game.seats() {
                assert_eq!(seat.hand_size(), 7);
            }
            let top = game.top_card().unwrap();
            assert!(!top.is_wild_or_custom());
            assert_eq!(game.current_color(), Some(top.color()));
            assert_eq!(game.discard_len(), 1);
            assert_eq!(game.total_cards(), STANDARD_DECK_SIZE + CustomKind::ALL.len());
        }
    }

    #[test]
    fn test_start_fails_cleanly_when_deck_too_small() {
        let config = GameConfig::default().with_starting_hand_size(60);
        let mut game = Game::new("BIG", config, GameRng::new(1));
        game.add_player(A, "A").unwrap();
        game.add_player(B, "B").unwrap();

        assert_eq!(game.start(A), Err(RuleError::DeckExhausted));
        assert_eq!(game.phase(), GamePhase::Lobby);
        assert_eq!(game.total_cards(), 0);
    }

    #[test]
    fn test_opening_skip() {
        let mut game = started(&[A, B, C]);
        rig(&mut game, vec![vec![], vec![], vec![]], Card::skip(Color::Red).unwrap());
        game.apply_opening_card(Card::skip(Color::Red).unwrap());
        assert_eq!(game.current_player(), Some(B));
    }

    #[test]
    fn test_opening_reverse() {
        let mut game = started(&[A, B, C]);
        rig(&mut game, vec![vec![], vec![], vec![]], Card::reverse(Color::Red).unwrap());
        game.apply_opening_card(Card::reverse(Color::Red).unwrap());
        assert_eq!(game.direction(), Direction::CounterClockwise);
        assert_eq!(game.current_player(), Some(C));
    }

    #[test]
    fn test_opening_draw_two() {
        let mut game = started(&[A, B, C]);
        rig(&mut game, vec![vec![], vec![], vec![]], Card::draw_two(Color::Red).unwrap());
        game.apply_opening_card(Card::draw_two(Color::Red).unwrap());
        assert_eq!(game.draw_stack(), 2);
        assert_eq!(game.current_player(), Some(A));
    }

    // === Turn order ===

    #[test]
    fn test_number_card_advances_one() {
        let mut game = started(&[A, B, C]);
        rig(&mut game, vec![vec![red(3), red(4)], vec![red(5)], vec![red(6)]], red(1));

        let outcome = game.play_card(A, 0, None, None).unwrap();
        assert_eq!(outcome.next_player, Some(B));
        assert_eq!(game.current_color(), Some(Color::Red));
        assert_eq!(game.top_card(), Some(&red(3)));
    }

    #[test]
    fn test_skip_three_players() {
        let mut game = started(&[A, B, C]);
        rig(&mut game, vec![vec![Card::skip(Color::Red).unwrap(), red(2)], vec![red(5)], vec![red(6)]], red(1));

        game.play_card(A, 0, None, None).unwrap();
        assert_eq!(game.current_player(), Some(C));
        assert_eq!(game.direction(), Direction::Clockwise);
    }

    #[test]
    fn test_reverse_three_players() {
        let mut game = started(&[A, B, C]);
        rig(&mut game, vec![vec![Card::reverse(Color::Red).unwrap(), red(2)], vec![red(5)], vec![red(6)]], red(1));

        game.play_card(A, 0, None, None).unwrap();
        assert_eq!(game.direction(), Direction::CounterClockwise);
        assert_eq!(game.current_player(), Some(C));
    }

    #[test]
    fn test_reverse_two_players_is_skip() {
        let mut game = started(&[A, B]);
        rig(&mut game, vec![vec![Card::reverse(Color::Red).unwrap(), red(2)], vec![red(5)]], red(1));

        game.play_card(A, 0, None, None).unwrap();
        assert_eq!(game.current_player(), Some(A));
        assert_eq!(game.direction(), Direction::Clockwise);
    }

    // === Validation ===

    #[test]
    fn test_rejections_leave_state_unchanged() {
        let mut game = started(&[A, B, C]);
        rig(&mut game, vec![vec![blue(7), red(2)], vec![red(5)], vec![red(6)]], red(1));
        let hand_before = game.hand(A).unwrap().to_vec();

        assert_eq!(game.play_card(B, 0, None, None), Err(RuleError::NotYourTurn));
        assert_eq!(game.play_card(PlayerId::new(99), 0, None, None), Err(RuleError::PlayerNotFound));
        assert_eq!(game.play_card(A, 5, None, None), Err(RuleError::InvalidCardIndex));
        assert_eq!(game.play_card(A, 0, None, None), Err(RuleError::IllegalCard));
        assert_eq!(game.draw_card(B), Err(RuleError::NotYourTurn));

        assert_eq!(game.hand(A).unwrap(), hand_before.as_slice());
        assert_eq!(game.current_player(), Some(A));
        assert_eq!(game.top_card(), Some(&red(1)));
        assert_eq!(game.discard_len(), 1);
    }

    #[test]
    fn test_value_match_changes_color() {
        let mut game = started(&[A, B]);
        rig(&mut game, vec![vec![blue(1), red(2)], vec![red(5)]], red(1));

        game.play_card(A, 0, None, None).unwrap();
        assert_eq!(game.current_color(), Some(Color::Blue));
    }

    // === Draw stack ===

    #[test]
    fn test_draw_stack_accumulates_and_resolves() {
        let mut game = started(&[A, B, C]);
        rig(
            &mut game,
            vec![
                vec![Card::draw_two(Color::Red).unwrap(), red(2)],
                vec![Card::draw_two(Color::Blue).unwrap(), blue(3)],
                vec![red(7), red(8)],
            ],
            red(1),
        );

        game.play_card(A, 0, None, None).unwrap();
        assert_eq!(game.draw_stack(), 2);
        assert_eq!(game.current_player(), Some(B));

        assert_eq!(
            game.play_card(B, 1, None, None),
            Err(RuleError::MustResolveDrawStack { pending: 2 })
        );

        game.play_card(B, 0, None, None).unwrap();
        assert_eq!(game.draw_stack(), 4);
        assert_eq!(game.current_player(), Some(C));

        assert_eq!(game.legal_plays(C), Vec::<usize>::new());
        let outcome = game.draw_card(C).unwrap();
        assert_eq!(outcome, DrawOutcome { requested: 4, drawn: 4 });
        assert_eq!(game.hand(C).unwrap().len(), 6);
        assert_eq!(game.draw_stack(), 0);
        assert_eq!(game.current_player(), Some(A));
    }

    #[test]
    fn test_draw_four_stacks_on_draw_two() {
        let mut game = started(&[A, B]);
        rig(
            &mut game,
            vec![vec![Card::draw_two(Color::Red).unwrap(), red(2)], vec![Card::wild_draw_four(), blue(3)]],
            red(1),
        );

        game.play_card(A, 0, None, None).unwrap();
        game.play_card(B, 0, Some(Color::Blue), None).unwrap();
        assert_eq!(game.draw_stack(), 6);
        assert_eq!(game.current_color(), Some(Color::Blue));
        assert_eq!(game.current_player(), Some(A));
    }

    #[test]
    fn test_draw_single_card_ends_turn() {
        let mut game = started(&[A, B]);
        rig(&mut game, vec![vec![blue(9)], vec![red(5)]], red(1));
        game.seats[0].called_uno = true;

        let outcome = game.draw_card(A).unwrap();
        assert_eq!(outcome, DrawOutcome { requested: 1, drawn: 1 });
        assert_eq!(game.hand(A).unwrap().len(), 2);
        assert!(!game.seat(A).unwrap().called_uno());
        assert_eq!(game.current_player(), Some(B));
    }

    #[test]
    fn test_draw_reshuffles_discard() {
        let mut game = started(&[A, B]);
        rig(&mut game, vec![vec![blue(9)], vec![red(5)]], red(1));
        game.deck = [Card::number(Color::Yellow, 4).unwrap()].into_iter().collect();
        game.discard = [red(2), red(3), red(4), red(5), red(6)].into_iter().collect();
        game.draw_stack = 2;
        let total = game.total_cards();

        let outcome = game.draw_card(A).unwrap();

        assert_eq!(outcome.drawn, 2);
        assert_eq!(game.discard_len(), 1);
        assert_eq!(game.top_card(), Some(&red(6)));
        assert_eq!(game.deck_len(), 3);
        assert_eq!(game.total_cards(), total);
    }

    #[test]
    fn test_draw_tolerates_exhausted_pool() {
        let mut game = started(&[A, B]);
        rig(&mut game, vec![vec![blue(9)], vec![red(5)]], red(1));
        game.deck = Deck::new();
        game.draw_stack = 4;

        let outcome = game.draw_card(A).unwrap();
        assert_eq!(outcome, DrawOutcome { requested: 4, drawn: 0 });
        assert_eq!(game.draw_stack(), 0);
        assert_eq!(game.current_player(), Some(B));
    }

    // === Color choice ===

    #[test]
    fn test_wild_uses_chosen_color() {
        let mut game = started(&[A, B]);
        rig(&mut game, vec![vec![Card::wild(), red(2)], vec![red(5)]], red(1));

        game.play_card(A, 0, Some(Color::Green), None).unwrap();
        assert_eq!(game.current_color(), Some(Color::Green));
    }

    #[test]
    fn test_wild_auto_picks_most_common_color() {
        let mut game = started(&[A, B]);
        rig(&mut game, vec![vec![Card::wild(), blue(2), blue(3), red(4)], vec![red(5)]], red(1));

        // An unplayable choice is ignored.
        game.play_card(A, 0, Some(Color::Wild), None).unwrap();
        assert_eq!(game.current_color(), Some(Color::Blue));
    }

    #[test]
    fn test_color_tie_break() {
        assert_eq!(most_common_color(&[blue(1), Card::number(Color::Yellow, 2).unwrap()]), Color::Yellow);
        assert_eq!(most_common_color(&[Card::number(Color::Green, 1).unwrap(), blue(2)]), Color::Green);
        assert_eq!(most_common_color(&[Card::wild()]), Color::Red);
        assert_eq!(most_common_color(&[]), Color::Red);
    }

    // === Custom cards ===

    #[test]
    fn test_big_duro_repeats_turn_with_color_choice() {
        let mut game = started(&[A, B, C]);
        rig(&mut game, vec![vec![Card::custom(CustomKind::BigDuro), red(2)], vec![red(5)], vec![red(6)]], red(1));

        let outcome = game.play_card(A, 0, Some(Color::Yellow), None).unwrap();
        assert_eq!(outcome.next_player, Some(A));
        assert_eq!(game.current_color(), Some(Color::Yellow));
        assert_eq!(outcome.custom_effect.unwrap().kind, CustomKind::BigDuro);
    }

    #[test]
    fn test_big_tyson_swaps_hands() {
        let mut game = started(&[A, B, C]);
        rig(
            &mut game,
            vec![vec![Card::custom(CustomKind::BigTyson), red(2)], vec![blue(5), blue(6), blue(7)], vec![red(6)]],
            red(1),
        );

        let outcome = game.play_card(A, 0, None, Some(B)).unwrap();

        assert_eq!(game.hand(A).unwrap(), &[blue(5), blue(6), blue(7)]);
        assert_eq!(game.hand(B).unwrap(), &[red(2)]);
        assert_eq!(game.current_color(), Some(Color::Red));
        assert_eq!(game.current_player(), Some(B));
        let notice = outcome.custom_effect.unwrap();
        assert_eq!(notice.target_id, Some(B));
        assert_eq!(notice.target_name.as_deref(), Some("P1"));
    }

    #[test]
    fn test_big_tyson_rejects_bad_targets() {
        let mut game = started(&[A, B]);
        rig(&mut game, vec![vec![Card::custom(CustomKind::BigTyson), red(2)], vec![blue(5)]], red(1));

        for target in [None, Some(A), Some(PlayerId::new(42))] {
            assert_eq!(game.play_card(A, 0, None, target), Err(RuleError::InvalidTarget));
        }
        assert_eq!(game.hand(A).unwrap().len(), 2);
        assert_eq!(game.discard_len(), 1);
    }

    #[test]
    fn test_chugg_gifts_cards() {
        let mut game = started(&[A, B, C]);
        rig(&mut game, vec![vec![Card::custom(CustomKind::Chugg), red(2)], vec![blue(5)], vec![red(6)]], red(1));
        let total = game.total_cards();

        game.play_card(A, 0, None, Some(C)).unwrap();

        assert_eq!(game.hand(C).unwrap().len(), 6);
        assert_eq!(game.current_player(), Some(B));
        assert_eq!(game.total_cards(), total);
    }

    #[test]
    fn test_chugg_allows_self_target() {
        let mut game = started(&[A, B]);
        rig(&mut game, vec![vec![Card::custom(CustomKind::Chugg), red(2)], vec![blue(5)]], red(1));

        game.play_card(A, 0, None, Some(A)).unwrap();
        assert_eq!(game.hand(A).unwrap().len(), 6);
        // Color is still red after a custom card.
        assert_eq!(game.play_card(B, 0, None, None), Err(RuleError::IllegalCard));
    }

    #[test]
    fn test_darebear_keeps_color() {
        let mut game = started(&[A, B]);
        rig(&mut game, vec![vec![Card::custom(CustomKind::Darebear), red(2)], vec![blue(5)]], red(1));

        game.play_card(A, 0, Some(Color::Blue), None).unwrap();
        assert_eq!(game.current_color(), Some(Color::Red));
        assert_eq!(game.current_player(), Some(B));
    }

    #[test]
    fn test_custom_cards_cannot_break_draw_stack() {
        let mut game = started(&[A, B]);
        rig(&mut game, vec![vec![Card::custom(CustomKind::BigDuro), red(2)], vec![blue(5)]], red(1));
        game.draw_stack = 2;

        assert_eq!(
            game.play_card(A, 0, None, None),
            Err(RuleError::MustResolveDrawStack { pending: 2 })
        );
    }

    // === Win ===

    #[test]
    fn test_last_card_wins_without_advancing() {
        let mut game = started(&[A, B, C]);
        rig(&mut game, vec![vec![Card::skip(Color::Red).unwrap()], vec![blue(5)], vec![red(6)]], red(1));

        let outcome = game.play_card(A, 0, None, None).unwrap();

        assert_eq!(outcome.winner, Some(A));
        assert_eq!(outcome.next_player, None);
        assert_eq!(game.phase(), GamePhase::Finished);
        assert_eq!(game.winner(), Some(A));
        assert_eq!(game.current_index(), 0);
        assert_eq!(game.draw_card(B), Err(RuleError::GameNotActive));
    }

    // === UNO ===

    #[test]
    fn test_call_uno_only_with_one_card() {
        let mut game = started(&[A, B]);
        rig(&mut game, vec![vec![red(2), red(3)], vec![blue(5)]], red(1));

        assert_eq!(game.call_uno(A), Ok(false));
        assert_eq!(game.call_uno(B), Ok(true));
        assert!(game.seat(B).unwrap().called_uno());
        assert_eq!(game.call_uno(C), Err(RuleError::PlayerNotFound));
    }

    #[test]
    fn test_challenge_penalizes_silent_player() {
        let mut game = started(&[A, B]);
        rig(&mut game, vec![vec![red(2), red(3)], vec![blue(5)]], red(1));

        let outcome = game.challenge_uno(B);
        assert!(outcome.penalized);
        assert_eq!(outcome.drawn, 2);
        assert_eq!(game.hand(B).unwrap().len(), 3);
    }

    #[test]
    fn test_challenge_spares_caller() {
        let mut game = started(&[A, B]);
        rig(&mut game, vec![vec![red(2), red(3)], vec![blue(5)]], red(1));
        game.call_uno(B).unwrap();

        let outcome = game.challenge_uno(B);
        assert!(!outcome.penalized);
        assert_eq!(game.hand(B).unwrap().len(), 1);

        assert!(!game.challenge_uno(A).penalized);
        assert!(!game.challenge_uno(PlayerId::new(77)).penalized);
    }

    #[test]
    fn test_playing_down_to_one_keeps_call() {
        let mut game = started(&[A, B]);
        rig(&mut game, vec![vec![red(2), red(3)], vec![blue(5)]], red(1));
        game.seats[0].called_uno = true;

        game.play_card(A, 0, None, None).unwrap();
        assert!(game.seat(A).unwrap().called_uno());
    }

    // === Removal ===

    #[test]
    fn test_remove_host_reassigns() {
        let mut game = lobby(&[A, B, C]);
        let removed = game.remove_player(A).unwrap();
        assert_eq!(removed.new_host, Some(B));
        assert_eq!(game.host(), Some(B));
        assert!(game.remove_player(A).is_none());
    }

    #[test]
    fn test_remove_returns_cards_and_clamps_turn() {
        let mut game = started(&[A, B, C]);
        let total = game.total_cards();
        game.current = 2;

        let removed = game.remove_player(C).unwrap();
        assert_eq!(removed.returned_cards, 7);
        assert_eq!(removed.remaining, 2);
        assert_eq!(game.current_index(), 0);
        assert_eq!(game.total_cards(), total);
    }

    #[test]
    fn test_remove_earlier_seat_keeps_current_player() {
        let mut game = started(&[A, B, C]);
        game.current = 2;

        game.remove_player(A).unwrap();
        assert_eq!(game.current_player(), Some(C));
    }

    #[test]
    fn test_advance_wraps_both_directions() {
        let mut game = started(&[A, B, C]);
        game.current = 0;
        game.direction = Direction::CounterClockwise;
        game.advance(1);
        assert_eq!(game.current_index(), 2);
        game.advance(2);
        assert_eq!(game.current_index(), 0);
    }
}
