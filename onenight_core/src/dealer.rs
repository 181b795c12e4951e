use log::{debug, info};
use rand::seq::SliceRandom;

use crate::{
    config::default_deck,
    error::{GameError, GameResult},
    event::{Event, EventEntry},
    game_state::{GamePhase, GameState},
    role::{Role, CENTER_CARD_COUNT, NIGHT_ACTION_ORDER},
};

impl GameState {
    /// Shuffles `deck` and hands one card to every player in seat order, the
    /// remaining two go face-down to the center. Starts the night.
    pub fn deal(&mut self, deck: &[Role]) -> GameResult<()> {
        self.expect_phase(GamePhase::Waiting)?;
        let player_count = self.roster.len();
        let expected = player_count + CENTER_CARD_COUNT;
        if deck.len() != expected {
            return Err(GameError::DeckSizeMismatch {
                expected,
                actual: deck.len(),
            });
        }
        if player_count < self.config.min_players {
            return Err(GameError::NotEnoughPlayers {
                min: self.config.min_players,
                actual: player_count,
            });
        }
        if player_count > self.config.max_players {
            return Err(GameError::RosterFull {
                max: self.config.max_players,
            });
        }

        let mut cards = deck.to_vec();
        cards.shuffle(&mut self.rng);
        self.assign(cards);
        Ok(())
    }

    /// Deals the standard deck for the current number of players.
    pub fn deal_default(&mut self) -> GameResult<()> {
        let player_count = self.roster.len();
        let deck = default_deck(player_count).ok_or(GameError::NoDefaultDeck(player_count))?;
        self.deal(&deck)
    }

    fn assign(&mut self, cards: Vec<Role>) {
        let player_count = self.roster.len();
        for (player, &role) in self.roster.iter_mut().zip(cards.iter()) {
            player.assign_role(role);
            debug!("player {} was dealt {}", player.id, role);
            self.log
                .push(EventEntry::private(player.id, Event::RoleDealt(player.id, Some(role))));
        }
        self.center_cards = cards[player_count..].to_vec();
        self.night_order = NIGHT_ACTION_ORDER.to_vec();
        self.night_index = 0;
        info!("dealt {} cards to {} players", cards.len(), player_count);
        self.set_phase(GamePhase::Night);
        self.announce_night_role();
    }

    #[cfg(test)]
    pub(crate) fn assign_unshuffled(&mut self, cards: &[Role]) {
        self.assign(cards.to_vec());
    }
}
