use crate::role::{Role, CENTER_CARD_COUNT};

/// Settings for one session.
#[derive(Debug, Clone, PartialEq)]
pub struct GameConfig {
    pub min_players: usize,
    pub max_players: usize,
    /// Seed for the deck shuffle. `None` draws from OS entropy.
    pub seed: Option<u64>,
}

impl Default for GameConfig {
    fn default() -> Self {
        GameConfig {
            min_players: 3,
            max_players: 8,
            seed: None,
        }
    }
}

impl GameConfig {
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Minimum is clamped to at least one player, maximum to at least the minimum.
    pub fn with_player_limits(mut self, min: usize, max: usize) -> Self {
        self.min_players = min.max(1);
        self.max_players = max.max(self.min_players);
        self
    }
}

/// Standard deck for `player_count` players: two werewolves, a seer, a thief,
/// a tanner from five players on, villagers for the rest.
pub fn default_deck(player_count: usize) -> Option<Vec<Role>> {
    if player_count < 3 {
        return None;
    }
    let mut deck = vec![Role::Werewolf, Role::Werewolf, Role::Seer, Role::Thief];
    if player_count >= 5 {
        deck.push(Role::Tanner);
    }
    let total = player_count + CENTER_CARD_COUNT;
    deck.resize(total, Role::Villager);
    Some(deck)
}
