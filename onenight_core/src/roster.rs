use serde::{Deserialize, Serialize};

use crate::{
    error::{GameError, GameResult},
    player::{Player, PlayerId},
    role::Role,
    utils::VecExtensions,
};

/// Players of a session in the order they joined.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Roster {
    players: Vec<Player>,
}

impl Roster {
    pub fn new() -> Self {
        Roster { players: vec![] }
    }

    pub fn with_player(player: Player) -> Self {
        Roster {
            players: vec![player],
        }
    }

    pub fn add(&mut self, player: Player) -> GameResult<()> {
        if self.contains(player.id) {
            return Err(GameError::DuplicatePlayer(player.id));
        }
        self.players.push(player);
        Ok(())
    }

    pub fn remove(&mut self, id: PlayerId) -> GameResult<Player> {
        self.players
            .remove_first_where(|p| p.id == id)
            .ok_or(GameError::UnknownPlayer(id))
    }

    pub fn contains(&self, id: PlayerId) -> bool {
        self.players.iter().any(|p| p.id == id)
    }

    pub fn get(&self, id: PlayerId) -> Option<&Player> {
        self.players.iter().find(|p| p.id == id)
    }

    pub fn get_mut(&mut self, id: PlayerId) -> Option<&mut Player> {
        self.players.iter_mut().find(|p| p.id == id)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Player> {
        self.players.iter()
    }

    pub(crate) fn iter_mut(&mut self) -> impl Iterator<Item = &mut Player> {
        self.players.iter_mut()
    }

    pub fn ids(&self) -> Vec<PlayerId> {
        self.players.iter().map(|p| p.id).collect()
    }

    pub fn len(&self) -> usize {
        self.players.len()
    }

    pub fn is_empty(&self) -> bool {
        self.players.is_empty()
    }

    pub fn name_of(&self, id: PlayerId) -> Option<&str> {
        self.get(id).map(|p| p.name.as_str())
    }

    pub fn with_initial_role(&self, role: Role) -> Vec<&Player> {
        self.players.iter().filter(|p| p.initially_is(role)).collect()
    }

    pub fn with_current_role(&self, role: Role) -> Vec<&Player> {
        self.players.iter().filter(|p| p.currently_is(role)).collect()
    }

    /// Exchanges the current roles of two distinct players in one step.
    pub(crate) fn swap_current_roles(&mut self, a: PlayerId, b: PlayerId) -> GameResult<()> {
        let index_a = self.index_of(a)?;
        let index_b = self.index_of(b)?;
        if index_a == index_b {
            return Err(GameError::InvalidTarget { actor: a, target: b });
        }
        let role_a = self.players[index_a].current_role();
        let role_b = self.players[index_b].current_role();
        if let (Some(role_a), Some(role_b)) = (role_a, role_b) {
            self.players[index_a].set_current_role(role_b);
            self.players[index_b].set_current_role(role_a);
        }
        Ok(())
    }

    fn index_of(&self, id: PlayerId) -> GameResult<usize> {
        self.players
            .iter()
            .position(|p| p.id == id)
            .ok_or(GameError::UnknownPlayer(id))
    }
}

#[cfg(test)]
mod tests {
    use crate::{error::GameError, player::Player, role::Role, roster::Roster};

    fn roster_of(names: &[&str]) -> Roster {
        let mut roster = Roster::new();
        for (i, name) in names.iter().enumerate() {
            roster.add(Player::new(i as u64 + 1, *name)).unwrap();
        }
        roster
    }

    #[test]
    fn add_should_keep_join_order() {
        let roster = roster_of(&["Foo", "Bar", "Baz"]);

        assert_eq!(roster.ids(), vec![1, 2, 3]);
        assert_eq!(roster.name_of(2), Some("Bar"));
    }

    #[test]
    fn add_should_reject_duplicate_identity() {
        let mut roster = roster_of(&["Foo"]);

        assert_eq!(
            roster.add(Player::new(1, "Impostor")),
            Err(GameError::DuplicatePlayer(1))
        );
        assert_eq!(roster.len(), 1);
    }

    #[test]
    fn remove_should_return_the_player_or_fail_for_unknown_ids() {
        let mut roster = roster_of(&["Foo", "Bar"]);

        assert_eq!(roster.remove(1).map(|p| p.name), Ok("Foo".to_string()));
        assert_eq!(roster.remove(1), Err(GameError::UnknownPlayer(1)));
        assert_eq!(roster.ids(), vec![2]);
    }

    #[test]
    fn swap_should_exchange_both_current_roles_and_nothing_else() {
        let mut roster = roster_of(&["Foo", "Bar", "Baz"]);
        roster.get_mut(1).unwrap().assign_role(Role::Thief);
        roster.get_mut(2).unwrap().assign_role(Role::Werewolf);
        roster.get_mut(3).unwrap().assign_role(Role::Villager);

        roster.swap_current_roles(1, 2).unwrap();

        assert_eq!(roster.get(1).unwrap().current_role(), Some(Role::Werewolf));
        assert_eq!(roster.get(2).unwrap().current_role(), Some(Role::Thief));
        assert_eq!(roster.get(3).unwrap().current_role(), Some(Role::Villager));
        assert_eq!(roster.get(1).unwrap().initial_role(), Some(Role::Thief));
    }

    #[test]
    fn swap_with_self_should_fail() {
        let mut roster = roster_of(&["Foo"]);

        assert_eq!(
            roster.swap_current_roles(1, 1),
            Err(GameError::InvalidTarget { actor: 1, target: 1 })
        );
    }
}
