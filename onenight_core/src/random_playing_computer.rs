use rand::{seq::SliceRandom, Rng};

use crate::{
    event::Event,
    interface::{PlayerInterface, Seat},
    night::{SeerChoice, ThiefChoice},
    player::{PlayerId, VoteTarget},
};

pub struct RandomPlayingComputer {
    pub id: PlayerId,
}

impl RandomPlayingComputer {
    pub fn new(id: PlayerId) -> Self {
        RandomPlayingComputer { id }
    }

    fn random_opponent(&self, players: &[Seat]) -> Option<PlayerId> {
        let others = players
            .iter()
            .filter(|p| p.id != self.id)
            .map(|p| p.id)
            .collect::<Vec<_>>();
        others.choose(&mut rand::thread_rng()).copied()
    }
}

impl PlayerInterface for RandomPlayingComputer {
    fn notify(&self, _game_log: &[Event], _players: &[Seat]) {}

    fn choose_seer_action(
        &self,
        _me: PlayerId,
        players: &[Seat],
        _game_log: &[Event],
    ) -> Option<SeerChoice> {
        if rand::thread_rng().gen_bool(0.5) {
            return Some(SeerChoice::Center);
        }
        Some(
            self.random_opponent(players)
                .map(SeerChoice::Player)
                .unwrap_or(SeerChoice::Center),
        )
    }

    fn choose_thief_action(
        &self,
        _me: PlayerId,
        players: &[Seat],
        _game_log: &[Event],
    ) -> Option<ThiefChoice> {
        if rand::thread_rng().gen_bool(0.25) {
            return Some(ThiefChoice::Skip);
        }
        Some(
            self.random_opponent(players)
                .map(ThiefChoice::Swap)
                .unwrap_or(ThiefChoice::Skip),
        )
    }

    fn choose_vote(&self, _me: PlayerId, players: &[Seat], _game_log: &[Event]) -> VoteTarget {
        if rand::thread_rng().gen_bool(0.1) {
            return VoteTarget::NoExecution;
        }
        self.random_opponent(players)
            .map(VoteTarget::Player)
            .unwrap_or(VoteTarget::NoExecution)
    }
}

#[cfg(test)]
mod tests {
    use crate::{
        interface::{PlayerInterface, Seat},
        night::{SeerChoice, ThiefChoice},
        player::VoteTarget,
        random_playing_computer::RandomPlayingComputer,
    };

    fn seats() -> Vec<Seat> {
        (1..=3)
            .map(|id| Seat {
                id,
                name: format!("P{id}"),
            })
            .collect()
    }

    #[test]
    fn computer_should_never_target_itself() {
        let computer = RandomPlayingComputer::new(2);
        for _ in 0..100 {
            assert_ne!(
                computer.choose_seer_action(2, &seats(), &[]),
                Some(SeerChoice::Player(2))
            );
            assert_ne!(
                computer.choose_thief_action(2, &seats(), &[]),
                Some(ThiefChoice::Swap(2))
            );
            assert_ne!(computer.choose_vote(2, &seats(), &[]), VoteTarget::Player(2));
        }
    }

    #[test]
    fn computer_alone_should_fall_back_to_actions_without_target() {
        let computer = RandomPlayingComputer::new(1);
        let alone = vec![Seat {
            id: 1,
            name: "P1".to_string(),
        }];

        assert_eq!(computer.choose_vote(1, &alone, &[]), VoteTarget::NoExecution);
        assert_ne!(
            computer.choose_thief_action(1, &alone, &[]),
            Some(ThiefChoice::Swap(1))
        );
    }
}
