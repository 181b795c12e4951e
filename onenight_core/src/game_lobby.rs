use log::warn;

use crate::{
    config::GameConfig,
    error::{GameError, GameResult},
    event::filter_events,
    game_state::GameState,
    interface::{PlayerInterface, Seat},
    player::{PlayerId, VoteTarget},
    role::Role,
    summary::GameSummary,
};

/// Answers a player may give before the engine stops asking.
const MAX_ATTEMPTS: usize = 3;

struct LobbyPlayer {
    seat: Seat,
    interface: Box<dyn PlayerInterface>,
}

/// Seats players behind their interfaces and runs a whole game in one call.
pub struct GameLobby {
    config: GameConfig,
    players: Vec<LobbyPlayer>,
}

impl GameLobby {
    pub fn new(config: GameConfig) -> Self {
        GameLobby {
            config,
            players: vec![],
        }
    }

    /// Seats a player; the first one seated hosts the game.
    pub fn add_player<C, T>(&mut self, name: impl Into<String>, player_constructor: C) -> PlayerId
    where
        C: FnOnce(PlayerId) -> T,
        T: PlayerInterface + 'static,
    {
        let id = self.players.len() as PlayerId + 1;
        self.players.push(LobbyPlayer {
            seat: Seat {
                id,
                name: name.into(),
            },
            interface: Box::new(player_constructor(id)),
        });
        id
    }

    pub fn player_names(&self) -> Vec<&String> {
        self.players.iter().map(|p| &p.seat.name).collect::<Vec<_>>()
    }

    fn seats(&self) -> Vec<Seat> {
        self.players.iter().map(|p| p.seat.clone()).collect()
    }

    fn interface(&self, id: PlayerId) -> GameResult<&dyn PlayerInterface> {
        self.players
            .iter()
            .find(|p| p.seat.id == id)
            .map(|p| p.interface.as_ref())
            .ok_or(GameError::UnknownPlayer(id))
    }

    fn notify_all(&self, state: &GameState) {
        let seats = self.seats();
        for p in &self.players {
            p.interface.notify(&state.events_for(p.seat.id), &seats);
        }
    }

    pub fn play_round(&self) -> GameResult<GameSummary> {
        let seats = self.seats();
        let (host, guests) = seats.split_first().ok_or(GameError::NotEnoughPlayers {
            min: self.config.min_players,
            actual: 0,
        })?;
        let mut state = GameState::new(host.id, host.name.clone(), self.config.clone());
        for guest in guests {
            state.add_player(guest.id, guest.name.clone())?;
        }
        state.deal_default()?;
        self.notify_all(&state);

        while let Some(role) = state.current_night_role() {
            match role {
                Role::Werewolf => {
                    state.resolve_werewolves()?;
                }
                Role::Seer => self.run_seers(&mut state, &seats)?,
                Role::Thief => self.run_thieves(&mut state, &seats)?,
                _ => {}
            }
            state.finalize_night_role()?;
            state.advance_night()?;
            self.notify_all(&state);
        }

        state.start_discussion()?;
        self.notify_all(&state);
        state.start_voting()?;
        for seat in &seats {
            self.collect_vote(&mut state, seat.id, &seats)?;
        }

        let summary = state.conclude()?;
        let full_log = filter_events(state.log(), None);
        for p in &self.players {
            p.interface.notify(&full_log, &seats);
        }
        Ok(summary)
    }

    fn run_seers(&self, state: &mut GameState, seats: &[Seat]) -> GameResult<()> {
        for id in state.pending_actors() {
            let interface = self.interface(id)?;
            for _ in 0..MAX_ATTEMPTS {
                let Some(choice) = interface.choose_seer_action(id, seats, &state.events_for(id))
                else {
                    break;
                };
                match state.seer_action(id, choice) {
                    Ok(_) => break,
                    Err(e) => warn!("rejected seer action of player {id}: {e}"),
                }
            }
        }
        Ok(())
    }

    fn run_thieves(&self, state: &mut GameState, seats: &[Seat]) -> GameResult<()> {
        for id in state.pending_actors() {
            let interface = self.interface(id)?;
            for _ in 0..MAX_ATTEMPTS {
                let Some(choice) = interface.choose_thief_action(id, seats, &state.events_for(id))
                else {
                    break;
                };
                match state.thief_action(id, choice) {
                    Ok(_) => break,
                    Err(e) => warn!("rejected thief action of player {id}: {e}"),
                }
            }
        }
        Ok(())
    }

    /// A player that keeps casting invalid ballots ends up voting for no execution.
    fn collect_vote(&self, state: &mut GameState, id: PlayerId, seats: &[Seat]) -> GameResult<()> {
        let interface = self.interface(id)?;
        for _ in 0..MAX_ATTEMPTS {
            let target = interface.choose_vote(id, seats, &state.events_for(id));
            match state.register_vote(id, target) {
                Ok(()) => return Ok(()),
                Err(e) => warn!("rejected vote of player {id}: {e}"),
            }
        }
        state.register_vote(id, VoteTarget::NoExecution)
    }
}

#[cfg(test)]
mod tests {
    use crate::{
        config::GameConfig,
        error::GameError,
        event::Event,
        game_lobby::GameLobby,
        interface::{PlayerInterface, Seat},
        night::{SeerChoice, ThiefChoice},
        player::{PlayerId, VoteTarget},
        random_playing_computer::RandomPlayingComputer,
        vote::ExecutionOutcome,
    };

    #[test]
    fn player_names_should_return_list_of_names() {
        let mut lobby = GameLobby::new(GameConfig::default());
        lobby.add_player("Foo", TestPlayer::new);
        lobby.add_player("Bar", TestPlayer::new);

        assert_eq!(lobby.player_names(), vec!["Foo", "Bar"]);
    }

    #[test]
    fn empty_lobby_should_not_start() {
        let lobby = GameLobby::new(GameConfig::default());

        assert_eq!(
            lobby.play_round(),
            Err(GameError::NotEnoughPlayers { min: 3, actual: 0 })
        );
    }

    #[test]
    fn self_voting_players_should_end_up_abstaining() {
        let mut lobby = GameLobby::new(GameConfig::default().with_seed(3));
        for name in ["Foo", "Bar", "Baz", "Qux"] {
            lobby.add_player(name, TestPlayer::new);
        }

        let summary = lobby.play_round().unwrap();

        assert_eq!(summary.execution, ExecutionOutcome::NoExecutionChosen);
        assert_eq!(summary.tally.get(VoteTarget::NoExecution), 4);
        assert_eq!(summary.winners.len(), 1);
    }

    #[test]
    fn random_computers_should_play_a_full_game() {
        let mut lobby = GameLobby::new(GameConfig::default().with_seed(11));
        for name in ["Foo", "Bar", "Baz", "Qux", "Quux"] {
            lobby.add_player(name, RandomPlayingComputer::new);
        }

        let summary = lobby.play_round().unwrap();

        assert_eq!(summary.reveal.players.len(), 5);
        assert_eq!(summary.reveal.center_cards.len(), 2);
        assert_eq!(summary.tally.total(), 5);
        assert_eq!(summary.winners.len(), 1);
    }

    // Infra ----------------------------------------------------------------

    /// Never answers at night and always tries to vote for itself.
    pub struct TestPlayer;

    impl TestPlayer {
        pub fn new(_id: PlayerId) -> Self {
            TestPlayer
        }
    }

    impl PlayerInterface for TestPlayer {
        fn notify(&self, _game_log: &[Event], _players: &[Seat]) {}

        fn choose_seer_action(
            &self,
            _me: PlayerId,
            _players: &[Seat],
            _game_log: &[Event],
        ) -> Option<SeerChoice> {
            None
        }

        fn choose_thief_action(
            &self,
            _me: PlayerId,
            _players: &[Seat],
            _game_log: &[Event],
        ) -> Option<ThiefChoice> {
            None
        }

        fn choose_vote(&self, me: PlayerId, _players: &[Seat], _game_log: &[Event]) -> VoteTarget {
            VoteTarget::Player(me)
        }
    }
}
