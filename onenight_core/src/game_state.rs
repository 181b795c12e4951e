use std::collections::BTreeSet;

use log::{debug, info};
use rand::{rngs::StdRng, SeedableRng};
use serde::{Deserialize, Serialize};
use strum_macros::Display;

use crate::{
    config::GameConfig,
    error::{GameError, GameResult},
    event::{filter_events, Event, EventEntry},
    player::{Player, PlayerId},
    role::{Role, Team},
    roster::Roster,
    vote::ExecutionOutcome,
};

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Display, Serialize, Deserialize,
)]
pub enum GamePhase {
    Waiting,
    Night,
    Discussion,
    Voting,
    Ended,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Departure {
    Left,
    /// The host left; the session should be discarded.
    HostLeft,
}

/// One game, owned by whoever hosts the play session. Phases only move forward.
pub struct GameState {
    pub(crate) config: GameConfig,
    pub(crate) host: PlayerId,
    pub(crate) roster: Roster,
    pub(crate) center_cards: Vec<Role>,
    pub(crate) phase: GamePhase,
    pub(crate) night_order: Vec<Role>,
    pub(crate) night_index: usize,
    pub(crate) execution: Option<ExecutionOutcome>,
    pub(crate) executed: Vec<PlayerId>,
    pub(crate) winners: Option<BTreeSet<Team>>,
    pub(crate) log: Vec<EventEntry>,
    pub(crate) rng: StdRng,
}

impl GameState {
    /// Opens a session in the waiting phase with the host already seated.
    pub fn new(host: PlayerId, host_name: impl Into<String>, config: GameConfig) -> Self {
        let rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        let roster = Roster::with_player(Player::new(host, host_name));
        GameState {
            config,
            host,
            roster,
            center_cards: vec![],
            phase: GamePhase::Waiting,
            night_order: vec![],
            night_index: 0,
            execution: None,
            executed: vec![],
            winners: None,
            log: vec![EventEntry::public(Event::Joined(host))],
            rng,
        }
    }

    pub fn add_player(&mut self, id: PlayerId, name: impl Into<String>) -> GameResult<()> {
        self.expect_phase(GamePhase::Waiting)?;
        if self.roster.len() >= self.config.max_players {
            return Err(GameError::RosterFull {
                max: self.config.max_players,
            });
        }
        self.roster.add(Player::new(id, name))?;
        debug!("player {id} joined ({} seated)", self.roster.len());
        self.log.push(EventEntry::public(Event::Joined(id)));
        Ok(())
    }

    pub fn remove_player(&mut self, id: PlayerId) -> GameResult<Departure> {
        self.expect_phase(GamePhase::Waiting)?;
        self.roster.remove(id)?;
        self.log.push(EventEntry::public(Event::Left(id)));
        if id == self.host {
            info!("host {id} left, game is cancelled");
            Ok(Departure::HostLeft)
        } else {
            debug!("player {id} left ({} seated)", self.roster.len());
            Ok(Departure::Left)
        }
    }

    pub fn phase(&self) -> GamePhase {
        self.phase
    }

    pub fn host(&self) -> PlayerId {
        self.host
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn roster(&self) -> &Roster {
        &self.roster
    }

    pub fn player(&self, id: PlayerId) -> Option<&Player> {
        self.roster.get(id)
    }

    pub fn player_count(&self) -> usize {
        self.roster.len()
    }

    pub fn log(&self) -> &[EventEntry] {
        &self.log
    }

    pub fn events_for(&self, viewer: PlayerId) -> Vec<Event> {
        filter_events(&self.log, Some(viewer))
    }

    /// Night is over: moves the players to the discussion.
    pub fn start_discussion(&mut self) -> GameResult<()> {
        self.expect_phase(GamePhase::Night)?;
        if !self.is_night_complete() {
            return Err(GameError::NightNotFinished);
        }
        self.set_phase(GamePhase::Discussion);
        Ok(())
    }

    /// Discussion time is up: ballots are accepted from now on.
    pub fn start_voting(&mut self) -> GameResult<()> {
        self.expect_phase(GamePhase::Discussion)?;
        self.set_phase(GamePhase::Voting);
        Ok(())
    }

    pub(crate) fn expect_phase(&self, expected: GamePhase) -> GameResult<()> {
        if self.phase != expected {
            return Err(GameError::WrongPhase {
                expected,
                actual: self.phase,
            });
        }
        Ok(())
    }

    pub(crate) fn set_phase(&mut self, phase: GamePhase) {
        info!("phase {} -> {}", self.phase, phase);
        self.phase = phase;
        self.log.push(EventEntry::public(Event::PhaseChanged(phase)));
    }
}
