use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::{
    error::{GameError, GameResult},
    event::EventVisibility,
    game_state::{GamePhase, GameState},
    player::PlayerId,
    role::{Role, Team},
    vote::{ExecutionOutcome, VoteTally},
};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlayerReveal {
    pub id: PlayerId,
    pub name: String,
    pub initial_role: Option<Role>,
    pub current_role: Option<Role>,
}

impl PlayerReveal {
    pub fn was_swapped(&self) -> bool {
        self.initial_role != self.current_role
    }
}

/// Every card on the table, disclosed when the game is over.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RoleReveal {
    pub players: Vec<PlayerReveal>,
    pub center_cards: Vec<Role>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GameSummary {
    pub tally: VoteTally,
    pub execution: ExecutionOutcome,
    pub winners: BTreeSet<Team>,
    pub reveal: RoleReveal,
}

impl GameState {
    pub fn role_reveal(&self) -> GameResult<RoleReveal> {
        self.expect_phase(GamePhase::Ended)?;
        Ok(RoleReveal {
            players: self
                .roster
                .iter()
                .map(|p| PlayerReveal {
                    id: p.id,
                    name: p.name.clone(),
                    initial_role: p.initial_role(),
                    current_role: p.current_role(),
                })
                .collect(),
            center_cards: self.center_cards.clone(),
        })
    }

    /// Resolves the execution, judges the winners and opens the whole log.
    pub fn conclude(&mut self) -> GameResult<GameSummary> {
        let execution = self.resolve_execution()?;
        let winners = self.evaluate_winners()?;
        for entry in &mut self.log {
            entry.visibility = EventVisibility::Public;
        }
        Ok(GameSummary {
            tally: self.tally(),
            execution,
            winners,
            reveal: self.role_reveal()?,
        })
    }

    pub fn summary(&self) -> GameResult<GameSummary> {
        let execution = self
            .execution
            .clone()
            .ok_or(GameError::ExecutionNotResolved)?;
        let winners = self.winners.clone().ok_or(GameError::ExecutionNotResolved)?;
        Ok(GameSummary {
            tally: self.tally(),
            execution,
            winners,
            reveal: self.role_reveal()?,
        })
    }
}
