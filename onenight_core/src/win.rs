use std::collections::BTreeSet;

use log::info;

use crate::{
    error::{GameError, GameResult},
    event::{Event, EventEntry},
    game_state::{GamePhase, GameState},
    player::PlayerId,
    role::{Role, Team},
    roster::Roster,
};

/// Winning teams judged on the cards players hold at the end of the night.
///
/// 1. An executed tanner wins alone.
/// 2. Nobody executed: the werewolves win if any player holds a werewolf,
///    otherwise the village does.
/// 3. An executed werewolf makes the village win.
/// 4. Anyone else executed lets the werewolves win.
pub fn evaluate(executed: &[PlayerId], roster: &Roster) -> BTreeSet<Team> {
    let executed_roles = executed
        .iter()
        .filter_map(|&id| roster.get(id))
        .filter_map(|p| p.current_role())
        .collect::<Vec<_>>();

    let winner = if executed_roles.contains(&Role::Tanner) {
        Team::Tanner
    } else if executed_roles.is_empty() {
        if roster.with_current_role(Role::Werewolf).is_empty() {
            Team::Village
        } else {
            Team::Werewolf
        }
    } else if executed_roles.contains(&Role::Werewolf) {
        Team::Village
    } else {
        Team::Werewolf
    };
    BTreeSet::from([winner])
}

impl GameState {
    pub fn evaluate_winners(&mut self) -> GameResult<BTreeSet<Team>> {
        self.expect_phase(GamePhase::Ended)?;
        if self.execution.is_none() {
            return Err(GameError::ExecutionNotResolved);
        }
        let winners = evaluate(&self.executed, &self.roster);
        info!("winners: {winners:?}");
        self.log.push(EventEntry::public(Event::Winners(
            winners.iter().copied().collect(),
        )));
        self.winners = Some(winners.clone());
        Ok(winners)
    }

    pub fn winners(&self) -> Option<&BTreeSet<Team>> {
        self.winners.as_ref()
    }
}
