use log::{debug, info, warn};
use serde::{Deserialize, Serialize};

use crate::{
    error::{GameError, GameResult},
    event::{Event, EventEntry},
    game_state::{GamePhase, GameState},
    player::{NightAction, NightActionKind, NightOutcome, PlayerId},
    role::Role,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SeerChoice {
    Player(PlayerId),
    Center,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ThiefChoice {
    Swap(PlayerId),
    Skip,
}

impl GameState {
    /// The role group whose actions are pending, `None` once every group had its turn.
    pub fn current_night_role(&self) -> Option<Role> {
        if self.phase != GamePhase::Night {
            return None;
        }
        self.night_order.get(self.night_index).copied()
    }

    pub fn is_night_complete(&self) -> bool {
        self.night_index >= self.night_order.len()
    }

    /// Players of the current role group that have not acted yet.
    pub fn pending_actors(&self) -> Vec<PlayerId> {
        match self.current_night_role() {
            Some(role) => self
                .roster
                .iter()
                .filter(|p| p.initially_is(role) && !p.has_acted())
                .map(|p| p.id)
                .collect(),
            None => vec![],
        }
    }

    /// Moves to the next role group. Fails while anyone in the current group
    /// still has to act; empty groups pass without input.
    pub fn advance_night(&mut self) -> GameResult<Option<Role>> {
        self.expect_phase(GamePhase::Night)?;
        let Some(role) = self.current_night_role() else {
            return Ok(None);
        };
        let pending = self.pending_actors();
        if !pending.is_empty() {
            return Err(GameError::ActionsPending { role, pending });
        }
        self.night_index += 1;
        self.announce_night_role();
        Ok(self.current_night_role())
    }

    /// Closes the current role group: everyone who has not acted is treated as
    /// having done nothing. Returns the players that were closed out.
    pub fn finalize_night_role(&mut self) -> GameResult<Vec<PlayerId>> {
        self.expect_phase(GamePhase::Night)?;
        let pending = self.pending_actors();
        match self.current_night_role() {
            Some(Role::Werewolf) if !pending.is_empty() => {
                self.resolve_werewolves()?;
            }
            Some(Role::Thief) => {
                for &id in &pending {
                    self.record(id, NightActionKind::ThiefSkip, None, NightOutcome::Skipped);
                }
            }
            _ => {
                for &id in &pending {
                    if let Some(player) = self.roster.get_mut(id) {
                        player.mark_acted();
                    }
                }
            }
        }
        if !pending.is_empty() {
            debug!("closed out {pending:?} without action");
        }
        Ok(pending)
    }

    /// Every werewolf learns who the other werewolves are. Needs no input.
    pub fn resolve_werewolves(&mut self) -> GameResult<Vec<(PlayerId, NightOutcome)>> {
        self.expect_night_role(Role::Werewolf)?;
        let wolves = self
            .roster
            .with_initial_role(Role::Werewolf)
            .iter()
            .map(|p| (p.id, p.name.clone(), p.has_acted()))
            .collect::<Vec<_>>();
        if let Some(&(id, _, _)) = wolves.iter().find(|(_, _, acted)| *acted) {
            return Err(GameError::AlreadyActed(id));
        }

        let mut results = vec![];
        for (id, _, _) in &wolves {
            let others = wolves
                .iter()
                .filter(|(other, _, _)| other != id)
                .map(|(other, name, _)| (*other, name.clone()))
                .collect::<Vec<_>>();
            let outcome = if others.is_empty() {
                NightOutcome::SoleWerewolf
            } else {
                NightOutcome::OtherWerewolves(others)
            };
            self.record(*id, NightActionKind::WerewolfCheck, None, outcome.clone());
            results.push((*id, outcome));
        }
        Ok(results)
    }

    pub fn seer_action(&mut self, seer: PlayerId, choice: SeerChoice) -> GameResult<NightOutcome> {
        match choice {
            SeerChoice::Player(target) => {
                let role = self.seer_inspect_player(seer, target)?;
                let name = self.roster.name_of(target).unwrap_or_default().to_string();
                Ok(NightOutcome::InspectedPlayer { name, role })
            }
            SeerChoice::Center => self
                .seer_inspect_center(seer)
                .map(NightOutcome::InspectedCenter),
        }
    }

    /// Looks at the card another player holds right now.
    pub fn seer_inspect_player(&mut self, seer: PlayerId, target: PlayerId) -> GameResult<Role> {
        self.check_actor(seer, Role::Seer)?;
        let (name, role) = self.other_player_card(seer, target)?;
        self.record(
            seer,
            NightActionKind::SeerPlayer,
            Some(target),
            NightOutcome::InspectedPlayer { name, role },
        );
        Ok(role)
    }

    /// Looks at both center cards, in the order they were dealt.
    pub fn seer_inspect_center(&mut self, seer: PlayerId) -> GameResult<[Role; 2]> {
        self.check_actor(seer, Role::Seer)?;
        let center = match self.center_cards.as_slice() {
            &[first, second] => [first, second],
            _ => return Err(GameError::NotEligible { player: seer, role: Role::Seer }),
        };
        self.record(
            seer,
            NightActionKind::SeerCenter,
            None,
            NightOutcome::InspectedCenter(center),
        );
        Ok(center)
    }

    pub fn thief_action(
        &mut self,
        thief: PlayerId,
        choice: ThiefChoice,
    ) -> GameResult<NightOutcome> {
        match choice {
            ThiefChoice::Swap(target) => {
                let new_role = self.thief_swap(thief, target)?;
                let name = self.roster.name_of(target).unwrap_or_default().to_string();
                Ok(NightOutcome::Swapped { name, new_role })
            }
            ThiefChoice::Skip => self.thief_skip(thief).map(|_| NightOutcome::Skipped),
        }
    }

    /// Exchanges cards with `target`; the thief's initial role stays untouched.
    /// Returns the thief's new role.
    pub fn thief_swap(&mut self, thief: PlayerId, target: PlayerId) -> GameResult<Role> {
        self.check_actor(thief, Role::Thief)?;
        let (name, new_role) = self.other_player_card(thief, target)?;
        self.roster.swap_current_roles(thief, target)?;
        self.record(
            thief,
            NightActionKind::ThiefSwap,
            Some(target),
            NightOutcome::Swapped { name, new_role },
        );
        Ok(new_role)
    }

    pub fn thief_skip(&mut self, thief: PlayerId) -> GameResult<()> {
        self.check_actor(thief, Role::Thief)?;
        self.record(thief, NightActionKind::ThiefSkip, None, NightOutcome::Skipped);
        Ok(())
    }

    pub(crate) fn announce_night_role(&mut self) {
        match self.current_night_role() {
            Some(role) => {
                info!("{role} group wakes up");
                self.log.push(EventEntry::public(Event::RoleAwake(role)));
            }
            None => info!("every night role has acted"),
        }
    }

    fn expect_night_role(&self, role: Role) -> GameResult<()> {
        self.expect_phase(GamePhase::Night)?;
        if self.current_night_role() != Some(role) {
            return Err(GameError::OutOfTurn(role));
        }
        Ok(())
    }

    /// `actor` is dealt `role`, it is that group's turn, and they have not acted yet.
    fn check_actor(&self, actor: PlayerId, role: Role) -> GameResult<()> {
        self.expect_phase(GamePhase::Night)?;
        let player = self.roster.get(actor).ok_or(GameError::UnknownPlayer(actor))?;
        if !player.initially_is(role) || self.current_night_role() != Some(role) {
            warn!("player {actor} tried to act as {role} out of turn");
            return Err(GameError::NotEligible { player: actor, role });
        }
        if player.has_acted() {
            return Err(GameError::AlreadyActed(actor));
        }
        Ok(())
    }

    fn other_player_card(&self, actor: PlayerId, target: PlayerId) -> GameResult<(String, Role)> {
        let invalid = GameError::InvalidTarget { actor, target };
        if actor == target {
            return Err(invalid);
        }
        let player = self.roster.get(target).ok_or(invalid.clone())?;
        let role = player.current_role().ok_or(invalid)?;
        Ok((player.name.clone(), role))
    }

    fn record(
        &mut self,
        actor: PlayerId,
        kind: NightActionKind,
        target: Option<PlayerId>,
        outcome: NightOutcome,
    ) {
        debug!("player {actor} resolved {kind:?}");
        self.log.push(EventEntry::private(
            actor,
            Event::NightAction(actor, outcome.clone()),
        ));
        if let Some(player) = self.roster.get_mut(actor) {
            player.record_action(NightAction {
                kind,
                target,
                outcome,
            });
        }
    }
}
