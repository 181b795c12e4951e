use serde::{Deserialize, Serialize};

use crate::{
    game_state::GamePhase,
    player::{NightOutcome, PlayerId, VoteTarget},
    role::{Role, Team},
    vote::ExecutionOutcome,
};

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum Event {
    Joined(PlayerId),
    Left(PlayerId),
    RoleDealt(PlayerId, Option<Role>),
    PhaseChanged(GamePhase),
    RoleAwake(Role),
    NightAction(PlayerId, NightOutcome),
    Voted(PlayerId, VoteTarget),
    Execution(ExecutionOutcome),
    Winners(Vec<Team>),
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub enum EventVisibility {
    Public,
    Private(PlayerId),
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct EventEntry {
    pub visibility: EventVisibility,
    pub event: Event,
}

impl EventEntry {
    pub fn public(event: Event) -> Self {
        EventEntry {
            visibility: EventVisibility::Public,
            event,
        }
    }

    pub fn private(player: PlayerId, event: Event) -> Self {
        EventEntry {
            visibility: EventVisibility::Private(player),
            event,
        }
    }
}

/// The log as seen by `visible_to`; `None` sees everything. Other players'
/// night actions are dropped since knowing who acted reveals their role.
pub fn filter_events(log: &[EventEntry], visible_to: Option<PlayerId>) -> Vec<Event> {
    log.iter()
        .filter_map(|e| match (e.visibility, visible_to) {
            (EventVisibility::Private(player), Some(viewer)) if viewer != player => {
                match e.event {
                    Event::RoleDealt(p, _) => Some(Event::RoleDealt(p, None)),
                    Event::NightAction(..) => None,
                    _ => Some(e.event.clone()),
                }
            }
            _ => Some(e.event.clone()),
        })
        .collect()
}
