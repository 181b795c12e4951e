use std::fmt;

use serde::{Deserialize, Serialize};

use crate::role::Role;

/// Stable identity handed in by the front end (e.g. a chat user id).
pub type PlayerId = u64;

/// What a ballot points at. Abstaining is its own variant, so it can never be
/// mistaken for a participant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum VoteTarget {
    Player(PlayerId),
    NoExecution,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum NightActionKind {
    WerewolfCheck,
    SeerPlayer,
    SeerCenter,
    ThiefSwap,
    ThiefSkip,
}

/// Structured result of a night action; `Display` gives the text sent to the actor.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum NightOutcome {
    OtherWerewolves(Vec<(PlayerId, String)>),
    SoleWerewolf,
    InspectedPlayer { name: String, role: Role },
    InspectedCenter([Role; 2]),
    Swapped { name: String, new_role: Role },
    Skipped,
}

impl fmt::Display for NightOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NightOutcome::OtherWerewolves(others) => {
                let names = others.iter().map(|(_, name)| name.as_str()).collect::<Vec<_>>();
                write!(f, "The other werewolves are: {}", names.join(", "))
            }
            NightOutcome::SoleWerewolf => write!(f, "You are the only werewolf"),
            NightOutcome::InspectedPlayer { name, role } => write!(f, "{name} is a {role}"),
            NightOutcome::InspectedCenter([first, second]) => {
                write!(f, "The center cards are {first} and {second}")
            }
            NightOutcome::Swapped { name, new_role } => {
                write!(f, "You swapped cards with {name}, you are now a {new_role}")
            }
            NightOutcome::Skipped => write!(f, "You did nothing"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NightAction {
    pub kind: NightActionKind,
    pub target: Option<PlayerId>,
    pub outcome: NightOutcome,
}

impl NightAction {
    pub fn result(&self) -> String {
        self.outcome.to_string()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Player {
    pub id: PlayerId,
    pub name: String,
    initial_role: Option<Role>,
    current_role: Option<Role>,
    has_acted: bool,
    night_action: Option<NightAction>,
    vote_target: Option<VoteTarget>,
}

impl Player {
    pub fn new(id: PlayerId, name: impl Into<String>) -> Self {
        Player {
            id,
            name: name.into(),
            initial_role: None,
            current_role: None,
            has_acted: false,
            night_action: None,
            vote_target: None,
        }
    }

    /// The card dealt to the player. Decides who wakes up at night.
    pub fn initial_role(&self) -> Option<Role> {
        self.initial_role
    }

    /// The card the player holds after any swap. Decides who wins.
    pub fn current_role(&self) -> Option<Role> {
        self.current_role
    }

    pub fn has_acted(&self) -> bool {
        self.has_acted
    }

    pub fn night_action(&self) -> Option<&NightAction> {
        self.night_action.as_ref()
    }

    pub fn vote_target(&self) -> Option<VoteTarget> {
        self.vote_target
    }

    pub fn has_voted(&self) -> bool {
        self.vote_target.is_some()
    }

    pub(crate) fn assign_role(&mut self, role: Role) {
        self.initial_role = Some(role);
        self.current_role = Some(role);
    }

    pub(crate) fn set_current_role(&mut self, role: Role) {
        self.current_role = Some(role);
    }

    pub(crate) fn record_action(&mut self, action: NightAction) {
        self.night_action = Some(action);
        self.has_acted = true;
    }

    pub(crate) fn mark_acted(&mut self) {
        self.has_acted = true;
    }

    pub(crate) fn set_vote(&mut self, target: VoteTarget) {
        self.vote_target = Some(target);
    }

    pub fn initially_is(&self, role: Role) -> bool {
        self.initial_role == Some(role)
    }

    pub fn currently_is(&self, role: Role) -> bool {
        self.current_role == Some(role)
    }
}
