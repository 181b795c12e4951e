use itertools::Itertools;
use serde::{Deserialize, Serialize};
use strum::{EnumMessage, IntoEnumIterator};
use strum_macros::{Display, EnumIter, EnumMessage, EnumString};

#[derive(
    Debug,
    PartialEq,
    Eq,
    Hash,
    Copy,
    Clone,
    Display,
    EnumIter,
    EnumString,
    EnumMessage,
    Serialize,
    Deserialize,
)]
pub enum Role {
    #[strum(message = "No ability at night. Wins with the village when a werewolf is executed.")]
    Villager,
    #[strum(
        message = "Wakes up first and sees the other werewolves. Wins when no werewolf is executed."
    )]
    Werewolf,
    #[strum(
        message = "May look at the card of one other player, or at both cards in the center."
    )]
    Seer,
    #[strum(
        message = "May exchange their card with the card of one other player and look at the new card."
    )]
    Thief,
    #[strum(message = "Has no ability at night. Wins alone if they get executed.")]
    Tanner,
}

#[derive(
    Debug,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Copy,
    Clone,
    Display,
    EnumIter,
    Serialize,
    Deserialize,
)]
pub enum Team {
    Village,
    Werewolf,
    Tanner,
}

/// Roles that wake up during the night, in the order they act.
pub const NIGHT_ACTION_ORDER: [Role; 3] = [Role::Werewolf, Role::Seer, Role::Thief];

/// Number of face-down cards that are never dealt to a player.
pub const CENTER_CARD_COUNT: usize = 2;

impl Role {
    pub fn rules() -> String {
        Role::iter().map(|r| r.rule()).join("\n")
    }

    pub fn team(&self) -> Team {
        match self {
            Role::Villager | Role::Seer | Role::Thief => Team::Village,
            Role::Werewolf => Team::Werewolf,
            Role::Tanner => Team::Tanner,
        }
    }

    pub fn wakes_at_night(&self) -> bool {
        NIGHT_ACTION_ORDER.contains(self)
    }

    pub fn rule(&self) -> String {
        format!(
            "{} [team = {}]: {}",
            self,
            self.team(),
            self.get_message().unwrap_or("No rule")
        )
    }
}
