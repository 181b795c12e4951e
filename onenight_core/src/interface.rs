use crate::{
    event::Event,
    night::{SeerChoice, ThiefChoice},
    player::{PlayerId, VoteTarget},
};

/// Public facts about a seated player.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Seat {
    pub id: PlayerId,
    pub name: String,
}

/// How the engine talks to whoever sits behind a player: a terminal, a chat
/// user, a bot. Returning `None` from a night choice means no answer came in time.
pub trait PlayerInterface {
    fn notify(&self, game_log: &[Event], players: &[Seat]);

    fn choose_seer_action(
        &self,
        me: PlayerId,
        players: &[Seat],
        game_log: &[Event],
    ) -> Option<SeerChoice>;

    fn choose_thief_action(
        &self,
        me: PlayerId,
        players: &[Seat],
        game_log: &[Event],
    ) -> Option<ThiefChoice>;

    fn choose_vote(&self, me: PlayerId, players: &[Seat], game_log: &[Event]) -> VoteTarget;
}
