//! Rules engine for One Night Werewolf: deal, night actions, voting and the
//! final verdict. The engine is synchronous and owns no timers; a front end
//! decides when time is up and calls the matching transition.

use config::GameConfig;
use error::GameResult;
use game_lobby::GameLobby;
use interface::PlayerInterface;
use player::PlayerId;
use random_playing_computer::RandomPlayingComputer;
use summary::GameSummary;

pub mod config;
mod dealer;
pub mod error;
pub mod event;
pub mod game_lobby;
pub mod game_state;
pub mod interface;
pub mod night;
pub mod player;
pub mod random_playing_computer;
pub mod role;
pub mod roster;
pub mod summary;
pub mod utils;
pub mod vote;
pub mod win;

pub use error::GameError;
pub use game_state::{GamePhase, GameState};
pub use role::{Role, Team};

/// Plays one game with a single interactive player against `computers` bots.
pub fn run_game<C, T>(
    name: &str,
    player_constructor: C,
    computers: usize,
    config: GameConfig,
) -> GameResult<GameSummary>
where
    C: FnOnce(PlayerId) -> T,
    T: PlayerInterface + 'static,
{
    let mut lobby = GameLobby::new(config);
    lobby.add_player(name, player_constructor);
    for i in 1..=computers {
        lobby.add_player(format!("Computer {i}"), RandomPlayingComputer::new);
    }
    lobby.play_round()
}
