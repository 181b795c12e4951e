use thiserror::Error;

use crate::{game_state::GamePhase, player::PlayerId, role::Role};

pub type GameResult<T> = Result<T, GameError>;

/// Reasons an engine call is rejected. None of these leave the session half-mutated.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GameError {
    #[error("role deck has {actual} cards, expected {expected}")]
    DeckSizeMismatch { expected: usize, actual: usize },

    #[error("player {actor} cannot target {target}")]
    InvalidTarget { actor: PlayerId, target: PlayerId },

    #[error("player {0} has already voted")]
    AlreadyVoted(PlayerId),

    #[error("player {player} cannot act as {role} now")]
    NotEligible { player: PlayerId, role: Role },

    #[error("expected phase {expected}, game is in phase {actual}")]
    WrongPhase {
        expected: GamePhase,
        actual: GamePhase,
    },

    #[error("it is not the turn of the {0} group")]
    OutOfTurn(Role),

    #[error("unknown player {0}")]
    UnknownPlayer(PlayerId),

    #[error("player {0} has already joined")]
    DuplicatePlayer(PlayerId),

    #[error("the game is full ({max} players)")]
    RosterFull { max: usize },

    #[error("not enough players: {actual}, need at least {min}")]
    NotEnoughPlayers { min: usize, actual: usize },

    #[error("no role deck is configured for {0} players")]
    NoDefaultDeck(usize),

    #[error("player {0} has already acted tonight")]
    AlreadyActed(PlayerId),

    #[error("{role} players still have to act: {pending:?}")]
    ActionsPending { role: Role, pending: Vec<PlayerId> },

    #[error("the night is not over yet")]
    NightNotFinished,

    #[error("the execution has not been resolved yet")]
    ExecutionNotResolved,
}
