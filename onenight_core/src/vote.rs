use log::{debug, info, warn};
use serde::{Deserialize, Serialize};

use crate::{
    error::{GameError, GameResult},
    event::{Event, EventEntry},
    game_state::{GamePhase, GameState},
    player::{PlayerId, VoteTarget},
    utils::{leaders, SliceExtensions},
};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum ExecutionOutcome {
    Executed(PlayerId),
    /// Several targets share the most votes; a tie is never broken.
    Tie(Vec<VoteTarget>),
    /// Voting for no execution won outright.
    NoExecutionChosen,
    NoVotes,
}

impl ExecutionOutcome {
    pub fn executed(&self) -> Option<PlayerId> {
        match self {
            ExecutionOutcome::Executed(id) => Some(*id),
            _ => None,
        }
    }
}

/// Votes per target, roster order first, the no-execution bucket last.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VoteTally {
    counts: Vec<(VoteTarget, usize)>,
}

impl VoteTally {
    pub fn get(&self, target: VoteTarget) -> usize {
        self.counts
            .iter()
            .find(|(t, _)| *t == target)
            .map(|&(_, c)| c)
            .unwrap_or(0)
    }

    pub fn iter(&self) -> impl Iterator<Item = &(VoteTarget, usize)> {
        self.counts.iter()
    }

    pub fn total(&self) -> usize {
        self.counts.iter().map(|&(_, c)| c).sum()
    }

    /// Plurality wins; any tie at the top, or no-execution on top, executes nobody.
    pub fn outcome(&self) -> ExecutionOutcome {
        let (max, top) = leaders(&self.counts);
        if max == 0 {
            return ExecutionOutcome::NoVotes;
        }
        match top.single_element() {
            Some(VoteTarget::Player(id)) => ExecutionOutcome::Executed(*id),
            Some(VoteTarget::NoExecution) => ExecutionOutcome::NoExecutionChosen,
            None => ExecutionOutcome::Tie(top),
        }
    }
}

impl GameState {
    /// Accepts one ballot per player. Nobody may vote for themselves and a
    /// ballot, once cast, stands.
    pub fn register_vote(&mut self, voter: PlayerId, target: VoteTarget) -> GameResult<()> {
        self.expect_phase(GamePhase::Voting)?;
        let ballot = self.roster.get(voter).ok_or(GameError::UnknownPlayer(voter))?;
        if ballot.has_voted() {
            warn!("player {voter} tried to vote twice");
            return Err(GameError::AlreadyVoted(voter));
        }
        if let VoteTarget::Player(id) = target {
            if id == voter || !self.roster.contains(id) {
                return Err(GameError::InvalidTarget { actor: voter, target: id });
            }
        }
        if let Some(player) = self.roster.get_mut(voter) {
            player.set_vote(target);
        }
        debug!(
            "player {voter} voted for {target:?} ({}/{})",
            self.voted_count(),
            self.roster.len()
        );
        self.log.push(EventEntry::public(Event::Voted(voter, target)));
        Ok(())
    }

    pub fn voted_count(&self) -> usize {
        self.roster.iter().filter(|p| p.has_voted()).count()
    }

    pub fn all_voted(&self) -> bool {
        self.roster.iter().all(|p| p.has_voted())
    }

    pub fn tally(&self) -> VoteTally {
        let mut counts = self
            .roster
            .iter()
            .map(|p| (VoteTarget::Player(p.id), 0))
            .collect::<Vec<_>>();
        counts.push((VoteTarget::NoExecution, 0));
        for target in self.roster.iter().filter_map(|p| p.vote_target()) {
            if let Some(entry) = counts.iter_mut().find(|(t, _)| *t == target) {
                entry.1 += 1;
            }
        }
        VoteTally { counts }
    }

    /// Decides who is executed and ends the game. Runs once; the result is
    /// kept for the win evaluation.
    pub fn resolve_execution(&mut self) -> GameResult<ExecutionOutcome> {
        self.expect_phase(GamePhase::Voting)?;
        let outcome = self.tally().outcome();
        self.executed = outcome.executed().into_iter().collect();
        info!("execution resolved: {outcome:?}");
        self.execution = Some(outcome.clone());
        self.set_phase(GamePhase::Ended);
        self.log
            .push(EventEntry::public(Event::Execution(outcome.clone())));
        Ok(outcome)
    }

    pub fn execution(&self) -> Option<&ExecutionOutcome> {
        self.execution.as_ref()
    }

    pub fn executed(&self) -> &[PlayerId] {
        &self.executed
    }
}

#[cfg(test)]
mod tests {
    use crate::{
        error::GameError,
        game_state::{tests::game_with_roles, GamePhase, GameState},
        player::VoteTarget::{self, NoExecution, Player},
        role::Role,
        vote::ExecutionOutcome,
    };

    fn voting_game(players: usize) -> GameState {
        let mut roles = vec![Role::Villager; players];
        roles.extend([Role::Werewolf, Role::Werewolf]);
        let mut state = game_with_roles(&roles);
        while state.current_night_role().is_some() {
            state.advance_night().unwrap();
        }
        state.start_discussion().unwrap();
        state.start_voting().unwrap();
        state
    }

    fn cast(state: &mut GameState, ballots: &[(u64, VoteTarget)]) {
        for &(voter, target) in ballots {
            state.register_vote(voter, target).unwrap();
        }
    }

    #[test]
    fn second_vote_should_be_rejected_and_first_should_stand() {
        let mut state = voting_game(3);

        assert_eq!(state.register_vote(1, Player(2)), Ok(()));
        assert_eq!(state.register_vote(1, Player(3)), Err(GameError::AlreadyVoted(1)));
        assert_eq!(state.register_vote(1, NoExecution), Err(GameError::AlreadyVoted(1)));
        assert_eq!(state.player(1).unwrap().vote_target(), Some(Player(2)));
    }

    #[test]
    fn invalid_ballots_should_not_count() {
        let mut state = voting_game(3);

        assert_eq!(
            state.register_vote(1, Player(1)),
            Err(GameError::InvalidTarget { actor: 1, target: 1 })
        );
        assert_eq!(
            state.register_vote(1, Player(42)),
            Err(GameError::InvalidTarget { actor: 1, target: 42 })
        );
        assert_eq!(state.register_vote(42, Player(1)), Err(GameError::UnknownPlayer(42)));
        assert_eq!(state.voted_count(), 0);
    }

    #[test]
    fn votes_should_only_be_accepted_while_voting() {
        let mut state = game_with_roles(&[Role::Villager; 5]);

        assert!(matches!(
            state.register_vote(1, Player(2)),
            Err(GameError::WrongPhase { .. })
        ));
    }

    #[test]
    fn tally_should_start_every_bucket_at_zero() {
        let mut state = voting_game(3);
        cast(&mut state, &[(1, Player(2)), (3, NoExecution)]);

        let tally = state.tally();

        assert_eq!(
            tally.iter().copied().collect::<Vec<_>>(),
            vec![(Player(1), 0), (Player(2), 1), (Player(3), 0), (NoExecution, 1)]
        );
        assert_eq!(tally.total(), 2);
        assert!(!state.all_voted());
    }

    #[test]
    fn clear_plurality_should_execute() {
        let mut state = voting_game(5);
        cast(&mut state, &[(2, Player(1)), (3, Player(1)), (4, Player(1)), (1, Player(2))]);

        assert_eq!(state.resolve_execution(), Ok(ExecutionOutcome::Executed(1)));
        assert_eq!(state.executed(), &[1]);
        assert_eq!(state.phase(), GamePhase::Ended);
    }

    #[test]
    fn tie_between_players_should_execute_nobody() {
        let mut state = voting_game(4);
        cast(&mut state, &[(1, Player(2)), (3, Player(2)), (2, Player(1)), (4, Player(1))]);

        assert_eq!(
            state.resolve_execution(),
            Ok(ExecutionOutcome::Tie(vec![Player(1), Player(2)]))
        );
        assert!(state.executed().is_empty());
    }

    #[test]
    fn tie_with_no_execution_should_execute_nobody() {
        let mut state = voting_game(6);
        cast(
            &mut state,
            &[
                (2, Player(1)),
                (3, Player(1)),
                (4, Player(1)),
                (1, NoExecution),
                (5, NoExecution),
                (6, NoExecution),
            ],
        );

        assert_eq!(
            state.resolve_execution(),
            Ok(ExecutionOutcome::Tie(vec![Player(1), NoExecution]))
        );
        assert!(state.executed().is_empty());
    }

    #[test]
    fn no_execution_majority_should_execute_nobody() {
        let mut state = voting_game(5);
        cast(
            &mut state,
            &[
                (1, NoExecution),
                (2, NoExecution),
                (3, NoExecution),
                (4, NoExecution),
                (5, Player(1)),
            ],
        );

        assert_eq!(state.resolve_execution(), Ok(ExecutionOutcome::NoExecutionChosen));
        assert!(state.executed().is_empty());
    }

    #[test]
    fn no_votes_should_execute_nobody() {
        let mut state = voting_game(3);

        assert_eq!(state.resolve_execution(), Ok(ExecutionOutcome::NoVotes));
    }

    #[test]
    fn execution_should_only_be_resolved_once() {
        let mut state = voting_game(3);
        state.resolve_execution().unwrap();

        assert!(matches!(
            state.resolve_execution(),
            Err(GameError::WrongPhase { .. })
        ));
        assert!(matches!(
            state.register_vote(1, Player(2)),
            Err(GameError::WrongPhase { .. })
        ));
    }
}
