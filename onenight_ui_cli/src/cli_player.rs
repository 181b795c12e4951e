use std::{
    cell::Cell,
    io::{self, BufRead, Write},
    str::FromStr,
};

use itertools::Itertools;

use onenight_core::{
    event::Event,
    interface::{PlayerInterface, Seat},
    night::{SeerChoice, ThiefChoice},
    player::{NightOutcome, PlayerId, VoteTarget},
    vote::ExecutionOutcome,
    GamePhase, Role,
};

static RULES: &str = "
*** One Night Werewolf ***
Every player gets a secret role card, two more cards lie face-down in the center.
During the single night the werewolves learn about each other, the seer looks at
one other player's card or at both center cards, and the thief may swap cards with
another player. Then everybody discusses and votes for one player to execute,
or for no execution at all. The player with the most votes is executed; a tie
executes nobody. The village wins if a werewolf is executed, the werewolves win
if they all escape, and the tanner wins alone if they get executed.
Your team is decided by the card you hold at the end, not the one you were dealt.";

#[derive(Debug, PartialEq)]
enum CliAction {
    Rules,
    RoleEffects,
    Player(usize),
    Center,
    Skip,
}

#[derive(Debug, PartialEq, Eq)]
struct ParseActionError;

impl CliAction {
    fn info(&self, players: &[Seat]) -> String {
        match self {
            CliAction::Rules => "display rules".to_string(),
            CliAction::RoleEffects => "display role effects".to_string(),
            CliAction::Player(index) => players
                .get(*index)
                .map(|p| p.name.clone())
                .unwrap_or_default(),
            CliAction::Center => "look at both center cards".to_string(),
            CliAction::Skip => "do nothing".to_string(),
        }
    }

    fn cmd_str(&self) -> String {
        match self {
            CliAction::Rules => "r".to_string(),
            CliAction::RoleEffects => "c".to_string(),
            CliAction::Player(index) => index.to_string(),
            CliAction::Center => "m".to_string(),
            CliAction::Skip => "s".to_string(),
        }
    }
}

impl FromStr for CliAction {
    type Err = ParseActionError;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "r" => Ok(CliAction::Rules),
            "c" => Ok(CliAction::RoleEffects),
            "m" => Ok(CliAction::Center),
            "s" => Ok(CliAction::Skip),
            other => usize::from_str(other)
                .map(CliAction::Player)
                .map_err(|_| ParseActionError),
        }
    }
}

pub fn ask_name() -> String {
    print!("Please Enter Name: ");
    let _ = io::stdout().flush();
    match io::stdin().lock().lines().next() {
        Some(Ok(line)) if !line.trim().is_empty() => line.trim().to_string(),
        _ => "You".to_string(),
    }
}

pub struct CliPlayer {
    pub id: PlayerId,
    printed: Cell<usize>,
}

impl CliPlayer {
    pub fn new(id: PlayerId) -> CliPlayer {
        CliPlayer {
            id,
            printed: Cell::new(0),
        }
    }

    /// Keeps asking until one of `cmds` is typed. Rules and role effects are
    /// answered in place. `None` when stdin is closed.
    fn query_user(
        &self,
        mut cmds: Vec<CliAction>,
        prompt: &str,
        players: &[Seat],
    ) -> Option<CliAction> {
        cmds.insert(0, CliAction::Rules);
        cmds.insert(1, CliAction::RoleEffects);
        print!("\n{}\n", prompt);
        loop {
            for cmd in &cmds {
                println!("- [{}]: {}", cmd.cmd_str(), cmd.info(players));
            }
            print!(">");
            let _ = io::stdout().flush();
            let line = io::stdin().lock().lines().next()?.ok()?;
            match CliAction::from_str(&line) {
                Ok(CliAction::Rules) => println!("{}", RULES),
                Ok(CliAction::RoleEffects) => println!("{}", Role::rules()),
                Ok(action) if cmds.contains(&action) => return Some(action),
                _ => println!("Unknown command"),
            }
        }
    }

    fn opponents(&self, players: &[Seat]) -> Vec<CliAction> {
        players
            .iter()
            .enumerate()
            .filter(|(_, p)| p.id != self.id)
            .map(|(index, _)| CliAction::Player(index))
            .collect()
    }

    fn name_of(players: &[Seat], id: PlayerId) -> String {
        players
            .iter()
            .find(|p| p.id == id)
            .map(|p| p.name.clone())
            .unwrap_or_else(|| format!("#{id}"))
    }

    fn format_target(target: &VoteTarget, players: &[Seat]) -> String {
        match target {
            VoteTarget::Player(id) => Self::name_of(players, *id),
            VoteTarget::NoExecution => "no execution".to_string(),
        }
    }

    fn print_event(&self, event: &Event, players: &[Seat]) {
        match event {
            Event::Joined(pl) => println!("~ Joined: {}", Self::name_of(players, *pl)),
            Event::Left(pl) => println!("~ Left: {}", Self::name_of(players, *pl)),
            Event::RoleDealt(pl, role) => match role {
                Some(role) => println!("~ Dealt: {} got {}", Self::name_of(players, *pl), role),
                None => println!("~ Dealt: {} got ***", Self::name_of(players, *pl)),
            },
            Event::PhaseChanged(phase) => match phase {
                GamePhase::Night => println!("~ Night falls, everybody closes their eyes"),
                GamePhase::Discussion => println!("~ Morning! Discuss who the werewolves are"),
                GamePhase::Voting => println!("~ Time to vote"),
                GamePhase::Ended => println!("~ The votes are in"),
                GamePhase::Waiting => {}
            },
            Event::RoleAwake(role) => println!("~ {} wakes up", role),
            Event::NightAction(pl, NightOutcome::SoleWerewolf) if *pl != self.id => {
                println!("~ {} was the only werewolf", Self::name_of(players, *pl))
            }
            Event::NightAction(pl, outcome) => {
                println!("~ {}: {}", Self::name_of(players, *pl), outcome)
            }
            Event::Voted(pl, target) => println!(
                "~ Vote: {} voted for {}",
                Self::name_of(players, *pl),
                Self::format_target(target, players)
            ),
            Event::Execution(outcome) => match outcome {
                ExecutionOutcome::Executed(pl) => {
                    println!("~ {} is executed", Self::name_of(players, *pl))
                }
                ExecutionOutcome::Tie(targets) => println!(
                    "~ Tie between {}, nobody is executed",
                    targets.iter().map(|t| Self::format_target(t, players)).join(", ")
                ),
                ExecutionOutcome::NoExecutionChosen => {
                    println!("~ The village chose peace, nobody is executed")
                }
                ExecutionOutcome::NoVotes => println!("~ Nobody voted, nobody is executed"),
            },
            Event::Winners(teams) => println!("Winner is {}", teams.iter().join(", ")),
        }
    }
}

impl PlayerInterface for CliPlayer {
    fn notify(&self, game_log: &[Event], players: &[Seat]) {
        let start = self.printed.get().min(game_log.len());
        if start == game_log.len() {
            return;
        }
        println!("================================================");
        for entry in &game_log[start..] {
            self.print_event(entry, players);
        }
        self.printed.set(game_log.len());
    }

    fn choose_seer_action(
        &self,
        _me: PlayerId,
        players: &[Seat],
        game_log: &[Event],
    ) -> Option<SeerChoice> {
        self.notify(game_log, players);
        let mut cmds = self.opponents(players);
        cmds.push(CliAction::Center);
        let prompt = "You are the Seer. Whose card do you want to see?";
        match self.query_user(cmds, prompt, players)? {
            CliAction::Player(index) => players.get(index).map(|p| SeerChoice::Player(p.id)),
            CliAction::Center => Some(SeerChoice::Center),
            _ => None,
        }
    }

    fn choose_thief_action(
        &self,
        _me: PlayerId,
        players: &[Seat],
        game_log: &[Event],
    ) -> Option<ThiefChoice> {
        self.notify(game_log, players);
        let mut cmds = self.opponents(players);
        cmds.push(CliAction::Skip);
        let prompt = "You are the Thief. Whose card do you want to take?";
        match self.query_user(cmds, prompt, players)? {
            CliAction::Player(index) => players.get(index).map(|p| ThiefChoice::Swap(p.id)),
            _ => Some(ThiefChoice::Skip),
        }
    }

    fn choose_vote(&self, _me: PlayerId, players: &[Seat], game_log: &[Event]) -> VoteTarget {
        self.notify(game_log, players);
        let mut cmds = self.opponents(players);
        cmds.push(CliAction::Skip);
        match self.query_user(
            cmds,
            "Who should be executed? [s] votes for no execution.",
            players,
        ) {
            Some(CliAction::Player(index)) => players
                .get(index)
                .map(|p| VoteTarget::Player(p.id))
                .unwrap_or(VoteTarget::NoExecution),
            _ => VoteTarget::NoExecution,
        }
    }
}
