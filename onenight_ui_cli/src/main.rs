use clap::Parser;
use cli_player::{ask_name, CliPlayer};
use itertools::Itertools;
use log::info;
use onenight_core::{config::GameConfig, run_game, summary::GameSummary};

mod cli_player;

#[derive(Parser, Debug)]
#[command(name = "onenight", about = "One Night Werewolf against computer players")]
struct Args {
    /// Your name at the table
    #[arg(short, long)]
    name: Option<String>,

    /// Number of computer players
    #[arg(short, long, default_value_t = 4)]
    computers: usize,

    /// Seed for the card shuffle
    #[arg(short, long)]
    seed: Option<u64>,
}

fn print_summary(summary: &GameSummary) {
    println!("\n*** Final roles ***");
    for p in &summary.reveal.players {
        let initial = p.initial_role.map(|r| r.to_string()).unwrap_or_default();
        let current = p.current_role.map(|r| r.to_string()).unwrap_or_default();
        if p.was_swapped() {
            println!("- {}: {} -> {}", p.name, initial, current);
        } else {
            println!("- {}: {}", p.name, current);
        }
    }
    println!(
        "- Center: {}",
        summary.reveal.center_cards.iter().join(", ")
    );
    println!("Winner is {}", summary.winners.iter().join(", "));
}

fn main() {
    env_logger::init();
    let args = Args::parse();
    let name = args.name.unwrap_or_else(ask_name);
    let mut config = GameConfig::default();
    if let Some(seed) = args.seed {
        config = config.with_seed(seed);
    }
    info!("starting a game with {} computer players", args.computers);

    match run_game(&name, CliPlayer::new, args.computers, config) {
        Ok(summary) => print_summary(&summary),
        Err(e) => {
            eprintln!("Could not play: {e}");
            std::process::exit(1);
        }
    }
}
