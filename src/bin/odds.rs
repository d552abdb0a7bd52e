//! # Odds
//!
//! Estimate how often a Texas Hold'em hand wins against random opponents.
//!
//! ## Usage
//!
//! ```bash
//! # Pocket aces on a flop against two opponents
//! cargo run --features cli --bin odds -- -p AsAc -t Qh2c3s -n 3
//!
//! # Repeatable run with a fixed seed and debug logging
//! cargo run --features cli --bin odds -- -p 7c2d -n 6 --seed 420 --log-level debug
//! ```

use clap::Parser;
use poker_odds::core::{Card, HandType, cards_from_str};
use poker_odds::holdem::{DEFAULT_TRIALS, HandTypeDistribution, MonteCarloGame, Probabilities};
use rand::SeedableRng;
use rand::rngs::StdRng;
use tracing_subscriber::EnvFilter;

/// Logging options.
#[derive(clap::Args, Debug)]
struct TracingArgs {
    /// Log level or filter directive, `RUST_LOG` wins when set
    #[arg(long, default_value = "warn")]
    log_level: String,
}

impl TracingArgs {
    fn init_tracing(&self) {
        let filter = EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new(&self.log_level));
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .init();
    }
}

#[derive(Parser, Debug)]
#[command(
    name = "odds",
    about = "Estimate Texas Hold'em odds with a Monte Carlo simulation",
    long_about = "Deal out the unknown cards many times to estimate how often the player wins,\n\
                  ties or loses, and how often each hand type shows up."
)]
struct Args {
    #[command(flatten)]
    tracing: TracingArgs,

    /// The player's two hole cards (e.g., "AsAc")
    #[arg(short = 'p', long)]
    hand: String,

    /// Table cards already dealt, up to five (e.g., "Qh2c3s")
    #[arg(short = 't', long, default_value = "")]
    table: String,

    /// Players at the table, the player included
    #[arg(short = 'n', long, default_value_t = 2)]
    players: usize,

    /// Number of trials to run
    #[arg(short = 's', long, default_value_t = DEFAULT_TRIALS)]
    trials: usize,

    /// Worker threads, defaults to the number of cores
    #[arg(short = 'w', long)]
    workers: Option<usize>,

    /// Seed for a repeatable run
    #[arg(long)]
    seed: Option<u64>,
}

fn parse_cards(what: &str, s: &str) -> Vec<Card> {
    cards_from_str(s).unwrap_or_else(|e| {
        eprintln!("Error parsing {what} '{s}': {e}");
        std::process::exit(1);
    })
}

fn print_distribution(name: &str, d: &HandTypeDistribution) {
    println!("{name}:");
    for t in HandType::ALL.iter().rev() {
        println!("  {:<16} {:>7.3}%", t.to_string(), d.get(*t) * 100.0);
    }
}

fn print_probabilities(p: &Probabilities, players: usize) {
    println!("Results over {} trials:", p.trials);
    println!("========");
    println!("Win:          {:>7.3}%", p.player_win * 100.0);
    println!("Tie:          {:>7.3}%", p.player_tie * 100.0);
    println!("Others win:   {:>7.3}%", p.other_players_win * 100.0);
    println!();
    print_distribution("Player hand", &p.player);
    if players > 1 {
        println!();
        print_distribution("Best opponent hand", &p.other_players);
    }
}

fn main() {
    let args = Args::parse();
    args.tracing.init_tracing();

    let hand = parse_cards("hand", &args.hand);
    let table = parse_cards("table", &args.table);
    let workers = args
        .workers
        .unwrap_or_else(|| std::thread::available_parallelism().map_or(1, |n| n.get()));

    let game = MonteCarloGame::new(&hand, &table, args.players).unwrap_or_else(|e| {
        eprintln!("Error: {e}");
        std::process::exit(1);
    });

    println!("Hand: {}", args.hand);
    println!("Table: {}", args.table);
    println!("Players: {}", args.players);
    println!();

    let result = match args.seed {
        Some(seed) => {
            game.par_estimate_with_rng(args.trials, workers, &mut StdRng::seed_from_u64(seed))
        }
        None => game.par_estimate(args.trials, workers),
    };

    match result {
        Ok(p) => print_probabilities(&p, args.players),
        Err(e) => {
            eprintln!("Error: {e}");
            std::process::exit(1);
        }
    }
}
