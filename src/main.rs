//! Coin-Expectimax: a coin collection game played by expectimax agents.
//!
//! ## Usage
//!
//! - `coin-expectimax` - Play a demo game
//! - `coin-expectimax run` - Compare expectimax against random play
//! - `coin-expectimax optimize` - Search for the best evaluation weights
//!
//! Set `RUST_LOG=debug` to follow the search decisions.

use anyhow::{Context, Result, ensure};
use clap::{Args, Parser, Subcommand};

use coin_expectimax::constants::{
    DEFAULT_DEPTH, DEFAULT_W1, DEFAULT_W2, RUN_SAMPLES, SWEEP_MAX_WEIGHT, SWEEP_TRIALS,
};
use coin_expectimax::play::{compare, find_best_weights, play_game_with};
use coin_expectimax::search::Weights;
use coin_expectimax::state::GameState;

/// Run the coin collection game played by the expectimax algorithm
#[derive(Parser)]
#[command(name = "coin-expectimax")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(flatten)]
    search: SearchArgs,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Args)]
struct SearchArgs {
    /// Search depth per move
    #[arg(long, global = true, default_value_t = DEFAULT_DEPTH)]
    depth: u32,
    /// Weight of the agent's score in the evaluation
    #[arg(long, global = true, default_value_t = DEFAULT_W1)]
    w1: f64,
    /// Weight of nearby coins in the evaluation
    #[arg(long, global = true, default_value_t = DEFAULT_W2)]
    w2: f64,
    /// Seed for the random number generator (random if omitted)
    #[arg(long, global = true)]
    seed: Option<u64>,
}

#[derive(Subcommand)]
enum Commands {
    /// Play one game, printing the board after every round
    Demo,
    /// Compare expectimax agents against random agents
    Run {
        /// Number of sample boards
        #[arg(long, default_value_t = RUN_SAMPLES)]
        samples: usize,
    },
    /// Find the best evaluation weights by brute force
    Optimize {
        /// Games per weight combination
        #[arg(long, default_value_t = SWEEP_TRIALS)]
        trials: usize,
        /// Largest weight to try (weights run from 1)
        #[arg(long, default_value_t = SWEEP_MAX_WEIGHT)]
        max_weight: u32,
    },
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();
    let args = cli.search;
    ensure!(args.depth >= 1, "--depth must be at least 1");

    let mut rng = match args.seed {
        Some(seed) => fastrand::Rng::with_seed(seed),
        None => fastrand::Rng::new(),
    };
    let weights = Weights::new(args.w1, args.w2);

    match cli.command {
        Some(Commands::Run { samples }) => {
            let result = compare(samples, args.depth, weights, &mut rng, |game| println!("{game}"))
                .context("--samples must be positive")?;
            println!("\nExpectimax: {} turns", result.expectimax_turns);
            println!("Random: {} turns", result.random_turns);
            println!(
                "\nThe Expectimax Algorithm is {:.2} Times Faster Than Random Baseline",
                result.speedup()
            );
        }
        Some(Commands::Optimize { trials, max_weight }) => {
            let best = find_best_weights(args.depth, trials, max_weight, &mut rng)
                .context("--trials and --max-weight must be positive")?;
            println!(
                "{} {} {}",
                best.weights.score, best.weights.proximity, best.average_turns
            );
        }
        Some(Commands::Demo) | None => {
            run_demo(args.depth, weights, &mut rng);
        }
    }
    Ok(())
}

fn run_demo(depth: u32, weights: Weights, rng: &mut fastrand::Rng) {
    let mut game = GameState::new(rng);
    println!("{game}");
    let turns = play_game_with(&mut game, depth, weights, rng, |state, _| println!("{state}"));
    println!("Game finished in {turns} turns");
}
