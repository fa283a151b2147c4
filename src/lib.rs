//! Coin-Expectimax: two agents racing to collect flickering coins.
//!
//! Two agents walk an 8x8 board collecting coins. A coin is either Solid
//! (collectable) or Transparent (not yet collectable), and after every move
//! each coin flips between the two with probability 1/2. Consecutive captures
//! score 1, 3, 5, ... points. Moves are chosen by a depth-limited expectimax
//! search whose chance nodes sample the coin flips.
//!
//! ## Modules
//!
//! - [`constants`] - Board dimensions, probabilities, and search defaults
//! - [`board`] - Cells, the 8x8 grid, and directions
//! - [`state`] - Game rules (moves, scoring, coin flips)
//! - [`search`] - Expectimax search and move selection
//! - [`play`] - Full-game simulation and weight tuning
//!
//! ## Example
//!
//! ```
//! use coin_expectimax::search::{Weights, best_move};
//! use coin_expectimax::state::GameState;
//!
//! let mut rng = fastrand::Rng::with_seed(42);
//! let mut game = GameState::new(&mut rng);
//!
//! // Pick a move for agent 0 and play it
//! if let Some(dir) = best_move(&game, 2, Weights::default(), &mut rng) {
//!     game.play(dir, &mut rng);
//! }
//! println!("{game}");
//! ```

pub mod board;
pub mod constants;
pub mod play;
pub mod search;
pub mod state;
