//! Constants for board dimensions, coin probabilities, and search parameters.
//!
//! The game is played on a fixed 8x8 board by exactly two agents. Everything
//! that a caller might want to tune at runtime (depth, weights, seed) has a
//! default here and can be overridden from the command line.

// =============================================================================
// Board Geometry
// =============================================================================

/// Board size (NxN).
pub const N: usize = 8;

/// Number of agents in a game.
pub const AGENTS: usize = 2;

/// Starting cell of each agent, indexed by agent. Both are forced Empty.
pub const START_POSITIONS: [(usize, usize); AGENTS] = [(0, 0), (N - 1, N - 1)];

// =============================================================================
// Coin Probabilities
// =============================================================================

/// Probability that a cell holds a coin (Solid or Transparent) at game start.
pub const FILL_PROB: f64 = 0.67;

/// Probability that a coin flips between Solid and Transparent after a move.
pub const FLIP_PROB: f64 = 0.5;

/// Proximity value of a Transparent coin (its chance of turning Solid).
pub const TRANSPARENT_VALUE: f64 = 0.5;

// =============================================================================
// Search Parameters
// =============================================================================

/// Default search depth per move.
pub const DEFAULT_DEPTH: u32 = 3;

/// Default weight of the current agent's score in the evaluation.
pub const DEFAULT_W1: f64 = 9.0;

/// Default weight of the coin proximity term in the evaluation.
pub const DEFAULT_W2: f64 = 6.0;

/// Coin-flip trials per direction at a chance node.
pub const CHANCE_TRIALS: usize = 2;

/// Lottery weight of each tied-best direction in `best_move`.
pub const BEST_MOVE_WEIGHT: usize = 5;

/// Lottery weight of the extra uniformly drawn direction in `best_move`.
pub const EXPLORE_WEIGHT: usize = 1;

// =============================================================================
// Driver Parameters
// =============================================================================

/// Maximum number of rounds in a single game before the driver gives up.
pub const MAX_TURNS: usize = 10_000;

/// Games per weight combination in the weight sweep.
pub const SWEEP_TRIALS: usize = 100;

/// Largest weight tried by the sweep (weights run from 1 to this value).
pub const SWEEP_MAX_WEIGHT: u32 = 9;

/// Default number of sample boards for the expectimax-vs-random comparison.
pub const RUN_SAMPLES: usize = 10;
