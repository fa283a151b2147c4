//! Full-game simulation: expectimax self-play, a random baseline, and the
//! brute-force search for evaluation weights.
//!
//! A game is played in rounds. In each round agent 0 and then agent 1 pick a
//! move and play it; the round ends early once the last coin is taken. The
//! number of rounds needed to clear the board is the measure of how well a
//! policy plays, so lower is better.

use log::{debug, info};

use crate::board::Direction;
use crate::constants::{AGENTS, MAX_TURNS};
use crate::search::{Weights, best_move};
use crate::state::GameState;

/// Play one round-based game to completion with `choose` picking each move.
///
/// `observer` is called after every round with the state and round number.
/// Returns the number of rounds played, capped at `MAX_TURNS`.
fn run_game<C, O>(state: &mut GameState, rng: &mut fastrand::Rng, mut choose: C, mut observer: O) -> usize
where
    C: FnMut(&GameState, &mut fastrand::Rng) -> Option<Direction>,
    O: FnMut(&GameState, usize),
{
    let mut turns = 0;
    while !state.is_over() && turns < MAX_TURNS {
        for agent in 0..AGENTS {
            state.set_current_agent(agent);
            if let Some(dir) = choose(state, rng) {
                state.play(dir, rng);
            }
            if state.is_over() {
                break;
            }
        }
        turns += 1;
        observer(state, turns);
    }
    if !state.is_over() {
        debug!("game stopped after {turns} turns with {} coins left", state.coins_remaining());
    }
    turns
}

/// Play a game where both agents use `best_move` at the given depth and
/// weights. Returns the number of rounds.
pub fn play_game(state: &mut GameState, depth: u32, weights: Weights, rng: &mut fastrand::Rng) -> usize {
    play_game_with(state, depth, weights, rng, |_, _| {})
}

/// Like [`play_game`], calling `observer` after every round.
pub fn play_game_with<O>(
    state: &mut GameState,
    depth: u32,
    weights: Weights,
    rng: &mut fastrand::Rng,
    observer: O,
) -> usize
where
    O: FnMut(&GameState, usize),
{
    run_game(state, rng, |s, rng| best_move(s, depth, weights, rng), observer)
}

/// Play a game where both agents move in uniformly random directions.
pub fn random_game(state: &mut GameState, rng: &mut fastrand::Rng) -> usize {
    run_game(
        state,
        rng,
        |_, rng| Some(Direction::ALL[rng.usize(..Direction::ALL.len())]),
        |_, _| {},
    )
}

/// Average game length of expectimax self-play against the random baseline.
#[derive(Clone, Debug, PartialEq)]
pub struct Comparison {
    pub samples: usize,
    pub expectimax_turns: f64,
    pub random_turns: f64,
}

impl Comparison {
    /// How many times faster expectimax clears the board than random play.
    pub fn speedup(&self) -> f64 {
        if self.expectimax_turns > 0.0 {
            self.random_turns / self.expectimax_turns
        } else {
            0.0
        }
    }
}

/// Play `samples` boards twice each, once with expectimax agents and once with
/// random agents, starting from identical copies.
///
/// `on_board` sees each starting board before it is played. Returns `None`
/// when `samples` is zero.
pub fn compare<F>(
    samples: usize,
    depth: u32,
    weights: Weights,
    rng: &mut fastrand::Rng,
    mut on_board: F,
) -> Option<Comparison>
where
    F: FnMut(&GameState),
{
    if samples == 0 {
        return None;
    }
    let mut total_play = 0;
    let mut total_random = 0;
    for i in 0..samples {
        let game = GameState::new(rng);
        on_board(&game);
        let play = play_game(&mut game.clone(), depth, weights, rng);
        let random = random_game(&mut game.clone(), rng);
        info!("sample {i}: expectimax {play} turns, random {random} turns");
        total_play += play;
        total_random += random;
    }
    let n = samples as f64;
    Some(Comparison {
        samples,
        expectimax_turns: total_play as f64 / n,
        random_turns: total_random as f64 / n,
    })
}

/// Outcome of [`find_best_weights`].
#[derive(Clone, Debug, PartialEq)]
pub struct SweepResult {
    pub weights: Weights,
    pub average_turns: f64,
}

/// Try every integer weight pair in `1..=max_weight`, playing `trials` fresh
/// games per pair, and keep the pair with the fewest average rounds. The
/// first pair found wins ties.
///
/// Returns `None` when `trials` or `max_weight` is zero.
pub fn find_best_weights(
    depth: u32,
    trials: usize,
    max_weight: u32,
    rng: &mut fastrand::Rng,
) -> Option<SweepResult> {
    if trials == 0 || max_weight == 0 {
        return None;
    }
    let mut best = SweepResult {
        weights: Weights::new(0.0, 0.0),
        average_turns: f64::INFINITY,
    };

    for w1 in 1..=max_weight {
        for w2 in 1..=max_weight {
            let weights = Weights::new(w1 as f64, w2 as f64);
            let total: usize = (0..trials)
                .map(|_| play_game(&mut GameState::new(rng), depth, weights, rng))
                .sum();
            let average_turns = total as f64 / trials as f64;
            info!("Testing weights (w1={w1}, w2={w2}): Average Turns = {average_turns}");

            if average_turns < best.average_turns {
                best = SweepResult { weights, average_turns };
            }
        }
    }

    info!(
        "best weights w1={} w2={} average turns {}",
        best.weights.score, best.weights.proximity, best.average_turns
    );
    Some(best)
}
