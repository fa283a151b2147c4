//! Expectimax search with alpha-beta pruning at max nodes.
//!
//! This module implements:
//! - A linear evaluation of score and nearby coins
//! - Depth-limited expectimax alternating max and chance nodes
//! - A greedy shortcut toward a single adjacent Solid coin
//! - Move selection by a weighted lottery over tied-best moves
//!
//! Every branch works on its own clone of the `GameState`, so siblings never
//! observe each other's moves or coin flips. The chance nodes sample the coin
//! flips (`CHANCE_TRIALS` trials per direction) rather than enumerating them.

use log::{debug, trace};

use crate::board::{Cell, Direction, step};
use crate::constants::{
    BEST_MOVE_WEIGHT, CHANCE_TRIALS, DEFAULT_W1, DEFAULT_W2, EXPLORE_WEIGHT, TRANSPARENT_VALUE,
};
use crate::state::GameState;

/// Weights of the two evaluation terms.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Weights {
    /// Weight of the current agent's score (w1)
    pub score: f64,
    /// Weight of the nearby-coin value (w2)
    pub proximity: f64,
}

impl Weights {
    pub fn new(score: f64, proximity: f64) -> Self {
        Self { score, proximity }
    }
}

impl Default for Weights {
    fn default() -> Self {
        Self::new(DEFAULT_W1, DEFAULT_W2)
    }
}

/// Kind of node in the expectimax tree.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum NodeKind {
    /// The agent to move picks the best direction.
    Max,
    /// The coins flip at random before the agent moves.
    Chance,
}

/// Value of the 3x3 block around the current agent: 1 per Solid coin and
/// `TRANSPARENT_VALUE` per Transparent coin.
fn proximity(state: &GameState) -> f64 {
    state
        .board()
        .neighborhood(state.position(state.current_agent()))
        .map(|cell| match cell {
            Cell::Solid => 1.0,
            Cell::Transparent => TRANSPARENT_VALUE,
            Cell::Empty => 0.0,
        })
        .sum()
}

/// Static evaluation from the point of view of the agent to move.
pub fn evaluate(state: &GameState, weights: Weights) -> f64 {
    let score = state.scores()[state.current_agent()] as f64;
    weights.score * score + weights.proximity * proximity(state)
}

/// Expectimax value of `state` searched `depth` plies deep.
///
/// Max nodes return `f64::NEG_INFINITY` when no direction is legal.
/// Chance nodes average over every successful (trial, direction) pair and
/// return 0 when none succeeded. Only max nodes prune.
pub fn expectimax(
    state: &GameState,
    depth: u32,
    mut alpha: f64,
    beta: f64,
    node: NodeKind,
    weights: Weights,
    rng: &mut fastrand::Rng,
) -> f64 {
    if depth == 0 || state.is_over() {
        return evaluate(state, weights);
    }

    match node {
        NodeKind::Max => {
            let mut best = f64::NEG_INFINITY;
            for dir in Direction::ALL {
                let mut child = state.clone();
                if !child.play(dir, rng) {
                    continue;
                }
                let value = expectimax(&child, depth - 1, alpha, beta, NodeKind::Chance, weights, rng);
                best = best.max(value);
                alpha = alpha.max(value);
                if beta <= alpha {
                    break;
                }
            }
            best
        }
        NodeKind::Chance => {
            let mut total = 0.0;
            let mut count = 0usize;
            for dir in Direction::ALL {
                for _ in 0..CHANCE_TRIALS {
                    let mut child = state.clone();
                    child.update_coin_state(rng);
                    if child.play(dir, rng) {
                        total += expectimax(&child, depth - 1, alpha, beta, NodeKind::Max, weights, rng);
                        count += 1;
                    }
                }
            }
            if count == 0 { 0.0 } else { total / count as f64 }
        }
    }
}

/// Direction of the only Solid coin orthogonally adjacent to the agent to
/// move, or `None` if there are zero or several.
pub fn single_adjacent_coin(state: &GameState) -> Option<Direction> {
    let pos = state.position(state.current_agent());
    let mut coins = Direction::ALL.into_iter().filter(|&dir| {
        step(pos, dir).is_some_and(|pt| state.cell(pt) == Cell::Solid)
    });
    match (coins.next(), coins.next()) {
        (Some(dir), None) => Some(dir),
        _ => None,
    }
}

/// Choose a move for the agent to move.
///
/// Takes the single adjacent Solid coin if there is exactly one. Otherwise
/// scores each legal direction with a `depth`-ply search and draws from a
/// lottery in which every tied-best direction has weight `BEST_MOVE_WEIGHT`
/// and one uniformly drawn direction has weight `EXPLORE_WEIGHT`. The extra
/// draw keeps two agents from looping through the same moves.
///
/// Returns `None` when no direction is legal.
pub fn best_move(
    state: &GameState,
    depth: u32,
    weights: Weights,
    rng: &mut fastrand::Rng,
) -> Option<Direction> {
    if let Some(dir) = single_adjacent_coin(state) {
        debug!("agent {} takes adjacent coin {dir}", state.current_agent());
        return Some(dir);
    }

    let mut best_moves: Vec<Direction> = Vec::with_capacity(Direction::ALL.len());
    let mut best_score = f64::NEG_INFINITY;

    for dir in Direction::ALL {
        let mut child = state.clone();
        if !child.play(dir, rng) {
            continue;
        }
        let score = expectimax(
            &child,
            depth.saturating_sub(1),
            f64::NEG_INFINITY,
            f64::INFINITY,
            NodeKind::Max,
            weights,
            rng,
        );
        trace!("{dir}: {score}");
        if score > best_score {
            best_score = score;
            best_moves.clear();
            best_moves.push(dir);
        } else if score == best_score {
            best_moves.push(dir);
        }
    }

    if best_moves.is_empty() {
        debug!("agent {} has no legal move", state.current_agent());
        return None;
    }

    let explore = Direction::ALL[rng.usize(..Direction::ALL.len())];
    let total = best_moves.len() * BEST_MOVE_WEIGHT + EXPLORE_WEIGHT;
    let ticket = rng.usize(..total);
    let choice = best_moves
        .get(ticket / BEST_MOVE_WEIGHT)
        .copied()
        .unwrap_or(explore);
    debug!(
        "agent {} best {:?} ({best_score:.2}), explore {explore}, chose {choice}",
        state.current_agent(),
        best_moves
    );
    Some(choice)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::Board;
    use crate::constants::START_POSITIONS;

    fn state(rows: &[&str]) -> GameState {
        GameState::from_board(Board::from_rows(rows), START_POSITIONS).unwrap()
    }

    #[test]
    fn test_evaluate_counts_neighborhood() {
        // Agent 0 at (0,0): neighbours (0,1) Solid, (1,0) Transparent, (1,1) Solid.
        let game = state(&[".o..o", "*o"]);
        let w = Weights::new(1.0, 1.0);
        assert_eq!(evaluate(&game, w), 2.5);
        assert_eq!(evaluate(&game, Weights::new(3.0, 2.0)), 5.0);
    }

    #[test]
    fn test_evaluate_uses_current_agent() {
        let mut rng = fastrand::Rng::with_seed(9);
        let mut game = state(&[".o", "", "", "", "", "", "", "......*."]);
        assert!(game.play(Direction::Right, &mut rng));
        // Agent 1 to move, score 0, one coin at (7,6) which may have flipped.
        let expected = match game.cell((7, 6)) {
            Cell::Solid => 6.0,
            _ => 3.0,
        };
        assert_eq!(evaluate(&game, Weights::new(9.0, 6.0)), expected);
    }

    #[test]
    fn test_depth_zero_is_evaluate() {
        let mut rng = fastrand::Rng::with_seed(10);
        let game = GameState::new(&mut rng);
        let w = Weights::default();
        for node in [NodeKind::Max, NodeKind::Chance] {
            let v = expectimax(&game, 0, f64::NEG_INFINITY, f64::INFINITY, node, w, &mut rng);
            assert_eq!(v, evaluate(&game, w));
        }
    }

    #[test]
    fn test_no_coins_is_evaluate() {
        let mut rng = fastrand::Rng::with_seed(12);
        let game = state(&[]);
        let w = Weights::new(2.0, 5.0);
        let v = expectimax(&game, 3, f64::NEG_INFINITY, f64::INFINITY, NodeKind::Max, w, &mut rng);
        assert_eq!(v, evaluate(&game, w));
    }

    #[test]
    fn test_max_node_skips_blocked_directions() {
        // Agent 0 in the corner with agent 1 to its right: only Down is legal.
        // After it, agent 1 at (0,1) sees no coins and has score 0.
        let mut rng = fastrand::Rng::with_seed(13);
        let game = GameState::from_board(Board::from_rows(&["", "", "", "", "", ".....*"]), [(0, 0), (0, 1)])
            .unwrap();
        let v = expectimax(
            &game,
            1,
            f64::NEG_INFINITY,
            f64::INFINITY,
            NodeKind::Max,
            Weights::default(),
            &mut rng,
        );
        assert_eq!(v, 0.0);
    }

    #[test]
    fn test_single_adjacent_coin() {
        let game = state(&[".*", "o"]);
        assert_eq!(single_adjacent_coin(&game), Some(Direction::Down));

        let game = state(&[".o", "o"]);
        assert_eq!(single_adjacent_coin(&game), None);

        let game = state(&[".*", "*o"]);
        assert_eq!(single_adjacent_coin(&game), None);
    }

    #[test]
    fn test_best_move_takes_adjacent_coin() {
        let mut rng = fastrand::Rng::with_seed(14);
        let game = state(&[".o*", "*o*", "***"]);
        for _ in 0..20 {
            assert_eq!(best_move(&game, 3, Weights::default(), &mut rng), Some(Direction::Right));
        }
    }

    #[test]
    fn test_best_move_does_not_touch_state() {
        let mut rng = fastrand::Rng::with_seed(15);
        let game = GameState::new(&mut rng);
        let before = game.clone();
        let mv = best_move(&game, 2, Weights::default(), &mut rng);
        assert!(mv.is_some());
        assert_eq!(game, before);
    }

    #[test]
    fn test_max_node_prunes_once_beta_is_reached() {
        // Agent 0 at (0,0) next to agent 1 at (1,1); the only coin is at (1,0).
        // Down (tried before Right) takes the coin and leaves agent 1 with an
        // empty neighbourhood, worth 0. Right leaves the coin next to agent 1,
        // worth at least 0.5 * w2.
        let game = GameState::from_board(Board::from_rows(&["", "o"]), [(0, 0), (1, 1)]).unwrap();
        let w = Weights::default();

        let mut rng = fastrand::Rng::with_seed(17);
        let full = expectimax(&game, 1, f64::NEG_INFINITY, f64::INFINITY, NodeKind::Max, w, &mut rng);
        assert!(full >= TRANSPARENT_VALUE * w.proximity, "full search {full}");

        let mut rng = fastrand::Rng::with_seed(17);
        let pruned = expectimax(&game, 1, f64::NEG_INFINITY, -1.0, NodeKind::Max, w, &mut rng);
        assert_eq!(pruned, 0.0);
    }

    #[test]
    fn test_best_move_lottery_shares() {
        // No coins: Down and Right tie, Up and Left are illegal. Each tied move
        // has weight 5 and the exploratory draw (weight 1) is uniform, so
        // Down and Right get 5/11 + 1/44 each, Up and Left 1/44 each.
        let mut rng = fastrand::Rng::with_seed(16);
        let game = state(&[]);
        let draws = 8800;
        let mut counts = [0usize; 4];
        for _ in 0..draws {
            let dir = best_move(&game, 2, Weights::default(), &mut rng).unwrap();
            counts[Direction::ALL.iter().position(|&d| d == dir).unwrap()] += 1;
        }

        let share = |i: usize| counts[i] as f64 / draws as f64;
        let tied = 5.0 / 11.0 + 1.0 / 44.0;
        let explore = 1.0 / 44.0;
        assert!((share(0) - explore).abs() < 0.008, "up {counts:?}");
        assert!((share(1) - tied).abs() < 0.025, "down {counts:?}");
        assert!((share(2) - explore).abs() < 0.008, "left {counts:?}");
        assert!((share(3) - tied).abs() < 0.025, "right {counts:?}");
    }
}
