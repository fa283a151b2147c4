//! Game state and move execution.
//!
//! This module provides the core rules of the coin game:
//! - Random initial board generation
//! - Agent movement with boundary and collision rejection
//! - Streak-based scoring for Solid coin captures
//! - The coin-flip transition applied after every successful move
//!
//! All randomness comes from a caller-supplied `fastrand::Rng`, so a game can
//! be replayed exactly from a seed. `GameState` is a small plain value; the
//! search explores hypothetical futures by cloning it.

use std::fmt;

use log::debug;

use crate::board::{Board, Cell, Direction, GameError, Point, in_bounds, step};
use crate::constants::{AGENTS, FILL_PROB, FLIP_PROB, START_POSITIONS};

/// Full state of a game in progress.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GameState {
    board: Board,
    /// Position of each agent, indexed by agent
    positions: [Point; AGENTS],
    /// Accumulated score of each agent
    scores: [u32; AGENTS],
    /// Consecutive Solid captures of each agent
    streaks: [u32; AGENTS],
    /// Agent to move (0 or 1)
    current: usize,
    /// Cached number of non-Empty cells
    coins: usize,
}

impl GameState {
    /// Start a new game with a random board.
    ///
    /// Each cell holds a coin with probability `FILL_PROB`, Solid or
    /// Transparent with equal chance. Both starting cells are cleared.
    pub fn new(rng: &mut fastrand::Rng) -> Self {
        let mut board = Board::new();
        for cell in board.cells_mut() {
            if rng.f64() < FILL_PROB {
                *cell = if rng.bool() { Cell::Solid } else { Cell::Transparent };
            }
        }
        for pt in START_POSITIONS {
            board.set(pt, Cell::Empty);
        }
        Self::build(board, START_POSITIONS)
    }

    /// Build a state from an explicit board and agent positions.
    ///
    /// Agent cells are taken as given. Scores and streaks start at zero and
    /// agent 0 moves first.
    pub fn from_board(board: Board, positions: [Point; AGENTS]) -> Result<Self, GameError> {
        if let Some(&pt) = positions.iter().find(|&&pt| !in_bounds(pt)) {
            return Err(GameError::OutOfBounds(pt));
        }
        if positions[0] == positions[1] {
            return Err(GameError::AgentsOverlap(positions[0]));
        }
        Ok(Self::build(board, positions))
    }

    fn build(board: Board, positions: [Point; AGENTS]) -> Self {
        let coins = board.count_coins();
        Self {
            board,
            positions,
            scores: [0; AGENTS],
            streaks: [0; AGENTS],
            current: 0,
            coins,
        }
    }

    #[inline]
    pub fn board(&self) -> &Board {
        &self.board
    }

    /// # Panics
    ///
    /// Panics if `pt` is outside the board.
    #[inline]
    pub fn cell(&self, pt: Point) -> Cell {
        self.board.get(pt)
    }

    /// Overwrite a single cell, keeping the coin count in sync.
    ///
    /// # Panics
    ///
    /// Panics if `pt` is outside the board.
    pub fn set_cell(&mut self, pt: Point, cell: Cell) {
        self.board.set(pt, cell);
        self.update_coin_count();
    }

    #[inline]
    pub fn positions(&self) -> [Point; AGENTS] {
        self.positions
    }

    #[inline]
    pub fn position(&self, agent: usize) -> Point {
        self.positions[agent]
    }

    #[inline]
    pub fn scores(&self) -> [u32; AGENTS] {
        self.scores
    }

    #[inline]
    pub fn streaks(&self) -> [u32; AGENTS] {
        self.streaks
    }

    #[inline]
    pub fn current_agent(&self) -> usize {
        self.current
    }

    /// Hand the turn to `agent`. The driver loop uses this to fix the order of
    /// play within a round regardless of rejected moves.
    ///
    /// # Panics
    ///
    /// Panics if `agent` is not 0 or 1.
    pub fn set_current_agent(&mut self, agent: usize) {
        assert!(agent < AGENTS, "no agent {agent}");
        self.current = agent;
    }

    #[inline]
    pub fn coins_remaining(&self) -> usize {
        self.coins
    }

    #[inline]
    pub fn is_over(&self) -> bool {
        self.coins == 0
    }

    fn update_coin_count(&mut self) {
        self.coins = self.board.count_coins();
    }

    /// Move the current agent one cell in `dir` and end the turn.
    ///
    /// Returns `false` when the target is off the board or occupied by the
    /// other agent. A rejected move still passes the turn, and the streak of
    /// the agent who moves next is reset; the coins do not flip.
    ///
    /// On a legal move, landing on a Solid coin extends the streak and scores
    /// `2 * streak - 1` (so a run of k captures totals k^2). Landing anywhere
    /// else breaks the streak. The turn then passes and every coin may flip.
    pub fn play(&mut self, dir: Direction, rng: &mut fastrand::Rng) -> bool {
        let agent = self.current;
        let other = 1 - agent;

        let target = match step(self.positions[agent], dir) {
            Some(pt) if pt != self.positions[other] => pt,
            _ => {
                debug!("agent {agent} blocked moving {dir} from {:?}", self.positions[agent]);
                self.current = other;
                self.streaks[self.current] = 0;
                return false;
            }
        };

        self.positions[agent] = target;

        match self.board.get(target) {
            Cell::Solid => {
                self.streaks[agent] += 1;
                let streak = self.streaks[agent];
                self.scores[agent] += streak * streak - (streak - 1) * (streak - 1);
                self.board.set(target, Cell::Empty);
                self.update_coin_count();
            }
            Cell::Empty | Cell::Transparent => {
                self.streaks[agent] = 0;
            }
        }

        self.current = other;
        self.update_coin_state(rng);
        true
    }

    /// Parse `token` as a direction and play it.
    ///
    /// An unrecognized token leaves the state untouched (the turn does not
    /// pass) and returns `false`.
    pub fn play_token(&mut self, token: &str, rng: &mut fastrand::Rng) -> bool {
        match token.parse::<Direction>() {
            Ok(dir) => self.play(dir, rng),
            Err(err) => {
                debug!("ignoring move: {err}");
                false
            }
        }
    }

    /// Flip coins: each Transparent coin turns Solid and each Solid coin turns
    /// Transparent, independently with probability `FLIP_PROB`.
    pub fn update_coin_state(&mut self, rng: &mut fastrand::Rng) {
        for cell in self.board.cells_mut() {
            *cell = match *cell {
                Cell::Transparent if rng.f64() < FLIP_PROB => Cell::Solid,
                Cell::Solid if rng.f64() < FLIP_PROB => Cell::Transparent,
                other => other,
            };
        }
    }
}

impl fmt::Display for GameState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.board.write_grid(f, &self.positions)?;
        writeln!(
            f,
            "Scores: Player A = {}, Player B = {}",
            self.scores[0], self.scores[1]
        )
    }
}
