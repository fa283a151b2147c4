//! The 8x8 coin board, cell states, and movement directions.

use std::fmt;
use std::str::FromStr;

use crate::constants::N;

/// A cell on the board as (row, col), both in `0..N`.
pub type Point = (usize, usize);

/// Errors raised when building or addressing a game from external input.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum GameError {
    #[error("unrecognized direction: {0:?}")]
    UnknownDirection(String),
    #[error("point {0:?} is outside the board")]
    OutOfBounds(Point),
    #[error("both agents placed on {0:?}")]
    AgentsOverlap(Point),
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Default)]
pub enum Cell {
    #[default]
    Empty,
    /// A coin that can be collected.
    Solid,
    /// A coin that is visible but cannot be collected until it turns Solid.
    Transparent,
}

impl Cell {
    #[inline]
    pub fn is_coin(self) -> bool {
        self != Cell::Empty
    }

    fn symbol(self) -> char {
        match self {
            Cell::Empty => ' ',
            Cell::Solid => 'o',
            Cell::Transparent => '*',
        }
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    /// All directions in the order the search explores them.
    pub const ALL: [Direction; 4] = [
        Direction::Up,
        Direction::Down,
        Direction::Left,
        Direction::Right,
    ];

    /// Unit (row, col) offset of this direction.
    #[inline]
    pub fn offset(self) -> (isize, isize) {
        match self {
            Direction::Up => (-1, 0),
            Direction::Down => (1, 0),
            Direction::Left => (0, -1),
            Direction::Right => (0, 1),
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Direction::Up => "up",
            Direction::Down => "down",
            Direction::Left => "left",
            Direction::Right => "right",
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Direction {
    type Err = GameError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Direction::ALL
            .into_iter()
            .find(|d| s.trim().eq_ignore_ascii_case(d.as_str()))
            .ok_or_else(|| GameError::UnknownDirection(s.to_string()))
    }
}

/// Step one cell from `pt` in direction `dir`, or `None` when leaving the board.
#[inline]
pub fn step(pt: Point, dir: Direction) -> Option<Point> {
    let (dr, dc) = dir.offset();
    let r = pt.0.checked_add_signed(dr)?;
    let c = pt.1.checked_add_signed(dc)?;
    in_bounds((r, c)).then_some((r, c))
}

#[inline]
pub fn in_bounds(pt: Point) -> bool {
    pt.0 < N && pt.1 < N
}

/// The fixed-size coin grid.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Default)]
pub struct Board {
    cells: [[Cell; N]; N],
}

impl Board {
    /// A board with no coins.
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a board from row strings using the display symbols
    /// (`o` Solid, `*` Transparent, anything else Empty).
    ///
    /// Missing rows or columns are left Empty; extra ones are ignored.
    pub fn from_rows(rows: &[&str]) -> Self {
        let mut board = Self::new();
        for (r, row) in rows.iter().take(N).enumerate() {
            for (c, ch) in row.chars().take(N).enumerate() {
                board.cells[r][c] = match ch {
                    'o' => Cell::Solid,
                    '*' => Cell::Transparent,
                    _ => Cell::Empty,
                };
            }
        }
        board
    }

    /// The cell at `pt`.
    ///
    /// # Panics
    ///
    /// Panics if `pt` is outside the board; see [`in_bounds`].
    #[inline]
    pub fn get(&self, pt: Point) -> Cell {
        self.cells[pt.0][pt.1]
    }

    /// Overwrite the cell at `pt`.
    ///
    /// # Panics
    ///
    /// Panics if `pt` is outside the board.
    #[inline]
    pub fn set(&mut self, pt: Point, cell: Cell) {
        self.cells[pt.0][pt.1] = cell;
    }

    /// Number of non-Empty cells.
    pub fn count_coins(&self) -> usize {
        self.cells.iter().flatten().filter(|c| c.is_coin()).count()
    }

    /// Iterate over every cell mutably, row by row.
    pub fn cells_mut(&mut self) -> impl Iterator<Item = &mut Cell> {
        self.cells.iter_mut().flatten()
    }

    /// The 3x3 block centred on `pt`, clipped to the board, `pt` included.
    pub fn neighborhood(&self, pt: Point) -> impl Iterator<Item = Cell> + '_ {
        let rows = pt.0.saturating_sub(1)..=(pt.0 + 1).min(N - 1);
        rows.flat_map(move |r| {
            let cols = pt.1.saturating_sub(1)..=(pt.1 + 1).min(N - 1);
            cols.map(move |c| self.cells[r][c])
        })
    }

    /// Render the grid, marking `agents[i]` with `A`, `B`, ...
    pub(crate) fn write_grid(&self, f: &mut fmt::Formatter<'_>, agents: &[Point]) -> fmt::Result {
        write!(f, "  ")?;
        for c in 0..N {
            write!(f, "  {c} ")?;
        }
        writeln!(f)?;
        writeln!(f, "  +{}", "---+".repeat(N))?;

        for r in 0..N {
            write!(f, "{r} |")?;
            for c in 0..N {
                let ch = match agents.iter().position(|&a| a == (r, c)) {
                    Some(i) => (b'A' + i as u8) as char,
                    None => self.cells[r][c].symbol(),
                };
                write!(f, " {ch} |")?;
            }
            writeln!(f)?;
            writeln!(f, "  +{}", "---+".repeat(N))?;
        }
        Ok(())
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.write_grid(f, &[])
    }
}
