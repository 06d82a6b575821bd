use std::fmt;

use crate::{snapshot::LiveGrid, Direction};

/// Which side acts next in the search tree.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Turn {
    /// About to slide the tiles in one of the four directions.
    Mover,
    /// About to place a new 2 or 4 tile in an empty cell.
    Spawner,
}

/// A square grid of tile values used for lookahead.
///
/// Cells are stored row-major and addressed as `(x, y)` with `x` the column and `y` the row,
/// `(0, 0)` being the top-left corner. Zero is an empty cell, every other value is a power of two.
/// A `Board` is never modified once built; every transition produces a new one.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Board {
    size: usize,
    cells: Box<[u32]>,
    turn: Turn,
    origin: Option<Direction>,
}

impl Board {
    pub fn new(
        size: usize,
        cells: impl Into<Box<[u32]>>,
        turn: Turn,
        origin: Option<Direction>,
    ) -> Self {
        let cells = cells.into();

        debug_assert_eq!(cells.len(), size * size);

        Self {
            size,
            cells,
            turn,
            origin,
        }
    }

    pub fn empty(size: usize) -> Self {
        Self::new(size, vec![0u32; size * size], Turn::Mover, None)
    }

    /// Builds a board from rows listed top to bottom. Every row must be as long as there are rows.
    pub fn from_rows<R: AsRef<[u32]>>(rows: &[R], turn: Turn) -> Self {
        let size = rows.len();
        let mut cells = vec![0; size * size];

        for (y, row) in rows.iter().enumerate() {
            debug_assert_eq!(row.as_ref().len(), size, "row {y} is not {size} cells long");

            for (x, &value) in row.as_ref().iter().take(size).enumerate() {
                cells[y * size + x] = value;
            }
        }

        Self::new(size, cells, turn, None)
    }

    /// Reads a live grid into a root board for the mover. The grid is not touched afterwards.
    pub fn from_live(grid: &impl LiveGrid) -> Self {
        let size = grid.size();
        let mut cells = vec![0; size * size];

        for (x, y, value) in grid.occupied() {
            if x < size && y < size {
                cells[y * size + x] = value;
            }
        }

        Self::new(size, cells, Turn::Mover, None)
    }

    /// Copies this board as a search root: the mover to play, no originating slide.
    pub fn to_root(&self) -> Self {
        Self::new(self.size, self.cells.clone(), Turn::Mover, None)
    }

    pub const fn size(&self) -> usize {
        self.size
    }

    pub const fn turn(&self) -> Turn {
        self.turn
    }

    /// The slide that produced this board, if it was produced by one.
    pub const fn origin(&self) -> Option<Direction> {
        self.origin
    }

    pub fn cells(&self) -> &[u32] {
        &self.cells
    }

    pub fn get(&self, x: usize, y: usize) -> u32 {
        self.cells[y * self.size + x]
    }

    /// Like [`Board::get`] but reads anything off the board as an empty cell.
    pub fn get_signed(&self, x: isize, y: isize) -> u32 {
        match (usize::try_from(x), usize::try_from(y)) {
            (Ok(x), Ok(y)) if x < self.size && y < self.size => self.get(x, y),
            _ => 0,
        }
    }

    /// Copies this board with `value` placed at `(x, y)`, handing the turn to the mover.
    pub fn with_tile(&self, x: usize, y: usize, value: u32) -> Self {
        let mut cells = self.cells.clone();
        cells[y * self.size + x] = value;

        Self::new(self.size, cells, Turn::Mover, None)
    }

    /// Empty cells in row-major order.
    pub fn empty_cells(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        self.cells
            .iter()
            .enumerate()
            .filter(|&(_, &value)| value == 0)
            .map(|(i, _)| (i % self.size, i / self.size))
    }

    pub fn rows(&self) -> impl Iterator<Item = &[u32]> + '_ {
        self.cells.chunks(self.size.max(1))
    }

    pub fn max_tile(&self) -> u32 {
        self.cells.iter().copied().max().unwrap_or(0)
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in self.rows() {
            for (x, &value) in row.iter().enumerate() {
                if x != 0 {
                    f.write_str(" ")?;
                }

                if value == 0 {
                    write!(f, "{:>5}", "_")?;
                } else {
                    write!(f, "{value:>5}")?;
                }
            }

            writeln!(f)?;
        }

        Ok(())
    }
}
