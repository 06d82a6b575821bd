use serde::{Deserialize, Serialize};

use crate::Board;

/// The view of the authoritative game grid that the search reads from.
pub trait LiveGrid {
    fn size(&self) -> usize;

    /// Every occupied cell as `(x, y, value)`.
    fn occupied(&self) -> Vec<(usize, usize, u32)>;
}

#[derive(thiserror::Error, Debug, PartialEq, Eq)]
pub enum SnapshotError {
    #[error("board size must be positive")]
    EmptyBoard,
    #[error("expected {expected} rows, found {found}")]
    RowCount { expected: usize, found: usize },
    #[error("row {row} has {found} cells, expected {expected}")]
    RowLength {
        row: usize,
        expected: usize,
        found: usize,
    },
    #[error("tile {value} at ({x}, {y}) is not a power of two of at least 2")]
    InvalidTile { x: usize, y: usize, value: u32 },
}

/// Serializable copy of a grid, rows listed top to bottom.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Snapshot {
    pub size: usize,
    pub cells: Vec<Vec<u32>>,
}

impl Snapshot {
    pub fn from_board(board: &Board) -> Self {
        Self {
            size: board.size(),
            cells: board.rows().map(<[u32]>::to_vec).collect(),
        }
    }

    pub fn validate(&self) -> Result<(), SnapshotError> {
        if self.size == 0 {
            return Err(SnapshotError::EmptyBoard);
        }

        if self.cells.len() != self.size {
            return Err(SnapshotError::RowCount {
                expected: self.size,
                found: self.cells.len(),
            });
        }

        for (y, row) in self.cells.iter().enumerate() {
            if row.len() != self.size {
                return Err(SnapshotError::RowLength {
                    row: y,
                    expected: self.size,
                    found: row.len(),
                });
            }

            if let Some((x, &value)) = row
                .iter()
                .enumerate()
                .find(|&(_, &value)| value != 0 && (value < 2 || !value.is_power_of_two()))
            {
                return Err(SnapshotError::InvalidTile { x, y, value });
            }
        }

        Ok(())
    }
}

impl LiveGrid for Snapshot {
    fn size(&self) -> usize {
        self.size
    }

    fn occupied(&self) -> Vec<(usize, usize, u32)> {
        self.cells
            .iter()
            .enumerate()
            .flat_map(|(y, row)| {
                row.iter()
                    .enumerate()
                    .filter(|&(_, &value)| value != 0)
                    .map(move |(x, &value)| (x, y, value))
            })
            .collect()
    }
}

impl TryFrom<&Snapshot> for Board {
    type Error = SnapshotError;

    fn try_from(snapshot: &Snapshot) -> Result<Self, Self::Error> {
        snapshot.validate()?;

        Ok(Self::from_live(snapshot))
    }
}
