use crate::{line_cell, Board, Direction, Turn};

/// Outcome of a slide that changed the board.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Slide {
    pub board: Board,
    /// Sum of the tiles produced by merges.
    pub score: u32,
    /// Largest tile produced by a merge, 0 if nothing merged.
    pub largest_merge: u32,
}

/// Slides and merges every line toward `direction`.
///
/// Returns `None` when no tile would change position or value. Each tile merges at most once per
/// slide: a tile produced by a merge locks its slot until the next tile is placed.
pub fn slide(board: &Board, direction: Direction) -> Option<Slide> {
    let size = board.size();
    let mut cells = vec![0; size * size];
    let mut moved = false;
    let mut score = 0;
    let mut largest_merge = 0;

    let index = |line, offset| {
        let (x, y) = line_cell(direction, size, line, offset);
        y * size + x
    };

    for line in 0..size {
        let mut cursor = 0;
        let mut locked = true;

        for offset in 0..size {
            let (x, y) = line_cell(direction, size, line, offset);
            let cell = board.get(x, y);

            if cell == 0 {
                continue;
            }

            if !locked {
                let target = &mut cells[index(line, cursor)];

                if *target == cell {
                    *target *= 2;
                    score += *target;
                    largest_merge = largest_merge.max(*target);

                    locked = true;
                    moved = true;
                    cursor += 1;
                    continue;
                }

                cursor += 1;
            }

            if offset != cursor {
                moved = true;
            }

            cells[index(line, cursor)] = cell;
            locked = false;
        }
    }

    moved.then(|| Slide {
        board: Board::new(size, cells, Turn::Spawner, Some(direction)),
        score,
        largest_merge,
    })
}

/// The board after sliding toward `direction`, handed to the spawner, or `None` if nothing moves.
pub fn simulate(board: &Board, direction: Direction) -> Option<Board> {
    slide(board, direction).map(|slide| slide.board)
}

/// Whether any slide would change the board: some cell is empty or two neighbours match.
pub fn moves_available(board: &Board) -> bool {
    let size = board.size();

    (0..size).any(|y| {
        (0..size).any(|x| {
            let cell = board.get(x, y);

            cell == 0
                || (x + 1 < size && board.get(x + 1, y) == cell)
                || (y + 1 < size && board.get(x, y + 1) == cell)
        })
    })
}
