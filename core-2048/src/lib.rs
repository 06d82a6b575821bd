pub mod board;
pub mod direction;
pub mod logic;
pub mod snapshot;

pub use board::{Board, Turn};
pub use direction::Direction;

/// Maps a position along a line onto board coordinates `(x, y)`.
///
/// Every slide is treated as a slide toward offset 0 of each line, so `offset == 0` is the cell
/// tiles pile up against and `line` picks the column (vertical slides) or row (horizontal slides).
pub const fn line_cell(
    direction: Direction,
    size: usize,
    line: usize,
    offset: usize,
) -> (usize, usize) {
    match direction {
        Direction::Up => (line, offset),
        Direction::Right => (size - offset - 1, line),
        Direction::Down => (line, size - offset - 1),
        Direction::Left => (offset, line),
    }
}
