use crate::{logic, Board, Direction, Turn};

/// The boards reachable in one ply, in a fixed order.
///
/// For the spawner this is a 2 then a 4 in every empty cell, scanning rows first. For the mover it
/// is every direction that changes the board, in the order given by [`Direction::iter`].
pub fn children(board: &Board) -> Vec<Board> {
    match board.turn() {
        Turn::Spawner => board
            .empty_cells()
            .flat_map(|(x, y)| [2, 4].map(|value| board.with_tile(x, y, value)))
            .collect(),
        Turn::Mover => Direction::iter()
            .filter_map(|direction| logic::simulate(board, direction))
            .collect(),
    }
}
