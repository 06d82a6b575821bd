use crate::{Board, Direction};

pub mod minimax;

pub trait Ai {
    fn get_next_move(&mut self, board: &Board) -> Option<Direction>;
}
