use log::{debug, trace};
use rayon::prelude::*;

use crate::{children::children, eval, Board, Direction, Turn};

use super::Ai;

/// Score of a position with no legal continuation. Far below any heuristic value, also after decay.
pub const DEAD_END_SCORE: f64 = -100_000.0;
/// Discount applied to a child's score for every ply it sits below its parent.
pub const DECAY: f64 = 0.99;
pub const DEFAULT_DEPTH: u32 = 3;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SearchConfig {
    /// Plies searched below each of the mover's candidate boards.
    pub depth: u32,
    /// Score the candidate boards on the rayon pool instead of one after another.
    pub parallel: bool,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            depth: DEFAULT_DEPTH,
            parallel: false,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BranchScore {
    pub direction: Direction,
    pub score: f64,
}

/// Depth-bounded minimax value of `board`.
///
/// The spawner is treated as an adversary picking the worst tile for the mover, not as a random
/// event. There is no pruning and no transposition table.
pub fn search(board: &Board, depth: u32) -> f64 {
    let Some(depth) = depth.checked_sub(1) else {
        return eval::evaluate(board);
    };

    let scores = children(board)
        .into_iter()
        .map(|child| search(&child, depth) * DECAY);

    let best = match board.turn() {
        Turn::Spawner => scores.reduce(f64::min),
        Turn::Mover => scores.reduce(f64::max),
    };

    best.unwrap_or(DEAD_END_SCORE)
}

/// First branch with the strictly greatest score.
fn best_branch(branches: &[BranchScore]) -> Option<BranchScore> {
    branches
        .iter()
        .copied()
        .reduce(|best, branch| if branch.score > best.score { branch } else { best })
}

pub struct MinimaxAi {
    config: SearchConfig,
}

impl Ai for MinimaxAi {
    fn get_next_move(&mut self, board: &Board) -> Option<Direction> {
        self.best_move(board)
    }
}

impl MinimaxAi {
    pub const fn new(config: SearchConfig) -> Self {
        Self { config }
    }

    pub const fn config(&self) -> SearchConfig {
        self.config
    }

    /// Scores of every direction that changes `board`, in [`Direction::iter`] order.
    pub fn branch_scores(&self, board: &Board) -> Vec<BranchScore> {
        let root = board.to_root();
        let depth = self.config.depth;

        trace!("scoring root\n{root}");

        let candidates = children(&root);
        let score = |child: &Board| search(child, depth);

        let scores: Vec<f64> = if self.config.parallel {
            candidates.par_iter().map(score).collect()
        } else {
            candidates.iter().map(score).collect()
        };

        candidates
            .iter()
            .zip(scores)
            .filter_map(|(child, score)| {
                child
                    .origin()
                    .map(|direction| BranchScore { direction, score })
            })
            .collect()
    }

    /// The direction to play from `board`, or `None` when nothing can move.
    pub fn best_move(&self, board: &Board) -> Option<Direction> {
        self.best_move_with_branches(board).0
    }

    /// Picks the best move and returns every branch scored on the way, from one search.
    pub fn best_move_with_branches(&self, board: &Board) -> (Option<Direction>, Vec<BranchScore>) {
        let branches = self.branch_scores(board);

        for branch in &branches {
            debug!("{}: {:.2}", branch.direction, branch.score);
        }

        let best = best_branch(&branches).map(|branch| branch.direction);

        (best, branches)
    }
}
