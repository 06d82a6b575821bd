use log::{info, trace};
use rand::Rng;

use crate::{
    ai::Ai,
    logic,
    snapshot::{LiveGrid, Snapshot, SnapshotError},
    Board, Direction,
};

pub const START_TILES: usize = 2;
pub const WINNING_TILE: u32 = 2048;
const FOUR_PROBABILITY: f64 = 0.1;

/// The authoritative game: applies chosen moves, spawns tiles and tracks score and outcome.
pub struct Game<R> {
    rng: R,
    board: Board,
    score: u32,
    moves: u32,
    over: bool,
    won: bool,
    keep_playing: bool,
}

impl<R: Rng> Game<R> {
    pub fn new(size: usize, rng: R) -> Self {
        let mut game = Self {
            rng,
            board: Board::empty(size),
            score: 0,
            moves: 0,
            over: false,
            won: false,
            keep_playing: false,
        };

        for _ in 0..START_TILES {
            game.add_random_tile();
        }

        game
    }

    /// Resumes a game from a saved grid.
    pub fn from_snapshot(snapshot: &Snapshot, score: u32, rng: R) -> Result<Self, SnapshotError> {
        let board = Board::try_from(snapshot)?;

        Ok(Self {
            rng,
            score,
            moves: 0,
            over: !logic::moves_available(&board),
            won: board.max_tile() >= WINNING_TILE,
            keep_playing: false,
            board,
        })
    }

    /// Places a 2 (or a 4, one time in ten) in a random empty cell. Returns `false` if the grid is full.
    pub fn add_random_tile(&mut self) -> bool {
        let empty: Vec<_> = self.board.empty_cells().collect();

        if empty.is_empty() {
            return false;
        }

        let (x, y) = empty[self.rng.gen_range(0..empty.len())];
        let value = if self.rng.gen_bool(FOUR_PROBABILITY) {
            4
        } else {
            2
        };

        self.board = self.board.with_tile(x, y, value);

        true
    }

    /// Slides the grid toward `direction`. Returns `false` and changes nothing if no tile moves or
    /// the game has ended.
    pub fn apply_move(&mut self, direction: Direction) -> bool {
        if self.is_terminated() {
            return false;
        }

        let Some(slide) = logic::slide(&self.board, direction) else {
            return false;
        };

        self.score += slide.score;
        self.moves += 1;

        if slide.largest_merge == WINNING_TILE {
            self.won = true;
        }

        self.board = slide.board.to_root();
        self.add_random_tile();

        if !logic::moves_available(&self.board) {
            self.over = true;
        }

        true
    }

    /// Lets `ai` pick moves until the game ends or it has nothing to suggest. Returns the number
    /// of moves played.
    pub fn play(&mut self, ai: &mut impl Ai) -> u32 {
        let start = self.moves;

        while !self.is_terminated() {
            let Some(direction) = ai.get_next_move(&Board::from_live(&*self)) else {
                break;
            };

            if !self.apply_move(direction) {
                break;
            }

            info!("move {}: {direction}, score {}", self.moves, self.score);
            trace!("\n{}", self.board);
        }

        info!(
            "stopped after {} moves with score {} and max tile {}",
            self.moves,
            self.score,
            self.board.max_tile()
        );

        self.moves - start
    }
}

impl<R> Game<R> {
    pub const fn board(&self) -> &Board {
        &self.board
    }

    pub const fn score(&self) -> u32 {
        self.score
    }

    pub const fn moves(&self) -> u32 {
        self.moves
    }

    pub const fn is_over(&self) -> bool {
        self.over
    }

    pub const fn has_won(&self) -> bool {
        self.won
    }

    /// Lets play continue past the winning tile.
    pub fn keep_playing(&mut self) {
        self.keep_playing = true;
    }

    pub const fn is_terminated(&self) -> bool {
        self.over || (self.won && !self.keep_playing)
    }

    pub fn snapshot(&self) -> Snapshot {
        Snapshot::from_board(&self.board)
    }
}

impl<R> LiveGrid for Game<R> {
    fn size(&self) -> usize {
        self.board.size()
    }

    fn occupied(&self) -> Vec<(usize, usize, u32)> {
        self.snapshot().occupied()
    }
}

#[cfg(test)]
mod tests {
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    use super::*;
    use crate::{
        ai::minimax::{MinimaxAi, SearchConfig},
        Turn,
    };

    fn rng() -> ChaCha8Rng {
        ChaCha8Rng::seed_from_u64(2048)
    }

    fn snapshot<R: AsRef<[u32]>>(rows: &[R]) -> Snapshot {
        Snapshot::from_board(&Board::from_rows(rows, Turn::Mover))
    }

    struct Stuck;

    impl Ai for Stuck {
        fn get_next_move(&mut self, _board: &Board) -> Option<Direction> {
            None
        }
    }

    #[test]
    fn new_game_starts_with_two_small_tiles() {
        let game = Game::new(4, rng());
        let tiles: Vec<_> = game.occupied().into_iter().map(|(_, _, v)| v).collect();

        assert_eq!(tiles.len(), START_TILES);
        assert!(tiles.iter().all(|&v| v == 2 || v == 4));
        assert_eq!(game.score(), 0);
        assert!(!game.is_terminated());
    }

    #[test]
    fn random_tiles_fill_only_empty_cells() {
        let start = snapshot(&[[8, 0, 0], [0; 3], [0; 3]]);
        let mut game = Game::from_snapshot(&start, 0, rng()).unwrap();

        for _ in 0..8 {
            assert!(game.add_random_tile());
        }

        assert!(!game.add_random_tile());
        assert_eq!(game.board().get(0, 0), 8);
        assert!(game.board().cells()[1..].iter().all(|&v| v == 2 || v == 4));
    }

    #[test]
    fn move_merges_scores_and_spawns() {
        let start = snapshot(&[[2, 2, 0, 0], [0; 4], [0; 4], [0; 4]]);
        let mut game = Game::from_snapshot(&start, 10, rng()).unwrap();

        assert!(game.apply_move(Direction::Left));

        assert_eq!(game.score(), 14);
        assert_eq!(game.moves(), 1);
        assert_eq!(game.board().get(0, 0), 4);
        assert_eq!(game.occupied().len(), 2);
        assert_eq!(game.board().turn(), Turn::Mover);
    }

    #[test]
    fn blocked_move_changes_nothing() {
        let start = snapshot(&[[2, 4, 8, 16], [0; 4], [0; 4], [0; 4]]);
        let mut game = Game::from_snapshot(&start, 0, rng()).unwrap();

        assert!(!game.apply_move(Direction::Left));
        assert_eq!(game.snapshot(), start);
        assert_eq!(game.moves(), 0);
    }

    #[test]
    fn reaching_winning_tile_ends_until_keep_playing() {
        let start = snapshot(&[[1024, 1024, 0, 0], [0; 4], [0; 4], [0; 4]]);
        let mut game = Game::from_snapshot(&start, 0, rng()).unwrap();

        assert!(game.apply_move(Direction::Left));
        assert!(game.has_won());
        assert!(game.is_terminated());
        assert!(!game.apply_move(Direction::Right));

        game.keep_playing();
        assert!(!game.is_terminated());
        assert!(game.apply_move(Direction::Right));
    }

    #[test]
    fn locked_snapshot_is_over() {
        let start = snapshot(&[[2, 4, 2], [4, 2, 4], [2, 4, 2]]);
        let mut game = Game::from_snapshot(&start, 0, rng()).unwrap();

        assert!(game.is_over());
        assert!(!game.apply_move(Direction::Up));
    }

    #[test]
    fn invalid_snapshot_is_rejected() {
        let start = Snapshot {
            size: 2,
            cells: vec![vec![3, 0], vec![0, 0]],
        };

        assert!(Game::from_snapshot(&start, 0, rng()).is_err());
    }

    #[test]
    fn live_grid_reads_back_the_board() {
        let game = Game::new(4, rng());

        assert_eq!(&Board::from_live(&game), game.board());
    }

    #[test]
    fn play_stops_when_ai_has_no_move() {
        let mut game = Game::new(4, rng());

        assert_eq!(game.play(&mut Stuck), 0);
        assert_eq!(game.moves(), 0);
    }

    #[test]
    fn minimax_plays_small_board_to_the_end() {
        let mut game = Game::new(3, rng());
        let mut ai = MinimaxAi::new(SearchConfig {
            depth: 1,
            parallel: false,
        });

        let played = game.play(&mut ai);

        assert!(played > 0);
        assert_eq!(played, game.moves());
        assert!(game.is_terminated());
    }
}
