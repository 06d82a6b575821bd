use criterion::{criterion_group, criterion_main, Criterion};
use lib_2048::{
    ai::minimax::{self, MinimaxAi, SearchConfig},
    eval, logic, Board, Direction, Turn,
};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use std::hint::black_box;

fn corpus() -> Vec<Board> {
    let mut rng = ChaCha8Rng::seed_from_u64(1337);
    let mut board = Board::empty(4);
    let mut boards = Vec::new();

    for _ in 0..24 {
        let empty: Vec<_> = board.empty_cells().collect();
        if empty.is_empty() {
            break;
        }

        let (x, y) = empty[rng.gen_range(0..empty.len())];
        board = board.with_tile(x, y, if rng.gen_bool(0.1) { 4 } else { 2 });
        boards.push(board.clone());

        let next = Direction::iter().find_map(|direction| logic::simulate(&board, direction));
        match next {
            Some(next) => board = next.to_root(),
            None => break,
        }
    }

    boards
}

fn bench_eval(c: &mut Criterion) {
    let boards = corpus();

    c.bench_function("eval/evaluate", |b| {
        b.iter(|| {
            boards
                .iter()
                .map(|board| eval::evaluate(black_box(board)))
                .sum::<f64>()
        })
    });
}

fn bench_search(c: &mut Criterion) {
    let boards = corpus();
    let probe = Board::from_rows(
        &[[32, 16, 8, 4], [2, 4, 0, 0], [2, 0, 0, 0], [0, 0, 0, 0]],
        Turn::Spawner,
    );

    c.bench_function("search/depth3", |b| {
        b.iter(|| minimax::search(black_box(&probe), 3))
    });

    for parallel in [false, true] {
        let ai = MinimaxAi::new(SearchConfig {
            parallel,
            ..SearchConfig::default()
        });
        let name = if parallel {
            "best_move/parallel"
        } else {
            "best_move/sequential"
        };

        c.bench_function(name, |b| {
            b.iter(|| {
                boards
                    .iter()
                    .filter_map(|board| ai.best_move(black_box(board)))
                    .count()
            })
        });
    }
}

criterion_group!(benches, bench_eval, bench_search);
criterion_main!(benches);
