use std::{
    fs,
    io::{self, Read},
    path::{Path, PathBuf},
};

use anyhow::Context;
use clap::{Args, Parser, Subcommand};
use env_logger::Env;
use lib_2048::{
    ai::minimax::{MinimaxAi, SearchConfig, DEFAULT_DEPTH},
    eval,
    game::Game,
    snapshot::Snapshot,
    Board,
};
use log::info;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

#[derive(Parser)]
#[command(name = "minimax-2048", about = "Sliding-tile puzzle with a minimax move search")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Args, Clone, Copy)]
struct SearchArgs {
    /// Plies searched below each candidate move
    #[arg(short, long, default_value_t = DEFAULT_DEPTH)]
    depth: u32,
    /// Score candidate moves on all cores
    #[arg(short, long)]
    parallel: bool,
}

impl From<SearchArgs> for SearchConfig {
    fn from(args: SearchArgs) -> Self {
        Self {
            depth: args.depth,
            parallel: args.parallel,
        }
    }
}

#[derive(Subcommand)]
enum Command {
    /// Let the search play a fresh game until it ends
    Play {
        #[arg(short, long, default_value_t = 4)]
        size: usize,
        /// Seed for tile spawns, random if not given
        #[arg(long)]
        seed: Option<u64>,
        /// Carry on after the 2048 tile appears
        #[arg(short, long)]
        keep_playing: bool,
        #[command(flatten)]
        search: SearchArgs,
    },
    /// Recommend a move for a JSON grid (`-` reads stdin)
    Best {
        snapshot: PathBuf,
        #[command(flatten)]
        search: SearchArgs,
    },
    /// Print the heuristic value of a JSON grid (`-` reads stdin)
    Eval { snapshot: PathBuf },
}

fn read_board(path: &Path) -> anyhow::Result<Board> {
    let json = if path == Path::new("-") {
        let mut json = String::new();
        io::stdin().read_to_string(&mut json)?;
        json
    } else {
        fs::read_to_string(path).with_context(|| format!("reading {}", path.display()))?
    };

    let snapshot: Snapshot = serde_json::from_str(&json).context("parsing grid")?;

    Ok(Board::try_from(&snapshot)?)
}

fn play(size: usize, seed: Option<u64>, keep_playing: bool, config: SearchConfig) {
    let rng = seed.map_or_else(ChaCha8Rng::from_entropy, ChaCha8Rng::seed_from_u64);
    let mut game = Game::new(size, rng);
    let mut ai = MinimaxAi::new(config);

    if keep_playing {
        game.keep_playing();
    }

    info!("playing {size}x{size} at depth {}", config.depth);

    game.play(&mut ai);

    print!("{}", game.board());
    println!(
        "{} after {} moves, score {}",
        if game.has_won() { "Won" } else { "Game over" },
        game.moves(),
        game.score()
    );
}

fn best(board: &Board, config: SearchConfig) {
    let (best, branches) = MinimaxAi::new(config).best_move_with_branches(board);

    for branch in &branches {
        println!("{:>5}: {:.2}", branch.direction, branch.score);
    }

    match best {
        Some(direction) => println!("best: {direction}"),
        None => println!("no move"),
    }
}

fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(Env::default().default_filter_or("info")).init();

    match Cli::parse().command {
        Command::Play {
            size,
            seed,
            keep_playing,
            search,
        } => play(size, seed, keep_playing, search.into()),
        Command::Best { snapshot, search } => best(&read_board(&snapshot)?, search.into()),
        Command::Eval { snapshot } => {
            let board = read_board(&snapshot)?;

            print!("{board}");
            println!("value = {}", eval::evaluate(&board));
        }
    }

    Ok(())
}
