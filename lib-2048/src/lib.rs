pub use core_2048::*;

pub mod ai;
pub mod children;
pub mod eval;
pub mod game;
