pub mod board;
pub mod error;
pub mod record;
pub mod scoring;
pub mod stone;

/// Board coordinate as (row, col), zero-indexed from the top-left.
pub type Point = (u8, u8);

pub use board::{Board, GameState};
pub use error::BoardError;
pub use record::MoveRecord;
pub use scoring::{DEFAULT_KOMI, FinalScore, Territory, final_scores, territory};
pub use stone::Stone;
