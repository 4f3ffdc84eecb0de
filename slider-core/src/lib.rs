//! Core of the sliding-tile puzzle: the background catalog, the link codec
//! and the board engine, plus the small pieces of generator and player state
//! built on top of them. Nothing in here touches the browser.

pub mod catalog;
pub mod codec;
pub mod config;
pub mod engine;
pub mod error;
pub mod generator;
pub mod link;
pub mod session;

pub use catalog::{
    Background, has_any, list_backgrounds, normalize_background, sanitize_backgrounds,
};
pub use codec::{PuzzleConfig, decode, decode_strict, encode};
pub use engine::{
    Move, apply_move, is_adjacent, is_solvable, is_solved, random_solvable_layout,
    sequence_layout, validate_permutation,
};
pub use error::{DecodeError, GenerationError, ValidationError};
pub use session::Session;
