//! Board and link constants shared by the generator and player.

/// Smallest accepted board edge, in tiles.
pub const MIN_DIMENSION: usize = 2;
/// Largest accepted board edge, in tiles.
pub const MAX_DIMENSION: usize = 8;
pub const DEFAULT_WIDTH: usize = 4;
pub const DEFAULT_HEIGHT: usize = 4;
/// Query-string key carrying the encoded puzzle.
pub const PAYLOAD_PARAM: &str = "p";
/// Upper bound on shuffles tried by `random_solvable_layout`.
pub const MAX_SHUFFLE_ATTEMPTS: usize = 10_000;
