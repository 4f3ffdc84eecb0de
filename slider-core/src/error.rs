use thiserror::Error;

/// Reasons a shared link payload is rejected.
///
/// Every variant is fatal to that decode attempt; callers fall back to the
/// default board.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DecodeError {
    /// The payload is not base64 or does not hold a JSON record.
    #[error("malformed puzzle payload: {0}")]
    MalformedPayload(String),
    /// `w` or `h` is missing, not an integer, or not positive.
    #[error("invalid board dimensions")]
    InvalidDimensions,
    /// `t` is not a list of `w * h` entries.
    #[error("tile count does not match the board size")]
    TileCountMismatch,
    /// Tile values are not distinct or contain no blank.
    #[error("tiles must be unique and contain the blank")]
    InvalidPermutation,
    /// `b` is present but is not a list of `w * h` entries.
    #[error("background count does not match the board size")]
    BackgroundCountMismatch,
}

/// Reasons a user-entered arrangement is not a playable board.
///
/// The messages are shown to the author as-is.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("the board is not ready")]
    NotReady,
    #[error("use only numbers or leave the cell empty")]
    NonNumeric,
    #[error("there must be exactly one empty cell")]
    BlankCountError,
    #[error("use every number from 1 to N-1 exactly once")]
    IncompleteRange,
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GenerationError {
    /// No solvable shuffle was found within the attempt cap.
    #[error("no solvable layout found after {attempts} shuffles")]
    GenerationExhausted { attempts: usize },
}
