use thiserror::Error;

use crate::solver::SearchKind;

/// Reasons a tile arrangement cannot be turned into a [`Board`](crate::board::Board).
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum InvalidArrangement {
    /// Boards smaller than 2x2 have no legal moves.
    #[error("board dimension {size} is too small, expected at least 2")]
    TooSmall { size: usize },

    /// A row's length differs from the number of rows.
    #[error("row {row} has {len} tiles, expected {size}")]
    RaggedRow { row: usize, len: usize, size: usize },

    /// The flat tile list does not hold exactly N² values.
    #[error("expected {expected} tiles, found {found}")]
    TileCount { expected: usize, found: usize },

    /// A tile is not in `0..limit`.
    #[error("tile {value} is out of range 0..{limit}")]
    OutOfRange { value: u32, limit: usize },

    /// A tile value appears twice, which also means another value is missing.
    #[error("tile {value} appears more than once")]
    Duplicate { value: u32 },
}

/// Failures of a search run. An unsolvable puzzle is not one of them.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SolveError {
    /// A frontier ran dry before either goal fired. Only a corrupt board can cause this.
    #[error("{search} search frontier exhausted after {rounds} rounds without reaching a goal")]
    FrontierExhausted { search: SearchKind, rounds: u64 },

    /// The configured round limit was hit before either goal fired.
    #[error("no goal reached within {limit} rounds")]
    RoundLimitExceeded { limit: u64 },
}

/// Errors produced while reading the textual board format.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ParseError {
    #[error("input is empty, expected the board dimension first")]
    MissingDimension,

    #[error("token {position} ({token:?}) is not a non-negative integer")]
    InvalidToken { position: usize, token: String },

    #[error("expected {expected} tiles after the dimension, found {found}")]
    MissingTiles { expected: usize, found: usize },

    #[error("{count} unexpected tokens after the last tile")]
    TrailingTokens { count: usize },

    #[error(transparent)]
    Arrangement(#[from] InvalidArrangement),
}
