//! Error types for position and move input.
//!
//! The core never sees malformed data: FEN strings and move text are
//! rejected here, before a `Position` or `Move` exists.

use crate::board::Side;
use thiserror::Error;

/// Errors produced while parsing a FEN string
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FenError {
    /// Fewer than the four mandatory fields
    #[error("FEN needs at least 4 fields, found {found}")]
    MissingFields { found: usize },

    /// Board field does not have eight ranks
    #[error("FEN board has {found} ranks, expected 8")]
    RankCount { found: usize },

    /// A rank describes more or fewer than eight files
    #[error("FEN rank {rank} covers {files} files, expected 8")]
    RankLength { rank: usize, files: usize },

    /// Unknown piece letter in the board field
    #[error("invalid piece character '{0}'")]
    InvalidPiece(char),

    /// Side to move is neither `w` nor `b`
    #[error("invalid side to move '{0}'")]
    InvalidSide(String),

    /// Castling field contains something other than `KQkq` or `-`
    #[error("invalid castling character '{0}'")]
    InvalidCastle(char),

    /// En-passant field is not `-` or a square name
    #[error("invalid en-passant square '{0}'")]
    InvalidPassant(String),

    /// Half-move clock or full-move number is not a number
    #[error("invalid move counter '{0}'")]
    InvalidCounter(String),

    /// Each side needs exactly one king
    #[error("{side:?} has {count} kings, expected 1")]
    KingCount { side: Side, count: u32 },
}

/// Errors produced while decoding coordinate move text
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum MoveParseError {
    /// Move text must be 4 or 5 characters
    #[error("move '{0}' must be 4 or 5 characters")]
    Length(String),

    /// Source or target is not a square name
    #[error("invalid square in move '{0}'")]
    InvalidSquare(String),

    /// Promotion letter is not one of `nbrq`
    #[error("invalid promotion piece '{0}'")]
    InvalidPromotion(char),

    /// Nothing stands on the source square
    #[error("no piece on the source square of '{0}'")]
    EmptySource(String),

    /// The decoded move is not legal in the position
    #[error("illegal move '{0}'")]
    Illegal(String),
}

/// Errors from a UCI `position` command
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PositionCommandError {
    #[error("FEN parse error: {0}")]
    Fen(#[from] FenError),

    #[error("invalid move: {0}")]
    Move(#[from] MoveParseError),
}

/// Result type alias for FEN parsing
pub type FenResult<T> = Result<T, FenError>;
