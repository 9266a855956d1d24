//! Error types for the chess domain crate.
//!
//! Covers position decoding, algebraic notation conversion, move application
//! and history navigation.

use thiserror::Error;

use crate::square::Square;

/// Errors that can occur while decoding positions or applying moves.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// Piece-placement string that does not describe a full 8x8 board
    #[error("malformed FEN piece placement {fen:?}: {reason}")]
    MalformedFen { fen: String, reason: String },

    /// Algebraic square notation outside `a1`..`h8`
    #[error("invalid square notation {notation:?}")]
    InvalidNotation { notation: String },

    /// Move whose origin square is empty. The move list is server-provided,
    /// so this is a protocol-trust violation rather than a user error.
    #[error("no piece at source square {square}")]
    NoPieceAtSource { square: Square },

    /// History navigation beyond the recorded positions
    #[error("history index {index} out of range (history has {len} positions)")]
    HistoryOutOfRange { index: usize, len: usize },
}

/// Result type alias for domain operations
pub type Result<T> = std::result::Result<T, Error>;
