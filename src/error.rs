//! Error types for the client crate.

use chess_core::Square;
use thiserror::Error;

/// Errors that can occur in the client session and transport layers.
#[derive(Error, Debug)]
pub enum ClientError {
    /// WebSocket transport failure
    #[error("transport error: {0}")]
    Transport(#[from] websocket::Error),

    /// The server URL did not parse
    #[error("invalid server url: {0}")]
    InvalidUrl(String),

    /// A frame that is not a valid JSON event envelope
    #[error("malformed event envelope: {0}")]
    Envelope(#[from] serde_json::Error),

    /// Domain-level failure surfaced from the board state machine
    #[error(transparent)]
    Chess(#[from] chess_core::Error),

    /// Move submission attempted while reviewing a historical position
    #[error("cannot submit a move while reviewing history (position {cursor} of {len})")]
    ReviewingHistory { cursor: usize, len: usize },

    /// Candidate move not present in the server's legal-move list
    #[error("move {from}{to} is not in the current legal-move list")]
    IllegalMove { from: Square, to: Square },
}

/// Result type alias for client operations
pub type ClientResult<T> = Result<T, ClientError>;
