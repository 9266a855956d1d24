//! Kingside — a client for server-authoritative chess.
//!
//! The server owns the rules: it computes the legal-move list and the
//! completed-move records, and this client only decodes, applies and
//! displays them. The crate wires the [`chess_core`] board state machine and
//! the [`shared`] wire protocol into a session layer:
//!
//! - [`session::GameSession`] — reconciles the server event stream (full
//!   snapshots + incremental moves) into board and clock state.
//! - [`queue::QueueSession`] — the matchmaking queue, waiting for a
//!   redirect into a game.
//! - [`clock::Clock`] / [`ticker::Ticker`] — cosmetic countdown between
//!   authoritative clock resets, on a drift-corrected schedule.
//! - [`view`] — the capability traits a frontend implements; the session
//!   never reaches into UI state directly.
//! - [`networking`] — the WebSocket transport carrying JSON envelopes.
//!
//! Everything is single-threaded and event-driven: one handler runs at a
//! time, so no locking guards the board or the session.

pub mod clock;
pub mod error;
pub mod networking;
pub mod queue;
pub mod session;
pub mod ticker;
pub mod view;

pub use error::{ClientError, ClientResult};
pub use session::GameSession;
