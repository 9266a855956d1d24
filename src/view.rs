//! View adapter traits.
//!
//! Sessions never reach into UI state; they call through these capability
//! traits, and a frontend (terminal, canvas, DOM, test fake) implements the
//! slots it renders. The adapter only ever reads board state and forwards
//! gestures — it never mutates placement or history.

use chess_core::{Board, Color};

/// UI slots of an active game.
pub trait GameView {
    /// The displayed position changed; re-render from the board's current
    /// placement and cursor.
    fn render_board(&mut self, board: &Board);

    /// A clock display changed.
    fn update_clock(&mut self, color: Color, seconds: u64);

    /// A confirmed move was appended to the move list; `ply` is its
    /// one-based half-move number.
    fn append_move(&mut self, ply: usize, san: &str);

    /// A chat or presence line arrived.
    fn append_chat(&mut self, line: &str);

    /// Transient user-facing notice (server errors, connection loss).
    fn show_notification(&mut self, text: &str);

    /// Measured round-trip time, in milliseconds.
    fn show_ping(&mut self, ms: u64);
}

/// UI slots of the matchmaking queue page.
pub trait QueueView {
    /// Number of players currently queued.
    fn update_counter(&mut self, players: u64);

    /// Seconds spent waiting, for the count-up display.
    fn update_elapsed(&mut self, seconds: u64);

    fn show_notification(&mut self, text: &str);
}
