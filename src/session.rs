//! Game session reconciliation.
//!
//! [`GameSession`] consumes the server's event stream and keeps the board,
//! the clocks and the move list consistent with it. Two event shapes carry
//! game state:
//!
//! - a **snapshot** ([`GamePayload`]) on join/reconnect: the full move
//!   record is replayed from the initial position, then both clocks are set
//!   from the snapshot's authoritative times;
//! - an **incremental move** ([`MovePayload`]) per ply: one completed move
//!   is applied and committed, the mover's clock is reset from the embedded
//!   time and the tick hands over to the other color.
//!
//! Events for one session arrive in a single total order and are applied as
//! delivered; applying them out of order is undefined. Every handler runs
//! to completion before the next one starts (single-threaded event loop),
//! so no locking is needed anywhere in the session.
//!
//! The session trusts the server's legality authority: a move that cannot
//! be applied (empty origin square) is logged and dropped rather than
//! allowed to corrupt the placement.

use chess_core::{Board, Color, Move, PromotionFlag, Square};
use shared::protocol::{CompletedMove, Envelope, EventAction, GamePayload, MovePayload};
use tracing::{debug, warn};

use crate::clock::Clock;
use crate::error::{ClientError, ClientResult};
use crate::view::GameView;

/// One active game: board state machine, clock and the completed-move log,
/// driven by server events.
pub struct GameSession<V: GameView> {
    board: Board,
    clock: Clock,
    log: Vec<CompletedMove>,
    view: V,
}

impl<V: GameView> GameSession<V> {
    /// A session at the initial position. `time` is the per-side allotment
    /// in seconds; the clock starts ticking for White and gets overwritten
    /// by the first authoritative server event.
    pub fn new(view: V, time: u64) -> GameSession<V> {
        GameSession {
            board: Board::new(),
            clock: Clock::new(time, true, Color::White),
            log: Vec::new(),
            view,
        }
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn clock(&self) -> &Clock {
        &self.clock
    }

    /// Completed moves applied so far, oldest first.
    pub fn moves(&self) -> &[CompletedMove] {
        &self.log
    }

    pub fn view_mut(&mut self) -> &mut V {
        &mut self.view
    }

    /// Handles one server event. Returns the reply envelope to put on the
    /// wire, if the event demands one (currently only ping → pong).
    pub fn handle_event(&mut self, event: Envelope) -> ClientResult<Option<Envelope>> {
        match event.a {
            // Liveness probe: reply immediately, surface the RTT.
            EventAction::Ping => {
                let ms: u64 = event.payload().unwrap_or(0);
                self.view.show_ping(ms);
                Ok(Some(Envelope::pong()))
            }

            EventAction::Chat => {
                let line: String = event.payload()?;
                self.view.append_chat(&line);
                Ok(None)
            }

            EventAction::Conn => {
                self.view
                    .append_chat(&format!("Player {} joined", display(&event.p)));
                Ok(None)
            }

            EventAction::Disc => {
                self.view
                    .append_chat(&format!("Player {} left", display(&event.p)));
                Ok(None)
            }

            EventAction::Game => {
                self.sync_snapshot(event.payload()?)?;
                Ok(None)
            }

            EventAction::Move => {
                self.apply_incremental(event.payload()?)?;
                Ok(None)
            }

            EventAction::Error => {
                let message: String = event.payload()?;
                warn!("server error: {message}");
                self.view.show_notification(&message);
                Ok(None)
            }

            // Not part of an active game; queue sessions handle these.
            EventAction::Pong | EventAction::ClientsCounter | EventAction::Redirect => {
                debug!(action = ?event.a, "ignoring non-game event");
                Ok(None)
            }
        }
    }

    /// Full state synchronization: replay the whole move record, then apply
    /// the authoritative clock times. Active color follows move-count
    /// parity — an even count means the starting color is to move.
    fn sync_snapshot(&mut self, payload: GamePayload) -> ClientResult<()> {
        self.board.set_legal_moves(&payload.lm);
        for completed in &payload.m {
            self.store(completed)?;
        }

        self.clock.set_time(Color::White, payload.wt);
        self.view.update_clock(Color::White, payload.wt);
        self.clock.set_time(Color::Black, payload.bt);
        self.view.update_clock(Color::Black, payload.bt);
        self.clock.set_active(Color::from_ply(self.board.ply()));

        self.view.render_board(&self.board);
        Ok(())
    }

    /// One confirmed ply: apply it, reset the mover's clock from the
    /// embedded remaining time, hand the tick to the other color.
    fn apply_incremental(&mut self, payload: MovePayload) -> ClientResult<()> {
        self.board.set_legal_moves(&payload.lm);
        self.store(&payload.m)?;

        // After the push an odd ply count means White just moved.
        let mover = if self.board.ply() % 2 == 1 {
            Color::White
        } else {
            Color::Black
        };
        self.clock.set_time(mover, payload.m.t);
        self.view.update_clock(mover, payload.m.t);
        self.clock.switch_color();

        self.view.render_board(&self.board);
        Ok(())
    }

    /// Applies and commits one server-confirmed move, appending it to the
    /// log and the displayed move list.
    fn store(&mut self, completed: &CompletedMove) -> ClientResult<()> {
        // Confirmed moves always land on the live tip, even if the user is
        // reviewing a historical position when the event arrives.
        self.board.goto_live()?;

        let mv = Move::decode(completed.m);
        if let Err(err) = self.board.apply_move(mv) {
            // The server is the legality authority, so this should never
            // happen; drop the move instead of corrupting the placement.
            warn!("dropping move {:?}: {err}", completed.s);
            return Ok(());
        }
        self.board.push_history();
        self.log.push(completed.clone());
        self.view.append_move(self.board.ply(), &completed.s);
        Ok(())
    }

    /// Builds the move-submission envelope for a user gesture. Rejected
    /// while reviewing history — the legal-move list only describes the
    /// live position. The move is not applied locally; the server echoes it
    /// back as the authoritative incremental event.
    pub fn submit_move(
        &self,
        from: Square,
        to: Square,
        promotion: Option<PromotionFlag>,
    ) -> ClientResult<Envelope> {
        if !self.board.is_live() {
            return Err(ClientError::ReviewingHistory {
                cursor: self.board.cursor(),
                len: self.board.fens().len(),
            });
        }
        let (index, _) = self
            .board
            .find_legal(from, to, promotion)
            .ok_or(ClientError::IllegalMove { from, to })?;
        Ok(Envelope::submit_move(index))
    }

    /// Jumps the display to an arbitrary history index.
    pub fn review(&mut self, index: usize) -> ClientResult<()> {
        self.board.goto_history(index)?;
        self.view.render_board(&self.board);
        Ok(())
    }

    /// One position back; no-op at the initial position.
    pub fn review_prev(&mut self) -> ClientResult<()> {
        match self.board.cursor() {
            0 => Ok(()),
            cursor => self.review(cursor - 1),
        }
    }

    /// One position forward; no-op at the live tip.
    pub fn review_next(&mut self) -> ClientResult<()> {
        if self.board.is_live() {
            return Ok(());
        }
        self.review(self.board.cursor() + 1)
    }

    /// Back to the initial position.
    pub fn review_first(&mut self) -> ClientResult<()> {
        self.review(0)
    }

    /// Forward to the live tip.
    pub fn review_live(&mut self) -> ClientResult<()> {
        self.review(self.board.fens().len() - 1)
    }

    /// Periodic clock tick from the scheduler; cosmetic between
    /// authoritative resets.
    pub fn tick_clock(&mut self) {
        if let Some((color, secs)) = self.clock.tick() {
            self.view.update_clock(color, secs);
        }
    }
}

/// Human-readable payload fragment for presence lines; the server sends
/// player identifiers as strings or numbers depending on the endpoint.
fn display(value: &serde_json::Value) -> String {
    match value {
        serde_json::Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}
