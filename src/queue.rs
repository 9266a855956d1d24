//! Matchmaking queue session.
//!
//! Before a game exists the client sits in the server's queue: it shows how
//! many players are waiting, counts up the time spent queued, and leaves as
//! soon as the server redirects it into a game room.

use shared::protocol::{Envelope, EventAction};
use tracing::{debug, warn};

use crate::error::ClientResult;
use crate::view::QueueView;

/// What the caller should do after an event was handled.
#[derive(Debug, Clone, PartialEq)]
pub enum QueueOutcome {
    /// Put this envelope on the wire (ping → pong).
    Reply(Envelope),
    /// The server assigned a game; connect to this game id.
    Redirect(String),
    /// Nothing to do.
    None,
}

/// The matchmaking queue: counter display, count-up timer, redirect.
pub struct QueueSession<V: QueueView> {
    view: V,
}

impl<V: QueueView> QueueSession<V> {
    pub fn new(view: V) -> QueueSession<V> {
        QueueSession { view }
    }

    pub fn view_mut(&mut self) -> &mut V {
        &mut self.view
    }

    /// Handles one server event while queued.
    pub fn handle_event(&mut self, event: Envelope) -> ClientResult<QueueOutcome> {
        match event.a {
            EventAction::Ping => Ok(QueueOutcome::Reply(Envelope::pong())),

            EventAction::ClientsCounter => {
                let players: u64 = event.payload()?;
                self.view.update_counter(players);
                Ok(QueueOutcome::None)
            }

            EventAction::Redirect => {
                let game_id: String = event.payload()?;
                debug!("redirected to game {game_id}");
                Ok(QueueOutcome::Redirect(game_id))
            }

            EventAction::Error => {
                let message: String = event.payload()?;
                warn!("server error while queued: {message}");
                self.view.show_notification(&message);
                Ok(QueueOutcome::None)
            }

            _ => {
                debug!(action = ?event.a, "ignoring non-queue event");
                Ok(QueueOutcome::None)
            }
        }
    }

    /// Count-up tick; `elapsed` is the wall-clock seconds since joining the
    /// queue, computed by the caller from its own start instant.
    pub fn tick(&mut self, elapsed: u64) {
        self.view.update_elapsed(elapsed);
    }
}
