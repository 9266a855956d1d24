//! JSON event envelope and payload shapes.
//!
//! Every frame on the wire is `{ "a": <action code>, "p": <payload> }` where
//! the payload shape depends on the action. Events for one session arrive in
//! a single total order; the client applies them as delivered and never
//! reorders or deduplicates.
//!
//! The client submits a move as the *index* of the chosen entry within the
//! most recently received legal-move list — it never re-encodes a move,
//! which is why the list is replaced wholesale on every update and its
//! ordering is authoritative.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Event action codes. One frozen table, shared with the server; the values
/// must never drift.
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[serde(into = "u8", try_from = "u8")]
pub enum EventAction {
    /// Server liveness probe; payload is the measured round-trip time in
    /// milliseconds. The client must reply with [`Envelope::pong`]
    /// immediately — a missing reply reads as a dead connection.
    Ping = 0,
    Pong = 1,
    /// Chat message, payload is the text line.
    Chat = 2,
    /// Client to server: index into the current legal-move list. Server to
    /// client: an incremental [`MovePayload`].
    Move = 3,
    /// Full game snapshot ([`GamePayload`]), sent on join and reconnect.
    Game = 4,
    /// A player connected; payload identifies them.
    Conn = 5,
    /// A player disconnected.
    Disc = 6,
    /// Matchmaking queue population.
    ClientsCounter = 7,
    /// Matchmaking found a game; payload is the game id to join.
    Redirect = 8,
    /// Server-reported failure; payload is a display message. The server
    /// may close the connection afterwards.
    Error = 9,
}

/// Action code outside the frozen table.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
#[error("unknown event action code {0}")]
pub struct UnknownAction(pub u8);

impl From<EventAction> for u8 {
    fn from(action: EventAction) -> u8 {
        action as u8
    }
}

impl TryFrom<u8> for EventAction {
    type Error = UnknownAction;

    fn try_from(code: u8) -> Result<EventAction, UnknownAction> {
        Ok(match code {
            0 => EventAction::Ping,
            1 => EventAction::Pong,
            2 => EventAction::Chat,
            3 => EventAction::Move,
            4 => EventAction::Game,
            5 => EventAction::Conn,
            6 => EventAction::Disc,
            7 => EventAction::ClientsCounter,
            8 => EventAction::Redirect,
            9 => EventAction::Error,
            other => return Err(UnknownAction(other)),
        })
    }
}

/// One wire frame: action code plus action-dependent payload.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct Envelope {
    pub a: EventAction,
    #[serde(default)]
    pub p: serde_json::Value,
}

impl Envelope {
    pub fn new(a: EventAction, p: serde_json::Value) -> Envelope {
        Envelope { a, p }
    }

    /// Reply to a [`EventAction::Ping`].
    pub fn pong() -> Envelope {
        Envelope::new(EventAction::Pong, serde_json::Value::Null)
    }

    /// Outgoing chat line.
    pub fn chat(text: &str) -> Envelope {
        Envelope::new(EventAction::Chat, serde_json::Value::from(text))
    }

    /// Move submission: the index of the chosen entry within the last
    /// received legal-move list.
    pub fn submit_move(index: usize) -> Envelope {
        Envelope::new(EventAction::Move, serde_json::Value::from(index))
    }

    /// Decodes the payload into the shape expected for the action.
    pub fn payload<T: serde::de::DeserializeOwned>(&self) -> Result<T, serde_json::Error> {
        serde_json::from_value(self.p.clone())
    }
}

/// A move the server has already validated and applied, as replayed by the
/// client. Only the server constructs these.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct CompletedMove {
    /// Standard Algebraic Notation, display-only.
    pub s: String,
    /// The 16-bit encoded move.
    pub m: u16,
    /// Mover's remaining clock time in seconds after the move.
    pub t: u64,
}

/// Payload of [`EventAction::Game`]: full state synchronization.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct GamePayload {
    /// Encoded legal moves for the side to move.
    pub lm: Vec<u16>,
    /// Every completed move so far, in order.
    pub m: Vec<CompletedMove>,
    /// White's remaining seconds.
    pub wt: u64,
    /// Black's remaining seconds.
    pub bt: u64,
    /// White player's connection presence, when the server reports it.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub w: Option<bool>,
    /// Black player's connection presence.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub b: Option<bool>,
}

/// Payload of a server-to-client [`EventAction::Move`]: one completed move
/// plus the legal moves for the next turn.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct MovePayload {
    pub lm: Vec<u16>,
    pub m: CompletedMove,
}
