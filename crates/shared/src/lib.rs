//! Wire protocol shared with the game server.
//!
//! Everything here is a frozen contract: the event-action numbering, the
//! `{a, p}` envelope and the payload field names must match the server
//! byte-for-byte, so no mapping is ever duplicated inline elsewhere.

pub mod protocol;

pub use protocol::{
    CompletedMove, Envelope, EventAction, GamePayload, MovePayload, UnknownAction,
};
