//! Integration tests for game-session reconciliation.
//!
//! Exercises the full event flow the way the server drives it: a snapshot
//! on join, incremental moves per ply, pings, and move submission by index
//! into the server's legal-move list.

use serde_json::json;

use chess_core::{Board, Color};
use kingside::error::ClientError;
use kingside::session::GameSession;
use kingside::view::GameView;
use shared::protocol::{Envelope, EventAction};

/// Records every view call for assertions.
#[derive(Default)]
struct Recording {
    boards: Vec<String>,
    clocks: Vec<(Color, u64)>,
    moves: Vec<(usize, String)>,
    chat: Vec<String>,
    notifications: Vec<String>,
    pings: Vec<u64>,
}

impl GameView for Recording {
    fn render_board(&mut self, board: &Board) {
        self.boards.push(board.placement().to_fen());
    }
    fn update_clock(&mut self, color: Color, seconds: u64) {
        self.clocks.push((color, seconds));
    }
    fn append_move(&mut self, ply: usize, san: &str) {
        self.moves.push((ply, san.to_string()));
    }
    fn append_chat(&mut self, line: &str) {
        self.chat.push(line.to_string());
    }
    fn show_notification(&mut self, text: &str) {
        self.notifications.push(text.to_string());
    }
    fn show_ping(&mut self, ms: u64) {
        self.pings.push(ms);
    }
}

// e2-e4 and e7-e5 in the 16-bit wire encoding.
const E2E4: u16 = 28 | (12 << 6);
const E7E5: u16 = 36 | (52 << 6);

fn snapshot_event() -> Envelope {
    Envelope::new(
        EventAction::Game,
        json!({
            "lm": [E2E4],
            "m": [
                {"s": "e4", "m": E2E4, "t": 299},
                {"s": "e5", "m": E7E5, "t": 298},
            ],
            "wt": 299,
            "bt": 298,
            "w": true,
            "b": true,
        }),
    )
}

#[test]
fn test_snapshot_replay() {
    //! A snapshot with two completed moves leaves three history entries
    //! (initial + 2), the cursor at the tip, and White's clock active
    //! (even move count).

    let mut session = GameSession::new(Recording::default(), 300);
    let reply = session.handle_event(snapshot_event()).unwrap();
    assert!(reply.is_none(), "snapshots require no reply");

    assert_eq!(session.board().fens().len(), 3);
    assert_eq!(session.board().cursor(), 2);
    assert!(session.board().is_live());
    assert_eq!(session.clock().active(), Color::White);
    assert_eq!(session.clock().time(Color::White), 299);
    assert_eq!(session.clock().time(Color::Black), 298);
    assert_eq!(
        session.board().placement().to_fen(),
        "rnbqkbnr/pppp1ppp/8/4p3/4P3/8/PPPP1PPP/RNBQKBNR"
    );

    let view = session.view_mut();
    assert_eq!(
        view.moves,
        vec![(1, "e4".to_string()), (2, "e5".to_string())],
        "SANs appended in order"
    );
    assert!(!view.boards.is_empty(), "board re-rendered after sync");
    assert!(view.clocks.contains(&(Color::White, 299)));
    assert!(view.clocks.contains(&(Color::Black, 298)));
    assert!(view.chat.is_empty());
    assert!(view.notifications.is_empty());
}

#[test]
fn test_incremental_move_after_snapshot() {
    //! An incremental event applies one ply on top of the synced state and
    //! flips the active color.

    let mut session = GameSession::new(Recording::default(), 300);
    session.handle_event(snapshot_event()).unwrap();

    // 2. Nf3 — g1 (6) to f3 (21).
    let nf3: u16 = 21 | (6 << 6);
    session
        .handle_event(Envelope::new(
            EventAction::Move,
            json!({"lm": [], "m": {"s": "Nf3", "m": nf3, "t": 290}}),
        ))
        .unwrap();

    assert_eq!(session.board().ply(), 3);
    assert_eq!(
        session.clock().time(Color::White),
        290,
        "mover's clock reset from the embedded time"
    );
    assert_eq!(session.clock().active(), Color::Black);
    assert_eq!(
        session.board().placement().to_fen(),
        "rnbqkbnr/pppp1ppp/8/4p3/4P3/5N2/PPPP1PPP/RNBQKB1R"
    );
}

#[test]
fn test_ping_pong_liveness() {
    //! {a: Ping, p: 42} produces an outgoing {a: Pong, p: null} and a
    //! displayed value containing 42.

    let mut session = GameSession::new(Recording::default(), 300);
    let reply = session
        .handle_event(Envelope::new(EventAction::Ping, json!(42)))
        .unwrap()
        .expect("ping demands a reply");

    assert_eq!(serde_json::to_string(&reply).unwrap(), r#"{"a":1,"p":null}"#);
    assert_eq!(session.view_mut().pings, vec![42]);
}

#[test]
fn test_submit_move_by_index() {
    //! Submission selects an index into the server's legal-move list; the
    //! move itself is never re-encoded and never applied locally.

    let mut session = GameSession::new(Recording::default(), 300);
    session
        .handle_event(Envelope::new(
            EventAction::Game,
            json!({"lm": [E7E5, E2E4], "m": [], "wt": 300, "bt": 300}),
        ))
        .unwrap();

    let envelope = session
        .submit_move("e2".parse().unwrap(), "e4".parse().unwrap(), None)
        .unwrap();
    assert_eq!(serde_json::to_string(&envelope).unwrap(), r#"{"a":3,"p":1}"#);

    assert_eq!(session.board().ply(), 0, "no local application");

    let err = session
        .submit_move("a1".parse().unwrap(), "a8".parse().unwrap(), None)
        .unwrap_err();
    assert!(matches!(err, ClientError::IllegalMove { .. }));
}

#[test]
fn test_review_blocks_submission() {
    //! While the cursor is off the live tip, move submission is rejected;
    //! returning to the tip re-enables it. Navigation never mutates
    //! history.

    let mut session = GameSession::new(Recording::default(), 300);
    session.handle_event(snapshot_event()).unwrap();
    let fens_before = session.board().fens().to_vec();

    session.review_first().unwrap();
    assert_eq!(session.board().cursor(), 0);
    let err = session
        .submit_move("e2".parse().unwrap(), "e4".parse().unwrap(), None)
        .unwrap_err();
    assert!(matches!(err, ClientError::ReviewingHistory { .. }));

    session.review_next().unwrap();
    assert_eq!(session.board().cursor(), 1);
    session.review_prev().unwrap();
    session.review_prev().unwrap();
    assert_eq!(session.board().cursor(), 0, "prev clamps at the start");

    session.review_live().unwrap();
    assert!(session.board().is_live());
    assert!(session
        .submit_move("e2".parse().unwrap(), "e4".parse().unwrap(), None)
        .is_ok());

    assert_eq!(
        session.board().fens(),
        fens_before,
        "review left history untouched"
    );
}

#[test]
fn test_review_navigation_renders_each_position() {
    let mut session = GameSession::new(Recording::default(), 300);
    session.handle_event(snapshot_event()).unwrap();
    session.view_mut().boards.clear();

    session.review(1).unwrap();
    assert_eq!(
        session.view_mut().boards.last().unwrap(),
        "rnbqkbnr/pppppppp/8/8/4P3/8/PPPP1PPP/RNBQKBNR"
    );

    let err = session.review(9).unwrap_err();
    assert!(matches!(err, ClientError::Chess(_)), "out of range rejected");
}

#[test]
fn test_clock_tick_between_authoritative_updates() {
    //! Local ticking decrements the active color until the next server
    //! reset overwrites it.

    let mut session = GameSession::new(Recording::default(), 300);
    session.handle_event(snapshot_event()).unwrap();

    session.tick_clock();
    session.tick_clock();
    assert_eq!(session.clock().time(Color::White), 297);
    assert_eq!(session.clock().time(Color::Black), 298, "only the active side ticks");

    // Next authoritative event resets the interpolation.
    let nf3: u16 = 21 | (6 << 6);
    session
        .handle_event(Envelope::new(
            EventAction::Move,
            json!({"lm": [], "m": {"s": "Nf3", "m": nf3, "t": 295}}),
        ))
        .unwrap();
    assert_eq!(session.clock().time(Color::White), 295);
}
