//! Terminal client binary.
//!
//! Connects to the game server, reconciles its event stream into a text
//! rendering of the board, and forwards typed gestures: `e2e4`-style move
//! submissions, review commands and chat lines.

use std::time::{Duration, Instant};

use anyhow::{bail, Context};
use clap::Parser;
use tokio::io::{AsyncBufReadExt, BufReader};

use chess_core::{Board, Color, PromotionFlag, Square};
use kingside::clock::format_time;
use kingside::networking::Socket;
use kingside::queue::{QueueOutcome, QueueSession};
use kingside::session::GameSession;
use kingside::ticker::Ticker;
use kingside::view::{GameView, QueueView};

#[derive(Parser)]
#[command(name = "kingside", version, about = "Terminal client for server-authoritative chess")]
struct Args {
    /// WebSocket server URL
    #[arg(long, default_value = "ws://localhost:3502")]
    server: String,

    /// Game room id to join directly
    #[arg(long, conflicts_with = "queue")]
    game: Option<String>,

    /// Wait in the matchmaking queue for a game assignment
    #[arg(long)]
    queue: bool,

    /// Per-side time control in seconds
    #[arg(long, default_value_t = 300)]
    time: u64,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let args = Args::parse();

    let game_id = match (&args.game, args.queue) {
        (Some(id), _) => id.clone(),
        (None, true) => wait_in_queue(&args.server).await?,
        (None, false) => bail!("either --game <id> or --queue is required"),
    };

    run_game(&args.server, &game_id, args.time).await
}

/// Sits in the matchmaking queue until the server redirects into a game.
async fn wait_in_queue(server: &str) -> anyhow::Result<String> {
    let mut socket = Socket::connect(server, None).await?;
    let mut session = QueueSession::new(TerminalQueue);
    let mut ticker = Ticker::new(Duration::from_millis(500));
    let joined = Instant::now();

    println!("Waiting for an opponent...");
    loop {
        tokio::select! {
            frame = socket.recv() => match frame? {
                None => bail!("connection closed while waiting in the queue"),
                Some(event) => match session.handle_event(event)? {
                    QueueOutcome::Reply(reply) => socket.send(&reply).await?,
                    QueueOutcome::Redirect(game_id) => {
                        socket.close().await?;
                        return Ok(game_id);
                    }
                    QueueOutcome::None => {}
                },
            },
            _ = ticker.tick() => session.tick(joined.elapsed().as_secs()),
        }
    }
}

/// Runs one game session until the server closes the connection.
async fn run_game(server: &str, game_id: &str, time: u64) -> anyhow::Result<()> {
    let mut socket = Socket::connect(server, Some(game_id)).await?;
    let mut session = GameSession::new(Terminal::default(), time);
    let mut ticker = Ticker::new(Duration::from_secs(1));
    let mut input = BufReader::new(tokio::io::stdin()).lines();

    loop {
        tokio::select! {
            frame = socket.recv() => match frame? {
                None => {
                    session
                        .view_mut()
                        .show_notification("Connection to the server was lost. Please reconnect.");
                    return Ok(());
                }
                Some(event) => {
                    if let Some(reply) = session.handle_event(event)? {
                        socket.send(&reply).await?;
                    }
                }
            },
            line = input.next_line() => match line.context("stdin closed")? {
                None => return Ok(()),
                Some(line) => handle_input(&mut session, &mut socket, line.trim()).await?,
            },
            _ = ticker.tick() => session.tick_clock(),
        }
    }
}

/// One typed line: a move gesture, a review command or a chat message.
async fn handle_input(
    session: &mut GameSession<Terminal>,
    socket: &mut Socket,
    line: &str,
) -> anyhow::Result<()> {
    if line.is_empty() {
        return Ok(());
    }

    match line {
        "prev" => session.review_prev()?,
        "next" => session.review_next()?,
        "first" => session.review_first()?,
        "live" => session.review_live()?,
        _ => {
            if let Some((from, to, promotion)) = parse_gesture(line) {
                match session.submit_move(from, to, promotion) {
                    Ok(envelope) => socket.send(&envelope).await?,
                    Err(err) => println!("* {err}"),
                }
            } else {
                socket.send(&shared::protocol::Envelope::chat(line)).await?;
            }
        }
    }
    Ok(())
}

/// Parses `e2e4` / `e7e8q` style gestures; anything else is chat.
fn parse_gesture(line: &str) -> Option<(Square, Square, Option<PromotionFlag>)> {
    if !line.is_ascii() || (line.len() != 4 && line.len() != 5) {
        return None;
    }
    let from: Square = line[0..2].parse().ok()?;
    let to: Square = line[2..4].parse().ok()?;
    let promotion = match &line[4..] {
        "" => None,
        "n" => Some(PromotionFlag::Knight),
        "b" => Some(PromotionFlag::Bishop),
        "r" => Some(PromotionFlag::Rook),
        "q" => Some(PromotionFlag::Queen),
        _ => return None,
    };
    Some((from, to, promotion))
}

/// ASCII rendering of the game state.
#[derive(Default)]
struct Terminal;

impl GameView for Terminal {
    fn render_board(&mut self, board: &Board) {
        let placement = board.placement();
        println!();
        for rank in (0..8).rev() {
            print!("{} ", rank + 1);
            for file in 0..8 {
                match placement.get(Square::new(file, rank)) {
                    Some(piece) => print!(" {}", piece.fen_char()),
                    None => print!(" ."),
                }
            }
            println!();
        }
        println!("   a b c d e f g h");
        if !board.is_live() {
            println!(
                "  reviewing position {} of {}",
                board.cursor(),
                board.fens().len() - 1
            );
        }
    }

    fn update_clock(&mut self, color: Color, seconds: u64) {
        let label = match color {
            Color::White => "White",
            Color::Black => "Black",
        };
        println!("{label} {}", format_time(seconds));
    }

    fn append_move(&mut self, ply: usize, san: &str) {
        println!("{}. {san}", ply.div_ceil(2));
    }

    fn append_chat(&mut self, line: &str) {
        println!("> {line}");
    }

    fn show_notification(&mut self, text: &str) {
        println!("! {text}");
    }

    fn show_ping(&mut self, ms: u64) {
        println!("Ping: {ms} ms");
    }
}

/// Queue display.
struct TerminalQueue;

impl QueueView for TerminalQueue {
    fn update_counter(&mut self, players: u64) {
        println!("Players in queue: {players}");
    }

    fn update_elapsed(&mut self, seconds: u64) {
        print!("\rWaiting {}", format_time(seconds));
    }

    fn show_notification(&mut self, text: &str) {
        println!("! {text}");
    }
}
