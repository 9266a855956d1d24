//! WebSocket client carrying JSON event envelopes.
//!
//! The transport is deliberately thin: it frames envelopes in and out and
//! nothing else. Reconnect policy lives with the caller — on connection
//! loss the user is told to reload, matching the server's expectations. A
//! malformed frame surfaces as an error without touching any game state;
//! the board lives entirely above this layer and cannot be left
//! inconsistent by a transport failure.

use futures::{SinkExt, StreamExt};
use shared::protocol::Envelope;
use tracing::{debug, info};
use websocket::{ClientBuilder, MaybeTlsStream, Message, WebSocketStream};

use crate::error::{ClientError, ClientResult};

/// A connected WebSocket session speaking the JSON envelope protocol.
pub struct Socket {
    stream: WebSocketStream<MaybeTlsStream<tokio::net::TcpStream>>,
}

impl Socket {
    /// Connects to `server` (e.g. `ws://localhost:3502`), joining the given
    /// game room when an id is supplied and the matchmaking queue otherwise.
    pub async fn connect(server: &str, game_id: Option<&str>) -> ClientResult<Socket> {
        let url = match game_id {
            Some(id) => format!("{server}/ws?id={id}"),
            None => format!("{server}/ws"),
        };

        let builder = ClientBuilder::new()
            .uri(&url)
            .map_err(|e| ClientError::InvalidUrl(e.to_string()))?;
        let (stream, _response) = builder.connect().await?;

        info!("[NETWORK] connected to {url}");
        Ok(Socket { stream })
    }

    /// Next event envelope, `None` once the server closes the connection.
    /// Non-text frames (protocol-level ping/close handling is done by the
    /// websocket layer) are skipped.
    pub async fn recv(&mut self) -> ClientResult<Option<Envelope>> {
        while let Some(frame) = self.stream.next().await {
            let message = frame?;
            if let Some(text) = message.as_text() {
                let envelope: Envelope = serde_json::from_str(text)?;
                debug!(action = ?envelope.a, "[NETWORK] event received");
                return Ok(Some(envelope));
            }
        }
        Ok(None)
    }

    /// Sends one envelope as a text frame.
    pub async fn send(&mut self, envelope: &Envelope) -> ClientResult<()> {
        let text = serde_json::to_string(envelope)?;
        debug!(action = ?envelope.a, "[NETWORK] event sent");
        self.stream.send(Message::text(text)).await?;
        Ok(())
    }

    /// Closes the connection.
    pub async fn close(mut self) -> ClientResult<()> {
        SinkExt::close(&mut self.stream).await?;
        Ok(())
    }
}
