// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! WebSocket transport implementation.

use futures_util::stream::{SplitSink, SplitStream};
use futures_util::{SinkExt, StreamExt};
use tokio::net::TcpStream;
use tokio::sync::Mutex;
use tokio_tungstenite::tungstenite::Message;
use tokio_tungstenite::{MaybeTlsStream, WebSocketStream, connect_async};

use crate::error::ProtocolError;
use crate::protocol::{Transport, endpoint};

type WsStream = WebSocketStream<MaybeTlsStream<TcpStream>>;

/// WebSocket transport to a Calaos server.
///
/// The sink and stream halves are locked independently: a `set_state`
/// send issued from another task does not wait for the dispatch loop's
/// blocked receive, and vice versa.
///
/// # Examples
///
/// ```no_run
/// use calor_lib::protocol::WsTransport;
///
/// # async fn example() -> calor_lib::Result<()> {
/// let transport = WsTransport::open("192.168.1.9").await?;
/// # Ok(())
/// # }
/// ```
#[derive(Debug)]
pub struct WsTransport {
    sink: Mutex<SplitSink<WsStream, Message>>,
    stream: Mutex<SplitStream<WsStream>>,
}

impl WsTransport {
    /// Opens a connection to the fixed Calaos endpoint
    /// `ws://<host>:5454/api`.
    ///
    /// # Errors
    ///
    /// Returns `ProtocolError` if the connection cannot be established.
    /// No retry is attempted; the caller decides whether to reconnect.
    pub async fn open(host: &str) -> Result<Self, ProtocolError> {
        Self::open_url(&endpoint(host)).await
    }

    /// Opens a connection to an explicit WebSocket URL.
    ///
    /// Useful for tests and non-standard deployments; regular use goes
    /// through [`WsTransport::open`], which derives the endpoint.
    ///
    /// # Errors
    ///
    /// Returns `ProtocolError` if the connection cannot be established.
    pub async fn open_url(url: &str) -> Result<Self, ProtocolError> {
        tracing::debug!(url, "opening websocket");
        let (ws, _response) = connect_async(url).await.map_err(ProtocolError::WebSocket)?;
        let (sink, stream) = ws.split();
        Ok(Self {
            sink: Mutex::new(sink),
            stream: Mutex::new(stream),
        })
    }
}

impl Transport for WsTransport {
    async fn send(&self, text: String) -> Result<(), ProtocolError> {
        let mut sink = self.sink.lock().await;
        sink.send(Message::text(text))
            .await
            .map_err(ProtocolError::WebSocket)
    }

    async fn recv(&self) -> Result<String, ProtocolError> {
        let mut stream = self.stream.lock().await;
        loop {
            match stream.next().await {
                Some(Ok(Message::Text(text))) => return Ok(text.as_str().to_owned()),
                Some(Ok(Message::Close(_))) | None => return Err(ProtocolError::Closed),
                // Control and binary frames are not part of the protocol
                Some(Ok(_)) => {}
                Some(Err(e)) => return Err(ProtocolError::WebSocket(e)),
            }
        }
    }
}
