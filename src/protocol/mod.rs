// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Transport and wire protocol.
//!
//! The Calaos server speaks JSON envelopes over a single persistent
//! WebSocket connection. This module provides the envelope types, the
//! [`Transport`] abstraction over the duplex text channel, the
//! [`WsTransport`] implementation, and the [`CommandSink`] handle used to
//! issue `set_state` commands from any task.

mod connection;
mod envelope;

pub use connection::WsTransport;
pub use envelope::{
    AckData, EventChange, EventData, Frame, HomeData, ItemData, LoginData, Request, RoomData,
    SetStateData,
};

use std::sync::Arc;

use crate::error::{Error, ParseError, ProtocolError};

/// TCP port of the Calaos WebSocket API. Fixed by the server.
pub const HUB_PORT: u16 = 5454;

/// URL path of the Calaos WebSocket API. Fixed by the server.
pub const API_PATH: &str = "/api";

/// Derives the WebSocket endpoint for a host.
///
/// # Examples
///
/// ```
/// assert_eq!(calor_lib::protocol::endpoint("192.168.1.9"), "ws://192.168.1.9:5454/api");
/// ```
#[must_use]
pub fn endpoint(host: &str) -> String {
    format!("ws://{host}:{HUB_PORT}{API_PATH}")
}

/// An ordered, reliable duplex channel of discrete text frames.
///
/// Both operations take `&self` so a send can interleave with a blocked
/// receive from another task; implementations synchronize the two halves
/// independently. `recv` blocks until a frame arrives or the connection
/// closes.
#[allow(async_fn_in_trait)]
pub trait Transport {
    /// Sends one text frame.
    ///
    /// # Errors
    ///
    /// Returns `ProtocolError` if the connection is unusable.
    async fn send(&self, text: String) -> Result<(), ProtocolError>;

    /// Receives the next text frame in sending order.
    ///
    /// # Errors
    ///
    /// Returns `ProtocolError::Closed` when the peer closes the
    /// connection, or another `ProtocolError` on transport failure.
    async fn recv(&self) -> Result<String, ProtocolError>;
}

/// A cheap, cloneable handle for issuing `set_state` commands.
///
/// Items hold a sink clone so their command methods can send without
/// going through the client; callers may also clone the client's sink and
/// fire commands from another task while the dispatch loop is blocked on
/// a receive.
#[derive(Debug)]
pub struct CommandSink<T: Transport> {
    transport: Arc<T>,
}

impl<T: Transport> Clone for CommandSink<T> {
    fn clone(&self) -> Self {
        Self {
            transport: Arc::clone(&self.transport),
        }
    }
}

impl<T: Transport> CommandSink<T> {
    pub(crate) fn new(transport: Arc<T>) -> Self {
        Self { transport }
    }

    /// Sends a raw `set_state` command for one item.
    ///
    /// Commands are fire-and-forget: the acknowledgement arrives later
    /// through the dispatch loop and a rejection is only logged there.
    ///
    /// # Errors
    ///
    /// Returns error if the command cannot be serialized or sent.
    pub async fn set_state(&self, id: &str, value: &str) -> Result<(), Error> {
        tracing::debug!(id, value, "sending set_state");
        let request = Request::set_state(id, value);
        let text = serde_json::to_string(&request).map_err(ParseError::Json)?;
        self.transport.send(text).await.map_err(Error::Protocol)
    }
}

#[cfg(test)]
pub(crate) mod testing {
    //! In-memory transport for unit tests.

    use std::collections::VecDeque;

    use tokio::sync::Mutex;

    use super::Transport;
    use crate::error::ProtocolError;

    /// A transport that records outbound frames and replays a scripted
    /// sequence of inbound frames. Once the script is exhausted, `recv`
    /// reports the connection as closed.
    #[derive(Debug, Default)]
    pub(crate) struct RecordingTransport {
        sent: Mutex<Vec<String>>,
        incoming: Mutex<VecDeque<String>>,
    }

    impl RecordingTransport {
        pub(crate) fn new() -> Self {
            Self::default()
        }

        pub(crate) fn scripted<I, S>(frames: I) -> Self
        where
            I: IntoIterator<Item = S>,
            S: Into<String>,
        {
            Self {
                sent: Mutex::new(Vec::new()),
                incoming: Mutex::new(frames.into_iter().map(Into::into).collect()),
            }
        }

        pub(crate) async fn sent(&self) -> Vec<String> {
            self.sent.lock().await.clone()
        }
    }

    impl Transport for RecordingTransport {
        async fn send(&self, text: String) -> Result<(), ProtocolError> {
            self.sent.lock().await.push(text);
            Ok(())
        }

        async fn recv(&self) -> Result<String, ProtocolError> {
            self.incoming
                .lock()
                .await
                .pop_front()
                .ok_or(ProtocolError::Closed)
        }
    }
}
