// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! The hub session.
//!
//! A [`Client`] owns one WebSocket connection to a Calaos server and
//! drives it through a fixed lifecycle: connect, authenticate, load the
//! topology, then stream events. Inbound traffic is single-reader: only
//! [`Client::dispatch_next`] consumes frames once authenticated, so call
//! it in a loop. Outbound commands can be issued concurrently through a
//! [`CommandSink`] clone while the dispatch loop is blocked on a read.

use std::sync::Arc;

use tracing::{debug, info, warn};

use crate::error::{Error, ParseError, Result};
use crate::event::StateEvent;
use crate::home::{Home, Item, Room};
use crate::protocol::{
    AckData, CommandSink, EventData, Frame, HomeData, Request, Transport, WsTransport,
};

/// Where a session is in its lifecycle.
///
/// The state only moves forward; a closed session cannot be revived,
/// open a new [`Client`] instead.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    /// The WebSocket is open, no credentials sent yet.
    Connected,
    /// The server accepted the credentials.
    Authenticated,
    /// At least one topology snapshot has been loaded; events are
    /// being applied.
    Streaming,
    /// The transport failed or the peer closed the connection.
    Closed,
}

/// A client session with a Calaos server.
///
/// # Examples
///
/// ```no_run
/// use calor_lib::Client;
///
/// # async fn run() -> calor_lib::Result<()> {
/// let mut client = Client::connect("192.168.1.10").await?;
/// if !client.login("user", "secret").await? {
///     return Ok(());
/// }
/// client.reload_home().await?;
/// while let Some(event) = client.dispatch_next().await? {
///     println!("{} is now {}", event.name, event.state);
/// }
/// # Ok(())
/// # }
/// ```
#[derive(Debug)]
pub struct Client<T: Transport = WsTransport> {
    transport: Arc<T>,
    sink: CommandSink<T>,
    home: Home<T>,
    session: SessionState,
}

impl Client<WsTransport> {
    /// Opens a WebSocket connection to a hub and wraps it in a client.
    ///
    /// The endpoint is derived from the host: port 5454, path `/api`.
    ///
    /// # Errors
    ///
    /// Returns error if the connection cannot be established.
    pub async fn connect(host: &str) -> Result<Self> {
        Ok(Self::new(WsTransport::open(host).await?))
    }
}

impl<T: Transport> Client<T> {
    /// Wraps an already-open transport. The session starts in
    /// [`SessionState::Connected`].
    pub fn new(transport: T) -> Self {
        let transport = Arc::new(transport);
        let sink = CommandSink::new(Arc::clone(&transport));
        Self {
            transport,
            sink,
            home: Home::empty(),
            session: SessionState::Connected,
        }
    }

    /// Returns the current session state.
    #[must_use]
    pub fn session(&self) -> SessionState {
        self.session
    }

    /// Returns a cloneable handle for issuing raw commands, usable from
    /// other tasks while this client runs its dispatch loop.
    #[must_use]
    pub fn sink(&self) -> CommandSink<T> {
        self.sink.clone()
    }

    /// Authenticates the session.
    ///
    /// Sends the credentials and waits for the server's verdict. This is
    /// the only call that reads a frame outside the dispatch loop; the
    /// server sends nothing unsolicited before authentication, so the
    /// next frame is always the login reply.
    ///
    /// Returns `Ok(false)` when the server rejects the credentials or
    /// replies with anything other than a well-formed login
    /// acknowledgement; the session stays [`SessionState::Connected`]
    /// and login can be retried.
    ///
    /// # Errors
    ///
    /// Returns error if the session is not freshly connected or the
    /// transport fails.
    pub async fn login(&mut self, username: &str, password: &str) -> Result<bool> {
        if self.session != SessionState::Connected {
            return Err(Error::Session(self.session));
        }
        self.send(&Request::login(username, password)).await?;

        let raw = self.recv().await?;
        let frame: Frame = match serde_json::from_str(&raw) {
            Ok(frame) => frame,
            Err(e) => {
                warn!(error = %e, "undecodable login reply");
                return Ok(false);
            }
        };
        if frame.msg != "login" {
            warn!(msg = %frame.msg, "expected login reply");
            return Ok(false);
        }
        let Ok(ack) = serde_json::from_value::<AckData>(frame.data) else {
            warn!("login reply without verdict");
            return Ok(false);
        };
        if ack.is_success() {
            info!("authenticated");
            self.session = SessionState::Authenticated;
            Ok(true)
        } else {
            warn!("login rejected by server");
            Ok(false)
        }
    }

    /// Requests a fresh topology snapshot.
    ///
    /// The reply arrives through [`Client::dispatch_next`], which swaps
    /// the topology wholesale when it lands. Call once after login, or
    /// any time the server-side configuration may have changed.
    ///
    /// # Errors
    ///
    /// Returns error if the session is not authenticated or the send
    /// fails.
    pub async fn reload_home(&mut self) -> Result<()> {
        if !matches!(
            self.session,
            SessionState::Authenticated | SessionState::Streaming
        ) {
            return Err(Error::Session(self.session));
        }
        self.send(&Request::GetHome).await
    }

    /// Reads and applies the next inbound frame.
    ///
    /// Returns `Ok(Some(event))` when the frame carried a state change
    /// for a known item and the value actually changed. All other frames
    /// resolve to `Ok(None)`: topology snapshots (applied), command
    /// acknowledgements (logged), events that do not change the stored
    /// value, events for unknown items, and undecodable frames. Broken
    /// frames are logged and dropped rather than tearing the session
    /// down; only transport failure is fatal.
    ///
    /// # Errors
    ///
    /// Returns error if the transport fails or the session is closed;
    /// the session is then [`SessionState::Closed`].
    pub async fn dispatch_next(&mut self) -> Result<Option<StateEvent>> {
        if self.session == SessionState::Closed {
            return Err(Error::Session(SessionState::Closed));
        }
        let raw = self.recv().await?;
        let frame: Frame = match serde_json::from_str(&raw) {
            Ok(frame) => frame,
            Err(e) => {
                warn!(error = %e, "dropping undecodable frame");
                return Ok(None);
            }
        };

        match frame.msg.as_str() {
            "get_home" => {
                match serde_json::from_value::<HomeData>(frame.data) {
                    Ok(payload) => {
                        self.home = Home::build(payload, &self.sink);
                        info!(
                            rooms = self.home.rooms().len(),
                            items = self.home.item_count(),
                            "topology loaded"
                        );
                        if self.session == SessionState::Authenticated {
                            self.session = SessionState::Streaming;
                        }
                    }
                    Err(e) => warn!(error = %e, "dropping malformed topology snapshot"),
                }
                Ok(None)
            }
            "set_state" => {
                match serde_json::from_value::<AckData>(frame.data) {
                    Ok(ack) if ack.is_success() => debug!("command acknowledged"),
                    Ok(_) => warn!("command rejected by server"),
                    Err(e) => warn!(error = %e, "dropping malformed command acknowledgement"),
                }
                Ok(None)
            }
            "event" => Ok(self.apply_event(frame.data)),
            other => {
                debug!(msg = other, "ignoring frame");
                Ok(None)
            }
        }
    }

    fn apply_event(&mut self, data: serde_json::Value) -> Option<StateEvent> {
        let change = match serde_json::from_value::<EventData>(data) {
            Ok(event) => event.data,
            Err(e) => {
                warn!(error = %e, "dropping malformed event");
                return None;
            }
        };
        let Some(item) = self.home.item_mut(&change.id) else {
            debug!(id = %change.id, "event for unknown item");
            return None;
        };
        let kind = item.kind().clone();
        let state = match kind.translate(&change.state) {
            Ok(state) => state,
            Err(e) => {
                warn!(id = %change.id, kind = %kind, error = %e, "dropping untranslatable event");
                return None;
            }
        };
        if &state == item.state() {
            debug!(id = %change.id, "event did not change state");
            return None;
        }
        debug!(id = %change.id, state = %state, "state changed");
        item.set_state_internal(state.clone());
        Some(StateEvent {
            id: change.id,
            name: item.name().to_owned(),
            kind,
            state,
        })
    }

    /// Returns the current topology. Empty until the first snapshot has
    /// been dispatched.
    #[must_use]
    pub fn home(&self) -> &Home<T> {
        &self.home
    }

    /// Returns the rooms of the current topology.
    #[must_use]
    pub fn rooms(&self) -> &[Room<T>] {
        self.home.rooms()
    }

    /// Looks up an item by ID.
    #[must_use]
    pub fn item(&self, id: &str) -> Option<&Item<T>> {
        self.home.item(id)
    }

    /// Looks up an item by ID for issuing commands.
    #[must_use]
    pub fn item_mut(&mut self, id: &str) -> Option<&mut Item<T>> {
        self.home.item_mut(id)
    }

    /// Returns all items of one type tag, across rooms.
    #[must_use]
    pub fn items_of_kind(&self, tag: &str) -> Vec<&Item<T>> {
        self.home.items_of_kind(tag)
    }

    /// Returns the distinct type tags present in the topology, sorted.
    #[must_use]
    pub fn kinds(&self) -> Vec<&str> {
        self.home.kinds()
    }

    async fn send(&mut self, request: &Request) -> Result<()> {
        let text = serde_json::to_string(request).map_err(ParseError::Json)?;
        if let Err(e) = self.transport.send(text).await {
            self.session = SessionState::Closed;
            return Err(Error::Protocol(e));
        }
        Ok(())
    }

    async fn recv(&mut self) -> Result<String> {
        match self.transport.recv().await {
            Ok(raw) => Ok(raw),
            Err(e) => {
                self.session = SessionState::Closed;
                Err(Error::Protocol(e))
            }
        }
    }
}
