// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! `CaloR` Lib - A Rust client library for the Calaos home automation server.
//!
//! This library speaks the Calaos WebSocket API: it connects to a hub,
//! authenticates, loads the room/item topology, then streams state change
//! events and lets you send commands back.
//!
//! # Supported Features
//!
//! - **Session lifecycle**: connect, login, topology load, event streaming
//! - **Typed states**: raw server strings translated per item type
//!   (booleans, temperatures, brightness percentages, button presses,
//!   shutter positions, …)
//! - **Typed commands**: lights, dimmers, shutters, integer and string
//!   registers, countdown timers, scenarios
//! - **Concurrent control**: a cloneable command sink usable from other
//!   tasks while the event loop runs
//!
//! Items whose type the library does not know are kept with their raw
//! state string, so a full topology is always available.
//!
//! # Quick Start
//!
//! ```no_run
//! use calor_lib::{Client, ItemState};
//!
//! #[tokio::main]
//! async fn main() -> calor_lib::Result<()> {
//!     let mut client = Client::connect("192.168.1.10").await?;
//!     if !client.login("user", "secret").await? {
//!         eprintln!("bad credentials");
//!         return Ok(());
//!     }
//!
//!     // Ask for the topology; it arrives through the dispatch loop.
//!     client.reload_home().await?;
//!
//!     loop {
//!         if let Some(event) = client.dispatch_next().await? {
//!             println!("[{}] {} -> {}", event.id, event.name, event.state);
//!
//!             // React to a wall switch by driving a light
//!             if event.id == "input_3" && event.state == ItemState::Bool(true) {
//!                 if let Some(light) = client.item_mut("output_7") {
//!                     light.turn_on().await?;
//!                 }
//!             }
//!         }
//!     }
//! }
//! ```

pub mod client;
pub mod command;
pub mod error;
mod event;
pub mod home;
pub mod protocol;
pub mod state;
pub mod types;

pub use client::{Client, SessionState};
pub use command::{
    Command, DimmerCommand, RegisterCommand, ShutterCommand, SmartShutterCommand, SwitchCommand,
    TextCommand, TimerCommand,
};
pub use error::{DeviceError, Error, ParseError, ProtocolError, Result, ValueError};
pub use event::StateEvent;
pub use home::{Home, Item, Room};
pub use protocol::{CommandSink, Transport, WsTransport};
pub use state::{ItemKind, ItemState};
pub use types::{Percent, PressAction, ShutterAction, ShutterState, TripleClick};
