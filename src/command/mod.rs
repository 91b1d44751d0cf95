// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Calaos command definitions.
//!
//! This module provides typed representations of the raw strings sent to
//! the server in `set_state` messages. Commands never talk to the network
//! themselves; [`Item`](crate::home::Item) methods build them, serialize
//! them via [`Command::raw`] and hand them to the command sink.
//!
//! # Available Commands
//!
//! | Command Type | Item types | Example raw string |
//! |-------------|------------|--------------------|
//! | [`SwitchCommand`] | lights, booleans, scenarios | `true`, `toggle` |
//! | [`DimmerCommand`] | dimmable lights | `set 75`, `hold press` |
//! | [`ShutterCommand`] | basic shutters | `up`, `stop` |
//! | [`SmartShutterCommand`] | position-aware shutters | `impulse up 500` |
//! | [`RegisterCommand`] | internal integers | `inc 5`, `dec` |
//! | [`TextCommand`] | internal strings | the new text itself |
//! | [`TimerCommand`] | timers | `start`, `0:5:30:0` |
//!
//! # Examples
//!
//! ```
//! use calor_lib::command::{Command, DimmerCommand, RegisterCommand};
//! use calor_lib::types::Percent;
//!
//! let cmd = DimmerCommand::Set(Percent::clamped_target(150));
//! assert_eq!(cmd.raw(), "set 100");
//!
//! // A zero step means "default step": the suffix is omitted entirely
//! assert_eq!(RegisterCommand::Inc(0).raw(), "inc");
//! assert_eq!(RegisterCommand::Inc(5).raw(), "inc 5");
//! ```

mod dimmer;
mod register;
mod shutter;
mod switch;

pub use dimmer::DimmerCommand;
pub use register::{RegisterCommand, TextCommand, TimerCommand};
pub use shutter::{ShutterCommand, SmartShutterCommand};
pub use switch::SwitchCommand;

/// A command that can be sent to a Calaos item.
///
/// Commands serialize to the raw string carried in the `value` field of an
/// outbound `set_state` message.
pub trait Command {
    /// Returns the raw `set_state` value string.
    fn raw(&self) -> String;
}

/// Joins an impulse step pattern into the wire form.
///
/// An empty pattern produces the bare `"impulse"` opcode.
fn impulse_raw(pattern: &[u32]) -> String {
    let mut cmd = String::from("impulse");
    for step in pattern {
        cmd.push(' ');
        cmd.push_str(&step.to_string());
    }
    cmd
}
