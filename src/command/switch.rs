// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! On/off style commands.

use crate::command::{Command, impulse_raw};

/// Command for boolean outputs: lights, internal booleans and scenarios.
///
/// # Examples
///
/// ```
/// use calor_lib::command::{Command, SwitchCommand};
///
/// assert_eq!(SwitchCommand::On.raw(), "true");
/// assert_eq!(SwitchCommand::Off.raw(), "false");
/// assert_eq!(SwitchCommand::Toggle.raw(), "toggle");
/// assert_eq!(
///     SwitchCommand::Impulse(vec![500, 200]).raw(),
///     "impulse 500 200"
/// );
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SwitchCommand {
    /// Turn the output on.
    On,
    /// Turn the output off.
    Off,
    /// Invert the current state. The outcome is only known from the next
    /// event, so callers must not update local state on send.
    Toggle,
    /// Run an on/off pattern; each step is a duration in milliseconds.
    Impulse(Vec<u32>),
}

impl Command for SwitchCommand {
    fn raw(&self) -> String {
        match self {
            Self::On => "true".to_string(),
            Self::Off => "false".to_string(),
            Self::Toggle => "toggle".to_string(),
            Self::Impulse(pattern) => impulse_raw(pattern),
        }
    }
}
