// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Dimmable light commands.

use crate::command::{Command, impulse_raw};
use crate::types::Percent;

/// Command for dimmable lights.
///
/// Explicit brightness targets are clamped into [1, 100] at construction
/// ([`Percent::clamped_target`]); brightness 0 is expressed as the `Off`
/// command, never as an explicit target.
///
/// # Examples
///
/// ```
/// use calor_lib::command::{Command, DimmerCommand};
/// use calor_lib::types::Percent;
///
/// let cmd = DimmerCommand::Set(Percent::clamped_target(75));
/// assert_eq!(cmd.raw(), "set 75");
///
/// assert_eq!(DimmerCommand::HoldPress.raw(), "hold press");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DimmerCommand {
    /// Turn on at the previous brightness.
    On,
    /// Turn off.
    Off,
    /// Invert the current on/off state.
    Toggle,
    /// Set the brightness to an explicit target.
    Set(Percent),
    /// Store the brightness to use at the next turn-on.
    SetOff(Percent),
    /// Raise the brightness; the effective magnitude is decided server-side.
    Up(Percent),
    /// Lower the brightness; the effective magnitude is decided server-side.
    Down(Percent),
    /// Begin a press-and-hold brightness ramp.
    HoldPress,
    /// End a press-and-hold brightness ramp.
    HoldStop,
    /// Run an on/off pattern; each step is a duration in milliseconds.
    Impulse(Vec<u32>),
}

impl Command for DimmerCommand {
    fn raw(&self) -> String {
        match self {
            Self::On => "true".to_string(),
            Self::Off => "false".to_string(),
            Self::Toggle => "toggle".to_string(),
            Self::Set(value) => format!("set {}", value.value()),
            Self::SetOff(value) => format!("set off {}", value.value()),
            Self::Up(value) => format!("up {}", value.value()),
            Self::Down(value) => format!("down {}", value.value()),
            Self::HoldPress => "hold press".to_string(),
            Self::HoldStop => "hold stop".to_string(),
            Self::Impulse(pattern) => impulse_raw(pattern),
        }
    }
}
