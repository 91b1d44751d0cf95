// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Internal register and timer commands.

use crate::command::Command;

/// Command for internal integer registers.
///
/// The protocol has no "increment by exactly zero" opcode: a step of `0`
/// emits the bare `inc`/`dec` form, which asks the server to apply its
/// default step.
///
/// # Examples
///
/// ```
/// use calor_lib::command::{Command, RegisterCommand};
///
/// assert_eq!(RegisterCommand::Set(42).raw(), "42");
/// assert_eq!(RegisterCommand::Inc(0).raw(), "inc");
/// assert_eq!(RegisterCommand::Dec(3).raw(), "dec 3");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RegisterCommand {
    /// Set the register to an explicit value.
    Set(i64),
    /// Increment by a step; `0` means the server's default step.
    Inc(i64),
    /// Decrement by a step; `0` means the server's default step.
    Dec(i64),
}

impl Command for RegisterCommand {
    fn raw(&self) -> String {
        match self {
            Self::Set(value) => value.to_string(),
            Self::Inc(0) => "inc".to_string(),
            Self::Inc(step) => format!("inc {step}"),
            Self::Dec(0) => "dec".to_string(),
            Self::Dec(step) => format!("dec {step}"),
        }
    }
}

/// Command for internal string registers.
///
/// The raw command string is the new text itself, with no opcode prefix.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextCommand(pub String);

impl Command for TextCommand {
    fn raw(&self) -> String {
        self.0.clone()
    }
}

/// Command for countdown timers.
///
/// # Examples
///
/// ```
/// use calor_lib::command::{Command, TimerCommand};
///
/// assert_eq!(TimerCommand::Start.raw(), "start");
/// let reset = TimerCommand::Reset {
///     hours: 0,
///     minutes: 5,
///     seconds: 30,
///     milliseconds: 0,
/// };
/// assert_eq!(reset.raw(), "0:5:30:0");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimerCommand {
    /// Start the countdown.
    Start,
    /// Stop the countdown.
    Stop,
    /// Reprogram the countdown duration.
    Reset {
        /// Hours component.
        hours: u32,
        /// Minutes component.
        minutes: u32,
        /// Seconds component.
        seconds: u32,
        /// Milliseconds component.
        milliseconds: u32,
    },
}

impl Command for TimerCommand {
    fn raw(&self) -> String {
        match self {
            Self::Start => "start".to_string(),
            Self::Stop => "stop".to_string(),
            Self::Reset {
                hours,
                minutes,
                seconds,
                milliseconds,
            } => format!("{hours}:{minutes}:{seconds}:{milliseconds}"),
        }
    }
}
