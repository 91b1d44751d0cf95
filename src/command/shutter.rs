// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Shutter commands.
//!
//! Shutter commands never update local state optimistically: the final
//! position is only known from the next event.

use crate::command::Command;
use crate::types::Percent;

/// Command for basic shutters without position feedback.
///
/// # Examples
///
/// ```
/// use calor_lib::command::{Command, ShutterCommand};
///
/// assert_eq!(ShutterCommand::Up.raw(), "up");
/// assert_eq!(ShutterCommand::Stop.raw(), "stop");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShutterCommand {
    /// Open until stopped.
    Up,
    /// Close until stopped.
    Down,
    /// Stop the current motion.
    Stop,
    /// Invert the current motion.
    Toggle,
}

impl Command for ShutterCommand {
    fn raw(&self) -> String {
        match self {
            Self::Up => "up".to_string(),
            Self::Down => "down".to_string(),
            Self::Stop => "stop".to_string(),
            Self::Toggle => "toggle".to_string(),
        }
    }
}

/// Command for position-aware shutters.
///
/// `Up`/`Down` without a percentage move until stopped; with a percentage
/// they move by that amount. Explicit targets are clamped into [1, 100].
///
/// # Examples
///
/// ```
/// use calor_lib::command::{Command, SmartShutterCommand};
/// use calor_lib::types::Percent;
///
/// assert_eq!(SmartShutterCommand::Up(None).raw(), "up");
/// assert_eq!(
///     SmartShutterCommand::Up(Some(Percent::clamped_target(30))).raw(),
///     "up 30"
/// );
/// assert_eq!(SmartShutterCommand::ImpulseDown(500).raw(), "impulse down 500");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SmartShutterCommand {
    /// Open, either until stopped (`None`) or by a percentage.
    Up(Option<Percent>),
    /// Close, either until stopped (`None`) or by a percentage.
    Down(Option<Percent>),
    /// Move to an absolute position.
    Set(Percent),
    /// Stop the current motion.
    Stop,
    /// Invert the current motion.
    Toggle,
    /// Open for a duration in milliseconds.
    ImpulseUp(u32),
    /// Close for a duration in milliseconds.
    ImpulseDown(u32),
    /// Run a full calibration cycle.
    Calibrate,
}

impl Command for SmartShutterCommand {
    fn raw(&self) -> String {
        match self {
            Self::Up(None) => "up".to_string(),
            Self::Up(Some(value)) => format!("up {}", value.value()),
            Self::Down(None) => "down".to_string(),
            Self::Down(Some(value)) => format!("down {}", value.value()),
            Self::Set(value) => format!("set {}", value.value()),
            Self::Stop => "stop".to_string(),
            Self::Toggle => "toggle".to_string(),
            Self::ImpulseUp(duration) => format!("impulse up {duration}"),
            Self::ImpulseDown(duration) => format!("impulse down {duration}"),
            Self::Calibrate => "calibrate".to_string(),
        }
    }
}
