// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Shutter motion types.
//!
//! Position-aware ("smart") shutters report their state as an action word
//! followed by a position, e.g. `"up 30"`. This module provides the action
//! enumeration and the combined state record.

use std::fmt;
use std::str::FromStr;

use crate::error::ValueError;

/// Motion currently performed by a smart shutter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ShutterAction {
    /// The shutter is not moving.
    #[default]
    Stationary,
    /// The shutter is opening.
    Up,
    /// The shutter is closing.
    Down,
    /// The shutter was stopped mid-motion.
    Stop,
    /// The shutter is running a calibration cycle.
    Calibrate,
}

impl ShutterAction {
    /// Returns the Calaos wire representation.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Stationary => "",
            Self::Up => "up",
            Self::Down => "down",
            Self::Stop => "stop",
            Self::Calibrate => "calibrate",
        }
    }
}

impl fmt::Display for ShutterAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for ShutterAction {
    type Err = ValueError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "" => Ok(Self::Stationary),
            "up" => Ok(Self::Up),
            "down" => Ok(Self::Down),
            "stop" => Ok(Self::Stop),
            "calibrate" => Ok(Self::Calibrate),
            _ => Err(ValueError::InvalidShutterAction(s.to_string())),
        }
    }
}

/// Combined state of a position-aware shutter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct ShutterState {
    /// The motion currently performed.
    pub action: ShutterAction,
    /// The reported position (0 = closed, 100 = open, as sent by the
    /// server, not clamped).
    pub position: i64,
}

impl fmt::Display for ShutterState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} at {}", self.action.as_str(), self.position)
    }
}
