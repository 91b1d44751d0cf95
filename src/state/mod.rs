// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Translated item state.
//!
//! Every item carries the last value produced by its type's translation
//! function. The shape of that value depends on the item type: lights are
//! booleans, dimmers are clamped percentages, sensors are floats, smart
//! shutters are an action/position record.

mod kind;

pub use kind::ItemKind;

use std::fmt;

use crate::types::{Percent, PressAction, ShutterState, TripleClick};

/// The translated state of an item.
///
/// # Examples
///
/// ```
/// use calor_lib::state::{ItemKind, ItemState};
///
/// let kind = ItemKind::from_tag("OutputLightDimmer");
/// assert_eq!(
///     kind.translate("150").unwrap(),
///     ItemState::Percent(calor_lib::types::Percent::MAX)
/// );
/// ```
#[derive(Debug, Clone, PartialEq)]
pub enum ItemState {
    /// Boolean state (switches, lights, scenarios, timers).
    Bool(bool),
    /// Integer state (internal registers).
    Int(i64),
    /// Floating point state (analog and temperature sensors).
    Float(f64),
    /// Clamped percentage state (dimmers).
    Percent(Percent),
    /// Raw text state (string items and unknown types).
    Text(String),
    /// Long-press switch state.
    Press(PressAction),
    /// Triple-click switch state.
    Triple(TripleClick),
    /// Smart shutter state (action + position).
    Shutter(ShutterState),
}

impl fmt::Display for ItemState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Bool(v) => write!(f, "{v}"),
            Self::Int(v) => write!(f, "{v}"),
            Self::Float(v) => write!(f, "{v}"),
            Self::Percent(v) => write!(f, "{v}"),
            Self::Text(v) => write!(f, "{v}"),
            Self::Press(v) => write!(f, "{v:?}"),
            Self::Triple(v) => write!(f, "{v:?}"),
            Self::Shutter(v) => write!(f, "{v}"),
        }
    }
}
