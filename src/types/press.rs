// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Switch press pattern enumerations.
//!
//! Calaos reports long-press and multi-click switch states as small
//! integer codes. These enums give the codes names; unknown codes are a
//! translation error, not a silent default.

/// State reported by a long-press capable switch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum PressAction {
    /// No press in progress.
    #[default]
    None,
    /// A short press was registered.
    Short,
    /// A long press was registered.
    Long,
}

impl PressAction {
    /// Maps a Calaos state code to a press action.
    ///
    /// Returns `None` for codes outside 0-2.
    #[must_use]
    pub const fn from_code(code: i64) -> Option<Self> {
        match code {
            0 => Some(Self::None),
            1 => Some(Self::Short),
            2 => Some(Self::Long),
            _ => None,
        }
    }
}

/// State reported by a triple-click capable switch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum TripleClick {
    /// No click in progress.
    #[default]
    None,
    /// A single click was registered.
    Single,
    /// A double click was registered.
    Double,
    /// A triple click was registered.
    Triple,
}

impl TripleClick {
    /// Maps a Calaos state code to a click pattern.
    ///
    /// Returns `None` for codes outside 0-3.
    #[must_use]
    pub const fn from_code(code: i64) -> Option<Self> {
        match code {
            0 => Some(Self::None),
            1 => Some(Self::Single),
            2 => Some(Self::Double),
            3 => Some(Self::Triple),
            _ => None,
        }
    }
}
