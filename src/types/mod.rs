// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Value types used in item states and commands.
//!
//! These types give translated states a constrained, type-safe shape:
//! percentages are always within range, switch press patterns and shutter
//! actions are closed enumerations.

mod percent;
mod press;
mod shutter;

pub use percent::Percent;
pub use press::{PressAction, TripleClick};
pub use shutter::{ShutterAction, ShutterState};
