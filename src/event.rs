// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! State change events emitted by the dispatch loop.

use crate::state::{ItemKind, ItemState};

/// A state change for one item.
///
/// Emitted by [`Client::dispatch_next`](crate::Client::dispatch_next)
/// when an inbound event actually changed an item's translated state.
/// Events whose translated value equals the current state produce
/// nothing. Not persisted; consumed per dispatch cycle.
#[derive(Debug, Clone, PartialEq)]
pub struct StateEvent {
    /// ID of the item that changed.
    pub id: String,
    /// Human-readable item name.
    pub name: String,
    /// The item's type.
    pub kind: ItemKind,
    /// The new translated state.
    pub state: ItemState,
}
