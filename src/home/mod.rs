// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Home topology.
//!
//! A [`Home`] is the full set of rooms and items for the current session.
//! It owns every [`Item`] exclusively and keeps two derived indexes: item
//! ID to item (for event routing) and type tag to items (for bulk
//! queries). A topology is built wholesale from a `get_home` snapshot and
//! swapped into the client in one assignment, so concurrent queries never
//! observe a half-populated topology.

mod item;

pub use item::Item;

use std::collections::HashMap;

use crate::protocol::{CommandSink, HomeData, Transport};
use crate::state::{ItemKind, ItemState};

/// Location of an item inside the room list.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct ItemAddr {
    room: usize,
    item: usize,
}

/// A named, typed grouping of items.
///
/// Rooms are pure containers: they are created once per topology load,
/// replaced wholesale on reload and never partially mutated.
#[derive(Debug)]
pub struct Room<T: Transport> {
    name: String,
    kind: String,
    items: Vec<Item<T>>,
}

impl<T: Transport> Room<T> {
    /// Returns the room name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the free-form room category.
    #[must_use]
    pub fn kind(&self) -> &str {
        &self.kind
    }

    /// Returns the items in server-supplied order.
    #[must_use]
    pub fn items(&self) -> &[Item<T>] {
        &self.items
    }
}

/// The full room and item topology for one session.
#[derive(Debug)]
pub struct Home<T: Transport> {
    rooms: Vec<Room<T>>,
    by_id: HashMap<String, ItemAddr>,
    by_kind: HashMap<String, Vec<ItemAddr>>,
}

impl<T: Transport> Home<T> {
    /// An empty topology, used until the first `get_home` snapshot.
    pub(crate) fn empty() -> Self {
        Self {
            rooms: Vec::new(),
            by_id: HashMap::new(),
            by_kind: HashMap::new(),
        }
    }

    /// Builds a topology from a `get_home` snapshot.
    ///
    /// Item type tags are resolved through [`ItemKind::from_tag`];
    /// unknown tags keep the raw state and accept no commands. A
    /// malformed initial state is logged and kept raw rather than
    /// failing the whole load. Duplicate IDs keep the later occurrence
    /// in the ID index while both items stay reachable via their rooms.
    pub(crate) fn build(payload: HomeData, sink: &CommandSink<T>) -> Self {
        let mut rooms = Vec::with_capacity(payload.home.len());
        let mut by_id = HashMap::new();
        let mut by_kind: HashMap<String, Vec<ItemAddr>> = HashMap::new();

        for (room_idx, room_data) in payload.home.into_iter().enumerate() {
            let mut items = Vec::with_capacity(room_data.items.len());
            for (item_idx, item_data) in room_data.items.into_iter().enumerate() {
                let kind = ItemKind::from_tag(&item_data.kind);
                let state = match kind.translate(&item_data.state) {
                    Ok(state) => state,
                    Err(e) => {
                        tracing::warn!(
                            id = %item_data.id,
                            kind = %kind,
                            error = %e,
                            "malformed initial state, keeping raw value"
                        );
                        ItemState::Text(item_data.state.clone())
                    }
                };

                let addr = ItemAddr {
                    room: room_idx,
                    item: item_idx,
                };
                if let Some(previous) = by_id.insert(item_data.id.clone(), addr) {
                    let previous_room = rooms
                        .get(previous.room)
                        .map_or(room_data.name.as_str(), Room::<T>::name);
                    tracing::warn!(
                        id = %item_data.id,
                        previous_room,
                        room = %room_data.name,
                        "duplicate item id, later occurrence wins in the id index"
                    );
                }
                by_kind.entry(item_data.kind).or_default().push(addr);

                items.push(Item::new(
                    item_data.id,
                    item_data.name,
                    kind,
                    room_data.name.clone(),
                    state,
                    sink.clone(),
                ));
            }
            rooms.push(Room {
                name: room_data.name,
                kind: room_data.kind,
                items,
            });
        }

        let home = Self {
            rooms,
            by_id,
            by_kind,
        };
        tracing::debug!(
            rooms = home.rooms.len(),
            items = home.item_count(),
            "topology built"
        );
        home
    }

    /// Returns the rooms in server-supplied order.
    #[must_use]
    pub fn rooms(&self) -> &[Room<T>] {
        &self.rooms
    }

    /// Looks up an item by its ID.
    #[must_use]
    pub fn item(&self, id: &str) -> Option<&Item<T>> {
        let addr = self.by_id.get(id)?;
        Some(&self.rooms[addr.room].items[addr.item])
    }

    /// Looks up an item by its ID for mutation or command issuance.
    #[must_use]
    pub fn item_mut(&mut self, id: &str) -> Option<&mut Item<T>> {
        let addr = *self.by_id.get(id)?;
        Some(&mut self.rooms[addr.room].items[addr.item])
    }

    /// Returns all items of one type tag, in topology order.
    #[must_use]
    pub fn items_of_kind(&self, tag: &str) -> Vec<&Item<T>> {
        self.by_kind.get(tag).map_or_else(Vec::new, |addrs| {
            addrs
                .iter()
                .map(|addr| &self.rooms[addr.room].items[addr.item])
                .collect()
        })
    }

    /// Returns the type tags currently in use, sorted.
    #[must_use]
    pub fn kinds(&self) -> Vec<&str> {
        let mut kinds: Vec<&str> = self.by_kind.keys().map(String::as_str).collect();
        kinds.sort_unstable();
        kinds
    }

    /// Returns the total number of items across all rooms.
    #[must_use]
    pub fn item_count(&self) -> usize {
        self.rooms.iter().map(|room| room.items.len()).sum()
    }

    /// Returns `true` if no topology has been loaded yet.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rooms.is_empty()
    }
}
