// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Wire envelope types.
//!
//! Every message exchanged with the server is a JSON object with a `msg`
//! discriminator and a `data` payload whose schema depends on the
//! discriminator. Inbound frames are decoded in two stages: first the
//! discriminator with the payload kept raw, then the payload once the
//! kind is known. Unknown kinds and malformed payloads therefore stay
//! droppable instead of failing the whole decode.

use serde::{Deserialize, Serialize};

/// An outbound message.
///
/// # Examples
///
/// ```
/// use calor_lib::protocol::Request;
///
/// let req = Request::login("user", "secret");
/// let json = serde_json::to_string(&req).unwrap();
/// assert_eq!(
///     json,
///     r#"{"msg":"login","data":{"cn_user":"user","cn_pass":"secret"}}"#
/// );
///
/// assert_eq!(
///     serde_json::to_string(&Request::GetHome).unwrap(),
///     r#"{"msg":"get_home"}"#
/// );
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "msg", rename_all = "snake_case")]
pub enum Request {
    /// Authenticate the session.
    Login {
        /// Credential payload.
        data: LoginData,
    },
    /// Request a full topology snapshot. The reply arrives asynchronously
    /// through the dispatch loop.
    GetHome,
    /// Send a raw command to one item.
    SetState {
        /// Command payload.
        data: SetStateData,
    },
}

impl Request {
    /// Builds a login request.
    #[must_use]
    pub fn login(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self::Login {
            data: LoginData {
                cn_user: username.into(),
                cn_pass: password.into(),
            },
        }
    }

    /// Builds a `set_state` command request.
    #[must_use]
    pub fn set_state(id: impl Into<String>, value: impl Into<String>) -> Self {
        Self::SetState {
            data: SetStateData {
                id: id.into(),
                value: value.into(),
            },
        }
    }
}

/// Credentials carried by a login request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LoginData {
    /// Username.
    pub cn_user: String,
    /// Password.
    pub cn_pass: String,
}

/// Payload of an outbound `set_state` command.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SetStateData {
    /// Target item ID.
    pub id: String,
    /// Raw command string.
    pub value: String,
}

/// An inbound frame, decoded only as far as its discriminator.
#[derive(Debug, Clone, Deserialize)]
pub struct Frame {
    /// The message kind: `login`, `get_home`, `set_state`, `event`, …
    pub msg: String,
    /// The raw payload, decoded per kind in a second stage.
    #[serde(default)]
    pub data: serde_json::Value,
}

/// Acknowledgement payload of inbound `login` and `set_state` replies.
///
/// Success is the literal string `"true"`; anything else is a failure.
#[derive(Debug, Clone, Deserialize)]
pub struct AckData {
    /// `"true"` on success.
    pub success: String,
}

impl AckData {
    /// Returns `true` iff the server reported success.
    #[must_use]
    pub fn is_success(&self) -> bool {
        self.success == "true"
    }
}

/// Payload of an inbound `get_home` topology snapshot.
#[derive(Debug, Clone, Deserialize)]
pub struct HomeData {
    /// Rooms in server-supplied order.
    pub home: Vec<RoomData>,
}

/// One room record in a topology snapshot.
#[derive(Debug, Clone, Deserialize)]
pub struct RoomData {
    /// Room name.
    pub name: String,
    /// Free-form room category.
    #[serde(rename = "type")]
    pub kind: String,
    /// Item records in server-supplied order.
    #[serde(default)]
    pub items: Vec<ItemData>,
}

/// One item record in a topology snapshot.
///
/// The server sends more fields than these (GPIO mapping, IO config);
/// they are irrelevant to the client and ignored.
#[derive(Debug, Clone, Deserialize)]
pub struct ItemData {
    /// Server-assigned item ID, stable for the session.
    pub id: String,
    /// Item type tag.
    #[serde(rename = "type")]
    pub kind: String,
    /// Human-readable name.
    #[serde(default)]
    pub name: String,
    /// Initial raw state.
    #[serde(default)]
    pub state: String,
}

/// Payload of an inbound `event` notification.
///
/// The server nests the actual change one level down.
#[derive(Debug, Clone, Deserialize)]
pub struct EventData {
    /// The state change record.
    pub data: EventChange,
}

/// The state change carried by an event.
#[derive(Debug, Clone, Deserialize)]
pub struct EventChange {
    /// ID of the item that changed.
    pub id: String,
    /// New raw state string.
    pub state: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn login_request_wire_format() {
        let req = Request::login("u", "p");
        assert_eq!(
            serde_json::to_string(&req).unwrap(),
            r#"{"msg":"login","data":{"cn_user":"u","cn_pass":"p"}}"#
        );
    }

    #[test]
    fn get_home_request_wire_format() {
        assert_eq!(
            serde_json::to_string(&Request::GetHome).unwrap(),
            r#"{"msg":"get_home"}"#
        );
    }

    #[test]
    fn set_state_request_wire_format() {
        let req = Request::set_state("output_12", "set 75");
        assert_eq!(
            serde_json::to_string(&req).unwrap(),
            r#"{"msg":"set_state","data":{"id":"output_12","value":"set 75"}}"#
        );
    }

    #[test]
    fn frame_decodes_discriminator_only() {
        let frame: Frame =
            serde_json::from_str(r#"{"msg":"event","data":{"data":{"id":"x","state":"true"}}}"#)
                .unwrap();
        assert_eq!(frame.msg, "event");
        let event: EventData = serde_json::from_value(frame.data).unwrap();
        assert_eq!(event.data.id, "x");
        assert_eq!(event.data.state, "true");
    }

    #[test]
    fn frame_without_data() {
        let frame: Frame = serde_json::from_str(r#"{"msg":"ping"}"#).unwrap();
        assert_eq!(frame.msg, "ping");
        assert!(frame.data.is_null());
    }

    #[test]
    fn ack_success_is_literal_true() {
        let ack: AckData = serde_json::from_str(r#"{"success":"true"}"#).unwrap();
        assert!(ack.is_success());
        let ack: AckData = serde_json::from_str(r#"{"success":"True"}"#).unwrap();
        assert!(!ack.is_success());
        let ack: AckData = serde_json::from_str(r#"{"success":"false"}"#).unwrap();
        assert!(!ack.is_success());
    }

    #[test]
    fn home_payload_decodes() {
        let json = r#"{
            "home": [
                {
                    "name": "Living room",
                    "type": "living",
                    "items": [
                        {"id": "o1", "type": "OutputLight", "name": "Ceiling",
                         "state": "false", "gui_type": "light", "io_type": "output"}
                    ]
                },
                {"name": "Cellar", "type": "misc"}
            ]
        }"#;
        let home: HomeData = serde_json::from_str(json).unwrap();
        assert_eq!(home.home.len(), 2);
        assert_eq!(home.home[0].items.len(), 1);
        assert_eq!(home.home[0].items[0].kind, "OutputLight");
        assert!(home.home[1].items.is_empty());
    }
}
