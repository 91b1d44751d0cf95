// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Error types for the `CaloR` library.
//!
//! This module provides the error hierarchy for failures across the
//! library: transport communication, envelope and state parsing, value
//! validation, and per-item command dispatch.

use thiserror::Error;

use crate::client::SessionState;

/// The main error type for this library.
///
/// This enum encompasses all possible errors that can occur when talking
/// to a Calaos server.
#[derive(Debug, Error)]
pub enum Error {
    /// Error occurred on the WebSocket transport.
    #[error("protocol error: {0}")]
    Protocol(#[from] ProtocolError),

    /// Error occurred while parsing a message or a state value.
    #[error("parse error: {0}")]
    Parse(#[from] ParseError),

    /// Error occurred during value validation.
    #[error("value error: {0}")]
    Value(#[from] ValueError),

    /// Error occurred while operating on an item.
    #[error("device error: {0}")]
    Device(#[from] DeviceError),

    /// An operation was attempted in the wrong session state.
    #[error("operation not valid in session state {0:?}")]
    Session(SessionState),
}

/// Errors related to the WebSocket transport.
#[derive(Debug, Error)]
pub enum ProtocolError {
    /// The underlying WebSocket operation failed.
    #[error("websocket error: {0}")]
    WebSocket(#[from] tokio_tungstenite::tungstenite::Error),

    /// The connection was closed by the peer.
    #[error("connection closed")]
    Closed,
}

/// Errors related to parsing Calaos messages and raw state strings.
#[derive(Debug, Error)]
pub enum ParseError {
    /// JSON parsing failed.
    #[error("JSON parse error: {0}")]
    Json(#[from] serde_json::Error),

    /// Expected field is missing from the message.
    #[error("missing field in message: {0}")]
    MissingField(String),

    /// Unexpected message or state format.
    #[error("unexpected format: {0}")]
    UnexpectedFormat(String),

    /// Failed to parse a specific value.
    #[error("failed to parse {field}: {message}")]
    InvalidValue {
        /// The field that failed to parse.
        field: String,
        /// Description of the parsing failure.
        message: String,
    },
}

/// Errors related to value validation and constraints.
///
/// These errors occur when attempting to create constrained types
/// with invalid values.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ValueError {
    /// A numeric value is outside the allowed range.
    #[error("value {actual} is out of range [{min}, {max}]")]
    OutOfRange {
        /// Minimum allowed value.
        min: i64,
        /// Maximum allowed value.
        max: i64,
        /// The actual value that was provided.
        actual: i64,
    },

    /// An invalid shutter action string was provided.
    #[error("invalid shutter action: {0:?}")]
    InvalidShutterAction(String),
}

/// Errors related to item operations.
#[derive(Debug, Error)]
pub enum DeviceError {
    /// The item's type does not support the requested command.
    #[error("item type {kind} does not support {command}")]
    UnsupportedCommand {
        /// The command that is not supported.
        command: &'static str,
        /// The item's type tag.
        kind: String,
    },
}

/// A specialized Result type for this library.
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn value_error_display() {
        let err = ValueError::OutOfRange {
            min: 0,
            max: 100,
            actual: 150,
        };
        assert_eq!(err.to_string(), "value 150 is out of range [0, 100]");
    }

    #[test]
    fn error_from_value_error() {
        let value_err = ValueError::InvalidShutterAction("sideways".to_string());
        let err: Error = value_err.into();
        assert!(matches!(
            err,
            Error::Value(ValueError::InvalidShutterAction(_))
        ));
    }

    #[test]
    fn parse_error_display() {
        let err = ParseError::MissingField("success".to_string());
        assert_eq!(err.to_string(), "missing field in message: success");
    }

    #[test]
    fn device_error_display() {
        let err = DeviceError::UnsupportedCommand {
            command: "toggle",
            kind: "InputTemp".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "item type InputTemp does not support toggle"
        );
    }

    #[test]
    fn session_error_display() {
        let err = Error::Session(SessionState::Streaming);
        assert_eq!(
            err.to_string(),
            "operation not valid in session state Streaming"
        );
    }
}
