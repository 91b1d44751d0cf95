// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Item type registry.
//!
//! The Calaos server identifies every item by a type tag. Each tag maps to
//! an [`ItemKind`], which carries the type's state translation rule and
//! decides which commands an item accepts. Tags the library does not know
//! still produce a usable item: the raw state is kept as-is and no
//! type-specific commands are offered, since new server firmware may ship
//! new types at any time.

use std::fmt;

use crate::error::ParseError;
use crate::state::ItemState;
use crate::types::{Percent, PressAction, ShutterAction, ShutterState, TripleClick};

/// The type of a Calaos item.
///
/// Variant names follow the Calaos wire tags. [`ItemKind::Unknown`] keeps
/// the original tag around for diagnostics and type-index queries.
///
/// # Examples
///
/// ```
/// use calor_lib::state::{ItemKind, ItemState};
///
/// let kind = ItemKind::from_tag("InputSwitch");
/// assert_eq!(kind, ItemKind::InputSwitch);
/// assert_eq!(kind.translate("true").unwrap(), ItemState::Bool(true));
///
/// let unknown = ItemKind::from_tag("FutureGadget");
/// assert_eq!(unknown.tag(), "FutureGadget");
/// assert_eq!(
///     unknown.translate("whatever").unwrap(),
///     ItemState::Text("whatever".to_string())
/// );
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ItemKind {
    /// Time range condition (boolean).
    InPlageHoraire,
    /// Analog sensor (float).
    InputAnalog,
    /// String input (raw text).
    InputString,
    /// Simple switch (boolean).
    InputSwitch,
    /// Switch with long-press detection.
    InputSwitchLongPress,
    /// Switch with multi-click detection.
    InputSwitchTriple,
    /// Temperature sensor (float).
    InputTemp,
    /// Time condition (boolean).
    InputTime,
    /// Countdown timer (boolean, with start/stop/reset commands).
    InputTimer,
    /// Internal boolean register.
    InternalBool,
    /// Internal integer register.
    InternalInt,
    /// Internal string register.
    InternalString,
    /// Light relay (boolean).
    OutputLight,
    /// Dimmable light (percentage).
    OutputLightDimmer,
    /// Basic shutter (boolean, no position feedback).
    OutputShutter,
    /// Position-aware shutter (action + position).
    OutputShutterSmart,
    /// Scenario trigger (boolean).
    Scenario,
    /// A type tag this library does not know.
    Unknown(String),
}

impl ItemKind {
    /// Resolves a Calaos type tag.
    ///
    /// Unknown tags are preserved in [`ItemKind::Unknown`] rather than
    /// rejected.
    #[must_use]
    pub fn from_tag(tag: &str) -> Self {
        match tag {
            "InPlageHoraire" => Self::InPlageHoraire,
            "InputAnalog" => Self::InputAnalog,
            "InputString" => Self::InputString,
            "InputSwitch" => Self::InputSwitch,
            "InputSwitchLongPress" => Self::InputSwitchLongPress,
            "InputSwitchTriple" => Self::InputSwitchTriple,
            "InputTemp" => Self::InputTemp,
            "InputTime" => Self::InputTime,
            "InputTimer" => Self::InputTimer,
            "InternalBool" => Self::InternalBool,
            "InternalInt" => Self::InternalInt,
            "InternalString" => Self::InternalString,
            "OutputLight" => Self::OutputLight,
            "OutputLightDimmer" => Self::OutputLightDimmer,
            "OutputShutter" => Self::OutputShutter,
            "OutputShutterSmart" => Self::OutputShutterSmart,
            "Scenario" => Self::Scenario,
            other => Self::Unknown(other.to_string()),
        }
    }

    /// Returns the Calaos type tag.
    #[must_use]
    pub fn tag(&self) -> &str {
        match self {
            Self::InPlageHoraire => "InPlageHoraire",
            Self::InputAnalog => "InputAnalog",
            Self::InputString => "InputString",
            Self::InputSwitch => "InputSwitch",
            Self::InputSwitchLongPress => "InputSwitchLongPress",
            Self::InputSwitchTriple => "InputSwitchTriple",
            Self::InputTemp => "InputTemp",
            Self::InputTime => "InputTime",
            Self::InputTimer => "InputTimer",
            Self::InternalBool => "InternalBool",
            Self::InternalInt => "InternalInt",
            Self::InternalString => "InternalString",
            Self::OutputLight => "OutputLight",
            Self::OutputLightDimmer => "OutputLightDimmer",
            Self::OutputShutter => "OutputShutter",
            Self::OutputShutterSmart => "OutputShutterSmart",
            Self::Scenario => "Scenario",
            Self::Unknown(tag) => tag,
        }
    }

    /// Translates a raw state string into this type's state shape.
    ///
    /// Translation is pure: same input, same output, no side effects.
    /// Boolean types are `true` iff the raw string is the literal
    /// `"true"`. Numeric and enumerated types propagate malformed input
    /// as a [`ParseError`] instead of defaulting.
    ///
    /// # Errors
    ///
    /// Returns `ParseError` if a numeric state does not parse, an
    /// enumerated code is out of range, or a composite state has the
    /// wrong token count.
    pub fn translate(&self, raw: &str) -> Result<ItemState, ParseError> {
        match self {
            Self::InPlageHoraire
            | Self::InputSwitch
            | Self::InputTime
            | Self::InputTimer
            | Self::InternalBool
            | Self::OutputLight
            | Self::OutputShutter
            | Self::Scenario => Ok(ItemState::Bool(raw == "true")),

            Self::InputAnalog | Self::InputTemp => {
                Ok(ItemState::Float(parse_float(self.tag(), raw)?))
            }

            Self::InputSwitchLongPress => {
                let code = parse_int(self.tag(), raw)?;
                PressAction::from_code(code)
                    .map(ItemState::Press)
                    .ok_or_else(|| invalid_code(self.tag(), code))
            }

            Self::InputSwitchTriple => {
                let code = parse_int(self.tag(), raw)?;
                TripleClick::from_code(code)
                    .map(ItemState::Triple)
                    .ok_or_else(|| invalid_code(self.tag(), code))
            }

            Self::InternalInt => Ok(ItemState::Int(parse_int(self.tag(), raw)?)),

            Self::OutputLightDimmer => {
                let value = parse_int(self.tag(), raw)?;
                Ok(ItemState::Percent(Percent::clamped(value)))
            }

            Self::OutputShutterSmart => {
                let tokens: Vec<&str> = raw.split_whitespace().collect();
                let [action, position] = tokens.as_slice() else {
                    return Err(ParseError::UnexpectedFormat(format!(
                        "smart shutter state needs 2 tokens, got {}: {raw:?}",
                        tokens.len()
                    )));
                };
                let action: ShutterAction =
                    action.parse().map_err(|_| ParseError::InvalidValue {
                        field: self.tag().to_string(),
                        message: format!("unknown shutter action {action:?}"),
                    })?;
                let position = parse_int(self.tag(), position)?;
                Ok(ItemState::Shutter(ShutterState { action, position }))
            }

            Self::InputString | Self::InternalString | Self::Unknown(_) => {
                Ok(ItemState::Text(raw.to_string()))
            }
        }
    }
}

impl fmt::Display for ItemKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.tag())
    }
}

fn parse_int(field: &str, raw: &str) -> Result<i64, ParseError> {
    raw.parse().map_err(|_| ParseError::InvalidValue {
        field: field.to_string(),
        message: format!("expected integer, got {raw:?}"),
    })
}

fn parse_float(field: &str, raw: &str) -> Result<f64, ParseError> {
    raw.parse().map_err(|_| ParseError::InvalidValue {
        field: field.to_string(),
        message: format!("expected number, got {raw:?}"),
    })
}

fn invalid_code(field: &str, code: i64) -> ParseError {
    ParseError::InvalidValue {
        field: field.to_string(),
        message: format!("invalid state code {code}"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tag_round_trip() {
        for tag in [
            "InPlageHoraire",
            "InputAnalog",
            "InputString",
            "InputSwitch",
            "InputSwitchLongPress",
            "InputSwitchTriple",
            "InputTemp",
            "InputTime",
            "InputTimer",
            "InternalBool",
            "InternalInt",
            "InternalString",
            "OutputLight",
            "OutputLightDimmer",
            "OutputShutter",
            "OutputShutterSmart",
            "Scenario",
        ] {
            assert_eq!(ItemKind::from_tag(tag).tag(), tag);
        }
    }

    #[test]
    fn unknown_tag_is_preserved() {
        let kind = ItemKind::from_tag("SomeNewGadget");
        assert_eq!(kind, ItemKind::Unknown("SomeNewGadget".to_string()));
        assert_eq!(kind.tag(), "SomeNewGadget");
    }

    #[test]
    fn boolean_translation_is_literal_true() {
        let kind = ItemKind::OutputLight;
        assert_eq!(kind.translate("true").unwrap(), ItemState::Bool(true));
        assert_eq!(kind.translate("false").unwrap(), ItemState::Bool(false));
        // Anything that is not the literal "true" is false
        assert_eq!(kind.translate("True").unwrap(), ItemState::Bool(false));
        assert_eq!(kind.translate("1").unwrap(), ItemState::Bool(false));
    }

    #[test]
    fn float_translation() {
        assert_eq!(
            ItemKind::InputTemp.translate("21.5").unwrap(),
            ItemState::Float(21.5)
        );
        assert!(ItemKind::InputAnalog.translate("warm").is_err());
    }

    #[test]
    fn int_translation() {
        assert_eq!(
            ItemKind::InternalInt.translate("-3").unwrap(),
            ItemState::Int(-3)
        );
        assert!(ItemKind::InternalInt.translate("3.5").is_err());
    }

    #[test]
    fn dimmer_translation_clamps() {
        let kind = ItemKind::OutputLightDimmer;
        assert_eq!(
            kind.translate("150").unwrap(),
            ItemState::Percent(Percent::clamped(100))
        );
        assert_eq!(
            kind.translate("-5").unwrap(),
            ItemState::Percent(Percent::clamped(0))
        );
        assert_eq!(
            kind.translate("42").unwrap(),
            ItemState::Percent(Percent::clamped(42))
        );
        // Parse failure still propagates, clamping only applies afterwards
        assert!(kind.translate("bright").is_err());
    }

    #[test]
    fn press_translation() {
        let kind = ItemKind::InputSwitchLongPress;
        assert_eq!(
            kind.translate("2").unwrap(),
            ItemState::Press(PressAction::Long)
        );
        assert!(kind.translate("7").is_err());
        assert!(kind.translate("long").is_err());
    }

    #[test]
    fn triple_translation() {
        let kind = ItemKind::InputSwitchTriple;
        assert_eq!(
            kind.translate("3").unwrap(),
            ItemState::Triple(TripleClick::Triple)
        );
        assert!(kind.translate("4").is_err());
    }

    #[test]
    fn smart_shutter_translation() {
        let kind = ItemKind::OutputShutterSmart;
        assert_eq!(
            kind.translate("up 30").unwrap(),
            ItemState::Shutter(ShutterState {
                action: ShutterAction::Up,
                position: 30,
            })
        );
        assert!(kind.translate("up").is_err());
        assert!(kind.translate("up 30 45").is_err());
        assert!(kind.translate("sideways 30").is_err());
        assert!(kind.translate("up thirty").is_err());
    }

    #[test]
    fn string_translation_is_identity() {
        assert_eq!(
            ItemKind::InternalString.translate("hello world").unwrap(),
            ItemState::Text("hello world".to_string())
        );
    }

    #[test]
    fn unknown_translation_is_identity() {
        let kind = ItemKind::from_tag("FutureGadget");
        assert_eq!(
            kind.translate("37 qux").unwrap(),
            ItemState::Text("37 qux".to_string())
        );
    }

    #[test]
    fn translation_is_deterministic() {
        let kind = ItemKind::OutputLightDimmer;
        assert_eq!(kind.translate("80").unwrap(), kind.translate("80").unwrap());
    }
}
