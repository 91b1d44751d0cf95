// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Percentage type for dimmer levels and shutter positions.
//!
//! This module provides a type-safe representation of percentage values,
//! ensuring values are always within the valid range of 0-100.

use std::fmt;

use crate::error::ValueError;

/// A percentage value (0-100).
///
/// Calaos reports dimmer brightness and shutter position as 0-100, where
/// 0 is off/closed and 100 is full brightness/open.
///
/// # Examples
///
/// ```
/// use calor_lib::types::Percent;
///
/// // Create a level at 75%
/// let level = Percent::new(75).unwrap();
/// assert_eq!(level.value(), 75);
///
/// // Use predefined values
/// assert_eq!(Percent::MIN.value(), 0);
/// assert_eq!(Percent::MAX.value(), 100);
///
/// // Invalid values return error
/// assert!(Percent::new(101).is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Percent(u8);

impl Percent {
    /// Minimum percentage value (0%).
    pub const MIN: Self = Self(0);

    /// Maximum percentage value (100%).
    pub const MAX: Self = Self(100);

    /// Creates a new percentage value.
    ///
    /// # Errors
    ///
    /// Returns `ValueError::OutOfRange` if value exceeds 100.
    pub fn new(value: u8) -> Result<Self, ValueError> {
        if value > 100 {
            return Err(ValueError::OutOfRange {
                min: 0,
                max: 100,
                actual: i64::from(value),
            });
        }
        Ok(Self(value))
    }

    /// Creates a percentage, clamping into [0, 100].
    ///
    /// This is the translation rule for received dimmer states: the server
    /// value is taken as-is and pulled back into range.
    ///
    /// # Examples
    ///
    /// ```
    /// use calor_lib::types::Percent;
    ///
    /// assert_eq!(Percent::clamped(150).value(), 100);
    /// assert_eq!(Percent::clamped(-5).value(), 0);
    /// assert_eq!(Percent::clamped(42).value(), 42);
    /// ```
    #[must_use]
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    pub const fn clamped(value: i64) -> Self {
        if value > 100 {
            Self(100)
        } else if value < 0 {
            Self(0)
        } else {
            // Safe: 0 <= value <= 100
            Self(value as u8)
        }
    }

    /// Creates an explicit command target, clamping into [1, 100].
    ///
    /// Zero is not a valid explicit target for dimmers and smart shutters.
    /// Turning a dimmer off goes through the `false` command instead.
    ///
    /// # Examples
    ///
    /// ```
    /// use calor_lib::types::Percent;
    ///
    /// assert_eq!(Percent::clamped_target(0).value(), 1);
    /// assert_eq!(Percent::clamped_target(150).value(), 100);
    /// ```
    #[must_use]
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    pub const fn clamped_target(value: i64) -> Self {
        if value > 100 {
            Self(100)
        } else if value < 1 {
            Self(1)
        } else {
            Self(value as u8)
        }
    }

    /// Returns the percentage value.
    #[must_use]
    pub const fn value(&self) -> u8 {
        self.0
    }

    /// Returns `true` if the value is 0.
    #[must_use]
    pub const fn is_zero(&self) -> bool {
        self.0 == 0
    }
}

impl fmt::Display for Percent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}%", self.0)
    }
}

impl TryFrom<u8> for Percent {
    type Error = ValueError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}
