//! Digit-editable geographic coordinates.
//!
//! A coordinate in centidegrees is decomposed into a sign and five decimal digits
//! (hundreds, tens, ones, tenths, hundredths) so it can be edited one digit at a
//! time with a single "increment" button. Increments that would push the value out
//! of the axis bounds are clamped, so a coordinate reached only through
//! [`EditableCoordinate::increment_digit`] is always a valid location component.

use serde::Serialize;

use crate::common::constants::{COORDINATE_DIGITS, MAXIMUM_LATITUDE_CENTI, MAXIMUM_LONGITUDE_CENTI};

/// Which half of a location a coordinate belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Axis {
    Latitude,
    Longitude,
}

impl Axis {
    /// Largest allowed magnitude in centidegrees.
    pub fn bound(self) -> i32 {
        match self {
            Axis::Latitude => MAXIMUM_LATITUDE_CENTI,
            Axis::Longitude => MAXIMUM_LONGITUDE_CENTI,
        }
    }

    /// Latitude never needs a hundreds digit (its maximum is 90.00).
    pub fn has_hundreds(self) -> bool {
        matches!(self, Axis::Longitude)
    }

    /// Clamp a centidegree value into the axis range.
    pub fn clamp(self, value: i32) -> i16 {
        // Bounds are at most 18000, well inside i16
        value.clamp(-self.bound(), self.bound()) as i16
    }
}

/// Editing position within a coordinate, in cursor order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Digit {
    Sign,
    Hundreds,
    Tens,
    Ones,
    Tenths,
    Hundredths,
}

impl Digit {
    /// Map a cursor index (0 = sign, 1 = hundreds .. 5 = hundredths).
    pub fn from_index(index: u8) -> Option<Self> {
        match index {
            0 => Some(Digit::Sign),
            1 => Some(Digit::Hundreds),
            2 => Some(Digit::Tens),
            3 => Some(Digit::Ones),
            4 => Some(Digit::Tenths),
            5 => Some(Digit::Hundredths),
            _ => None,
        }
    }

    /// Cursor index of this position.
    pub fn index(self) -> u8 {
        self as u8
    }

    // Position in the digit array, None for the sign
    fn slot(self) -> Option<usize> {
        match self {
            Digit::Sign => None,
            Digit::Hundreds => Some(0),
            Digit::Tens => Some(1),
            Digit::Ones => Some(2),
            Digit::Tenths => Some(3),
            Digit::Hundredths => Some(4),
        }
    }
}

const PLACE_VALUES: [i32; COORDINATE_DIGITS] = [10_000, 1_000, 100, 10, 1];

/// A coordinate split into a sign and decimal digits for editing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EditableCoordinate {
    axis: Axis,
    negative: bool,
    digits: [u8; COORDINATE_DIGITS],
}

impl EditableCoordinate {
    /// Decompose a signed centidegree value.
    ///
    /// Values outside the axis range are clamped first, so decoding never yields an
    /// out-of-range coordinate.
    pub fn decode(value: i16, axis: Axis) -> Self {
        let value = axis.clamp(i32::from(value));
        let mut magnitude = i32::from(value).abs();
        let mut digits = [0u8; COORDINATE_DIGITS];
        for slot in digits.iter_mut().rev() {
            *slot = (magnitude % 10) as u8;
            magnitude /= 10;
        }
        Self {
            axis,
            negative: value < 0,
            digits,
        }
    }

    /// Reassemble the signed centidegree value.
    pub fn encode(&self) -> i16 {
        let signed = if self.negative {
            -self.magnitude()
        } else {
            self.magnitude()
        };
        self.axis.clamp(signed)
    }

    /// Unsigned value of the digits in centidegrees.
    pub fn magnitude(&self) -> i32 {
        self.digits
            .iter()
            .zip(PLACE_VALUES)
            .map(|(digit, place)| i32::from(*digit) * place)
            .sum()
    }

    pub fn axis(&self) -> Axis {
        self.axis
    }

    pub fn is_negative(&self) -> bool {
        self.negative
    }

    /// Value of a single digit, `None` for the sign position.
    pub fn digit(&self, digit: Digit) -> Option<u8> {
        digit.slot().map(|slot| self.digits[slot])
    }

    /// Increment one digit modulo 10, or toggle the sign.
    ///
    /// When the incremented value would exceed the axis bound the edit is clamped:
    /// - latitude tens: the lower digits are cleared, giving exactly 90.00
    /// - longitude hundreds: the value becomes exactly 180.00, or wraps the
    ///   hundreds digit back to 0 when it was already at 180.00
    /// - any other digit: that digit resets to 0
    ///
    /// The hundreds digit of a latitude is not editable and is left untouched.
    pub fn increment_digit(&mut self, digit: Digit) {
        let Some(slot) = digit.slot() else {
            self.negative = !self.negative;
            return;
        };

        if digit == Digit::Hundreds && !self.axis.has_hundreds() {
            return;
        }

        let was_at_bound = self.magnitude() == self.axis.bound();
        self.digits[slot] = (self.digits[slot] + 1) % 10;

        if self.magnitude() <= self.axis.bound() {
            return;
        }

        match (self.axis, digit) {
            (Axis::Latitude, Digit::Tens) => {
                self.digits[2..].fill(0);
            }
            (Axis::Longitude, Digit::Hundreds) if was_at_bound => {
                self.digits[0] = 0;
            }
            (Axis::Longitude, Digit::Hundreds) => {
                self.digits = [1, 8, 0, 0, 0];
            }
            _ => {
                self.digits[slot] = 0;
            }
        }
    }
}
