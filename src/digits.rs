//! Conversion between millisecond counts and the nine-digit timer display.
//!
//! The display is made of nine fixed-position decimal digits, from the tens
//! of hours down to single milliseconds. Each position carries a fixed
//! millisecond multiplier, so a duration decomposes into digits by plain
//! long division and recomposes by a weighted sum.
//!
//! # Examples
//!
//! ```rust
//! use bubbletea_countdown::digits::{to_digits, Field};
//!
//! let digits = to_digits(3_723_456); // 1h 2m 3.456s
//! assert_eq!(digits[Field::HourOnes], 1);
//! assert_eq!(digits[Field::MinuteOnes], 2);
//! assert_eq!(digits.to_string(), "01:02:03.456");
//! assert_eq!(digits.to_millis(), 3_723_456);
//! ```

use crate::error::TimerError;
use std::fmt;
use std::ops::Index;
use std::str::FromStr;

/// Number of digit positions on the display.
pub const FIELD_COUNT: usize = 9;

/// Millisecond multiplier of each field, in display order.
pub const MULTIPLIERS: [u64; FIELD_COUNT] = [
    10 * 60 * 60 * 1000,
    60 * 60 * 1000,
    10 * 60 * 1000,
    60 * 1000,
    10 * 1000,
    1000,
    100,
    10,
    1,
];

/// Largest duration whose every field fits in a single digit (99:59:59.999).
pub const MAX_REPRESENTABLE_MS: u64 = 100 * 60 * 60 * 1000 - 1;

/// One of the nine digit positions, in descending place value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Field {
    /// Tens of hours.
    HourTens,
    /// Single hours.
    HourOnes,
    /// Tens of minutes.
    MinuteTens,
    /// Single minutes.
    MinuteOnes,
    /// Tens of seconds.
    SecondTens,
    /// Single seconds.
    SecondOnes,
    /// Hundreds of milliseconds.
    MillisHundreds,
    /// Tens of milliseconds.
    MillisTens,
    /// Single milliseconds.
    MillisOnes,
}

impl Field {
    /// All fields in left-to-right display order.
    pub const ALL: [Field; FIELD_COUNT] = [
        Field::HourTens,
        Field::HourOnes,
        Field::MinuteTens,
        Field::MinuteOnes,
        Field::SecondTens,
        Field::SecondOnes,
        Field::MillisHundreds,
        Field::MillisTens,
        Field::MillisOnes,
    ];

    /// Position of this field in display order.
    pub fn index(self) -> usize {
        self as usize
    }

    /// Milliseconds contributed by one unit of this field.
    pub fn multiplier(self) -> u64 {
        MULTIPLIERS[self.index()]
    }

    /// Stable identifier, e.g. `"minute-digit-tens"`.
    pub fn id(self) -> &'static str {
        match self {
            Field::HourTens => "hour-digit-tens",
            Field::HourOnes => "hour-digit-ones",
            Field::MinuteTens => "minute-digit-tens",
            Field::MinuteOnes => "minute-digit-ones",
            Field::SecondTens => "second-digit-tens",
            Field::SecondOnes => "second-digit-ones",
            Field::MillisHundreds => "millisecond-digit-hundreds",
            Field::MillisTens => "millisecond-digit-tens",
            Field::MillisOnes => "millisecond-digit-ones",
        }
    }

    /// Where focus moves after this field has been edited.
    ///
    /// The last field hands focus over to the start control.
    pub fn next(self) -> FocusTarget {
        match Field::ALL.get(self.index() + 1) {
            Some(field) => FocusTarget::Field(*field),
            None => FocusTarget::StartControl,
        }
    }

    /// The field to the left of this one, if any.
    pub fn prev(self) -> Option<Field> {
        self.index().checked_sub(1).map(|i| Field::ALL[i])
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

impl FromStr for Field {
    type Err = TimerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Field::ALL
            .iter()
            .copied()
            .find(|field| field.id() == s)
            .ok_or_else(|| TimerError::UnknownField(s.to_string()))
    }
}

/// Something that can hold keyboard focus inside the widget.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FocusTarget {
    /// A digit field.
    Field(Field),
    /// The start control, reached after the last digit.
    StartControl,
}

impl FocusTarget {
    /// Moves one step right; the start control is the end of the line.
    pub fn forward(self) -> FocusTarget {
        match self {
            FocusTarget::Field(field) => field.next(),
            FocusTarget::StartControl => FocusTarget::StartControl,
        }
    }

    /// Moves one step left; the first field is the start of the line.
    pub fn backward(self) -> FocusTarget {
        match self {
            FocusTarget::Field(field) => FocusTarget::Field(field.prev().unwrap_or(field)),
            FocusTarget::StartControl => FocusTarget::Field(Field::MillisOnes),
        }
    }
}

/// A single validated decimal digit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default)]
pub struct Digit(u8);

impl Digit {
    /// The digit's numeric value.
    pub fn value(self) -> u8 {
        self.0
    }
}

impl TryFrom<u8> for Digit {
    type Error = TimerError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        if value <= 9 {
            Ok(Digit(value))
        } else {
            Err(TimerError::InvalidDigit(u32::from(value)))
        }
    }
}

impl TryFrom<char> for Digit {
    type Error = TimerError;

    fn try_from(c: char) -> Result<Self, Self::Error> {
        match c.to_digit(10) {
            // to_digit(10) never exceeds 9
            Some(d) => Ok(Digit(d as u8)),
            None => Err(TimerError::InvalidDigit(u32::from(c))),
        }
    }
}

/// Separator placed between seconds and milliseconds when formatting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Separator {
    /// `HH:MM:SS.mmm`
    #[default]
    Period,
    /// `HH:MM:SS:mmm`
    Colon,
}

impl Separator {
    /// The separator character.
    pub fn as_char(self) -> char {
        match self {
            Separator::Period => '.',
            Separator::Colon => ':',
        }
    }
}

/// The nine display digits of a duration.
///
/// A `DigitSet` is always derived: either from a millisecond count with
/// [`to_digits`] or from the values the user typed into the fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct DigitSet {
    values: [u8; FIELD_COUNT],
}

impl DigitSet {
    /// All fields zero.
    pub const ZERO: DigitSet = DigitSet {
        values: [0; FIELD_COUNT],
    };

    /// Raw field values in display order.
    pub fn values(&self) -> &[u8; FIELD_COUNT] {
        &self.values
    }

    /// Replaces one field.
    pub fn set(&mut self, field: Field, digit: Digit) {
        self.values[field.index()] = digit.value();
    }

    /// Total milliseconds represented by the fields.
    pub fn to_millis(&self) -> u64 {
        from_digits(&self.values, &MULTIPLIERS)
    }

    /// True when every field is zero.
    pub fn is_zero(&self) -> bool {
        self.values.iter().all(|v| *v == 0)
    }

    /// Iterates `(field, value)` pairs in display order.
    pub fn iter(&self) -> impl Iterator<Item = (Field, u8)> + '_ {
        Field::ALL.iter().map(move |f| (*f, self.values[f.index()]))
    }
}

impl Index<Field> for DigitSet {
    type Output = u8;

    fn index(&self, field: Field) -> &u8 {
        &self.values[field.index()]
    }
}

impl fmt::Display for DigitSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&format(self, Separator::default()))
    }
}

/// Decomposes `ms` into display digits, largest place value first.
///
/// Every field is a single digit up to [`MAX_REPRESENTABLE_MS`]. Beyond that
/// the excess stays in the hour-tens field, saturating at `u8::MAX`.
pub fn to_digits(ms: u64) -> DigitSet {
    let mut remaining = ms;
    let mut values = [0u8; FIELD_COUNT];
    for (value, unit) in values.iter_mut().zip(MULTIPLIERS) {
        let digit = remaining / unit;
        remaining -= digit * unit;
        *value = u8::try_from(digit).unwrap_or(u8::MAX);
    }
    DigitSet { values }
}

/// Weighted sum of field values and their multipliers.
///
/// Accepts any combination of field values, not only ones produced by
/// [`to_digits`]; `9` in the minute-tens field simply counts as 90 minutes.
pub fn from_digits(values: &[u8; FIELD_COUNT], multipliers: &[u64; FIELD_COUNT]) -> u64 {
    values
        .iter()
        .zip(multipliers)
        .map(|(v, m)| u64::from(*v) * m)
        .sum()
}

/// Renders digits as `HH:MM:SS` followed by the separator and milliseconds.
pub fn format(digits: &DigitSet, separator: Separator) -> String {
    let v = digits.values;
    format!(
        "{}{}:{}{}:{}{}{}{}{}{}",
        v[0],
        v[1],
        v[2],
        v[3],
        v[4],
        v[5],
        separator.as_char(),
        v[6],
        v[7],
        v[8]
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    const NINE_59_59_999: u64 = 9 * 3_600_000 + 59 * 60_000 + 59_000 + 999;

    #[test]
    fn test_zero_is_all_zero_digits() {
        let digits = to_digits(0);
        assert_eq!(digits, DigitSet::ZERO);
        assert!(digits.is_zero());
        assert_eq!(format(&digits, Separator::Period), "00:00:00.000");
        assert_eq!(format(&digits, Separator::Colon), "00:00:00:000");
    }

    #[test]
    fn test_place_value_decomposition() {
        // 12h 34m 56.789s
        let ms = 12 * 3_600_000 + 34 * 60_000 + 56_789;
        let digits = to_digits(ms);
        assert_eq!(digits.values(), &[1, 2, 3, 4, 5, 6, 7, 8, 9]);
        assert_eq!(digits.to_string(), "12:34:56.789");
    }

    #[test]
    fn test_hours_above_ten_do_not_truncate_minutes() {
        // The hour-tens digit must leave the correct remainder for the rest.
        let ms = 10 * 3_600_000 + 5 * 60_000;
        assert_eq!(to_digits(ms).to_string(), "10:05:00.000");
    }

    #[test]
    fn test_round_trip_over_representable_range() {
        let mut ms = 0;
        while ms <= NINE_59_59_999 {
            assert_eq!(to_digits(ms).to_millis(), ms, "round trip failed at {ms}");
            ms += 7_919;
        }
        for ms in [0, 1, 999, 1_000, 59_999, 3_599_999, NINE_59_59_999, MAX_REPRESENTABLE_MS] {
            assert_eq!(to_digits(ms).to_millis(), ms);
        }
    }

    #[test]
    fn test_every_field_is_single_digit_up_to_max() {
        let digits = to_digits(MAX_REPRESENTABLE_MS);
        assert_eq!(digits.to_string(), "99:59:59.999");
        assert!(digits.values().iter().all(|v| *v <= 9));
    }

    #[test]
    fn test_overflow_accumulates_in_hour_tens() {
        let digits = to_digits(MAX_REPRESENTABLE_MS + 1);
        assert_eq!(digits[Field::HourTens], 10);
        assert_eq!(digits[Field::HourOnes], 0);
        assert_eq!(digits.to_millis(), MAX_REPRESENTABLE_MS + 1);
    }

    #[test]
    fn test_from_digits_accepts_non_canonical_fields() {
        let mut values = [0u8; FIELD_COUNT];
        values[Field::MinuteTens.index()] = 9;
        values[Field::SecondTens.index()] = 9;
        assert_eq!(from_digits(&values, &MULTIPLIERS), 90 * 60_000 + 90_000);

        let all_nines = [9u8; FIELD_COUNT];
        assert_eq!(from_digits(&all_nines, &MULTIPLIERS), 362_439_999);
    }

    #[test]
    fn test_focus_order() {
        assert_eq!(
            Field::HourTens.next(),
            FocusTarget::Field(Field::HourOnes)
        );
        assert_eq!(
            Field::SecondOnes.next(),
            FocusTarget::Field(Field::MillisHundreds)
        );
        assert_eq!(Field::MillisOnes.next(), FocusTarget::StartControl);
        assert_eq!(Field::HourTens.prev(), None);
        assert_eq!(FocusTarget::StartControl.forward(), FocusTarget::StartControl);
        assert_eq!(
            FocusTarget::StartControl.backward(),
            FocusTarget::Field(Field::MillisOnes)
        );
        assert_eq!(
            FocusTarget::Field(Field::HourTens).backward(),
            FocusTarget::Field(Field::HourTens)
        );
    }

    #[test]
    fn test_field_ids_parse_back() {
        for field in Field::ALL {
            assert_eq!(field.id().parse::<Field>(), Ok(field));
        }
        assert_eq!(
            "start-timer".parse::<Field>(),
            Err(TimerError::UnknownField("start-timer".to_string()))
        );
    }

    #[test]
    fn test_digit_validation() {
        assert_eq!(Digit::try_from(9u8).map(Digit::value), Ok(9));
        assert_eq!(Digit::try_from(10u8), Err(TimerError::InvalidDigit(10)));
        assert_eq!(Digit::try_from('7').map(Digit::value), Ok(7));
        for c in ['e', '.', ' ', '-', '\n'] {
            assert!(Digit::try_from(c).is_err(), "{c:?} should not be a digit");
        }
    }
}
