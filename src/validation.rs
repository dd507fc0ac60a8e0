//! Turns the three raw form fields into a [`CalendarDate`].
//!
//! Rules run in a fixed order and stop at the first failure, so the message a
//! user sees always names the earliest problem with their input.

use crate::age::is_leap_year;
use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use serde::{Serialize, Serializer};
use thiserror::Error;

pub const MIN_YEAR: i64 = 1000;

/// Raw field values as typed by the user.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DateInput {
    pub day: String,
    pub month: String,
    pub year: String,
}

impl DateInput {
    pub fn new(day: impl Into<String>, month: impl Into<String>, year: impl Into<String>) -> Self {
        Self {
            day: day.into(),
            month: month.into(),
            year: year.into(),
        }
    }
}

/// The first rule a [`DateInput`] broke.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("All fields must be filled out")]
    MissingField,

    #[error("Day should be between 1 and 31")]
    DayOutOfRange,

    #[error("Month should be between 1 and 12")]
    MonthOutOfRange,

    #[error("Year should be between 1000 and {current_year}")]
    YearOutOfRange { current_year: i64 },

    #[error("April, June, September, and November have 30 days")]
    ThirtyDayMonth,

    #[error("February has 29 days in leap years")]
    FebruaryLeap,

    #[error("February has 28 days in non-leap years")]
    FebruaryCommon,
}

impl Serialize for ValidationError {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// A day/month/year triple that exists on the proleptic Gregorian calendar.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CalendarDate(NaiveDate);

impl CalendarDate {
    /// Checks `input` against the rule catalog, earliest rule first.
    pub fn validate(input: &DateInput, current_year: i64) -> Result<Self, ValidationError> {
        if input.day.is_empty() || input.month.is_empty() || input.year.is_empty() {
            return Err(ValidationError::MissingField);
        }

        let day = parse_leading_int(&input.day)
            .filter(|d| (1..=31).contains(d))
            .ok_or(ValidationError::DayOutOfRange)?;

        let month = parse_leading_int(&input.month)
            .filter(|m| (1..=12).contains(m))
            .ok_or(ValidationError::MonthOutOfRange)?;

        let year = parse_leading_int(&input.year)
            .filter(|y| (MIN_YEAR..=current_year).contains(y))
            .ok_or(ValidationError::YearOutOfRange { current_year })?;
        let leap = is_leap_year(year);

        if matches!(month, 4 | 6 | 9 | 11) && day > 30 {
            return Err(ValidationError::ThirtyDayMonth);
        }
        if leap && month == 2 && day > 29 {
            return Err(ValidationError::FebruaryLeap);
        }
        if !leap && month == 2 && day > 28 {
            return Err(ValidationError::FebruaryCommon);
        }

        // The checks above leave only real dates; chrono agrees on every one.
        let date = i32::try_from(year)
            .ok()
            .and_then(|y| NaiveDate::from_ymd_opt(y, month as u32, day as u32))
            .ok_or(ValidationError::YearOutOfRange { current_year })?;

        Ok(Self(date))
    }

    pub fn as_naive_date(&self) -> NaiveDate {
        self.0
    }

    /// The date at 00:00 wall-clock time.
    pub fn midnight(&self) -> NaiveDateTime {
        self.0.and_time(NaiveTime::MIN)
    }
}

/// Lenient integer parse: skips leading whitespace (including a BOM), accepts
/// one sign and an optional `0x`/`0X` hex prefix, then reads digits until the
/// first non-digit. `"12abc"` is 12, `"3.9"` is 3, `"0x10"` is 16, `"abc"`,
/// `"0x"` and `" "` are `None`. Values beyond `i64` saturate.
fn parse_leading_int(raw: &str) -> Option<i64> {
    let s = raw.trim_start_matches(|c: char| c.is_whitespace() || c == '\u{FEFF}');
    let (negative, unsigned) = match s.as_bytes().first() {
        Some(b'-') => (true, &s[1..]),
        Some(b'+') => (false, &s[1..]),
        _ => (false, s),
    };
    let (radix, digits) = match unsigned.get(..2) {
        Some("0x" | "0X") => (16, &unsigned[2..]),
        _ => (10, unsigned),
    };

    let end = digits
        .find(|c: char| !c.is_digit(radix))
        .unwrap_or(digits.len());
    if end == 0 {
        return None;
    }

    let magnitude = digits[..end]
        .chars()
        .filter_map(|c| c.to_digit(radix))
        .fold(0i64, |acc, d| {
            acc.saturating_mul(i64::from(radix))
                .saturating_add(i64::from(d))
        });
    Some(if negative { -magnitude } else { magnitude })
}
