//! age.rs
//!
//! This module turns an elapsed span into a "X years, Y months, Z days"
//! breakdown.
//!
//! The breakdown is a fixed-length approximation, not calendar subtraction:
//!   • a year is always 365 days
//!   • a month is always 30 days
//!   • days are the remainder of the total day count modulo 30
//!
//! The day count is fractional (milliseconds / 86 400 000) and every component
//! is floored. Remainders use `%`, which keeps the sign of the dividend, so a
//! birth instant after `now` yields negative components rather than an error.

use chrono::NaiveDateTime;
use serde::Serialize;
use std::fmt;

const DAYS_PER_YEAR: f64 = 365.0;
const DAYS_PER_MONTH: f64 = 30.0;

/// Approximate elapsed time between a birth instant and "now".
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct AgeResult {
    pub years: i64,
    pub months: i64,
    pub days: i64,
}

impl AgeResult {
    /// Breaks the span `now - birth` into years, months and days.
    pub fn between(birth: NaiveDateTime, now: NaiveDateTime) -> Self {
        let millis = now.signed_duration_since(birth).num_milliseconds();
        Self::from_days(elapsed_days(millis))
    }

    /// Applies the 365/30 breakdown to a (possibly fractional) day count.
    pub fn from_days(age_in_days: f64) -> Self {
        Self {
            years: (age_in_days / DAYS_PER_YEAR).floor() as i64,
            months: ((age_in_days % DAYS_PER_YEAR) / DAYS_PER_MONTH).floor() as i64,
            days: (age_in_days % DAYS_PER_MONTH).floor() as i64,
        }
    }
}

/// Milliseconds to days, one unit at a time.
fn elapsed_days(millis: i64) -> f64 {
    let seconds = millis as f64 / 1000.0;
    let minutes = seconds / 60.0;
    let hours = minutes / 60.0;
    hours / 24.0
}

impl fmt::Display for AgeResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} year{}, {} month{}, {} day{}",
            self.years,
            plural(self.years),
            self.months,
            plural(self.months),
            self.days,
            plural(self.days)
        )
    }
}

fn plural(n: i64) -> &'static str {
    if n == 1 { "" } else { "s" }
}

/// Leap-year rule (Gregorian):
///   - divisible by 4 → leap year
///   - except divisible by 100 → not leap year
///   - except divisible by 400 → leap year
pub fn is_leap_year(year: i64) -> bool {
    year % 4 == 0 && (year % 100 != 0 || year % 400 == 0)
}
