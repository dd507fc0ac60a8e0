use crate::age::AgeResult;
use crate::validation::{CalendarDate, DateInput, ValidationError};
use chrono::{Datelike, Local, NaiveDateTime, TimeDelta, TimeZone};
use tracing::debug;

/// Source of "now" as a local wall-clock reading.
pub trait Clock {
    fn now(&self) -> NaiveDateTime;

    /// Resolves a wall-clock reading to the UTC instant it names.
    ///
    /// Readings are treated as UTC unless the clock knows its timezone.
    fn to_utc(&self, local: NaiveDateTime) -> NaiveDateTime {
        local
    }
}

/// Reads the system clock in the local timezone.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> NaiveDateTime {
        Local::now().naive_local()
    }

    /// Ambiguous readings take the earlier instant; a reading inside a
    /// spring-forward gap moves past the gap.
    fn to_utc(&self, local: NaiveDateTime) -> NaiveDateTime {
        Local
            .from_local_datetime(&local)
            .earliest()
            .or_else(|| {
                Local
                    .from_local_datetime(&(local + TimeDelta::hours(1)))
                    .earliest()
            })
            .map(|dt| dt.naive_utc())
            .unwrap_or(local)
    }
}

/// Always reports the same instant.
#[derive(Debug, Clone, Copy)]
pub struct FixedClock(pub NaiveDateTime);

impl Clock for FixedClock {
    fn now(&self) -> NaiveDateTime {
        self.0
    }
}

/// Validates a birth date and reports the approximate age at `now`.
pub struct AgeCalculator {
    clock: Box<dyn Clock>,
}

impl AgeCalculator {
    pub fn new(clock: impl Clock + 'static) -> Self {
        Self {
            clock: Box::new(clock),
        }
    }

    /// Validate-then-compute against an explicit `now`.
    ///
    /// A birth date later than `now` but inside the current year is accepted
    /// and produces negative components.
    pub fn compute(
        &self,
        raw: &DateInput,
        now: NaiveDateTime,
    ) -> Result<AgeResult, ValidationError> {
        debug!(day = %raw.day, month = %raw.month, year = %raw.year, %now, "computing age");

        let birth = CalendarDate::validate(raw, i64::from(now.year())).inspect_err(|err| {
            debug!(error = %err, "input rejected");
        })?;

        let age = AgeResult::between(
            self.clock.to_utc(birth.midnight()),
            self.clock.to_utc(now),
        );
        debug!(birth = %birth.as_naive_date(), ?age, "age computed");
        Ok(age)
    }

    /// Same as [`compute`](Self::compute), reading `now` from the clock.
    pub fn compute_now(&self, raw: &DateInput) -> Result<AgeResult, ValidationError> {
        self.compute(raw, self.now())
    }

    pub fn now(&self) -> NaiveDateTime {
        self.clock.now()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn at(y: i32, m: u32, d: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(y, m, d)
            .unwrap()
            .and_hms_opt(0, 0, 0)
            .unwrap()
    }

    fn calculator() -> AgeCalculator {
        AgeCalculator::new(FixedClock(at(2024, 6, 15)))
    }

    #[test]
    fn end_to_end_matches_fixed_formula() {
        let age = calculator()
            .compute_now(&DateInput::new("15", "6", "2000"))
            .unwrap();
        assert_eq!(
            age,
            AgeResult {
                years: 24,
                months: 0,
                days: 6
            }
        );
    }

    #[test]
    fn leap_day_birth_computes() {
        let age = calculator()
            .compute_now(&DateInput::new("29", "2", "2000"))
            .unwrap();
        // 2000-02-29 → 2024-06-15 is 8873 days.
        assert_eq!(
            age,
            AgeResult {
                years: 24,
                months: 3,
                days: 23
            }
        );
    }

    #[test]
    fn year_bound_follows_now() {
        let calc = calculator();
        let err = calc
            .compute(&DateInput::new("1", "1", "2025"), at(2024, 6, 15))
            .unwrap_err();
        assert_eq!(err.to_string(), "Year should be between 1000 and 2024");
        assert!(calc
            .compute(&DateInput::new("1", "1", "2025"), at(2025, 3, 1))
            .is_ok());
    }

    #[test]
    fn later_this_year_is_not_rejected() {
        let age = calculator()
            .compute_now(&DateInput::new("16", "6", "2024"))
            .unwrap();
        assert_eq!(
            age,
            AgeResult {
                years: -1,
                months: -1,
                days: -1
            }
        );
    }

    #[test]
    fn validation_errors_pass_through() {
        let err = calculator()
            .compute_now(&DateInput::new("31", "4", "2000"))
            .unwrap_err();
        assert_eq!(err, ValidationError::ThirtyDayMonth);
    }

    /// Local time one hour ahead of UTC from April through October.
    struct SummerTimeClock(NaiveDateTime);

    impl Clock for SummerTimeClock {
        fn now(&self) -> NaiveDateTime {
            self.0
        }

        fn to_utc(&self, local: NaiveDateTime) -> NaiveDateTime {
            if (4..=10).contains(&local.month()) {
                local - TimeDelta::hours(1)
            } else {
                local
            }
        }
    }

    #[test]
    fn elapsed_time_spans_offset_change() {
        // 153 wall-clock days plus 30 minutes, but only 152 days 23.5 hours elapsed.
        let now = at(2024, 6, 15) + TimeDelta::minutes(30);
        let calc = AgeCalculator::new(SummerTimeClock(now));
        let age = calc
            .compute_now(&DateInput::new("14", "1", "2024"))
            .unwrap();
        assert_eq!(
            age,
            AgeResult {
                years: 0,
                months: 5,
                days: 2
            }
        );
    }

    #[test]
    fn same_offset_needs_no_correction() {
        let now = at(2024, 6, 15) + TimeDelta::minutes(30);
        let calc = AgeCalculator::new(SummerTimeClock(now));
        let age = calc
            .compute_now(&DateInput::new("14", "5", "2024"))
            .unwrap();
        // 32 days 30 minutes.
        assert_eq!(
            age,
            AgeResult {
                years: 0,
                months: 1,
                days: 2
            }
        );
    }

    #[test]
    fn system_clock_round_trips_through_local_offset() {
        let local = at(2024, 1, 15) + TimeDelta::hours(12);
        let utc = SystemClock.to_utc(local);
        let offset = Local.offset_from_utc_datetime(&utc);
        assert_eq!(utc + offset, local);
    }

    mod properties {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #[test]
            fn past_dates_give_non_negative_parts(days_back in 1i64..365_000) {
                let now = at(2024, 6, 15);
                let birth = now.date() - chrono::Duration::days(days_back);
                prop_assume!(birth.year() >= 1000);
                let input = DateInput::new(
                    birth.day().to_string(),
                    birth.month().to_string(),
                    birth.year().to_string(),
                );
                let age = calculator().compute(&input, now).unwrap();
                prop_assert!(age.years >= 0 && age.months >= 0 && age.days >= 0);
                prop_assert_eq!(age.years, days_back / 365);
                prop_assert_eq!(age.months, (days_back % 365) / 30);
                prop_assert_eq!(age.days, days_back % 30);
            }

            #[test]
            fn compute_is_idempotent(day in "[0-9]{0,2}", month in "[0-9]{0,2}", year in "[0-9]{0,4}") {
                let calc = calculator();
                let input = DateInput::new(day, month, year);
                let now = at(2024, 6, 15);
                prop_assert_eq!(calc.compute(&input, now), calc.compute(&input, now));
            }
        }
    }
}
