//! Time and averaging helpers shared by the metric calculations.

use jiff::{SignedDuration, Timestamp};

const SECONDS_PER_HOUR: f64 = 3_600.0;
const SECONDS_PER_DAY: i64 = 86_400;

/// A duration of whole days, where a day is exactly 24 hours.
#[must_use]
pub const fn days(days: i64) -> SignedDuration {
    SignedDuration::from_secs(days.saturating_mul(SECONDS_PER_DAY))
}

/// Whole days elapsed from `earlier` to `later`, rounded down.
///
/// Negative when `later` precedes `earlier`.
#[must_use]
pub fn whole_days_between(earlier: Timestamp, later: Timestamp) -> i64 {
    later
        .duration_since(earlier)
        .as_secs()
        .div_euclid(SECONDS_PER_DAY)
}

/// Fractional hours elapsed from `earlier` to `later`.
#[must_use]
pub fn hours_between(earlier: Timestamp, later: Timestamp) -> f64 {
    later.duration_since(earlier).as_secs_f64() / SECONDS_PER_HOUR
}

/// Arithmetic mean, or `0.0` for an empty input.
#[must_use]
pub fn mean(values: impl IntoIterator<Item = f64>) -> f64 {
    let (sum, count) = values
        .into_iter()
        .fold((0.0_f64, 0_u32), |(sum, count), value| {
            (sum + value, count.saturating_add(1))
        });

    if count == 0 {
        return 0.0;
    }

    sum / f64::from(count)
}

/// Percentage change from `previous` to `current`, or `0.0` when `previous` is zero.
#[must_use]
pub fn percent_change(previous: usize, current: usize) -> f64 {
    if previous == 0 {
        return 0.0;
    }

    let previous = count_as_f64(previous);

    (count_as_f64(current) - previous) / previous * 100.0
}

/// Convert a record count to `f64` for averaging.
#[must_use]
pub fn count_as_f64(count: usize) -> f64 {
    u32::try_from(count).map_or(f64::from(u32::MAX), f64::from)
}

#[cfg(test)]
mod tests {
    use jiff::ToSpan;
    use testresult::TestResult;

    use super::*;

    #[test]
    fn whole_days_between_rounds_down() -> TestResult {
        let earlier: Timestamp = "2025-01-01T00:00:00Z".parse()?;
        let later = earlier.checked_add(47.hours())?;

        assert_eq!(whole_days_between(earlier, later), 1);

        Ok(())
    }

    #[test]
    fn whole_days_between_is_negative_for_future_start() -> TestResult {
        let earlier: Timestamp = "2025-01-02T00:00:00Z".parse()?;
        let later = earlier.checked_sub(1.hours())?;

        assert_eq!(whole_days_between(earlier, later), -1);

        Ok(())
    }

    #[test]
    fn mean_of_nothing_is_zero() {
        assert!(mean(std::iter::empty()).abs() < f64::EPSILON);
    }

    #[test]
    fn mean_averages_values() {
        assert!((mean([2.0, 4.0, 9.0]) - 5.0).abs() < f64::EPSILON);
    }

    #[test]
    fn percent_change_guards_zero_baseline() {
        assert!(percent_change(0, 12).abs() < f64::EPSILON);
        assert!((percent_change(2, 3) - 50.0).abs() < f64::EPSILON);
        assert!((percent_change(4, 1) + 75.0).abs() < f64::EPSILON);
    }
}
