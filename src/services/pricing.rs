//! Rental pricing calculator
//!
//! Pure interval-to-charge computation. Durations are billed in whole
//! ceiled units: when a daily rate exists the charge is ceiled days times
//! the daily rate, otherwise ceiled hours times the hourly rate. A 25-hour
//! rental with a daily rate bills as two full days; there is no
//! hour-remainder proration.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;

use crate::error::{AppError, AppResult};

const SECS_PER_HOUR: i64 = 3_600;
const SECS_PER_DAY: i64 = 86_400;

/// Computed charge for a rental interval
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Quote {
    /// Interval length in whole hours, rounded up
    pub hours: i64,
    /// Interval length in whole days, rounded up
    pub days: i64,
    pub total_price: Decimal,
}

/// Price a rental interval against a rate schedule.
///
/// Fails with a validation error when `end <= start`.
pub fn quote(
    start: DateTime<Utc>,
    end: DateTime<Utc>,
    hourly_rate: Decimal,
    daily_rate: Option<Decimal>,
) -> AppResult<Quote> {
    let seconds = (end - start).num_seconds();
    if seconds <= 0 {
        return Err(AppError::Validation(
            "End date must be after start date".to_string(),
        ));
    }

    let hours = div_ceil(seconds, SECS_PER_HOUR);
    let days = div_ceil(seconds, SECS_PER_DAY);

    let total_price = match daily_rate {
        Some(daily) if days > 0 => Decimal::from(days) * daily,
        _ => Decimal::from(hours) * hourly_rate,
    };

    Ok(Quote {
        hours,
        days,
        total_price,
    })
}

fn div_ceil(value: i64, unit: i64) -> i64 {
    (value + unit - 1) / unit
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone};
    use rust_decimal_macros::dec;

    fn at(h: i64, m: i64) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 6, 1, 0, 0, 0).unwrap()
            + Duration::hours(h)
            + Duration::minutes(m)
    }

    #[test]
    fn ninety_minutes_bills_two_hours() {
        let q = quote(at(9, 0), at(10, 30), dec!(100), None).unwrap();
        assert_eq!(q.hours, 2);
        assert_eq!(q.days, 1);
        assert_eq!(q.total_price, dec!(200));
    }

    #[test]
    fn twenty_five_hours_with_daily_rate_bills_two_days() {
        let q = quote(at(0, 0), at(25, 0), dec!(50), Some(dec!(300))).unwrap();
        assert_eq!(q.hours, 25);
        assert_eq!(q.days, 2);
        assert_eq!(q.total_price, dec!(600));
    }

    #[test]
    fn daily_rate_applies_even_for_short_rentals() {
        // Any positive interval ceils to at least one day, so a present
        // daily rate always wins over the hourly rate.
        let q = quote(at(9, 0), at(12, 0), dec!(100), Some(dec!(500))).unwrap();
        assert_eq!(q.hours, 3);
        assert_eq!(q.days, 1);
        assert_eq!(q.total_price, dec!(500));
    }

    #[test]
    fn no_daily_rate_bills_hourly() {
        let q = quote(at(0, 0), at(30, 0), dec!(40), None).unwrap();
        assert_eq!(q.hours, 30);
        assert_eq!(q.days, 2);
        assert_eq!(q.total_price, dec!(1200));
    }

    #[test]
    fn exact_hour_boundaries_do_not_round_up() {
        let q = quote(at(8, 0), at(12, 0), dec!(75), None).unwrap();
        assert_eq!(q.hours, 4);
        assert_eq!(q.total_price, dec!(300));

        let q = quote(at(0, 0), at(48, 0), dec!(10), Some(dec!(350))).unwrap();
        assert_eq!(q.days, 2);
        assert_eq!(q.total_price, dec!(700));
    }

    #[test]
    fn one_minute_bills_one_hour() {
        let q = quote(at(9, 0), at(9, 1), dec!(120), None).unwrap();
        assert_eq!(q.hours, 1);
        assert_eq!(q.days, 1);
        assert_eq!(q.total_price, dec!(120));
    }

    #[test]
    fn empty_and_inverted_intervals_fail() {
        assert!(quote(at(9, 0), at(9, 0), dec!(100), None).is_err());
        assert!(quote(at(9, 0), at(8, 0), dec!(100), None).is_err());
        assert!(quote(at(9, 0), at(8, 59), dec!(100), Some(dec!(300))).is_err());
    }

    #[test]
    fn ceilings_hold_across_a_sweep_of_intervals() {
        for minutes in 1..=(3 * 24 * 60) {
            let q = quote(at(0, 0), at(0, minutes), dec!(1), None).unwrap();
            let expected_hours = (minutes + 59) / 60;
            let expected_days = (minutes + 24 * 60 - 1) / (24 * 60);
            assert_eq!(q.hours, expected_hours, "minutes={}", minutes);
            assert_eq!(q.days, expected_days, "minutes={}", minutes);
            assert_eq!(q.total_price, Decimal::from(expected_hours));
        }
    }
}
