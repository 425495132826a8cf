//! Calendar offset arithmetic for the date-driven engine
//!
//! Month-granular offsets clamp the day of month (Jan 31 + 1 month =
//! Feb 28/29); day-granular offsets are exact. All helpers are checked and
//! return `None` past the supported calendar range, which validation turns
//! into an error before any engine runs.

use chrono::{Days, Months, NaiveDate};

use crate::schedule::Stride;

/// Date of the k-th event after `start` for the given stride
pub(crate) fn offset(start: NaiveDate, stride: Stride, k: u64) -> Option<NaiveDate> {
    match stride {
        Stride::Months(m) => {
            let months = u32::try_from(m as u64 * k).ok()?;
            start.checked_add_months(Months::new(months))
        }
        Stride::Days(d) => start.checked_add_days(Days::new(d * k)),
    }
}

/// End of the projection horizon: start plus a possibly fractional number
/// of years
///
/// Whole years apply as 12-month offsets; the fractional remainder converts
/// at 365 days per year, rounded half-up.
pub(crate) fn horizon_end(start: NaiveDate, years: f64) -> Option<NaiveDate> {
    let whole = years.trunc() as u32;
    let frac = years.fract();
    let mut end = start.checked_add_months(Months::new(whole * 12))?;
    if frac > 0.0 {
        end = end.checked_add_days(Days::new((frac * 365.0).round() as u64))?;
    }
    Some(end)
}

/// Days elapsed from `from` to `to` (positive when `to` is later)
pub(crate) fn days_between(from: NaiveDate, to: NaiveDate) -> i64 {
    to.signed_duration_since(from).num_days()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_month_offset_clamps_day() {
        let jan31 = ymd(2023, 1, 31);
        assert_eq!(offset(jan31, Stride::Months(1), 1), Some(ymd(2023, 2, 28)));
        assert_eq!(offset(jan31, Stride::Months(1), 2), Some(ymd(2023, 3, 31)));
        // leap February
        assert_eq!(
            offset(ymd(2020, 1, 31), Stride::Months(1), 1),
            Some(ymd(2020, 2, 29))
        );
    }

    #[test]
    fn test_day_offsets() {
        let start = ymd(2023, 6, 30);
        assert_eq!(offset(start, Stride::Days(7), 2), Some(ymd(2023, 7, 14)));
        assert_eq!(offset(start, Stride::Days(14), 1), Some(ymd(2023, 7, 14)));
    }

    #[test]
    fn test_horizon_end_whole_years() {
        assert_eq!(horizon_end(ymd(2020, 2, 20), 2.0), Some(ymd(2022, 2, 20)));
        // Feb 29 anchor lands on Feb 28 in a common year
        assert_eq!(horizon_end(ymd(2020, 2, 29), 1.0), Some(ymd(2021, 2, 28)));
    }

    #[test]
    fn test_horizon_end_fractional() {
        // 0.5 years = 183 days (182.5 rounds half-up)
        assert_eq!(horizon_end(ymd(2023, 1, 31), 0.5), Some(ymd(2023, 8, 2)));
        // 1.5 years from 2023-06-30: 12 months then 183 days
        assert_eq!(horizon_end(ymd(2023, 6, 30), 1.5), Some(ymd(2024, 12, 30)));
    }

    #[test]
    fn test_days_between() {
        assert_eq!(days_between(ymd(2020, 1, 1), ymd(2021, 1, 1)), 366);
        assert_eq!(days_between(ymd(2021, 1, 1), ymd(2022, 1, 1)), 365);
        assert_eq!(days_between(ymd(2021, 1, 2), ymd(2021, 1, 1)), -1);
    }
}
