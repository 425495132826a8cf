//! Rate conversions between nominal, effective annual, periodic, and daily
//!
//! All conversions assume compounding, i.e. they are geometric:
//! a nominal rate r quoted n times per year annualizes to (1+r)^n - 1.

use crate::error::Error;
use crate::schedule::{Frequency, RateBasis};

/// Effective annual rate (EAR) for a nominal rate quoted at the given basis
///
/// A rate of 0.4% per month annualizes to (1.004)^12 - 1 ≈ 4.907% p.a.
pub fn effective_annual_rate(nominal_rate: f64, basis: RateBasis) -> f64 {
    (1.0 + nominal_rate).powi(basis.periods_per_year() as i32) - 1.0
}

/// Tag-parsing variant of [`effective_annual_rate`] for boundary input
///
/// Accepts the conventional basis tags ("p.a.", "p.s.", "p.q.", "p.m.",
/// "p.biw.", "p.w.", "p.d.") and fails with `InvalidArgument` otherwise.
pub fn convert_rate(nominal_rate: f64, basis: &str) -> Result<f64, Error> {
    let basis: RateBasis = basis.parse()?;
    Ok(effective_annual_rate(nominal_rate, basis))
}

/// Periodic rate matching a compounding frequency for a given annual rate
///
/// Inverse direction of annualization: the rate applied at each compounding
/// event so that per_year events reproduce the annual rate.
pub(crate) fn periodic_rate(annual_rate: f64, compounding: Frequency) -> f64 {
    (1.0 + annual_rate).powf(1.0 / compounding.per_year() as f64) - 1.0
}

/// Equivalent daily rate for a nominal rate quoted at the given basis
///
/// Lets the calendar engine accrue over arbitrary day gaps:
/// growth over d days is (1 + daily)^d.
pub(crate) fn daily_rate(nominal_rate: f64, basis: RateBasis) -> f64 {
    (1.0 + nominal_rate).powf(basis.periods_per_year() as f64 / 365.0) - 1.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn test_annual_round_trip() {
        for r in [0.0, 0.004, 0.05, 0.25, 1.0] {
            assert_eq!(effective_annual_rate(r, RateBasis::Annual), r);
            assert_eq!(convert_rate(r, "p.a.").unwrap(), r);
        }
    }

    #[test]
    fn test_monthly_to_annual() {
        // 0.4% p.m. -> ~4.907% p.a.
        assert_abs_diff_eq!(
            convert_rate(0.004, "p.m.").unwrap(),
            0.04907020753480573,
            epsilon = 1e-12
        );
    }

    #[test]
    fn test_weekly_to_annual() {
        assert_abs_diff_eq!(
            convert_rate(0.001, "p.w.").unwrap(),
            0.053348373344447086,
            epsilon = 1e-12
        );
    }

    #[test]
    fn test_unrecognized_basis() {
        let err = convert_rate(0.05, "per-year").unwrap_err();
        assert!(matches!(err, crate::Error::InvalidArgument(_)));
    }

    #[test]
    fn test_periodic_rate_annualizes_back() {
        for freq in [
            Frequency::Semiannually,
            Frequency::Monthly,
            Frequency::Daily,
        ] {
            let p = periodic_rate(0.05, freq);
            let annual = (1.0 + p).powi(freq.per_year() as i32) - 1.0;
            assert_abs_diff_eq!(annual, 0.05, epsilon = 1e-10);
        }
    }

    #[test]
    fn test_daily_rate_annual_basis() {
        // 5% p.a. over 365 days reproduces 5%
        let d = daily_rate(0.05, RateBasis::Annual);
        assert_abs_diff_eq!((1.0 + d).powi(365) - 1.0, 0.05, epsilon = 1e-10);
    }
}
