//! Per-period records, the projection result, and total aggregation

use chrono::NaiveDate;

use crate::error::Error;
use crate::schedule::Timing;

/// Position of a record on its engine's time axis
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Moment {
    /// Abstract grid step (period-index engine); `label` names the grid
    /// granularity ("Year", "Month", ...)
    Period { index: u32, label: &'static str },
    /// Calendar event date (calendar-date engine)
    Date(NaiveDate),
}

impl Moment {
    /// Label column value: grid granularity, or weekday for a date
    pub fn label(&self) -> String {
        match self {
            Moment::Period { label, .. } => (*label).to_string(),
            Moment::Date(d) => d.format("%a").to_string(),
        }
    }

    /// Period/date column value: the index, or the date as dd.mm.yyyy
    pub fn value(&self) -> String {
        match self {
            Moment::Period { index, .. } => index.to_string(),
            Moment::Date(d) => d.format("%d.%m.%Y").to_string(),
        }
    }
}

/// One step of an engine run
///
/// Balances are kept at full f64 precision; rounding to cents happens only
/// when rendering or exporting. `starting_balance` follows the engine's
/// documented convention for Start-timing contributions (see the engine
/// `run` docs).
#[derive(Debug, Clone, PartialEq)]
pub struct PeriodRecord {
    pub moment: Moment,
    pub starting_balance: f64,
    /// Contribution applied at this step (0 when none was scheduled)
    pub contribution: f64,
    /// Side of the interest calculation the contribution lands on
    pub contribution_timing: Timing,
    pub gross_interest: f64,
    pub tax_paid: f64,
    pub net_interest: f64,
    pub ending_balance: f64,
}

/// Aggregate totals derived from a record sequence
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Totals {
    pub total_contributions: f64,
    pub total_gross_interest: f64,
    pub total_tax: f64,
    pub total_net_interest: f64,
    pub future_value: f64,
}

/// Pure reduction over a record sequence
///
/// Future value is the last record's ending balance; an empty slice
/// aggregates to all zeros.
pub fn aggregate(records: &[PeriodRecord]) -> Totals {
    let mut totals = Totals::default();
    for r in records {
        totals.total_contributions += r.contribution;
        totals.total_gross_interest += r.gross_interest;
        totals.total_tax += r.tax_paid;
        totals.total_net_interest += r.net_interest;
    }
    if let Some(last) = records.last() {
        totals.future_value = last.ending_balance;
    }
    totals
}

/// Result of a single engine run: the full ordered record sequence
///
/// Carries enough scenario context (initial value, duration, tax rate) to
/// derive totals and the inflation-adjusted future value without re-running
/// the engine.
#[derive(Debug, Clone, PartialEq)]
pub struct Projection {
    initial_value: f64,
    duration_years: f64,
    tax_rate: f64,
    records: Vec<PeriodRecord>,
}

impl Projection {
    pub(crate) fn new(
        initial_value: f64,
        duration_years: f64,
        tax_rate: f64,
        records: Vec<PeriodRecord>,
    ) -> Self {
        Self {
            initial_value,
            duration_years,
            tax_rate,
            records,
        }
    }

    /// Records in ascending period/date order
    pub fn records(&self) -> &[PeriodRecord] {
        &self.records
    }

    pub fn into_records(self) -> Vec<PeriodRecord> {
        self.records
    }

    /// Final balance at the end of the horizon
    ///
    /// When the duration truncates to zero whole periods the record list is
    /// empty and the future value is simply the initial value.
    pub fn future_value(&self) -> f64 {
        self.records
            .last()
            .map(|r| r.ending_balance)
            .unwrap_or(self.initial_value)
    }

    /// Future value deflated by an annual inflation rate
    ///
    /// Inflation must be a finite value in [0, 1]; validation happens
    /// before any arithmetic.
    pub fn future_value_deflated(&self, inflation: f64) -> Result<f64, Error> {
        if !inflation.is_finite() {
            return Err(Error::invalid("inflation must be a finite number"));
        }
        if !(0.0..=1.0).contains(&inflation) {
            return Err(Error::out_of_range(
                "inflation",
                inflation,
                "a value in [0, 1]",
            ));
        }
        Ok(self.future_value() / (1.0 + inflation).powf(self.duration_years))
    }

    /// Totals over the whole run
    ///
    /// Same reduction as [`aggregate`], plus the context-aware shortcuts:
    /// the tax pass is skipped entirely at a zero tax rate, and an empty
    /// run reports the initial value as its future value.
    pub fn totals(&self) -> Totals {
        let mut totals = aggregate(&self.records);
        if self.tax_rate == 0.0 {
            totals.total_tax = 0.0;
        }
        if self.records.is_empty() {
            totals.future_value = self.initial_value;
        }
        totals
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    fn record(index: u32, contribution: f64, gross: f64, tax: f64, ending: f64) -> PeriodRecord {
        PeriodRecord {
            moment: Moment::Period {
                index,
                label: "Year",
            },
            starting_balance: 0.0,
            contribution,
            contribution_timing: Timing::End,
            gross_interest: gross,
            tax_paid: tax,
            net_interest: gross - tax,
            ending_balance: ending,
        }
    }

    #[test]
    fn test_aggregate_sums_fields() {
        let records = vec![
            record(1, 100.0, 50.0, 12.5, 10_137.5),
            record(2, 100.0, 55.0, 13.75, 10_278.75),
        ];
        let t = aggregate(&records);
        assert_abs_diff_eq!(t.total_contributions, 200.0);
        assert_abs_diff_eq!(t.total_gross_interest, 105.0);
        assert_abs_diff_eq!(t.total_tax, 26.25);
        assert_abs_diff_eq!(t.total_net_interest, 78.75);
        assert_abs_diff_eq!(t.future_value, 10_278.75);
    }

    #[test]
    fn test_aggregate_empty() {
        assert_eq!(aggregate(&[]), Totals::default());
    }

    #[test]
    fn test_empty_projection_future_value_is_initial() {
        let p = Projection::new(1_000.0, 0.5, 0.0, Vec::new());
        assert_eq!(p.future_value(), 1_000.0);
        assert_eq!(p.totals().future_value, 1_000.0);
        assert_eq!(p.totals().total_contributions, 0.0);
    }

    #[test]
    fn test_deflation_validation() {
        let p = Projection::new(1_000.0, 5.0, 0.0, Vec::new());
        assert!(matches!(
            p.future_value_deflated(f64::NAN),
            Err(Error::InvalidArgument(_))
        ));
        assert!(matches!(
            p.future_value_deflated(-0.01),
            Err(Error::OutOfRange { name: "inflation", .. })
        ));
        assert!(matches!(
            p.future_value_deflated(1.5),
            Err(Error::OutOfRange { .. })
        ));
    }

    #[test]
    fn test_deflation_zero_is_identity() {
        let p = Projection::new(1_000.0, 5.0, 0.0, vec![record(1, 0.0, 50.0, 0.0, 1_050.0)]);
        assert_abs_diff_eq!(p.future_value_deflated(0.0).unwrap(), 1_050.0);
    }

    #[test]
    fn test_moment_formatting() {
        let m = Moment::Period {
            index: 7,
            label: "Month",
        };
        assert_eq!(m.label(), "Month");
        assert_eq!(m.value(), "7");

        let d = Moment::Date(NaiveDate::from_ymd_opt(2020, 2, 20).unwrap());
        assert_eq!(d.label(), "Thu");
        assert_eq!(d.value(), "20.02.2020");
    }
}
