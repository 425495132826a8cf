//! Period-index accrual engine
//!
//! Steps an abstract grid of `trunc(duration_years * freq)` periods, where
//! `freq` is the finer of the compounding and contribution frequencies.
//! Contributions spread evenly across the grid; interest applies on every
//! `compound_interval`-th period at the periodic rate matching the
//! compounding frequency.

use std::collections::HashSet;

use crate::config::Scenario;
use crate::projection::{AccrualState, Moment, PeriodRecord, Projection};
use crate::rates;
use crate::schedule::Timing;

/// Grid periods on which a contribution lands
///
/// The i-th of `n_contrib` contributions targets period
/// `floor(i * total / n_contrib) + 1` (Start timing) or
/// `floor((i+1) * total / n_contrib)` (End timing), spreading deposits
/// evenly even when the contribution frequency is coarser than the grid.
/// Empty when `n_contrib` is zero; no division happens in that case.
fn deposit_periods(total_periods: u32, n_contrib: u32, timing: Timing) -> HashSet<u32> {
    let mut periods = HashSet::with_capacity(n_contrib as usize);
    if n_contrib == 0 {
        return periods;
    }
    let total = total_periods as f64;
    let n = n_contrib as f64;
    for i in 0..n_contrib {
        let period = match timing {
            Timing::Start => (i as f64 * total / n).floor() as u32 + 1,
            Timing::End => ((i as f64 + 1.0) * total / n).floor() as u32,
        };
        periods.insert(period);
    }
    periods
}

/// Deterministic period-grid engine over a validated [`Scenario`]
pub struct PeriodEngine<'a> {
    scenario: &'a Scenario,
}

impl<'a> PeriodEngine<'a> {
    pub fn new(scenario: &'a Scenario) -> Self {
        Self { scenario }
    }

    /// Produce the full record sequence for the scenario
    ///
    /// The recorded starting balance includes a same-period Start-timing
    /// contribution (interest for that period accrues on it, and the row
    /// reflects the balance the interest was computed on). Fractional
    /// leftover periods beyond the truncated grid are dropped by policy;
    /// a duration shorter than one grid period yields no records and a
    /// future value equal to the initial value.
    pub fn run(&self) -> Projection {
        let s = self.scenario;
        let comp_per_year = s.compounding().per_year();
        let contrib_per_year = s.contribution_frequency().per_year();
        let freq = comp_per_year.max(contrib_per_year);

        let total_periods = (s.duration_years() * freq as f64) as u32;
        // Integer division: the coarser frequency is the stepping unit, so
        // a compounding frequency that does not divide `freq` truncates.
        let compound_interval = freq / comp_per_year;
        let period_rate = rates::periodic_rate(s.annual_rate(), s.compounding());

        let n_contrib = if s.contribution() > 0.0 {
            (s.duration_years() * contrib_per_year as f64) as u32
        } else {
            0
        };
        let timing = s.contribution_timing();
        let deposits = deposit_periods(total_periods, n_contrib, timing);

        let label = if contrib_per_year >= comp_per_year {
            s.contribution_frequency().label()
        } else {
            s.compounding().label()
        };

        let mut state = AccrualState::new(s.initial_value());
        let mut records = Vec::with_capacity(total_periods as usize);

        for period in 1..=total_periods {
            let mut starting_balance = state.balance;
            let mut contribution = 0.0;

            if timing == Timing::Start
                && deposits.contains(&period)
                && state.contributions_applied < n_contrib
            {
                state.contribute(s.contribution());
                contribution = s.contribution();
                starting_balance = state.balance;
            }

            let (mut gross_interest, mut tax_paid, mut net_interest) = (0.0, 0.0, 0.0);
            if period % compound_interval == 0 {
                gross_interest = state.balance * period_rate;
                let (tax, net) = state.credit(gross_interest, s.tax_rate());
                tax_paid = tax;
                net_interest = net;
            }

            if timing == Timing::End
                && deposits.contains(&period)
                && state.contributions_applied < n_contrib
            {
                state.contribute(s.contribution());
                contribution = s.contribution();
            }

            records.push(PeriodRecord {
                moment: Moment::Period {
                    index: period,
                    label,
                },
                starting_balance,
                contribution,
                contribution_timing: timing,
                gross_interest,
                tax_paid,
                net_interest,
                ending_balance: state.balance,
            });
        }

        Projection::new(s.initial_value(), s.duration_years(), s.tax_rate(), records)
    }
}
