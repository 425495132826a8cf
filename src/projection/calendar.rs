//! Calendar-date accrual engine
//!
//! Generates compounding and contribution dates anchored to the scenario's
//! start date (every event is `start + k * stride`, never a fixed calendar
//! boundary), then walks the sorted union of event dates. Interest accrues
//! over the exact day count between compounding events at an equivalent
//! daily rate, so uneven gaps (month lengths, leap years, fractional
//! horizons) are priced correctly.

use std::collections::BTreeSet;

use chrono::NaiveDate;

use crate::config::CalendarScenario;
use crate::projection::{dates, AccrualState, Moment, PeriodRecord, Projection};
use crate::rates;
use crate::schedule::{Frequency, Timing};

/// Event dates `start + k * stride` for `k0 <= k`, capped at the horizon end
fn event_dates(start: NaiveDate, end: NaiveDate, freq: Frequency, k0: u64) -> BTreeSet<NaiveDate> {
    let stride = freq.stride();
    let mut out = BTreeSet::new();
    let mut k = k0;
    while let Some(date) = dates::offset(start, stride, k) {
        if date > end {
            break;
        }
        out.insert(date);
        k += 1;
    }
    out
}

/// Date-driven engine over a validated [`CalendarScenario`]
pub struct CalendarEngine<'a> {
    scenario: &'a CalendarScenario,
}

impl<'a> CalendarEngine<'a> {
    pub fn new(scenario: &'a CalendarScenario) -> Self {
        Self { scenario }
    }

    /// Produce one record per event date, the start date included
    ///
    /// The start-date row carries only a possible Start-timing contribution.
    /// Unlike the period-index engine, the recorded starting balance is the
    /// balance *before* any same-date contribution; interest still accrues
    /// after a Start contribution and before an End contribution on the
    /// same date.
    pub fn run(&self) -> Projection {
        let s = self.scenario;
        let start = s.start_date();
        let end = s.end_date();
        let timing = s.contribution_timing();
        let daily_rate = rates::daily_rate(s.nominal_rate(), s.rate_basis());

        let compounding_dates = event_dates(start, end, s.compounding(), 1);
        let contribution_dates = if s.contribution() > 0.0 {
            let k0 = match timing {
                Timing::Start => 0,
                Timing::End => 1,
            };
            event_dates(start, end, s.contribution_frequency(), k0)
        } else {
            BTreeSet::new()
        };

        let mut all_dates: BTreeSet<NaiveDate> = BTreeSet::new();
        all_dates.insert(start);
        all_dates.insert(end);
        all_dates.extend(&compounding_dates);
        all_dates.extend(&contribution_dates);

        let mut state = AccrualState::new(s.initial_value());
        state.last_compounded = Some(start);
        let mut records = Vec::with_capacity(all_dates.len());

        let mut initial_contribution = 0.0;
        if timing == Timing::Start && contribution_dates.contains(&start) {
            state.contribute(s.contribution());
            initial_contribution = s.contribution();
        }
        records.push(PeriodRecord {
            moment: Moment::Date(start),
            starting_balance: s.initial_value(),
            contribution: initial_contribution,
            contribution_timing: timing,
            gross_interest: 0.0,
            tax_paid: 0.0,
            net_interest: 0.0,
            ending_balance: state.balance,
        });

        for &date in all_dates.iter().skip(1) {
            let starting_balance = state.balance;
            let mut contribution = 0.0;

            if timing == Timing::Start && contribution_dates.contains(&date) {
                state.contribute(s.contribution());
                contribution += s.contribution();
            }

            let (mut gross_interest, mut tax_paid, mut net_interest) = (0.0, 0.0, 0.0);
            if compounding_dates.contains(&date) {
                let elapsed = dates::days_between(
                    state.last_compounded.unwrap_or(start),
                    date,
                );
                if elapsed > 0 {
                    gross_interest =
                        state.balance * ((1.0 + daily_rate).powf(elapsed as f64) - 1.0);
                    let (tax, net) = state.credit(gross_interest, s.tax_rate());
                    tax_paid = tax;
                    net_interest = net;
                }
                state.last_compounded = Some(date);
            }

            if timing == Timing::End && contribution_dates.contains(&date) {
                state.contribute(s.contribution());
                contribution += s.contribution();
            }

            records.push(PeriodRecord {
                moment: Moment::Date(date),
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
