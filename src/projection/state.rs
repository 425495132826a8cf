//! Mutable state owned by a single engine run

use chrono::NaiveDate;

/// Running balance and bookkeeping counters during one projection
///
/// Created fresh by every `run()` call; never shared between runs. The
/// period-index engine derives its compounding points from the period
/// counter, so `last_compounded` is tracked only by the calendar walk.
#[derive(Debug)]
pub(crate) struct AccrualState {
    pub balance: f64,
    pub contributions_applied: u32,
    pub last_compounded: Option<NaiveDate>,
}

impl AccrualState {
    pub fn new(balance: f64) -> Self {
        Self {
            balance,
            contributions_applied: 0,
            last_compounded: None,
        }
    }

    /// Fold a contribution into the balance and count it
    pub fn contribute(&mut self, amount: f64) {
        self.balance += amount;
        self.contributions_applied += 1;
    }

    /// Apply gross interest under the tax rate; returns (tax, net)
    pub fn credit(&mut self, gross: f64, tax_rate: f64) -> (f64, f64) {
        let tax = if tax_rate > 0.0 { gross * tax_rate } else { 0.0 };
        let net = gross - tax;
        self.balance += net;
        (tax, net)
    }
}
