//! Accrual engines producing ordered per-period records and derived totals
//!
//! Two engines share one record model:
//! - [`PeriodEngine`] steps an abstract period grid derived from the
//!   compounding and contribution frequencies.
//! - [`CalendarEngine`] walks real event dates anchored to a start date.
//!
//! Every run allocates fresh state and returns an independently owned
//! [`Projection`]; nothing is cached or shared between runs.

mod calendar;
pub(crate) mod dates;
mod period;
mod records;
mod state;

pub use calendar::CalendarEngine;
pub use period::PeriodEngine;
pub use records::{aggregate, Moment, PeriodRecord, Projection, Totals};

pub(crate) use state::AccrualState;
