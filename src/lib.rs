//! Compound interest projection engine
//!
//! This library provides:
//! - A period-index accrual engine (abstract period grid, no calendar)
//! - A calendar-date accrual engine (event dates anchored to a start date)
//! - Contribution scheduling with start/end-of-period timing and tax on interest
//! - Nominal-to-effective annual rate conversion
//! - Summary rendering and CSV export of the per-period breakdown

pub mod config;
pub mod error;
pub mod projection;
pub mod rates;
pub mod report;
pub mod schedule;

// Re-export commonly used types
pub use config::{CalendarScenario, Scenario, ScenarioParams};
pub use error::Error;
pub use projection::{aggregate, CalendarEngine, Moment, PeriodEngine, PeriodRecord, Projection, Totals};
pub use rates::{convert_rate, effective_annual_rate};
pub use schedule::{Frequency, RateBasis, Timing};
