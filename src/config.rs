//! Scenario configuration and validation
//!
//! Scenarios are immutable once built: every numeric stays inside its
//! declared domain for the life of the object, so the engines can step
//! without any failure paths. Two entry points exist: typed builders for
//! library callers, and [`ScenarioParams`] (a serde mirror with string tags)
//! for JSON scenario files and the CLI boundary.

use std::fmt;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::error::Error;
use crate::projection::dates;
use crate::schedule::{Frequency, RateBasis, Timing};

fn check_finite(name: &'static str, value: f64) -> Result<(), Error> {
    if value.is_finite() {
        Ok(())
    } else {
        Err(Error::invalid(format!("{name} must be a finite number")))
    }
}

fn check_non_negative(name: &'static str, value: f64) -> Result<(), Error> {
    check_finite(name, value)?;
    if value < 0.0 {
        return Err(Error::out_of_range(name, value, "a non-negative value"));
    }
    Ok(())
}

fn check_unit_interval(name: &'static str, value: f64) -> Result<(), Error> {
    check_finite(name, value)?;
    if !(0.0..=1.0).contains(&value) {
        return Err(Error::out_of_range(name, value, "a value in [0, 1]"));
    }
    Ok(())
}

fn check_duration(value: f64) -> Result<(), Error> {
    check_finite("duration_years", value)?;
    if value <= 0.0 || value > 200.0 {
        return Err(Error::out_of_range(
            "duration_years",
            value,
            "a value in (0, 200]",
        ));
    }
    Ok(())
}

/// Validated inputs for the period-index engine
///
/// Construct through [`Scenario::builder`]. Fields are private so the
/// range invariants established at build time cannot be broken afterwards.
#[derive(Debug, Clone, PartialEq)]
pub struct Scenario {
    initial_value: f64,
    annual_rate: f64,
    duration_years: f64,
    compounding: Frequency,
    contribution: f64,
    contribution_frequency: Frequency,
    contribution_timing: Timing,
    tax_rate: f64,
}

impl Scenario {
    /// Start building a scenario from the four required parameters
    pub fn builder(
        initial_value: f64,
        annual_rate: f64,
        duration_years: f64,
        compounding: Frequency,
    ) -> ScenarioBuilder {
        ScenarioBuilder {
            initial_value,
            annual_rate,
            duration_years,
            compounding,
            contribution: 0.0,
            contribution_frequency: None,
            contribution_timing: Timing::End,
            tax_rate: 0.0,
        }
    }

    pub fn initial_value(&self) -> f64 {
        self.initial_value
    }

    pub fn annual_rate(&self) -> f64 {
        self.annual_rate
    }

    pub fn duration_years(&self) -> f64 {
        self.duration_years
    }

    pub fn compounding(&self) -> Frequency {
        self.compounding
    }

    pub fn contribution(&self) -> f64 {
        self.contribution
    }

    pub fn contribution_frequency(&self) -> Frequency {
        self.contribution_frequency
    }

    pub fn contribution_timing(&self) -> Timing {
        self.contribution_timing
    }

    pub fn tax_rate(&self) -> f64 {
        self.tax_rate
    }

    /// Closed-form total of all scheduled contributions
    ///
    /// Exact whenever contribution events divide evenly into the period
    /// grid; with truncation the record-derived total is authoritative.
    pub fn scheduled_contributions(&self) -> f64 {
        self.contribution * self.duration_years * self.contribution_frequency.per_year() as f64
    }
}

impl fmt::Display for Scenario {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Initial Value:   {:.2}", self.initial_value)?;
        writeln!(f, "Annual Rate:     {:.2}%", self.annual_rate * 100.0)?;
        writeln!(f, "Years:           {}", self.duration_years)?;
        writeln!(
            f,
            "Contribution:    {:.2} ({}, {})",
            self.contribution, self.contribution_frequency, self.contribution_timing
        )?;
        writeln!(f, "Compounding:     {}", self.compounding)?;
        if self.tax_rate > 0.0 {
            write!(f, "Tax on Interest: {:.1}%", self.tax_rate * 100.0)
        } else {
            write!(f, "Tax on Interest: none")
        }
    }
}

/// Builder for [`Scenario`]; all validation happens in [`build`](Self::build)
#[derive(Debug, Clone)]
pub struct ScenarioBuilder {
    initial_value: f64,
    annual_rate: f64,
    duration_years: f64,
    compounding: Frequency,
    contribution: f64,
    contribution_frequency: Option<Frequency>,
    contribution_timing: Timing,
    tax_rate: f64,
}

impl ScenarioBuilder {
    /// Periodic contribution amount (default 0)
    pub fn contribution(mut self, amount: f64) -> Self {
        self.contribution = amount;
        self
    }

    /// Contribution frequency (defaults to the compounding frequency)
    pub fn contribution_frequency(mut self, freq: Frequency) -> Self {
        self.contribution_frequency = Some(freq);
        self
    }

    /// Apply contributions before or after each period's interest (default End)
    pub fn contribution_timing(mut self, timing: Timing) -> Self {
        self.contribution_timing = timing;
        self
    }

    /// Tax rate on interest (default 0)
    pub fn tax_rate(mut self, rate: f64) -> Self {
        self.tax_rate = rate;
        self
    }

    pub fn build(self) -> Result<Scenario, Error> {
        check_non_negative("initial_value", self.initial_value)?;
        check_unit_interval("annual_rate", self.annual_rate)?;
        check_duration(self.duration_years)?;
        check_non_negative("contribution", self.contribution)?;
        check_unit_interval("tax_rate", self.tax_rate)?;

        Ok(Scenario {
            initial_value: self.initial_value,
            annual_rate: self.annual_rate,
            duration_years: self.duration_years,
            compounding: self.compounding,
            contribution: self.contribution,
            contribution_frequency: self.contribution_frequency.unwrap_or(self.compounding),
            contribution_timing: self.contribution_timing,
            tax_rate: self.tax_rate,
        })
    }
}

/// Validated inputs for the calendar-date engine
///
/// The rate is nominal per `rate_basis`; the compounding frequency defaults
/// from the basis when not given. The projection horizon end date is fixed
/// at build time so the date walk itself cannot fail.
#[derive(Debug, Clone, PartialEq)]
pub struct CalendarScenario {
    initial_value: f64,
    nominal_rate: f64,
    rate_basis: RateBasis,
    duration_years: f64,
    start_date: NaiveDate,
    end_date: NaiveDate,
    compounding: Frequency,
    contribution: f64,
    contribution_frequency: Frequency,
    contribution_timing: Timing,
    tax_rate: f64,
}

impl CalendarScenario {
    /// Start building a calendar scenario from the required parameters
    pub fn builder(
        initial_value: f64,
        nominal_rate: f64,
        rate_basis: RateBasis,
        duration_years: f64,
        start_date: NaiveDate,
    ) -> CalendarScenarioBuilder {
        CalendarScenarioBuilder {
            initial_value,
            nominal_rate,
            rate_basis,
            duration_years,
            start_date,
            compounding: None,
            contribution: 0.0,
            contribution_frequency: None,
            contribution_timing: Timing::End,
            tax_rate: 0.0,
        }
    }

    pub fn initial_value(&self) -> f64 {
        self.initial_value
    }

    pub fn nominal_rate(&self) -> f64 {
        self.nominal_rate
    }

    pub fn rate_basis(&self) -> RateBasis {
        self.rate_basis
    }

    pub fn duration_years(&self) -> f64 {
        self.duration_years
    }

    pub fn start_date(&self) -> NaiveDate {
        self.start_date
    }

    /// Horizon end: start date plus the duration, by calendar arithmetic
    pub fn end_date(&self) -> NaiveDate {
        self.end_date
    }

    pub fn compounding(&self) -> Frequency {
        self.compounding
    }

    pub fn contribution(&self) -> f64 {
        self.contribution
    }

    pub fn contribution_frequency(&self) -> Frequency {
        self.contribution_frequency
    }

    pub fn contribution_timing(&self) -> Timing {
        self.contribution_timing
    }

    pub fn tax_rate(&self) -> f64 {
        self.tax_rate
    }
}

/// Builder for [`CalendarScenario`]
#[derive(Debug, Clone)]
pub struct CalendarScenarioBuilder {
    initial_value: f64,
    nominal_rate: f64,
    rate_basis: RateBasis,
    duration_years: f64,
    start_date: NaiveDate,
    compounding: Option<Frequency>,
    contribution: f64,
    contribution_frequency: Option<Frequency>,
    contribution_timing: Timing,
    tax_rate: f64,
}

impl CalendarScenarioBuilder {
    /// Override the compounding frequency implied by the rate basis
    pub fn compounding(mut self, freq: Frequency) -> Self {
        self.compounding = Some(freq);
        self
    }

    pub fn contribution(mut self, amount: f64) -> Self {
        self.contribution = amount;
        self
    }

    pub fn contribution_frequency(mut self, freq: Frequency) -> Self {
        self.contribution_frequency = Some(freq);
        self
    }

    pub fn contribution_timing(mut self, timing: Timing) -> Self {
        self.contribution_timing = timing;
        self
    }

    pub fn tax_rate(mut self, rate: f64) -> Self {
        self.tax_rate = rate;
        self
    }

    pub fn build(self) -> Result<CalendarScenario, Error> {
        check_non_negative("initial_value", self.initial_value)?;
        check_unit_interval("nominal_rate", self.nominal_rate)?;
        check_duration(self.duration_years)?;
        check_non_negative("contribution", self.contribution)?;
        check_unit_interval("tax_rate", self.tax_rate)?;

        let end_date = dates::horizon_end(self.start_date, self.duration_years)
            .ok_or_else(|| {
                Error::invalid("start_date plus duration exceeds the supported calendar range")
            })?;

        let compounding = self
            .compounding
            .unwrap_or_else(|| self.rate_basis.default_compounding());

        Ok(CalendarScenario {
            initial_value: self.initial_value,
            nominal_rate: self.nominal_rate,
            rate_basis: self.rate_basis,
            duration_years: self.duration_years,
            start_date: self.start_date,
            end_date,
            compounding,
            contribution: self.contribution,
            contribution_frequency: self.contribution_frequency.unwrap_or(compounding),
            contribution_timing: self.contribution_timing,
            tax_rate: self.tax_rate,
        })
    }
}

fn default_timing_tag() -> String {
    "end".to_string()
}

/// Serde-friendly scenario parameters with string tags
///
/// Mirrors the builder inputs for JSON scenario files; `validate_*` turns
/// the raw values into a checked scenario or fails with the first problem.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScenarioParams {
    pub initial_value: f64,

    /// Annual rate for period scenarios; for calendar scenarios this is the
    /// nominal rate quoted per `rate_basis`
    pub annual_rate: f64,

    pub duration_years: f64,

    /// Compounding frequency tag ("annually", "monthly", ...). For calendar
    /// scenarios this may be omitted to default from the rate basis.
    #[serde(default)]
    pub compounding: Option<String>,

    #[serde(default)]
    pub contribution: f64,

    /// Contribution frequency tag; defaults to the compounding frequency
    #[serde(default)]
    pub contribution_frequency: Option<String>,

    #[serde(default = "default_timing_tag")]
    pub contribution_timing: String,

    #[serde(default)]
    pub tax_rate: f64,

    /// Present only for calendar scenarios
    #[serde(default)]
    pub start_date: Option<NaiveDate>,

    /// Rate basis tag ("p.a.", "p.m.", ...); required with `start_date`
    #[serde(default)]
    pub rate_basis: Option<String>,
}

impl ScenarioParams {
    /// Whether these parameters describe a calendar-date scenario
    pub fn is_calendar(&self) -> bool {
        self.start_date.is_some()
    }

    /// Validate into a period-index scenario
    pub fn validate(&self) -> Result<Scenario, Error> {
        let compounding: Frequency = self
            .compounding
            .as_deref()
            .ok_or_else(|| Error::invalid("compounding frequency is required"))?
            .parse()?;

        let mut builder = Scenario::builder(
            self.initial_value,
            self.annual_rate,
            self.duration_years,
            compounding,
        )
        .contribution(self.contribution)
        .contribution_timing(self.contribution_timing.parse()?)
        .tax_rate(self.tax_rate);

        if let Some(tag) = self.contribution_frequency.as_deref() {
            builder = builder.contribution_frequency(tag.parse()?);
        }
        builder.build()
    }

    /// Validate into a calendar-date scenario
    pub fn validate_calendar(&self) -> Result<CalendarScenario, Error> {
        let start_date = self
            .start_date
            .ok_or_else(|| Error::invalid("start_date is required for a calendar scenario"))?;
        let basis: RateBasis = self
            .rate_basis
            .as_deref()
            .ok_or_else(|| Error::invalid("rate_basis is required with start_date"))?
            .parse()?;

        let mut builder = CalendarScenario::builder(
            self.initial_value,
            self.annual_rate,
            basis,
            self.duration_years,
            start_date,
        )
        .contribution(self.contribution)
        .contribution_timing(self.contribution_timing.parse()?)
        .tax_rate(self.tax_rate);

        if let Some(tag) = self.compounding.as_deref() {
            builder = builder.compounding(tag.parse()?);
        }
        if let Some(tag) = self.contribution_frequency.as_deref() {
            builder = builder.contribution_frequency(tag.parse()?);
        }
        builder.build()
    }
}
