//! Frequency, rate basis, and contribution timing enums
//!
//! These carry the fixed occurrences-per-year constants used by both
//! engines, the grid labels used in breakdown output, and the calendar
//! strides used by the date-driven engine.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::Error;

/// How often an event (compounding or contribution) occurs
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Frequency {
    Annually,
    Semiannually,
    Quarterly,
    Monthly,
    Biweekly,
    Weekly,
    Daily,
}

/// Calendar stride between consecutive events of a frequency
///
/// Month-granular frequencies step by calendar months (with day-of-month
/// clamping); the finer ones step by exact day counts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Stride {
    Months(u32),
    Days(u64),
}

impl Frequency {
    /// Fixed occurrences per year for this frequency
    pub const fn per_year(self) -> u32 {
        match self {
            Frequency::Annually => 1,
            Frequency::Semiannually => 2,
            Frequency::Quarterly => 4,
            Frequency::Monthly => 12,
            Frequency::Biweekly => 26,
            Frequency::Weekly => 52,
            Frequency::Daily => 365,
        }
    }

    /// Human label for one grid step at this frequency
    pub const fn label(self) -> &'static str {
        match self {
            Frequency::Annually => "Year",
            Frequency::Semiannually => "Semester",
            Frequency::Quarterly => "Quarter",
            Frequency::Monthly => "Month",
            Frequency::Biweekly => "Biweek",
            Frequency::Weekly => "Week",
            Frequency::Daily => "Day",
        }
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            Frequency::Annually => "annually",
            Frequency::Semiannually => "semiannually",
            Frequency::Quarterly => "quarterly",
            Frequency::Monthly => "monthly",
            Frequency::Biweekly => "biweekly",
            Frequency::Weekly => "weekly",
            Frequency::Daily => "daily",
        }
    }

    pub(crate) const fn stride(self) -> Stride {
        match self {
            Frequency::Annually => Stride::Months(12),
            Frequency::Semiannually => Stride::Months(6),
            Frequency::Quarterly => Stride::Months(3),
            Frequency::Monthly => Stride::Months(1),
            Frequency::Biweekly => Stride::Days(14),
            Frequency::Weekly => Stride::Days(7),
            Frequency::Daily => Stride::Days(1),
        }
    }
}

impl fmt::Display for Frequency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Frequency {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Error> {
        match s.trim().to_lowercase().as_str() {
            "annually" => Ok(Frequency::Annually),
            "semiannually" => Ok(Frequency::Semiannually),
            "quarterly" => Ok(Frequency::Quarterly),
            "monthly" => Ok(Frequency::Monthly),
            "biweekly" => Ok(Frequency::Biweekly),
            "weekly" => Ok(Frequency::Weekly),
            "daily" => Ok(Frequency::Daily),
            other => Err(Error::invalid(format!("unknown frequency '{other}'"))),
        }
    }
}

/// Periodicity a nominal rate is quoted in
///
/// Tags follow the conventional abbreviations: "p.a.", "p.s.", "p.q.",
/// "p.m.", "p.biw.", "p.w.", "p.d.".
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RateBasis {
    Annual,
    Semiannual,
    Quarterly,
    Monthly,
    Biweekly,
    Weekly,
    Daily,
}

impl RateBasis {
    /// Number of rate periods per year for this basis
    pub const fn periods_per_year(self) -> u32 {
        match self {
            RateBasis::Annual => 1,
            RateBasis::Semiannual => 2,
            RateBasis::Quarterly => 4,
            RateBasis::Monthly => 12,
            RateBasis::Biweekly => 26,
            RateBasis::Weekly => 52,
            RateBasis::Daily => 365,
        }
    }

    /// Compounding frequency implied by the basis when none is given
    pub const fn default_compounding(self) -> Frequency {
        match self {
            RateBasis::Annual => Frequency::Annually,
            RateBasis::Semiannual => Frequency::Semiannually,
            RateBasis::Quarterly => Frequency::Quarterly,
            RateBasis::Monthly => Frequency::Monthly,
            RateBasis::Biweekly => Frequency::Biweekly,
            RateBasis::Weekly => Frequency::Weekly,
            RateBasis::Daily => Frequency::Daily,
        }
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            RateBasis::Annual => "p.a.",
            RateBasis::Semiannual => "p.s.",
            RateBasis::Quarterly => "p.q.",
            RateBasis::Monthly => "p.m.",
            RateBasis::Biweekly => "p.biw.",
            RateBasis::Weekly => "p.w.",
            RateBasis::Daily => "p.d.",
        }
    }
}

impl fmt::Display for RateBasis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for RateBasis {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Error> {
        match s.trim().to_lowercase().as_str() {
            "p.a." => Ok(RateBasis::Annual),
            "p.s." => Ok(RateBasis::Semiannual),
            "p.q." => Ok(RateBasis::Quarterly),
            "p.m." => Ok(RateBasis::Monthly),
            "p.biw." => Ok(RateBasis::Biweekly),
            "p.w." => Ok(RateBasis::Weekly),
            "p.d." => Ok(RateBasis::Daily),
            other => Err(Error::invalid(format!("unknown rate basis '{other}'"))),
        }
    }
}

/// Whether a contribution lands before or after its period's interest
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Timing {
    Start,
    End,
}

impl Timing {
    pub const fn as_str(self) -> &'static str {
        match self {
            Timing::Start => "start",
            Timing::End => "end",
        }
    }
}

impl fmt::Display for Timing {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Timing {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Error> {
        match s.trim().to_lowercase().as_str() {
            "start" => Ok(Timing::Start),
            "end" => Ok(Timing::End),
            other => Err(Error::invalid(format!(
                "contribution timing must be 'start' or 'end', got '{other}'"
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_per_year_constants() {
        assert_eq!(Frequency::Annually.per_year(), 1);
        assert_eq!(Frequency::Semiannually.per_year(), 2);
        assert_eq!(Frequency::Quarterly.per_year(), 4);
        assert_eq!(Frequency::Monthly.per_year(), 12);
        assert_eq!(Frequency::Biweekly.per_year(), 26);
        assert_eq!(Frequency::Weekly.per_year(), 52);
        assert_eq!(Frequency::Daily.per_year(), 365);
    }

    #[test]
    fn test_frequency_parsing() {
        assert_eq!("monthly".parse::<Frequency>().unwrap(), Frequency::Monthly);
        assert_eq!(
            "  Quarterly ".parse::<Frequency>().unwrap(),
            Frequency::Quarterly
        );

        let err = "yearly".parse::<Frequency>().unwrap_err();
        assert!(matches!(err, Error::InvalidArgument(_)));
    }

    #[test]
    fn test_rate_basis_parsing_and_defaults() {
        assert_eq!("p.m.".parse::<RateBasis>().unwrap(), RateBasis::Monthly);
        assert_eq!(
            RateBasis::Monthly.default_compounding(),
            Frequency::Monthly
        );
        assert_eq!(RateBasis::Biweekly.periods_per_year(), 26);
        assert!("pm".parse::<RateBasis>().is_err());
    }

    #[test]
    fn test_timing_parsing() {
        assert_eq!("start".parse::<Timing>().unwrap(), Timing::Start);
        assert_eq!("END".parse::<Timing>().unwrap(), Timing::End);
        assert!("middle".parse::<Timing>().is_err());
    }

    #[test]
    fn test_labels() {
        assert_eq!(Frequency::Monthly.label(), "Month");
        assert_eq!(Frequency::Biweekly.label(), "Biweek");
        assert_eq!(Frequency::Annually.label(), "Year");
    }
}
