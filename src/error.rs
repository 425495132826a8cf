//! Error types for configuration and export boundaries
//!
//! Validation happens eagerly: a scenario either constructs fully or not at
//! all, and the stepping loops never fail once a configuration is accepted.

use thiserror::Error;

/// Errors raised at the configuration and export boundaries
#[derive(Debug, Error)]
pub enum Error {
    /// Input has the wrong shape: unrecognized tag, non-finite number,
    /// or a malformed export filename
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// A finite numeric value falls outside its declared domain
    #[error("{name} out of range: got {value}, expected {expected}")]
    OutOfRange {
        name: &'static str,
        value: f64,
        expected: &'static str,
    },

    /// Writing the CSV breakdown failed
    #[error("export failed: {0}")]
    Export(#[from] csv::Error),
}

impl Error {
    pub(crate) fn invalid(msg: impl Into<String>) -> Self {
        Error::InvalidArgument(msg.into())
    }

    pub(crate) fn out_of_range(name: &'static str, value: f64, expected: &'static str) -> Self {
        Error::OutOfRange {
            name,
            value,
            expected,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_messages() {
        let e = Error::invalid("unknown frequency 'yearly'");
        assert_eq!(e.to_string(), "invalid argument: unknown frequency 'yearly'");

        let e = Error::out_of_range("tax_rate", 1.1, "a value in [0, 1]");
        assert_eq!(
            e.to_string(),
            "tax_rate out of range: got 1.1, expected a value in [0, 1]"
        );
    }
}
