//! Error types shared by every calculation in the crate.

use thiserror::Error;

/// Errors that can occur while resolving tax rules or computing accruals.
///
/// Every failure is local to the single call that produced it; nothing here
/// is retryable because the calculations are deterministic.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum CalculationError {
    /// The jurisdiction did not normalize to any known name or postal code.
    #[error("unsupported jurisdiction \"{0}\"")]
    UnsupportedJurisdiction(String),

    /// An input was outside the domain the calculation accepts.
    #[error("invalid argument: {0}")]
    InvalidArgument(String),
}

impl CalculationError {
    pub(crate) fn invalid(message: impl Into<String>) -> Self {
        Self::InvalidArgument(message.into())
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn unsupported_jurisdiction_quotes_the_raw_input() {
        let error = CalculationError::UnsupportedJurisdiction("Atlantis".to_string());

        assert_eq!(error.to_string(), "unsupported jurisdiction \"Atlantis\"");
    }

    #[test]
    fn invalid_argument_carries_the_message() {
        let error = CalculationError::invalid("salary must not be negative");

        assert_eq!(
            error.to_string(),
            "invalid argument: salary must not be negative"
        );
    }
}
