use rust_decimal::Decimal;

use crate::error::CalculationError;

/// Annual gross salary in whole currency units, never negative.
///
/// No rounding is applied here; cents are only rounded on outputs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SalaryProfile {
    annual_gross: Decimal,
}

impl SalaryProfile {
    /// # Errors
    ///
    /// Returns [`CalculationError::InvalidArgument`] for a negative amount.
    pub fn new(annual_gross: Decimal) -> Result<Self, CalculationError> {
        if annual_gross.is_sign_negative() && !annual_gross.is_zero() {
            return Err(CalculationError::invalid(format!(
                "annual salary must not be negative, got {annual_gross}"
            )));
        }
        Ok(Self { annual_gross })
    }

    pub fn annual_gross(&self) -> Decimal {
        self.annual_gross
    }
}
