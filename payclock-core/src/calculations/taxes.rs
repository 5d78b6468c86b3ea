use rust_decimal::Decimal;
use tracing::debug;

use crate::calculations::federal::calculate_federal_tax;
use crate::calculations::jurisdiction::calculate_state_tax;
use crate::error::CalculationError;

/// Annual federal and state tax for one income.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct AnnualTaxes {
    pub federal: Decimal,
    pub state: Decimal,
}

impl AnnualTaxes {
    /// Wraps caller-supplied annual amounts.
    ///
    /// # Errors
    ///
    /// Returns [`CalculationError::InvalidArgument`] if either amount is
    /// negative or their sum does not fit in a [`Decimal`].
    pub fn new(
        federal: Decimal,
        state: Decimal,
    ) -> Result<Self, CalculationError> {
        let taxes = Self { federal, state };
        taxes.checked_total()?;
        Ok(taxes)
    }

    /// Estimates both taxes with the built-in 2024 tables.
    ///
    /// Without a jurisdiction the state component is zero.
    ///
    /// # Errors
    ///
    /// Propagates [`CalculationError::UnsupportedJurisdiction`] from the state
    /// lookup.
    pub fn estimate(
        annual_income: Decimal,
        jurisdiction: Option<&str>,
    ) -> Result<Self, CalculationError> {
        let federal = calculate_federal_tax(annual_income);
        let state = match jurisdiction {
            Some(jurisdiction) => calculate_state_tax(annual_income, jurisdiction)?,
            None => Decimal::ZERO,
        };

        debug!(%annual_income, %federal, %state, "estimated annual taxes");
        Ok(Self { federal, state })
    }

    pub fn total(&self) -> Decimal {
        self.federal + self.state
    }

    /// Like [`total`](Self::total), but rejects negative components and
    /// overflow instead of producing a meaningless or panicking sum.
    pub fn checked_total(&self) -> Result<Decimal, CalculationError> {
        for (kind, amount) in [("federal", self.federal), ("state", self.state)] {
            if amount < Decimal::ZERO {
                return Err(CalculationError::invalid(format!(
                    "annual {kind} tax {amount} is negative"
                )));
            }
        }
        self.federal.checked_add(self.state).ok_or_else(|| {
            CalculationError::invalid("annual federal and state tax overflow when added")
        })
    }
}
