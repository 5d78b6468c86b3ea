//! Federal income tax against the fixed 2024 single-filer schedule.

use rust_decimal::Decimal;

use crate::calculations::brackets::BracketTaxCalculator;
use crate::models::BracketTable;
use crate::rules::federal_brackets_2024;

/// Federal tax calculator bound to one bracket table.
///
/// [`FederalTaxCalculator::default`] uses the built-in 2024 schedule.
#[derive(Debug, Clone, Copy)]
pub struct FederalTaxCalculator<'a> {
    brackets: &'a BracketTable,
}

impl<'a> FederalTaxCalculator<'a> {
    pub fn new(brackets: &'a BracketTable) -> Self {
        Self { brackets }
    }

    /// Annual federal tax in whole currency units. Zero for income <= 0.
    pub fn calculate_tax(
        &self,
        annual_income: Decimal,
    ) -> Decimal {
        BracketTaxCalculator::new(self.brackets).evaluate(annual_income)
    }
}

impl Default for FederalTaxCalculator<'static> {
    fn default() -> Self {
        Self::new(federal_brackets_2024())
    }
}

/// 2024 federal income tax for a single filer.
pub fn calculate_federal_tax(annual_income: Decimal) -> Decimal {
    FederalTaxCalculator::default().calculate_tax(annual_income)
}
