//! Marginal-bracket tax evaluation.
//!
//! This is the only place progressive tax math lives. Federal and state
//! calculators both delegate here.

use rust_decimal::Decimal;

use crate::calculations::common::round_whole;
use crate::models::BracketTable;

/// Evaluates progressive tax against one bracket table.
#[derive(Debug, Clone, Copy)]
pub struct BracketTaxCalculator<'a> {
    table: &'a BracketTable,
}

impl<'a> BracketTaxCalculator<'a> {
    pub fn new(table: &'a BracketTable) -> Self {
        Self { table }
    }

    /// Tax owed on `income`, rounded to whole currency units.
    ///
    /// Each bracket taxes the slice of income between its threshold and the
    /// next bracket's threshold. Iteration stops at the first bracket whose
    /// threshold is not exceeded, so income at or below the first threshold
    /// is untaxed even when that threshold is above zero.
    pub fn evaluate(
        &self,
        income: Decimal,
    ) -> Decimal {
        if income <= Decimal::ZERO {
            return Decimal::ZERO;
        }

        let mut tax = Decimal::ZERO;
        for tier in self.table.tiers() {
            if income <= tier.lower {
                break;
            }
            let top = tier.upper.map_or(income, |upper| income.min(upper));
            tax += (top - tier.lower) * tier.rate;
        }

        round_whole(tax)
    }
}
