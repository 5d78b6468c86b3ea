//! Per-jurisdiction (state) income tax.

use rust_decimal::Decimal;

use crate::calculations::brackets::BracketTaxCalculator;
use crate::calculations::common::round_whole;
use crate::error::CalculationError;
use crate::models::TaxRule;
use crate::rules::{TaxRuleRepository, TaxRuleSource};

/// Resolves a jurisdiction and applies its rule.
pub struct JurisdictionTaxCalculator<'a, S: TaxRuleSource + ?Sized = TaxRuleRepository> {
    source: &'a S,
}

impl<'a, S: TaxRuleSource + ?Sized> JurisdictionTaxCalculator<'a, S> {
    pub fn new(source: &'a S) -> Self {
        Self { source }
    }

    /// Annual tax owed to `jurisdiction` on `annual_income`.
    ///
    /// Income at or below zero yields zero without resolving the
    /// jurisdiction, so an unknown name never fails for zero income.
    ///
    /// # Errors
    ///
    /// Returns [`CalculationError::UnsupportedJurisdiction`] when the source
    /// does not know `jurisdiction`.
    pub fn calculate_tax(
        &self,
        annual_income: Decimal,
        jurisdiction: &str,
    ) -> Result<Decimal, CalculationError> {
        if annual_income <= Decimal::ZERO {
            return Ok(Decimal::ZERO);
        }

        let rule = self.source.resolve(jurisdiction)?;
        Ok(apply_rule(rule, annual_income))
    }
}

impl Default for JurisdictionTaxCalculator<'static> {
    fn default() -> Self {
        Self::new(TaxRuleRepository::builtin())
    }
}

/// Applies a resolved rule to a positive income.
pub fn apply_rule(
    rule: &TaxRule,
    annual_income: Decimal,
) -> Decimal {
    match rule {
        TaxRule::None => Decimal::ZERO,
        TaxRule::Flat { rate } => round_whole(annual_income * *rate),
        TaxRule::Progressive { brackets } => {
            BracketTaxCalculator::new(brackets).evaluate(annual_income)
        }
    }
}

/// 2024 state income tax for a single filer, by full name or postal code.
pub fn calculate_state_tax(
    annual_income: Decimal,
    jurisdiction: &str,
) -> Result<Decimal, CalculationError> {
    JurisdictionTaxCalculator::new(TaxRuleRepository::builtin())
        .calculate_tax(annual_income, jurisdiction)
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rust_decimal_macros::dec;

    use super::*;

    /// A source that fails the test if it is ever consulted.
    struct UnreachableSource;

    impl TaxRuleSource for UnreachableSource {
        fn resolve(
            &self,
            jurisdiction: &str,
        ) -> Result<&TaxRule, CalculationError> {
            panic!("resolve called for {jurisdiction}");
        }
    }

    // =========================================================================
    // dispatch tests
    // =========================================================================

    #[test]
    fn progressive_california_on_85000() {
        // 104.12 + 285.44 + 571 + 907.32 + 1141.52 + 1548.45 = 4557.85
        assert_eq!(calculate_state_tax(dec!(85000), "CA"), Ok(dec!(4558)));
    }

    #[test]
    fn alias_matches_full_name() {
        assert_eq!(
            calculate_state_tax(dec!(85000), "CA"),
            calculate_state_tax(dec!(85000), "California")
        );
    }

    #[test]
    fn no_tax_texas_is_zero() {
        assert_eq!(calculate_state_tax(dec!(250000), "TX"), Ok(dec!(0)));
    }

    #[test]
    fn flat_pennsylvania_is_exact() {
        // 100000 * 0.0307
        assert_eq!(calculate_state_tax(dec!(100000), "PA"), Ok(dec!(3070)));
    }

    #[test]
    fn flat_north_carolina_by_spaced_name() {
        // 85000 * 0.045
        assert_eq!(
            calculate_state_tax(dec!(85000), "  north   CAROLINA "),
            Ok(dec!(3825))
        );
    }

    #[test]
    fn mississippi_first_10000_untaxed() {
        assert_eq!(calculate_state_tax(dec!(5000), "MS"), Ok(dec!(0)));
        assert_eq!(calculate_state_tax(dec!(50000), "MS"), Ok(dec!(1880)));
    }

    #[test]
    fn delaware_below_first_threshold_is_untaxed() {
        assert_eq!(calculate_state_tax(dec!(1500), "DE"), Ok(dec!(0)));
    }

    // =========================================================================
    // error and degenerate input tests
    // =========================================================================

    #[test]
    fn unknown_jurisdiction_fails() {
        let result = calculate_state_tax(dec!(85000), "Ontario");

        assert_eq!(
            result,
            Err(CalculationError::UnsupportedJurisdiction(
                "Ontario".to_string()
            ))
        );
    }

    #[test]
    fn zero_income_with_unknown_jurisdiction_is_zero() {
        assert_eq!(calculate_state_tax(dec!(0), "Ontario"), Ok(dec!(0)));
    }

    #[test]
    fn non_positive_income_never_resolves() {
        let calculator = JurisdictionTaxCalculator::new(&UnreachableSource);

        assert_eq!(calculator.calculate_tax(dec!(-10), "anything"), Ok(dec!(0)));
        assert_eq!(calculator.calculate_tax(dec!(0), "anything"), Ok(dec!(0)));
    }

    #[test]
    fn custom_repository_is_used() {
        let repository = TaxRuleRepository::from_tables(
            [("freedonia", TaxRule::Flat { rate: dec!(0.1) })],
            [("fr", "freedonia")],
        )
        .unwrap();
        let calculator = JurisdictionTaxCalculator::new(&repository);

        assert_eq!(calculator.calculate_tax(dec!(1234), "FR"), Ok(dec!(123)));
    }

    #[test]
    fn apply_rule_none_is_zero() {
        assert_eq!(apply_rule(&TaxRule::None, dec!(1000000)), dec!(0));
    }
}
