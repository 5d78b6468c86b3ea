use rust_decimal::Decimal;

use crate::error::CalculationError;

/// A single `(threshold, rate)` pair.
///
/// The rate applies to income above `threshold` up to the next bracket's
/// threshold.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TaxBracket {
    pub threshold: Decimal,
    pub rate: Decimal,
}

impl TaxBracket {
    pub fn new(
        threshold: Decimal,
        rate: Decimal,
    ) -> Self {
        Self { threshold, rate }
    }
}

/// A bracket with its effective upper edge resolved.
///
/// `upper` is `None` for the top bracket, which has no upper bound.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BracketTier {
    pub lower: Decimal,
    pub upper: Option<Decimal>,
    pub rate: Decimal,
}

/// An ordered progressive bracket table.
///
/// Thresholds are strictly ascending and rates lie in (0, 1). A first
/// threshold above zero leaves the income below it untaxed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BracketTable {
    brackets: Vec<TaxBracket>,
}

impl BracketTable {
    /// Builds a table after checking its ordering and rate invariants.
    ///
    /// # Errors
    ///
    /// Returns [`CalculationError::InvalidArgument`] if the table is empty,
    /// a threshold is negative, thresholds are not strictly ascending, or a
    /// rate falls outside (0, 1).
    pub fn new(brackets: Vec<TaxBracket>) -> Result<Self, CalculationError> {
        if brackets.is_empty() {
            return Err(CalculationError::invalid("bracket table is empty"));
        }

        for (index, bracket) in brackets.iter().enumerate() {
            if bracket.threshold.is_sign_negative() {
                return Err(CalculationError::invalid(format!(
                    "bracket {index} has negative threshold {}",
                    bracket.threshold
                )));
            }
            if !is_fraction(bracket.rate) {
                return Err(CalculationError::invalid(format!(
                    "bracket {index} has rate {} outside (0, 1)",
                    bracket.rate
                )));
            }
        }

        if let Some(pair) = brackets
            .windows(2)
            .find(|pair| pair[1].threshold <= pair[0].threshold)
        {
            return Err(CalculationError::invalid(format!(
                "bracket thresholds must be strictly ascending ({} then {})",
                pair[0].threshold, pair[1].threshold
            )));
        }

        Ok(Self { brackets })
    }

    /// Builds a table from trusted static data without validation.
    pub(crate) fn from_trusted(brackets: &[(Decimal, Decimal)]) -> Self {
        Self {
            brackets: brackets
                .iter()
                .map(|&(threshold, rate)| TaxBracket::new(threshold, rate))
                .collect(),
        }
    }

    pub fn brackets(&self) -> &[TaxBracket] {
        &self.brackets
    }

    /// Iterates the brackets in ascending order with upper edges resolved.
    pub fn tiers(&self) -> impl Iterator<Item = BracketTier> + '_ {
        self.brackets.iter().enumerate().map(|(index, bracket)| BracketTier {
            lower: bracket.threshold,
            upper: self.brackets.get(index + 1).map(|next| next.threshold),
            rate: bracket.rate,
        })
    }
}

/// How a jurisdiction taxes income.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TaxRule {
    /// No income tax at all.
    None,
    /// A single rate applied to total income.
    Flat { rate: Decimal },
    /// Marginal rates summed across brackets.
    Progressive { brackets: BracketTable },
}

impl TaxRule {
    /// Builds a flat rule, rejecting rates outside (0, 1).
    pub fn flat(rate: Decimal) -> Result<Self, CalculationError> {
        if !is_fraction(rate) {
            return Err(CalculationError::invalid(format!(
                "flat rate {rate} outside (0, 1)"
            )));
        }
        Ok(Self::Flat { rate })
    }

    pub fn progressive(brackets: Vec<TaxBracket>) -> Result<Self, CalculationError> {
        Ok(Self::Progressive {
            brackets: BracketTable::new(brackets)?,
        })
    }

    pub fn kind(&self) -> &'static str {
        match self {
            Self::None => "none",
            Self::Flat { .. } => "flat",
            Self::Progressive { .. } => "progressive",
        }
    }
}

fn is_fraction(rate: Decimal) -> bool {
    rate > Decimal::ZERO && rate < Decimal::ONE
}
