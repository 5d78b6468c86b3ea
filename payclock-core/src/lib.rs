pub mod calculations;
pub mod error;
pub mod models;
pub mod rules;

pub use calculations::{
    AnnualTaxes, BracketTaxCalculator, EarningsAccrualEngine, FederalTaxCalculator,
    JurisdictionTaxCalculator, calculate_federal_tax, calculate_state_tax, compute_accrual,
};
pub use error::CalculationError;
pub use models::*;
pub use rules::{TaxRuleRepository, TaxRuleSource};
