//! Tax and earnings calculations.
//!
//! Everything here is a pure function of its inputs: no I/O, no shared
//! mutable state, safe to call on every timer tick.

pub mod accrual;
pub mod brackets;
pub mod common;
pub mod federal;
pub mod jurisdiction;
pub mod taxes;

pub use accrual::{EarningsAccrualEngine, WORKING_DAYS_PER_YEAR, compute_accrual};
pub use brackets::BracketTaxCalculator;
pub use federal::{FederalTaxCalculator, calculate_federal_tax};
pub use jurisdiction::{JurisdictionTaxCalculator, calculate_state_tax};
pub use taxes::AnnualTaxes;
