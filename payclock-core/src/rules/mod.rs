//! Tax rule tables and the repository that resolves jurisdictions to them.
//!
//! The tables hold 2024 single-filer figures. They are built once on first
//! use and never mutated afterwards.

mod federal;
pub mod repository;
mod tables;

pub use federal::federal_brackets_2024;
pub use repository::{TaxRuleRepository, TaxRuleSource};
