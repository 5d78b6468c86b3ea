mod accrual_snapshot;
mod jurisdiction;
mod salary_profile;
mod tax_rule;
mod work_schedule;

pub use accrual_snapshot::{AccrualPhase, AccrualSnapshot, DailyBreakdown};
pub use jurisdiction::JurisdictionKey;
pub use salary_profile::SalaryProfile;
pub use tax_rule::{BracketTable, BracketTier, TaxBracket, TaxRule};
pub use work_schedule::WorkSchedule;
pub(crate) use work_schedule::minutes_since_midnight;
