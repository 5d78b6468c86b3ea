use rust_decimal::Decimal;

use crate::calculations::common::round_cents;

/// Where an instant falls relative to the work window.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AccrualPhase {
    /// Saturday or Sunday; nothing accrues.
    NonWorkday,
    BeforeStart,
    /// Inside the window, both edges inclusive.
    During,
    AfterEnd,
}

/// Earned and tax-paid amounts for a single instant.
///
/// Amounts are unrounded; use [`AccrualSnapshot::rounded`] for display.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AccrualSnapshot {
    pub earned: Decimal,
    pub tax_paid: Decimal,
    pub phase: AccrualPhase,
}

impl AccrualSnapshot {
    pub fn zero(phase: AccrualPhase) -> Self {
        Self {
            earned: Decimal::ZERO,
            tax_paid: Decimal::ZERO,
            phase,
        }
    }

    /// Copy of the snapshot with both amounts rounded to cents.
    pub fn rounded(&self) -> Self {
        Self {
            earned: round_cents(self.earned),
            tax_paid: round_cents(self.tax_paid),
            phase: self.phase,
        }
    }
}

/// Per-day figures derived from annual totals over 260 working days.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DailyBreakdown {
    pub gross: Decimal,
    pub federal_tax: Decimal,
    pub state_tax: Decimal,
    pub total_tax: Decimal,
    pub net: Decimal,
}

impl DailyBreakdown {
    /// Share of the daily net already earned, as a percentage with two
    /// decimals. `None` when the daily net is zero.
    pub fn earned_percent(
        &self,
        snapshot: &AccrualSnapshot,
    ) -> Option<Decimal> {
        snapshot
            .earned
            .checked_div(self.net)
            .map(|share| round_cents(share * Decimal::ONE_HUNDRED))
    }
}
