//! Time-of-day earnings accrual.
//!
//! Turns an annual salary and annual tax totals into "earned so far today"
//! and "tax paid so far today" for any instant. Annual figures are spread
//! over a fixed 260 working days (5 days x 52 weeks), independent of the
//! actual calendar, while the workday gate separately zeroes weekends.

use chrono::{Datelike, NaiveDateTime, Weekday};
use rust_decimal::Decimal;

use crate::calculations::taxes::AnnualTaxes;
use crate::error::CalculationError;
use crate::models::{
    AccrualPhase, AccrualSnapshot, DailyBreakdown, SalaryProfile, WorkSchedule,
    minutes_since_midnight,
};

/// Working days used to annualize salary and tax.
pub const WORKING_DAYS_PER_YEAR: u32 = 5 * 52;

/// Accrual calculator for one salary, tax estimate, and work window.
///
/// Construction does all the per-day division once; [`accrual_at`] is then
/// cheap enough to call on every display tick.
///
/// [`accrual_at`]: EarningsAccrualEngine::accrual_at
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EarningsAccrualEngine {
    schedule: WorkSchedule,
    daily: DailyBreakdown,
}

impl EarningsAccrualEngine {
    /// # Errors
    ///
    /// Returns [`CalculationError::InvalidArgument`] if `taxes` holds a
    /// negative amount or the two taxes overflow when added.
    pub fn new(
        salary: SalaryProfile,
        taxes: AnnualTaxes,
        schedule: WorkSchedule,
    ) -> Result<Self, CalculationError> {
        let days = Decimal::from(WORKING_DAYS_PER_YEAR);
        let gross = salary.annual_gross() / days;
        let federal_tax = taxes.federal / days;
        let state_tax = taxes.state / days;
        let total_tax = taxes.checked_total()? / days;

        Ok(Self {
            schedule,
            daily: DailyBreakdown {
                gross,
                federal_tax,
                state_tax,
                total_tax,
                net: gross - total_tax,
            },
        })
    }

    pub fn schedule(&self) -> WorkSchedule {
        self.schedule
    }

    pub fn daily_breakdown(&self) -> DailyBreakdown {
        self.daily
    }

    /// Classifies `now` against the workday gate and the work window.
    pub fn phase_at(
        &self,
        now: NaiveDateTime,
    ) -> AccrualPhase {
        if matches!(now.weekday(), Weekday::Sat | Weekday::Sun) {
            return AccrualPhase::NonWorkday;
        }

        let current = minutes_since_midnight(now);
        if current < self.schedule.start_minutes() {
            AccrualPhase::BeforeStart
        } else if current > self.schedule.end_minutes() {
            AccrualPhase::AfterEnd
        } else {
            AccrualPhase::During
        }
    }

    /// Earned and tax-paid amounts at `now`, unrounded.
    ///
    /// Seconds contribute a fractional minute so the value moves on every
    /// tick rather than once a minute.
    pub fn accrual_at(
        &self,
        now: NaiveDateTime,
    ) -> AccrualSnapshot {
        let phase = self.phase_at(now);
        match phase {
            AccrualPhase::NonWorkday | AccrualPhase::BeforeStart => AccrualSnapshot::zero(phase),
            AccrualPhase::AfterEnd => AccrualSnapshot {
                earned: self.daily.net,
                tax_paid: self.daily.total_tax,
                phase,
            },
            AccrualPhase::During => {
                let elapsed = minutes_since_midnight(now) - self.schedule.start_minutes();
                let fraction = elapsed / self.schedule.total_minutes();
                AccrualSnapshot {
                    earned: fraction * self.daily.net,
                    tax_paid: fraction * self.daily.total_tax,
                    phase,
                }
            }
        }
    }
}

/// One-shot accrual from raw inputs.
///
/// # Errors
///
/// Returns [`CalculationError::InvalidArgument`] for a negative salary or
/// tax, taxes too large to add, a malformed `"HH:MM"` time, or a work end
/// that is not after the start.
pub fn compute_accrual(
    salary: Decimal,
    annual_federal_tax: Decimal,
    annual_state_tax: Decimal,
    work_start: &str,
    work_end: &str,
    now: NaiveDateTime,
) -> Result<AccrualSnapshot, CalculationError> {
    let salary = SalaryProfile::new(salary)?;
    let schedule = WorkSchedule::parse(work_start, work_end)?;
    let taxes = AnnualTaxes::new(annual_federal_tax, annual_state_tax)?;

    Ok(EarningsAccrualEngine::new(salary, taxes, schedule)?.accrual_at(now))
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;
    use pretty_assertions::assert_eq;
    use rust_decimal_macros::dec;

    use super::*;
    use crate::calculations::common::{round_cents, round_whole};

    // 2024-01-15 is a Monday.
    fn monday_at(
        hour: u32,
        minute: u32,
        second: u32,
    ) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 1, 15)
            .unwrap()
            .and_hms_opt(hour, minute, second)
            .unwrap()
    }

    fn engine() -> EarningsAccrualEngine {
        EarningsAccrualEngine::new(
            SalaryProfile::new(dec!(85000)).unwrap(),
            AnnualTaxes {
                federal: dec!(13753),
                state: dec!(4558),
            },
            WorkSchedule::parse("09:00", "17:00").unwrap(),
        )
        .unwrap()
    }

    // =========================================================================
    // daily breakdown tests
    // =========================================================================

    #[test]
    fn daily_breakdown_divides_by_260() {
        let daily = engine().daily_breakdown();

        assert_eq!(round_cents(daily.gross), dec!(326.92));
        assert_eq!(round_cents(daily.federal_tax), dec!(52.90));
        assert_eq!(round_cents(daily.state_tax), dec!(17.53));
        assert_eq!(round_cents(daily.total_tax), dec!(70.43));
        assert_eq!(round_cents(daily.net), dec!(256.50));
    }

    // =========================================================================
    // workday gate tests
    // =========================================================================

    #[test]
    fn saturday_accrues_nothing() {
        let saturday = NaiveDate::from_ymd_opt(2024, 1, 13)
            .unwrap()
            .and_hms_opt(13, 0, 0)
            .unwrap();

        assert_eq!(
            engine().accrual_at(saturday),
            AccrualSnapshot::zero(AccrualPhase::NonWorkday)
        );
    }

    #[test]
    fn sunday_after_hours_accrues_nothing() {
        let sunday = NaiveDate::from_ymd_opt(2024, 1, 14)
            .unwrap()
            .and_hms_opt(23, 59, 59)
            .unwrap();

        assert_eq!(
            engine().accrual_at(sunday),
            AccrualSnapshot::zero(AccrualPhase::NonWorkday)
        );
    }

    // =========================================================================
    // intraday phase tests
    // =========================================================================

    #[test]
    fn one_minute_before_start_is_zero() {
        let snapshot = engine().accrual_at(monday_at(8, 59, 0));

        assert_eq!(snapshot, AccrualSnapshot::zero(AccrualPhase::BeforeStart));
    }

    #[test]
    fn exactly_at_start_is_during_with_zero() {
        let snapshot = engine().accrual_at(monday_at(9, 0, 0));

        assert_eq!(snapshot.phase, AccrualPhase::During);
        assert_eq!(snapshot.earned, dec!(0));
        assert_eq!(snapshot.tax_paid, dec!(0));
    }

    #[test]
    fn halfway_through_the_day_is_half() {
        let snapshot = engine().accrual_at(monday_at(13, 0, 0)).rounded();

        assert_eq!(snapshot.earned, dec!(128.25));
        assert_eq!(snapshot.tax_paid, dec!(35.21));
    }

    #[test]
    fn seconds_move_the_value_within_a_minute() {
        let snapshot = engine().accrual_at(monday_at(9, 0, 30)).rounded();

        // half a minute of a 480 minute day
        assert_eq!(snapshot.earned, dec!(0.27));
        assert_eq!(snapshot.tax_paid, dec!(0.07));
    }

    #[test]
    fn exactly_at_end_is_the_full_day() {
        let engine = engine();
        let snapshot = engine.accrual_at(monday_at(17, 0, 0));

        assert_eq!(snapshot.phase, AccrualPhase::During);
        assert_eq!(snapshot.earned, engine.daily_breakdown().net);
        assert_eq!(round_whole(snapshot.earned), round_whole(dec!(66689) / dec!(260)));
        assert_eq!(round_whole(snapshot.earned), dec!(256));
        assert_eq!(round_whole(snapshot.tax_paid), dec!(70));
    }

    #[test]
    fn after_end_is_the_full_day() {
        let engine = engine();
        let snapshot = engine.accrual_at(monday_at(17, 0, 1));

        assert_eq!(snapshot.phase, AccrualPhase::AfterEnd);
        assert_eq!(snapshot.earned, engine.daily_breakdown().net);
        assert_eq!(snapshot.tax_paid, engine.daily_breakdown().total_tax);
    }

    #[test]
    fn accrual_grows_through_the_day() {
        let engine = engine();

        let ten = engine.accrual_at(monday_at(10, 0, 0));
        let eleven = engine.accrual_at(monday_at(11, 0, 0));

        assert!(ten.earned < eleven.earned);
        assert!(ten.tax_paid < eleven.tax_paid);
    }

    #[test]
    fn earned_percent_at_quarter_day() {
        let engine = engine();
        let snapshot = engine.accrual_at(monday_at(11, 0, 0));

        assert_eq!(
            engine.daily_breakdown().earned_percent(&snapshot),
            Some(dec!(25.00))
        );
    }

    // =========================================================================
    // compute_accrual tests
    // =========================================================================

    #[test]
    fn compute_accrual_matches_engine() {
        let snapshot = compute_accrual(
            dec!(85000),
            dec!(13753),
            dec!(4558),
            "09:00",
            "17:00",
            monday_at(13, 0, 0),
        )
        .unwrap();

        assert_eq!(snapshot, engine().accrual_at(monday_at(13, 0, 0)));
    }

    #[test]
    fn compute_accrual_rejects_inverted_schedule() {
        let result = compute_accrual(
            dec!(85000),
            dec!(0),
            dec!(0),
            "17:00",
            "09:00",
            monday_at(13, 0, 0),
        );

        assert!(matches!(result, Err(CalculationError::InvalidArgument(_))));
    }

    #[test]
    fn compute_accrual_rejects_empty_schedule() {
        let result = compute_accrual(
            dec!(85000),
            dec!(0),
            dec!(0),
            "09:00",
            "09:00",
            monday_at(9, 0, 0),
        );

        assert!(matches!(result, Err(CalculationError::InvalidArgument(_))));
    }

    #[test]
    fn compute_accrual_rejects_negative_salary() {
        let result = compute_accrual(
            dec!(-1),
            dec!(0),
            dec!(0),
            "09:00",
            "17:00",
            monday_at(13, 0, 0),
        );

        assert!(matches!(result, Err(CalculationError::InvalidArgument(_))));
    }

    #[test]
    fn compute_accrual_zero_salary_is_zero() {
        let snapshot = compute_accrual(
            dec!(0),
            dec!(0),
            dec!(0),
            "09:00",
            "17:00",
            monday_at(18, 0, 0),
        )
        .unwrap();

        assert_eq!(snapshot.earned, dec!(0));
        assert_eq!(snapshot.phase, AccrualPhase::AfterEnd);
    }

    #[test]
    fn compute_accrual_rejects_negative_tax() {
        let friday_evening = NaiveDate::from_ymd_opt(2024, 1, 19)
            .unwrap()
            .and_hms_opt(18, 0, 0)
            .unwrap();

        let result = compute_accrual(
            dec!(85000),
            dec!(-1000000),
            dec!(0),
            "09:00",
            "17:00",
            friday_evening,
        );

        assert!(matches!(result, Err(CalculationError::InvalidArgument(_))));
    }

    #[test]
    fn compute_accrual_rejects_overflowing_taxes() {
        let result = compute_accrual(
            dec!(85000),
            Decimal::MAX,
            Decimal::MAX,
            "09:00",
            "17:00",
            monday_at(13, 0, 0),
        );

        assert!(matches!(result, Err(CalculationError::InvalidArgument(_))));
    }

    #[test]
    fn engine_rejects_hand_built_negative_taxes() {
        let result = EarningsAccrualEngine::new(
            SalaryProfile::new(dec!(85000)).unwrap(),
            AnnualTaxes {
                federal: dec!(13753),
                state: dec!(-4558),
            },
            WorkSchedule::parse("09:00", "17:00").unwrap(),
        );

        assert!(matches!(result, Err(CalculationError::InvalidArgument(_))));
    }
}
