//! Rounding shared by the calculators and snapshots.
//!
//! Tax leaves the calculators in whole currency units; earned and tax-paid
//! figures are shown in cents. Midpoints always move away from zero.

use rust_decimal::{Decimal, RoundingStrategy};

const CENT_PLACES: u32 = 2;

fn round_to(
    value: Decimal,
    places: u32,
) -> Decimal {
    value.round_dp_with_strategy(places, RoundingStrategy::MidpointAwayFromZero)
}

/// Rounds an amount to cents.
///
/// ```
/// use rust_decimal_macros::dec;
/// use payclock_core::calculations::common::round_cents;
///
/// assert_eq!(round_cents(dec!(70.4269)), dec!(70.43));
/// assert_eq!(round_cents(dec!(0.125)), dec!(0.13));
/// assert_eq!(round_cents(dec!(-0.125)), dec!(-0.13));
/// ```
pub fn round_cents(value: Decimal) -> Decimal {
    round_to(value, CENT_PLACES)
}

/// Rounds to the nearest whole currency unit.
///
/// ```
/// use rust_decimal_macros::dec;
/// use payclock_core::calculations::common::round_whole;
///
/// assert_eq!(round_whole(dec!(13752.88)), dec!(13753));
/// assert_eq!(round_whole(dec!(1160.5)), dec!(1161));
/// ```
pub fn round_whole(value: Decimal) -> Decimal {
    round_to(value, 0)
}
