use payclock_core::calculations::common::round_cents;
use rust_decimal::Decimal;
use thiserror::Error;
use tracing::warn;

/// A salary or amount string that is not a number once `$` and thousands
/// separators are removed.
#[derive(Debug, Error)]
#[error("'{raw}' is not an amount: {source}")]
pub struct ParseAmountError {
    raw: String,
    #[source]
    source: rust_decimal::Error,
}

/// Parses a user-typed amount such as `"120,000"` or `"$85,000.50"`.
///
/// Blank input means zero.
pub fn parse_amount(raw: &str) -> Result<Decimal, ParseAmountError> {
    let trimmed = raw.trim();
    let digits: String = trimmed
        .strip_prefix('$')
        .unwrap_or(trimmed)
        .chars()
        .filter(|&ch| ch != ',')
        .collect();

    if digits.is_empty() {
        return Ok(Decimal::ZERO);
    }
    Decimal::from_str_exact(&digits).map_err(|source| {
        warn!(raw, "rejected amount");
        ParseAmountError {
            raw: raw.to_string(),
            source,
        }
    })
}

/// Formats an amount as US dollars with cents, e.g. `$1,234.56`.
///
/// Rounds half away from zero; negative amounts render as `-$1.00`.
pub fn format_currency(amount: Decimal) -> String {
    let rounded = round_cents(amount);
    let sign = if rounded.is_sign_negative() && !rounded.is_zero() {
        "-"
    } else {
        ""
    };
    let cents = format!("{:.2}", rounded.abs());
    let (whole, fraction) = cents.split_once('.').unwrap_or((cents.as_str(), "00"));

    format!("{sign}${}.{fraction}", group_thousands(whole))
}

/// Formats a percentage with two decimals, e.g. `42.50%`.
pub fn format_percent(percent: Decimal) -> String {
    format!("{:.2}%", round_cents(percent))
}

fn group_thousands(digits: &str) -> String {
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (index, ch) in digits.chars().enumerate() {
        if index > 0 && (digits.len() - index) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }
    grouped
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rust_decimal_macros::dec;

    use super::*;

    #[test]
    fn amounts_accept_thousands_separators() {
        assert_eq!(parse_amount("120,000").unwrap(), dec!(120000));
        assert_eq!(parse_amount("1,234,567.89").unwrap(), dec!(1234567.89));
    }

    #[test]
    fn amounts_accept_a_dollar_sign_and_padding() {
        assert_eq!(parse_amount(" $85,000 ").unwrap(), dec!(85000));
    }

    #[test]
    fn blank_amount_is_zero() {
        assert_eq!(parse_amount("").unwrap(), Decimal::ZERO);
        assert_eq!(parse_amount(" \t").unwrap(), Decimal::ZERO);
    }

    #[test]
    fn words_are_not_amounts() {
        let err = parse_amount("lots").unwrap_err();

        assert!(err.to_string().starts_with("'lots' is not an amount"));
    }

    #[test]
    fn format_currency_groups_thousands() {
        assert_eq!(format_currency(dec!(1234567.891)), "$1,234,567.89");
        assert_eq!(format_currency(dec!(326.923076)), "$326.92");
    }

    #[test]
    fn format_currency_pads_cents() {
        assert_eq!(format_currency(dec!(0)), "$0.00");
        assert_eq!(format_currency(dec!(1000)), "$1,000.00");
        assert_eq!(format_currency(dec!(12.5)), "$12.50");
    }

    #[test]
    fn format_currency_handles_negative_amounts() {
        assert_eq!(format_currency(dec!(-1)), "-$1.00");
        assert_eq!(format_currency(dec!(-0.001)), "$0.00");
    }

    #[test]
    fn format_percent_keeps_two_decimals() {
        assert_eq!(format_percent(dec!(25)), "25.00%");
        assert_eq!(format_percent(dec!(33.3333)), "33.33%");
    }
}
