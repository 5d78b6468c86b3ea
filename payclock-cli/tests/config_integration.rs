//! Integration tests that load configuration from on-disk fixtures and run
//! it through the pay clock.

use std::path::PathBuf;

use chrono::NaiveDate;
use payclock_cli::app::PayClock;
use payclock_cli::config::{ConfigError, ConfigOverrides, PayConfig};
use payclock_core::{AnnualTaxes, CalculationError};
use pretty_assertions::assert_eq;
use rust_decimal_macros::dec;

fn fixture(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
        .join(name)
}

#[test]
fn test_load_fixture_file_succeeds() {
    let config = PayConfig::load(Some(&fixture("payclock.toml")), &ConfigOverrides::default())
        .expect("fixture file should load without error");

    assert_eq!(config.salary.annual_gross(), dec!(85000));
    assert_eq!(config.schedule.to_string(), "09:00-17:00");
    assert_eq!(config.jurisdiction.as_deref(), Some("california"));
}

#[test]
fn test_fixture_end_of_day_accrual() {
    let config =
        PayConfig::load(Some(&fixture("payclock.toml")), &ConfigOverrides::default()).unwrap();
    let clock = PayClock::from_config(config).unwrap();
    let end_of_day = NaiveDate::from_ymd_opt(2024, 1, 19)
        .unwrap()
        .and_hms_opt(17, 0, 0)
        .unwrap();

    assert_eq!(clock.ticker_line(end_of_day), "$256.50 earned | $70.43 tax");
}

#[test]
fn test_override_switches_to_no_tax_state() {
    let overrides = ConfigOverrides {
        jurisdiction: Some("tx".to_string()),
        ..ConfigOverrides::default()
    };
    let config = PayConfig::load(Some(&fixture("payclock.toml")), &overrides).unwrap();

    let clock = PayClock::from_config(config).unwrap();

    assert_eq!(clock.taxes().state, dec!(0));
    assert_eq!(clock.taxes().federal, dec!(13753));
}

#[test]
fn test_numeric_jurisdiction_is_invalid_argument() {
    let result = PayConfig::load(
        Some(&fixture("numeric_jurisdiction.toml")),
        &ConfigOverrides::default(),
    );

    assert!(matches!(
        result,
        Err(ConfigError::Invalid(CalculationError::InvalidArgument(_)))
    ));
}

#[test]
fn test_defaults_charge_california_state_tax() {
    let config = PayConfig::load(None, &ConfigOverrides::default()).unwrap();

    let clock = PayClock::from_config(config).unwrap();

    let expected = AnnualTaxes::estimate(dec!(120000), Some("California")).unwrap();
    assert_eq!(clock.taxes(), expected);
    assert!(clock.taxes().state > dec!(0));
}
