//! Configuration for the pay clock.
//!
//! Values come from an optional TOML file and are then overridden by any
//! command-line flags. The file is only ever read; nothing is written back.
//!
//! ```toml
//! annual_salary = "120,000"
//! work_start = "09:00"
//! work_end = "17:00"
//! jurisdiction = "CA"
//! ```

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use payclock_core::{CalculationError, SalaryProfile, TaxRuleRepository, WorkSchedule};
use rust_decimal::Decimal;
use serde::Deserialize;
use thiserror::Error;
use toml::Value;
use tracing::{debug, warn};

use crate::utils::{ParseAmountError, parse_amount};

pub const DEFAULT_ANNUAL_SALARY: i64 = 120_000;
pub const DEFAULT_WORK_START: &str = "09:00";
pub const DEFAULT_WORK_END: &str = "17:00";
pub const DEFAULT_JURISDICTION: &str = "california";

/// Errors raised while loading or validating configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("cannot read config file '{}': {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("cannot parse config from {origin}: {source}")]
    Parse {
        origin: String,
        #[source]
        source: toml::de::Error,
    },

    #[error("invalid annual_salary: {0}")]
    Salary(#[from] ParseAmountError),

    #[error(transparent)]
    Invalid(#[from] CalculationError),
}

/// File contents before validation. Salary and jurisdiction stay untyped so
/// that a wrong type is reported as an invalid argument, not a parse error.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct RawConfig {
    annual_salary: Option<Value>,
    work_start: Option<String>,
    work_end: Option<String>,
    jurisdiction: Option<Value>,
}

/// Command-line values that take precedence over the file.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConfigOverrides {
    pub annual_salary: Option<String>,
    pub work_start: Option<String>,
    pub work_end: Option<String>,
    pub jurisdiction: Option<String>,
}

/// Validated configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PayConfig {
    pub salary: SalaryProfile,
    pub schedule: WorkSchedule,
    /// Canonical jurisdiction name; `None` means no state tax.
    ///
    /// Unset means California; only an explicitly blank value yields `None`.
    pub jurisdiction: Option<String>,
}

impl PayConfig {
    /// Loads `path` if given, then applies `overrides`.
    ///
    /// Without a path, defaults are used: a salary of 120,000, a 09:00 to
    /// 17:00 day, and California state tax.
    pub fn load(
        path: Option<&Path>,
        overrides: &ConfigOverrides,
    ) -> Result<Self, ConfigError> {
        let raw = match path {
            Some(path) => {
                debug!(path = %path.display(), "reading config file");
                let text = fs::read_to_string(path).map_err(|source| ConfigError::Read {
                    path: path.to_path_buf(),
                    source,
                })?;
                parse_raw(&text, &path.display().to_string())?
            }
            None => RawConfig::default(),
        };

        Self::resolve(raw, overrides)
    }

    /// Parses configuration from TOML text, then applies `overrides`.
    pub fn from_toml_str(
        text: &str,
        overrides: &ConfigOverrides,
    ) -> Result<Self, ConfigError> {
        Self::resolve(parse_raw(text, "inline text")?, overrides)
    }

    fn resolve(
        raw: RawConfig,
        overrides: &ConfigOverrides,
    ) -> Result<Self, ConfigError> {
        let annual_salary = match (&overrides.annual_salary, &raw.annual_salary) {
            (Some(text), _) => parse_amount(text)?,
            (None, Some(value)) => salary_from_value(value)?,
            (None, None) => Decimal::from(DEFAULT_ANNUAL_SALARY),
        };

        let work_start = overrides
            .work_start
            .as_deref()
            .or(raw.work_start.as_deref())
            .unwrap_or(DEFAULT_WORK_START);
        let work_end = overrides
            .work_end
            .as_deref()
            .or(raw.work_end.as_deref())
            .unwrap_or(DEFAULT_WORK_END);

        let jurisdiction = match (&overrides.jurisdiction, raw.jurisdiction) {
            (Some(text), _) => Some(text.clone()),
            (None, Some(value)) => Some(jurisdiction_from_value(value)?),
            (None, None) => Some(DEFAULT_JURISDICTION.to_string()),
        };

        Ok(Self {
            salary: SalaryProfile::new(annual_salary)?,
            schedule: WorkSchedule::parse(work_start, work_end)?,
            jurisdiction: canonical_jurisdiction(jurisdiction)?,
        })
    }
}

fn parse_raw(
    text: &str,
    origin: &str,
) -> Result<RawConfig, ConfigError> {
    toml::from_str(text).map_err(|source| ConfigError::Parse {
        origin: origin.to_string(),
        source,
    })
}

fn salary_from_value(value: &Value) -> Result<Decimal, ConfigError> {
    match value {
        Value::Integer(amount) => Ok(Decimal::from(*amount)),
        Value::Float(amount) => Decimal::try_from(*amount).map_err(|e| {
            ConfigError::Invalid(CalculationError::InvalidArgument(format!(
                "annual_salary {amount} is not an amount: {e}"
            )))
        }),
        Value::String(text) => Ok(parse_amount(text)?),
        other => Err(ConfigError::Invalid(CalculationError::InvalidArgument(
            format!(
                "annual_salary must be a number or string, got {}",
                other.type_str()
            ),
        ))),
    }
}

fn jurisdiction_from_value(value: Value) -> Result<String, CalculationError> {
    match value {
        Value::String(text) => Ok(text),
        other => Err(CalculationError::InvalidArgument(format!(
            "jurisdiction must be a string, got {}",
            other.type_str()
        ))),
    }
}

/// Blank means "no jurisdiction"; anything else must resolve.
fn canonical_jurisdiction(raw: Option<String>) -> Result<Option<String>, CalculationError> {
    match raw {
        Some(text) if text.trim().is_empty() => {
            warn!("blank jurisdiction configured; state tax will be zero");
            Ok(None)
        }
        Some(text) => TaxRuleRepository::builtin()
            .canonical_name(&text)
            .map(|name| Some(name.to_string())),
        None => Ok(None),
    }
}
