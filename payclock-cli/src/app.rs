//! Glue between configuration, the core calculators, and the terminal.

use std::fmt;
use std::future::Future;
use std::io::Write;
use std::time::Duration;

use chrono::NaiveDateTime;
use payclock_core::{
    AccrualPhase, AccrualSnapshot, AnnualTaxes, CalculationError, DailyBreakdown,
    EarningsAccrualEngine, TaxRuleRepository, calculate_state_tax,
};
use rust_decimal::Decimal;
use tracing::{debug, info};

use crate::config::PayConfig;
use crate::utils::{format_currency, format_percent};

/// Taxes resolved once from configuration, ready to be sampled per tick.
#[derive(Debug, Clone)]
pub struct PayClock {
    config: PayConfig,
    taxes: AnnualTaxes,
    engine: EarningsAccrualEngine,
}

impl PayClock {
    /// Resolves annual taxes for `config` and prepares the accrual engine.
    pub fn from_config(config: PayConfig) -> Result<Self, CalculationError> {
        let taxes = AnnualTaxes::estimate(
            config.salary.annual_gross(),
            config.jurisdiction.as_deref(),
        )?;
        let engine = EarningsAccrualEngine::new(config.salary, taxes, config.schedule)?;

        debug!(
            schedule = %config.schedule,
            jurisdiction = config.jurisdiction.as_deref().unwrap_or("none"),
            "pay clock ready"
        );
        Ok(Self {
            config,
            taxes,
            engine,
        })
    }

    pub fn config(&self) -> &PayConfig {
        &self.config
    }

    pub fn taxes(&self) -> AnnualTaxes {
        self.taxes
    }

    pub fn snapshot_at(
        &self,
        now: NaiveDateTime,
    ) -> AccrualSnapshot {
        self.engine.accrual_at(now)
    }

    /// One-line summary suitable for a status bar.
    pub fn ticker_line(
        &self,
        now: NaiveDateTime,
    ) -> String {
        let snapshot = self.snapshot_at(now);
        format!(
            "{} earned | {} tax",
            format_currency(snapshot.earned),
            format_currency(snapshot.tax_paid)
        )
    }

    /// Full breakdown for `now`.
    pub fn report_at(
        &self,
        now: NaiveDateTime,
    ) -> DailyReport {
        DailyReport {
            schedule: self.config.schedule.to_string(),
            daily: self.engine.daily_breakdown(),
            snapshot: self.snapshot_at(now),
        }
    }
}

/// What `payclock now` prints.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DailyReport {
    pub schedule: String,
    pub daily: DailyBreakdown,
    pub snapshot: AccrualSnapshot,
}

impl fmt::Display for DailyReport {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        let phase = match self.snapshot.phase {
            AccrualPhase::NonWorkday => "not a workday",
            AccrualPhase::BeforeStart => "before work",
            AccrualPhase::During => "working",
            AccrualPhase::AfterEnd => "done for the day",
        };
        let percent = self
            .daily
            .earned_percent(&self.snapshot)
            .map(format_percent)
            .unwrap_or_else(|| "-".to_string());

        writeln!(f, "Schedule        {} ({phase})", self.schedule)?;
        writeln!(f, "Daily income    {}", format_currency(self.daily.gross))?;
        writeln!(
            f,
            "Earned today    {} ({percent})",
            format_currency(self.snapshot.earned)
        )?;
        writeln!(f, "Tax paid today  {}", format_currency(self.snapshot.tax_paid))?;
        writeln!(f, "Federal / day   {}", format_currency(self.daily.federal_tax))?;
        writeln!(f, "State / day     {}", format_currency(self.daily.state_tax))?;
        write!(f, "Pre-tax deductions (Social Security, 401k, medical) are not counted.")
    }
}

/// What `payclock tax` prints.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaxReport {
    pub annual_income: Decimal,
    pub jurisdiction: Option<String>,
    pub taxes: AnnualTaxes,
}

impl TaxReport {
    pub fn new(
        annual_income: Decimal,
        jurisdiction: Option<&str>,
    ) -> Result<Self, CalculationError> {
        Ok(Self {
            annual_income,
            jurisdiction: jurisdiction.map(str::to_string),
            taxes: AnnualTaxes::estimate(annual_income, jurisdiction)?,
        })
    }
}

impl fmt::Display for TaxReport {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        writeln!(f, "Annual income   {}", format_currency(self.annual_income))?;
        writeln!(f, "Federal tax     {}", format_currency(self.taxes.federal))?;
        match &self.jurisdiction {
            Some(name) => writeln!(
                f,
                "State tax       {} ({name})",
                format_currency(self.taxes.state)
            )?,
            None => writeln!(f, "State tax       {} (none)", format_currency(self.taxes.state))?,
        }
        write!(
            f,
            "Take-home       {}",
            format_currency(self.annual_income - self.taxes.total())
        )
    }
}

/// State tax on `annual_income` for every built-in jurisdiction, sorted by name.
pub fn state_tax_table(annual_income: Decimal) -> Result<Vec<(String, Decimal)>, CalculationError> {
    TaxRuleRepository::builtin()
        .jurisdictions()
        .into_iter()
        .map(|name| {
            calculate_state_tax(annual_income, name).map(|tax| (name.to_string(), tax))
        })
        .collect()
}

/// Rewrites the ticker line on `out` every `period` until `shutdown`
/// resolves.
///
/// Each tick recomputes from scratch; a slow terminal simply skips ticks.
pub async fn run_ticker<W, N, F>(
    clock: &PayClock,
    period: Duration,
    mut out: W,
    now: N,
    shutdown: F,
) -> anyhow::Result<()>
where
    W: Write,
    N: Fn() -> NaiveDateTime,
    F: Future<Output = ()>,
{
    let mut interval = tokio::time::interval(period);
    interval.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Skip);
    tokio::pin!(shutdown);

    info!(period_ms = period.as_millis() as u64, "ticker started");
    loop {
        tokio::select! {
            _ = &mut shutdown => break,
            _ = interval.tick() => {
                write!(out, "\r{}\x1b[K", clock.ticker_line(now()))?;
                out.flush()?;
            }
        }
    }
    writeln!(out)?;
    info!("ticker stopped");
    Ok(())
}
