use std::io;
use std::path::PathBuf;
use std::time::Duration;

use anyhow::{Context, Result};
use chrono::{Local, NaiveDateTime};
use clap::{Args, Parser, Subcommand};
use tracing::{debug, info, warn};

use payclock_cli::app::{self, PayClock, TaxReport};
use payclock_cli::config::{ConfigOverrides, PayConfig};
use payclock_cli::logging;
use payclock_cli::utils::format_currency;

// ─── CLI definition ──────────────────────────────────────────────────────────

/// Live take-home pay estimator.
///
/// Combines 2024 federal and state income tax with your work hours to show
/// what you have earned so far today.
#[derive(Debug, Parser)]
#[command(name = "payclock", version, about)]
struct Cli {
    /// TOML file with annual_salary, work_start, work_end, jurisdiction.
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Log filter, e.g. `debug` or `payclock_core=trace`. Overrides RUST_LOG.
    #[arg(long, global = true)]
    log_level: Option<String>,

    /// Also append log records to this file.
    #[arg(long, global = true)]
    log_file: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Print annual federal and state income tax.
    Tax {
        #[command(flatten)]
        overrides: Overrides,

        /// Tabulate state tax for every supported jurisdiction.
        #[arg(long, default_value_t = false)]
        all_states: bool,
    },

    /// Print what has been earned so far today.
    Now {
        #[command(flatten)]
        overrides: Overrides,

        /// Evaluate at this local time instead of now ("YYYY-MM-DD HH:MM:SS").
        #[arg(long)]
        at: Option<String>,
    },

    /// Keep a live earnings line updated until Ctrl-C.
    Watch {
        #[command(flatten)]
        overrides: Overrides,

        /// Refresh period in milliseconds.
        #[arg(long, default_value_t = 200)]
        interval_ms: u64,
    },
}

/// Flags that take precedence over the config file.
#[derive(Debug, Args)]
struct Overrides {
    /// Annual gross salary, e.g. 85000 or "85,000".
    #[arg(long)]
    salary: Option<String>,

    /// Work start time, HH:MM.
    #[arg(long)]
    start: Option<String>,

    /// Work end time, HH:MM.
    #[arg(long)]
    end: Option<String>,

    /// State name or two-letter postal code.
    #[arg(long)]
    state: Option<String>,
}

impl From<Overrides> for ConfigOverrides {
    fn from(flags: Overrides) -> Self {
        Self {
            annual_salary: flags.salary,
            work_start: flags.start,
            work_end: flags.end,
            jurisdiction: flags.state,
        }
    }
}

// ─── entry point ─────────────────────────────────────────────────────────────

#[tokio::main]
async fn main() -> Result<()> {
    logging::init_logging();

    let cli = Cli::parse();

    if let Some(level) = &cli.log_level {
        logging::set_log_level(level)?;
    }
    if let Some(path) = &cli.log_file {
        logging::enable_file_logging(path)?;
    }

    match cli.command {
        Command::Tax {
            overrides,
            all_states,
        } => {
            let config = load_config(&cli.config, overrides)?;
            print_tax(&config, all_states)
        }
        Command::Now { overrides, at } => {
            let config = load_config(&cli.config, overrides)?;
            let now = match at {
                Some(text) => parse_instant(&text)?,
                None => local_now(),
            };
            let clock = PayClock::from_config(config).context("Failed to estimate taxes")?;
            println!("{}", clock.report_at(now));
            Ok(())
        }
        Command::Watch {
            overrides,
            interval_ms,
        } => {
            let config = load_config(&cli.config, overrides)?;
            let clock = PayClock::from_config(config).context("Failed to estimate taxes")?;
            let period = Duration::from_millis(interval_ms.max(1));
            let shutdown = async {
                if let Err(error) = tokio::signal::ctrl_c().await {
                    warn!(?error, "cannot listen for Ctrl-C");
                    std::future::pending::<()>().await;
                }
            };
            app::run_ticker(&clock, period, io::stdout().lock(), local_now, shutdown).await
        }
    }
}

fn load_config(
    path: &Option<PathBuf>,
    overrides: Overrides,
) -> Result<PayConfig> {
    let config = PayConfig::load(path.as_deref(), &overrides.into())
        .context("Failed to load configuration")?;
    info!(
        salary = %config.salary.annual_gross(),
        schedule = %config.schedule,
        jurisdiction = config.jurisdiction.as_deref().unwrap_or("none"),
        "configuration loaded"
    );
    Ok(config)
}

fn print_tax(
    config: &PayConfig,
    all_states: bool,
) -> Result<()> {
    let income = config.salary.annual_gross();

    if all_states {
        for (name, tax) in app::state_tax_table(income)? {
            println!("{name:<16}{}", format_currency(tax));
        }
        return Ok(());
    }

    let report = TaxReport::new(income, config.jurisdiction.as_deref())?;
    println!("{report}");
    Ok(())
}

fn parse_instant(text: &str) -> Result<NaiveDateTime> {
    debug!(text, "parsing --at");
    NaiveDateTime::parse_from_str(text.trim(), "%Y-%m-%d %H:%M:%S")
        .or_else(|_| NaiveDateTime::parse_from_str(text.trim(), "%Y-%m-%d %H:%M"))
        .with_context(|| format!("Invalid --at value: {text}"))
}

fn local_now() -> NaiveDateTime {
    Local::now().naive_local()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cli_definition_is_consistent() {
        use clap::CommandFactory;

        Cli::command().debug_assert();
    }

    #[test]
    fn parse_instant_accepts_minutes_only() {
        let instant = parse_instant("2024-01-15 13:00").unwrap();

        assert_eq!(instant.to_string(), "2024-01-15 13:00:00");
    }
}
