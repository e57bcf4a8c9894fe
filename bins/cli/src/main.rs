//! Payroll Indonesia command-line period close.
//!
//! Reads a JSON period batch, aggregates BPJS and PPh 21, reconciles entered
//! account totals, and optionally settles through an in-process payment
//! service. Reports go to stdout as JSON; logs go to stderr.
//!
//! Failures are classified through `AppError` and written to stderr as one
//! JSON line. Exit status is 1 for input the caller can correct and 2 for
//! everything else.

mod batch;
mod failure;
mod payment;
mod report;

use std::io::{self, Write};
use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::Context;
use clap::{Parser, Subcommand, ValueEnum};
use payroll_id_core::period::{Locale, PeriodMode};
use payroll_id_core::reconciliation::Tolerance;
use payroll_id_core::settlement::{DocumentStatus, SettlementGate};
use payroll_id_shared::config::LoggingConfig;
use payroll_id_shared::{AppConfig, AppError};
use serde::Serialize;
use tracing::{error, info};
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

use crate::batch::{Batch, PreparedBatch};
use crate::failure::Failure;
use crate::payment::LocalPayments;
use crate::report::{SettleReport, SummaryReport};

/// Payroll Indonesia period aggregation and settlement.
#[derive(Parser, Debug)]
#[command(name = "payroll-id", version, about)]
struct Cli {
    /// Extra configuration file layered over config/default and config/{RUN_MODE}.
    #[arg(long, global = true)]
    config: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Aggregate a period batch and print the summary.
    Summarize(BatchArgs),
    /// Aggregate, finalize, and settle a period batch.
    Settle(BatchArgs),
}

#[derive(clap::Args, Debug)]
struct BatchArgs {
    /// Path to the batch JSON file.
    batch: PathBuf,

    /// Override the configured cross-period policy.
    #[arg(long, value_enum)]
    mode: Option<ModeArg>,

    /// Pretty-print the JSON output.
    #[arg(long)]
    pretty: bool,
}

#[derive(ValueEnum, Clone, Copy, Debug)]
enum ModeArg {
    Strict,
    Warn,
}

impl From<ModeArg> for PeriodMode {
    fn from(mode: ModeArg) -> Self {
        match mode {
            ModeArg::Strict => Self::Strict,
            ModeArg::Warn => Self::Warn,
        }
    }
}

fn main() -> ExitCode {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            let failure = Failure::from_error(&err);
            error!(code = failure.code, "{}", failure.message);
            failure.report()
        }
    }
}

fn run(cli: Cli) -> anyhow::Result<()> {
    let config = AppConfig::load_with(cli.config.as_deref())
        .map_err(AppError::from)
        .context("failed to load configuration")?;
    init_tracing(&config.logging);

    match cli.command {
        Commands::Summarize(args) => {
            let prepared = prepare(&args, &config)?;
            let report = SummaryReport::new(
                &prepared,
                Locale::from(config.period.locale),
                Tolerance::from(&config.reconciliation),
            );
            print_json(&report, args.pretty)
        }
        Commands::Settle(args) => {
            let prepared = prepare(&args, &config)?;
            let report = settle(prepared, &config)?;
            print_json(&report, args.pretty)
        }
    }
}

fn init_tracing(config: &LoggingConfig) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.filter));
    let registry = tracing_subscriber::registry().with(filter);
    if config.json {
        registry
            .with(tracing_subscriber::fmt::layer().json().with_writer(io::stderr))
            .init();
    } else {
        registry
            .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
            .init();
    }
}

fn prepare(args: &BatchArgs, config: &AppConfig) -> anyhow::Result<PreparedBatch> {
    let mode = args
        .mode
        .map_or_else(|| PeriodMode::from(config.period.mode), PeriodMode::from);
    let batch = Batch::from_path(&args.batch)?;
    let prepared = batch
        .prepare(config, mode)
        .with_context(|| format!("failed to aggregate {}", args.batch.display()))?;

    info!(
        document_id = %prepared.document.id,
        key = %prepared.document.key,
        "batch aggregated"
    );
    Ok(prepared)
}

fn settle(prepared: PreparedBatch, config: &AppConfig) -> anyhow::Result<SettleReport> {
    let tolerance = Tolerance::from(&config.reconciliation);
    let payments = LocalPayments::default();

    let finalized = SettlementGate::transition_with(
        &prepared.document,
        DocumentStatus::Finalized,
        &prepared.mapping,
        &payments,
        tolerance,
    )
    .map_err(AppError::from)
    .context("failed to finalize period")?;
    let settled = SettlementGate::transition_with(
        &finalized,
        DocumentStatus::Settled,
        &prepared.mapping,
        &payments,
        tolerance,
    )
    .map_err(AppError::from)
    .context("failed to settle period")?;

    Ok(SettleReport::new(settled, Locale::from(config.period.locale)))
}

fn print_json<T: Serialize>(value: &T, pretty: bool) -> anyhow::Result<()> {
    let mut stdout = io::stdout().lock();
    if pretty {
        serde_json::to_writer_pretty(&mut stdout, value)?;
    } else {
        serde_json::to_writer(&mut stdout, value)?;
    }
    writeln!(stdout)?;
    Ok(())
}
