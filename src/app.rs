//! Process entry points for both binaries.
//!
//! Startup order: CLI, config, termination logger, argument validation,
//! logging (then the config source is reported), runtime, loop. The workshop
//! high-cycle advisory prints after the cycle count is parsed and before the
//! mode is checked. Usage errors print guidance and exit 1 before any
//! cycle runs.

use std::ffi::OsString;
use std::fs;
use std::io::{self, Write};
use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use clap::error::ErrorKind;
use eyre::{Context, Result};
use log::info;

use crate::cli::{MeasureCli, WorkshopCli, workshop_usage};
use crate::clock::epoch_seconds;
use crate::config::Config;
use crate::domain::RunSession;
use crate::error::RespawnError;
use crate::lifecycle::{LifecycleController, SystemLifecycle};
use crate::report;
use crate::runner;
use crate::shutdown::{ShutdownGuard, emit_termination_line, register_shutdown_handler};

fn setup_logging(filter: &str) -> Result<()> {
    // Create log directory
    let log_dir = dirs::data_local_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(env!("CARGO_PKG_NAME"))
        .join("logs");

    fs::create_dir_all(&log_dir).context("Failed to create log directory")?;

    let log_file = log_dir.join("respawn.log");

    // Setup env_logger with file output
    let target = Box::new(
        fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(&log_file)
            .context("Failed to open log file")?,
    );

    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(filter))
        .target(env_logger::Target::Pipe(target))
        .init();

    info!("Logging initialized, writing to: {}", log_file.display());
    Ok(())
}

fn install_termination_logger(config: &Config) -> Result<ShutdownGuard> {
    register_shutdown_handler(&config.shutdown.signals, emit_termination_line, config.shutdown.log_exit)
        .context("Failed to install termination logger")
}

/// Executable to relaunch and the arguments to hand it.
fn relaunch_target() -> (PathBuf, Vec<OsString>) {
    let mut raw = std::env::args_os();
    let argv0 = raw.next().map(PathBuf::from);
    let args: Vec<OsString> = raw.collect();

    let program = std::env::current_exe()
        .ok()
        .or(argv0)
        .unwrap_or_else(|| PathBuf::from(env!("CARGO_PKG_NAME")));
    (program, args)
}

fn build_runtime() -> Result<tokio::runtime::Runtime> {
    tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()
        .context("Failed to build tokio runtime")
}

fn print_usage(err: &RespawnError) -> ExitCode {
    println!("{}", err);
    ExitCode::from(err.exit_code())
}

/// clap failures: help/version exit 0, anything else prints usage and exits 1
fn clap_failure(err: clap::Error, usage: &str) -> ExitCode {
    match err.kind() {
        ErrorKind::DisplayHelp | ErrorKind::DisplayVersion => {
            let _ = err.print();
            ExitCode::SUCCESS
        }
        _ => {
            println!("{}", usage);
            ExitCode::from(1)
        }
    }
}

fn finish(result: Result<ExitCode>) -> ExitCode {
    match result {
        Ok(code) => code,
        Err(e) => {
            eprintln!("Error: {:?}", e);
            ExitCode::from(1)
        }
    }
}

fn run_measure_app(cli: &MeasureCli) -> Result<ExitCode> {
    let config = Config::load(cli.config.as_ref()).context("Failed to load configuration")?;
    let _termination_logger = install_termination_logger(&config)?;

    let cycle_limit = match cli.cycle_limit() {
        Ok(n) => n,
        Err(e) => return Ok(print_usage(&e)),
    };

    setup_logging(&config.log_filter(cli.is_verbose())).context("Failed to setup logging")?;
    config.log_source();
    info!("Starting measure run with {} cycles", cycle_limit);

    let runtime = build_runtime()?;
    let _enter = runtime.enter();

    let start_time = epoch_seconds();
    let (program, args) = relaunch_target();
    let mut controller = LifecycleController::new(SystemLifecycle::current(), program, args, start_time)
        .with_sibling_termination(config.lifecycle.terminate_siblings);
    let mut session = RunSession::new(start_time, None, cycle_limit);

    let stdout = io::stdout();
    let mut out = stdout.lock();
    runner::run_measure(&mut controller, &mut session, &mut out).context("Measure run failed")?;
    out.flush()?;

    Ok(ExitCode::SUCCESS)
}

fn run_workshop_app(cli: &WorkshopCli) -> Result<ExitCode> {
    let config = Config::load(cli.config.as_ref()).context("Failed to load configuration")?;
    let _termination_logger = install_termination_logger(&config)?;

    let cycle_limit = match cli.cycle_limit() {
        Ok(n) => n,
        Err(e) => return Ok(print_usage(&e)),
    };

    let stdout = io::stdout();
    let mut out = stdout.lock();
    report::maybe_warn_high_cycles(&mut out, cycle_limit, config.workshop.high_cycle_warning)?;

    let mode = match cli.mode() {
        Ok(mode) => mode,
        Err(e) => return Ok(print_usage(&e)),
    };

    setup_logging(&config.log_filter(cli.is_verbose())).context("Failed to setup logging")?;
    config.log_source();
    info!("Starting workshop run: {} x {}", mode, cycle_limit);

    let runtime = build_runtime()?;
    let _enter = runtime.enter();

    let start_time = epoch_seconds();
    let (program, args) = relaunch_target();
    let mut controller = LifecycleController::new(SystemLifecycle::current(), program, args, start_time)
        .with_sibling_termination(config.lifecycle.terminate_siblings);
    let mut session = RunSession::new(start_time, Some(mode), cycle_limit);

    runner::run_workshop(&mut controller, &mut session, mode, &mut out).context("Workshop run failed")?;
    out.flush()?;

    Ok(ExitCode::SUCCESS)
}

/// Entry point of `respawn-measure`
pub fn measure_main() -> ExitCode {
    let cli = match MeasureCli::try_parse() {
        Ok(cli) => cli,
        Err(e) => {
            let usage = format!(
                "Please provide an integer argument for the loop limit.\n{}",
                crate::cli::commands::MEASURE_USAGE
            );
            return clap_failure(e, &usage);
        }
    };
    finish(run_measure_app(&cli))
}

/// Entry point of `respawn-workshop`
pub fn workshop_main() -> ExitCode {
    let cli = match WorkshopCli::try_parse() {
        Ok(cli) => cli,
        Err(e) => return clap_failure(e, &workshop_usage()),
    };
    finish(run_workshop_app(&cli))
}
