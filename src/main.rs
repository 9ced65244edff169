//! logcatp - version 0.1.0
//!
//! Reads logcat lines from files or stdin and prefixes each with the name of
//! the process that logged it.

use clap::Parser;
use std::io::{self, IsTerminal};
use std::process::ExitCode;
use tracing::{debug, Level};

use logcatp::cli::{Args, LogLevel};
use logcatp::config::{resolve_config, show_config, validate_effective_config, Config};
use logcatp::startup_checks;
use logcatp::{AdbProbe, LineAnnotator, LogcatpError, NameCache};

/// Initializes tracing logging on stderr; stdout carries annotated lines.
fn setup_logging(config: &Config) {
    let level = config.log_level();
    let log_level = match level {
        LogLevel::Off => return,
        LogLevel::Error => Level::ERROR,
        LogLevel::Warn => Level::WARN,
        LogLevel::Info => Level::INFO,
        LogLevel::Debug => Level::DEBUG,
        LogLevel::Trace => Level::TRACE,
    };

    let subscriber = tracing_subscriber::fmt()
        .with_max_level(log_level)
        .with_writer(io::stderr)
        .with_ansi(io::stderr().is_terminal())
        .with_target(true)
        .with_thread_ids(false)
        .with_file(true)
        .with_line_number(true)
        .finish();

    if let Err(e) = tracing::subscriber::set_global_default(subscriber) {
        eprintln!("logcatp: failed to set tracing subscriber: {}", e);
        return;
    }

    debug!(
        "Logging initialized with level: {:?} (build {})",
        level,
        env!("VERGEN_BUILD_TIMESTAMP")
    );
}

/// Loads and validates the effective configuration.
fn load_validated_config(args: &Args) -> Result<Config, LogcatpError> {
    let config = resolve_config(args).map_err(|e| LogcatpError::Config(format!("{:#}", e)))?;
    validate_effective_config(&config).map_err(|e| LogcatpError::Config(e.to_string()))?;
    Ok(config)
}

fn run(args: &Args, config: &Config) -> Result<(), LogcatpError> {
    if let Err(e) = startup_checks::validate_requirements(config.adb_path(), false) {
        debug!("Startup validation failed: {}", e);
    }

    let probe = AdbProbe::adb(config.adb_path(), config.retry_policy());
    let cache = NameCache::new(config.cache_ttl());
    let mut annotator = LineAnnotator::new(cache, probe, config.width());

    let stdout = io::stdout();
    let mut out = stdout.lock();
    let mut diag = io::stderr();
    annotator.run(&args.files, &mut out, &mut diag)
}

/// Main application entry point.
fn main() -> ExitCode {
    let args = Args::parse();

    let config = match load_validated_config(&args) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("logcatp: {}", e);
            return ExitCode::from(e.exit_code() as u8);
        }
    };

    if args.show_config {
        return match show_config(&config, args.config_format) {
            Ok(()) => ExitCode::SUCCESS,
            Err(e) => {
                eprintln!("logcatp: {:#}", e);
                ExitCode::FAILURE
            }
        };
    }

    setup_logging(&config);

    if args.check_requirements {
        return match startup_checks::validate_requirements(config.adb_path(), true) {
            Ok(()) => {
                println!("adb is available ({})", config.adb_path());
                ExitCode::SUCCESS
            }
            Err(e) => {
                eprintln!("logcatp: {}", e);
                ExitCode::FAILURE
            }
        };
    }

    match run(&args, &config) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("logcatp: {}", e);
            ExitCode::from(e.exit_code() as u8)
        }
    }
}
