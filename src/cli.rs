//! CLI arguments for logcatp.
//!
//! This module defines the command-line interface structure using the clap library.

use clap::{Parser, ValueEnum};
use std::path::PathBuf;

/// Log level options for CLI parsing
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum LogLevel {
    Off,
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl LogLevel {
    /// Parses the config file spelling of a level.
    pub fn from_name(name: &str) -> Option<Self> {
        LogLevel::from_str(name, true).ok()
    }

    /// Config file spelling of the level.
    pub fn name(self) -> &'static str {
        match self {
            LogLevel::Off => "off",
            LogLevel::Error => "error",
            LogLevel::Warn => "warn",
            LogLevel::Info => "info",
            LogLevel::Debug => "debug",
            LogLevel::Trace => "trace",
        }
    }
}

/// Configuration format options for output
#[derive(Debug, Clone, Copy, Default, ValueEnum)]
pub enum ConfigFormat {
    #[default]
    Yaml,
    Json,
    Toml,
}

/// Main CLI arguments structure
#[derive(Parser, Debug, Default)]
#[command(
    name = "logcatp",
    about = "Annotate Android logcat output with process names",
    long_about = "Annotate Android logcat output with process names.\n\n\
                  Every input line is prefixed with a [name pid] column. Names are read from \
                  /proc/<pid>/cmdline on the connected device through adb and cached.",
    version,
    after_help = "Example: adb logcat -v threadtime | logcatp -w 50"
)]
pub struct Args {
    /// Minimum width of the process name column
    #[arg(short = 'w', long)]
    pub width: Option<usize>,

    /// Input files ("-" for stdin); stdin when none are given
    #[arg(value_name = "FILE")]
    pub files: Vec<PathBuf>,

    /// adb executable used to read process names
    #[arg(long = "adb", value_name = "PATH")]
    pub adb_path: Option<String>,

    /// Seconds a resolved process name stays cached
    #[arg(long)]
    pub cache_ttl: Option<u64>,

    /// Log level (logs go to stderr)
    #[arg(long, value_enum)]
    pub log_level: Option<LogLevel>,

    /// Config file (YAML/JSON/TOML)
    #[arg(short = 'c', long)]
    pub config: Option<PathBuf>,

    /// Disable all config file loading
    #[arg(long)]
    pub no_config: bool,

    /// Print effective merged config and exit
    #[arg(long)]
    pub show_config: bool,

    /// Output format for --show-config
    #[arg(long, value_enum, default_value = "yaml")]
    pub config_format: ConfigFormat,

    /// Check that adb is usable and exit (return code 1 on failure)
    #[arg(long)]
    pub check_requirements: bool,
}
