//! Configuration management for logcatp.
//!
//! This module handles loading, merging, and validating configuration from files
//! and CLI arguments. It supports YAML, JSON, and TOML formats.

use crate::annotator::DEFAULT_WIDTH;
use crate::cli::{Args, ConfigFormat, LogLevel};
use crate::process::{
    RetryPolicy, DEFAULT_CACHE_TTL_SECS, DEFAULT_PRE_INITIALIZED_RETRIES,
    DEFAULT_RETRY_INTERVAL_MS,
};
use anyhow::{bail, Context};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::info;

// Default configuration constants
pub const DEFAULT_ADB_PATH: &str = "adb";
pub const DEFAULT_LOG_LEVEL: &str = "warn";

const MAX_WIDTH: usize = 4096;
const MAX_CACHE_TTL_SECS: u64 = 365 * 24 * 60 * 60;
const MAX_PRE_INITIALIZED_RETRIES: u32 = 100;
const MAX_RETRY_INTERVAL_MS: u64 = 60_000;

/// Config file candidates tried when no path is given.
const DEFAULT_CONFIG_PATHS: [&str; 4] = [
    "./logcatp.yaml",
    "./logcatp.yml",
    "./logcatp.json",
    "./logcatp.toml",
];

/// Effective configuration of a logcatp run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// Minimum width of the name column
    pub width: Option<usize>,

    /// adb executable
    #[serde(alias = "adb-path")]
    pub adb_path: Option<String>,

    // Name cache and probe tuning
    #[serde(alias = "cache-ttl-secs")]
    pub cache_ttl_secs: Option<u64>,
    #[serde(alias = "pre-initialized-retries")]
    pub pre_initialized_retries: Option<u32>,
    #[serde(alias = "retry-interval-ms")]
    pub retry_interval_ms: Option<u64>,

    // Logging
    #[serde(alias = "log-level")]
    pub log_level: Option<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            width: Some(DEFAULT_WIDTH),
            adb_path: Some(DEFAULT_ADB_PATH.into()),
            cache_ttl_secs: Some(DEFAULT_CACHE_TTL_SECS),
            pre_initialized_retries: Some(DEFAULT_PRE_INITIALIZED_RETRIES),
            retry_interval_ms: Some(DEFAULT_RETRY_INTERVAL_MS),
            log_level: Some(DEFAULT_LOG_LEVEL.into()),
        }
    }
}

impl Config {
    pub fn width(&self) -> usize {
        self.width.unwrap_or(DEFAULT_WIDTH)
    }

    pub fn adb_path(&self) -> &str {
        self.adb_path.as_deref().unwrap_or(DEFAULT_ADB_PATH)
    }

    pub fn cache_ttl(&self) -> Duration {
        Duration::from_secs(self.cache_ttl_secs.unwrap_or(DEFAULT_CACHE_TTL_SECS))
    }

    pub fn retry_policy(&self) -> RetryPolicy {
        RetryPolicy {
            retries: self
                .pre_initialized_retries
                .unwrap_or(DEFAULT_PRE_INITIALIZED_RETRIES),
            interval: Duration::from_millis(
                self.retry_interval_ms.unwrap_or(DEFAULT_RETRY_INTERVAL_MS),
            ),
        }
    }

    /// Log level from the config file, falling back to the default level.
    pub fn log_level(&self) -> LogLevel {
        self.log_level
            .as_deref()
            .and_then(LogLevel::from_name)
            .unwrap_or(LogLevel::Warn)
    }
}

/// Validate effective config (used at startup)
pub fn validate_effective_config(cfg: &Config) -> anyhow::Result<()> {
    let width = cfg.width();
    if width > MAX_WIDTH {
        bail!("width {} exceeds the maximum of {}", width, MAX_WIDTH);
    }

    if cfg.adb_path().trim().is_empty() {
        bail!("adb_path must not be empty");
    }

    match cfg.cache_ttl_secs {
        Some(0) => bail!("cache_ttl_secs must be greater than 0"),
        Some(ttl) if ttl > MAX_CACHE_TTL_SECS => bail!(
            "cache_ttl_secs {} exceeds the maximum of {}",
            ttl,
            MAX_CACHE_TTL_SECS
        ),
        _ => {}
    }

    let policy = cfg.retry_policy();
    if policy.retries > MAX_PRE_INITIALIZED_RETRIES {
        bail!(
            "pre_initialized_retries {} exceeds the maximum of {}",
            policy.retries,
            MAX_PRE_INITIALIZED_RETRIES
        );
    }
    if policy.interval > Duration::from_millis(MAX_RETRY_INTERVAL_MS) {
        bail!(
            "retry_interval_ms {} exceeds the maximum of {}",
            policy.interval.as_millis(),
            MAX_RETRY_INTERVAL_MS
        );
    }

    if let Some(level) = cfg.log_level.as_deref() {
        if LogLevel::from_name(level).is_none() {
            bail!(
                "Invalid log_level '{}', expected off, error, warn, info, debug or trace",
                level
            );
        }
    }

    Ok(())
}

/// Resolves configuration from CLI args, config file, and defaults.
/// This enforces precedence: CLI (if provided) > config file > default.
pub fn resolve_config(args: &Args) -> anyhow::Result<Config> {
    let mut config = if args.no_config {
        Config::default()
    } else {
        load_config(args.config.as_deref())?
    };

    if let Some(width) = args.width {
        config.width = Some(width);
    }
    if let Some(adb_path) = &args.adb_path {
        config.adb_path = Some(adb_path.clone());
    }
    if let Some(cache_ttl) = args.cache_ttl {
        config.cache_ttl_secs = Some(cache_ttl);
    }
    if let Some(level) = args.log_level {
        config.log_level = Some(level.name().to_string());
    }

    Ok(config)
}

/// Loads the config file at `path`, or the first default candidate that
/// exists. Fields missing from the file keep their defaults.
pub fn load_config(path: Option<&Path>) -> anyhow::Result<Config> {
    let path = match path {
        Some(p) => p.to_path_buf(),
        None => match DEFAULT_CONFIG_PATHS
            .iter()
            .map(PathBuf::from)
            .find(|p| p.exists())
        {
            Some(p) => p,
            None => return Ok(Config::default()),
        },
    };

    let content = fs::read_to_string(&path)
        .with_context(|| format!("Failed to read config file {}", path.display()))?;

    let loaded: Config = match path.extension().and_then(|s| s.to_str()) {
        Some("json") => serde_json::from_str(&content)
            .with_context(|| format!("Invalid JSON in {}", path.display()))?,
        Some("toml") => toml::from_str(&content)
            .with_context(|| format!("Invalid TOML in {}", path.display()))?,
        _ => {
            // Default to YAML
            serde_yaml::from_str(&content)
                .with_context(|| format!("Invalid YAML in {}", path.display()))?
        }
    };
    info!("Loaded configuration from: {}", path.display());

    Ok(merge_defaults(loaded))
}

/// Fills fields the file left out with their defaults.
fn merge_defaults(loaded: Config) -> Config {
    let defaults = Config::default();
    Config {
        width: loaded.width.or(defaults.width),
        adb_path: loaded.adb_path.or(defaults.adb_path),
        cache_ttl_secs: loaded.cache_ttl_secs.or(defaults.cache_ttl_secs),
        pre_initialized_retries: loaded
            .pre_initialized_retries
            .or(defaults.pre_initialized_retries),
        retry_interval_ms: loaded.retry_interval_ms.or(defaults.retry_interval_ms),
        log_level: loaded.log_level.or(defaults.log_level),
    }
}

/// Renders configuration in the requested format
pub fn render_config(config: &Config, format: ConfigFormat) -> anyhow::Result<String> {
    let output = match format {
        ConfigFormat::Json => serde_json::to_string_pretty(config)?,
        ConfigFormat::Toml => toml::to_string_pretty(config)?,
        ConfigFormat::Yaml => serde_yaml::to_string(config)?,
    };
    Ok(output)
}

/// Shows configuration in requested format
pub fn show_config(config: &Config, format: ConfigFormat) -> anyhow::Result<()> {
    println!("{}", render_config(config, format)?);
    Ok(())
}
