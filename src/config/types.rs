//! Configuration types and CLI options.
//!
//! This module defines enums and structs used for command-line argument parsing
//! and configuration.

use std::path::PathBuf;
use std::time::Duration;

use clap::{Parser, ValueEnum};

use crate::config::constants::{
    API_KEY_ENV_VAR, DEFAULT_GEMINI_BASE_URL, DEFAULT_GEMINI_MODEL, DEFAULT_USER_AGENT,
    ENRICH_TIMEOUT, PROBE_TIMEOUT, SIMULATED_DELAY,
};

/// Logging level for the application.
///
/// Controls the verbosity of log output, from most restrictive (Error) to most
/// verbose (Trace).
#[derive(Clone, Debug, ValueEnum)]
pub enum LogLevel {
    /// Only error messages
    Error,
    /// Error and warning messages
    Warn,
    /// Error, warning, and informational messages
    Info,
    /// All messages except trace
    Debug,
    /// All messages including trace
    Trace,
}

impl From<LogLevel> for log::LevelFilter {
    fn from(l: LogLevel) -> Self {
        match l {
            LogLevel::Error => log::LevelFilter::Error,
            LogLevel::Warn => log::LevelFilter::Warn,
            LogLevel::Info => log::LevelFilter::Info,
            LogLevel::Debug => log::LevelFilter::Debug,
            LogLevel::Trace => log::LevelFilter::Trace,
        }
    }
}

/// Log output format.
///
/// Controls how log messages are formatted:
/// - `Plain`: Human-readable format with colors (default)
/// - `Json`: Structured JSON format for machine parsing
#[derive(Clone, Debug, ValueEnum)]
pub enum LogFormat {
    /// Human-readable format with colors (default)
    Plain,
    /// Structured JSON format for machine parsing
    Json,
}

/// How the final report is printed to stdout.
#[derive(Clone, Debug, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Readable summary
    Text,
    /// Metrics and analysis as one JSON document
    Json,
}

/// Settings for the bounded probe.
#[derive(Debug, Clone)]
pub struct ProbeConfig {
    /// Hard deadline for the whole request
    pub timeout: Duration,
    /// HTTP User-Agent header value
    pub user_agent: String,
}

impl Default for ProbeConfig {
    fn default() -> Self {
        Self {
            timeout: PROBE_TIMEOUT,
            user_agent: DEFAULT_USER_AGENT.to_string(),
        }
    }
}

/// Settings for the enrichment orchestrator.
///
/// The credential is passed in here rather than read from the environment,
/// so whether a scan is simulated or remote-backed is decided by whoever
/// builds the config.
#[derive(Debug, Clone)]
pub struct EnrichConfig {
    /// Remote analysis credential; `None` selects the simulated path
    pub api_key: Option<String>,
    /// Base URL of the remote analysis API
    pub base_url: String,
    /// Remote model name
    pub model: String,
    /// How long to wait for the remote analysis
    pub timeout: Duration,
    /// Delay applied on the simulated path
    pub simulated_delay: Duration,
}

impl Default for EnrichConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            base_url: DEFAULT_GEMINI_BASE_URL.to_string(),
            model: DEFAULT_GEMINI_MODEL.to_string(),
            timeout: ENRICH_TIMEOUT,
            simulated_delay: SIMULATED_DELAY,
        }
    }
}

impl EnrichConfig {
    /// Returns the default configuration with the given credential.
    ///
    /// Blank keys are treated as absent.
    pub fn with_api_key(api_key: Option<String>) -> Self {
        Self {
            api_key: api_key.filter(|key| !key.trim().is_empty()),
            ..Default::default()
        }
    }
}

/// Command-line options.
///
/// This struct is automatically generated by `clap` from the field attributes.
///
/// # Examples
///
/// ```bash
/// # Scan without a credential (deterministic analysis only)
/// site_health example.com
///
/// # Attach browser console output and print JSON
/// site_health example.com --logs console.txt --output json
/// ```
#[derive(Debug, Parser)]
#[command(
    name = "site_health",
    about = "Scans a website once and reports a 0-100 health score."
)]
pub struct Opt {
    /// Website to scan (scheme optional, https is assumed)
    pub url: String,

    /// File containing diagnostic logs (e.g. browser console output) to include
    #[arg(long, value_parser)]
    pub logs: Option<PathBuf>,

    /// Remote analysis API key (falls back to the GEMINI_API_KEY environment variable)
    #[arg(long, env = API_KEY_ENV_VAR, hide_env_values = true)]
    pub api_key: Option<String>,

    /// Remote analysis model
    #[arg(long, default_value = DEFAULT_GEMINI_MODEL)]
    pub model: String,

    /// HTTP User-Agent header value for the probe
    #[arg(long, default_value = DEFAULT_USER_AGENT)]
    pub user_agent: String,

    /// Log level: error|warn|info|debug|trace
    #[arg(long, value_enum, default_value_t = LogLevel::Info)]
    pub log_level: LogLevel,

    /// Log format: plain|json
    #[arg(long, value_enum, default_value_t = LogFormat::Plain)]
    pub log_format: LogFormat,

    /// Report format: text|json
    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    pub output: OutputFormat,
}

impl Opt {
    /// Builds the probe settings from the command line.
    pub fn probe_config(&self) -> ProbeConfig {
        ProbeConfig {
            user_agent: self.user_agent.clone(),
            ..Default::default()
        }
    }

    /// Builds the enrichment settings from the command line.
    pub fn enrich_config(&self) -> EnrichConfig {
        EnrichConfig {
            model: self.model.clone(),
            ..EnrichConfig::with_api_key(self.api_key.clone())
        }
    }
}
