//! Application configuration and constants.
//!
//! This module provides:
//! - Configuration constants (timeouts, limits, remote service defaults)
//! - Probe and enrichment settings
//! - CLI option types and parsing

mod constants;
mod types;

// Re-export all constants
pub use constants::*;
pub use types::{EnrichConfig, LogFormat, LogLevel, Opt, OutputFormat, ProbeConfig};
