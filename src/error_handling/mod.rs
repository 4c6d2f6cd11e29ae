//! Error handling and failure classification.
//!
//! This module provides:
//! - Error type definitions (initialization, enrichment)
//! - The probe failure taxonomy carried in `ScanMetrics`
//! - Categorization of transport errors
//!
//! Probe failures are data: they end up in `ScanMetrics::fetch_error`.
//! Enrichment errors never leave the orchestrator.

mod categorization;
mod types;

// Re-export public API
pub use categorization::{categorize_reqwest_error, describe_error_chain, probe_failure_from_reqwest};
pub use types::{EnrichError, InitializationError, NetworkErrorKind, ProbeFailure};
