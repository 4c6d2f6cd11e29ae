//! site_health library: single-URL website health checks
//!
//! This library probes one website with a bounded HTTP request, captures what
//! came back (status, timing, headers and a trimmed HTML snippet), and turns it
//! into a plain-language health report with a 0-100 score. The report comes
//! from a remote generative analysis service when a credential is configured,
//! and from a deterministic scoring engine otherwise or whenever the remote
//! service is slow, unreachable or returns something unusable.
//!
//! # Example
//!
//! ```no_run
//! use site_health::{enrich, run_scan, EnrichConfig};
//!
//! # #[tokio::main]
//! # async fn main() {
//! let metrics = run_scan("example.com").await;
//! let analysis = enrich(&metrics, "", &EnrichConfig::default()).await;
//! println!("{} scored {}/100", metrics.url, analysis.health_score);
//! # }
//! ```
//!
//! # Requirements
//!
//! This library requires a Tokio runtime. Use `#[tokio::main]` in your application
//! or ensure you're calling library functions within an async context.

mod app;
pub mod config;
pub mod enrich;
pub mod error_handling;
pub mod fetch;
pub mod initialization;
pub mod models;
pub mod scoring;

// Re-export public API
pub use app::{is_secure_url, normalize_url};
pub use config::{EnrichConfig, LogFormat, LogLevel, Opt, OutputFormat, ProbeConfig};
pub use enrich::{parse_analysis, AnalysisProvider, AnalysisRequest, EnrichState, Enricher, GeminiProvider};
pub use error_handling::{EnrichError, InitializationError, NetworkErrorKind, ProbeFailure};
pub use fetch::{run_scan, run_scan_with, Prober};
pub use models::{AiAnalysis, AnalysisSource, Finding, PrivacyFinding, PrivacyLevel, ScanMetrics};

/// Produces a health report for a finished scan.
///
/// Convenience wrapper around [`Enricher`]: builds an orchestrator from
/// `config` and runs it once. Never fails; see [`Enricher::enrich_with_source`]
/// to learn which path produced the report.
pub async fn enrich(metrics: &ScanMetrics, diagnostic_logs: &str, config: &EnrichConfig) -> AiAnalysis {
    Enricher::new(config).enrich(metrics, diagnostic_logs).await
}
