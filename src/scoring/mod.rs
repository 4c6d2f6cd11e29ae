//! Deterministic scoring engine.
//!
//! A pure function from scan metrics and optional diagnostic logs to a full
//! health report. It is used directly when no remote credential is configured
//! and as the fallback whenever the remote analysis fails; it never fails
//! itself.
//!
//! Scoring starts at 100 and subtracts independent deductions:
//! - 20 when the URL is not https
//! - 40 when the status code is 400 or above
//! - 15 when there is no status code (blocked or unreachable)
//! - 15 when diagnostic logs were supplied
//! - 10 when no HTML snippet could be extracted

mod narrative;
mod rules;

use log::debug;

use crate::app::is_secure_url;
use crate::models::{AiAnalysis, ScanMetrics};

use narrative::Signals;

pub use rules::{clamp_score, deductions, has_diagnostic_logs, score_from, Deduction};

/// Builds the deterministic health report for a scan.
///
/// Identical inputs always produce an identical report.
pub fn analyze(metrics: &ScanMetrics, diagnostic_logs: &str) -> AiAnalysis {
    let applied = deductions(metrics, diagnostic_logs);
    let score = score_from(&applied);
    debug!(
        "Deterministic score for {}: {score} (deductions: {:?})",
        metrics.url, applied
    );

    let signals = Signals {
        has_html: metrics.html_snippet.is_some(),
        is_secure: is_secure_url(&metrics.url),
        has_logs: has_diagnostic_logs(diagnostic_logs),
        score,
    };

    AiAnalysis {
        health_score: score,
        seo: narrative::seo_finding(&signals),
        accessibility: narrative::accessibility_finding(&signals),
        privacy: narrative::privacy_finding(&signals),
        js_errors: Some(narrative::js_errors_finding(&signals)),
        recommendations: narrative::recommendations(&signals),
    }
}
