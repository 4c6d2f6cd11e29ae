//! The remote analysis seam.

use futures::future::BoxFuture;
use serde::Serialize;

use crate::config::REMOTE_SNIPPET_CHARS;
use crate::error_handling::EnrichError;
use crate::fetch::take_chars;
use crate::models::ScanMetrics;

/// Everything the remote service is told about a scan.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisRequest {
    /// Normalized URL
    pub url: String,
    /// Probe outcome classification, e.g. `Reachable (HTTP 200)`
    pub outcome: String,
    pub status_code: Option<u16>,
    pub response_time_ms: Option<u64>,
    /// First `REMOTE_SNIPPET_CHARS` characters of the snippet
    pub html_snippet: Option<String>,
    pub diagnostic_logs: String,
}

impl AnalysisRequest {
    pub fn from_scan(metrics: &ScanMetrics, diagnostic_logs: &str) -> Self {
        Self {
            url: metrics.url.clone(),
            outcome: metrics.outcome_label(),
            status_code: metrics.status_code,
            response_time_ms: metrics.response_time_ms,
            html_snippet: metrics
                .html_snippet
                .as_deref()
                .map(|s| take_chars(s, REMOTE_SNIPPET_CHARS).to_string()),
            diagnostic_logs: diagnostic_logs.to_string(),
        }
    }
}

/// A service that writes an analysis for a scan.
///
/// Implementations return the raw text the service produced; the orchestrator
/// owns validation, so a provider only fails for transport or service errors.
pub trait AnalysisProvider: Send + Sync {
    /// Short name used in log messages.
    fn name(&self) -> &str;

    /// Requests an analysis and returns the service's raw text reply.
    fn analyze<'a>(&'a self, request: &'a AnalysisRequest) -> BoxFuture<'a, Result<String, EnrichError>>;
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeMap;

    #[test]
    fn test_request_carries_scan_fields() {
        let metrics = ScanMetrics::reachable(
            "https://ok.example".to_string(),
            200,
            321,
            BTreeMap::new(),
            Some("<head></head>".to_string()),
        );
        let request = AnalysisRequest::from_scan(&metrics, "warning: x");
        assert_eq!(request.url, "https://ok.example");
        assert_eq!(request.outcome, "Reachable (HTTP 200)");
        assert_eq!(request.status_code, Some(200));
        assert_eq!(request.response_time_ms, Some(321));
        assert_eq!(request.html_snippet.as_deref(), Some("<head></head>"));
        assert_eq!(request.diagnostic_logs, "warning: x");
    }

    #[test]
    fn test_request_snippet_is_bounded() {
        let metrics = ScanMetrics::reachable(
            "https://big.example".to_string(),
            200,
            1,
            BTreeMap::new(),
            Some("<p>".repeat(REMOTE_SNIPPET_CHARS)),
        );
        let request = AnalysisRequest::from_scan(&metrics, "");
        assert_eq!(
            request.html_snippet.map(|s| s.chars().count()),
            Some(REMOTE_SNIPPET_CHARS)
        );
    }

    #[test]
    fn test_request_serializes_camel_case() {
        let metrics = ScanMetrics::unreachable(
            "https://down.example".to_string(),
            &crate::error_handling::ProbeFailure::Timeout,
        );
        let json = serde_json::to_value(AnalysisRequest::from_scan(&metrics, "")).expect("serialize");
        assert_eq!(json["outcome"], "Failed: Connection Timeout");
        assert!(json["statusCode"].is_null());
        assert!(json["htmlSnippet"].is_null());
        assert_eq!(json["diagnosticLogs"], "");
    }
}
