//! Values passed between pipeline stages.
//!
//! Every stage builds a fresh value and hands it on; nothing here is mutated
//! after construction.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::error_handling::ProbeFailure;

/// Result of the probe and feature extraction stages.
///
/// `status_code`, `response_time_ms` and a non-empty `headers` map are present
/// together exactly when `fetch_error` is absent. The probe only builds values
/// through [`ScanMetrics::reachable`] and [`ScanMetrics::unreachable`], which
/// uphold that; the fields stay public so callers (and the scoring engine's
/// tests) can describe arbitrary inputs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ScanMetrics {
    /// Normalized absolute URL
    pub url: String,
    /// HTTP status of the probe response
    pub status_code: Option<u16>,
    /// Round trip in whole milliseconds
    pub response_time_ms: Option<u64>,
    /// Response headers (lower-cased names)
    pub headers: BTreeMap<String, String>,
    /// Extracted markup used as an analysis signal
    pub html_snippet: Option<String>,
    /// Why the probe did not complete
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fetch_error: Option<String>,
}

impl ScanMetrics {
    /// Metrics for a probe that received a response.
    pub fn reachable(
        url: String,
        status_code: u16,
        response_time_ms: u64,
        headers: BTreeMap<String, String>,
        html_snippet: Option<String>,
    ) -> Self {
        Self {
            url,
            status_code: Some(status_code),
            response_time_ms: Some(response_time_ms),
            headers,
            html_snippet,
            fetch_error: None,
        }
    }

    /// Metrics for a probe that timed out or failed in transport.
    pub fn unreachable(url: String, failure: &ProbeFailure) -> Self {
        Self {
            url,
            status_code: None,
            response_time_ms: None,
            headers: BTreeMap::new(),
            html_snippet: None,
            fetch_error: Some(failure.to_string()),
        }
    }

    /// Returns true if the probe completed.
    pub fn is_reachable(&self) -> bool {
        self.fetch_error.is_none()
    }

    /// Short description of the probe outcome, as sent to the remote analysis.
    pub fn outcome_label(&self) -> String {
        match (&self.fetch_error, self.status_code) {
            (Some(error), _) => format!("Failed: {error}"),
            (None, Some(status)) if status >= 400 => format!("Error response (HTTP {status})"),
            (None, Some(status)) => format!("Reachable (HTTP {status})"),
            (None, None) => "Unknown".to_string(),
        }
    }
}

/// One findings section of an analysis.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Finding {
    pub summary: String,
    #[serde(default)]
    pub details: Vec<String>,
}

impl Finding {
    pub fn new(summary: impl Into<String>, details: Vec<String>) -> Self {
        Self {
            summary: summary.into(),
            details,
        }
    }
}

/// How worried a visitor should be about the site's handling of their data.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PrivacyLevel {
    #[serde(rename = "Low concern")]
    LowConcern,
    #[serde(rename = "Needs attention")]
    NeedsAttention,
    #[serde(rename = "High concern")]
    HighConcern,
}

impl PrivacyLevel {
    /// All levels, in the order they are offered to the remote service.
    pub const ALL: [PrivacyLevel; 3] = [
        PrivacyLevel::LowConcern,
        PrivacyLevel::NeedsAttention,
        PrivacyLevel::HighConcern,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            PrivacyLevel::LowConcern => "Low concern",
            PrivacyLevel::NeedsAttention => "Needs attention",
            PrivacyLevel::HighConcern => "High concern",
        }
    }
}

impl std::fmt::Display for PrivacyLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The privacy section carries a level on top of the usual summary/details.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PrivacyFinding {
    pub level: PrivacyLevel,
    pub summary: String,
    #[serde(default)]
    pub details: Vec<String>,
}

/// Health report produced by the scoring engine or the remote analysis.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AiAnalysis {
    /// Overall score in `[0, 100]`
    pub health_score: u8,
    pub seo: Finding,
    pub accessibility: Finding,
    pub privacy: PrivacyFinding,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub js_errors: Option<Finding>,
    /// Plain-language next steps, most important first
    pub recommendations: Vec<String>,
}

impl AiAnalysis {
    /// Checks the structural requirements for accepting a remote payload.
    ///
    /// Serde already enforces the field types; this adds the value-level
    /// rules: score in range, summaries filled in, at least one recommendation.
    pub fn is_complete(&self) -> bool {
        let filled = |s: &str| !s.trim().is_empty();
        self.health_score <= 100
            && filled(&self.seo.summary)
            && filled(&self.accessibility.summary)
            && filled(&self.privacy.summary)
            && self.js_errors.as_ref().is_none_or(|f| filled(&f.summary))
            && !self.recommendations.is_empty()
            && self.recommendations.iter().all(|r| filled(r))
    }
}

/// Which orchestrator path produced an analysis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum AnalysisSource {
    /// No credential configured; deterministic analysis after a short delay
    Simulated,
    /// Accepted remote payload
    Remote,
    /// Remote path failed; deterministic analysis
    Fallback,
}

impl AnalysisSource {
    pub fn as_str(&self) -> &'static str {
        match self {
            AnalysisSource::Simulated => "simulated",
            AnalysisSource::Remote => "remote",
            AnalysisSource::Fallback => "fallback",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error_handling::NetworkErrorKind;

    fn sample_analysis() -> AiAnalysis {
        AiAnalysis {
            health_score: 72,
            seo: Finding::new("Title present", vec!["The page has a title".to_string()]),
            accessibility: Finding::new("Mostly fine", vec![]),
            privacy: PrivacyFinding {
                level: PrivacyLevel::NeedsAttention,
                summary: "Some trackers".to_string(),
                details: vec![],
            },
            js_errors: None,
            recommendations: vec!["Add a description".to_string()],
        }
    }

    #[test]
    fn test_reachable_sets_all_probe_fields() {
        let mut headers = BTreeMap::new();
        headers.insert("content-type".to_string(), "text/html".to_string());
        let metrics = ScanMetrics::reachable(
            "https://ok.example".to_string(),
            200,
            42,
            headers,
            Some("<head></head>".to_string()),
        );
        assert!(metrics.is_reachable());
        assert_eq!(metrics.status_code, Some(200));
        assert_eq!(metrics.response_time_ms, Some(42));
        assert!(!metrics.headers.is_empty());
        assert!(metrics.fetch_error.is_none());
    }

    #[test]
    fn test_unreachable_clears_all_probe_fields() {
        let metrics = ScanMetrics::unreachable("https://slow.example".to_string(), &ProbeFailure::Timeout);
        assert!(!metrics.is_reachable());
        assert_eq!(metrics.status_code, None);
        assert_eq!(metrics.response_time_ms, None);
        assert!(metrics.headers.is_empty());
        assert!(metrics.html_snippet.is_none());
        assert_eq!(metrics.fetch_error.as_deref(), Some("Connection Timeout"));
    }

    #[test]
    fn test_scan_metrics_serializes_camel_case() {
        let failure = ProbeFailure::Network {
            kind: NetworkErrorKind::Connect,
            message: "connection refused".to_string(),
        };
        let metrics = ScanMetrics::unreachable("https://down.example".to_string(), &failure);
        let json = serde_json::to_value(&metrics).expect("serialize");
        assert_eq!(json["url"], "https://down.example");
        assert!(json["statusCode"].is_null());
        assert!(json["responseTimeMs"].is_null());
        assert_eq!(json["fetchError"], "connection refused");
        assert!(json["headers"].as_object().is_some_and(|h| h.is_empty()));
    }

    #[test]
    fn test_outcome_label() {
        let ok = ScanMetrics::reachable("https://a".into(), 200, 1, BTreeMap::new(), None);
        assert_eq!(ok.outcome_label(), "Reachable (HTTP 200)");
        let missing = ScanMetrics::reachable("https://a".into(), 404, 1, BTreeMap::new(), None);
        assert_eq!(missing.outcome_label(), "Error response (HTTP 404)");
        let timeout = ScanMetrics::unreachable("https://a".into(), &ProbeFailure::Timeout);
        assert_eq!(timeout.outcome_label(), "Failed: Connection Timeout");
    }

    #[test]
    fn test_privacy_level_wire_names() {
        for level in PrivacyLevel::ALL {
            let json = serde_json::to_string(&level).expect("serialize");
            assert_eq!(json, format!("\"{}\"", level.as_str()));
            let back: PrivacyLevel = serde_json::from_str(&json).expect("deserialize");
            assert_eq!(back, level);
        }
        assert!(serde_json::from_str::<PrivacyLevel>("\"Medium\"").is_err());
    }

    #[test]
    fn test_analysis_parses_remote_shape() {
        let payload = r#"{
            "healthScore": 88,
            "seo": {"summary": "Good", "details": ["Has a title"]},
            "accessibility": {"summary": "Fine", "details": []},
            "privacy": {"level": "Low concern", "summary": "Nothing odd", "details": []},
            "jsErrors": {"summary": "None reported", "details": []},
            "recommendations": ["Keep it up"]
        }"#;
        let analysis: AiAnalysis = serde_json::from_str(payload).expect("parse");
        assert_eq!(analysis.health_score, 88);
        assert_eq!(analysis.privacy.level, PrivacyLevel::LowConcern);
        assert!(analysis.js_errors.is_some());
        assert!(analysis.is_complete());
    }

    #[test]
    fn test_analysis_rejects_out_of_range_score_type() {
        let payload = r#"{"healthScore": 300, "seo": {"summary": "a"}, "accessibility": {"summary": "b"},
            "privacy": {"level": "Low concern", "summary": "c"}, "recommendations": ["d"]}"#;
        assert!(serde_json::from_str::<AiAnalysis>(payload).is_err());
    }

    #[test]
    fn test_is_complete_rules() {
        assert!(sample_analysis().is_complete());

        let mut over = sample_analysis();
        over.health_score = 101;
        assert!(!over.is_complete());

        let mut blank = sample_analysis();
        blank.seo.summary = "  ".to_string();
        assert!(!blank.is_complete());

        let mut no_recs = sample_analysis();
        no_recs.recommendations.clear();
        assert!(!no_recs.is_complete());

        let mut blank_js = sample_analysis();
        blank_js.js_errors = Some(Finding::new("", vec![]));
        assert!(!blank_js.is_complete());
    }
}
