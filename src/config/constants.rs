//! Configuration constants.
//!
//! This module defines the timeouts, size limits, and remote-service defaults
//! used throughout the scan pipeline.

use std::time::Duration;

// Probe timing
/// Hard deadline for the single probe request, measured from call start.
/// Covers connect, headers and body; on expiry the request is cancelled and
/// the scan is recorded as a connection timeout.
pub const PROBE_TIMEOUT: Duration = Duration::from_millis(4000);

/// Message recorded in `ScanMetrics::fetch_error` when the probe deadline expires.
pub const CONNECTION_TIMEOUT_MESSAGE: &str = "Connection Timeout";

// Enrichment timing
/// How long the orchestrator waits for the remote analysis before falling back.
pub const ENRICH_TIMEOUT: Duration = Duration::from_millis(15_000);
/// Hard limit on a single remote HTTP request.
///
/// Only ends requests the orchestrator already gave up on; it must stay well
/// above `ENRICH_TIMEOUT`.
pub const REMOTE_CLIENT_TIMEOUT: Duration = Duration::from_secs(120);
/// Artificial delay applied when no credential is configured, so callers
/// see roughly the same latency with or without the remote service.
pub const SIMULATED_DELAY: Duration = Duration::from_millis(400);

/// Default User-Agent string for the probe request.
///
/// Users can override this via the `--user-agent` CLI flag.
pub const DEFAULT_USER_AGENT: &str =
    "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/131.0.0.0 Safari/537.36";

// Response and body size limits
/// Maximum response body size in bytes (2MB)
/// Bodies larger than this are truncated at the limit
pub const MAX_RESPONSE_BODY_SIZE: usize = 2 * 1024 * 1024;
/// Maximum number of response headers kept per probe.
/// Excess headers are dropped (header bomb protection)
pub const MAX_HEADER_COUNT: usize = 100;
/// Maximum HTTP header value length in characters (1000 chars)
/// Header values longer than this are truncated
pub const MAX_HEADER_VALUE_LENGTH: usize = 1000;

// Snippet extraction limits (in characters)
/// Characters of `<body>` inner content appended after the `<head>` block.
pub const SNIPPET_BODY_CHARS: usize = 1500;
/// Characters of raw body used when neither `<head>` nor `<body>` is found.
pub const SNIPPET_FALLBACK_CHARS: usize = 2000;
/// Characters of the snippet forwarded to the remote analysis service.
pub const REMOTE_SNIPPET_CHARS: usize = 4000;

// Remote analysis service
/// Base URL of the Generative Language API.
pub const DEFAULT_GEMINI_BASE_URL: &str = "https://generativelanguage.googleapis.com";
/// Model used for remote analysis.
pub const DEFAULT_GEMINI_MODEL: &str = "gemini-2.5-flash";
/// Environment variable holding the remote analysis credential.
pub const API_KEY_ENV_VAR: &str = "GEMINI_API_KEY";

// Scoring
/// Score every scan starts from before deductions.
pub const BASE_HEALTH_SCORE: i32 = 100;
/// Scores strictly above this are treated as "Low concern" for privacy.
pub const LOW_CONCERN_THRESHOLD: u8 = 80;
