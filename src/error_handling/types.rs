//! Error type definitions.
//!
//! This module defines the error and failure types used throughout the pipeline.

use log::SetLoggerError;
use reqwest::Error as ReqwestError;
use strum_macros::EnumIter as EnumIterMacro;
use thiserror::Error;

use crate::config::CONNECTION_TIMEOUT_MESSAGE;

/// Error types for initialization failures.
#[derive(Error, Debug)]
#[allow(clippy::enum_variant_names)] // All variants end with "Error" by convention
pub enum InitializationError {
    /// Error initializing the logger.
    #[error("Logger initialization error: {0}")]
    LoggerError(#[from] SetLoggerError),

    /// Error initializing the HTTP client.
    #[error("HTTP client initialization error: {0}")]
    HttpClientError(#[from] ReqwestError),
}

/// Transport-level categories for a failed probe.
///
/// Mirrors the predicates `reqwest::Error` exposes; used for logging and to
/// describe the probe outcome to the remote analysis service.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, EnumIterMacro)]
pub enum NetworkErrorKind {
    Builder,
    Redirect,
    Connect,
    Request,
    Body,
    Decode,
    Other,
}

impl std::fmt::Display for NetworkErrorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl NetworkErrorKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            NetworkErrorKind::Builder => "HTTP request builder error",
            NetworkErrorKind::Redirect => "HTTP request redirect error",
            NetworkErrorKind::Connect => "HTTP request connect error",
            NetworkErrorKind::Request => "HTTP request error",
            NetworkErrorKind::Body => "HTTP request body error",
            NetworkErrorKind::Decode => "HTTP request decode error",
            NetworkErrorKind::Other => "HTTP request other error",
        }
    }
}

/// Why the probe did not produce a response.
///
/// These are ordinary outcomes (blocked sites, DNS failures and slow hosts are
/// common), carried as data in `ScanMetrics::fetch_error` rather than
/// propagated as errors.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ProbeFailure {
    /// The deadline expired before the response was read.
    #[error("{}", CONNECTION_TIMEOUT_MESSAGE)]
    Timeout,

    /// Connection refused, DNS failure, rejected request, broken body, etc.
    #[error("{message}")]
    Network {
        /// Transport category
        kind: NetworkErrorKind,
        /// The underlying failure's description
        message: String,
    },
}

impl ProbeFailure {
    /// Short classification of the failure, independent of the message text.
    pub fn classification(&self) -> &'static str {
        match self {
            ProbeFailure::Timeout => CONNECTION_TIMEOUT_MESSAGE,
            ProbeFailure::Network { kind, .. } => kind.as_str(),
        }
    }
}

/// Failures of the remote analysis path.
///
/// None of these reach the caller of `Enricher::enrich`; each one is logged
/// and answered with the deterministic analysis.
#[derive(Error, Debug)]
pub enum EnrichError {
    /// The remote call did not settle before the orchestrator's deadline.
    #[error("remote analysis timed out after {0} ms")]
    Timeout(u128),

    /// Transport failure talking to the remote service.
    #[error("remote analysis request failed: {0}")]
    Request(#[from] ReqwestError),

    /// The remote service answered with a non-success status.
    #[error("remote analysis service returned HTTP {status}: {body}")]
    Status {
        /// HTTP status code
        status: u16,
        /// Response body (truncated)
        body: String,
    },

    /// The remote endpoint could not be built from the configuration.
    #[error("invalid remote analysis endpoint: {0}")]
    Endpoint(#[from] url::ParseError),

    /// The remote service answered without any text.
    #[error("remote analysis returned an empty payload")]
    EmptyPayload,

    /// The payload was not JSON, or not shaped like an analysis.
    #[error("remote analysis payload is malformed: {0}")]
    MalformedPayload(String),

    /// The spawned remote task ended without reporting a result.
    #[error("remote analysis task ended without a result")]
    TaskAborted,
}
