//! Error categorization.
//!
//! This module maps transport errors onto the probe's failure taxonomy.

use super::types::{NetworkErrorKind, ProbeFailure};

/// Categorizes a `reqwest::Error` into a `NetworkErrorKind`.
///
/// The probe never calls `error_for_status()`, so status errors do not reach
/// this function; HTTP 4xx/5xx responses are successful probes.
///
/// # Arguments
///
/// * `error` - The `reqwest::Error` to categorize
///
/// # Returns
///
/// The matching `NetworkErrorKind`.
pub fn categorize_reqwest_error(error: &reqwest::Error) -> NetworkErrorKind {
    if error.is_builder() {
        NetworkErrorKind::Builder
    } else if error.is_redirect() {
        NetworkErrorKind::Redirect
    } else if error.is_connect() {
        NetworkErrorKind::Connect
    } else if error.is_request() {
        NetworkErrorKind::Request
    } else if error.is_body() {
        NetworkErrorKind::Body
    } else if error.is_decode() {
        NetworkErrorKind::Decode
    } else {
        NetworkErrorKind::Other
    }
}

/// Converts a transport error into a probe failure.
///
/// Timeouts reported by the client itself are folded into
/// `ProbeFailure::Timeout` so that every expired deadline reads the same way.
/// Everything else keeps the full error chain as its description.
pub fn probe_failure_from_reqwest(error: &reqwest::Error) -> ProbeFailure {
    if error.is_timeout() {
        return ProbeFailure::Timeout;
    }
    ProbeFailure::Network {
        kind: categorize_reqwest_error(error),
        message: describe_error_chain(error),
    }
}

/// Joins an error and its sources into one line.
///
/// `reqwest::Error`'s own `Display` is terse ("error sending request for url");
/// the cause (DNS failure, connection refused, ...) lives in the source chain.
pub fn describe_error_chain(error: &(dyn std::error::Error + 'static)) -> String {
    let mut message = error.to_string();
    let mut source = error.source();
    while let Some(cause) = source {
        let text = cause.to_string();
        if !message.contains(&text) {
            message.push_str(": ");
            message.push_str(&text);
        }
        source = cause.source();
    }
    message
}
