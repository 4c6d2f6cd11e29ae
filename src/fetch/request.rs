//! HTTP request building and header extraction.
//!
//! This module provides utilities for constructing the probe request and
//! extracting headers from responses.

use std::collections::BTreeMap;

use log::warn;

use crate::config::{MAX_HEADER_COUNT, MAX_HEADER_VALUE_LENGTH};

use super::take_chars;

/// Browser-like request headers for the probe.
///
/// Some sites answer automated clients with a bot wall instead of the page;
/// sending what a modern Chrome navigation sends gets the real page more often.
/// `Accept-Encoding` is left to the client so response decompression stays on.
pub(crate) struct RequestHeaders;

impl RequestHeaders {
    /// Applies the standard request headers to a `reqwest::RequestBuilder`.
    pub(crate) fn apply_to_request_builder(
        builder: reqwest::RequestBuilder,
    ) -> reqwest::RequestBuilder {
        builder
            .header(
                reqwest::header::ACCEPT,
                "text/html,application/xhtml+xml,application/xml;q=0.9,image/avif,image/webp,image/apng,*/*;q=0.8",
            )
            .header(reqwest::header::ACCEPT_LANGUAGE, "en-US,en;q=0.9")
            .header(
                reqwest::header::HeaderName::from_static("sec-fetch-dest"),
                "document",
            )
            .header(
                reqwest::header::HeaderName::from_static("sec-fetch-mode"),
                "navigate",
            )
            .header(
                reqwest::header::HeaderName::from_static("sec-fetch-site"),
                "none",
            )
            .header(reqwest::header::UPGRADE_INSECURE_REQUESTS, "1")
            .header(reqwest::header::CACHE_CONTROL, "max-age=0")
    }
}

/// Extracts the response headers into the map stored on `ScanMetrics`.
///
/// Header names come out lower-cased (that is how `HeaderMap` stores them).
/// Repeated headers are joined with `", "`. At most `MAX_HEADER_COUNT` distinct
/// headers are kept and values are cut at `MAX_HEADER_VALUE_LENGTH` characters.
/// Values that are not valid UTF-8 are decoded lossily.
pub fn extract_headers(headers: &reqwest::header::HeaderMap) -> BTreeMap<String, String> {
    let mut extracted: BTreeMap<String, String> = BTreeMap::new();

    for name in headers.keys() {
        if extracted.len() >= MAX_HEADER_COUNT {
            warn!(
                "Response has {} distinct headers (limit: {}), ignoring the rest",
                headers.keys_len(),
                MAX_HEADER_COUNT
            );
            break;
        }
        let joined = headers
            .get_all(name)
            .iter()
            .map(|value| String::from_utf8_lossy(value.as_bytes()).into_owned())
            .collect::<Vec<_>>()
            .join(", ");
        let value = take_chars(&joined, MAX_HEADER_VALUE_LENGTH).to_string();
        extracted.insert(name.as_str().to_string(), value);
    }

    extracted
}
