//! Bounded probe: one GET request under a hard deadline.
//!
//! This module issues the single HTTP request a scan makes and turns its
//! outcome into `ScanMetrics`:
//! - URL normalization (via `app::url`)
//! - Deadline enforcement with a cancellation token
//! - Header extraction and capped body reading
//! - Snippet extraction from the body
//!
//! Transport failures and timeouts are returned as `ProbeFailure` values and
//! end up in `ScanMetrics::fetch_error`; nothing here returns an error to the
//! caller of [`run_scan`].

mod request;
mod response;

use std::collections::BTreeMap;
use std::sync::Arc;
use std::time::{Duration, Instant};

use log::{debug, info, warn};
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;

use crate::app::normalize_url;
use crate::config::ProbeConfig;
use crate::error_handling::{
    describe_error_chain, probe_failure_from_reqwest, InitializationError, NetworkErrorKind,
    ProbeFailure,
};
use crate::initialization::init_client;
use crate::models::ScanMetrics;

use request::RequestHeaders;

pub use request::extract_headers;
pub use response::{extract_html_snippet, take_chars};

/// Raw data from a probe that received a response.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProbeResponse {
    /// HTTP status code (4xx/5xx included; they are still responses)
    pub status_code: u16,
    /// Time from sending the request to having read the body, in milliseconds
    pub response_time_ms: u64,
    /// Response headers
    pub headers: BTreeMap<String, String>,
    /// Body text (capped at `MAX_RESPONSE_BODY_SIZE` bytes)
    pub body: String,
}

/// Either the response data or the classified reason there is none.
pub type ProbeOutcome = Result<ProbeResponse, ProbeFailure>;

/// Issues probe requests with a shared client and a fixed deadline.
#[derive(Debug, Clone)]
pub struct Prober {
    client: Arc<reqwest::Client>,
    timeout: Duration,
}

impl Prober {
    /// Creates a prober with its own HTTP client.
    ///
    /// # Errors
    ///
    /// Returns `InitializationError::HttpClientError` if the client cannot be built.
    pub fn new(config: &ProbeConfig) -> Result<Self, InitializationError> {
        let client = init_client(config)?;
        Ok(Self::with_client(client, config.timeout))
    }

    /// Creates a prober around an existing client.
    pub fn with_client(client: Arc<reqwest::Client>, timeout: Duration) -> Self {
        Self { client, timeout }
    }

    /// The deadline applied to each probe.
    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Normalizes `raw_url`, probes it once and extracts the scan signals.
    pub async fn scan(&self, raw_url: &str) -> ScanMetrics {
        let url = normalize_url(raw_url);
        info!("Scanning {url}");

        match self.probe(&url).await {
            Ok(response) => {
                let html_snippet = extract_html_snippet(&response.body);
                info!(
                    "Probe of {url} returned HTTP {} in {} ms ({} headers, snippet: {})",
                    response.status_code,
                    response.response_time_ms,
                    response.headers.len(),
                    html_snippet.as_ref().map_or(0, |s| s.chars().count()),
                );
                ScanMetrics::reachable(
                    url,
                    response.status_code,
                    response.response_time_ms,
                    response.headers,
                    html_snippet,
                )
            }
            Err(failure) => {
                warn!(
                    "Probe of {url} failed ({}): {failure}",
                    failure.classification()
                );
                ScanMetrics::unreachable(url, &failure)
            }
        }
    }

    /// Sends one GET request to `url` and waits at most `self.timeout`.
    ///
    /// When the deadline expires first, the request future is dropped (which
    /// closes the connection) and the outcome is `ProbeFailure::Timeout`. The
    /// deadline timer is released on every path.
    pub async fn probe(&self, url: &str) -> ProbeOutcome {
        let cancel = CancellationToken::new();
        let _deadline = DeadlineTimer::start(cancel.clone(), self.timeout);

        tokio::select! {
            biased;
            _ = cancel.cancelled() => {
                debug!("Deadline of {} ms expired for {url}", self.timeout.as_millis());
                Err(ProbeFailure::Timeout)
            }
            outcome = self.fetch(url) => outcome,
        }
    }

    async fn fetch(&self, url: &str) -> ProbeOutcome {
        let request = RequestHeaders::apply_to_request_builder(self.client.get(url));

        let started = Instant::now();
        let response = request
            .send()
            .await
            .map_err(|e| probe_failure_from_reqwest(&e))?;

        let status_code = response.status().as_u16();
        let headers = extract_headers(response.headers());
        let body = response::read_body_capped(response, url)
            .await
            .map_err(|e| probe_failure_from_reqwest(&e))?;
        let response_time_ms = round_millis(started.elapsed());

        Ok(ProbeResponse {
            status_code,
            response_time_ms,
            headers,
            body,
        })
    }
}

/// Probes `raw_url` with the default settings.
///
/// Always resolves: a client that cannot even be built is reported as a
/// failed probe like any other transport problem.
pub async fn run_scan(raw_url: &str) -> ScanMetrics {
    run_scan_with(raw_url, &ProbeConfig::default()).await
}

/// Probes `raw_url` with the given settings. Always resolves.
pub async fn run_scan_with(raw_url: &str, config: &ProbeConfig) -> ScanMetrics {
    match Prober::new(config) {
        Ok(prober) => prober.scan(raw_url).await,
        Err(e) => {
            warn!("Could not create HTTP client: {e}");
            let failure = ProbeFailure::Network {
                kind: NetworkErrorKind::Builder,
                message: describe_error_chain(&e),
            };
            ScanMetrics::unreachable(normalize_url(raw_url), &failure)
        }
    }
}

/// Cancels a token once a timeout elapses, unless dropped first.
///
/// Dropping the guard aborts the timer task, so a finished probe never leaves
/// a pending cancellation behind.
struct DeadlineTimer {
    handle: JoinHandle<()>,
}

impl DeadlineTimer {
    fn start(token: CancellationToken, timeout: Duration) -> Self {
        let handle = tokio::spawn(async move {
            tokio::time::sleep(timeout).await;
            token.cancel();
        });
        Self { handle }
    }
}

impl Drop for DeadlineTimer {
    fn drop(&mut self) {
        self.handle.abort();
    }
}

/// Rounds a duration to the nearest whole millisecond.
fn round_millis(elapsed: Duration) -> u64 {
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    let millis = (elapsed.as_secs_f64() * 1000.0).round() as u64;
    millis
}
