//! HTTP client initialization.
//!
//! This module provides functions to initialize the HTTP clients used by the
//! probe and by the remote analysis provider.

use std::sync::Arc;
use std::time::Duration;

use reqwest::ClientBuilder;

use crate::config::ProbeConfig;

/// Initializes the probe's HTTP client.
///
/// Creates a `reqwest::Client` configured with:
/// - User-Agent header from the probe settings
/// - No client-level timeout; the probe enforces its own deadline
/// - The client's default redirect policy
///
/// # Errors
///
/// Returns a `reqwest::Error` if client creation fails.
pub fn init_client(config: &ProbeConfig) -> Result<Arc<reqwest::Client>, reqwest::Error> {
    let client = ClientBuilder::new()
        .user_agent(config.user_agent.clone())
        .build()?;
    Ok(Arc::new(client))
}

/// Initializes the HTTP client for the remote analysis service.
///
/// The orchestrator stops waiting after its own, shorter deadline and leaves
/// the request running in the background; `timeout` bounds how long such a
/// leftover request can keep its task and connection alive.
///
/// # Errors
///
/// Returns a `reqwest::Error` if client creation fails.
pub fn init_api_client(timeout: Duration) -> Result<reqwest::Client, reqwest::Error> {
    ClientBuilder::new()
        .user_agent(concat!("site_health/", env!("CARGO_PKG_VERSION")))
        .timeout(timeout)
        .build()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{ENRICH_TIMEOUT, REMOTE_CLIENT_TIMEOUT};
    use wiremock::matchers::method;
    use wiremock::{Mock, MockServer, ResponseTemplate};

    #[test]
    fn test_remote_client_limit_is_above_enrichment_deadline() {
        assert!(REMOTE_CLIENT_TIMEOUT >= ENRICH_TIMEOUT * 4);
    }

    #[tokio::test]
    async fn test_api_client_gives_up_on_silent_service() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200).set_delay(Duration::from_secs(5)))
            .mount(&server)
            .await;

        let client = init_api_client(Duration::from_millis(200)).expect("client");
        let error = client
            .post(server.uri())
            .send()
            .await
            .expect_err("request should time out");
        assert!(error.is_timeout());
    }
}
