//! Enrichment orchestrator.
//!
//! Decides between the remote analysis and the deterministic scoring engine:
//!
//! ```text
//! Idle ──(no credential)──▶ Simulated
//!   └───(credential)──────▶ RemotePending ──▶ RemoteSuccess
//!                                          └─▶ RemoteFallback
//! ```
//!
//! The remote call runs in its own task and reports through a oneshot
//! channel. The orchestrator waits on that channel for at most the configured
//! timeout; if it gives up, the task keeps running and its eventual send fails
//! silently because the receiver is gone. Every failure (timeout, transport or
//! service error, empty or malformed reply) ends in `RemoteFallback`, which
//! returns the deterministic analysis for the same inputs.

mod gemini;
mod prompt;
mod provider;

use std::sync::Arc;
use std::time::Duration;

use log::{debug, info, warn};
use tokio::sync::oneshot;

use crate::config::EnrichConfig;
use crate::error_handling::EnrichError;
use crate::models::{AiAnalysis, AnalysisSource, ScanMetrics};
use crate::scoring;

pub use gemini::GeminiProvider;
pub use prompt::{build_user_prompt, response_schema, SYSTEM_INSTRUCTION};
pub use provider::{AnalysisProvider, AnalysisRequest};

/// Orchestrator states.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EnrichState {
    Idle,
    Simulated,
    RemotePending,
    RemoteSuccess,
    RemoteFallback,
}

impl EnrichState {
    /// The source tag for a terminal state; `None` while still running.
    pub fn source(&self) -> Option<AnalysisSource> {
        match self {
            EnrichState::Simulated => Some(AnalysisSource::Simulated),
            EnrichState::RemoteSuccess => Some(AnalysisSource::Remote),
            EnrichState::RemoteFallback => Some(AnalysisSource::Fallback),
            EnrichState::Idle | EnrichState::RemotePending => None,
        }
    }
}

/// Produces an analysis for a scan, preferring the remote provider when one
/// is configured.
#[derive(Clone)]
pub struct Enricher {
    provider: Option<Arc<dyn AnalysisProvider>>,
    timeout: Duration,
    simulated_delay: Duration,
}

impl Enricher {
    /// Builds an orchestrator from configuration.
    ///
    /// A credential selects the Gemini provider; no credential or a blank one
    /// selects the simulated path. If the provider's HTTP client cannot be
    /// built the orchestrator also runs simulated.
    pub fn new(config: &EnrichConfig) -> Self {
        let provider = config
            .api_key
            .as_ref()
            .filter(|key| !key.trim().is_empty())
            .and_then(|key| {
                match GeminiProvider::new(key.clone(), config.base_url.clone(), config.model.clone()) {
                    Ok(provider) => Some(Arc::new(provider) as Arc<dyn AnalysisProvider>),
                    Err(e) => {
                        warn!("Remote analysis disabled: {e}");
                        None
                    }
                }
            });
        Self {
            provider,
            timeout: config.timeout,
            simulated_delay: config.simulated_delay,
        }
    }

    /// Builds an orchestrator around an explicit provider.
    pub fn with_provider(provider: Arc<dyn AnalysisProvider>, config: &EnrichConfig) -> Self {
        Self {
            provider: Some(provider),
            timeout: config.timeout,
            simulated_delay: config.simulated_delay,
        }
    }

    /// Returns true if a remote provider is configured.
    pub fn is_remote(&self) -> bool {
        self.provider.is_some()
    }

    /// Produces an analysis. Never fails.
    pub async fn enrich(&self, metrics: &ScanMetrics, diagnostic_logs: &str) -> AiAnalysis {
        self.enrich_with_source(metrics, diagnostic_logs).await.0
    }

    /// Produces an analysis and reports which path produced it. Never fails.
    pub async fn enrich_with_source(
        &self,
        metrics: &ScanMetrics,
        diagnostic_logs: &str,
    ) -> (AiAnalysis, AnalysisSource) {
        let mut state = EnrichState::Idle;

        let analysis = match &self.provider {
            None => {
                state = transition(state, EnrichState::Simulated, &metrics.url);
                tokio::time::sleep(self.simulated_delay).await;
                scoring::analyze(metrics, diagnostic_logs)
            }
            Some(provider) => {
                state = transition(state, EnrichState::RemotePending, &metrics.url);
                match self.request_remote(provider, metrics, diagnostic_logs).await {
                    Ok(analysis) => {
                        state = transition(state, EnrichState::RemoteSuccess, &metrics.url);
                        analysis
                    }
                    Err(e) => {
                        warn!(
                            "Remote analysis of {} via {} failed, using deterministic analysis: {e}",
                            metrics.url,
                            provider.name()
                        );
                        state = transition(state, EnrichState::RemoteFallback, &metrics.url);
                        scoring::analyze(metrics, diagnostic_logs)
                    }
                }
            }
        };

        let source = state.source().unwrap_or(AnalysisSource::Fallback);
        info!(
            "Analysis of {} ready: score {} ({})",
            metrics.url,
            analysis.health_score,
            source.as_str()
        );
        (analysis, source)
    }

    /// Runs the remote call against the deadline.
    async fn request_remote(
        &self,
        provider: &Arc<dyn AnalysisProvider>,
        metrics: &ScanMetrics,
        diagnostic_logs: &str,
    ) -> Result<AiAnalysis, EnrichError> {
        let request = AnalysisRequest::from_scan(metrics, diagnostic_logs);
        let (tx, rx) = oneshot::channel();
        let task_provider = Arc::clone(provider);

        tokio::spawn(async move {
            let result = task_provider.analyze(&request).await;
            // Fails only when the orchestrator already stopped waiting
            if tx.send(result).is_err() {
                debug!("Discarding remote analysis that arrived after the deadline");
            }
        });

        match tokio::time::timeout(self.timeout, rx).await {
            Ok(Ok(result)) => parse_analysis(&result?),
            Ok(Err(_)) => Err(EnrichError::TaskAborted),
            Err(_) => Err(EnrichError::Timeout(self.timeout.as_millis())),
        }
    }
}

fn transition(from: EnrichState, to: EnrichState, url: &str) -> EnrichState {
    debug!("Enrichment of {url}: {from:?} -> {to:?}");
    to
}

/// Validates a remote reply and turns it into an analysis.
///
/// # Errors
///
/// `EmptyPayload` for blank text; `MalformedPayload` for text that is not
/// JSON, does not match the analysis shape, or breaks a value rule.
pub fn parse_analysis(text: &str) -> Result<AiAnalysis, EnrichError> {
    let body = strip_code_fence(text.trim());
    if body.is_empty() {
        return Err(EnrichError::EmptyPayload);
    }
    let analysis: AiAnalysis =
        serde_json::from_str(body).map_err(|e| EnrichError::MalformedPayload(e.to_string()))?;
    if !analysis.is_complete() {
        return Err(EnrichError::MalformedPayload(
            "analysis is missing required content".to_string(),
        ));
    }
    Ok(analysis)
}

/// Removes a surrounding Markdown code fence, if any.
fn strip_code_fence(text: &str) -> &str {
    let Some(rest) = text.strip_prefix("```") else {
        return text;
    };
    // Drop the info string ("json") on the opening line
    let rest = rest.split_once('\n').map_or("", |(_, body)| body);
    rest.trim_end().strip_suffix("```").unwrap_or(rest).trim()
}
