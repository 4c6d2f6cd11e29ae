//! Remote analysis through the Generative Language `generateContent` API.

use futures::future::BoxFuture;
use log::debug;
use serde::Deserialize;
use serde_json::json;
use url::Url;

use crate::config::REMOTE_CLIENT_TIMEOUT;
use crate::error_handling::{EnrichError, InitializationError};
use crate::fetch::take_chars;
use crate::initialization::init_api_client;

use super::prompt::{build_user_prompt, response_schema, SYSTEM_INSTRUCTION};
use super::provider::{AnalysisProvider, AnalysisRequest};

/// Characters of an error response body kept in `EnrichError::Status`.
const MAX_ERROR_BODY_CHARS: usize = 500;

/// Header carrying the credential (kept out of the URL so it never shows up in logs).
const API_KEY_HEADER: &str = "x-goog-api-key";

/// `AnalysisProvider` backed by a Gemini model.
pub struct GeminiProvider {
    client: reqwest::Client,
    api_key: String,
    base_url: String,
    model: String,
}

impl GeminiProvider {
    /// Creates a provider for `model` at `base_url`.
    ///
    /// # Errors
    ///
    /// Returns `InitializationError::HttpClientError` if the client cannot be built.
    pub fn new(
        api_key: impl Into<String>,
        base_url: impl Into<String>,
        model: impl Into<String>,
    ) -> Result<Self, InitializationError> {
        Ok(Self {
            client: init_api_client(REMOTE_CLIENT_TIMEOUT)?,
            api_key: api_key.into(),
            base_url: base_url.into(),
            model: model.into(),
        })
    }

    /// The `generateContent` URL for the configured model.
    pub fn endpoint(&self) -> Result<Url, EnrichError> {
        let base = Url::parse(&format!("{}/", self.base_url.trim_end_matches('/')))?;
        Ok(base.join(&format!("v1beta/models/{}:generateContent", self.model))?)
    }

    async fn generate(&self, request: &AnalysisRequest) -> Result<String, EnrichError> {
        let endpoint = self.endpoint()?;
        let body = json!({
            "systemInstruction": { "parts": [{ "text": SYSTEM_INSTRUCTION }] },
            "contents": [{ "role": "user", "parts": [{ "text": build_user_prompt(request) }] }],
            "generationConfig": {
                "responseMimeType": "application/json",
                "responseSchema": response_schema()
            }
        });

        debug!("Requesting remote analysis of {} from {}", request.url, self.model);
        let response = self
            .client
            .post(endpoint)
            .header(API_KEY_HEADER, &self.api_key)
            .json(&body)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let text = response.text().await.unwrap_or_default();
            return Err(EnrichError::Status {
                status: status.as_u16(),
                body: take_chars(&text, MAX_ERROR_BODY_CHARS).to_string(),
            });
        }

        let reply: GenerateContentResponse = response
            .json()
            .await
            .map_err(|e| EnrichError::MalformedPayload(e.to_string()))?;
        Ok(reply.text())
    }
}

impl AnalysisProvider for GeminiProvider {
    fn name(&self) -> &str {
        &self.model
    }

    fn analyze<'a>(&'a self, request: &'a AnalysisRequest) -> BoxFuture<'a, Result<String, EnrichError>> {
        Box::pin(self.generate(request))
    }
}

#[derive(Debug, Default, Deserialize)]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    content: Option<Content>,
}

#[derive(Debug, Deserialize)]
struct Content {
    #[serde(default)]
    parts: Vec<Part>,
}

#[derive(Debug, Deserialize)]
struct Part {
    text: Option<String>,
}

impl GenerateContentResponse {
    /// Text of the first candidate, parts concatenated. Empty if there is none.
    fn text(&self) -> String {
        self.candidates
            .first()
            .and_then(|c| c.content.as_ref())
            .map(|content| {
                content
                    .parts
                    .iter()
                    .filter_map(|p| p.text.as_deref())
                    .collect::<String>()
            })
            .unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn provider(base_url: &str) -> GeminiProvider {
        GeminiProvider::new("key", base_url, "gemini-2.5-flash").expect("client")
    }

    #[test]
    fn test_endpoint_joins_model_path() {
        let url = provider("https://generativelanguage.googleapis.com")
            .endpoint()
            .expect("endpoint");
        assert_eq!(
            url.as_str(),
            "https://generativelanguage.googleapis.com/v1beta/models/gemini-2.5-flash:generateContent"
        );
    }

    #[test]
    fn test_endpoint_keeps_base_path() {
        let url = provider("http://127.0.0.1:9000/proxy/").endpoint().expect("endpoint");
        assert_eq!(
            url.as_str(),
            "http://127.0.0.1:9000/proxy/v1beta/models/gemini-2.5-flash:generateContent"
        );
    }

    #[test]
    fn test_invalid_base_url_is_an_error() {
        assert!(matches!(
            provider("not a url").endpoint(),
            Err(EnrichError::Endpoint(_))
        ));
    }

    #[test]
    fn test_reply_text_concatenates_parts() {
        let reply: GenerateContentResponse = serde_json::from_str(
            r#"{"candidates":[{"content":{"parts":[{"text":"{\"a\":"},{"text":"1}"}]}}]}"#,
        )
        .expect("parse");
        assert_eq!(reply.text(), "{\"a\":1}");
    }

    #[test]
    fn test_reply_without_candidates_is_empty() {
        let reply: GenerateContentResponse = serde_json::from_str("{}").expect("parse");
        assert_eq!(reply.text(), "");
        let blocked: GenerateContentResponse =
            serde_json::from_str(r#"{"candidates":[{"finishReason":"SAFETY"}]}"#).expect("parse");
        assert_eq!(blocked.text(), "");
    }
}
