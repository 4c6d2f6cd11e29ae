//! HTTP response processing.
//!
//! Reads the probe response body and extracts the signals used for scoring.

mod extract;

use log::{debug, warn};

use crate::config::MAX_RESPONSE_BODY_SIZE;

pub use extract::{extract_html_snippet, take_chars};

/// Reads the response body as text, stopping at `MAX_RESPONSE_BODY_SIZE` bytes.
///
/// Oversized bodies are truncated rather than rejected: the snippet only needs
/// the start of the document. Invalid UTF-8 is replaced, not an error.
///
/// # Errors
///
/// Returns the transport error if reading a chunk fails.
pub(crate) async fn read_body_capped(
    mut response: reqwest::Response,
    url: &str,
) -> Result<String, reqwest::Error> {
    let mut bytes: Vec<u8> = Vec::new();
    while let Some(chunk) = response.chunk().await? {
        let remaining = MAX_RESPONSE_BODY_SIZE - bytes.len();
        if chunk.len() > remaining {
            bytes.extend_from_slice(&chunk[..remaining]);
            warn!(
                "Response body for {url} exceeds {MAX_RESPONSE_BODY_SIZE} bytes, truncating"
            );
            break;
        }
        bytes.extend_from_slice(&chunk);
    }
    debug!("Read {} body bytes from {url}", bytes.len());
    Ok(String::from_utf8_lossy(&bytes).into_owned())
}
