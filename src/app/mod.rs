//! Input handling used before a scan starts.
//!
//! This module provides URL normalization and the secure-scheme check shared
//! with the scoring engine.

pub mod url;

// Re-export public API
pub use url::{is_secure_url, normalize_url};
