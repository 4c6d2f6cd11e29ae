//! URL normalization utilities.

/// Normalizes user input into a fetchable absolute URL.
///
/// Trims surrounding whitespace and adds an `https://` prefix unless the input
/// already starts with `http://` or `https://` (case-insensitive). Nothing else
/// is validated: a malformed host passes through and shows up later as a
/// probe failure.
///
/// # Arguments
///
/// * `raw` - The URL as typed by the user
///
/// # Returns
///
/// The normalized URL string. This function cannot fail.
pub fn normalize_url(raw: &str) -> String {
    let trimmed = raw.trim();
    if has_http_scheme(trimmed) {
        trimmed.to_string()
    } else {
        format!("https://{trimmed}")
    }
}

/// Returns true if the URL uses the secure scheme (case-insensitive `https`).
pub fn is_secure_url(url: &str) -> bool {
    starts_with_ignore_ascii_case(url, "https")
}

fn has_http_scheme(url: &str) -> bool {
    starts_with_ignore_ascii_case(url, "http://") || starts_with_ignore_ascii_case(url, "https://")
}

fn starts_with_ignore_ascii_case(value: &str, prefix: &str) -> bool {
    value
        .get(..prefix.len())
        .is_some_and(|head| head.eq_ignore_ascii_case(prefix))
}
