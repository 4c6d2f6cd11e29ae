//! Report text for the deterministic analysis.
//!
//! Wording depends on four signals only: whether markup was read, whether the
//! address is secure, whether diagnostic logs were supplied, and the score
//! tier. Everything is plain text with no markup.

use crate::config::LOW_CONCERN_THRESHOLD;
use crate::models::{Finding, PrivacyFinding, PrivacyLevel};

use super::rules::Deduction;

/// The inputs the wording is allowed to depend on.
///
/// `score` is only ever read through [`Signals::privacy_level`].
#[derive(Debug, Clone, Copy)]
pub(crate) struct Signals {
    pub has_html: bool,
    pub is_secure: bool,
    pub has_logs: bool,
    pub score: u8,
}

impl Signals {
    pub(crate) fn privacy_level(&self) -> PrivacyLevel {
        if self.score > LOW_CONCERN_THRESHOLD {
            PrivacyLevel::LowConcern
        } else {
            PrivacyLevel::NeedsAttention
        }
    }

    fn needs_attention(&self) -> bool {
        self.privacy_level() == PrivacyLevel::NeedsAttention
    }
}

pub(crate) fn seo_finding(signals: &Signals) -> Finding {
    let mut details = Vec::new();
    let summary = if signals.has_html {
        details.push("The page sent back readable content that search engines can look at.".to_string());
        "The page content could be read, so search engines should be able to see it."
    } else {
        details.push(Deduction::MissingHtml.description().to_string());
        "The page content could not be read, so search visibility could not be checked."
    };
    if !signals.is_secure {
        details.push("Search engines rank secure pages higher than pages without https.".to_string());
    }
    if signals.needs_attention() {
        details.push("Pages that fail to load for visitors usually drop out of search results.".to_string());
    }
    Finding::new(summary, details)
}

pub(crate) fn accessibility_finding(signals: &Signals) -> Finding {
    if signals.has_html {
        Finding::new(
            "The page structure was found, but a full accessibility check needs a person using assistive tools.",
            vec![
                "Check that every image has a short text description.".to_string(),
                "Check that the page can be used with a keyboard alone.".to_string(),
            ],
        )
    } else {
        Finding::new(
            "Accessibility could not be checked because the page content was not available.",
            vec![Deduction::MissingHtml.description().to_string()],
        )
    }
}

pub(crate) fn privacy_finding(signals: &Signals) -> PrivacyFinding {
    let level = signals.privacy_level();
    let mut details = Vec::new();
    let summary = if signals.is_secure {
        details.push("Information sent to this site travels over an encrypted connection.".to_string());
        "The connection to this site is encrypted."
    } else {
        details.push(format!(
            "{}. Passwords or form entries could be read by others on the same network.",
            Deduction::InsecureScheme.description()
        ));
        "The connection to this site is not encrypted."
    };
    details.push(match level {
        PrivacyLevel::LowConcern => "Nothing in this scan suggests a privacy problem.".to_string(),
        _ => "Several problems in this scan are worth a closer look before sharing personal details.".to_string(),
    });
    PrivacyFinding {
        level,
        summary: summary.to_string(),
        details,
    }
}

pub(crate) fn js_errors_finding(signals: &Signals) -> Finding {
    if !signals.has_logs {
        return Finding::new("No browser errors were provided for this scan.", Vec::new());
    }
    Finding::new(
        format!("{}. Parts of the page may not work as expected.", Deduction::DiagnosticLogs.description()),
        vec![
            "Buttons, forms or menus may stop responding when these errors happen.".to_string(),
            "Share the full error output with whoever maintains the site.".to_string(),
        ],
    )
}

pub(crate) fn recommendations(signals: &Signals) -> Vec<String> {
    let mut recs = Vec::new();
    if !signals.is_secure {
        recs.push("Move the site to a secure https address so visitor information is protected.".to_string());
    }
    if !signals.has_html {
        recs.push("Make sure the page sends back its content when someone visits it.".to_string());
    }
    if signals.has_logs {
        recs.push("Ask your developer to fix the errors reported while the page runs.".to_string());
    }
    if signals.needs_attention() {
        recs.push("Check that the site loads normally for ordinary visitors and does not show an error page.".to_string());
        recs.push("Run this check again after making changes to see the score improve.".to_string());
    }
    if recs.is_empty() {
        recs.push("Nothing serious stood out. Keep checking the site regularly.".to_string());
    }
    recs
}

#[cfg(test)]
mod tests {
    use super::*;

    fn signals(has_html: bool, is_secure: bool, has_logs: bool, score: u8) -> Signals {
        Signals {
            has_html,
            is_secure,
            has_logs,
            score,
        }
    }

    #[test]
    fn test_privacy_level_tier_boundary() {
        assert_eq!(signals(true, true, false, 81).privacy_level(), PrivacyLevel::LowConcern);
        assert_eq!(signals(true, true, false, 80).privacy_level(), PrivacyLevel::NeedsAttention);
        assert_eq!(signals(true, true, false, 0).privacy_level(), PrivacyLevel::NeedsAttention);
    }

    #[test]
    fn test_js_errors_with_logs() {
        let finding = js_errors_finding(&signals(true, true, true, 85));
        assert!(finding.summary.starts_with(Deduction::DiagnosticLogs.description()));
        assert_eq!(finding.details.len(), 2);
    }

    #[test]
    fn test_js_errors_without_logs() {
        let finding = js_errors_finding(&signals(true, true, false, 100));
        assert!(finding.details.is_empty());
        assert!(finding.summary.starts_with("No browser errors"));
    }

    #[test]
    fn test_recommendations_follow_signals() {
        let recs = recommendations(&signals(false, false, false, 55));
        assert_eq!(recs.len(), 4);
        assert!(recs[0].contains("https"));
        assert!(recs[1].contains("content"));
    }

    #[test]
    fn test_recommendations_never_empty() {
        let recs = recommendations(&signals(true, true, false, 100));
        assert_eq!(recs, vec!["Nothing serious stood out. Keep checking the site regularly."]);
    }

    #[test]
    fn test_same_tier_scores_share_wording() {
        for (a, b) in [(100, 81), (80, 0), (85, 95)] {
            let first = signals(true, true, false, a);
            let second = signals(true, true, false, b);
            assert_eq!(seo_finding(&first), seo_finding(&second));
            assert_eq!(recommendations(&first), recommendations(&second));
            assert_eq!(privacy_finding(&first), privacy_finding(&second));
        }
    }

    #[test]
    fn test_insecure_privacy_mentions_encryption() {
        let finding = privacy_finding(&signals(true, false, false, 80));
        assert_eq!(finding.summary, "The connection to this site is not encrypted.");
        assert_eq!(finding.level, PrivacyLevel::NeedsAttention);
    }
}
