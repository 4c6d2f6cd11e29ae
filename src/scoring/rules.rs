//! Point deductions.
//!
//! Each rule is independent; a scan's score is the base score minus the sum of
//! every rule that applies, clamped to `[0, 100]`.

use strum_macros::EnumIter as EnumIterMacro;

use crate::app::is_secure_url;
use crate::config::BASE_HEALTH_SCORE;
use crate::models::ScanMetrics;

/// A reason for taking points off the health score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, EnumIterMacro)]
pub enum Deduction {
    /// URL does not use https
    InsecureScheme,
    /// Status code 400 or above
    ErrorStatus,
    /// No status code at all (blocked, unreachable, timed out)
    MissingStatus,
    /// Diagnostic logs were supplied
    DiagnosticLogs,
    /// No markup could be extracted
    MissingHtml,
}

impl Deduction {
    /// Points taken off the score.
    pub fn points(&self) -> i32 {
        match self {
            Deduction::InsecureScheme => 20,
            Deduction::ErrorStatus => 40,
            Deduction::MissingStatus => 15,
            Deduction::DiagnosticLogs => 15,
            Deduction::MissingHtml => 10,
        }
    }

    /// Plain-language explanation shown in report details.
    pub fn description(&self) -> &'static str {
        match self {
            Deduction::InsecureScheme => "The address does not use a secure https connection",
            Deduction::ErrorStatus => "The page answered with an error instead of its content",
            Deduction::MissingStatus => "The site could not be reached or blocked the check",
            Deduction::DiagnosticLogs => "Errors were reported while the page was running",
            Deduction::MissingHtml => "No page content could be read",
        }
    }
}

/// Returns every deduction that applies to a scan, in table order.
pub fn deductions(metrics: &ScanMetrics, diagnostic_logs: &str) -> Vec<Deduction> {
    let mut applied = Vec::new();

    if !is_secure_url(&metrics.url) {
        applied.push(Deduction::InsecureScheme);
    }
    match metrics.status_code {
        Some(status) if status >= 400 => applied.push(Deduction::ErrorStatus),
        Some(_) => {}
        None => applied.push(Deduction::MissingStatus),
    }
    if has_diagnostic_logs(diagnostic_logs) {
        applied.push(Deduction::DiagnosticLogs);
    }
    if metrics.html_snippet.is_none() {
        applied.push(Deduction::MissingHtml);
    }

    applied
}

/// Logs count as present when they contain anything other than whitespace.
pub fn has_diagnostic_logs(diagnostic_logs: &str) -> bool {
    !diagnostic_logs.trim().is_empty()
}

/// Subtracts the deductions from the base score and clamps the result.
pub fn score_from(applied: &[Deduction]) -> u8 {
    let total: i32 = applied.iter().map(Deduction::points).sum();
    clamp_score(BASE_HEALTH_SCORE - total)
}

/// Clamps a raw score into `[0, 100]`.
pub fn clamp_score(raw: i32) -> u8 {
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    let clamped = raw.clamp(0, 100) as u8;
    clamped
}
