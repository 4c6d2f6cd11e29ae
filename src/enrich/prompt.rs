//! Instruction text and reply schema for the remote analysis.

use serde_json::{json, Value};

use crate::models::PrivacyLevel;

use super::provider::AnalysisRequest;

/// Instruction sent with every remote analysis request.
///
/// The scoring rubric matches `scoring::Deduction`; the remote service is
/// expected to approximate it, and the deterministic engine stays the
/// authority whenever the remote reply is unusable.
pub const SYSTEM_INSTRUCTION: &str = "\
You review the health of a website for a non-technical site owner.
You receive the result of a single request to the site and, optionally, error output collected in a browser.

Writing rules:
- Use plain, friendly language. Do not use technical jargon.
- Do not use Markdown or any other markup: no asterisks, underscores, backticks, hash signs or HTML tags in any string.
- Keep every detail to one short sentence.

Scoring rules (start at 100, apply every rule that fits, never go below 0):
- Subtract 20 if the address does not start with https.
- Subtract 40 if the status code is 400 or higher.
- Subtract 15 if there is no status code because the site was blocked or could not be reached.
- Subtract 15 if browser error output is present.
- Subtract 10 if no page markup was captured.

Set the privacy level to \"Low concern\" when the score is above 80, otherwise \"Needs attention\", or \"High concern\" if you see a serious privacy problem.
Reply with JSON that matches the given schema and nothing else.";

/// Builds the user message describing one scan.
pub fn build_user_prompt(request: &AnalysisRequest) -> String {
    let payload = serde_json::to_string_pretty(request).unwrap_or_else(|_| "{}".to_string());
    format!("Analyze this website scan and reply with the health report.\n\nScan data:\n{payload}")
}

/// JSON schema for the reply, in the subset of OpenAPI the service accepts.
pub fn response_schema() -> Value {
    let finding = json!({
        "type": "OBJECT",
        "properties": {
            "summary": { "type": "STRING" },
            "details": { "type": "ARRAY", "items": { "type": "STRING" } }
        },
        "required": ["summary", "details"]
    });
    let levels: Vec<&str> = PrivacyLevel::ALL.iter().map(PrivacyLevel::as_str).collect();

    json!({
        "type": "OBJECT",
        "properties": {
            "healthScore": { "type": "INTEGER" },
            "seo": finding,
            "accessibility": finding,
            "privacy": {
                "type": "OBJECT",
                "properties": {
                    "level": { "type": "STRING", "enum": levels },
                    "summary": { "type": "STRING" },
                    "details": { "type": "ARRAY", "items": { "type": "STRING" } }
                },
                "required": ["level", "summary", "details"]
            },
            "jsErrors": finding,
            "recommendations": { "type": "ARRAY", "items": { "type": "STRING" } }
        },
        "required": ["healthScore", "seo", "accessibility", "privacy", "recommendations"]
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::ScanMetrics;
    use std::collections::BTreeMap;

    #[test]
    fn test_instruction_mirrors_scoring_rubric() {
        for rule in [
            "Subtract 20",
            "Subtract 40",
            "Subtract 15 if there is no status code",
            "Subtract 15 if browser error output",
            "Subtract 10",
        ] {
            assert!(SYSTEM_INSTRUCTION.contains(rule), "missing rule: {rule}");
        }
        assert!(SYSTEM_INSTRUCTION.contains("Do not use technical jargon"));
        assert!(SYSTEM_INSTRUCTION.contains("Do not use Markdown"));
    }

    #[test]
    fn test_schema_lists_privacy_levels() {
        let schema = response_schema();
        let levels = &schema["properties"]["privacy"]["properties"]["level"]["enum"];
        assert_eq!(levels, &json!(["Low concern", "Needs attention", "High concern"]));
        assert_eq!(schema["properties"]["healthScore"]["type"], "INTEGER");
    }

    #[test]
    fn test_schema_required_fields_match_model() {
        let schema = response_schema();
        let required: Vec<&str> = schema["required"]
            .as_array()
            .expect("array")
            .iter()
            .filter_map(Value::as_str)
            .collect();
        assert_eq!(
            required,
            vec!["healthScore", "seo", "accessibility", "privacy", "recommendations"]
        );
    }

    #[test]
    fn test_user_prompt_embeds_scan_payload() {
        let metrics = ScanMetrics::reachable(
            "https://ok.example".to_string(),
            404,
            12,
            BTreeMap::new(),
            None,
        );
        let prompt = build_user_prompt(&AnalysisRequest::from_scan(&metrics, "boom"));
        assert!(prompt.contains("\"url\": \"https://ok.example\""));
        assert!(prompt.contains("\"statusCode\": 404"));
        assert!(prompt.contains("\"diagnosticLogs\": \"boom\""));
    }
}
