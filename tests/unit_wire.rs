// Unit tests for the wire-format adapter.
//
// Tests response shape validation and field normalization for both
// service formats, all without network access.

use a11y_report::analyzer::error::AnalysisError;
use a11y_report::analyzer::wire::{parse_report, WireFormat};
use a11y_report::report::models::{Impact, UNTITLED_ISSUE};
use a11y_report::report::severity::aggregate_severity_counts;

const REQUESTED: &str = "https://requested.example";

fn is_invalid(result: Result<impl std::fmt::Debug, AnalysisError>) -> bool {
    matches!(result, Err(AnalysisError::InvalidResponse(_)))
}

// ============================================================
// violations format
// ============================================================

#[test]
fn parse_rich_report() {
    let json = r#"{
        "url": "https://a.com",
        "score": 82,
        "violations": [
            {"id": "image-alt", "impact": "Critical", "help": "Images must have alternate text",
             "description": "Ensures <img> elements have alternate text",
             "helpUrl": "https://dequeuniversity.com/rules/axe/4.8/image-alt", "nodesAffected": 4},
            {"id": "region", "impact": "moderate", "help": "All page content should be contained by landmarks",
             "nodesAffected": 1}
        ],
        "impactCounts": {"critical": 1, "moderate": 1}
    }"#;
    let report = parse_report(json, REQUESTED, WireFormat::Violations).unwrap();
    assert_eq!(report.url, "https://a.com");
    assert_eq!(report.score, 82.0);
    assert_eq!(report.violations.len(), 2);
    assert_eq!(report.violations[0].impact, Impact::Critical);
    assert_eq!(report.violations[0].nodes_affected, 4);
    assert_eq!(
        report.violations[0].help_url.as_deref(),
        Some("https://dequeuniversity.com/rules/axe/4.8/image-alt")
    );
    let counts = report.impact_counts.unwrap();
    assert_eq!(counts.critical, 1);
    assert_eq!(counts.moderate, 1);
    assert_eq!(counts.serious, 0);
}

#[test]
fn parse_without_impact_counts_uses_fallback_total() {
    let json = r#"{"url":"https://a.com","score":82,"violations":[{"impact":"serious","nodesAffected":3},{"impact":"critical","nodesAffected":1}]}"#;
    let report = parse_report(json, REQUESTED, WireFormat::Violations).unwrap();
    assert_eq!(report.total_violations(), 2);
    assert!(report.impact_counts.is_none());
    assert_eq!(aggregate_severity_counts(&report).total, 2);
}

#[test]
fn empty_violations_is_valid() {
    let json = r#"{"url":"https://a.com","score":100,"violations":[]}"#;
    let report = parse_report(json, REQUESTED, WireFormat::Violations).unwrap();
    assert!(report.violations.is_empty());
}

#[test]
fn missing_violations_is_invalid() {
    let json = r#"{"url":"https://a.com","score":82}"#;
    assert!(is_invalid(parse_report(json, REQUESTED, WireFormat::Violations)));
}

#[test]
fn violations_not_array_is_invalid() {
    let json = r#"{"url":"https://a.com","score":82,"violations":{"impact":"minor"}}"#;
    assert!(is_invalid(parse_report(json, REQUESTED, WireFormat::Violations)));
    let json = r#"{"url":"https://a.com","score":82,"violations":null}"#;
    assert!(is_invalid(parse_report(json, REQUESTED, WireFormat::Violations)));
}

#[test]
fn malformed_or_non_object_body_is_invalid() {
    assert!(is_invalid(parse_report("", REQUESTED, WireFormat::Violations)));
    assert!(is_invalid(parse_report("{not json", REQUESTED, WireFormat::Violations)));
    assert!(is_invalid(parse_report("[]", REQUESTED, WireFormat::Violations)));
    assert!(is_invalid(parse_report("null", REQUESTED, WireFormat::Violations)));
}

#[test]
fn non_object_violation_item_is_invalid() {
    let json = r#"{"score":82,"violations":["Images must have alt text (critical)"]}"#;
    assert!(is_invalid(parse_report(json, REQUESTED, WireFormat::Violations)));
}

#[test]
fn lenient_fields_default() {
    let json = r#"{
        "score": "high",
        "violations": [{"impact": 7, "help": null, "nodesAffected": "three"}],
        "impactCounts": {"Critical": 2, "bogus": 9, "minor": "x"}
    }"#;
    let report = parse_report(json, REQUESTED, WireFormat::Violations).unwrap();
    assert_eq!(report.url, REQUESTED);
    assert_eq!(report.score, 0.0);
    let v = &report.violations[0];
    assert_eq!(v.impact, Impact::Unknown);
    assert_eq!(v.title(), UNTITLED_ISSUE);
    assert_eq!(v.nodes_affected, 0);
    let counts = report.impact_counts.unwrap();
    assert_eq!(counts.critical, 2);
    assert_eq!(counts.minor, 0);
    assert_eq!(counts.total(), 2);
}

#[test]
fn huge_impact_counts_saturate() {
    let json = r#"{"score":10,"violations":[],"impactCounts":{"critical":1e30,"serious":1e30}}"#;
    let report = parse_report(json, REQUESTED, WireFormat::Violations).unwrap();
    let counts = report.impact_counts.unwrap();
    assert_eq!(counts.critical, u64::MAX);
    assert_eq!(counts.total(), u64::MAX);

    let json = r#"{"score":10,"violations":[],"impactCounts":{"critical":18446744073709551615,"Critical":1}}"#;
    let report = parse_report(json, REQUESTED, WireFormat::Violations).unwrap();
    assert_eq!(report.impact_counts.unwrap().critical, u64::MAX);
    assert_eq!(aggregate_severity_counts(&report).total, u64::MAX);
}

#[test]
fn out_of_range_score_kept_raw() {
    let json = r#"{"url":"https://a.com","score":150,"violations":[]}"#;
    let report = parse_report(json, REQUESTED, WireFormat::Violations).unwrap();
    assert_eq!(report.score, 150.0);
}

#[test]
fn violations_format_ignores_issues_field() {
    let json = r#"{"score":90,"issues":["x (minor)"],"violations":[]}"#;
    let report = parse_report(json, REQUESTED, WireFormat::Violations).unwrap();
    assert!(report.violations.is_empty());
}

// ============================================================
// issues (legacy) format
// ============================================================

#[test]
fn parse_mock_backend_records() {
    let json = r#"{
        "url": "https://b.com",
        "score": 78,
        "issues": [
            {"impact": "critical", "description": "Image elements do not have alt attributes", "wcag": "1.1.1"},
            {"impact": "moderate", "description": "Form inputs lack associated labels", "wcag": "3.3.2"}
        ],
        "generatedAt": "2024-05-01T12:30:00.123456789+02:00"
    }"#;
    let report = parse_report(json, REQUESTED, WireFormat::Issues).unwrap();
    assert_eq!(report.violations.len(), 2);
    assert_eq!(report.violations[0].impact, Impact::Critical);
    assert_eq!(report.violations[0].wcag.as_deref(), Some("1.1.1"));
    assert_eq!(
        report.violations[1].description.as_deref(),
        Some("Form inputs lack associated labels")
    );
    assert!(report.generated_at.is_some());
    assert_eq!(
        report.violations[0].title(),
        "Image elements do not have alt attributes"
    );
}

#[test]
fn issue_record_help_wins_over_description() {
    let json = r#"{"score":78,"issues":[{"impact":"minor","help":"Short title","description":"Longer text"}]}"#;
    let report = parse_report(json, REQUESTED, WireFormat::Issues).unwrap();
    assert_eq!(report.violations[0].title(), "Short title");
}

#[test]
fn violation_record_without_help_stays_untitled() {
    let json = r#"{"score":78,"violations":[{"impact":"minor","description":"Longer text"}]}"#;
    let report = parse_report(json, REQUESTED, WireFormat::Violations).unwrap();
    assert_eq!(report.violations[0].title(), UNTITLED_ISSUE);
}

#[test]
fn parse_issue_strings() {
    let json = r#"{"url":"https://c.com","score":84,"issues":["Images must have alternate text (critical)","Document should have one main landmark (moderate)","Plain text finding"]}"#;
    let report = parse_report(json, REQUESTED, WireFormat::Issues).unwrap();
    let impacts: Vec<Impact> = report.violations.iter().map(|v| v.impact).collect();
    assert_eq!(
        impacts,
        vec![Impact::Critical, Impact::Moderate, Impact::Unknown]
    );
    assert_eq!(
        report.violations[0].help.as_deref(),
        Some("Images must have alternate text")
    );
    assert_eq!(report.violations[2].title(), "Plain text finding");
}

#[test]
fn issues_format_requires_issues_field() {
    let json = r#"{"url":"https://a.com","score":82,"violations":[]}"#;
    assert!(is_invalid(parse_report(json, REQUESTED, WireFormat::Issues)));
}

#[test]
fn unparsable_timestamp_is_dropped() {
    let json = r#"{"score":78,"issues":[],"generatedAt":"yesterday"}"#;
    let report = parse_report(json, REQUESTED, WireFormat::Issues).unwrap();
    assert!(report.generated_at.is_none());
}
