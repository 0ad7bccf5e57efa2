// Output formatting — terminal display and JSON export.

pub mod terminal;

use anyhow::Result;

use crate::report::models::AnalysisReport;
use crate::report::sort::SortState;

/// Truncate a string to at most `max_chars` characters, appending "..." if truncated.
///
/// Unlike byte slicing (`&text[..120]`), this respects UTF-8 character boundaries
/// and will never panic on multi-byte characters like emoji or accented letters.
pub fn truncate_chars(text: &str, max_chars: usize) -> String {
    let char_count = text.chars().count();
    if char_count <= max_chars {
        text.to_string()
    } else {
        let truncated: String = text.chars().take(max_chars).collect();
        format!("{truncated}...")
    }
}

/// Serialize a report as pretty JSON with violations in display order.
pub fn report_json(report: &AnalysisReport, sort: &SortState) -> Result<String> {
    let ordered = AnalysisReport {
        violations: sort.apply(&report.violations),
        ..report.clone()
    };
    Ok(serde_json::to_string_pretty(&ordered)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::report::models::{Impact, Violation};

    #[test]
    fn test_truncate_multibyte() {
        assert_eq!(truncate_chars("héllo wörld", 5), "héllo...");
        assert_eq!(truncate_chars("short", 10), "short");
    }

    #[test]
    fn test_report_json_uses_sort_order() {
        let make = |id: &str, impact| Violation {
            id: Some(id.to_string()),
            impact,
            help: None,
            description: None,
            help_url: None,
            nodes_affected: 0,
            wcag: None,
        };
        let report = AnalysisReport {
            url: "https://a.com".to_string(),
            score: 70.0,
            violations: vec![make("low", Impact::Minor), make("high", Impact::Critical)],
            impact_counts: None,
            generated_at: None,
        };

        let json = report_json(&report, &SortState::default()).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["violations"][0]["id"], "high");
        assert_eq!(value["violations"][1]["impact"], "minor");
        assert_eq!(value["url"], "https://a.com");
        assert!(value.get("impactCounts").is_none());
    }
}
