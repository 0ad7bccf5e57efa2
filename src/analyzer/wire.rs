// Wire-format adapter for the analysis service.
//
// Two backend variants exist. The headless-Chrome service answers with a
// structured `violations` array and `impactCounts`; the older mock service
// answers with an `issues` array whose items are either plain strings
// ("<help> (<impact>)") or small {impact, description, wcag} records.
// Exactly one format is active at a time (chosen by config). Both land in
// the same `AnalysisReport`.
//
// Field parsing is lenient: a wrong-typed count or string reads as
// missing. The shape check is not: the findings field must be an array.

use std::collections::HashMap;
use std::str::FromStr;

use chrono::{DateTime, FixedOffset};
use serde::{Deserialize, Deserializer};
use serde_json::Value;

use super::error::AnalysisError;
use crate::report::models::{AnalysisReport, Impact, ImpactCounts, Violation};

/// Which findings field the service is expected to send.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum WireFormat {
    /// `violations: [{id, impact, help, description, helpUrl, nodesAffected}]`
    #[default]
    Violations,
    /// Legacy `issues: [string | {impact, description, wcag}]`
    Issues,
}

impl WireFormat {
    /// Name of the JSON field that must hold the findings array.
    pub fn field(&self) -> &'static str {
        match self {
            WireFormat::Violations => "violations",
            WireFormat::Issues => "issues",
        }
    }
}

impl FromStr for WireFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "violations" => Ok(WireFormat::Violations),
            "issues" | "legacy" => Ok(WireFormat::Issues),
            other => Err(format!(
                "unknown wire format '{other}' (expected violations or issues)"
            )),
        }
    }
}

impl std::fmt::Display for WireFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.field())
    }
}

/// Body of a non-success response. Only `error` is ever read.
#[derive(Debug, Deserialize)]
pub struct ErrorBody {
    pub error: Option<String>,
}

/// Pull the server's `error` string out of a non-success body, if any.
pub fn parse_error_detail(body: &str) -> Option<String> {
    serde_json::from_str::<ErrorBody>(body)
        .ok()
        .and_then(|b| b.error)
        .filter(|e| !e.trim().is_empty())
}

// --- Raw response types ---

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawReport {
    #[serde(default, deserialize_with = "lenient_string")]
    url: Option<String>,
    #[serde(default, deserialize_with = "lenient_score")]
    score: f64,
    #[serde(default, deserialize_with = "lenient_map")]
    impact_counts: Option<HashMap<String, Value>>,
    #[serde(default, deserialize_with = "lenient_timestamp")]
    generated_at: Option<DateTime<FixedOffset>>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawViolation {
    #[serde(default, deserialize_with = "lenient_string")]
    id: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    impact: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    help: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    description: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    help_url: Option<String>,
    #[serde(default, deserialize_with = "lenient_count")]
    nodes_affected: u64,
    #[serde(default, deserialize_with = "lenient_string")]
    wcag: Option<String>,
}

impl From<RawViolation> for Violation {
    fn from(raw: RawViolation) -> Self {
        Violation {
            id: raw.id,
            impact: raw.impact.as_deref().map(Impact::parse).unwrap_or(Impact::Unknown),
            help: raw.help,
            description: raw.description,
            help_url: raw.help_url,
            nodes_affected: raw.nodes_affected,
            wcag: raw.wcag,
        }
    }
}

/// Normalize a 2xx response body into the canonical report.
///
/// `requested_url` stands in for the echoed URL when the server omits it.
pub fn parse_report(
    body: &str,
    requested_url: &str,
    format: WireFormat,
) -> Result<AnalysisReport, AnalysisError> {
    if body.trim().is_empty() {
        return Err(AnalysisError::InvalidResponse("empty body".to_string()));
    }

    let value: Value = serde_json::from_str(body)
        .map_err(|e| AnalysisError::InvalidResponse(format!("malformed JSON: {e}")))?;

    let Value::Object(mut object) = value else {
        return Err(AnalysisError::InvalidResponse(
            "expected a JSON object".to_string(),
        ));
    };

    let findings = match object.remove(format.field()) {
        Some(Value::Array(items)) => items,
        Some(_) => {
            return Err(AnalysisError::InvalidResponse(format!(
                "`{}` is not an array",
                format.field()
            )))
        }
        None => {
            return Err(AnalysisError::InvalidResponse(format!(
                "missing `{}` field",
                format.field()
            )))
        }
    };

    let raw: RawReport = serde_json::from_value(Value::Object(object))
        .map_err(|e| AnalysisError::InvalidResponse(e.to_string()))?;

    let violations = findings
        .into_iter()
        .enumerate()
        .map(|(index, item)| parse_finding(item, format, index))
        .collect::<Result<Vec<_>, _>>()?;

    Ok(AnalysisReport {
        url: raw
            .url
            .filter(|u| !u.trim().is_empty())
            .unwrap_or_else(|| requested_url.to_string()),
        score: raw.score,
        violations,
        impact_counts: raw.impact_counts.map(collect_impact_counts),
        generated_at: raw.generated_at,
    })
}

fn parse_finding(item: Value, format: WireFormat, index: usize) -> Result<Violation, AnalysisError> {
    match (format, item) {
        (WireFormat::Issues, Value::String(text)) => Ok(parse_issue_text(&text)),
        (_, item @ Value::Object(_)) => {
            let mut violation = serde_json::from_value::<RawViolation>(item)
                .map(Violation::from)
                .map_err(|e| {
                    AnalysisError::InvalidResponse(format!("{}[{index}]: {e}", format.field()))
                })?;
            // Legacy records only carry a description, which is the row text.
            if format == WireFormat::Issues && violation.help.is_none() {
                violation.help = violation.description.clone();
            }
            Ok(violation)
        }
        (_, other) => Err(AnalysisError::InvalidResponse(format!(
            "{}[{index}] is {}, expected an object",
            format.field(),
            json_kind(&other)
        ))),
    }
}

/// Split a legacy issue string "Help text (impact)" into title and impact.
///
/// A trailing parenthesized word that isn't an impact level stays part of
/// the title.
pub fn parse_issue_text(text: &str) -> Violation {
    let trimmed = text.trim();

    let split = trimmed
        .strip_suffix(')')
        .and_then(|rest| rest.rsplit_once('('))
        .and_then(|(help, impact)| {
            Impact::parse_strict(impact).map(|impact| (help.trim_end(), impact))
        });

    let (help, impact) = match split {
        Some((help, impact)) => (help, impact),
        None => (trimmed, Impact::Unknown),
    };

    Violation {
        id: None,
        impact,
        help: Some(help.to_string()).filter(|h| !h.is_empty()),
        description: None,
        help_url: None,
        nodes_affected: 0,
        wcag: None,
    }
}

fn collect_impact_counts(raw: HashMap<String, Value>) -> ImpactCounts {
    let mut counts = ImpactCounts::default();
    for (key, value) in raw {
        // Only the five known buckets count; other keys are ignored.
        if let Some(impact) = Impact::parse_strict(&key) {
            counts.set(impact, counts.get(impact).saturating_add(count_from_value(&value)));
        }
    }
    counts
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

// --- Lenient field helpers ---

fn count_from_value(value: &Value) -> u64 {
    if let Some(n) = value.as_u64() {
        return n;
    }
    match value.as_f64() {
        Some(f) if f.is_finite() && f > 0.0 => f as u64,
        _ => 0,
    }
}

fn lenient_count<'de, D>(deserializer: D) -> Result<u64, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(count_from_value(&value))
}

fn lenient_score<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(value.as_f64().unwrap_or(0.0))
}

fn lenient_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(match value {
        Value::String(s) => Some(s),
        _ => None,
    })
}

fn lenient_map<'de, D>(deserializer: D) -> Result<Option<HashMap<String, Value>>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(match value {
        Value::Object(map) => Some(map.into_iter().collect()),
        _ => None,
    })
}

fn lenient_timestamp<'de, D>(deserializer: D) -> Result<Option<DateTime<FixedOffset>>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(value
        .as_str()
        .and_then(|s| DateTime::parse_from_rfc3339(s).ok()))
}
