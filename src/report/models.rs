// Report models — the canonical shape every wire format is normalized into.
//
// These types are what the controller holds and what the output layer
// renders. They carry no knowledge of which backend variant produced them.

use chrono::{DateTime, FixedOffset};
use serde::{Deserialize, Serialize};

/// Label shown for a violation that arrived without a `help` title.
pub const UNTITLED_ISSUE: &str = "Untitled issue";

/// Severity of a single accessibility violation.
///
/// Parsed case-insensitively. Anything outside the four axe-core impact
/// levels (including a missing value) lands in `Unknown`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Impact {
    Critical,
    Serious,
    Moderate,
    Minor,
    Unknown,
}

impl Impact {
    /// All buckets in chart order, most severe first.
    pub const ALL: [Impact; 5] = [
        Impact::Critical,
        Impact::Serious,
        Impact::Moderate,
        Impact::Minor,
        Impact::Unknown,
    ];

    /// Parse a severity string. Never fails.
    pub fn parse(raw: &str) -> Self {
        match raw.trim().to_ascii_lowercase().as_str() {
            "critical" => Impact::Critical,
            "serious" => Impact::Serious,
            "moderate" => Impact::Moderate,
            "minor" => Impact::Minor,
            _ => Impact::Unknown,
        }
    }

    /// Parse only the four recognized levels plus the literal `unknown`.
    ///
    /// Used where an unrecognized word means "this is not an impact at all"
    /// rather than "impact of unknown severity".
    pub fn parse_strict(raw: &str) -> Option<Self> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "unknown" => Some(Impact::Unknown),
            other => match Impact::parse(other) {
                Impact::Unknown => None,
                known => Some(known),
            },
        }
    }

    /// Sort rank: higher is more severe.
    pub fn rank(&self) -> u8 {
        match self {
            Impact::Critical => 4,
            Impact::Serious => 3,
            Impact::Moderate => 2,
            Impact::Minor => 1,
            Impact::Unknown => 0,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Impact::Critical => "critical",
            Impact::Serious => "serious",
            Impact::Moderate => "moderate",
            Impact::Minor => "minor",
            Impact::Unknown => "unknown",
        }
    }
}

impl std::fmt::Display for Impact {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// One accessibility rule violation found on the analyzed page.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Violation {
    /// Rule identifier (e.g. `image-alt`)
    pub id: Option<String>,
    pub impact: Impact,
    /// Short title. Use [`Violation::title`] for display.
    pub help: Option<String>,
    pub description: Option<String>,
    /// Remediation link
    pub help_url: Option<String>,
    /// Number of DOM nodes the rule fired on
    pub nodes_affected: u64,
    /// WCAG success criterion, only sent by the legacy record format
    #[serde(skip_serializing_if = "Option::is_none")]
    pub wcag: Option<String>,
}

impl Violation {
    /// Display title, falling back to a generic label.
    pub fn title(&self) -> &str {
        self.help
            .as_deref()
            .filter(|h| !h.trim().is_empty())
            .unwrap_or(UNTITLED_ISSUE)
    }
}

/// Per-severity violation counts as reported by the backend.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImpactCounts {
    pub critical: u64,
    pub serious: u64,
    pub moderate: u64,
    pub minor: u64,
    pub unknown: u64,
}

impl ImpactCounts {
    pub fn get(&self, impact: Impact) -> u64 {
        match impact {
            Impact::Critical => self.critical,
            Impact::Serious => self.serious,
            Impact::Moderate => self.moderate,
            Impact::Minor => self.minor,
            Impact::Unknown => self.unknown,
        }
    }

    pub fn set(&mut self, impact: Impact, count: u64) {
        match impact {
            Impact::Critical => self.critical = count,
            Impact::Serious => self.serious = count,
            Impact::Moderate => self.moderate = count,
            Impact::Minor => self.minor = count,
            Impact::Unknown => self.unknown = count,
        }
    }

    /// Sum over the five known buckets.
    pub fn total(&self) -> u64 {
        Impact::ALL
            .iter()
            .map(|i| self.get(*i))
            .fold(0u64, u64::saturating_add)
    }
}

/// A complete analysis result for one URL.
///
/// Replaced wholesale on every new analysis; never mutated in place.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisReport {
    pub url: String,
    /// Raw score as sent by the server. May fall outside 0-100.
    pub score: f64,
    pub violations: Vec<Violation>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub impact_counts: Option<ImpactCounts>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub generated_at: Option<DateTime<FixedOffset>>,
}

impl AnalysisReport {
    pub fn total_violations(&self) -> usize {
        self.violations.len()
    }
}
