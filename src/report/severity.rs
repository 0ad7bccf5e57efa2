// Severity breakdown for the report chart.
//
// Per-bucket counts come only from the server's impactCounts. When those
// are absent or all zero but violations exist, the chart denominator falls
// back to the violation count while the buckets stay at zero. This is a
// display convenience, not a recount by impact.

use super::models::{AnalysisReport, Impact, ImpactCounts};

/// Bucket counts and the denominator used to draw the severity chart.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SeverityBreakdown {
    pub counts: ImpactCounts,
    pub total: u64,
}

impl SeverityBreakdown {
    /// Fraction (0.0-1.0) of the total that falls in one bucket.
    pub fn share(&self, impact: Impact) -> f64 {
        if self.total == 0 {
            return 0.0;
        }
        (self.counts.get(impact) as f64 / self.total as f64).min(1.0)
    }
}

/// Aggregate severity counts for a report.
pub fn aggregate_severity_counts(report: &AnalysisReport) -> SeverityBreakdown {
    let counts = report.impact_counts.unwrap_or_default();
    let mut total = counts.total();

    if total == 0 && !report.violations.is_empty() {
        total = report.violations.len() as u64;
    }

    SeverityBreakdown { counts, total }
}
