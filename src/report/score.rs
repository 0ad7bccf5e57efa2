// Score banding for the report header.
//
// The band label is decided on the raw score the server sent, so a
// server that reports 150 still reads "Excellent". Only the rendered bar
// width uses the clamped value.

/// Qualitative band for an accessibility score.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScoreBand {
    Excellent,
    Good,
    NeedsWork,
    Poor,
}

impl ScoreBand {
    /// Determine the band from a raw (unclamped) score.
    pub fn from_score(score: f64) -> Self {
        match score {
            s if s >= 90.0 => ScoreBand::Excellent,
            s if s >= 75.0 => ScoreBand::Good,
            s if s >= 60.0 => ScoreBand::NeedsWork,
            _ => ScoreBand::Poor,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            ScoreBand::Excellent => "Excellent",
            ScoreBand::Good => "Good",
            ScoreBand::NeedsWork => "Needs work",
            ScoreBand::Poor => "Poor",
        }
    }

    /// Stable style token for renderers (terminal color, CSS class, ...).
    pub fn style_class(&self) -> &'static str {
        match self {
            ScoreBand::Excellent => "score-excellent",
            ScoreBand::Good => "score-good",
            ScoreBand::NeedsWork => "score-needs-work",
            ScoreBand::Poor => "score-poor",
        }
    }
}

impl std::fmt::Display for ScoreBand {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// Band used for the label plus the clamped value used for the bar.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScoreDisplay {
    pub band: ScoreBand,
    /// Score clamped to 0-100, for bar width only
    pub bar_percent: f64,
}

/// Derive the label band and bar width for a score.
pub fn derive_score_band(score: f64) -> ScoreDisplay {
    ScoreDisplay {
        band: ScoreBand::from_score(score),
        bar_percent: clamp_score(score),
    }
}

/// Clamp a score into 0-100. Non-finite scores render as an empty bar.
pub fn clamp_score(score: f64) -> f64 {
    if score.is_nan() {
        return 0.0;
    }
    score.clamp(0.0, 100.0)
}
