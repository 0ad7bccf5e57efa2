// Error taxonomy for one analysis cycle.
//
// Every variant renders as exactly one user-facing line. The controller
// stores these in its Failed phase; nothing here is fatal.

use thiserror::Error;

/// Why an analysis did not produce a report.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum AnalysisError {
    /// The URL input was empty after trimming.
    #[error("Please enter a valid URL")]
    Validation,

    /// The request never got a response (connect, DNS, reset, body read).
    #[error("Could not reach the analysis service: {0}")]
    Network(String),

    /// The service answered with a non-success status.
    #[error("{}", backend_message(.status, .detail))]
    Backend { status: u16, detail: Option<String> },

    /// The service answered 2xx but the body is not a usable report.
    #[error("Analysis service returned an invalid report: {0}")]
    InvalidResponse(String),
}

impl AnalysisError {
    /// The single line shown to the user.
    pub fn user_message(&self) -> String {
        self.to_string()
    }
}

fn backend_message(status: &u16, detail: &Option<String>) -> String {
    match detail.as_deref().map(str::trim).filter(|d| !d.is_empty()) {
        Some(detail) => format!("Analysis failed (HTTP {status}): {detail}"),
        None => format!("Analysis failed (HTTP {status})"),
    }
}
