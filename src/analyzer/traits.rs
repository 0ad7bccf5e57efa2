// Analysis backend trait — the seam between the controller and the network.
//
// The controller only ever talks to this trait. The reqwest client is the
// production implementation; tests plug in scripted backends.

use async_trait::async_trait;
use serde::Serialize;

use super::error::AnalysisError;
use crate::report::models::AnalysisReport;

/// JSON body of an analysis request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AnalysisRequest {
    pub url: String,
}

/// Something that can turn a normalized URL into an analysis report.
#[async_trait]
pub trait AnalysisBackend: Send + Sync {
    /// Submit one analysis. `url` is already normalized and non-empty.
    async fn submit_analysis(&self, url: &str) -> Result<AnalysisReport, AnalysisError>;
}
