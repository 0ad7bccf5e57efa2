// HTTP client for the remote accessibility analysis service.
//
// One POST per analysis, JSON in and JSON out. No retries and no timeout:
// a request runs until the server answers or the transport fails.

use anyhow::{Context, Result};
use async_trait::async_trait;
use tracing::{debug, warn};

use super::error::AnalysisError;
use super::traits::{AnalysisBackend, AnalysisRequest};
use super::wire::{parse_error_detail, parse_report, WireFormat};
use crate::config::Config;
use crate::report::models::AnalysisReport;

/// reqwest-backed implementation of [`AnalysisBackend`].
pub struct AnalyzerClient {
    client: reqwest::Client,
    endpoint: String,
    format: WireFormat,
}

impl AnalyzerClient {
    /// Create a client posting to `base_url` + `path`.
    pub fn new(base_url: &str, path: &str, format: WireFormat) -> Result<Self> {
        let client = reqwest::Client::builder()
            .user_agent(concat!("a11y-report/", env!("CARGO_PKG_VERSION")))
            .build()
            .context("Failed to build HTTP client")?;

        Ok(Self {
            client,
            endpoint: join_endpoint(base_url, path),
            format,
        })
    }

    /// Create a client from loaded configuration.
    pub fn from_config(config: &Config) -> Result<Self> {
        Self::new(&config.api_base_url, &config.analyze_path, config.wire_format)
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

#[async_trait]
impl AnalysisBackend for AnalyzerClient {
    async fn submit_analysis(&self, url: &str) -> Result<AnalysisReport, AnalysisError> {
        debug!(endpoint = %self.endpoint, url = url, "Submitting analysis request");

        let request = AnalysisRequest {
            url: url.to_string(),
        };

        // `.json()` sets Content-Type: application/json
        let response = self
            .client
            .post(&self.endpoint)
            .json(&request)
            .send()
            .await
            .map_err(|e| AnalysisError::Network(e.to_string()))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| AnalysisError::Network(e.to_string()))?;

        if !status.is_success() {
            let detail = parse_error_detail(&body);
            warn!(
                status = status.as_u16(),
                detail = ?detail,
                "Analysis service returned an error"
            );
            return Err(AnalysisError::Backend {
                status: status.as_u16(),
                detail,
            });
        }

        let report = parse_report(&body, url, self.format)?;

        debug!(
            url = %report.url,
            score = report.score,
            violations = report.violations.len(),
            "Analysis response parsed"
        );

        Ok(report)
    }
}

/// Join a base URL and a path with exactly one slash between them.
pub fn join_endpoint(base_url: &str, path: &str) -> String {
    let base = base_url.trim().trim_end_matches('/');
    let path = path.trim().trim_start_matches('/');
    if path.is_empty() {
        base.to_string()
    } else {
        format!("{base}/{path}")
    }
}
