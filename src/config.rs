use std::env;

use anyhow::Result;

use crate::analyzer::wire::WireFormat;

/// Default analysis service, matching the backend's default port.
pub const DEFAULT_API_BASE_URL: &str = "http://localhost:8080";

/// Path served by the headless-Chrome backend. The mock backend uses `/analyze`.
pub const DEFAULT_ANALYZE_PATH: &str = "/api/analyze";

/// Central configuration.
///
/// Only the base URL comes from the environment (API_BASE_URL). The .env
/// file is loaded automatically at startup via dotenvy. Path and wire format
/// are set from command-line flags.
#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    /// Analysis service root (defaults to http://localhost:8080)
    pub api_base_url: String,
    /// Path appended to the base URL for the analyze call
    pub analyze_path: String,
    /// Which findings field the service sends
    pub wire_format: WireFormat,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_base_url: DEFAULT_API_BASE_URL.to_string(),
            analyze_path: DEFAULT_ANALYZE_PATH.to_string(),
            wire_format: WireFormat::default(),
        }
    }
}

impl Config {
    /// Load configuration from environment variables.
    pub fn load() -> Result<Self> {
        let api_base_url = env::var("API_BASE_URL")
            .ok()
            .map(|v| v.trim().to_string())
            .filter(|v| !v.is_empty())
            .unwrap_or_else(|| DEFAULT_API_BASE_URL.to_string());

        Ok(Self {
            api_base_url,
            ..Self::default()
        })
    }

    /// Check that the base URL is something reqwest can POST to.
    pub fn validate(&self) -> Result<()> {
        let parsed = reqwest::Url::parse(&self.api_base_url).map_err(|e| {
            anyhow::anyhow!(
                "API_BASE_URL is not a valid URL ({}): {}\n\
                 Set it in your environment or .env file, e.g. API_BASE_URL=http://localhost:8080",
                e,
                self.api_base_url
            )
        })?;

        if !matches!(parsed.scheme(), "http" | "https") {
            anyhow::bail!(
                "API_BASE_URL must use http or https, got '{}'",
                parsed.scheme()
            );
        }
        Ok(())
    }

    /// Full URL the analyze request is posted to.
    pub fn endpoint(&self) -> String {
        crate::analyzer::client::join_endpoint(&self.api_base_url, &self.analyze_path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_endpoint() {
        assert_eq!(
            Config::default().endpoint(),
            "http://localhost:8080/api/analyze"
        );
    }

    #[test]
    fn test_validate_rejects_other_schemes() {
        let config = Config {
            api_base_url: "ftp://files.example.com".to_string(),
            ..Config::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validate_rejects_garbage() {
        let config = Config {
            api_base_url: "not a url".to_string(),
            ..Config::default()
        };
        assert!(config.validate().is_err());
        assert!(Config::default().validate().is_ok());
    }
}
