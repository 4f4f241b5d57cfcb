use std::env;

use thiserror::Error;

/// Environment variable naming the analysis service base URL.
pub const API_BASE_ENV: &str = "JOURNAL_API_URL";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error(
        "{API_BASE_ENV} is not set; point it at the analysis service base URL \
         (e.g. https://journal-api.example.com)"
    )]
    MissingApiBase,
}

/// Startup configuration. A missing analysis endpoint is a configuration
/// error surfaced here, never a runtime data-path failure.
#[derive(Debug, Clone)]
pub struct JournalConfig {
    api_base_url: String,
}

impl JournalConfig {
    /// Builds the config from an explicit base URL, stripping trailing
    /// slashes so request paths never double up.
    pub fn new(raw_base_url: impl Into<String>) -> Result<Self, ConfigError> {
        let base = raw_base_url.into();
        let base = base.trim().trim_end_matches('/');
        if base.is_empty() {
            return Err(ConfigError::MissingApiBase);
        }
        Ok(Self {
            api_base_url: base.to_string(),
        })
    }

    pub fn from_env() -> Result<Self, ConfigError> {
        match env::var(API_BASE_ENV) {
            Ok(raw) => Self::new(raw),
            Err(_) => Err(ConfigError::MissingApiBase),
        }
    }

    pub fn api_base_url(&self) -> &str {
        &self.api_base_url
    }

    pub fn analyze_url(&self) -> String {
        format!("{}/analyze", self.api_base_url)
    }
}
