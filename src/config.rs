//! Runtime configuration from `GLYCOCHECK_*` environment variables.

use std::path::PathBuf;
use std::time::Duration;

use crate::{GlycocheckError, Result};

pub const DEFAULT_API_URL: &str = "http://localhost:5050";
pub const DEFAULT_TIMEOUT_SECS: u64 = 10;
pub const DEFAULT_LOG_FILE: &str = "glycocheck.log";

/// Where log output goes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogMode {
    /// File when stdout is a terminal, stdout otherwise
    Auto,
    File,
    Stdout,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Base URL of the prediction service, without trailing slash
    pub api_url: String,
    pub timeout: Duration,
    pub report_dir: PathBuf,
    pub log_mode: LogMode,
    pub log_file: PathBuf,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_url: DEFAULT_API_URL.to_string(),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            report_dir: PathBuf::from("."),
            log_mode: LogMode::Auto,
            log_file: PathBuf::from(DEFAULT_LOG_FILE),
        }
    }
}

impl Config {
    /// Load from the process environment.
    ///
    /// # Errors
    /// Returns `GlycocheckError::Config` for malformed values.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load using an arbitrary variable lookup.
    ///
    /// # Errors
    /// Returns `GlycocheckError::Config` for malformed values.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(url) = lookup("GLYCOCHECK_API_URL") {
            let url = url.trim().trim_end_matches('/').to_string();
            if !(url.starts_with("http://") || url.starts_with("https://")) {
                return Err(GlycocheckError::Config(format!(
                    "GLYCOCHECK_API_URL must start with http:// or https://, got {url:?}"
                )));
            }
            config.api_url = url;
        }

        if let Some(secs) = lookup("GLYCOCHECK_TIMEOUT_SECS") {
            let secs = secs
                .trim()
                .parse::<u64>()
                .ok()
                .filter(|&s| s > 0)
                .ok_or_else(|| {
                    GlycocheckError::Config(format!(
                        "GLYCOCHECK_TIMEOUT_SECS must be a positive integer, got {secs:?}"
                    ))
                })?;
            config.timeout = Duration::from_secs(secs);
        }

        if let Some(dir) = lookup("GLYCOCHECK_REPORT_DIR").filter(|d| !d.is_empty()) {
            config.report_dir = PathBuf::from(dir);
        }

        if let Some(mode) = lookup("GLYCOCHECK_LOG_MODE") {
            config.log_mode = match mode.as_str() {
                "file" => LogMode::File,
                "stdout" => LogMode::Stdout,
                _ => LogMode::Auto,
            };
        }

        if let Some(file) = lookup("GLYCOCHECK_LOG_FILE").filter(|f| !f.is_empty()) {
            config.log_file = PathBuf::from(file);
        }

        Ok(config)
    }

    /// Full URL of the prediction endpoint.
    #[must_use]
    pub fn predict_url(&self) -> String {
        format!("{}/predict", self.api_url)
    }
}
