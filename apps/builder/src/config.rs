use std::path::PathBuf;
use std::time::Duration;

use anyhow::{Context, Result};

const DEFAULT_API_URL: &str = "http://localhost:5000";

/// Client configuration loaded from environment variables (and `.env`).
#[derive(Debug, Clone)]
pub struct Config {
    pub api_url: String,
    /// Where the bearer token is kept between invocations.
    pub session_file: PathBuf,
    pub request_timeout: Duration,
    pub export_dir: PathBuf,
    pub rust_log: String,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        Self::from_vars(|key| std::env::var(key).ok())
    }

    fn from_vars(var: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let timeout_secs = var("REQUEST_TIMEOUT_SECS")
            .unwrap_or_else(|| "30".to_string())
            .parse::<u64>()
            .context("REQUEST_TIMEOUT_SECS must be a whole number of seconds")?;

        Ok(Config {
            api_url: var("RESUME_API_URL").unwrap_or_else(|| DEFAULT_API_URL.to_string()),
            session_file: var("SESSION_FILE")
                .unwrap_or_else(|| ".resume-session".to_string())
                .into(),
            request_timeout: Duration::from_secs(timeout_secs),
            export_dir: var("EXPORT_DIR").unwrap_or_else(|| ".".to_string()).into(),
            rust_log: var("RUST_LOG").unwrap_or_else(|| "info".to_string()),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn config_from(pairs: &[(&str, &str)]) -> Result<Config> {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Config::from_vars(|key| vars.get(key).cloned())
    }

    #[test]
    fn test_defaults() {
        let config = config_from(&[]).unwrap();
        assert_eq!(config.api_url, DEFAULT_API_URL);
        assert_eq!(config.session_file, PathBuf::from(".resume-session"));
        assert_eq!(config.request_timeout, Duration::from_secs(30));
        assert_eq!(config.rust_log, "info");
    }

    #[test]
    fn test_overrides() {
        let config = config_from(&[
            ("RESUME_API_URL", "https://resume.example.com"),
            ("REQUEST_TIMEOUT_SECS", "5"),
            ("EXPORT_DIR", "/tmp/out"),
        ])
        .unwrap();
        assert_eq!(config.api_url, "https://resume.example.com");
        assert_eq!(config.request_timeout, Duration::from_secs(5));
        assert_eq!(config.export_dir, PathBuf::from("/tmp/out"));
    }

    #[test]
    fn test_bad_timeout_rejected() {
        let err = config_from(&[("REQUEST_TIMEOUT_SECS", "soon")]).unwrap_err();
        assert!(err.to_string().contains("REQUEST_TIMEOUT_SECS"));
    }
}
