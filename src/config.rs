//! # Configuration Module
//!
//! Runtime settings for the generation pipeline: where the request log and
//! debug files live, how the credential is found, and the timing constants of
//! the admission, retry and polling loops. Uses a builder pattern so the CLI
//! and tests can override single values.

use std::path::PathBuf;
use std::time::Duration;

use crate::error::{Error, Result};

/// Configuration for a generation run
#[derive(Debug, Clone)]
pub struct Config {
    /// Directory holding `wal.json` and the debug files
    pub log_dir: PathBuf,

    /// Environment variable holding the API key
    pub api_key_env: String,

    /// Base URL of the generative API
    pub base_url: String,

    /// API version path segment
    pub api_version: String,

    /// Maximum number of attempts per generation
    pub max_attempts: u32,

    /// Sleep between admission checks while a quota is exhausted
    pub admission_wait: Duration,

    /// Sleep between polls of a long-running operation
    pub poll_interval: Duration,

    /// Wall-clock limit for a single long-running operation
    pub poll_timeout: Duration,

    /// External transcoder executable
    pub transcoder_program: PathBuf,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            log_dir: PathBuf::from(".logs"),
            api_key_env: "GEMINI_API_KEY".to_string(),
            base_url: "https://generativelanguage.googleapis.com".to_string(),
            api_version: "v1beta".to_string(),
            max_attempts: 3,
            admission_wait: Duration::from_secs(60),
            poll_interval: Duration::from_secs(10),
            poll_timeout: Duration::from_secs(10 * 60),
            transcoder_program: PathBuf::from("ffmpeg"),
        }
    }
}

/// Builder for Config
#[derive(Debug, Default)]
pub struct ConfigBuilder {
    config: Config,
}

impl ConfigBuilder {
    /// Create a new builder with default configuration
    pub fn new() -> Self {
        Self {
            config: Config::default(),
        }
    }

    /// Set the log directory
    pub fn log_dir(mut self, log_dir: impl Into<PathBuf>) -> Self {
        self.config.log_dir = log_dir.into();
        self
    }

    /// Set the environment variable that holds the API key
    pub fn api_key_env(mut self, api_key_env: impl Into<String>) -> Self {
        self.config.api_key_env = api_key_env.into();
        self
    }

    /// Set the API base URL
    pub fn base_url(mut self, base_url: impl Into<String>) -> Self {
        self.config.base_url = base_url.into();
        self
    }

    /// Set the maximum number of attempts per generation
    pub fn max_attempts(mut self, max_attempts: u32) -> Self {
        self.config.max_attempts = max_attempts.max(1);
        self
    }

    /// Set the sleep between admission checks
    pub fn admission_wait(mut self, admission_wait: Duration) -> Self {
        self.config.admission_wait = admission_wait;
        self
    }

    /// Set the long-running operation poll interval
    pub fn poll_interval(mut self, poll_interval: Duration) -> Self {
        self.config.poll_interval = poll_interval;
        self
    }

    /// Set the long-running operation poll timeout
    pub fn poll_timeout(mut self, poll_timeout: Duration) -> Self {
        self.config.poll_timeout = poll_timeout;
        self
    }

    /// Set the transcoder executable
    pub fn transcoder_program(mut self, program: impl Into<PathBuf>) -> Self {
        self.config.transcoder_program = program.into();
        self
    }

    /// Build the configuration
    pub fn build(self) -> Config {
        self.config
    }
}

impl Config {
    /// Create a new builder
    pub fn builder() -> ConfigBuilder {
        ConfigBuilder::new()
    }

    /// Path of the persisted request log
    pub fn wal_path(&self) -> PathBuf {
        self.log_dir.join("wal.json")
    }

    /// Read the API key from the environment
    pub fn api_key(&self) -> Result<String> {
        match std::env::var(&self.api_key_env) {
            Ok(key) if !key.trim().is_empty() => Ok(key),
            _ => Err(Error::MissingCredential(self.api_key_env.clone())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builder_overrides_defaults() {
        let config = Config::builder()
            .log_dir("/tmp/gen")
            .max_attempts(5)
            .poll_interval(Duration::from_secs(1))
            .build();

        assert_eq!(config.wal_path(), PathBuf::from("/tmp/gen/wal.json"));
        assert_eq!(config.max_attempts, 5);
        assert_eq!(config.poll_interval, Duration::from_secs(1));
        assert_eq!(config.admission_wait, Duration::from_secs(60));
    }

    #[test]
    fn test_zero_attempts_is_clamped() {
        let config = Config::builder().max_attempts(0).build();
        assert_eq!(config.max_attempts, 1);
    }

    #[test]
    fn test_missing_credential() {
        let config = Config::builder()
            .api_key_env("GENMEDIA_TEST_KEY_THAT_IS_NEVER_SET")
            .build();
        let err = config.api_key().unwrap_err();
        assert!(matches!(
            err,
            Error::MissingCredential(ref var) if var == "GENMEDIA_TEST_KEY_THAT_IS_NEVER_SET"
        ));
        assert!(!err.is_retryable());
    }
}
