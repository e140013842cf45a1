//! # Durable Request Log
//!
//! Every outbound attempt is recorded here before the network call is made,
//! so failed attempts still count against the quotas. The log is kept in
//! memory and mirrored to `wal.json` by rewriting the whole file on every
//! append.
//!
//! Entries are never removed. There is no rotation: the file grows for as
//! long as the working directory is reused.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tokio::fs;
use tracing::{debug, warn};

use crate::catalog::ModelQuota;
use crate::config::Config;
use crate::error::{Error, Result};

/// Surcharge added to the size proxy when a reference image is attached
pub const IMAGE_INPUT_SURCHARGE: u64 = 1000;

/// One outbound request attempt
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RequestHistoryEntry {
    /// Trace identifier, never looked up
    pub key: String,

    /// Milliseconds since the Unix epoch
    pub time: i64,

    /// Backend model identifier
    pub ai_model: String,

    /// Request size proxy (prompt characters plus surcharges)
    pub prompt_length: u64,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub prompt_token_count: Option<u64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub candidates_token_count: Option<u64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub total_token_count: Option<u64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cached_content_token_count: Option<u64>,
}

impl RequestHistoryEntry {
    /// Create an entry stamped at `time_ms`
    pub fn new(model: impl Into<String>, prompt_length: u64, time_ms: i64) -> Self {
        Self {
            key: format!("{}_{}.json", uuid::Uuid::new_v4(), time_ms),
            time: time_ms,
            ai_model: model.into(),
            prompt_length,
            prompt_token_count: None,
            candidates_token_count: None,
            total_token_count: None,
            cached_content_token_count: None,
        }
    }

    /// Tokens charged to this entry: the reported total when known, else the size proxy
    pub fn token_cost(&self) -> u64 {
        self.total_token_count.unwrap_or(self.prompt_length)
    }

    fn has_usage(&self) -> bool {
        self.prompt_token_count.is_some()
            || self.candidates_token_count.is_some()
            || self.total_token_count.is_some()
            || self.cached_content_token_count.is_some()
    }
}

/// Token counts reported by the provider for one call
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TokenUsage {
    pub prompt: Option<u64>,
    pub candidates: Option<u64>,
    pub total: Option<u64>,
    pub cached: Option<u64>,
}

/// In-memory request log mirrored to disk
#[derive(Debug)]
pub struct RequestLog {
    path: PathBuf,
    entries: Vec<RequestHistoryEntry>,
}

impl RequestLog {
    /// Load the log at `path`.
    ///
    /// A missing or malformed file is treated as a first run: the file is
    /// reset to an empty array and an empty log is returned.
    pub async fn load(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();
        ensure_parent(&path).await?;

        let entries = match fs::read(&path).await {
            Ok(bytes) => match serde_json::from_slice::<Vec<RequestHistoryEntry>>(&bytes) {
                Ok(entries) => Some(entries),
                Err(e) => {
                    warn!("Request log {} is corrupted: {}", path.display(), e);
                    None
                }
            },
            Err(e) => {
                debug!("Request log {} not readable: {}", path.display(), e);
                None
            }
        };

        let log = match entries {
            Some(entries) => Self { path, entries },
            None => {
                warn!("Initializing log file");
                let log = Self {
                    path,
                    entries: Vec::new(),
                };
                log.persist().await?;
                log
            }
        };

        debug!("Loaded {} request log entries", log.entries.len());
        Ok(log)
    }

    /// Append `entry` and rewrite the persisted log before returning
    pub async fn append(&mut self, entry: RequestHistoryEntry) -> Result<()> {
        self.entries.push(entry);
        self.persist().await
    }

    /// Fill in the provider-reported token counts of the entry `key`.
    ///
    /// Counts are written at most once per entry.
    pub async fn record_usage(&mut self, key: &str, usage: TokenUsage) -> Result<()> {
        let entry = self
            .entries
            .iter_mut()
            .rev()
            .find(|e| e.key == key)
            .ok_or_else(|| Error::Other(format!("No request log entry with key {key}")))?;

        if entry.has_usage() {
            warn!("Token usage for {} already recorded", key);
            return Ok(());
        }

        entry.prompt_token_count = usage.prompt;
        entry.candidates_token_count = usage.candidates;
        entry.total_token_count = usage.total;
        entry.cached_content_token_count = usage.cached;
        self.persist().await
    }

    /// All entries in insertion order
    pub fn entries(&self) -> &[RequestHistoryEntry] {
        &self.entries
    }

    /// Path of the persisted log
    pub fn path(&self) -> &Path {
        &self.path
    }

    async fn persist(&self) -> Result<()> {
        ensure_parent(&self.path).await?;
        let json = serde_json::to_vec(&self.entries)?;
        fs::write(&self.path, json).await?;
        Ok(())
    }
}

async fn ensure_parent(path: &Path) -> Result<()> {
    if let Some(dir) = path.parent() {
        if !dir.as_os_str().is_empty() {
            fs::create_dir_all(dir).await?;
        }
    }
    Ok(())
}

/// Per-invocation generation state: the request log and the selected model
#[derive(Debug)]
pub struct Context {
    pub log: RequestLog,
    model: Option<ModelQuota>,
}

impl Context {
    /// Hydrate the context from the log directory in `config`
    pub async fn load(config: &Config) -> Result<Self> {
        Ok(Self::new(RequestLog::load(config.wal_path()).await?))
    }

    pub fn new(log: RequestLog) -> Self {
        Self { log, model: None }
    }

    /// Select the model subsequent attempts are charged to
    pub fn select_model(&mut self, quota: ModelQuota) {
        self.model = Some(quota);
    }

    /// The selected model
    pub fn model(&self) -> Result<&ModelQuota> {
        self.model
            .as_ref()
            .ok_or_else(|| Error::Other("AI model is not set in context".to_string()))
    }
}
