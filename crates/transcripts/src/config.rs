use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;
use subtitles::YtDlpSource;

use crate::error::{Result, TranscriptError};

pub const YT_DLP_PATH_ENV: &str = "YT_DLP_PATH";
pub const TIMEOUT_ENV: &str = "YT_TRANSCRIPT_TIMEOUT_SECS";
pub const DEFAULT_LANGUAGE_ENV: &str = "YT_TRANSCRIPT_DEFAULT_LANGUAGE";

/// Settings for subtitle acquisition, read from a file and/or the environment
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq)]
#[serde(default)]
pub struct TranscriptConfig {
    /// yt-dlp executable, resolved through PATH when not absolute
    pub yt_dlp_path: PathBuf,
    /// Upper bound on one whole subtitle fetch
    pub timeout_secs: u64,
    /// Language tried first when a request names none
    pub default_language: String,
    /// Where per-call download dirs are created; the system temp dir when unset
    pub temp_dir: Option<PathBuf>,
}

impl Default for TranscriptConfig {
    fn default() -> Self {
        Self {
            yt_dlp_path: PathBuf::from("yt-dlp"),
            timeout_secs: subtitles::ytdlp::DEFAULT_TIMEOUT.as_secs(),
            default_language: subtitles::ytdlp::DEFAULT_LANGUAGE.to_string(),
            temp_dir: None,
        }
    }
}

impl TranscriptConfig {
    /// Load from a TOML string
    pub fn from_toml(content: &str) -> Result<Self> {
        let config: TranscriptConfig = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Load from a JSON string
    pub fn from_json(content: &str) -> Result<Self> {
        let config: TranscriptConfig = serde_json::from_str(content)
            .map_err(|e| TranscriptError::Config(format!("invalid JSON config: {}", e)))?;
        config.validate()?;
        Ok(config)
    }

    /// Auto-detect file format and load configuration
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        match path.extension().and_then(|ext| ext.to_str()) {
            Some("toml") => Self::from_toml(&fs::read_to_string(path)?),
            Some("json") => Self::from_json(&fs::read_to_string(path)?),
            _ => Err(TranscriptError::Config(format!(
                "unsupported config format for {}; use .toml or .json",
                path.display()
            ))),
        }
    }

    /// File settings (or defaults) with environment variables layered on top
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let config = match path {
            Some(path) => Self::from_file(path)?,
            None => Self::default(),
        };
        config.with_env_overrides()
    }

    pub fn with_env_overrides(self) -> Result<Self> {
        self.apply_overrides(|name| std::env::var(name).ok())
    }

    pub fn apply_overrides(mut self, lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        if let Some(path) = lookup(YT_DLP_PATH_ENV) {
            self.yt_dlp_path = PathBuf::from(path);
        }
        if let Some(timeout) = lookup(TIMEOUT_ENV) {
            self.timeout_secs = timeout.trim().parse().map_err(|_| {
                TranscriptError::Config(format!("{} must be a whole number of seconds, got {:?}", TIMEOUT_ENV, timeout))
            })?;
        }
        if let Some(language) = lookup(DEFAULT_LANGUAGE_ENV) {
            self.default_language = language.trim().to_string();
        }
        self.validate()?;
        Ok(self)
    }

    pub fn validate(&self) -> Result<()> {
        if self.timeout_secs == 0 {
            return Err(TranscriptError::Config("timeout_secs must be greater than 0".into()));
        }
        if self.default_language.trim().is_empty() {
            return Err(TranscriptError::Config("default_language must not be empty".into()));
        }
        if self.yt_dlp_path.as_os_str().is_empty() {
            return Err(TranscriptError::Config("yt_dlp_path must not be empty".into()));
        }
        Ok(())
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    pub fn source(&self) -> YtDlpSource {
        let source = YtDlpSource::new(&self.yt_dlp_path)
            .with_timeout(self.timeout())
            .with_default_language(&self.default_language);
        match &self.temp_dir {
            Some(dir) => source.with_temp_root(dir),
            None => source,
        }
    }
}
