//! The external extraction engine and the shapes it reports back

use crate::error::EngineError;
use crate::options::EngineOptions;
use async_trait::async_trait;
use serde_json::Value;
use std::path::PathBuf;
use std::process::Stdio;
use tokio::process::Command;
use tracing::{debug, warn};

/// Fetches, downloads and transcodes one URL, returning the engine's raw info.
#[async_trait]
pub trait Engine {
    async fn extract(&self, url: &str, options: &EngineOptions) -> Result<Value, EngineError>;
}

/// The two fields read from whatever the engine reports per item.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MediaEntry {
    pub title: Option<String>,
    pub id: Option<String>,
}

impl MediaEntry {
    /// `None` unless `value` is an object.
    pub fn from_value(value: &Value) -> Option<Self> {
        let obj = value.as_object()?;
        let field = |key: &str| obj.get(key).and_then(Value::as_str).map(str::to_string);
        Some(Self {
            title: field("title"),
            id: field("id"),
        })
    }
}

/// Normalized shape of one engine call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EngineResult {
    Single(MediaEntry),
    Playlist(Vec<Option<MediaEntry>>),
    Invalid,
}

impl EngineResult {
    pub fn from_value(value: &Value) -> Self {
        let Some(obj) = value.as_object() else {
            return EngineResult::Invalid;
        };

        match obj.get("entries") {
            Some(Value::Array(entries)) => {
                EngineResult::Playlist(entries.iter().map(MediaEntry::from_value).collect())
            }
            _ => EngineResult::Single(MediaEntry::from_value(value).unwrap_or_default()),
        }
    }

    /// Entries with null sub-results dropped; empty for `Invalid`.
    pub fn into_entries(self) -> Vec<MediaEntry> {
        match self {
            EngineResult::Single(entry) => vec![entry],
            EngineResult::Playlist(entries) => entries.into_iter().flatten().collect(),
            EngineResult::Invalid => Vec::new(),
        }
    }
}

/// yt-dlp run as a child process, one process per URL.
#[derive(Debug)]
pub struct YtDlp {
    yt_dlp_path: PathBuf,
}

impl YtDlp {
    pub fn new(yt_dlp_path: PathBuf) -> Self {
        Self { yt_dlp_path }
    }
}

#[async_trait]
impl Engine for YtDlp {
    async fn extract(&self, url: &str, options: &EngineOptions) -> Result<Value, EngineError> {
        let args = options.to_args();
        debug!("{} {:?} -- {}", self.yt_dlp_path.display(), args, url);

        let output = Command::new(&self.yt_dlp_path)
            .args(&args)
            .arg("--")
            .arg(url)
            .stdin(Stdio::null())
            .output()
            .await
            .map_err(|e| match e.kind() {
                std::io::ErrorKind::NotFound => EngineError::NotFound,
                _ => EngineError::Io(e),
            })?;

        let stderr = String::from_utf8_lossy(&output.stderr);
        if !stderr.trim().is_empty() {
            debug!("yt-dlp stderr: {}", stderr.trim_end());
        }

        if !output.status.success() {
            return Err(EngineError::Failed {
                code: output.status.code(),
                message: failure_message(&stderr, output.status.code()),
            });
        }

        // A successful run with unreadable output is reported as a non-object
        // and skipped by the caller.
        match serde_json::from_slice(&output.stdout) {
            Ok(value) => Ok(value),
            Err(e) => {
                warn!("Could not parse yt-dlp output for {}: {}", url, e);
                Ok(Value::Null)
            }
        }
    }
}

/// Last "ERROR:" line from yt-dlp (prefix removed), else its last stderr line.
fn failure_message(stderr: &str, code: Option<i32>) -> String {
    let lines: Vec<&str> = stderr.lines().map(str::trim).filter(|l| !l.is_empty()).collect();

    if let Some(err) = lines.iter().rev().find_map(|l| l.strip_prefix("ERROR:")) {
        return err.trim().to_string();
    }

    match lines.last() {
        Some(last) => last.to_string(),
        None => format!("yt-dlp failed with exit code: {:?}", code),
    }
}
