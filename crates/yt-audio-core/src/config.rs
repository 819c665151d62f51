//! Per-invocation download configuration

use std::path::{Path, PathBuf};

pub const DEFAULT_AUDIO_FORMAT: &str = "mp3";
pub const DEFAULT_QUALITY: &str = "192K";

/// What to download into and how to transcode it.
///
/// Built once per CLI invocation and never mutated afterwards. The output
/// directory is not touched until [`DownloadConfig::ensure_storage_location`]
/// is called.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DownloadConfig {
    outdir: PathBuf,
    audio_format: String,
    quality: String,
    allow_playlist: bool,
    verbose: bool,
}

impl DownloadConfig {
    pub fn new(outdir: impl Into<PathBuf>) -> Self {
        Self {
            outdir: outdir.into(),
            audio_format: DEFAULT_AUDIO_FORMAT.to_string(),
            quality: DEFAULT_QUALITY.to_string(),
            allow_playlist: false,
            verbose: false,
        }
    }

    /// Target codec handed to the engine's audio extraction step (not validated)
    pub fn with_audio_format(mut self, audio_format: impl Into<String>) -> Self {
        self.audio_format = audio_format.into();
        self
    }

    /// Quality hint such as "192K" (not validated)
    pub fn with_quality(mut self, quality: impl Into<String>) -> Self {
        self.quality = quality.into();
        self
    }

    pub fn with_playlist(mut self, allow_playlist: bool) -> Self {
        self.allow_playlist = allow_playlist;
        self
    }

    pub fn with_verbose(mut self, verbose: bool) -> Self {
        self.verbose = verbose;
        self
    }

    pub fn outdir(&self) -> &Path {
        &self.outdir
    }

    pub fn audio_format(&self) -> &str {
        &self.audio_format
    }

    pub fn quality(&self) -> &str {
        &self.quality
    }

    pub fn allow_playlist(&self) -> bool {
        self.allow_playlist
    }

    pub fn verbose(&self) -> bool {
        self.verbose
    }

    /// Create the output directory and any missing parents. Existing
    /// directories are left alone.
    pub fn ensure_storage_location(&self) -> std::io::Result<()> {
        std::fs::create_dir_all(&self.outdir)
    }
}
