//! Per-URL invocation of the engine and output path prediction

use crate::config::DownloadConfig;
use crate::engine::{Engine, EngineResult, MediaEntry};
use crate::error::{DownloadError, Error, Result, UrlError};
use crate::options::EngineOptions;
use std::ffi::OsStr;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

/// Matches the `.200s` precision in the output template.
pub const MAX_TITLE_CHARS: usize = 200;

pub const FALLBACK_TITLE: &str = "audio";
pub const FALLBACK_ID: &str = "unknown";

#[derive(Debug)]
pub struct Downloader<E> {
    engine: E,
}

impl<E: Engine> Downloader<E> {
    pub fn new(engine: E) -> Self {
        Self { engine }
    }

    pub fn engine(&self) -> &E {
        &self.engine
    }

    /// Download every URL in order and return the predicted output paths.
    ///
    /// All URLs are validated before the output directory is created or the
    /// engine is called. The first engine failure aborts the run; URLs after
    /// it are never attempted.
    pub async fn download<S: AsRef<OsStr>>(
        &self,
        urls: &[S],
        cfg: &DownloadConfig,
    ) -> Result<Vec<PathBuf>> {
        let urls = validate_urls(urls)?;

        cfg.ensure_storage_location().map_err(Error::Storage)?;

        info!("Starting download: {} URL(s)", urls.len());

        let options = EngineOptions::from_config(cfg);
        if let Ok(json) = serde_json::to_string(&options) {
            debug!("Engine options: {}", json);
        }

        let mut downloaded = Vec::new();

        for url in urls {
            info!("Downloading audio from: {}", url);

            let info = self
                .engine
                .extract(url, &options)
                .await
                .map_err(DownloadError::from)?;

            let result = EngineResult::from_value(&info);
            if result == EngineResult::Invalid {
                warn!("Skipping {}: engine returned no usable info", url);
                continue;
            }

            for entry in result.into_entries() {
                let path = predict_path(cfg.outdir(), &entry, cfg.audio_format());
                debug!("Predicted output: {}", path.display());
                downloaded.push(path);
            }
        }

        Ok(downloaded)
    }
}

/// Check every URL is text and not blank, returning them trimmed.
pub fn validate_urls<S: AsRef<OsStr>>(urls: &[S]) -> std::result::Result<Vec<&str>, UrlError> {
    urls.iter()
        .enumerate()
        .map(|(i, url)| {
            let position = i + 1;
            let url = url.as_ref();
            let text = url.to_str().ok_or_else(|| UrlError::NotText {
                position,
                lossy: url.to_string_lossy().into_owned(),
            })?;

            match text.trim() {
                "" => Err(UrlError::Blank { position }),
                trimmed => Ok(trimmed),
            }
        })
        .collect()
}

/// Best-effort guess at where the engine leaves the transcoded file.
///
/// `outdir/<title> [<id>].<audio_format>`; the file is not checked for.
/// Fallbacks apply only to missing or empty fields; trimming comes after, so a
/// whitespace-only title stays empty.
pub fn predict_path(outdir: &Path, entry: &MediaEntry, audio_format: &str) -> PathBuf {
    let title = or_fallback(entry.title.as_deref(), FALLBACK_TITLE).trim();
    let id = or_fallback(entry.id.as_deref(), FALLBACK_ID).trim();

    let title: String = title.chars().take(MAX_TITLE_CHARS).collect();
    outdir.join(format!("{} [{}].{}", sanitize_title(&title), id, audio_format))
}

fn or_fallback<'a>(value: Option<&'a str>, fallback: &'a str) -> &'a str {
    value.filter(|s| !s.is_empty()).unwrap_or(fallback)
}

/// Replace path-hostile characters with the full-width lookalikes yt-dlp uses
/// when filenames are not restricted.
pub fn sanitize_title(title: &str) -> String {
    title
        .chars()
        .filter_map(|c| match c {
            '/' => Some('\u{29F8}'),
            '\\' => Some('\u{29F9}'),
            '"' | '*' | ':' | '<' | '>' | '?' | '|' => char::from_u32(c as u32 + 0xFEE0),
            '\n' => Some(' '),
            c if c.is_control() => None,
            c => Some(c),
        })
        .collect()
}
