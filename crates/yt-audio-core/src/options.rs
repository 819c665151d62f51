//! Translation of a [`DownloadConfig`] into yt-dlp options

use crate::config::DownloadConfig;
use serde::Serialize;
use std::ffi::OsString;
use std::path::PathBuf;

/// Title truncated to 200 chars, then " [id]" and the pre-transcode extension.
/// The final extension is chosen by the audio extraction postprocessor.
pub const OUTPUT_TEMPLATE: &str = "%(title).200s [%(id)s].%(ext)s";

/// Best audio-only stream, else the best stream of any kind
pub const FORMAT_SELECTION: &str = "bestaudio/best";

/// Option bag consumed by the engine.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EngineOptions {
    pub format: String,
    pub output_template: PathBuf,
    pub postprocessors: Vec<Postprocessor>,
    pub no_playlist: bool,
    pub quiet: bool,
    pub no_warnings: bool,
    pub restrict_filenames: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "key")]
pub enum Postprocessor {
    #[serde(rename = "FFmpegExtractAudio")]
    ExtractAudio {
        preferred_codec: String,
        preferred_quality: String,
    },
}

impl EngineOptions {
    pub fn from_config(cfg: &DownloadConfig) -> Self {
        Self {
            format: FORMAT_SELECTION.to_string(),
            output_template: cfg.outdir().join(OUTPUT_TEMPLATE),
            postprocessors: vec![Postprocessor::ExtractAudio {
                preferred_codec: cfg.audio_format().to_string(),
                preferred_quality: strip_quality_unit(cfg.quality()),
            }],
            no_playlist: !cfg.allow_playlist(),
            quiet: !cfg.verbose(),
            no_warnings: !cfg.verbose(),
            restrict_filenames: false,
        }
    }

    /// Render as yt-dlp command-line arguments (URL not included).
    ///
    /// The single-JSON dump is always requested with simulation turned back
    /// off, so yt-dlp downloads and still reports the info structure on stdout.
    pub fn to_args(&self) -> Vec<OsString> {
        let mut args: Vec<OsString> = vec![
            "--format".into(),
            self.format.clone().into(),
            "--output".into(),
            self.output_template.clone().into_os_string(),
        ];

        for pp in &self.postprocessors {
            match pp {
                Postprocessor::ExtractAudio {
                    preferred_codec,
                    preferred_quality,
                } => {
                    args.push("--extract-audio".into());
                    args.push("--audio-format".into());
                    args.push(preferred_codec.into());
                    args.push("--audio-quality".into());
                    args.push(preferred_quality.into());
                }
            }
        }

        let playlist = if self.no_playlist { "--no-playlist" } else { "--yes-playlist" };
        args.push(playlist.into());

        if self.quiet {
            args.push("--quiet".into());
        }
        if self.no_warnings {
            args.push("--no-warnings".into());
        }

        let filenames = if self.restrict_filenames {
            "--restrict-filenames"
        } else {
            "--no-restrict-filenames"
        };
        args.push(filenames.into());

        args.push("--dump-single-json".into());
        args.push("--no-simulate".into());
        args
    }
}

/// "192K" -> "192". Only the literal 'K' is removed; the rest is passed on as-is.
fn strip_quality_unit(quality: &str) -> String {
    quality.replace('K', "")
}
