//! yt-audio-core: option mapping, engine invocation and output path
//! prediction for downloading audio with yt-dlp

pub mod config;
pub mod downloader;
pub mod engine;
pub mod error;
pub mod options;
pub mod settings;

pub use config::DownloadConfig;
pub use downloader::Downloader;
pub use engine::{Engine, EngineResult, MediaEntry, YtDlp};
pub use error::{DownloadError, Error, Result};
pub use options::EngineOptions;
pub use settings::Settings;
