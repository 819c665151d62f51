use anyhow::Result;
use std::ffi::OsString;
use std::io::Write;

use crate::args::Cli;
use yt_audio_core::{DownloadConfig, Downloader, Engine, Error, Settings, YtDlp};

pub const EXIT_OK: u8 = 0;
pub const EXIT_DOWNLOAD_FAILED: u8 = 2;

pub async fn run(cli: &Cli, out: &mut impl Write, err: &mut impl Write) -> Result<u8> {
    let settings = Settings::load(cli.config.as_deref())?;
    let cfg = build_config(cli, &settings);

    let yt_dlp_path = match cli.yt_dlp.clone() {
        Some(path) => path,
        None => settings.yt_dlp_path()?,
    };

    let downloader = Downloader::new(YtDlp::new(yt_dlp_path));
    download_and_report(&downloader, &cli.urls, &cfg, out, err).await
}

/// Command-line flags win over configured defaults.
pub fn build_config(cli: &Cli, settings: &Settings) -> DownloadConfig {
    let mut cfg = settings.download_config();

    if let Some(ref outdir) = cli.outdir {
        cfg = DownloadConfig::new(outdir)
            .with_audio_format(cfg.audio_format())
            .with_quality(cfg.quality());
    }
    if let Some(ref format) = cli.format {
        cfg = cfg.with_audio_format(format);
    }
    if let Some(ref quality) = cli.quality {
        cfg = cfg.with_quality(quality);
    }

    cfg.with_playlist(cli.playlist).with_verbose(cli.verbose)
}

/// Print predicted paths on success, or `ERROR: <message>` for an engine
/// failure. Anything else is returned to the caller.
pub async fn download_and_report<E: Engine>(
    downloader: &Downloader<E>,
    urls: &[OsString],
    cfg: &DownloadConfig,
    out: &mut impl Write,
    err: &mut impl Write,
) -> Result<u8> {
    match downloader.download(urls, cfg).await {
        Ok(paths) => {
            for path in paths {
                writeln!(out, "{}", path.display())?;
            }
            out.flush()?;
            Ok(EXIT_OK)
        }
        Err(Error::Download(e)) => {
            writeln!(err, "ERROR: {}", e)?;
            Ok(EXIT_DOWNLOAD_FAILED)
        }
        Err(e) => Err(e.into()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use clap::Parser;
    use serde_json::{json, Value};
    use std::path::{Path, PathBuf};
    use yt_audio_core::error::EngineError;
    use yt_audio_core::EngineOptions;

    enum StubEngine {
        Returns(Value),
        Fails(&'static str),
    }

    #[async_trait]
    impl Engine for StubEngine {
        async fn extract(&self, _url: &str, _options: &EngineOptions) -> Result<Value, EngineError> {
            match self {
                StubEngine::Returns(v) => Ok(v.clone()),
                StubEngine::Fails(msg) => Err(EngineError::Failed {
                    code: Some(1),
                    message: msg.to_string(),
                }),
            }
        }
    }

    fn urls(list: &[&str]) -> Vec<OsString> {
        list.iter().map(OsString::from).collect()
    }

    #[tokio::test]
    async fn test_success_prints_one_path_per_line() {
        let tmp = tempfile::tempdir().unwrap();
        let cfg = DownloadConfig::new(tmp.path().join("out"));
        let downloader = Downloader::new(StubEngine::Returns(json!({
            "entries": [{"id": "a", "title": "One"}, null, {"id": "b", "title": "Two"}]
        })));
        let (mut out, mut err) = (Vec::new(), Vec::new());

        let code = download_and_report(&downloader, &urls(&["u"]), &cfg, &mut out, &mut err)
            .await
            .unwrap();

        assert_eq!(code, EXIT_OK);
        let expected = format!(
            "{}\n{}\n",
            cfg.outdir().join("One [a].mp3").display(),
            cfg.outdir().join("Two [b].mp3").display()
        );
        assert_eq!(String::from_utf8(out).unwrap(), expected);
        assert!(err.is_empty());
    }

    #[tokio::test]
    async fn test_engine_failure_prints_error_and_exits_non_zero() {
        let tmp = tempfile::tempdir().unwrap();
        let cfg = DownloadConfig::new(tmp.path().join("out"));
        let downloader = Downloader::new(StubEngine::Fails("HTTP Error 404: Not Found"));
        let (mut out, mut err) = (Vec::new(), Vec::new());

        let code = download_and_report(&downloader, &urls(&["u"]), &cfg, &mut out, &mut err)
            .await
            .unwrap();

        assert_eq!(code, EXIT_DOWNLOAD_FAILED);
        assert_ne!(code, EXIT_OK);
        assert_eq!(String::from_utf8(err).unwrap(), "ERROR: HTTP Error 404: Not Found\n");
        assert!(out.is_empty());
    }

    #[tokio::test]
    async fn test_invalid_url_is_not_reported_as_download_error() {
        let tmp = tempfile::tempdir().unwrap();
        let cfg = DownloadConfig::new(tmp.path().join("out"));
        let downloader = Downloader::new(StubEngine::Returns(json!({"id": "x"})));
        let (mut out, mut err) = (Vec::new(), Vec::new());

        let result =
            download_and_report(&downloader, &urls(&["u", " "]), &cfg, &mut out, &mut err).await;

        assert!(result.is_err());
        assert!(err.is_empty());
    }

    #[tokio::test]
    async fn test_settings_failure_is_a_runtime_error() {
        let cli = Cli::try_parse_from([
            "yt-audio-downloader",
            "--config",
            "/definitely/not/here.toml",
            "https://youtu.be/a",
        ])
        .unwrap();
        let (mut out, mut err) = (Vec::new(), Vec::new());

        let result = run(&cli, &mut out, &mut err).await;

        let e = result.unwrap_err();
        assert!(e.downcast_ref::<yt_audio_core::error::ConfigError>().is_some());
        assert!(err.is_empty());
        assert!(out.is_empty());
    }

    #[test]
    fn test_build_config_defaults() {
        let cli = Cli::try_parse_from(["yt-audio-downloader", "https://youtu.be/a"]).unwrap();
        let cfg = build_config(&cli, &Settings::default());

        assert_eq!(cfg, DownloadConfig::new("downloads"));
    }

    #[test]
    fn test_build_config_flags_override_settings() {
        let mut settings = Settings::default();
        settings.defaults.outdir = PathBuf::from("/srv/audio");
        settings.defaults.audio_format = "flac".to_string();
        settings.defaults.quality = "0".to_string();

        let cli = Cli::try_parse_from([
            "yt-audio-downloader",
            "--quality",
            "256K",
            "--playlist",
            "https://youtu.be/a",
        ])
        .unwrap();
        let cfg = build_config(&cli, &settings);
        assert_eq!(cfg.outdir(), Path::new("/srv/audio"));
        assert_eq!(cfg.audio_format(), "flac");
        assert_eq!(cfg.quality(), "256K");
        assert!(cfg.allow_playlist());

        let cli = Cli::try_parse_from(["yt-audio-downloader", "-o", "here", "https://youtu.be/a"])
            .unwrap();
        let cfg = build_config(&cli, &settings);
        assert_eq!(cfg.outdir(), Path::new("here"));
        assert_eq!(cfg.audio_format(), "flac");
        assert_eq!(cfg.quality(), "0");
    }
}
