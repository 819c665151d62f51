//! Layered user settings for yt-audio-downloader

use crate::config::{DownloadConfig, DEFAULT_AUDIO_FORMAT, DEFAULT_QUALITY};
use crate::error::ConfigError;
use figment::{
    providers::{Env, Format, Serialized, Toml},
    Figment,
};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

pub const APP_DIR: &str = "yt-audio-downloader";
pub const ENV_PREFIX: &str = "YTAD_";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    pub engine: EngineSettings,
    pub defaults: DefaultsSettings,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EngineSettings {
    /// Path to yt-dlp binary (auto-detected if not set)
    pub yt_dlp: Option<PathBuf>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DefaultsSettings {
    /// Output directory used when --outdir is not given
    pub outdir: PathBuf,
    /// Audio format used when --format is not given
    pub audio_format: String,
    /// Quality hint used when --quality is not given
    pub quality: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            engine: EngineSettings { yt_dlp: None },
            defaults: DefaultsSettings {
                outdir: PathBuf::from("downloads"),
                audio_format: DEFAULT_AUDIO_FORMAT.to_string(),
                quality: DEFAULT_QUALITY.to_string(),
            },
        }
    }
}

impl Settings {
    /// Load settings from the user config file, an optional extra file and
    /// the environment, in increasing priority.
    pub fn load(config_file: Option<&Path>) -> Result<Self, ConfigError> {
        let mut figment = Figment::new().merge(Serialized::defaults(Settings::default()));

        if let Some(default_config) = Self::default_file() {
            if default_config.exists() {
                figment = figment.merge(Toml::file(&default_config));
            }
        }

        if let Some(path) = config_file {
            if !path.exists() {
                return Err(ConfigError::LoadError(format!(
                    "config file not found: {}",
                    path.display()
                )));
            }
            figment = figment.merge(Toml::file(path));
        }

        // YTAD_DEFAULTS__AUDIO_FORMAT=opus
        figment = figment.merge(Env::prefixed(ENV_PREFIX).split("__"));

        figment.extract().map_err(|e| ConfigError::LoadError(e.to_string()))
    }

    /// `<config dir>/yt-audio-downloader/config.toml`, if the platform has one
    pub fn default_file() -> Option<PathBuf> {
        dirs::config_dir().map(|d| d.join(APP_DIR).join("config.toml"))
    }

    /// Get yt-dlp path, auto-detecting if not configured
    pub fn yt_dlp_path(&self) -> Result<PathBuf, ConfigError> {
        if let Some(ref path) = self.engine.yt_dlp {
            Ok(path.clone())
        } else {
            which::which("yt-dlp")
                .map_err(|_| ConfigError::InvalidValue("yt-dlp not found in PATH".to_string()))
        }
    }

    /// Start a [`DownloadConfig`] from the configured defaults
    pub fn download_config(&self) -> DownloadConfig {
        DownloadConfig::new(&self.defaults.outdir)
            .with_audio_format(&self.defaults.audio_format)
            .with_quality(&self.defaults.quality)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_match_cli_defaults() {
        let cfg = Settings::default().download_config();
        assert_eq!(cfg, DownloadConfig::new("downloads"));
    }

    #[test]
    fn test_load_merges_extra_file() {
        let tmp = tempfile::tempdir().unwrap();
        let file = tmp.path().join("ytad.toml");
        std::fs::write(
            &file,
            "[engine]\nyt_dlp = \"/opt/bin/yt-dlp\"\n\n[defaults]\naudio_format = \"opus\"\n",
        )
        .unwrap();

        let settings = Settings::load(Some(&file)).unwrap();
        assert_eq!(settings.engine.yt_dlp, Some(PathBuf::from("/opt/bin/yt-dlp")));
        assert_eq!(settings.defaults.audio_format, "opus");
        // untouched keys keep their defaults
        assert_eq!(settings.defaults.quality, "192K");
        assert_eq!(settings.yt_dlp_path().unwrap(), PathBuf::from("/opt/bin/yt-dlp"));
    }

    #[test]
    fn test_load_missing_extra_file() {
        let err = Settings::load(Some(Path::new("/definitely/not/here.toml"))).unwrap_err();
        assert!(matches!(err, ConfigError::LoadError(_)));
    }
}
