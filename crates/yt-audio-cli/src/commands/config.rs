use anyhow::Result;
use std::io::Write;
use std::path::Path;
use yt_audio_core::settings::{Settings, ENV_PREFIX};

pub fn run(config_path: Option<&Path>, yt_dlp: Option<&Path>, out: &mut impl Write) -> Result<()> {
    let settings = Settings::load(config_path)?;
    report(&settings, config_path, yt_dlp, out)
}

/// `yt_dlp` is the command-line override, which wins over the settings the
/// same way it does for downloads.
pub fn report(
    settings: &Settings,
    config_path: Option<&Path>,
    yt_dlp: Option<&Path>,
    out: &mut impl Write,
) -> Result<()> {
    writeln!(out, "yt-audio-downloader configuration\n")?;
    write!(out, "{}", toml::to_string_pretty(settings)?)?;

    if let Some(path) = yt_dlp {
        writeln!(out, "\n# yt-dlp set by --yt-dlp: {}", path.display())?;
    } else if settings.engine.yt_dlp.is_none() {
        match settings.yt_dlp_path() {
            Ok(path) => writeln!(out, "\n# yt-dlp auto-detected at {}", path.display())?,
            Err(_) => writeln!(out, "\n# yt-dlp not found in PATH")?,
        }
    }

    writeln!(out, "\nConfig sources (in priority order):")?;
    writeln!(out, "  1. Command-line flags")?;
    writeln!(out, "  2. Environment variables ({}*, nested keys split on __)", ENV_PREFIX)?;
    if let Some(p) = config_path {
        writeln!(out, "  3. {} (specified)", p.display())?;
    }
    if let Some(default_file) = Settings::default_file() {
        writeln!(out, "  4. {}", default_file.display())?;
    }

    Ok(())
}
