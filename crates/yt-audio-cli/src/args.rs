use clap::Parser;
use std::ffi::OsString;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "yt-audio-downloader")]
#[command(author, version, about = "Download audio from one or more URLs (via yt-dlp)")]
pub struct Cli {
    /// One or more media URLs
    #[arg(value_name = "URL", required_unless_present = "show_config")]
    pub urls: Vec<OsString>,

    /// Output directory, created if missing [default: downloads]
    #[arg(short, long, value_name = "DIR")]
    pub outdir: Option<PathBuf>,

    /// Audio format, e.g. mp3, m4a, opus [default: mp3]
    #[arg(short, long)]
    pub format: Option<String>,

    /// Audio quality hint, e.g. 192K [default: 192K]
    #[arg(short, long)]
    pub quality: Option<String>,

    /// Allow playlist downloads (otherwise only the first item is fetched)
    #[arg(long)]
    pub playlist: bool,

    /// Verbose logging, and let yt-dlp print its warnings
    #[arg(short, long)]
    pub verbose: bool,

    /// Extra config file, merged over the user config
    #[arg(long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Path to the yt-dlp executable (auto-detected if not set)
    #[arg(long = "yt-dlp", value_name = "PATH")]
    pub yt_dlp: Option<PathBuf>,

    /// Print the effective configuration and exit
    #[arg(long)]
    pub show_config: bool,
}
