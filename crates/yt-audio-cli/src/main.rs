mod args;
mod commands;

use anyhow::Result;
use clap::Parser;
use std::io;
use std::process::ExitCode;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use args::Cli;

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<ExitCode> {
    let cli = Cli::parse();

    // Logs share stderr with errors; stdout carries only output paths
    let filter = if cli.verbose {
        "yt_audio_downloader=debug,yt_audio_core=debug"
    } else {
        "yt_audio_downloader=info,yt_audio_core=info"
    };

    tracing_subscriber::registry()
        .with(
            fmt::layer()
                .with_target(false)
                .without_time()
                .with_writer(io::stderr),
        )
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter)))
        .init();

    if cli.show_config {
        commands::config::run(
            cli.config.as_deref(),
            cli.yt_dlp.as_deref(),
            &mut io::stdout().lock(),
        )?;
        return Ok(ExitCode::SUCCESS);
    }

    let code = commands::download::run(&cli, &mut io::stdout().lock(), &mut io::stderr()).await?;
    Ok(ExitCode::from(code))
}
