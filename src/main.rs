use anyhow::{Context, Result};
use clap::Parser;
use tracing::{info, warn};

use termreplay::cli::Cli;
use termreplay::logging;
use termreplay::player::{self, PlaybackResult};
use termreplay::Config;

fn main() -> Result<()> {
    let cli = Cli::parse();

    let mut config = Config::load(cli.config.as_deref()).context("Failed to load configuration")?;
    cli.apply(&mut config);

    let log_path = config
        .logging
        .file
        .clone()
        .unwrap_or_else(logging::default_log_path);
    if let Err(e) = logging::init(&log_path, &config.logging.level) {
        eprintln!("warning: logging disabled: {e}");
    }

    let options = config.session_options().context("Invalid configuration")?;
    info!(log = %cli.log.display(), ?options, "Starting");

    if cli.dump {
        let screen = player::dump_final_screen(&cli.log, &options.replay)?;
        if let Some(end) = screen.end.as_ref().filter(|end| !end.is_clean()) {
            warn!(?end, "Log did not end on a frame boundary");
        }
        println!("{}", screen.text.trim_end_matches('\n'));
        eprintln!("{}: {}", cli.log.display(), screen.stats);
        return Ok(());
    }

    let result = player::play_session(&cli.log, &options)?;
    let status = match &result {
        PlaybackResult::Finished(_) => "finished",
        PlaybackResult::Interrupted(_) => "interrupted",
    };
    println!("{} {}: {}", cli.log.display(), status, result.stats());
    Ok(())
}
