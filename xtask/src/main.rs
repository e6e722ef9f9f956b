//! Development tasks: `cargo run -p xtask -- <task>`

use std::fs;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{CommandFactory, Parser, Subcommand};
use termreplay::cli::Cli;

#[derive(Parser)]
#[command(name = "xtask")]
struct Args {
    #[command(subcommand)]
    task: Task,
}

#[derive(Subcommand)]
enum Task {
    /// Generate the termreplay(1) man page
    Man {
        /// Output directory
        #[arg(long, default_value = "target/man")]
        out: PathBuf,
    },
}

fn main() -> Result<()> {
    match Args::parse().task {
        Task::Man { out } => generate_man(out),
    }
}

fn generate_man(out: PathBuf) -> Result<()> {
    fs::create_dir_all(&out).with_context(|| format!("Failed to create {}", out.display()))?;

    let mut page = Vec::new();
    clap_mangen::Man::new(Cli::command())
        .render(&mut page)
        .context("Failed to render man page")?;

    let path = out.join("termreplay.1");
    fs::write(&path, page).with_context(|| format!("Failed to write {}", path.display()))?;
    println!("Wrote {}", path.display());
    Ok(())
}
