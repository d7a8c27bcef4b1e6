//! Chess Table - a terminal front end for the 0x88 rules engine.
//!
//! Reads select/target intents or UCI moves line by line from stdin or a
//! script file, feeds them to the rules engine and draws the board with its
//! capture trays after every change.

mod command;
mod config;
mod render;
mod scene;
mod table;

use std::fs::File;
use std::io::{self, BufRead, BufReader, Write};
use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use config::TableConfig;
use table::{Flow, Table};

/// Chess Table - play chess in the terminal.
#[derive(Parser)]
#[command(name = "chess-table")]
#[command(about = "Play chess in the terminal by selecting and targeting squares")]
struct Args {
    /// Start from this FEN position instead of the initial setup
    #[arg(long)]
    fen: Option<String>,

    /// Read commands from this file instead of stdin
    #[arg(long)]
    script: Option<PathBuf>,

    /// Configuration file (defaults to table.toml when present)
    #[arg(long)]
    config: Option<PathBuf>,
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt::init();
    let args = Args::parse();

    let config = TableConfig::load(args.config.as_deref()).context("loading configuration")?;
    tracing::debug!(?config, "configuration loaded");

    let mut table = Table::new(args.fen.as_deref(), config).context("setting up the board")?;

    let input: Box<dyn BufRead> = match &args.script {
        Some(path) => {
            tracing::info!("Reading commands from {}", path.display());
            let file = File::open(path)
                .with_context(|| format!("opening script {}", path.display()))?;
            Box::new(BufReader::new(file))
        }
        None => Box::new(io::stdin().lock()),
    };

    let stdout = io::stdout();
    let mut out = stdout.lock();
    table.execute(command::Command::Board, &mut out)?;

    for line in input.lines() {
        let line = line.context("reading input")?;
        if table.handle_line(&line, &mut out)? == Flow::Quit {
            break;
        }
        out.flush()?;
    }

    tracing::info!(
        moves = table.game().board().move_count(),
        fen = %table.game().board().to_fen(),
        "Session finished"
    );
    Ok(())
}
