//! nestkv command-line shell.
//!
//! Reads commands from stdin, one per line, until `END` or end of input.
//!
//! ```text
//! SET a 10
//! BEGIN
//! SET a 20
//! GET a
//! ROLLBACK
//! GET a
//! END
//! ```

use std::io;
use std::sync::Arc;

use anyhow::Context;
use clap::Parser;
use nestkv::{KvStore, Shell, ShellOptions};

/// In-memory key-value store with nested transactions.
#[derive(Parser)]
#[command(name = "nestkv")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Do not print the marker line after each command
    #[arg(long)]
    no_marker: bool,

    /// Prompt to show before each command
    #[arg(short, long)]
    prompt: Option<String>,
}

fn main() -> anyhow::Result<()> {
    env_logger::init();

    let cli = Cli::parse();

    let mut options = ShellOptions::new().print_marker(!cli.no_marker);
    if let Some(prompt) = cli.prompt {
        options = options.prompt(prompt);
    }

    let store = Arc::new(KvStore::new());
    let shell = Shell::new(Arc::clone(&store), options).context("invalid shell options")?;

    log::info!("session started");

    let stdin = io::stdin();
    let mut stdout = io::stdout().lock();
    let dispatched = shell.run(stdin.lock(), &mut stdout).context("session aborted")?;

    if store.in_transaction() {
        log::warn!("session ended with {} open transactions discarded", store.depth());
    }
    log::info!("session ended: {} commands", dispatched);
    Ok(())
}
