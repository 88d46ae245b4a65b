#![allow(missing_docs)]
//! Interactive terminal chat with the ELIZA simple responder.
//!
//! ```bash
//! cargo run --features cli --bin eliza-simple-chat -- --reflection word
//! ```

use std::io::{self, BufRead, Write};
use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use elizaos_plugin_eliza_simple::chat::{render_turn, Transcript, ELIZA_LABEL};
use elizaos_plugin_eliza_simple::{ElizaSimpleConfig, ElizaSimplePlugin, ReflectionMode};
use tracing::info;

#[derive(Parser, Debug)]
#[command(name = "eliza-simple-chat", version, about = "Chat with a keyword-table ELIZA")]
struct Cli {
    /// Custom script JSON file (defaults to ELIZA_SCRIPT_PATH or the bundled script)
    #[arg(long)]
    script: Option<PathBuf>,

    /// Pronoun reflection mode: phrase or word (defaults to ELIZA_REFLECTION_MODE or phrase)
    #[arg(long)]
    reflection: Option<ReflectionMode>,

    /// Print the whole transcript when the session ends
    #[arg(long)]
    transcript: bool,
}

fn is_exit(line: &str) -> bool {
    matches!(line.trim().to_lowercase().as_str(), "quit" | "exit")
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .with_writer(io::stderr)
        .init();

    let cli = Cli::parse();

    let mut config = ElizaSimpleConfig::from_env();
    if let Some(path) = cli.script {
        config = config.with_script_path(path);
    }
    if let Some(mode) = cli.reflection {
        config = config.with_reflection_mode(mode);
    }

    let plugin = ElizaSimplePlugin::with_config(config).context("loading responder script")?;
    let mut transcript = Transcript::new();

    let stdin = io::stdin();
    let mut stdout = io::stdout();
    writeln!(stdout, "{}: {}", ELIZA_LABEL, plugin.get_greeting())?;

    loop {
        write!(stdout, "> ")?;
        stdout.flush()?;

        let mut line = String::new();
        if stdin.lock().read_line(&mut line)? == 0 || is_exit(&line) {
            break;
        }

        if let Some(turn) = transcript.submit(&plugin, &line) {
            let [_, reply] = render_turn(turn);
            writeln!(stdout, "{}", reply)?;
        }
    }

    info!(turns = transcript.len(), "Chat session ended");
    if cli.transcript {
        writeln!(stdout)?;
        for line in transcript.lines() {
            writeln!(stdout, "{}", line)?;
        }
    }
    Ok(())
}
