//! Tally Games - console tic-tac-toe
//!
//! Plays matches against the computer until the player declines a rematch.

#![warn(missing_docs)]

mod cli;
mod console;
mod messages;
mod render;

use anyhow::{Context, Result};
use clap::Parser;
use cli::Cli;
use console::{Console, MatchQuestions, Terminal};
use messages::{Messages, fill};
use render::Table;
use std::io::{self, BufRead, Write};
use std::path::Path;
use tally_tictactoe::{MatchConfig, MatchController};
use tracing::{info, instrument};
use tracing_subscriber::EnvFilter;

fn main() -> Result<()> {
    // Load .env file
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    init_logging(&cli.log_file)?;
    info!(?cli, "Starting Tally Games");

    let messages = Messages::load(cli.messages.as_deref())?;
    let mut term = Terminal::new(io::stdin().lock(), io::stdout(), !cli.no_clear);

    let config = configure(&cli, &mut term, &messages)?;
    let table = Table {
        human_name: config.human_name().clone(),
        opponent_name: config.opponent_name().to_string(),
        symbols: config.symbols()?,
        threshold: *config.win_threshold(),
    };
    let mut controller = MatchController::new(config)?;

    let mut console = Console::new(term, messages, table)
        .with_questions(match_questions(&cli));
    let mut input = console.clone();
    let mut replay = console.clone();
    let mut setup = console.clone();
    let champions = controller.run(&mut input, &mut console, &mut replay, &mut setup)?;

    info!(
        matches = champions.len(),
        seed = controller.seed(),
        "Session finished"
    );
    console.goodbye()
}

/// Logs to a file so the board on stdout stays readable.
fn init_logging(path: &Path) -> Result<()> {
    let log_file = std::fs::File::create(path)
        .with_context(|| format!("Failed to create log file {}", path.display()))?;
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::sync::Arc::new(log_file))
        .with_ansi(false)
        .try_init();
    Ok(())
}

/// Per-match questions: whatever neither a flag nor `--config` fixed.
fn match_questions(cli: &Cli) -> MatchQuestions {
    let interactive = cli.config.is_none();
    MatchQuestions {
        difficulty: interactive && cli.difficulty.is_none(),
        first_mover: interactive && cli.first.is_none(),
    }
}

/// Builds the session configuration.
///
/// Precedence: command-line flags, then the `--config` file, then
/// defaults. Without a config file, a name and marker not given as flags
/// are asked for on the terminal. Difficulty and opener are asked before
/// every match instead (see [`match_questions`]).
#[instrument(skip_all)]
fn configure<R: BufRead, W: Write>(
    cli: &Cli,
    term: &mut Terminal<R, W>,
    messages: &Messages,
) -> Result<MatchConfig> {
    let mut config = match &cli.config {
        Some(path) => MatchConfig::from_file(path)?,
        None => MatchConfig::default(),
    };

    if let Some(threshold) = cli.threshold {
        config = config.with_win_threshold(threshold);
    }
    if let Some(difficulty) = cli.difficulty {
        config = config.with_difficulty(difficulty);
    }
    if let Some(first) = cli.first {
        config = config.with_first_mover(first);
    }
    if let Some(rule) = cli.first_rule {
        config = config.with_first_mover_rule(rule);
    }
    if let Some(symbol) = cli.symbol {
        config = config.with_human_symbol(symbol);
    }
    if let Some(name) = &cli.name {
        config = config.with_human_name(name.as_str());
    }
    if let Some(seed) = cli.seed {
        config = config.with_seed(Some(seed));
    }

    term.clear()?;
    let threshold = config.win_threshold().to_string();
    term.say(&fill(
        &messages.welcome,
        &[("threshold", threshold.as_str())],
    ))?;
    term.print("")?;

    if cli.config.is_none() {
        if cli.name.is_none() {
            let name = term.ask_name(messages)?;
            config = config.with_human_name(name);
        }
        if cli.symbol.is_none() {
            let symbol = term.ask_symbol(messages)?;
            config = config.with_human_symbol(symbol);
        }
    }

    config.validate()?;
    info!(
        difficulty = %config.difficulty(),
        first_mover = %config.first_mover(),
        rule = %config.first_mover_rule(),
        threshold = *config.win_threshold(),
        "Match configured"
    );
    Ok(config)
}
