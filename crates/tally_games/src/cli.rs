//! Command-line interface for tally_games.

use clap::Parser;
use std::path::PathBuf;
use tally_tictactoe::{Difficulty, FirstMover, FirstMoverRule};

/// Tally Games - tic-tac-toe matches against the computer
///
/// Anything not given on the command line or in the config file is asked
/// for interactively.
#[derive(Parser, Debug)]
#[command(name = "tally_games")]
#[command(about = "Tic-tac-toe matches against the computer", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Match configuration file (TOML). Skips the setup questions.
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Message catalog (TOML) overriding the built-in text
    #[arg(long)]
    pub messages: Option<PathBuf>,

    /// Computer difficulty: easy, intermediate or advanced
    #[arg(short, long)]
    pub difficulty: Option<Difficulty>,

    /// Who opens the match: human, computer or random
    #[arg(short, long)]
    pub first: Option<FirstMover>,

    /// Opener of later rounds: same, alternate or continue
    #[arg(long)]
    pub first_rule: Option<FirstMoverRule>,

    /// Rounds needed to become champion
    #[arg(short, long)]
    pub threshold: Option<u32>,

    /// Your marker letter (any letter but 'o')
    #[arg(short, long)]
    pub symbol: Option<char>,

    /// Your display name
    #[arg(short, long)]
    pub name: Option<String>,

    /// RNG seed, to replay a session exactly
    #[arg(long)]
    pub seed: Option<u64>,

    /// Log file path
    #[arg(long, default_value = "tally_games.log")]
    pub log_file: PathBuf,

    /// Don't clear the screen between redraws
    #[arg(long)]
    pub no_clear: bool,
}
