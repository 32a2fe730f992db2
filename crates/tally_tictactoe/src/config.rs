//! Match configuration.
//!
//! Everything here is decided before the first round and never changes
//! during a match. Difficulty and opener ([`MatchSettings`]) may change
//! between matches of one session.

use crate::strategy::Difficulty;
use crate::types::MarkerSymbols;
use crate::{GameRng, Mark};
use derive_getters::Getters;
use derive_more::{Display, Error};
use derive_setters::Setters;
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::{debug, info, instrument};

/// Who takes the first move of the match.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Default,
    Serialize,
    Deserialize,
    strum::Display,
    strum::EnumString,
    strum::EnumIter,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum FirstMover {
    /// The human opens.
    Human,
    /// The computer opens.
    Computer,
    /// One coin flip per match.
    #[default]
    Random,
}

impl FirstMover {
    /// Menu choice (1-3) for this option.
    pub fn choice(self) -> u8 {
        match self {
            FirstMover::Human => 1,
            FirstMover::Computer => 2,
            FirstMover::Random => 3,
        }
    }

    /// Option for a menu choice (1-3).
    pub fn from_choice(choice: u8) -> Option<Self> {
        match choice {
            1 => Some(FirstMover::Human),
            2 => Some(FirstMover::Computer),
            3 => Some(FirstMover::Random),
            _ => None,
        }
    }

    /// Resolves to a concrete mark, flipping a coin for `Random`.
    #[instrument(skip(rng))]
    pub fn resolve(self, rng: &mut GameRng) -> Mark {
        match self {
            FirstMover::Human => Mark::Human,
            FirstMover::Computer => Mark::Computer,
            FirstMover::Random => {
                if rng.coin_flip() {
                    Mark::Human
                } else {
                    Mark::Computer
                }
            }
        }
    }
}

/// How the opening mark carries over from one round to the next.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Default,
    Serialize,
    Deserialize,
    strum::Display,
    strum::EnumString,
    strum::EnumIter,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum FirstMoverRule {
    /// Every round opens with the match's first mover.
    #[default]
    Same,
    /// The opener alternates every round.
    Alternate,
    /// Whoever did not make the final move of the last round opens.
    Continue,
}

/// The settings chosen afresh at the start of every match.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchSettings {
    /// Computer difficulty tier.
    pub difficulty: Difficulty,
    /// Who opens the match.
    pub first_mover: FirstMover,
}

/// Configuration for one match.
#[derive(Debug, Clone, PartialEq, Eq, Getters, Setters, Serialize, Deserialize)]
#[setters(prefix = "with_")]
#[serde(default)]
pub struct MatchConfig {
    /// Rounds a party must win to become champion.
    win_threshold: u32,

    /// Computer difficulty tier.
    difficulty: Difficulty,

    /// Who opens the match.
    first_mover: FirstMover,

    /// How the opener is chosen for later rounds.
    first_mover_rule: FirstMoverRule,

    /// The human's marker letter.
    human_symbol: char,

    /// The human's display name.
    #[setters(into)]
    human_name: String,

    /// Fixed RNG seed for replayable matches.
    seed: Option<u64>,
}

impl Default for MatchConfig {
    fn default() -> Self {
        Self {
            win_threshold: Self::DEFAULT_WIN_THRESHOLD,
            difficulty: Difficulty::default(),
            first_mover: FirstMover::default(),
            first_mover_rule: FirstMoverRule::default(),
            human_symbol: 'X',
            human_name: "Player".to_string(),
            seed: None,
        }
    }
}

impl MatchConfig {
    /// Rounds needed for the championship unless configured otherwise.
    pub const DEFAULT_WIN_THRESHOLD: u32 = 5;

    /// Loads configuration from a TOML file.
    ///
    /// Missing keys fall back to defaults. The result is validated.
    #[instrument(skip(path), fields(path = %path.as_ref().display()))]
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        debug!("Loading config from file");
        let content = std::fs::read_to_string(path.as_ref())
            .map_err(|e| ConfigError::new(format!("Failed to read config file: {}", e)))?;

        let config: Self = toml::from_str(&content)
            .map_err(|e| ConfigError::new(format!("Failed to parse config: {}", e)))?;

        config.validate()?;
        info!(
            win_threshold = config.win_threshold,
            difficulty = %config.difficulty,
            "Config loaded successfully"
        );
        Ok(config)
    }

    /// Checks values that the type system cannot.
    #[instrument(skip(self))]
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.win_threshold == 0 {
            return Err(ConfigError::new(
                "win_threshold must be at least 1".to_string(),
            ));
        }
        if !self.human_name.chars().any(is_name_char) {
            return Err(ConfigError::new(format!(
                "human_name '{}' needs at least one letter or digit",
                self.human_name
            )));
        }
        self.symbols()?;
        Ok(())
    }

    /// Display symbols for this match.
    pub fn symbols(&self) -> Result<MarkerSymbols, ConfigError> {
        MarkerSymbols::new(self.human_symbol)
    }

    /// The computer opponent's display name.
    pub fn opponent_name(&self) -> &'static str {
        self.difficulty.opponent_name()
    }

    /// Difficulty and opener currently in effect.
    pub fn match_settings(&self) -> MatchSettings {
        MatchSettings {
            difficulty: self.difficulty,
            first_mover: self.first_mover,
        }
    }

    /// Replaces difficulty and opener, leaving everything else alone.
    pub fn set_match_settings(&mut self, settings: MatchSettings) {
        self.difficulty = settings.difficulty;
        self.first_mover = settings.first_mover;
    }
}

fn is_name_char(c: char) -> bool {
    c.is_alphanumeric() || c == '_'
}

/// Configuration error.
#[derive(Debug, Clone, Display, Error)]
#[display("Config error: {} at {}:{}", message, file, line)]
pub struct ConfigError {
    /// Error message.
    pub message: String,
    /// Line number where error occurred.
    pub line: u32,
    /// Source file where error occurred.
    pub file: &'static str,
}

impl ConfigError {
    /// Creates a new configuration error.
    #[track_caller]
    pub fn new(message: String) -> Self {
        let loc = std::panic::Location::caller();
        Self {
            message,
            line: loc.line(),
            file: loc.file(),
        }
    }
}
