//! Message catalog for the console.
//!
//! The built-in catalog is compiled in from `assets/messages.toml`. A
//! user file passed with `--messages` is layered on top key by key.

use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::Path;
use tracing::{debug, instrument};

const DEFAULT_MESSAGES: &str = include_str!("../assets/messages.toml");

/// Every line of text the console prints.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Messages {
    pub welcome: String,
    pub player_name: String,
    pub invalid_name: String,
    pub player_marker: String,
    pub invalid_marker: String,
    pub difficulty: String,
    pub opponent: String,
    pub who_goes_first: String,
    pub invalid_choice: String,
    pub goes_first: String,
    pub choose_square: String,
    pub invalid_square: String,
    pub round_won: String,
    pub tie: String,
    #[serde(rename = "continue")]
    pub continue_prompt: String,
    pub champion: String,
    pub play_again: String,
    pub invalid_yes_no: String,
    pub goodbye: String,
}

impl Messages {
    /// Loads the built-in catalog, then applies `overrides` if given.
    #[instrument]
    pub fn load(overrides: Option<&Path>) -> Result<Self> {
        let mut table: toml::Table =
            toml::from_str(DEFAULT_MESSAGES).context("Built-in message catalog is malformed")?;

        if let Some(path) = overrides {
            let content = std::fs::read_to_string(path)
                .with_context(|| format!("Failed to read messages from {}", path.display()))?;
            let custom: toml::Table = toml::from_str(&content)
                .with_context(|| format!("Failed to parse messages in {}", path.display()))?;
            debug!(keys = custom.len(), "Applying message overrides");
            table.extend(custom);
        }

        toml::Value::Table(table)
            .try_into()
            .context("Message catalog has unknown or mistyped keys")
    }
}

/// Substitutes `{key}` placeholders in a template.
///
/// Placeholders without a value are left as written.
pub fn fill(template: &str, values: &[(&str, &str)]) -> String {
    let mut text = template.to_string();
    for (key, value) in values {
        text = text.replace(&format!("{{{}}}", key), value);
    }
    text
}
