//! Core domain types for tic-tac-toe.

use crate::config::ConfigError;
use serde::{Deserialize, Serialize};
use tracing::instrument;

/// One of the two parties in a match.
///
/// Squares store marks, not characters; the symbol drawn for each mark
/// is chosen per match and lives in [`MarkerSymbols`].
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, derive_more::Display,
)]
pub enum Mark {
    /// The human at the keyboard.
    Human,
    /// The computer opponent.
    Computer,
}

impl Mark {
    /// Returns the opposing mark.
    pub fn opponent(self) -> Self {
        match self {
            Mark::Human => Mark::Computer,
            Mark::Computer => Mark::Human,
        }
    }
}

/// A square on the tic-tac-toe board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Square {
    /// Empty square.
    #[default]
    Empty,
    /// Square claimed by a party.
    Occupied(Mark),
}

impl Square {
    /// Returns the mark occupying this square, if any.
    pub fn mark(self) -> Option<Mark> {
        match self {
            Square::Empty => None,
            Square::Occupied(mark) => Some(mark),
        }
    }
}

/// Display symbols for both parties, fixed for the length of a match.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MarkerSymbols {
    human: char,
    computer: char,
}

impl MarkerSymbols {
    /// Symbol drawn for an empty square. Never available to either party.
    pub const EMPTY: char = ' ';

    /// Symbol always used by the computer.
    pub const COMPUTER: char = 'O';

    /// Builds the symbol pair from the human's choice.
    ///
    /// The human may pick any ASCII letter other than `o`, which is
    /// reserved for the computer. Case is preserved for display.
    #[instrument]
    pub fn new(human: char) -> Result<Self, ConfigError> {
        if !Self::is_allowed(human) {
            return Err(ConfigError::new(format!(
                "Marker '{}' is not allowed (pick a letter a-z other than 'o')",
                human
            )));
        }
        Ok(Self {
            human,
            computer: Self::COMPUTER,
        })
    }

    /// Returns true if `symbol` is a legal human marker.
    pub fn is_allowed(symbol: char) -> bool {
        symbol.is_ascii_alphabetic() && !symbol.eq_ignore_ascii_case(&Self::COMPUTER)
    }

    /// Symbol for a mark.
    pub fn symbol(&self, mark: Mark) -> char {
        match mark {
            Mark::Human => self.human,
            Mark::Computer => self.computer,
        }
    }

    /// Symbol for a square, blank when empty.
    pub fn square(&self, square: Square) -> char {
        square.mark().map_or(Self::EMPTY, |mark| self.symbol(mark))
    }
}

impl Default for MarkerSymbols {
    fn default() -> Self {
        Self {
            human: 'X',
            computer: Self::COMPUTER,
        }
    }
}
