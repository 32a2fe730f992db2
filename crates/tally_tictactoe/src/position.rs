//! Board positions, numbered 1-9 in row-major order.

use crate::action::MoveError;
use serde::{Deserialize, Serialize};
use std::num::{IntErrorKind, ParseIntError};
use tracing::instrument;

/// A position on the tic-tac-toe board.
///
/// Positions are numbered the way the squares are drawn for the human:
///
/// ```text
///  1 | 2 | 3
///  4 | 5 | 6
///  7 | 8 | 9
/// ```
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Serialize,
    Deserialize,
    strum::EnumIter,
)]
pub enum Position {
    /// Top-left (position 1)
    TopLeft,
    /// Top-center (position 2)
    TopCenter,
    /// Top-right (position 3)
    TopRight,
    /// Middle-left (position 4)
    MiddleLeft,
    /// Center (position 5)
    Center,
    /// Middle-right (position 6)
    MiddleRight,
    /// Bottom-left (position 7)
    BottomLeft,
    /// Bottom-center (position 8)
    BottomCenter,
    /// Bottom-right (position 9)
    BottomRight,
}

impl Position {
    /// All 9 positions in ascending order.
    pub const ALL: [Position; 9] = [
        Position::TopLeft,
        Position::TopCenter,
        Position::TopRight,
        Position::MiddleLeft,
        Position::Center,
        Position::MiddleRight,
        Position::BottomLeft,
        Position::BottomCenter,
        Position::BottomRight,
    ];

    /// The square the advanced computer prefers when nothing is urgent.
    pub const CENTER: Position = Position::Center;

    /// Get label for this position (for display).
    pub fn label(&self) -> &'static str {
        match self {
            Position::TopLeft => "Top-left",
            Position::TopCenter => "Top-center",
            Position::TopRight => "Top-right",
            Position::MiddleLeft => "Middle-left",
            Position::Center => "Center",
            Position::MiddleRight => "Middle-right",
            Position::BottomLeft => "Bottom-left",
            Position::BottomCenter => "Bottom-center",
            Position::BottomRight => "Bottom-right",
        }
    }

    /// The 1-based number shown to the human.
    pub fn number(self) -> u8 {
        self.to_index() as u8 + 1
    }

    /// Converts position to board index (0-8).
    pub fn to_index(self) -> usize {
        match self {
            Position::TopLeft => 0,
            Position::TopCenter => 1,
            Position::TopRight => 2,
            Position::MiddleLeft => 3,
            Position::Center => 4,
            Position::MiddleRight => 5,
            Position::BottomLeft => 6,
            Position::BottomCenter => 7,
            Position::BottomRight => 8,
        }
    }

    /// Creates position from board index (0-8).
    pub fn from_index(index: usize) -> Option<Self> {
        Self::ALL.get(index).copied()
    }

    /// Creates position from its displayed number (1-9).
    #[instrument]
    pub fn from_number(number: u8) -> Option<Self> {
        match number {
            1..=9 => Self::from_index(usize::from(number - 1)),
            _ => None,
        }
    }

    /// Parses a typed square number, rejecting anything off the board.
    #[instrument]
    pub fn parse(input: &str) -> Result<Self, MoveError> {
        let trimmed = input.trim();
        let number: i64 = trimmed
            .parse()
            .map_err(|e: ParseIntError| match e.kind() {
                IntErrorKind::PosOverflow => MoveError::PositionOutOfRange(i64::MAX),
                IntErrorKind::NegOverflow => MoveError::PositionOutOfRange(i64::MIN),
                _ => MoveError::Unparseable(trimmed.to_string()),
            })?;
        u8::try_from(number)
            .ok()
            .and_then(Self::from_number)
            .ok_or(MoveError::PositionOutOfRange(number))
    }
}

impl std::fmt::Display for Position {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.number())
    }
}
