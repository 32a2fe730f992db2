//! How the computer picks its square.
//!
//! Every strategy is a total function over non-full boards: it always
//! returns an open position, and reports [`NoMovesAvailable`] only when
//! asked to move on a full board.

use crate::action::NoMovesAvailable;
use crate::rules::open_position_on_line_with_count;
use crate::{Board, GameRng, Mark, Position};
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

/// A computer decision policy.
pub trait MoveStrategy: std::fmt::Debug {
    /// Picks an unoccupied position for the computer.
    fn decide(&mut self, board: &Board, rng: &mut GameRng) -> Result<Position, NoMovesAvailable>;

    /// Returns the opponent's display name.
    fn name(&self) -> &str;
}

/// Difficulty tier selected once per match.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Default,
    Serialize,
    Deserialize,
    strum::Display,
    strum::EnumString,
    strum::EnumIter,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum Difficulty {
    /// Plays a random open square.
    Easy,
    /// Blocks the human's two-in-a-line, otherwise random.
    Intermediate,
    /// Wins, then blocks, then takes the center, otherwise random.
    #[default]
    Advanced,
}

impl Difficulty {
    /// Menu choice (1-3) for this tier.
    pub fn choice(self) -> u8 {
        match self {
            Difficulty::Easy => 1,
            Difficulty::Intermediate => 2,
            Difficulty::Advanced => 3,
        }
    }

    /// Tier for a menu choice (1-3).
    pub fn from_choice(choice: u8) -> Option<Self> {
        match choice {
            1 => Some(Difficulty::Easy),
            2 => Some(Difficulty::Intermediate),
            3 => Some(Difficulty::Advanced),
            _ => None,
        }
    }

    /// The computer opponent's name at this tier.
    pub fn opponent_name(self) -> &'static str {
        match self {
            Difficulty::Easy => "WALL-E",
            Difficulty::Intermediate => "R2D2",
            Difficulty::Advanced => "Optimus Prime",
        }
    }
}

impl MoveStrategy for Difficulty {
    #[instrument(skip(board, rng))]
    fn decide(&mut self, board: &Board, rng: &mut GameRng) -> Result<Position, NoMovesAvailable> {
        match self {
            Difficulty::Easy => easy_move(board, rng),
            Difficulty::Intermediate => intermediate_move(board, rng),
            Difficulty::Advanced => advanced_move(board, rng),
        }
    }

    fn name(&self) -> &str {
        self.opponent_name()
    }
}

/// Uniformly random open square.
pub fn easy_move(board: &Board, rng: &mut GameRng) -> Result<Position, NoMovesAvailable> {
    rng.choose(&board.unoccupied_positions())
        .ok_or(NoMovesAvailable)
}

/// Blocks the human's open two-in-a-line, else plays randomly.
pub fn intermediate_move(board: &Board, rng: &mut GameRng) -> Result<Position, NoMovesAvailable> {
    if let Some(block) = defensive_square(board) {
        debug!(%block, "Blocking human line");
        return Ok(block);
    }
    easy_move(board, rng)
}

/// Fixed priority: finish own line, block the human's line, take the
/// center, then random.
///
/// A square that both wins and blocks is played as the win.
pub fn advanced_move(board: &Board, rng: &mut GameRng) -> Result<Position, NoMovesAvailable> {
    if let Some(win) = offensive_square(board) {
        debug!(%win, "Completing own line");
        return Ok(win);
    }
    if let Some(block) = defensive_square(board) {
        debug!(%block, "Blocking human line");
        return Ok(block);
    }
    if board.is_empty(Position::CENTER) {
        debug!("Taking center");
        return Ok(Position::CENTER);
    }
    easy_move(board, rng)
}

fn offensive_square(board: &Board) -> Option<Position> {
    open_position_on_line_with_count(board, Mark::Computer, 2)
}

fn defensive_square(board: &Board) -> Option<Position> {
    open_position_on_line_with_count(board, Mark::Human, 2)
}

/// Creature of habit: always the lowest-numbered open square.
#[derive(Debug, Clone)]
pub struct FirstOpen {
    name: String,
}

impl FirstOpen {
    /// Creates a first-open opponent with the given name.
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }
}

impl MoveStrategy for FirstOpen {
    fn decide(&mut self, board: &Board, _rng: &mut GameRng) -> Result<Position, NoMovesAvailable> {
        Position::ALL
            .iter()
            .copied()
            .find(|pos| board.is_empty(*pos))
            .ok_or(NoMovesAvailable)
    }

    fn name(&self) -> &str {
        &self.name
    }
}
