//! The 3x3 board and its read-only queries.

use crate::action::MoveError;
use crate::rules;
use crate::{Mark, Position, Square};
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

/// 3x3 tic-tac-toe board.
///
/// Squares only ever go from empty to occupied. [`Board::occupy`] is the
/// single mutation and refuses to overwrite, so the number of occupied
/// squares never decreases while the board lives.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Board {
    /// Squares in row-major order (index 0-8).
    squares: [Square; 9],
}

impl Board {
    /// Creates a new empty board.
    pub fn new() -> Self {
        Self::default()
    }

    /// Gets the square at the given position.
    pub fn get(&self, pos: Position) -> Square {
        self.squares[pos.to_index()]
    }

    /// Checks if a square is empty.
    pub fn is_empty(&self, pos: Position) -> bool {
        self.get(pos) == Square::Empty
    }

    /// Returns all squares as a slice.
    pub fn squares(&self) -> &[Square; 9] {
        &self.squares
    }

    /// Claims an empty square for `mark`.
    ///
    /// Either marks the square and returns `Ok`, or leaves the board
    /// untouched and reports why.
    #[instrument(skip(self))]
    pub fn occupy(&mut self, pos: Position, mark: Mark) -> Result<(), MoveError> {
        if !self.is_empty(pos) {
            debug!(%pos, "Rejected move onto occupied square");
            return Err(MoveError::SquareOccupied(pos));
        }
        self.squares[pos.to_index()] = Square::Occupied(mark);
        Ok(())
    }

    /// Claims a square named by its displayed number (1-9).
    #[instrument(skip(self))]
    pub fn occupy_number(&mut self, number: u8, mark: Mark) -> Result<Position, MoveError> {
        let pos = Position::from_number(number)
            .ok_or(MoveError::PositionOutOfRange(i64::from(number)))?;
        self.occupy(pos, mark)?;
        Ok(pos)
    }

    /// Positions still empty, in ascending order.
    pub fn unoccupied_positions(&self) -> Vec<Position> {
        Position::ALL
            .iter()
            .copied()
            .filter(|pos| self.is_empty(*pos))
            .collect()
    }

    /// Number of squares claimed so far.
    pub fn occupied_count(&self) -> usize {
        self.squares
            .iter()
            .filter(|s| **s != Square::Empty)
            .count()
    }

    /// True when no square is left.
    pub fn is_full(&self) -> bool {
        rules::is_full(self)
    }

    /// The mark owning a complete line, if any.
    pub fn winner(&self) -> Option<Mark> {
        rules::check_winner(self)
    }

    /// Overwrites a square without checks, for invariant tests.
    #[cfg(test)]
    pub(crate) fn overwrite(&mut self, pos: Position, square: Square) {
        self.squares[pos.to_index()] = square;
    }
}
