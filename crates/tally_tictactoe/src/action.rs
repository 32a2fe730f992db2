//! First-class action types for tic-tac-toe.
//!
//! Moves are domain events, not side effects. They represent
//! a party's intent and can be validated independently of execution.

use crate::{Mark, Position};
use serde::{Deserialize, Serialize};
use tracing::instrument;

/// A move in tic-tac-toe: a party placing their mark at a position.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Move {
    /// The party making the move.
    pub mark: Mark,
    /// The position where the party places their mark.
    pub position: Position,
}

impl Move {
    /// Creates a new move.
    #[instrument]
    pub fn new(mark: Mark, position: Position) -> Self {
        Self { mark, position }
    }

    /// Returns the party making this move.
    pub fn mark(&self) -> Mark {
        self.mark
    }

    /// Returns the position of this move.
    pub fn position(&self) -> Position {
        self.position
    }
}

impl std::fmt::Display for Move {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} -> {}", self.mark, self.position.label())
    }
}

/// Error that can occur when validating or applying a move.
///
/// `PositionOutOfRange`, `Unparseable` and `SquareOccupied` are invalid
/// moves: a retry trigger for the human, a bug for the computer.
#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display)]
pub enum MoveError {
    /// The number does not name a square.
    #[display("Square {} is not on the board (choose 1-9)", _0)]
    PositionOutOfRange(i64),

    /// The input is not a square number at all.
    #[display("'{}' is not a square number", _0)]
    Unparseable(String),

    /// The square at the position is already occupied.
    #[display("Square {} is already occupied", _0)]
    SquareOccupied(Position),

    /// The round is already over.
    #[display("Round is already over")]
    RoundOver,

    /// It's not this party's turn.
    #[display("It's not {}'s turn", _0)]
    WrongParty(Mark),

    /// An invariant was violated (postcondition failure).
    #[display("Invariant violation: {}", _0)]
    InvariantViolation(String),
}

impl std::error::Error for MoveError {}

impl MoveError {
    /// Returns true for errors the human can fix by choosing again.
    pub fn is_invalid_move(&self) -> bool {
        matches!(
            self,
            MoveError::PositionOutOfRange(_)
                | MoveError::Unparseable(_)
                | MoveError::SquareOccupied(_)
        )
    }
}

/// A strategy was asked to move on a board with no open squares.
#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::Display, derive_more::Error)]
#[display("No moves available: the board is full")]
pub struct NoMovesAvailable;
