//! First-class invariants for a round.
//!
//! Invariants are logical properties that must hold after every move.
//! The round checks them in debug builds; tests check them directly.

use crate::Board;
use crate::round::RoundController;

/// A logical property that must hold for a given state.
pub trait Invariant<S> {
    /// Checks if the invariant holds for the given state.
    fn holds(state: &S) -> bool;

    /// Human-readable description of the invariant.
    fn description() -> &'static str;
}

/// Violation of an invariant.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InvariantViolation {
    /// Description of the violated invariant.
    pub description: String,
}

impl InvariantViolation {
    /// Creates a new invariant violation.
    pub fn new(description: impl Into<String>) -> Self {
        Self {
            description: description.into(),
        }
    }
}

/// A set of invariants that can be checked together.
///
/// Implemented for tuples so a set is just a type alias.
pub trait InvariantSet<S> {
    /// Checks all invariants in the set, collecting every violation.
    fn check_all(state: &S) -> Result<(), Vec<InvariantViolation>>;
}

impl<S, I1, I2> InvariantSet<S> for (I1, I2)
where
    I1: Invariant<S>,
    I2: Invariant<S>,
{
    fn check_all(state: &S) -> Result<(), Vec<InvariantViolation>> {
        let mut violations = Vec::new();

        if !I1::holds(state) {
            violations.push(InvariantViolation::new(I1::description()));
        }

        if !I2::holds(state) {
            violations.push(InvariantViolation::new(I2::description()));
        }

        if violations.is_empty() {
            Ok(())
        } else {
            Err(violations)
        }
    }
}

/// Invariant: squares are never overwritten and never cleared.
///
/// Replaying the move history onto an empty board must reproduce the
/// current board exactly.
pub struct MonotonicBoardInvariant;

impl Invariant<RoundController> for MonotonicBoardInvariant {
    fn holds(round: &RoundController) -> bool {
        let mut reconstructed = Board::new();

        for mv in round.history() {
            if reconstructed.occupy(mv.position, mv.mark).is_err() {
                return false;
            }
        }

        reconstructed == *round.board()
    }

    fn description() -> &'static str {
        "Board squares are monotonic (never overwritten)"
    }
}

/// Invariant: parties alternate, starting with the round's first mover.
pub struct AlternatingTurnInvariant;

impl Invariant<RoundController> for AlternatingTurnInvariant {
    fn holds(round: &RoundController) -> bool {
        let history = round.history();

        let Some(first) = history.first() else {
            return round.to_move() == Some(round.first_mover());
        };

        if first.mark != round.first_mover() {
            return false;
        }

        if history.windows(2).any(|pair| pair[0].mark == pair[1].mark) {
            return false;
        }

        match round.to_move() {
            Some(next) => history
                .last()
                .is_some_and(|last| last.mark.opponent() == next),
            None => true,
        }
    }

    fn description() -> &'static str {
        "Parties alternate turns starting with the first mover"
    }
}

/// All round invariants as a composable set.
pub type RoundInvariants = (MonotonicBoardInvariant, AlternatingTurnInvariant);
