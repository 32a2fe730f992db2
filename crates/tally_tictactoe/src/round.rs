//! A single round: one board played from empty to a terminal outcome.
//!
//! ```text
//! AwaitingMove(first) --move--> AwaitingMove(other) --...--> RoundOver(outcome)
//! ```
//!
//! The outcome is never stored. It is read off the board every time it
//! is asked for, so the state and the board cannot disagree.

use crate::action::{Move, MoveError};
#[cfg(debug_assertions)]
use crate::invariants::{InvariantSet, RoundInvariants};
use crate::collaborators::{GameEvent, HumanInput, Observer};
use crate::strategy::MoveStrategy;
use crate::{Board, GameRng, Mark};
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, instrument, warn};

/// Result of a finished round.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Outcome {
    /// The human completed a line.
    HumanWin,
    /// The computer completed a line.
    ComputerWin,
    /// The board filled with no line completed.
    Tie,
}

impl Outcome {
    /// Derives the outcome from a board, `None` while play can continue.
    pub fn from_board(board: &Board) -> Option<Self> {
        match board.winner() {
            Some(Mark::Human) => Some(Outcome::HumanWin),
            Some(Mark::Computer) => Some(Outcome::ComputerWin),
            None if board.is_full() => Some(Outcome::Tie),
            None => None,
        }
    }

    /// Returns the winner if there is one.
    pub fn winner(&self) -> Option<Mark> {
        match self {
            Outcome::HumanWin => Some(Mark::Human),
            Outcome::ComputerWin => Some(Mark::Computer),
            Outcome::Tie => None,
        }
    }

    /// Returns true if the round was a tie.
    pub fn is_tie(&self) -> bool {
        matches!(self, Outcome::Tie)
    }
}

impl std::fmt::Display for Outcome {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Outcome::HumanWin => write!(f, "Human wins"),
            Outcome::ComputerWin => write!(f, "Computer wins"),
            Outcome::Tie => write!(f, "Tie"),
        }
    }
}

/// Where a round stands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RoundState {
    /// Waiting on this party's move.
    AwaitingMove(Mark),
    /// No further moves accepted.
    RoundOver(Outcome),
}

/// Sequences the turns of one round.
#[derive(Debug, Clone)]
pub struct RoundController {
    board: Board,
    history: Vec<Move>,
    first_mover: Mark,
    to_move: Mark,
}

impl RoundController {
    /// Starts a round on an empty board with `first_mover` to play.
    #[instrument]
    pub fn new(first_mover: Mark) -> Self {
        Self {
            board: Board::new(),
            history: Vec::new(),
            first_mover,
            to_move: first_mover,
        }
    }

    /// Returns the board.
    pub fn board(&self) -> &Board {
        &self.board
    }

    /// Returns move history.
    pub fn history(&self) -> &[Move] {
        &self.history
    }

    /// Party that opened the round.
    pub fn first_mover(&self) -> Mark {
        self.first_mover
    }

    /// Party whose move is awaited, `None` once the round is over.
    pub fn to_move(&self) -> Option<Mark> {
        match self.state() {
            RoundState::AwaitingMove(mark) => Some(mark),
            RoundState::RoundOver(_) => None,
        }
    }

    /// Party that made the last move, if any.
    pub fn last_mover(&self) -> Option<Mark> {
        self.history.last().map(Move::mark)
    }

    /// Current state, derived from the board.
    pub fn state(&self) -> RoundState {
        match Outcome::from_board(&self.board) {
            Some(outcome) => RoundState::RoundOver(outcome),
            None => RoundState::AwaitingMove(self.to_move),
        }
    }

    /// Outcome once the round is over.
    pub fn outcome(&self) -> Option<Outcome> {
        Outcome::from_board(&self.board)
    }

    /// Applies one move.
    ///
    /// A rejected move leaves the round exactly as it was.
    #[instrument(skip(self), fields(to_move = ?self.to_move))]
    pub fn submit(&mut self, action: Move) -> Result<RoundState, MoveError> {
        let expected = match self.state() {
            RoundState::RoundOver(_) => return Err(MoveError::RoundOver),
            RoundState::AwaitingMove(mark) => mark,
        };
        if action.mark != expected {
            return Err(MoveError::WrongParty(action.mark));
        }

        self.board.occupy(action.position, action.mark)?;
        self.history.push(action);
        self.to_move = action.mark.opponent();

        #[cfg(debug_assertions)]
        RoundInvariants::check_all(self).map_err(|violations| {
            let descriptions = violations
                .iter()
                .map(|v| v.description.as_str())
                .collect::<Vec<_>>()
                .join("; ");
            MoveError::InvariantViolation(format!("Postcondition failed: {}", descriptions))
        })?;

        Ok(self.state())
    }

    /// Plays the round to completion.
    ///
    /// The human's squares come from `input`; a square the board refuses
    /// is reported to the observer and asked for again. The computer's
    /// squares come from `strategy`, and a refusal there is a bug that
    /// ends the round with an error.
    #[instrument(skip_all, fields(first = ?self.first_mover))]
    pub fn play<I, O>(
        &mut self,
        input: &mut I,
        strategy: &mut dyn MoveStrategy,
        rng: &mut GameRng,
        observer: &mut O,
    ) -> Result<Outcome>
    where
        I: HumanInput + ?Sized,
        O: Observer + ?Sized,
    {
        loop {
            let mark = match self.state() {
                RoundState::RoundOver(outcome) => {
                    info!(%outcome, moves = self.history.len(), "Round over");
                    return Ok(outcome);
                }
                RoundState::AwaitingMove(mark) => mark,
            };

            let position = match mark {
                Mark::Human => {
                    let valid = self.board.unoccupied_positions();
                    input.request_human_move(&self.board, &valid)?
                }
                Mark::Computer => strategy
                    .decide(&self.board, rng)
                    .context("Computer asked to move on a full board")?,
            };

            let action = Move::new(mark, position);
            match self.submit(action) {
                Ok(_) => {
                    debug!(%action, "Move applied");
                    observer.notify(&GameEvent::MovePlayed {
                        mv: action,
                        board: self.board.clone(),
                    })?;
                }
                Err(e) if mark == Mark::Human && e.is_invalid_move() => {
                    warn!(%position, error = %e, "Human move rejected, asking again");
                    observer.notify(&GameEvent::MoveRejected {
                        position,
                        reason: e.to_string(),
                    })?;
                }
                Err(e) => {
                    return Err(anyhow::Error::new(e)
                        .context(format!("{} produced an illegal move", strategy.name())));
                }
            }
        }
    }

    /// Mutable board access, for invariant tests.
    #[cfg(test)]
    pub(crate) fn board_mut(&mut self) -> &mut Board {
        &mut self.board
    }
}
