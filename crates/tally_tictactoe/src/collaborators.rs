//! What the core needs from the outside world.
//!
//! The core never reads a terminal or draws a board. It asks an input
//! collaborator for the human's square and reports every transition to an
//! observer. Around each match it asks a setup collaborator for the
//! difficulty and opener, then asks whether another match should follow.

use crate::config::MatchSettings;
use crate::match_play::Score;
use crate::round::Outcome;
use crate::{Board, Mark, Move, Position};
use anyhow::Result;

/// Messages sent from the controllers to the display.
///
/// Boards and scores are snapshots; nothing flows back into the game.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GameEvent {
    /// A fresh board is about to be played.
    RoundStarted {
        /// 1-based round number within the match.
        round: u32,
        /// Party making the first move of the round.
        first: Mark,
        /// Score before the round.
        score: Score,
    },
    /// A move was applied.
    MovePlayed {
        /// The move.
        mv: Move,
        /// Board after the move.
        board: Board,
    },
    /// The human picked a square the board refused; they will be asked again.
    MoveRejected {
        /// Square that was refused.
        position: Position,
        /// Why it was refused.
        reason: String,
    },
    /// The round reached a terminal board.
    RoundOver {
        /// Result of the round.
        outcome: Outcome,
        /// Final board.
        board: Board,
        /// Score including this round.
        score: Score,
    },
    /// One party reached the win threshold.
    MatchOver {
        /// Party that reached the threshold.
        champion: Mark,
        /// Final score.
        score: Score,
    },
}

/// Source of the human's moves.
pub trait HumanInput {
    /// Asks the human for a square.
    ///
    /// Implementations run their own retry loop and return a member of
    /// `valid`. Errors mean the input itself failed (closed stdin).
    fn request_human_move(&mut self, board: &Board, valid: &[Position]) -> Result<Position>;
}

/// Observer of game progress (the display).
pub trait Observer {
    /// Handles a game event.
    fn notify(&mut self, event: &GameEvent) -> Result<()>;
}

/// Decides whether a brand-new match follows the one just finished.
pub trait ReplayPrompt {
    /// Returns true to play another match.
    fn play_again(&mut self) -> Result<bool>;
}

/// Supplies difficulty and opener at the start of every match.
pub trait MatchSetup {
    /// Returns the settings for the next match.
    ///
    /// `current` holds the settings in effect: the configured ones before
    /// the first match, the previous match's afterwards.
    fn match_settings(&mut self, current: MatchSettings) -> Result<MatchSettings>;
}

/// Setup that keeps the settings in effect for every match.
#[derive(Debug, Clone, Copy, Default)]
pub struct KeepSettings;

impl MatchSetup for KeepSettings {
    fn match_settings(&mut self, current: MatchSettings) -> Result<MatchSettings> {
        Ok(current)
    }
}

/// Observer that ignores everything.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullObserver;

impl Observer for NullObserver {
    fn notify(&mut self, _event: &GameEvent) -> Result<()> {
        Ok(())
    }
}
