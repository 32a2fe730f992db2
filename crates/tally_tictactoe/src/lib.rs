//! Tic-tac-toe against a tiered computer opponent.
//!
//! This crate is the game itself, with no terminal code:
//!
//! - **Board**: the nine squares and the win/full queries
//! - **Rules**: win lines, the line scanner, win and draw detection
//! - **Strategy**: the computer's Easy/Intermediate/Advanced policies
//! - **Round**: turn alternation on one board until a terminal outcome
//! - **Match**: rounds repeated until a party reaches the win threshold
//!
//! Input, display, the per-match settings and the "play again?" question
//! are collaborator traits implemented by the front-end.
//!
//! # Example
//!
//! ```
//! use tally_tictactoe::{Board, Difficulty, GameRng, Mark, MoveStrategy, Position};
//!
//! let mut board = Board::new();
//! board.occupy(Position::TopLeft, Mark::Human).unwrap();
//! board.occupy(Position::TopCenter, Mark::Human).unwrap();
//!
//! let mut rng = GameRng::new(7);
//! let block = Difficulty::Intermediate.decide(&board, &mut rng).unwrap();
//! assert_eq!(block, Position::TopRight);
//! ```

#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod action;
mod board;
mod collaborators;
mod config;
pub mod invariants;
mod match_play;
mod position;
mod rng;
mod round;
pub mod rules;
mod strategy;
mod types;

pub use action::{Move, MoveError, NoMovesAvailable};
pub use board::Board;
pub use collaborators::{
    GameEvent, HumanInput, KeepSettings, MatchSetup, NullObserver, Observer, ReplayPrompt,
};
pub use config::{ConfigError, FirstMover, FirstMoverRule, MatchConfig, MatchSettings};
pub use match_play::{MatchController, MatchState, Score};
pub use position::Position;
pub use rng::GameRng;
pub use round::{Outcome, RoundController, RoundState};
pub use strategy::{
    Difficulty, FirstOpen, MoveStrategy, advanced_move, easy_move, intermediate_move,
};
pub use types::{Mark, MarkerSymbols, Square};
