//! Game rules for tic-tac-toe.
//!
//! This module contains pure functions for evaluating board state.
//! Rules are separated from board storage so the win check and the
//! computer opponent read lines through the same scanner.

pub mod draw;
pub mod lines;
pub mod win;

pub use draw::{is_draw, is_full};
pub use lines::{WIN_LINES, WinLine, count_markers_on_line, open_position_on_line_with_count};
pub use win::check_winner;
