//! Win detection logic for tic-tac-toe.

use super::lines::{WIN_LINES, count_markers_on_line};
use crate::{Board, Mark};
use tracing::instrument;

/// Checks if there is a winner on the board.
///
/// Returns `Some(mark)` if one mark owns all three squares of a line,
/// `None` otherwise. With strictly alternating turns and a round that
/// stops at the first completed line, at most one mark can qualify.
#[instrument(skip(board))]
pub fn check_winner(board: &Board) -> Option<Mark> {
    for line in &WIN_LINES {
        for mark in [Mark::Human, Mark::Computer] {
            if count_markers_on_line(board, line, mark) == 3 {
                return Some(mark);
            }
        }
    }
    None
}
