//! Win-line enumeration and per-line queries.
//!
//! Shared by win detection and the computer opponent.

use crate::{Board, Mark, Position, Square};
use tracing::{instrument, trace};

/// Three positions that win when one mark owns all of them.
pub type WinLine = [Position; 3];

/// Every winning line, in scan order: rows, then columns, then diagonals.
///
/// When several lines qualify for a query the earliest one wins, which
/// keeps the computer's choices reproducible for a fixed seed.
pub const WIN_LINES: [WinLine; 8] = [
    // Rows
    [Position::TopLeft, Position::TopCenter, Position::TopRight],
    [Position::MiddleLeft, Position::Center, Position::MiddleRight],
    [Position::BottomLeft, Position::BottomCenter, Position::BottomRight],
    // Columns
    [Position::TopLeft, Position::MiddleLeft, Position::BottomLeft],
    [Position::TopCenter, Position::Center, Position::BottomCenter],
    [Position::TopRight, Position::MiddleRight, Position::BottomRight],
    // Diagonals
    [Position::TopLeft, Position::Center, Position::BottomRight],
    [Position::TopRight, Position::Center, Position::BottomLeft],
];

/// Counts how many squares of `line` hold `mark`.
pub fn count_markers_on_line(board: &Board, line: &WinLine, mark: Mark) -> usize {
    line.iter()
        .filter(|pos| board.get(**pos) == Square::Occupied(mark))
        .count()
}

/// Finds the first empty square on the first line where `mark` holds
/// exactly `target_count` squares.
///
/// Lines are scanned in [`WIN_LINES`] order. A qualifying line with no
/// empty square (the rest belongs to the opponent) is skipped.
#[instrument(skip(board))]
pub fn open_position_on_line_with_count(
    board: &Board,
    mark: Mark,
    target_count: usize,
) -> Option<Position> {
    for line in &WIN_LINES {
        if count_markers_on_line(board, line, mark) != target_count {
            continue;
        }
        if let Some(open) = line.iter().copied().find(|pos| board.is_empty(*pos)) {
            trace!(?line, %open, "Line qualifies");
            return Some(open);
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    fn board_with(moves: &[(Position, Mark)]) -> Board {
        let mut board = Board::new();
        for (pos, mark) in moves {
            board.occupy(*pos, *mark).unwrap();
        }
        board
    }

    #[test]
    fn test_count_on_line() {
        let board = board_with(&[
            (Position::TopLeft, Mark::Human),
            (Position::TopRight, Mark::Human),
            (Position::TopCenter, Mark::Computer),
        ]);
        assert_eq!(count_markers_on_line(&board, &WIN_LINES[0], Mark::Human), 2);
        assert_eq!(
            count_markers_on_line(&board, &WIN_LINES[0], Mark::Computer),
            1
        );
        assert_eq!(count_markers_on_line(&board, &WIN_LINES[1], Mark::Human), 0);
    }

    #[test]
    fn test_finds_gap_in_middle_of_line() {
        let board = board_with(&[
            (Position::TopLeft, Mark::Human),
            (Position::BottomLeft, Mark::Human),
        ]);
        assert_eq!(
            open_position_on_line_with_count(&board, Mark::Human, 2),
            Some(Position::MiddleLeft)
        );
    }

    #[test]
    fn test_skips_blocked_line() {
        // Top row is full, so the only open two-in-a-line is the left column.
        let board = board_with(&[
            (Position::TopLeft, Mark::Human),
            (Position::TopCenter, Mark::Human),
            (Position::TopRight, Mark::Computer),
            (Position::MiddleLeft, Mark::Human),
        ]);
        assert_eq!(
            open_position_on_line_with_count(&board, Mark::Human, 2),
            Some(Position::BottomLeft)
        );
    }

    #[test]
    fn test_earliest_line_wins_tie() {
        let board = board_with(&[
            (Position::MiddleLeft, Mark::Human),
            (Position::Center, Mark::Human),
            (Position::TopRight, Mark::Human),
            (Position::MiddleRight, Mark::Computer),
        ]);
        // Middle row is blocked, leaving the anti-diagonal.
        assert_eq!(
            open_position_on_line_with_count(&board, Mark::Human, 2),
            Some(Position::BottomLeft)
        );

        let board = board_with(&[
            (Position::MiddleLeft, Mark::Human),
            (Position::Center, Mark::Human),
            (Position::TopRight, Mark::Human),
            (Position::BottomRight, Mark::Human),
        ]);
        // Middle row, right column and main diagonal all qualify; rows come first.
        assert_eq!(
            open_position_on_line_with_count(&board, Mark::Human, 2),
            Some(Position::MiddleRight)
        );
    }

    #[test]
    fn test_none_when_nothing_qualifies() {
        let board = board_with(&[(Position::Center, Mark::Computer)]);
        assert_eq!(
            open_position_on_line_with_count(&board, Mark::Computer, 2),
            None
        );
        assert_eq!(
            open_position_on_line_with_count(&board, Mark::Human, 2),
            None
        );
    }
}
