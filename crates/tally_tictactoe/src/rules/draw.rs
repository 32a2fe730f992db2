//! Draw detection logic for tic-tac-toe.

use super::win::check_winner;
use crate::{Board, Square};

/// Checks if the board is full (all squares occupied).
pub fn is_full(board: &Board) -> bool {
    board.squares().iter().all(|s| *s != Square::Empty)
}

/// A full board with no winner is a draw.
pub fn is_draw(board: &Board) -> bool {
    is_full(board) && check_winner(board).is_none()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Mark, Position};

    fn fill(board: &mut Board, layout: [Mark; 9]) {
        for (pos, mark) in Position::ALL.into_iter().zip(layout) {
            board.occupy(pos, mark).unwrap();
        }
    }

    #[test]
    fn test_empty_board_not_full() {
        let board = Board::new();
        assert!(!is_full(&board));
        assert!(!is_draw(&board));
    }

    #[test]
    fn test_partial_board_not_full() {
        let mut board = Board::new();
        board.occupy(Position::Center, Mark::Human).unwrap();
        assert!(!is_full(&board));
    }

    #[test]
    fn test_draw_detection() {
        use Mark::{Computer as C, Human as H};
        // H C H / H C C / C H H
        let mut board = Board::new();
        fill(&mut board, [H, C, H, H, C, C, C, H, H]);
        assert!(is_full(&board));
        assert_eq!(check_winner(&board), None);
        assert!(is_draw(&board));
    }

    #[test]
    fn test_not_draw_if_winner() {
        use Mark::{Computer as C, Human as H};
        // H H H / C C H / H C C
        let mut board = Board::new();
        fill(&mut board, [H, H, H, C, C, H, H, C, C]);
        assert!(is_full(&board));
        assert!(!is_draw(&board));
    }
}
