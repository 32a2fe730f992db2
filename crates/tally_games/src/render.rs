//! Plain-text rendering of boards, scores and option lists.

use tally_tictactoe::{Board, Mark, MarkerSymbols, Position, Score};

/// Who is sitting at the table, as shown on screen.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Table {
    /// The human's display name.
    pub human_name: String,
    /// The computer opponent's display name.
    pub opponent_name: String,
    /// Symbols for both marks.
    pub symbols: MarkerSymbols,
    /// Rounds needed to become champion.
    pub threshold: u32,
}

impl Table {
    /// Display name for a mark.
    pub fn name(&self, mark: Mark) -> &str {
        match mark {
            Mark::Human => &self.human_name,
            Mark::Computer => &self.opponent_name,
        }
    }
}

/// Draws the board as a 3x3 box, one symbol per square.
pub fn draw_board(board: &Board, symbols: &MarkerSymbols) -> String {
    let row = |positions: &[Position]| {
        let cells: Vec<String> = positions
            .iter()
            .map(|pos| format!("  {}  ", symbols.square(board.get(*pos))))
            .collect();
        format!(
            "     |     |\n{}\n     |     |\n",
            cells.join("|").trim_end()
        )
    };

    let rows: Vec<String> = Position::ALL.chunks(3).map(row).collect();
    rows.join("-----+-----+-----\n")
}

/// The running score, e.g. `Ada (X): 2, R2D2 (O): 1`.
pub fn score_line(table: &Table, score: &Score) -> String {
    format!(
        "{} ({}): {}, {} ({}): {}",
        table.human_name,
        table.symbols.symbol(Mark::Human),
        score.get(Mark::Human),
        table.opponent_name,
        table.symbols.symbol(Mark::Computer),
        score.get(Mark::Computer),
    )
}

/// Joins items for a prompt: `1, 2, or 3`, `1 or 2`, `1`.
pub fn joinor<T: std::fmt::Display>(items: &[T], delimiter: &str, word: &str) -> String {
    let items: Vec<String> = items.iter().map(ToString::to_string).collect();
    match items.as_slice() {
        [] => String::new(),
        [only] => only.clone(),
        [first, second] => format!("{} {} {}", first, word, second),
        [init @ .., last] => format!("{}{}{} {}", init.join(delimiter), delimiter, word, last),
    }
}
