//! Win detection logic for tic-tac-toe.

use crate::types::{Board, Mark, Square};
use tracing::instrument;

/// The eight winning lines: rows, then columns, then diagonals.
pub const LINES: [[(usize, usize); 3]; 8] = [
    // Rows
    [(0, 0), (0, 1), (0, 2)],
    [(1, 0), (1, 1), (1, 2)],
    [(2, 0), (2, 1), (2, 2)],
    // Columns
    [(0, 0), (1, 0), (2, 0)],
    [(0, 1), (1, 1), (2, 1)],
    [(0, 2), (1, 2), (2, 2)],
    // Diagonals
    [(0, 0), (1, 1), (2, 2)],
    [(0, 2), (1, 1), (2, 0)],
];

/// Returns the first line holding three identical marks, with that mark.
#[instrument(skip(board))]
pub fn winning_line(board: &Board) -> Option<(Mark, [(usize, usize); 3])> {
    LINES.into_iter().find_map(|line| {
        let [a, b, c] = line.map(|(r, col)| board.get(r, col));
        match a {
            Some(Square::Occupied(mark)) if a == b && a == c => Some((mark, line)),
            _ => None,
        }
    })
}

/// Checks if there is a winner on the board.
///
/// Returns `Some(mark)` if that mark has three in a row,
/// `None` otherwise.
#[instrument(skip(board))]
pub fn check_winner(board: &Board) -> Option<Mark> {
    winning_line(board).map(|(mark, _)| mark)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_winner_empty_board() {
        assert_eq!(check_winner(&Board::new()), None);
    }

    #[test]
    fn test_winner_top_row() {
        let mut board = Board::new();
        board.place(0, 0, Mark::X);
        board.place(0, 1, Mark::X);
        board.place(0, 2, Mark::X);
        assert_eq!(check_winner(&board), Some(Mark::X));
        assert_eq!(winning_line(&board).map(|(_, l)| l), Some(LINES[0]));
    }

    #[test]
    fn test_winner_column() {
        let mut board = Board::new();
        board.place(0, 1, Mark::O);
        board.place(1, 1, Mark::O);
        board.place(2, 1, Mark::O);
        assert_eq!(check_winner(&board), Some(Mark::O));
    }

    #[test]
    fn test_winner_anti_diagonal() {
        let mut board = Board::new();
        board.place(0, 2, Mark::O);
        board.place(1, 1, Mark::O);
        board.place(2, 0, Mark::O);
        assert_eq!(check_winner(&board), Some(Mark::O));
    }

    #[test]
    fn test_mixed_line_is_not_a_win() {
        let mut board = Board::new();
        board.place(0, 0, Mark::X);
        board.place(0, 1, Mark::O);
        board.place(0, 2, Mark::X);
        assert_eq!(check_winner(&board), None);
    }

    #[test]
    fn test_no_winner_incomplete() {
        let mut board = Board::new();
        board.place(0, 0, Mark::X);
        board.place(0, 1, Mark::X);
        assert_eq!(check_winner(&board), None);
    }
}
