//! Win detection logic for tic-tac-toe.

use super::super::types::{Board, Seat, Square};
use tracing::instrument;

/// Checks whether the move at (`row`, `col`) completed a line for `seat`.
///
/// Only lines through the moved square can have changed, so only the row,
/// the column, and whichever diagonals contain the square are scanned.
/// Row and column scans start at the moved square and wrap around.
#[instrument(skip(board))]
pub fn detect_winner(board: &Board, row: usize, col: usize, seat: Seat) -> bool {
    let rows = board.rows();
    let columns = board.columns();
    if row >= rows || col >= columns {
        return false;
    }

    let mark = Square::Occupied(seat);
    let owns = |r: usize, c: usize| board.get(r, c) == Some(mark);

    if (0..columns).all(|step| owns(row, (col + step) % columns)) {
        return true;
    }

    if (0..rows).all(|step| owns((row + step) % rows, col)) {
        return true;
    }

    // Diagonals only exist on square boards.
    if rows != columns {
        return false;
    }
    let dimension = rows;

    if row == col && (0..dimension).all(|i| owns(i, i)) {
        return true;
    }

    row + col == dimension - 1 && (0..dimension).all(|i| owns(i, dimension - 1 - i))
}

#[cfg(test)]
mod tests {
    use super::*;

    const LINES: [[(usize, usize); 3]; 8] = [
        [(0, 0), (0, 1), (0, 2)],
        [(1, 0), (1, 1), (1, 2)],
        [(2, 0), (2, 1), (2, 2)],
        [(0, 0), (1, 0), (2, 0)],
        [(0, 1), (1, 1), (2, 1)],
        [(0, 2), (1, 2), (2, 2)],
        [(0, 0), (1, 1), (2, 2)],
        [(0, 2), (1, 1), (2, 0)],
    ];

    fn board_from_code(mut code: u32) -> Board {
        let mut board = Board::new(3, 3);
        for i in 0..9 {
            match code % 3 {
                1 => {
                    board.claim(i / 3, i % 3, Seat::First);
                }
                2 => {
                    board.claim(i / 3, i % 3, Seat::Second);
                }
                _ => {}
            }
            code /= 3;
        }
        board
    }

    fn brute_force(board: &Board, row: usize, col: usize, seat: Seat) -> bool {
        LINES.iter().any(|line| {
            line.contains(&(row, col))
                && line
                    .iter()
                    .all(|&(r, c)| board.get(r, c) == Some(Square::Occupied(seat)))
        })
    }

    #[test]
    fn test_no_winner_empty_board() {
        let board = Board::new(3, 3);
        assert!(!detect_winner(&board, 1, 1, Seat::First));
    }

    #[test]
    fn test_winner_top_row_from_any_square() {
        let mut board = Board::new(3, 3);
        for col in 0..3 {
            board.claim(0, col, Seat::First);
        }
        for col in 0..3 {
            assert!(detect_winner(&board, 0, col, Seat::First));
            assert!(!detect_winner(&board, 0, col, Seat::Second));
        }
    }

    #[test]
    fn test_winner_anti_diagonal() {
        let mut board = Board::new(3, 3);
        board.claim(0, 2, Seat::Second);
        board.claim(1, 1, Seat::Second);
        board.claim(2, 0, Seat::Second);
        assert!(detect_winner(&board, 2, 0, Seat::Second));
        assert!(detect_winner(&board, 1, 1, Seat::Second));
    }

    #[test]
    fn test_off_diagonal_square_ignores_diagonals() {
        let mut board = Board::new(3, 3);
        board.claim(0, 0, Seat::First);
        board.claim(1, 1, Seat::First);
        board.claim(2, 2, Seat::First);
        board.claim(0, 1, Seat::First);
        assert!(!detect_winner(&board, 0, 1, Seat::Second));
        assert!(detect_winner(&board, 2, 2, Seat::First));
    }

    #[test]
    fn test_matches_line_scan_on_every_board() {
        for code in 0..3u32.pow(9) {
            let board = board_from_code(code);
            for row in 0..3 {
                for col in 0..3 {
                    if let Some(Square::Occupied(seat)) = board.get(row, col) {
                        assert_eq!(
                            detect_winner(&board, row, col, seat),
                            brute_force(&board, row, col, seat),
                            "board {code} at ({row},{col})\n{}",
                            board.display()
                        );
                    }
                }
            }
        }
    }
}
