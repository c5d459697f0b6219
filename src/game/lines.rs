//! Line detection around a freshly placed piece.

use super::board::Board;
use super::player::Side;

/// The four line axes as `(d_row, d_col)` steps: horizontal, vertical, and the
/// two diagonals. Each axis is walked in both directions.
pub const DIRECTIONS: [(isize, isize); 4] = [(0, 1), (1, 0), (1, 1), (1, -1)];

/// Check whether the piece at `(row, col)` completes a line of
/// `winning_length` for `side`.
///
/// The cell itself is counted as belonging to `side` whatever it currently
/// holds, so this works both after a real move and for a hypothetical one.
pub fn would_win(board: &Board, row: usize, col: usize, side: Side, winning_length: usize) -> bool {
    DIRECTIONS
        .iter()
        .any(|&(dr, dc)| run_length(board, row, col, dr, dc, side, winning_length) >= winning_length)
}

/// Length of the contiguous run of `side` through `(row, col)` along one axis,
/// stopping once `limit` is reached.
fn run_length(
    board: &Board,
    row: usize,
    col: usize,
    dr: isize,
    dc: isize,
    side: Side,
    limit: usize,
) -> usize {
    // A wrapped horizontal run can cover each column of the row at most once.
    // Diagonals change row every step, so their cells are always distinct.
    let cap = if dr == 0 && dc != 0 && board.shape().wraps() {
        limit.min(board.width())
    } else {
        limit
    };

    let forward = count_direction(board, row, col, dr, dc, side, cap.saturating_sub(1));
    let backward = count_direction(board, row, col, -dr, -dc, side, cap.saturating_sub(1 + forward));
    1 + forward + backward
}

fn count_direction(
    board: &Board,
    row: usize,
    col: usize,
    dr: isize,
    dc: isize,
    side: Side,
    max_steps: usize,
) -> usize {
    let target = side.to_cell();
    let mut r = row as isize + dr;
    let mut c = col as isize + dc;
    let mut count = 0;
    while count < max_steps && board.get(r, c) == target {
        count += 1;
        r += dr;
        c += dc;
    }
    count
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::{Cell, Shape};

    fn place_row(board: &mut Board, row: isize, cols: &[isize], cell: Cell) {
        for &c in cols {
            board.set(row, c, cell);
        }
    }

    #[test]
    fn test_horizontal_win() {
        let mut board = Board::new(6, 7, Shape::Rectangle);
        for col in 0..4 {
            board.drop_piece(col, Side::First).unwrap();
        }
        assert!(would_win(&board, 5, 2, Side::First, 4)); // Check middle of the line
        assert!(!would_win(&board, 5, 2, Side::Second, 4));
    }

    #[test]
    fn test_vertical_win() {
        let mut board = Board::new(6, 7, Shape::Rectangle);
        for _ in 0..4 {
            board.drop_piece(3, Side::Second).unwrap();
        }
        assert!(would_win(&board, 2, 3, Side::Second, 4)); // Check the 4th piece
    }

    #[test]
    fn test_diagonal_up_win() {
        let mut board = Board::new(6, 7, Shape::Rectangle);
        board.drop_piece(0, Side::First).unwrap();

        board.drop_piece(1, Side::Second).unwrap();
        board.drop_piece(1, Side::First).unwrap();

        board.drop_piece(2, Side::Second).unwrap();
        board.drop_piece(2, Side::Second).unwrap();
        board.drop_piece(2, Side::First).unwrap();

        board.drop_piece(3, Side::Second).unwrap();
        board.drop_piece(3, Side::Second).unwrap();
        board.drop_piece(3, Side::Second).unwrap();
        let row = board.drop_piece(3, Side::First).unwrap();

        assert!(would_win(&board, row, 3, Side::First, 4));
    }

    #[test]
    fn test_diagonal_down_win() {
        let mut board = Board::new(6, 7, Shape::Rectangle);
        board.drop_piece(6, Side::First).unwrap();

        board.drop_piece(5, Side::Second).unwrap();
        board.drop_piece(5, Side::First).unwrap();

        board.drop_piece(4, Side::Second).unwrap();
        board.drop_piece(4, Side::Second).unwrap();
        board.drop_piece(4, Side::First).unwrap();

        board.drop_piece(3, Side::Second).unwrap();
        board.drop_piece(3, Side::Second).unwrap();
        board.drop_piece(3, Side::Second).unwrap();
        let row = board.drop_piece(3, Side::First).unwrap();

        assert!(would_win(&board, row, 3, Side::First, 4));
    }

    #[test]
    fn test_no_win_with_three() {
        let mut board = Board::new(6, 7, Shape::Rectangle);
        for col in 0..3 {
            board.drop_piece(col, Side::First).unwrap();
        }
        assert!(!would_win(&board, 5, 1, Side::First, 4)); // Only 3 in a row
        assert!(would_win(&board, 5, 1, Side::First, 3));
    }

    #[test]
    fn test_hypothetical_cell_counts_for_side() {
        let mut board = Board::new(6, 7, Shape::Rectangle);
        for col in 0..3 {
            board.drop_piece(col, Side::First).unwrap();
        }
        // (5, 3) is still empty; the check treats it as the candidate piece.
        assert!(would_win(&board, 5, 3, Side::First, 4));
    }

    #[test]
    fn test_cylinder_wraps_horizontal_line() {
        let mut cylinder = Board::new(6, 7, Shape::Cylinder);
        place_row(&mut cylinder, 5, &[5, 6, 0, 1], Cell::First);
        assert!(would_win(&cylinder, 5, 0, Side::First, 4));
        assert!(would_win(&cylinder, 5, 6, Side::First, 4));

        let mut rectangle = Board::new(6, 7, Shape::Rectangle);
        place_row(&mut rectangle, 5, &[5, 6, 0, 1], Cell::First);
        assert!(!would_win(&rectangle, 5, 0, Side::First, 4));
        assert!(!would_win(&rectangle, 5, 6, Side::First, 4));
    }

    #[test]
    fn test_cylinder_wraps_diagonal_line() {
        let mut board = Board::new(6, 7, Shape::Cylinder);
        // Rising diagonal that crosses the seam between columns 6 and 0.
        board.set(5, 5, Cell::Second);
        board.set(4, 6, Cell::Second);
        board.set(3, 0, Cell::Second);
        board.set(2, 1, Cell::Second);
        assert!(would_win(&board, 3, 0, Side::Second, 4));
    }

    #[test]
    fn test_narrow_cylinder_counts_each_cell_once() {
        let mut board = Board::new(3, 3, Shape::Cylinder);
        place_row(&mut board, 2, &[0, 1, 2], Cell::First);
        assert!(would_win(&board, 2, 1, Side::First, 3));
        assert!(!would_win(&board, 2, 1, Side::First, 4));
    }

    #[test]
    fn test_narrow_cylinder_diagonal_wins() {
        let mut board = Board::new(6, 3, Shape::Cylinder);
        // Rising diagonal that wraps past column 2 back to column 0.
        board.set(5, 0, Cell::First);
        board.set(4, 1, Cell::First);
        board.set(3, 2, Cell::First);
        board.set(2, 0, Cell::First);
        assert!(would_win(&board, 2, 0, Side::First, 4));
        assert!(would_win(&board, 5, 0, Side::First, 4));

        // The same row still cannot reach 4 with only 3 columns.
        let mut row = Board::new(6, 3, Shape::Cylinder);
        place_row(&mut row, 5, &[0, 1, 2], Cell::First);
        assert!(!would_win(&row, 5, 0, Side::First, 4));
    }

    #[test]
    fn test_rows_do_not_wrap() {
        let mut board = Board::new(4, 4, Shape::Cylinder);
        board.set(0, 0, Cell::First);
        board.set(3, 0, Cell::First);
        board.set(2, 0, Cell::First);
        assert!(!would_win(&board, 3, 0, Side::First, 3));
    }
}
