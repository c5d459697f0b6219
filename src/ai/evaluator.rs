use crate::config::AiConfig;
use crate::game::lines::DIRECTIONS;
use crate::game::{Board, Game, Side};

/// Static score of a position from one side's point of view.
///
/// Pure function of the board: safe to call on half-searched positions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PositionEvaluator {
    center_score: i32,
    three_score: i32,
    two_score: i32,
    one_score: i32,
}

impl PositionEvaluator {
    pub fn new(config: &AiConfig) -> Self {
        PositionEvaluator {
            center_score: config.center_score,
            three_score: config.three_score,
            two_score: config.two_score,
            one_score: config.one_score,
        }
    }

    pub fn evaluate_game(&self, game: &Game, side: Side) -> i32 {
        self.evaluate(game.board(), game.winning_length(), side)
    }

    /// Center-column control plus the difference between both sides' open
    /// windows of `winning_length` cells.
    pub fn evaluate(&self, board: &Board, winning_length: usize, side: Side) -> i32 {
        let own = side.to_cell();
        let center = board.width() / 2;

        let mut score = 0;
        for row in 0..board.height() {
            let cell = board.get(row as isize, center as isize);
            if cell == own {
                score += self.center_score;
            } else if !cell.is_empty() {
                score -= self.center_score;
            }
        }

        score + self.line_score(board, winning_length, side)
            - self.line_score(board, winning_length, side.other())
    }

    fn line_score(&self, board: &Board, winning_length: usize, side: Side) -> i32 {
        let mut score = 0;
        for row in 0..board.height() {
            for col in 0..board.width() {
                for &(dr, dc) in &DIRECTIONS {
                    if let Some(pieces) = window_pieces(board, row, col, dr, dc, winning_length, side) {
                        score += self.window_score(pieces);
                    }
                }
            }
        }
        score
    }

    fn window_score(&self, pieces: usize) -> i32 {
        match pieces {
            0 => 0,
            1 => self.one_score,
            2 => self.two_score,
            _ => self.three_score,
        }
    }
}

/// Count `side`'s pieces in the window of `len` cells starting at
/// `(row, col)`. `None` if the window leaves the board or holds an opposing
/// piece.
fn window_pieces(
    board: &Board,
    row: usize,
    col: usize,
    dr: isize,
    dc: isize,
    len: usize,
    side: Side,
) -> Option<usize> {
    let span = len as isize - 1;
    let end_row = row as isize + dr * span;
    if end_row < 0 || end_row >= board.height() as isize {
        return None;
    }
    if dc != 0 {
        if board.shape().wraps() {
            // Only a horizontal window can cover a cell twice.
            if dr == 0 && len > board.width() {
                return None;
            }
        } else {
            let end_col = col as isize + dc * span;
            if end_col < 0 || end_col >= board.width() as isize {
                return None;
            }
        }
    }

    let own = side.to_cell();
    let mut pieces = 0;
    for i in 0..len as isize {
        let cell = board.get(row as isize + dr * i, col as isize + dc * i);
        if cell == own {
            pieces += 1;
        } else if !cell.is_empty() {
            return None;
        }
    }
    Some(pieces)
}
