use super::random::random_column;
use super::strategy::MoveSelector;
use super::center_out;
use crate::game::{Cell, Game, Side};

/// One-ply lookahead: win if possible, otherwise block, otherwise take the
/// column closest to the center.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct GreedyStrategy;

/// First column (left to right) where a piece for `side` completes a line.
///
/// Each candidate is placed, checked, and cleared again, so `game` is
/// unchanged on return.
pub fn find_winning_move(game: &mut Game, side: Side) -> Option<usize> {
    (0..game.board().width()).find(|&col| {
        let Some(row) = game.board().lowest_empty_row(col) else {
            return false;
        };
        let (r, c) = (row as isize, col as isize);
        game.board_mut().set(r, c, side.to_cell());
        let wins = game.would_win(row, col, side);
        game.board_mut().set(r, c, Cell::Empty);
        wins
    })
}

/// The open column nearest the center, preferring the left neighbour on ties.
pub fn center_move(game: &Game) -> Option<usize> {
    let board = game.board();
    center_out(board.width()).find(|&col| !board.is_column_full(col))
}

impl MoveSelector for GreedyStrategy {
    fn select_move(&self, game: &mut Game, side: Side) -> usize {
        if let Some(col) = find_winning_move(game, side) {
            return col;
        }
        if let Some(col) = find_winning_move(game, side.other()) {
            return col;
        }
        if let Some(col) = center_move(game) {
            return col;
        }
        random_column(game.board(), &mut rand::rng())
    }

    fn name(&self) -> &str {
        "Medium"
    }
}
