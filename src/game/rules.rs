//! Move legality checks shared by input validation and the strategies.

use super::state::Game;
use crate::error::MoveError;

/// Whether `column` addresses a column of the board at all.
pub fn is_valid_column(game: &Game, column: usize) -> bool {
    column < game.board().width()
}

/// Whether `column` cannot take a piece. Invalid columns count as full.
pub fn is_column_full(game: &Game, column: usize) -> bool {
    !is_valid_column(game, column) || game.board().is_column_full(column)
}

/// Check a requested column before trusting it.
///
/// The error's `Display` is the reason to show the player.
pub fn validate_move(game: &Game, column: usize) -> Result<(), MoveError> {
    if !is_valid_column(game, column) {
        return Err(MoveError::InvalidColumn {
            column,
            width: game.board().width(),
        });
    }
    if is_column_full(game, column) {
        return Err(MoveError::ColumnFull { column });
    }
    Ok(())
}

/// Parse 1-based column input typed by a person and validate it.
pub fn parse_column(game: &Game, input: &str) -> Result<usize, String> {
    let number: usize = input
        .trim()
        .parse()
        .map_err(|_| format!("'{}' is not a column number", input.trim()))?;
    let column = number.checked_sub(1).ok_or_else(|| {
        MoveError::InvalidColumn {
            column: 0,
            width: game.board().width(),
        }
        .to_string()
    })?;
    validate_move(game, column).map_err(|e| e.to_string())?;
    Ok(column)
}
