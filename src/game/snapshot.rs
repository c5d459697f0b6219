//! Flat, serializable form of a complete game.
//!
//! Storage back-ends only ever see [`GameSnapshot`]. Players are keyed by name,
//! so a snapshot names each cell's owner instead of carrying side tokens.

use serde::{Deserialize, Serialize};

use super::board::{Cell, Shape};
use super::player::{Player, PlayerColor, Side};
use super::state::{Game, GameOutcome};
use crate::ai::Difficulty;
use crate::config::AiConfig;
use crate::error::SnapshotError;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerSnapshot {
    pub name: String,
    pub color: String,
    pub is_ai: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ai_difficulty: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameSnapshot {
    pub player1: PlayerSnapshot,
    pub player2: PlayerSnapshot,
    pub board_height: usize,
    pub board_width: usize,
    pub board_shape: String,
    pub winning_length: usize,
    pub current_player_name: String,
    pub is_over: bool,
    #[serde(default)]
    pub winner_name: Option<String>,
    /// Row-major owner names, empty string for an unoccupied cell.
    pub board_cells: Vec<Vec<String>>,
}

impl PlayerSnapshot {
    fn from_player(player: &Player) -> Self {
        PlayerSnapshot {
            name: player.name().to_string(),
            color: player.color().name().to_string(),
            is_ai: player.is_ai(),
            ai_difficulty: player.difficulty().map(|d| d.name().to_string()),
        }
    }

    fn to_player(&self, ai_config: &AiConfig) -> Result<Player, SnapshotError> {
        let color: PlayerColor = self
            .color
            .parse()
            .map_err(SnapshotError::UnknownColor)?;
        let difficulty = if self.is_ai {
            let tag = self.ai_difficulty.as_deref().unwrap_or_default();
            Some(
                tag.parse::<Difficulty>()
                    .map_err(|_| SnapshotError::UnknownDifficulty(tag.to_string()))?,
            )
        } else {
            None
        };
        Ok(Player::new(self.name.clone(), color, difficulty, ai_config))
    }
}

impl GameSnapshot {
    /// Capture every observable part of `game`.
    pub fn from_game(game: &Game) -> Self {
        let board = game.board();
        let board_cells = (0..board.height())
            .map(|row| {
                (0..board.width())
                    .map(|col| match board.get(row as isize, col as isize).side() {
                        Some(side) => game.player(side).name().to_string(),
                        None => String::new(),
                    })
                    .collect()
            })
            .collect();

        GameSnapshot {
            player1: PlayerSnapshot::from_player(game.player1()),
            player2: PlayerSnapshot::from_player(game.player2()),
            board_height: board.height(),
            board_width: board.width(),
            board_shape: board.shape().name().to_string(),
            winning_length: game.winning_length(),
            current_player_name: game.current().name().to_string(),
            is_over: game.is_over(),
            winner_name: game.winner().map(|side| game.player(side).name().to_string()),
            board_cells,
        }
    }

    /// Rebuild the game this snapshot describes. Computer players get fresh
    /// strategies bound to `ai_config`.
    pub fn restore(&self, ai_config: &AiConfig) -> Result<Game, SnapshotError> {
        let shape: Shape = self
            .board_shape
            .parse()
            .map_err(SnapshotError::UnknownShape)?;
        let player1 = self.player1.to_player(ai_config)?;
        let player2 = self.player2.to_player(ai_config)?;

        let rows = self.board_cells.len();
        let ragged = self.board_cells.iter().find(|r| r.len() != self.board_width);
        if rows != self.board_height || ragged.is_some() {
            return Err(SnapshotError::CellDimensions {
                rows,
                cols: ragged.map_or(self.board_width, Vec::len),
                height: self.board_height,
                width: self.board_width,
            });
        }

        let mut game = Game::new(
            player1,
            player2,
            self.board_height,
            self.board_width,
            shape,
            self.winning_length,
            Side::First,
        )?;

        let side_named = |game: &Game, name: &str| {
            game.side_of(name)
                .ok_or_else(|| SnapshotError::UnknownPlayer(name.to_string()))
        };

        for (row, cells) in self.board_cells.iter().enumerate() {
            for (col, owner) in cells.iter().enumerate() {
                let cell = if owner.is_empty() {
                    Cell::Empty
                } else {
                    side_named(&game, owner)?.to_cell()
                };
                game.board_mut().set(row as isize, col as isize, cell);
            }
        }

        if !self.is_over {
            check_still_playable(&game)?;
        }

        let current = side_named(&game, &self.current_player_name)?;
        let outcome = match (&self.winner_name, self.is_over) {
            (Some(name), true) => Some(GameOutcome::Winner(side_named(&game, name)?)),
            (Some(name), false) => return Err(SnapshotError::WinnerWithoutGameOver(name.clone())),
            (None, true) => Some(GameOutcome::Draw),
            (None, false) => None,
        };
        game.restore_progress(current, outcome);

        Ok(game)
    }
}

/// An unfinished game must have a column left and no completed line.
fn check_still_playable(game: &Game) -> Result<(), SnapshotError> {
    let board = game.board();
    if board.is_full() {
        return Err(SnapshotError::FullBoardNotOver);
    }
    for row in 0..board.height() {
        for col in 0..board.width() {
            let Some(side) = board.get(row as isize, col as isize).side() else {
                continue;
            };
            if game.would_win(row, col, side) {
                return Err(SnapshotError::LineWithoutGameOver(
                    game.player(side).name().to_string(),
                ));
            }
        }
    }
    Ok(())
}
