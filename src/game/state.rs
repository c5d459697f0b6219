use super::board::{Board, Shape};
use super::lines;
use super::player::{Player, Side};
use crate::ai::MoveSelector;
use crate::error::{GameError, MoveError};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameOutcome {
    Winner(Side),
    Draw,
}

/// One game of connect-N: the board, both players, whose turn it is, and the
/// result once there is one.
///
/// A finished game stays finished; every further move is rejected.
#[derive(Debug, Clone, PartialEq)]
pub struct Game {
    board: Board,
    players: [Player; 2],
    current_player: Side,
    winning_length: usize,
    outcome: Option<GameOutcome>,
}

impl Game {
    /// Create a game in progress with `starting` to move.
    pub fn new(
        player1: Player,
        player2: Player,
        height: usize,
        width: usize,
        shape: Shape,
        winning_length: usize,
        starting: Side,
    ) -> Result<Self, GameError> {
        if height == 0 || width == 0 {
            return Err(GameError::EmptyBoard { height, width });
        }
        if winning_length < 2 {
            return Err(GameError::WinningLengthTooShort(winning_length));
        }
        if player1.name() == player2.name() {
            return Err(GameError::DuplicatePlayerName(player1.name().to_string()));
        }

        Ok(Game {
            board: Board::new(height, width, shape),
            players: [player1, player2],
            current_player: starting,
            winning_length,
            outcome: None,
        })
    }

    /// Get reference to board
    pub fn board(&self) -> &Board {
        &self.board
    }

    /// Search strategies place and retract pieces directly.
    pub(crate) fn board_mut(&mut self) -> &mut Board {
        &mut self.board
    }

    pub fn player(&self, side: Side) -> &Player {
        &self.players[side.index()]
    }

    pub fn player1(&self) -> &Player {
        self.player(Side::First)
    }

    pub fn player2(&self) -> &Player {
        self.player(Side::Second)
    }

    /// Side whose player carries `name`.
    pub fn side_of(&self, name: &str) -> Option<Side> {
        [Side::First, Side::Second]
            .into_iter()
            .find(|&side| self.player(side).name() == name)
    }

    /// Side to move
    pub fn current_player(&self) -> Side {
        self.current_player
    }

    /// Player entity whose turn it is
    pub fn current(&self) -> &Player {
        self.player(self.current_player)
    }

    /// The side opposing `side`.
    pub fn opponent(&self, side: Side) -> Side {
        side.other()
    }

    pub fn winning_length(&self) -> usize {
        self.winning_length
    }

    /// Get game outcome if game is over
    pub fn outcome(&self) -> Option<GameOutcome> {
        self.outcome
    }

    pub fn is_over(&self) -> bool {
        self.outcome.is_some()
    }

    pub fn winner(&self) -> Option<Side> {
        match self.outcome {
            Some(GameOutcome::Winner(side)) => Some(side),
            _ => None,
        }
    }

    pub fn is_draw(&self) -> bool {
        self.outcome == Some(GameOutcome::Draw)
    }

    /// Columns that still accept a piece. Empty once the game is over.
    pub fn legal_columns(&self) -> Vec<usize> {
        if self.is_over() {
            return Vec::new();
        }
        self.board.open_columns()
    }

    /// Number of pieces on the board.
    pub fn move_count(&self) -> usize {
        self.board.piece_count()
    }

    /// Whether `side` would complete a line with a piece at `(row, col)`.
    /// The cell is treated as holding `side`'s piece.
    pub fn would_win(&self, row: usize, col: usize, side: Side) -> bool {
        lines::would_win(&self.board, row, col, side, self.winning_length)
    }

    /// Drop the current player's piece into `column`.
    ///
    /// Returns the row the piece landed in. A rejected move changes nothing.
    pub fn make_move(&mut self, column: usize) -> Result<usize, MoveError> {
        if self.is_over() {
            return Err(MoveError::GameOver);
        }

        let mover = self.current_player;
        let row = self.board.drop_piece(column, mover)?;

        if self.would_win(row, column, mover) {
            self.outcome = Some(GameOutcome::Winner(mover));
        } else if self.board.is_full() {
            self.outcome = Some(GameOutcome::Draw);
        } else {
            self.current_player = mover.other();
        }

        Ok(row)
    }

    /// Ask the current player's strategy for a column.
    ///
    /// # Panics
    ///
    /// Panics if the current player is human or no column is open.
    pub fn ai_move(&mut self) -> usize {
        let side = self.current_player;
        let strategy = self.player(side).strategy().unwrap_or_else(|| {
            panic!("{} is not a computer player", self.player(side).name())
        });
        strategy.select_move(self, side)
    }

    /// Rebuild the turn pointer and result from a saved game.
    pub(crate) fn restore_progress(&mut self, current: Side, outcome: Option<GameOutcome>) {
        self.current_player = current;
        self.outcome = outcome;
    }
}
