//! Core connect-N game logic: grid, legality checks, line detection, players,
//! the game state machine, and its flat snapshot form.

mod board;
pub mod lines;
mod player;
pub mod rules;
mod snapshot;
mod state;

pub use board::{Board, Cell, Shape};
pub use player::{Player, PlayerColor, Side};
pub use snapshot::{GameSnapshot, PlayerSnapshot};
pub use state::{Game, GameOutcome};
