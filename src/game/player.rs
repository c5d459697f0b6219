use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::board::Cell;
use super::state::Game;
use crate::ai::{Difficulty, MoveSelector, Strategy};
use crate::config::AiConfig;

/// Which of the two seats a piece or turn belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Side {
    First,
    Second,
}

impl Side {
    /// Get the other side
    pub fn other(self) -> Side {
        match self {
            Side::First => Side::Second,
            Side::Second => Side::First,
        }
    }

    /// Convert side to cell type
    pub fn to_cell(self) -> Cell {
        match self {
            Side::First => Cell::First,
            Side::Second => Cell::Second,
        }
    }

    pub(crate) fn index(self) -> usize {
        match self {
            Side::First => 0,
            Side::Second => 1,
        }
    }
}

/// Display color for a player's pieces.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PlayerColor {
    Red,
    Yellow,
    Blue,
    Green,
    Magenta,
    Cyan,
    White,
}

impl PlayerColor {
    pub const ALL: [PlayerColor; 7] = [
        PlayerColor::Red,
        PlayerColor::Yellow,
        PlayerColor::Blue,
        PlayerColor::Green,
        PlayerColor::Magenta,
        PlayerColor::Cyan,
        PlayerColor::White,
    ];

    pub fn name(self) -> &'static str {
        match self {
            PlayerColor::Red => "Red",
            PlayerColor::Yellow => "Yellow",
            PlayerColor::Blue => "Blue",
            PlayerColor::Green => "Green",
            PlayerColor::Magenta => "Magenta",
            PlayerColor::Cyan => "Cyan",
            PlayerColor::White => "White",
        }
    }
}

impl fmt::Display for PlayerColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for PlayerColor {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        PlayerColor::ALL
            .into_iter()
            .find(|c| c.name().eq_ignore_ascii_case(s))
            .ok_or_else(|| s.to_string())
    }
}

/// A participant: name and color for display, plus an optional computer
/// strategy bound once at construction.
#[derive(Debug, Clone, PartialEq)]
pub struct Player {
    name: String,
    color: PlayerColor,
    strategy: Option<Strategy>,
}

impl Player {
    pub fn new(
        name: impl Into<String>,
        color: PlayerColor,
        difficulty: Option<Difficulty>,
        ai_config: &AiConfig,
    ) -> Self {
        Player {
            name: name.into(),
            color,
            strategy: difficulty.map(|d| Strategy::new(d, *ai_config)),
        }
    }

    /// A human-controlled player.
    pub fn human(name: impl Into<String>, color: PlayerColor) -> Self {
        Player {
            name: name.into(),
            color,
            strategy: None,
        }
    }

    /// A computer-controlled player.
    pub fn computer(
        name: impl Into<String>,
        color: PlayerColor,
        difficulty: Difficulty,
        ai_config: &AiConfig,
    ) -> Self {
        Self::new(name, color, Some(difficulty), ai_config)
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn color(&self) -> PlayerColor {
        self.color
    }

    pub fn is_ai(&self) -> bool {
        self.strategy.is_some()
    }

    pub fn difficulty(&self) -> Option<Difficulty> {
        self.strategy.map(|s| s.difficulty())
    }

    pub fn strategy(&self) -> Option<Strategy> {
        self.strategy
    }

    /// Ask this player's strategy for a column in `game`.
    ///
    /// # Panics
    ///
    /// Panics if the player is human, if the player does not take part in
    /// `game`, or if the board has no open column.
    pub fn get_ai_move(&self, game: &mut Game) -> usize {
        let strategy = self
            .strategy
            .unwrap_or_else(|| panic!("{} is not a computer player", self.name));
        let side = game
            .side_of(&self.name)
            .unwrap_or_else(|| panic!("{} does not play in this game", self.name));
        strategy.select_move(game, side)
    }
}
