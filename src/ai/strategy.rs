use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::greedy::GreedyStrategy;
use super::minimax::MinimaxStrategy;
use super::random::RandomStrategy;
use crate::config::AiConfig;
use crate::game::{Game, Side};

/// Universal interface for computer opponents.
///
/// Implementations may place and clear pieces on `game` while thinking, but
/// must leave it exactly as they found it. They are not re-entrant: one
/// search per game at a time.
pub trait MoveSelector {
    /// Pick a column for `side` to play.
    ///
    /// # Panics
    ///
    /// Panics if the board has no open column.
    fn select_move(&self, game: &mut Game, side: Side) -> usize;

    /// Return the strategy's display name.
    fn name(&self) -> &str;
}

/// Strength of a computer player.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Difficulty {
    #[serde(alias = "easy")]
    Easy,
    #[serde(alias = "medium")]
    Medium,
    #[serde(alias = "hard")]
    Hard,
}

impl Difficulty {
    pub const ALL: [Difficulty; 3] = [Difficulty::Easy, Difficulty::Medium, Difficulty::Hard];

    pub fn name(self) -> &'static str {
        match self {
            Difficulty::Easy => "Easy",
            Difficulty::Medium => "Medium",
            Difficulty::Hard => "Hard",
        }
    }
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Difficulty {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Difficulty::ALL
            .into_iter()
            .find(|d| d.name().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| s.to_string())
    }
}

/// A difficulty resolved into the strategy that plays it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Strategy {
    Easy(RandomStrategy),
    Medium(GreedyStrategy),
    Hard(MinimaxStrategy),
}

impl Strategy {
    pub fn new(difficulty: Difficulty, config: AiConfig) -> Self {
        match difficulty {
            Difficulty::Easy => Strategy::Easy(RandomStrategy),
            Difficulty::Medium => Strategy::Medium(GreedyStrategy),
            Difficulty::Hard => Strategy::Hard(MinimaxStrategy::new(config)),
        }
    }

    pub fn difficulty(&self) -> Difficulty {
        match self {
            Strategy::Easy(_) => Difficulty::Easy,
            Strategy::Medium(_) => Difficulty::Medium,
            Strategy::Hard(_) => Difficulty::Hard,
        }
    }
}

impl MoveSelector for Strategy {
    fn select_move(&self, game: &mut Game, side: Side) -> usize {
        match self {
            Strategy::Easy(s) => s.select_move(game, side),
            Strategy::Medium(s) => s.select_move(game, side),
            Strategy::Hard(s) => s.select_move(game, side),
        }
    }

    fn name(&self) -> &str {
        match self {
            Strategy::Easy(s) => s.name(),
            Strategy::Medium(s) => s.name(),
            Strategy::Hard(s) => s.name(),
        }
    }
}
