use std::path::{Path, PathBuf};

use rand::Rng;
use tracing::warn;

use crate::ai::Difficulty;
use crate::error::{ConfigError, GameError};
use crate::game::{Game, Player, PlayerColor, Shape, Side};

pub const MIN_BOARD_SIZE: usize = 3;
pub const MAX_BOARD_SIZE: usize = 20;
pub const MIN_WINNING_LENGTH: usize = 2;

/// Top-level application configuration, loadable from TOML.
#[derive(Debug, Clone, Default, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub game: GameSettings,
    pub ai: AiConfig,
    pub storage: StorageConfig,
}

/// Tunable numbers for the position evaluator and the search.
///
/// Only the ordering `three_score > two_score > one_score > center_score`
/// matters for play quality; the exact values are hand-picked.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct AiConfig {
    pub center_score: i32,
    pub three_score: i32,
    pub two_score: i32,
    pub one_score: i32,
    pub win_score: i32,
    pub small_board_cells: usize,
    pub small_board_depth: usize,
    pub medium_board_cells: usize,
    pub medium_board_depth: usize,
    pub large_board_depth: usize,
}

impl Default for AiConfig {
    fn default() -> Self {
        AiConfig {
            center_score: 3,
            three_score: 100,
            two_score: 10,
            one_score: 1,
            win_score: 1_000_000,
            small_board_cells: 49,
            small_board_depth: 6,
            medium_board_cells: 100,
            medium_board_depth: 4,
            large_board_depth: 3,
        }
    }
}

impl AiConfig {
    /// Search depth for a board with `cells` cells. Bigger boards search
    /// shallower.
    pub fn search_depth(&self, cells: usize) -> usize {
        if cells <= self.small_board_cells {
            self.small_board_depth
        } else if cells <= self.medium_board_cells {
            self.medium_board_depth
        } else {
            self.large_board_depth
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StartingPlayer {
    #[default]
    First,
    Second,
    Random,
}

#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct PlayerSettings {
    pub name: String,
    pub color: PlayerColor,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ai: Option<Difficulty>,
}

impl PlayerSettings {
    pub fn to_player(&self, ai_config: &AiConfig) -> Player {
        Player::new(self.name.clone(), self.color, self.ai, ai_config)
    }
}

/// Settings for new games.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct GameSettings {
    pub height: usize,
    pub width: usize,
    pub shape: Shape,
    pub winning_length: usize,
    pub starting_player: StartingPlayer,
    pub player1: PlayerSettings,
    pub player2: PlayerSettings,
}

impl Default for GameSettings {
    fn default() -> Self {
        GameSettings {
            height: 6,
            width: 7,
            shape: Shape::Rectangle,
            winning_length: 4,
            starting_player: StartingPlayer::First,
            player1: PlayerSettings {
                name: "Deep Blue".to_string(),
                color: PlayerColor::Red,
                ai: None,
            },
            player2: PlayerSettings {
                name: "Watson".to_string(),
                color: PlayerColor::Yellow,
                ai: Some(Difficulty::Medium),
            },
        }
    }
}

impl GameSettings {
    /// Start a fresh game from these settings.
    pub fn new_game(&self, ai_config: &AiConfig) -> Result<Game, GameError> {
        let starting = match self.starting_player {
            StartingPlayer::First => Side::First,
            StartingPlayer::Second => Side::Second,
            StartingPlayer::Random => {
                if rand::rng().random_bool(0.5) {
                    Side::First
                } else {
                    Side::Second
                }
            }
        };
        Game::new(
            self.player1.to_player(ai_config),
            self.player2.to_player(ai_config),
            self.height,
            self.width,
            self.shape,
            self.winning_length,
            starting,
        )
    }
}

/// Where saved games live.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct StorageConfig {
    pub save_dir: PathBuf,
}

impl Default for StorageConfig {
    fn default() -> Self {
        StorageConfig {
            save_dir: PathBuf::from("saves"),
        }
    }
}

impl AppConfig {
    /// Load configuration from a TOML file.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::FileRead {
            path: path.to_path_buf(),
            source: e,
        })?;
        let config: AppConfig = toml::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from a TOML file, falling back to defaults if the file
    /// does not exist.
    pub fn load_or_default(path: &Path) -> Result<Self, ConfigError> {
        if path.exists() {
            Self::load(path)
        } else {
            warn!("config file '{}' not found, using defaults", path.display());
            Ok(Self::default())
        }
    }

    /// Validate configuration values.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let game = &self.game;
        let ai = &self.ai;

        let board_range = MIN_BOARD_SIZE..=MAX_BOARD_SIZE;
        if !board_range.contains(&game.height) {
            return Err(ConfigError::Validation(format!(
                "game.height must be in [{MIN_BOARD_SIZE}, {MAX_BOARD_SIZE}]"
            )));
        }
        if !board_range.contains(&game.width) {
            return Err(ConfigError::Validation(format!(
                "game.width must be in [{MIN_BOARD_SIZE}, {MAX_BOARD_SIZE}]"
            )));
        }
        if game.winning_length < MIN_WINNING_LENGTH {
            return Err(ConfigError::Validation(format!(
                "game.winning_length must be >= {MIN_WINNING_LENGTH}"
            )));
        }
        if game.winning_length > game.height.max(game.width) {
            return Err(ConfigError::Validation(
                "game.winning_length must fit on the board".into(),
            ));
        }
        if game.player1.name.trim().is_empty() || game.player2.name.trim().is_empty() {
            return Err(ConfigError::Validation(
                "player names must not be empty".into(),
            ));
        }
        if game.player1.name == game.player2.name {
            return Err(ConfigError::Validation(
                "game.player1 and game.player2 must have different names".into(),
            ));
        }

        // Evaluator weights
        if ai.center_score < 0 {
            return Err(ConfigError::Validation(
                "ai.center_score must be >= 0".into(),
            ));
        }
        if ai.one_score <= 0 {
            return Err(ConfigError::Validation("ai.one_score must be > 0".into()));
        }
        if ai.two_score <= ai.one_score {
            return Err(ConfigError::Validation(
                "ai.two_score must be > ai.one_score".into(),
            ));
        }
        if ai.three_score <= ai.two_score {
            return Err(ConfigError::Validation(
                "ai.three_score must be > ai.two_score".into(),
            ));
        }
        let cells = (game.height * game.width) as i64;
        let heuristic_bound =
            i64::from(ai.three_score) * 4 * cells + i64::from(ai.center_score) * game.height as i64;
        if i64::from(ai.win_score) <= heuristic_bound {
            return Err(ConfigError::Validation(format!(
                "ai.win_score must be > {heuristic_bound} for a {}x{} board",
                game.height, game.width
            )));
        }

        // Search depth policy
        if ai.small_board_depth == 0 || ai.medium_board_depth == 0 || ai.large_board_depth == 0 {
            return Err(ConfigError::Validation(
                "ai search depths must be >= 1".into(),
            ));
        }
        // Hard scores a win as win_score plus the remaining depth.
        let max_depth = ai
            .small_board_depth
            .max(ai.medium_board_depth)
            .max(ai.large_board_depth);
        let win_ceiling = i64::from(i32::MAX) - i64::try_from(max_depth).unwrap_or(i64::MAX);
        if i64::from(ai.win_score) > win_ceiling {
            return Err(ConfigError::Validation(format!(
                "ai.win_score must be <= {win_ceiling} with a search depth of {max_depth}"
            )));
        }
        if ai.small_board_cells > ai.medium_board_cells {
            return Err(ConfigError::Validation(
                "ai.small_board_cells must be <= ai.medium_board_cells".into(),
            ));
        }

        Ok(())
    }

    /// Generate a TOML string with all default values (useful for creating
    /// example config files).
    pub fn default_toml() -> String {
        toml::to_string_pretty(&AppConfig::default()).expect("default config serializes")
    }
}
