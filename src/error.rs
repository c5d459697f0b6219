use std::path::PathBuf;

/// A move that was refused. The game is left untouched.
///
/// The messages are shown to players as-is, so columns are reported 1-based.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum MoveError {
    #[error("Column must be between 1 and {width}")]
    InvalidColumn { column: usize, width: usize },

    #[error("Column {} is full", .column + 1)]
    ColumnFull { column: usize },

    #[error("Game is over")]
    GameOver,
}

/// Errors raised when a game is set up with unusable parameters.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum GameError {
    #[error("board must be at least 1x1, got {height}x{width}")]
    EmptyBoard { height: usize, width: usize },

    #[error("winning length must be at least 2, got {0}")]
    WinningLengthTooShort(usize),

    #[error("both players are named '{0}'")]
    DuplicatePlayerName(String),
}

/// Errors raised when rebuilding a game from its flat snapshot.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SnapshotError {
    #[error("unknown board shape '{0}'")]
    UnknownShape(String),

    #[error("unknown AI difficulty '{0}'")]
    UnknownDifficulty(String),

    #[error("unknown player color '{0}'")]
    UnknownColor(String),

    #[error("'{0}' is not a player in this game")]
    UnknownPlayer(String),

    #[error("board cells are {rows}x{cols}, expected {height}x{width}")]
    CellDimensions {
        rows: usize,
        cols: usize,
        height: usize,
        width: usize,
    },

    #[error("winner '{0}' recorded for a game that is not over")]
    WinnerWithoutGameOver(String),

    #[error("board is full but the game is not over")]
    FullBoardNotOver,

    #[error("'{0}' already has a winning line but the game is not over")]
    LineWithoutGameOver(String),

    #[error("invalid game: {0}")]
    Game(#[from] GameError),
}

/// Errors that can occur while reading or writing saved games.
#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    #[error("failed to read saved game {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to parse saved game {path}: {source}")]
    Parse {
        path: PathBuf,
        source: serde_json::Error,
    },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Errors that can occur when loading configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read config file {path}: {source}")]
    FileRead {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to parse TOML: {0}")]
    TomlParse(#[from] toml::de::Error),

    #[error("config validation error: {0}")]
    Validation(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_move_error_display() {
        let err = MoveError::InvalidColumn { column: 9, width: 7 };
        assert_eq!(err.to_string(), "Column must be between 1 and 7");

        let err = MoveError::ColumnFull { column: 2 };
        assert_eq!(err.to_string(), "Column 3 is full");
    }

    #[test]
    fn test_snapshot_error_display() {
        let err = SnapshotError::CellDimensions {
            rows: 5,
            cols: 7,
            height: 6,
            width: 7,
        };
        assert_eq!(err.to_string(), "board cells are 5x7, expected 6x7");

        let err = SnapshotError::from(GameError::WinningLengthTooShort(1));
        assert_eq!(
            err.to_string(),
            "invalid game: winning length must be at least 2, got 1"
        );
    }

    #[test]
    fn test_storage_error_display() {
        let err = StorageError::Read {
            path: PathBuf::from("saves/abc.json"),
            source: std::io::Error::new(std::io::ErrorKind::NotFound, "gone"),
        };
        assert_eq!(err.to_string(), "failed to read saved game saves/abc.json: gone");
    }

    #[test]
    fn test_config_error_display() {
        let err = ConfigError::Validation("game.winning_length must be >= 2".to_string());
        assert_eq!(
            err.to_string(),
            "config validation error: game.winning_length must be >= 2"
        );
    }
}
